//! Core records for the AURA drift management dashboard.
//!
//! Covers the drift event and its timeline, the derived statistics shown in
//! the page header, user notifications, and the drift page settings.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{
    DriftStatus, FlowStepStatus, FlowStepType, NotificationKind, Sensitivity, Severity, Trigger,
};
use crate::ids::{DriftEventId, NotificationId};

// ---------------------------------------------------------------------------
// Drift events
// ---------------------------------------------------------------------------

/// One entry in a drift event's timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct FlowStep {
    /// What happened at this step.
    #[serde(rename = "type")]
    pub step_type: FlowStepType,
    /// Version label of the resource after this step (opaque).
    pub version: String,
    /// When the step was recorded.
    #[ts(type = "string")]
    pub timestamp: NaiveDateTime,
    /// State shown next to the step.
    pub status: FlowStepStatus,
}

impl FlowStep {
    /// Build a timeline entry.
    pub fn new(
        step_type: FlowStepType,
        version: impl Into<String>,
        timestamp: NaiveDateTime,
        status: FlowStepStatus,
    ) -> Self {
        Self {
            step_type,
            version: version.into(),
            timestamp,
            status,
        }
    }
}

/// A detected divergence between the expected and observed state of a
/// monitored resource.
///
/// Invariant: `status == Resolved` if and only if `restored_version` is set
/// and the last flow step is a [`FlowStepType::Restore`]. See
/// [`DriftEvent::resolution_consistent`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct DriftEvent {
    /// Stable identifier.
    pub id: DriftEventId,
    /// Device hosting the monitored resource.
    pub device: String,
    /// Application owning the monitored resource.
    pub application: String,
    /// Open-ended category, e.g. "Configuration Drift" or "File Deletion".
    #[serde(rename = "type")]
    pub drift_type: String,
    /// Urgency.
    pub severity: Severity,
    /// When the divergence was detected.
    #[ts(type = "string")]
    pub detected_at: NaiveDateTime,
    /// What diverged.
    pub description: String,
    /// Known-good version label.
    pub original_version: String,
    /// Observed version label.
    pub drifted_version: String,
    /// Version put back on resolution; `None` until resolved.
    pub restored_version: Option<String>,
    /// Summary of the last remediation action.
    pub ai_action: String,
    /// Lifecycle status.
    pub status: DriftStatus,
    /// How the event was resolved. Assigned at resolution time when absent.
    pub trigger: Option<Trigger>,
    /// Chronological timeline.
    pub flow_steps: Vec<FlowStep>,
}

impl DriftEvent {
    /// Whether the event has reached its terminal state.
    pub fn is_resolved(&self) -> bool {
        self.status == DriftStatus::Resolved
    }

    /// Whether the event is awaiting action.
    pub fn is_pending(&self) -> bool {
        self.status == DriftStatus::Pending
    }

    /// The most recent timeline entry.
    pub fn last_step(&self) -> Option<&FlowStep> {
        self.flow_steps.last()
    }

    /// Whether the timeline still carries the synthetic pending placeholder.
    pub fn has_pending_step(&self) -> bool {
        self.flow_steps
            .iter()
            .any(|step| step.step_type == FlowStepType::Pending)
    }

    /// Check the resolution invariant.
    pub fn resolution_consistent(&self) -> bool {
        let restored_tail = self
            .last_step()
            .is_some_and(|step| step.step_type == FlowStepType::Restore);
        let fully_restored = self.restored_version.is_some() && restored_tail;
        self.is_resolved() == fully_restored
    }
}

/// Figures shown in the drift page header.
///
/// Always derived from the current snapshot, never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct DriftStats {
    /// Number of events.
    pub total_events: u32,
    /// Events in the resolved state.
    pub resolved_events: u32,
    /// Events in the pending state.
    pub pending_events: u32,
    /// Events with critical severity, regardless of status.
    pub critical_events: u32,
    /// Share of resolved events resolved automatically, 0 to 100.
    pub auto_resolved_pct: u8,
    /// Share of all events with a manual trigger, 0 to 100.
    pub manual_pct: u8,
}

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

/// A fire-and-forget message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Notification {
    /// Unique identifier.
    pub id: NotificationId,
    /// Text shown to the user.
    pub message: String,
    /// Visual kind.
    pub kind: NotificationKind,
    /// How long to show the message; `None` means the sink's default.
    pub duration_ms: Option<u64>,
    /// When the notification was raised.
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Create a notification stamped with the current time.
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            id: NotificationId::new(),
            message: message.into(),
            kind,
            duration_ms: None,
            created_at: Utc::now(),
        }
    }

    /// Set an explicit display duration.
    #[must_use]
    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Drift monitoring settings edited from the drift page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct DriftSettings {
    /// Detection sensitivity.
    #[serde(default)]
    pub sensitivity: Sensitivity,
    /// Restore configuration files automatically when they drift.
    #[serde(default = "default_true")]
    pub auto_restore_config: bool,
    /// Restore modified binaries automatically.
    #[serde(default)]
    pub auto_restore_binary: bool,
    /// Take a backup before any restore.
    #[serde(default = "default_true")]
    pub create_backup: bool,
}

impl Default for DriftSettings {
    fn default() -> Self {
        Self {
            sensitivity: Sensitivity::High,
            auto_restore_config: true,
            auto_restore_binary: false,
            create_backup: true,
        }
    }
}

const fn default_true() -> bool {
    true
}
