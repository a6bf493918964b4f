//! Enumeration types for the AURA drift management dashboard.
//!
//! Wire names are lowercase so the dashboard front end can compare them
//! directly against the values it renders.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Drift events
// ---------------------------------------------------------------------------

/// Urgency of a drift event.
///
/// Variants are declared in ascending order of urgency, so the derived
/// [`Ord`] gives `Low < Medium < High < Critical`. No numeric weight is
/// attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum Severity {
    /// Cosmetic divergence.
    Low,
    /// Divergence worth reviewing.
    Medium,
    /// Divergence that affects application behaviour.
    High,
    /// Divergence that breaks the monitored resource.
    Critical,
}

impl Severity {
    /// Lowercase wire name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

/// Lifecycle status of a drift event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum DriftStatus {
    /// Detected and awaiting action.
    Pending,
    /// Opened for investigation. Can still be restored.
    Investigating,
    /// Restored to the original version. Terminal.
    Resolved,
}

impl DriftStatus {
    /// Lowercase wire name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Investigating => "investigating",
            Self::Resolved => "resolved",
        }
    }
}

/// How a drift event was (or will be) resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum Trigger {
    /// Resolved by an automated process (auto-restore, bulk restore).
    Automatic,
    /// Resolved by a human action.
    Manual,
}

/// Kind of entry in a drift event's timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum FlowStepType {
    /// The known-good baseline.
    Original,
    /// The detected divergence.
    Drift,
    /// The drifted artifact was isolated.
    Quarantine,
    /// The baseline was put back.
    Restore,
    /// Synthetic placeholder while awaiting action; replaced on resolution.
    Pending,
}

/// State shown next to a timeline entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum FlowStepStatus {
    /// Baseline in place.
    Stable,
    /// Divergence detected.
    Detected,
    /// Divergence detected and the resource is broken.
    Critical,
    /// Artifact isolated.
    Quarantined,
    /// Awaiting action.
    Pending,
    /// Baseline restored.
    Resolved,
}

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

/// Visual kind of a user notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum NotificationKind {
    /// Progress or informational notice.
    Info,
    /// An action completed.
    Success,
    /// An action completed but needs follow-up.
    Warning,
    /// An action was rejected.
    Error,
}

// ---------------------------------------------------------------------------
// Drift page settings and actions
// ---------------------------------------------------------------------------

/// How aggressively configuration changes are reported as drift.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum Sensitivity {
    /// Detect all changes.
    #[default]
    High,
    /// Ignore minor changes.
    Medium,
    /// Only critical changes.
    Low,
}

impl Sensitivity {
    /// Lowercase wire name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// Transfer format for a drift report export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum ExportFormat {
    /// Structured document (pretty-printed JSON).
    #[default]
    Json,
    /// Flat table (comma-separated values).
    Csv,
}

impl ExportFormat {
    /// File extension, without the dot.
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }

    /// MIME type of the rendered document.
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Csv => "text/csv",
        }
    }

    /// Uppercase label used in user-facing messages.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Csv => "CSV",
        }
    }
}

/// Configuration branch that merges and new branches can target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum ConfigBranch {
    /// Default branch.
    #[default]
    Main,
    /// Live configuration.
    Production,
    /// Pre-production configuration.
    Staging,
    /// Development configuration.
    Development,
}

impl ConfigBranch {
    /// Lowercase wire name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Production => "production",
            Self::Staging => "staging",
            Self::Development => "development",
        }
    }
}

impl core::fmt::Display for ConfigBranch {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_orders_by_urgency() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
        assert!(Severity::High < Severity::Critical);
        assert_eq!(
            [Severity::High, Severity::Critical, Severity::Low]
                .iter()
                .max()
                .copied(),
            Some(Severity::Critical)
        );
    }

    #[test]
    fn wire_names_are_lowercase() {
        let json = serde_json::to_string(&DriftStatus::Investigating).ok();
        assert_eq!(json.as_deref(), Some("\"investigating\""));
        let json = serde_json::to_string(&FlowStepType::Restore).ok();
        assert_eq!(json.as_deref(), Some("\"restore\""));

        let parsed: Result<Trigger, _> = serde_json::from_str("\"automatic\"");
        assert_eq!(parsed.ok(), Some(Trigger::Automatic));
    }

    #[test]
    fn as_str_matches_serde_name() {
        for severity in [
            Severity::Low,
            Severity::Medium,
            Severity::High,
            Severity::Critical,
        ] {
            let json = serde_json::to_string(&severity).unwrap_or_default();
            assert_eq!(json.trim_matches('"'), severity.as_str());
        }
        let json = serde_json::to_string(&ConfigBranch::Staging).unwrap_or_default();
        assert_eq!(json.trim_matches('"'), ConfigBranch::Staging.as_str());
    }

    #[test]
    fn export_format_metadata() {
        assert_eq!(ExportFormat::Json.extension(), "json");
        assert_eq!(ExportFormat::Csv.content_type(), "text/csv");
        assert_eq!(ExportFormat::Csv.label(), "CSV");
        assert_eq!(ExportFormat::default(), ExportFormat::Json);
    }
}
