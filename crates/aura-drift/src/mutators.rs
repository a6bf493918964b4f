//! Pure lifecycle transitions for drift events.
//!
//! Each function takes the current record and returns the next one, or
//! `None` when the transition does not apply. The store swaps the returned
//! record in as a whole, so callers never see a half-applied transition.

use aura_types::{DriftEvent, DriftStatus, FlowStep, FlowStepStatus, FlowStepType, Trigger};
use chrono::NaiveDateTime;

/// Remediation summary recorded by a single user-initiated restore.
pub const MANUAL_RESTORE_ACTION: &str = "Manually restored from backup";

/// Remediation summary recorded by a bulk restore.
pub const BULK_RESTORE_ACTION: &str = "Bulk auto-restored from backup";

/// Who is restoring, and when.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreContext {
    /// Trigger recorded on events that do not carry one yet.
    pub trigger: Trigger,
    /// Remediation summary written to the event.
    pub ai_action: String,
    /// Time stamped on the new restore step.
    pub at: NaiveDateTime,
}

impl RestoreContext {
    /// Context for a user restoring one event.
    pub fn manual(at: NaiveDateTime) -> Self {
        Self {
            trigger: Trigger::Manual,
            ai_action: MANUAL_RESTORE_ACTION.to_owned(),
            at,
        }
    }

    /// Context for a bulk restore of every pending event.
    pub fn bulk(at: NaiveDateTime) -> Self {
        Self {
            trigger: Trigger::Automatic,
            ai_action: BULK_RESTORE_ACTION.to_owned(),
            at,
        }
    }
}

/// Resolve an event by putting its original version back.
///
/// Returns `None` if the event is already resolved. Otherwise the result is
/// resolved, carries `restored_version == original_version`, keeps an
/// existing trigger (or takes the context's), has every pending placeholder
/// dropped from its timeline, and ends with a restore step.
pub fn restore(event: &DriftEvent, ctx: &RestoreContext) -> Option<DriftEvent> {
    if event.is_resolved() {
        return None;
    }

    // Never stamp the restore step earlier than the timeline it closes.
    let at = event
        .flow_steps
        .iter()
        .map(|step| step.timestamp)
        .max()
        .map_or(ctx.at, |latest| latest.max(ctx.at));

    let mut flow_steps: Vec<FlowStep> = event
        .flow_steps
        .iter()
        .filter(|step| step.step_type != FlowStepType::Pending)
        .cloned()
        .collect();
    flow_steps.push(FlowStep::new(
        FlowStepType::Restore,
        event.original_version.clone(),
        at,
        FlowStepStatus::Resolved,
    ));

    Some(DriftEvent {
        status: DriftStatus::Resolved,
        restored_version: Some(event.original_version.clone()),
        trigger: Some(event.trigger.unwrap_or(ctx.trigger)),
        ai_action: ctx.ai_action.clone(),
        flow_steps,
        ..event.clone()
    })
}

/// Open a pending event for investigation.
///
/// Returns `None` unless the event is pending. The timeline is untouched.
pub fn investigate(event: &DriftEvent) -> Option<DriftEvent> {
    if !event.is_pending() {
        return None;
    }
    Some(DriftEvent {
        status: DriftStatus::Investigating,
        ..event.clone()
    })
}
