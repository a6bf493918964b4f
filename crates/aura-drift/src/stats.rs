//! Derived drift statistics.
//!
//! Figures are recomputed from the snapshot on every read. Event volume is
//! small, so nothing is cached and the numbers can never go stale.

use aura_types::{DriftEvent, DriftStats, DriftStatus, Severity, Trigger};

/// Compute the header figures for a set of events.
///
/// Percentages round half up and are 0 when their denominator is 0.
pub fn compute<'a>(events: impl IntoIterator<Item = &'a DriftEvent>) -> DriftStats {
    let mut total = 0_u32;
    let mut resolved = 0_u32;
    let mut pending = 0_u32;
    let mut critical = 0_u32;
    let mut auto_resolved = 0_u32;
    let mut manual = 0_u32;

    for event in events {
        total = total.saturating_add(1);
        match event.status {
            DriftStatus::Resolved => {
                resolved = resolved.saturating_add(1);
                if event.trigger == Some(Trigger::Automatic) {
                    auto_resolved = auto_resolved.saturating_add(1);
                }
            }
            DriftStatus::Pending => pending = pending.saturating_add(1),
            DriftStatus::Investigating => {}
        }
        if event.severity == Severity::Critical {
            critical = critical.saturating_add(1);
        }
        if event.trigger == Some(Trigger::Manual) {
            manual = manual.saturating_add(1);
        }
    }

    DriftStats {
        total_events: total,
        resolved_events: resolved,
        pending_events: pending,
        critical_events: critical,
        auto_resolved_pct: percent(auto_resolved, resolved),
        manual_pct: percent(manual, total),
    }
}

/// `round(100 * part / whole)`, half up, clamped to `0..=100`.
///
/// Returns 0 when `whole` is 0.
pub fn percent(part: u32, whole: u32) -> u8 {
    if whole == 0 {
        return 0;
    }
    let part = u64::from(part.min(whole));
    let whole = u64::from(whole);
    let rounded = part
        .saturating_mul(100)
        .saturating_add(whole / 2)
        .checked_div(whole)
        .unwrap_or(0);
    u8::try_from(rounded.min(100)).unwrap_or(100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_handles_zero_denominator() {
        assert_eq!(percent(0, 0), 0);
        assert_eq!(percent(5, 0), 0);
    }

    #[test]
    fn percent_rounds_half_up() {
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(1, 2), 50);
        assert_eq!(percent(1, 8), 13); // 12.5
        assert_eq!(percent(3, 3), 100);
    }

    #[test]
    fn percent_never_exceeds_hundred() {
        assert_eq!(percent(7, 3), 100);
        assert_eq!(percent(u32::MAX, u32::MAX), 100);
    }

    #[test]
    fn empty_collection_is_all_zero() {
        let stats = compute(std::iter::empty());
        assert_eq!(stats, DriftStats::default());
    }
}
