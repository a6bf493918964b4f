//! The drift event store: the only owner of drift event records.
//!
//! Records are held in a map keyed by [`DriftEventId`] alongside an
//! insertion-order index, so reads come back in display order and every
//! transition replaces exactly one record.
//!
//! # Design
//!
//! - **Closed set**: events are loaded at construction; none are added or
//!   deleted afterwards.
//! - **Whole-record replacement**: transitions are computed by
//!   [`mutators`](crate::mutators) and swapped in with a single insert.
//! - **No cached figures**: [`DriftStore::stats`] recomputes on every call.

use std::collections::BTreeMap;

use aura_types::{DriftEvent, DriftEventId, DriftStats, DriftStatus, Severity};
use tracing::{debug, info, warn};

use crate::error::DriftError;
use crate::mutators::{self, RestoreContext};
use crate::seed;
use crate::stats;

/// Result of a restore request on an existing event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// The event was resolved; carries the new record.
    Restored(DriftEvent),
    /// The event was already resolved; carries the untouched record.
    AlreadyResolved(DriftEvent),
}

impl RestoreOutcome {
    /// The record after the request.
    pub const fn event(&self) -> &DriftEvent {
        match self {
            Self::Restored(event) | Self::AlreadyResolved(event) => event,
        }
    }

    /// Whether the request changed the store.
    pub const fn is_restored(&self) -> bool {
        matches!(self, Self::Restored(_))
    }
}

/// Result of an investigate request on an existing event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvestigateOutcome {
    /// The event moved from pending to investigating.
    Opened(DriftEvent),
    /// The event was already under investigation.
    AlreadyInvestigating(DriftEvent),
    /// The event is resolved; there is nothing to investigate.
    AlreadyResolved(DriftEvent),
}

impl InvestigateOutcome {
    /// The record after the request.
    pub const fn event(&self) -> &DriftEvent {
        match self {
            Self::Opened(event)
            | Self::AlreadyInvestigating(event)
            | Self::AlreadyResolved(event) => event,
        }
    }
}

/// In-memory drift event store.
#[derive(Debug, Clone, Default)]
pub struct DriftStore {
    /// Identifiers in insertion order.
    order: Vec<DriftEventId>,
    /// Records keyed by identifier.
    events: BTreeMap<DriftEventId, DriftEvent>,
}

impl DriftStore {
    /// Create an empty store.
    pub const fn new() -> Self {
        Self {
            order: Vec::new(),
            events: BTreeMap::new(),
        }
    }

    /// Create a store holding the built-in seed events.
    pub fn seeded() -> Self {
        Self::from_events(seed::seed_events()).unwrap_or_default()
    }

    /// Create a store from a list of events, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns [`DriftError::DuplicateEvent`] if two events share an id.
    pub fn from_events(events: impl IntoIterator<Item = DriftEvent>) -> Result<Self, DriftError> {
        let mut store = Self::new();
        for event in events {
            if store.events.contains_key(&event.id) {
                return Err(DriftError::DuplicateEvent { id: event.id });
            }
            store.order.push(event.id.clone());
            store.events.insert(event.id.clone(), event);
        }
        debug!(events = store.order.len(), "drift store loaded");
        Ok(store)
    }

    /// Number of events.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the store holds no events.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate over events in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &DriftEvent> + '_ {
        self.order.iter().filter_map(|id| self.events.get(id))
    }

    /// Snapshot of every event in insertion order.
    pub fn all(&self) -> Vec<DriftEvent> {
        self.iter().cloned().collect()
    }

    /// Look up one event.
    ///
    /// # Errors
    ///
    /// Returns [`DriftError::NotFound`] if the id is unknown.
    pub fn get(&self, id: &DriftEventId) -> Result<&DriftEvent, DriftError> {
        self.events.get(id).ok_or_else(|| {
            warn!(id = %id, "drift event lookup failed");
            DriftError::not_found(id)
        })
    }

    /// Events with the given status, in insertion order.
    pub fn by_status(&self, status: DriftStatus) -> Vec<&DriftEvent> {
        self.iter().filter(|e| e.status == status).collect()
    }

    /// Events with the given severity, in insertion order.
    pub fn by_severity(&self, severity: Severity) -> Vec<&DriftEvent> {
        self.iter().filter(|e| e.severity == severity).collect()
    }

    /// Identifiers of every pending event, in insertion order.
    pub fn pending_ids(&self) -> Vec<DriftEventId> {
        self.iter()
            .filter(|e| e.is_pending())
            .map(|e| e.id.clone())
            .collect()
    }

    /// Header figures for the current snapshot.
    pub fn stats(&self) -> DriftStats {
        stats::compute(self.iter())
    }

    /// Resolve one event by restoring its original version.
    ///
    /// An already-resolved event is reported as
    /// [`RestoreOutcome::AlreadyResolved`] and left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`DriftError::NotFound`] if the id is unknown.
    pub fn restore(
        &mut self,
        id: &DriftEventId,
        ctx: &RestoreContext,
    ) -> Result<RestoreOutcome, DriftError> {
        let current = self.get(id)?;
        match mutators::restore(current, ctx) {
            Some(next) => {
                info!(
                    id = %id,
                    restored_version = next.restored_version.as_deref().unwrap_or_default(),
                    trigger = ?next.trigger,
                    "drift event restored"
                );
                self.events.insert(id.clone(), next.clone());
                Ok(RestoreOutcome::Restored(next))
            }
            None => {
                debug!(id = %id, "restore skipped, event already resolved");
                Ok(RestoreOutcome::AlreadyResolved(current.clone()))
            }
        }
    }

    /// Restore each of the given events independently.
    ///
    /// One failing or already-resolved id never blocks the others. Results
    /// come back in the order of `ids`.
    pub fn restore_all<'a>(
        &mut self,
        ids: impl IntoIterator<Item = &'a DriftEventId>,
        ctx: &RestoreContext,
    ) -> Vec<Result<RestoreOutcome, DriftError>> {
        ids.into_iter().map(|id| self.restore(id, ctx)).collect()
    }

    /// Open a pending event for investigation.
    ///
    /// # Errors
    ///
    /// Returns [`DriftError::NotFound`] if the id is unknown.
    pub fn investigate(&mut self, id: &DriftEventId) -> Result<InvestigateOutcome, DriftError> {
        let current = self.get(id)?;
        if let Some(next) = mutators::investigate(current) {
            info!(id = %id, "drift event under investigation");
            self.events.insert(id.clone(), next.clone());
            return Ok(InvestigateOutcome::Opened(next));
        }
        Ok(if current.is_resolved() {
            InvestigateOutcome::AlreadyResolved(current.clone())
        } else {
            InvestigateOutcome::AlreadyInvestigating(current.clone())
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};

    use super::*;

    fn on_seed_day(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 15)
            .and_then(|day| day.and_hms_opt(h, m, s))
            .unwrap_or_default()
    }

    fn noon() -> NaiveDateTime {
        on_seed_day(12, 0, 0)
    }

    fn id(label: &str) -> DriftEventId {
        DriftEventId::from(label)
    }

    #[test]
    fn seeded_store_preserves_order() {
        let store = DriftStore::seeded();
        let ids: Vec<String> = store.iter().map(|e| e.id.to_string()).collect();
        assert_eq!(ids, vec!["DFT-001", "DFT-002", "DFT-003"]);
        assert_eq!(store.len(), 3);
        assert!(!store.is_empty());
    }

    #[test]
    fn from_events_rejects_duplicates() {
        let mut events = seed::seed_events();
        if let Some(first) = events.first().cloned() {
            events.push(first);
        }
        let result = DriftStore::from_events(events);
        assert!(matches!(
            result,
            Err(DriftError::DuplicateEvent { id }) if id.as_str() == "DFT-001"
        ));
    }

    #[test]
    fn get_unknown_is_not_found() {
        let store = DriftStore::seeded();
        assert!(matches!(
            store.get(&id("DFT-999")),
            Err(DriftError::NotFound { .. })
        ));
    }

    #[test]
    fn restore_is_idempotent() {
        let mut store = DriftStore::seeded();
        let ctx = RestoreContext::manual(noon());

        let first = store.restore(&id("DFT-002"), &ctx);
        assert!(first.as_ref().is_ok_and(RestoreOutcome::is_restored));
        let after_first = store.get(&id("DFT-002")).cloned().ok();

        let later = RestoreContext::manual(on_seed_day(23, 0, 0));
        let second = store.restore(&id("DFT-002"), &later);
        assert!(matches!(second, Ok(RestoreOutcome::AlreadyResolved(_))));
        assert_eq!(store.get(&id("DFT-002")).cloned().ok(), after_first);
    }

    #[test]
    fn restore_keeps_timeline_chronological() {
        let mut store = DriftStore::seeded();
        let early = RestoreContext::manual(on_seed_day(9, 0, 0));
        assert!(store.restore(&id("DFT-002"), &early).is_ok());

        let event = store.get(&id("DFT-002")).cloned().ok();
        let times: Vec<NaiveDateTime> = event
            .as_ref()
            .map(|e| e.flow_steps.iter().map(|step| step.timestamp).collect())
            .unwrap_or_default();
        assert_eq!(times.len(), 3);
        assert!(times.is_sorted(), "timeline out of order: {times:?}");
        assert_eq!(
            event.as_ref().and_then(DriftEvent::last_step).map(|s| s.step_type),
            Some(aura_types::FlowStepType::Restore)
        );

        let later = RestoreContext::bulk(on_seed_day(15, 0, 0));
        let mut other = DriftStore::seeded();
        assert!(other.restore(&id("DFT-002"), &later).is_ok());
        let last = other
            .get(&id("DFT-002"))
            .ok()
            .and_then(DriftEvent::last_step)
            .map(|s| s.timestamp);
        assert_eq!(last, Some(on_seed_day(15, 0, 0)));
    }

    #[test]
    fn restore_unknown_is_not_found() {
        let mut store = DriftStore::seeded();
        let result = store.restore(&id("DFT-404"), &RestoreContext::manual(noon()));
        assert!(matches!(result, Err(DriftError::NotFound { .. })));
        assert_eq!(store.stats().resolved_events, 2);
    }

    #[test]
    fn restore_all_is_independent_per_id() {
        let mut store = DriftStore::seeded();
        let ids = [id("DFT-001"), id("DFT-404"), id("DFT-002")];
        let results = store.restore_all(&ids, &RestoreContext::bulk(noon()));

        assert_eq!(results.len(), 3);
        assert!(matches!(
            results.first(),
            Some(Ok(RestoreOutcome::AlreadyResolved(_)))
        ));
        assert!(matches!(results.get(1), Some(Err(DriftError::NotFound { .. }))));
        assert!(matches!(results.get(2), Some(Ok(RestoreOutcome::Restored(_)))));
        assert_eq!(store.stats().pending_events, 0);
    }

    #[test]
    fn investigate_transitions_pending_only() {
        let mut store = DriftStore::seeded();
        assert!(matches!(
            store.investigate(&id("DFT-002")),
            Ok(InvestigateOutcome::Opened(_))
        ));
        assert!(matches!(
            store.investigate(&id("DFT-002")),
            Ok(InvestigateOutcome::AlreadyInvestigating(_))
        ));
        assert!(matches!(
            store.investigate(&id("DFT-001")),
            Ok(InvestigateOutcome::AlreadyResolved(_))
        ));
        assert!(store.pending_ids().is_empty());
        assert_eq!(store.by_status(DriftStatus::Investigating).len(), 1);
    }

    #[test]
    fn filtered_views() {
        let store = DriftStore::seeded();
        assert_eq!(store.by_severity(Severity::Critical).len(), 1);
        assert_eq!(store.by_status(DriftStatus::Resolved).len(), 2);
        assert_eq!(store.pending_ids(), vec![id("DFT-002")]);
    }
}
