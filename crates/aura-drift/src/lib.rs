//! Drift event lifecycle for the AURA dashboard.
//!
//! This crate owns the collection of detected drift events and every
//! transition they go through:
//!
//! - **Store** ([`DriftStore`]) holding events in display order, with
//!   lookups and derived [`DriftStats`](aura_types::DriftStats)
//! - **Mutators** ([`mutators`]) computing the resolved form of an event
//!   without touching shared state
//! - **Service** ([`DriftService`]) sequencing user actions as
//!   `wait -> mutate -> notify` over a shared store
//! - **Export** ([`export`]) rendering the snapshot as JSON or CSV and
//!   handing it to an [`ExportSink`]
//!
//! # Architecture
//!
//! Events are replaced whole, never edited in place. The service holds the
//! store behind an `Arc<RwLock<_>>`; write locks cover one replacement and
//! are never held across a simulated latency wait, so readers always see
//! each event either before or after a restore.
//!
//! Progress messages go to a [`Notifier`]. [`NotificationLog`] keeps them
//! for a front end; [`TracingNotifier`] forwards them to `tracing`.

pub mod actions;
pub mod config;
pub mod error;
pub mod export;
pub mod latency;
pub mod mutators;
pub mod notify;
pub mod seed;
pub mod service;
pub mod stats;
pub mod store;

// Re-export primary types for convenience.
pub use config::{AuraConfig, ConfigError, LatencyConfig, Phase};
pub use error::DriftError;
pub use export::{DirectorySink, DriftReport, ExportArtifact, ExportSink, MemorySink};
pub use latency::Latency;
pub use notify::{NotificationLog, Notifier, TracingNotifier};
pub use service::{BulkRestoreReport, DriftService};
pub use store::{DriftStore, InvestigateOutcome, RestoreOutcome};
