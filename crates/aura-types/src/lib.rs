//! Shared type definitions for the AURA drift management dashboard.
//!
//! This crate is the single source of truth for the records exchanged
//! between the drift lifecycle store and the dashboard front end. Types
//! flow downstream to `TypeScript` via `ts-rs`.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe identifier wrappers
//! - [`enums`] -- Severity, status, trigger, timeline and settings enums
//! - [`structs`] -- Drift events, statistics, notifications, settings

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{
    ConfigBranch, DriftStatus, ExportFormat, FlowStepStatus, FlowStepType, NotificationKind,
    Sensitivity, Severity, Trigger,
};
pub use ids::{DriftEventId, NotificationId};
pub use structs::{DriftEvent, DriftSettings, DriftStats, FlowStep, Notification};
