//! Built-in drift events shown when the dashboard starts.
//!
//! Three events on three devices: a configuration drift that was
//! auto-restored (`DFT-001`), a critical file deletion awaiting review
//! (`DFT-002`), and a binary modification that was quarantined and restored
//! (`DFT-003`).

use aura_types::{
    DriftEvent, DriftEventId, DriftStatus, FlowStep, FlowStepStatus, FlowStepType, Severity,
    Trigger,
};
use chrono::{NaiveDate, NaiveDateTime};

/// Helper to build a timestamp on the seed day.
fn at(hour: u32, minute: u32, second: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 15)
        .and_then(|day| day.and_hms_opt(hour, minute, second))
        .unwrap_or_default()
}

/// Helper to build a timeline entry.
fn step(
    step_type: FlowStepType,
    version: &str,
    timestamp: NaiveDateTime,
    status: FlowStepStatus,
) -> FlowStep {
    FlowStep::new(step_type, version, timestamp, status)
}

/// The seed events, in display order.
pub fn seed_events() -> Vec<DriftEvent> {
    vec![
        DriftEvent {
            id: DriftEventId::from("DFT-001"),
            device: "WS-Marketing-01".to_owned(),
            application: "Adobe Photoshop".to_owned(),
            drift_type: "Configuration Drift".to_owned(),
            severity: Severity::High,
            detected_at: at(14, 32, 15),
            description: "Config file modified: preferences.xml".to_owned(),
            original_version: "v24.1.0-stable".to_owned(),
            drifted_version: "v24.1.0-modified".to_owned(),
            restored_version: Some("v24.1.0-stable".to_owned()),
            ai_action: "Auto-restored from backup".to_owned(),
            status: DriftStatus::Resolved,
            trigger: Some(Trigger::Automatic),
            flow_steps: vec![
                step(
                    FlowStepType::Original,
                    "v24.1.0-stable",
                    at(14, 30, 0),
                    FlowStepStatus::Stable,
                ),
                step(
                    FlowStepType::Drift,
                    "v24.1.0-modified",
                    at(14, 32, 15),
                    FlowStepStatus::Detected,
                ),
                step(
                    FlowStepType::Restore,
                    "v24.1.0-stable",
                    at(14, 32, 45),
                    FlowStepStatus::Resolved,
                ),
            ],
        },
        DriftEvent {
            id: DriftEventId::from("DFT-002"),
            device: "SRV-Database-01".to_owned(),
            application: "MySQL Server".to_owned(),
            drift_type: "File Deletion".to_owned(),
            severity: Severity::Critical,
            detected_at: at(13, 45, 22),
            description: "Critical file deleted: my.cnf".to_owned(),
            original_version: "v8.0.35-original".to_owned(),
            drifted_version: "missing".to_owned(),
            restored_version: None,
            ai_action: "Pending manual review".to_owned(),
            status: DriftStatus::Pending,
            trigger: Some(Trigger::Manual),
            flow_steps: vec![
                step(
                    FlowStepType::Original,
                    "v8.0.35-original",
                    at(13, 40, 0),
                    FlowStepStatus::Stable,
                ),
                step(
                    FlowStepType::Drift,
                    "missing",
                    at(13, 45, 22),
                    FlowStepStatus::Critical,
                ),
                step(
                    FlowStepType::Pending,
                    "awaiting action",
                    at(13, 45, 30),
                    FlowStepStatus::Pending,
                ),
            ],
        },
        DriftEvent {
            id: DriftEventId::from("DFT-003"),
            device: "WS-Finance-03".to_owned(),
            application: "QuickBooks".to_owned(),
            drift_type: "Binary Modification".to_owned(),
            severity: Severity::Medium,
            detected_at: at(12, 18, 7),
            description: "Executable checksum mismatch".to_owned(),
            original_version: "v2023.2.1-original".to_owned(),
            drifted_version: "v2023.2.1-modified".to_owned(),
            restored_version: Some("v2023.2.1-original".to_owned()),
            ai_action: "Quarantined and restored".to_owned(),
            status: DriftStatus::Resolved,
            trigger: Some(Trigger::Automatic),
            flow_steps: vec![
                step(
                    FlowStepType::Original,
                    "v2023.2.1-original",
                    at(12, 15, 0),
                    FlowStepStatus::Stable,
                ),
                step(
                    FlowStepType::Drift,
                    "v2023.2.1-modified",
                    at(12, 18, 7),
                    FlowStepStatus::Detected,
                ),
                step(
                    FlowStepType::Quarantine,
                    "quarantined",
                    at(12, 18, 15),
                    FlowStepStatus::Quarantined,
                ),
                step(
                    FlowStepType::Restore,
                    "v2023.2.1-original",
                    at(12, 18, 30),
                    FlowStepStatus::Resolved,
                ),
            ],
        },
    ]
}
