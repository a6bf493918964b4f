//! Drift report export.
//!
//! A report is the current event snapshot plus derived statistics and the
//! active settings, rendered as pretty JSON or a flat CSV table. Rendering
//! only reads; handing the artifact to an [`ExportSink`] is the sole side
//! effect.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use aura_types::{DriftEvent, DriftSettings, DriftStats, ExportFormat};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::config::ExportConfig;
use crate::error::DriftError;

/// Column header of the CSV export.
pub const CSV_HEADER: &str = "ID,Device,Application,Type,Severity,Status,Timestamp,Description,Original Version,Drifted Version";

/// Everything an export contains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DriftReport {
    /// When the report was generated.
    pub timestamp: DateTime<Utc>,
    /// Events in store order.
    pub events: Vec<DriftEvent>,
    /// Header figures for `events`.
    pub statistics: DriftStats,
    /// Settings active at generation time.
    pub config_settings: DriftSettings,
}

/// A rendered report, ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    /// Suggested file name, e.g. `drift-flow-2024-01-15.json`.
    pub filename: String,
    /// MIME type of `body`.
    pub content_type: &'static str,
    /// Rendered document.
    pub body: String,
}

/// Render a report in the requested format.
///
/// # Errors
///
/// Returns [`DriftError::Serialization`] if JSON rendering fails.
pub fn render(report: &DriftReport, format: ExportFormat) -> Result<ExportArtifact, DriftError> {
    let body = match format {
        ExportFormat::Json => serde_json::to_string_pretty(report)?,
        ExportFormat::Csv => render_csv(&report.events),
    };
    Ok(ExportArtifact {
        filename: format!(
            "drift-flow-{}.{}",
            report.timestamp.format("%Y-%m-%d"),
            format.extension()
        ),
        content_type: format.content_type(),
        body,
    })
}

/// Render events as CSV, one row per event after [`CSV_HEADER`].
pub fn render_csv(events: &[DriftEvent]) -> String {
    let mut out = String::from(CSV_HEADER);
    for event in events {
        let detected_at = event.detected_at.format("%Y-%m-%d %H:%M:%S").to_string();
        let row = [
            csv_field(event.id.as_str()),
            csv_field(&event.device),
            csv_field(&event.application),
            csv_field(&event.drift_type),
            csv_field(event.severity.as_str()),
            csv_field(event.status.as_str()),
            csv_field(&detected_at),
            quoted(&event.description),
            csv_field(&event.original_version),
            csv_field(&event.drifted_version),
        ];
        out.push('\n');
        out.push_str(&row.join(","));
    }
    out
}

/// Quote a field only if it contains a delimiter, quote, or line break.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        quoted(value)
    } else {
        value.to_owned()
    }
}

/// Always quote, doubling embedded quotes.
fn quoted(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

// ---------------------------------------------------------------------------
// Sinks
// ---------------------------------------------------------------------------

/// Destination for rendered reports.
pub trait ExportSink: Send + Sync {
    /// Hand over one artifact.
    ///
    /// # Errors
    ///
    /// Returns [`DriftError::Export`] if the artifact cannot be stored.
    fn deliver(&self, artifact: &ExportArtifact) -> Result<(), DriftError>;
}

/// Keeps delivered artifacts in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    delivered: Mutex<Vec<ExportArtifact>>,
}

impl MemorySink {
    /// Create an empty sink.
    pub const fn new() -> Self {
        Self {
            delivered: Mutex::new(Vec::new()),
        }
    }

    /// Every artifact delivered so far, oldest first.
    pub fn delivered(&self) -> Vec<ExportArtifact> {
        self.delivered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ExportSink for MemorySink {
    fn deliver(&self, artifact: &ExportArtifact) -> Result<(), DriftError> {
        self.delivered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(artifact.clone());
        Ok(())
    }
}

/// Writes artifacts into a directory, creating it on first use.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    directory: PathBuf,
}

impl DirectorySink {
    /// Write into `directory`.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Write into the configured export directory.
    pub fn from_config(config: &ExportConfig) -> Self {
        Self::new(config.directory.clone())
    }

    /// Target directory.
    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

impl ExportSink for DirectorySink {
    fn deliver(&self, artifact: &ExportArtifact) -> Result<(), DriftError> {
        std::fs::create_dir_all(&self.directory)?;
        let path = self.directory.join(&artifact.filename);
        std::fs::write(&path, artifact.body.as_bytes())?;
        info!(path = %path.display(), bytes = artifact.body.len(), "drift report written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::seed::seed_events;
    use crate::stats;

    fn report() -> DriftReport {
        let events = seed_events();
        DriftReport {
            timestamp: Utc
                .with_ymd_and_hms(2024, 1, 16, 8, 0, 0)
                .single()
                .unwrap_or_default(),
            statistics: stats::compute(&events),
            events,
            config_settings: DriftSettings::default(),
        }
    }

    #[test]
    fn json_export_contains_events_and_statistics() {
        let artifact = render(&report(), ExportFormat::Json);
        assert!(artifact.is_ok());
        let artifact = artifact.ok();
        let artifact = artifact.as_ref();

        assert_eq!(
            artifact.map(|a| a.filename.as_str()),
            Some("drift-flow-2024-01-16.json")
        );
        assert_eq!(artifact.map(|a| a.content_type), Some("application/json"));

        let value: serde_json::Value = artifact
            .and_then(|a| serde_json::from_str(&a.body).ok())
            .unwrap_or_default();
        assert_eq!(
            value.get("events").and_then(|e| e.as_array()).map(Vec::len),
            Some(3)
        );
        assert_eq!(
            value
                .pointer("/statistics/pending_events")
                .and_then(serde_json::Value::as_u64),
            Some(1)
        );
        assert_eq!(
            value
                .pointer("/config_settings/sensitivity")
                .and_then(serde_json::Value::as_str),
            Some("high")
        );
    }

    #[test]
    fn csv_export_has_header_and_one_row_per_event() {
        let artifact = render(&report(), ExportFormat::Csv);
        let body = artifact.map(|a| a.body).unwrap_or_default();
        let lines: Vec<&str> = body.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines.first().copied(), Some(CSV_HEADER));
        assert_eq!(
            lines.get(2).copied(),
            Some(
                "DFT-002,SRV-Database-01,MySQL Server,File Deletion,critical,pending,\
                 2024-01-15 13:45:22,\"Critical file deleted: my.cnf\",v8.0.35-original,missing"
            )
        );
    }

    #[test]
    fn csv_fields_are_escaped() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(quoted("no commas"), "\"no commas\"");
    }

    #[test]
    fn memory_sink_records_deliveries() {
        let sink = MemorySink::new();
        let artifact = ExportArtifact {
            filename: "drift-flow-2024-01-16.csv".to_owned(),
            content_type: "text/csv",
            body: CSV_HEADER.to_owned(),
        };
        assert!(sink.deliver(&artifact).is_ok());
        assert_eq!(sink.delivered(), vec![artifact]);
    }

    #[test]
    fn directory_sink_writes_file() {
        let dir = std::env::temp_dir().join(format!("aura-export-{}", std::process::id()));
        let sink = DirectorySink::new(&dir);
        let artifact = ExportArtifact {
            filename: "drift-flow-test.csv".to_owned(),
            content_type: "text/csv",
            body: CSV_HEADER.to_owned(),
        };

        assert!(sink.deliver(&artifact).is_ok());
        let written = std::fs::read_to_string(dir.join("drift-flow-test.csv")).ok();
        assert_eq!(written.as_deref(), Some(CSV_HEADER));
        let _ = std::fs::remove_dir_all(&dir);
    }
}
