//! Configuration loading and typed config structures for the drift page.
//!
//! The canonical configuration lives in `aura-config.yaml` at the project
//! root. Every field has a default matching the dashboard's built-in
//! behaviour, so an empty file is a valid configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use aura_types::DriftSettings;
use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level dashboard configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AuraConfig {
    /// Initial drift monitoring settings.
    #[serde(default)]
    pub drift: DriftSettings,

    /// Simulated latency of remediation actions.
    #[serde(default)]
    pub latency: LatencyConfig,

    /// Backup action parameters.
    #[serde(default)]
    pub backup: BackupConfig,

    /// Export destination.
    #[serde(default)]
    pub export: ExportConfig,
}

impl AuraConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yml::from_str(yaml)?;
        Ok(config)
    }
}

/// A simulated wait inside a remediation action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Before a single restore is applied.
    Restore,
    /// Before each item of a bulk restore.
    BulkStep,
    /// After the last bulk item, before the completion notice.
    BulkCompletion,
    /// Between the two refresh notices.
    Refresh,
    /// Between the two investigation notices.
    Investigate,
    /// Between saving settings and echoing the sensitivity.
    SettingsEcho,
    /// Between branch creation progress notices.
    BranchStep,
    /// Before the branch creation success notice.
    BranchComplete,
    /// Between merge progress notices.
    MergeStep,
    /// Between backup progress notices.
    BackupStep,
}

/// Per-phase latency in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct LatencyConfig {
    /// When false, every wait completes immediately.
    #[serde(default = "default_true")]
    pub simulate: bool,

    /// Delay before a single restore is applied.
    #[serde(default = "default_restore_ms")]
    pub restore_ms: u64,

    /// Delay before each bulk restore item.
    #[serde(default = "default_bulk_step_ms")]
    pub bulk_step_ms: u64,

    /// Delay between the last bulk item and the completion notice.
    #[serde(default = "default_bulk_completion_ms")]
    pub bulk_completion_ms: u64,

    /// Duration of a refresh.
    #[serde(default = "default_refresh_ms")]
    pub refresh_ms: u64,

    /// Delay before the investigation follow-up notice.
    #[serde(default = "default_step_ms")]
    pub investigate_ms: u64,

    /// Delay before the sensitivity echo after saving settings.
    #[serde(default = "default_step_ms")]
    pub settings_echo_ms: u64,

    /// Delay between branch creation progress notices.
    #[serde(default = "default_step_ms")]
    pub branch_step_ms: u64,

    /// Delay before branch creation completes.
    #[serde(default = "default_branch_complete_ms")]
    pub branch_complete_ms: u64,

    /// Delay between merge progress notices.
    #[serde(default = "default_step_ms")]
    pub merge_step_ms: u64,

    /// Delay between backup progress notices.
    #[serde(default = "default_backup_step_ms")]
    pub backup_step_ms: u64,
}

impl LatencyConfig {
    /// Configured duration of a phase.
    pub const fn duration(&self, phase: Phase) -> Duration {
        let ms = match phase {
            Phase::Restore => self.restore_ms,
            Phase::BulkStep => self.bulk_step_ms,
            Phase::BulkCompletion => self.bulk_completion_ms,
            Phase::Refresh => self.refresh_ms,
            Phase::Investigate => self.investigate_ms,
            Phase::SettingsEcho => self.settings_echo_ms,
            Phase::BranchStep => self.branch_step_ms,
            Phase::BranchComplete => self.branch_complete_ms,
            Phase::MergeStep => self.merge_step_ms,
            Phase::BackupStep => self.backup_step_ms,
        };
        Duration::from_millis(ms)
    }
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            simulate: true,
            restore_ms: default_restore_ms(),
            bulk_step_ms: default_bulk_step_ms(),
            bulk_completion_ms: default_bulk_completion_ms(),
            refresh_ms: default_refresh_ms(),
            investigate_ms: default_step_ms(),
            settings_echo_ms: default_step_ms(),
            branch_step_ms: default_step_ms(),
            branch_complete_ms: default_branch_complete_ms(),
            merge_step_ms: default_step_ms(),
            backup_step_ms: default_backup_step_ms(),
        }
    }
}

/// Backup action parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct BackupConfig {
    /// Number of configuration files under monitoring.
    #[serde(default = "default_monitored_configurations")]
    pub monitored_configurations: u32,
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            monitored_configurations: default_monitored_configurations(),
        }
    }
}

/// Export destination.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExportConfig {
    /// Directory exported reports are written to.
    #[serde(default = "default_export_directory")]
    pub directory: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: default_export_directory(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions
// ---------------------------------------------------------------------------

const fn default_true() -> bool {
    true
}

const fn default_restore_ms() -> u64 {
    2000
}

const fn default_bulk_step_ms() -> u64 {
    1200
}

const fn default_bulk_completion_ms() -> u64 {
    500
}

const fn default_refresh_ms() -> u64 {
    1500
}

const fn default_step_ms() -> u64 {
    1000
}

const fn default_branch_complete_ms() -> u64 {
    1500
}

const fn default_backup_step_ms() -> u64 {
    2000
}

const fn default_monitored_configurations() -> u32 {
    247
}

fn default_export_directory() -> PathBuf {
    PathBuf::from("exports")
}

#[cfg(test)]
mod tests {
    use aura_types::Sensitivity;

    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = AuraConfig::default();
        assert_eq!(config.drift.sensitivity, Sensitivity::High);
        assert!(config.latency.simulate);
        assert_eq!(config.latency.restore_ms, 2000);
        assert_eq!(config.latency.bulk_step_ms, 1200);
        assert_eq!(config.backup.monitored_configurations, 247);
        assert_eq!(config.export.directory, PathBuf::from("exports"));
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
drift:
  sensitivity: medium
  auto_restore_config: false
  auto_restore_binary: true
  create_backup: false

latency:
  simulate: false
  restore_ms: 10
  bulk_step_ms: 20
  bulk_completion_ms: 5
  refresh_ms: 15
  investigate_ms: 1
  settings_echo_ms: 2
  branch_step_ms: 3
  branch_complete_ms: 4
  merge_step_ms: 6
  backup_step_ms: 7

backup:
  monitored_configurations: 12

export:
  directory: "/tmp/aura-exports"
"#;

        let config = AuraConfig::parse(yaml);
        assert!(config.is_ok());
        let config = config.ok().unwrap_or_default();

        assert_eq!(config.drift.sensitivity, Sensitivity::Medium);
        assert!(!config.drift.auto_restore_config);
        assert!(config.drift.auto_restore_binary);
        assert!(!config.latency.simulate);
        assert_eq!(config.latency.duration(Phase::BulkStep), Duration::from_millis(20));
        assert_eq!(config.latency.duration(Phase::BackupStep), Duration::from_millis(7));
        assert_eq!(config.backup.monitored_configurations, 12);
        assert_eq!(config.export.directory, PathBuf::from("/tmp/aura-exports"));
    }

    #[test]
    fn parse_minimal_yaml() {
        let yaml = "latency:\n  restore_ms: 50\n";
        let config = AuraConfig::parse(yaml);
        assert!(config.is_ok());
        let config = config.ok().unwrap_or_default();

        assert_eq!(config.latency.restore_ms, 50);
        // Everything else uses defaults
        assert_eq!(config.latency.bulk_step_ms, 1200);
        assert!(config.latency.simulate);
        assert_eq!(config.drift, DriftSettings::default());
    }

    #[test]
    fn parse_empty_yaml() {
        let config = AuraConfig::parse("");
        assert_eq!(config.ok(), Some(AuraConfig::default()));
    }

    #[test]
    fn parse_rejects_unknown_sensitivity() {
        let yaml = "drift:\n  sensitivity: extreme\n";
        assert!(matches!(
            AuraConfig::parse(yaml),
            Err(ConfigError::Yaml { .. })
        ));
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("aura-config.yaml");
        let config = AuraConfig::from_file(&path);
        assert!(config.is_ok(), "project config should parse: {config:?}");
        assert_eq!(config.ok(), Some(AuraConfig::default()));
    }
}
