//! Request and result types for the drift page's configuration actions.
//!
//! Branch creation and merges are simulated: they validate their input,
//! report progress, and return a record of what would have happened. They
//! never touch the drift event store.

use aura_types::ConfigBranch;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DriftError;

/// Files that need manual attention when a merge does not auto-resolve.
pub const MANUAL_MERGE_CONFLICTS: u32 = 2;

/// Input for creating a configuration branch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchRequest {
    /// Name of the new branch. Must not be blank.
    pub branch_name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Branch the snapshot is taken from.
    #[serde(default)]
    pub base_branch: ConfigBranch,
}

impl BranchRequest {
    /// Check the request and return the trimmed branch name.
    ///
    /// # Errors
    ///
    /// Returns [`DriftError::Validation`] if the name is empty or only
    /// whitespace.
    pub fn validate(&self) -> Result<&str, DriftError> {
        let name = self.branch_name.trim();
        if name.is_empty() {
            return Err(DriftError::Validation {
                field: "branch_name",
                reason: "branch name must not be empty".to_owned(),
            });
        }
        Ok(name)
    }
}

/// A configuration branch created from the drift page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedBranch {
    /// Trimmed branch name.
    pub name: String,
    /// Description supplied with the request.
    pub description: String,
    /// Branch the snapshot was taken from.
    pub base_branch: ConfigBranch,
    /// When the branch was created.
    pub created_at: DateTime<Utc>,
}

/// Options for merging drifted configuration into a branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeOptions {
    /// Branch receiving the changes.
    #[serde(default)]
    pub target_branch: ConfigBranch,
    /// Take a backup before merging.
    #[serde(default = "default_true")]
    pub create_backup: bool,
    /// Resolve conflicts automatically instead of leaving them for review.
    #[serde(default)]
    pub auto_resolve_conflicts: bool,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            target_branch: ConfigBranch::Main,
            create_backup: true,
            auto_resolve_conflicts: false,
        }
    }
}

/// Outcome of a simulated merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeReport {
    /// Branch that received the changes.
    pub target_branch: ConfigBranch,
    /// Whether a backup was taken first.
    pub backup_created: bool,
    /// Conflicts left for manual resolution.
    pub manual_conflicts: u32,
}

impl MergeReport {
    /// What a merge with the given options produces.
    pub const fn for_options(options: MergeOptions) -> Self {
        Self {
            target_branch: options.target_branch,
            backup_created: options.create_backup,
            manual_conflicts: if options.auto_resolve_conflicts {
                0
            } else {
                MANUAL_MERGE_CONFLICTS
            },
        }
    }
}

/// Outcome of a simulated backup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupReport {
    /// Configuration files captured.
    pub configurations: u32,
    /// When the backup finished.
    pub completed_at: DateTime<Utc>,
}

const fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_branch_name_is_rejected() {
        for name in ["", "   ", "\t\n"] {
            let request = BranchRequest {
                branch_name: name.to_owned(),
                ..BranchRequest::default()
            };
            assert!(matches!(
                request.validate(),
                Err(DriftError::Validation {
                    field: "branch_name",
                    ..
                })
            ));
        }
    }

    #[test]
    fn branch_name_is_trimmed() {
        let request = BranchRequest {
            branch_name: "  hotfix-mysql  ".to_owned(),
            description: String::new(),
            base_branch: ConfigBranch::Production,
        };
        assert_eq!(request.validate().ok(), Some("hotfix-mysql"));
    }

    #[test]
    fn merge_report_follows_options() {
        let manual = MergeReport::for_options(MergeOptions::default());
        assert_eq!(manual.manual_conflicts, MANUAL_MERGE_CONFLICTS);
        assert!(manual.backup_created);

        let auto = MergeReport::for_options(MergeOptions {
            target_branch: ConfigBranch::Staging,
            create_backup: false,
            auto_resolve_conflicts: true,
        });
        assert_eq!(auto.manual_conflicts, 0);
        assert_eq!(auto.target_branch, ConfigBranch::Staging);
        assert!(!auto.backup_created);
    }

    #[test]
    fn merge_options_deserialize_with_defaults() {
        let parsed: Result<MergeOptions, _> =
            serde_json::from_str(r#"{"target_branch":"development"}"#);
        let options = parsed.unwrap_or_default();
        assert_eq!(options.target_branch, ConfigBranch::Development);
        assert!(options.create_backup);
        assert!(!options.auto_resolve_conflicts);
    }
}
