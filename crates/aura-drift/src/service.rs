//! The drift service: what the dashboard calls when the user acts.
//!
//! [`DriftService`] owns the shared [`DriftStore`] and sequences every user
//! action as `wait -> mutate -> notify`. The store sits behind an
//! [`Arc`]`<`[`RwLock`]`>` so the presentation layer can hold a handle to
//! it and re-read after each notification.
//!
//! # Atomicity
//!
//! The write lock is taken only around a single record replacement and is
//! never held across a latency wait. A reader running between two steps of
//! a bulk restore sees each event either fully pending or fully resolved.
//!
//! # Latency
//!
//! Waits go through the injected [`Latency`]. Outcomes are identical with
//! [`Latency::Immediate`]; only the pacing of notifications changes.

use std::sync::Arc;

use aura_types::{
    DriftEvent, DriftEventId, DriftSettings, DriftStats, ExportFormat, NotificationKind,
};
use chrono::{Local, NaiveDateTime, Timelike, Utc};
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::actions::{BackupReport, BranchRequest, CreatedBranch, MergeOptions, MergeReport};
use crate::config::{AuraConfig, BackupConfig, Phase};
use crate::error::DriftError;
use crate::export::{self, DriftReport, ExportArtifact, ExportSink};
use crate::latency::Latency;
use crate::mutators::RestoreContext;
use crate::notify::Notifier;
use crate::store::{DriftStore, InvestigateOutcome, RestoreOutcome};

/// Display duration of the refresh progress notice.
const REFRESH_NOTICE_MS: u64 = 1500;
/// Display duration of the refresh completion notice.
const REFRESH_DONE_MS: u64 = 2000;
/// Display duration of backup progress notices.
const BACKUP_NOTICE_MS: u64 = 2000;
/// Display duration of the backup completion notice.
const BACKUP_DONE_MS: u64 = 3000;

/// Outcome of a bulk restore.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkRestoreReport {
    /// Events resolved by this run, in the order they were processed.
    pub restored: Vec<DriftEventId>,
    /// Events in the snapshot that were no longer restorable when reached.
    pub skipped: Vec<DriftEventId>,
}

impl BulkRestoreReport {
    /// Whether the pending snapshot was empty.
    pub fn nothing_to_restore(&self) -> bool {
        self.restored.is_empty() && self.skipped.is_empty()
    }
}

/// Caller-facing facade over the drift event store.
pub struct DriftService {
    /// Shared event store.
    store: Arc<RwLock<DriftStore>>,
    /// Current drift page settings.
    settings: RwLock<DriftSettings>,
    /// Pacing of simulated work.
    latency: Latency,
    /// Where progress messages go.
    notifier: Arc<dyn Notifier>,
    /// Backup action parameters.
    backup: BackupConfig,
}

impl DriftService {
    /// Create a service over `store` with default settings and latency.
    pub fn new(store: DriftStore, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            settings: RwLock::new(DriftSettings::default()),
            latency: Latency::default(),
            notifier,
            backup: BackupConfig::default(),
        }
    }

    /// Create a service configured from `config`.
    pub fn from_config(config: &AuraConfig, store: DriftStore, notifier: Arc<dyn Notifier>) -> Self {
        info!(
            latency = Latency::from_config(&config.latency).name(),
            sensitivity = config.drift.sensitivity.as_str(),
            monitored_configurations = config.backup.monitored_configurations,
            "drift service configured"
        );
        Self {
            store: Arc::new(RwLock::new(store)),
            settings: RwLock::new(config.drift),
            latency: Latency::from_config(&config.latency),
            notifier,
            backup: config.backup,
        }
    }

    /// Replace the latency strategy.
    #[must_use]
    pub const fn with_latency(mut self, latency: Latency) -> Self {
        self.latency = latency;
        self
    }

    /// Handle to the shared store.
    pub fn store(&self) -> Arc<RwLock<DriftStore>> {
        Arc::clone(&self.store)
    }

    /// Snapshot of every event in display order.
    pub async fn events(&self) -> Vec<DriftEvent> {
        self.store.read().await.all()
    }

    /// Copy of one event.
    ///
    /// # Errors
    ///
    /// Returns [`DriftError::NotFound`] if the id is unknown.
    pub async fn event(&self, id: &DriftEventId) -> Result<DriftEvent, DriftError> {
        self.store.read().await.get(id).cloned()
    }

    /// Header figures for the current snapshot.
    pub async fn stats(&self) -> DriftStats {
        self.store.read().await.stats()
    }

    /// Current drift page settings.
    pub async fn settings(&self) -> DriftSettings {
        *self.settings.read().await
    }

    // -----------------------------------------------------------------------
    // Restore
    // -----------------------------------------------------------------------

    /// Restore one event on the user's behalf.
    ///
    /// # Errors
    ///
    /// Returns [`DriftError::NotFound`] if the id is unknown.
    pub async fn restore_event(&self, id: &DriftEventId) -> Result<RestoreOutcome, DriftError> {
        let current = self.lookup(id).await?;
        if current.is_resolved() {
            self.notifier
                .send(NotificationKind::Info, "Event already resolved".to_owned());
            return Ok(RestoreOutcome::AlreadyResolved(current));
        }

        self.notifier
            .send(NotificationKind::Info, format!("Restoring {id}..."));
        self.latency.wait(Phase::Restore).await;

        let ctx = RestoreContext::manual(step_time());
        let outcome = self.store.write().await.restore(id, &ctx)?;
        match &outcome {
            RestoreOutcome::Restored(_) => self
                .notifier
                .send(NotificationKind::Success, format!("{id} restored successfully")),
            RestoreOutcome::AlreadyResolved(_) => self
                .notifier
                .send(NotificationKind::Info, "Event already resolved".to_owned()),
        }
        Ok(outcome)
    }

    /// Restore every event that is pending right now.
    ///
    /// The pending set is captured once at the start; each event is then
    /// restored on its own, so one skipped event never blocks the rest.
    pub async fn bulk_restore(&self) -> BulkRestoreReport {
        let snapshot = self.store.read().await.pending_ids();
        let mut report = BulkRestoreReport::default();

        if snapshot.is_empty() {
            self.notifier
                .send(NotificationKind::Info, "No pending events to restore".to_owned());
            return report;
        }

        info!(count = snapshot.len(), "bulk restore started");
        self.notifier.send(
            NotificationKind::Info,
            format!("Restoring {} pending events...", snapshot.len()),
        );

        for id in &snapshot {
            self.latency.wait(Phase::BulkStep).await;
            let ctx = RestoreContext::bulk(step_time());
            let result = self.store.write().await.restore(id, &ctx);
            match result {
                Ok(RestoreOutcome::Restored(_)) => {
                    self.notifier
                        .send(NotificationKind::Success, format!("{id} restored successfully"));
                    report.restored.push(id.clone());
                }
                Ok(RestoreOutcome::AlreadyResolved(_)) => {
                    report.skipped.push(id.clone());
                }
                Err(e) => {
                    warn!(id = %id, error = %e, "bulk restore item skipped");
                    report.skipped.push(id.clone());
                }
            }
        }

        self.latency.wait(Phase::BulkCompletion).await;
        self.notifier.send(
            NotificationKind::Success,
            "All pending events restored successfully".to_owned(),
        );
        info!(
            restored = report.restored.len(),
            skipped = report.skipped.len(),
            "bulk restore finished"
        );
        report
    }

    // -----------------------------------------------------------------------
    // Investigation and refresh
    // -----------------------------------------------------------------------

    /// Open an event for investigation.
    ///
    /// # Errors
    ///
    /// Returns [`DriftError::NotFound`] if the id is unknown.
    pub async fn investigate_event(
        &self,
        id: &DriftEventId,
    ) -> Result<InvestigateOutcome, DriftError> {
        self.lookup(id).await?;
        self.notifier.send(
            NotificationKind::Info,
            format!("Opening detailed investigation for {id}"),
        );
        let outcome = self.store.write().await.investigate(id)?;

        self.latency.wait(Phase::Investigate).await;
        self.notifier.send(
            NotificationKind::Info,
            "Investigation panel would open with detailed logs and analysis".to_owned(),
        );
        Ok(outcome)
    }

    /// Re-read the event list and return fresh figures.
    pub async fn refresh(&self) -> DriftStats {
        self.notifier.send_for(
            NotificationKind::Info,
            "Refreshing drift events...".to_owned(),
            REFRESH_NOTICE_MS,
        );
        self.latency.wait(Phase::Refresh).await;
        let stats = self.stats().await;
        self.notifier.send_for(
            NotificationKind::Success,
            "Drift events refreshed successfully".to_owned(),
            REFRESH_DONE_MS,
        );
        stats
    }

    // -----------------------------------------------------------------------
    // Export
    // -----------------------------------------------------------------------

    /// Render the current snapshot and hand it to `sink`.
    ///
    /// # Errors
    ///
    /// Returns [`DriftError::Serialization`] if rendering fails or
    /// [`DriftError::Export`] if the sink fails.
    pub async fn export(
        &self,
        format: ExportFormat,
        sink: &dyn ExportSink,
    ) -> Result<ExportArtifact, DriftError> {
        let config_settings = self.settings().await;
        let report = {
            let store = self.store.read().await;
            DriftReport {
                timestamp: Utc::now(),
                events: store.all(),
                statistics: store.stats(),
                config_settings,
            }
        };

        let delivered = export::render(&report, format)
            .and_then(|artifact| sink.deliver(&artifact).map(|()| artifact));
        match delivered {
            Ok(artifact) => {
                info!(
                    filename = %artifact.filename,
                    events = report.events.len(),
                    "drift report exported"
                );
                self.notifier.send(
                    NotificationKind::Success,
                    format!("Drift flow exported as {} successfully", format.label()),
                );
                Ok(artifact)
            }
            Err(e) => {
                warn!(error = %e, "drift report export failed");
                self.notifier
                    .send(NotificationKind::Error, format!("Export failed: {e}"));
                Err(e)
            }
        }
    }

    // -----------------------------------------------------------------------
    // Settings and configuration actions
    // -----------------------------------------------------------------------

    /// Replace the drift page settings.
    pub async fn save_settings(&self, settings: DriftSettings) {
        *self.settings.write().await = settings;
        info!(
            sensitivity = settings.sensitivity.as_str(),
            auto_restore_config = settings.auto_restore_config,
            auto_restore_binary = settings.auto_restore_binary,
            create_backup = settings.create_backup,
            "drift settings saved"
        );
        self.notifier.send(
            NotificationKind::Success,
            "Drift management configuration saved successfully".to_owned(),
        );
        self.latency.wait(Phase::SettingsEcho).await;
        self.notifier.send(
            NotificationKind::Info,
            format!("Monitoring sensitivity: {}", settings.sensitivity.as_str()),
        );
    }

    /// Create a configuration branch for testing changes in isolation.
    ///
    /// # Errors
    ///
    /// Returns [`DriftError::Validation`] if the branch name is blank;
    /// nothing else happens in that case.
    pub async fn create_branch(&self, request: &BranchRequest) -> Result<CreatedBranch, DriftError> {
        let name = match request.validate() {
            Ok(name) => name.to_owned(),
            Err(e) => {
                warn!(error = %e, "branch request rejected");
                self.notifier
                    .send(NotificationKind::Error, "Please enter a branch name".to_owned());
                return Err(e);
            }
        };

        self.notifier
            .send(NotificationKind::Info, format!("Creating branch \"{name}\"..."));
        self.latency.wait(Phase::BranchStep).await;
        self.notifier.send(
            NotificationKind::Info,
            "Taking snapshot of current configurations...".to_owned(),
        );
        self.latency.wait(Phase::BranchComplete).await;

        let branch = CreatedBranch {
            name,
            description: request.description.clone(),
            base_branch: request.base_branch,
            created_at: Utc::now(),
        };
        info!(name = %branch.name, base = %branch.base_branch, "configuration branch created");
        self.notifier.send(
            NotificationKind::Success,
            format!("Branch \"{}\" created successfully", branch.name),
        );
        self.notifier.send(
            NotificationKind::Info,
            "You can now test configuration changes in isolation".to_owned(),
        );
        Ok(branch)
    }

    /// Merge drifted configuration into a branch.
    pub async fn merge(&self, options: MergeOptions) -> MergeReport {
        let report = MergeReport::for_options(options);

        self.notifier.send(
            NotificationKind::Info,
            format!("Initiating merge to {} branch...", options.target_branch),
        );
        self.latency.wait(Phase::MergeStep).await;
        if options.create_backup {
            self.notifier
                .send(NotificationKind::Info, "Creating backup before merge...".to_owned());
        }
        self.latency.wait(Phase::MergeStep).await;
        self.notifier.send(
            NotificationKind::Info,
            "Analyzing configuration changes...".to_owned(),
        );
        self.latency.wait(Phase::MergeStep).await;
        if report.manual_conflicts == 0 {
            self.notifier
                .send(NotificationKind::Info, "Auto-resolving conflicts...".to_owned());
        } else {
            self.notifier.send(
                NotificationKind::Warning,
                format!(
                    "Manual conflict resolution required for {} files",
                    report.manual_conflicts
                ),
            );
        }
        self.latency.wait(Phase::MergeStep).await;
        info!(
            target = %report.target_branch,
            backup = report.backup_created,
            manual_conflicts = report.manual_conflicts,
            "configuration merge finished"
        );
        self.notifier
            .send(NotificationKind::Success, "Merge completed successfully".to_owned());
        report
    }

    /// Back up every monitored configuration.
    pub async fn backup_now(&self) -> BackupReport {
        let count = self.backup.monitored_configurations;

        self.notifier.send_for(
            NotificationKind::Info,
            "Initializing backup process...".to_owned(),
            BACKUP_NOTICE_MS,
        );
        self.latency.wait(Phase::BackupStep).await;
        self.notifier.send_for(
            NotificationKind::Info,
            "Creating snapshots for all monitored configurations...".to_owned(),
            BACKUP_NOTICE_MS,
        );
        self.latency.wait(Phase::BackupStep).await;
        self.notifier.send_for(
            NotificationKind::Info,
            format!("Backing up {count} configuration files..."),
            BACKUP_NOTICE_MS,
        );
        self.latency.wait(Phase::BackupStep).await;

        info!(configurations = count, "configuration backup finished");
        self.notifier.send_for(
            NotificationKind::Success,
            format!("Backup completed successfully for {count} configurations"),
            BACKUP_DONE_MS,
        );
        BackupReport {
            configurations: count,
            completed_at: Utc::now(),
        }
    }

    /// Copy of one event, reporting unknown ids to the user.
    async fn lookup(&self, id: &DriftEventId) -> Result<DriftEvent, DriftError> {
        let found = self.event(id).await;
        if found.is_err() {
            self.notifier.send(
                NotificationKind::Error,
                format!("Drift event {id} not found"),
            );
        }
        found
    }
}

/// Local wall-clock time to whole seconds, for timeline steps.
fn step_time() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}
