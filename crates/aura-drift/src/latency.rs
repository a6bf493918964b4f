//! Latency strategies for simulated remediation work.
//!
//! Actions pause between their progress notices to mimic backend latency.
//! The pause never affects outcomes, so the strategy is chosen by the
//! caller: [`Latency::Immediate`] for tests and headless use,
//! [`Latency::Simulated`] for an interactive dashboard.
//!
//! Uses enum dispatch instead of a trait object because async methods are
//! not dyn-compatible.

use tracing::debug;

use crate::config::{LatencyConfig, Phase};

/// How long each simulated phase takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Latency {
    /// Every wait completes at once.
    Immediate,
    /// Waits sleep on the tokio timer for the configured duration.
    Simulated(LatencyConfig),
}

impl Latency {
    /// Pick a strategy from configuration.
    pub const fn from_config(config: &LatencyConfig) -> Self {
        if config.simulate {
            Self::Simulated(*config)
        } else {
            Self::Immediate
        }
    }

    /// Wait out one phase.
    pub async fn wait(&self, phase: Phase) {
        match self {
            Self::Immediate => {}
            Self::Simulated(config) => {
                let duration = config.duration(phase);
                debug!(?phase, delay_ms = duration.as_millis(), "simulating latency");
                tokio::time::sleep(duration).await;
            }
        }
    }

    /// Human-readable name for logging.
    pub const fn name(&self) -> &str {
        match self {
            Self::Immediate => "immediate",
            Self::Simulated(_) => "simulated",
        }
    }
}

impl Default for Latency {
    fn default() -> Self {
        Self::Simulated(LatencyConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn from_config_respects_simulate_flag() {
        let off = LatencyConfig {
            simulate: false,
            ..LatencyConfig::default()
        };
        assert_eq!(Latency::from_config(&off), Latency::Immediate);
        assert_eq!(
            Latency::from_config(&LatencyConfig::default()).name(),
            "simulated"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn simulated_wait_advances_clock_by_phase_duration() {
        let latency = Latency::default();
        let start = tokio::time::Instant::now();
        latency.wait(Phase::BulkStep).await;
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(1200));
        assert!(elapsed < Duration::from_millis(1300));
    }

    #[tokio::test(start_paused = true)]
    async fn immediate_wait_takes_no_time() {
        let start = tokio::time::Instant::now();
        Latency::Immediate.wait(Phase::Restore).await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
