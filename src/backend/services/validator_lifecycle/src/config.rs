use serde::{Deserialize, Serialize};
use std::time::Duration;
use std::{fs, io, path::Path};

/// Configuration for the lifecycle orchestrator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestratorConfig {
    /// Base URL of the external signature-aggregation service
    pub aggregator_url: String,
    /// Minimum signing-weight percentage requested from the aggregator
    pub quorum_percentage: u8,
    /// How long to wait for a transaction receipt before giving up
    pub receipt_timeout_ms: u64,
    /// Interval between receipt polls
    pub receipt_poll_interval_ms: u64,
    /// Per-request timeout for aggregator calls, which may legitimately take
    /// seconds while signatures are collected
    pub aggregator_timeout_ms: u64,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            aggregator_url: "http://127.0.0.1:8080".to_string(),
            quorum_percentage: 67,
            receipt_timeout_ms: 60_000,
            receipt_poll_interval_ms: 1_000,
            aggregator_timeout_ms: 45_000,
        }
    }
}

impl OrchestratorConfig {
    /// Load configuration from a TOML file, writing defaults on first use
    pub fn load(path: &Path) -> Result<Self, io::Error> {
        if !path.exists() {
            if let Some(dir) = path.parent() {
                fs::create_dir_all(dir)?;
            }
            let default_config = Self::default();
            let toml = toml::to_string_pretty(&default_config)
                .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
            fs::write(path, toml)?;
            return Ok(default_config);
        }

        let config_str = fs::read_to_string(path)?;
        let config = toml::from_str::<OrchestratorConfig>(&config_str)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

        Ok(config)
    }

    pub fn receipt_timeout(&self) -> Duration {
        Duration::from_millis(self.receipt_timeout_ms)
    }

    pub fn receipt_poll_interval(&self) -> Duration {
        Duration::from_millis(self.receipt_poll_interval_ms)
    }

    pub fn aggregator_timeout(&self) -> Duration {
        Duration::from_millis(self.aggregator_timeout_ms)
    }
}
