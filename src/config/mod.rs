//! Configuration for the mock service.
//!
//! Settings come from three layers, later ones winning: built-in defaults,
//! an optional YAML file, then CLI flags / environment variables applied by
//! the binary through the `with_*` setters.
//!
//! ```yaml
//! seed: 42
//! latency:
//!   min: 50ms
//!   max: 150ms
//! ```

pub mod duration;

use anyhow::Context;
use mock_query::Latency;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Default base seed for generated data.
pub const DEFAULT_SEED: u64 = 42;

/// Configuration of a [`MockClient`](crate::MockClient).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MockConfig {
    /// Base seed; the same seed always yields the same dataset.
    pub seed: u64,
    /// Simulated delay before queries and RPC calls resolve.
    pub latency: LatencyConfig,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            latency: LatencyConfig::default(),
        }
    }
}

impl MockConfig {
    /// Load configuration from a YAML file. Missing keys keep their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> anyhow::Result<Self> {
        let config: MockConfig = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Configuration for tests: default seed, no latency.
    pub fn instant() -> Self {
        Self::default().with_latency(Duration::ZERO, Duration::ZERO)
    }

    /// Set the base seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the latency bounds.
    pub fn with_latency(mut self, min: Duration, max: Duration) -> Self {
        self.latency = LatencyConfig { min, max };
        self
    }
}

/// Bounds of the simulated latency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatencyConfig {
    #[serde(with = "duration::serde_millis")]
    pub min: Duration,
    #[serde(with = "duration::serde_millis")]
    pub max: Duration,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            min: Duration::from_millis(50),
            max: Duration::from_millis(150),
        }
    }
}

impl From<LatencyConfig> for Latency {
    fn from(config: LatencyConfig) -> Self {
        Latency::new(config.min, config.max)
    }
}
