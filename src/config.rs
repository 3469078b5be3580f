//! Configuration for health thresholds and network behavior

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main configuration for health checks
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Policy thresholds for the health evaluator
    #[serde(default)]
    pub thresholds: Thresholds,
    /// Network configuration
    #[serde(default)]
    pub network: NetworkConfig,
}

/// Fixed policy thresholds used by the health evaluator.
///
/// These are the only "policy" in the system. The defaults are the pinned
/// values the verdict rules are documented and tested against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thresholds {
    /// Days without a release before the release is considered stale
    pub release_stale_days: i64,
    /// Days without a push before the repository is considered stale
    pub commit_stale_days: i64,
    /// Open-issue count above which issue volume counts against the package
    pub issue_high_watermark: u32,
    /// Star count at or above which popularity counts for the package
    pub star_popularity: u32,
    /// Number of negative reasons at or above which the verdict is Unhealthy
    pub unhealthy_cutoff: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            release_stale_days: 180, // 6 months
            commit_stale_days: 180,  // 6 months
            issue_high_watermark: 500,
            star_popularity: 1000,
            unhealthy_cutoff: 2,
        }
    }
}

/// Network configuration for API calls
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// GitHub API token (optional, for higher rate limits)
    pub github_token: Option<String>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            github_token: std::env::var("GITHUB_TOKEN").ok(),
        }
    }
}

impl NetworkConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &std::path::Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }
}
