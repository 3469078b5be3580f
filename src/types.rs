//! Core data types for package health reporting

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Latest-release metadata for a package, as reported by crates.io
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseInfo {
    /// Crate name as registered on crates.io
    pub name: String,
    /// Most recent published version
    pub version: String,
    /// Upload date of the most recent version, when known
    pub released_at: Option<DateTime<Utc>>,
    /// Declared license of the most recent version
    pub license: Option<String>,
    /// Short crate description
    pub description: Option<String>,
    /// Repository URL from the crate metadata
    pub repository: Option<String>,
    /// Homepage URL from the crate metadata
    pub homepage: Option<String>,
}

/// Activity statistics for a source repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoStats {
    /// `owner/repo` slug on the hosting service
    pub slug: String,
    /// Star count
    pub stars: u32,
    /// Open issue count
    pub open_issues: u32,
    /// Timestamp of the most recent push to the default branch
    pub pushed_at: Option<DateTime<Utc>>,
    /// Canonical repository URL
    pub url: String,
}

/// Qualitative health classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// Actively maintained, no concerns found
    Healthy,
    /// Some concerns, worth a closer look
    Warning,
    /// Multiple staleness or activity concerns
    Unhealthy,
    /// Not enough signal to judge either way
    Unknown,
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Healthy => write!(f, "Healthy"),
            Self::Warning => write!(f, "Warning"),
            Self::Unhealthy => write!(f, "Unhealthy"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Whether a reason counts for or against the package
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Positive,
    Negative,
}

/// A single signal contributing to the verdict
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reason {
    pub polarity: Polarity,
    pub message: String,
}

impl Reason {
    pub fn positive(message: impl Into<String>) -> Self {
        Self {
            polarity: Polarity::Positive,
            message: message.into(),
        }
    }

    pub fn negative(message: impl Into<String>) -> Self {
        Self {
            polarity: Polarity::Negative,
            message: message.into(),
        }
    }
}

/// Complete health report for a single package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    /// Release metadata from the registry
    pub release: ReleaseInfo,
    /// Repository statistics, when a repository could be resolved
    pub repo: Option<RepoStats>,
    /// Overall classification
    pub verdict: Verdict,
    /// Signals in evaluation order: release check first, then repository checks
    pub reasons: Vec<Reason>,
}

impl HealthReport {
    /// Count of negative reasons
    pub fn negatives(&self) -> usize {
        self.reasons
            .iter()
            .filter(|r| r.polarity == Polarity::Negative)
            .count()
    }

    /// Count of positive reasons
    pub fn positives(&self) -> usize {
        self.reasons
            .iter()
            .filter(|r| r.polarity == Polarity::Positive)
            .count()
    }
}
