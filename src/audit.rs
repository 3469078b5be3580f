//! Audit every dependency declared in a manifest

use crate::check::check_health_with;
use crate::config::AppConfig;
use crate::error::Result;
use crate::hosting::HostingClient;
use crate::manifest::{read_dependencies, ManifestDependency};
use crate::registry::RegistryClient;
use crate::types::{HealthReport, Verdict};
use semver::{Version, VersionReq};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{info, warn};

/// Cap on in-flight health checks, to stay polite with the upstream APIs
const MAX_IN_FLIGHT: usize = 5;

/// Result of auditing a single dependency
#[derive(Debug, Clone)]
pub struct AuditOutcome {
    pub name: String,
    pub declared_req: String,
    pub report: Option<HealthReport>,
    pub outdated: bool,
    pub error: Option<String>,
}

/// Aggregate counts over an audit run
#[derive(Debug, Clone, Default)]
pub struct AuditSummary {
    pub total: usize,
    pub healthy: usize,
    pub warning: usize,
    pub unhealthy: usize,
    pub unknown: usize,
    pub outdated: usize,
    pub errors: usize,
    pub with_repo: usize,
}

impl AuditSummary {
    fn from_outcomes(outcomes: &[AuditOutcome]) -> Self {
        let mut summary = Self {
            total: outcomes.len(),
            ..Self::default()
        };

        for outcome in outcomes {
            if outcome.error.is_some() {
                summary.errors += 1;
                continue;
            }
            if let Some(report) = &outcome.report {
                match report.verdict {
                    Verdict::Healthy => summary.healthy += 1,
                    Verdict::Warning => summary.warning += 1,
                    Verdict::Unhealthy => summary.unhealthy += 1,
                    Verdict::Unknown => summary.unknown += 1,
                }
                if report.repo.is_some() {
                    summary.with_repo += 1;
                }
            }
            if outcome.outdated {
                summary.outdated += 1;
            }
        }

        summary
    }
}

/// Audit all registry dependencies declared in a Cargo.toml.
///
/// Health checks run concurrently, bounded by [`MAX_IN_FLIGHT`]. A failure
/// for one dependency is recorded in its outcome and does not abort the
/// rest of the run. Outcomes come back in manifest declaration order.
pub async fn audit_manifest(
    manifest_path: &Path,
    config: &AppConfig,
) -> Result<(Vec<AuditOutcome>, AuditSummary)> {
    let dependencies = read_dependencies(manifest_path)?;
    info!(
        "Auditing {} dependencies from {}",
        dependencies.len(),
        manifest_path.display()
    );

    let registry = RegistryClient::new(&config.network)?;
    let hosting = HostingClient::new(&config.network)?;
    let semaphore = Arc::new(Semaphore::new(MAX_IN_FLIGHT));

    let mut tasks = Vec::with_capacity(dependencies.len());
    for dep in dependencies {
        let registry = registry.clone();
        let hosting = hosting.clone();
        let config = config.clone();
        let semaphore = Arc::clone(&semaphore);

        tasks.push(tokio::spawn(async move {
            let _permit = semaphore.acquire().await.expect("semaphore closed");
            audit_dependency(dep, &registry, &hosting, &config).await
        }));
    }

    let mut outcomes = Vec::with_capacity(tasks.len());
    for task in tasks {
        match task.await {
            Ok(outcome) => outcomes.push(outcome),
            Err(e) => warn!("Audit task failed: {}", e),
        }
    }

    let summary = AuditSummary::from_outcomes(&outcomes);
    Ok((outcomes, summary))
}

async fn audit_dependency(
    dep: ManifestDependency,
    registry: &RegistryClient,
    hosting: &HostingClient,
    config: &AppConfig,
) -> AuditOutcome {
    match check_health_with(registry, hosting, &dep.name, config).await {
        Ok(report) => {
            let outdated = is_outdated(&dep.req, &report.release.version);
            AuditOutcome {
                name: dep.name,
                declared_req: dep.req,
                report: Some(report),
                outdated,
                error: None,
            }
        }
        Err(e) => {
            warn!("Audit of '{}' failed: {}", dep.name, e);
            AuditOutcome {
                name: dep.name,
                declared_req: dep.req,
                report: None,
                outdated: false,
                error: Some(e.to_string()),
            }
        }
    }
}

/// A dependency is outdated when its declared requirement no longer matches
/// the latest published version
fn is_outdated(declared_req: &str, latest: &str) -> bool {
    let req = match VersionReq::parse(declared_req) {
        Ok(req) => req,
        Err(e) => {
            warn!("Unparseable requirement '{}': {}", declared_req, e);
            return false;
        }
    };
    let latest = match Version::parse(latest) {
        Ok(version) => version,
        Err(e) => {
            warn!("Unparseable version '{}': {}", latest, e);
            return false;
        }
    };

    !req.matches(&latest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Polarity, Reason, ReleaseInfo};

    #[test]
    fn outdated_when_latest_leaves_requirement() {
        assert!(is_outdated("0.11", "0.12.5"));
        assert!(is_outdated("=1.0.0", "1.0.1"));
    }

    #[test]
    fn current_when_latest_matches_requirement() {
        assert!(!is_outdated("1.0", "1.0.210"));
        assert!(!is_outdated("0.4", "0.4.38"));
    }

    #[test]
    fn unparseable_requirement_is_not_outdated() {
        assert!(!is_outdated("not-a-req", "1.0.0"));
        assert!(!is_outdated("1.0", "not-a-version"));
    }

    #[test]
    fn summary_counts_verdicts_and_errors() {
        let release = ReleaseInfo {
            name: "demo".to_string(),
            version: "1.0.0".to_string(),
            released_at: None,
            license: None,
            description: None,
            repository: None,
            homepage: None,
        };
        let report = |verdict| HealthReport {
            release: release.clone(),
            repo: None,
            verdict,
            reasons: vec![Reason {
                polarity: Polarity::Negative,
                message: "stale".to_string(),
            }],
        };

        let outcomes = vec![
            AuditOutcome {
                name: "a".to_string(),
                declared_req: "1.0".to_string(),
                report: Some(report(Verdict::Healthy)),
                outdated: true,
                error: None,
            },
            AuditOutcome {
                name: "b".to_string(),
                declared_req: "1.0".to_string(),
                report: Some(report(Verdict::Unhealthy)),
                outdated: false,
                error: None,
            },
            AuditOutcome {
                name: "c".to_string(),
                declared_req: "1.0".to_string(),
                report: None,
                outdated: false,
                error: Some("Package 'c' not found".to_string()),
            },
        ];

        let summary = AuditSummary::from_outcomes(&outcomes);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.healthy, 1);
        assert_eq!(summary.unhealthy, 1);
        assert_eq!(summary.errors, 1);
        assert_eq!(summary.outdated, 1);
        assert_eq!(summary.with_repo, 0);
    }
}
