//! Side-by-side comparison of two packages

use crate::check::check_health_with;
use crate::config::AppConfig;
use crate::error::Result;
use crate::hosting::HostingClient;
use crate::registry::RegistryClient;
use crate::types::{HealthReport, Verdict};
use chrono::{DateTime, Utc};
use tracing::info;

/// Health reports for two packages being compared
#[derive(Debug, Clone)]
pub struct Comparison {
    pub left: HealthReport,
    pub right: HealthReport,
}

/// Check the health of two packages concurrently.
///
/// Unlike a single health check, a registry failure for either package is
/// fatal: a comparison with one side missing is not useful.
pub async fn compare_packages(
    first: &str,
    second: &str,
    config: &AppConfig,
) -> Result<Comparison> {
    info!("Comparing '{}' and '{}'", first, second);

    let registry = RegistryClient::new(&config.network)?;
    let hosting = HostingClient::new(&config.network)?;

    let (left, right) = tokio::try_join!(
        check_health_with(&registry, &hosting, first, config),
        check_health_with(&registry, &hosting, second, config),
    )?;

    Ok(Comparison { left, right })
}

/// Rank verdicts for comparison purposes; higher is better
pub fn verdict_rank(verdict: Verdict) -> u8 {
    match verdict {
        Verdict::Healthy => 3,
        Verdict::Warning => 2,
        Verdict::Unhealthy => 1,
        Verdict::Unknown => 0,
    }
}

/// Score one side of a comparison.
///
/// Verdict rank dominates; stars add up to 10 points on a linear scale so a
/// huge repository cannot overwhelm a better-maintained competitor; recent
/// release and push activity add a small bonus each.
pub fn comparison_score(report: &HealthReport, now: DateTime<Utc>) -> f64 {
    let mut score = f64::from(verdict_rank(report.verdict)) * 10.0;

    if let Some(repo) = &report.repo {
        score += (f64::from(repo.stars) / 1000.0).min(10.0);

        if let Some(pushed_at) = repo.pushed_at {
            if now.signed_duration_since(pushed_at).num_days() < 90 {
                score += 5.0;
            }
        }
    }

    if let Some(released_at) = report.release.released_at {
        if now.signed_duration_since(released_at).num_days() < 90 {
            score += 5.0;
        }
    }

    score
}

/// Name of the overall winner, or `None` on a tie
pub fn overall_winner(comparison: &Comparison, now: DateTime<Utc>) -> Option<&str> {
    let left = comparison_score(&comparison.left, now);
    let right = comparison_score(&comparison.right, now);

    if left > right {
        Some(&comparison.left.release.name)
    } else if right > left {
        Some(&comparison.right.release.name)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ReleaseInfo, RepoStats};
    use chrono::{Duration, TimeZone};

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 9, 15, 12, 0, 0).unwrap()
    }

    fn report(
        name: &str,
        verdict: Verdict,
        release_age_days: i64,
        repo: Option<RepoStats>,
    ) -> HealthReport {
        HealthReport {
            release: ReleaseInfo {
                name: name.to_string(),
                version: "1.0.0".to_string(),
                released_at: Some(fixed_now() - Duration::days(release_age_days)),
                license: None,
                description: None,
                repository: None,
                homepage: None,
            },
            repo,
            verdict,
            reasons: Vec::new(),
        }
    }

    fn repo(stars: u32, push_age_days: i64) -> RepoStats {
        RepoStats {
            slug: "owner/repo".to_string(),
            stars,
            open_issues: 10,
            pushed_at: Some(fixed_now() - Duration::days(push_age_days)),
            url: "https://github.com/owner/repo".to_string(),
        }
    }

    #[test]
    fn healthier_verdict_wins() {
        let comparison = Comparison {
            left: report("left", Verdict::Healthy, 400, None),
            right: report("right", Verdict::Warning, 400, None),
        };
        assert_eq!(overall_winner(&comparison, fixed_now()), Some("left"));
    }

    #[test]
    fn stars_break_a_verdict_tie() {
        let comparison = Comparison {
            left: report("left", Verdict::Healthy, 400, Some(repo(500, 400))),
            right: report("right", Verdict::Healthy, 400, Some(repo(5000, 400))),
        };
        assert_eq!(overall_winner(&comparison, fixed_now()), Some("right"));
    }

    #[test]
    fn star_contribution_is_capped() {
        // 20k vs 200k stars: both hit the cap, recent activity decides
        let comparison = Comparison {
            left: report("left", Verdict::Healthy, 10, Some(repo(20_000, 10))),
            right: report("right", Verdict::Healthy, 400, Some(repo(200_000, 400))),
        };
        assert_eq!(overall_winner(&comparison, fixed_now()), Some("left"));
    }

    #[test]
    fn identical_sides_tie() {
        let comparison = Comparison {
            left: report("left", Verdict::Unknown, 400, None),
            right: report("right", Verdict::Unknown, 400, None),
        };
        assert_eq!(overall_winner(&comparison, fixed_now()), None);
    }
}
