//! Health evaluation from release and repository signals

use crate::config::Thresholds;
use crate::types::{HealthReport, Polarity, Reason, ReleaseInfo, RepoStats, Verdict};
use chrono::{DateTime, Utc};

/// Evaluate a package's health from its release metadata and optional
/// repository statistics.
///
/// Pure and deterministic: `now` is an explicit argument, so identical
/// inputs always produce identical reports. Checks run in a fixed order
/// (release recency first, then repository activity) and the reasons list
/// preserves that order.
///
/// Staleness is strict: something aged exactly at a threshold is not yet
/// stale; one day past it is.
pub fn evaluate(
    release: ReleaseInfo,
    repo: Option<RepoStats>,
    now: DateTime<Utc>,
    thresholds: &Thresholds,
) -> HealthReport {
    let mut reasons = Vec::new();

    if let Some(released_at) = release.released_at {
        let age_days = now.signed_duration_since(released_at).num_days();
        if age_days > thresholds.release_stale_days {
            reasons.push(Reason::negative(format!(
                "no release in over {} months",
                thresholds.release_stale_days / 30
            )));
        }
    }

    if let Some(stats) = &repo {
        if let Some(pushed_at) = stats.pushed_at {
            let age_days = now.signed_duration_since(pushed_at).num_days();
            if age_days > thresholds.commit_stale_days {
                reasons.push(Reason::negative(format!(
                    "no commit in over {} months",
                    thresholds.commit_stale_days / 30
                )));
            }
        }

        if stats.open_issues > thresholds.issue_high_watermark {
            reasons.push(Reason::negative(format!(
                "high open issue count ({})",
                stats.open_issues
            )));
        }

        if stats.stars >= thresholds.star_popularity {
            reasons.push(Reason::positive(format!(
                "widely used ({} stars)",
                stats.stars
            )));
        }
    }

    let negatives = reasons
        .iter()
        .filter(|r| r.polarity == Polarity::Negative)
        .count();

    let verdict = if negatives >= thresholds.unhealthy_cutoff {
        Verdict::Unhealthy
    } else if negatives > 0 {
        Verdict::Warning
    } else if repo.is_none() {
        // No repository data and nothing against the release: not enough
        // signal to call it healthy
        Verdict::Unknown
    } else {
        Verdict::Healthy
    };

    HealthReport {
        release,
        repo,
        verdict,
        reasons,
    }
}
