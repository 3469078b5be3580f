//! Terminal rendering for health reports, search results, and audits

use crate::audit::{AuditOutcome, AuditSummary};
use crate::compare::{overall_winner, verdict_rank, Comparison};
use crate::registry::SearchHit;
use crate::types::{HealthReport, Polarity, Verdict};
use chrono::{DateTime, Utc};
use colored::*;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

/// Print a full health report panel
pub fn print_health_report(report: &HealthReport) {
    let now = Utc::now();

    println!(
        "\n{}",
        format!(
            "=== Health Report: {} {} ===",
            report.release.name, report.release.version
        )
        .bold()
    );

    if let Some(description) = &report.release.description {
        println!("{}", description.dimmed());
    }
    println!(
        "License: {}",
        report.release.license.as_deref().unwrap_or("unknown")
    );
    println!();

    println!("{}", "Registry".bold());
    match report.release.released_at {
        Some(released_at) => println!(
            "└── Latest release: {} ({})",
            released_at.format("%Y-%m-%d"),
            format_relative_date(released_at, now)
        ),
        None => println!("└── Latest release: date unknown"),
    }
    println!();

    if let Some(repo) = &report.repo {
        println!("{} ({})", "Repository".bold(), repo.slug.cyan());
        match repo.pushed_at {
            Some(pushed_at) => println!(
                "├── Last push: {} ({})",
                pushed_at.format("%Y-%m-%d"),
                format_relative_date(pushed_at, now)
            ),
            None => println!("├── Last push: unknown"),
        }
        println!("├── Open issues: {}", format_count(u64::from(repo.open_issues)));
        println!("└── Stars: {}", format_count(u64::from(repo.stars)));
        println!();
    } else {
        println!("{}", "Repository: no data available".dimmed());
        println!();
    }

    println!("Verdict: {}", verdict_colored(report.verdict));
    for reason in &report.reasons {
        match reason.polarity {
            Polarity::Positive => println!("  {} {}", "+".green(), reason.message),
            Polarity::Negative => println!("  {} {}", "-".red(), reason.message),
        }
    }
    println!();
}

/// Build the search results table
pub fn search_table(hits: &[SearchHit]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Package", "Version", "Downloads", "Description"]);

    for hit in hits {
        let description = hit.description.as_deref().unwrap_or("");
        let description = if description.chars().count() > 80 {
            let truncated: String = description.chars().take(77).collect();
            format!("{}...", truncated)
        } else {
            description.to_string()
        };

        table.add_row(vec![
            Cell::new(&hit.name).fg(Color::Cyan),
            Cell::new(&hit.version).fg(Color::Green),
            Cell::new(format_count(hit.downloads)),
            Cell::new(description),
        ]);
    }

    table
}

/// Build the side-by-side comparison table
pub fn comparison_table(comparison: &Comparison, now: DateTime<Utc>) -> Table {
    let left = &comparison.left;
    let right = &comparison.right;
    let left_name = left.release.name.as_str();
    let right_name = right.release.name.as_str();

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Metric", left_name, right_name, "Winner"]);

    table.add_row(vec![
        "Latest version",
        left.release.version.as_str(),
        right.release.version.as_str(),
        "-",
    ]);
    table.add_row(vec![
        "License",
        left.release.license.as_deref().unwrap_or("unknown"),
        right.release.license.as_deref().unwrap_or("unknown"),
        "-",
    ]);

    table.add_row(vec![
        Cell::new("Last release"),
        Cell::new(relative_or_unknown(left.release.released_at, now)),
        Cell::new(relative_or_unknown(right.release.released_at, now)),
        winner_cell(date_winner(
            left.release.released_at,
            right.release.released_at,
            left_name,
            right_name,
        )),
    ]);

    let verdict_winner = match verdict_rank(left.verdict).cmp(&verdict_rank(right.verdict)) {
        std::cmp::Ordering::Greater => Some(left_name),
        std::cmp::Ordering::Less => Some(right_name),
        std::cmp::Ordering::Equal => None,
    };
    table.add_row(vec![
        Cell::new("Verdict"),
        Cell::new(left.verdict.to_string()).fg(verdict_color(left.verdict)),
        Cell::new(right.verdict.to_string()).fg(verdict_color(right.verdict)),
        winner_cell(verdict_winner),
    ]);

    if left.repo.is_some() || right.repo.is_some() {
        table.add_row(vec![
            "Repository",
            left.repo.as_ref().map(|r| r.slug.as_str()).unwrap_or("-"),
            right.repo.as_ref().map(|r| r.slug.as_str()).unwrap_or("-"),
            "-",
        ]);
    }

    if let (Some(left_repo), Some(right_repo)) = (&left.repo, &right.repo) {
        let stars_winner = match left_repo.stars.cmp(&right_repo.stars) {
            std::cmp::Ordering::Greater => Some(left_name),
            std::cmp::Ordering::Less => Some(right_name),
            std::cmp::Ordering::Equal => None,
        };
        table.add_row(vec![
            Cell::new("Stars"),
            Cell::new(format_count(u64::from(left_repo.stars))),
            Cell::new(format_count(u64::from(right_repo.stars))),
            winner_cell(stars_winner),
        ]);

        // Fewer open issues wins
        let issues_winner = match left_repo.open_issues.cmp(&right_repo.open_issues) {
            std::cmp::Ordering::Less => Some(left_name),
            std::cmp::Ordering::Greater => Some(right_name),
            std::cmp::Ordering::Equal => None,
        };
        table.add_row(vec![
            Cell::new("Open issues"),
            Cell::new(format_count(u64::from(left_repo.open_issues))),
            Cell::new(format_count(u64::from(right_repo.open_issues))),
            winner_cell(issues_winner),
        ]);

        table.add_row(vec![
            Cell::new("Last push"),
            Cell::new(relative_or_unknown(left_repo.pushed_at, now)),
            Cell::new(relative_or_unknown(right_repo.pushed_at, now)),
            winner_cell(date_winner(
                left_repo.pushed_at,
                right_repo.pushed_at,
                left_name,
                right_name,
            )),
        ]);
    }

    table.add_row(vec![
        Cell::new("Overall").fg(Color::Yellow),
        Cell::new(""),
        Cell::new(""),
        winner_cell(overall_winner(comparison, now)),
    ]);

    table
}

/// Build the audit results table. Unless `show_all` is set, rows that are
/// healthy and current are filtered out so problems stand out.
pub fn audit_table(outcomes: &[AuditOutcome], show_all: bool) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Package", "Declared", "Latest", "Status", "Verdict", "Stars", "Issues",
        ]);

    for outcome in outcomes {
        if let Some(error) = &outcome.error {
            table.add_row(vec![
                Cell::new(&outcome.name).fg(Color::Cyan),
                Cell::new(&outcome.declared_req),
                Cell::new("-"),
                Cell::new("error").fg(Color::Red),
                Cell::new(error),
                Cell::new("-"),
                Cell::new("-"),
            ]);
            continue;
        }

        let Some(report) = &outcome.report else {
            continue;
        };

        if !show_all && report.verdict == Verdict::Healthy && !outcome.outdated {
            continue;
        }

        let status = if outcome.outdated {
            Cell::new("outdated").fg(Color::Yellow)
        } else {
            Cell::new("current").fg(Color::Green)
        };

        let (stars, issues) = match &report.repo {
            Some(repo) => (
                format_count(u64::from(repo.stars)),
                format_count(u64::from(repo.open_issues)),
            ),
            None => ("-".to_string(), "-".to_string()),
        };

        table.add_row(vec![
            Cell::new(&outcome.name).fg(Color::Cyan),
            Cell::new(&outcome.declared_req),
            Cell::new(&report.release.version),
            status,
            Cell::new(report.verdict.to_string()).fg(verdict_color(report.verdict)),
            Cell::new(stars),
            Cell::new(issues),
        ]);
    }

    table
}

/// Print summary counts after an audit run
pub fn print_audit_summary(summary: &AuditSummary) {
    println!("\n{}", "=== Audit Summary ===".bold());
    println!("Total dependencies: {}", summary.total);
    println!();
    println!(
        "  {} {}",
        "●".green(),
        format!("Healthy: {}", summary.healthy).green()
    );
    println!(
        "  {} {}",
        "●".yellow(),
        format!("Warning: {}", summary.warning).yellow()
    );
    println!(
        "  {} {}",
        "●".red(),
        format!("Unhealthy: {}", summary.unhealthy).red()
    );
    println!(
        "  {} {}",
        "●".blue(),
        format!("Unknown: {}", summary.unknown).blue()
    );
    if summary.errors > 0 {
        println!("  {} Errors: {}", "!".red().bold(), summary.errors);
    }
    println!();
    println!("Outdated: {}", summary.outdated);
    println!("With repository data: {}", summary.with_repo);
}

/// Color a verdict for inline display
pub fn verdict_colored(verdict: Verdict) -> ColoredString {
    match verdict {
        Verdict::Healthy => verdict.to_string().green().bold(),
        Verdict::Warning => verdict.to_string().yellow().bold(),
        Verdict::Unhealthy => verdict.to_string().red().bold(),
        Verdict::Unknown => verdict.to_string().blue().bold(),
    }
}

fn verdict_color(verdict: Verdict) -> Color {
    match verdict {
        Verdict::Healthy => Color::Green,
        Verdict::Warning => Color::Yellow,
        Verdict::Unhealthy => Color::Red,
        Verdict::Unknown => Color::Blue,
    }
}

fn winner_cell(winner: Option<&str>) -> Cell {
    match winner {
        Some(name) => Cell::new(name).fg(Color::Yellow),
        None => Cell::new("tie"),
    }
}

fn date_winner<'a>(
    left: Option<DateTime<Utc>>,
    right: Option<DateTime<Utc>>,
    left_name: &'a str,
    right_name: &'a str,
) -> Option<&'a str> {
    match (left, right) {
        (Some(l), Some(r)) if l > r => Some(left_name),
        (Some(l), Some(r)) if r > l => Some(right_name),
        (Some(_), None) => Some(left_name),
        (None, Some(_)) => Some(right_name),
        _ => None,
    }
}

fn relative_or_unknown(date: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    match date {
        Some(date) => format_relative_date(date, now),
        None => "unknown".to_string(),
    }
}

/// Format a date as a relative phrase ("3 days ago", "2 months ago")
pub fn format_relative_date(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let days = now.signed_duration_since(date).num_days();

    if days <= 0 {
        "today".to_string()
    } else if days == 1 {
        "1 day ago".to_string()
    } else if days < 30 {
        format!("{} days ago", days)
    } else if days < 60 {
        "1 month ago".to_string()
    } else if days < 365 {
        format!("{} months ago", days / 30)
    } else if days < 730 {
        "1 year ago".to_string()
    } else {
        format!("{} years ago", days / 365)
    }
}

/// Format a count with thousands separators
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 9, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn relative_date_buckets() {
        let now = fixed_now();
        let ago = |days| now - Duration::days(days);

        assert_eq!(format_relative_date(ago(0), now), "today");
        assert_eq!(format_relative_date(ago(1), now), "1 day ago");
        assert_eq!(format_relative_date(ago(12), now), "12 days ago");
        assert_eq!(format_relative_date(ago(45), now), "1 month ago");
        assert_eq!(format_relative_date(ago(200), now), "6 months ago");
        assert_eq!(format_relative_date(ago(400), now), "1 year ago");
        assert_eq!(format_relative_date(ago(1000), now), "2 years ago");
    }

    #[test]
    fn future_dates_render_as_today() {
        let now = fixed_now();
        assert_eq!(format_relative_date(now + Duration::days(3), now), "today");
    }

    #[test]
    fn count_formatting() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(9200), "9,200");
        assert_eq!(format_count(400_000_000), "400,000,000");
    }
}
