//! Fetch repository statistics from the GitHub API

use crate::config::NetworkConfig;
use crate::error::{HealthError, Result};
use crate::types::{ReleaseInfo, RepoStats};
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

const GITHUB_API: &str = "https://api.github.com";
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct GitHubRepo {
    full_name: String,
    stargazers_count: u32,
    open_issues_count: u32,
    pushed_at: Option<String>,
    html_url: String,
}

/// Client for the GitHub read API
#[derive(Debug, Clone)]
pub struct HostingClient {
    http: Client,
    base_url: String,
}

impl HostingClient {
    /// Create a client against the public GitHub API
    pub fn new(config: &NetworkConfig) -> Result<Self> {
        Self::with_base_url(config, GITHUB_API)
    }

    /// Create a client against a custom API base URL
    pub fn with_base_url(config: &NetworkConfig, base_url: impl Into<String>) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/vnd.github.v3+json"),
        );

        if let Some(token) = &config.github_token {
            let value = format!("token {}", token)
                .parse()
                .map_err(|_| HealthError::parse("GitHub token header"))?;
            headers.insert(reqwest::header::AUTHORIZATION, value);
        }

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout())
            .default_headers(headers)
            .build()
            .map_err(|e| HealthError::network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// Fetch activity statistics for a repository.
    ///
    /// Returns `NotFound` when the repository does not exist and `Network`
    /// on transport failure or an unexpected status. No retries are
    /// performed.
    pub async fn repo_stats(&self, owner: &str, repo: &str) -> Result<RepoStats> {
        debug!("Fetching repository stats for {}/{}", owner, repo);

        let url = format!("{}/repos/{}/{}", self.base_url, owner, repo);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| HealthError::network(format!("GitHub request failed: {}", e)))?;

        if response.status().as_u16() == 404 {
            return Err(HealthError::not_found(format!(
                "Repository '{}/{}'",
                owner, repo
            )));
        }
        if !response.status().is_success() {
            return Err(HealthError::network(format!(
                "GitHub returned HTTP {} for {}/{}",
                response.status(),
                owner,
                repo
            )));
        }

        let data: GitHubRepo = response.json().await?;

        let pushed_at = data
            .pushed_at
            .as_deref()
            .map(parse_datetime)
            .transpose()?;

        Ok(RepoStats {
            slug: data.full_name,
            stars: data.stargazers_count,
            open_issues: data.open_issues_count,
            pushed_at,
            url: data.html_url,
        })
    }
}

/// Parse a GitHub URL into an `(owner, repo)` pair.
///
/// Handles the usual forms:
/// - `https://github.com/owner/repo`
/// - `https://github.com/owner/repo.git`
/// - `git://github.com/owner/repo`
/// - `git@github.com:owner/repo.git`
pub fn parse_repo_slug(url: &str) -> Result<(String, String)> {
    let url = url.trim_end_matches(".git");
    let url = url.trim_end_matches('/');

    let rest = if let Some(rest) = url.split("github.com:").nth(1) {
        rest
    } else if let Some(rest) = url.split("github.com/").nth(1) {
        rest
    } else {
        return Err(HealthError::parse(format!("repository URL '{}'", url)));
    };

    let mut parts = rest.split('/');
    match (parts.next(), parts.next()) {
        (Some(owner), Some(repo)) if !owner.is_empty() && !repo.is_empty() => {
            // Strip fragments and query strings left over from homepage links
            let repo = repo
                .split('#')
                .next()
                .and_then(|r| r.split('?').next())
                .unwrap_or(repo);
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => Err(HealthError::parse(format!("repository URL '{}'", url))),
    }
}

/// Resolve an `(owner, repo)` slug from a package's link metadata.
///
/// The repository field is checked first, then the homepage. A link that
/// does not match the GitHub URL grammar is skipped rather than treated as
/// an error; `None` means the hosting client should not be invoked at all.
pub fn resolve_repo_slug(release: &ReleaseInfo) -> Option<(String, String)> {
    let candidates = [release.repository.as_deref(), release.homepage.as_deref()];

    for url in candidates.into_iter().flatten() {
        if let Ok(slug) = parse_repo_slug(url) {
            debug!("Resolved repository {}/{}", slug.0, slug.1);
            return Some(slug);
        }
    }
    None
}

/// Parse a datetime string from the GitHub API
fn parse_datetime(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| HealthError::parse(format!("datetime '{}': {}", s, e)))
}
