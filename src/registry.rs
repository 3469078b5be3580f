//! Fetch package metadata from crates.io

use crate::config::NetworkConfig;
use crate::error::{HealthError, Result};
use crate::types::ReleaseInfo;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

const CRATES_IO_API: &str = "https://crates.io/api/v1";
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// A single hit from a registry search
#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    pub name: String,
    #[serde(rename = "max_version")]
    pub version: String,
    pub description: Option<String>,
    pub downloads: u64,
}

/// Response from crates.io for a single crate
#[derive(Debug, Deserialize)]
struct CratesIoResponse {
    #[serde(rename = "crate")]
    crate_info: CrateInfo,
    versions: Vec<VersionInfo>,
}

#[derive(Debug, Deserialize)]
struct CrateInfo {
    name: String,
    description: Option<String>,
    repository: Option<String>,
    homepage: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VersionInfo {
    #[serde(rename = "num")]
    version: String,
    license: Option<String>,
    created_at: Option<String>,
    #[serde(default)]
    yanked: bool,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    crates: Vec<SearchHit>,
}

/// Client for the crates.io read API
#[derive(Debug, Clone)]
pub struct RegistryClient {
    http: Client,
    base_url: String,
}

impl RegistryClient {
    /// Create a client against the public crates.io API
    pub fn new(config: &NetworkConfig) -> Result<Self> {
        Self::with_base_url(config, CRATES_IO_API)
    }

    /// Create a client against a custom API base URL
    pub fn with_base_url(config: &NetworkConfig, base_url: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout())
            .build()
            .map_err(|e| HealthError::network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// Fetch metadata for the most recent published version of a crate.
    ///
    /// Returns `NotFound` when the registry has no such crate and `Network`
    /// on transport failure or an unexpected status. No retries are
    /// performed; a transient failure surfaces immediately.
    pub async fn latest_release(&self, name: &str) -> Result<ReleaseInfo> {
        debug!("Fetching registry metadata for {}", name);

        let url = format!("{}/crates/{}", self.base_url, name);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| HealthError::network(format!("crates.io request failed: {}", e)))?;

        if response.status().as_u16() == 404 {
            return Err(HealthError::not_found(format!("Package '{}'", name)));
        }
        if !response.status().is_success() {
            return Err(HealthError::network(format!(
                "crates.io returned HTTP {} for {}",
                response.status(),
                name
            )));
        }

        let data: CratesIoResponse = response.json().await?;

        // Versions come back newest-first; skip yanked releases
        let latest = data
            .versions
            .iter()
            .find(|v| !v.yanked)
            .or_else(|| data.versions.first())
            .ok_or_else(|| HealthError::parse(format!("version list for '{}'", name)))?;

        let released_at = latest
            .created_at
            .as_deref()
            .map(parse_datetime)
            .transpose()?;

        Ok(ReleaseInfo {
            name: data.crate_info.name,
            version: latest.version.clone(),
            released_at,
            license: latest.license.clone(),
            description: data.crate_info.description,
            repository: data.crate_info.repository,
            homepage: data.crate_info.homepage,
        })
    }

    /// Search the registry for crates matching a query
    pub async fn search(&self, query: &str, limit: u32) -> Result<Vec<SearchHit>> {
        debug!("Searching registry for '{}'", query);

        let url = format!(
            "{}/crates?q={}&per_page={}",
            self.base_url,
            urlencoding::encode(query),
            limit
        );
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| HealthError::network(format!("crates.io search failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(HealthError::network(format!(
                "crates.io search returned HTTP {}",
                response.status()
            )));
        }

        let data: SearchResponse = response.json().await?;
        Ok(data.crates)
    }
}

/// Parse a datetime string from the crates.io API
fn parse_datetime(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| HealthError::parse(format!("datetime '{}': {}", s, e)))
}
