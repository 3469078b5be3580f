//! Health-check orchestration: fetch, resolve, evaluate

use crate::config::AppConfig;
use crate::error::Result;
use crate::evaluate::evaluate;
use crate::hosting::{resolve_repo_slug, HostingClient};
use crate::registry::RegistryClient;
use crate::types::HealthReport;
use chrono::Utc;
use tracing::{debug, info, warn};

/// Check the health of a package.
///
/// The registry lookup is required: its failure is fatal and propagated.
/// The repository lookup runs only when the release metadata carries a
/// parseable repository link, and any failure there is downgraded to "no
/// repository data" so a degraded report can still be produced.
pub async fn check_health(name: &str, config: &AppConfig) -> Result<HealthReport> {
    let registry = RegistryClient::new(&config.network)?;
    let hosting = HostingClient::new(&config.network)?;
    check_health_with(&registry, &hosting, name, config).await
}

/// Health check against explicit clients, for callers that manage their own
pub async fn check_health_with(
    registry: &RegistryClient,
    hosting: &HostingClient,
    name: &str,
    config: &AppConfig,
) -> Result<HealthReport> {
    info!("Checking health of '{}'", name);

    let release = registry.latest_release(name).await?;

    let repo = match resolve_repo_slug(&release) {
        Some((owner, repo)) => match hosting.repo_stats(&owner, &repo).await {
            Ok(stats) => Some(stats),
            Err(e) => {
                warn!("Repository lookup for {}/{} failed: {}", owner, repo, e);
                None
            }
        },
        None => {
            debug!("No parseable repository link for '{}'", name);
            None
        }
    };

    Ok(evaluate(release, repo, Utc::now(), &config.thresholds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NetworkConfig;
    use crate::types::Verdict;

    fn config() -> AppConfig {
        AppConfig {
            network: NetworkConfig {
                timeout_secs: 5,
                github_token: None,
            },
            ..AppConfig::default()
        }
    }

    fn crate_body(repository: &str) -> String {
        // A release 10 days old, so the release-recency check stays quiet
        let released_at = (Utc::now() - chrono::Duration::days(10)).to_rfc3339();
        format!(
            r#"{{
                "crate": {{
                    "name": "demo",
                    "description": "A demo crate",
                    "repository": {},
                    "homepage": null
                }},
                "versions": [
                    {{"num": "1.0.0", "license": "MIT", "created_at": "{}", "yanked": false}}
                ]
            }}"#,
            repository, released_at
        )
    }

    #[tokio::test]
    async fn missing_repo_link_skips_hosting_entirely() {
        let mut registry_server = mockito::Server::new_async().await;
        let mut hosting_server = mockito::Server::new_async().await;

        let _registry_mock = registry_server
            .mock("GET", "/crates/demo")
            .with_status(200)
            .with_body(crate_body("null"))
            .create_async()
            .await;

        // Zero calls expected against the hosting API
        let hosting_mock = hosting_server
            .mock("GET", mockito::Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let cfg = config();
        let registry = RegistryClient::with_base_url(&cfg.network, registry_server.url()).unwrap();
        let hosting = HostingClient::with_base_url(&cfg.network, hosting_server.url()).unwrap();

        let report = check_health_with(&registry, &hosting, "demo", &cfg)
            .await
            .unwrap();

        hosting_mock.assert_async().await;
        assert!(report.repo.is_none());
    }

    #[tokio::test]
    async fn hosting_failure_degrades_instead_of_failing() {
        let mut registry_server = mockito::Server::new_async().await;
        let mut hosting_server = mockito::Server::new_async().await;

        let _registry_mock = registry_server
            .mock("GET", "/crates/demo")
            .with_status(200)
            .with_body(crate_body("\"https://github.com/demo/demo\""))
            .create_async()
            .await;

        let _hosting_mock = hosting_server
            .mock("GET", "/repos/demo/demo")
            .with_status(500)
            .create_async()
            .await;

        let cfg = config();
        let registry = RegistryClient::with_base_url(&cfg.network, registry_server.url()).unwrap();
        let hosting = HostingClient::with_base_url(&cfg.network, hosting_server.url()).unwrap();

        let report = check_health_with(&registry, &hosting, "demo", &cfg)
            .await
            .unwrap();

        assert!(report.repo.is_none());
        // Recent release and no repository data: insufficient signal
        assert_eq!(report.verdict, Verdict::Unknown);
    }

    #[tokio::test]
    async fn registry_not_found_is_fatal() {
        let mut registry_server = mockito::Server::new_async().await;
        let mut hosting_server = mockito::Server::new_async().await;

        let _registry_mock = registry_server
            .mock("GET", "/crates/nope")
            .with_status(404)
            .create_async()
            .await;

        let cfg = config();
        let registry = RegistryClient::with_base_url(&cfg.network, registry_server.url()).unwrap();
        let hosting = HostingClient::with_base_url(&cfg.network, hosting_server.url()).unwrap();

        let result = check_health_with(&registry, &hosting, "nope", &cfg).await;
        assert!(result.is_err());
    }
}
