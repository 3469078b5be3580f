//! # crate-pulse
//!
//! Check whether a crates.io package looks actively maintained. The tool
//! fetches latest-release metadata from crates.io and repository activity
//! (stars, open issues, last push) from GitHub, then combines them with
//! fixed thresholds into a qualitative verdict with human-readable reasons.
//!
//! ## Quick Start
//!
//! ```no_run
//! use crate_pulse::{check_health, AppConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> crate_pulse::Result<()> {
//! let config = AppConfig::default();
//! let report = check_health("serde", &config).await?;
//!
//! println!("{}: {}", report.release.name, report.verdict);
//! for reason in &report.reasons {
//!     println!("  {}", reason.message);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! A failed or impossible repository lookup degrades the report (verdict
//! `Unknown` or judged on release recency alone) rather than failing the
//! check; only the registry lookup is required.

mod audit;
mod check;
mod compare;
mod config;
mod error;
mod evaluate;
mod hosting;
mod manifest;
mod registry;
pub mod report;
mod types;

// Re-export public API
pub use audit::{audit_manifest, AuditOutcome, AuditSummary};
pub use check::check_health;
pub use compare::{compare_packages, Comparison};
pub use config::{AppConfig, NetworkConfig, Thresholds};
pub use error::{HealthError, Result};
pub use evaluate::evaluate;
pub use hosting::{parse_repo_slug, resolve_repo_slug, HostingClient};
pub use registry::{RegistryClient, SearchHit};
pub use types::{HealthReport, Polarity, Reason, ReleaseInfo, RepoStats, Verdict};
