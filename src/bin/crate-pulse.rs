//! CLI tool for checking the maintenance health of crates.io packages

use clap::{Parser, Subcommand};
use colored::*;
use crate_pulse::{
    audit_manifest, check_health, compare_packages, report, AppConfig, RegistryClient,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "crate-pulse")]
#[command(about = "Check whether a crates.io package is actively maintained", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to custom configuration file (TOML)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the health of a single package
    Health {
        /// Name of the package to check
        name: String,

        /// Emit the report as JSON instead of the formatted panel
        #[arg(long)]
        json: bool,
    },

    /// Search the registry for packages
    Search {
        /// Search query
        query: String,

        /// Maximum number of results
        #[arg(long, default_value_t = 20)]
        limit: u32,
    },

    /// Compare the health of two packages side by side
    Compare {
        /// First package name
        first: String,

        /// Second package name
        second: String,
    },

    /// Audit every dependency declared in a Cargo.toml
    Audit {
        /// Path to the manifest to audit
        #[arg(short = 'm', long, default_value = "Cargo.toml")]
        manifest_path: PathBuf,

        /// Show every dependency, not just the ones with problems
        #[arg(long)]
        all: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => match AppConfig::from_file(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{} Failed to load config: {}", "Error:".red().bold(), e);
                process::exit(1);
            }
        },
        None => AppConfig::default(),
    };

    match cli.command {
        Commands::Health { name, json } => {
            let spinner = fetch_spinner(format!("Checking health of '{}'...", name));
            let result = check_health(&name, &config).await;
            spinner.finish_and_clear();

            match result {
                Ok(health) if json => match serde_json::to_string_pretty(&health) {
                    Ok(out) => println!("{}", out),
                    Err(e) => fatal(e.into()),
                },
                Ok(health) => report::print_health_report(&health),
                Err(e) => fatal(e),
            }
        }

        Commands::Search { query, limit } => {
            let registry = match RegistryClient::new(&config.network) {
                Ok(client) => client,
                Err(e) => fatal(e),
            };

            let spinner = fetch_spinner(format!("Searching for '{}'...", query));
            let result = registry.search(&query, limit).await;
            spinner.finish_and_clear();

            match result {
                Ok(hits) if hits.is_empty() => {
                    println!("No packages found for '{}'", query);
                }
                Ok(hits) => println!("{}", report::search_table(&hits)),
                Err(e) => fatal(e),
            }
        }

        Commands::Compare { first, second } => {
            let spinner = fetch_spinner(format!("Comparing '{}' and '{}'...", first, second));
            let result = compare_packages(&first, &second, &config).await;
            spinner.finish_and_clear();

            match result {
                Ok(comparison) => {
                    println!("{}", report::comparison_table(&comparison, chrono::Utc::now()));
                }
                Err(e) => fatal(e),
            }
        }

        Commands::Audit { manifest_path, all } => {
            let spinner = fetch_spinner("Auditing dependencies...".to_string());
            let result = audit_manifest(&manifest_path, &config).await;
            spinner.finish_and_clear();

            match result {
                Ok((outcomes, summary)) => {
                    println!("{}", report::audit_table(&outcomes, all));
                    report::print_audit_summary(&summary);
                }
                Err(e) => fatal(e),
            }
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn fetch_spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid spinner template"),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));
    spinner
}

fn fatal(e: crate_pulse::HealthError) -> ! {
    eprintln!("{} {}", "Error:".red().bold(), e);
    process::exit(1);
}
