//! Folio CLI
//!
//! Command-line interface for resolving site assets through the cached
//! loader and relaying contact messages.

mod config;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use folio_cache::TtlCache;
use folio_contact::{ContactForm, EmailRelayClient, EmailRelayConfig};
use folio_core::traits::ResourceFetcher;
use folio_core::types::{LoadSource, LoadState};
use folio_fetch::{FsFetcher, HttpFetcher, HttpFetcherConfig};
use folio_loader::ResourceLoader;

use crate::config::FolioConfig;

type DynLoader = ResourceLoader<Box<dyn ResourceFetcher>>;

/// Folio - cached asset loading and contact relay
#[derive(Parser)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Local asset directory (overrides FOLIO_ASSETS_DIR)
    #[arg(long, global = true)]
    assets_dir: Option<PathBuf>,

    /// Remote asset host (overrides FOLIO_ASSET_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve one or more assets, in order, through a shared cache
    Load {
        /// Resource identifiers
        #[arg(required = true)]
        ids: Vec<String>,
        /// Handle substituted when a load fails
        #[arg(short, long)]
        fallback: Option<String>,
    },

    /// Warm the cache for a batch of assets concurrently
    Preload {
        /// Resource identifiers
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Validate and send a contact message
    Contact {
        /// Sender's name
        #[arg(long)]
        name: String,
        /// Sender's reply address
        #[arg(long)]
        email: String,
        /// Message body
        #[arg(long)]
        message: String,
        /// Validate only; do not send
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "folio=debug,info"
    } else {
        "folio=info,warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = FolioConfig::from_env().context("Invalid configuration")?;
    if let Some(dir) = cli.assets_dir {
        config = config.with_assets_dir(dir);
    }
    if let Some(url) = cli.base_url {
        config = config.with_asset_base_url(url);
    }

    match cli.command {
        Commands::Load { ids, fallback } => cmd_load(&config, &ids, fallback.as_deref()).await,
        Commands::Preload { ids } => cmd_preload(&config, &ids).await,
        Commands::Contact {
            name,
            email,
            message,
            dry_run,
        } => cmd_contact(ContactForm::new(name, email, message), dry_run).await,
    }
}

/// Builds a loader over the configured asset source
fn build_loader(config: &FolioConfig) -> Result<DynLoader> {
    let fetcher: Box<dyn ResourceFetcher> = match &config.asset_base_url {
        Some(base_url) => {
            let http_config =
                HttpFetcherConfig::new(base_url.as_str()).with_timeout(config.fetch_timeout_secs);
            Box::new(HttpFetcher::with_config(http_config).context("Failed to set up asset host")?)
        }
        None => Box::new(FsFetcher::new(&config.assets_dir, config.public_prefix.as_str())),
    };

    let cache = Arc::new(TtlCache::with_config(config.cache.clone()));
    debug!(source = %describe_source(config), "Loader ready");
    Ok(ResourceLoader::new(cache, fetcher))
}

fn describe_source(config: &FolioConfig) -> String {
    match &config.asset_base_url {
        Some(url) => url.clone(),
        None => config.assets_dir.display().to_string(),
    }
}

/// Resolve assets one after another
async fn cmd_load(config: &FolioConfig, ids: &[String], fallback: Option<&str>) -> Result<()> {
    println!("{} {}", "📦 Loading from:".cyan().bold(), describe_source(config));

    let loader = build_loader(config)?;
    let mut failed = 0usize;

    for id in ids {
        match loader.load(id, fallback).await {
            LoadState::Succeeded {
                value,
                source: LoadSource::Fallback,
                error,
            } => {
                println!("   {} {} → {} {}", "⚠️".yellow(), id, value, "(fallback)".yellow());
                if let Some(error) = error {
                    println!("      {} {}", "Cause:".dimmed(), error);
                }
            }
            LoadState::Succeeded { value, source, .. } => {
                println!("   {} {} → {} {}", "✓".green(), id, value, format!("({})", source).dimmed());
            }
            LoadState::Failed { error } => {
                failed += 1;
                println!("   {} {} {}", "✗".red(), id, error.to_string().red());
            }
            LoadState::Pending => continue,
        }
    }

    let stats = loader.cache().stats();
    println!("\n   {} {} cached", "Cache:".dimmed(), stats.total_entries);

    if failed > 0 {
        bail!("{} of {} resource(s) failed to load", failed, ids.len());
    }
    Ok(())
}

/// Preload a batch with a progress bar
async fn cmd_preload(config: &FolioConfig, ids: &[String]) -> Result<()> {
    println!("{} {} asset(s)", "🔥 Preloading".cyan().bold(), ids.len());

    let loader = build_loader(config)?;

    let pb = ProgressBar::new(ids.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let report = loader
        .preload_with_progress(ids, |progress| {
            pb.set_position(progress.settled as u64);
            pb.set_message(progress.last_resource_id.clone());
        })
        .await;

    pb.finish_with_message("done");

    println!(
        "\n{} {}/{} loaded ({}%)",
        "📈 Results:".green().bold(),
        report.loaded_count,
        report.total_count,
        report.progress()
    );

    if report.all_loaded() {
        println!("   {} All assets loaded!", "✅".green());
        return Ok(());
    }

    for failure in &report.errors {
        println!("   {} #{} {} {}", "✗".red(), failure.index, failure.resource_id, failure.error.dimmed());
    }
    bail!("{} asset(s) failed to preload", report.errors.len())
}

/// Validate and relay a contact message
async fn cmd_contact(form: ContactForm, dry_run: bool) -> Result<()> {
    println!("{}", "✉️  Checking contact message...".cyan().bold());

    if let Err(errors) = form.validate() {
        for (field, message) in errors.iter() {
            println!("   {} {}", format!("{}:", field).red(), message);
        }
        bail!("Contact form is invalid");
    }
    println!("   {} Form is valid", "✓".green());

    if dry_run {
        println!("\n{}", "ℹ️  Dry run, nothing sent.".cyan());
        return Ok(());
    }

    let relay_config = EmailRelayConfig::from_env().context("Email relay is not configured")?;
    let client = EmailRelayClient::with_config(relay_config)?;

    let receipt = client
        .send(&form)
        .await
        .context("Failed to send contact message")?;

    println!("\n{} {} ({})", "✅ Message sent:".green().bold(), receipt.text, receipt.status);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_build_loader_uses_assets_dir() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("hero.png"), b"png").unwrap();
        let config = FolioConfig::default().with_assets_dir(dir.path());

        let loader = build_loader(&config).unwrap();
        let state = loader.load("hero.png", None).await;

        assert_eq!(state.value().map(String::as_str), Some("/assets/hero.png"));
        assert_eq!(loader.load("hero.png", None).await.source(), Some(LoadSource::Cache));
    }

    #[test]
    fn test_build_loader_rejects_bad_base_url() {
        let config = FolioConfig::default().with_asset_base_url("not a url");
        assert!(build_loader(&config).is_err());
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from(["folio", "-v", "load", "a.png", "b.json", "--fallback", "/x.svg"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Load { ids, fallback } => {
                assert_eq!(ids, vec!["a.png", "b.json"]);
                assert_eq!(fallback.as_deref(), Some("/x.svg"));
            }
            _ => panic!("expected load"),
        }
        assert!(Cli::try_parse_from(["folio", "preload"]).is_err());
    }
}
