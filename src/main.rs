//! Form-Scout main entry point
//!
//! This is the command-line interface for the Form-Scout form crawler.

use clap::Parser;
use form_scout::catalog::{FormCatalog, PathMatch};
use form_scout::config::{load_config_with_hash, validate, Config};
use form_scout::crawler::run_crawl;
use form_scout::output::{print_statistics, CrawlStatistics};
use form_scout::url::parse_base_url;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Form-Scout: a single-site form and SEO metadata crawler
///
/// Form-Scout crawls one website starting at BASE_URL, finds the lead-capture
/// forms listed in its form catalog, and writes their fields together with the
/// page's meta tags to a CSV report.
#[derive(Parser, Debug)]
#[command(name = "form-scout")]
#[command(version = "1.0.0")]
#[command(about = "A single-site form and SEO metadata crawler", long_about = None)]
struct Cli {
    /// Root URL of the site to crawl
    #[arg(value_name = "BASE_URL")]
    base_url: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Number of pages fetched concurrently
    #[arg(long)]
    batch_size: Option<usize>,

    /// Maximum number of pages to visit
    #[arg(long)]
    max_pages: Option<usize>,

    /// Wall-clock budget for the crawl, in minutes
    #[arg(long)]
    timeout_minutes: Option<u64>,

    /// Path of the CSV report
    #[arg(short, long, value_name = "FILE")]
    output: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate settings and show the form catalog without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((cfg, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    cfg
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => Config::default(),
    };

    apply_overrides(&mut config, &cli);
    if let Err(e) = validate(&config) {
        tracing::error!("Invalid settings: {}", e);
        return Err(e.into());
    }

    // Reject a bad root before doing any work
    parse_base_url(&cli.base_url)?;

    if cli.dry_run {
        handle_dry_run(&config, &cli.base_url);
        Ok(())
    } else {
        handle_crawl(&config, &cli.base_url).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("form_scout=info,warn"),
            1 => EnvFilter::new("form_scout=debug,info"),
            2 => EnvFilter::new("form_scout=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Applies command-line overrides on top of the loaded configuration
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(batch_size) = cli.batch_size {
        config.crawler.batch_size = batch_size;
    }
    if let Some(max_pages) = cli.max_pages {
        config.crawler.max_pages = max_pages;
    }
    if let Some(timeout_minutes) = cli.timeout_minutes {
        config.crawler.timeout_minutes = timeout_minutes;
    }
    if let Some(output) = &cli.output {
        config.output.csv_path = output.clone();
    }
}

/// Handles the --dry-run mode: shows the effective settings and catalog
fn handle_dry_run(config: &Config, base_url: &str) {
    println!("=== Form-Scout Dry Run ===\n");

    println!("Target: {}\n", base_url);

    println!("Crawler Configuration:");
    println!("  Batch size: {}", config.crawler.batch_size);
    println!("  Max pages: {}", config.crawler.max_pages);
    println!("  Timeout: {} minutes", config.crawler.timeout_minutes);
    println!(
        "  Request timeout: {}s",
        config.crawler.request_timeout_secs
    );

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.value);

    println!("\nOutput:");
    println!("  CSV report: {}", config.output.csv_path);

    let catalog = FormCatalog::from_entries(&config.form_rules);
    println!("\nForm Catalog ({} rules):", catalog.len());
    for rule in catalog.rules() {
        let path = match &rule.path {
            PathMatch::Root => "(root)".to_string(),
            PathMatch::Fragment(fragment) => fragment.clone(),
        };
        println!("  - {} -> {}", path, rule.form_type);
        for selector in &rule.selectors {
            println!("    * {}", selector);
        }
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config, base_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        "Batch size: {}, max pages: {}, timeout: {} minutes",
        config.crawler.batch_size,
        config.crawler.max_pages,
        config.crawler.timeout_minutes
    );

    match run_crawl(config, base_url).await {
        Ok(outcome) => {
            println!();
            print_statistics(&CrawlStatistics::from_outcome(&outcome));
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
