//! Quill-Enrich main entry point
//!
//! Command-line interface for enriching a book dataset with author
//! demographic attributes.

use clap::Parser;
use quill_enrich::config::load_config;
use quill_enrich::enrich::run_enrichment;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Quill-Enrich: author demographic enrichment for book datasets
///
/// Resolves each author's gender and country through a manual override
/// table, pronoun analysis of their scraped biography, and a name-inference
/// API, then writes the input dataset back out with the three enrichment
/// columns appended.
#[derive(Parser, Debug)]
#[command(name = "quill-enrich")]
#[command(version = "0.1.0")]
#[command(about = "Author demographic enrichment for book datasets", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Override the configured input CSV path
    #[arg(long, value_name = "PATH")]
    input: Option<PathBuf>,

    /// Override the configured output CSV path
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Validate config and show what would run without fetching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let mut config = match load_config(&cli.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    // Apply CLI path overrides
    if let Some(input) = &cli.input {
        config.io.input_path = input.display().to_string();
    }
    if let Some(output) = &cli.output {
        config.io.output_path = output.display().to_string();
    }

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_enrich(config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("quill_enrich=info,warn"),
            1 => EnvFilter::new("quill_enrich=debug,info"),
            2 => EnvFilter::new("quill_enrich=trace,debug"),
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

/// Handles the --dry-run mode: validates config and shows what would run
fn handle_dry_run(config: &quill_enrich::config::Config) {
    println!("=== Quill-Enrich Dry Run ===\n");

    println!("Enrichment:");
    println!(
        "  Max concurrent requests: {}",
        config.enrichment.max_concurrent_requests
    );
    println!(
        "  Site request delay: {}ms",
        config.enrichment.site_request_delay_millis
    );
    println!("  Max fetch attempts: {}", config.enrichment.max_fetch_attempts);
    println!("  Backoff unit: {}ms", config.enrichment.backoff_unit_millis);

    println!("\nHTTP:");
    println!("  User agent: {}", config.http.user_agent);
    println!("  Request timeout: {}s", config.http.request_timeout_secs);

    println!("\nInference API:");
    println!("  Endpoint: {}", config.inference.endpoint);
    println!(
        "  Confidence threshold: {}",
        config.inference.confidence_threshold
    );
    println!(
        "  Request delay: {}ms",
        config.inference.request_delay_millis
    );

    println!("\nPaths:");
    println!("  Input: {}", config.io.input_path);
    println!("  Output: {}", config.io.output_path);
    println!("  Manual overrides: {}", config.io.manual_overrides_path);

    println!("\n✓ Configuration is valid");
}

/// Handles the main enrichment run
async fn handle_enrich(
    config: quill_enrich::config::Config,
) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        "Enriching {} -> {} (cap {}, {}ms site delay)",
        config.io.input_path,
        config.io.output_path,
        config.enrichment.max_concurrent_requests,
        config.enrichment.site_request_delay_millis
    );

    match run_enrichment(config).await {
        Ok(stats) => {
            tracing::info!("Enrichment completed successfully ({} records)", stats.total);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Enrichment failed: {}", e);
            Err(e.into())
        }
    }
}
