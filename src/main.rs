//! Council-Docs main entry point
//!
//! This is the command-line interface for the council document archive walker.

use anyhow::Context;
use clap::Parser;
use council_docs::config::{load_config_with_hash, Config};
use council_docs::crawler::download_documents;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Council-Docs: download archived Tulsa City Council documents
///
/// Walks the council document listing backwards from a starting page by
/// decrementing its `item` index, downloading every file whose name matches
/// the filter.
#[derive(Parser, Debug)]
#[command(name = "council-docs")]
#[command(version)]
#[command(about = "Download council documents by walking the listing archive backwards", long_about = None)]
#[command(after_help = "Examples:
  # Download all documents from the last 5 pages
  council-docs --all-documents --max-pages 5

  # Download only minutes with default settings
  council-docs

  # Download only agendas with a custom starting URL
  council-docs --filter Agenda --start-url \"https://www.cityoftulsa.org/apps/CouncilDocuments?item=45000\"")]
struct Cli {
    /// Starting listing URL [default: https://www.cityoftulsa.org/apps/CouncilDocuments?item=47837]
    #[arg(long)]
    start_url: Option<String>,

    /// Directory to save downloaded documents [default: downloaded_documents]
    #[arg(long)]
    output: Option<PathBuf>,

    /// Maximum number of pages to process [default: unlimited]
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    max_pages: Option<u32>,

    /// Delay in seconds between pages [default: 1]
    #[arg(long)]
    delay: Option<u64>,

    /// Only download documents with this word in the filename [default: Minutes]
    #[arg(long)]
    filter: Option<String>,

    /// Download all documents, ignoring the filter
    #[arg(long)]
    all_documents: bool,

    /// Path to an optional TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show the resolved configuration and exit without downloading
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = resolve_config(&cli)?;

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    log_settings(&config);

    let summary = download_documents(&config)
        .await
        .context("Traversal failed")?;
    summary.log();

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("council_docs=info,warn"),
            1 => EnvFilter::new("council_docs=debug,info"),
            _ => EnvFilter::new("council_docs=trace,debug"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Builds the effective configuration: defaults, then the file, then flags
fn resolve_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!(
                "Configuration loaded from {} (hash: {})",
                path.display(),
                hash
            );
            config
        }
        None => Config::default(),
    };

    let scraper = &mut config.scraper;
    if let Some(start_url) = &cli.start_url {
        scraper.start_url = start_url.clone();
    }
    if let Some(output) = &cli.output {
        scraper.output = output.display().to_string();
    }
    if let Some(max_pages) = cli.max_pages {
        scraper.max_pages = Some(max_pages);
    }
    if let Some(delay) = cli.delay {
        scraper.delay = delay;
    }
    if let Some(filter) = &cli.filter {
        scraper.filter = Some(filter.clone());
    }
    if cli.all_documents {
        scraper.all_documents = true;
    }

    council_docs::config::validate(&config).context("Invalid configuration")?;
    Ok(config)
}

/// Logs the settings a run starts with
fn log_settings(config: &Config) {
    let scraper = &config.scraper;

    tracing::info!("Starting document download from: {}", scraper.start_url);
    tracing::info!("Output directory: {}", scraper.output);

    match scraper.max_pages {
        Some(max) => tracing::info!("Maximum pages to process: {}", max),
        None => tracing::info!("Maximum pages: Unlimited"),
    }

    match scraper.effective_filter() {
        Some(word) => tracing::info!("Filter word: {}", word),
        None => tracing::info!("No filename filter: downloading all documents"),
    }

    if scraper.request_timeout_secs.is_none() {
        tracing::debug!("No request timeout configured; requests may block indefinitely");
    }
}

/// Handles the --dry-run mode: shows the resolved configuration
fn handle_dry_run(config: &Config) {
    let scraper = &config.scraper;

    println!("=== Council-Docs Dry Run ===\n");

    println!("Traversal:");
    println!("  Start URL: {}", scraper.start_url);
    match scraper.max_pages {
        Some(max) => println!("  Max pages: {}", max),
        None => println!("  Max pages: unlimited"),
    }
    println!("  Delay: {}s", scraper.delay);

    println!("\nDocuments:");
    println!("  Output directory: {}", scraper.output);
    match scraper.effective_filter() {
        Some(word) => println!("  Filter: {}", word),
        None => println!("  Filter: none (all documents)"),
    }
    println!("  Retrieval template: {}", scraper.document_url_template);
    match scraper.request_timeout_secs {
        Some(secs) => println!("  Request timeout: {}s", secs),
        None => println!("  Request timeout: none"),
    }

    println!("\nUser Agent: {}", config.user_agent.header_value());

    println!("\n✓ Configuration is valid");
}
