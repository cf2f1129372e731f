//! wiki-corpus main entry point
//!
//! This is the command-line interface for the wiki-corpus harvester.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use wiki_corpus::config::{load_config_with_hash, Config};
use wiki_corpus::crawler::{build_frontier, crawl, fetch_manifest, HttpFetcher};
use wiki_corpus::extract::extract_corpus;
use wiki_corpus::output::{print_crawl_report, print_extract_report};
use wiki_corpus::CorpusError;

/// wiki-corpus: an encyclopedia article harvester
///
/// wiki-corpus follows article links from a list of seeds, downloads the
/// resulting frontier concurrently, and converts every stored article into
/// a sectioned plain-text corpus record.
#[derive(Parser, Debug)]
#[command(name = "wiki-corpus")]
#[command(version = "1.0.0")]
#[command(about = "An encyclopedia article harvester and corpus builder", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the frontier from the seeds and write urls.txt
    Frontier,

    /// Download every identifier listed in urls.txt
    Fetch,

    /// Build the frontier, then download it
    Crawl,

    /// Convert stored documents into corpus records
    Extract,

    /// Crawl, then extract
    Run,

    /// Validate the configuration and show the effective settings
    Check,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    if let Err(e) = run(cli).await {
        tracing::error!("{:#}", e);
        std::process::exit(exit_code(&e));
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration '{}'", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    match cli.command {
        Command::Frontier => handle_frontier(&config).await,
        Command::Fetch => {
            let report = fetch_manifest(&config).await.context("Download failed")?;
            print_crawl_report(&report);
            Ok(())
        }
        Command::Crawl => handle_crawl(&config).await,
        Command::Extract => handle_extract(&config).await,
        Command::Run => {
            handle_crawl(&config).await?;
            handle_extract(&config).await
        }
        Command::Check => {
            handle_check(&config);
            Ok(())
        }
    }
}

/// Exit status for a fatal error: the underlying OS error code when there is one
fn exit_code(error: &anyhow::Error) -> i32 {
    error
        .chain()
        .find_map(|cause| cause.downcast_ref::<CorpusError>())
        .and_then(CorpusError::os_error_code)
        .or_else(|| {
            error
                .chain()
                .find_map(|cause| cause.downcast_ref::<std::io::Error>())
                .and_then(std::io::Error::raw_os_error)
        })
        .unwrap_or(1)
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("wiki_corpus=info,warn"),
            1 => EnvFilter::new("wiki_corpus=debug,info"),
            2 => EnvFilter::new("wiki_corpus=trace,debug"),
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

/// Handles the `frontier` command: builds the frontier and writes urls.txt
async fn handle_frontier(config: &Config) -> anyhow::Result<()> {
    let fetcher = HttpFetcher::from_config(&config.user_agent)?;
    let outcome = build_frontier(config, &fetcher)
        .await
        .context("Frontier construction failed")?;

    println!(
        "Extracted {} article identifiers from {} articles ({} unparsed)",
        outcome.identifiers.len(),
        outcome.parsed,
        outcome.unparsed.len()
    );
    Ok(())
}

/// Handles the `crawl` command: frontier construction followed by download
async fn handle_crawl(config: &Config) -> anyhow::Result<()> {
    tracing::info!(
        "Starting crawl: target {} articles, frontier limit {}",
        config.crawler.article_target,
        config.crawler.frontier_limit()
    );

    let report = crawl(config).await.context("Crawl failed")?;
    print_crawl_report(&report);
    Ok(())
}

/// Handles the `extract` command: converts stored documents into records
async fn handle_extract(config: &Config) -> anyhow::Result<()> {
    let report = extract_corpus(config).await.context("Extraction failed")?;
    print_extract_report(&report);
    Ok(())
}

/// Handles the `check` command: shows the effective configuration
fn handle_check(config: &Config) {
    println!("=== wiki-corpus Configuration ===\n");

    println!("Site:");
    println!("  Base URL: {}", config.site.base_url);
    println!("  Article prefix: {}", config.site.article_prefix);
    println!(
        "  Excluded patterns: {}",
        config.site.excluded_patterns.join(", ")
    );

    println!("\nCrawler:");
    println!("  Seeds: {}", config.crawler.seeds_path.display());
    println!("  Article target: {}", config.crawler.article_target);
    println!("  Frontier limit: {}", config.crawler.frontier_limit());
    println!(
        "  Retries: {} ({}ms apart)",
        config.crawler.max_retries, config.crawler.retry_delay_ms
    );
    println!("  Download workers: {}", config.crawler.worker_count());
    println!("  Prune to target: {}", config.crawler.prune_to_target);

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);
    println!("  Contact URL: {}", config.user_agent.contact_url);
    println!("  Contact Email: {}", config.user_agent.contact_email);

    println!("\nOutput:");
    println!("  Repository: {}", config.output.repository_path.display());
    println!("  Corpus: {}", config.output.corpus_path.display());
    println!("  Format: {:?}", config.output.format);

    println!("\nExtraction:");
    println!("  Workers: {}", config.extract.worker_count());
    println!(
        "  Summary: at most {} characters, fragments under {} dropped",
        config.extract.summary_max_chars, config.extract.summary_min_sentence_chars
    );

    println!("\n✓ Configuration is valid");
}
