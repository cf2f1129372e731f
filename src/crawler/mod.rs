//! Crawler module for frontier construction and article download
//!
//! This module contains the crawl side of the pipeline, including:
//! - HTTP fetching with fixed-delay retries
//! - Article link extraction
//! - Sequential frontier construction with dedup and a size cap
//! - Static partitioning and the concurrent fetch/store engine

mod engine;
mod fetcher;
mod frontier;
mod parser;
mod partition;

pub use engine::{FetchEngine, FetchOutcome};
pub use fetcher::{
    build_http_client, fetch_with_retry, FetchResult, HttpFetcher, PageFetcher, RetryPolicy,
};
pub use frontier::{Admission, ExpandError, Frontier, FrontierBuilder, FrontierOutcome};
pub use parser::{parse_article, ParsedArticle};
pub use partition::{chunk_bounds, partition};

use crate::article::ArticleSite;
use crate::config::Config;
use crate::output::CrawlReport;
use crate::storage::{read_seeds, Repository};
use crate::CorpusError;
use std::sync::Arc;
use std::time::Instant;

/// Reads the seeds, builds the frontier, and writes the `urls.txt` manifest
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `fetcher` - Page fetcher used to expand identifiers
///
/// # Returns
///
/// * `Ok(FrontierOutcome)` - The frontier was built and written
/// * `Err(CorpusError)` - The seeds could not be read or the manifest written
pub async fn build_frontier<F>(config: &Config, fetcher: &F) -> Result<FrontierOutcome, CorpusError>
where
    F: PageFetcher + ?Sized,
{
    let seeds = read_seeds(&config.crawler.seeds_path)?;
    tracing::info!(
        "Read {} seeds from '{}'",
        seeds.len(),
        config.crawler.seeds_path.display()
    );

    let site = ArticleSite::new(&config.site);
    let builder = FrontierBuilder::new(
        fetcher,
        &site,
        RetryPolicy::from_config(&config.crawler),
        config.crawler.frontier_limit(),
    );
    let outcome = builder.build(seeds).await;

    let repository = Repository::new(&config.output.repository_path);
    repository.ensure_exists()?;
    let manifest = repository.write_manifest(&outcome.identifiers)?;
    tracing::info!(
        "Wrote {} identifiers to '{}'",
        outcome.identifiers.len(),
        manifest.display()
    );

    Ok(outcome)
}

/// Downloads `identifiers` into the repository and optionally prunes the surplus
///
/// Returns the fetch outcome and the filenames removed by pruning.
pub async fn fetch_articles<F>(
    config: &Config,
    fetcher: Arc<F>,
    identifiers: &[String],
) -> Result<(FetchOutcome, Vec<String>), CorpusError>
where
    F: PageFetcher + 'static,
{
    let repository = Repository::new(&config.output.repository_path);
    repository.ensure_exists()?;

    let engine = FetchEngine::new(
        fetcher,
        ArticleSite::new(&config.site),
        repository.clone(),
        RetryPolicy::from_config(&config.crawler),
        config.crawler.worker_count(),
    );

    tracing::info!(
        "Downloading {} articles using {} workers",
        identifiers.len(),
        engine.workers()
    );
    let outcome = engine.fetch_all(identifiers).await?;

    let pruned = if config.crawler.prune_to_target {
        repository.prune(identifiers, config.crawler.article_target)?
    } else {
        Vec::new()
    };

    Ok((outcome, pruned))
}

/// Runs a complete crawl: frontier construction followed by download
///
/// # Example
///
/// ```no_run
/// use wiki_corpus::config::load_config;
/// use wiki_corpus::crawler::crawl;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("corpus.toml"))?;
/// let report = crawl(&config).await?;
/// println!("{} articles stored", report.fetch.stored);
/// # Ok(())
/// # }
/// ```
pub async fn crawl(config: &Config) -> Result<CrawlReport, CorpusError> {
    let fetcher = Arc::new(HttpFetcher::from_config(&config.user_agent)?);

    let started = Instant::now();
    let frontier = build_frontier(config, fetcher.as_ref()).await?;
    let frontier_time = started.elapsed();

    let started = Instant::now();
    let (fetch, pruned) = fetch_articles(config, fetcher, &frontier.identifiers).await?;

    Ok(CrawlReport {
        article_target: config.crawler.article_target,
        frontier_size: frontier.identifiers.len(),
        parsed: Some(frontier.parsed),
        frontier_time: Some(frontier_time),
        fetch,
        fetch_time: started.elapsed(),
        workers: config.crawler.worker_count(),
        pruned,
    })
}

/// Downloads the identifiers listed in an existing `urls.txt` manifest
pub async fn fetch_manifest(config: &Config) -> Result<CrawlReport, CorpusError> {
    let fetcher = Arc::new(HttpFetcher::from_config(&config.user_agent)?);
    let identifiers = Repository::new(&config.output.repository_path).read_manifest()?;

    let started = Instant::now();
    let (fetch, pruned) = fetch_articles(config, fetcher, &identifiers).await?;

    Ok(CrawlReport {
        article_target: config.crawler.article_target,
        frontier_size: identifiers.len(),
        parsed: None,
        frontier_time: None,
        fetch,
        fetch_time: started.elapsed(),
        workers: config.crawler.worker_count(),
        pruned,
    })
}
