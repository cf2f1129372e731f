//! Extraction of structured text from stored article documents
//!
//! This module contains the extraction side of the pipeline, including:
//! - Text normalization and summary truncation
//! - Canonical URL and timestamp metadata
//! - Node classification and the recursive content walker
//! - The parallel extraction coordinator

mod classify;
mod coordinator;
mod document;
mod metadata;
mod text;
mod walker;

pub use classify::{classify, NodeRule, Position};
pub use coordinator::{ExtractOutcome, ExtractionJob, WorkerReport};
pub use document::{Bucket, ExtractedDocument};
pub use metadata::{article_dates, canonical_url, parse_timestamp, ArticleDates};
pub use text::{normalize, strip_parentheticals, summarize, SummaryLimits, NO_DESCRIPTION};

use std::fs;
use std::path::Path;
use std::time::Instant;

use scraper::{ElementRef, Html, Selector};

use crate::config::{Config, ExtractConfig};
use crate::output::ExtractReport;
use crate::storage::Repository;
use crate::{CorpusError, ExtractError, ExtractResult};
use walker::Walker;

impl From<&ExtractConfig> for SummaryLimits {
    fn from(config: &ExtractConfig) -> Self {
        Self {
            max_chars: config.summary_max_chars,
            min_sentence_chars: config.summary_min_sentence_chars,
        }
    }
}

/// Extracts a stored article document from disk
pub fn extract_document(path: &Path, limits: &SummaryLimits) -> ExtractResult<ExtractedDocument> {
    let html = fs::read_to_string(path)?;
    extract_html(&html, limits)
}

/// Extracts an article from its markup
///
/// # Arguments
///
/// * `html` - Full article page
/// * `limits` - Summary truncation limits
///
/// # Returns
///
/// * `Ok(ExtractedDocument)` - Sections and auxiliary fields in document order
/// * `Err(ExtractError)` - The canonical link, title heading, content
///   container or content root is missing
pub fn extract_html(html: &str, limits: &SummaryLimits) -> ExtractResult<ExtractedDocument> {
    let document = Html::parse_document(html);

    let url = canonical_url(&document)?;
    let dates = article_dates(&document);

    let heading = select_first(&document, "h1#firstHeading")
        .ok_or(ExtractError::MissingElement("title heading"))?;
    let container = select_first(&document, "div#mw-content-text")
        .ok_or(ExtractError::MissingElement("content container"))?;

    let root = content_root(container).ok_or(ExtractError::MissingElement("content root"))?;

    let title = Walker::heading_text(heading);
    let mut walker = Walker::new(title.clone());
    walker.walk(root);
    let (sections, auxiliary) = walker.finish(limits);

    Ok(ExtractedDocument {
        url,
        title,
        sections,
        auxiliary,
        published: dates.published,
        modified: dates.modified,
    })
}

fn select_first<'a>(document: &'a Html, css: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(css).ok()?;
    document.select(&selector).next()
}

/// The parser output wrapper inside the content container
///
/// Falls back to the container itself when it has element children but no
/// wrapper. An empty container has no content root.
fn content_root(container: ElementRef<'_>) -> Option<ElementRef<'_>> {
    let mut children = container.children().filter_map(ElementRef::wrap).peekable();
    children.peek()?;

    let wrapper = children.find(|child| child.value().classes().any(|c| c == "mw-parser-output"));
    Some(wrapper.unwrap_or(container))
}

/// Extracts every stored document in the repository into the corpus directory
///
/// # Arguments
///
/// * `config` - The corpus configuration
///
/// # Returns
///
/// * `Ok(ExtractReport)` - Totals and failures of the run
/// * `Err(CorpusError)` - The repository could not be listed, the corpus
///   directory could not be created, or a worker panicked
pub async fn extract_corpus(config: &Config) -> Result<ExtractReport, CorpusError> {
    let repository = Repository::new(&config.output.repository_path);
    let filenames = repository.list_documents()?;

    let corpus_dir = &config.output.corpus_path;
    fs::create_dir_all(corpus_dir)?;

    let workers = config.extract.worker_count();
    tracing::info!(
        "Extracting {} documents into '{}' using {} workers",
        filenames.len(),
        corpus_dir.display(),
        workers
    );

    let job = ExtractionJob::new(
        repository,
        corpus_dir.clone(),
        config.output.format,
        SummaryLimits::from(&config.extract),
    );

    let started = Instant::now();
    let outcome = job.run(&filenames, workers).await?;

    Ok(ExtractReport {
        outcome,
        workers,
        elapsed: started.elapsed(),
    })
}
