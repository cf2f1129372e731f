use crate::corpus::CorpusFormat;
use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration structure for wiki-corpus
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub extract: ExtractConfig,
}

/// The site whose articles are harvested
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Scheme and host prepended to every identifier
    #[serde(rename = "base-url", default = "default_base_url")]
    pub base_url: String,

    /// Path prefix shared by all article identifiers
    #[serde(rename = "article-prefix", default = "default_article_prefix")]
    pub article_prefix: String,

    /// Substrings that exclude a link from the frontier
    #[serde(rename = "excluded-patterns", default = "default_excluded_patterns")]
    pub excluded_patterns: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            article_prefix: default_article_prefix(),
            excluded_patterns: default_excluded_patterns(),
        }
    }
}

/// Frontier construction and download behavior
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Newline-separated seed identifiers
    #[serde(rename = "seeds-path")]
    pub seeds_path: PathBuf,

    /// Number of articles the corpus should end up with
    #[serde(rename = "article-target")]
    pub article_target: usize,

    /// Extra fraction of identifiers admitted to absorb malformed pages
    #[serde(rename = "frontier-slack", default = "default_frontier_slack")]
    pub frontier_slack: f64,

    /// Retries after the first failed attempt
    #[serde(rename = "max-retries", default = "default_max_retries")]
    pub max_retries: u32,

    /// Fixed delay between attempts (milliseconds)
    #[serde(rename = "retry-delay-ms", default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Download workers; 0 picks four per available processor
    #[serde(default)]
    pub workers: usize,

    /// Remove stored documents beyond the article target after fetching
    #[serde(rename = "prune-to-target", default = "default_true")]
    pub prune_to_target: bool,
}

impl CrawlerConfig {
    /// Frontier size cap: the article target plus the configured slack, rounded up
    pub fn frontier_limit(&self) -> usize {
        (self.article_target as f64 * (1.0 + self.frontier_slack)).ceil() as usize
    }

    /// Number of download workers to spawn
    pub fn worker_count(&self) -> usize {
        if self.workers > 0 {
            self.workers
        } else {
            available_processors() * 4
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

/// Output locations and record format
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory holding the stored raw documents and `urls.txt`
    #[serde(rename = "repository-path", default = "default_repository_path")]
    pub repository_path: PathBuf,

    /// Directory receiving corpus records
    #[serde(rename = "corpus-path", default = "default_corpus_path")]
    pub corpus_path: PathBuf,

    /// Corpus record serialization
    #[serde(default)]
    pub format: CorpusFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            repository_path: default_repository_path(),
            corpus_path: default_corpus_path(),
            format: CorpusFormat::default(),
        }
    }
}

/// Document extraction settings
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractConfig {
    /// Extraction workers; 0 picks one per available processor
    #[serde(default)]
    pub workers: usize,

    /// Character budget of the summary field
    #[serde(rename = "summary-max-chars", default = "default_summary_max_chars")]
    pub summary_max_chars: usize,

    /// Trailing sentence fragments shorter than this are dropped from a cut summary
    #[serde(
        rename = "summary-min-sentence-chars",
        default = "default_summary_min_sentence_chars"
    )]
    pub summary_min_sentence_chars: usize,
}

impl ExtractConfig {
    /// Number of extraction workers to spawn
    pub fn worker_count(&self) -> usize {
        if self.workers > 0 {
            self.workers
        } else {
            available_processors()
        }
    }
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            workers: 0,
            summary_max_chars: default_summary_max_chars(),
            summary_min_sentence_chars: default_summary_min_sentence_chars(),
        }
    }
}

fn available_processors() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

fn default_base_url() -> String {
    "https://en.wikipedia.org".to_string()
}

fn default_article_prefix() -> String {
    "/wiki/".to_string()
}

fn default_excluded_patterns() -> Vec<String> {
    ["ISO_", "IEEE_", "802.", "IEC_"]
        .iter()
        .map(|p| p.to_string())
        .collect()
}

fn default_frontier_slack() -> f64 {
    0.005
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    1000
}

fn default_true() -> bool {
    true
}

fn default_repository_path() -> PathBuf {
    PathBuf::from("./repository/")
}

fn default_corpus_path() -> PathBuf {
    PathBuf::from("./corpus/")
}

fn default_summary_max_chars() -> usize {
    170
}

fn default_summary_min_sentence_chars() -> usize {
    25
}
