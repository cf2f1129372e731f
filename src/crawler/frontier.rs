//! Frontier construction
//!
//! The frontier is an insertion-ordered set of identifiers capped at a fixed
//! size. It is built sequentially: each identifier is fetched and its
//! content links are admitted until the cap is reached or every identifier
//! has been expanded. Newly admitted identifiers extend the iteration, so
//! the frontier doubles as the work queue.

use crate::article::ArticleSite;
use crate::crawler::fetcher::{fetch_with_retry, PageFetcher, RetryPolicy};
use crate::crawler::parser::parse_article;
use indexmap::IndexSet;
use thiserror::Error;

/// Outcome of offering an identifier to the frontier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The identifier was appended
    Added,
    /// The identifier was already present
    Duplicate,
    /// The frontier is at its cap
    Full,
}

/// Deduplicated, size-bounded list of identifiers
#[derive(Debug, Clone)]
pub struct Frontier {
    identifiers: IndexSet<String>,
    limit: usize,
}

impl Frontier {
    /// Creates a frontier holding the seeds, in order
    ///
    /// A repeated seed keeps its first position. Seeds past the cap are dropped.
    pub fn with_seeds(seeds: impl IntoIterator<Item = String>, limit: usize) -> Self {
        let mut frontier = Self {
            identifiers: IndexSet::new(),
            limit,
        };

        for seed in seeds {
            if frontier.admit(seed) == Admission::Full {
                tracing::warn!("Seed list exceeds the frontier limit of {}", limit);
                break;
            }
        }

        frontier
    }

    /// Offers an identifier to the frontier
    ///
    /// Membership is checked before the cap, so a duplicate never reports `Full`.
    pub fn admit(&mut self, identifier: String) -> Admission {
        if self.identifiers.contains(&identifier) {
            Admission::Duplicate
        } else if self.is_full() {
            Admission::Full
        } else {
            self.identifiers.insert(identifier);
            Admission::Added
        }
    }

    pub fn len(&self) -> usize {
        self.identifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.identifiers.len() >= self.limit
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Identifier at insertion position `index`
    pub fn get(&self, index: usize) -> Option<&str> {
        self.identifiers.get_index(index).map(String::as_str)
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.identifiers.contains(identifier)
    }

    /// Consumes the frontier, returning identifiers in insertion order
    pub fn into_vec(self) -> Vec<String> {
        self.identifiers.into_iter().collect()
    }
}

/// Why one identifier could not be expanded
#[derive(Debug, Error)]
pub enum ExpandError {
    #[error("invalid article URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("download failed: {0}")]
    Fetch(String),

    #[error("cannot parse article: {0}")]
    Parse(String),
}

/// Result of frontier construction
#[derive(Debug, Clone)]
pub struct FrontierOutcome {
    /// Final frontier in insertion order
    pub identifiers: Vec<String>,

    /// Identifiers whose pages were fetched and scanned for links
    pub parsed: usize,

    /// Identifiers whose expansion failed
    pub unparsed: Vec<String>,

    /// True if expansion stopped because the cap was reached
    pub limit_reached: bool,
}

/// Builds the frontier by following article links from the seeds
pub struct FrontierBuilder<'a, F: PageFetcher + ?Sized> {
    fetcher: &'a F,
    site: &'a ArticleSite,
    retry: RetryPolicy,
    limit: usize,
}

impl<'a, F: PageFetcher + ?Sized> FrontierBuilder<'a, F> {
    /// Creates a builder
    ///
    /// # Arguments
    ///
    /// * `fetcher` - Page fetcher used for every expansion
    /// * `site` - Link filter and URL builder
    /// * `retry` - Retry policy for fetching a page
    /// * `limit` - Frontier size cap
    pub fn new(fetcher: &'a F, site: &'a ArticleSite, retry: RetryPolicy, limit: usize) -> Self {
        Self {
            fetcher,
            site,
            retry,
            limit,
        }
    }

    /// Expands the seeds into a full frontier
    ///
    /// Identifiers are expanded in frontier order. A failed expansion only
    /// skips that identifier. When the cap is hit while scanning a page,
    /// the rest of that page's links are dropped and no further identifier
    /// is expanded.
    pub async fn build(&self, seeds: Vec<String>) -> FrontierOutcome {
        let mut frontier = Frontier::with_seeds(seeds, self.limit);
        let mut parsed = 0;
        let mut unparsed = Vec::new();
        let mut limit_reached = false;
        let mut index = 0;

        while let Some(identifier) = frontier.get(index).map(str::to_string) {
            if frontier.is_full() {
                limit_reached = true;
                break;
            }

            match self.expand(&identifier).await {
                Ok(links) => {
                    parsed += 1;
                    for link in links {
                        if !self.site.accepts(&link) {
                            continue;
                        }

                        match frontier.admit(link) {
                            Admission::Added => {
                                tracing::debug!(
                                    "Adding '{}' to frontier [{}/{}]",
                                    frontier.get(frontier.len() - 1).unwrap_or_default(),
                                    frontier.len(),
                                    self.limit
                                );
                            }
                            Admission::Duplicate => {}
                            Admission::Full => {
                                limit_reached = true;
                                break;
                            }
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!("Error expanding '{}': {}", identifier, e);
                    unparsed.push(identifier);
                }
            }

            if limit_reached || frontier.is_full() {
                limit_reached = true;
                break;
            }

            index += 1;
        }

        tracing::info!(
            "Frontier holds {} identifiers after expanding {} articles{}",
            frontier.len(),
            parsed,
            if limit_reached { " (limit reached)" } else { "" }
        );

        FrontierOutcome {
            identifiers: frontier.into_vec(),
            parsed,
            unparsed,
            limit_reached,
        }
    }

    /// Fetches one article and returns the raw links of its content
    async fn expand(&self, identifier: &str) -> Result<Vec<String>, ExpandError> {
        let url = self.site.article_url(identifier)?;
        tracing::info!("Parsing '{}'", url);

        let body = fetch_with_retry(self.fetcher, url.as_str(), self.retry)
            .await
            .map_err(|failure| ExpandError::Fetch(failure.describe()))?;

        let parsed = parse_article(&body).map_err(ExpandError::Parse)?;
        Ok(parsed.links)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::crawler::fetcher::FetchResult;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    const BASE: &str = "https://en.wikipedia.org";

    /// Serves canned pages keyed by URL; anything else is a 404
    struct Pages {
        pages: HashMap<String, String>,
        requests: Mutex<Vec<String>>,
    }

    impl Pages {
        fn new(pages: &[(&str, &[&str])]) -> Self {
            let pages = pages
                .iter()
                .map(|(id, links)| (format!("{}{}", BASE, id), article(links)))
                .collect();
            Self {
                pages,
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PageFetcher for Pages {
        async fn fetch(&self, url: &str) -> FetchResult {
            self.requests.lock().unwrap().push(url.to_string());
            match self.pages.get(url) {
                Some(body) => FetchResult::Success {
                    status_code: 200,
                    body: body.clone(),
                },
                None => FetchResult::HttpError { status_code: 404 },
            }
        }
    }

    fn article(links: &[&str]) -> String {
        let anchors: String = links
            .iter()
            .map(|href| format!(r#"<a href="{}">link</a> "#, href))
            .collect();
        format!(
            r#"<html><body><h1 id="firstHeading">Page</h1><div id="mw-content-text"><p>{}</p></div></body></html>"#,
            anchors
        )
    }

    fn retry() -> RetryPolicy {
        RetryPolicy {
            max_retries: 1,
            delay: Duration::ZERO,
        }
    }

    fn seeds(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_frontier_admission() {
        let mut frontier = Frontier::with_seeds(seeds(&["/wiki/A", "/wiki/A"]), 2);
        assert_eq!(frontier.len(), 1);
        assert_eq!(frontier.admit("/wiki/A".to_string()), Admission::Duplicate);
        assert_eq!(frontier.admit("/wiki/B".to_string()), Admission::Added);
        assert_eq!(frontier.admit("/wiki/B".to_string()), Admission::Duplicate);
        assert_eq!(frontier.admit("/wiki/C".to_string()), Admission::Full);
        assert_eq!(frontier.into_vec(), seeds(&["/wiki/A", "/wiki/B"]));
    }

    #[test]
    fn test_seeds_truncated_at_limit() {
        let frontier = Frontier::with_seeds(seeds(&["/wiki/A", "/wiki/B", "/wiki/C"]), 2);
        assert!(frontier.is_full());
        assert!(!frontier.contains("/wiki/C"));
    }

    #[tokio::test]
    async fn test_self_and_external_links_excluded() {
        let fetcher = Pages::new(&[
            ("/wiki/A", &["/wiki/B", "/wiki/A", "https://example.com/x"]),
            ("/wiki/B", &[]),
        ]);
        let site = ArticleSite::new(&SiteConfig::default());
        let builder = FrontierBuilder::new(&fetcher, &site, retry(), 5);

        let outcome = builder.build(seeds(&["/wiki/A"])).await;
        assert_eq!(outcome.identifiers, seeds(&["/wiki/A", "/wiki/B"]));
        assert_eq!(outcome.parsed, 2);
        assert!(!outcome.limit_reached);
    }

    #[tokio::test]
    async fn test_newly_admitted_links_are_expanded() {
        let fetcher = Pages::new(&[
            ("/wiki/A", &["/wiki/B"]),
            ("/wiki/B", &["/wiki/C", "/wiki/Help:Contents", "/wiki/C#History"]),
            ("/wiki/C", &["/wiki/A"]),
        ]);
        let site = ArticleSite::new(&SiteConfig::default());
        let builder = FrontierBuilder::new(&fetcher, &site, retry(), 10);

        let outcome = builder.build(seeds(&["/wiki/A"])).await;
        assert_eq!(outcome.identifiers, seeds(&["/wiki/A", "/wiki/B", "/wiki/C"]));
        assert_eq!(outcome.parsed, 3);
    }

    #[tokio::test]
    async fn test_cap_stops_expansion() {
        let fetcher = Pages::new(&[
            ("/wiki/A", &["/wiki/B", "/wiki/C", "/wiki/D", "/wiki/E"]),
            ("/wiki/S", &["/wiki/F"]),
        ]);
        let site = ArticleSite::new(&SiteConfig::default());
        let builder = FrontierBuilder::new(&fetcher, &site, retry(), 3);

        let outcome = builder.build(seeds(&["/wiki/A", "/wiki/S"])).await;
        assert_eq!(outcome.identifiers, seeds(&["/wiki/A", "/wiki/S", "/wiki/B"]));
        assert!(outcome.limit_reached);
        assert_eq!(outcome.parsed, 1);
        // The second seed is never fetched once the cap is hit
        assert_eq!(fetcher.requests(), vec![format!("{}/wiki/A", BASE)]);
    }

    #[tokio::test]
    async fn test_failed_seed_does_not_abort_build() {
        let fetcher = Pages::new(&[("/wiki/Good", &["/wiki/X"]), ("/wiki/X", &[])]);
        let site = ArticleSite::new(&SiteConfig::default());
        let builder = FrontierBuilder::new(&fetcher, &site, retry(), 10);

        let outcome = builder.build(seeds(&["/wiki/Missing", "/wiki/Good"])).await;
        assert_eq!(outcome.unparsed, seeds(&["/wiki/Missing"]));
        assert_eq!(outcome.parsed, 2);
        assert_eq!(
            outcome.identifiers,
            seeds(&["/wiki/Missing", "/wiki/Good", "/wiki/X"])
        );
        // One initial attempt plus one retry for the missing page
        let missing = format!("{}/wiki/Missing", BASE);
        assert_eq!(
            fetcher.requests().iter().filter(|u| **u == missing).count(),
            2
        );
    }

    #[tokio::test]
    async fn test_frontier_never_exceeds_cap_or_duplicates() {
        let fetcher = Pages::new(&[
            ("/wiki/A", &["/wiki/B", "/wiki/B", "/wiki/C"]),
            ("/wiki/B", &["/wiki/A", "/wiki/D", "/wiki/E", "/wiki/F"]),
            ("/wiki/C", &["/wiki/G"]),
        ]);
        let site = ArticleSite::new(&SiteConfig::default());

        for limit in 1..8 {
            let builder = FrontierBuilder::new(&fetcher, &site, retry(), limit);
            let outcome = builder.build(seeds(&["/wiki/A"])).await;

            assert!(outcome.identifiers.len() <= limit);
            let unique: std::collections::HashSet<_> = outcome.identifiers.iter().collect();
            assert_eq!(unique.len(), outcome.identifiers.len());
        }
    }
}
