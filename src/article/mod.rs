//! Article identifier handling
//!
//! An identifier is the site-relative path of one article (e.g. `/wiki/Rust`).
//! This module decides which links count as article identifiers, turns
//! identifiers into fetchable URLs, and derives the on-disk filenames used
//! for stored documents and corpus records.

mod filename;
mod matcher;

use crate::config::SiteConfig;
use url::Url;

pub use filename::{canonicalize, corpus_filename, stored_filename, FILENAME_MAX_CHARS, RAW_SUFFIX};
pub use matcher::is_article_path;

/// The site whose articles make up the frontier
#[derive(Debug, Clone)]
pub struct ArticleSite {
    base_url: String,
    article_prefix: String,
    excluded_patterns: Vec<String>,
}

impl ArticleSite {
    /// Creates a site description from configuration
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            article_prefix: config.article_prefix.clone(),
            excluded_patterns: config.excluded_patterns.clone(),
        }
    }

    /// Returns true if `href` addresses an article that may join the frontier
    ///
    /// The href must have the canonical article shape (see [`is_article_path`])
    /// and must not contain any excluded pattern. Excluded patterns cut down
    /// families of near-identical articles such as standards variants.
    pub fn accepts(&self, href: &str) -> bool {
        is_article_path(href, &self.article_prefix)
            && !self
                .excluded_patterns
                .iter()
                .any(|pattern| href.contains(pattern.as_str()))
    }

    /// Builds the absolute URL of an article identifier
    ///
    /// # Examples
    ///
    /// ```
    /// use wiki_corpus::article::ArticleSite;
    /// use wiki_corpus::config::SiteConfig;
    ///
    /// let site = ArticleSite::new(&SiteConfig::default());
    /// let url = site.article_url("/wiki/Rust").unwrap();
    /// assert_eq!(url.as_str(), "https://en.wikipedia.org/wiki/Rust");
    /// ```
    pub fn article_url(&self, identifier: &str) -> Result<Url, url::ParseError> {
        Url::parse(&format!("{}{}", self.base_url, identifier))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> ArticleSite {
        ArticleSite::new(&SiteConfig::default())
    }

    #[test]
    fn test_accepts_article_links() {
        let site = site();
        assert!(site.accepts("/wiki/Rust_(programming_language)"));
        assert!(site.accepts("/wiki/C%2B%2B"));
    }

    #[test]
    fn test_rejects_trailing_slash() {
        let site = site();
        assert!(!site.accepts("/wiki/Linux/"));
        assert!(site.accepts("/wiki/Linux"));
        assert_eq!(stored_filename("/wiki/Linux"), "Linux.html");
    }

    #[test]
    fn test_rejects_excluded_families() {
        let site = site();
        assert!(!site.accepts("/wiki/IEEE_802.11ac"));
        assert!(!site.accepts("/wiki/ISO_8601"));
        assert!(!site.accepts("/wiki/IEC_61131"));
        assert!(!site.accepts("/wiki/802.1Q"));
    }

    #[test]
    fn test_custom_exclusions() {
        let mut config = SiteConfig::default();
        config.excluded_patterns = vec!["List_of".to_string()];
        let site = ArticleSite::new(&config);

        assert!(site.accepts("/wiki/ISO_8601"));
        assert!(!site.accepts("/wiki/List_of_lists"));
    }

    #[test]
    fn test_article_url_strips_trailing_slash() {
        let mut config = SiteConfig::default();
        config.base_url = "http://127.0.0.1:9000/".to_string();
        let site = ArticleSite::new(&config);

        assert_eq!(
            site.article_url("/wiki/A").unwrap().as_str(),
            "http://127.0.0.1:9000/wiki/A"
        );
    }
}
