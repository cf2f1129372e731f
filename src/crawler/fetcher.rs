//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with proper user agent strings
//! - The `PageFetcher` seam used by the frontier builder and fetch engine
//! - Classification of responses into success, HTTP error, or network error
//! - The fixed-delay retry policy shared by both crawl phases

use crate::config::{CrawlerConfig, UserAgentConfig};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Result of a single fetch attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult {
    /// The server answered 200 with a body
    Success {
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// The server answered with any status other than 200
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, truncated body, etc.)
    NetworkError {
        /// Error description
        error: String,
    },
}

impl FetchResult {
    /// Returns the body if this attempt succeeded
    pub fn into_body(self) -> Option<String> {
        match self {
            Self::Success { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Short description of a failed attempt, for logging
    pub fn describe(&self) -> String {
        match self {
            Self::Success { status_code, .. } => format!("HTTP {}", status_code),
            Self::HttpError { status_code } => format!("HTTP {}", status_code),
            Self::NetworkError { error } => error.clone(),
        }
    }
}

/// Something that can fetch a page by absolute URL
///
/// The crawler only needs `fetch(url) -> status, body`. Keeping this behind a
/// trait lets the frontier builder and fetch engine run against scripted
/// fetchers in tests.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Performs one fetch attempt
    async fn fetch(&self, url: &str) -> FetchResult;
}

/// Fixed-delay retry policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first failed attempt
    pub max_retries: u32,

    /// Sleep between two attempts
    pub delay: Duration,
}

impl RetryPolicy {
    /// Creates a policy from crawler configuration
    pub fn from_config(config: &CrawlerConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            delay: Duration::from_millis(config.retry_delay_ms),
        }
    }

    /// Total number of attempts allowed per item
    pub fn attempts(&self) -> u32 {
        self.max_retries + 1
    }
}

/// Fetches `url` until it succeeds or the retry policy is exhausted
///
/// Returns the body of the first successful attempt, or the last failure.
pub async fn fetch_with_retry<F>(
    fetcher: &F,
    url: &str,
    policy: RetryPolicy,
) -> Result<String, FetchResult>
where
    F: PageFetcher + ?Sized,
{
    let attempts = policy.attempts();
    let mut attempt = 1;

    loop {
        let result = fetcher.fetch(url).await;
        if let FetchResult::Success { body, .. } = result {
            return Ok(body);
        }

        tracing::warn!(
            "Error fetching '{}': {} [attempt {}/{}]",
            url,
            result.describe(),
            attempt,
            attempts
        );

        if attempt >= attempts {
            return Err(result);
        }

        attempt += 1;
        tokio::time::sleep(policy.delay).await;
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
///
/// # Example
///
/// ```no_run
/// use wiki_corpus::config::UserAgentConfig;
/// use wiki_corpus::crawler::build_http_client;
///
/// let config = UserAgentConfig {
///     crawler_name: "CorpusBot".to_string(),
///     crawler_version: "1.0".to_string(),
///     contact_url: "https://example.com/about".to_string(),
///     contact_email: "admin@example.com".to_string(),
/// };
///
/// let client = build_http_client(&config).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    // Format: CrawlerName/Version (+ContactURL; ContactEmail)
    let user_agent = format!(
        "{}/{} (+{}; {})",
        config.crawler_name, config.crawler_version, config.contact_url, config.contact_email
    );

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// `PageFetcher` backed by a reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Wraps an existing client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a client from the user agent configuration
    pub fn from_config(config: &UserAgentConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_http_client(config)?))
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchResult {
        match self.client.get(url).send().await {
            Ok(response) => {
                let status = response.status();

                if status != StatusCode::OK {
                    return FetchResult::HttpError {
                        status_code: status.as_u16(),
                    };
                }

                match response.text().await {
                    Ok(body) => FetchResult::Success {
                        status_code: status.as_u16(),
                        body,
                    },
                    Err(e) => FetchResult::NetworkError {
                        error: e.to_string(),
                    },
                }
            }
            Err(e) => {
                let error = if e.is_timeout() {
                    "Request timeout".to_string()
                } else if e.is_connect() {
                    "Connection refused".to_string()
                } else {
                    e.to_string()
                };
                FetchResult::NetworkError { error }
            }
        }
    }
}
