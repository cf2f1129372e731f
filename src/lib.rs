//! wiki-corpus: an encyclopedia article harvester and corpus builder
//!
//! This crate follows hyperlinks from seed articles to build a bounded crawl
//! frontier, downloads the raw article documents concurrently, and converts
//! every stored document into a sectioned plain-text corpus record.

pub mod article;
pub mod config;
pub mod corpus;
pub mod crawler;
pub mod extract;
pub mod output;
pub mod storage;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for wiki-corpus operations
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Cannot read seeds from '{}': {source}", path.display())]
    Seeds {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot write manifest '{}': {source}", path.display())]
    Manifest {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot list files in directory '{}': {source}", path.display())]
    Listing {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Worker failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CorpusError {
    /// Returns the operating system error code behind this error, if any
    ///
    /// The binary uses this as its exit status for fatal manifest-level failures.
    pub fn os_error_code(&self) -> Option<i32> {
        match self {
            Self::Seeds { source, .. }
            | Self::Manifest { source, .. }
            | Self::Listing { source, .. }
            | Self::Io(source) => source.raw_os_error(),
            Self::Config(ConfigError::Io(source)) => source.raw_os_error(),
            _ => None,
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Per-document extraction failures
///
/// Any of these discards the whole document; no partial record is written.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Missing expected element: {0}")]
    MissingElement(&'static str),

    #[error("Cannot read stored document: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for wiki-corpus operations
pub type Result<T> = std::result::Result<T, CorpusError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for document extraction
pub type ExtractResult<T> = std::result::Result<T, ExtractError>;

// Re-export commonly used types
pub use config::Config;
pub use corpus::CorpusFormat;
pub use extract::{extract_document, ExtractedDocument};
