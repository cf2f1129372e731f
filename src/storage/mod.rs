//! Storage module for raw documents and manifests
//!
//! This module provides the on-disk side of the crawl:
//! - Reading the seed file
//! - Writing and reading the frontier manifest (`urls.txt`)
//! - Persisting fetched article bodies under canonical filenames
//! - Enumerating and pruning stored documents

mod repository;

pub use repository::{Repository, MANIFEST_FILENAME};

use crate::CorpusError;
use std::path::Path;

/// Reads seed identifiers, one per line
///
/// Lines are trimmed; blank lines are skipped. A read failure is fatal to
/// the run and surfaces as [`CorpusError::Seeds`].
pub fn read_seeds(path: &Path) -> Result<Vec<String>, CorpusError> {
    let content = std::fs::read_to_string(path).map_err(|source| CorpusError::Seeds {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}
