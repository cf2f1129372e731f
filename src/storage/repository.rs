use crate::article::{stored_filename, RAW_SUFFIX};
use crate::CorpusError;
use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

/// Name of the frontier manifest inside the repository
pub const MANIFEST_FILENAME: &str = "urls.txt";

/// Directory of stored raw documents
///
/// One file per identifier, named by [`stored_filename`]. Documents are
/// written by the fetch phase and only read afterwards.
#[derive(Debug, Clone)]
pub struct Repository {
    root: PathBuf,
}

impl Repository {
    /// Creates a repository rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory of the repository
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Creates the repository directory if needed
    pub fn ensure_exists(&self) -> Result<(), CorpusError> {
        std::fs::create_dir_all(&self.root).map_err(|source| CorpusError::Manifest {
            path: self.root.clone(),
            source,
        })
    }

    /// Path of a stored document by filename
    pub fn document_path(&self, filename: &str) -> PathBuf {
        self.root.join(filename)
    }

    /// Path of the frontier manifest
    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(MANIFEST_FILENAME)
    }

    /// Persists a fetched body for `identifier`
    ///
    /// Returns the written path. I/O errors are returned to the caller, which
    /// decides whether to retry.
    pub async fn store(&self, identifier: &str, body: &str) -> io::Result<PathBuf> {
        let path = self.document_path(&stored_filename(identifier));
        tokio::fs::write(&path, body).await?;
        Ok(path)
    }

    /// Writes the frontier manifest, one identifier per line
    pub fn write_manifest(&self, identifiers: &[String]) -> Result<PathBuf, CorpusError> {
        let path = self.manifest_path();
        let mut content = String::with_capacity(identifiers.len() * 32);
        for identifier in identifiers {
            content.push_str(identifier);
            content.push('\n');
        }

        std::fs::write(&path, content).map_err(|source| CorpusError::Manifest {
            path: path.clone(),
            source,
        })?;

        Ok(path)
    }

    /// Reads the frontier manifest back
    pub fn read_manifest(&self) -> Result<Vec<String>, CorpusError> {
        let path = self.manifest_path();
        let content = std::fs::read_to_string(&path)
            .map_err(|source| CorpusError::Manifest { path, source })?;

        Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Lists stored document filenames, sorted
    pub fn list_documents(&self) -> Result<Vec<String>, CorpusError> {
        let listing_error = |source| CorpusError::Listing {
            path: self.root.clone(),
            source,
        };

        let mut documents = Vec::new();
        for entry in std::fs::read_dir(&self.root).map_err(listing_error)? {
            let entry = entry.map_err(listing_error)?;
            if let Some(name) = entry.file_name().to_str() {
                if name.ends_with(RAW_SUFFIX) {
                    documents.push(name.to_string());
                }
            }
        }

        documents.sort();
        Ok(documents)
    }

    /// Removes stored documents until at most `target` remain
    ///
    /// Surplus documents are taken from the end of `frontier`, i.e. the
    /// identifiers admitted last. Returns the removed filenames.
    pub fn prune(&self, frontier: &[String], target: usize) -> Result<Vec<String>, CorpusError> {
        let stored: HashSet<String> = self.list_documents()?.into_iter().collect();
        let mut remaining = stored.len();
        let mut removed = Vec::new();

        for identifier in frontier.iter().rev() {
            if remaining <= target {
                break;
            }

            let filename = stored_filename(identifier);
            if !stored.contains(&filename) || removed.contains(&filename) {
                continue;
            }

            std::fs::remove_file(self.document_path(&filename))?;
            tracing::info!("Removing redundant file: {:3} - {}", removed.len() + 1, filename);
            removed.push(filename);
            remaining -= 1;
        }

        Ok(removed)
    }
}
