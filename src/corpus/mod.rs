//! Corpus record serialization
//!
//! One extracted document becomes one corpus file. Two layouts exist: a
//! tagged layout with one marker tag per line, and a plain layout of blank
//! line separated fields.

pub mod plain;
pub mod tagged;

pub use tagged::{parse_tagged, TaggedRecord};

use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;

use crate::extract::ExtractedDocument;

/// Layout of corpus records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorpusFormat {
    /// Tag-delimited fields, the default
    #[default]
    Tagged,

    /// Blank-line separated fields
    Plain,
}

impl CorpusFormat {
    /// File suffix for records in this layout
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Tagged => ".xml",
            Self::Plain => ".txt",
        }
    }
}

/// Renders `document` in the given layout
pub fn render(document: &ExtractedDocument, format: CorpusFormat) -> String {
    match format {
        CorpusFormat::Tagged => tagged::render_tagged(document),
        CorpusFormat::Plain => plain::render_plain(document),
    }
}

/// Writes `document` to `path`, replacing any existing file
///
/// On failure a partially written file is removed, so a corpus file is
/// either complete or absent.
pub fn write_record(document: &ExtractedDocument, path: &Path, format: CorpusFormat) -> io::Result<()> {
    let rendered = render(document, format);

    if let Err(e) = fs::write(path, rendered) {
        if path.exists() {
            if let Err(remove_err) = fs::remove_file(path) {
                tracing::warn!(
                    "Cannot remove partial record {}: {}",
                    path.display(),
                    remove_err
                );
            }
        }
        return Err(e);
    }

    Ok(())
}
