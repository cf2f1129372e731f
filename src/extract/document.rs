//! The structured result of extracting one article

use std::collections::BTreeMap;

use indexmap::IndexMap;

/// Auxiliary fields collected alongside the body sections
///
/// Variants are ordered the way they are written after the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Bucket {
    Summary,
    Quotes,
    Infobox,
    Multimedia,
}

impl Bucket {
    /// Heading under which the field is written to the corpus
    pub fn heading(self) -> &'static str {
        match self {
            Self::Summary => "__summary__",
            Self::Quotes => "__quotes__",
            Self::Infobox => "__infobox__",
            Self::Multimedia => "__multimedia__",
        }
    }

    /// Separator placed between successive contributions to the field
    pub fn separator(self) -> &'static str {
        match self {
            Self::Summary => " ",
            _ => "\n",
        }
    }
}

/// One extracted article, ready to serialize
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedDocument {
    /// Canonical URL of the article
    pub url: String,

    /// Article title, also the heading of the lead section
    pub title: String,

    /// Body sections in document order; the first key is the title
    pub sections: IndexMap<String, String>,

    /// Auxiliary fields; the summary is always present
    pub auxiliary: BTreeMap<Bucket, String>,

    /// First publication date, UTC epoch seconds
    pub published: Option<i64>,

    /// Last modification date, UTC epoch seconds
    pub modified: Option<i64>,
}

impl ExtractedDocument {
    /// The summary field, empty if extraction never set one
    pub fn summary(&self) -> &str {
        self.auxiliary
            .get(&Bucket::Summary)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// All `(heading, content)` pairs in output order
    ///
    /// Body sections come first, starting with the title section, followed
    /// by the auxiliary fields under their reserved headings.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        let body = self
            .sections
            .iter()
            .map(|(heading, content)| (heading.as_str(), content.as_str()));
        let auxiliary = self
            .auxiliary
            .iter()
            .map(|(bucket, content)| (bucket.heading(), content.as_str()));
        body.chain(auxiliary)
    }
}
