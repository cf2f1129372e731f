use crate::corpus::CorpusFormat;

/// Longest stored filename stem, in characters
pub const FILENAME_MAX_CHARS: usize = 64;

/// Suffix of stored raw documents
pub const RAW_SUFFIX: &str = ".html";

/// Replacement for a leading dot, which would otherwise hide the file
const DOT_ESCAPE: &str = "__dot__";

/// Canonicalizes an article name for use as a filename stem
///
/// The name is first truncated to [`FILENAME_MAX_CHARS`] characters, then a
/// leading `.` is replaced by `__dot__`.
///
/// # Examples
///
/// ```
/// use wiki_corpus::article::canonicalize;
///
/// assert_eq!(canonicalize(".NET_Framework"), "__dot__NET_Framework");
/// assert_eq!(canonicalize("Rust"), "Rust");
/// ```
pub fn canonicalize(name: &str) -> String {
    let truncated: String = name.chars().take(FILENAME_MAX_CHARS).collect();
    match truncated.strip_prefix('.') {
        Some(rest) => format!("{}{}", DOT_ESCAPE, rest),
        None => truncated,
    }
}

/// Filename of the stored raw document for an identifier
///
/// Only the last path segment of the identifier is used.
pub fn stored_filename(identifier: &str) -> String {
    let name = identifier.rsplit('/').next().unwrap_or(identifier);
    format!("{}{}", canonicalize(name), RAW_SUFFIX)
}

/// Filename of the corpus record derived from a stored document
pub fn corpus_filename(stored: &str, format: CorpusFormat) -> String {
    let stem = stored.strip_suffix(RAW_SUFFIX).unwrap_or(stored);
    format!("{}{}", stem, format.suffix())
}
