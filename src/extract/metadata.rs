//! Document-level metadata: canonical URL and publication timestamps

use chrono::{DateTime, NaiveDateTime};
use scraper::{Html, Selector};
use serde_json::Value;

use crate::{ExtractError, ExtractResult};

/// Timestamp layout used by the structured metadata block
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Publication dates of an article as UTC epoch seconds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArticleDates {
    pub published: Option<i64>,
    pub modified: Option<i64>,
}

/// Returns the `href` of the canonical link in the document head
pub fn canonical_url(document: &Html) -> ExtractResult<String> {
    let selector = Selector::parse(r#"head link[rel="canonical"]"#)
        .map_err(|_| ExtractError::MissingElement("canonical link"))?;

    document
        .select(&selector)
        .filter_map(|link| link.value().attr("href"))
        .map(str::trim)
        .find(|href| !href.is_empty())
        .map(str::to_string)
        .ok_or(ExtractError::MissingElement("canonical link"))
}

/// Reads `datePublished` and `dateModified` from the JSON-LD block
///
/// Missing or malformed metadata yields `None` for the affected date; it
/// never fails the document.
pub fn article_dates(document: &Html) -> ArticleDates {
    let Ok(selector) = Selector::parse(r#"script[type="application/ld+json"]"#) else {
        return ArticleDates::default();
    };

    for script in document.select(&selector) {
        let raw: String = script.text().collect();
        let value: Value = match serde_json::from_str(raw.trim()) {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!("Skipping unparsable JSON-LD block: {}", e);
                continue;
            }
        };

        let candidates = match &value {
            Value::Array(items) => items.iter().collect::<Vec<_>>(),
            other => vec![other],
        };

        for item in candidates {
            let published = date_field(item, "datePublished");
            let modified = date_field(item, "dateModified");
            if published.is_some() || modified.is_some() {
                return ArticleDates {
                    published,
                    modified,
                };
            }
        }
    }

    ArticleDates::default()
}

fn date_field(item: &Value, key: &str) -> Option<i64> {
    let raw = item.get(key)?.as_str()?;
    let parsed = parse_timestamp(raw);
    if parsed.is_none() {
        tracing::warn!("Unrecognized {} timestamp: {}", key, raw);
    }
    parsed
}

/// Converts a metadata timestamp into UTC epoch seconds
pub fn parse_timestamp(raw: &str) -> Option<i64> {
    let raw = raw.trim();

    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT) {
        return Some(parsed.and_utc().timestamp());
    }

    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|parsed| parsed.timestamp())
}
