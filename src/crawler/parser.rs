//! HTML parser for extracting article links
//!
//! During frontier construction every fetched article is scanned for
//! outgoing links. Only anchors inside the article content container are
//! considered, so navigation chrome and footers never feed the frontier.

use scraper::{Html, Selector};

/// Extracted information from an article page
#[derive(Debug, Clone)]
pub struct ParsedArticle {
    /// The article title (from the first heading)
    pub title: String,

    /// Raw `href` values of all anchors in the content container, in document order
    pub links: Vec<String>,
}

/// Parses an article page and extracts its title and content links
///
/// # Arguments
///
/// * `html` - The HTML content to parse
///
/// # Returns
///
/// * `Ok(ParsedArticle)` - Successfully parsed page
/// * `Err(String)` - The page lacks the title heading or content container
///
/// # Example
///
/// ```
/// use wiki_corpus::crawler::parse_article;
///
/// let html = r#"<html><body>
///     <h1 id="firstHeading">Test</h1>
///     <div id="mw-content-text"><a href="/wiki/Other">Other</a></div>
/// </body></html>"#;
/// let parsed = parse_article(html).unwrap();
/// assert_eq!(parsed.title, "Test");
/// assert_eq!(parsed.links, vec!["/wiki/Other".to_string()]);
/// ```
pub fn parse_article(html: &str) -> Result<ParsedArticle, String> {
    let document = Html::parse_document(html);

    let title_selector = selector("h1#firstHeading")?;
    let content_selector = selector("div#mw-content-text")?;
    let anchor_selector = selector("a[href]")?;

    let title = document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .ok_or_else(|| "missing title heading".to_string())?;

    let content = document
        .select(&content_selector)
        .next()
        .ok_or_else(|| format!("missing content container in '{}'", title))?;

    let links = content
        .select(&anchor_selector)
        .filter_map(|element| element.value().attr("href"))
        .map(|href| href.trim().to_string())
        .collect();

    Ok(ParsedArticle { title, links })
}

fn selector(css: &str) -> Result<Selector, String> {
    Selector::parse(css).map_err(|e| format!("invalid selector '{}': {:?}", css, e))
}
