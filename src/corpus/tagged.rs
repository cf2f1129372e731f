//! Tagged record layout
//!
//! ```text
//! <document>
//! <url>
//! https://en.wikipedia.org/wiki/Rust
//! </url>
//! <published>
//! 1000000000
//! </published>
//! <title>
//! Rust
//! </title>
//! <section>
//! <heading>
//! Rust
//! </heading>
//! <content>
//! Rust is a language.
//! </content>
//! </section>
//! </document>
//! ```
//!
//! Content is written verbatim, so a content line consisting solely of a
//! closing tag cannot be told apart from the tag itself.

use crate::extract::ExtractedDocument;

/// A tagged record read back from disk
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaggedRecord {
    pub url: String,
    pub published: Option<String>,
    pub updated: Option<String>,
    pub title: Option<String>,
    pub sections: Vec<(String, String)>,
}

/// Renders a document in the tagged layout
pub fn render_tagged(document: &ExtractedDocument) -> String {
    let mut out = String::new();
    out.push_str("<document>\n");
    push_element(&mut out, "url", &document.url);

    if let Some(published) = document.published {
        push_element(&mut out, "published", &published.to_string());
    }
    if let Some(modified) = document.modified {
        push_element(&mut out, "updated", &modified.to_string());
    }
    push_element(&mut out, "title", &document.title);

    for (heading, content) in document.fields() {
        out.push_str("<section>\n");
        push_element(&mut out, "heading", heading);
        push_element(&mut out, "content", content);
        out.push_str("</section>\n");
    }

    out.push_str("</document>\n");
    out
}

fn push_element(out: &mut String, tag: &str, value: &str) {
    out.push('<');
    out.push_str(tag);
    out.push_str(">\n");
    out.push_str(value);
    out.push_str("\n</");
    out.push_str(tag);
    out.push_str(">\n");
}

/// Parses a record written by [`render_tagged`]
///
/// # Arguments
///
/// * `input` - Full contents of a tagged corpus file
///
/// # Returns
///
/// The record fields, or a message naming the first structural problem
pub fn parse_tagged(input: &str) -> Result<TaggedRecord, String> {
    let mut lines = input.lines();
    let mut record = TaggedRecord::default();

    expect_line(&mut lines, "<document>")?;

    let mut saw_url = false;
    let mut in_section = false;
    let mut heading: Option<String> = None;

    loop {
        let line = lines
            .next()
            .ok_or_else(|| "Unexpected end of record".to_string())?;

        match line {
            "</document>" if !in_section => break,
            "<section>" if !in_section => {
                in_section = true;
                heading = None;
            }
            "</section>" if in_section => {
                if heading.is_none() {
                    return Err("Section without heading".to_string());
                }
                in_section = false;
            }
            "<heading>" if in_section && heading.is_none() => {
                heading = Some(read_value(&mut lines, "heading")?);
            }
            "<content>" if in_section => {
                let name = heading
                    .clone()
                    .ok_or_else(|| "Content before heading".to_string())?;
                let content = read_value(&mut lines, "content")?;
                record.sections.push((name, content));
            }
            "<url>" if !in_section => {
                record.url = read_value(&mut lines, "url")?;
                saw_url = true;
            }
            "<published>" if !in_section => {
                record.published = Some(read_value(&mut lines, "published")?);
            }
            "<updated>" if !in_section => {
                record.updated = Some(read_value(&mut lines, "updated")?);
            }
            "<title>" if !in_section => {
                record.title = Some(read_value(&mut lines, "title")?);
            }
            other => return Err(format!("Unexpected line: {}", other)),
        }
    }

    if !saw_url {
        return Err("Record has no url".to_string());
    }

    Ok(record)
}

fn expect_line<'a>(lines: &mut impl Iterator<Item = &'a str>, expected: &str) -> Result<(), String> {
    match lines.next() {
        Some(line) if line == expected => Ok(()),
        Some(line) => Err(format!("Expected {} but found {}", expected, line)),
        None => Err(format!("Expected {} but found end of record", expected)),
    }
}

/// Collects lines up to the closing tag of `tag`
fn read_value<'a>(lines: &mut impl Iterator<Item = &'a str>, tag: &str) -> Result<String, String> {
    let closing = format!("</{}>", tag);
    let mut value: Vec<&str> = Vec::new();

    for line in lines {
        if line == closing {
            return Ok(value.join("\n"));
        }
        value.push(line);
    }

    Err(format!("Unterminated <{}>", tag))
}
