//! Recursive traversal of the article content tree

use std::collections::BTreeMap;

use indexmap::IndexMap;
use scraper::{ElementRef, Node, Selector};

use super::classify::{classify, NodeRule, Position, MATH_FALLBACK_PREFIX};
use super::document::Bucket;
use super::text::{normalize, summarize, SummaryLimits, NO_DESCRIPTION};

/// Accumulates section text and auxiliary fields during one traversal
///
/// Text returned from a visit flows upward to the enclosing element;
/// diverted text goes straight into an auxiliary field and returns nothing.
pub struct Walker {
    title: String,
    current: String,
    summary_open: bool,
    sections: IndexMap<String, String>,
    auxiliary: BTreeMap<Bucket, String>,
}

impl Walker {
    /// Starts a traversal whose lead section is headed by `title`
    pub fn new(title: String) -> Self {
        let mut sections = IndexMap::new();
        sections.insert(title.clone(), String::new());

        Self {
            current: title.clone(),
            title,
            summary_open: true,
            sections,
            auxiliary: BTreeMap::new(),
        }
    }

    /// Text of a heading element, normalized onto a single line
    pub fn heading_text(element: ElementRef<'_>) -> String {
        let mut scratch = Walker::new(String::new());
        let raw = scratch.visit_children(element, scratch.position(0));
        single_line(&raw)
    }

    /// Walks the direct children of the content root
    pub fn walk(&mut self, root: ElementRef<'_>) {
        for child in root.children() {
            let position = self.position(0);
            let text = match ElementRef::wrap(child) {
                Some(element) => self.visit_element(element, position),
                None => node_text(child.value()),
            };
            self.append_section(&text);
        }
    }

    /// Finishes the traversal, normalizing every field
    ///
    /// The summary is cut to `limits`; an article without lead paragraphs
    /// gets the placeholder summary.
    pub fn finish(
        self,
        limits: &SummaryLimits,
    ) -> (IndexMap<String, String>, BTreeMap<Bucket, String>) {
        let sections = self
            .sections
            .into_iter()
            .map(|(heading, content)| (heading, normalize(&content)))
            .collect();

        let mut auxiliary: BTreeMap<Bucket, String> = self
            .auxiliary
            .into_iter()
            .map(|(bucket, content)| {
                let content = match bucket {
                    Bucket::Summary => summarize(&content, limits),
                    _ => normalize(&content),
                };
                (bucket, content)
            })
            .collect();
        auxiliary
            .entry(Bucket::Summary)
            .or_insert_with(|| NO_DESCRIPTION.to_string());

        (sections, auxiliary)
    }

    fn position(&self, depth: usize) -> Position {
        Position {
            depth,
            in_infobox: false,
            suppress_anchors: false,
            summary_open: self.summary_open,
        }
    }

    fn visit_children(&mut self, element: ElementRef<'_>, position: Position) -> String {
        let mut text = String::new();
        for child in element.children() {
            let piece = match ElementRef::wrap(child) {
                Some(child) => {
                    let position = Position {
                        summary_open: self.summary_open,
                        ..position
                    };
                    self.visit_element(child, position)
                }
                None => node_text(child.value()),
            };
            text.push_str(&piece);
        }
        text
    }

    fn visit_element(&mut self, element: ElementRef<'_>, position: Position) -> String {
        let inner = Position {
            depth: position.depth + 1,
            ..position
        };

        match classify(element.value(), position) {
            NodeRule::Skip => String::new(),
            NodeRule::Descend | NodeRule::SubHeading => self.visit_children(element, inner),
            NodeRule::OpenSection => {
                let heading = single_line(&self.visit_children(element, inner));
                self.open_section(heading);
                String::new()
            }
            NodeRule::Summary => {
                let text = self.visit_children(element, inner);
                self.append_auxiliary(Bucket::Summary, &text);
                String::new()
            }
            NodeRule::Quote => {
                let text = self.visit_children(element, inner);
                self.append_auxiliary(Bucket::Quotes, &text);
                text
            }
            NodeRule::Divert(bucket) => {
                let inner = Position {
                    in_infobox: inner.in_infobox || bucket == Bucket::Infobox,
                    ..inner
                };
                let text = self.visit_children(element, inner);
                self.append_auxiliary(bucket, &text);
                String::new()
            }
            NodeRule::TableRow => self.visit_children(element, inner).replace('\n', " "),
            NodeRule::InfoboxHeaderCell => {
                format!(" {} ", self.visit_children(element, inner))
            }
            NodeRule::Formula => formula_text(element),
            NodeRule::Superscript => {
                let inner = Position {
                    suppress_anchors: true,
                    ..inner
                };
                let text = self.visit_children(element, inner);
                if text.is_empty() {
                    text
                } else {
                    format!("^{}", text)
                }
            }
            NodeRule::Subscript => format!("_{}", self.visit_children(element, inner)),
        }
    }

    fn open_section(&mut self, heading: String) {
        if heading != self.title {
            self.summary_open = false;
        }
        let section = self.sections.entry(heading.clone()).or_default();
        if !section.is_empty() {
            // Reopened section
            section.push('\n');
        }
        self.current = heading;
    }

    fn append_section(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.sections
            .entry(self.current.clone())
            .or_default()
            .push_str(text);
    }

    fn append_auxiliary(&mut self, bucket: Bucket, text: &str) {
        let field = self.auxiliary.entry(bucket).or_default();
        if !field.is_empty() {
            field.push_str(bucket.separator());
        }
        field.push_str(text);
    }
}

fn node_text(node: &Node) -> String {
    match node {
        Node::Text(text) => {
            let text: &str = text;
            text.to_string()
        }
        _ => String::new(),
    }
}

fn single_line(text: &str) -> String {
    normalize(text).replace('\n', " ")
}

/// Alternative text of a formula's fallback image
fn formula_text(element: ElementRef<'_>) -> String {
    let Ok(selector) = Selector::parse("img") else {
        return String::new();
    };

    element
        .select(&selector)
        .find(|img| {
            img.value()
                .classes()
                .any(|class| class.starts_with(MATH_FALLBACK_PREFIX))
        })
        .and_then(|img| img.value().attr("alt"))
        .map(str::to_string)
        .unwrap_or_default()
}
