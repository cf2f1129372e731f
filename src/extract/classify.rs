//! Node classification rules for article markup
//!
//! Each element of the content tree is assigned exactly one [`NodeRule`].
//! Rules are checked in a fixed order and the first match wins, so for
//! example an anchor inside a superscript is dropped before any other rule
//! looks at it.

use scraper::node::Element;

use super::document::Bucket;

/// Exact class names whose elements carry no article text
const NOISE_CLASSES: &[&str] = &["noprint", "haudio", "mw-editsection", "mw-cite-backlink"];

/// Substring that marks navigation boxes in any class name
const NAVBOX_MARKER: &str = "navbox";

/// ARIA roles of non-content blocks
const NOISE_ROLES: &[&str] = &["note", "presentation", "navigation"];

/// Class prefix of the fallback image that carries a formula's text form
pub const MATH_FALLBACK_PREFIX: &str = "mwe-math-fallback-image";

/// What the walker does with an element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRule {
    /// Contributes nothing; children are not visited
    Skip,
    /// Contributes the concatenated text of its children
    Descend,
    /// Top-level heading; its text opens a new section
    OpenSection,
    /// Lower-level heading; its text stays in the current section
    SubHeading,
    /// Lead paragraph; its text goes to the summary instead of the section
    Summary,
    /// Block quotation; its text goes to the quotes field and the section
    Quote,
    /// Its text goes to the given auxiliary field only
    Divert(Bucket),
    /// Table row; internal line breaks become spaces
    TableRow,
    /// Header cell inside an infobox; padded with spaces
    InfoboxHeaderCell,
    /// Formula; contributes the text of its fallback image
    Formula,
    /// Superscript; `^` followed by its text with links suppressed
    Superscript,
    /// Subscript; `_` followed by its text
    Subscript,
}

/// Traversal state that influences classification
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Position {
    /// Nesting level below the content root; its direct children are at 0
    pub depth: usize,
    /// Inside an infobox subtree
    pub in_infobox: bool,
    /// Anchor elements are dropped
    pub suppress_anchors: bool,
    /// Top-level paragraphs still count as the article lead
    pub summary_open: bool,
}

/// Picks the rule for `element` at `position`
pub fn classify(element: &Element, position: Position) -> NodeRule {
    let name = element.name();

    if is_noise(element, position) {
        return NodeRule::Skip;
    }

    match name {
        "h2" => return NodeRule::OpenSection,
        "h3" | "h4" | "h5" | "h6" => return NodeRule::SubHeading,
        "p" if position.depth == 0 && position.summary_open => return NodeRule::Summary,
        "blockquote" => return NodeRule::Quote,
        "tr" => return NodeRule::TableRow,
        "th" if position.in_infobox => return NodeRule::InfoboxHeaderCell,
        "figcaption" => return NodeRule::Divert(Bucket::Multimedia),
        _ => {}
    }

    let has_class = |class: &str| element.classes().any(|c| c == class);

    if name == "div" && has_class("quotebox") {
        return NodeRule::Divert(Bucket::Quotes);
    }
    if has_class("thumbcaption") || has_class("gallerytext") {
        return NodeRule::Divert(Bucket::Multimedia);
    }
    if has_class("infobox") {
        return NodeRule::Divert(Bucket::Infobox);
    }
    if has_class("mwe-math-element") {
        return NodeRule::Formula;
    }

    match name {
        "sup" if has_class("reference") || has_class("plainlinks") => NodeRule::Skip,
        "sup" => NodeRule::Superscript,
        "sub" => NodeRule::Subscript,
        "table" if has_class("clade") => NodeRule::Skip,
        _ => NodeRule::Descend,
    }
}

fn is_noise(element: &Element, position: Position) -> bool {
    let name = element.name();

    if matches!(name, "style" | "script" | "caption") {
        return true;
    }
    if name == "a" && position.suppress_anchors {
        return true;
    }
    if name == "span" && element.id() == Some("coordinates") {
        return true;
    }

    if let Some(role) = element.attr("role") {
        if role.split_whitespace().any(|r| NOISE_ROLES.contains(&r)) {
            return true;
        }
    }

    element.classes().any(|class| {
        class.contains(NAVBOX_MARKER)
            || NOISE_CLASSES.contains(&class)
            || (name == "div" && class == "toc")
    })
}
