//! Plain record layout
//!
//! The canonical URL, a blank line, then every section as its heading on
//! one line followed by its content. The first section's heading is
//! followed by an extra blank line.

use crate::extract::ExtractedDocument;

/// Separator written after the URL and after the first heading
const FIELD_SEPARATOR: &str = "\n\n";

/// Renders a document in the plain layout
pub fn render_plain(document: &ExtractedDocument) -> String {
    let mut out = String::new();
    out.push_str(&document.url);
    out.push_str(FIELD_SEPARATOR);

    for (index, (heading, content)) in document.fields().enumerate() {
        out.push('\n');
        out.push_str(heading);
        out.push('\n');
        if index == 0 {
            out.push_str(FIELD_SEPARATOR);
        }
        out.push_str(content);
        out.push('\n');
    }

    out
}
