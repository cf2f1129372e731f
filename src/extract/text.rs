//! Text normalization and summary truncation
//!
//! Every section and auxiliary field is passed through [`normalize`] before
//! it is written. The summary field additionally goes through
//! [`summarize`], which drops parenthetical asides, folds the text onto one
//! line, and cuts it to a character budget at a word boundary.

/// Placeholder written when an article yields no usable summary
pub const NO_DESCRIPTION: &str = "No description is available";

/// Character limits applied to the summary field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryLimits {
    /// Maximum summary length in characters, ellipsis included
    pub max_chars: usize,

    /// Trailing sentence fragments shorter than this are dropped when cutting
    pub min_sentence_chars: usize,
}

impl Default for SummaryLimits {
    fn default() -> Self {
        Self {
            max_chars: 170,
            min_sentence_chars: 25,
        }
    }
}

/// Collapses whitespace and tidies punctuation spacing
///
/// - runs of horizontal whitespace become one space
/// - lines are trimmed and blank lines removed
/// - spaces before `,` and `.` are removed
/// - the result is trimmed
///
/// # Examples
///
/// ```
/// use wiki_corpus::extract::normalize;
///
/// assert_eq!(normalize("  a \t b ,c .\n\n\n d  "), "a b,c.\nd");
/// ```
pub fn normalize(text: &str) -> String {
    let mut lines: Vec<String> = Vec::new();

    for line in text.split('\n') {
        let mut collapsed = String::with_capacity(line.len());
        let mut pending_space = false;

        for c in line.chars() {
            if c.is_whitespace() {
                pending_space = !collapsed.is_empty();
                continue;
            }
            if pending_space {
                if c != ',' && c != '.' {
                    collapsed.push(' ');
                }
                pending_space = false;
            }
            collapsed.push(c);
        }

        if !collapsed.is_empty() {
            lines.push(collapsed);
        }
    }

    lines.join("\n")
}

/// Removes balanced parenthetical asides, nested ones included
///
/// Returns the remaining text and whether the parentheses were balanced.
/// An unmatched `)` is kept; an unmatched `(` swallows the rest of the text.
pub fn strip_parentheticals(text: &str) -> (String, bool) {
    let mut depth = 0usize;
    let mut stripped = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '(' => depth += 1,
            ')' if depth > 0 => depth -= 1,
            _ if depth == 0 => stripped.push(c),
            _ => {}
        }
    }

    (stripped, depth == 0)
}

/// Produces the one-line summary of an article lead
///
/// Text that fits the budget is returned as is (after normalization).
/// Longer text is cut after the last whole word that fits; a trailing
/// sentence fragment shorter than `min_sentence_chars` is dropped, and
/// otherwise an ellipsis marks the cut. The result never exceeds
/// `max_chars` characters.
pub fn summarize(text: &str, limits: &SummaryLimits) -> String {
    let (stripped, balanced) = strip_parentheticals(text);
    if !balanced {
        tracing::warn!("Mismatching parentheses in summary");
    }

    let line = normalize(&stripped).replace('\n', " ");
    if line.is_empty() {
        return NO_DESCRIPTION.to_string();
    }

    if char_len(&line) <= limits.max_chars {
        return line;
    }

    let mut cut = String::new();
    for word in line.split(' ') {
        let needed = if cut.is_empty() {
            char_len(word)
        } else {
            char_len(&cut) + 1 + char_len(word)
        };
        if needed > limits.max_chars {
            break;
        }
        if !cut.is_empty() {
            cut.push(' ');
        }
        cut.push_str(word);
    }

    if cut.is_empty() {
        // The first word alone exceeds the budget
        return NO_DESCRIPTION.to_string();
    }

    if let Some(period) = cut.rfind('.') {
        let fragment = &cut[period + 1..];
        if char_len(fragment) < limits.min_sentence_chars {
            return cut[..=period].to_string();
        }
    }

    with_ellipsis(cut, limits.max_chars)
}

/// Appends `...`, dropping trailing words until it fits in `max_chars`
fn with_ellipsis(mut cut: String, max_chars: usize) -> String {
    const ELLIPSIS: &str = "...";
    let room = max_chars.saturating_sub(ELLIPSIS.len());

    while char_len(&cut) > room {
        match cut.rfind(' ') {
            Some(space) => cut.truncate(space),
            None => {
                cut = cut.chars().take(room).collect();
            }
        }
    }

    let trimmed_len = cut.trim_end_matches([',', ';', ':', ' ']).len();
    cut.truncate(trimmed_len);
    cut.push_str(ELLIPSIS);
    cut
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits(max_chars: usize, min_sentence_chars: usize) -> SummaryLimits {
        SummaryLimits {
            max_chars,
            min_sentence_chars,
        }
    }

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize("a  \t  b"), "a b");
        assert_eq!(normalize("  leading and trailing  "), "leading and trailing");
        assert_eq!(normalize("line one \n\n\n  line two"), "line one\nline two");
        assert_eq!(normalize("\n\n"), "");
    }

    #[test]
    fn test_normalize_punctuation_spacing() {
        assert_eq!(normalize("Paris , France ."), "Paris, France.");
        assert_eq!(normalize("a  , , b"), "a,, b");
        assert_eq!(normalize("x\u{a0}.y"), "x.y");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize(" a , b \n\n c .  d ");
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn test_strip_parentheticals() {
        assert_eq!(
            strip_parentheticals("Rust (programming language) is fast"),
            ("Rust  is fast".to_string(), true)
        );
        assert_eq!(
            strip_parentheticals("a (b (c) d) e"),
            ("a  e".to_string(), true)
        );
        assert_eq!(strip_parentheticals("a) b"), ("a) b".to_string(), true));
        assert_eq!(strip_parentheticals("a (b c"), ("a ".to_string(), false));
    }

    #[test]
    fn test_short_summary_unchanged() {
        let text = "Rust is a general-purpose programming language.";
        assert_eq!(summarize(text, &SummaryLimits::default()), text);
    }

    #[test]
    fn test_summary_on_one_line_without_asides() {
        let text = "Linux (pronounced LIN-uuks) is a family\nof open-source operating systems , kernels.";
        assert_eq!(
            summarize(text, &SummaryLimits::default()),
            "Linux is a family of open-source operating systems, kernels."
        );
    }

    #[test]
    fn test_empty_summary_placeholder() {
        assert_eq!(summarize("  \n ", &SummaryLimits::default()), NO_DESCRIPTION);
        assert_eq!(summarize("(only an aside)", &SummaryLimits::default()), NO_DESCRIPTION);
    }

    #[test]
    fn test_single_oversized_word_placeholder() {
        let text = "x".repeat(50);
        assert_eq!(summarize(&text, &limits(20, 5)), NO_DESCRIPTION);
    }

    #[test]
    fn test_long_summary_drops_short_fragment() {
        let text = "The first sentence is long enough to matter. Then a tail that keeps going on";
        let summary = summarize(text, &limits(50, 25));
        assert_eq!(summary, "The first sentence is long enough to matter.");
    }

    #[test]
    fn test_long_summary_gets_ellipsis() {
        let text = "One two three four five six seven eight nine ten eleven twelve";
        let summary = summarize(text, &limits(30, 5));
        assert!(summary.ends_with("..."));
        assert!(summary.chars().count() <= 30);
        assert_eq!(summary, "One two three four five six...");
    }

    #[test]
    fn test_long_summary_keeps_long_fragment() {
        let text = "Short one. Then a second sentence which is rather long and keeps going";
        let summary = summarize(text, &limits(50, 10));
        assert!(summary.starts_with("Short one. Then a second sentence"));
        assert!(summary.ends_with("..."));
        assert!(summary.chars().count() <= 50);
    }

    #[test]
    fn test_truncation_respects_budget() {
        let text = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod \
                    tempor incididunt ut labore et dolore magna aliqua. Ut enim ad minim veniam, \
                    quis nostrud exercitation ullamco laboris nisi ut aliquip ex ea commodo \
                    consequat. Duis aute irure dolor in reprehenderit in voluptate velit.";
        for max in [20, 40, 80, 170] {
            let summary = summarize(text, &limits(max, 10));
            assert!(summary.chars().count() <= max, "max={} got {:?}", max, summary);
            assert!(summary.ends_with('.') || summary.ends_with("..."));
        }
    }
}
