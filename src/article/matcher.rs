/// Returns true if `href` has the canonical article path shape
///
/// An article path sits exactly one segment below `prefix` and carries no
/// fragment (`#`) or namespace separator (`:`). Absolute URLs never match,
/// which keeps external links out of the frontier.
///
/// # Examples
///
/// ```
/// use wiki_corpus::article::is_article_path;
///
/// assert!(is_article_path("/wiki/Rust", "/wiki/"));
/// assert!(!is_article_path("/wiki/Help:Contents", "/wiki/"));
/// assert!(!is_article_path("https://example.com/wiki/Rust", "/wiki/"));
/// ```
pub fn is_article_path(href: &str, prefix: &str) -> bool {
    let Some(name) = href.strip_prefix(prefix) else {
        return false;
    };

    if href.contains('#') || href.contains(':') {
        return false;
    }

    !name.is_empty() && !name.contains('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREFIX: &str = "/wiki/";

    #[test]
    fn test_plain_article() {
        assert!(is_article_path("/wiki/Linux", PREFIX));
        assert!(is_article_path("/wiki/.NET_Framework", PREFIX));
    }

    #[test]
    fn test_fragment_and_namespace_rejected() {
        assert!(!is_article_path("/wiki/Linux#History", PREFIX));
        assert!(!is_article_path("/wiki/File:Tux.svg", PREFIX));
        assert!(!is_article_path("/wiki/Special:Random", PREFIX));
    }

    #[test]
    fn test_wrong_depth_rejected() {
        assert!(!is_article_path("/wiki/", PREFIX));
        assert!(!is_article_path("/wiki/Linux/Kernel", PREFIX));
        assert!(!is_article_path("/wiki/Linux/", PREFIX));
        assert!(!is_article_path("/wiki//", PREFIX));
        assert!(!is_article_path("/w/index.php", PREFIX));
    }

    #[test]
    fn test_external_and_relative_rejected() {
        assert!(!is_article_path("https://en.wikipedia.org/wiki/Linux", PREFIX));
        assert!(!is_article_path("//example.com/wiki/Linux", PREFIX));
        assert!(!is_article_path("Linux", PREFIX));
        assert!(!is_article_path("", PREFIX));
    }

    #[test]
    fn test_nested_prefix() {
        assert!(is_article_path("/en/wiki/Linux", "/en/wiki/"));
        assert!(!is_article_path("/en/wiki/Linux/x", "/en/wiki/"));
    }
}
