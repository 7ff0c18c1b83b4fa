// src/crawl/links.rs
// =============================================================================
// This module decides where a discovered link points and whether we may
// follow it.
//
// - resolve_link: root-relative links ("/docs") become absolute using the
//   scheme and host of the page they were found on. Everything else is
//   returned untouched.
// - DomainAllowList: a link is allowed if it starts with one of the
//   configured prefixes. Plain string prefix, no URL normalization.
//
// Links we don't resolve (fragments, "../x", "mailto:", "//host/path") are
// passed through as-is. They don't start with an http(s) prefix, so the
// allow-list rejects them.
// =============================================================================

// Resolves a link found on `page_uri`
//
// Examples:
//   page_uri = "https://example.com/a/b"
//   link = "/c/d"                 -> "https://example.com/c/d"
//   link = "https://other.com/x"  -> "https://other.com/x"
//   link = "#top"                 -> "#top"
pub fn resolve_link(link: &str, page_uri: &str) -> String {
    if !link.starts_with('/') {
        return link.to_string();
    }

    // "https://example.com/a/b" splits into ["https:", "", "example.com", ...]
    let origin = page_uri.split('/').take(3).collect::<Vec<_>>().join("/");
    format!("{}{}", origin, link)
}

// The prefixes a link must start with to be crawled
#[derive(Debug, Clone, Default)]
pub struct DomainAllowList {
    prefixes: Vec<String>,
}

impl DomainAllowList {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_allowed(&self, candidate: &str) -> bool {
        self.prefixes
            .iter()
            .any(|prefix| candidate.starts_with(prefix.as_str()))
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_root_relative_link() {
        assert_eq!(
            resolve_link("/c/d", "https://example.com/a/b"),
            "https://example.com/c/d"
        );
    }

    #[test]
    fn test_resolve_keeps_port_and_drops_query() {
        assert_eq!(
            resolve_link("/x", "http://localhost:8080/page?tab=1"),
            "http://localhost:8080/x"
        );
    }

    #[test]
    fn test_absolute_link_passes_through() {
        assert_eq!(
            resolve_link("https://other.com/x", "https://example.com/a"),
            "https://other.com/x"
        );
    }

    #[test]
    fn test_other_relative_forms_pass_through() {
        let page = "https://example.com/a/b";
        assert_eq!(resolve_link("../up", page), "../up");
        assert_eq!(resolve_link("#section", page), "#section");
        assert_eq!(resolve_link("mailto:test@example.com", page), "mailto:test@example.com");
        assert_eq!(resolve_link("", page), "");
    }

    #[test]
    fn test_scheme_relative_link_is_treated_as_root_relative() {
        // "//cdn.test/x" starts with '/', so it is glued onto the page origin
        assert_eq!(
            resolve_link("//cdn.test/x", "https://example.com/a"),
            "https://example.com//cdn.test/x"
        );
    }

    #[test]
    fn test_allow_list_matches_any_prefix() {
        let domains = DomainAllowList::new(["https://x.test", "https://y.test/docs"]);

        assert!(domains.is_allowed("https://x.test/anything"));
        assert!(domains.is_allowed("https://y.test/docs/page"));
        assert!(!domains.is_allowed("https://y.test/blog"));
        assert!(!domains.is_allowed("https://other.test/y"));
    }

    #[test]
    fn test_allow_list_does_not_normalize() {
        let domains = DomainAllowList::new(["https://x.test/"]);

        assert!(!domains.is_allowed("http://x.test/a"));
        assert!(!domains.is_allowed("https://x.test"));
        assert!(!domains.is_allowed("HTTPS://X.TEST/a"));
    }

    #[test]
    fn test_empty_allow_list_rejects_everything() {
        let domains = DomainAllowList::default();
        assert!(!domains.is_allowed("https://x.test/a"));
        assert!(domains.prefixes().is_empty());
    }
}
