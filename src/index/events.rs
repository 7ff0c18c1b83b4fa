// src/index/events.rs
// =============================================================================
// This module turns HTML into a flat stream of markup events.
//
// The indexer does not care which parser produced the events. This file is
// the adapter for the `scraper` crate:
// - Parse the HTML into a document (html5ever under the hood)
// - Walk the tree in document order
// - Emit StartTag when entering an element, EndTag when leaving it,
//   and Text for every text node in between
//
// html5ever recovers from malformed markup on its own; the errors it reports
// are logged at debug level and never cut the stream short.
//
// Rust concepts:
// - Enums with data: one variant per kind of event
// - An explicit stack: walking the tree without recursion, so deeply
//   nested markup can't exhaust the task's stack
// =============================================================================

use scraper::Html;
use tracing::debug;

// One step of a markup stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupEvent {
    /// An opening tag with its attributes in source order
    StartTag {
        name: String,
        attrs: Vec<(String, String)>,
    },
    /// A closing tag
    EndTag { name: String },
    /// Raw text between tags
    Text(String),
    /// The tokenizer failed; nothing after this is meaningful
    Error(String),
}

#[cfg(test)]
impl MarkupEvent {
    pub fn start(name: &str, attrs: &[(&str, &str)]) -> Self {
        MarkupEvent::StartTag {
            name: name.to_string(),
            attrs: attrs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    pub fn end(name: &str) -> Self {
        MarkupEvent::EndTag {
            name: name.to_string(),
        }
    }
}

// Parses an HTML document into events
//
// Parameters:
//   uri: only used for log context
//   html: the document text
//
// Returns: every event of the document, in order
pub fn html_events(uri: &str, html: &str) -> Vec<MarkupEvent> {
    let document = Html::parse_document(html);

    for error in &document.errors {
        debug!(uri, %error, "recovered from HTML parse error");
    }

    // Each entry is a node and whether we are leaving it
    let mut events = Vec::new();
    let mut stack = vec![(*document.root_element(), false)];

    while let Some((node, leaving)) = stack.pop() {
        if let Some(element) = node.value().as_element() {
            let name = element.name().to_string();
            if leaving {
                events.push(MarkupEvent::EndTag { name });
                continue;
            }

            events.push(MarkupEvent::StartTag {
                name,
                attrs: element
                    .attrs()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            });
            stack.push((node, true));

            let children: Vec<_> = node.children().collect();
            stack.extend(children.into_iter().rev().map(|child| (child, false)));
        } else if let Some(text) = node.value().as_text() {
            // scraper hands us text with entities already decoded ("&amp;" -> "&")
            events.push(MarkupEvent::Text(String::from(&**text)));
        }
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_follow_document_order() {
        let events = html_events(
            "https://example.com",
            r#"<html><head></head><body><a href="/x">Go</a></body></html>"#,
        );

        assert_eq!(
            events,
            vec![
                MarkupEvent::start("html", &[]),
                MarkupEvent::start("head", &[]),
                MarkupEvent::end("head"),
                MarkupEvent::start("body", &[]),
                MarkupEvent::start("a", &[("href", "/x")]),
                MarkupEvent::Text("Go".to_string()),
                MarkupEvent::end("a"),
                MarkupEvent::end("body"),
                MarkupEvent::end("html"),
            ]
        );
    }

    #[test]
    fn test_script_body_is_text_inside_script() {
        let events = html_events(
            "https://example.com",
            "<body><script>var hidden = 1;</script></body>",
        );

        let script_at = events
            .iter()
            .position(|e| *e == MarkupEvent::start("script", &[]))
            .unwrap();
        assert_eq!(
            events[script_at + 1],
            MarkupEvent::Text("var hidden = 1;".to_string())
        );
        assert_eq!(events[script_at + 2], MarkupEvent::end("script"));
    }

    #[test]
    fn test_text_has_entities_decoded() {
        let events = html_events("https://example.com", "<p>fish &amp; chips</p>");

        assert!(events.contains(&MarkupEvent::Text("fish & chips".to_string())));
        assert!(!events
            .iter()
            .any(|e| matches!(e, MarkupEvent::Text(t) if t.contains("amp"))));
    }

    #[test]
    fn test_deeply_nested_markup_on_a_small_stack() {
        let depth = 40_000;
        let html = format!("{}deep{}", "<div>".repeat(depth), "</div>".repeat(depth));

        // 2 MiB, the default stack of a tokio worker thread
        let events = std::thread::Builder::new()
            .stack_size(2 * 1024 * 1024)
            .spawn(move || html_events("https://x.test/", &html))
            .unwrap()
            .join()
            .unwrap();

        assert!(events.contains(&MarkupEvent::Text("deep".to_string())));
        let opened = events
            .iter()
            .filter(|e| matches!(e, MarkupEvent::StartTag { name, .. } if name == "div"))
            .count();
        let closed = events
            .iter()
            .filter(|e| matches!(e, MarkupEvent::EndTag { name } if name == "div"))
            .count();
        assert_eq!(opened, depth);
        assert_eq!(opened, closed);
    }

    #[test]
    fn test_malformed_html_still_produces_events() {
        let events = html_events("https://example.com", "<p>unclosed <b>bold");
        assert!(events.contains(&MarkupEvent::Text("bold".to_string())));
    }
}
