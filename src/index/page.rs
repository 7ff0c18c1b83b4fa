// src/index/page.rs
// =============================================================================
// This module builds a Page from a stream of markup events.
//
// How it works:
// 1. Start with recording = true
// 2. <script> turns recording off, </script> turns it back on
// 3. Every <a> that has attributes contributes its href to the links,
//    whether or not we are recording
// 4. Text seen while recording is split into words and added to the set
// 5. The end of the stream finishes the page; an Error event is logged and
//    finishes it too, keeping what was built so far
//
// Rust concepts:
// - IntoIterator: index() accepts any source of events
// - HashSet: deduplicates words for free
// =============================================================================

use std::collections::HashSet;
use tracing::warn;

use super::events::{html_events, MarkupEvent};
use super::words::WordSplitter;
use crate::fetch::PageBody;

// The indexed content of one page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    pub uri: String,
    /// Lower-cased, non-empty words found outside script blocks
    pub words: HashSet<String>,
    /// Raw href values in discovery order, duplicates included
    pub links: Vec<String>,
}

// A page plus the reason its stream stopped early, if it did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedPage {
    pub page: Page,
    pub stream_error: Option<String>,
}

// Turns markup into pages
//
// One indexer is shared by every crawl task.
#[derive(Debug, Clone)]
pub struct PageIndexer {
    splitter: WordSplitter,
}

impl PageIndexer {
    pub fn new(splitter: WordSplitter) -> Self {
        Self { splitter }
    }

    // Indexes a fetched HTML body
    //
    // Invalid UTF-8 is replaced rather than rejected. A truncated body is
    // indexed as far as it goes and then ends with an Error event.
    pub fn index_body(&self, uri: &str, body: &PageBody) -> IndexedPage {
        let html = String::from_utf8_lossy(&body.bytes);
        let mut events = html_events(uri, &html);
        if let Some(reason) = &body.truncated {
            events.push(MarkupEvent::Error(reason.clone()));
        }
        self.index(uri, events)
    }

    pub fn index<I>(&self, uri: &str, events: I) -> IndexedPage
    where
        I: IntoIterator<Item = MarkupEvent>,
    {
        let mut page = Page {
            uri: uri.to_string(),
            ..Page::default()
        };
        let mut recording = true;

        for event in events {
            match event {
                MarkupEvent::StartTag { name, attrs } => {
                    if name == "a" && !attrs.is_empty() {
                        let href = attrs
                            .into_iter()
                            .find(|(key, _)| key == "href")
                            .map(|(_, value)| value)
                            .unwrap_or_default();
                        page.links.push(href);
                    } else if name == "script" {
                        recording = false;
                    }
                }
                MarkupEvent::EndTag { name } => {
                    if name == "script" {
                        recording = true;
                    }
                }
                MarkupEvent::Text(text) => {
                    if recording {
                        page.words.extend(self.splitter.words(&text));
                    }
                }
                MarkupEvent::Error(reason) => {
                    warn!(uri, %reason, "markup stream ended with an error");
                    return IndexedPage {
                        page,
                        stream_error: Some(reason),
                    };
                }
            }
        }

        IndexedPage {
            page,
            stream_error: None,
        }
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why is link extraction independent of `recording`?
//    - The flag only describes text. An <a> reached while a script block is
//      open still counts as a link.
//
// 2. Why `unwrap_or_default()` on the href lookup?
//    - An <a> with attributes but no href contributes an empty link.
//      An empty link never matches a domain prefix, so it is dropped later.
//
// 3. What does `..Page::default()` do?
//    - Struct update syntax: fill every field we didn't name from default()
// -----------------------------------------------------------------------------
