// src/report.rs
// =============================================================================
// The result of a crawl run.
//
// - pages: every indexed URI with its words (this is the visited output)
// - outcomes: one entry per claimed URI saying how it ended
//
// Rust concepts:
// - serde: Serialize derives let us print the whole report as JSON
// - #[serde(flatten)]: merges the outcome's fields into the PageOutcome
// =============================================================================

use serde::Serialize;
use std::collections::{HashMap, HashSet};

// How a single claimed URI ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// Fetched and indexed completely
    Indexed,
    /// Indexed, but the markup stream ended with an error
    Truncated { reason: String },
    /// The fetch failed; the URI was not indexed
    FetchFailed { reason: String },
    /// Admission control rejected it; it was never fetched
    Dropped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageOutcome {
    pub uri: String,
    #[serde(flatten)]
    pub outcome: Outcome,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CrawlReport {
    pub pages: HashMap<String, HashSet<String>>,
    pub outcomes: Vec<PageOutcome>,
}

impl CrawlReport {
    pub fn record(&mut self, uri: &str, outcome: Outcome) {
        self.outcomes.push(PageOutcome {
            uri: uri.to_string(),
            outcome,
        });
    }

    pub fn add_page(&mut self, uri: String, words: HashSet<String>) {
        self.pages.insert(uri, words);
    }

    /// Visited URIs, in no particular order
    pub fn visited(&self) -> impl Iterator<Item = &str> {
        self.pages.keys().map(String::as_str)
    }

    pub fn fetch_failed_count(&self) -> usize {
        self.count(|o| matches!(o, Outcome::FetchFailed { .. }))
    }

    pub fn truncated_count(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Truncated { .. }))
    }

    pub fn dropped_count(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Dropped))
    }

    fn count(&self, predicate: impl Fn(&Outcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| predicate(&o.outcome)).count()
    }
}
