// src/index/mod.rs
// =============================================================================
// This module turns fetched bytes into a Page record.
//
// Submodules:
// - events: HTML → markup event stream (scraper adapter)
// - words: text → lower-cased words
// - page: event stream → Page (the "ignore script text" policy lives here)
// =============================================================================

mod events;
mod page;
mod words;

pub use page::{IndexedPage, PageIndexer};
pub use words::WordSplitter;
