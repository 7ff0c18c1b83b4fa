// src/crawl/mod.rs
// =============================================================================
// This module handles the crawl itself.
//
// Features:
// - Concurrent crawling, one tokio task per page
// - Domain restriction by URI prefix (seeds are exempt)
// - Depth budget counted down per link hop
// - Every URI claimed at most once, even when found on many pages
// - Bounded in-flight tasks with an optional frontier limit
//
// Submodules:
// - coordinator: spawns tasks, owns the visited-set, detects the end
// - links: root-relative link resolution and the domain allow-list
// - visited: the claim-once visited-set
// =============================================================================

mod coordinator;
mod links;
mod visited;

pub use coordinator::{CrawlConfig, Crawler};
pub use links::DomainAllowList;
