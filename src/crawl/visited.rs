// src/crawl/visited.rs
// =============================================================================
// The visited-set: every URI the crawl has claimed, and what became of it.
//
// There is no `contains()`. The only way in is `claim()`, which tests and
// inserts in one call, so a URI is never handed out twice.
// After a claim the coordinator records the final state with `settle()`.
// =============================================================================

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitState {
    /// Claimed, queued or in flight
    Claimed,
    /// Fetched and indexed
    Indexed,
    /// Fetch failed; never retried within the run
    Failed,
    /// Rejected by admission control before it was fetched
    Dropped,
}

#[derive(Debug, Default)]
pub struct VisitedSet {
    states: HashMap<String, VisitState>,
}

impl VisitedSet {
    // Claims `uri` for crawling
    //
    // Returns: true the first time a URI is seen, false every time after
    pub fn claim(&mut self, uri: &str) -> bool {
        if self.states.contains_key(uri) {
            return false;
        }
        self.states.insert(uri.to_string(), VisitState::Claimed);
        true
    }

    // Records how a claimed URI ended. Unclaimed URIs are ignored.
    pub fn settle(&mut self, uri: &str, state: VisitState) {
        if let Some(current) = self.states.get_mut(uri) {
            *current = state;
        }
    }

    pub fn count(&self, state: VisitState) -> usize {
        self.states.values().filter(|s| **s == state).count()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[cfg(test)]
    pub fn state(&self, uri: &str) -> Option<VisitState> {
        self.states.get(uri).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_only_once() {
        let mut visited = VisitedSet::default();

        assert!(visited.claim("https://x.test/a"));
        assert!(!visited.claim("https://x.test/a"));
        assert!(visited.claim("https://x.test/b"));
        assert_eq!(visited.len(), 2);
    }

    #[test]
    fn test_settled_uri_stays_claimed() {
        let mut visited = VisitedSet::default();
        visited.claim("https://x.test/a");
        visited.settle("https://x.test/a", VisitState::Failed);

        assert!(!visited.claim("https://x.test/a"));
        assert_eq!(visited.state("https://x.test/a"), Some(VisitState::Failed));
    }

    #[test]
    fn test_settle_ignores_unclaimed() {
        let mut visited = VisitedSet::default();
        visited.settle("https://x.test/a", VisitState::Indexed);

        assert_eq!(visited.state("https://x.test/a"), None);
        assert_eq!(visited.len(), 0);
    }

    #[test]
    fn test_count_by_state() {
        let mut visited = VisitedSet::default();
        for uri in ["a", "b", "c"] {
            visited.claim(uri);
        }
        visited.settle("a", VisitState::Indexed);
        visited.settle("b", VisitState::Indexed);

        assert_eq!(visited.count(VisitState::Indexed), 2);
        assert_eq!(visited.count(VisitState::Claimed), 1);
    }
}
