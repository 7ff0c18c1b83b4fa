// src/crawl/coordinator.rs
// =============================================================================
// This module runs a crawl: one task per page, spawned as links are found.
//
// How it works:
// 1. Claim every seed in the visited-set and start a task for it at max_depth
// 2. A task fetches its page and indexes it (the only place it waits)
// 3. When a task finishes, the coordinator looks at the page:
//    - depth 0: the page is recorded, its links are ignored
//    - depth > 0: every link is resolved, checked against the allow-list and
//      claimed; each newly claimed link becomes a task at depth - 1
// 4. The run ends when no task is in flight and nothing is waiting
//
// Only the coordinator touches the visited-set. Tasks hand their page back
// through the JoinSet, so "is this new?" and "claim it" happen in one place
// and a URI is never crawled twice.
//
// Fan-out is bounded: at most `max_concurrency` tasks run at once. Extra work
// waits in the frontier queue. If `queue_capacity` is set and the frontier is
// full, the link is dropped and reported as such.
//
// Rust concepts:
// - JoinSet: a growable group of tokio tasks we can await one at a time
// - Arc: shares the fetcher and indexer with every task
// - VecDeque: the frontier, first in first out
// =============================================================================

use std::collections::VecDeque;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, error, info, trace, warn};

use super::links::{resolve_link, DomainAllowList};
use super::visited::{VisitState, VisitedSet};
use crate::fetch::{FetchError, PageFetcher};
use crate::index::{IndexedPage, PageIndexer};
use crate::report::{CrawlReport, Outcome};

// Settings for one crawl run
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Links must start with one of these to be followed
    pub domains: DomainAllowList,
    /// Link hops allowed from a seed; 0 = index the seeds only
    pub max_depth: usize,
    /// Tasks allowed in flight at once
    pub max_concurrency: usize,
    /// Frontier size limit, None = unbounded
    pub queue_capacity: Option<usize>,
}

// One page to crawl and the hops it may still expand
#[derive(Debug, Clone)]
struct CrawlTask {
    uri: String,
    depth: usize,
}

// What a task hands back to the coordinator
struct TaskResult {
    task: CrawlTask,
    result: Result<IndexedPage, FetchError>,
}

pub struct Crawler {
    fetcher: Arc<dyn PageFetcher>,
    indexer: Arc<PageIndexer>,
    config: CrawlConfig,
}

impl Crawler {
    pub fn new(fetcher: Arc<dyn PageFetcher>, indexer: PageIndexer, config: CrawlConfig) -> Self {
        Self {
            fetcher,
            indexer: Arc::new(indexer),
            config,
        }
    }

    // Crawls from `seeds` until every reachable page within depth is done
    //
    // Seeds are not checked against the allow-list. Duplicate seeds are
    // crawled once. Failures never abort the run; they show up in the
    // report's outcomes.
    pub async fn run(&self, seeds: &[String]) -> CrawlReport {
        let mut run = CrawlRun {
            crawler: self,
            visited: VisitedSet::default(),
            frontier: VecDeque::new(),
            in_flight: JoinSet::new(),
            report: CrawlReport::default(),
        };

        for seed in seeds {
            if run.visited.claim(seed) {
                // Seeds skip admission control
                let task = CrawlTask {
                    uri: seed.clone(),
                    depth: self.config.max_depth,
                };
                if run.has_room() {
                    run.spawn(task);
                } else {
                    run.frontier.push_back(task);
                }
            }
        }

        run.drive().await
    }
}

// The state of one run, owned by the coordinator alone
struct CrawlRun<'a> {
    crawler: &'a Crawler,
    visited: VisitedSet,
    frontier: VecDeque<CrawlTask>,
    in_flight: JoinSet<TaskResult>,
    report: CrawlReport,
}

impl CrawlRun<'_> {
    fn has_room(&self) -> bool {
        self.in_flight.len() < self.crawler.config.max_concurrency.max(1)
    }

    fn spawn(&mut self, task: CrawlTask) {
        debug!(uri = %task.uri, depth = task.depth, "spawning crawl task");
        let fetcher = Arc::clone(&self.crawler.fetcher);
        let indexer = Arc::clone(&self.crawler.indexer);
        self.in_flight.spawn(crawl_page(fetcher, indexer, task));
    }

    // Starts a freshly claimed task now, queues it, or drops it
    fn admit(&mut self, task: CrawlTask) {
        if self.has_room() {
            self.spawn(task);
            return;
        }

        match self.crawler.config.queue_capacity {
            Some(capacity) if self.frontier.len() >= capacity => {
                warn!(uri = %task.uri, capacity, "frontier full, dropping link");
                self.visited.settle(&task.uri, VisitState::Dropped);
                self.report.record(&task.uri, Outcome::Dropped);
            }
            _ => self.frontier.push_back(task),
        }
    }

    async fn drive(mut self) -> CrawlReport {
        while let Some(joined) = self.in_flight.join_next().await {
            match joined {
                Ok(done) => self.settle(done),
                Err(e) => error!(error = %e, "crawl task panicked"),
            }

            while self.has_room() {
                match self.frontier.pop_front() {
                    Some(task) => self.spawn(task),
                    None => break,
                }
            }
        }

        info!(
            claimed = self.visited.len(),
            indexed = self.visited.count(VisitState::Indexed),
            failed = self.visited.count(VisitState::Failed),
            dropped = self.visited.count(VisitState::Dropped),
            "crawl finished"
        );

        self.report
    }

    // Records a finished task and claims its children
    fn settle(&mut self, done: TaskResult) {
        let TaskResult { task, result } = done;

        let IndexedPage { page, stream_error } = match result {
            Ok(indexed) => indexed,
            Err(err) => {
                warn!(uri = err.uri(), error = %err, "fetch failed, dropping page");
                self.visited.settle(&task.uri, VisitState::Failed);
                self.report.record(
                    &task.uri,
                    Outcome::FetchFailed {
                        reason: err.to_string(),
                    },
                );
                return;
            }
        };

        self.visited.settle(&task.uri, VisitState::Indexed);
        let outcome = match stream_error {
            Some(reason) => Outcome::Truncated { reason },
            None => Outcome::Indexed,
        };
        self.report.record(&page.uri, outcome);

        if task.depth > 0 {
            for link in &page.links {
                let link = resolve_link(link, &page.uri);
                if !self.crawler.config.domains.is_allowed(&link) {
                    trace!(%link, "outside allowed domains");
                    continue;
                }
                if self.visited.claim(&link) {
                    self.admit(CrawlTask {
                        uri: link,
                        depth: task.depth - 1,
                    });
                }
            }
        }

        self.report.add_page(page.uri, page.words);
    }
}

// The body of a crawl task: fetch, then index
async fn crawl_page(
    fetcher: Arc<dyn PageFetcher>,
    indexer: Arc<PageIndexer>,
    task: CrawlTask,
) -> TaskResult {
    let result = fetcher
        .fetch(&task.uri)
        .await
        .map(|body| indexer.index_body(&task.uri, &body));

    TaskResult { task, result }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why does the coordinator own the visited-set instead of a Mutex?
//    - Tasks never look at it. They return their Page through the JoinSet
//      and the coordinator, running on a single task, does the claiming.
//
// 2. How do we know the crawl is over?
//    - Every task lives in `in_flight` until it's joined. The frontier is
//      refilled after every join, so an empty JoinSet means an empty
//      frontier too. join_next() returning None is the end of the run.
//
// 3. What happens to a URI whose fetch failed?
//    - It stays claimed (state Failed), so other pages linking to it don't
//      trigger another attempt. It is not part of the visited output.
// -----------------------------------------------------------------------------
