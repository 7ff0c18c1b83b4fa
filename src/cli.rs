// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Every crawl parameter has a default, so running `wordcrawl` with no
// arguments repeats the reference crawl (two GitHub prefixes, one
// seed, depth 2).
//
// Rust concepts:
// - Derive macros: #[derive(Parser)] generates the parsing code
// - Vec<String> args: repeatable flags (--seed a --seed b)
// =============================================================================

use anyhow::{anyhow, Result};
use clap::Parser;
use std::time::Duration;
use url::Url;

use crate::crawl::{CrawlConfig, DomainAllowList};

#[derive(Parser, Debug)]
#[command(
    name = "wordcrawl",
    version = "0.1.0",
    about = "Crawl a set of sites to a fixed depth and index the words on every page",
    long_about = "wordcrawl starts from one or more seed URIs, follows links that stay inside \
                  the allowed domain prefixes, and prints every page it visited."
)]
pub struct Cli {
    /// Allowed domain prefix; links must start with one of these (repeatable)
    #[arg(
        long = "domain",
        value_name = "PREFIX",
        default_values = ["https://github.com/fabritsius", "https://fabritsius.github.io/"]
    )]
    pub domains: Vec<String>,

    /// URI to start crawling from (repeatable)
    #[arg(
        long = "seed",
        value_name = "URI",
        default_values = ["https://github.com/fabritsius?tab=repositories"]
    )]
    pub seeds: Vec<String>,

    /// Link hops to follow from each seed (0 = index the seeds only)
    #[arg(long, default_value_t = 2)]
    pub max_depth: usize,

    /// Pages fetched at the same time
    #[arg(long, default_value_t = 32, value_parser = clap::value_parser!(u16).range(1..))]
    pub concurrency: u16,

    /// Links allowed to wait for a free fetch slot; extra links are dropped
    ///
    /// Unbounded when not given
    #[arg(long)]
    pub queue_capacity: Option<usize>,

    /// Per-request timeout in seconds (no timeout when not given)
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Print the words indexed on each page after its URI
    #[arg(long)]
    pub words: bool,

    /// Output the full report as JSON instead of one URI per line
    #[arg(long, conflicts_with = "words")]
    pub json: bool,
}

// How the report is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Lines,
    Words,
    Json,
}

impl Cli {
    // Seeds, checked to be absolute URIs
    pub fn seeds(&self) -> Result<Vec<String>> {
        for seed in &self.seeds {
            Url::parse(seed).map_err(|e| anyhow!("Invalid seed URI '{}': {}", seed, e))?;
        }
        Ok(self.seeds.clone())
    }

    pub fn crawl_config(&self) -> CrawlConfig {
        CrawlConfig {
            domains: DomainAllowList::new(self.domains.iter().cloned()),
            max_depth: self.max_depth,
            max_concurrency: usize::from(self.concurrency),
            queue_capacity: self.queue_capacity,
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else if self.words {
            OutputFormat::Words
        } else {
            OutputFormat::Lines
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_run() {
        let cli = Cli::try_parse_from(["wordcrawl"]).unwrap();

        assert_eq!(
            cli.domains,
            vec!["https://github.com/fabritsius", "https://fabritsius.github.io/"]
        );
        assert_eq!(cli.seeds().unwrap(), vec!["https://github.com/fabritsius?tab=repositories"]);
        assert_eq!(cli.max_depth, 2);
        assert_eq!(cli.timeout(), None);
        assert_eq!(cli.output_format(), OutputFormat::Lines);
    }

    #[test]
    fn test_repeatable_flags() {
        let cli = Cli::try_parse_from([
            "wordcrawl",
            "--domain",
            "https://x.test",
            "--domain",
            "https://y.test",
            "--seed",
            "https://x.test/start",
            "--max-depth",
            "1",
            "--queue-capacity",
            "100",
        ])
        .unwrap();
        let config = cli.crawl_config();

        assert!(config.domains.is_allowed("https://y.test/page"));
        assert_eq!(config.max_depth, 1);
        assert_eq!(config.max_concurrency, 32);
        assert_eq!(config.queue_capacity, Some(100));
    }

    #[test]
    fn test_relative_seed_is_rejected() {
        let cli = Cli::try_parse_from(["wordcrawl", "--seed", "/start"]).unwrap();
        assert!(cli.seeds().is_err());
    }

    #[test]
    fn test_zero_concurrency_is_rejected() {
        assert!(Cli::try_parse_from(["wordcrawl", "--concurrency", "0"]).is_err());
    }

    #[test]
    fn test_output_format_flags() {
        let cli = Cli::try_parse_from(["wordcrawl", "--json"]).unwrap();
        assert_eq!(cli.output_format(), OutputFormat::Json);

        let cli = Cli::try_parse_from(["wordcrawl", "--words", "--timeout-secs", "5"]).unwrap();
        assert_eq!(cli.output_format(), OutputFormat::Words);
        assert_eq!(cli.timeout(), Some(Duration::from_secs(5)));

        assert!(Cli::try_parse_from(["wordcrawl", "--json", "--words"]).is_err());
    }
}
