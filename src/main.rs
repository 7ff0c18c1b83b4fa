// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Set up logging (stderr) and parse command-line arguments
// 2. Build the HTTP fetcher and the page indexer
// 3. Run the crawl
// 4. Print the visited pages to stdout
// 5. Exit with proper code (0 = crawl finished, 2 = error)
//
// A page that fails to fetch is not an error here: the crawl skips it and
// the report counts it.
// =============================================================================

mod cli; // src/cli.rs - command-line parsing
mod crawl; // src/crawl/ - the crawl coordinator
mod fetch; // src/fetch/ - HTTP fetching
mod index; // src/index/ - HTML → words and links
mod logging; // src/logging.rs - tracing setup
mod report; // src/report.rs - crawl results

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::{error, info};

use cli::{Cli, OutputFormat};
use crawl::Crawler;
use fetch::HttpFetcher;
use index::{PageIndexer, WordSplitter};
use report::CrawlReport;

#[tokio::main]
async fn main() {
    logging::init_logging();

    let exit_code = match run().await {
        Ok(()) => 0,
        Err(e) => {
            error!("{:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let seeds = cli.seeds()?;
    let config = cli.crawl_config();
    info!(
        seeds = ?seeds,
        domains = ?config.domains.prefixes(),
        max_depth = config.max_depth,
        "starting crawl"
    );

    let fetcher = HttpFetcher::new(cli.timeout()).context("failed to build HTTP client")?;
    let splitter = WordSplitter::new().context("failed to compile word pattern")?;
    let crawler = Crawler::new(Arc::new(fetcher), PageIndexer::new(splitter), config);

    let report = crawler.run(&seeds).await;

    info!(
        visited = report.pages.len(),
        fetch_failed = report.fetch_failed_count(),
        truncated = report.truncated_count(),
        dropped = report.dropped_count(),
        "crawl summary"
    );

    print_report(&report, cli.output_format())
}

// Prints the report in the requested format
fn print_report(report: &CrawlReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Lines => {
            for uri in report.visited() {
                println!("{}", uri);
            }
        }
        OutputFormat::Words => {
            for (uri, words) in &report.pages {
                let mut words: Vec<&str> = words.iter().map(String::as_str).collect();
                words.sort_unstable();
                println!("{}\t{}", uri, words.join(" "));
            }
        }
        OutputFormat::Json => {
            let json_output = serde_json::to_string_pretty(report)?;
            println!("{}", json_output);
        }
    }
    Ok(())
}
