//! # College Crawler
//!
//! Command-line entry point: crawls The Stanford Daily's opinion listing
//! pages and prints what it found.
//!
//! ## Usage
//!
//! ```sh
//! college_crawler --num-pages 1 --show-progress
//! ```
//!
//! Logs go to stderr (`RUST_LOG` controls the level); the report goes to
//! stdout.

use clap::Parser;
use college_crawler::cli::Cli;
use college_crawler::report::{render_json, render_text};
use college_crawler::{Crawler, HttpFetcher, RandomDelay, StanfordDaily};
use std::error::Error;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let fetcher = HttpFetcher::new(args.timeout())?;
    let crawler = Crawler::new(fetcher, StanfordDaily, RandomDelay::new(args.max_delay()))
        .with_article_concurrency(args.article_concurrency);

    info!(base_url = %args.base_url, num_pages = args.num_pages, "Starting crawl");
    let records = match crawler
        .crawl(&args.base_url, args.num_pages, args.show_progress)
        .await
    {
        Ok(records) => records,
        Err(e) => {
            error!(error = %e, "Crawl failed");
            return Err(e.into());
        }
    };

    if args.json {
        println!("{}", render_json(&records)?);
    } else {
        print!("{}", render_text(&records));
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        articles = records.len(),
        "Execution complete"
    );

    Ok(())
}
