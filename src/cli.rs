//! Command-line interface definitions for College Crawler.
//!
//! All options can be given as flags or environment variables.

use crate::sites::stanford_daily::OPINIONS_BASE_URL;
use clap::Parser;
use std::time::Duration;
use url::Url;

/// Command-line arguments.
///
/// # Examples
///
/// ```sh
/// # First three listing pages, with per-page progress
/// college_crawler --num-pages 3 --show-progress
///
/// # JSON output, no politeness delay
/// college_crawler --json --max-delay-ms 0
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Maximum number of listing pages to crawl
    #[arg(short, long, env = "COLLEGE_CRAWLER_NUM_PAGES", default_value_t = 10)]
    pub num_pages: usize,

    /// Print "{page} : {teaser count}" for each listing page
    #[arg(short, long, env = "COLLEGE_CRAWLER_SHOW_PROGRESS")]
    pub show_progress: bool,

    /// Listing URL prefix; the page number is appended
    #[arg(
        long,
        env = "COLLEGE_CRAWLER_BASE_URL",
        default_value = OPINIONS_BASE_URL,
        value_parser = parse_base_url
    )]
    pub base_url: String,

    /// Upper bound of the random pause between listing pages, in milliseconds
    #[arg(long, env = "COLLEGE_CRAWLER_MAX_DELAY_MS", default_value_t = 1000)]
    pub max_delay_ms: u64,

    /// Article bodies fetched at once within a listing page
    #[arg(long, env = "COLLEGE_CRAWLER_ARTICLE_CONCURRENCY", default_value_t = 1)]
    pub article_concurrency: usize,

    /// Per-request timeout, in seconds
    #[arg(long, env = "COLLEGE_CRAWLER_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Print the records as JSON instead of the text report
    #[arg(long, env = "COLLEGE_CRAWLER_JSON")]
    pub json: bool,
}

impl Cli {
    pub fn max_delay(&self) -> Duration {
        Duration::from_millis(self.max_delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Accept only absolute http(s) URLs. The string is kept as given since page
/// numbers are appended to it verbatim.
fn parse_base_url(raw: &str) -> Result<String, String> {
    let url = Url::parse(raw).map_err(|e| format!("invalid URL: {e}"))?;
    match url.scheme() {
        "http" | "https" => Ok(raw.to_string()),
        other => Err(format!("unsupported scheme: {other}")),
    }
}
