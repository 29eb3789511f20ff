//! Error type shared by every stage of a crawl.
//!
//! Nothing in the crate recovers from these locally: the first error ends the
//! crawl and is handed back to the caller, along with whatever context the
//! variant carries. Callers that want bounded retry should wrap the
//! [`Fetcher`](crate::http::Fetcher) they pass in.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrawlError {
    /// Transport failure, timeout, or a non-success status reported by `reqwest`.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered, but not with a 2xx status.
    #[error("HTTP {status} fetching {url}")]
    HttpStatus { url: String, status: u16 },

    /// The article URL does not embed a `/{year}/{month}/{day}/` path.
    #[error("article URL has no date path: {0}")]
    MalformedArticleUrl(String),

    /// Year, month and day do not name a real calendar date.
    #[error("invalid date {year}-{month}-{day}")]
    InvalidDate { year: i32, month: u32, day: u32 },
}

pub type Result<T> = std::result::Result<T, CrawlError>;
