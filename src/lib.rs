//! # College Crawler
//!
//! Crawls the opinion listing pages of The Stanford Daily and returns each
//! article's title, URL, publication date and body text as an
//! [`ArticleRecord`].
//!
//! ## Usage
//!
//! ```no_run
//! # async fn run() -> Result<(), college_crawler::CrawlError> {
//! use college_crawler::sites::stanford_daily::OPINIONS_BASE_URL;
//!
//! let records = college_crawler::crawl(OPINIONS_BASE_URL, 2, true).await?;
//! for record in &records {
//!     println!("{record}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`http`]: the [`Fetcher`] seam and its `reqwest` implementation
//! - [`sites`]: site markup and URL conventions behind [`SiteLayout`]
//! - [`extract`]: article body cleaning
//! - [`delay`]: the politeness pause between listing pages
//! - [`crawler`]: the pagination loop tying them together

pub mod cli;
pub mod crawler;
pub mod delay;
pub mod error;
pub mod extract;
pub mod http;
pub mod models;
pub mod report;
pub mod sites;

pub use crawler::{Crawler, crawl};
pub use delay::{Delay, NoDelay, RandomDelay};
pub use error::{CrawlError, Result};
pub use http::{Fetcher, HttpFetcher};
pub use models::{ArticleRecord, Teaser};
pub use sites::{SiteLayout, StanfordDaily};
