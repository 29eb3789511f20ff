//! Site layouts.
//!
//! Everything the crawler knows about one website's markup lives behind the
//! [`SiteLayout`] trait:
//!
//! | Concern | Method |
//! |---------|--------|
//! | Where listing page `n` lives | [`SiteLayout::listing_url`] |
//! | Which anchors are article teasers | [`SiteLayout::select_teasers`] |
//! | How an article URL encodes its date | [`SiteLayout::parse_date`] |
//!
//! The crawl loop itself never looks at selectors or URL patterns.

use crate::models::Teaser;
use scraper::Html;

pub mod stanford_daily;

pub use stanford_daily::StanfordDaily;

/// Site-specific markup and URL conventions.
pub trait SiteLayout {
    /// URL of listing page `page` (1-indexed) under `base_url`.
    fn listing_url(&self, base_url: &str, page: usize) -> String {
        format!("{base_url}{page}")
    }

    /// Article teasers on a parsed listing page, in document order.
    fn select_teasers(&self, document: &Html) -> Vec<Teaser>;

    /// Publication `(year, month, day)` embedded in an article URL, if any.
    /// The triple is not checked against the calendar here; numbers too
    /// large to represent saturate so they fail as an invalid date later.
    fn parse_date(&self, url: &str) -> Option<(i32, u32, u32)>;
}
