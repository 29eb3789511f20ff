//! Data models for crawled articles.
//!
//! - [`Teaser`]: a link found on a listing page, before anything is fetched
//! - [`ArticleRecord`]: a fully fetched article with its publication date
//!
//! Records are built once and never mutated; the fields are private and only
//! exposed through accessors.

use crate::error::{CrawlError, Result};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// An article teaser anchor from a listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Teaser {
    /// Visible text of the anchor, used as the article title.
    pub title: String,
    /// The anchor's `href`.
    pub url: String,
}

/// A crawled article.
///
/// The `(year, month, day)` triple is validated when the record is built, so
/// every record carries a real calendar date.
///
/// The `Display` impl renders the summary line `"{title}: {year}-{month}-{day}"`
/// without zero padding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleRecord {
    title: String,
    url: String,
    body: String,
    year: i32,
    month: u32,
    day: u32,
    #[serde(skip)]
    date: NaiveDate,
}

impl ArticleRecord {
    /// Build a record, failing with [`CrawlError::InvalidDate`] when the
    /// triple is not a real date (month 13, February 30, ...).
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        body: impl Into<String>,
        year: i32,
        month: u32,
        day: u32,
    ) -> Result<Self> {
        let date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or(CrawlError::InvalidDate { year, month, day })?;

        Ok(Self {
            title: title.into(),
            url: url.into(),
            body: body.into(),
            year,
            month,
            day,
            date,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// The publication date.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Same text as the `Display` impl.
    pub fn summary(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ArticleRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}-{}-{}", self.title, self.year, self.month, self.day)
    }
}
