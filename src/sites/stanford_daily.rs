//! The Stanford Daily.
//!
//! # Markup
//!
//! Listing pages at `https://stanforddaily.com/category/opinions/page/{n}`
//! render each teaser as `div > h3 > a`, with an absolute `href`.
//!
//! # URL Pattern
//!
//! Article URLs carry their publication date in the path:
//! `https://stanforddaily.com/2022/12/18/article-slug/`.

use super::SiteLayout;
use crate::models::Teaser;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use std::str::FromStr;

/// Listing base for the opinions category; append the page number.
pub const OPINIONS_BASE_URL: &str = "https://stanforddaily.com/category/opinions/page/";

static TEASER_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("div > h3 > a[href^='http']").expect("teaser selector is valid")
});

static DATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"https://stanforddaily\.com/(\d+)/(\d+)/(\d+)").expect("date pattern is valid")
});

#[derive(Debug, Clone, Copy, Default)]
pub struct StanfordDaily;

impl SiteLayout for StanfordDaily {
    fn select_teasers(&self, document: &Html) -> Vec<Teaser> {
        document
            .select(&TEASER_SELECTOR)
            .filter_map(|anchor| {
                let url = anchor.value().attr("href")?;
                Some(Teaser {
                    title: anchor.text().collect::<String>(),
                    url: url.to_string(),
                })
            })
            .collect()
    }

    fn parse_date(&self, url: &str) -> Option<(i32, u32, u32)> {
        let caps = DATE_PATTERN.captures(url)?;
        Some((
            parse_or_max(&caps[1], i32::MAX),
            parse_or_max(&caps[2], u32::MAX),
            parse_or_max(&caps[3], u32::MAX),
        ))
    }
}

/// Digits too large for `T` become `max`, which no calendar date accepts.
fn parse_or_max<T: FromStr>(digits: &str, max: T) -> T {
    digits.parse().unwrap_or(max)
}
