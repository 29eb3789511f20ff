//! The listing crawler.
//!
//! Walks listing pages `1..=max_pages`, turning every teaser into an
//! [`ArticleRecord`]:
//!
//! 1. **Listing**: fetch page `n`, select its teasers
//! 2. **Dating**: read `(year, month, day)` out of each teaser URL
//! 3. **Fetching**: download and clean each article body
//! 4. **Pause**: wait for the politeness delay, move to page `n + 1`
//!
//! The first page without teasers ends the crawl. Any error ends it too, and
//! the records gathered so far are dropped.

use crate::delay::{Delay, RandomDelay};
use crate::error::{CrawlError, Result};
use crate::extract::fetch_article_body;
use crate::http::{DEFAULT_TIMEOUT, Fetcher, HttpFetcher};
use crate::models::{ArticleRecord, Teaser};
use crate::sites::{SiteLayout, StanfordDaily};
use futures::stream::{self, StreamExt, TryStreamExt};
use scraper::Html;
use tracing::{debug, info, instrument};

/// Crawls one site's listing pages.
pub struct Crawler<F, S = StanfordDaily, D = RandomDelay> {
    fetcher: F,
    site: S,
    delay: D,
    article_concurrency: usize,
}

impl<F, S, D> Crawler<F, S, D>
where
    F: Fetcher,
    S: SiteLayout,
    D: Delay,
{
    /// A crawler that fetches article bodies one at a time.
    pub fn new(fetcher: F, site: S, delay: D) -> Self {
        Self {
            fetcher,
            site,
            delay,
            article_concurrency: 1,
        }
    }

    /// Fetch up to `n` article bodies of a page at once. Records still come
    /// back in discovery order. Values below 1 are treated as 1.
    pub fn with_article_concurrency(mut self, n: usize) -> Self {
        self.article_concurrency = n.max(1);
        self
    }

    /// Crawl listing pages `base_url + "1"`, `base_url + "2"`, ... up to
    /// `max_pages`, stopping early at the first page with no teasers.
    ///
    /// With `show_progress`, prints `{page} : {teaser count}` for every
    /// listing page fetched.
    ///
    /// # Errors
    ///
    /// Fails on the first fetch error, on a teaser URL with no date path
    /// ([`CrawlError::MalformedArticleUrl`]), or on a date that does not exist
    /// ([`CrawlError::InvalidDate`]).
    #[instrument(level = "info", skip(self))]
    pub async fn crawl(
        &self,
        base_url: &str,
        max_pages: usize,
        show_progress: bool,
    ) -> Result<Vec<ArticleRecord>> {
        let mut results = Vec::new();
        let mut page = 1;
        let mut has_more = true;

        while has_more && page <= max_pages {
            let listing_url = self.site.listing_url(base_url, page);
            let html = self.fetcher.fetch(&listing_url).await?;
            let teasers = {
                let document = Html::parse_document(&html);
                self.site.select_teasers(&document)
            };

            if show_progress {
                println!("{}", progress_line(page, teasers.len()));
            }
            info!(page, count = teasers.len(), url = %listing_url, "Scanned listing page");

            if teasers.is_empty() {
                has_more = false;
            } else {
                let records = self.crawl_page(teasers).await?;
                debug!(page, records = records.len(), "Collected page records");
                results.extend(records);

                page += 1;
                self.delay.pause().await;
            }
        }

        info!(count = results.len(), "Crawl finished");
        Ok(results)
    }

    /// Turn one page's teasers into records, in teaser order.
    async fn crawl_page(&self, teasers: Vec<Teaser>) -> Result<Vec<ArticleRecord>> {
        let mut dated = Vec::with_capacity(teasers.len());
        for teaser in teasers {
            if teaser.title.is_empty() {
                debug!(url = %teaser.url, "Skipping teaser without text");
                continue;
            }
            let (year, month, day) = self
                .site
                .parse_date(&teaser.url)
                .ok_or_else(|| CrawlError::MalformedArticleUrl(teaser.url.clone()))?;
            dated.push((teaser.title, teaser.url, (year, month, day)));
        }

        let bodies: Vec<String> = stream::iter(dated.iter())
            .map(|(_, url, _)| fetch_article_body(&self.fetcher, url))
            .buffered(self.article_concurrency)
            .try_collect()
            .await?;

        dated
            .into_iter()
            .zip(bodies)
            .map(|((title, url, (year, month, day)), body)| {
                ArticleRecord::new(title, url, body, year, month, day)
            })
            .collect()
    }
}

/// The `{page} : {teaser count}` line printed for each listing page.
pub fn progress_line(page: usize, count: usize) -> String {
    format!("{page} : {count}")
}

/// Crawl The Stanford Daily over HTTP with the default politeness delay.
pub async fn crawl(
    base_url: &str,
    max_pages: usize,
    show_progress: bool,
) -> Result<Vec<ArticleRecord>> {
    let fetcher = HttpFetcher::new(DEFAULT_TIMEOUT)?;
    Crawler::new(fetcher, StanfordDaily, RandomDelay::default())
        .crawl(base_url, max_pages, show_progress)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delay::NoDelay;
    use crate::http::testing::MemoryFetcher;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const BASE: &str = "https://stanforddaily.com/category/opinions/page/";

    #[derive(Default)]
    struct CountingDelay(AtomicUsize);

    impl Delay for CountingDelay {
        async fn pause(&self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn listing(links: &[(&str, &str)]) -> String {
        let teasers: String = links
            .iter()
            .map(|(url, title)| format!(r#"<div><h3><a href="{url}">{title}</a></h3></div>"#))
            .collect();
        format!("<html><body>{teasers}</body></html>")
    }

    fn article(text: &str) -> String {
        format!("<html><body><nav>Home</nav>\n<p>{text}</p></body></html>")
    }

    const FIRST: &str = "https://stanforddaily.com/2022/12/18/first-opinion/";
    const SECOND: &str = "https://stanforddaily.com/2022/12/17/second-opinion/";

    fn two_article_site() -> MemoryFetcher {
        MemoryFetcher::new()
            .with_page(
                &format!("{BASE}1"),
                &listing(&[(FIRST, "First opinion"), (SECOND, "Second opinion")]),
            )
            .with_page(&format!("{BASE}2"), &listing(&[]))
            .with_page(FIRST, &article("The first article makes its case here."))
            .with_page(SECOND, &article("The second article argues the other side."))
    }

    #[tokio::test]
    async fn test_crawl_stops_at_empty_page() {
        let crawler = Crawler::new(two_article_site(), StanfordDaily, NoDelay);

        let records = crawler.crawl(BASE, 10, false).await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title(), "First opinion");
        assert_eq!(records[0].url(), FIRST);
        assert_eq!(records[0].body(), "The first article makes its case here.\n");
        assert_eq!((records[0].year(), records[0].month(), records[0].day()), (2022, 12, 18));
        assert_eq!(records[1].title(), "Second opinion");
        assert_eq!(records[1].day(), 17);

        let requests = crawler.fetcher.requests();
        assert!(!requests.contains(&format!("{BASE}3")));
        assert_eq!(requests.last().unwrap(), &format!("{BASE}2"));
    }

    #[tokio::test]
    async fn test_crawl_respects_max_pages() {
        let fetcher = MemoryFetcher::new()
            .with_page(&format!("{BASE}1"), &listing(&[(FIRST, "First opinion")]))
            .with_page(&format!("{BASE}2"), &listing(&[(SECOND, "Second opinion")]))
            .with_page(FIRST, &article("The first article makes its case here."))
            .with_page(SECOND, &article("The second article argues the other side."));
        let crawler = Crawler::new(fetcher, StanfordDaily, NoDelay);

        let records = crawler.crawl(BASE, 1, false).await.unwrap();

        assert_eq!(records.len(), 1);
        assert!(!crawler.fetcher.requests().contains(&format!("{BASE}2")));
    }

    #[tokio::test]
    async fn test_zero_max_pages_fetches_nothing() {
        let crawler = Crawler::new(two_article_site(), StanfordDaily, NoDelay);
        assert!(crawler.crawl(BASE, 0, false).await.unwrap().is_empty());
        assert!(crawler.fetcher.requests().is_empty());
    }

    #[tokio::test]
    async fn test_delay_once_per_non_empty_page() {
        let crawler = Crawler::new(two_article_site(), StanfordDaily, CountingDelay::default());
        crawler.crawl(BASE, 10, false).await.unwrap();
        assert_eq!(crawler.delay.0.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_teasers_without_text_are_skipped() {
        let fetcher = MemoryFetcher::new()
            .with_page(
                &format!("{BASE}1"),
                &listing(&[(SECOND, ""), (FIRST, "First opinion")]),
            )
            .with_page(&format!("{BASE}2"), &listing(&[]))
            .with_page(FIRST, &article("The first article makes its case here."));
        let crawler = Crawler::new(fetcher, StanfordDaily, NoDelay);

        let records = crawler.crawl(BASE, 10, false).await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].url(), FIRST);
        assert!(!crawler.fetcher.requests().contains(&SECOND.to_string()));
    }

    #[tokio::test]
    async fn test_whitespace_titles_are_kept_verbatim() {
        let fetcher = MemoryFetcher::new()
            .with_page(
                &format!("{BASE}1"),
                &listing(&[(FIRST, "\n  Padded title \n"), (SECOND, " ")]),
            )
            .with_page(&format!("{BASE}2"), &listing(&[]))
            .with_page(FIRST, &article("The first article makes its case here."))
            .with_page(SECOND, &article("The second article argues the other side."));
        let crawler = Crawler::new(fetcher, StanfordDaily, NoDelay);

        let records = crawler.crawl(BASE, 10, false).await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title(), "\n  Padded title \n");
        assert_eq!(records[1].title(), " ");
        assert_eq!(records[1].url(), SECOND);
    }

    #[tokio::test]
    async fn test_overflowing_date_part_is_an_invalid_date() {
        let huge = "https://stanforddaily.com/2022/12/99999999999/a/";
        let fetcher = MemoryFetcher::new()
            .with_page(&format!("{BASE}1"), &listing(&[(huge, "Huge day")]))
            .with_page(huge, &article("This page has an impossible date in its URL."));
        let crawler = Crawler::new(fetcher, StanfordDaily, NoDelay);

        let err = crawler.crawl(BASE, 10, false).await.unwrap_err();

        assert!(matches!(
            err,
            CrawlError::InvalidDate {
                year: 2022,
                month: 12,
                day: u32::MAX
            }
        ));
    }

    #[test]
    fn test_progress_line() {
        assert_eq!(progress_line(1, 2), "1 : 2");
        assert_eq!(progress_line(12, 0), "12 : 0");
    }

    #[tokio::test]
    async fn test_same_url_on_two_pages_yields_two_records() {
        let fetcher = MemoryFetcher::new()
            .with_page(&format!("{BASE}1"), &listing(&[(FIRST, "First opinion")]))
            .with_page(&format!("{BASE}2"), &listing(&[(FIRST, "First opinion")]))
            .with_page(&format!("{BASE}3"), &listing(&[]))
            .with_page(FIRST, &article("The first article makes its case here."));
        let crawler = Crawler::new(fetcher, StanfordDaily, NoDelay);

        let records = crawler.crawl(BASE, 10, false).await.unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0], records[1]);
    }

    #[tokio::test]
    async fn test_undated_url_aborts_crawl() {
        let undated = "https://stanforddaily.com/about-the-daily/";
        let fetcher = MemoryFetcher::new()
            .with_page(
                &format!("{BASE}1"),
                &listing(&[(FIRST, "First opinion"), (undated, "About us")]),
            )
            .with_page(FIRST, &article("The first article makes its case here."));
        let crawler = Crawler::new(fetcher, StanfordDaily, NoDelay);

        let err = crawler.crawl(BASE, 10, false).await.unwrap_err();

        assert!(matches!(err, CrawlError::MalformedArticleUrl(ref url) if url == undated));
    }

    #[tokio::test]
    async fn test_impossible_date_aborts_crawl() {
        let bad = "https://stanforddaily.com/2022/2/30/bad-date/";
        let fetcher = MemoryFetcher::new()
            .with_page(&format!("{BASE}1"), &listing(&[(bad, "Bad date")]))
            .with_page(bad, &article("This page has an impossible date in its URL."));
        let crawler = Crawler::new(fetcher, StanfordDaily, NoDelay);

        let err = crawler.crawl(BASE, 10, false).await.unwrap_err();

        assert!(matches!(err, CrawlError::InvalidDate { month: 2, day: 30, .. }));
    }

    #[tokio::test]
    async fn test_failed_article_fetch_aborts_crawl() {
        let fetcher = MemoryFetcher::new()
            .with_page(&format!("{BASE}1"), &listing(&[(FIRST, "First opinion")]));
        let crawler = Crawler::new(fetcher, StanfordDaily, NoDelay);

        let err = crawler.crawl(BASE, 10, false).await.unwrap_err();

        assert!(matches!(err, CrawlError::HttpStatus { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_failed_listing_fetch_aborts_crawl() {
        let crawler = Crawler::new(MemoryFetcher::new(), StanfordDaily, NoDelay);
        assert!(crawler.crawl(BASE, 10, false).await.is_err());
    }

    #[tokio::test]
    async fn test_concurrent_bodies_keep_discovery_order() {
        let sequential = Crawler::new(two_article_site(), StanfordDaily, NoDelay)
            .crawl(BASE, 10, false)
            .await
            .unwrap();
        let concurrent = Crawler::new(two_article_site(), StanfordDaily, NoDelay)
            .with_article_concurrency(4)
            .crawl(BASE, 10, false)
            .await
            .unwrap();

        assert_eq!(sequential, concurrent);
    }

    #[test]
    fn test_article_concurrency_floor() {
        let crawler = Crawler::new(MemoryFetcher::new(), StanfordDaily, NoDelay)
            .with_article_concurrency(0);
        assert_eq!(crawler.article_concurrency, 1);
    }
}
