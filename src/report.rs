//! Console output for a finished crawl.
//!
//! Two formats:
//! - **Text**: each record's summary line and body, a total, and the dates of
//!   the first and last records
//! - **JSON**: the records as a pretty-printed array

use crate::models::ArticleRecord;
use std::fmt::Write;

/// Render records as the human-readable report.
pub fn render_text(records: &[ArticleRecord]) -> String {
    let mut out = String::new();
    for record in records {
        writeln!(out, "{record}").unwrap();
        writeln!(out, "{}", record.body()).unwrap();
    }

    writeln!(out, "Total articles found: {}", records.len()).unwrap();
    if let (Some(first), Some(last)) = (records.first(), records.last()) {
        writeln!(out, "First article has date: {}", first.date()).unwrap();
        writeln!(out, "Last article has date: {}", last.date()).unwrap();
    }
    out
}

/// Render records as a JSON array.
pub fn render_json(records: &[ArticleRecord]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<ArticleRecord> {
        vec![
            ArticleRecord::new(
                "Newest take",
                "https://stanforddaily.com/2022/12/18/newest/",
                "Newest body line is long enough.\n",
                2022,
                12,
                18,
            )
            .unwrap(),
            ArticleRecord::new(
                "Older take",
                "https://stanforddaily.com/2022/11/3/older/",
                "",
                2022,
                11,
                3,
            )
            .unwrap(),
        ]
    }

    #[test]
    fn test_render_text() {
        let text = render_text(&records());
        assert_eq!(
            text,
            "Newest take: 2022-12-18\n\
             Newest body line is long enough.\n\n\
             Older take: 2022-11-3\n\n\
             Total articles found: 2\n\
             First article has date: 2022-12-18\n\
             Last article has date: 2022-11-03\n"
        );
    }

    #[test]
    fn test_render_text_empty() {
        assert_eq!(render_text(&[]), "Total articles found: 0\n");
    }

    #[test]
    fn test_render_json() {
        let json = render_json(&records()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
        assert_eq!(value[1]["title"], "Older take");
        assert_eq!(value[1]["day"], 3);
    }
}
