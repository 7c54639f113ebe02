//! Canonical object storage layout for the data feed.
//!
//! This module is the single source of truth for feed paths. All readers and
//! catalog object locations derive their URIs from [`FeedLayout`]; no
//! hardcoded path strings should exist outside this module.
//!
//! # Layout
//!
//! ```text
//! {report_base}/rawtsv/
//! ├── column_headers/
//! │   └── dt={date}/
//! │       └── column_headers.tsv.gz    # header sidecar, one per report date
//! └── hit_data/                        # base table location
//!     └── dt={date}/                   # partition location
//!
//! {lookup_base}/
//! └── {lookup_name}/                   # one prefix per lookup table
//! ```

/// Name of the partitioned base table holding feed hit data.
pub const HIT_DATA_TABLE: &str = "hit_data";

/// Name of the single string-typed partition key (the report date).
pub const PARTITION_KEY: &str = "dt";

/// URI generator for the feed storage layout.
///
/// Trailing path separators on the caller-supplied bases are stripped at
/// construction, so generated URIs always contain exactly one `/` between
/// segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedLayout {
    report_base: String,
    lookup_base: String,
}

impl FeedLayout {
    /// Creates a layout rooted at the given report and lookup base URIs.
    #[must_use]
    pub fn new(report_base: &str, lookup_base: &str) -> Self {
        Self {
            report_base: report_base.trim_end_matches('/').to_string(),
            lookup_base: lookup_base.trim_end_matches('/').to_string(),
        }
    }

    /// Returns the URI of the column header sidecar for a report date.
    #[must_use]
    pub fn header_object(&self, date: &str) -> String {
        format!(
            "{}/rawtsv/column_headers/dt={date}/column_headers.tsv.gz",
            self.report_base
        )
    }

    /// Returns the storage location of the base `hit_data` table.
    #[must_use]
    pub fn hit_data_location(&self) -> String {
        format!("{}/rawtsv/hit_data/", self.report_base)
    }

    /// Returns the storage location of one date partition of `hit_data`.
    #[must_use]
    pub fn partition_location(&self, date: &str) -> String {
        format!("{}/rawtsv/hit_data/dt={date}/", self.report_base)
    }

    /// Returns the storage location of a lookup table.
    #[must_use]
    pub fn lookup_location(&self, name: &str) -> String {
        format!("{}/{name}/", self.lookup_base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_separators_are_stripped() {
        let layout = FeedLayout::new("s3://bucket/feed/", "s3://bucket/lookup//");
        assert_eq!(
            layout.hit_data_location(),
            "s3://bucket/feed/rawtsv/hit_data/"
        );
        assert_eq!(
            layout.lookup_location("browser"),
            "s3://bucket/lookup/browser/"
        );
    }

    #[test]
    fn header_object_substitutes_date() {
        let layout = FeedLayout::new("s3://bucket/feed", "s3://bucket/lookup");
        assert_eq!(
            layout.header_object("2024-03-01"),
            "s3://bucket/feed/rawtsv/column_headers/dt=2024-03-01/column_headers.tsv.gz"
        );
    }

    #[test]
    fn partition_location_is_dated_subprefix_of_table_location() {
        let layout = FeedLayout::new("s3://bucket/feed", "s3://bucket/lookup");
        let table = layout.hit_data_location();
        let partition = layout.partition_location("2024-01-02");

        assert!(partition.starts_with(&table));
        assert!(partition.contains("dt=2024-01-02"));
    }
}
