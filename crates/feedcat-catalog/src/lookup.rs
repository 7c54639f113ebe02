//! Fixed registry of feed lookup tables.
//!
//! Each report export ships a set of small reference datasets joined against
//! the main dataset downstream. Every one of them is an unpartitioned table
//! with the fixed two-column (`id`, `value`) schema, stored at
//! `{lookup_base}/{name}/`.

/// Names of all lookup reference datasets, one table each.
pub const LOOKUP_TABLE_NAMES: [&str; 12] = [
    "browser",
    "browser_type",
    "color_depth",
    "connection_type",
    "country",
    "javascript_version",
    "languages",
    "operating_systems",
    "plugins",
    "resolution",
    "referrer_type",
    "search_engines",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_has_no_duplicates() {
        let mut names = LOOKUP_TABLE_NAMES.to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), LOOKUP_TABLE_NAMES.len());
    }
}
