//! Header resolution for dated feed exports.
//!
//! Each report date ships a gzip-compressed, tab-delimited sidecar listing
//! that date's column names in feed order. The resolver fetches and decodes
//! it on every call; headers are read once per reconciliation cycle, so
//! there is intentionally no caching.

use std::io::Read;

use flate2::read::GzDecoder;

use feedcat_core::error::{Error, Result};
use feedcat_core::feed_paths::FeedLayout;
use feedcat_core::storage::StorageBackend;

/// Resolves the ordered column-name list for a report date.
#[derive(Debug, Clone)]
pub struct HeaderResolver<S> {
    storage: S,
}

impl<S: StorageBackend> HeaderResolver<S> {
    /// Creates a resolver reading sidecars through the given backend.
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Fetches and decodes the header sidecar for `date`.
    ///
    /// Returns column names in feed order; order determines column position
    /// in derived schemas.
    ///
    /// # Errors
    ///
    /// Returns `Error::ResourceNotFound` if no sidecar exists for the date,
    /// and `Error::CorruptData` if the object cannot be decompressed or is
    /// not valid UTF-8.
    pub async fn resolve(&self, layout: &FeedLayout, date: &str) -> Result<Vec<String>> {
        let uri = layout.header_object(date);
        let compressed = self.storage.get(&uri).await?;

        let mut text = String::new();
        GzDecoder::new(compressed.as_ref())
            .read_to_string(&mut text)
            .map_err(|e| Error::corrupt_data(format!("undecodable header object '{uri}': {e}")))?;

        Ok(text
            .trim_end()
            .split('\t')
            .map(ToString::to_string)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    use bytes::Bytes;
    use flate2::Compression;
    use flate2::write::GzEncoder;

    use feedcat_core::storage::MemoryBackend;

    fn gzip(text: &str) -> Bytes {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(text.as_bytes()).expect("compress");
        Bytes::from(encoder.finish().expect("finish"))
    }

    fn layout() -> FeedLayout {
        FeedLayout::new("s3://bucket/feed", "s3://bucket/lookup")
    }

    #[tokio::test]
    async fn resolves_tab_delimited_headers_in_order() {
        let storage = MemoryBackend::new();
        storage.insert(layout().header_object("2024-03-01"), gzip("a\tb\tc\n"));

        let resolver = HeaderResolver::new(storage);
        let headers = resolver
            .resolve(&layout(), "2024-03-01")
            .await
            .expect("resolve");

        assert_eq!(headers, ["a", "b", "c"]);
    }

    #[tokio::test]
    async fn trims_trailing_whitespace_only() {
        let storage = MemoryBackend::new();
        storage.insert(layout().header_object("2024-03-01"), gzip("a\tb \tc\r\n"));

        let resolver = HeaderResolver::new(storage);
        let headers = resolver
            .resolve(&layout(), "2024-03-01")
            .await
            .expect("resolve");

        // Interior whitespace is part of the column name.
        assert_eq!(headers, ["a", "b ", "c"]);
    }

    #[tokio::test]
    async fn missing_sidecar_is_not_found() {
        let resolver = HeaderResolver::new(MemoryBackend::new());

        let err = resolver.resolve(&layout(), "2024-03-01").await.unwrap_err();
        assert!(err.is_not_found(), "expected not-found, got: {err}");
    }

    #[tokio::test]
    async fn undecodable_sidecar_is_corrupt_data() {
        let storage = MemoryBackend::new();
        storage.insert(
            layout().header_object("2024-03-01"),
            Bytes::from_static(b"this is not gzip"),
        );

        let resolver = HeaderResolver::new(storage);
        let err = resolver.resolve(&layout(), "2024-03-01").await.unwrap_err();
        assert!(matches!(err, Error::CorruptData { .. }), "got: {err}");
    }

    #[tokio::test]
    async fn non_utf8_payload_is_corrupt_data() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&[0xff, 0xfe, 0xfd]).expect("compress");
        let bad = Bytes::from(encoder.finish().expect("finish"));

        let storage = MemoryBackend::new();
        storage.insert(layout().header_object("2024-03-01"), bad);

        let resolver = HeaderResolver::new(storage);
        let err = resolver.resolve(&layout(), "2024-03-01").await.unwrap_err();
        assert!(matches!(err, Error::CorruptData { .. }), "got: {err}");
    }
}
