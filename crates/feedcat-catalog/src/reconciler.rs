//! Idempotent catalog reconciliation for dated feed exports.
//!
//! One invocation runs four create-if-absent steps in dependency order:
//! database, base table, lookup tables, date partition. Each step is gated
//! by its own existence check and is independently safe to re-run, so a
//! partially completed invocation converges on re-invocation from any
//! state.
//!
//! # Concurrency
//!
//! Invocations may race against the same catalog. There is no in-process or
//! distributed locking: safety relies on the catalog's create call being
//! authoritative. A reconciler that loses a check-then-act race receives
//! `AlreadyExists` from the create and treats it as a completed step.
//! Every other failure propagates unmodified — retry policy belongs to the
//! caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::Instrument;

use feedcat_core::config::ReconcilerConfig;
use feedcat_core::error::Result;
use feedcat_core::event::ReconcileEvent;
use feedcat_core::feed_paths::{FeedLayout, HIT_DATA_TABLE, PARTITION_KEY};
use feedcat_core::observability::reconcile_span;
use feedcat_core::storage::StorageBackend;

use crate::catalog::CatalogStore;
use crate::descriptor::{
    Column, DatabaseInput, EXTERNAL_TABLE, PartitionInput, TableInput, delimited_descriptor,
    lookup_descriptor,
};
use crate::headers::HeaderResolver;
use crate::lookup::LOOKUP_TABLE_NAMES;

/// Summary of what one reconciliation invocation created.
///
/// A fully converged catalog yields a report with nothing created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcileReport {
    /// Report date that was reconciled.
    pub report_date: String,

    /// Whether this invocation created the database.
    pub database_created: bool,

    /// Whether this invocation created the base table.
    pub table_created: bool,

    /// Lookup tables created by this invocation, in creation order.
    pub lookup_tables_created: Vec<String>,

    /// Whether this invocation created the date partition.
    pub partition_created: bool,

    /// When the invocation completed.
    pub completed_at: DateTime<Utc>,
}

impl ReconcileReport {
    /// Returns true if this invocation found the catalog already converged.
    #[must_use]
    pub fn converged(&self) -> bool {
        !self.database_created
            && !self.table_created
            && self.lookup_tables_created.is_empty()
            && !self.partition_created
    }
}

/// Orchestrates the four idempotent create-if-absent steps.
#[derive(Debug, Clone)]
pub struct Reconciler<C, S> {
    catalog: C,
    headers: HeaderResolver<S>,
    config: ReconcilerConfig,
}

impl<C: CatalogStore, S: StorageBackend> Reconciler<C, S> {
    /// Creates a reconciler over the given catalog and storage.
    #[must_use]
    pub fn new(catalog: C, storage: S, config: ReconcilerConfig) -> Self {
        Self {
            catalog,
            headers: HeaderResolver::new(storage),
            config,
        }
    }

    /// Reconciles the catalog for one report date.
    ///
    /// Steps run sequentially: database, base table, lookup tables, date
    /// partition. The first real failure aborts the remaining steps;
    /// re-invoking is always safe.
    ///
    /// # Errors
    ///
    /// Propagates header decode failures and any catalog or storage failure
    /// other than a benign already-exists race.
    pub async fn reconcile(&self, event: &ReconcileEvent) -> Result<ReconcileReport> {
        let span = reconcile_span("reconcile", &self.config.database_name, &event.report_date);
        self.reconcile_inner(event).instrument(span).await
    }

    async fn reconcile_inner(&self, event: &ReconcileEvent) -> Result<ReconcileReport> {
        let layout = FeedLayout::new(&event.report_base, &event.lookup_uri);
        let date = event.report_date.as_str();

        tracing::info!(
            region = %self.config.region,
            report_base = %event.report_base,
            lookup_uri = %event.lookup_uri,
            "starting reconciliation"
        );

        let database_created = self.ensure_database().await?;
        let table_created = self.ensure_base_table(&layout, date).await?;
        let lookup_tables_created = self.ensure_lookup_tables(&layout).await?;
        let partition_created = self.ensure_partition(&layout, date).await?;

        let report = ReconcileReport {
            report_date: date.to_string(),
            database_created,
            table_created,
            lookup_tables_created,
            partition_created,
            completed_at: Utc::now(),
        };

        tracing::info!(
            database_created = report.database_created,
            table_created = report.table_created,
            lookup_tables_created = report.lookup_tables_created.len(),
            partition_created = report.partition_created,
            "reconciliation complete"
        );

        Ok(report)
    }

    /// Step 1: create the database if absent, with no extra metadata.
    async fn ensure_database(&self) -> Result<bool> {
        let name = &self.config.database_name;
        if self.catalog.database_exists(name).await? {
            return Ok(false);
        }

        tracing::info!(database = %name, "creating catalog database");
        match self
            .catalog
            .create_database(DatabaseInput::new(name))
            .await
        {
            Ok(()) => Ok(true),
            Err(e) if e.is_already_exists() => {
                tracing::debug!(database = %name, "database created concurrently");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Step 2: create the base table if absent, deriving its schema from the
    /// headers of the date under reconciliation.
    ///
    /// The table schema stays pinned to whichever date's headers were used
    /// at first creation; later dates do not alter it.
    async fn ensure_base_table(&self, layout: &FeedLayout, date: &str) -> Result<bool> {
        let database = &self.config.database_name;
        if self.catalog.table_exists(database, HIT_DATA_TABLE).await? {
            return Ok(false);
        }

        tracing::info!(
            database = %database,
            table = HIT_DATA_TABLE,
            report_date = %date,
            "creating base table from dated headers"
        );
        let columns = self.headers.resolve(layout, date).await?;
        let input = TableInput {
            name: HIT_DATA_TABLE.to_string(),
            storage_descriptor: delimited_descriptor(&columns, layout.hit_data_location()),
            partition_keys: vec![Column::string(PARTITION_KEY)],
            table_type: EXTERNAL_TABLE.to_string(),
            parameters: std::collections::HashMap::new(),
        };

        match self.catalog.create_table(database, input).await {
            Ok(()) => Ok(true),
            Err(e) if e.is_already_exists() => {
                tracing::debug!(table = HIT_DATA_TABLE, "table created concurrently");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Step 3: create every missing lookup table, unpartitioned, with the
    /// fixed two-column schema.
    async fn ensure_lookup_tables(&self, layout: &FeedLayout) -> Result<Vec<String>> {
        let database = &self.config.database_name;
        let mut created = Vec::new();

        for name in LOOKUP_TABLE_NAMES {
            if self.catalog.table_exists(database, name).await? {
                continue;
            }

            tracing::info!(database = %database, table = %name, "creating lookup table");
            let input = TableInput {
                name: name.to_string(),
                storage_descriptor: lookup_descriptor(layout.lookup_location(name)),
                partition_keys: Vec::new(),
                table_type: EXTERNAL_TABLE.to_string(),
                parameters: std::collections::HashMap::new(),
            };

            match self.catalog.create_table(database, input).await {
                Ok(()) => created.push(name.to_string()),
                Err(e) if e.is_already_exists() => {
                    tracing::debug!(table = %name, "lookup table created concurrently");
                }
                Err(e) => return Err(e),
            }
        }

        Ok(created)
    }

    /// Step 4: create the date partition if absent.
    ///
    /// Headers are resolved again, independently of step 2: this invocation
    /// may be adding a partition to a table created on a prior run from a
    /// different date's headers.
    async fn ensure_partition(&self, layout: &FeedLayout, date: &str) -> Result<bool> {
        let database = &self.config.database_name;
        let values = vec![date.to_string()];
        if self
            .catalog
            .partition_exists(database, HIT_DATA_TABLE, &values)
            .await?
        {
            return Ok(false);
        }

        tracing::info!(
            database = %database,
            table = HIT_DATA_TABLE,
            report_date = %date,
            "creating date partition"
        );
        let columns = self.headers.resolve(layout, date).await?;
        let input = PartitionInput {
            values,
            storage_descriptor: delimited_descriptor(&columns, layout.partition_location(date)),
            parameters: std::collections::HashMap::new(),
        };

        match self
            .catalog
            .create_partition(database, HIT_DATA_TABLE, input)
            .await
        {
            Ok(()) => Ok(true),
            Err(e) if e.is_already_exists() => {
                tracing::debug!(report_date = %date, "partition created concurrently");
                Ok(false)
            }
            Err(e) => Err(e),
        }
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

    use crate::catalog::MemoryCatalog;

    fn gzip(text: &str) -> Bytes {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(text.as_bytes()).expect("compress");
        Bytes::from(encoder.finish().expect("finish"))
    }

    fn config() -> ReconcilerConfig {
        ReconcilerConfig {
            database_name: "analytics".to_string(),
            region: "us-east-1".to_string(),
        }
    }

    fn event(date: &str) -> ReconcileEvent {
        ReconcileEvent {
            report_base: "s3://bucket/feed".to_string(),
            lookup_uri: "s3://bucket/lookup".to_string(),
            report_date: date.to_string(),
        }
    }

    fn seed_headers(storage: &MemoryBackend, date: &str, line: &str) {
        let layout = FeedLayout::new("s3://bucket/feed", "s3://bucket/lookup");
        storage.insert(layout.header_object(date), gzip(line));
    }

    #[tokio::test]
    async fn cold_start_creates_all_objects_in_one_pass() {
        let storage = MemoryBackend::new();
        seed_headers(&storage, "2024-03-01", "a\tb\tc\n");
        let catalog = MemoryCatalog::new();
        let reconciler = Reconciler::new(catalog.clone(), storage, config());

        let report = reconciler.reconcile(&event("2024-03-01")).await.unwrap();

        assert!(report.database_created);
        assert!(report.table_created);
        assert_eq!(report.lookup_tables_created.len(), LOOKUP_TABLE_NAMES.len());
        assert!(report.partition_created);
        assert!(!report.converged());
    }

    #[tokio::test]
    async fn table_schema_stays_pinned_across_dates() {
        let storage = MemoryBackend::new();
        seed_headers(&storage, "2024-03-01", "a\tb\n");
        seed_headers(&storage, "2024-03-02", "a\tb\tc\n");
        let catalog = MemoryCatalog::new();
        let reconciler = Reconciler::new(catalog.clone(), storage, config());

        reconciler.reconcile(&event("2024-03-01")).await.unwrap();
        reconciler.reconcile(&event("2024-03-02")).await.unwrap();

        // The table keeps the first date's two columns.
        let table = catalog.get_table("analytics", "hit_data").await.unwrap();
        assert_eq!(table.storage_descriptor.columns.len(), 2);

        // The second date's partition carries its own three-column schema.
        let partition = catalog
            .get_partition("analytics", "hit_data", &["2024-03-02".to_string()])
            .await
            .unwrap();
        assert_eq!(partition.storage_descriptor.columns.len(), 3);
    }

    #[tokio::test]
    async fn missing_headers_abort_before_table_creation() {
        let catalog = MemoryCatalog::new();
        let reconciler = Reconciler::new(catalog.clone(), MemoryBackend::new(), config());

        let err = reconciler.reconcile(&event("2024-03-01")).await.unwrap_err();
        assert!(err.is_not_found());

        // Step 1 completed; step 2 aborted the rest.
        assert!(catalog.database_exists("analytics").await.unwrap());
        assert!(!catalog.table_exists("analytics", "hit_data").await.unwrap());
        assert!(!catalog.table_exists("analytics", "browser").await.unwrap());
    }
}
