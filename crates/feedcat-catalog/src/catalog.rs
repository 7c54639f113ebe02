//! Catalog client seam and existence predicates.
//!
//! [`CatalogStore`] is the boundary to the metadata catalog service. Point
//! lookups answer `ResourceNotFound` for missing objects; creates answer
//! `AlreadyExists` when they lose a race. The provided `*_exists` predicates
//! map **only** a genuine not-found to `false` — any other failure
//! (permission denied, quota, transient fault) propagates, so that real
//! errors are never mistaken for missing infrastructure.
//!
//! The production implementation wraps the deployment's catalog service
//! client and lives with the invocation harness; [`MemoryCatalog`] is the
//! in-process implementation used by tests.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use feedcat_core::error::{Error, Result};

use crate::descriptor::{DatabaseInput, PartitionInput, TableInput};

/// Client interface to the metadata catalog.
#[async_trait]
pub trait CatalogStore: Send + Sync + 'static {
    /// Point lookup of a database.
    ///
    /// Returns `Error::ResourceNotFound` if the database does not exist.
    async fn get_database(&self, name: &str) -> Result<DatabaseInput>;

    /// Creates a database.
    ///
    /// Returns `Error::AlreadyExists` if it already does; the catalog's
    /// create call is authoritative under concurrency.
    async fn create_database(&self, input: DatabaseInput) -> Result<()>;

    /// Point lookup of a table.
    ///
    /// Returns `Error::ResourceNotFound` if the table does not exist.
    async fn get_table(&self, database: &str, table: &str) -> Result<TableInput>;

    /// Creates a table in a database.
    ///
    /// Returns `Error::AlreadyExists` if the table already exists, and
    /// `Error::ResourceNotFound` if the database does not.
    async fn create_table(&self, database: &str, input: TableInput) -> Result<()>;

    /// Point lookup of a partition by value tuple.
    ///
    /// Returns `Error::ResourceNotFound` if the partition does not exist.
    async fn get_partition(
        &self,
        database: &str,
        table: &str,
        values: &[String],
    ) -> Result<PartitionInput>;

    /// Creates a partition of a table.
    ///
    /// Returns `Error::AlreadyExists` if the partition already exists, and
    /// `Error::ResourceNotFound` if the database or table does not.
    async fn create_partition(
        &self,
        database: &str,
        table: &str,
        input: PartitionInput,
    ) -> Result<()>;

    /// Returns whether a database exists.
    ///
    /// Only a genuine not-found maps to `false`; other errors propagate.
    async fn database_exists(&self, name: &str) -> Result<bool> {
        existence(self.get_database(name).await)
    }

    /// Returns whether a table exists.
    ///
    /// Only a genuine not-found maps to `false`; other errors propagate.
    async fn table_exists(&self, database: &str, table: &str) -> Result<bool> {
        existence(self.get_table(database, table).await)
    }

    /// Returns whether a partition exists.
    ///
    /// Only a genuine not-found maps to `false`; other errors propagate.
    async fn partition_exists(
        &self,
        database: &str,
        table: &str,
        values: &[String],
    ) -> Result<bool> {
        existence(self.get_partition(database, table, values).await)
    }
}

fn existence<T>(lookup: Result<T>) -> Result<bool> {
    match lookup {
        Ok(_) => Ok(true),
        Err(e) if e.is_not_found() => Ok(false),
        Err(e) => Err(e),
    }
}

#[derive(Debug, Clone)]
struct TableRecord {
    input: TableInput,
    partitions: HashMap<Vec<String>, PartitionInput>,
}

#[derive(Debug, Clone, Default)]
struct DatabaseRecord {
    tables: HashMap<String, TableRecord>,
}

/// In-memory catalog for testing.
///
/// Thread-safe via `RwLock`; cloning shares the underlying state so tests
/// can inspect the catalog while a reconciler holds its own handle. Create
/// semantics match the real service: creating an existing object answers
/// `AlreadyExists`, and tables/partitions require their referential
/// prerequisites.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    databases: Arc<RwLock<HashMap<String, DatabaseRecord>>>,
}

impl MemoryCatalog {
    /// Creates a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, HashMap<String, DatabaseRecord>>> {
        self.databases.read().map_err(|_| Error::Dependency {
            message: "memory catalog lock poisoned".into(),
            source: None,
        })
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<String, DatabaseRecord>>> {
        self.databases.write().map_err(|_| Error::Dependency {
            message: "memory catalog lock poisoned".into(),
            source: None,
        })
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalog {
    async fn get_database(&self, name: &str) -> Result<DatabaseInput> {
        let databases = self.read()?;
        if databases.contains_key(name) {
            Ok(DatabaseInput::new(name))
        } else {
            Err(Error::resource_not_found("database", name))
        }
    }

    async fn create_database(&self, input: DatabaseInput) -> Result<()> {
        let mut databases = self.write()?;
        if databases.contains_key(&input.name) {
            return Err(Error::already_exists("database", &input.name));
        }
        databases.insert(input.name, DatabaseRecord::default());
        Ok(())
    }

    async fn get_table(&self, database: &str, table: &str) -> Result<TableInput> {
        let databases = self.read()?;
        databases
            .get(database)
            .and_then(|db| db.tables.get(table))
            .map(|record| record.input.clone())
            .ok_or_else(|| Error::resource_not_found("table", format!("{database}.{table}")))
    }

    async fn create_table(&self, database: &str, input: TableInput) -> Result<()> {
        let mut databases = self.write()?;
        let db = databases
            .get_mut(database)
            .ok_or_else(|| Error::resource_not_found("database", database))?;
        if db.tables.contains_key(&input.name) {
            return Err(Error::already_exists(
                "table",
                format!("{database}.{}", input.name),
            ));
        }
        db.tables.insert(
            input.name.clone(),
            TableRecord {
                input,
                partitions: HashMap::new(),
            },
        );
        Ok(())
    }

    async fn get_partition(
        &self,
        database: &str,
        table: &str,
        values: &[String],
    ) -> Result<PartitionInput> {
        let databases = self.read()?;
        databases
            .get(database)
            .and_then(|db| db.tables.get(table))
            .and_then(|record| record.partitions.get(values))
            .cloned()
            .ok_or_else(|| {
                Error::resource_not_found(
                    "partition",
                    format!("{database}.{table} {}", values.join("/")),
                )
            })
    }

    async fn create_partition(
        &self,
        database: &str,
        table: &str,
        input: PartitionInput,
    ) -> Result<()> {
        let mut databases = self.write()?;
        let record = databases
            .get_mut(database)
            .ok_or_else(|| Error::resource_not_found("database", database))?
            .tables
            .get_mut(table)
            .ok_or_else(|| Error::resource_not_found("table", format!("{database}.{table}")))?;
        if record.partitions.contains_key(&input.values) {
            return Err(Error::already_exists(
                "partition",
                format!("{database}.{table} {}", input.values.join("/")),
            ));
        }
        record.partitions.insert(input.values.clone(), input);
        Ok(())
    }
}
