//! Catalog value objects and storage descriptor construction.
//!
//! The Schema Builder is a pure mapping from an ordered column-name list and
//! a storage location to a [`StorageDescriptor`]. Every feed column is
//! declared as the generic `string` type: the feed is delimited text with no
//! reliable type metadata, so typing precision is traded for schema
//! stability across feed revisions.
//!
//! Wire field names follow the catalog service's PascalCase convention so
//! the serialized shape matches what downstream consumers expect.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Input format identifier for row-oriented text data.
pub const TEXT_INPUT_FORMAT: &str = "org.apache.hadoop.mapred.TextInputFormat";

/// Output format identifier for row-oriented text data.
pub const TEXT_OUTPUT_FORMAT: &str = "org.apache.hadoop.hive.ql.io.HiveIgnoreKeyTextOutputFormat";

/// Serde identifier for CSV-style delimited text.
pub const CSV_SERDE: &str = "org.apache.hadoop.hive.serde2.OpenCSVSerde";

/// Table type of every table this system creates.
pub const EXTERNAL_TABLE: &str = "EXTERNAL_TABLE";

/// Generic column type assigned to every feed and lookup column.
pub const STRING_TYPE: &str = "string";

/// A named, typed column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Column {
    /// Column name, in feed order.
    pub name: String,
    /// Declared column type.
    #[serde(rename = "Type")]
    pub column_type: String,
}

impl Column {
    /// Creates a string-typed column.
    #[must_use]
    pub fn string(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column_type: STRING_TYPE.to_string(),
        }
    }
}

/// Serialization library and its parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SerdeInfo {
    /// Fully qualified serde class identifier.
    pub serialization_library: String,
    /// Serde parameters, e.g. the separator character.
    pub parameters: HashMap<String, String>,
}

/// Schema + format + location bundle attached to a table or partition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StorageDescriptor {
    /// Ordered column list.
    pub columns: Vec<Column>,
    /// Object storage URI prefix of the data.
    pub location: String,
    /// Input format identifier.
    pub input_format: String,
    /// Output format identifier.
    pub output_format: String,
    /// Serde identifier and parameters.
    pub serde_info: SerdeInfo,
    /// Bucket column list. Always empty, but must be present: some catalog
    /// consumers fail on descriptors that omit it.
    pub bucket_columns: Vec<String>,
    /// Free-form descriptor parameters. Always empty, but must be present
    /// for the same reason as `bucket_columns`.
    pub parameters: HashMap<String, String>,
}

/// Request body for creating a catalog database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DatabaseInput {
    /// Database name.
    pub name: String,
}

impl DatabaseInput {
    /// Creates a database input with no extra metadata.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Request body for creating a catalog table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TableInput {
    /// Table name.
    pub name: String,
    /// Schema, format, and location of the table data.
    pub storage_descriptor: StorageDescriptor,
    /// Partition key columns; empty for unpartitioned tables.
    pub partition_keys: Vec<Column>,
    /// Table type (always external).
    pub table_type: String,
    /// Free-form table parameters. Always empty, but required by some
    /// downstream catalog consumers.
    pub parameters: HashMap<String, String>,
}

/// Request body for creating a table partition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PartitionInput {
    /// Partition value tuple; here a single report date.
    pub values: Vec<String>,
    /// The partition's own schema, format, and location.
    pub storage_descriptor: StorageDescriptor,
    /// Free-form partition parameters; present and empty.
    pub parameters: HashMap<String, String>,
}

/// Builds a tab-delimited text descriptor for the given columns.
///
/// Every column is declared `string`; order is preserved and determines
/// column position.
#[must_use]
pub fn delimited_descriptor(columns: &[String], location: impl Into<String>) -> StorageDescriptor {
    let columns = columns.iter().map(Column::string).collect();
    descriptor_with(columns, location.into())
}

/// Builds the fixed two-column (`id`, `value`) descriptor used for lookup
/// tables.
#[must_use]
pub fn lookup_descriptor(location: impl Into<String>) -> StorageDescriptor {
    let columns = vec![Column::string("id"), Column::string("value")];
    descriptor_with(columns, location.into())
}

fn descriptor_with(columns: Vec<Column>, location: String) -> StorageDescriptor {
    StorageDescriptor {
        columns,
        location,
        input_format: TEXT_INPUT_FORMAT.to_string(),
        output_format: TEXT_OUTPUT_FORMAT.to_string(),
        serde_info: SerdeInfo {
            serialization_library: CSV_SERDE.to_string(),
            parameters: HashMap::from([("separatorChar".to_string(), "\t".to_string())]),
        },
        bucket_columns: Vec::new(),
        parameters: HashMap::new(),
    }
}
