//! # feedcat-catalog
//!
//! Idempotent catalog reconciliation for dated, columnar feed exports.
//!
//! This crate decides, for a given report date, which catalog objects are
//! missing — database, base table, lookup tables, date partition — derives
//! their schema from the date's header sidecar, and creates each exactly
//! once despite concurrent or repeated invocations:
//!
//! - **Header Resolver**: decodes the per-date column-header sidecar
//! - **Schema Builder**: maps column lists to storage descriptors
//! - **Catalog Seam**: client trait with not-found-aware existence probes
//! - **Reconciler**: the four create-if-absent steps in dependency order
//!
//! # Idempotent Convergence
//!
//! There are no transactions. Every step re-checks existence before acting
//! and treats an already-exists rejection from the catalog's create call as
//! a completed step, so re-running from any partial state converges to the
//! same end state.
//!
//! # Example
//!
//! ```rust,ignore
//! use feedcat_catalog::prelude::*;
//! use feedcat_core::prelude::*;
//!
//! let config = ReconcilerConfig::from_env()?;
//! let reconciler = Reconciler::new(catalog, ObjectStoreBackend::new(), config);
//! let report = reconciler.reconcile(&event).await?;
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![warn(clippy::pedantic)]

pub mod catalog;
pub mod descriptor;
pub mod headers;
pub mod lookup;
pub mod reconciler;

// Re-export main types at crate root
pub use catalog::{CatalogStore, MemoryCatalog};
pub use descriptor::{
    Column, DatabaseInput, PartitionInput, SerdeInfo, StorageDescriptor, TableInput,
    delimited_descriptor, lookup_descriptor,
};
pub use headers::HeaderResolver;
pub use lookup::LOOKUP_TABLE_NAMES;
pub use reconciler::{ReconcileReport, Reconciler};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::catalog::{CatalogStore, MemoryCatalog};
    pub use crate::descriptor::{delimited_descriptor, lookup_descriptor};
    pub use crate::headers::HeaderResolver;
    pub use crate::reconciler::{ReconcileReport, Reconciler};
}
