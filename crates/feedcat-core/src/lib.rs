//! # feedcat-core
//!
//! Core abstractions for the feedcat catalog reconciler.
//!
//! This crate provides the foundational types used by the reconciliation
//! engine:
//!
//! - **Error Types**: Shared error taxonomy and result alias
//! - **Storage**: Read-only object storage access for feed sidecar files
//! - **Feed Layout**: Canonical URI derivation for feed and lookup data
//! - **Event & Config**: Invocation input and environment configuration
//! - **Observability**: Logging bootstrap and span constructors
//!
//! The reconciliation logic itself lives in `feedcat-catalog`; this crate
//! defines the contracts it is built on.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod event;
pub mod feed_paths;
pub mod observability;
pub mod storage;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::ReconcilerConfig;
    pub use crate::error::{Error, Result};
    pub use crate::event::ReconcileEvent;
    pub use crate::feed_paths::{FeedLayout, HIT_DATA_TABLE, PARTITION_KEY};
    pub use crate::storage::{MemoryBackend, ObjectStoreBackend, StorageBackend};
}

// Re-export key types at crate root for ergonomics
pub use config::ReconcilerConfig;
pub use error::{Error, Result};
pub use event::ReconcileEvent;
pub use feed_paths::{FeedLayout, HIT_DATA_TABLE, PARTITION_KEY};
pub use observability::{LogFormat, init_logging, reconcile_span};
pub use storage::{MemoryBackend, ObjectStoreBackend, StorageBackend};
