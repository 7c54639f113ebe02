//! Invocation event for a reconciliation run.
//!
//! The caller (typically a scheduled or notification-driven invocation
//! environment) supplies the feed and lookup base URIs and the report date
//! as a structured JSON event.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Input event for one reconciliation invocation.
///
/// The report date is an opaque partition value to this system; it is
/// substituted verbatim into paths and partition values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileEvent {
    /// Base object-storage URI where converted report data is stored.
    #[serde(rename = "reportBase")]
    pub report_base: String,

    /// Base object-storage URI of the latest lookup reference files.
    #[serde(rename = "lookupURI")]
    pub lookup_uri: String,

    /// Report date to reconcile, e.g. `2024-03-01`.
    #[serde(rename = "reportDate")]
    pub report_date: String,
}

impl ReconcileEvent {
    /// Parses an event from raw JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if the payload is not a well-formed
    /// event.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes)
            .map_err(|e| Error::InvalidInput(format!("malformed reconcile event: {e}")))
    }
}
