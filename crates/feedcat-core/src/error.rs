//! Error types and result aliases for feedcat.
//!
//! The taxonomy distinguishes expected negative outcomes (`ResourceNotFound`,
//! `AlreadyExists`) from real failures. Existence probes and create races
//! branch on the former; everything else propagates to the caller unmodified.

use std::fmt;

/// The result type used throughout feedcat.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during feed reconciliation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested resource does not exist.
    ///
    /// This is the expected negative answer from an existence probe, not a
    /// failure. Callers use [`Error::is_not_found`] to branch on it.
    #[error("not found: {resource_type} {id}")]
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: &'static str,
        /// The identifier that was looked up.
        id: String,
    },

    /// A create call collided with an object that already exists.
    ///
    /// Indicates a concurrent reconciler won the create race. Treated as a
    /// benign no-op by the reconciler, never surfaced to the caller.
    #[error("already exists: {resource_type} {id}")]
    AlreadyExists {
        /// The type of resource that already exists.
        resource_type: &'static str,
        /// The identifier that collided.
        id: String,
    },

    /// Data was present but could not be decoded.
    ///
    /// Fatal for the current reconciliation attempt.
    #[error("corrupt data: {message}")]
    CorruptData {
        /// Description of the decode failure.
        message: String,
    },

    /// A catalog or storage dependency failed for a reason other than
    /// not-found (permission, quota, transient fault).
    ///
    /// Never coerced into a negative existence answer; propagates unmodified.
    #[error("dependency error: {message}")]
    Dependency {
        /// Description of the dependency failure.
        message: String,
        /// The underlying cause, if any.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Process configuration was missing or invalid.
    #[error("configuration error: {message}")]
    Configuration {
        /// Description of the configuration problem.
        message: String,
    },

    /// Invalid invocation input was provided.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Creates a new resource not found error.
    #[must_use]
    pub fn resource_not_found(resource_type: &'static str, id: impl fmt::Display) -> Self {
        Self::ResourceNotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Creates a new already-exists error.
    #[must_use]
    pub fn already_exists(resource_type: &'static str, id: impl fmt::Display) -> Self {
        Self::AlreadyExists {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Creates a new corrupt data error.
    #[must_use]
    pub fn corrupt_data(message: impl Into<String>) -> Self {
        Self::CorruptData {
            message: message.into(),
        }
    }

    /// Creates a new dependency error with the given message.
    #[must_use]
    pub fn dependency(message: impl Into<String>) -> Self {
        Self::Dependency {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new dependency error with a source cause.
    #[must_use]
    pub fn dependency_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Dependency {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Returns true if this is the expected negative answer from an
    /// existence probe.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ResourceNotFound { .. })
    }

    /// Returns true if this is an already-exists collision from a create
    /// race.
    #[must_use]
    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_distinguishable_from_dependency_failure() {
        let not_found = Error::resource_not_found("table", "analytics.hit_data");
        assert!(not_found.is_not_found());
        assert!(!not_found.is_already_exists());

        let denied = Error::dependency("access denied for GetTable");
        assert!(!denied.is_not_found());
        assert!(!denied.is_already_exists());
    }

    #[test]
    fn already_exists_carries_identity() {
        let err = Error::already_exists("database", "analytics");
        assert!(err.is_already_exists());
        assert_eq!(err.to_string(), "already exists: database analytics");
    }

    #[test]
    fn dependency_error_preserves_source() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = Error::dependency_with_source("storage get failed", io);
        let source = std::error::Error::source(&err).expect("source should be set");
        assert!(source.to_string().contains("denied"));
    }
}
