//! Process configuration for the reconciler.
//!
//! The catalog database name and deployment region come from the execution
//! environment rather than the invocation event. They are read once into an
//! explicit config value passed to the reconciler at construction; nothing
//! reads the environment after startup.

use crate::error::{Error, Result};

const ENV_DATABASE_NAME: &str = "DB_NAME";
const ENV_REGION: &str = "AWS_REGION";

/// Environment-sourced configuration for a reconciler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcilerConfig {
    /// Name of the catalog database all objects are created under.
    pub database_name: String,
    /// Deployment region the catalog client must target.
    pub region: String,
}

impl ReconcilerConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when a required variable is missing or
    /// empty.
    pub fn from_env() -> Result<Self> {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Loads configuration with a custom environment source.
    ///
    /// This entry point is test-friendly and accepts a key lookup function.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when a required variable is missing or
    /// empty.
    pub fn from_env_with<F>(get_env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            database_name: required_env(&get_env, ENV_DATABASE_NAME)?,
            region: required_env(&get_env, ENV_REGION)?,
        })
    }
}

fn required_env<F>(get_env: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    match get_env(key) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        Some(_) => Err(Error::configuration(format!("{key} must not be empty"))),
        None => Err(Error::configuration(format!("missing {key}"))),
    }
}
