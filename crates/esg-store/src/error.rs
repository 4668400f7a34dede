//! Store error types.
//!
//! Write operations return structured errors that provide user-friendly
//! messages and optional remediation hints. Read failures never reach the
//! caller; they are logged and collapsed to defaults.

use std::path::PathBuf;

use thiserror::Error;

/// Report store operation error.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The durable medium failed to read, write or delete an entry.
    #[error("Failed to {operation} storage entry: {key}")]
    Medium {
        operation: &'static str,
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// A stored payload could not be parsed as report data.
    #[error("Stored report data is invalid: {key}")]
    InvalidPayload {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Serialization error.
    #[error("Failed to serialize report data")]
    Serialization {
        #[source]
        source: serde_json::Error,
    },

    /// Backup file I/O error.
    #[error("Failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Atomic write failed (temp file couldn't be renamed).
    #[error("Failed to complete write operation")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A blocking task running a store operation panicked or was cancelled.
    #[error("Background storage task failed")]
    TaskFailed {
        #[source]
        source: tokio::task::JoinError,
    },
}

impl StoreError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Medium { operation, key, .. } => {
                format!("Could not {operation} the saved data for '{key}'.")
            }
            Self::InvalidPayload { key, .. } => {
                format!("The saved data for '{key}' is corrupted and could not be read.")
            }
            Self::Serialization { .. } => {
                "An error occurred while preparing the report data.".to_string()
            }
            Self::Io {
                operation, path, ..
            } => {
                format!("Could not {} the file at {}", operation, path.display())
            }
            Self::AtomicWriteFailed { target_path, .. } => {
                format!(
                    "Could not save the file to {}. Please check disk space and permissions.",
                    target_path.display()
                )
            }
            Self::TaskFailed { .. } => "The storage operation was interrupted.".to_string(),
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Medium { operation, .. } => {
                if *operation == "read" {
                    Some("Check that the data directory exists and is readable.".into())
                } else {
                    Some("Free up storage space or check write permissions.".into())
                }
            }
            Self::InvalidPayload { .. } => {
                Some("Reset the report or import it from a backup.".into())
            }
            Self::Serialization { .. } | Self::TaskFailed { .. } => None,
            Self::Io { operation, .. } => {
                if *operation == "read" {
                    Some("Check that the file exists and you have permission to read it.".into())
                } else {
                    Some("Check that you have permission to write to this location.".into())
                }
            }
            Self::AtomicWriteFailed { .. } => {
                Some("Free up disk space or try saving to a different location.".into())
            }
        }
    }
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
