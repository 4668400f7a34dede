//! Model error types.

use thiserror::Error;

use crate::ReportId;

/// Error raised while building model values.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The same report id appears twice in a default registry.
    #[error("Report '{id}' is registered more than once")]
    DuplicateReportId { id: ReportId },

    /// A status label that is not one of the known lifecycle labels.
    #[error("Unknown report status: {label}")]
    UnknownStatus { label: String },
}

/// Result type alias for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
