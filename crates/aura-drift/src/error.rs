//! Error types for the drift lifecycle store and its actions.
//!
//! [`DriftError`] covers every failure an action can surface to its caller.
//! Benign no-ops (restoring an event that is already resolved) are not
//! errors; they are reported through outcome enums instead.

use aura_types::DriftEventId;

/// Errors that can occur in the drift store, service, or export layer.
#[derive(Debug, thiserror::Error)]
pub enum DriftError {
    /// The referenced event does not exist.
    #[error("drift event not found: {id}")]
    NotFound {
        /// The unknown identifier.
        id: DriftEventId,
    },

    /// Two records were supplied with the same identifier.
    #[error("duplicate drift event: {id}")]
    DuplicateEvent {
        /// The repeated identifier.
        id: DriftEventId,
    },

    /// User input was rejected before any mutation.
    #[error("invalid {field}: {reason}")]
    Validation {
        /// The offending input field.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },

    /// A report could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An export sink failed to deliver a document.
    #[error("export failed: {source}")]
    Export {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}

impl DriftError {
    /// Shorthand for [`DriftError::NotFound`].
    pub fn not_found(id: &DriftEventId) -> Self {
        Self::NotFound { id: id.clone() }
    }
}
