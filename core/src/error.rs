//! Error types for host operations.

use thiserror::Error;

/// Result type alias for host operations.
pub type Result<T> = std::result::Result<T, HostError>;

/// Failures reported by the host platform.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HostError {
    /// Requested entity does not exist.
    #[error("{entity} {id} not found")]
    NotFound {
        /// Entity kind (order, transaction, ...)
        entity: &'static str,
        /// Identifier that was looked up
        id: String,
    },

    /// The order state does not allow the requested operation.
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Storage backend failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Customer email could not be sent.
    #[error("Failed to send email: {0}")]
    Notification(String),
}

impl HostError {
    /// Returns `true` if the failure came from infrastructure rather than
    /// from order state.
    ///
    /// # Examples
    ///
    /// ```
    /// # use paypal_plus_core::HostError;
    /// assert!(HostError::Storage("down".into()).is_infrastructure());
    /// assert!(!HostError::InvalidOperation("closed".into()).is_infrastructure());
    /// ```
    #[must_use]
    pub const fn is_infrastructure(&self) -> bool {
        matches!(self, Self::Storage(_) | Self::Notification(_))
    }
}
