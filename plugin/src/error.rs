//! Error types for webhook processing.

use paypal_plus_core::HostError;
use thiserror::Error;

/// Result type alias for webhook processing.
pub type Result<T> = std::result::Result<T, WebhookError>;

/// Why a webhook could not be applied.
///
/// Unsupported event types are not errors; the processor reports them as
/// [`Outcome::Ignored`](crate::webhook::Outcome::Ignored).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WebhookError {
    /// The event carried no resource, so no transaction can be looked up.
    #[error("Event resource not found.")]
    MissingResource,

    /// The resource lacks a field the handler needs.
    #[error("Event resource is missing `{0}`.")]
    MissingField(&'static str),

    /// No order is linked to the resource's transaction id.
    #[error("Order not found.")]
    OrderNotFound,

    /// The host rejected an operation or failed to perform it.
    #[error(transparent)]
    Host(#[from] HostError),
}

impl WebhookError {
    /// Returns `true` if the payload itself is at fault, so redelivering
    /// the same event cannot succeed.
    ///
    /// # Examples
    ///
    /// ```
    /// # use paypal_plus_plugin::WebhookError;
    /// assert!(WebhookError::MissingResource.is_payload_error());
    /// assert!(!WebhookError::OrderNotFound.is_payload_error());
    /// ```
    #[must_use]
    pub const fn is_payload_error(&self) -> bool {
        matches!(self, Self::MissingResource | Self::MissingField(_))
    }
}
