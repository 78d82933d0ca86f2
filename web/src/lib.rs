//! Axum HTTP shell for the PayPal Plus webhook dispatcher.
//!
//! The plugin crate holds the functional core; this crate parses requests,
//! runs one [`WebhookProcessor`](paypal_plus_plugin::WebhookProcessor) per
//! delivery and maps the outcome to HTTP.
//!
//! # Request Flow
//!
//! 1. **Correlation layer** tags the request with an `X-Correlation-ID`
//! 2. **Extract** the webhook JSON
//! 3. **Process** it against the host environment
//! 4. **Count** the outcome in `paypal_plus_webhooks_total`
//! 5. **Map** the outcome or [`WebhookError`](paypal_plus_plugin::WebhookError) to a response
//!
//! # Example
//!
//! ```ignore
//! use paypal_plus_web::{app_router, AppState};
//!
//! let state = AppState::new(env, payment_methods);
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, app_router(state)).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use config::{ConfigError, ServerConfig};
pub use error::AppError;
pub use extractors::CorrelationId;
pub use middleware::{correlation_id_layer, CORRELATION_ID_HEADER};
pub use router::app_router;
pub use state::AppState;

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
