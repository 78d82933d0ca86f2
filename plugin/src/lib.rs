//! PayPal Plus gateway plugin.
//!
//! Applies PayPal Plus webhook notifications to host orders and provides the
//! admin option source for the third-party payment method setting.
//!
//! # Architecture
//!
//! 1. **`WebhookEvent`** arrives from the provider (deserialised JSON)
//! 2. **`WebhookProcessor`** checks the allow-list and resolves the order once
//! 3. **`WebhookReducer`** applies the matching handler and describes effects
//! 4. **Effects** (save, email, save) run against the injected host
//!
//! # Example Usage
//!
//! ```no_run
//! use paypal_plus_plugin::webhook::{Outcome, Resource, WebhookEnvironment, WebhookEvent, WebhookProcessor};
//! use paypal_plus_plugin::PluginConfig;
//! use paypal_plus_core::environment::{Clock, SystemClock};
//! use paypal_plus_testing::mocks::InMemoryHost;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let host = InMemoryHost::new();
//! let clock: Arc<dyn Clock> = Arc::new(SystemClock);
//! let env = WebhookEnvironment::new(
//!     host.transactions.clone(),
//!     host.orders.clone(),
//!     host.notifier.clone(),
//!     clock,
//!     PluginConfig::default(),
//! );
//!
//! let event = WebhookEvent::new("RISK.DISPUTE.CREATED", Resource::new("80021663DE681814L"))
//!     .with_summary("A new dispute opened with Case # PP-000-042-635-094");
//!
//! let mut processor = WebhookProcessor::new(&env);
//! if let Outcome::Processed { handler, order_id, .. } = processor.process_webhook_request(&event).await? {
//!     println!("{handler} updated order {order_id}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod config_source;
pub mod error;
pub mod webhook;

// Re-export commonly used types
pub use config::{PluginConfig, METHOD_CODE};
pub use config_source::{PaymentMethodOption, ThirdPartyPaymentMethods};
pub use error::{Result, WebhookError};
pub use webhook::{
    event_type_to_handler, EventType, Outcome, WebhookEnvironment, WebhookEvent, WebhookProcessor,
};
