//! HTTP request handlers.

pub mod health;
pub mod payment_methods;
pub mod webhook;

pub use health::health_check;
pub use payment_methods::third_party_payment_methods;
pub use webhook::{receive_webhook, WebhookResponse, WEBHOOKS_TOTAL};
