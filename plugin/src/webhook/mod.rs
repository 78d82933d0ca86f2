//! Webhook event dispatcher.
//!
//! ```text
//! WebhookEvent ──► WebhookProcessor ──► TransactionRepository ──► OrderRepository
//!                        │                    (txn_id → order, memoised)
//!                        ▼
//!                  WebhookReducer  (mutates Order, returns Effects)
//!                        │
//!                        ▼
//!            Effect executor: save ─► email ─► save
//! ```
//!
//! One processor handles one webhook. It resolves the order once, hands it
//! to the reducer and executes the returned effects in order. Events outside
//! the allow-list never reach the host.

mod event;
mod processor;
mod reducer;

pub use event::{
    event_type_to_handler, Amount, EventType, Resource, UnsupportedEventType, WebhookEvent,
};
pub use processor::{Outcome, WebhookProcessor};
pub use reducer::WebhookReducer;

use crate::config::PluginConfig;
use paypal_plus_core::environment::{
    Clock, CustomerNotifier, OrderRepository, TransactionRepository,
};
use std::sync::Arc;

/// Host collaborators the webhook flow needs.
///
/// # Type Parameters
///
/// - `T`: Transaction table
/// - `O`: Order repository
/// - `N`: Customer notifier
#[derive(Clone)]
pub struct WebhookEnvironment<T, O, N>
where
    T: TransactionRepository,
    O: OrderRepository,
    N: CustomerNotifier,
{
    /// Transaction table (`txn_id` → order id).
    pub transactions: T,

    /// Order storage.
    pub orders: O,

    /// Customer email.
    pub notifier: N,

    /// Clock for history timestamps.
    pub clock: Arc<dyn Clock>,

    /// Plugin configuration.
    pub config: PluginConfig,
}

impl<T, O, N> WebhookEnvironment<T, O, N>
where
    T: TransactionRepository,
    O: OrderRepository,
    N: CustomerNotifier,
{
    /// Create a new webhook environment.
    #[must_use]
    pub fn new(
        transactions: T,
        orders: O,
        notifier: N,
        clock: Arc<dyn Clock>,
        config: PluginConfig,
    ) -> Self {
        Self {
            transactions,
            orders,
            notifier,
            clock,
            config,
        }
    }
}
