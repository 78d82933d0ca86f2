//! Application state for Axum handlers.

use paypal_plus_core::environment::{CustomerNotifier, OrderRepository, TransactionRepository};
use paypal_plus_plugin::{ThirdPartyPaymentMethods, WebhookEnvironment};
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
///
/// Handlers build a fresh [`WebhookProcessor`](paypal_plus_plugin::WebhookProcessor)
/// per request from the shared environment.
///
/// # Type Parameters
///
/// - `T`: Transaction table
/// - `O`: Order repository
/// - `N`: Customer notifier
pub struct AppState<T, O, N>
where
    T: TransactionRepository,
    O: OrderRepository,
    N: CustomerNotifier,
{
    /// Host collaborators for webhook processing.
    pub env: Arc<WebhookEnvironment<T, O, N>>,

    /// Admin dropdown source.
    pub payment_methods: Arc<ThirdPartyPaymentMethods>,
}

impl<T, O, N> AppState<T, O, N>
where
    T: TransactionRepository,
    O: OrderRepository,
    N: CustomerNotifier,
{
    /// Create a new application state.
    #[must_use]
    pub fn new(env: WebhookEnvironment<T, O, N>, payment_methods: ThirdPartyPaymentMethods) -> Self {
        Self {
            env: Arc::new(env),
            payment_methods: Arc::new(payment_methods),
        }
    }
}

// Manual impl: the host types themselves need not be `Clone`.
impl<T, O, N> Clone for AppState<T, O, N>
where
    T: TransactionRepository,
    O: OrderRepository,
    N: CustomerNotifier,
{
    fn clone(&self) -> Self {
        Self {
            env: Arc::clone(&self.env),
            payment_methods: Arc::clone(&self.payment_methods),
        }
    }
}
