//! HTTP router.

use crate::handlers;
use crate::middleware::correlation_id_layer;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use paypal_plus_core::environment::{CustomerNotifier, OrderRepository, TransactionRepository};
use tower_http::trace::TraceLayer;

/// Create the application router.
///
/// # Routes
///
/// - `POST /webhooks/paypal-plus` - Provider webhook receiver
/// - `GET /admin/payment-methods/third-party` - Admin dropdown options
/// - `GET /health` - Health check
///
/// # Example
///
/// ```rust,ignore
/// let state = AppState::new(env, payment_methods);
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
/// axum::serve(listener, app_router(state)).await?;
/// ```
pub fn app_router<T, O, N>(state: AppState<T, O, N>) -> Router
where
    T: TransactionRepository + 'static,
    O: OrderRepository + 'static,
    N: CustomerNotifier + 'static,
{
    Router::new()
        .route("/webhooks/paypal-plus", post(handlers::receive_webhook::<T, O, N>))
        .route(
            "/admin/payment-methods/third-party",
            get(handlers::third_party_payment_methods::<T, O, N>),
        )
        .route("/health", get(handlers::health_check))
        .layer(TraceLayer::new_for_http())
        .layer(correlation_id_layer())
        .with_state(state)
}
