//! Admin configuration endpoints.

use crate::state::AppState;
use axum::{extract::State, Json};
use paypal_plus_core::environment::{CustomerNotifier, OrderRepository, TransactionRepository};
use paypal_plus_plugin::PaymentMethodOption;

/// Third-party payment methods for the admin dropdown.
///
/// # Endpoint
///
/// ```text
/// GET /admin/payment-methods/third-party
/// ```
///
/// # Response
///
/// ```json
/// [
///   { "value": "", "label": "--Please Select--" },
///   { "value": "checkmo", "label": "Check / Money order" }
/// ]
/// ```
#[allow(clippy::unused_async)]
pub async fn third_party_payment_methods<T, O, N>(
    State(state): State<AppState<T, O, N>>,
) -> Json<Vec<PaymentMethodOption>>
where
    T: TransactionRepository,
    O: OrderRepository,
    N: CustomerNotifier,
{
    Json(state.payment_methods.to_option_array())
}
