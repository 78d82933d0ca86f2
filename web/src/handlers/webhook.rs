//! Webhook receiver.

use crate::WebResult;
use crate::extractors::CorrelationId;
use crate::state::AppState;
use axum::{extract::State, Json};
use paypal_plus_core::environment::{CustomerNotifier, OrderRepository, TransactionRepository};
use paypal_plus_plugin::{Outcome, WebhookEvent, WebhookProcessor};
use serde::{Deserialize, Serialize};

/// Metric counting webhook deliveries by outcome.
pub const WEBHOOKS_TOTAL: &str = "paypal_plus_webhooks_total";

/// Response to an accepted delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WebhookResponse {
    /// A handler ran against an order.
    Processed {
        /// Handler name, e.g. `paymentSaleCompleted`
        handler: String,
        /// Entity id of the updated order
        order_id: String,
    },
    /// The event type is not handled.
    Ignored,
}

impl From<Outcome> for WebhookResponse {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Processed {
                handler, order_id, ..
            } => Self::Processed {
                handler,
                order_id: order_id.to_string(),
            },
            Outcome::Ignored => Self::Ignored,
        }
    }
}

/// Apply a provider webhook to the host.
///
/// # Endpoint
///
/// ```text
/// POST /webhooks/paypal-plus
/// Content-Type: application/json
///
/// {
///   "event_type": "PAYMENT.SALE.COMPLETED",
///   "summary": "Payment completed for EUR 49.99 EUR",
///   "resource": {
///     "id": "80021663DE681814L",
///     "parent_payment": "PAY-1B56960729604235TKQQIYVY",
///     "amount": { "total": "49.99", "currency": "EUR" }
///   }
/// }
/// ```
///
/// # Response
///
/// ```json
/// { "status": "processed", "handler": "paymentSaleCompleted", "order_id": "100" }
/// ```
///
/// Unhandled event types answer `{ "status": "ignored" }` with 200 so the
/// provider stops redelivering them.
///
/// # Errors
///
/// - 404 if no order is linked to the resource
/// - 422 if the resource or a required field is missing
/// - 409 if the host rejects the change
/// - 500 if storage or mail fails
pub async fn receive_webhook<T, O, N>(
    State(state): State<AppState<T, O, N>>,
    CorrelationId(correlation_id): CorrelationId,
    Json(event): Json<WebhookEvent>,
) -> WebResult<Json<WebhookResponse>>
where
    T: TransactionRepository + 'static,
    O: OrderRepository + 'static,
    N: CustomerNotifier + 'static,
{
    tracing::debug!(
        %correlation_id,
        event_id = ?event.id,
        event_type = ?event.event_type,
        "webhook received"
    );

    let mut processor = WebhookProcessor::new(&state.env);
    let result = processor.process_webhook_request(&event).await;

    let outcome = match &result {
        Ok(outcome) => outcome.label(),
        Err(_) => "failed",
    };
    metrics::counter!(WEBHOOKS_TOTAL, "outcome" => outcome).increment(1);

    Ok(Json(result?.into()))
}
