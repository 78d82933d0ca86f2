//! Webhook processing: allow-list check, order resolution, effect execution.

use super::event::{EventType, WebhookEvent};
use super::reducer::WebhookReducer;
use super::WebhookEnvironment;
use crate::error::{Result, WebhookError};
use paypal_plus_core::effect::Effect;
use paypal_plus_core::environment::{CustomerNotifier, OrderRepository, TransactionRepository};
use paypal_plus_core::reducer::Reducer;
use paypal_plus_core::{Order, OrderId};
use tracing::{debug, error, info, warn};

/// What happened to a webhook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A handler ran and its effects were executed.
    Processed {
        /// Event type that was handled
        event_type: EventType,
        /// Handler name, e.g. `paymentSaleCompleted`
        handler: String,
        /// Order that was updated
        order_id: OrderId,
    },
    /// The event type is not on the allow-list; nothing was touched.
    Ignored,
}

impl Outcome {
    /// Short label used in logs and metrics.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Processed { .. } => "processed",
            Self::Ignored => "ignored",
        }
    }
}

/// Processes one webhook against the host.
///
/// A processor is request-scoped: the order it resolves is cached for its
/// whole lifetime, so create a new one per webhook.
///
/// # Example
///
/// ```ignore
/// let mut processor = WebhookProcessor::new(&env);
/// match processor.process_webhook_request(&event).await? {
///     Outcome::Processed { handler, .. } => info!(%handler, "done"),
///     Outcome::Ignored => {},
/// }
/// ```
pub struct WebhookProcessor<'env, T, O, N>
where
    T: TransactionRepository,
    O: OrderRepository,
    N: CustomerNotifier,
{
    env: &'env WebhookEnvironment<T, O, N>,
    reducer: WebhookReducer<T, O, N>,
    order: Option<Order>,
}

impl<'env, T, O, N> WebhookProcessor<'env, T, O, N>
where
    T: TransactionRepository,
    O: OrderRepository,
    N: CustomerNotifier,
{
    /// Create a processor bound to `env`.
    #[must_use]
    pub const fn new(env: &'env WebhookEnvironment<T, O, N>) -> Self {
        Self {
            env,
            reducer: WebhookReducer::new(),
            order: None,
        }
    }

    /// Event types this processor handles.
    #[must_use]
    pub const fn supported_webhook_events() -> &'static [EventType] {
        &EventType::ALL
    }

    /// Process the given webhook event.
    ///
    /// Unsupported or missing event types return [`Outcome::Ignored`]
    /// without touching the host.
    ///
    /// # Errors
    ///
    /// - [`WebhookError::MissingResource`] if the event has no resource
    /// - [`WebhookError::OrderNotFound`] if no order is linked to the resource
    /// - [`WebhookError::MissingField`] if the handler needs a missing field
    /// - [`WebhookError::Host`] if the host rejects or fails an operation;
    ///   effects executed before the failure stay applied
    pub async fn process_webhook_request(&mut self, event: &WebhookEvent) -> Result<Outcome> {
        let Some(event_type) = event.supported_type() else {
            debug!(event_type = ?event.event_type, "ignoring unsupported webhook event");
            return Ok(Outcome::Ignored);
        };
        let handler = event_type.handler_name();
        info!(
            event_type = %event_type,
            handler = %handler,
            event_id = ?event.id,
            "processing webhook event"
        );

        self.order(event).await?;
        let order = self.order.as_mut().ok_or(WebhookError::OrderNotFound)?;
        let effects = self.reducer.reduce(order, event.clone(), self.env)?;
        let order_id = order.id.clone();

        execute(self.env, effects).await?;

        Ok(Outcome::Processed {
            event_type,
            handler,
            order_id,
        })
    }

    /// Load and validate the order the event refers to.
    ///
    /// The first call looks the resource id up in the transaction table and
    /// loads the linked order; later calls return the cached order.
    ///
    /// # Errors
    ///
    /// - [`WebhookError::MissingResource`] if the event has no resource
    /// - [`WebhookError::OrderNotFound`] if the transaction or order is unknown
    /// - [`WebhookError::Host`] if a lookup fails
    pub async fn order(&mut self, event: &WebhookEvent) -> Result<&Order> {
        if self.order.is_none() {
            let order = self.resolve_order(event).await?;
            self.order = Some(order);
        } else {
            debug!("order already resolved for this webhook");
        }
        self.order.as_ref().ok_or(WebhookError::OrderNotFound)
    }

    /// Order resolved so far, if any.
    #[must_use]
    pub const fn cached_order(&self) -> Option<&Order> {
        self.order.as_ref()
    }

    async fn resolve_order(&self, event: &WebhookEvent) -> Result<Order> {
        let Some(resource) = event.resource.as_ref() else {
            error!(event_id = ?event.id, "Event resource not found.");
            return Err(WebhookError::MissingResource);
        };

        let Some(txn_id) = resource.txn_id() else {
            warn!(event_id = ?event.id, "Order not found.");
            return Err(WebhookError::OrderNotFound);
        };

        let transaction = self.env.transactions.find_by_txn_id(txn_id).await?;
        let order = match transaction {
            Some(transaction) => self.env.orders.load(&transaction.order_id).await?,
            None => None,
        };

        order.ok_or_else(|| {
            warn!(txn_id, "Order not found.");
            WebhookError::OrderNotFound
        })
    }
}

async fn execute<T, O, N>(env: &WebhookEnvironment<T, O, N>, effects: Vec<Effect>) -> Result<()>
where
    T: TransactionRepository,
    O: OrderRepository,
    N: CustomerNotifier,
{
    for effect in effects.into_iter().flat_map(Effect::into_sequence) {
        debug!(effect = effect.kind(), "executing effect");
        match effect {
            Effect::PersistOrder(order) => env.orders.save(&order).await?,
            Effect::SendNewOrderEmail(order) => env.notifier.send_new_order_email(&order).await?,
            Effect::SendCreditMemoEmail { order, credit_memo } => {
                env.notifier
                    .send_credit_memo_email(&order, &credit_memo)
                    .await?;
            },
            Effect::None | Effect::Sequential(_) => {},
        }
    }
    Ok(())
}
