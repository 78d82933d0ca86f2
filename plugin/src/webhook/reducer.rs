//! Webhook handlers.
//!
//! Each handler applies the provider's report to the loaded order and
//! returns the save/email sequence the host has to perform. Handlers never
//! touch storage themselves; every persist effect carries the order as it
//! looked at that point of the handler.

use super::event::{Amount, EventType, Resource, WebhookEvent};
use super::WebhookEnvironment;
use crate::error::{Result, WebhookError};
use chrono::{DateTime, Utc};
use paypal_plus_core::effect::Effect;
use paypal_plus_core::environment::{CustomerNotifier, OrderRepository, TransactionRepository};
use paypal_plus_core::reducer::Reducer;
use paypal_plus_core::{Order, ReviewAction};
use std::marker::PhantomData;

/// Reducer for supported webhook events.
#[derive(Debug, Clone)]
pub struct WebhookReducer<T, O, N> {
    _phantom: PhantomData<fn() -> (T, O, N)>,
}

impl<T, O, N> WebhookReducer<T, O, N> {
    /// Create a new webhook reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

impl<T, O, N> Default for WebhookReducer<T, O, N> {
    fn default() -> Self {
        Self::new()
    }
}

fn require_resource(event: &WebhookEvent) -> Result<&Resource> {
    event.resource.as_ref().ok_or(WebhookError::MissingResource)
}

fn require_amount(resource: &Resource) -> Result<&Amount> {
    resource
        .amount
        .as_ref()
        .ok_or(WebhookError::MissingField("amount"))
}

impl<T, O, N> WebhookReducer<T, O, N> {
    /// Mark transaction as completed.
    fn payment_sale_completed(
        order: &mut Order,
        event: &WebhookEvent,
        now: DateTime<Utc>,
    ) -> Result<Effect> {
        let resource = require_resource(event)?;
        let amount = require_amount(resource)?;

        order
            .payment
            .set_transaction_id(resource.txn_id().unwrap_or_default())
            .set_currency_code(amount.currency.as_str())
            .set_parent_transaction_id(resource.parent_payment.clone())
            .set_is_transaction_closed(true);
        order.register_capture_notification(amount.total, true, now)?;
        let mut effects = vec![Effect::persist(order)];

        if let (Some(invoice), false) = (order.payment.created_invoice.clone(), order.email_sent) {
            effects.push(Effect::SendNewOrderEmail(Box::new(order.clone())));
            order.email_sent = true;
            order
                .add_status_history_comment(
                    format!("Notified customer about invoice #{}.", invoice.increment_id),
                    None,
                    now,
                )
                .set_is_customer_notified(true);
            effects.push(Effect::persist(order));
        }

        Ok(Effect::chain(effects))
    }

    /// Mark transaction as refunded.
    fn payment_sale_refunded(
        order: &mut Order,
        event: &WebhookEvent,
        now: DateTime<Utc>,
    ) -> Result<Effect> {
        let resource = require_resource(event)?;
        let amount = require_amount(resource)?;

        order
            .payment
            .set_prepared_message("")
            .set_transaction_id(resource.txn_id().unwrap_or_default())
            .set_parent_transaction_id(resource.parent_payment.clone())
            .set_is_transaction_closed(true);
        order.register_refund_notification(amount.total, now)?;
        let mut effects = vec![Effect::persist(order)];

        if let Some(credit_memo) = order.payment.created_credit_memo.clone() {
            effects.push(Effect::SendCreditMemoEmail {
                order: Box::new(order.clone()),
                credit_memo: credit_memo.clone(),
            });
            order
                .add_status_history_comment(
                    format!(
                        "Notified customer about creditmemo #{}.",
                        credit_memo.increment_id
                    ),
                    None,
                    now,
                )
                .set_is_customer_notified(true);
            effects.push(Effect::persist(order));
        }

        Ok(Effect::chain(effects))
    }

    /// Mark transaction as pending.
    fn payment_sale_pending(
        order: &mut Order,
        event: &WebhookEvent,
        now: DateTime<Utc>,
    ) -> Result<Effect> {
        let resource = require_resource(event)?;

        order
            .payment
            .set_prepared_message(event.summary_or_default())
            .set_transaction_id(resource.txn_id().unwrap_or_default())
            .set_is_transaction_closed(false);
        order.register_payment_review_action(ReviewAction::Update, false, now)?;

        Ok(Effect::persist(order))
    }

    /// Mark transaction as reversed.
    fn payment_sale_reversed(
        order: &mut Order,
        event: &WebhookEvent,
        reversed_status: &str,
        now: DateTime<Utc>,
    ) -> Effect {
        order.set_status(reversed_status);
        let status_saved = Effect::persist(order);

        order
            .add_status_history_comment(event.summary_or_default(), Some(reversed_status), now)
            .set_is_customer_notified(false);

        Effect::chain(vec![status_saved, Effect::persist(order)])
    }

    /// Add risk dispute to order comment.
    fn risk_dispute_created(order: &mut Order, event: &WebhookEvent, now: DateTime<Utc>) -> Effect {
        order
            .add_status_history_comment(event.summary_or_default(), None, now)
            .set_is_customer_notified(false);

        Effect::persist(order)
    }
}

impl<T, O, N> Reducer for WebhookReducer<T, O, N>
where
    T: TransactionRepository,
    O: OrderRepository,
    N: CustomerNotifier,
{
    type State = Order;
    type Action = WebhookEvent;
    type Environment = WebhookEnvironment<T, O, N>;
    type Error = WebhookError;

    fn reduce(
        &self,
        order: &mut Order,
        event: WebhookEvent,
        env: &WebhookEnvironment<T, O, N>,
    ) -> Result<Vec<Effect>> {
        let Some(event_type) = event.supported_type() else {
            return Ok(Vec::new());
        };
        let now = env.clock.now();

        tracing::debug!(
            order = %order.increment_id,
            handler = %event_type.handler_name(),
            "applying webhook event"
        );

        let effect = match event_type {
            EventType::PaymentSaleCompleted => Self::payment_sale_completed(order, &event, now)?,
            EventType::PaymentSalePending => Self::payment_sale_pending(order, &event, now)?,
            EventType::PaymentSaleRefunded => Self::payment_sale_refunded(order, &event, now)?,
            EventType::PaymentSaleReversed => {
                Self::payment_sale_reversed(order, &event, &env.config.reversed_status, now)
            },
            EventType::RiskDisputeCreated => Self::risk_dispute_created(order, &event, now),
        };

        Ok(effect.into_sequence())
    }
}
