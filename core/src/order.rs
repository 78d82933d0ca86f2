//! Host order aggregate.
//!
//! `Order` owns its `Payment`, invoices, credit memos and status history.
//! The payment notification methods live on `Order` because registering a
//! capture or refund touches both the payment and the order totals.

use crate::error::{HostError, Result};
use crate::types::{OrderId, TransactionId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of an order (distinct from the free-form `status` label)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderState {
    /// Order placed, nothing captured yet
    New,
    /// Waiting for the provider to confirm payment
    PendingPayment,
    /// Payment held for review at the provider
    PaymentReview,
    /// Payment captured
    Processing,
    /// Fully refunded
    Closed,
    /// Payment denied
    Canceled,
}

impl OrderState {
    /// Default status label for this state
    #[must_use]
    pub const fn default_status(self) -> &'static str {
        match self {
            Self::New => "pending",
            Self::PendingPayment => "pending_payment",
            Self::PaymentReview => "payment_review",
            Self::Processing => "processing",
            Self::Closed => "closed",
            Self::Canceled => "canceled",
        }
    }
}

impl fmt::Display for OrderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.default_status())
    }
}

/// Review actions the provider can trigger on a held payment
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReviewAction {
    /// Provider accepted the payment
    Accept,
    /// Provider denied the payment
    Deny,
    /// Provider reported a status change without a final decision
    Update,
}

/// Entry in the order's status history
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusHistoryEntry {
    /// Comment text
    pub comment: String,
    /// Status the order was moved to together with the comment
    pub status: Option<String>,
    /// Whether the customer was told; `None` when nobody decided
    pub is_customer_notified: Option<bool>,
    /// When the comment was added
    pub created_at: DateTime<Utc>,
}

impl StatusHistoryEntry {
    /// Set the customer-notified flag
    pub const fn set_is_customer_notified(&mut self, notified: bool) -> &mut Self {
        self.is_customer_notified = Some(notified);
        self
    }
}

/// Invoice created by a captured payment
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    /// Human-facing invoice number
    pub increment_id: String,
    /// Captured amount
    pub amount: Decimal,
    /// Provider transaction the capture belongs to
    pub transaction_id: Option<String>,
}

/// Credit memo created by a refund
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditMemo {
    /// Human-facing credit memo number
    pub increment_id: String,
    /// Refunded amount
    pub amount: Decimal,
    /// Provider transaction the refund belongs to
    pub transaction_id: Option<String>,
}

/// Row of the host transaction table, correlating a provider id to an order
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Provider-side id
    pub txn_id: TransactionId,
    /// Host order the transaction belongs to
    pub order_id: OrderId,
}

impl Transaction {
    /// Creates a new transaction record
    #[must_use]
    pub const fn new(txn_id: TransactionId, order_id: OrderId) -> Self {
        Self { txn_id, order_id }
    }
}

/// Payment sub-entity of an order
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// Payment method code
    pub method: String,
    /// Current provider transaction id
    pub transaction_id: Option<String>,
    /// Provider id of the parent payment
    pub parent_transaction_id: Option<String>,
    /// ISO currency code reported by the provider
    pub currency_code: String,
    /// Whether the current transaction is closed
    pub is_transaction_closed: bool,
    /// Message attached to the next history comment written by the host
    pub prepared_message: Option<String>,
    /// Set when a capture amount did not match the amount due
    pub is_fraud_detected: bool,
    /// Invoice created by the last capture notification
    pub created_invoice: Option<Invoice>,
    /// Credit memo created by the last refund notification
    pub created_credit_memo: Option<CreditMemo>,
}

impl Payment {
    /// Creates a payment for the given method and currency
    #[must_use]
    pub const fn new(method: String, currency_code: String) -> Self {
        Self {
            method,
            transaction_id: None,
            parent_transaction_id: None,
            currency_code,
            is_transaction_closed: false,
            prepared_message: None,
            is_fraud_detected: false,
            created_invoice: None,
            created_credit_memo: None,
        }
    }

    /// Set the current transaction id
    pub fn set_transaction_id(&mut self, id: impl Into<String>) -> &mut Self {
        self.transaction_id = Some(id.into());
        self
    }

    /// Set the parent transaction id
    pub fn set_parent_transaction_id(&mut self, id: Option<String>) -> &mut Self {
        self.parent_transaction_id = id;
        self
    }

    /// Set the currency code
    pub fn set_currency_code(&mut self, code: impl Into<String>) -> &mut Self {
        self.currency_code = code.into();
        self
    }

    /// Mark the current transaction open or closed
    pub const fn set_is_transaction_closed(&mut self, closed: bool) -> &mut Self {
        self.is_transaction_closed = closed;
        self
    }

    /// Set the prepared message
    pub fn set_prepared_message(&mut self, message: impl Into<String>) -> &mut Self {
        self.prepared_message = Some(message.into());
        self
    }

    /// Consume the prepared message, if any, as a comment prefix
    fn take_prepared_message(&mut self) -> String {
        match self.prepared_message.take() {
            Some(message) if !message.is_empty() => format!("{message} "),
            _ => String::new(),
        }
    }
}

/// Host order aggregate
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Entity id
    pub id: OrderId,
    /// Human-facing order number
    pub increment_id: String,
    /// Customer email address
    pub customer_email: String,
    /// Lifecycle state
    pub state: OrderState,
    /// Status label shown in the admin
    pub status: String,
    /// Order total
    pub grand_total: Decimal,
    /// Captured so far
    pub total_paid: Decimal,
    /// Refunded so far
    pub total_refunded: Decimal,
    /// Whether the new order email went out
    pub email_sent: bool,
    /// Payment sub-entity
    pub payment: Payment,
    /// Status history, oldest first
    pub status_history: Vec<StatusHistoryEntry>,
    /// Invoices, oldest first
    pub invoices: Vec<Invoice>,
    /// Credit memos, oldest first
    pub credit_memos: Vec<CreditMemo>,
}

impl Order {
    /// Creates a new order paid with the given payment method
    #[must_use]
    pub fn new(
        id: OrderId,
        increment_id: String,
        customer_email: String,
        grand_total: Decimal,
        method: String,
        currency_code: String,
    ) -> Self {
        Self {
            id,
            increment_id,
            customer_email,
            state: OrderState::New,
            status: OrderState::New.default_status().to_string(),
            grand_total,
            total_paid: Decimal::ZERO,
            total_refunded: Decimal::ZERO,
            email_sent: false,
            payment: Payment::new(method, currency_code),
            status_history: Vec::new(),
            invoices: Vec::new(),
            credit_memos: Vec::new(),
        }
    }

    /// Set the status label without touching the state
    pub fn set_status(&mut self, status: impl Into<String>) -> &mut Self {
        self.status = status.into();
        self
    }

    /// Amount still due
    #[must_use]
    pub fn total_due(&self) -> Decimal {
        self.grand_total - self.total_paid
    }

    /// Amount that can still be refunded
    #[must_use]
    pub fn refundable(&self) -> Decimal {
        self.total_paid - self.total_refunded
    }

    /// Append a status history comment, optionally moving the order to `status`.
    ///
    /// Returns the new entry so the caller can set the notification flag.
    pub fn add_status_history_comment(
        &mut self,
        comment: impl Into<String>,
        status: Option<&str>,
        at: DateTime<Utc>,
    ) -> &mut StatusHistoryEntry {
        if let Some(status) = status {
            self.status = status.to_string();
        }
        let entry = StatusHistoryEntry {
            comment: comment.into(),
            status: Some(status.map_or_else(|| self.status.clone(), str::to_string)),
            is_customer_notified: None,
            created_at: at,
        };
        let index = self.status_history.len();
        self.status_history.push(entry);
        &mut self.status_history[index]
    }

    fn transition(&mut self, state: OrderState) {
        self.state = state;
        self.status = state.default_status().to_string();
    }

    fn transaction_note(&self) -> String {
        self.payment
            .transaction_id
            .as_deref()
            .map(|id| format!(" Transaction ID: \"{id}\"."))
            .unwrap_or_default()
    }

    /// Register a capture reported by the provider.
    ///
    /// Creates an invoice for `amount` and moves the order to processing.
    /// Unless `skip_fraud_detection` is set, an amount different from the
    /// amount due flags the payment and holds the order for review instead.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::InvalidOperation`] for non-positive amounts.
    pub fn register_capture_notification(
        &mut self,
        amount: Decimal,
        skip_fraud_detection: bool,
        at: DateTime<Utc>,
    ) -> Result<()> {
        if amount <= Decimal::ZERO {
            return Err(HostError::InvalidOperation(format!(
                "capture amount must be positive, got {amount}"
            )));
        }

        let prefix = self.payment.take_prepared_message();
        let note = self.transaction_note();
        self.payment.created_invoice = None;

        if !skip_fraud_detection && amount != self.total_due() {
            self.payment.is_fraud_detected = true;
            self.transition(OrderState::PaymentReview);
            self.set_status("fraud");
            self.add_status_history_comment(
                format!(
                    "{prefix}Order is suspended as its capturing amount {amount} is suspected to be fraudulent.{note}"
                ),
                None,
                at,
            );
            return Ok(());
        }

        let invoice = Invoice {
            increment_id: format!("{}-{}", self.increment_id, self.invoices.len() + 1),
            amount,
            transaction_id: self.payment.transaction_id.clone(),
        };
        self.total_paid += amount;
        self.invoices.push(invoice.clone());
        self.payment.created_invoice = Some(invoice);
        self.transition(OrderState::Processing);
        self.add_status_history_comment(
            format!(
                "{prefix}Registered notification about captured amount of {amount} {}.{note}",
                self.payment.currency_code
            ),
            None,
            at,
        );
        Ok(())
    }

    /// Register a refund reported by the provider.
    ///
    /// Creates a credit memo for `amount`; the order closes once everything
    /// captured has been refunded.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::InvalidOperation`] for non-positive amounts or
    /// amounts above what is still refundable.
    pub fn register_refund_notification(
        &mut self,
        amount: Decimal,
        at: DateTime<Utc>,
    ) -> Result<()> {
        if amount <= Decimal::ZERO || amount > self.refundable() {
            return Err(HostError::InvalidOperation(format!(
                "cannot refund {amount}, refundable amount is {}",
                self.refundable()
            )));
        }

        let prefix = self.payment.take_prepared_message();
        let note = self.transaction_note();
        let credit_memo = CreditMemo {
            increment_id: format!("{}-{}", self.increment_id, self.credit_memos.len() + 1),
            amount,
            transaction_id: self.payment.transaction_id.clone(),
        };
        self.total_refunded += amount;
        self.credit_memos.push(credit_memo.clone());
        self.payment.created_credit_memo = Some(credit_memo);
        if self.refundable() == Decimal::ZERO {
            self.transition(OrderState::Closed);
        }
        self.add_status_history_comment(
            format!(
                "{prefix}Registered notification about refunded amount of {amount} {}.{note}",
                self.payment.currency_code
            ),
            None,
            at,
        );
        Ok(())
    }

    /// Register a review decision on a held payment.
    ///
    /// `is_online` would ask the provider for the latest status; the host
    /// cannot reach the provider here, so offline updates only act on the
    /// open/closed flag the caller already set. An update never changes the
    /// order state; it only records a history comment.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::InvalidOperation`] when accepting or denying an
    /// order that is not under review.
    pub fn register_payment_review_action(
        &mut self,
        action: ReviewAction,
        is_online: bool,
        at: DateTime<Utc>,
    ) -> Result<()> {
        let prefix = self.payment.take_prepared_message();
        let note = self.transaction_note();
        let message = match action {
            ReviewAction::Update => {
                if is_online || self.payment.is_transaction_closed {
                    format!("{prefix}Registered update about approved payment.{note}")
                } else {
                    format!("{prefix}There is no update for the transaction.{note}")
                }
            },
            ReviewAction::Accept | ReviewAction::Deny
                if self.state != OrderState::PaymentReview =>
            {
                return Err(HostError::InvalidOperation(format!(
                    "order {} is not under payment review",
                    self.increment_id
                )));
            },
            ReviewAction::Accept => {
                self.transition(OrderState::Processing);
                format!("{prefix}Approved the payment online.{note}")
            },
            ReviewAction::Deny => {
                self.transition(OrderState::Canceled);
                format!("{prefix}Denied the payment online.{note}")
            },
        };
        self.add_status_history_comment(message, None, at);
        Ok(())
    }
}
