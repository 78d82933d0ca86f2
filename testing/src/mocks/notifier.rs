//! Mock customer notifier.

use paypal_plus_core::environment::CustomerNotifier;
use paypal_plus_core::{CreditMemo, HostError, Order, Result};
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// An email the notifier was asked to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SentEmail {
    /// New order confirmation for the given increment id.
    NewOrder {
        /// Order increment id
        increment_id: String,
        /// Recipient
        to: String,
    },
    /// Credit memo notification.
    CreditMemo {
        /// Order increment id
        increment_id: String,
        /// Credit memo increment id
        credit_memo: String,
        /// Recipient
        to: String,
    },
}

/// Notifier that records instead of sending.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<SentEmail>>>,
    fail: Arc<AtomicBool>,
}

impl RecordingNotifier {
    /// Create a notifier that accepts every message.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything sent so far, oldest first.
    #[must_use]
    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Make subsequent sends fail.
    pub fn fail_sends(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    fn record(&self, email: SentEmail) -> impl Future<Output = Result<()>> + Send {
        let sent = Arc::clone(&self.sent);
        let fail = self.fail.load(Ordering::SeqCst);

        async move {
            if fail {
                return Err(HostError::Notification("mail transport unavailable".to_string()));
            }
            sent.lock()
                .map_err(|_| HostError::Notification("outbox lock poisoned".to_string()))?
                .push(email);
            Ok(())
        }
    }
}

impl CustomerNotifier for RecordingNotifier {
    fn send_new_order_email(&self, order: &Order) -> impl Future<Output = Result<()>> + Send {
        self.record(SentEmail::NewOrder {
            increment_id: order.increment_id.clone(),
            to: order.customer_email.clone(),
        })
    }

    fn send_credit_memo_email(
        &self,
        order: &Order,
        credit_memo: &CreditMemo,
    ) -> impl Future<Output = Result<()>> + Send {
        self.record(SentEmail::CreditMemo {
            increment_id: order.increment_id.clone(),
            credit_memo: credit_memo.increment_id.clone(),
            to: order.customer_email.clone(),
        })
    }
}
