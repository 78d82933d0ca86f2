//! Environment module - Dependency injection traits
//!
//! All host collaborators are abstracted behind traits and injected into
//! the plugin. Storage and email seams are async; configuration reads are
//! plain lookups and stay object-safe so they can sit behind `Arc<dyn _>`.

use crate::error::Result;
use crate::order::{CreditMemo, Order, Transaction};
use crate::types::OrderId;
use chrono::{DateTime, Utc};
use std::future::Future;

/// Clock trait - abstracts time operations for testability
///
/// # Examples
///
/// ```
/// use paypal_plus_core::environment::{Clock, SystemClock};
///
/// let clock = SystemClock;
/// let before = chrono::Utc::now();
/// assert!(clock.now() >= before);
/// ```
pub trait Clock: Send + Sync {
    /// Get the current time
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Lookup of the host transaction table.
pub trait TransactionRepository: Send + Sync {
    /// Find the transaction whose `txn_id` equals the provider id.
    ///
    /// # Errors
    ///
    /// Returns error if the storage backend fails. An unknown id is
    /// `Ok(None)`.
    fn find_by_txn_id(
        &self,
        txn_id: &str,
    ) -> impl Future<Output = Result<Option<Transaction>>> + Send;
}

/// Order persistence.
pub trait OrderRepository: Send + Sync {
    /// Load an order by entity id.
    ///
    /// # Errors
    ///
    /// Returns error if the storage backend fails. A missing order is
    /// `Ok(None)`.
    fn load(&self, id: &OrderId) -> impl Future<Output = Result<Option<Order>>> + Send;

    /// Persist the order, payment and history as given.
    ///
    /// # Errors
    ///
    /// Returns error if the storage backend fails.
    fn save(&self, order: &Order) -> impl Future<Output = Result<()>> + Send;
}

/// Templated customer emails.
pub trait CustomerNotifier: Send + Sync {
    /// Send (or queue) the new order confirmation.
    ///
    /// # Errors
    ///
    /// Returns error if the mail transport rejects the message.
    fn send_new_order_email(&self, order: &Order) -> impl Future<Output = Result<()>> + Send;

    /// Send the credit memo notification.
    ///
    /// # Errors
    ///
    /// Returns error if the mail transport rejects the message.
    fn send_credit_memo_email(
        &self,
        order: &Order,
        credit_memo: &CreditMemo,
    ) -> impl Future<Output = Result<()>> + Send;
}

/// Scope configuration key-value lookup (`payment/<code>/title`, ...).
pub trait ScopeConfig: Send + Sync {
    /// Read a configuration value; `None` when unset.
    fn value(&self, path: &str) -> Option<String>;
}

/// Registry of payment methods known to the host.
pub trait PaymentMethodRegistry: Send + Sync {
    /// Codes of the enabled methods, in registry order.
    fn active_methods(&self) -> Vec<String>;

    /// Codes of every configured method, in registry order.
    fn all_methods(&self) -> Vec<String>;
}
