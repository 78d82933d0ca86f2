//! Mock implementations of the host environment traits.
//!
//! Every mock is cheap to clone and shares its storage between clones, so a
//! test can hand one copy to the code under test and inspect another.

mod config;
mod notifier;
mod orders;
mod transactions;

pub use config::{StaticPaymentMethods, StaticScopeConfig};
pub use notifier::{RecordingNotifier, SentEmail};
pub use orders::InMemoryOrderRepository;
pub use transactions::InMemoryTransactionRepository;

use chrono::{DateTime, Utc};
use paypal_plus_core::environment::Clock;
use paypal_plus_core::Order;

/// Fixed clock for deterministic tests
///
/// Always returns the same time, making history timestamps reproducible.
///
/// # Example
///
/// ```
/// use paypal_plus_testing::mocks::FixedClock;
/// use paypal_plus_core::environment::Clock;
/// use chrono::Utc;
///
/// let clock = FixedClock::new(Utc::now());
/// assert_eq!(clock.now(), clock.now());
/// ```
#[derive(Debug, Clone)]
pub struct FixedClock {
    time: DateTime<Utc>,
}

impl FixedClock {
    /// Create a new fixed clock with the given time
    #[must_use]
    pub const fn new(time: DateTime<Utc>) -> Self {
        Self { time }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.time
    }
}

/// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
///
/// # Panics
///
/// This function will panic if the hardcoded timestamp fails to parse,
/// which should never happen in practice.
#[must_use]
#[allow(clippy::expect_used)]
pub fn test_clock() -> FixedClock {
    FixedClock::new(
        DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
            .expect("hardcoded timestamp should always parse")
            .with_timezone(&Utc),
    )
}

/// Complete in-memory host: storage, mail, configuration and clock.
#[derive(Debug, Clone)]
pub struct InMemoryHost {
    /// Order storage.
    pub orders: InMemoryOrderRepository,
    /// Transaction table.
    pub transactions: InMemoryTransactionRepository,
    /// Outgoing mail.
    pub notifier: RecordingNotifier,
    /// Scope configuration.
    pub scope_config: StaticScopeConfig,
    /// Payment method registry.
    pub payment_methods: StaticPaymentMethods,
    /// Clock.
    pub clock: FixedClock,
}

impl InMemoryHost {
    /// Create an empty host.
    #[must_use]
    pub fn new() -> Self {
        Self {
            orders: InMemoryOrderRepository::new(),
            transactions: InMemoryTransactionRepository::new(),
            notifier: RecordingNotifier::new(),
            scope_config: StaticScopeConfig::new(),
            payment_methods: StaticPaymentMethods::default(),
            clock: test_clock(),
        }
    }

    /// Store `order` and link each provider id in `txn_ids` to it.
    pub fn seed(&self, order: Order, txn_ids: &[&str]) {
        for txn_id in txn_ids {
            self.transactions
                .insert(crate::fixtures::transaction_for(txn_id, &order.id));
        }
        self.orders.insert(order);
    }
}

impl Default for InMemoryHost {
    fn default() -> Self {
        Self::new()
    }
}
