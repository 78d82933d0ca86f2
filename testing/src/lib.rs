//! # PayPal Plus Testing
//!
//! In-memory host and fixtures for the PayPal Plus webhook gateway.
//!
//! This crate provides:
//! - Mock implementations of the host environment traits, with call counters
//! - A fixed clock for deterministic history timestamps
//! - Order and transaction fixtures
//! - [`ReducerTest`], a Given-When-Then harness for reducers
//!
//! ## Example
//!
//! ```ignore
//! use paypal_plus_testing::{fixtures, mocks::InMemoryHost};
//!
//! #[tokio::test]
//! async fn dispute_adds_comment() {
//!     let host = InMemoryHost::new();
//!     host.seed(fixtures::order(), &[fixtures::SALE_ID]);
//!
//!     let env = WebhookEnvironment::new(
//!         host.transactions.clone(),
//!         host.orders.clone(),
//!         host.notifier.clone(),
//!         Arc::new(host.clock.clone()),
//!         PluginConfig::default(),
//!     );
//!     let mut processor = WebhookProcessor::new(&env);
//!     processor.process_webhook_request(&dispute_event()).await?;
//!
//!     assert_eq!(host.orders.saves(), 1);
//! }
//! ```

pub mod fixtures;
pub mod mocks;

// Re-export commonly used items
pub use mocks::{
    test_clock, FixedClock, InMemoryHost, InMemoryOrderRepository, InMemoryTransactionRepository,
    RecordingNotifier, SentEmail, StaticPaymentMethods, StaticScopeConfig,
};
pub use reducer_test::{assertions, ReducerTest};
