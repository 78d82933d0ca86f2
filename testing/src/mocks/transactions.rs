//! Mock transaction table.

use paypal_plus_core::environment::TransactionRepository;
use paypal_plus_core::{HostError, Result, Transaction};
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// In-memory transaction table keyed by provider id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTransactionRepository {
    by_txn_id: Arc<Mutex<HashMap<String, Transaction>>>,
    lookups: Arc<AtomicUsize>,
}

impl InMemoryTransactionRepository {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a row.
    pub fn insert(&self, transaction: Transaction) {
        self.by_txn_id
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(transaction.txn_id.as_str().to_string(), transaction);
    }

    /// Number of `find_by_txn_id` calls so far.
    #[must_use]
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl TransactionRepository for InMemoryTransactionRepository {
    fn find_by_txn_id(
        &self,
        txn_id: &str,
    ) -> impl Future<Output = Result<Option<Transaction>>> + Send {
        let by_txn_id = Arc::clone(&self.by_txn_id);
        let lookups = Arc::clone(&self.lookups);
        let txn_id = txn_id.to_string();

        async move {
            lookups.fetch_add(1, Ordering::SeqCst);
            tracing::debug!(txn_id = %txn_id, "transaction lookup");
            Ok(by_txn_id
                .lock()
                .map_err(|_| HostError::Storage("transaction table lock poisoned".to_string()))?
                .get(&txn_id)
                .cloned())
        }
    }
}
