//! Mock order repository.

use paypal_plus_core::environment::OrderRepository;
use paypal_plus_core::{HostError, Order, OrderId, Result};
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// In-memory order storage.
///
/// Counts loads and keeps every saved snapshot in order, so tests can check
/// both how often the host was hit and what each save contained.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderRepository {
    orders: Arc<Mutex<HashMap<OrderId, Order>>>,
    saved: Arc<Mutex<Vec<Order>>>,
    loads: Arc<AtomicUsize>,
    fail_saves: Arc<AtomicBool>,
}

impl InMemoryOrderRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an order directly, bypassing the save log.
    pub fn insert(&self, order: Order) {
        self.orders
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(order.id.clone(), order);
    }

    /// Current stored version of an order.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Order> {
        self.orders
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&OrderId::new(id.to_string()))
            .cloned()
    }

    /// Number of `load` calls so far.
    #[must_use]
    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    /// Number of `save` calls so far.
    #[must_use]
    pub fn saves(&self) -> usize {
        self.saved_snapshots().len()
    }

    /// Every snapshot passed to `save`, oldest first.
    #[must_use]
    pub fn saved_snapshots(&self) -> Vec<Order> {
        self.saved
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Make subsequent saves fail with a storage error.
    pub fn fail_saves(&self) {
        self.fail_saves.store(true, Ordering::SeqCst);
    }
}

impl OrderRepository for InMemoryOrderRepository {
    fn load(&self, id: &OrderId) -> impl Future<Output = Result<Option<Order>>> + Send {
        let orders = Arc::clone(&self.orders);
        let loads = Arc::clone(&self.loads);
        let id = id.clone();

        async move {
            loads.fetch_add(1, Ordering::SeqCst);
            Ok(orders
                .lock()
                .map_err(|_| HostError::Storage("order store lock poisoned".to_string()))?
                .get(&id)
                .cloned())
        }
    }

    fn save(&self, order: &Order) -> impl Future<Output = Result<()>> + Send {
        let orders = Arc::clone(&self.orders);
        let saved = Arc::clone(&self.saved);
        let fail = self.fail_saves.load(Ordering::SeqCst);
        let order = order.clone();

        async move {
            if fail {
                return Err(HostError::Storage(format!(
                    "could not save order {}",
                    order.increment_id
                )));
            }
            saved
                .lock()
                .map_err(|_| HostError::Storage("save log lock poisoned".to_string()))?
                .push(order.clone());
            orders
                .lock()
                .map_err(|_| HostError::Storage("order store lock poisoned".to_string()))?
                .insert(order.id.clone(), order);
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[tokio::test]
    async fn save_then_load_returns_latest_snapshot() {
        let repo = InMemoryOrderRepository::new();
        let mut order = fixtures::order();
        repo.save(&order).await.unwrap();
        order.set_status("processing");
        repo.save(&order).await.unwrap();

        let loaded = repo.load(&order.id).await.unwrap().unwrap();
        assert_eq!(loaded.status, "processing");
        assert_eq!(repo.saves(), 2);
        assert_eq!(repo.saved_snapshots()[0].status, "pending");
        assert_eq!(repo.loads(), 1);
    }

    #[tokio::test]
    async fn failing_saves_leave_store_untouched() {
        let repo = InMemoryOrderRepository::new();
        repo.fail_saves();

        let err = repo.save(&fixtures::order()).await.unwrap_err();
        assert!(err.is_infrastructure());
        assert_eq!(repo.saves(), 0);
        assert!(repo.get(fixtures::ORDER_ID).is_none());
    }
}
