//! Static configuration sources.

use paypal_plus_core::environment::{PaymentMethodRegistry, ScopeConfig};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Scope configuration backed by a map.
#[derive(Debug, Clone, Default)]
pub struct StaticScopeConfig {
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl StaticScopeConfig {
    /// Create an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value.
    #[must_use]
    pub fn with(self, path: &str, value: &str) -> Self {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.to_string(), value.to_string());
        self
    }
}

impl ScopeConfig for StaticScopeConfig {
    fn value(&self, path: &str) -> Option<String> {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
            .cloned()
    }
}

/// Payment method registry with fixed lists.
#[derive(Debug, Clone, Default)]
pub struct StaticPaymentMethods {
    active: Vec<String>,
    all: Vec<String>,
}

impl StaticPaymentMethods {
    /// Create a registry; `active` should be a subset of `all`.
    #[must_use]
    pub fn new(active: &[&str], all: &[&str]) -> Self {
        Self {
            active: active.iter().map(ToString::to_string).collect(),
            all: all.iter().map(ToString::to_string).collect(),
        }
    }
}

impl PaymentMethodRegistry for StaticPaymentMethods {
    fn active_methods(&self) -> Vec<String> {
        self.active.clone()
    }

    fn all_methods(&self) -> Vec<String> {
        self.all.clone()
    }
}
