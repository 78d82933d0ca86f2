//! Admin dropdown source listing the host's other payment methods.

use crate::config::PluginConfig;
use paypal_plus_core::environment::{PaymentMethodRegistry, ScopeConfig};
use serde::Serialize;
use std::sync::Arc;

/// One dropdown entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentMethodOption {
    /// Payment method code (empty for the placeholder)
    pub value: String,
    /// Display label
    pub label: String,
}

/// Lists payment methods other than PayPal ones.
#[derive(Clone)]
pub struct ThirdPartyPaymentMethods {
    registry: Arc<dyn PaymentMethodRegistry>,
    scope_config: Arc<dyn ScopeConfig>,
    config: PluginConfig,
}

impl ThirdPartyPaymentMethods {
    /// Create the option source.
    #[must_use]
    pub fn new(
        registry: Arc<dyn PaymentMethodRegistry>,
        scope_config: Arc<dyn ScopeConfig>,
        config: PluginConfig,
    ) -> Self {
        Self {
            registry,
            scope_config,
            config,
        }
    }

    /// Options for the dropdown: a placeholder, then every active method
    /// whose code does not contain the excluded fragment.
    #[must_use]
    pub fn to_option_array(&self) -> Vec<PaymentMethodOption> {
        let placeholder = PaymentMethodOption {
            value: String::new(),
            label: self.config.placeholder_label.clone(),
        };

        std::iter::once(placeholder)
            .chain(
                self.registry
                    .active_methods()
                    .into_iter()
                    .filter(|code| !code.contains(&self.config.excluded_method_fragment))
                    .map(|code| PaymentMethodOption {
                        label: self.title(&code),
                        value: code,
                    }),
            )
            .collect()
    }

    /// `(code, title)` pairs for every configured method except this plugin's.
    ///
    /// The title is the raw configured value, `None` when the method has no
    /// title set.
    #[must_use]
    pub fn to_array(&self) -> Vec<(String, Option<String>)> {
        self.registry
            .all_methods()
            .into_iter()
            .filter(|code| *code != self.config.method_code)
            .map(|code| {
                let title = self.scope_config.value(&format!("payment/{code}/title"));
                (code, title)
            })
            .collect()
    }

    /// Configured title of a method, falling back to its code.
    fn title(&self, code: &str) -> String {
        self.scope_config
            .value(&format!("payment/{code}/title"))
            .filter(|title| !title.is_empty())
            .unwrap_or_else(|| code.to_string())
    }
}
