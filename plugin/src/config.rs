//! Plugin configuration.
//!
//! Values mirror the host module's defaults and can be overridden per
//! installation.

/// Payment method code this plugin registers with the host.
pub const METHOD_CODE: &str = "iways_paypalplus_payment";

/// PayPal Plus plugin configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginConfig {
    /// Payment method code of this plugin.
    ///
    /// Default: `iways_paypalplus_payment`
    pub method_code: String,

    /// Active methods whose code contains this fragment are hidden from
    /// the third-party dropdown.
    ///
    /// Default: `paypal`
    pub excluded_method_fragment: String,

    /// Order status applied when a sale is reversed.
    ///
    /// Default: `paypal_reversed`
    pub reversed_status: String,

    /// Label of the empty first dropdown entry.
    ///
    /// Default: `--Please Select--`
    pub placeholder_label: String,
}

impl PluginConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            method_code: METHOD_CODE.to_string(),
            excluded_method_fragment: "paypal".to_string(),
            reversed_status: "paypal_reversed".to_string(),
            placeholder_label: "--Please Select--".to_string(),
        }
    }

    /// Set the plugin's own method code.
    #[must_use]
    pub fn with_method_code(mut self, code: impl Into<String>) -> Self {
        self.method_code = code.into();
        self
    }

    /// Set the excluded method fragment.
    #[must_use]
    pub fn with_excluded_method_fragment(mut self, fragment: impl Into<String>) -> Self {
        self.excluded_method_fragment = fragment.into();
        self
    }

    /// Set the reversed order status.
    #[must_use]
    pub fn with_reversed_status(mut self, status: impl Into<String>) -> Self {
        self.reversed_status = status.into();
        self
    }

    /// Set the placeholder label.
    #[must_use]
    pub fn with_placeholder_label(mut self, label: impl Into<String>) -> Self {
        self.placeholder_label = label.into();
        self
    }
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self::new()
    }
}
