//! Webhook payload types and event-type naming.
//!
//! Payloads arrive as provider JSON:
//!
//! ```json
//! {
//!   "id": "WH-2WR32451HC0233532-67976317FL4543714",
//!   "event_type": "PAYMENT.SALE.COMPLETED",
//!   "resource_type": "sale",
//!   "summary": "Payment completed for EUR 49.99 EUR",
//!   "resource": {
//!     "id": "80021663DE681814L",
//!     "parent_payment": "PAY-1B56960729604235TKQQIYVY",
//!     "state": "completed",
//!     "amount": { "total": "49.99", "currency": "EUR" }
//!   }
//! }
//! ```

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Amount block of a sale resource.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    /// ISO currency code
    pub currency: String,
    /// Decimal total, sent by the provider as a string
    pub total: Decimal,
}

/// Resource the event is about (a sale, refund or dispute).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Provider transaction id, absent on some dispute payloads
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Payment the sale belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_payment: Option<String>,
    /// Amount, absent on disputes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Amount>,
    /// Provider-side state of the resource
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Everything else the provider sent
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Resource {
    /// Resource with just an id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            parent_payment: None,
            amount: None,
            state: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Transaction id, `None` when missing or blank.
    #[must_use]
    pub fn txn_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.trim().is_empty())
    }

    /// Set the parent payment.
    #[must_use]
    pub fn with_parent_payment(mut self, parent: impl Into<String>) -> Self {
        self.parent_payment = Some(parent.into());
        self
    }

    /// Set the amount.
    #[must_use]
    pub fn with_amount(mut self, total: Decimal, currency: impl Into<String>) -> Self {
        self.amount = Some(Amount {
            currency: currency.into(),
            total,
        });
        self
    }
}

/// Webhook notification as delivered by the provider.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WebhookEvent {
    /// Provider event id
    #[serde(default)]
    pub id: Option<String>,
    /// Dotted event type code, e.g. `PAYMENT.SALE.COMPLETED`
    #[serde(default)]
    pub event_type: Option<String>,
    /// Kind of resource (`sale`, `refund`, `dispute`)
    #[serde(default)]
    pub resource_type: Option<String>,
    /// Human-readable summary
    #[serde(default)]
    pub summary: Option<String>,
    /// Resource payload
    #[serde(default)]
    pub resource: Option<Resource>,
    /// When the provider created the event
    #[serde(default)]
    pub create_time: Option<DateTime<Utc>>,
}

impl WebhookEvent {
    /// Event of the given type about `resource`.
    #[must_use]
    pub fn new(event_type: impl Into<String>, resource: Resource) -> Self {
        Self {
            event_type: Some(event_type.into()),
            resource: Some(resource),
            ..Self::default()
        }
    }

    /// Set the summary.
    #[must_use]
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Summary, empty when the provider sent none.
    #[must_use]
    pub fn summary_or_default(&self) -> &str {
        self.summary.as_deref().unwrap_or_default()
    }

    /// Supported event type, if the code is one.
    #[must_use]
    pub fn supported_type(&self) -> Option<EventType> {
        self.event_type.as_deref().and_then(|code| code.parse().ok())
    }
}

/// Event types the gateway reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventType {
    /// `PAYMENT.SALE.COMPLETED`
    PaymentSaleCompleted,
    /// `PAYMENT.SALE.PENDING`
    PaymentSalePending,
    /// `PAYMENT.SALE.REFUNDED`
    PaymentSaleRefunded,
    /// `PAYMENT.SALE.REVERSED`
    PaymentSaleReversed,
    /// `RISK.DISPUTE.CREATED`
    RiskDisputeCreated,
}

impl EventType {
    /// Every supported type, in allow-list order.
    pub const ALL: [Self; 5] = [
        Self::PaymentSaleCompleted,
        Self::PaymentSalePending,
        Self::PaymentSaleRefunded,
        Self::PaymentSaleReversed,
        Self::RiskDisputeCreated,
    ];

    /// Provider code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::PaymentSaleCompleted => "PAYMENT.SALE.COMPLETED",
            Self::PaymentSalePending => "PAYMENT.SALE.PENDING",
            Self::PaymentSaleRefunded => "PAYMENT.SALE.REFUNDED",
            Self::PaymentSaleReversed => "PAYMENT.SALE.REVERSED",
            Self::RiskDisputeCreated => "RISK.DISPUTE.CREATED",
        }
    }

    /// Handler name derived from the code, e.g. `paymentSaleCompleted`.
    #[must_use]
    pub fn handler_name(self) -> String {
        event_type_to_handler(self.code())
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Returned when an event type code is not on the allow-list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported webhook event type: {0}")]
pub struct UnsupportedEventType(pub String);

impl FromStr for EventType {
    type Err = UnsupportedEventType;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|event_type| event_type.code() == code)
            .ok_or_else(|| UnsupportedEventType(code.to_string()))
    }
}

/// Map a dotted event code to its handler name.
///
/// The first segment is lowercased; every following segment is lowercased
/// and then capitalised. Segments are concatenated without separator.
///
/// ```
/// use paypal_plus_plugin::webhook::event_type_to_handler;
///
/// assert_eq!(event_type_to_handler("PAYMENT.SALE.REFUNDED"), "paymentSaleRefunded");
/// assert_eq!(event_type_to_handler("RISK.DISPUTE.CREATED"), "riskDisputeCreated");
/// ```
#[must_use]
pub fn event_type_to_handler(event_type: &str) -> String {
    event_type
        .split('.')
        .enumerate()
        .map(|(index, part)| {
            let lower = part.to_lowercase();
            if index == 0 {
                return lower;
            }
            let mut chars = lower.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn handler_names_for_supported_types() {
        let names: Vec<_> = EventType::ALL.iter().map(|t| t.handler_name()).collect();
        assert_eq!(
            names,
            vec![
                "paymentSaleCompleted",
                "paymentSalePending",
                "paymentSaleRefunded",
                "paymentSaleReversed",
                "riskDisputeCreated",
            ]
        );
    }

    #[test]
    fn handler_name_normalises_mixed_case() {
        assert_eq!(event_type_to_handler("Payment.sALE.completed"), "paymentSaleCompleted");
        assert_eq!(event_type_to_handler(""), "");
        assert_eq!(event_type_to_handler("PAYMENT..SALE"), "paymentSale");
    }

    #[test]
    fn parse_is_exact() {
        assert_eq!(
            "PAYMENT.SALE.REFUNDED".parse::<EventType>(),
            Ok(EventType::PaymentSaleRefunded)
        );
        assert!("payment.sale.refunded".parse::<EventType>().is_err());
        assert!("PAYMENT.CAPTURE.COMPLETED".parse::<EventType>().is_err());
    }

    #[test]
    fn deserialize_provider_payload() {
        let event: WebhookEvent = serde_json::from_str(
            r#"{
                "id": "WH-2WR32451HC0233532-67976317FL4543714",
                "event_type": "PAYMENT.SALE.COMPLETED",
                "resource_type": "sale",
                "summary": "Payment completed for EUR 49.99 EUR",
                "create_time": "2025-01-01T10:00:00Z",
                "resource": {
                    "id": "80021663DE681814L",
                    "parent_payment": "PAY-1B56960729604235TKQQIYVY",
                    "state": "completed",
                    "amount": { "total": "49.99", "currency": "EUR" },
                    "payment_mode": "INSTANT_TRANSFER"
                }
            }"#,
        )
        .unwrap();

        assert_eq!(event.supported_type(), Some(EventType::PaymentSaleCompleted));
        let resource = event.resource.unwrap();
        let amount = resource.amount.unwrap();
        assert_eq!(amount.total, Decimal::new(4999, 2));
        assert_eq!(amount.currency, "EUR");
        assert_eq!(resource.extra["payment_mode"], "INSTANT_TRANSFER");
    }

    #[test]
    fn deserialize_event_without_resource() {
        let event: WebhookEvent =
            serde_json::from_str(r#"{"event_type": "RISK.DISPUTE.CREATED"}"#).unwrap();
        assert!(event.resource.is_none());
        assert_eq!(event.summary_or_default(), "");
    }

    #[test]
    fn deserialize_dispute_resource_without_id() {
        let event: WebhookEvent = serde_json::from_str(
            r#"{
                "event_type": "RISK.DISPUTE.CREATED",
                "summary": "A new dispute opened with Case # PP-000-042-635-094",
                "resource": {
                    "dispute_id": "PP-000-042-635-094",
                    "reason": "MERCHANDISE_OR_SERVICE_NOT_RECEIVED"
                }
            }"#,
        )
        .unwrap();

        let resource = event.resource.unwrap();
        assert_eq!(resource.id, None);
        assert_eq!(resource.txn_id(), None);
        assert_eq!(resource.extra["dispute_id"], "PP-000-042-635-094");
    }

    #[test]
    fn blank_id_has_no_txn_id() {
        let resource: Resource = serde_json::from_str(r#"{"id": "  "}"#).unwrap();
        assert_eq!(resource.txn_id(), None);
        let resource: Resource = serde_json::from_str(r#"{"id": null}"#).unwrap();
        assert_eq!(resource.txn_id(), None);
        assert_eq!(Resource::new("80021663DE681814L").txn_id(), Some("80021663DE681814L"));
    }

    proptest! {
        #[test]
        fn handler_name_drops_dots_and_keeps_letters(
            parts in proptest::collection::vec("[A-Z]{1,8}", 1..5)
        ) {
            let code = parts.join(".");
            let name = event_type_to_handler(&code);

            prop_assert!(!name.contains('.'));
            prop_assert_eq!(name.to_lowercase(), parts.concat().to_lowercase());
            prop_assert!(name.starts_with(&parts[0].to_lowercase()));
            let uppercase = name.chars().filter(char::is_ascii_uppercase).count();
            prop_assert_eq!(uppercase, parts.len() - 1);
        }
    }
}
