//! Integration tests for webhook processing against the in-memory host.

use paypal_plus_core::{Decimal, OrderState};
use paypal_plus_plugin::webhook::{
    Outcome, Resource, WebhookEnvironment, WebhookEvent, WebhookProcessor,
};
use paypal_plus_plugin::{EventType, PluginConfig, WebhookError};
use paypal_plus_testing::mocks::{
    InMemoryHost, InMemoryOrderRepository, InMemoryTransactionRepository, RecordingNotifier,
    SentEmail,
};
use paypal_plus_testing::fixtures;
use std::sync::Arc;

type TestEnv =
    WebhookEnvironment<InMemoryTransactionRepository, InMemoryOrderRepository, RecordingNotifier>;

/// Create a host holding the fixture order, linked to the fixture sale id.
fn seeded_host() -> InMemoryHost {
    let host = InMemoryHost::new();
    host.seed(fixtures::order(), &[fixtures::SALE_ID]);
    host
}

/// Route processor logs through the test harness.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("paypal_plus_plugin=debug")
        .with_test_writer()
        .try_init();
}

fn create_test_env(host: &InMemoryHost) -> TestEnv {
    init_tracing();

    WebhookEnvironment::new(
        host.transactions.clone(),
        host.orders.clone(),
        host.notifier.clone(),
        Arc::new(host.clock.clone()),
        PluginConfig::default(),
    )
}

fn sale_event(event_type: &str) -> WebhookEvent {
    WebhookEvent::new(
        event_type,
        Resource::new(fixtures::SALE_ID)
            .with_parent_payment(fixtures::PARENT_PAYMENT_ID)
            .with_amount(fixtures::grand_total(), "EUR"),
    )
    .with_summary("Payment completed for EUR 49.99 EUR")
}

#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn test_unsupported_event_types_touch_nothing() {
    let host = seeded_host();
    let env = create_test_env(&host);

    for event_type in [
        Some("PAYMENT.CAPTURE.COMPLETED"),
        Some("payment.sale.completed"),
        Some(""),
        None,
    ] {
        let mut event = sale_event("PAYMENT.SALE.COMPLETED");
        event.event_type = event_type.map(ToString::to_string);

        let mut processor = WebhookProcessor::new(&env);
        let outcome = processor.process_webhook_request(&event).await.unwrap();

        assert_eq!(outcome, Outcome::Ignored);
        assert!(processor.cached_order().is_none());
    }

    assert_eq!(host.transactions.lookups(), 0);
    assert_eq!(host.orders.loads(), 0);
    assert_eq!(host.orders.saves(), 0);
    assert_eq!(host.orders.get(fixtures::ORDER_ID).unwrap(), fixtures::order());
}

#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn test_sale_completed_captures_and_notifies_customer() {
    let host = seeded_host();
    let env = create_test_env(&host);

    let mut processor = WebhookProcessor::new(&env);
    let outcome = processor
        .process_webhook_request(&sale_event("PAYMENT.SALE.COMPLETED"))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        Outcome::Processed {
            event_type: EventType::PaymentSaleCompleted,
            handler: "paymentSaleCompleted".to_string(),
            order_id: fixtures::order().id,
        }
    );

    let order = host.orders.get(fixtures::ORDER_ID).unwrap();
    assert_eq!(order.payment.transaction_id.as_deref(), Some(fixtures::SALE_ID));
    assert_eq!(order.payment.currency_code, "EUR");
    assert_eq!(
        order.payment.parent_transaction_id.as_deref(),
        Some(fixtures::PARENT_PAYMENT_ID)
    );
    assert!(order.payment.is_transaction_closed);
    assert_eq!(order.total_paid, fixtures::grand_total());
    assert_eq!(order.invoices.len(), 1);
    assert_eq!(order.invoices[0].amount, fixtures::grand_total());
    assert_eq!(order.state, OrderState::Processing);
    assert!(order.email_sent);

    // save, email, save
    assert_eq!(host.orders.saves(), 2);
    assert!(!host.orders.saved_snapshots()[0].email_sent);
    assert_eq!(
        host.notifier.sent(),
        vec![SentEmail::NewOrder {
            increment_id: fixtures::INCREMENT_ID.to_string(),
            to: "buyer@example.com".to_string(),
        }]
    );
    let last = order.status_history.last().unwrap();
    assert_eq!(last.comment, "Notified customer about invoice #000000100-1.");
    assert_eq!(last.is_customer_notified, Some(true));
}

#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn test_risk_dispute_adds_exactly_one_comment() {
    let host = seeded_host();
    let env = create_test_env(&host);
    let summary = "A new dispute opened with Case # PP-000-042-635-094";
    let event = WebhookEvent::new("RISK.DISPUTE.CREATED", Resource::new(fixtures::SALE_ID))
        .with_summary(summary);

    WebhookProcessor::new(&env)
        .process_webhook_request(&event)
        .await
        .unwrap();

    let order = host.orders.get(fixtures::ORDER_ID).unwrap();
    assert_eq!(order.status_history.len(), 1);
    assert_eq!(order.status_history[0].comment, summary);
    assert_eq!(order.status_history[0].is_customer_notified, Some(false));
    assert_eq!(host.orders.saves(), 1);
    assert!(host.notifier.sent().is_empty());
}

#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn test_sale_refunded_creates_credit_memo() {
    let host = InMemoryHost::new();
    host.seed(fixtures::paid_order(), &[fixtures::SALE_ID, "REFUND-7"]);
    let env = create_test_env(&host);

    let event = WebhookEvent::new(
        "PAYMENT.SALE.REFUNDED",
        Resource::new("REFUND-7")
            .with_parent_payment(fixtures::PARENT_PAYMENT_ID)
            .with_amount(fixtures::grand_total(), "EUR"),
    );
    WebhookProcessor::new(&env)
        .process_webhook_request(&event)
        .await
        .unwrap();

    let order = host.orders.get(fixtures::ORDER_ID).unwrap();
    assert_eq!(order.payment.transaction_id.as_deref(), Some("REFUND-7"));
    assert!(order.payment.is_transaction_closed);
    assert_eq!(order.total_refunded, fixtures::grand_total());
    assert_eq!(order.state, OrderState::Closed);
    assert_eq!(
        host.notifier.sent(),
        vec![SentEmail::CreditMemo {
            increment_id: fixtures::INCREMENT_ID.to_string(),
            credit_memo: "000000100-1".to_string(),
            to: "buyer@example.com".to_string(),
        }]
    );

    let notified: Vec<_> = order
        .status_history
        .iter()
        .filter(|entry| entry.comment.starts_with("Notified customer about creditmemo"))
        .collect();
    assert_eq!(notified.len(), 1);
    assert_eq!(notified[0].is_customer_notified, Some(true));
    assert_eq!(host.orders.saves(), 2);
}

#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn test_sale_pending_records_review_note() {
    let host = seeded_host();
    let env = create_test_env(&host);
    let event = WebhookEvent::new("PAYMENT.SALE.PENDING", Resource::new(fixtures::SALE_ID))
        .with_summary("Payment pending for EUR 49.99 EUR");

    WebhookProcessor::new(&env)
        .process_webhook_request(&event)
        .await
        .unwrap();

    let order = host.orders.get(fixtures::ORDER_ID).unwrap();
    assert_eq!(order.state, OrderState::New);
    assert_eq!(order.status, "pending");
    assert!(!order.payment.is_transaction_closed);
    assert_eq!(order.payment.transaction_id.as_deref(), Some(fixtures::SALE_ID));
    assert!(order.status_history[0]
        .comment
        .starts_with("Payment pending for EUR 49.99 EUR"));
    assert_eq!(host.orders.saves(), 1);
    assert!(order.status_history[0]
        .comment
        .contains("There is no update for the transaction."));
}

#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn test_sale_pending_after_capture_keeps_processing() {
    let host = seeded_host();
    let env = create_test_env(&host);
    WebhookProcessor::new(&env)
        .process_webhook_request(&sale_event("PAYMENT.SALE.COMPLETED"))
        .await
        .unwrap();

    let pending = WebhookEvent::new("PAYMENT.SALE.PENDING", Resource::new(fixtures::SALE_ID))
        .with_summary("Payment pending for EUR 49.99 EUR");
    WebhookProcessor::new(&env)
        .process_webhook_request(&pending)
        .await
        .unwrap();

    let order = host.orders.get(fixtures::ORDER_ID).unwrap();
    assert_eq!(order.state, OrderState::Processing);
    assert_eq!(order.status, "processing");
    assert!(!order.payment.is_transaction_closed);
    assert!(order
        .status_history
        .last()
        .unwrap()
        .comment
        .starts_with("Payment pending for EUR 49.99 EUR"));
}

#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn test_sale_reversed_sets_status_and_comments() {
    let host = seeded_host();
    let env = create_test_env(&host);
    let event = WebhookEvent::new("PAYMENT.SALE.REVERSED", Resource::new(fixtures::SALE_ID))
        .with_summary("A EUR 49.99 EUR sale payment was reversed");

    WebhookProcessor::new(&env)
        .process_webhook_request(&event)
        .await
        .unwrap();

    let order = host.orders.get(fixtures::ORDER_ID).unwrap();
    assert_eq!(order.status, "paypal_reversed");
    assert_eq!(order.status_history.len(), 1);
    assert_eq!(order.status_history[0].status.as_deref(), Some("paypal_reversed"));
    assert_eq!(order.status_history[0].is_customer_notified, Some(false));

    let snapshots = host.orders.saved_snapshots();
    assert_eq!(snapshots.len(), 2);
    assert_eq!(snapshots[0].status, "paypal_reversed");
    assert!(snapshots[0].status_history.is_empty());
}

#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn test_order_resolution_is_memoised() {
    let host = seeded_host();
    let env = create_test_env(&host);
    let event = sale_event("PAYMENT.SALE.COMPLETED");

    let mut processor = WebhookProcessor::new(&env);
    let first = processor.order(&event).await.unwrap().clone();
    let second = processor.order(&event).await.unwrap().clone();

    assert_eq!(first, second);
    assert_eq!(host.transactions.lookups(), 1);
    assert_eq!(host.orders.loads(), 1);

    processor.process_webhook_request(&event).await.unwrap();
    assert_eq!(host.transactions.lookups(), 1);
    assert_eq!(host.orders.loads(), 1);
}

#[tokio::test]
async fn test_unknown_transaction_is_order_not_found() {
    let host = seeded_host();
    let env = create_test_env(&host);
    let event = WebhookEvent::new("RISK.DISPUTE.CREATED", Resource::new("UNKNOWN-TXN"));

    let err = WebhookProcessor::new(&env)
        .process_webhook_request(&event)
        .await
        .unwrap_err();

    assert_eq!(err, WebhookError::OrderNotFound);
    assert_eq!(err.to_string(), "Order not found.");
    assert_eq!(host.orders.saves(), 0);
}

#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn test_resource_without_id_is_order_not_found() {
    let host = seeded_host();
    let env = create_test_env(&host);
    let mut resource = Resource::new(fixtures::SALE_ID);
    resource.id = None;
    resource
        .extra
        .insert("dispute_id".to_string(), "PP-000-042-635-094".into());
    let event = WebhookEvent::new("RISK.DISPUTE.CREATED", resource);

    let mut processor = WebhookProcessor::new(&env);
    let err = processor.process_webhook_request(&event).await.unwrap_err();

    assert_eq!(err, WebhookError::OrderNotFound);
    assert!(processor.cached_order().is_none());
    assert_eq!(host.transactions.lookups(), 0);
    assert_eq!(host.orders.saves(), 0);
}

#[tokio::test]
async fn test_transaction_without_order_is_order_not_found() {
    let host = InMemoryHost::new();
    host.transactions.insert(fixtures::transaction(fixtures::SALE_ID));
    let env = create_test_env(&host);

    let err = WebhookProcessor::new(&env)
        .process_webhook_request(&sale_event("PAYMENT.SALE.COMPLETED"))
        .await
        .unwrap_err();

    assert_eq!(err, WebhookError::OrderNotFound);
    assert_eq!(host.orders.loads(), 1);
}

#[tokio::test]
async fn test_missing_resource_is_reported() {
    let host = seeded_host();
    let env = create_test_env(&host);
    let event = WebhookEvent {
        event_type: Some("RISK.DISPUTE.CREATED".to_string()),
        ..WebhookEvent::default()
    };

    let err = WebhookProcessor::new(&env)
        .process_webhook_request(&event)
        .await
        .unwrap_err();

    assert_eq!(err, WebhookError::MissingResource);
    assert!(err.is_payload_error());
    assert_eq!(host.transactions.lookups(), 0);
}

#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn test_failed_email_keeps_first_save() {
    let host = seeded_host();
    host.notifier.fail_sends();
    let env = create_test_env(&host);

    let err = WebhookProcessor::new(&env)
        .process_webhook_request(&sale_event("PAYMENT.SALE.COMPLETED"))
        .await
        .unwrap_err();

    assert!(matches!(err, WebhookError::Host(ref host_err) if host_err.is_infrastructure()));
    assert_eq!(host.orders.saves(), 1);
    let order = host.orders.get(fixtures::ORDER_ID).unwrap();
    assert_eq!(order.total_paid, fixtures::grand_total());
    assert!(!order.email_sent);
}

#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn test_refund_exceeding_payment_is_rejected_before_save() {
    let host = seeded_host();
    let env = create_test_env(&host);
    let event = WebhookEvent::new(
        "PAYMENT.SALE.REFUNDED",
        Resource::new(fixtures::SALE_ID).with_amount(Decimal::new(100, 0), "EUR"),
    );

    let err = WebhookProcessor::new(&env)
        .process_webhook_request(&event)
        .await
        .unwrap_err();

    assert!(matches!(err, WebhookError::Host(_)));
    assert_eq!(host.orders.saves(), 0);
}

#[test]
fn test_supported_events_allow_list() {
    let codes: Vec<_> = WebhookProcessor::<
        InMemoryTransactionRepository,
        InMemoryOrderRepository,
        RecordingNotifier,
    >::supported_webhook_events()
    .iter()
    .map(|event_type| event_type.code())
    .collect();

    assert_eq!(
        codes,
        vec![
            "PAYMENT.SALE.COMPLETED",
            "PAYMENT.SALE.PENDING",
            "PAYMENT.SALE.REFUNDED",
            "PAYMENT.SALE.REVERSED",
            "RISK.DISPUTE.CREATED",
        ]
    );
}
