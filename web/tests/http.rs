//! HTTP tests for the webhook server router.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::http::StatusCode;
use axum_test::TestServer;
use paypal_plus_core::OrderState;
use paypal_plus_plugin::{PluginConfig, ThirdPartyPaymentMethods, WebhookEnvironment};
use paypal_plus_testing::fixtures;
use paypal_plus_testing::mocks::{InMemoryHost, StaticPaymentMethods, StaticScopeConfig};
use paypal_plus_web::handlers::WebhookResponse;
use paypal_plus_web::{app_router, AppState, CORRELATION_ID_HEADER};
use serde_json::{json, Value};
use std::sync::Arc;

fn create_test_host() -> InMemoryHost {
    let host = InMemoryHost {
        scope_config: StaticScopeConfig::new().with("payment/checkmo/title", "Check / Money order"),
        payment_methods: StaticPaymentMethods::new(
            &["checkmo", "paypal_express", "iways_paypalplus_payment"],
            &["checkmo", "paypal_express", "iways_paypalplus_payment"],
        ),
        ..InMemoryHost::new()
    };
    host.seed(fixtures::order(), &[fixtures::SALE_ID]);
    host
}

fn create_test_server(host: &InMemoryHost) -> TestServer {
    let env = WebhookEnvironment::new(
        host.transactions.clone(),
        host.orders.clone(),
        host.notifier.clone(),
        Arc::new(host.clock.clone()),
        PluginConfig::default(),
    );
    let payment_methods = ThirdPartyPaymentMethods::new(
        Arc::new(host.payment_methods.clone()),
        Arc::new(host.scope_config.clone()),
        PluginConfig::default(),
    );

    TestServer::new(app_router(AppState::new(env, payment_methods))).unwrap()
}

fn completed_sale() -> Value {
    json!({
        "id": "WH-2WR32451HC0233532-67976317FL4543714",
        "event_type": "PAYMENT.SALE.COMPLETED",
        "resource_type": "sale",
        "summary": "Payment completed for EUR 49.99 EUR",
        "resource": {
            "id": fixtures::SALE_ID,
            "parent_payment": fixtures::PARENT_PAYMENT_ID,
            "state": "completed",
            "amount": { "total": "49.99", "currency": "EUR" }
        }
    })
}

#[tokio::test]
async fn test_health() {
    let host = create_test_host();
    let server = create_test_server(&host);

    let response = server.get("/health").await;

    response.assert_status_ok();
    assert_eq!(response.text(), "ok");
    assert!(response.headers().contains_key(CORRELATION_ID_HEADER));
}

#[tokio::test]
async fn test_completed_sale_is_processed() {
    let host = create_test_host();
    let server = create_test_server(&host);

    let response = server.post("/webhooks/paypal-plus").json(&completed_sale()).await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "processed");
    assert_eq!(body["handler"], "paymentSaleCompleted");
    assert_eq!(
        response.json::<WebhookResponse>(),
        WebhookResponse::Processed {
            handler: "paymentSaleCompleted".to_string(),
            order_id: fixtures::ORDER_ID.to_string(),
        }
    );

    let order = host.orders.get(fixtures::ORDER_ID).unwrap();
    assert_eq!(order.state, OrderState::Processing);
    assert_eq!(order.total_paid, fixtures::grand_total());
    assert_eq!(host.notifier.sent().len(), 1);
}

#[tokio::test]
async fn test_unsupported_event_is_ignored() {
    let host = create_test_host();
    let server = create_test_server(&host);

    let response = server
        .post("/webhooks/paypal-plus")
        .json(&json!({
            "event_type": "PAYMENT.AUTHORIZATION.CREATED",
            "resource": { "id": fixtures::SALE_ID }
        }))
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({ "status": "ignored" }));
    assert_eq!(host.transactions.lookups(), 0);
    assert_eq!(host.orders.saves(), 0);
}

#[tokio::test]
async fn test_unknown_transaction_is_404() {
    let host = create_test_host();
    let server = create_test_server(&host);

    let response = server
        .post("/webhooks/paypal-plus")
        .json(&json!({
            "event_type": "RISK.DISPUTE.CREATED",
            "summary": "A new dispute opened",
            "resource": { "id": "UNKNOWN" }
        }))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    response.assert_json(&json!({ "code": "NOT_FOUND", "message": "Order not found." }));
}

#[tokio::test]
async fn test_dispute_without_resource_id_is_404() {
    let host = create_test_host();
    let server = create_test_server(&host);

    let response = server
        .post("/webhooks/paypal-plus")
        .json(&json!({
            "id": "WH-4M0448861G563140B-9EX36365822141321",
            "event_type": "RISK.DISPUTE.CREATED",
            "resource_type": "dispute",
            "summary": "A new dispute opened with Case # PP-000-042-635-094",
            "resource": {
                "dispute_id": "PP-000-042-635-094",
                "reason": "MERCHANDISE_OR_SERVICE_NOT_RECEIVED",
                "status": "OPEN",
                "dispute_amount": { "currency_code": "EUR", "value": "49.99" }
            }
        }))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    response.assert_json(&json!({ "code": "NOT_FOUND", "message": "Order not found." }));
    assert_eq!(host.transactions.lookups(), 0);
    assert!(host.orders.get(fixtures::ORDER_ID).unwrap().status_history.is_empty());
}

#[tokio::test]
async fn test_missing_resource_is_422() {
    let host = create_test_host();
    let server = create_test_server(&host);

    let response = server
        .post("/webhooks/paypal-plus")
        .json(&json!({ "event_type": "PAYMENT.SALE.PENDING" }))
        .expect_failure()
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["message"], "Event resource not found.");
}

#[tokio::test]
async fn test_storage_failure_is_500() {
    let host = create_test_host();
    host.orders.fail_saves();
    let server = create_test_server(&host);

    let response = server
        .post("/webhooks/paypal-plus")
        .json(&completed_sale())
        .expect_failure()
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert!(host.notifier.sent().is_empty());
}

#[tokio::test]
async fn test_third_party_payment_methods() {
    let host = create_test_host();
    let server = create_test_server(&host);

    let response = server.get("/admin/payment-methods/third-party").await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Vec<Value>>(),
        vec![
            json!({ "value": "", "label": "--Please Select--" }),
            json!({ "value": "checkmo", "label": "Check / Money order" }),
        ]
    );
}
