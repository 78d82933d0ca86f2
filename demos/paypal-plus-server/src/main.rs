//! PayPal Plus webhook server.
//!
//! Runs the webhook dispatcher against an in-memory host seeded with one
//! demo order (`000000100`, 49.99 EUR) linked to sale `80021663DE681814L`.
//!
//! # Usage
//!
//! ```bash
//! RUST_LOG=info,paypal_plus_plugin=debug cargo run -p paypal-plus-server
//! ```
//!
//! # Example Requests
//!
//! ```bash
//! curl -X POST http://localhost:3000/webhooks/paypal-plus \
//!   -H "Content-Type: application/json" \
//!   -d '{
//!     "event_type": "PAYMENT.SALE.COMPLETED",
//!     "summary": "Payment completed for EUR 49.99 EUR",
//!     "resource": {
//!       "id": "80021663DE681814L",
//!       "parent_payment": "PAY-1B56960729604235TKQQIYVY",
//!       "amount": { "total": "49.99", "currency": "EUR" }
//!     }
//!   }'
//!
//! curl http://localhost:3000/admin/payment-methods/third-party
//! curl http://localhost:3000/metrics
//! ```

use axum::routing::get;
use metrics_exporter_prometheus::PrometheusBuilder;
use paypal_plus_core::environment::SystemClock;
use paypal_plus_plugin::{ThirdPartyPaymentMethods, WebhookEnvironment};
use paypal_plus_testing::fixtures;
use paypal_plus_testing::mocks::{InMemoryHost, StaticPaymentMethods, StaticScopeConfig};
use paypal_plus_web::{app_router, AppState, ServerConfig};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.log_filter)?)
        .init();

    info!("=== PayPal Plus Webhook Server ===");

    let prometheus_handle = PrometheusBuilder::new().install_recorder()?;

    let host = InMemoryHost {
        scope_config: StaticScopeConfig::new()
            .with("payment/checkmo/title", "Check / Money order")
            .with("payment/banktransfer/title", "Bank Transfer Payment")
            .with("payment/paypal_express/title", "PayPal Express Checkout"),
        payment_methods: StaticPaymentMethods::new(
            &["checkmo", "banktransfer", "paypal_express", "iways_paypalplus_payment"],
            &[
                "checkmo",
                "banktransfer",
                "free",
                "paypal_express",
                "iways_paypalplus_payment",
            ],
        ),
        ..InMemoryHost::new()
    };
    host.seed(fixtures::order(), &[fixtures::SALE_ID]);
    info!(
        order = fixtures::INCREMENT_ID,
        txn_id = fixtures::SALE_ID,
        "Seeded in-memory host"
    );

    let env = WebhookEnvironment::new(
        host.transactions.clone(),
        host.orders.clone(),
        host.notifier.clone(),
        Arc::new(SystemClock),
        config.plugin.clone(),
    );
    let payment_methods = ThirdPartyPaymentMethods::new(
        Arc::new(host.payment_methods.clone()),
        Arc::new(host.scope_config.clone()),
        config.plugin.clone(),
    );
    let app = app_router(AppState::new(env, payment_methods)).route(
        "/metrics",
        get(|| async move { prometheus_handle.render() }),
    );

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;

    info!("Server listening on http://{}", config.bind_addr);
    info!("API Endpoints:");
    info!("  POST   /webhooks/paypal-plus               - Provider webhooks");
    info!("  GET    /admin/payment-methods/third-party  - Dropdown options");
    info!("  GET    /health                             - Health check");
    info!("  GET    /metrics                            - Prometheus metrics");

    axum::serve(listener, app).await?;

    Ok(())
}
