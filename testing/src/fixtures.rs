//! Canonical test data.

use paypal_plus_core::{Decimal, Order, OrderId, Transaction, TransactionId};

/// Entity id of the fixture order.
pub const ORDER_ID: &str = "100";

/// Increment id of the fixture order.
pub const INCREMENT_ID: &str = "000000100";

/// Provider sale id linked to the fixture order.
pub const SALE_ID: &str = "80021663DE681814L";

/// Payment method code of the fixture order.
pub const METHOD_CODE: &str = "iways_paypalplus_payment";

/// Provider payment id the sale belongs to.
pub const PARENT_PAYMENT_ID: &str = "PAY-1B56960729604235TKQQIYVY";

/// An unpaid 49.99 EUR order.
#[must_use]
pub fn order() -> Order {
    Order::new(
        OrderId::new(ORDER_ID.to_string()),
        INCREMENT_ID.to_string(),
        "buyer@example.com".to_string(),
        grand_total(),
        METHOD_CODE.to_string(),
        "EUR".to_string(),
    )
}

/// The fixture order after a full capture of its grand total.
#[must_use]
pub fn paid_order() -> Order {
    let mut order = order();
    order.payment.set_transaction_id(SALE_ID);
    order.total_paid = grand_total();
    order.email_sent = true;
    order
}

/// Grand total of the fixture order.
#[must_use]
pub fn grand_total() -> Decimal {
    Decimal::new(4999, 2)
}

/// Transaction row linking `txn_id` to the fixture order.
#[must_use]
pub fn transaction(txn_id: &str) -> Transaction {
    transaction_for(txn_id, &OrderId::new(ORDER_ID.to_string()))
}

/// Transaction row linking `txn_id` to `order_id`.
#[must_use]
pub fn transaction_for(txn_id: &str, order_id: &OrderId) -> Transaction {
    Transaction::new(TransactionId::new(txn_id.to_string()), order_id.clone())
}
