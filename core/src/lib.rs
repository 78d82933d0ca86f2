//! # PayPal Plus Core
//!
//! Host-side domain model and dependency seams for the PayPal Plus webhook
//! gateway.
//!
//! The e-commerce host owns orders, payments, invoices, credit memos and the
//! transaction lookup table. This crate describes that object graph as plain
//! owned data plus a handful of traits the plugin talks through.
//!
//! ## Core Concepts
//!
//! - **Order**: Host aggregate, loaded by id, mutated in place, persisted explicitly
//! - **Payment**: Sub-entity of the order, mutated through notification methods
//! - **Reducer**: `(Order, Action, Environment) → (Order', Effects)`
//! - **Effect**: Description of a side effect (persist, email), executed later
//! - **Environment**: Injected host collaborators via traits
//!
//! ## Example
//!
//! ```ignore
//! use paypal_plus_core::reducer::Reducer;
//! use paypal_plus_core::effect::Effect;
//!
//! impl Reducer for DisputeReducer {
//!     type State = Order;
//!     type Action = WebhookEvent;
//!     type Environment = WebhookEnvironment;
//!     type Error = WebhookError;
//!
//!     fn reduce(
//!         &self,
//!         order: &mut Order,
//!         event: WebhookEvent,
//!         env: &WebhookEnvironment,
//!     ) -> Result<Vec<Effect>, WebhookError> {
//!         order.add_status_history_comment(summary, None, env.clock.now());
//!         Ok(vec![Effect::persist(order)])
//!     }
//! }
//! ```

pub mod environment;
pub mod error;
pub mod order;
pub mod types;

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use error::{HostError, Result};
pub use order::{
    CreditMemo, Invoice, Order, OrderState, Payment, ReviewAction, StatusHistoryEntry, Transaction,
};
pub use rust_decimal::Decimal;
pub use types::{OrderId, TransactionId};

/// Reducer module - The core trait for webhook business logic
///
/// Reducers mutate the loaded order in memory and describe the I/O that
/// has to follow. They never call the host themselves.
pub mod reducer {
    use super::effect::Effect;

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The input this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    /// - `Error`: Why an action could not be applied
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// The error type returned when the action cannot be applied
        type Error;

        /// Reduce an action into state changes and effects
        ///
        /// # Arguments
        ///
        /// - `state`: Mutable reference to current state
        /// - `action`: The action to process
        /// - `env`: Reference to injected dependencies
        ///
        /// # Returns
        ///
        /// Effects to be executed in order by the caller
        ///
        /// # Errors
        ///
        /// Returns `Self::Error` when the action is malformed or the state
        /// rejects the transition. State may already be partially mutated.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> Result<Vec<Effect>, Self::Error>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects are values. Each persisting or emailing effect carries a snapshot
/// of the order taken at the moment the reducer produced it, so the executor
/// replays the exact save/email/save sequence the handler described.
pub mod effect {
    use crate::order::{CreditMemo, Order};

    /// Effect type - describes a side effect to be executed
    #[derive(Clone, Debug, PartialEq)]
    pub enum Effect {
        /// No-op effect
        None,

        /// Run effects sequentially
        Sequential(Vec<Effect>),

        /// Persist the order snapshot
        PersistOrder(Box<Order>),

        /// Send (or queue) the new order email for the snapshot
        SendNewOrderEmail(Box<Order>),

        /// Send the credit memo email
        SendCreditMemoEmail {
            /// Order the credit memo belongs to
            order: Box<Order>,
            /// The credit memo to mail
            credit_memo: CreditMemo,
        },
    }

    impl Effect {
        /// Snapshot the order into a persist effect
        #[must_use]
        pub fn persist(order: &Order) -> Self {
            Self::PersistOrder(Box::new(order.clone()))
        }

        /// Chain effects to run sequentially
        #[must_use]
        pub const fn chain(effects: Vec<Self>) -> Self {
            Self::Sequential(effects)
        }

        /// Flatten nested sequences into execution order, dropping no-ops.
        #[must_use]
        pub fn into_sequence(self) -> Vec<Self> {
            match self {
                Self::None => Vec::new(),
                Self::Sequential(effects) => {
                    effects.into_iter().flat_map(Self::into_sequence).collect()
                },
                other => vec![other],
            }
        }

        /// Short label used in logs.
        #[must_use]
        pub const fn kind(&self) -> &'static str {
            match self {
                Self::None => "none",
                Self::Sequential(_) => "sequential",
                Self::PersistOrder(_) => "persist_order",
                Self::SendNewOrderEmail(_) => "send_new_order_email",
                Self::SendCreditMemoEmail { .. } => "send_credit_memo_email",
            }
        }
    }
}
