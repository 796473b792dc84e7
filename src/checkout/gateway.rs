//! Order submission.

use crate::cart::{Cart, CartLineItem};
use crate::checkout::clock::Clock;
use crate::checkout::form::CheckoutForm;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

/// What gets submitted when a validated checkout is placed.
///
/// Card data is reduced to its last four digits.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OrderRequest {
    pub customer: String,
    pub email: String,
    pub address: String,
    pub card_last4: String,
    pub items: Vec<CartLineItem>,
    pub total: Decimal,
    pub quantity: u64,
}

impl OrderRequest {
    pub fn new(form: &CheckoutForm, cart: &Cart) -> Self {
        Self {
            customer: form.name.clone(),
            email: form.email.clone(),
            address: form.address.clone(),
            card_last4: form.card_last4().to_string(),
            items: cart.items().to_vec(),
            total: cart.total_amount(),
            quantity: cart.total_quantity(),
        }
    }
}

/// Confirmation of a placed order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderReceipt {
    pub order_id: Uuid,
    pub total: Decimal,
    pub quantity: u64,
    pub placed_at: DateTime<Utc>,
}

/// Why a submission did not go through.
///
/// Recoverable: the cart is left untouched and the form is kept so the
/// shopper can try again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("Payment declined: {reason}")]
    Declined { reason: String },

    #[error("Payment service unavailable: {0}")]
    Unavailable(String),
}

/// Backend that accepts orders.
pub trait PaymentGateway {
    async fn submit(&self, order: &OrderRequest) -> Result<OrderReceipt, SubmissionError>;
}

/// Stand-in backend: waits a fixed delay on its clock, then accepts every
/// order.
#[derive(Clone, Debug)]
pub struct SimulatedGateway<C> {
    clock: C,
    delay: Duration,
}

impl<C: Clock> SimulatedGateway<C> {
    pub fn new(clock: C, delay: Duration) -> Self {
        Self { clock, delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl<C: Clock> PaymentGateway for SimulatedGateway<C> {
    async fn submit(&self, order: &OrderRequest) -> Result<OrderReceipt, SubmissionError> {
        self.clock.sleep(self.delay).await;
        Ok(OrderReceipt {
            order_id: Uuid::new_v4(),
            total: order.total,
            quantity: order.quantity,
            placed_at: self.clock.now(),
        })
    }
}
