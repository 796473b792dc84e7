//! The session object the presentation layer talks to.
//!
//! [`Storefront`] owns the cart store, the open checkout attempt and the
//! order-placed banner. Every cart mutation is applied synchronously and
//! reported through [`StorefrontEvents::on_cart_changed`]; the only await
//! is the gateway call inside [`Storefront::submit_checkout`]. Dropping that
//! future before it resolves abandons the submission and leaves the attempt
//! idle with its form kept.

use crate::cart::{Cart, CartLineItem, CartStore, Product};
use crate::checkout::{
    validate, CheckoutError, CheckoutForm, CheckoutState, Clock, OrderReceipt, OrderRequest,
    PaymentGateway, SimulatedGateway, SubmissionController, ValidationErrors,
};
use crate::config::StorefrontConfig;
use crate::core::StateHistory;
use crate::events::StorefrontEvents;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::time::Duration;
use tracing::{info, warn};

/// Cart plus checkout for one shopping session.
#[derive(Debug)]
pub struct Storefront<G, C, E> {
    store: CartStore,
    checkout: Option<SubmissionController>,
    gateway: G,
    clock: C,
    events: E,
    config: StorefrontConfig,
    success_until: Option<DateTime<Utc>>,
    last_receipt: Option<OrderReceipt>,
    last_history: Option<StateHistory<CheckoutState>>,
}

impl<C, E> Storefront<SimulatedGateway<C>, C, E>
where
    C: Clock + Clone,
    E: StorefrontEvents,
{
    /// Session backed by [`SimulatedGateway`] waiting `config.submit_delay()`
    /// on `clock`.
    pub fn simulated(clock: C, events: E, config: StorefrontConfig) -> Self {
        let gateway = SimulatedGateway::new(clock.clone(), config.submit_delay());
        Self::new(gateway, clock, events, config)
    }
}

impl<G, C, E> Storefront<G, C, E>
where
    G: PaymentGateway,
    C: Clock,
    E: StorefrontEvents,
{
    pub fn new(gateway: G, clock: C, events: E, config: StorefrontConfig) -> Self {
        Self {
            store: CartStore::new(),
            checkout: None,
            gateway,
            clock,
            events,
            config,
            success_until: None,
            last_receipt: None,
            last_history: None,
        }
    }

    // Cart

    pub fn add_item(&mut self, product: Product) {
        let changed = self.store.add_item(product);
        self.cart_changed(changed);
    }

    pub fn remove_item(&mut self, name: &str) {
        let changed = self.store.remove_item(name);
        self.cart_changed(changed);
    }

    pub fn set_quantity(&mut self, name: &str, quantity: i64) {
        let changed = self.store.set_quantity(name, quantity);
        self.cart_changed(changed);
    }

    pub fn increment_quantity(&mut self, name: &str) {
        let changed = self.store.increment_quantity(name);
        self.cart_changed(changed);
    }

    /// Decrementing a quantity-1 line removes it.
    pub fn decrement_quantity(&mut self, name: &str) {
        let changed = self.store.decrement_quantity(name);
        self.cart_changed(changed);
    }

    pub fn clear_cart(&mut self) {
        let changed = self.store.clear();
        self.cart_changed(changed);
    }

    pub fn cart(&self) -> &Cart {
        self.store.cart()
    }

    pub fn items(&self) -> &[CartLineItem] {
        self.store.items()
    }

    pub fn total_amount(&self) -> Decimal {
        self.store.total_amount()
    }

    pub fn total_quantity(&self) -> u64 {
        self.store.total_quantity()
    }

    pub fn line_total(&self, item: &CartLineItem) -> Decimal {
        self.store.line_total(item)
    }

    // Checkout

    /// Check a form without submitting it.
    pub fn validate_checkout(&self, form: &CheckoutForm) -> ValidationErrors {
        validate(form)
    }

    /// Open a checkout attempt if none is open.
    pub fn begin_checkout(&mut self) -> &SubmissionController {
        self.checkout.get_or_insert_with(SubmissionController::new)
    }

    /// The open checkout attempt, if any.
    pub fn checkout(&self) -> Option<&SubmissionController> {
        self.checkout.as_ref()
    }

    /// Validate and submit `form` for the current cart.
    ///
    /// On success the cart is cleared, the attempt is closed and the
    /// order-placed banner is shown for the configured window. On failure the
    /// cart is untouched and the attempt stays open with the form kept.
    pub async fn submit_checkout(
        &mut self,
        form: CheckoutForm,
    ) -> Result<OrderReceipt, CheckoutError> {
        let now = self.clock.now();
        let controller = self.checkout.get_or_insert_with(SubmissionController::new);

        let request = match controller.begin(form, now) {
            Ok(form) => OrderRequest::new(form, self.store.cart()),
            Err(err) => {
                if matches!(err, CheckoutError::Invalid(_)) {
                    self.events.on_checkout_failed(&err);
                }
                return Err(err);
            }
        };

        let result = {
            let mut in_flight = InFlight {
                controller,
                clock: &self.clock,
            };
            let outcome = self.gateway.submit(&request).await;
            in_flight.controller.finish(outcome, self.clock.now())
        };

        match result {
            Ok(receipt) => {
                self.close_attempt();
                let changed = self.store.clear();
                self.cart_changed(changed);

                self.success_until =
                    chrono::Duration::from_std(self.config.success_display())
                        .ok()
                        .and_then(|window| self.clock.now().checked_add_signed(window));
                self.last_receipt = Some(receipt.clone());

                info!(
                    order_id = %receipt.order_id,
                    total = %receipt.total,
                    quantity = receipt.quantity,
                    "checkout_succeeded"
                );
                self.events.on_checkout_succeeded(&receipt);
                Ok(receipt)
            }
            Err(err) => {
                warn!(error = %err, "checkout_failed");
                self.events.on_checkout_failed(&err);
                Err(err)
            }
        }
    }

    /// Close the open checkout attempt and discard its form.
    ///
    /// A no-op when no attempt is open. Rejected while a submission is in
    /// flight.
    pub fn cancel_checkout(&mut self) -> Result<(), CheckoutError> {
        let Some(controller) = self.checkout.as_mut() else {
            return Ok(());
        };
        controller.cancel()?;
        self.close_attempt();
        self.events.on_checkout_cancelled();
        Ok(())
    }

    /// Whether the order-placed banner is currently visible.
    pub fn checkout_succeeded(&self) -> bool {
        self.success_until
            .is_some_and(|until| self.clock.now() < until)
    }

    /// Time left on the order-placed banner.
    pub fn success_banner_remaining(&self) -> Option<Duration> {
        let until = self.success_until?;
        let remaining = until.signed_duration_since(self.clock.now()).to_std().ok()?;
        (!remaining.is_zero()).then_some(remaining)
    }

    /// Receipt of the most recent successful order.
    pub fn last_receipt(&self) -> Option<&OrderReceipt> {
        self.last_receipt.as_ref()
    }

    /// Transition history of the most recently closed attempt, whether it
    /// ended in an order or a cancel.
    pub fn last_attempt_history(&self) -> Option<&StateHistory<CheckoutState>> {
        self.last_history.as_ref()
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn events(&self) -> &E {
        &self.events
    }

    fn cart_changed(&mut self, changed: bool) {
        if changed {
            self.events.on_cart_changed(self.store.items());
        }
    }

    fn close_attempt(&mut self) {
        if let Some(closed) = self.checkout.take() {
            self.last_history = Some(closed.history().clone());
        }
    }
}

/// Holds the controller across the gateway await.
///
/// If the submit future is dropped before the gateway answers, the attempt
/// is abandoned so the next submit or cancel is accepted.
struct InFlight<'a, C: Clock> {
    controller: &'a mut SubmissionController,
    clock: &'a C,
}

impl<C: Clock> Drop for InFlight<'_, C> {
    fn drop(&mut self) {
        if self.controller.is_submitting() {
            self.controller.abandon(self.clock.now());
        }
    }
}
