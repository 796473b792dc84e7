//! Notifications sent to the presentation layer.

use crate::cart::CartLineItem;
use crate::checkout::{CheckoutError, OrderReceipt};

/// Callbacks the UI implements to re-render. Every method defaults to a
/// no-op, so implementors only override what they display.
pub trait StorefrontEvents {
    /// The cart's lines changed; `items` is the new content.
    fn on_cart_changed(&mut self, _items: &[CartLineItem]) {}

    /// An order was placed and the cart has been cleared.
    fn on_checkout_succeeded(&mut self, _receipt: &OrderReceipt) {}

    /// The form was rejected or the submission failed.
    fn on_checkout_failed(&mut self, _error: &CheckoutError) {}

    fn on_checkout_cancelled(&mut self) {}
}

/// Event sink that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoEvents;

impl StorefrontEvents for NoEvents {}

impl<E: StorefrontEvents + ?Sized> StorefrontEvents for &mut E {
    fn on_cart_changed(&mut self, items: &[CartLineItem]) {
        (**self).on_cart_changed(items);
    }

    fn on_checkout_succeeded(&mut self, receipt: &OrderReceipt) {
        (**self).on_checkout_succeeded(receipt);
    }

    fn on_checkout_failed(&mut self, error: &CheckoutError) {
        (**self).on_checkout_failed(error);
    }

    fn on_checkout_cancelled(&mut self) {
        (**self).on_checkout_cancelled();
    }
}
