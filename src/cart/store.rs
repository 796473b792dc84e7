//! Single owner of the current cart.

use crate::cart::action::{reduce, CartAction};
use crate::cart::model::{Cart, CartLineItem, Product};
use rust_decimal::Decimal;
use tracing::debug;

/// Holds the current [`Cart`] and applies actions to it one at a time, in
/// the order they are dispatched.
#[derive(Clone, Debug, Default)]
pub struct CartStore {
    cart: Cart,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an action. Returns `true` if the cart changed.
    pub fn dispatch(&mut self, action: CartAction) -> bool {
        let kind = action.kind();
        let next = reduce(self.cart.clone(), action);
        let changed = next != self.cart;
        self.cart = next;

        debug!(
            action = kind,
            changed,
            lines = self.cart.len(),
            quantity = self.cart.total_quantity(),
            "cart_dispatch"
        );
        changed
    }

    pub fn add_item(&mut self, product: Product) -> bool {
        self.dispatch(CartAction::AddItem(product))
    }

    pub fn remove_item(&mut self, name: &str) -> bool {
        self.dispatch(CartAction::RemoveItem(name.to_string()))
    }

    pub fn set_quantity(&mut self, name: &str, quantity: i64) -> bool {
        self.dispatch(CartAction::SetQuantity {
            name: name.to_string(),
            quantity,
        })
    }

    pub fn increment_quantity(&mut self, name: &str) -> bool {
        self.dispatch(CartAction::IncrementQuantity(name.to_string()))
    }

    pub fn decrement_quantity(&mut self, name: &str) -> bool {
        self.dispatch(CartAction::DecrementQuantity(name.to_string()))
    }

    pub fn clear(&mut self) -> bool {
        self.dispatch(CartAction::Clear)
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn items(&self) -> &[CartLineItem] {
        self.cart.items()
    }

    pub fn total_amount(&self) -> Decimal {
        self.cart.total_amount()
    }

    pub fn total_quantity(&self) -> u64 {
        self.cart.total_quantity()
    }

    /// Cost × quantity of `item`, rounded to cents.
    pub fn line_total(&self, item: &CartLineItem) -> Decimal {
        item.line_total()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, cost: &str) -> Product {
        Product::new(name, cost).unwrap()
    }

    #[test]
    fn dispatch_reports_changes() {
        let mut store = CartStore::new();

        assert!(store.add_item(product("Fern", "$10.00")));
        assert!(!store.remove_item("Cactus"));
        assert!(!store.set_quantity("Cactus", 4));
        assert!(store.set_quantity("Fern", 4));
        assert!(!store.set_quantity("Fern", 4));
    }

    #[test]
    fn worked_example_totals() {
        let mut store = CartStore::new();
        store.add_item(product("Fern", "$10.00"));
        store.add_item(product("Fern", "$10.00"));
        store.add_item(product("Ivy", "$5.50"));

        assert_eq!(store.total_amount(), Decimal::new(2550, 2));
        assert_eq!(store.total_quantity(), 3);

        let fern = &store.items()[0];
        assert_eq!(store.line_total(fern), Decimal::new(2000, 2));
    }

    #[test]
    fn totals_track_mutations() {
        let mut store = CartStore::new();
        store.add_item(product("Fern", "$10.00"));
        store.add_item(product("Ivy", "$5.50"));
        store.increment_quantity("Ivy");
        store.decrement_quantity("Fern");

        assert_eq!(store.total_amount(), Decimal::new(1100, 2));
        assert_eq!(store.total_quantity(), 2);
        assert!(store.cart().get("Fern").is_none());
    }

    #[test]
    fn clear_on_empty_is_unchanged() {
        let mut store = CartStore::new();
        assert!(!store.clear());

        store.add_item(product("Fern", "$10.00"));
        assert!(store.clear());
        assert!(store.items().is_empty());
    }
}
