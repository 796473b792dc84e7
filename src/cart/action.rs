//! Cart actions and the pure reducer that applies them.

use crate::cart::model::{Cart, CartLineItem, Product};
use std::num::NonZeroU32;

/// A single mutation request against the cart.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CartAction {
    /// Add one unit; an existing line with the same name is incremented and
    /// the rest of the payload is ignored.
    AddItem(Product),

    /// Remove the line with this name. Unknown names are ignored.
    RemoveItem(String),

    /// Set the quantity of an existing line; `quantity <= 0` removes it.
    SetQuantity { name: String, quantity: i64 },

    /// `SetQuantity` with the current quantity plus one.
    IncrementQuantity(String),

    /// `SetQuantity` with the current quantity minus one; a quantity-1
    /// line is removed.
    DecrementQuantity(String),

    /// Remove every line.
    Clear,
}

impl CartAction {
    /// Short action name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AddItem(_) => "add_item",
            Self::RemoveItem(_) => "remove_item",
            Self::SetQuantity { .. } => "set_quantity",
            Self::IncrementQuantity(_) => "increment_quantity",
            Self::DecrementQuantity(_) => "decrement_quantity",
            Self::Clear => "clear",
        }
    }
}

/// Apply `action` to `cart`, returning the next cart.
///
/// After every call no line has a quantity of zero and names stay unique.
///
/// ```
/// use cartflow::cart::{reduce, Cart, CartAction, Product};
///
/// let fern = Product::new("Boston Fern", "$18.00")?;
/// let cart = reduce(Cart::new(), CartAction::AddItem(fern.clone()));
/// let cart = reduce(cart, CartAction::AddItem(fern));
/// assert_eq!(cart.get("Boston Fern").map(|i| i.quantity()), Some(2));
///
/// let cart = reduce(cart, CartAction::SetQuantity { name: "Boston Fern".into(), quantity: 0 });
/// assert!(cart.is_empty());
/// # Ok::<(), cartflow::cart::CartError>(())
/// ```
pub fn reduce(mut cart: Cart, action: CartAction) -> Cart {
    match action {
        CartAction::AddItem(product) => match cart.get_mut(product.name()) {
            Some(existing) => {
                let bumped = existing.quantity_nonzero().saturating_add(1);
                existing.set_quantity(bumped);
            }
            None => cart.push(CartLineItem::new(product)),
        },
        CartAction::RemoveItem(name) => cart.retain_except(&name),
        CartAction::SetQuantity { name, quantity } => set_quantity(&mut cart, &name, quantity),
        CartAction::IncrementQuantity(name) => {
            if let Some(current) = current_quantity(&cart, &name) {
                set_quantity(&mut cart, &name, current + 1);
            }
        }
        CartAction::DecrementQuantity(name) => {
            if let Some(current) = current_quantity(&cart, &name) {
                set_quantity(&mut cart, &name, current - 1);
            }
        }
        CartAction::Clear => cart.clear(),
    }
    cart
}

fn current_quantity(cart: &Cart, name: &str) -> Option<i64> {
    cart.get(name).map(|item| i64::from(item.quantity()))
}

fn set_quantity(cart: &mut Cart, name: &str, quantity: i64) {
    let Some(index) = cart.position(name) else {
        return;
    };

    if quantity <= 0 {
        cart.remove_at(index);
        return;
    }

    let clamped = u32::try_from(quantity).unwrap_or(u32::MAX);
    if let (Some(quantity), Some(item)) = (NonZeroU32::new(clamped), cart.get_mut(name)) {
        item.set_quantity(quantity);
    }
}
