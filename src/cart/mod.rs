//! Cart state: products, line items, the reducer and its owner.
//!
//! All cart mutations go through [`CartAction`] values applied by the pure
//! [`reduce`] function. [`CartStore`] holds the current cart and applies
//! actions in dispatch order. Totals are derived from the lines on every
//! query and never stored.

mod action;
mod error;
mod model;
mod price;
mod store;

pub use action::{reduce, CartAction};
pub use error::CartError;
pub use model::{Cart, CartLineItem, Product};
pub use price::{
    format_amount, round_amount, Price, CENTS_SCALE, CURRENCY_SYMBOL, MAX_FRACTION_DIGITS,
    MAX_INTEGER_DIGITS,
};
pub use store::CartStore;
