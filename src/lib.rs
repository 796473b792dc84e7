//! Cartflow: shopping cart state and checkout flow for storefront UIs.
//!
//! The crate is the state core behind a cart page. A presentation layer
//! renders it and forwards user events; everything with invariants lives
//! here:
//!
//! - **Cart**: a pure reducer over [`cart::CartAction`]s with a single owner,
//!   [`cart::CartStore`]. Lines are unique by name and never hold a zero
//!   quantity. Totals are derived on demand and rounded to cents half away
//!   from zero.
//! - **Checkout**: accumulating form validation and a
//!   [`checkout::SubmissionController`] state machine built on the
//!   [`core`] state, guard and history types.
//! - **Storefront**: the session facade tying both together, with an
//!   injectable clock for the simulated submission delay and the
//!   order-placed banner.
//!
//! # Example
//!
//! ```rust
//! use cartflow::cart::Product;
//! use cartflow::checkout::{CheckoutForm, ManualClock};
//! use cartflow::config::StorefrontConfig;
//! use cartflow::events::NoEvents;
//! use cartflow::storefront::Storefront;
//! use rust_decimal::Decimal;
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let mut shop = Storefront::simulated(ManualClock::default(), NoEvents, StorefrontConfig::default());
//!
//! shop.add_item(Product::new("Boston Fern", "$10.00")?);
//! shop.add_item(Product::new("Boston Fern", "$10.00")?);
//! shop.add_item(Product::new("English Ivy", "$5.50")?);
//! assert_eq!(shop.total_amount(), Decimal::new(2550, 2));
//! assert_eq!(shop.total_quantity(), 3);
//!
//! let form = CheckoutForm {
//!     name: "Jo".into(),
//!     email: "a@b.co".into(),
//!     address: "1 St".into(),
//!     card_number: "1234567890123456".into(),
//!     exp_date: "09/27".into(),
//!     cvv: "123".into(),
//! };
//! shop.submit_checkout(form).await?;
//!
//! assert!(shop.items().is_empty());
//! assert!(shop.checkout_succeeded());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! # }).unwrap();
//! ```

pub mod macros;

pub mod cart;
pub mod checkout;
pub mod config;
pub mod core;
pub mod events;
pub mod storefront;

pub use cart::{CartAction, CartError, CartLineItem, CartStore, Product};
pub use checkout::{CheckoutError, CheckoutForm, CheckoutState, ValidationErrors};
pub use crate::core::{Guard, State, StateHistory, StateTransition};
pub use storefront::Storefront;
