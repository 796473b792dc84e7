//! Core state machine types.
//!
//! - States via the `State` trait
//! - Guard predicates deciding which requests a state accepts
//! - Immutable transition history
//!
//! Everything here is pure; the checkout controller drives it.

mod guard;
mod history;
mod state;

pub use guard::Guard;
pub use history::{StateHistory, StateTransition};
pub use state::State;
