//! Cart error types.

use thiserror::Error;

/// Errors raised while building cart data at the boundary.
///
/// Cart mutations themselves never fail: removing or updating an unknown
/// item is a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// The cost string does not follow the price grammar.
    #[error("Malformed cost '{input}': {reason}")]
    MalformedCost { input: String, reason: String },

    /// Products are keyed by name, so an empty name cannot be stored.
    #[error("Product name must not be empty")]
    EmptyName,
}

impl CartError {
    pub(crate) fn malformed(input: &str, reason: impl Into<String>) -> Self {
        Self::MalformedCost {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}
