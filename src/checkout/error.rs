//! Checkout error types.

use crate::checkout::gateway::SubmissionError;
use crate::checkout::validation::ValidationErrors;
use thiserror::Error;

/// Errors returned by checkout requests.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CheckoutError {
    #[error("Checkout form has {} invalid field(s)", .0.len())]
    Invalid(ValidationErrors),

    #[error("A checkout submission is already in progress")]
    SubmissionInProgress,

    #[error("Checkout has already completed")]
    AlreadyCompleted,

    #[error("Checkout cannot be cancelled while {state}")]
    NotCancellable { state: String },

    #[error("No submission is in flight (state: {state})")]
    NotSubmitting { state: String },

    #[error("Checkout submission failed: {0}")]
    Submission(#[from] SubmissionError),
}

impl CheckoutError {
    /// Field errors, when the form was rejected.
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Invalid(errors) => Some(errors),
            _ => None,
        }
    }
}
