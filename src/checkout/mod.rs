//! Checkout: form validation, the submission state machine and the
//! simulated order backend.

mod clock;
mod controller;
mod error;
mod form;
mod gateway;
mod validation;

pub use clock::{Clock, ManualClock, SystemClock};
pub use controller::{CheckoutState, SubmissionController};
pub use error::CheckoutError;
pub use form::{CheckoutField, CheckoutForm};
pub use gateway::{OrderReceipt, OrderRequest, PaymentGateway, SimulatedGateway, SubmissionError};
pub use validation::{validate, FieldError, ValidationErrors};
