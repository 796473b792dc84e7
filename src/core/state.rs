//! Core State trait for state machine states.
//!
//! Every state the checkout machinery moves through implements this trait,
//! which exposes pure inspection methods used by guards, history and logging.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for state machine states.
///
/// All methods are pure. States are plain values describing where a
/// checkout attempt currently is.
///
/// # Required Traits
///
/// - `Clone`: states are copied into the transition history
/// - `PartialEq`: guards and transitions compare states
/// - `Debug`: diagnostics
/// - `Serialize` + `Deserialize`: history can be exported with the attempt
///
/// Most implementations are generated with [`state_enum!`](crate::state_enum).
///
/// # Example
///
/// ```rust
/// use cartflow::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum PaymentState {
///     Pending,
///     Authorised,
///     Declined,
/// }
///
/// impl State for PaymentState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Pending => "Pending",
///             Self::Authorised => "Authorised",
///             Self::Declined => "Declined",
///         }
///     }
///
///     fn is_final(&self) -> bool {
///         matches!(self, Self::Authorised | Self::Declined)
///     }
///
///     fn is_error(&self) -> bool {
///         matches!(self, Self::Declined)
///     }
/// }
///
/// assert!(PaymentState::Declined.is_error());
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Name used in logs and error messages.
    fn name(&self) -> &str;

    /// Whether no further transitions are expected from this state.
    ///
    /// Defaults to `false`.
    fn is_final(&self) -> bool {
        false
    }

    /// Whether this state represents a failure.
    ///
    /// Defaults to `false`.
    fn is_error(&self) -> bool {
        false
    }
}
