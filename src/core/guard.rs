//! Guard predicates for controlling state transitions.
//!
//! A guard decides whether a request (submit, cancel, finish) is allowed
//! from the current state. Guards never mutate anything.

use super::state::State;
use std::fmt;

/// Pure predicate that determines if a transition can execute.
///
/// # Example
///
/// ```rust
/// use cartflow::checkout::CheckoutState;
/// use cartflow::core::Guard;
///
/// let only_idle = Guard::in_state(CheckoutState::Idle);
///
/// assert!(only_idle.check(&CheckoutState::Idle));
/// assert!(!only_idle.check(&CheckoutState::Submitting));
/// ```
pub struct Guard<S: State> {
    predicate: Box<dyn Fn(&S) -> bool + Send + Sync>,
}

impl<S: State> Guard<S> {
    /// Create a guard from a pure predicate function.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&S) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
        }
    }

    /// Guard that passes only in exactly `expected`.
    pub fn in_state(expected: S) -> Self
    where
        S: 'static,
    {
        Self::new(move |state: &S| *state == expected)
    }

    /// Check if the guard allows transition from this state.
    pub fn check(&self, state: &S) -> bool {
        (self.predicate)(state)
    }
}

impl<S: State> fmt::Debug for Guard<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum DoorState {
        Open,
        Closed,
        Locked,
    }

    impl State for DoorState {
        fn name(&self) -> &str {
            match self {
                Self::Open => "Open",
                Self::Closed => "Closed",
                Self::Locked => "Locked",
            }
        }

        fn is_final(&self) -> bool {
            matches!(self, Self::Locked)
        }
    }

    #[test]
    fn guard_allows_matching_states() {
        let guard = Guard::new(|s: &DoorState| matches!(s, DoorState::Closed));

        assert!(guard.check(&DoorState::Closed));
        assert!(!guard.check(&DoorState::Open));
    }

    #[test]
    fn in_state_matches_only_that_state() {
        let guard = Guard::in_state(DoorState::Open);

        assert!(guard.check(&DoorState::Open));
        assert!(!guard.check(&DoorState::Closed));
        assert!(!guard.check(&DoorState::Locked));
    }

    #[test]
    fn guard_can_use_state_flags() {
        let guard = Guard::new(|s: &DoorState| !s.is_final());

        assert!(guard.check(&DoorState::Open));
        assert!(guard.check(&DoorState::Closed));
        assert!(!guard.check(&DoorState::Locked));
    }
}
