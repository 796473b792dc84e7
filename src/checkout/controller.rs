//! Submission controller: the state machine behind one checkout attempt.
//!
//! ```text
//! Idle ──begin──▶ Validating ──invalid──▶ Idle
//!                     │
//!                   valid
//!                     ▼
//!                Submitting ──finish(Ok)──▶ Succeeded
//!                     │
//!           finish(Err) or abandon
//!                     ▼
//!                  Failed ──▶ Idle
//! ```
//!
//! Submit and cancel are only accepted from `Idle`. The controller does not
//! talk to the gateway itself: [`SubmissionController::begin`] hands back the
//! validated form and [`SubmissionController::finish`] takes the gateway's
//! outcome, so the caller owns the one await in between. The caller also
//! supplies the time of each step, taken from its [`Clock`](crate::checkout::Clock),
//! so the history follows virtual time in tests.

use crate::checkout::error::CheckoutError;
use crate::checkout::form::CheckoutForm;
use crate::checkout::gateway::{OrderReceipt, SubmissionError};
use crate::checkout::validation::{validate, ValidationErrors};
use crate::core::{Guard, State, StateHistory, StateTransition};
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

crate::state_enum! {
    /// Where a checkout attempt currently is.
    pub enum CheckoutState {
        Idle,
        Validating,
        Submitting,
        Succeeded,
        Failed,
    }
    final: [Succeeded]
    error: [Failed]
}

/// Sequences validation, submission and cancellation for one checkout.
///
/// The form is owned by the attempt: it is dropped on cancel and on success,
/// and kept after a validation or submission failure so it can be resubmitted.
#[derive(Debug)]
pub struct SubmissionController {
    state: CheckoutState,
    form: Option<CheckoutForm>,
    errors: ValidationErrors,
    history: StateHistory<CheckoutState>,
    attempts: usize,
    can_submit: Guard<CheckoutState>,
    can_finish: Guard<CheckoutState>,
    can_cancel: Guard<CheckoutState>,
}

impl Default for SubmissionController {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmissionController {
    pub fn new() -> Self {
        Self {
            state: CheckoutState::Idle,
            form: None,
            errors: ValidationErrors::default(),
            history: StateHistory::new(),
            attempts: 0,
            can_submit: Guard::in_state(CheckoutState::Idle),
            can_finish: Guard::in_state(CheckoutState::Submitting),
            can_cancel: Guard::in_state(CheckoutState::Idle),
        }
    }

    pub fn state(&self) -> &CheckoutState {
        &self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.state == CheckoutState::Submitting
    }

    /// The form of the current attempt, if one has been submitted.
    pub fn form(&self) -> Option<&CheckoutForm> {
        self.form.as_ref()
    }

    /// Errors from the most recent validation.
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn history(&self) -> &StateHistory<CheckoutState> {
        &self.history
    }

    /// Number of submit requests accepted so far.
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    /// Validate `form` and, if valid, enter `Submitting`.
    ///
    /// Returns the validated form for building the order. Invalid forms
    /// bring the controller back to `Idle` with [`CheckoutError::Invalid`].
    pub fn begin(
        &mut self,
        form: CheckoutForm,
        now: DateTime<Utc>,
    ) -> Result<&CheckoutForm, CheckoutError> {
        if !self.can_submit.check(&self.state) {
            let err = match self.state {
                CheckoutState::Succeeded => CheckoutError::AlreadyCompleted,
                _ => CheckoutError::SubmissionInProgress,
            };
            warn!(state = %self.state, "checkout_submit_rejected");
            return Err(err);
        }

        self.attempts += 1;
        self.transition(CheckoutState::Validating, now);

        let errors = validate(&form);
        self.errors = errors.clone();

        if !errors.is_empty() {
            debug!(invalid = errors.len(), "checkout_validation_failed");
            self.form = Some(form);
            self.transition(CheckoutState::Idle, now);
            return Err(CheckoutError::Invalid(errors));
        }

        self.transition(CheckoutState::Submitting, now);
        Ok(self.form.insert(form))
    }

    /// Record the gateway's outcome for the in-flight submission.
    pub fn finish(
        &mut self,
        outcome: Result<OrderReceipt, SubmissionError>,
        now: DateTime<Utc>,
    ) -> Result<OrderReceipt, CheckoutError> {
        if !self.can_finish.check(&self.state) {
            warn!(state = %self.state, "checkout_finish_rejected");
            return Err(CheckoutError::NotSubmitting {
                state: self.state.name().to_string(),
            });
        }

        match outcome {
            Ok(receipt) => {
                self.transition(CheckoutState::Succeeded, now);
                self.form = None;
                Ok(receipt)
            }
            Err(err) => {
                warn!(error = %err, attempt = self.attempts, "checkout_submission_failed");
                self.transition(CheckoutState::Failed, now);
                self.transition(CheckoutState::Idle, now);
                Err(CheckoutError::Submission(err))
            }
        }
    }

    /// Give up on an in-flight submission whose outcome will never arrive.
    ///
    /// Goes through `Failed` back to `Idle` and keeps the form. Does nothing
    /// unless a submission is in flight.
    pub fn abandon(&mut self, now: DateTime<Utc>) {
        if !self.can_finish.check(&self.state) {
            return;
        }
        warn!(attempt = self.attempts, "checkout_submission_abandoned");
        self.transition(CheckoutState::Failed, now);
        self.transition(CheckoutState::Idle, now);
    }

    /// Abandon the attempt. Only allowed before a submission is in flight.
    pub fn cancel(&mut self) -> Result<(), CheckoutError> {
        if !self.can_cancel.check(&self.state) {
            warn!(state = %self.state, "checkout_cancel_rejected");
            return Err(CheckoutError::NotCancellable {
                state: self.state.name().to_string(),
            });
        }

        self.form = None;
        self.errors = ValidationErrors::default();
        debug!(attempts = self.attempts, "checkout_cancelled");
        Ok(())
    }

    fn transition(&mut self, to: CheckoutState, now: DateTime<Utc>) {
        debug!(from = %self.state, to = %to, attempt = self.attempts, "checkout_transition");
        self.history = self.history.record(StateTransition {
            from: self.state.clone(),
            to: to.clone(),
            timestamp: now,
            attempt: self.attempts,
        });
        self.state = to;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn good_form() -> CheckoutForm {
        CheckoutForm {
            name: "Jo".into(),
            email: "a@b.co".into(),
            address: "1 St".into(),
            card_number: "1234567890123456".into(),
            exp_date: "09/27".into(),
            cvv: "123".into(),
        }
    }

    fn receipt() -> OrderReceipt {
        OrderReceipt {
            order_id: Uuid::new_v4(),
            total: Decimal::new(2550, 2),
            quantity: 3,
            placed_at: Utc::now(),
        }
    }

    #[test]
    fn starts_idle() {
        let controller = SubmissionController::new();
        assert_eq!(controller.state(), &CheckoutState::Idle);
        assert!(controller.history().transitions().is_empty());
        assert!(controller.form().is_none());
    }

    #[test]
    fn invalid_form_returns_to_idle_with_errors() {
        let mut controller = SubmissionController::new();
        let form = CheckoutForm {
            cvv: "1".into(),
            ..good_form()
        };

        let err = controller.begin(form, Utc::now()).unwrap_err();

        assert_eq!(err.validation_errors().map(ValidationErrors::len), Some(1));
        assert_eq!(controller.state(), &CheckoutState::Idle);
        assert_eq!(controller.errors().len(), 1);
        assert_eq!(
            controller.history().get_path(),
            vec![
                &CheckoutState::Idle,
                &CheckoutState::Validating,
                &CheckoutState::Idle
            ]
        );
        assert!(controller.form().is_some());
    }

    #[test]
    fn valid_form_enters_submitting() {
        let mut controller = SubmissionController::new();

        let form = controller.begin(good_form(), Utc::now()).unwrap();
        assert_eq!(form.name, "Jo");

        assert!(controller.is_submitting());
        assert!(controller.errors().is_empty());
        assert_eq!(controller.attempts(), 1);
    }

    #[test]
    fn resubmit_while_submitting_is_rejected() {
        let mut controller = SubmissionController::new();
        controller.begin(good_form(), Utc::now()).unwrap();

        let err = controller.begin(good_form(), Utc::now()).unwrap_err();

        assert_eq!(err, CheckoutError::SubmissionInProgress);
        assert!(controller.is_submitting());
        assert_eq!(controller.attempts(), 1);
    }

    #[test]
    fn cancel_while_submitting_is_rejected() {
        let mut controller = SubmissionController::new();
        controller.begin(good_form(), Utc::now()).unwrap();

        let err = controller.cancel().unwrap_err();

        assert_eq!(
            err,
            CheckoutError::NotCancellable {
                state: "Submitting".to_string()
            }
        );
        assert!(controller.form().is_some());
    }

    #[test]
    fn cancel_from_idle_discards_form() {
        let mut controller = SubmissionController::new();
        let _ = controller.begin(CheckoutForm::default(), Utc::now());
        assert!(controller.form().is_some());

        controller.cancel().unwrap();

        assert!(controller.form().is_none());
        assert!(controller.errors().is_empty());
    }

    #[test]
    fn success_is_final_and_drops_form() {
        let mut controller = SubmissionController::new();
        controller.begin(good_form(), Utc::now()).unwrap();

        let placed = receipt();
        let returned = controller.finish(Ok(placed.clone()), Utc::now()).unwrap();

        assert_eq!(returned, placed);
        assert_eq!(controller.state(), &CheckoutState::Succeeded);
        assert!(controller.state().is_final());
        assert!(controller.form().is_none());
        assert_eq!(
            controller.begin(good_form(), Utc::now()).unwrap_err(),
            CheckoutError::AlreadyCompleted
        );
    }

    #[test]
    fn submission_failure_returns_to_idle_and_keeps_form() {
        let mut controller = SubmissionController::new();
        controller.begin(good_form(), Utc::now()).unwrap();

        let err = controller
            .finish(Err(SubmissionError::Unavailable("timeout".into())), Utc::now())
            .unwrap_err();

        assert_eq!(
            err,
            CheckoutError::Submission(SubmissionError::Unavailable("timeout".into()))
        );
        assert_eq!(controller.state(), &CheckoutState::Idle);
        assert_eq!(controller.form(), Some(&good_form()));
        assert_eq!(
            controller.history().get_path(),
            vec![
                &CheckoutState::Idle,
                &CheckoutState::Validating,
                &CheckoutState::Submitting,
                &CheckoutState::Failed,
                &CheckoutState::Idle,
            ]
        );

        controller.begin(good_form(), Utc::now()).unwrap();
        assert_eq!(controller.attempts(), 2);
        assert_eq!(controller.history().last().map(|t| t.attempt), Some(2));
    }

    #[test]
    fn history_uses_supplied_times() {
        let mut controller = SubmissionController::new();
        let start = Utc::now();
        controller.begin(good_form(), start).unwrap();

        let later = start + chrono::Duration::milliseconds(1500);
        controller.finish(Ok(receipt()), later).unwrap();

        let stamps: Vec<_> = controller
            .history()
            .transitions()
            .iter()
            .map(|t| t.timestamp)
            .collect();
        assert_eq!(stamps, vec![start, start, later]);
        assert_eq!(
            controller.history().duration(),
            Some(std::time::Duration::from_millis(1500))
        );
    }

    #[test]
    fn abandon_returns_in_flight_attempt_to_idle() {
        let mut controller = SubmissionController::new();
        controller.begin(good_form(), Utc::now()).unwrap();

        controller.abandon(Utc::now());

        assert_eq!(controller.state(), &CheckoutState::Idle);
        assert_eq!(controller.form(), Some(&good_form()));
        assert_eq!(
            controller.history().get_path()[3..],
            [&CheckoutState::Failed, &CheckoutState::Idle]
        );
        controller.begin(good_form(), Utc::now()).unwrap();
        assert_eq!(controller.attempts(), 2);
    }

    #[test]
    fn abandon_outside_submission_does_nothing() {
        let mut controller = SubmissionController::new();

        controller.abandon(Utc::now());

        assert_eq!(controller.state(), &CheckoutState::Idle);
        assert!(controller.history().transitions().is_empty());
    }

    #[test]
    fn finish_without_submission_is_rejected() {
        let mut controller = SubmissionController::new();

        let err = controller.finish(Ok(receipt()), Utc::now()).unwrap_err();

        assert_eq!(
            err,
            CheckoutError::NotSubmitting {
                state: "Idle".to_string()
            }
        );
        assert_eq!(controller.state(), &CheckoutState::Idle);
    }

    #[test]
    fn state_flags() {
        assert!(CheckoutState::Failed.is_error());
        assert!(!CheckoutState::Failed.is_final());
        assert!(!CheckoutState::Submitting.is_final());
        assert_eq!(CheckoutState::Validating.to_string(), "Validating");
    }
}
