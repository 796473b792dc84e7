//! Checkout form validation.
//!
//! Every rule runs on every submission and all failures are reported
//! together, using Stillwater's `Validation` to accumulate them rather than
//! stopping at the first bad field.

use crate::checkout::form::{CheckoutField, CheckoutForm};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use stillwater::validation::Validation;

/// A single failed rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: CheckoutField,
    pub message: &'static str,
}

type FieldCheck = Validation<(), Vec<FieldError>>;

/// Messages for the fields that are currently invalid.
///
/// A field missing from the map is valid.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: BTreeMap<CheckoutField, String>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, field: CheckoutField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: CheckoutField) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn fields(&self) -> impl Iterator<Item = CheckoutField> + '_ {
        self.errors.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CheckoutField, &str)> {
        self.errors
            .iter()
            .map(|(field, message)| (*field, message.as_str()))
    }
}

impl FromIterator<FieldError> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = FieldError>>(iter: I) -> Self {
        let errors = iter
            .into_iter()
            .map(|error| (error.field, error.message.to_string()))
            .collect();
        Self { errors }
    }
}

/// Validate every field of `form`.
///
/// | field | rule |
/// |---|---|
/// | name | non-empty |
/// | email | `local@domain.tld` |
/// | address | non-empty |
/// | cardNumber | exactly 16 digits |
/// | expDate | `MM/YY`, month 01–12 |
/// | cvv | exactly 3 digits |
///
/// ```
/// use cartflow::checkout::{validate, CheckoutField, CheckoutForm};
///
/// let form = CheckoutForm {
///     name: "Jo".into(),
///     email: "a@b.co".into(),
///     address: "1 St".into(),
///     card_number: "1234567890123456".into(),
///     exp_date: "13/27".into(),
///     cvv: "123".into(),
/// };
///
/// let errors = validate(&form);
/// assert_eq!(errors.len(), 1);
/// assert_eq!(errors.get(CheckoutField::ExpDate), Some("MM/YY format required"));
/// ```
pub fn validate(form: &CheckoutForm) -> ValidationErrors {
    let checks = vec![
        check(
            CheckoutField::Name,
            !form.name.is_empty(),
            "Name is required",
        ),
        check(
            CheckoutField::Email,
            is_email(&form.email),
            "Invalid email",
        ),
        check(
            CheckoutField::Address,
            !form.address.is_empty(),
            "Address is required",
        ),
        check(
            CheckoutField::CardNumber,
            is_digits(&form.card_number, 16),
            "Invalid card number",
        ),
        check(
            CheckoutField::ExpDate,
            is_expiry(&form.exp_date),
            "MM/YY format required",
        ),
        check(CheckoutField::Cvv, is_digits(&form.cvv, 3), "Invalid CVV"),
    ];

    match Validation::all_vec(checks) {
        Validation::Success(_) => ValidationErrors::default(),
        Validation::Failure(errors) => errors.into_iter().collect(),
    }
}

fn check(field: CheckoutField, valid: bool, message: &'static str) -> FieldCheck {
    if valid {
        Validation::Success(())
    } else {
        Validation::Failure(vec![FieldError { field, message }])
    }
}

/// `local@domain.tld`: no whitespace, exactly one `@`, non-empty local part,
/// and a `.` in the domain with at least one character on each side.
fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') || value.chars().any(char::is_whitespace) {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|b| b.is_ascii_digit())
}

fn is_expiry(value: &str) -> bool {
    let Some((month, year)) = value.split_once('/') else {
        return false;
    };
    if !is_digits(month, 2) || !is_digits(year, 2) {
        return false;
    }
    matches!(month.parse::<u8>(), Ok(1..=12))
}
