//! Checkout form data.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One input of the checkout form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CheckoutField {
    Name,
    Email,
    Address,
    CardNumber,
    ExpDate,
    Cvv,
}

impl CheckoutField {
    /// Every field, in form order.
    pub const ALL: [CheckoutField; 6] = [
        Self::Name,
        Self::Email,
        Self::Address,
        Self::CardNumber,
        Self::ExpDate,
        Self::Cvv,
    ];

    /// The field's key as used by the form markup.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Address => "address",
            Self::CardNumber => "cardNumber",
            Self::ExpDate => "expDate",
            Self::Cvv => "cvv",
        }
    }
}

impl fmt::Display for CheckoutField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw values typed into the checkout form.
///
/// Values are kept exactly as entered; nothing is trimmed or normalised.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CheckoutForm {
    pub name: String,
    pub email: String,
    pub address: String,
    pub card_number: String,
    pub exp_date: String,
    pub cvv: String,
}

impl CheckoutForm {
    pub fn get(&self, field: CheckoutField) -> &str {
        match field {
            CheckoutField::Name => &self.name,
            CheckoutField::Email => &self.email,
            CheckoutField::Address => &self.address,
            CheckoutField::CardNumber => &self.card_number,
            CheckoutField::ExpDate => &self.exp_date,
            CheckoutField::Cvv => &self.cvv,
        }
    }

    /// Replace one field's value, as an input change event would.
    pub fn set(&mut self, field: CheckoutField, value: impl Into<String>) {
        let slot = match field {
            CheckoutField::Name => &mut self.name,
            CheckoutField::Email => &mut self.email,
            CheckoutField::Address => &mut self.address,
            CheckoutField::CardNumber => &mut self.card_number,
            CheckoutField::ExpDate => &mut self.exp_date,
            CheckoutField::Cvv => &mut self.cvv,
        };
        *slot = value.into();
    }

    /// Last four characters of the card number, for receipts and logs.
    pub fn card_last4(&self) -> &str {
        let len = self.card_number.len();
        self.card_number
            .get(len.saturating_sub(4)..)
            .unwrap_or_default()
    }
}

// Card data stays out of logs and panic messages.
impl fmt::Debug for CheckoutForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckoutForm")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("address", &self.address)
            .field("card_number", &format_args!("****{}", self.card_last4()))
            .field("exp_date", &"**/**")
            .field("cvv", &"***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_get_round_through_every_field() {
        let mut form = CheckoutForm::default();
        for field in CheckoutField::ALL {
            form.set(field, field.as_str());
        }
        for field in CheckoutField::ALL {
            assert_eq!(form.get(field), field.as_str());
        }
    }

    #[test]
    fn deserializes_camel_case_keys() {
        let form: CheckoutForm = serde_json::from_str(
            r#"{"name":"Jo","email":"a@b.co","cardNumber":"1234567890123456","expDate":"09/27"}"#,
        )
        .unwrap();

        assert_eq!(form.card_number, "1234567890123456");
        assert_eq!(form.exp_date, "09/27");
        assert_eq!(form.address, "");
    }

    #[test]
    fn field_serializes_as_form_key() {
        assert_eq!(
            serde_json::to_string(&CheckoutField::CardNumber).unwrap(),
            "\"cardNumber\""
        );
        assert_eq!(CheckoutField::ExpDate.to_string(), "expDate");
    }

    #[test]
    fn debug_masks_card_data() {
        let form = CheckoutForm {
            card_number: "1234567890123456".into(),
            cvv: "987".into(),
            ..CheckoutForm::default()
        };
        let rendered = format!("{form:?}");

        assert!(rendered.contains("****3456"));
        assert!(!rendered.contains("1234567890123456"));
        assert!(!rendered.contains("987"));
    }

    #[test]
    fn card_last4_handles_short_input() {
        let mut form = CheckoutForm::default();
        assert_eq!(form.card_last4(), "");
        form.card_number = "12".into();
        assert_eq!(form.card_last4(), "12");
    }
}
