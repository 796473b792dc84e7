//! Unit prices and money arithmetic.
//!
//! Costs arrive as display strings such as `"$10.00"`. They are parsed once,
//! when a [`Price`] is built, against this grammar:
//!
//! ```text
//! price   := ws* "$"? ws* digits ( "." digits )? ws*
//! digits  := [0-9]+
//! ```
//!
//! with at most [`MAX_INTEGER_DIGITS`] digits before the point and
//! [`MAX_FRACTION_DIGITS`] after it. Signs, thousands separators and other
//! currency symbols are rejected.
//!
//! Amounts are rounded to cents half away from zero (`0.125` → `0.13`).

use crate::cart::error::CartError;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Symbol accepted (and optional) in front of a cost.
pub const CURRENCY_SYMBOL: char = '$';

/// Longest accepted integer part of a cost.
pub const MAX_INTEGER_DIGITS: usize = 12;

/// Longest accepted fractional part of a cost.
pub const MAX_FRACTION_DIGITS: usize = 4;

/// Decimal places totals are rounded to.
pub const CENTS_SCALE: u32 = 2;

/// A unit price: the string shown to the shopper and its parsed amount.
///
/// Serializes as the display string. Deserializing re-parses it, so a
/// malformed cost is rejected there as well.
///
/// ```
/// use cartflow::cart::Price;
/// use rust_decimal::Decimal;
///
/// let price: Price = "$5.50".parse()?;
/// assert_eq!(price.amount(), Decimal::new(550, 2));
/// assert_eq!(price.as_str(), "$5.50");
/// assert!("5,50 EUR".parse::<Price>().is_err());
/// # Ok::<(), cartflow::cart::CartError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Price {
    display: String,
    amount: Decimal,
}

impl Price {
    /// Parse a cost string.
    pub fn parse(input: &str) -> Result<Self, CartError> {
        let amount = parse_amount(input)?;
        Ok(Self {
            display: input.trim().to_string(),
            amount,
        })
    }

    /// Parsed amount, exactly as written.
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// The cost as originally supplied (trimmed).
    pub fn as_str(&self) -> &str {
        &self.display
    }

    /// Unrounded cost of `quantity` units.
    pub fn times(&self, quantity: u32) -> Decimal {
        self.amount * Decimal::from(quantity)
    }
}

impl FromStr for Price {
    type Err = CartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Price {
    type Error = CartError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Price> for String {
    fn from(price: Price) -> Self {
        price.display
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}

/// Round an amount to cents, half away from zero.
pub fn round_amount(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CENTS_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Render an amount the way the cart summary shows it: `$25.50`.
///
/// ```
/// use cartflow::cart::format_amount;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_amount(Decimal::new(255, 1)), "$25.50");
/// assert_eq!(format_amount(Decimal::ZERO), "$0.00");
/// ```
pub fn format_amount(amount: Decimal) -> String {
    let mut rounded = round_amount(amount);
    rounded.rescale(CENTS_SCALE);
    format!("{CURRENCY_SYMBOL}{rounded}")
}

fn parse_amount(input: &str) -> Result<Decimal, CartError> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix(CURRENCY_SYMBOL)
        .map_or(trimmed, str::trim_start);

    if digits.is_empty() {
        return Err(CartError::malformed(input, "no amount"));
    }

    let (whole, fraction) = match digits.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (digits, None),
    };

    if whole.is_empty() || !is_ascii_digits(whole) {
        return Err(CartError::malformed(
            input,
            "expected digits before the decimal point",
        ));
    }
    if whole.len() > MAX_INTEGER_DIGITS {
        return Err(CartError::malformed(
            input,
            format!("more than {MAX_INTEGER_DIGITS} integer digits"),
        ));
    }

    if let Some(fraction) = fraction {
        if fraction.is_empty() || !is_ascii_digits(fraction) {
            return Err(CartError::malformed(
                input,
                "expected digits after the decimal point",
            ));
        }
        if fraction.len() > MAX_FRACTION_DIGITS {
            return Err(CartError::malformed(
                input,
                format!("more than {MAX_FRACTION_DIGITS} fractional digits"),
            ));
        }
    }

    Decimal::from_str(digits).map_err(|e| CartError::malformed(input, e.to_string()))
}

fn is_ascii_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cents(value: i64) -> Decimal {
        Decimal::new(value, 2)
    }

    #[test]
    fn parses_symbol_prefixed_costs() {
        assert_eq!(Price::parse("$10.00").unwrap().amount(), cents(1000));
        assert_eq!(Price::parse("$5.50").unwrap().amount(), cents(550));
        assert_eq!(Price::parse("$ 12").unwrap().amount(), Decimal::from(12));
    }

    #[test]
    fn symbol_is_optional() {
        assert_eq!(Price::parse("15").unwrap().amount(), Decimal::from(15));
        assert_eq!(Price::parse(" 0.99 ").unwrap().amount(), cents(99));
    }

    #[test]
    fn keeps_display_string() {
        let price = Price::parse("  $18.00").unwrap();
        assert_eq!(price.as_str(), "$18.00");
        assert_eq!(price.to_string(), "$18.00");
    }

    #[test]
    fn rejects_malformed_costs() {
        for input in [
            "", "$", "abc", "$-5", "-5.00", "$1,000", "€5", "5 EUR", "1.2.3", "$.50", "$5.",
            "$5.123456", "$1234567890123",
        ] {
            let result = Price::parse(input);
            assert!(
                matches!(result, Err(CartError::MalformedCost { .. })),
                "{input:?} should be rejected, got {result:?}"
            );
        }
    }

    #[test]
    fn malformed_error_names_input() {
        let err = Price::parse("ten dollars").unwrap_err();
        assert_eq!(
            err,
            CartError::MalformedCost {
                input: "ten dollars".to_string(),
                reason: "expected digits before the decimal point".to_string(),
            }
        );
    }

    #[test]
    fn times_multiplies_without_rounding() {
        let price = Price::parse("$0.125").unwrap();
        assert_eq!(price.times(3), Decimal::new(375, 3));
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        assert_eq!(round_amount(Decimal::new(125, 3)), cents(13));
        assert_eq!(round_amount(Decimal::new(135, 3)), cents(14));
        assert_eq!(round_amount(Decimal::new(1249, 4)), cents(12));
        assert_eq!(round_amount(Decimal::new(5, 3)), cents(1));
    }

    #[test]
    fn format_pads_to_cents() {
        assert_eq!(format_amount(Decimal::from(20)), "$20.00");
        assert_eq!(format_amount(Decimal::new(2550, 2)), "$25.50");
        assert_eq!(format_amount(Decimal::new(125, 3)), "$0.13");
    }

    #[test]
    fn serializes_as_display_string() {
        let price = Price::parse("$7.25").unwrap();
        assert_eq!(serde_json::to_string(&price).unwrap(), "\"$7.25\"");

        let back: Price = serde_json::from_str("\"$7.25\"").unwrap();
        assert_eq!(back, price);

        assert!(serde_json::from_str::<Price>("\"seven\"").is_err());
    }
}
