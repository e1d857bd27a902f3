//! Non-negative prices using decimal arithmetic.
//!
//! Shopify exchanges variant prices as decimal strings (`"9.99"`). `Price`
//! keeps the exact decimal and always renders two fractional digits, so a
//! freshly generated variant shows `"0.00"` rather than `"0"`. Amounts with
//! sub-cent digits are rejected rather than rounded.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when parsing a price.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceError {
    #[error("Price can't be negative")]
    Negative,
    #[error("Invalid price: {0}")]
    Invalid(String),
}

/// A non-negative price in the shop's currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Price(Decimal);

impl Price {
    /// The zero price, rendered as `"0.00"`.
    #[must_use]
    pub const fn zero() -> Self {
        Self(Decimal::from_parts(0, 0, 0, false, 2))
    }

    /// Create a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::Negative` for amounts below zero and
    /// `PriceError::Invalid` for amounts with more than two significant
    /// decimal places.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }
        if amount.normalize().scale() > 2 {
            return Err(PriceError::Invalid(amount.to_string()));
        }
        Ok(Self(amount))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl Default for Price {
    fn default() -> Self {
        Self::zero()
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let amount =
            Decimal::from_str(trimmed).map_err(|_| PriceError::Invalid(trimmed.to_string()))?;
        Self::new(amount)
    }
}

impl TryFrom<String> for Price {
    type Error = PriceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Price> for String {
    fn from(price: Price) -> Self {
        price.to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_renders_two_places() {
        assert_eq!(Price::zero().to_string(), "0.00");
        assert_eq!(Price::default().to_string(), "0.00");
    }

    #[test]
    fn test_parse_and_display() {
        let price: Price = "9.99".parse().unwrap();
        assert_eq!(price.to_string(), "9.99");

        let price: Price = " 12 ".parse().unwrap();
        assert_eq!(price.to_string(), "12.00");
    }

    #[test]
    fn test_negative_rejected() {
        assert_eq!("-1.00".parse::<Price>(), Err(PriceError::Negative));
        assert_eq!(
            PriceError::Negative.to_string(),
            "Price can't be negative"
        );
    }

    #[test]
    fn test_invalid_rejected() {
        assert!(matches!("abc".parse::<Price>(), Err(PriceError::Invalid(_))));
    }

    #[test]
    fn test_serde_roundtrip_as_string() {
        let price: Price = serde_json::from_str("\"4.50\"").unwrap();
        assert_eq!(serde_json::to_string(&price).unwrap(), "\"4.50\"");
        assert!(serde_json::from_str::<Price>("\"-4.50\"").is_err());
    }

    #[test]
    fn test_sub_cent_amounts_rejected() {
        assert_eq!(
            "1.005".parse::<Price>(),
            Err(PriceError::Invalid("1.005".to_string()))
        );
        assert!(serde_json::from_str::<Price>("\"1.005\"").is_err());
    }

    #[test]
    fn test_trailing_zeros_keep_value() {
        let price: Price = serde_json::from_str("\"1.500\"").unwrap();
        assert_eq!(serde_json::to_string(&price).unwrap(), "\"1.50\"");

        let price: Price = "1.5".parse().unwrap();
        assert_eq!(price.to_string().parse::<Price>().unwrap(), price);
    }
}
