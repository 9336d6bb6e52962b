//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are stored exactly as entered (no rounding). Rounding to cents
//! is a presentation concern handled where the price is displayed.

use core::fmt;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::Quantity;

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("price cannot be negative: {0}")]
    Negative(Decimal),
    /// The amount has more significant digits than a JSON number carries
    /// exactly.
    #[error("price must have at most {max} significant digits: {amount}")]
    TooPrecise {
        /// Rejected amount.
        amount: Decimal,
        /// Maximum significant digits.
        max: u32,
    },
}

/// A non-negative unit price in the store currency.
///
/// Serialized as a plain JSON number (`12.99`) so that stored carts stay
/// readable by the browser side. A JSON number is an IEEE double, which
/// carries 15 significant decimal digits exactly, so prices are limited to
/// [`Price::MAX_SIGNIFICANT_DIGITS`]. Deserialization accepts a number or a
/// numeric string and applies the same checks as [`Price::new`].
///
/// ## Examples
///
/// ```
/// use astro_store_core::{Price, Quantity};
/// use rust_decimal::Decimal;
///
/// let price = Price::new(Decimal::new(1299, 2)).unwrap();
/// assert_eq!(price.line_total(Quantity::new(2)), Decimal::new(2598, 2));
///
/// assert!(Price::new(Decimal::new(-1, 0)).is_err());
/// assert!(Price::new(Decimal::MAX).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Most significant digits a price may carry.
    pub const MAX_SIGNIFICANT_DIGITS: u32 = 15;

    /// Create a new price.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `amount` is below zero and
    /// [`PriceError::TooPrecise`] if it has more than
    /// [`Self::MAX_SIGNIFICANT_DIGITS`] significant digits.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }

        let limit = 10_u128.pow(Self::MAX_SIGNIFICANT_DIGITS);
        if amount.normalize().mantissa().unsigned_abs() >= limit {
            return Err(PriceError::TooPrecise {
                amount,
                max: Self::MAX_SIGNIFICANT_DIGITS,
            });
        }

        Ok(Self(amount))
    }

    /// Create a price from a whole number of cents.
    #[must_use]
    pub fn from_cents(cents: u32) -> Self {
        Self(Decimal::new(i64::from(cents), 2))
    }

    /// The unrounded amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price multiplied by a quantity, unrounded.
    ///
    /// Saturates at `Decimal::MAX` instead of overflowing.
    #[must_use]
    pub fn line_total(&self, quantity: Quantity) -> Decimal {
        self.0
            .checked_mul(Decimal::from(quantity.get()))
            .unwrap_or(Decimal::MAX)
    }
}

/// Sum amounts, saturating at `Decimal::MAX` instead of overflowing.
///
/// ```
/// use astro_store_core::saturating_sum;
/// use rust_decimal::Decimal;
///
/// assert_eq!(saturating_sum([Decimal::ONE, Decimal::TWO]), Decimal::new(3, 0));
/// assert_eq!(saturating_sum([Decimal::MAX, Decimal::ONE]), Decimal::MAX);
/// ```
#[must_use]
pub fn saturating_sum<I>(amounts: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    amounts.into_iter().fold(Decimal::ZERO, |total, amount| {
        total.checked_add(amount).unwrap_or(Decimal::MAX)
    })
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Parsing the decimal text gives the nearest double; with at most 15
        // significant digits its shortest form is the same digits again.
        let value = self
            .0
            .to_string()
            .parse::<f64>()
            .map_err(serde::ser::Error::custom)?;
        serializer.serialize_f64(value)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PriceVisitor)
    }
}

struct PriceVisitor;

impl PriceVisitor {
    fn parse<E: de::Error>(text: &str) -> Result<Price, E> {
        let amount = Decimal::from_str(text)
            .or_else(|_| Decimal::from_scientific(text))
            .map_err(|_| E::invalid_value(de::Unexpected::Str(text), &PriceVisitor))?;
        Price::new(amount).map_err(E::custom)
    }
}

impl Visitor<'_> for PriceVisitor {
    type Value = Price;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a non-negative decimal number or numeric string")
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Price, E> {
        Price::new(Decimal::from(value)).map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Price, E> {
        Price::new(Decimal::from(value)).map_err(E::custom)
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Price, E> {
        if !value.is_finite() {
            return Err(E::invalid_value(de::Unexpected::Float(value), &self));
        }
        // `Display` for f64 prints the shortest digits that round-trip.
        Self::parse(&value.to_string())
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Price, E> {
        Self::parse(value)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_zero_and_positive() {
        assert_eq!(Price::new(Decimal::ZERO).unwrap(), Price::ZERO);
        assert!(Price::new(Decimal::new(1999, 2)).is_ok());
    }

    #[test]
    fn test_new_rejects_negative() {
        assert!(matches!(
            Price::new(Decimal::new(-1, 2)),
            Err(PriceError::Negative(_))
        ));
    }

    #[test]
    fn test_from_cents() {
        assert_eq!(Price::from_cents(1299).amount(), Decimal::new(1299, 2));
    }

    #[test]
    fn test_line_total_is_unrounded() {
        let price = Price::new(Decimal::new(3333, 3)).unwrap();
        assert_eq!(price.line_total(Quantity::new(3)), Decimal::new(9999, 3));
    }

    #[test]
    fn test_serializes_as_number() {
        let price = Price::from_cents(1299);
        assert_eq!(serde_json::to_string(&price).unwrap(), "12.99");
    }

    #[test]
    fn test_deserializes_number_and_string() {
        let from_number: Price = serde_json::from_str("12.99").unwrap();
        let from_int: Price = serde_json::from_str("10").unwrap();
        let from_string: Price = serde_json::from_str("\"5.00\"").unwrap();

        assert_eq!(from_number, Price::from_cents(1299));
        assert_eq!(from_int, Price::from_cents(1000));
        assert_eq!(from_string, Price::from_cents(500));
    }

    #[test]
    fn test_deserialize_rejects_negative() {
        assert!(serde_json::from_str::<Price>("-3.50").is_err());
        assert!(serde_json::from_str::<Price>("-3").is_err());
    }

    #[test]
    fn test_new_rejects_more_than_fifteen_significant_digits() {
        let too_precise = Decimal::from_str("19.99999999999999999").unwrap();
        assert!(matches!(
            Price::new(too_precise),
            Err(PriceError::TooPrecise { max: 15, .. })
        ));
        assert!(matches!(
            Price::new(Decimal::MAX),
            Err(PriceError::TooPrecise { .. })
        ));
        assert!(Price::new(Decimal::from(1_000_000_000_000_000_u64)).is_err());
    }

    #[test]
    fn test_new_accepts_fifteen_digits_and_trailing_zeros() {
        assert!(Price::new(Decimal::from_str("9999999999999.99").unwrap()).is_ok());
        assert!(Price::new(Decimal::from_str("10.000000000000000000").unwrap()).is_ok());
    }

    #[test]
    fn test_json_roundtrip_is_exact_at_the_digit_limit() {
        for text in [
            "12.99",
            "0.01",
            "19.9999999999999",
            "9999999999999.99",
            "999999999999999",
            "0.000000000000001",
            "123456789.012345",
        ] {
            let price = Price::new(Decimal::from_str(text).unwrap()).unwrap();
            let json = serde_json::to_string(&price).unwrap();
            let back: Price = serde_json::from_str(&json).unwrap();
            assert_eq!(back, price, "{text} encoded as {json}");
        }
    }

    #[test]
    fn test_deserialize_rejects_too_precise_string() {
        assert!(serde_json::from_str::<Price>("\"19.99999999999999999\"").is_err());
    }

    #[test]
    fn test_line_total_of_largest_price_and_quantity() {
        let price = Price::new(Decimal::from(999_999_999_999_999_u64)).unwrap();
        let total = price.line_total(Quantity::new(u32::MAX));
        assert_eq!(
            total,
            Decimal::from(999_999_999_999_999_u64) * Decimal::from(u32::MAX)
        );
    }

    #[test]
    fn test_saturating_sum_does_not_overflow() {
        let big = Decimal::MAX - Decimal::ONE;
        assert_eq!(saturating_sum([big, big, big]), Decimal::MAX);
        assert_eq!(saturating_sum(std::iter::empty()), Decimal::ZERO);
    }
}
