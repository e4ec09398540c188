//! Fixed-point money and percentage values.
//!
//! # Responsibility
//! - Represent every monetary value as integer minor units.
//! - Bridge persisted JSON numbers to fixed-point values without float drift.
//!
//! # Invariants
//! - `Amount` arithmetic is integer arithmetic on minor units (1/100).
//! - Decimal results (tax) are rounded half away from zero to minor units.
//! - Null, missing or non-numeric persisted amounts read as zero.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

const MINOR_SCALE: u32 = 2;
const MINOR_PER_MAJOR: i64 = 100;

/// Monetary amount stored as integer minor units (sen / cents).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(i64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    /// Builds an amount from minor units, e.g. `from_minor(869200)` is 8692.00.
    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    /// Builds an amount from whole major units.
    pub const fn from_major(major: i64) -> Self {
        Self(major.saturating_mul(MINOR_PER_MAJOR))
    }

    /// Converts a decimal value, rounding to minor units.
    ///
    /// Values outside the `i64` minor-unit range saturate.
    pub fn from_decimal(value: Decimal) -> Self {
        let rounded = value.round_dp_with_strategy(MINOR_SCALE, RoundingStrategy::MidpointAwayFromZero);
        let minor = rounded.checked_mul(Decimal::from(MINOR_PER_MAJOR));
        match minor.and_then(|minor| minor.to_i64()) {
            Some(minor) => Self(minor),
            None if value.is_sign_negative() => Self(i64::MIN),
            None => Self(i64::MAX),
        }
    }

    pub const fn minor_units(self) -> i64 {
        self.0
    }

    pub fn to_decimal(self) -> Decimal {
        Decimal::new(self.0, MINOR_SCALE)
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns `rate` percent of this amount, rounded to minor units.
    pub fn percent(self, rate: Decimal) -> Self {
        match self.to_decimal().checked_mul(rate) {
            Some(scaled) => Self::from_decimal(scaled / Decimal::ONE_HUNDRED),
            None if self.is_negative() != rate.is_sign_negative() => Self(i64::MIN),
            None => Self(i64::MAX),
        }
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        Amount(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Amount) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_decimal())
    }
}

/// Error returned when text cannot be read as an amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountParseError(String);

impl Display for AmountParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid amount `{}`", self.0)
    }
}

impl Error for AmountParseError {}

impl FromStr for Amount {
    type Err = AmountParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Decimal::from_str(trimmed)
            .map(Self::from_decimal)
            .map_err(|_| AmountParseError(trimmed.to_string()))
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_decimal(&self.to_decimal(), serializer)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer
            .deserialize_any(LenientDecimalVisitor)
            .map(Self::from_decimal)
    }
}

/// Serde adapter for percentage rates stored as plain JSON numbers.
///
/// Use with `#[serde(with = "crate::model::money::rate")]`.
pub mod rate {
    use super::{serialize_decimal, LenientDecimalVisitor};
    use rust_decimal::Decimal;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_decimal(value, serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
        deserializer.deserialize_any(LenientDecimalVisitor)
    }
}

fn serialize_decimal<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
    let normalized = value.normalize();
    if normalized.scale() == 0 {
        if let Some(whole) = normalized.to_i64() {
            return serializer.serialize_i64(whole);
        }
    }
    serializer.serialize_f64(normalized.to_f64().unwrap_or(0.0))
}

/// Reads numbers, numeric strings and nulls; anything non-numeric is zero.
struct LenientDecimalVisitor;

impl<'de> Visitor<'de> for LenientDecimalVisitor {
    type Value = Decimal;

    fn expecting(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("a number, numeric string or null")
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Decimal, E> {
        Ok(Decimal::from(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Decimal, E> {
        Ok(Decimal::from(value))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Decimal, E> {
        if !value.is_finite() {
            return Ok(Decimal::ZERO);
        }
        // Display yields the shortest round-trip text, e.g. 0.1 stays "0.1".
        Ok(Decimal::from_str(&value.to_string()).unwrap_or(Decimal::ZERO))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Decimal, E> {
        Ok(Decimal::from_str(value.trim()).unwrap_or(Decimal::ZERO))
    }

    fn visit_bool<E: de::Error>(self, _value: bool) -> Result<Decimal, E> {
        Ok(Decimal::ZERO)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Decimal, E> {
        Ok(Decimal::ZERO)
    }

    fn visit_none<E: de::Error>(self) -> Result<Decimal, E> {
        Ok(Decimal::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::Amount;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn parses_and_displays_two_decimal_places() {
        let amount = Amount::from_str("8692").unwrap();
        assert_eq!(amount.minor_units(), 869_200);
        assert_eq!(amount.to_string(), "8692.00");
        assert!(Amount::from_str("abc").is_err());
    }

    #[test]
    fn percent_rounds_half_away_from_zero() {
        assert_eq!(
            Amount::from_major(8200).percent(Decimal::from(6)),
            Amount::from_major(492)
        );
        // 0.25 * 6% = 0.015 -> 0.02
        assert_eq!(
            Amount::from_minor(25).percent(Decimal::from(6)),
            Amount::from_minor(2)
        );
    }

    #[test]
    fn serializes_whole_amounts_as_integers() {
        assert_eq!(serde_json::to_string(&Amount::from_major(5000)).unwrap(), "5000");
        assert_eq!(serde_json::to_string(&Amount::from_minor(1050)).unwrap(), "10.5");
    }

    #[test]
    fn lenient_read_accepts_floats_strings_and_null() {
        let parsed: Vec<Amount> =
            serde_json::from_str(r#"[0.1, 3200, "12.34", null, "n/a", true]"#).unwrap();
        assert_eq!(
            parsed,
            vec![
                Amount::from_minor(10),
                Amount::from_major(3200),
                Amount::from_minor(1234),
                Amount::ZERO,
                Amount::ZERO,
                Amount::ZERO,
            ]
        );
    }

    #[test]
    fn sum_is_exact_on_minor_units() {
        let total: Amount = [0.1, 0.2, 0.3]
            .iter()
            .map(|value| Amount::from_str(&value.to_string()).unwrap())
            .sum();
        assert_eq!(total, Amount::from_minor(60));
    }
}
