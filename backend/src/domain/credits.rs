//! Fixed-point credit quantities.
//!
//! Credits are the budget users spend when booking. Costs and balances may be
//! fractional (for example half a credit per slot), so the domain stores them
//! as hundredths in an unsigned integer. Negative quantities are
//! unrepresentable.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const SCALE: u64 = 100;
const FRACTION_DIGITS: usize = 2;

/// Errors raised when parsing a [`Credits`] value from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreditsParseError {
    /// Input was empty once trimmed.
    #[error("credit amount must not be empty")]
    Empty,
    /// Input carried a sign; credit amounts are never negative.
    #[error("credit amount must be unsigned: {value}")]
    Signed { value: String },
    /// Input contained something other than digits and one decimal point.
    #[error("credit amount is not a decimal number: {value}")]
    Malformed { value: String },
    /// More fractional digits than the two the ledger tracks.
    #[error("credit amount supports at most two decimal places: {value}")]
    TooPrecise { value: String },
    /// Value exceeds the representable range.
    #[error("credit amount is too large: {value}")]
    Overflow { value: String },
}

/// Non-negative credit quantity with two decimal places of precision.
///
/// # Examples
/// ```
/// use reservations::domain::Credits;
///
/// let cost: Credits = "2.5".parse().expect("valid amount");
/// assert_eq!(cost, Credits::from_hundredths(250));
/// assert_eq!(cost.to_string(), "2.5");
/// assert_eq!(Credits::whole(3) + cost, Credits::from_hundredths(550));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "CreditsRepr", into = "String")]
pub struct Credits(u64);

impl Credits {
    /// No credits.
    pub const ZERO: Self = Self(0);

    /// Build an amount from whole credits, saturating at the maximum.
    pub const fn whole(credits: u64) -> Self {
        Self(credits.saturating_mul(SCALE))
    }

    /// Build an amount from hundredths of a credit.
    pub const fn from_hundredths(hundredths: u64) -> Self {
        Self(hundredths)
    }

    /// Amount expressed in hundredths of a credit.
    pub const fn hundredths(self) -> u64 {
        self.0
    }

    /// Add two amounts, clamping at the maximum representable value.
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    fn parse_fraction(raw: &str, fraction: &str) -> Result<u64, CreditsParseError> {
        if fraction.len() > FRACTION_DIGITS {
            return Err(CreditsParseError::TooPrecise {
                value: raw.to_owned(),
            });
        }
        if fraction.is_empty() {
            return Ok(0);
        }
        let digits: u64 = fraction.parse().map_err(|_| CreditsParseError::Malformed {
            value: raw.to_owned(),
        })?;
        Ok(if fraction.len() == 1 { digits * 10 } else { digits })
    }
}

impl Add for Credits {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.saturating_add(rhs)
    }
}

impl Sum for Credits {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Self::saturating_add)
    }
}

impl FromStr for Credits {
    type Err = CreditsParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let raw = value.trim();
        if raw.is_empty() {
            return Err(CreditsParseError::Empty);
        }
        if raw.starts_with(['-', '+']) {
            return Err(CreditsParseError::Signed {
                value: raw.to_owned(),
            });
        }
        if !raw.chars().all(|c| c.is_ascii_digit() || c == '.') {
            return Err(CreditsParseError::Malformed {
                value: raw.to_owned(),
            });
        }

        let (whole, fraction) = raw.split_once('.').unwrap_or((raw, ""));
        if whole.is_empty() || fraction.contains('.') {
            return Err(CreditsParseError::Malformed {
                value: raw.to_owned(),
            });
        }

        let whole: u64 = whole.parse().map_err(|_| CreditsParseError::Overflow {
            value: raw.to_owned(),
        })?;
        let fraction = Self::parse_fraction(raw, fraction)?;
        whole
            .checked_mul(SCALE)
            .and_then(|scaled| scaled.checked_add(fraction))
            .map(Self)
            .ok_or_else(|| CreditsParseError::Overflow {
                value: raw.to_owned(),
            })
    }
}

impl fmt::Display for Credits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / SCALE;
        let fraction = self.0 % SCALE;
        match fraction {
            0 => write!(f, "{whole}"),
            f_digits if f_digits % 10 == 0 => write!(f, "{whole}.{}", f_digits / 10),
            f_digits => write!(f, "{whole}.{f_digits:02}"),
        }
    }
}

impl From<Credits> for String {
    fn from(value: Credits) -> Self {
        value.to_string()
    }
}

/// Wire forms accepted for [`Credits`]: whole-credit integers or decimal text.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum CreditsRepr {
    Whole(u64),
    Text(String),
}

impl TryFrom<CreditsRepr> for Credits {
    type Error = CreditsParseError;

    fn try_from(value: CreditsRepr) -> Result<Self, Self::Error> {
        match value {
            CreditsRepr::Whole(credits) => credits.checked_mul(SCALE).map(Self).ok_or_else(|| {
                CreditsParseError::Overflow {
                    value: credits.to_string(),
                }
            }),
            CreditsRepr::Text(text) => text.parse(),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for credit parsing, formatting, and arithmetic.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("5", 500)]
    #[case("5.", 500)]
    #[case("5.5", 550)]
    #[case("5.25", 525)]
    #[case("0.05", 5)]
    #[case(" 12 ", 1200)]
    fn parses_decimal_text(#[case] input: &str, #[case] hundredths: u64) {
        let credits: Credits = input.parse().expect("valid credits");
        assert_eq!(credits.hundredths(), hundredths);
    }

    #[rstest]
    #[case("", CreditsParseError::Empty)]
    #[case("-1", CreditsParseError::Signed { value: "-1".to_owned() })]
    #[case("1.234", CreditsParseError::TooPrecise { value: "1.234".to_owned() })]
    #[case("1.2.3", CreditsParseError::Malformed { value: "1.2.3".to_owned() })]
    #[case(".5", CreditsParseError::Malformed { value: ".5".to_owned() })]
    #[case("ten", CreditsParseError::Malformed { value: "ten".to_owned() })]
    fn rejects_invalid_text(#[case] input: &str, #[case] expected: CreditsParseError) {
        let err = input.parse::<Credits>().expect_err("invalid credits");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn rejects_values_beyond_range() {
        let err = "184467440737095517".parse::<Credits>().expect_err("overflow");
        assert!(matches!(err, CreditsParseError::Overflow { .. }));
    }

    #[rstest]
    #[case(Credits::whole(5), "5")]
    #[case(Credits::from_hundredths(150), "1.5")]
    #[case(Credits::from_hundredths(125), "1.25")]
    #[case(Credits::from_hundredths(7), "0.07")]
    #[case(Credits::ZERO, "0")]
    fn display_trims_trailing_zeros(#[case] credits: Credits, #[case] expected: &str) {
        assert_eq!(credits.to_string(), expected);
    }

    #[rstest]
    fn addition_saturates() {
        let near_max = Credits::from_hundredths(u64::MAX - 1);
        assert_eq!(
            near_max + Credits::whole(1),
            Credits::from_hundredths(u64::MAX)
        );
    }

    #[rstest]
    fn sum_accumulates_every_term() {
        let total: Credits = [Credits::whole(1), Credits::from_hundredths(50), Credits::whole(2)]
            .into_iter()
            .sum();
        assert_eq!(total, Credits::from_hundredths(350));
    }

    #[rstest]
    fn deserializes_integers_and_decimal_strings() {
        let values: Vec<Credits> =
            serde_json::from_str(r#"[3, "1.5"]"#).expect("credits array");
        assert_eq!(values, vec![Credits::whole(3), Credits::from_hundredths(150)]);
    }

    #[rstest]
    fn serializes_as_decimal_string() {
        let json = serde_json::to_string(&Credits::from_hundredths(275)).expect("serialize");
        assert_eq!(json, r#""2.75""#);
    }
}
