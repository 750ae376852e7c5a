//! Signed decimal amounts for transaction values.
//!
//! Uses `rust_decimal` internally so sums of values such as `2.50 + 1.00`
//! are exact. The scale of the parsed text is preserved, which keeps
//! re-serialized records faithful to their input.
//!
//! Magnitudes are limited to what a 96-bit mantissa holds
//! (`79228162514264337593543950335`); larger inputs fail to parse and
//! arithmetic saturates at that bound.

use crate::error::AmountError;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

/// A signed decimal amount.
///
/// No range constraint is enforced: negative amounts are legal.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use merge_transactions::Amount;
///
/// let amount = Amount::from_str("4.50").unwrap();
/// assert_eq!(amount.to_string(), "4.50");
/// assert_eq!(amount.to_currency("$"), "$4.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(Decimal);

impl Amount {
    /// Zero value.
    pub const ZERO: Self = Amount(Decimal::ZERO);

    /// Number of fractional digits shown when rendered as currency.
    pub const CURRENCY_SCALE: u32 = 2;

    /// Returns the underlying decimal.
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Addition that reports overflow instead of saturating.
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Amount)
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Renders the amount as currency, e.g. `-$1,234.50`.
    ///
    /// Values are rounded to two places with midpoints away from zero and the
    /// integer part is grouped in thousands.
    pub fn to_currency(&self, symbol: &str) -> String {
        let rounded = self
            .0
            .round_dp_with_strategy(Self::CURRENCY_SCALE, RoundingStrategy::MidpointAwayFromZero)
            .abs();
        let text = format!("{:.2}", rounded);
        let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

        let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        let sign = if self.is_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        format!("{}{}{}.{}", sign, symbol, grouped, frac_part)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    /// Parses a dot-decimal number (`[+-]digits[.digits]`), ignoring
    /// surrounding whitespace.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        if !is_dot_decimal(trimmed) {
            return Err(AmountError::Syntax(trimmed.to_string()));
        }
        Ok(Amount(Decimal::from_str(trimmed)?))
    }
}

/// Optional sign, then digits with at most one `.`, at least one digit.
fn is_dot_decimal(s: &str) -> bool {
    let unsigned = s.strip_prefix(|c| c == '+' || c == '-').unwrap_or(s);
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());

    (!int_part.is_empty() || !frac_part.is_empty()) && all_digits(int_part) && all_digits(frac_part)
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount(value)
    }
}

impl Add for Amount {
    type Output = Self;

    /// Saturates at the representable bounds.
    fn add(self, rhs: Self) -> Self::Output {
        Amount(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
