//! Integer money type for league budgets.

use rust_decimal::{Decimal, prelude::ToPrimitive};
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// A monetary amount in whole cents.
///
/// League money is integer-only so request/response payloads round-trip
/// without precision loss.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Funds {
    cents: i64,
}

impl Funds {
    pub const ZERO: Funds = Funds { cents: 0 };

    pub fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    pub fn cents(self) -> i64 {
        self.cents
    }

    pub fn to_decimal(self) -> Decimal {
        Decimal::from(self.cents) / Decimal::from(100)
    }

    pub fn from_decimal(decimal: Decimal) -> Self {
        let cents = (decimal * Decimal::from(100)).round().to_i64().unwrap_or(0);
        Self { cents }
    }

    pub fn is_zero(self) -> bool {
        self.cents == 0
    }

    pub fn is_positive(self) -> bool {
        self.cents > 0
    }

    pub fn is_negative(self) -> bool {
        self.cents < 0
    }

    pub fn abs(self) -> Self {
        Self { cents: self.cents.abs() }
    }

    /// Subtraction clamped at zero.
    pub fn safe_sub(self, other: Self) -> Self {
        Self { cents: (self.cents - other.cents).max(0) }
    }
}

impl Add for Funds {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self { cents: self.cents + other.cents }
    }
}

impl AddAssign for Funds {
    fn add_assign(&mut self, other: Self) {
        self.cents += other.cents;
    }
}

impl Sub for Funds {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self { cents: self.cents - other.cents }
    }
}

impl SubAssign for Funds {
    fn sub_assign(&mut self, other: Self) {
        self.cents -= other.cents;
    }
}

impl Mul<i64> for Funds {
    type Output = Self;

    fn mul(self, rhs: i64) -> Self {
        Self { cents: self.cents * rhs }
    }
}

impl Neg for Funds {
    type Output = Self;

    fn neg(self) -> Self {
        Self { cents: -self.cents }
    }
}

impl std::fmt::Display for Funds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.to_decimal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_funds_arithmetic() {
        let a = Funds::from_cents(1500);
        let b = Funds::from_cents(400);
        assert_eq!((a + b).cents(), 1900);
        assert_eq!((a - b).cents(), 1100);
        assert_eq!((b * 3).cents(), 1200);
        assert_eq!((-b).cents(), -400);
    }

    #[test]
    fn test_safe_sub_clamps_at_zero() {
        let a = Funds::from_cents(100);
        let b = Funds::from_cents(250);
        assert_eq!(a.safe_sub(b), Funds::ZERO);
        assert_eq!(b.safe_sub(a).cents(), 150);
    }

    #[test]
    fn test_decimal_conversion() {
        let funds = Funds::from_cents(12345);
        assert_eq!(funds.to_string(), "123.45");
        assert_eq!(Funds::from_decimal(funds.to_decimal()), funds);
    }

    #[test]
    fn test_serializes_as_a_bare_integer() {
        let json = serde_json::to_string(&Funds::from_cents(990)).unwrap();
        assert_eq!(json, "990");
        let back: Funds = serde_json::from_str(&json).unwrap();
        assert_eq!(back.cents(), 990);
    }
}
