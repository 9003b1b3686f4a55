//! Gold weight type
//!
//! Stores weights as integer milligrams to keep ledger arithmetic exact.
//! Display and parsing use grams with up to three decimal places.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use super::money::Money;

/// A gold weight stored as milligrams
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Weight(i64);

impl Weight {
    /// Create a weight from milligrams
    pub const fn from_milligrams(mg: i64) -> Self {
        Self(mg)
    }

    /// Create a weight from whole grams
    pub const fn from_grams(grams: i64) -> Self {
        Self(grams * 1000)
    }

    /// Create a zero weight
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the weight in milligrams
    pub const fn milligrams(&self) -> i64 {
        self.0
    }

    /// Get the whole-gram portion (truncated toward zero)
    pub const fn grams(&self) -> i64 {
        self.0 / 1000
    }

    /// Get the milligram remainder (0-999)
    pub const fn milligrams_part(&self) -> i64 {
        (self.0 % 1000).abs()
    }

    /// Check if the weight is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the weight is positive
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Check if the weight is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Get the absolute value
    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Scale by a per-mille factor, rounding to the nearest milligram.
    /// Used to reduce an alloy weight to its pure-gold content.
    pub fn scale_per_mille(&self, per_mille: i64) -> Self {
        let scaled = self.0 as i128 * per_mille as i128;
        Self(((scaled + 500) / 1000) as i64)
    }

    /// Value of this weight at a per-gram price, rounded to the nearest cent
    pub fn value_at(&self, price_per_gram: Money) -> Money {
        let cents = self.0 as i128 * price_per_gram.cents() as i128;
        let half = if cents >= 0 { 500 } else { -500 };
        Money::from_cents(((cents + half) / 1000) as i64)
    }

    /// Parse a weight from a grams string
    ///
    /// Accepts formats: "10", "10.5", "0.125"
    pub fn parse(s: &str) -> Result<Self, WeightParseError> {
        let s = s.trim();

        let (negative, s) = if let Some(stripped) = s.strip_prefix('-') {
            (true, stripped)
        } else {
            (false, s)
        };

        let mg = if s.contains('.') {
            let parts: Vec<&str> = s.split('.').collect();
            if parts.len() != 2 {
                return Err(WeightParseError::InvalidFormat(s.to_string()));
            }

            let grams: i64 = if parts[0].is_empty() {
                0
            } else {
                parts[0]
                    .parse()
                    .map_err(|_| WeightParseError::InvalidFormat(s.to_string()))?
            };

            // Pad or truncate the fraction to 3 digits (milligrams)
            let frac = parts[1];
            let mut padded = String::from(frac);
            while padded.len() < 3 {
                padded.push('0');
            }
            let mg_part: i64 = padded[..3]
                .parse()
                .map_err(|_| WeightParseError::InvalidFormat(s.to_string()))?;

            grams * 1000 + mg_part
        } else {
            s.parse::<i64>()
                .map_err(|_| WeightParseError::InvalidFormat(s.to_string()))?
                * 1000
        };

        Ok(Self(if negative { -mg } else { mg }))
    }
}

impl Default for Weight {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-{}.{:03} g", self.grams().abs(), self.milligrams_part())
        } else {
            write!(f, "{}.{:03} g", self.grams(), self.milligrams_part())
        }
    }
}

impl Add for Weight {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Weight {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Weight {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Weight {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Weight {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Weight {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Weight::zero(), |acc, w| acc + w)
    }
}

/// Error type for weight parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeightParseError {
    InvalidFormat(String),
}

impl fmt::Display for WeightParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeightParseError::InvalidFormat(s) => write!(f, "Invalid weight format: {}", s),
        }
    }
}

impl std::error::Error for WeightParseError {}
