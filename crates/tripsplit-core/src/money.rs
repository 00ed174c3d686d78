//! # Money Module
//!
//! Integer minor-unit amounts for every number the core touches.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SPLITTING A DINNER BILL                                                │
//! │                                                                         │
//! │  With decimals or floats:                                               │
//! │    10.00 / 3 = 3.33 (×3 = 9.99)  → Lost 0.01!                          │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Minor Units                                      │
//! │    1000 cents / 3 = 333 cents, remainder 1                              │
//! │    The remainder is handed out explicitly → 334 + 333 + 333 = 1000     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tripsplit_core::money::Money;
//!
//! // Minor units straight from storage
//! let dinner = Money::from_cents(4550); // 45.50
//!
//! // Or parse the decimal the app stored
//! let taxi: Money = "12.30".parse().unwrap();
//!
//! assert_eq!((dinner + taxi).to_string(), "57.80");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;
use ts_rs::TS;

use crate::error::CoreError;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: Net balances and ledger totals go negative
/// - **Newtype**: same layout as i64, no arithmetic mix-ups with counts
/// - **Currency-agnostic**: Every amount entering the core is already
///   converted to the trip currency, so the code travels alongside
///
/// ## Where Money Flows
/// ```text
/// Expense.amount ──► SplitCalculator ──► SplitShare.amount
///                                              │
///                      ┌───────────────────────┤
///                      ▼                       ▼
///               BalanceEngine          ParticipantLedger
///                      │
///                      ▼
///              DebtSimplifier ──► SettlementAdvisor ──► "Ana pays Ben 12.50 EUR"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Wraps a minor-unit count.
    ///
    /// ## Example
    /// ```rust
    /// use tripsplit_core::money::Money;
    ///
    /// let coffee = Money::from_cents(1099); // 10.99
    /// assert_eq!(coffee.to_string(), "10.99");
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Raw minor units.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion (truncated toward zero).
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Strictly greater than zero.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Strictly below zero.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// True when `|self| <= epsilon`.
    ///
    /// Every "is this zero?" question downstream of the splitter goes
    /// through here so the tolerance stays a single configurable value.
    ///
    /// ## Example
    /// ```rust
    /// use tripsplit_core::money::Money;
    ///
    /// let epsilon = Money::from_cents(1);
    /// assert!(Money::from_cents(-1).is_negligible(epsilon));
    /// assert!(!Money::from_cents(2).is_negligible(epsilon));
    /// ```
    #[inline]
    pub const fn is_negligible(&self, epsilon: Money) -> bool {
        self.0.abs() <= epsilon.0
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain decimal rendering without a currency symbol ("10.99", "-0.05").
///
/// The currency code lives next to the amount on every record, so the
/// caller decides how to decorate it.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor())
    }
}

/// Parses decimal strings with at most two fraction digits.
///
/// Accepted: `"10"`, `"10.5"`, `"10.50"`, `"-3.25"`, `"+4"`, `".75"`.
/// Rejected: `"1.234"`, `"abc"`, `""`, `"1,50"`.
impl FromStr for Money {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::InvalidAmount(s.to_string());
        let trimmed = s.trim();

        let (negative, digits) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };

        let (major_str, minor_str) = match digits.split_once('.') {
            Some((major, minor)) => (major, minor),
            None => (digits, ""),
        };

        if major_str.is_empty() && minor_str.is_empty() {
            return Err(invalid());
        }
        if minor_str.len() > 2
            || !major_str.bytes().all(|b| b.is_ascii_digit())
            || !minor_str.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let major: i64 = if major_str.is_empty() {
            0
        } else {
            major_str.parse().map_err(|_| invalid())?
        };
        let minor: i64 = match minor_str.len() {
            0 => 0,
            1 => minor_str.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => minor_str.parse().map_err(|_| invalid())?,
        };

        let cents = major
            .checked_mul(100)
            .and_then(|c| c.checked_add(minor))
            .ok_or_else(invalid)?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
