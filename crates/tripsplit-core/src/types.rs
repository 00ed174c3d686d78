//! # Domain Types
//!
//! Records exchanged between the trip app and the calculation core.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  INPUTS (owned by the app's storage)                                   │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  Participant    │   │    Expense      │   │   Settlement    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id, payer_id   │   │  id             │       │
//! │  │  name           │   │  amount         │   │  from_id, to_id │       │
//! │  └─────────────────┘   │  shares[] ──────┼─► │  amount         │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! │                                 SplitShare                              │
//! │                                                                         │
//! │  OUTPUTS (recomputed on every call)                                    │
//! │  ┌─────────────────┐   ┌─────────────────────┐  ┌──────────────────┐   │
//! │  │    Balance      │   │ ParticipantLedger-  │  │ Settlement-      │   │
//! │  │  from → to      │   │ Entry (paid/owed)   │  │ Suggestion       │   │
//! │  └─────────────────┘   └─────────────────────┘  └──────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Participants are referenced by id everywhere. The core never mutates
//! an input record.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Percentage
// =============================================================================

/// A percentage in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000, so `33.3%` is exactly `3330` and the
/// percentage split never touches floating point after input parsing.
/// Signed so that a negative user entry can be represented and rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Percentage(i64);

impl Percentage {
    /// 100%.
    pub const WHOLE: Percentage = Percentage(10_000);

    /// Creates a percentage from basis points.
    #[inline]
    pub const fn from_bps(bps: i64) -> Self {
        Percentage(bps)
    }

    /// Creates a percentage from a user-entered value (`33.3` → 3330 bps).
    ///
    /// Rounded to the nearest basis point. Values outside the `i64` range
    /// saturate, and NaN becomes `i64::MAX` bps so the split validator
    /// rejects it instead of reading it as 0%.
    pub fn from_percent(pct: f64) -> Self {
        if pct.is_nan() {
            return Percentage(i64::MAX);
        }
        // `as` saturates on overflow, including for infinities.
        Percentage((pct * 100.0).round() as i64)
    }

    /// Returns the value in basis points.
    #[inline]
    pub const fn bps(&self) -> i64 {
        self.0
    }

    /// Returns the percentage as a float (for display only).
    #[inline]
    pub fn as_percent(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[inline]
    pub const fn zero() -> Self {
        Percentage(0)
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

impl Default for Percentage {
    fn default() -> Self {
        Percentage::zero()
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}%", sign, abs / 100, abs % 100)
    }
}

// =============================================================================
// Participant
// =============================================================================

/// A member of a trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Participant {
    pub id: String,
    /// Display name shown in settlement instructions.
    pub name: String,
}

impl Participant {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Participant {
            id: id.into(),
            name: name.into(),
        }
    }
}

// =============================================================================
// Split Strategy
// =============================================================================

/// How one expense is divided among its participants.
///
/// Per-participant values travel with the variant they belong to. A
/// participant missing from the map contributes zero.
///
/// ## JSON Shape
/// ```json
/// { "kind": "equal" }
/// { "kind": "percentage", "values": { "ana": 3330, "ben": 6670 } }
/// { "kind": "custom", "values": { "ana": 1250, "ben": 750 } }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", content = "values", rename_all = "snake_case")]
pub enum SplitStrategy {
    /// Everyone pays the same; leftover cents go to the first participants.
    Equal,
    /// Each participant pays a share of 100%.
    Percentage(BTreeMap<String, Percentage>),
    /// Each participant pays an explicit amount.
    Custom(BTreeMap<String, Money>),
}

impl Default for SplitStrategy {
    fn default() -> Self {
        SplitStrategy::Equal
    }
}

impl SplitStrategy {
    /// Builds a percentage strategy from `(participant_id, percent)` pairs.
    pub fn percentages<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        SplitStrategy::Percentage(
            values
                .into_iter()
                .map(|(id, pct)| (id.into(), Percentage::from_percent(pct)))
                .collect(),
        )
    }

    /// Builds a custom strategy from `(participant_id, cents)` pairs.
    pub fn custom_cents<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        SplitStrategy::Custom(
            values
                .into_iter()
                .map(|(id, cents)| (id.into(), Money::from_cents(cents)))
                .collect(),
        )
    }

    /// Short name for log lines.
    pub fn name(&self) -> &'static str {
        match self {
            SplitStrategy::Equal => "equal",
            SplitStrategy::Percentage(_) => "percentage",
            SplitStrategy::Custom(_) => "custom",
        }
    }
}

// =============================================================================
// Split Share
// =============================================================================

/// One participant's portion of one expense.
///
/// For a given expense the shares add up to the expense amount exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SplitShare {
    pub participant_id: String,
    pub amount: Money,
    /// Set only for percentage splits.
    pub percentage: Option<Percentage>,
    /// The app marks a share settled once the holder has paid it back.
    pub is_settled: bool,
}

impl SplitShare {
    pub fn new(participant_id: impl Into<String>, amount: Money) -> Self {
        SplitShare {
            participant_id: participant_id.into(),
            amount,
            percentage: None,
            is_settled: false,
        }
    }
}

// =============================================================================
// Expense
// =============================================================================

/// A purchase paid by one participant and divided among several.
///
/// `payer_id` need not appear in `shares`: someone can pay for a meal they
/// did not eat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Expense {
    pub id: String,
    pub amount: Money,
    pub payer_id: String,
    pub shares: Vec<SplitShare>,
    /// ISO 4217 code; amounts are already in the trip currency.
    pub currency: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Expense {
    /// Sum of all share amounts (equals `amount` for a well-formed expense).
    pub fn share_total(&self) -> Money {
        self.shares.iter().map(|s| s.amount).sum()
    }

    /// True when the shares add up to the amount exactly.
    pub fn is_balanced(&self) -> bool {
        self.share_total() == self.amount
    }
}

// =============================================================================
// Settlement
// =============================================================================

/// A real payment from `from_id` to `to_id` that reduces what `from_id`
/// owes `to_id`. Historical fact, never recalculated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Settlement {
    pub id: String,
    pub from_id: String,
    pub to_id: String,
    pub amount: Money,
    pub currency: String,
}

// =============================================================================
// Balance
// =============================================================================

/// `from_id` owes `to_id` a strictly positive `amount`.
///
/// In any list produced by the core, an unordered pair appears at most once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Balance {
    pub from_id: String,
    pub to_id: String,
    pub amount: Money,
    pub currency: String,
}

impl Balance {
    pub fn new(
        from_id: impl Into<String>,
        to_id: impl Into<String>,
        amount: Money,
        currency: impl Into<String>,
    ) -> Self {
        Balance {
            from_id: from_id.into(),
            to_id: to_id.into(),
            amount,
            currency: currency.into(),
        }
    }
}

// =============================================================================
// Reporting Types
// =============================================================================

/// Per-person spending totals.
///
/// `net_balance > 0`: the group owes this participant.
/// `net_balance < 0`: this participant owes the group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ParticipantLedgerEntry {
    pub participant_id: String,
    pub total_paid: Money,
    pub total_owed: Money,
    pub net_balance: Money,
}

/// A payment the group should make, with names resolved for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SettlementSuggestion {
    pub from_id: String,
    pub from_name: String,
    pub to_id: String,
    pub to_name: String,
    pub amount: Money,
    pub currency: String,
    /// e.g. "Ana pays Ben 12.50 EUR"
    pub instruction: String,
}

// =============================================================================
// Unit Tests
// =============================================================================
