//! # Error Types
//!
//! Domain-specific error types for tripsplit-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  CoreError        - What callers of the calculator see                 │
//! │  ├── EmptyParticipantSet                                               │
//! │  ├── InvalidSplit { participant_id, discrepancy, reason }              │
//! │  ├── InvalidAmount / InvalidConfig / ConfigParse                       │
//! │                                                                         │
//! │  ValidationError  - One per-field split problem (SplitValidator)       │
//! │                                                                         │
//! │  Flow: ValidationError ──► CoreError (SplitCalculator fails fast)      │
//! │        ValidationError ──► SplitValidation.errors (collects them all)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Balance, simplification, advice and ledger operations never fail: they
//! are read-only views over history that has already been persisted.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use crate::money::Money;
use crate::types::Percentage;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised by the calculation core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A split was requested with no participants.
    #[error("A split needs at least one participant")]
    EmptyParticipantSet,

    /// The proposed split cannot be applied.
    ///
    /// ## When This Occurs
    /// - Percentages do not add up to 100 (± tolerance)
    /// - Custom amounts do not add up to the expense total (± tolerance)
    /// - A percentage or custom amount is negative
    ///
    /// `discrepancy` is expressed in the unit of the offending value:
    /// basis points for percentages, minor units for amounts.
    #[error("Invalid split: {reason}")]
    InvalidSplit {
        participant_id: Option<String>,
        discrepancy: i64,
        reason: String,
    },

    /// A decimal money string could not be parsed.
    #[error("Invalid amount '{0}': expected a decimal with at most two fraction digits")]
    InvalidAmount(String),

    /// Engine configuration failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Engine configuration text could not be parsed or rendered.
    #[error("Configuration parse error: {0}")]
    ConfigParse(String),
}

// =============================================================================
// Validation Error
// =============================================================================

/// A single problem with a proposed split.
///
/// Interactive callers show these next to the offending input, so each one
/// can report its field, participant and numeric discrepancy.
///
/// Serialized with a `kind` tag, e.g.
/// `{ "kind": "negative_amount", "participant_id": "ben", "amount": -500 }`.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    /// No participants were selected.
    #[error("at least one participant is required")]
    EmptyParticipantSet,

    /// Expense amount is zero or negative.
    #[error("amount must be positive, got {amount}")]
    NonPositiveAmount { amount: Money },

    /// A participant was given a negative percentage.
    #[error("percentage for {participant_id} must not be negative, got {percentage}")]
    NegativePercentage {
        participant_id: String,
        percentage: Percentage,
    },

    /// Percentages do not add up to 100 within the tolerance.
    #[error("percentages must add up to 100% (±{tolerance}), got {total}")]
    PercentageSumOutOfRange {
        total: Percentage,
        tolerance: Percentage,
    },

    /// A participant was given a negative custom amount.
    #[error("amount for {participant_id} must not be negative, got {amount}")]
    NegativeAmount {
        participant_id: String,
        amount: Money,
    },

    /// Custom amounts do not add up to the expense total.
    #[error(
        "custom amounts add up to {actual} but the expense total is {expected} (off by {})",
        Money::from_cents(actual.cents().saturating_sub(expected.cents()))
    )]
    CustomSumMismatch { expected: Money, actual: Money },
}

impl ValidationError {
    /// Name of the input field the error belongs to.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::EmptyParticipantSet => "participants",
            ValidationError::NonPositiveAmount { .. } => "amount",
            ValidationError::NegativePercentage { .. }
            | ValidationError::PercentageSumOutOfRange { .. } => "percentages",
            ValidationError::NegativeAmount { .. } | ValidationError::CustomSumMismatch { .. } => {
                "custom_amounts"
            }
        }
    }

    /// The participant the error is about, if it concerns a single one.
    pub fn participant_id(&self) -> Option<&str> {
        match self {
            ValidationError::NegativePercentage { participant_id, .. }
            | ValidationError::NegativeAmount { participant_id, .. } => Some(participant_id),
            _ => None,
        }
    }

    /// Signed numeric discrepancy (basis points or minor units).
    pub fn discrepancy(&self) -> i64 {
        match self {
            ValidationError::EmptyParticipantSet => 0,
            ValidationError::NonPositiveAmount { amount } => amount.cents(),
            ValidationError::NegativePercentage { percentage, .. } => percentage.bps(),
            ValidationError::PercentageSumOutOfRange { total, .. } => {
                total.bps().saturating_sub(Percentage::WHOLE.bps())
            }
            ValidationError::NegativeAmount { amount, .. } => amount.cents(),
            ValidationError::CustomSumMismatch { expected, actual } => {
                actual.cents().saturating_sub(expected.cents())
            }
        }
    }
}

/// Calculator errors are the first validation failure, reshaped.
impl From<ValidationError> for CoreError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::EmptyParticipantSet => CoreError::EmptyParticipantSet,
            other => CoreError::InvalidSplit {
                participant_id: other.participant_id().map(str::to_string),
                discrepancy: other.discrepancy(),
                reason: other.to_string(),
            },
        }
    }
}

impl From<toml::de::Error> for CoreError {
    fn from(err: toml::de::Error) -> Self {
        CoreError::ConfigParse(err.to_string())
    }
}

impl From<toml::ser::Error> for CoreError {
    fn from(err: toml::ser::Error) -> Self {
        CoreError::ConfigParse(err.to_string())
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
