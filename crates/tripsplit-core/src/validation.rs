//! # Validation Module
//!
//! Split rules shared by [`SplitValidator`] and the
//! [`SplitCalculator`](crate::split::SplitCalculator).
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Who Runs The Rules                                 │
//! │                                                                         │
//! │  Expense form (interactive)                                            │
//! │  └── SplitValidator::validate_split                                    │
//! │      Runs EVERY rule, collects every error, never fails                │
//! │      → the form highlights each offending field at once                │
//! │           │                                                             │
//! │           ▼  user fixes input, presses Save                             │
//! │  SplitCalculator::calculate_split                                      │
//! │      Runs the same rules, stops at the first error (CoreError)         │
//! │      → shares are only produced for a consistent split                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tripsplit_core::money::Money;
//! use tripsplit_core::types::SplitStrategy;
//! use tripsplit_core::validation::SplitValidator;
//!
//! let validator = SplitValidator::default();
//! let participants = vec!["ana".to_string(), "ben".to_string()];
//! let strategy = SplitStrategy::percentages([("ana", 70.0), ("ben", 20.0)]);
//!
//! let result = validator.validate_split(Money::from_cents(5000), &strategy, &participants);
//! assert!(!result.is_valid);
//! assert_eq!(result.errors[0].field(), "percentages");
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::config::EngineConfig;
use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Percentage, SplitStrategy};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Shared Rules
// =============================================================================

/// There must be someone to split between.
pub fn validate_participants(participants: &[String]) -> ValidationResult<()> {
    if participants.is_empty() {
        return Err(ValidationError::EmptyParticipantSet);
    }
    Ok(())
}

/// The expense total must be positive.
pub fn validate_amount(amount: Money) -> ValidationResult<()> {
    if !amount.is_positive() {
        return Err(ValidationError::NonPositiveAmount { amount });
    }
    Ok(())
}

/// Percentage rules, in reporting order.
///
/// ## Rules
/// - No participant may have a negative percentage
/// - The percentages of the listed participants add up to 100 ± `tolerance`
///
/// Values for ids that are not in `participants` are ignored; listed
/// participants without a value count as 0%.
pub fn percentage_errors(
    values: &BTreeMap<String, Percentage>,
    participants: &[String],
    tolerance: Percentage,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut total_bps = 0_i128;

    for id in participants {
        let pct = values.get(id).copied().unwrap_or_default();
        if pct.is_negative() {
            errors.push(ValidationError::NegativePercentage {
                participant_id: id.clone(),
                percentage: pct,
            });
        }
        total_bps += i128::from(pct.bps());
    }

    if (total_bps - i128::from(Percentage::WHOLE.bps())).abs() > i128::from(tolerance.bps()) {
        errors.push(ValidationError::PercentageSumOutOfRange {
            total: Percentage::from_bps(saturate(total_bps)),
            tolerance,
        });
    }

    errors
}

/// Custom amount rules, in reporting order.
///
/// ## Rules
/// - No participant may have a negative amount
/// - The amounts of the listed participants add up to `amount` ± `tolerance`
pub fn custom_amount_errors(
    amount: Money,
    values: &BTreeMap<String, Money>,
    participants: &[String],
    tolerance: Money,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut total = 0_i128;

    for id in participants {
        let value = values.get(id).copied().unwrap_or_default();
        if value.is_negative() {
            errors.push(ValidationError::NegativeAmount {
                participant_id: id.clone(),
                amount: value,
            });
        }
        total += i128::from(value.cents());
    }

    if (total - i128::from(amount.cents())).abs() > i128::from(tolerance.cents()) {
        errors.push(ValidationError::CustomSumMismatch {
            expected: amount,
            actual: Money::from_cents(saturate(total)),
        });
    }

    errors
}

/// Sums run in i128 so arbitrary caller input cannot overflow; reported
/// totals are clamped back into i64.
fn saturate(value: i128) -> i64 {
    i64::try_from(value).unwrap_or(if value < 0 { i64::MIN } else { i64::MAX })
}

// =============================================================================
// Split Validator
// =============================================================================

/// Outcome of [`SplitValidator::validate_split`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SplitValidation {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
}

impl SplitValidation {
    fn from_errors(errors: Vec<ValidationError>) -> Self {
        SplitValidation {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// Errors that belong to one input field.
    pub fn errors_for<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a ValidationError> {
        self.errors.iter().filter(move |e| e.field() == field)
    }
}

/// Checks a proposed split without computing shares.
#[derive(Debug, Clone, Default)]
pub struct SplitValidator {
    config: EngineConfig,
}

impl SplitValidator {
    pub fn new(config: EngineConfig) -> Self {
        SplitValidator { config }
    }

    /// Runs every split rule and reports all failures.
    ///
    /// Stricter than the calculator on one point: a non-positive amount is
    /// reported here, while the calculator quietly yields zero shares.
    pub fn validate_split(
        &self,
        amount: Money,
        strategy: &SplitStrategy,
        participants: &[String],
    ) -> SplitValidation {
        let mut errors = Vec::new();

        if let Err(e) = validate_participants(participants) {
            errors.push(e);
        }
        if let Err(e) = validate_amount(amount) {
            errors.push(e);
        }

        match strategy {
            SplitStrategy::Equal => {}
            SplitStrategy::Percentage(values) => errors.extend(percentage_errors(
                values,
                participants,
                self.config.percentage_tolerance,
            )),
            SplitStrategy::Custom(values) => errors.extend(custom_amount_errors(
                amount,
                values,
                participants,
                self.config.custom_sum_tolerance,
            )),
        }

        debug!(
            strategy = strategy.name(),
            participants = participants.len(),
            errors = errors.len(),
            "Validated split"
        );

        SplitValidation::from_errors(errors)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
