//! # Split Calculator
//!
//! Divides one expense among its participants, cent-exact.
//!
//! ## Strategies
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  EQUAL        10.00 between 3                                           │
//! │               1000 / 3 = 333 rem 1  →  334, 333, 333                   │
//! │               (first participants absorb the remainder)                 │
//! │                                                                         │
//! │  PERCENTAGE   10.00 at 33.3 / 33.3 / 33.3  (99.9% is within ±0.5)      │
//! │               round(1000 × 3330 / 10000) = 333 each = 999              │
//! │               drift +1 → largest percentage first → 334, 333, 333      │
//! │                                                                         │
//! │  CUSTOM       10.00 as 5.00 / 4.99  (off by one cent, tolerated)       │
//! │               residual goes to the largest amount → 5.01, 4.99         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Whatever the strategy, the returned shares add up to the expense amount
//! exactly.

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::EngineConfig;
use crate::error::CoreResult;
use crate::money::Money;
use crate::types::{Percentage, SplitShare, SplitStrategy};
use crate::validation::{custom_amount_errors, percentage_errors, validate_participants};

/// Computes per-participant shares for a new expense.
#[derive(Debug, Clone, Default)]
pub struct SplitCalculator {
    config: EngineConfig,
}

impl SplitCalculator {
    pub fn new(config: EngineConfig) -> Self {
        SplitCalculator { config }
    }

    /// Splits `amount` among `participants` (in the given order).
    ///
    /// ## Errors
    /// - [`CoreError::EmptyParticipantSet`](crate::CoreError::EmptyParticipantSet)
    ///   when `participants` is empty
    /// - [`CoreError::InvalidSplit`](crate::CoreError::InvalidSplit) for the
    ///   first percentage or custom rule that fails
    ///
    /// A non-positive `amount` is not an error: nothing needs distributing,
    /// so every share is zero.
    ///
    /// ## Example
    /// ```rust
    /// use tripsplit_core::money::Money;
    /// use tripsplit_core::split::SplitCalculator;
    /// use tripsplit_core::types::SplitStrategy;
    ///
    /// let people = vec!["ana".to_string(), "ben".to_string(), "cai".to_string()];
    /// let shares = SplitCalculator::default()
    ///     .calculate_split(Money::from_cents(1000), &SplitStrategy::Equal, &people)
    ///     .unwrap();
    ///
    /// let cents: Vec<i64> = shares.iter().map(|s| s.amount.cents()).collect();
    /// assert_eq!(cents, vec![334, 333, 333]);
    /// ```
    pub fn calculate_split(
        &self,
        amount: Money,
        strategy: &SplitStrategy,
        participants: &[String],
    ) -> CoreResult<Vec<SplitShare>> {
        validate_participants(participants)?;

        if !amount.is_positive() {
            debug!(amount = %amount, "Non-positive amount, all shares are zero");
            return Ok(zero_shares(strategy, participants));
        }

        let shares = match strategy {
            SplitStrategy::Equal => split_equal(amount, participants),
            SplitStrategy::Percentage(values) => {
                if let Some(err) =
                    percentage_errors(values, participants, self.config.percentage_tolerance)
                        .into_iter()
                        .next()
                {
                    return Err(err.into());
                }
                split_by_percentage(amount, values, participants)
            }
            SplitStrategy::Custom(values) => {
                if let Some(err) = custom_amount_errors(
                    amount,
                    values,
                    participants,
                    self.config.custom_sum_tolerance,
                )
                .into_iter()
                .next()
                {
                    return Err(err.into());
                }
                split_custom(amount, values, participants)
            }
        };

        debug!(
            strategy = strategy.name(),
            amount = %amount,
            participants = participants.len(),
            "Calculated split"
        );

        Ok(shares)
    }
}

// =============================================================================
// Strategy Implementations
// =============================================================================

fn zero_shares(strategy: &SplitStrategy, participants: &[String]) -> Vec<SplitShare> {
    participants
        .iter()
        .map(|id| {
            let mut share = SplitShare::new(id.clone(), Money::zero());
            if let SplitStrategy::Percentage(values) = strategy {
                share.percentage = Some(values.get(id).copied().unwrap_or_default());
            }
            share
        })
        .collect()
}

fn split_equal(amount: Money, participants: &[String]) -> Vec<SplitShare> {
    let units = amount.cents();
    let n = participants.len() as i64;
    let base = units / n;
    let remainder = units - base * n;

    participants
        .iter()
        .enumerate()
        .map(|(i, id)| {
            let cents = if (i as i64) < remainder { base + 1 } else { base };
            SplitShare::new(id.clone(), Money::from_cents(cents))
        })
        .collect()
}

/// `round(units × bps / 10000)`, half away from zero, for non-negative inputs.
fn percentage_of(units: i64, pct: Percentage) -> i128 {
    (i128::from(units) * i128::from(pct.bps()) + 5_000) / 10_000
}

fn split_by_percentage(
    amount: Money,
    values: &BTreeMap<String, Percentage>,
    participants: &[String],
) -> Vec<SplitShare> {
    let units = amount.cents();
    let pcts: Vec<Percentage> = participants
        .iter()
        .map(|id| values.get(id).copied().unwrap_or_default())
        .collect();
    let mut cents: Vec<i128> = pcts.iter().map(|&p| percentage_of(units, p)).collect();

    // Largest percentage first; stable sort keeps input order on ties.
    let mut order: Vec<usize> = (0..participants.len()).collect();
    order.sort_by(|&a, &b| pcts[b].cmp(&pcts[a]));
    let mut eligible: Vec<usize> = order
        .iter()
        .copied()
        .filter(|&i| pcts[i].bps() > 0)
        .collect();
    if eligible.is_empty() {
        eligible = order;
    }

    let drift = i128::from(units) - cents.iter().sum::<i128>();
    if drift != 0 {
        debug!(drift = %drift, "Correcting percentage rounding drift");
    }
    if drift > 0 {
        spread_shortfall(&mut cents, &eligible, drift);
    } else if drift < 0 {
        trim_excess(&mut cents, &eligible, -drift);
    }

    participants
        .iter()
        .zip(cents)
        .zip(pcts)
        .map(|((id, c), pct)| SplitShare {
            participant_id: id.clone(),
            amount: Money::from_cents(i64::try_from(c).unwrap_or(units)),
            percentage: Some(pct),
            is_settled: false,
        })
        .collect()
}

/// Adds `shortfall` cents one at a time in `priority` order, cycling.
///
/// Done as whole laps plus one partial lap, so the cost does not depend on
/// the size of the shortfall.
fn spread_shortfall(cents: &mut [i128], priority: &[usize], shortfall: i128) {
    let lap = priority.len() as i128;
    let (whole_laps, partial) = (shortfall / lap, shortfall % lap);
    for (rank, &idx) in priority.iter().enumerate() {
        cents[idx] += whole_laps + i128::from((rank as i128) < partial);
    }
}

/// Removes `excess` cents one at a time in `priority` order, cycling and
/// skipping anyone already at zero.
///
/// Each pass takes as many whole laps as it can before someone runs dry, so
/// there are at most `priority.len() + 1` passes.
fn trim_excess(cents: &mut [i128], priority: &[usize], mut excess: i128) {
    while excess > 0 {
        let active: Vec<usize> = priority.iter().copied().filter(|&i| cents[i] > 0).collect();
        if active.is_empty() {
            break;
        }

        let lap = active.len() as i128;
        let affordable = excess / lap;
        if affordable == 0 {
            for &idx in active.iter().take(excess as usize) {
                cents[idx] -= 1;
            }
            break;
        }

        let floor = active.iter().map(|&i| cents[i]).min().unwrap_or(0);
        let laps = affordable.min(floor);
        for &idx in &active {
            cents[idx] -= laps;
        }
        excess -= laps * lap;
    }
}

fn split_custom(
    amount: Money,
    values: &BTreeMap<String, Money>,
    participants: &[String],
) -> Vec<SplitShare> {
    let mut shares: Vec<SplitShare> = participants
        .iter()
        .map(|id| SplitShare::new(id.clone(), values.get(id).copied().unwrap_or_default()))
        .collect();

    let total: i128 = shares.iter().map(|s| i128::from(s.amount.cents())).sum();
    // Validation bounds the residual by the custom-sum tolerance.
    let residual = i64::try_from(i128::from(amount.cents()) - total).unwrap_or(0);
    let residual = Money::from_cents(residual);

    if !residual.is_zero() {
        // First participant holding the largest amount absorbs the residual.
        let mut target = 0;
        for (i, share) in shares.iter().enumerate() {
            if share.amount > shares[target].amount {
                target = i;
            }
        }
        debug!(
            residual = %residual,
            participant_id = %shares[target].participant_id,
            "Absorbing custom split residual"
        );
        shares[target].amount += residual;
    }

    shares
}

// =============================================================================
// Unit Tests
// =============================================================================
