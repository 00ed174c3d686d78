//! # Debt Simplifier
//!
//! Turns pairwise balances into a short list of direct payments.
//!
//! ## Greedy Matching
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Balances:   ana → ben 10,  ben → cai 10                               │
//! │                                                                         │
//! │  Net positions (first appearance order):                               │
//! │     ana -10   ben 0   cai +10                                          │
//! │                                                                         │
//! │  debtors   [ana 10]        creditors [cai 10]                          │
//! │     ▲ cursor                  ▲ cursor                                 │
//! │                                                                         │
//! │  settle min(10, 10) → ana → cai 10, both cursors advance               │
//! │                                                                         │
//! │  Result: 1 payment instead of 2                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The result always zeroes every position, and never needs more than
//! `creditors + debtors - 1` payments. It is a heuristic: finding the true
//! minimum number of payments is NP-hard, and in adversarial cases another
//! matching may need fewer.

use tracing::{debug, warn};

use crate::balance::net_positions;
use crate::config::EngineConfig;
use crate::money::Money;
use crate::types::Balance;

/// Reduces a balance graph to creditor/debtor payments.
#[derive(Debug, Clone, Default)]
pub struct DebtSimplifier {
    config: EngineConfig,
}

impl DebtSimplifier {
    pub fn new(config: EngineConfig) -> Self {
        DebtSimplifier { config }
    }

    /// Minimal-ish payments that settle `balances`.
    ///
    /// ## Algorithm
    /// 1. Fold balances into one net position per participant
    /// 2. Split into creditors (`net > epsilon`) and debtors
    ///    (`net < -epsilon`), keeping first-appearance order
    /// 3. Pay `min(debt, credit)` from the current debtor to the current
    ///    creditor; move past whichever side is (near) zero
    /// 4. Stop when either side runs out
    ///
    /// ## Example
    /// ```rust
    /// use tripsplit_core::money::Money;
    /// use tripsplit_core::simplify::DebtSimplifier;
    /// use tripsplit_core::types::Balance;
    ///
    /// let chain = vec![
    ///     Balance::new("ana", "ben", Money::from_cents(1000), "EUR"),
    ///     Balance::new("ben", "cai", Money::from_cents(1000), "EUR"),
    /// ];
    /// let simplified = DebtSimplifier::default().simplify_balances(&chain);
    ///
    /// assert_eq!(simplified, vec![Balance::new("ana", "cai", Money::from_cents(1000), "EUR")]);
    /// ```
    pub fn simplify_balances(&self, balances: &[Balance]) -> Vec<Balance> {
        let epsilon = self.config.epsilon;
        let currency = balances
            .first()
            .map(|b| b.currency.clone())
            .unwrap_or_else(|| self.config.default_currency.clone());

        let mut creditors: Vec<(String, Money)> = Vec::new();
        let mut debtors: Vec<(String, Money)> = Vec::new();
        for (id, net) in net_positions(balances) {
            if net.is_negligible(epsilon) {
                continue;
            }
            if net.is_positive() {
                creditors.push((id, net));
            } else {
                debtors.push((id, net.abs()));
            }
        }

        let mut result = Vec::new();
        let (mut c, mut d) = (0, 0);

        while c < creditors.len() && d < debtors.len() {
            let settled = creditors[c].1.min(debtors[d].1);
            result.push(Balance::new(
                debtors[d].0.clone(),
                creditors[c].0.clone(),
                settled,
                currency.clone(),
            ));
            creditors[c].1 -= settled;
            debtors[d].1 -= settled;

            if creditors[c].1.is_negligible(epsilon) {
                c += 1;
            }
            if debtors[d].1.is_negligible(epsilon) {
                d += 1;
            }
        }

        let leftover_credit: Money = creditors[c..].iter().map(|(_, m)| *m).sum();
        let leftover_debt: Money = debtors[d..].iter().map(|(_, m)| *m).sum();
        if !leftover_credit.is_zero() || !leftover_debt.is_zero() {
            warn!(
                leftover_credit = %leftover_credit,
                leftover_debt = %leftover_debt,
                "Positions did not fully cancel"
            );
        }

        debug!(
            input = balances.len(),
            output = result.len(),
            "Simplified balances"
        );
        result
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
