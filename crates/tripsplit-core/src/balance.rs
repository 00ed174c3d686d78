//! # Balance Engine
//!
//! Folds expenses and settlements into netted, pairwise debts.
//!
//! ## Netting
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Accumulator: BTreeMap<(min_id, max_id), signed cents>                  │
//! │               positive  → min_id owes max_id                            │
//! │               negative  → max_id owes min_id                            │
//! │                                                                         │
//! │  Expense  paid by ben, shares ana 30 / ben 30 / cai 30                  │
//! │    (ana, ben) += 30        ana owes ben                                 │
//! │    (ben, cai) -= 30        cai owes ben                                 │
//! │                                                                         │
//! │  Settlement  ana → ben 30                                               │
//! │    (ana, ben) -= 30        ana owes ben nothing now                     │
//! │                                                                         │
//! │  Emit, in key order:  |net| > epsilon → one Balance per pair            │
//! │    Balance { cai → ben, 30 }                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Because each pair has a single signed slot, a pair can never come out in
//! both directions.

use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::money::Money;
use crate::types::{Balance, Expense, Participant, Settlement};

/// Signed net per canonical `(min_id, max_id)` pair.
#[derive(Debug, Default)]
struct PairLedger {
    nets: BTreeMap<(String, String), Money>,
}

impl PairLedger {
    /// Records that `debtor` owes `creditor` a further `amount`.
    fn owe(&mut self, debtor: &str, creditor: &str, amount: Money) {
        if debtor == creditor {
            return;
        }
        let (key, signed) = if debtor < creditor {
            ((debtor.to_string(), creditor.to_string()), amount)
        } else {
            ((creditor.to_string(), debtor.to_string()), -amount)
        };
        *self.nets.entry(key).or_default() += signed;
    }

    fn into_balances(self, epsilon: Money, currency: &str) -> Vec<Balance> {
        self.nets
            .into_iter()
            .filter(|(_, net)| !net.is_negligible(epsilon))
            .map(|((low, high), net)| {
                if net.is_positive() {
                    Balance::new(low, high, net, currency)
                } else {
                    Balance::new(high, low, net.abs(), currency)
                }
            })
            .collect()
    }
}

/// Computes who owes whom from a snapshot of trip history.
#[derive(Debug, Clone, Default)]
pub struct BalanceEngine {
    config: EngineConfig,
}

impl BalanceEngine {
    pub fn new(config: EngineConfig) -> Self {
        BalanceEngine { config }
    }

    /// Netted pairwise balances, ordered by canonical pair.
    ///
    /// ## Algorithm
    /// 1. Every share whose holder is not the payer: holder owes payer.
    /// 2. Every settlement `from → to`: reduces what `from` owes `to`.
    /// 3. Every pair with `|net| > epsilon` yields one Balance pointing
    ///    from debtor to creditor.
    ///
    /// Never fails. Ids missing from `participants` are kept (the history
    /// outlives roster edits) and reported at debug level.
    pub fn calculate_balances(
        &self,
        expenses: &[Expense],
        settlements: &[Settlement],
        participants: &[Participant],
    ) -> Vec<Balance> {
        let currency = self.resolve_currency(expenses, settlements);
        let roster: HashSet<&str> = participants.iter().map(|p| p.id.as_str()).collect();
        let mut ledger = PairLedger::default();

        for expense in expenses {
            if !roster.contains(expense.payer_id.as_str()) {
                debug!(
                    expense_id = %expense.id,
                    payer_id = %expense.payer_id,
                    "Expense payer is not in the roster"
                );
            }
            for share in &expense.shares {
                if !roster.contains(share.participant_id.as_str()) {
                    debug!(
                        expense_id = %expense.id,
                        participant_id = %share.participant_id,
                        "Share holder is not in the roster"
                    );
                }
                ledger.owe(&share.participant_id, &expense.payer_id, share.amount);
            }
        }

        for settlement in settlements {
            ledger.owe(&settlement.to_id, &settlement.from_id, settlement.amount);
        }

        let balances = ledger.into_balances(self.config.epsilon, &currency);
        debug!(
            expenses = expenses.len(),
            settlements = settlements.len(),
            balances = balances.len(),
            "Calculated balances"
        );
        balances
    }

    /// First expense currency, else first settlement currency, else the
    /// configured default.
    fn resolve_currency(&self, expenses: &[Expense], settlements: &[Settlement]) -> String {
        let mut codes = expenses
            .iter()
            .map(|e| e.currency.as_str())
            .chain(settlements.iter().map(|s| s.currency.as_str()))
            .filter(|c| !c.is_empty());

        let Some(currency) = codes.next() else {
            return self.config.default_currency.clone();
        };

        if let Some(other) = codes.find(|c| *c != currency) {
            warn!(
                currency = %currency,
                other = %other,
                "Mixed currencies in one calculation; amounts are assumed pre-converted"
            );
        }
        currency.to_string()
    }
}

/// Signed net position per participant, in order of first appearance.
///
/// Positive: the participant is owed money. Negative: they owe money.
pub fn net_positions(balances: &[Balance]) -> Vec<(String, Money)> {
    let mut positions: Vec<(String, Money)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for balance in balances {
        for (id, delta) in [
            (&balance.from_id, -balance.amount),
            (&balance.to_id, balance.amount),
        ] {
            let slot = *index.entry(id.as_str()).or_insert_with(|| {
                positions.push((id.clone(), Money::zero()));
                positions.len() - 1
            });
            positions[slot].1 += delta;
        }
    }

    positions
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SplitShare;

    fn roster(ids: &[&str]) -> Vec<Participant> {
        ids.iter().map(|id| Participant::new(*id, id.to_uppercase())).collect()
    }

    fn expense(id: &str, payer: &str, shares: &[(&str, i64)]) -> Expense {
        Expense {
            id: id.to_string(),
            amount: Money::from_cents(shares.iter().map(|(_, c)| c).sum()),
            payer_id: payer.to_string(),
            shares: shares
                .iter()
                .map(|(p, c)| SplitShare::new(*p, Money::from_cents(*c)))
                .collect(),
            currency: "EUR".to_string(),
            description: None,
        }
    }

    fn settlement(from: &str, to: &str, cents: i64) -> Settlement {
        Settlement {
            id: format!("s-{from}-{to}"),
            from_id: from.to_string(),
            to_id: to.to_string(),
            amount: Money::from_cents(cents),
            currency: "EUR".to_string(),
        }
    }

    #[test]
    fn test_payer_share_is_ignored() {
        let balances = BalanceEngine::default().calculate_balances(
            &[expense("e1", "ben", &[("ana", 3000), ("ben", 3000), ("cai", 3000)])],
            &[],
            &roster(&["ana", "ben", "cai"]),
        );
        assert_eq!(
            balances,
            vec![
                Balance::new("ana", "ben", Money::from_cents(3000), "EUR"),
                Balance::new("cai", "ben", Money::from_cents(3000), "EUR"),
            ]
        );
    }

    #[test]
    fn test_opposite_debts_are_netted() {
        let balances = BalanceEngine::default().calculate_balances(
            &[
                expense("e1", "ana", &[("ben", 5000)]),
                expense("e2", "ben", &[("ana", 2000)]),
            ],
            &[],
            &roster(&["ana", "ben"]),
        );
        assert_eq!(
            balances,
            vec![Balance::new("ben", "ana", Money::from_cents(3000), "EUR")]
        );
    }

    #[test]
    fn test_settlement_cancels_debt() {
        let balances = BalanceEngine::default().calculate_balances(
            &[expense("e1", "ben", &[("ana", 5000)])],
            &[settlement("ana", "ben", 5000)],
            &roster(&["ana", "ben"]),
        );
        assert!(balances.is_empty());
    }

    #[test]
    fn test_partial_settlement() {
        let balances = BalanceEngine::default().calculate_balances(
            &[expense("e1", "ben", &[("ana", 5000)])],
            &[settlement("ana", "ben", 2000)],
            &roster(&["ana", "ben"]),
        );
        assert_eq!(
            balances,
            vec![Balance::new("ana", "ben", Money::from_cents(3000), "EUR")]
        );
    }

    #[test]
    fn test_epsilon_boundary() {
        let expenses = [expense("e1", "ben", &[("ana", 333)])];
        let settlements = [settlement("ana", "ben", 332)];
        let people = roster(&["ana", "ben"]);

        // One cent left over is rounding noise at the default epsilon.
        assert!(BalanceEngine::default()
            .calculate_balances(&expenses, &settlements, &people)
            .is_empty());

        // With a zero epsilon it is a real debt.
        let strict = BalanceEngine::new(EngineConfig::default().with_epsilon(Money::zero()));
        assert_eq!(
            strict.calculate_balances(&expenses, &settlements, &people),
            vec![Balance::new("ana", "ben", Money::from_cents(1), "EUR")]
        );
    }

    #[test]
    fn test_unknown_ids_are_tolerated() {
        let balances = BalanceEngine::default().calculate_balances(
            &[expense("e1", "ana", &[("ghost", 1200)])],
            &[],
            &roster(&["ana"]),
        );
        assert_eq!(
            balances,
            vec![Balance::new("ghost", "ana", Money::from_cents(1200), "EUR")]
        );
    }

    #[test]
    fn test_currency_falls_back_to_default() {
        let engine = BalanceEngine::new(EngineConfig::default().with_default_currency("JPY"));
        let mut s = settlement("ana", "ben", 100);
        s.currency = String::new();
        let balances = engine.calculate_balances(&[], &[s], &roster(&["ana", "ben"]));
        assert_eq!(balances[0].currency, "JPY");
        assert_eq!(balances[0].from_id, "ben");
    }

    #[test]
    fn test_net_positions_first_appearance_order() {
        let nets = net_positions(&[
            Balance::new("cai", "ana", Money::from_cents(500), "EUR"),
            Balance::new("ben", "cai", Money::from_cents(200), "EUR"),
        ]);
        assert_eq!(
            nets,
            vec![
                ("cai".to_string(), Money::from_cents(-300)),
                ("ana".to_string(), Money::from_cents(500)),
                ("ben".to_string(), Money::from_cents(-200)),
            ]
        );
    }
}
