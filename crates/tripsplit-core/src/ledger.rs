//! # Participant Ledger
//!
//! Per-person totals for reporting: what each participant paid, what they
//! consumed, and where that leaves them.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Expense 90.00 paid by ben, shares ana 30 / ben 30 / cai 30             │
//! │  Settlement ana → ben 30                                                │
//! │                                                                         │
//! │            paid      owed      net                                      │
//! │  ana        0.00      0.00     0.00    owed 30, serviced 30             │
//! │  ben       60.00     30.00    30.00    paid 90, received 30             │
//! │  cai        0.00     30.00   -30.00                                     │
//! │  dee        0.00      0.00     0.00    no activity, still listed        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use tracing::debug;

use crate::money::Money;
use crate::types::{Expense, Participant, ParticipantLedgerEntry, Settlement};

/// Builds the per-participant spending view.
///
/// Holds no settings: the ledger reports raw totals, so no epsilon or
/// tolerance applies.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParticipantLedger;

/// Running totals for one roster slot.
#[derive(Debug, Default, Clone, Copy)]
struct Totals {
    paid: Money,
    owed: Money,
}

impl ParticipantLedger {
    /// One entry per roster participant, in roster order.
    ///
    /// ## Rules
    /// - The payer of an expense is credited the full expense amount
    /// - Each share holder is charged their share amount
    /// - A settlement `from → to` lowers `from`'s owed total and `to`'s paid
    ///   total by the settled amount
    ///
    /// Ids that are not on the roster are skipped and logged at debug level.
    /// Participants without any activity still get an all-zero entry.
    ///
    /// ## Example
    /// ```rust
    /// use tripsplit_core::ledger::ParticipantLedger;
    /// use tripsplit_core::money::Money;
    /// use tripsplit_core::types::{Expense, Participant, SplitShare};
    ///
    /// let roster = vec![Participant::new("a", "Ana"), Participant::new("b", "Ben")];
    /// let lunch = Expense {
    ///     id: "e1".into(),
    ///     amount: Money::from_cents(2000),
    ///     payer_id: "a".into(),
    ///     shares: vec![
    ///         SplitShare::new("a", Money::from_cents(1000)),
    ///         SplitShare::new("b", Money::from_cents(1000)),
    ///     ],
    ///     currency: "EUR".into(),
    ///     description: None,
    /// };
    ///
    /// let entries = ParticipantLedger::default().participant_spending(&[lunch], &[], &roster);
    /// assert_eq!(entries[0].net_balance, Money::from_cents(1000));
    /// assert_eq!(entries[1].net_balance, Money::from_cents(-1000));
    /// ```
    pub fn participant_spending(
        &self,
        expenses: &[Expense],
        settlements: &[Settlement],
        participants: &[Participant],
    ) -> Vec<ParticipantLedgerEntry> {
        let slots: HashMap<&str, usize> = participants
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id.as_str(), i))
            .collect();
        let mut totals = vec![Totals::default(); participants.len()];

        for expense in expenses {
            if let Some(t) = slot_for(&slots, &mut totals, &expense.payer_id) {
                t.paid += expense.amount;
            }
            for share in &expense.shares {
                if let Some(t) = slot_for(&slots, &mut totals, &share.participant_id) {
                    t.owed += share.amount;
                }
            }
        }

        for settlement in settlements {
            if let Some(t) = slot_for(&slots, &mut totals, &settlement.from_id) {
                t.owed -= settlement.amount;
            }
            if let Some(t) = slot_for(&slots, &mut totals, &settlement.to_id) {
                t.paid -= settlement.amount;
            }
        }

        debug!(
            participants = participants.len(),
            expenses = expenses.len(),
            settlements = settlements.len(),
            "Built participant ledger"
        );

        participants
            .iter()
            .zip(totals)
            .map(|(participant, t)| ParticipantLedgerEntry {
                participant_id: participant.id.clone(),
                total_paid: t.paid,
                total_owed: t.owed,
                net_balance: t.paid - t.owed,
            })
            .collect()
    }
}

fn slot_for<'a>(
    slots: &HashMap<&str, usize>,
    totals: &'a mut [Totals],
    id: &str,
) -> Option<&'a mut Totals> {
    match slots.get(id) {
        Some(&slot) => totals.get_mut(slot),
        None => {
            debug!(participant_id = %id, "Ledger activity for id outside the roster");
            None
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
