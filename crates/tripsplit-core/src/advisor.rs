//! # Settlement Advisor
//!
//! Presentation layer over simplified balances: resolves names and writes
//! the "who pays whom" instructions. No arithmetic happens here.

use std::collections::HashMap;

use tracing::debug;

use crate::config::EngineConfig;
use crate::types::{Balance, Participant, SettlementSuggestion};

/// Turns balances into settlement suggestions.
#[derive(Debug, Clone, Default)]
pub struct SettlementAdvisor {
    config: EngineConfig,
}

impl SettlementAdvisor {
    pub fn new(config: EngineConfig) -> Self {
        SettlementAdvisor { config }
    }

    /// One suggestion per balance, in the same order.
    ///
    /// Ids without a roster entry are shown with the configured fallback
    /// label instead of failing.
    ///
    /// ## Example
    /// ```rust
    /// use tripsplit_core::advisor::SettlementAdvisor;
    /// use tripsplit_core::money::Money;
    /// use tripsplit_core::types::{Balance, Participant};
    ///
    /// let roster = vec![Participant::new("a", "Ana"), Participant::new("b", "Ben")];
    /// let debts = vec![Balance::new("a", "b", Money::from_cents(1250), "EUR")];
    ///
    /// let suggestions = SettlementAdvisor::default().suggest_settlements(&debts, &roster);
    /// assert_eq!(suggestions[0].instruction, "Ana pays Ben 12.50 EUR");
    /// ```
    pub fn suggest_settlements(
        &self,
        balances: &[Balance],
        participants: &[Participant],
    ) -> Vec<SettlementSuggestion> {
        let names: HashMap<&str, &str> = participants
            .iter()
            .map(|p| (p.id.as_str(), p.name.as_str()))
            .collect();

        let suggestions: Vec<SettlementSuggestion> = balances
            .iter()
            .map(|balance| {
                let from_name = self.display_name(&names, &balance.from_id);
                let to_name = self.display_name(&names, &balance.to_id);
                let instruction = format!(
                    "{} pays {} {} {}",
                    from_name, to_name, balance.amount, balance.currency
                );

                SettlementSuggestion {
                    from_id: balance.from_id.clone(),
                    from_name,
                    to_id: balance.to_id.clone(),
                    to_name,
                    amount: balance.amount,
                    currency: balance.currency.clone(),
                    instruction,
                }
            })
            .collect();

        debug!(count = suggestions.len(), "Prepared settlement suggestions");
        suggestions
    }

    /// Multi-line summary with payer names padded so amounts line up.
    ///
    /// ```text
    /// Ana  → Ben 12.50 EUR
    /// Caio → Ben  3.00 EUR
    /// ```
    pub fn summarize(&self, suggestions: &[SettlementSuggestion]) -> String {
        if suggestions.is_empty() {
            return "All settled up!".to_string();
        }

        let payer_width = suggestions
            .iter()
            .map(|s| s.from_name.chars().count())
            .max()
            .unwrap_or(0);
        let payee_width = suggestions
            .iter()
            .map(|s| s.to_name.chars().count())
            .max()
            .unwrap_or(0);
        let amount_width = suggestions
            .iter()
            .map(|s| s.amount.to_string().len())
            .max()
            .unwrap_or(0);

        suggestions
            .iter()
            .map(|s| {
                format!(
                    "{:<pw$} → {:<rw$} {:>aw$} {}",
                    s.from_name,
                    s.to_name,
                    s.amount.to_string(),
                    s.currency,
                    pw = payer_width,
                    rw = payee_width,
                    aw = amount_width,
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn display_name(&self, names: &HashMap<&str, &str>, id: &str) -> String {
        match names.get(id) {
            Some(name) => (*name).to_string(),
            None => {
                debug!(participant_id = %id, "No roster entry, using fallback label");
                self.config.unknown_participant_label.clone()
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
