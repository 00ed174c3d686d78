//! Shared fixtures for the integration suites.

#![allow(dead_code)]

use tracing_subscriber::EnvFilter;
use tripsplit_core::{Expense, Money, Participant, Settlement, SplitShare};

/// Installs a test-writer subscriber once per test binary.
///
/// `RUST_LOG=tripsplit_core=debug cargo test` shows the engine's events.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tripsplit_core=warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

pub fn roster(ids: &[&str]) -> Vec<Participant> {
    ids.iter()
        .map(|id| {
            let mut name = id.to_string();
            if let Some(first) = name.get_mut(0..1) {
                first.make_ascii_uppercase();
            }
            Participant::new(*id, name)
        })
        .collect()
}

pub fn ids(participants: &[Participant]) -> Vec<String> {
    participants.iter().map(|p| p.id.clone()).collect()
}

pub fn expense(id: &str, payer: &str, shares: Vec<SplitShare>) -> Expense {
    let amount = shares.iter().map(|s| s.amount).sum();
    Expense {
        id: id.to_string(),
        amount,
        payer_id: payer.to_string(),
        shares,
        currency: "EUR".to_string(),
        description: None,
    }
}

pub fn settlement(from: &str, to: &str, cents: i64) -> Settlement {
    Settlement {
        id: format!("s-{from}-{to}-{cents}"),
        from_id: from.to_string(),
        to_id: to.to_string(),
        amount: Money::from_cents(cents),
        currency: "EUR".to_string(),
    }
}
