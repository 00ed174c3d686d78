//! End-to-end runs through the whole engine: split, net, simplify, advise.

mod common;

use common::{expense, ids, init_tracing, roster, settlement};
use tripsplit_core::balance::net_positions;
use tripsplit_core::{
    Balance, BalanceEngine, CoreError, DebtSimplifier, EngineConfig, Expense, Money, Participant,
    ParticipantLedger, SettlementAdvisor, SplitCalculator, SplitShare, SplitStrategy,
    SplitValidator,
};

fn share_cents(shares: &[SplitShare]) -> Vec<i64> {
    shares.iter().map(|s| s.amount.cents()).collect()
}

fn bal(from: &str, to: &str, cents: i64) -> Balance {
    Balance::new(from, to, Money::from_cents(cents), "EUR")
}

/// Dinner 90.00 paid by ana and a taxi 30.00 paid by ben, both split
/// equally between ana, ben and cai.
fn weekend_trip() -> (Vec<Participant>, Vec<Expense>) {
    let people = roster(&["ana", "ben", "cai"]);
    let calc = SplitCalculator::default();

    let dinner = calc
        .calculate_split(Money::from_cents(9000), &SplitStrategy::Equal, &ids(&people))
        .unwrap();
    let taxi = calc
        .calculate_split(Money::from_cents(3000), &SplitStrategy::Equal, &ids(&people))
        .unwrap();

    let expenses = vec![expense("dinner", "ana", dinner), expense("taxi", "ben", taxi)];
    (people, expenses)
}

#[test]
fn equal_split_of_ten_between_three() {
    init_tracing();

    let people = roster(&["ana", "ben", "cai"]);
    let shares = SplitCalculator::default()
        .calculate_split(Money::from_cents(1000), &SplitStrategy::Equal, &ids(&people))
        .unwrap();

    assert_eq!(share_cents(&shares), vec![334, 333, 333]);
    let rendered: Vec<String> = shares.iter().map(|s| s.amount.to_string()).collect();
    assert_eq!(rendered, vec!["3.34", "3.33", "3.33"]);
}

#[test]
fn percentage_split_of_one_hundred() {
    init_tracing();

    let people = roster(&["ana", "ben", "cai"]);
    let strategy = SplitStrategy::percentages([("ana", 33.3), ("ben", 33.3), ("cai", 33.4)]);
    let amount: Money = "100.00".parse().unwrap();

    assert!(SplitValidator::default()
        .validate_split(amount, &strategy, &ids(&people))
        .is_valid);

    let shares = SplitCalculator::default()
        .calculate_split(amount, &strategy, &ids(&people))
        .unwrap();
    assert_eq!(share_cents(&shares), vec![3330, 3330, 3340]);
    assert_eq!(
        shares[2].percentage.map(|p| p.to_string()),
        Some("33.40%".to_string())
    );
}

#[test]
fn validator_and_calculator_agree_on_rejection() {
    init_tracing();

    let people = roster(&["ana", "ben"]);
    let strategy = SplitStrategy::percentages([("ana", 70.0), ("ben", 20.0)]);
    let amount = Money::from_cents(5000);

    let validation = SplitValidator::default().validate_split(amount, &strategy, &ids(&people));
    assert!(!validation.is_valid);
    assert_eq!(validation.errors_for("percentages").count(), 1);

    let err = SplitCalculator::default()
        .calculate_split(amount, &strategy, &ids(&people))
        .unwrap_err();
    match err {
        CoreError::InvalidSplit {
            participant_id,
            discrepancy,
            ..
        } => {
            assert_eq!(participant_id, None);
            assert_eq!(discrepancy, -1000);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn weekend_trip_balances_and_suggestions() {
    init_tracing();

    let (people, expenses) = weekend_trip();
    let balances = BalanceEngine::default().calculate_balances(&expenses, &[], &people);
    assert_eq!(
        balances,
        vec![bal("ben", "ana", 2000), bal("cai", "ana", 3000), bal("cai", "ben", 1000)]
    );

    let simplified = DebtSimplifier::default().simplify_balances(&balances);
    assert_eq!(simplified, vec![bal("ben", "ana", 1000), bal("cai", "ana", 4000)]);

    let advisor = SettlementAdvisor::default();
    let suggestions = advisor.suggest_settlements(&simplified, &people);
    let instructions: Vec<&str> = suggestions.iter().map(|s| s.instruction.as_str()).collect();
    assert_eq!(
        instructions,
        vec!["Ben pays Ana 10.00 EUR", "Cai pays Ana 40.00 EUR"]
    );
    assert_eq!(
        advisor.summarize(&suggestions),
        "Ben → Ana 10.00 EUR\nCai → Ana 40.00 EUR"
    );
}

#[test]
fn ledger_matches_simplified_positions() {
    init_tracing();

    let (people, expenses) = weekend_trip();
    let entries = ParticipantLedger.participant_spending(&expenses, &[], &people);

    let nets: Vec<(String, i64)> = entries
        .iter()
        .map(|e| (e.participant_id.clone(), e.net_balance.cents()))
        .collect();
    assert_eq!(
        nets,
        vec![
            ("ana".to_string(), 5000),
            ("ben".to_string(), -1000),
            ("cai".to_string(), -4000),
        ]
    );
    assert_eq!(entries[0].total_paid.cents(), 9000);
    assert_eq!(entries[0].total_owed.cents(), 4000);
}

#[test]
fn paying_the_suggestions_settles_everyone() {
    init_tracing();

    let (people, expenses) = weekend_trip();
    let settlements = vec![settlement("ben", "ana", 1000), settlement("cai", "ana", 4000)];

    // Pairwise history leaves a cycle that nets out for everyone.
    let balances = BalanceEngine::default().calculate_balances(&expenses, &settlements, &people);
    assert_eq!(
        balances,
        vec![bal("ben", "ana", 1000), bal("ana", "cai", 1000), bal("cai", "ben", 1000)]
    );
    assert!(net_positions(&balances).iter().all(|(_, net)| net.is_zero()));

    let simplified = DebtSimplifier::default().simplify_balances(&balances);
    assert!(simplified.is_empty());
    let advisor = SettlementAdvisor::default();
    assert_eq!(
        advisor.summarize(&advisor.suggest_settlements(&simplified, &people)),
        "All settled up!"
    );

    let entries = ParticipantLedger.participant_spending(&expenses, &settlements, &people);
    assert!(entries.iter().all(|e| e.net_balance.is_zero()));
}

#[test]
fn chain_of_debts_collapses() {
    init_tracing();

    let people = roster(&["a", "b", "c"]);
    let expenses = vec![
        expense("e1", "b", vec![SplitShare::new("a", Money::from_cents(1000))]),
        expense("e2", "c", vec![SplitShare::new("b", Money::from_cents(1000))]),
    ];

    let balances = BalanceEngine::default().calculate_balances(&expenses, &[], &people);
    assert_eq!(balances, vec![bal("a", "b", 1000), bal("b", "c", 1000)]);

    let simplified = DebtSimplifier::default().simplify_balances(&balances);
    assert_eq!(simplified, vec![bal("a", "c", 1000)]);
}

#[test]
fn simplification_is_idempotent() {
    init_tracing();

    let (people, expenses) = weekend_trip();
    let simplifier = DebtSimplifier::default();
    let balances = BalanceEngine::default().calculate_balances(&expenses, &[], &people);

    let once = simplifier.simplify_balances(&balances);
    let twice = simplifier.simplify_balances(&once);
    assert_eq!(once, twice);
}

#[test]
fn ledger_lists_the_whole_roster() {
    init_tracing();

    let people = roster(&["ana", "ben", "cai", "dee"]);
    let expenses = vec![expense(
        "coffee",
        "ana",
        vec![
            SplitShare::new("ana", Money::from_cents(250)),
            SplitShare::new("ben", Money::from_cents(250)),
        ],
    )];

    let entries = ParticipantLedger.participant_spending(&expenses, &[], &people);
    let listed: Vec<&str> = entries.iter().map(|e| e.participant_id.as_str()).collect();
    assert_eq!(listed, vec!["ana", "ben", "cai", "dee"]);
    assert!(entries[3].total_paid.is_zero() && entries[3].total_owed.is_zero());
}

#[test]
fn engine_honours_toml_config() {
    init_tracing();

    let config = EngineConfig::from_toml_str(
        r#"
        epsilon = 0
        default_currency = "BRL"
        unknown_participant_label = "Ex-member"
        "#,
    )
    .unwrap();

    let people = roster(&["ana"]);
    let expenses = vec![expense(
        "snack",
        "ana",
        vec![SplitShare::new("gone", Money::from_cents(1))],
    )];

    let balances = BalanceEngine::new(config.clone()).calculate_balances(&expenses, &[], &people);
    assert_eq!(balances, vec![bal("gone", "ana", 1)]);

    let suggestions = SettlementAdvisor::new(config).suggest_settlements(&balances, &people);
    assert_eq!(suggestions[0].instruction, "Ex-member pays Ana 0.01 EUR");
}
