//! # tripsplit-core: Calculation Core for Shared Trip Expenses
//!
//! Pure, deterministic money logic for a group expense tracker: splitting
//! an expense, netting who owes whom, and turning the result into a short
//! list of payments. The crate has zero I/O; callers hand in a snapshot of
//! trip history and get derived views back.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       tripsplit-core Pipeline                           │
//! │                                                                         │
//! │  Expense creation (interactive)                                         │
//! │  ┌──────────────────┐      ┌──────────────────┐                         │
//! │  │  SplitValidator  │ ───► │ SplitCalculator  │ ──► Vec<SplitShare>     │
//! │  │  all errors      │      │  exact cents     │                         │
//! │  └──────────────────┘      └──────────────────┘                         │
//! │                                                                         │
//! │  Trip view (read-only, never fails)                                     │
//! │  expenses + settlements + participants                                  │
//! │        │                                   │                            │
//! │        ▼                                   ▼                            │
//! │  ┌──────────────────┐              ┌──────────────────┐                 │
//! │  │  BalanceEngine   │              │ ParticipantLedger│ ──► per person  │
//! │  │  pairwise debts  │              │  paid/owed/net   │                 │
//! │  └────────┬─────────┘              └──────────────────┘                 │
//! │           ▼                                                             │
//! │  ┌──────────────────┐      ┌──────────────────┐                         │
//! │  │  DebtSimplifier  │ ───► │ SettlementAdvisor│ ──► "Ana pays Ben ..."  │
//! │  │  fewer payments  │      │  names, text     │                         │
//! │  └──────────────────┘      └──────────────────┘                         │
//! │                                                                         │
//! │   NO I/O • NO GLOBAL STATE • INTEGER CENTS • SAME INPUT = SAME OUTPUT  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`types`] - Domain records (Expense, Settlement, Balance, etc.)
//! - [`error`] - Domain error types
//! - [`config`] - Engine tunables (tolerances, epsilon, labels)
//! - [`validation`] - Split rules and the interactive validator
//! - [`split`] - Exact share computation
//! - [`balance`] - Pairwise netting
//! - [`simplify`] - Greedy debt simplification
//! - [`advisor`] - Human-readable settlement suggestions
//! - [`ledger`] - Per-participant totals
//!
//! ## Example Usage
//!
//! ```rust
//! use tripsplit_core::{Money, SplitCalculator, SplitStrategy};
//!
//! let participants = vec!["ana".to_string(), "ben".to_string(), "cai".to_string()];
//! let shares = SplitCalculator::default()
//!     .calculate_split(Money::from_cents(1000), &SplitStrategy::Equal, &participants)
//!     .unwrap();
//!
//! // 10.00 between three: the first participant absorbs the extra cent
//! let cents: Vec<i64> = shares.iter().map(|s| s.amount.cents()).collect();
//! assert_eq!(cents, vec![334, 333, 333]);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod advisor;
pub mod balance;
pub mod config;
pub mod error;
pub mod ledger;
pub mod money;
pub mod simplify;
pub mod split;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use tripsplit_core::Money` instead of
// `use tripsplit_core::money::Money`

pub use advisor::SettlementAdvisor;
pub use balance::BalanceEngine;
pub use config::EngineConfig;
pub use error::{CoreError, CoreResult, ValidationError};
pub use ledger::ParticipantLedger;
pub use money::Money;
pub use simplify::DebtSimplifier;
pub use split::SplitCalculator;
pub use types::*;
pub use validation::{SplitValidation, SplitValidator};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// How far percentages may stray from 100%, in basis points (0.5 pp).
pub const DEFAULT_PERCENTAGE_TOLERANCE_BPS: i64 = 50;

/// Net amounts at or below this many cents count as settled.
///
/// ## Business Reason
/// Remainder cents from earlier splits would otherwise surface as
/// one-cent debts nobody will ever pay.
pub const DEFAULT_EPSILON_CENTS: i64 = 1;

/// Allowed gap between custom amounts and the expense total, in cents.
pub const DEFAULT_CUSTOM_SUM_TOLERANCE_CENTS: i64 = 1;

/// Currency used when no input carries one.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Display name for ids with no roster entry.
pub const DEFAULT_UNKNOWN_PARTICIPANT_LABEL: &str = "Unknown participant";
