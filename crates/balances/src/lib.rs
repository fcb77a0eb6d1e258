//! Group balances: pairwise debt netting over expenses and settlements.
//!
//! Pure domain logic only: no IO, no HTTP, no persistence concerns. Callers
//! gather records (and check membership) first, then run the pipeline:
//!
//! 1. [`LedgerBuilder`] folds expense splits into a directed pairwise ledger.
//! 2. [`SettlementApplier`] folds repayments into the same ledger.
//! 3. [`NettingEngine`] keeps one positive direction per pair.
//! 4. [`BalanceProjector`] reshapes the result into a [`BalanceReport`].

pub mod builder;
pub mod engine;
pub mod ledger;
pub mod model;
pub mod netting;
pub mod projection;
pub mod settlement;
pub mod validation;

pub use builder::LedgerBuilder;
pub use engine::{BalanceEngine, compute_balances};
pub use ledger::{LedgerState, MemberIndex, NetTotals, PairwiseLedger};
pub use model::{Expense, Member, Settlement, Split};
pub use netting::NettingEngine;
pub use projection::{BalanceProjector, BalanceReport, MemberBalance, OwedBy, Owes};
pub use settlement::{OverpaymentPolicy, SettlementApplier};
pub use validation::validate_records;
