//! The ledger engine for shared expenses.
//!
//! This module implements the pure computations behind a trip:
//! - Split allocation per expense (equal, shares, percent, exact)
//! - Net balance aggregation across all expenses
//! - Greedy settlement planning
//! - Entry validation for new and edited expenses
//! - Running split totals for expense drafts

pub mod allocation;
pub mod balance;
pub mod error;
pub mod settlement;
pub mod summary;
pub mod types;
pub mod validation;

#[cfg(test)]
mod balance_props;
#[cfg(test)]
mod settlement_props;

pub use allocation::allocate;
pub use balance::compute_balances;
pub use error::ValidationError;
pub use settlement::{SETTLEMENT_EPSILON, plan, plan_for};
pub use summary::{ENTRY_TOLERANCE, SplitLine, SplitSummary};
pub use types::{
    Allocation, Balances, Expense, Participant, Settlement, SettlementPlan, Split, SplitType,
};
pub use validation::{
    ExpenseInput, MAX_ENTRY_VALUE, SplitInput, ValidatedExpense, parse_decimal, validate_expense,
};
