//! Core logic for Tripsplit.
//!
//! This crate contains the pure calculations behind a shared-expense trip.
//! It has no I/O: callers hand it participants and expenses and get back
//! allocations, balances and settlement plans.
//!
//! # Modules
//!
//! - `ledger` - Split allocation, balance aggregation, settlement planning
//!   and expense validation
//! - `trip` - A trip's roster and expenses, with the operations that keep
//!   them consistent

pub mod ledger;
pub mod trip;
