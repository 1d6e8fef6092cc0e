//! Trip data types.

use rust_decimal::Decimal;
use serde::Serialize;
use tripsplit_shared::types::{CurrencyCode, TripId};

use crate::ledger::{Expense, Participant};

/// A trip: a named roster of participants and the expenses they share.
///
/// Participants and expenses are only changed through the methods in
/// [`service`](super::service), which keep every expense valid against
/// the current roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Trip {
    /// Trip ID.
    pub id: TripId,
    /// Trip name.
    pub name: String,
    /// Currency all amounts are in.
    pub currency: CurrencyCode,
    pub(crate) participants: Vec<Participant>,
    pub(crate) expenses: Vec<Expense>,
}

/// Headline numbers for a trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TripOverview {
    /// Sum of all expense amounts.
    pub total_expenses: Decimal,
    /// Number of participants.
    pub participant_count: usize,
    /// Number of expenses.
    pub expense_count: usize,
    /// Total still owed to creditors.
    pub outstanding_amount: Decimal,
}
