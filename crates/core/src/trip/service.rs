//! Trip operations: roster and expense management plus derived views.

use rust_decimal::Decimal;
use tracing::debug;
use tripsplit_shared::types::{CurrencyCode, ExpenseId, ParticipantId, TripId};

use super::error::TripError;
use super::types::{Trip, TripOverview};
use crate::ledger::{
    Balances, Expense, ExpenseInput, Participant, SettlementPlan, ValidationError, compute_balances,
    plan_for, validate_expense,
};

impl Trip {
    /// Creates an empty trip.
    ///
    /// A blank `currency` falls back to [`CurrencyCode::DEFAULT`].
    ///
    /// # Errors
    ///
    /// Returns a validation error if the name is blank or the currency is
    /// not a three-letter code.
    pub fn new(name: &str, currency: &str) -> Result<Self, TripError> {
        Self::with_id(TripId::new(), name, currency)
    }

    /// Creates an empty trip with a known ID.
    ///
    /// # Errors
    ///
    /// Same as [`Trip::new`].
    pub fn with_id(id: TripId, name: &str, currency: &str) -> Result<Self, TripError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::BlankTripName.into());
        }

        let currency = if currency.trim().is_empty() {
            CurrencyCode::default()
        } else {
            currency
                .parse()
                .map_err(|_| ValidationError::InvalidCurrency(currency.to_string()))?
        };

        Ok(Self {
            id,
            name: name.to_string(),
            currency,
            participants: Vec::new(),
            expenses: Vec::new(),
        })
    }

    /// Participants in the order they joined.
    #[must_use]
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// Expenses in the order they were added.
    #[must_use]
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    /// Looks up a participant.
    #[must_use]
    pub fn participant(&self, id: &ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| &p.id == id)
    }

    /// Looks up an expense.
    #[must_use]
    pub fn expense(&self, id: &ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|e| &e.id == id)
    }

    // ========== Participants ==========

    /// Adds a participant by name and returns their new ID.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the name is blank.
    pub fn add_participant(&mut self, name: &str) -> Result<ParticipantId, TripError> {
        let participant = Participant::new(name);
        let id = participant.id.clone();
        self.insert_participant(participant)?;
        Ok(id)
    }

    /// Adds a participant whose ID was assigned elsewhere.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank or the ID is already taken.
    pub fn insert_participant(&mut self, participant: Participant) -> Result<(), TripError> {
        let name = participant.name.trim();
        if name.is_empty() {
            return Err(ValidationError::BlankParticipantName.into());
        }
        if self.participant(&participant.id).is_some() {
            return Err(TripError::DuplicateParticipant(participant.id));
        }

        debug!(trip_id = %self.id, participant_id = %participant.id, "Participant added");
        self.participants.push(Participant {
            name: name.to_string(),
            ..participant
        });
        Ok(())
    }

    /// Removes a participant who no expense refers to.
    ///
    /// # Errors
    ///
    /// Returns `ParticipantNotFound` for an unknown ID and
    /// `ParticipantInUse` if an expense names them as payer or split row.
    pub fn remove_participant(&mut self, id: &ParticipantId) -> Result<Participant, TripError> {
        let position = self
            .participants
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| TripError::ParticipantNotFound(id.clone()))?;

        let in_use = self.expenses.iter().any(|e| {
            &e.payer_id == id || e.splits.iter().any(|s| &s.participant_id == id)
        });
        if in_use {
            return Err(TripError::ParticipantInUse(id.clone()));
        }

        debug!(trip_id = %self.id, participant_id = %id, "Participant removed");
        Ok(self.participants.remove(position))
    }

    // ========== Expenses ==========

    /// Validates and records a new expense, returning its ID.
    ///
    /// # Errors
    ///
    /// Returns a validation error; the trip is left unchanged.
    pub fn add_expense(&mut self, input: &ExpenseInput) -> Result<ExpenseId, TripError> {
        let id = ExpenseId::new();
        self.insert_expense(id.clone(), input)?;
        Ok(id)
    }

    /// Validates and records an expense whose ID was assigned elsewhere.
    ///
    /// # Errors
    ///
    /// Returns a validation error or `DuplicateExpense`; the trip is left
    /// unchanged.
    pub fn insert_expense(&mut self, id: ExpenseId, input: &ExpenseInput) -> Result<(), TripError> {
        if self.expense(&id).is_some() {
            return Err(TripError::DuplicateExpense(id));
        }
        let expense = validate_expense(input, &self.participants)?.into_expense(id);

        debug!(
            trip_id = %self.id,
            expense_id = %expense.id,
            amount = %expense.amount,
            split_type = %expense.split_type,
            "Expense added"
        );
        self.expenses.push(expense);
        Ok(())
    }

    /// Replaces an expense with re-validated input, keeping its ID and position.
    ///
    /// # Errors
    ///
    /// Returns `ExpenseNotFound` or a validation error; the trip is left
    /// unchanged.
    pub fn update_expense(&mut self, id: &ExpenseId, input: &ExpenseInput) -> Result<(), TripError> {
        let position = self
            .expenses
            .iter()
            .position(|e| &e.id == id)
            .ok_or_else(|| TripError::ExpenseNotFound(id.clone()))?;
        let expense = validate_expense(input, &self.participants)?.into_expense(id.clone());

        debug!(trip_id = %self.id, expense_id = %id, "Expense updated");
        self.expenses[position] = expense;
        Ok(())
    }

    /// Deletes an expense and returns it.
    ///
    /// # Errors
    ///
    /// Returns `ExpenseNotFound` for an unknown ID.
    pub fn delete_expense(&mut self, id: &ExpenseId) -> Result<Expense, TripError> {
        let position = self
            .expenses
            .iter()
            .position(|e| &e.id == id)
            .ok_or_else(|| TripError::ExpenseNotFound(id.clone()))?;

        debug!(trip_id = %self.id, expense_id = %id, "Expense deleted");
        Ok(self.expenses.remove(position))
    }

    // ========== Derived views ==========

    /// Current net balance of every participant.
    #[must_use]
    pub fn balances(&self) -> Balances {
        compute_balances(&self.participants, &self.expenses)
    }

    /// Transfers that settle the current balances.
    #[must_use]
    pub fn settlement_plan(&self) -> SettlementPlan {
        plan_for(&self.balances())
    }

    /// Headline numbers for the trip.
    #[must_use]
    pub fn overview(&self) -> TripOverview {
        TripOverview {
            total_expenses: self.expenses.iter().map(|e| e.amount).sum::<Decimal>(),
            participant_count: self.participants.len(),
            expense_count: self.expenses.len(),
            outstanding_amount: self.balances().outstanding(),
        }
    }

    /// Up to `limit` expenses, newest date first; undated expenses come last
    /// and ties keep the order they were added in.
    #[must_use]
    pub fn recent_expenses(&self, limit: usize) -> Vec<&Expense> {
        let mut expenses: Vec<&Expense> = self.expenses.iter().collect();
        expenses.sort_by(|a, b| b.date.cmp(&a.date));
        expenses.truncate(limit);
        expenses
    }
}
