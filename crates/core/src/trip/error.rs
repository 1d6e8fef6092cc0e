//! Trip error types.

use thiserror::Error;
use tripsplit_shared::AppError;
use tripsplit_shared::types::{ExpenseId, ParticipantId};

use crate::ledger::ValidationError;

/// Errors from trip operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TripError {
    /// Input failed validation; nothing was changed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Participant not found.
    #[error("Participant not found: {0}")]
    ParticipantNotFound(ParticipantId),

    /// A participant with this ID is already on the trip.
    #[error("Participant {0} already exists")]
    DuplicateParticipant(ParticipantId),

    /// Participant is still referenced by an expense.
    #[error("Participant {0} is referenced by an expense and cannot be removed")]
    ParticipantInUse(ParticipantId),

    /// Expense not found.
    #[error("Expense not found: {0}")]
    ExpenseNotFound(ExpenseId),

    /// An expense with this ID is already on the trip.
    #[error("Expense {0} already exists")]
    DuplicateExpense(ExpenseId),
}

impl TripError {
    /// Returns the error code for machine-readable output.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(err) => err.error_code(),
            Self::ParticipantNotFound(_) => "PARTICIPANT_NOT_FOUND",
            Self::DuplicateParticipant(_) => "DUPLICATE_PARTICIPANT",
            Self::ParticipantInUse(_) => "PARTICIPANT_IN_USE",
            Self::ExpenseNotFound(_) => "EXPENSE_NOT_FOUND",
            Self::DuplicateExpense(_) => "DUPLICATE_EXPENSE",
        }
    }
}

impl From<TripError> for AppError {
    fn from(err: TripError) -> Self {
        match err {
            TripError::Validation(_) => Self::Validation(err.to_string()),
            TripError::ParticipantNotFound(_) | TripError::ExpenseNotFound(_) => {
                Self::NotFound(err.to_string())
            }
            TripError::DuplicateParticipant(_)
            | TripError::ParticipantInUse(_)
            | TripError::DuplicateExpense(_) => Self::BusinessRule(err.to_string()),
        }
    }
}
