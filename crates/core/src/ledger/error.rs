//! Validation errors raised when an expense is entered or edited.

use rust_decimal::Decimal;
use thiserror::Error;
use tripsplit_shared::types::ParticipantId;

/// Errors that reject an expense (or a name) before it reaches the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    // ========== Input Errors ==========
    /// A numeric field did not contain a number.
    #[error("{field} must be a number, got {value:?}")]
    NotANumber {
        /// Name of the offending field.
        field: String,
        /// Raw text that failed to parse.
        value: String,
    },

    /// Expense amount is zero or negative.
    #[error("Expense amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    /// A number is larger than the ledger accepts.
    #[error("{field} must not exceed {limit}, got {value}")]
    TooLarge {
        /// Name of the offending field.
        field: String,
        /// Parsed value.
        value: Decimal,
        /// Largest accepted value.
        limit: Decimal,
    },

    /// A split value is negative.
    #[error("Split value for participant {participant_id} cannot be negative")]
    NegativeSplitValue {
        /// Participant of the offending row.
        participant_id: ParticipantId,
    },

    /// Expense description is blank.
    #[error("Expense description is required")]
    BlankDescription,

    /// Trip name is blank.
    #[error("Trip name is required")]
    BlankTripName,

    /// Participant name is blank.
    #[error("Participant name is required")]
    BlankParticipantName,

    /// Currency code is not three letters.
    #[error("Unknown currency: {0}")]
    InvalidCurrency(String),

    // ========== Reference Errors ==========
    /// Payer is not on the trip roster.
    #[error("Payer {0} is not a participant of this trip")]
    UnknownPayer(ParticipantId),

    /// A split row names someone who is not on the trip roster.
    #[error("Split participant {0} is not a participant of this trip")]
    UnknownParticipant(ParticipantId),

    /// A participant has more than one split row.
    #[error("Participant {0} appears in more than one split row")]
    DuplicateSplit(ParticipantId),

    // ========== Total Errors ==========
    /// Percentages do not add up to 100.
    #[error("Percentages must add up to 100, got {total}")]
    PercentTotal {
        /// Sum of the entered percentages.
        total: Decimal,
    },

    /// Exact amounts do not add up to the expense amount.
    #[error("Exact amounts must add up to {amount}, got {total}")]
    ExactTotal {
        /// Sum of the entered amounts.
        total: Decimal,
        /// Expense amount.
        amount: Decimal,
    },

    /// Share weights do not add up to a positive number.
    #[error("Shares must add up to more than zero, got {total}")]
    SharesTotal {
        /// Sum of the entered weights.
        total: Decimal,
    },
}

impl ValidationError {
    /// Returns the error code for machine-readable output.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotANumber { .. } => "NOT_A_NUMBER",
            Self::NonPositiveAmount(_) => "NON_POSITIVE_AMOUNT",
            Self::TooLarge { .. } => "VALUE_TOO_LARGE",
            Self::NegativeSplitValue { .. } => "NEGATIVE_SPLIT_VALUE",
            Self::BlankDescription => "BLANK_DESCRIPTION",
            Self::BlankTripName => "BLANK_TRIP_NAME",
            Self::BlankParticipantName => "BLANK_PARTICIPANT_NAME",
            Self::InvalidCurrency(_) => "INVALID_CURRENCY",
            Self::UnknownPayer(_) => "UNKNOWN_PAYER",
            Self::UnknownParticipant(_) => "UNKNOWN_PARTICIPANT",
            Self::DuplicateSplit(_) => "DUPLICATE_SPLIT",
            Self::PercentTotal { .. } => "PERCENT_TOTAL_MISMATCH",
            Self::ExactTotal { .. } => "EXACT_TOTAL_MISMATCH",
            Self::SharesTotal { .. } => "SHARES_TOTAL_NOT_POSITIVE",
        }
    }
}
