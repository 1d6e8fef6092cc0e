//! Business rule validation for entering expenses.
//!
//! Input arrives as text (as typed into a form or stored by a remote data
//! store). Every numeric field is parsed explicitly; anything that is not a
//! number is rejected rather than read as zero.

use std::collections::HashSet;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use tripsplit_shared::types::{ExpenseId, ParticipantId};

use super::error::ValidationError;
use super::summary::SplitSummary;
use super::types::{Expense, Participant, Split, SplitType};

/// Largest amount or split value an expense may carry (one trillion).
///
/// Keeps allocation products and trip-wide sums inside `Decimal`'s range.
pub const MAX_ENTRY_VALUE: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

/// Raw input for one split row.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SplitInput {
    /// Participant the row applies to.
    pub participant_id: ParticipantId,
    /// Weight, percentage or amount, as entered.
    pub value: String,
}

impl SplitInput {
    /// Creates a split row input.
    #[must_use]
    pub fn new(participant_id: impl Into<ParticipantId>, value: impl Into<String>) -> Self {
        Self {
            participant_id: participant_id.into(),
            value: value.into(),
        }
    }
}

/// Raw input for creating or editing an expense.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExpenseInput {
    /// What the money was spent on.
    pub description: String,
    /// When the expense happened.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Total amount, as entered.
    pub amount: String,
    /// Participant who paid.
    pub payer_id: ParticipantId,
    /// How the amount is divided.
    pub split_type: SplitType,
    /// Split rows; ignored for `equal`.
    #[serde(default)]
    pub splits: Vec<SplitInput>,
}

/// An expense that passed validation and only lacks an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedExpense {
    /// Trimmed description.
    pub description: String,
    /// Expense date.
    pub date: Option<NaiveDate>,
    /// Parsed positive amount.
    pub amount: Decimal,
    /// Payer, known to be on the roster.
    pub payer_id: ParticipantId,
    /// Split type.
    pub split_type: SplitType,
    /// Parsed split rows; one unit row per participant for `equal`.
    pub splits: Vec<Split>,
}

impl ValidatedExpense {
    /// Attaches an identifier, producing a ledger expense.
    #[must_use]
    pub fn into_expense(self, id: ExpenseId) -> Expense {
        Expense {
            id,
            description: self.description,
            date: self.date,
            amount: self.amount,
            payer_id: self.payer_id,
            split_type: self.split_type,
            splits: self.splits,
        }
    }
}

/// Validates an expense against the current trip roster.
///
/// Rules, checked in order:
/// 1. Description is not blank
/// 2. Amount is a number, positive and at most [`MAX_ENTRY_VALUE`]
/// 3. Payer is on the roster
/// 4. For non-equal splits: each value is a non-negative number no larger
///    than [`MAX_ENTRY_VALUE`], each row names a roster participant, no
///    participant appears twice
/// 5. Totals: percentages add up to 100 and exact amounts to the expense
///    amount (within 0.01); share weights add up to more than zero
///
/// For `equal`, submitted rows are ignored and one unit-weight row per
/// participant is recorded instead.
///
/// # Errors
///
/// Returns the first rule that fails as a `ValidationError`.
pub fn validate_expense(
    input: &ExpenseInput,
    participants: &[Participant],
) -> Result<ValidatedExpense, ValidationError> {
    let description = input.description.trim();
    if description.is_empty() {
        return Err(ValidationError::BlankDescription);
    }

    let amount = parse_decimal("amount", &input.amount)?;
    if amount <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount(amount));
    }
    check_limit("amount", amount)?;

    let roster: HashSet<&ParticipantId> = participants.iter().map(|p| &p.id).collect();
    if !roster.contains(&input.payer_id) {
        return Err(ValidationError::UnknownPayer(input.payer_id.clone()));
    }

    let splits = if input.split_type.requires_splits() {
        parse_splits(&input.splits, &roster)?
    } else {
        participants
            .iter()
            .map(|p| Split::new(p.id.clone(), Decimal::ONE))
            .collect()
    };

    SplitSummary::for_draft(input.split_type, amount, &splits, participants).check()?;

    Ok(ValidatedExpense {
        description: description.to_string(),
        date: input.date,
        amount,
        payer_id: input.payer_id.clone(),
        split_type: input.split_type,
        splits,
    })
}

fn parse_splits(
    inputs: &[SplitInput],
    roster: &HashSet<&ParticipantId>,
) -> Result<Vec<Split>, ValidationError> {
    let mut seen = HashSet::with_capacity(inputs.len());
    let mut splits = Vec::with_capacity(inputs.len());

    for (i, row) in inputs.iter().enumerate() {
        let field = format!("splits[{i}].value");
        let value = parse_decimal(&field, &row.value)?;
        if value < Decimal::ZERO {
            return Err(ValidationError::NegativeSplitValue {
                participant_id: row.participant_id.clone(),
            });
        }
        check_limit(&field, value)?;
        if !roster.contains(&row.participant_id) {
            return Err(ValidationError::UnknownParticipant(row.participant_id.clone()));
        }
        if !seen.insert(&row.participant_id) {
            return Err(ValidationError::DuplicateSplit(row.participant_id.clone()));
        }
        splits.push(Split::new(row.participant_id.clone(), value));
    }

    Ok(splits)
}

fn check_limit(field: &str, value: Decimal) -> Result<(), ValidationError> {
    if value > MAX_ENTRY_VALUE {
        return Err(ValidationError::TooLarge {
            field: field.to_string(),
            value,
            limit: MAX_ENTRY_VALUE,
        });
    }
    Ok(())
}

/// Parses a decimal number, rejecting anything that is not one.
///
/// # Errors
///
/// Returns `ValidationError::NotANumber` naming `field`.
pub fn parse_decimal(field: &str, raw: &str) -> Result<Decimal, ValidationError> {
    Decimal::from_str(raw.trim()).map_err(|_| ValidationError::NotANumber {
        field: field.to_string(),
        value: raw.to_string(),
    })
}
