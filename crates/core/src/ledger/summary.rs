//! Running totals for a split while it is being entered.

use rust_decimal::Decimal;
use serde::Serialize;
use tripsplit_shared::types::{ParticipantId, format_amount};

use super::allocation::allocate_amounts;
use super::error::ValidationError;
use super::types::{Participant, Split, SplitType};
use super::validation::MAX_ENTRY_VALUE;

/// Absolute tolerance when comparing entered split totals to their target.
pub const ENTRY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// One participant's line in a split preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SplitLine {
    /// Participant the line is for.
    pub participant_id: ParticipantId,
    /// Participant name.
    pub name: String,
    /// Entered weight, percentage or amount; `1` for equal splits.
    pub value: Decimal,
    /// What the participant would owe.
    pub amount: Decimal,
}

/// Preview of a split draft: entered total, target and per-person amounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SplitSummary {
    /// Split type of the draft.
    pub split_type: SplitType,
    /// Expense amount of the draft.
    pub amount: Decimal,
    /// Sum of the entered values.
    pub entered: Decimal,
    /// What the values must add up to: 100 for percent, the amount for exact.
    pub target: Option<Decimal>,
    /// `target - entered`, when there is a target.
    pub remaining: Option<Decimal>,
    /// Roster size the draft is split over.
    pub headcount: usize,
    /// Amount per head for an equal split over a non-empty roster.
    pub per_head: Option<Decimal>,
    /// Per-participant amounts in roster order. Equal splits list the whole
    /// roster; other types list participants with a split row.
    pub lines: Vec<SplitLine>,
}

impl SplitSummary {
    /// Summarizes a draft of `amount` with the split rows entered so far.
    ///
    /// Rows for participants outside the roster count toward the total but
    /// get no line. Lines are left empty when the amount or a value is
    /// above [`MAX_ENTRY_VALUE`].
    #[must_use]
    pub fn for_draft(
        split_type: SplitType,
        amount: Decimal,
        splits: &[Split],
        participants: &[Participant],
    ) -> Self {
        let in_range = amount.abs() <= MAX_ENTRY_VALUE
            && splits.iter().all(|s| s.value.abs() <= MAX_ENTRY_VALUE);

        let entered = if split_type == SplitType::Equal {
            Decimal::ZERO
        } else {
            splits
                .iter()
                .try_fold(Decimal::ZERO, |total, s| total.checked_add(s.value))
                .unwrap_or(Decimal::MAX)
        };
        let target = match split_type {
            SplitType::Percent => Some(Decimal::ONE_HUNDRED),
            SplitType::Exact => Some(amount),
            SplitType::Equal | SplitType::Shares => None,
        };
        let per_head = (split_type == SplitType::Equal && !participants.is_empty())
            .then(|| amount / Decimal::from(participants.len()));

        let lines = if in_range {
            preview_lines(split_type, amount, splits, participants)
        } else {
            Vec::new()
        };

        Self {
            split_type,
            amount,
            entered,
            target,
            remaining: target.and_then(|t| t.checked_sub(entered)),
            headcount: participants.len(),
            per_head,
            lines,
        }
    }

    /// Checks the totals rule for the split type.
    ///
    /// # Errors
    ///
    /// Returns the matching total error when percentages miss 100, exact
    /// amounts miss the expense amount (both within [`ENTRY_TOLERANCE`]),
    /// or share weights do not add up to a positive number.
    pub fn check(&self) -> Result<(), ValidationError> {
        let off_target = match (self.target, self.remaining) {
            (_, Some(remaining)) => remaining.abs() > ENTRY_TOLERANCE,
            (Some(_), None) => true,
            (None, None) => false,
        };

        match self.split_type {
            SplitType::Equal => Ok(()),
            SplitType::Shares if self.entered <= Decimal::ZERO => Err(ValidationError::SharesTotal {
                total: self.entered,
            }),
            SplitType::Shares => Ok(()),
            SplitType::Percent if off_target => Err(ValidationError::PercentTotal {
                total: self.entered,
            }),
            SplitType::Exact if off_target => Err(ValidationError::ExactTotal {
                total: self.entered,
                amount: self.target.unwrap_or_default(),
            }),
            SplitType::Percent | SplitType::Exact => Ok(()),
        }
    }

    /// Returns true if the draft would pass the totals rule.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.check().is_ok()
    }

    /// Absolute gap between entered exact amounts and the expense amount,
    /// when it exceeds [`ENTRY_TOLERANCE`].
    #[must_use]
    pub fn difference(&self) -> Option<Decimal> {
        if self.split_type != SplitType::Exact {
            return None;
        }
        self.remaining
            .map(|remaining| remaining.abs())
            .filter(|gap| *gap > ENTRY_TOLERANCE)
    }
}

fn preview_lines(
    split_type: SplitType,
    amount: Decimal,
    splits: &[Split],
    participants: &[Participant],
) -> Vec<SplitLine> {
    let amounts = allocate_amounts(amount, split_type, splits, participants);

    participants
        .iter()
        .zip(amounts)
        .filter_map(|(participant, owed)| {
            let value = if split_type == SplitType::Equal {
                Decimal::ONE
            } else {
                splits
                    .iter()
                    .rev()
                    .find(|s| s.participant_id == participant.id)?
                    .value
            };
            Some(SplitLine {
                participant_id: participant.id.clone(),
                name: participant.name.clone(),
                value,
                amount: owed,
            })
        })
        .collect()
}

impl std::fmt::Display for SplitSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.amount <= Decimal::ZERO {
            return f.write_str("Enter an amount to see split details");
        }

        match self.split_type {
            SplitType::Equal => {
                return match self.per_head {
                    Some(per_head) => write!(
                        f,
                        "Equal split: {} people → {} each",
                        self.headcount,
                        format_amount(per_head)
                    ),
                    None => f.write_str("Add participants to see split details"),
                };
            }
            SplitType::Shares if self.entered <= Decimal::ZERO => {
                return f.write_str("Enter positive share weights");
            }
            SplitType::Shares => write!(f, "Shares total: {}", self.entered.normalize())?,
            SplitType::Percent => {
                write!(f, "Percent total: {}%", format_amount(self.entered))?;
                if let Some(remaining) = self.remaining {
                    write!(f, " ({}% remaining)", format_amount(remaining))?;
                }
            }
            SplitType::Exact => {
                write!(f, "Exact total: {}", format_amount(self.entered))?;
                if let Some(gap) = self.difference() {
                    write!(f, " (Difference: {})", format_amount(gap))?;
                }
            }
        }

        for (i, line) in self.lines.iter().enumerate() {
            f.write_str(if i == 0 { " | Allocations: " } else { ", " })?;
            write!(f, "{}: {}", line.name, format_amount(line.amount))?;
            match self.split_type {
                SplitType::Shares if line.value == Decimal::ONE => f.write_str(" (1 share)")?,
                SplitType::Shares => write!(f, " ({} shares)", line.value.normalize())?,
                SplitType::Percent => write!(f, " ({}%)", format_amount(line.value))?,
                SplitType::Equal | SplitType::Exact => {}
            }
        }
        Ok(())
    }
}
