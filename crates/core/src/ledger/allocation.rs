//! Split allocation: how much of one expense each participant owes.
//!
//! Allocation rules by split type:
//! 1. `equal` - amount / roster size, for every participant on the roster
//! 2. `shares` - amount * weight / sum of weights (roster size if the sum is not positive)
//! 3. `percent` - amount * percentage / 100, taken at face value
//! 4. `exact` - the split value itself
//!
//! Allocations are unrounded; rounding is a display concern.

use std::collections::HashMap;

use rust_decimal::Decimal;
use tripsplit_shared::types::ParticipantId;

use super::types::{Allocation, Expense, Participant, Split, SplitType};

/// Computes each participant's share of an expense.
///
/// The result covers every participant in `participants`, in roster order,
/// with zero for anyone the expense's splits do not mention. Split rows for
/// participants outside the roster are ignored. When a participant has more
/// than one row, the last row wins.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use tripsplit_core::ledger::{Expense, Participant, SplitType, allocate};
///
/// let people = vec![Participant::with_id("a", "Asha"), Participant::with_id("b", "Ben")];
/// let expense = Expense {
///     id: "dinner".into(),
///     description: "Dinner".to_string(),
///     date: None,
///     amount: dec!(90),
///     payer_id: "a".into(),
///     split_type: SplitType::Equal,
///     splits: vec![],
/// };
///
/// let allocation = allocate(&expense, &people);
/// assert_eq!(allocation.get(&"b".into()), dec!(45));
/// ```
#[must_use]
pub fn allocate(expense: &Expense, participants: &[Participant]) -> Allocation {
    let amounts = allocate_amounts(
        expense.amount,
        expense.split_type,
        &expense.splits,
        participants,
    );

    Allocation::new(
        participants
            .iter()
            .map(|p| p.id.clone())
            .zip(amounts)
            .collect(),
    )
}

/// Roster-ordered allocation of `amount`; see [`allocate`].
///
/// Callers keep `amount` and split values within
/// [`MAX_ENTRY_VALUE`](super::validation::MAX_ENTRY_VALUE), which keeps every
/// product below `Decimal::MAX`.
pub(crate) fn allocate_amounts(
    amount: Decimal,
    split_type: SplitType,
    splits: &[Split],
    participants: &[Participant],
) -> Vec<Decimal> {
    let mut amounts = vec![Decimal::ZERO; participants.len()];
    let headcount = Decimal::from(participants.len().max(1));

    match split_type {
        SplitType::Equal => {
            amounts.fill(amount / headcount);
        }
        SplitType::Shares => {
            let total_weight: Decimal = splits.iter().map(|s| s.value).sum();
            let denominator = if total_weight > Decimal::ZERO {
                total_weight
            } else {
                headcount
            };
            set_splits(splits, participants, &mut amounts, |value| {
                amount * value / denominator
            });
        }
        SplitType::Percent => {
            set_splits(splits, participants, &mut amounts, |value| {
                amount * value / Decimal::ONE_HUNDRED
            });
        }
        SplitType::Exact => {
            set_splits(splits, participants, &mut amounts, |value| value);
        }
    }

    amounts
}

/// Sets the slot of each split row's participant to `share(value)`.
fn set_splits<F>(splits: &[Split], participants: &[Participant], amounts: &mut [Decimal], share: F)
where
    F: Fn(Decimal) -> Decimal,
{
    let index: HashMap<&ParticipantId, usize> = participants
        .iter()
        .enumerate()
        .map(|(i, p)| (&p.id, i))
        .collect();

    for split in splits {
        if let Some(&i) = index.get(&split.participant_id) {
            amounts[i] = share(split.value);
        }
    }
}
