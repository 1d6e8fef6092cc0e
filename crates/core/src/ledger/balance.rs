//! Net balance calculation.
//!
//! Every expense credits its payer with the full amount and debits each
//! participant by their allocation, so each expense nets to zero and the
//! balance vector of a trip always sums to zero (up to division remainders).

use std::collections::HashMap;

use rust_decimal::Decimal;
use tracing::debug;
use tripsplit_shared::types::ParticipantId;

use super::allocation::allocate;
use super::types::{Balances, Expense, Participant};
use super::validation::MAX_ENTRY_VALUE;

/// Computes every participant's net balance from the full expense list.
///
/// The result is order-parallel with `participants`. Expenses whose payer
/// is not on the roster, or whose amount or split values exceed
/// [`MAX_ENTRY_VALUE`], are skipped. Recomputed from scratch on every call.
#[must_use]
pub fn compute_balances(participants: &[Participant], expenses: &[Expense]) -> Balances {
    let index: HashMap<&ParticipantId, usize> = participants
        .iter()
        .enumerate()
        .map(|(i, p)| (&p.id, i))
        .collect();
    let mut amounts = vec![Decimal::ZERO; participants.len()];

    for expense in expenses {
        let Some(&payer) = index.get(&expense.payer_id) else {
            debug!(
                expense_id = %expense.id,
                payer_id = %expense.payer_id,
                "Skipping expense with unknown payer"
            );
            continue;
        };
        if !within_limits(expense) {
            debug!(
                expense_id = %expense.id,
                amount = %expense.amount,
                "Skipping expense above the entry limit"
            );
            continue;
        }

        let allocation = allocate(expense, participants);
        for (balance, (_, owed)) in amounts.iter_mut().zip(allocation.iter()) {
            *balance -= owed;
        }
        amounts[payer] += expense.amount;
    }

    Balances {
        participants: participants.to_vec(),
        amounts,
    }
}

fn within_limits(expense: &Expense) -> bool {
    expense.amount.abs() <= MAX_ENTRY_VALUE
        && expense
            .splits
            .iter()
            .all(|s| s.value.abs() <= MAX_ENTRY_VALUE)
}
