//! Property-based tests for allocation and balance aggregation.
//!
//! - Zero-sum: balances of validly split expenses add up to zero
//! - Idempotence: recomputing on unchanged input gives the same result
//! - Unknown payers contribute nothing

use proptest::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};

use super::allocation::allocate;
use super::balance::compute_balances;
use super::types::{Expense, Participant, Split, SplitType};

/// Strategy to generate a positive amount (0.01 to 1,000,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate a split type.
fn split_type_strategy() -> impl Strategy<Value = SplitType> {
    prop_oneof![
        Just(SplitType::Equal),
        Just(SplitType::Shares),
        Just(SplitType::Percent),
        Just(SplitType::Exact),
    ]
}

/// Raw material for one expense on a roster of `n` participants.
///
/// A zero weight leaves that participant out of the split rows; the first
/// weight is forced positive so there is always at least one row.
fn expense_params(
    n: usize,
) -> impl Strategy<Value = (Decimal, usize, SplitType, Vec<u32>)> {
    (
        positive_amount(),
        0..n,
        split_type_strategy(),
        prop::collection::vec(0u32..10, n),
    )
        .prop_map(|(amount, payer, split_type, mut weights)| {
            weights[0] = weights[0].max(1);
            (amount, payer, split_type, weights)
        })
}

/// Strategy for a roster size and a list of expenses on it.
fn trip_strategy() -> impl Strategy<Value = (Vec<Participant>, Vec<Expense>)> {
    (1usize..8).prop_flat_map(|n| {
        prop::collection::vec(expense_params(n), 0..20).prop_map(move |params| {
            let people = roster(n);
            let expenses = params
                .into_iter()
                .enumerate()
                .map(|(i, (amount, payer, split_type, weights))| {
                    build_expense(i, &people, amount, payer, split_type, &weights)
                })
                .collect();
            (people, expenses)
        })
    })
}

fn roster(n: usize) -> Vec<Participant> {
    (0..n)
        .map(|i| Participant::with_id(format!("p{i}"), format!("P{i}")))
        .collect()
}

/// Builds an expense whose split rows satisfy the entry rules for its type.
fn build_expense(
    index: usize,
    people: &[Participant],
    amount: Decimal,
    payer: usize,
    split_type: SplitType,
    weights: &[u32],
) -> Expense {
    let rows: Vec<(usize, Decimal)> = weights
        .iter()
        .enumerate()
        .filter(|(_, w)| **w > 0)
        .map(|(i, w)| (i, Decimal::from(*w)))
        .collect();
    let total_weight: Decimal = rows.iter().map(|(_, w)| *w).sum();

    let values: Vec<Decimal> = match split_type {
        SplitType::Equal => vec![],
        SplitType::Shares => rows.iter().map(|(_, w)| *w).collect(),
        SplitType::Percent => rows
            .iter()
            .map(|(_, w)| Decimal::ONE_HUNDRED * *w / total_weight)
            .collect(),
        SplitType::Exact => {
            // Round every row down to cents and give the remainder to the last
            let mut cents: Vec<Decimal> = rows
                .iter()
                .map(|(_, w)| {
                    (amount * *w / total_weight)
                        .round_dp_with_strategy(2, RoundingStrategy::ToZero)
                })
                .collect();
            let assigned: Decimal = cents.iter().take(cents.len() - 1).copied().sum();
            if let Some(last) = cents.last_mut() {
                *last = amount - assigned;
            }
            cents
        }
    };

    let splits = rows
        .iter()
        .zip(values)
        .map(|((i, _), value)| Split::new(people[*i].id.clone(), value))
        .collect();

    Expense {
        id: format!("e{index}").into(),
        description: format!("Expense {index}"),
        date: None,
        amount,
        payer_id: people[payer].id.clone(),
        split_type,
        splits,
    }
}

fn tolerance() -> Decimal {
    Decimal::new(1, 6)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// *For any* list of validly split expenses, balances sum to zero.
    #[test]
    fn prop_balances_sum_to_zero((people, expenses) in trip_strategy()) {
        let balances = compute_balances(&people, &expenses);
        prop_assert_eq!(balances.amounts.len(), people.len());
        prop_assert!(
            balances.total().abs() <= tolerance(),
            "Balances should sum to zero, got {}",
            balances.total()
        );
    }

    /// *For any* validly split expense, allocations add up to the amount.
    #[test]
    fn prop_allocation_covers_amount((people, expenses) in trip_strategy()) {
        for expense in &expenses {
            let allocation = allocate(expense, &people);
            prop_assert_eq!(allocation.len(), people.len());
            prop_assert!(
                (allocation.total() - expense.amount).abs() <= tolerance(),
                "Allocation {} should cover amount {} ({})",
                allocation.total(),
                expense.amount,
                expense.split_type
            );
        }
    }

    /// Recomputing balances on the same input is deterministic.
    #[test]
    fn prop_compute_balances_is_idempotent((people, expenses) in trip_strategy()) {
        let first = compute_balances(&people, &expenses);
        let second = compute_balances(&people, &expenses);
        prop_assert_eq!(first, second);
    }

    /// An expense paid by someone off the roster changes nothing.
    #[test]
    fn prop_unknown_payer_contributes_nothing(
        (people, expenses) in trip_strategy(),
        amount in positive_amount(),
        split_type in split_type_strategy(),
    ) {
        let before = compute_balances(&people, &expenses);

        let mut with_ghost = expenses.clone();
        let mut ghost = build_expense(
            expenses.len(),
            &people,
            amount,
            0,
            split_type,
            &vec![1; people.len()],
        );
        ghost.payer_id = "nobody".into();
        with_ghost.push(ghost);

        let after = compute_balances(&people, &with_ghost);
        prop_assert_eq!(before, after);
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use rust_decimal_macros::dec;

    /// Specific example: four-way equal split paid by the first participant.
    #[test]
    fn test_equal_split_example() {
        let people = roster(4);
        let expense = build_expense(0, &people, dec!(100), 0, SplitType::Equal, &[1, 1, 1, 1]);

        let balances = compute_balances(&people, &[expense]);
        assert_eq!(
            balances.amounts,
            vec![dec!(75), dec!(-25), dec!(-25), dec!(-25)]
        );
    }

    /// Specific example: exact rows built from weights cover the amount.
    #[test]
    fn test_build_exact_rows() {
        let people = roster(3);
        let expense = build_expense(0, &people, dec!(10), 1, SplitType::Exact, &[1, 1, 1]);

        let values: Vec<Decimal> = expense.splits.iter().map(|s| s.value).collect();
        assert_eq!(values, vec![dec!(3.33), dec!(3.33), dec!(3.34)]);
    }
}
