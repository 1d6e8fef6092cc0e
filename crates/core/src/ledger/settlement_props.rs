//! Property-based tests for settlement planning.
//!
//! - Completeness: applying the planned transfers clears every balance
//! - Minimality bound: at most `n - 1` transfers
//! - Transfers always move a positive amount from a debtor to a creditor

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::settlement::{SETTLEMENT_EPSILON, plan};
use super::types::{Settlement, SplitType};

/// Strategy for a zero-sum balance vector in whole cents (2 to 12 people).
///
/// The last participant absorbs the negated sum of the others.
fn zero_sum_balances() -> impl Strategy<Value = Vec<Decimal>> {
    prop::collection::vec(-1_000_000i64..1_000_000i64, 1..12).prop_map(|cents| {
        let mut balances: Vec<Decimal> = cents.iter().map(|c| Decimal::new(*c, 2)).collect();
        let sum: Decimal = balances.iter().copied().sum();
        balances.push(-sum);
        balances
    })
}

fn names(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("P{i}")).collect()
}

fn index_of(name: &str) -> usize {
    name.trim_start_matches('P').parse().unwrap()
}

/// Applies transfers: the payer's debt shrinks, the receiver's credit shrinks.
fn apply(balances: &[Decimal], settlements: &[Settlement]) -> Vec<Decimal> {
    let mut remaining = balances.to_vec();
    for s in settlements {
        remaining[index_of(&s.from)] += s.amount;
        remaining[index_of(&s.to)] -= s.amount;
    }
    remaining
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// *For any* zero-sum balances, the plan clears every balance exactly.
    #[test]
    fn prop_plan_clears_all_balances(balances in zero_sum_balances()) {
        let result = plan(&balances, &names(balances.len()));

        for (i, remaining) in apply(&balances, &result.settlements).iter().enumerate() {
            prop_assert!(
                remaining.abs() <= SETTLEMENT_EPSILON,
                "P{} should be settled, has {}",
                i,
                remaining
            );
        }
        prop_assert_eq!(result.unsettled, Decimal::ZERO);
    }

    /// *For any* zero-sum balances of `n` people, at most `n - 1` transfers.
    #[test]
    fn prop_plan_is_small(balances in zero_sum_balances()) {
        let result = plan(&balances, &names(balances.len()));
        prop_assert!(
            result.settlements.len() < balances.len(),
            "{} transfers for {} people",
            result.settlements.len(),
            balances.len()
        );
    }

    /// Every transfer is positive and flows from a debtor to a creditor.
    #[test]
    fn prop_transfers_flow_from_debtors_to_creditors(balances in zero_sum_balances()) {
        let result = plan(&balances, &names(balances.len()));

        for s in &result.settlements {
            prop_assert!(s.amount > Decimal::ZERO);
            prop_assert!(balances[index_of(&s.from)] < Decimal::ZERO);
            prop_assert!(balances[index_of(&s.to)] > Decimal::ZERO);
        }
    }

    /// Planning from fractional balances still leaves each person within
    /// display rounding of zero.
    #[test]
    fn prop_rounded_plan_is_close(
        cents in prop::collection::vec(1i64..100_000i64, 2..8),
        divisor in 1u32..13,
    ) {
        // Spread one creditor's total across debtors with repeating fractions
        let divisor = Decimal::from(divisor);
        let debts: Vec<Decimal> = cents.iter().map(|c| Decimal::new(*c, 2) / divisor).collect();
        let mut balances: Vec<Decimal> = vec![debts.iter().copied().sum()];
        balances.extend(debts.iter().map(|d| -*d));

        let result = plan(&balances, &names(balances.len()));
        let slack = Decimal::new(1, 2) * Decimal::from(balances.len());
        for remaining in apply(&balances, &result.settlements) {
            prop_assert!(remaining.abs() <= slack, "left {}", remaining);
        }
        prop_assert!(result.unsettled <= SETTLEMENT_EPSILON);
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use crate::ledger::balance::compute_balances;
    use crate::ledger::settlement::plan_for;
    use crate::ledger::types::{Expense, Participant};
    use rust_decimal_macros::dec;

    /// Specific example: a weekend trip end to end.
    #[test]
    fn test_weekend_trip() {
        let people = vec![
            Participant::with_id("a", "Asha"),
            Participant::with_id("b", "Ben"),
            Participant::with_id("c", "Chen"),
        ];
        let expenses = vec![
            Expense {
                id: "hotel".into(),
                description: "Hotel".to_string(),
                date: None,
                amount: dec!(300),
                payer_id: "a".into(),
                split_type: SplitType::Equal,
                splits: vec![],
            },
            Expense {
                id: "fuel".into(),
                description: "Fuel".to_string(),
                date: None,
                amount: dec!(60),
                payer_id: "b".into(),
                split_type: SplitType::Equal,
                splits: vec![],
            },
        ];

        let balances = compute_balances(&people, &expenses);
        assert_eq!(balances.amounts, vec![dec!(180), dec!(-60), dec!(-120)]);

        let result = plan_for(&balances);
        let lines: Vec<String> = result.settlements.iter().map(ToString::to_string).collect();
        assert_eq!(lines, vec!["Chen pays Asha 120.00", "Ben pays Asha 60.00"]);
    }

    /// Specific example: balanced input produces no transfers.
    #[test]
    fn test_already_settled() {
        let result = plan(&[Decimal::ZERO, Decimal::ZERO], &names(2));
        assert!(result.is_settled());
    }
}
