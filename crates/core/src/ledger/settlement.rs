//! Settlement planning: who pays whom to clear all balances.
//!
//! Greedy largest-pair matching:
//! 1. Split balances into creditors (> eps) and debtors (< -eps)
//! 2. Sort both by magnitude, largest first (stable, so ties keep roster order)
//! 3. Match the largest debtor with the largest creditor for the smaller
//!    of the two magnitudes, then drop whichever side reached zero
//! 4. Stop when either side runs out
//!
//! Each step clears at least one party, so a zero-sum vector of `n`
//! balances settles in at most `n - 1` transfers.

use rust_decimal::Decimal;
use tracing::warn;
use tripsplit_shared::types::round_for_display;

use super::types::{Balances, Settlement, SettlementPlan};

/// Balances within this distance of zero count as settled.
pub const SETTLEMENT_EPSILON: Decimal = Decimal::from_parts(1, 0, 0, false, 6);

/// Name used when `names` is shorter than `balances`.
const UNKNOWN_NAME: &str = "Unknown";

/// Plans the transfers that settle `balances`.
///
/// `names` is order-parallel with `balances`. Matching uses unrounded
/// magnitudes; each recorded transfer is rounded to two decimals.
///
/// If the balances do not sum to zero, the side left over after matching is
/// reported in [`SettlementPlan::unsettled`] and logged as a warning.
#[must_use]
pub fn plan<S: AsRef<str>>(balances: &[Decimal], names: &[S]) -> SettlementPlan {
    let mut creditors: Vec<(usize, Decimal)> = Vec::new();
    let mut debtors: Vec<(usize, Decimal)> = Vec::new();
    for (i, &balance) in balances.iter().enumerate() {
        if balance > SETTLEMENT_EPSILON {
            creditors.push((i, balance));
        } else if balance < -SETTLEMENT_EPSILON {
            debtors.push((i, -balance));
        }
    }
    creditors.sort_by(|a, b| b.1.cmp(&a.1));
    debtors.sort_by(|a, b| b.1.cmp(&a.1));

    let name_of = |i: usize| {
        names
            .get(i)
            .map_or(UNKNOWN_NAME, |name| name.as_ref())
            .to_string()
    };

    let mut settlements = Vec::new();
    let (mut ci, mut di) = (0, 0);
    while ci < creditors.len() && di < debtors.len() {
        let give = creditors[ci].1.min(debtors[di].1);
        settlements.push(Settlement {
            from: name_of(debtors[di].0),
            to: name_of(creditors[ci].0),
            amount: round_for_display(give),
        });

        creditors[ci].1 -= give;
        debtors[di].1 -= give;
        if creditors[ci].1 <= SETTLEMENT_EPSILON {
            ci += 1;
        }
        if debtors[di].1 <= SETTLEMENT_EPSILON {
            di += 1;
        }
    }

    let unsettled: Decimal = creditors[ci..]
        .iter()
        .chain(&debtors[di..])
        .map(|(_, remaining)| *remaining)
        .sum();
    if unsettled > SETTLEMENT_EPSILON {
        warn!(
            %unsettled,
            transfers = settlements.len(),
            "Balances do not sum to zero; remainder left unsettled"
        );
    }

    SettlementPlan {
        settlements,
        unsettled,
    }
}

/// Plans the transfers that settle computed balances, using roster names.
#[must_use]
pub fn plan_for(balances: &Balances) -> SettlementPlan {
    plan(&balances.amounts, &balances.names())
}
