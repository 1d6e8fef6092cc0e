//! Ledger domain types: participants, expenses and the values derived from them.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tripsplit_shared::types::{ExpenseId, ParticipantId, format_amount};

/// How an expense is divided between participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitType {
    /// Amount divided evenly across the whole trip roster.
    Equal,
    /// Split values are relative weights.
    Shares,
    /// Split values are percentages of the amount.
    Percent,
    /// Split values are literal amounts.
    Exact,
}

impl SplitType {
    /// Returns the lowercase name used in storage and display.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Equal => "equal",
            Self::Shares => "shares",
            Self::Percent => "percent",
            Self::Exact => "exact",
        }
    }

    /// Returns true if the split type needs explicit split rows.
    #[must_use]
    pub const fn requires_splits(self) -> bool {
        !matches!(self, Self::Equal)
    }
}

impl std::fmt::Display for SplitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A member of a trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Identifier, unique within the trip.
    pub id: ParticipantId,
    /// Display name.
    pub name: String,
}

impl Participant {
    /// Creates a participant with a fresh identifier.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(ParticipantId::new(), name)
    }

    /// Creates a participant with a known identifier.
    #[must_use]
    pub fn with_id(id: impl Into<ParticipantId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// One participant's row in a non-equal split.
///
/// `value` is a weight, a percentage or an amount depending on the
/// owning expense's [`SplitType`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Split {
    /// Participant this row applies to.
    pub participant_id: ParticipantId,
    /// Weight, percentage or amount.
    pub value: Decimal,
}

impl Split {
    /// Creates a split row.
    #[must_use]
    pub fn new(participant_id: impl Into<ParticipantId>, value: Decimal) -> Self {
        Self {
            participant_id: participant_id.into(),
            value,
        }
    }
}

/// A shared expense paid by one participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Identifier.
    pub id: ExpenseId,
    /// What the money was spent on.
    pub description: String,
    /// When the expense happened, if known.
    pub date: Option<NaiveDate>,
    /// Total amount paid (positive).
    pub amount: Decimal,
    /// Participant who paid.
    pub payer_id: ParticipantId,
    /// How the amount is divided.
    pub split_type: SplitType,
    /// Split rows, in entry order.
    pub splits: Vec<Split>,
}

/// Per-participant share of one expense, order-parallel to the roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    entries: Vec<(ParticipantId, Decimal)>,
}

impl Allocation {
    pub(crate) fn new(entries: Vec<(ParticipantId, Decimal)>) -> Self {
        Self { entries }
    }

    /// Returns the amount allocated to a participant (zero if absent).
    #[must_use]
    pub fn get(&self, participant_id: &ParticipantId) -> Decimal {
        self.entries
            .iter()
            .find(|(id, _)| id == participant_id)
            .map_or(Decimal::ZERO, |(_, amount)| *amount)
    }

    /// Iterates over `(participant, amount)` pairs in roster order.
    pub fn iter(&self) -> impl Iterator<Item = (&ParticipantId, Decimal)> {
        self.entries.iter().map(|(id, amount)| (id, *amount))
    }

    /// Number of participants covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no participant is covered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all allocated amounts.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.entries.iter().map(|(_, amount)| *amount).sum()
    }
}

/// Net balance per participant, order-parallel to the roster.
///
/// Positive means the participant is owed money, negative means they owe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Balances {
    /// Roster the balances were computed for.
    pub participants: Vec<Participant>,
    /// Signed net amount per participant.
    pub amounts: Vec<Decimal>,
}

impl Balances {
    /// Returns the balance of a participant, if they are on the roster.
    #[must_use]
    pub fn get(&self, participant_id: &ParticipantId) -> Option<Decimal> {
        self.participants
            .iter()
            .position(|p| &p.id == participant_id)
            .and_then(|i| self.amounts.get(i).copied())
    }

    /// Iterates over `(participant, balance)` pairs in roster order.
    pub fn iter(&self) -> impl Iterator<Item = (&Participant, Decimal)> {
        self.participants.iter().zip(self.amounts.iter().copied())
    }

    /// Participant names in roster order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.participants.iter().map(|p| p.name.as_str()).collect()
    }

    /// Sum of all balances; zero up to rounding noise.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.amounts.iter().copied().sum()
    }

    /// Total still owed to creditors (sum of positive balances).
    #[must_use]
    pub fn outstanding(&self) -> Decimal {
        self.amounts
            .iter()
            .copied()
            .filter(|amount| amount.is_sign_positive() && !amount.is_zero())
            .sum()
    }
}

/// A single transfer that settles part of the debts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    /// Name of the participant who pays.
    pub from: String,
    /// Name of the participant who receives.
    pub to: String,
    /// Amount, rounded to two decimals.
    pub amount: Decimal,
}

impl std::fmt::Display for Settlement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} pays {} {}", self.from, self.to, format_amount(self.amount))
    }
}

/// Transfers that settle a set of balances.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SettlementPlan {
    /// Transfers in the order they were matched.
    pub settlements: Vec<Settlement>,
    /// Magnitude left unmatched; zero when the balances summed to zero.
    pub unsettled: Decimal,
}

impl SettlementPlan {
    /// Returns true if nobody owes anything.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.settlements.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_split_type_serde() {
        let json = serde_json::to_string(&SplitType::Percent).unwrap();
        assert_eq!(json, "\"percent\"");
        let back: SplitType = serde_json::from_str("\"shares\"").unwrap();
        assert_eq!(back, SplitType::Shares);
    }

    #[test]
    fn test_requires_splits() {
        assert!(!SplitType::Equal.requires_splits());
        assert!(SplitType::Shares.requires_splits());
        assert!(SplitType::Percent.requires_splits());
        assert!(SplitType::Exact.requires_splits());
    }

    #[test]
    fn test_allocation_defaults_to_zero() {
        let allocation = Allocation::new(vec![(ParticipantId::from("a"), dec!(10))]);
        assert_eq!(allocation.get(&ParticipantId::from("a")), dec!(10));
        assert_eq!(allocation.get(&ParticipantId::from("zed")), Decimal::ZERO);
        assert_eq!(allocation.total(), dec!(10));
    }

    #[test]
    fn test_balances_outstanding() {
        let balances = Balances {
            participants: vec![
                Participant::with_id("a", "Asha"),
                Participant::with_id("b", "Ben"),
                Participant::with_id("c", "Chen"),
            ],
            amounts: vec![dec!(40), dec!(-25), dec!(-15)],
        };
        assert_eq!(balances.outstanding(), dec!(40));
        assert_eq!(balances.total(), Decimal::ZERO);
        assert_eq!(balances.get(&ParticipantId::from("b")), Some(dec!(-25)));
        assert_eq!(balances.get(&ParticipantId::from("x")), None);
        assert_eq!(balances.names(), vec!["Asha", "Ben", "Chen"]);
    }

    #[test]
    fn test_balances_get_with_short_amounts() {
        let balances = Balances {
            participants: vec![
                Participant::with_id("a", "Asha"),
                Participant::with_id("b", "Ben"),
            ],
            amounts: vec![dec!(5)],
        };
        assert_eq!(balances.get(&ParticipantId::from("a")), Some(dec!(5)));
        assert_eq!(balances.get(&ParticipantId::from("b")), None);
    }

    #[test]
    fn test_settlement_display() {
        let settlement = Settlement {
            from: "Ben".to_string(),
            to: "Asha".to_string(),
            amount: dec!(12.5),
        };
        assert_eq!(settlement.to_string(), "Ben pays Asha 12.50");
    }
}
