//! Trip snapshots: the JSON document the CLI reads a trip from.

use std::path::Path;

use serde::Deserialize;
use tracing::warn;
use tripsplit_core::ledger::{ExpenseInput, Participant};
use tripsplit_core::trip::{Trip, TripError};
use tripsplit_shared::types::{CurrencyCode, ExpenseId};
use tripsplit_shared::{AppError, AppResult};

/// A trip as stored on disk.
#[derive(Debug, Clone, Deserialize)]
pub struct TripSnapshot {
    /// Trip name.
    pub name: String,
    /// Currency code; the configured default is used when absent.
    #[serde(default)]
    pub currency: Option<String>,
    /// Roster in join order.
    #[serde(default)]
    pub participants: Vec<Participant>,
    /// Expenses in the order they were added.
    #[serde(default)]
    pub expenses: Vec<ExpenseRecord>,
}

/// One stored expense. Amounts and split values are kept as entered.
#[derive(Debug, Clone, Deserialize)]
pub struct ExpenseRecord {
    /// Stored ID; a new one is assigned when absent.
    #[serde(default)]
    pub id: Option<ExpenseId>,
    /// The expense fields.
    #[serde(flatten)]
    pub input: ExpenseInput,
}

/// An expense that was left out of the trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejected {
    /// Position in the snapshot's expense list.
    pub index: usize,
    /// Description as stored.
    pub description: String,
    /// Why it was rejected.
    pub error: TripError,
}

/// Reads and decodes a snapshot file.
pub fn load(path: &Path) -> AppResult<TripSnapshot> {
    let raw = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => AppError::NotFound(path.display().to_string()),
        _ => AppError::Input(format!("{}: {e}", path.display())),
    })?;
    parse(&raw)
}

/// Decodes a snapshot from JSON text.
pub fn parse(raw: &str) -> AppResult<TripSnapshot> {
    serde_json::from_str(raw).map_err(|e| AppError::Input(e.to_string()))
}

impl TripSnapshot {
    /// Rebuilds the trip.
    ///
    /// An invalid trip header or roster fails the whole snapshot. Invalid
    /// expenses are skipped, logged, and returned alongside the trip.
    pub fn into_trip(self, default_currency: &CurrencyCode) -> AppResult<(Trip, Vec<Rejected>)> {
        let currency = self
            .currency
            .as_deref()
            .unwrap_or_else(|| default_currency.as_str());
        let mut trip = Trip::new(&self.name, currency)?;

        for participant in self.participants {
            trip.insert_participant(participant)?;
        }

        let mut rejected = Vec::new();
        for (index, record) in self.expenses.into_iter().enumerate() {
            let id = record.id.unwrap_or_default();
            if let Err(error) = trip.insert_expense(id, &record.input) {
                warn!(
                    index,
                    description = %record.input.description,
                    error_code = error.error_code(),
                    "Skipping invalid expense: {error}"
                );
                rejected.push(Rejected {
                    index,
                    description: record.input.description,
                    error,
                });
            }
        }

        Ok((trip, rejected))
    }
}
