//! Trips: the roster and expense list the ledger runs over.
//!
//! A trip exclusively owns its participants and expenses. Balances,
//! settlements and the overview are recomputed from that state on demand
//! and never stored.

pub mod error;
pub mod service;
pub mod types;


pub use error::TripError;
pub use types::{Trip, TripOverview};
