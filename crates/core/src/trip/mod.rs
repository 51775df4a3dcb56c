//! Trips and the trip balance formula.

pub mod balance;
pub mod types;

pub use balance::{ChargeTotals, TripBalance, TripIndex, compute_trip_balance, trip_balances};
pub use types::{PartyPayment, Trip, TripCharge, TripStatus};
