//! Expense records.

use chrono::NaiveDate;
use haulbook_shared::types::{DriverId, ExpenseId, TripId, TruckId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Bucket an expense is reported under.
///
/// Declared in name order so sorting by category sorts by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ExpenseCategory {
    /// Overheads not tied to a trip or truck.
    Office,
    /// Incurred on a specific trip.
    Trip,
    /// Incurred on a truck outside any trip.
    Truck,
}

impl ExpenseCategory {
    /// All categories, in name order.
    pub const ALL: [Self; 3] = [Self::Office, Self::Trip, Self::Truck];

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Office => "Office",
            Self::Trip => "Trip",
            Self::Truck => "Truck",
        }
    }
}

impl std::fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// An expense recorded by a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    /// Expense identifier.
    pub id: ExpenseId,
    /// Owning user.
    pub user_id: UserId,
    /// Amount spent.
    #[serde(default)]
    pub amount: Option<Decimal>,
    /// Date spent.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Free-form type label (e.g. "Fuel", "Toll", "Rent").
    #[serde(default)]
    pub expense_type: String,
    /// Trip the expense was incurred on.
    #[serde(default)]
    pub trip_id: Option<TripId>,
    /// Truck the expense was incurred on.
    #[serde(default)]
    pub truck_id: Option<TruckId>,
    /// Driver who paid the expense.
    #[serde(default)]
    pub driver_id: Option<DriverId>,
    /// Notes.
    #[serde(default)]
    pub notes: Option<String>,
}
