//! Expense classification.
//!
//! Precedence is fixed: trip, then truck, then office. Every expense lands
//! in exactly one bucket; there is no unclassified state.

use super::types::{Expense, ExpenseCategory};

/// Assigns an expense to its reporting bucket.
#[must_use]
pub fn classify(expense: &Expense) -> ExpenseCategory {
    if expense.trip_id.as_ref().is_some_and(|id| !id.is_blank()) {
        ExpenseCategory::Trip
    } else if expense.truck_id.as_ref().is_some_and(|id| !id.is_blank()) {
        ExpenseCategory::Truck
    } else {
        ExpenseCategory::Office
    }
}
