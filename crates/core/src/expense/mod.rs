//! Expenses and their Trip / Truck / Office classification.

pub mod classify;
pub mod types;

pub use classify::classify;
pub use types::{Expense, ExpenseCategory};
