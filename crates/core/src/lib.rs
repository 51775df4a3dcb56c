//! Core business logic for Haulbook.
//!
//! Pure computations over fully loaded record sets, with no web, storage or
//! clock dependencies. Callers pass reference dates in.
//!
//! # Modules
//!
//! - `trip` - Trip records and the trip balance formula
//! - `expense` - Expense records and Trip / Truck / Office classification
//! - `fleet` - Trucks, drivers, suppliers, parties and their account entries
//! - `ledger` - Driver, supplier and party passbooks with running balances
//! - `fiscal` - April to March fiscal years and dashboard aggregations
//! - `reports` - Accounts receivable and monthly profit
//! - `dashboard` - Dashboard summary assembly

pub mod dashboard;
pub mod expense;
pub mod fiscal;
pub mod fleet;
pub mod ledger;
pub mod reports;
pub mod trip;
