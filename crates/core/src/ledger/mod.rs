//! Passbook ledgers.
//!
//! Heterogeneous source records are normalized into signed entries, merged
//! by date and folded into a running balance:
//! - `source` - per-kind normalization and the sign convention
//! - `engine` - merge, stable sort and fold
//! - `passbook` - driver, supplier and party ledgers
//! - `balance` - running balance steps and independent aggregates

pub mod balance;
pub mod engine;
pub mod entry;
pub mod error;
pub mod passbook;
pub mod source;

#[cfg(test)]
mod props;

pub use balance::{RunningBalance, driver_outstanding, party_outstanding, supplier_outstanding};
pub use engine::{DisplayOrder, Ledger, build_ledger};
pub use entry::{EntryKind, LedgerEntry};
pub use error::LedgerError;
pub use passbook::{EntityType, driver_ledger, party_ledger, supplier_ledger};
pub use source::{SourceEntry, SourceRecord, TransactionStream};
