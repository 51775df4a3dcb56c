//! Receivable and profit reporting.
//!
//! - Accounts receivable across every trip
//! - Dashboard monthly profit, all trucks together
//! - Monthly report partitioned by truck ownership

pub mod error;
pub mod service;
pub mod types;


pub use error::ReportError;
pub use service::ReportService;
pub use types::{OwnershipReport, PartitionSummary};
