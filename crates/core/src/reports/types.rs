//! Report data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::fiscal::CalendarMonth;

/// Figures for one ownership partition of a month.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionSummary {
    /// Trips started in the month.
    pub trip_count: u64,
    /// Summed freight.
    pub freight: Decimal,
    /// Charges billed to parties.
    pub billable: Decimal,
    /// Charges absorbed against freight.
    pub deductions: Decimal,
    /// Truck-hire cost owed to suppliers.
    pub truck_hire: Decimal,
    /// Expenses charged to the partition.
    pub expenses: Decimal,
    /// `freight + billable - deductions - expenses`.
    pub profit: Decimal,
}

/// Monthly report split by truck ownership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnershipReport {
    /// Reported month.
    pub month: CalendarMonth,
    /// Month label, e.g. `"June 2024"`.
    pub label: String,
    /// Trips on company-owned trucks.
    #[serde(rename = "self")]
    pub self_owned: PartitionSummary,
    /// Trips on hired market trucks.
    pub market: PartitionSummary,
    /// All expenses dated in the month.
    pub total_expense: Decimal,
    /// Office-bucket expenses dated in the month.
    pub office_expense: Decimal,
}
