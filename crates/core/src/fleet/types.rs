//! Fleet record types.

use chrono::NaiveDate;
use haulbook_shared::types::{
    AccountEntryId, DriverId, PartyId, SupplierId, TripId, TruckId, UserId,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Who owns the truck used on a trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TruckOwnership {
    /// Owned by the user's own fleet.
    #[serde(rename = "Self")]
    SelfOwned,
    /// Hired from a supplier in the market.
    Market,
}

/// A truck.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Truck {
    /// Truck identifier.
    pub id: TruckId,
    /// Owning user.
    pub user_id: UserId,
    /// Registration number.
    pub truck_number: String,
    /// Ownership type.
    pub ownership: TruckOwnership,
    /// Supplier the truck is hired from.
    #[serde(default)]
    pub supplier_id: Option<SupplierId>,
}

/// A driver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Driver {
    /// Driver identifier.
    pub id: DriverId,
    /// Owning user.
    pub user_id: UserId,
    /// Driver name.
    pub name: String,
    /// Cached passbook balance, rebuilt from the ledger after every change.
    #[serde(default)]
    pub balance: Decimal,
}

/// A market-truck supplier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Supplier {
    /// Supplier identifier.
    pub id: SupplierId,
    /// Owning user.
    pub user_id: UserId,
    /// Supplier name.
    pub name: String,
    /// Cached passbook balance, rebuilt from the ledger after every change.
    #[serde(default)]
    pub balance: Decimal,
}

/// A party billed for freight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Party {
    /// Party identifier.
    pub id: PartyId,
    /// Owning user.
    pub user_id: UserId,
    /// Party name.
    pub name: String,
}

/// A payment made to a supplier for truck hire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierAccount {
    /// Entry identifier.
    pub id: AccountEntryId,
    /// Supplier paid.
    pub supplier_id: SupplierId,
    /// Trip the payment was allocated to.
    #[serde(default)]
    pub trip_id: Option<TripId>,
    /// Amount paid.
    #[serde(default)]
    pub amount: Option<Decimal>,
    /// Date paid.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Payment mode (e.g. "Cash", "Bank").
    #[serde(default)]
    pub payment_mode: Option<String>,
}

/// A manual cash entry in a driver's account.
///
/// Normally only one of `got` / `gave` is non-zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverAccount {
    /// Entry identifier.
    pub id: AccountEntryId,
    /// Driver the entry belongs to.
    pub driver_id: DriverId,
    /// Cash received back from the driver.
    #[serde(default)]
    pub got: Option<Decimal>,
    /// Cash handed to the driver.
    #[serde(default)]
    pub gave: Option<Decimal>,
    /// Entry date.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Reason for the entry.
    #[serde(default)]
    pub reason: String,
}
