//! The record store seam.

use async_trait::async_trait;
use haulbook_core::expense::Expense;
use haulbook_core::fleet::{Driver, DriverAccount, Party, Supplier, SupplierAccount, Truck};
use haulbook_core::trip::{PartyPayment, Trip, TripCharge};
use haulbook_shared::types::{
    AccountEntryId, ChargeId, DriverId, PartyId, PaymentId, SupplierId, TripId, UserId,
};
use rust_decimal::Decimal;

use crate::error::StoreResult;
use crate::snapshot::RemovedTrip;

/// Record-set reads and source-record mutations, scoped to one user.
///
/// Reads return whole record sets. Balances are never patched in place by
/// callers; they are rebuilt from the ledger and written back with
/// [`FleetStore::set_driver_balance`] and [`FleetStore::set_supplier_balance`].
#[async_trait]
pub trait FleetStore: Send + Sync {
    /// The user's trips.
    async fn trips(&self, user: &UserId) -> StoreResult<Vec<Trip>>;

    /// One trip.
    async fn trip(&self, user: &UserId, id: &TripId) -> StoreResult<Trip>;

    /// Charges on the user's trips.
    async fn trip_charges(&self, user: &UserId) -> StoreResult<Vec<TripCharge>>;

    /// Payments from the user's parties or against the user's trips.
    async fn party_payments(&self, user: &UserId) -> StoreResult<Vec<PartyPayment>>;

    /// Payments made to the user's suppliers.
    async fn supplier_accounts(&self, user: &UserId) -> StoreResult<Vec<SupplierAccount>>;

    /// Manual entries of the user's drivers.
    async fn driver_accounts(&self, user: &UserId) -> StoreResult<Vec<DriverAccount>>;

    /// The user's expenses.
    async fn expenses(&self, user: &UserId) -> StoreResult<Vec<Expense>>;

    /// The user's trucks.
    async fn trucks(&self, user: &UserId) -> StoreResult<Vec<Truck>>;

    /// One driver.
    async fn driver(&self, user: &UserId, id: &DriverId) -> StoreResult<Driver>;

    /// One supplier.
    async fn supplier(&self, user: &UserId, id: &SupplierId) -> StoreResult<Supplier>;

    /// One party.
    async fn party(&self, user: &UserId, id: &PartyId) -> StoreResult<Party>;

    /// Records a payment to a supplier.
    async fn add_supplier_account(&self, user: &UserId, entry: SupplierAccount)
    -> StoreResult<()>;

    /// Removes a supplier payment.
    async fn delete_supplier_account(
        &self,
        user: &UserId,
        supplier_id: &SupplierId,
        id: &AccountEntryId,
    ) -> StoreResult<SupplierAccount>;

    /// Records a manual driver entry.
    async fn add_driver_account(&self, user: &UserId, entry: DriverAccount) -> StoreResult<()>;

    /// Removes a manual driver entry.
    async fn delete_driver_account(
        &self,
        user: &UserId,
        driver_id: &DriverId,
        id: &AccountEntryId,
    ) -> StoreResult<DriverAccount>;

    /// Records a payment from a party.
    async fn add_party_payment(&self, user: &UserId, payment: PartyPayment) -> StoreResult<()>;

    /// Removes a party payment.
    async fn delete_party_payment(
        &self,
        user: &UserId,
        party_id: &PartyId,
        id: &PaymentId,
    ) -> StoreResult<PartyPayment>;

    /// Removes a charge from a trip.
    async fn delete_trip_charge(
        &self,
        user: &UserId,
        trip_id: &TripId,
        id: &ChargeId,
    ) -> StoreResult<TripCharge>;

    /// Removes a trip with its charges, allocated payments and expenses.
    /// Returns the trip together with every record removed with it.
    async fn delete_trip(&self, user: &UserId, id: &TripId) -> StoreResult<RemovedTrip>;

    /// Writes a driver's cached balance.
    async fn set_driver_balance(
        &self,
        user: &UserId,
        id: &DriverId,
        balance: Decimal,
    ) -> StoreResult<()>;

    /// Writes a supplier's cached balance.
    async fn set_supplier_balance(
        &self,
        user: &UserId,
        id: &SupplierId,
        balance: Decimal,
    ) -> StoreResult<()>;
}
