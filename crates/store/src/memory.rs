//! Snapshot-backed in-process store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use haulbook_core::expense::Expense;
use haulbook_core::fleet::{Driver, DriverAccount, Party, Supplier, SupplierAccount, Truck};
use haulbook_core::trip::{PartyPayment, Trip, TripCharge};
use haulbook_shared::types::{
    AccountEntryId, ChargeId, DriverId, PartyId, PaymentId, SupplierId, TripId, UserId,
};
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};
use crate::snapshot::{FleetSnapshot, RemovedTrip};
use crate::traits::FleetStore;

/// Holds the whole record set in memory behind a read-write lock.
///
/// When opened from a file, every successful mutation rewrites the file
/// while the write lock is still held, so writes reach disk in order.
/// A mutation becomes visible only after its file write succeeds.
#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshot: RwLock<FleetSnapshot>,
    path: Option<PathBuf>,
}

impl MemoryStore {
    /// Creates a store over a snapshot without a backing file.
    #[must_use]
    pub fn new(snapshot: FleetSnapshot) -> Self {
        Self {
            snapshot: RwLock::new(snapshot),
            path: None,
        }
    }

    /// Opens a store backed by a JSON snapshot file. A missing file starts
    /// an empty store that is written on the first mutation.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let snapshot = match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let snapshot: FleetSnapshot = serde_json::from_slice(&bytes)?;
                info!(
                    path = %path.display(),
                    trips = snapshot.trips.len(),
                    expenses = snapshot.expenses.len(),
                    "Loaded snapshot"
                );
                snapshot
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "Snapshot not found, starting empty");
                FleetSnapshot::default()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            snapshot: RwLock::new(snapshot),
            path: Some(path),
        })
    }

    /// Writes a snapshot as pretty JSON, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub async fn save(path: &Path, snapshot: &FleetSnapshot) -> StoreResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let bytes = serde_json::to_vec_pretty(snapshot)?;
        tokio::fs::write(path, bytes).await?;
        Ok(())
    }

    /// Copy of the current record set.
    pub async fn snapshot(&self) -> FleetSnapshot {
        self.snapshot.read().await.clone()
    }

    async fn read<T>(&self, f: impl FnOnce(&FleetSnapshot) -> T) -> T {
        let guard = self.snapshot.read().await;
        f(&guard)
    }

    async fn mutate<T>(
        &self,
        f: impl FnOnce(&mut FleetSnapshot) -> StoreResult<T>,
    ) -> StoreResult<T> {
        let mut guard = self.snapshot.write().await;
        let mut next = guard.clone();
        let value = f(&mut next)?;
        if let Some(path) = &self.path {
            Self::save(path, &next).await?;
            debug!(path = %path.display(), "Persisted snapshot");
        }
        *guard = next;
        Ok(value)
    }
}

fn check_trip(s: &FleetSnapshot, user: &UserId, trip_id: Option<&TripId>) -> StoreResult<()> {
    match trip_id {
        Some(id) if !s.owns_trip(user, id) => Err(StoreError::not_found("trip", id)),
        _ => Ok(()),
    }
}

#[async_trait]
impl FleetStore for MemoryStore {
    async fn trips(&self, user: &UserId) -> StoreResult<Vec<Trip>> {
        Ok(self.read(|s| s.trips_of(user)).await)
    }

    async fn trip(&self, user: &UserId, id: &TripId) -> StoreResult<Trip> {
        self.read(|s| {
            s.trips
                .iter()
                .find(|t| &t.id == id && &t.user_id == user)
                .cloned()
        })
        .await
        .ok_or_else(|| StoreError::not_found("trip", id))
    }

    async fn trip_charges(&self, user: &UserId) -> StoreResult<Vec<TripCharge>> {
        Ok(self.read(|s| s.charges_of(user)).await)
    }

    async fn party_payments(&self, user: &UserId) -> StoreResult<Vec<PartyPayment>> {
        Ok(self.read(|s| s.payments_of(user)).await)
    }

    async fn supplier_accounts(&self, user: &UserId) -> StoreResult<Vec<SupplierAccount>> {
        Ok(self.read(|s| s.supplier_accounts_of(user)).await)
    }

    async fn driver_accounts(&self, user: &UserId) -> StoreResult<Vec<DriverAccount>> {
        Ok(self.read(|s| s.driver_accounts_of(user)).await)
    }

    async fn expenses(&self, user: &UserId) -> StoreResult<Vec<Expense>> {
        Ok(self.read(|s| s.expenses_of(user)).await)
    }

    async fn trucks(&self, user: &UserId) -> StoreResult<Vec<Truck>> {
        Ok(self.read(|s| s.trucks_of(user)).await)
    }

    async fn driver(&self, user: &UserId, id: &DriverId) -> StoreResult<Driver> {
        self.read(|s| {
            s.drivers
                .iter()
                .find(|d| &d.id == id && &d.user_id == user)
                .cloned()
        })
        .await
        .ok_or_else(|| StoreError::not_found("driver", id))
    }

    async fn supplier(&self, user: &UserId, id: &SupplierId) -> StoreResult<Supplier> {
        self.read(|s| {
            s.suppliers
                .iter()
                .find(|x| &x.id == id && &x.user_id == user)
                .cloned()
        })
        .await
        .ok_or_else(|| StoreError::not_found("supplier", id))
    }

    async fn party(&self, user: &UserId, id: &PartyId) -> StoreResult<Party> {
        self.read(|s| {
            s.parties
                .iter()
                .find(|p| &p.id == id && &p.user_id == user)
                .cloned()
        })
        .await
        .ok_or_else(|| StoreError::not_found("party", id))
    }

    async fn add_supplier_account(
        &self,
        user: &UserId,
        entry: SupplierAccount,
    ) -> StoreResult<()> {
        self.mutate(|s| {
            if !s.owns_supplier(user, &entry.supplier_id) {
                return Err(StoreError::not_found("supplier", &entry.supplier_id));
            }
            check_trip(s, user, entry.trip_id.as_ref())?;
            if s.supplier_accounts.iter().any(|a| a.id == entry.id) {
                return Err(StoreError::Duplicate {
                    entity: "supplier account",
                    id: entry.id.to_string(),
                });
            }
            s.supplier_accounts.push(entry);
            Ok(())
        })
        .await
    }

    async fn delete_supplier_account(
        &self,
        user: &UserId,
        supplier_id: &SupplierId,
        id: &AccountEntryId,
    ) -> StoreResult<SupplierAccount> {
        self.mutate(|s| {
            if !s.owns_supplier(user, supplier_id) {
                return Err(StoreError::not_found("supplier", supplier_id));
            }
            let position = s
                .supplier_accounts
                .iter()
                .position(|a| &a.id == id && &a.supplier_id == supplier_id)
                .ok_or_else(|| StoreError::not_found("supplier account", id))?;
            Ok(s.supplier_accounts.remove(position))
        })
        .await
    }

    async fn add_driver_account(&self, user: &UserId, entry: DriverAccount) -> StoreResult<()> {
        self.mutate(|s| {
            if !s.owns_driver(user, &entry.driver_id) {
                return Err(StoreError::not_found("driver", &entry.driver_id));
            }
            if s.driver_accounts.iter().any(|a| a.id == entry.id) {
                return Err(StoreError::Duplicate {
                    entity: "driver account",
                    id: entry.id.to_string(),
                });
            }
            s.driver_accounts.push(entry);
            Ok(())
        })
        .await
    }

    async fn delete_driver_account(
        &self,
        user: &UserId,
        driver_id: &DriverId,
        id: &AccountEntryId,
    ) -> StoreResult<DriverAccount> {
        self.mutate(|s| {
            if !s.owns_driver(user, driver_id) {
                return Err(StoreError::not_found("driver", driver_id));
            }
            let position = s
                .driver_accounts
                .iter()
                .position(|a| &a.id == id && &a.driver_id == driver_id)
                .ok_or_else(|| StoreError::not_found("driver account", id))?;
            Ok(s.driver_accounts.remove(position))
        })
        .await
    }

    async fn add_party_payment(&self, user: &UserId, payment: PartyPayment) -> StoreResult<()> {
        self.mutate(|s| {
            if !s.owns_party(user, &payment.party_id) {
                return Err(StoreError::not_found("party", &payment.party_id));
            }
            check_trip(s, user, payment.trip_id.as_ref())?;
            if let Some(driver_id) = &payment.driver_id
                && !s.owns_driver(user, driver_id)
            {
                return Err(StoreError::not_found("driver", driver_id));
            }
            if s.party_payments.iter().any(|p| p.id == payment.id) {
                return Err(StoreError::Duplicate {
                    entity: "party payment",
                    id: payment.id.to_string(),
                });
            }
            s.party_payments.push(payment);
            Ok(())
        })
        .await
    }

    async fn delete_party_payment(
        &self,
        user: &UserId,
        party_id: &PartyId,
        id: &PaymentId,
    ) -> StoreResult<PartyPayment> {
        self.mutate(|s| {
            if !s.owns_party(user, party_id) {
                return Err(StoreError::not_found("party", party_id));
            }
            let position = s
                .party_payments
                .iter()
                .position(|p| &p.id == id && &p.party_id == party_id)
                .ok_or_else(|| StoreError::not_found("party payment", id))?;
            Ok(s.party_payments.remove(position))
        })
        .await
    }

    async fn delete_trip_charge(
        &self,
        user: &UserId,
        trip_id: &TripId,
        id: &ChargeId,
    ) -> StoreResult<TripCharge> {
        self.mutate(|s| {
            check_trip(s, user, Some(trip_id))?;
            let position = s
                .trip_charges
                .iter()
                .position(|c| &c.id == id && &c.trip_id == trip_id)
                .ok_or_else(|| StoreError::not_found("trip charge", id))?;
            Ok(s.trip_charges.remove(position))
        })
        .await
    }

    async fn delete_trip(&self, user: &UserId, id: &TripId) -> StoreResult<RemovedTrip> {
        self.mutate(|s| {
            check_trip(s, user, Some(id))?;
            s.remove_trip_cascade(id)
                .ok_or_else(|| StoreError::not_found("trip", id))
        })
        .await
    }

    async fn set_driver_balance(
        &self,
        user: &UserId,
        id: &DriverId,
        balance: Decimal,
    ) -> StoreResult<()> {
        self.mutate(|s| {
            let driver = s
                .drivers
                .iter_mut()
                .find(|d| &d.id == id && &d.user_id == user)
                .ok_or_else(|| StoreError::not_found("driver", id))?;
            driver.balance = balance;
            Ok(())
        })
        .await
    }

    async fn set_supplier_balance(
        &self,
        user: &UserId,
        id: &SupplierId,
        balance: Decimal,
    ) -> StoreResult<()> {
        self.mutate(|s| {
            let supplier = s
                .suppliers
                .iter_mut()
                .find(|x| &x.id == id && &x.user_id == user)
                .ok_or_else(|| StoreError::not_found("supplier", id))?;
            supplier.balance = balance;
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use haulbook_core::trip::TripStatus;
    use haulbook_shared::types::{ExpenseId, TruckId};
    use rust_decimal_macros::dec;

    fn user() -> UserId {
        UserId::new("u1")
    }

    fn trip(id: &str, owner: &str) -> Trip {
        Trip {
            id: TripId::new(id),
            user_id: UserId::new(owner),
            amount: Some(dec!(10000)),
            start_date: NaiveDate::from_ymd_opt(2024, 6, 1),
            party_id: PartyId::new(if owner == "u1" { "p1" } else { "p9" }),
            driver_id: DriverId::new("d1"),
            truck_id: TruckId::new("TRK1"),
            supplier_id: Some(SupplierId::new("s1")),
            truck_hire_cost: Some(dec!(7000)),
            status: TripStatus::Started,
        }
    }

    fn payment(id: &str, party: &str, trip: Option<&str>) -> PartyPayment {
        PartyPayment {
            id: PaymentId::new(id),
            trip_id: trip.map(TripId::new),
            party_id: PartyId::new(party),
            amount: Some(dec!(1000)),
            date: NaiveDate::from_ymd_opt(2024, 6, 2),
            payment_type: "Advance".to_string(),
            driver_id: None,
        }
    }

    fn fixture() -> FleetSnapshot {
        FleetSnapshot {
            trips: vec![trip("t1", "u1"), trip("t2", "u2")],
            trip_charges: vec![
                TripCharge {
                    id: ChargeId::new("c1"),
                    trip_id: TripId::new("t1"),
                    amount: Some(dec!(500)),
                    party_bill: true,
                    expense_type: "Detention".to_string(),
                    date: None,
                },
                TripCharge {
                    id: ChargeId::new("c2"),
                    trip_id: TripId::new("t2"),
                    amount: Some(dec!(500)),
                    party_bill: true,
                    expense_type: "Detention".to_string(),
                    date: None,
                },
            ],
            party_payments: vec![
                payment("pp1", "p1", Some("t1")),
                payment("pp2", "p1", None),
                payment("pp3", "p9", Some("t2")),
            ],
            expenses: vec![Expense {
                id: ExpenseId::new("e1"),
                user_id: user(),
                amount: Some(dec!(300)),
                date: NaiveDate::from_ymd_opt(2024, 6, 3),
                expense_type: "Toll".to_string(),
                trip_id: Some(TripId::new("t1")),
                truck_id: None,
                driver_id: None,
                notes: None,
            }],
            drivers: vec![Driver {
                id: DriverId::new("d1"),
                user_id: user(),
                name: "Ravi".to_string(),
                balance: Decimal::ZERO,
            }],
            suppliers: vec![Supplier {
                id: SupplierId::new("s1"),
                user_id: user(),
                name: "Market Carriers".to_string(),
                balance: Decimal::ZERO,
            }],
            parties: vec![Party {
                id: PartyId::new("p1"),
                user_id: user(),
                name: "Acme Cement".to_string(),
            }],
            ..FleetSnapshot::default()
        }
    }

    fn supplier_payment(id: &str, supplier: &str) -> SupplierAccount {
        SupplierAccount {
            id: AccountEntryId::new(id),
            supplier_id: SupplierId::new(supplier),
            trip_id: None,
            amount: Some(dec!(2000)),
            date: NaiveDate::from_ymd_opt(2024, 6, 4),
            payment_mode: Some("Bank".to_string()),
        }
    }

    #[tokio::test]
    async fn test_reads_are_scoped_to_user() {
        let store = MemoryStore::new(fixture());

        let trips = store.trips(&user()).await.unwrap();
        assert_eq!(trips.len(), 1);
        assert_eq!(store.trip_charges(&user()).await.unwrap().len(), 1);

        let payments = store.party_payments(&user()).await.unwrap();
        let ids: Vec<&str> = payments.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["pp1", "pp2"]);

        assert!(matches!(
            store.trip(&user(), &TripId::new("t2")).await,
            Err(StoreError::NotFound { entity: "trip", .. })
        ));
    }

    #[tokio::test]
    async fn test_supplier_account_add_and_delete() {
        let store = MemoryStore::new(fixture());

        store
            .add_supplier_account(&user(), supplier_payment("sa1", "s1"))
            .await
            .unwrap();
        assert_eq!(store.supplier_accounts(&user()).await.unwrap().len(), 1);

        assert!(matches!(
            store
                .add_supplier_account(&user(), supplier_payment("sa1", "s1"))
                .await,
            Err(StoreError::Duplicate { .. })
        ));
        assert!(matches!(
            store
                .add_supplier_account(&user(), supplier_payment("sa2", "s404"))
                .await,
            Err(StoreError::NotFound { entity: "supplier", .. })
        ));

        let removed = store
            .delete_supplier_account(&user(), &SupplierId::new("s1"), &AccountEntryId::new("sa1"))
            .await
            .unwrap();
        assert_eq!(removed.amount, Some(dec!(2000)));
        assert!(store.supplier_accounts(&user()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_trip_cascades() {
        let mut snapshot = fixture();
        snapshot.party_payments[0].driver_id = Some(DriverId::new("d2"));
        snapshot.expenses[0].driver_id = Some(DriverId::new("d1"));
        let store = MemoryStore::new(snapshot);

        let removed = store.delete_trip(&user(), &TripId::new("t1")).await.unwrap();
        assert_eq!(removed.trip.id.as_str(), "t1");
        assert_eq!(removed.charges.len(), 1);
        assert_eq!(removed.payments.len(), 1);
        assert_eq!(removed.expenses.len(), 1);
        let drivers: Vec<&str> = removed.affected_drivers().iter().map(|d| d.as_str()).collect();
        assert_eq!(drivers, ["d1", "d2"]);

        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.trips.len(), 1);
        assert!(snapshot.trip_charges.iter().all(|c| c.trip_id.as_str() != "t1"));
        let payment_ids: Vec<&str> =
            snapshot.party_payments.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(payment_ids, ["pp2", "pp3"]);
        assert!(snapshot.expenses.is_empty());
    }

    #[tokio::test]
    async fn test_cached_balance_write_back() {
        let store = MemoryStore::new(fixture());

        store
            .set_supplier_balance(&user(), &SupplierId::new("s1"), dec!(-5000))
            .await
            .unwrap();
        store
            .set_driver_balance(&user(), &DriverId::new("d1"), dec!(1250))
            .await
            .unwrap();

        let supplier = store.supplier(&user(), &SupplierId::new("s1")).await.unwrap();
        let driver = store.driver(&user(), &DriverId::new("d1")).await.unwrap();
        assert_eq!(supplier.balance, dec!(-5000));
        assert_eq!(driver.balance, dec!(1250));
        assert!(
            store
                .set_driver_balance(&UserId::new("u2"), &DriverId::new("d1"), dec!(1))
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn test_open_missing_file_then_persist() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("snapshot.json");

        let store = MemoryStore::open(&path).await.unwrap();
        assert!(store.snapshot().await.trips.is_empty());

        MemoryStore::save(&path, &fixture()).await.unwrap();
        let store = MemoryStore::open(&path).await.unwrap();
        store
            .add_supplier_account(&user(), supplier_payment("sa1", "s1"))
            .await
            .unwrap();

        let reopened = MemoryStore::open(&path).await.unwrap();
        assert_eq!(reopened.supplier_accounts(&user()).await.unwrap().len(), 1);
        assert_eq!(reopened.trips(&user()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_persist_leaves_records_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data");
        let path = data.join("snapshot.json");
        MemoryStore::save(&path, &fixture()).await.unwrap();
        let store = MemoryStore::open(&path).await.unwrap();

        std::fs::remove_dir_all(&data).unwrap();
        std::fs::write(&data, b"").unwrap();

        assert!(matches!(
            store
                .add_supplier_account(&user(), supplier_payment("sa1", "s1"))
                .await,
            Err(StoreError::Io(_))
        ));
        assert!(store.supplier_accounts(&user()).await.unwrap().is_empty());
        assert!(store.snapshot().await.supplier_accounts.is_empty());
    }

    #[tokio::test]
    async fn test_open_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        tokio::fs::write(&path, b"{ not json").await.unwrap();

        assert!(matches!(
            MemoryStore::open(&path).await,
            Err(StoreError::Malformed(_))
        ));
    }
}
