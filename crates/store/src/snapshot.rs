//! The full record set and its per-user views.

use std::collections::HashSet;

use haulbook_core::expense::Expense;
use haulbook_core::fleet::{Driver, DriverAccount, Party, Supplier, SupplierAccount, Truck};
use haulbook_core::trip::{PartyPayment, Trip, TripCharge};
use haulbook_shared::types::{DriverId, PartyId, SupplierId, TripId, UserId};
use serde::{Deserialize, Serialize};

/// Every record the store holds, across all users.
///
/// Trips, expenses, trucks and master records carry their owner directly.
/// Charges, payments and account entries are owned through their parent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FleetSnapshot {
    /// Trips.
    pub trips: Vec<Trip>,
    /// Charges raised against trips.
    pub trip_charges: Vec<TripCharge>,
    /// Payments received from parties.
    pub party_payments: Vec<PartyPayment>,
    /// Payments made to suppliers.
    pub supplier_accounts: Vec<SupplierAccount>,
    /// Manual driver got/gave entries.
    pub driver_accounts: Vec<DriverAccount>,
    /// Expenses.
    pub expenses: Vec<Expense>,
    /// Trucks.
    pub trucks: Vec<Truck>,
    /// Drivers.
    pub drivers: Vec<Driver>,
    /// Suppliers.
    pub suppliers: Vec<Supplier>,
    /// Parties.
    pub parties: Vec<Party>,
}

impl FleetSnapshot {
    pub(crate) fn trip_ids(&self, user: &UserId) -> HashSet<&TripId> {
        self.trips
            .iter()
            .filter(|t| &t.user_id == user)
            .map(|t| &t.id)
            .collect()
    }

    pub(crate) fn party_ids(&self, user: &UserId) -> HashSet<&PartyId> {
        self.parties
            .iter()
            .filter(|p| &p.user_id == user)
            .map(|p| &p.id)
            .collect()
    }

    pub(crate) fn owns_driver(&self, user: &UserId, id: &DriverId) -> bool {
        self.drivers.iter().any(|d| &d.id == id && &d.user_id == user)
    }

    pub(crate) fn owns_supplier(&self, user: &UserId, id: &SupplierId) -> bool {
        self.suppliers.iter().any(|s| &s.id == id && &s.user_id == user)
    }

    pub(crate) fn owns_party(&self, user: &UserId, id: &PartyId) -> bool {
        self.parties.iter().any(|p| &p.id == id && &p.user_id == user)
    }

    pub(crate) fn owns_trip(&self, user: &UserId, id: &TripId) -> bool {
        self.trips.iter().any(|t| &t.id == id && &t.user_id == user)
    }

    /// The user's trips.
    #[must_use]
    pub fn trips_of(&self, user: &UserId) -> Vec<Trip> {
        self.trips
            .iter()
            .filter(|t| &t.user_id == user)
            .cloned()
            .collect()
    }

    /// Charges on the user's trips.
    #[must_use]
    pub fn charges_of(&self, user: &UserId) -> Vec<TripCharge> {
        let trips = self.trip_ids(user);
        self.trip_charges
            .iter()
            .filter(|c| trips.contains(&c.trip_id))
            .cloned()
            .collect()
    }

    /// Payments from the user's parties or against the user's trips.
    #[must_use]
    pub fn payments_of(&self, user: &UserId) -> Vec<PartyPayment> {
        let trips = self.trip_ids(user);
        let parties = self.party_ids(user);
        self.party_payments
            .iter()
            .filter(|p| {
                parties.contains(&p.party_id)
                    || p.trip_id.as_ref().is_some_and(|id| trips.contains(id))
            })
            .cloned()
            .collect()
    }

    /// Payments made to the user's suppliers.
    #[must_use]
    pub fn supplier_accounts_of(&self, user: &UserId) -> Vec<SupplierAccount> {
        self.supplier_accounts
            .iter()
            .filter(|a| self.owns_supplier(user, &a.supplier_id))
            .cloned()
            .collect()
    }

    /// Manual entries of the user's drivers.
    #[must_use]
    pub fn driver_accounts_of(&self, user: &UserId) -> Vec<DriverAccount> {
        self.driver_accounts
            .iter()
            .filter(|a| self.owns_driver(user, &a.driver_id))
            .cloned()
            .collect()
    }

    /// The user's expenses.
    #[must_use]
    pub fn expenses_of(&self, user: &UserId) -> Vec<Expense> {
        self.expenses
            .iter()
            .filter(|e| &e.user_id == user)
            .cloned()
            .collect()
    }

    /// The user's trucks.
    #[must_use]
    pub fn trucks_of(&self, user: &UserId) -> Vec<Truck> {
        self.trucks
            .iter()
            .filter(|t| &t.user_id == user)
            .cloned()
            .collect()
    }

    /// Removes a trip with its charges, allocated payments and expenses.
    pub(crate) fn remove_trip_cascade(&mut self, id: &TripId) -> Option<RemovedTrip> {
        let position = self.trips.iter().position(|t| &t.id == id)?;
        let trip = self.trips.remove(position);
        Some(RemovedTrip {
            trip,
            charges: drain_where(&mut self.trip_charges, |c| &c.trip_id == id),
            payments: drain_where(&mut self.party_payments, |p| p.trip_id.as_ref() == Some(id)),
            expenses: drain_where(&mut self.expenses, |e| e.trip_id.as_ref() == Some(id)),
        })
    }
}

/// A deleted trip with the records removed along with it.
#[derive(Debug, Clone)]
pub struct RemovedTrip {
    /// The trip itself.
    pub trip: Trip,
    /// Charges raised against the trip.
    pub charges: Vec<TripCharge>,
    /// Payments allocated to the trip.
    pub payments: Vec<PartyPayment>,
    /// Expenses booked against the trip.
    pub expenses: Vec<Expense>,
}

impl RemovedTrip {
    /// Drivers whose passbooks may have changed: the trip's driver, then any
    /// driver named on a removed payment or expense. Each appears once.
    #[must_use]
    pub fn affected_drivers(&self) -> Vec<&DriverId> {
        let mut seen = HashSet::new();
        std::iter::once(&self.trip.driver_id)
            .chain(self.payments.iter().filter_map(|p| p.driver_id.as_ref()))
            .chain(self.expenses.iter().filter_map(|e| e.driver_id.as_ref()))
            .filter(|id| seen.insert(*id))
            .collect()
    }
}

fn drain_where<T>(items: &mut Vec<T>, pred: impl Fn(&T) -> bool) -> Vec<T> {
    let (removed, kept) = std::mem::take(items).into_iter().partition(pred);
    *items = kept;
    removed
}
