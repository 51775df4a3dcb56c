//! Per-entity passbooks.
//!
//! Each builder selects the entity's records, tags them by role and hands the
//! streams to [`build_ledger`]. Stream order decides ties on equal dates.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use haulbook_shared::types::{DriverId, PartyId, SupplierId, TripId};
use serde::{Deserialize, Serialize};

use super::engine::{DisplayOrder, Ledger, build_ledger};
use super::error::LedgerError;
use super::source::{SourceRecord, TransactionStream};
use crate::expense::Expense;
use crate::fleet::{DriverAccount, SupplierAccount};
use crate::trip::{PartyPayment, Trip, TripCharge, TripIndex};

/// Entity a passbook belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    /// Driver passbook.
    Driver,
    /// Supplier (market truck owner) passbook.
    Supplier,
    /// Party (customer) passbook.
    Party,
}

impl EntityType {
    /// Lowercase name used in routes.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Driver => "driver",
            Self::Supplier => "supplier",
            Self::Party => "party",
        }
    }

    /// Order the passbook is shown in. Drivers read newest first.
    #[must_use]
    pub const fn display_order(self) -> DisplayOrder {
        match self {
            Self::Driver => DisplayOrder::Descending,
            Self::Supplier | Self::Party => DisplayOrder::Ascending,
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "driver" => Ok(Self::Driver),
            "supplier" => Ok(Self::Supplier),
            "party" => Ok(Self::Party),
            _ => Err(LedgerError::UnknownEntityType(s.to_string())),
        }
    }
}

/// Supplier passbook: truck hire of the supplier's trips, then payments.
#[must_use]
pub fn supplier_ledger(
    supplier_id: &SupplierId,
    trips: &[Trip],
    accounts: &[SupplierAccount],
) -> Ledger {
    let hires: TransactionStream<'_> = trips
        .iter()
        .filter(|t| t.supplier_id.as_ref() == Some(supplier_id))
        .map(SourceRecord::TruckHire)
        .collect();
    let paid: TransactionStream<'_> = accounts
        .iter()
        .filter(|a| &a.supplier_id == supplier_id)
        .map(SourceRecord::SupplierPayment)
        .collect();

    build_ledger([hires, paid])
}

/// Driver passbook: manual entries, collections, then expenses.
#[must_use]
pub fn driver_ledger(
    driver_id: &DriverId,
    accounts: &[DriverAccount],
    payments: &[PartyPayment],
    expenses: &[Expense],
) -> Ledger {
    let manual: TransactionStream<'_> = accounts
        .iter()
        .filter(|a| &a.driver_id == driver_id)
        .map(SourceRecord::DriverAccount)
        .collect();
    let collected: TransactionStream<'_> = payments
        .iter()
        .filter(|p| p.driver_id.as_ref() == Some(driver_id))
        .map(SourceRecord::DriverCollection)
        .collect();
    let spent: TransactionStream<'_> = expenses
        .iter()
        .filter(|e| e.driver_id.as_ref() == Some(driver_id))
        .map(SourceRecord::DriverExpense)
        .collect();

    build_ledger([manual, collected, spent])
}

/// Party passbook: trip revenue, then payments.
///
/// A payment belongs to the party when it names the party or is allocated to
/// one of the party's trips.
#[must_use]
pub fn party_ledger(
    party_id: &PartyId,
    trips: &[Trip],
    charges: &[TripCharge],
    payments: &[PartyPayment],
) -> Ledger {
    let index = TripIndex::new(charges, payments);
    let party_trips: Vec<&Trip> = trips.iter().filter(|t| &t.party_id == party_id).collect();
    let trip_ids: HashSet<&TripId> = party_trips.iter().map(|t| &t.id).collect();

    let revenue: TransactionStream<'_> = party_trips
        .iter()
        .copied()
        .map(|trip| SourceRecord::TripRevenue {
            trip,
            charges: index.charges(&trip.id).collect(),
        })
        .collect();
    let received: TransactionStream<'_> = payments
        .iter()
        .filter(|p| {
            &p.party_id == party_id || p.trip_id.as_ref().is_some_and(|id| trip_ids.contains(id))
        })
        .map(SourceRecord::PartyPayment)
        .collect();

    build_ledger([revenue, received])
}
