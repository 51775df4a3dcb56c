//! Running balances and the independently aggregated entity balances the
//! ledger fold is reconciled against.

use std::collections::HashSet;

use haulbook_shared::types::{DriverId, PartyId, SupplierId, TripId, or_zero, sum_or_zero};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::expense::Expense;
use crate::fleet::{DriverAccount, SupplierAccount};
use crate::trip::{PartyPayment, Trip, TripCharge, TripIndex};

/// Running balance at one position of a ledger.
///
/// - `previous_balance[N] = current_balance[N-1]`
/// - `current_balance[N] = previous_balance[N] + change[N]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunningBalance {
    /// 1-based position in the ledger.
    pub position: usize,
    /// Balance before this entry.
    pub previous_balance: Decimal,
    /// Balance after this entry.
    pub current_balance: Decimal,
}

impl RunningBalance {
    /// Running balance of the first entry of a ledger.
    #[must_use]
    pub fn first_entry(change: Decimal) -> Self {
        Self {
            position: 1,
            previous_balance: Decimal::ZERO,
            current_balance: change,
        }
    }

    /// Running balance of the entry after `previous`.
    #[must_use]
    pub fn next_entry(previous: &Self, change: Decimal) -> Self {
        Self {
            position: previous.position + 1,
            previous_balance: previous.current_balance,
            current_balance: previous.current_balance + change,
        }
    }

    /// Advances from an optional previous balance.
    #[must_use]
    pub fn advance(previous: Option<&Self>, change: Decimal) -> Self {
        match previous {
            Some(previous) => Self::next_entry(previous, change),
            None => Self::first_entry(change),
        }
    }
}

/// Supplier balance aggregated straight from records: payments made minus
/// truck-hire owed.
#[must_use]
pub fn supplier_outstanding(
    supplier_id: &SupplierId,
    trips: &[Trip],
    accounts: &[SupplierAccount],
) -> Decimal {
    let paid = sum_or_zero(
        accounts
            .iter()
            .filter(|a| &a.supplier_id == supplier_id)
            .map(|a| a.amount),
    );
    let hire = sum_or_zero(
        trips
            .iter()
            .filter(|t| t.supplier_id.as_ref() == Some(supplier_id))
            .map(|t| t.truck_hire_cost),
    );
    paid - hire
}

/// Driver balance aggregated straight from records: cash given minus cash
/// got back, plus collections, minus expenses the driver paid.
#[must_use]
pub fn driver_outstanding(
    driver_id: &DriverId,
    accounts: &[DriverAccount],
    payments: &[PartyPayment],
    expenses: &[Expense],
) -> Decimal {
    let (gave, got) = accounts
        .iter()
        .filter(|a| &a.driver_id == driver_id)
        .fold((Decimal::ZERO, Decimal::ZERO), |(gave, got), a| {
            (gave + or_zero(a.gave), got + or_zero(a.got))
        });
    let collected = sum_or_zero(
        payments
            .iter()
            .filter(|p| p.driver_id.as_ref() == Some(driver_id))
            .map(|p| p.amount),
    );
    let spent = sum_or_zero(
        expenses
            .iter()
            .filter(|e| e.driver_id.as_ref() == Some(driver_id))
            .map(|e| e.amount),
    );
    gave - got + collected - spent
}

/// Party balance aggregated from trip balances: the sum of the party's trip
/// balances, less payments from the party not allocated to one of its trips.
#[must_use]
pub fn party_outstanding(
    party_id: &PartyId,
    trips: &[Trip],
    charges: &[TripCharge],
    payments: &[PartyPayment],
) -> Decimal {
    let index = TripIndex::new(charges, payments);
    let party_trips: HashSet<&TripId> = trips
        .iter()
        .filter(|t| &t.party_id == party_id)
        .map(|t| &t.id)
        .collect();

    let trip_total: Decimal = trips
        .iter()
        .filter(|t| &t.party_id == party_id)
        .map(|t| index.balance_of(t).balance)
        .sum();
    let unallocated = sum_or_zero(
        payments
            .iter()
            .filter(|p| &p.party_id == party_id)
            .filter(|p| !p.trip_id.as_ref().is_some_and(|id| party_trips.contains(id)))
            .map(|p| p.amount),
    );
    trip_total - unallocated
}
