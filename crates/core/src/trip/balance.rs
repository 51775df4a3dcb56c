//! Trip balance formula.
//!
//! `balance = amount + billable charges - payments - deductions`
//!
//! This is the only implementation of the formula. Trip detail, trip list,
//! accounts receivable, the party passbook and the monthly report all call
//! through here.

use std::collections::HashMap;

use haulbook_shared::types::{TripId, or_zero, sum_or_zero};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::{PartyPayment, Trip, TripCharge};

/// Charges partitioned by who bears them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeTotals {
    /// Charges billed to the party (`party_bill == true`).
    pub billable: Decimal,
    /// Charges absorbed against freight (`party_bill == false`).
    pub deductions: Decimal,
}

impl ChargeTotals {
    /// Partitions and sums charges. Missing amounts count as zero.
    #[must_use]
    pub fn from_charges<'a, I>(charges: I) -> Self
    where
        I: IntoIterator<Item = &'a TripCharge>,
    {
        charges
            .into_iter()
            .fold(Self::default(), |mut totals, charge| {
                let amount = or_zero(charge.amount);
                if charge.party_bill {
                    totals.billable += amount;
                } else {
                    totals.deductions += amount;
                }
                totals
            })
    }

    /// Billable minus deductions.
    #[must_use]
    pub fn net(&self) -> Decimal {
        self.billable - self.deductions
    }
}

/// Computes how much the party still owes for a trip.
#[must_use]
pub fn compute_trip_balance<'a, C, P>(amount: Option<Decimal>, charges: C, payments: P) -> Decimal
where
    C: IntoIterator<Item = &'a TripCharge>,
    P: IntoIterator<Item = &'a PartyPayment>,
{
    let charges = ChargeTotals::from_charges(charges);
    let paid = sum_or_zero(payments.into_iter().map(|p| p.amount));

    or_zero(amount) + charges.billable - paid - charges.deductions
}

/// Balance of one trip, as shown in the trip list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripBalance {
    /// Trip identifier.
    pub trip_id: TripId,
    /// Freight amount.
    pub amount: Decimal,
    /// Charge partition for the trip.
    pub charges: ChargeTotals,
    /// Total received from the party.
    pub paid: Decimal,
    /// Outstanding balance.
    pub balance: Decimal,
}

/// Charges and payments grouped by trip.
///
/// Records pointing at trips outside the given set are kept in the index but
/// never read.
#[derive(Debug, Default)]
pub struct TripIndex<'a> {
    charges: HashMap<&'a TripId, Vec<&'a TripCharge>>,
    payments: HashMap<&'a TripId, Vec<&'a PartyPayment>>,
}

impl<'a> TripIndex<'a> {
    /// Groups charges and trip-allocated payments by trip id.
    #[must_use]
    pub fn new(charges: &'a [TripCharge], payments: &'a [PartyPayment]) -> Self {
        let mut index = Self::default();
        for charge in charges {
            index.charges.entry(&charge.trip_id).or_default().push(charge);
        }
        for payment in payments {
            if let Some(trip_id) = &payment.trip_id {
                index.payments.entry(trip_id).or_default().push(payment);
            }
        }
        index
    }

    /// Charges raised against a trip.
    pub fn charges(&self, trip_id: &TripId) -> impl Iterator<Item = &'a TripCharge> + '_ {
        self.charges.get(trip_id).into_iter().flatten().copied()
    }

    /// Payments allocated to a trip.
    pub fn payments(&self, trip_id: &TripId) -> impl Iterator<Item = &'a PartyPayment> + '_ {
        self.payments.get(trip_id).into_iter().flatten().copied()
    }

    /// Computes the balance of one trip.
    #[must_use]
    pub fn balance_of(&self, trip: &Trip) -> TripBalance {
        let charges = ChargeTotals::from_charges(self.charges(&trip.id));
        let paid = sum_or_zero(self.payments(&trip.id).map(|p| p.amount));
        let balance =
            compute_trip_balance(trip.amount, self.charges(&trip.id), self.payments(&trip.id));

        TripBalance {
            trip_id: trip.id.clone(),
            amount: or_zero(trip.amount),
            charges,
            paid,
            balance,
        }
    }
}

/// Computes balances for a list of trips, preserving trip order.
#[must_use]
pub fn trip_balances(
    trips: &[Trip],
    charges: &[TripCharge],
    payments: &[PartyPayment],
) -> Vec<TripBalance> {
    let index = TripIndex::new(charges, payments);
    trips.iter().map(|trip| index.balance_of(trip)).collect()
}
