//! Normalization of source records into ledger entries.
//!
//! Sign convention, applied to every passbook: a positive amount is a credit
//! to the entity's passbook and a negative amount is a debit.
//!
//! | Source                      | Passbook | Sign                       |
//! |-----------------------------|----------|----------------------------|
//! | Trip truck-hire cost        | supplier | `-truck_hire_cost`         |
//! | `SupplierAccount` payment   | supplier | `+amount`                  |
//! | `DriverAccount` entry       | driver   | `gave - got`               |
//! | Payment collected by driver | driver   | `+amount`                  |
//! | Expense paid by driver      | driver   | `-amount`                  |
//! | Trip revenue                | party    | `+(amount + billable - deductions)` |
//! | Party payment               | party    | `-amount`                  |
//!
//! A negative supplier balance is money still owed to the supplier. A
//! positive driver balance is company cash held by the driver. A positive
//! party balance is money the party still owes.

use chrono::NaiveDate;
use haulbook_shared::types::or_zero;
use rust_decimal::Decimal;

use super::entry::EntryKind;
use crate::expense::Expense;
use crate::fleet::{DriverAccount, SupplierAccount};
use crate::trip::{PartyPayment, Trip, TripCharge, compute_trip_balance};

/// A source record tagged with the passbook role it plays.
#[derive(Debug, Clone)]
pub enum SourceRecord<'a> {
    /// Truck-hire debit derived from a supplier's trip.
    TruckHire(&'a Trip),
    /// Payment made to a supplier.
    SupplierPayment(&'a SupplierAccount),
    /// Manual got/gave entry.
    DriverAccount(&'a DriverAccount),
    /// Party payment collected by a driver.
    DriverCollection(&'a PartyPayment),
    /// Expense paid by a driver.
    DriverExpense(&'a Expense),
    /// Revenue of a party's trip with the charges raised on it.
    TripRevenue {
        /// The trip.
        trip: &'a Trip,
        /// Charges raised against the trip.
        charges: Vec<&'a TripCharge>,
    },
    /// Payment received from a party.
    PartyPayment(&'a PartyPayment),
}

/// One independently sourced list of records.
pub type TransactionStream<'a> = Vec<SourceRecord<'a>>;

/// A source record in the common ledger shape, before sorting and folding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    /// Date, if the record carries a usable one.
    pub date: Option<NaiveDate>,
    /// Source kind.
    pub kind: EntryKind,
    /// Identifier of the source record.
    pub source_id: String,
    /// Human-readable description.
    pub description: String,
    /// Signed contribution to the balance.
    pub signed_amount: Decimal,
}

impl SourceRecord<'_> {
    /// Maps the record into the common entry shape.
    #[must_use]
    pub fn normalize(&self) -> SourceEntry {
        match self {
            Self::TruckHire(trip) => SourceEntry {
                date: trip.start_date,
                kind: EntryKind::TruckHire,
                source_id: trip.id.to_string(),
                description: format!("Truck hire for trip {}", trip.id),
                signed_amount: -or_zero(trip.truck_hire_cost),
            },
            Self::SupplierPayment(account) => SourceEntry {
                date: account.date,
                kind: EntryKind::SupplierPayment,
                source_id: account.id.to_string(),
                description: match &account.payment_mode {
                    Some(mode) => format!("Payment to supplier ({mode})"),
                    None => "Payment to supplier".to_string(),
                },
                signed_amount: or_zero(account.amount),
            },
            Self::DriverAccount(account) => SourceEntry {
                date: account.date,
                kind: EntryKind::DriverAccount,
                source_id: account.id.to_string(),
                description: if account.reason.trim().is_empty() {
                    "Driver account entry".to_string()
                } else {
                    account.reason.clone()
                },
                signed_amount: or_zero(account.gave) - or_zero(account.got),
            },
            Self::DriverCollection(payment) => SourceEntry {
                date: payment.date,
                kind: EntryKind::DriverCollection,
                source_id: payment.id.to_string(),
                description: match &payment.trip_id {
                    Some(trip_id) => {
                        format!("Collected {} for trip {trip_id}", payment.payment_type)
                    }
                    None => format!("Collected {}", payment.payment_type),
                },
                signed_amount: or_zero(payment.amount),
            },
            Self::DriverExpense(expense) => SourceEntry {
                date: expense.date,
                kind: EntryKind::DriverExpense,
                source_id: expense.id.to_string(),
                description: format!("{} expense", expense.expense_type),
                signed_amount: -or_zero(expense.amount),
            },
            Self::TripRevenue { trip, charges } => SourceEntry {
                date: trip.start_date,
                kind: EntryKind::TripRevenue,
                source_id: trip.id.to_string(),
                description: format!("Freight for trip {}", trip.id),
                signed_amount: compute_trip_balance(
                    trip.amount,
                    charges.iter().copied(),
                    std::iter::empty(),
                ),
            },
            Self::PartyPayment(payment) => SourceEntry {
                date: payment.date,
                kind: EntryKind::PartyPayment,
                source_id: payment.id.to_string(),
                description: match &payment.trip_id {
                    Some(trip_id) => {
                        format!("{} received for trip {trip_id}", payment.payment_type)
                    }
                    None => format!("{} received", payment.payment_type),
                },
                signed_amount: -or_zero(payment.amount),
            },
        }
    }
}
