//! Ledger entry domain types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Kind of transaction a ledger entry was normalized from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// Truck-hire cost of a supplier's trip.
    TruckHire,
    /// Payment made to a supplier.
    SupplierPayment,
    /// Manual got/gave entry in a driver's account.
    DriverAccount,
    /// Party payment collected in cash by a driver.
    DriverCollection,
    /// Expense paid by a driver.
    DriverExpense,
    /// Freight plus net charges of a party's trip.
    TripRevenue,
    /// Payment received from a party.
    PartyPayment,
}

/// A normalized, dated entry in a passbook with its running balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Transaction date.
    pub date: NaiveDate,
    /// Source kind.
    pub kind: EntryKind,
    /// Identifier of the source record.
    pub source_id: String,
    /// Human-readable description.
    pub description: String,
    /// Contribution to the balance (credit positive, debit negative).
    pub signed_amount: Decimal,
    /// Balance after this entry.
    pub running_balance: Decimal,
}

impl LedgerEntry {
    /// Debit column value (zero for credits).
    #[must_use]
    pub fn debit(&self) -> Decimal {
        if self.signed_amount.is_sign_negative() {
            -self.signed_amount
        } else {
            Decimal::ZERO
        }
    }

    /// Credit column value (zero for debits).
    #[must_use]
    pub fn credit(&self) -> Decimal {
        if self.signed_amount.is_sign_negative() {
            Decimal::ZERO
        } else {
            self.signed_amount
        }
    }
}
