//! Receivable and profit calculations.

use std::collections::{HashMap, HashSet};

use haulbook_shared::types::{TripId, TruckId, or_zero, sum_or_zero};
use rust_decimal::Decimal;

use super::error::ReportError;
use super::types::{OwnershipReport, PartitionSummary};
use crate::expense::{Expense, ExpenseCategory, classify};
use crate::fiscal::CalendarMonth;
use crate::fleet::{Truck, TruckOwnership};
use crate::trip::{ChargeTotals, PartyPayment, Trip, TripCharge, TripIndex, trip_balances};

/// Service for receivable and profit reports.
pub struct ReportService;

impl ReportService {
    /// Validates a month/year pair from a request.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidMonth` when `month` is not 1 to 12.
    pub fn month(year: i32, month: u32) -> Result<CalendarMonth, ReportError> {
        CalendarMonth::new(year, month).ok_or(ReportError::InvalidMonth(month))
    }

    /// Sum of every trip balance. No status or date filter applies.
    #[must_use]
    pub fn total_receivable(
        trips: &[Trip],
        charges: &[TripCharge],
        payments: &[PartyPayment],
    ) -> Decimal {
        trip_balances(trips, charges, payments)
            .iter()
            .map(|b| b.balance)
            .sum()
    }

    /// Dashboard profit for a calendar month across all trucks:
    /// freight plus billable charges, less deductions, of trips started in
    /// the month, less every expense dated in the month.
    #[must_use]
    pub fn monthly_profit(
        trips: &[Trip],
        charges: &[TripCharge],
        expenses: &[Expense],
        month: CalendarMonth,
    ) -> Decimal {
        let in_month: Vec<&Trip> = trips
            .iter()
            .filter(|t| t.start_date.is_some_and(|d| month.contains(d)))
            .collect();
        let trip_ids: HashSet<&TripId> = in_month.iter().map(|t| &t.id).collect();

        let freight = sum_or_zero(in_month.iter().map(|t| t.amount));
        let totals =
            ChargeTotals::from_charges(charges.iter().filter(|c| trip_ids.contains(&c.trip_id)));
        let spent = sum_or_zero(
            expenses
                .iter()
                .filter(|e| e.date.is_some_and(|d| month.contains(d)))
                .map(|e| e.amount),
        );

        freight + totals.net() - spent
    }

    /// Monthly report with trips split by truck ownership.
    ///
    /// The self-owned partition carries the month's office expenses. The
    /// market partition carries the month's trip expenses whose trip ran on
    /// a market truck.
    #[must_use]
    pub fn ownership_report(
        trips: &[Trip],
        trucks: &[Truck],
        charges: &[TripCharge],
        expenses: &[Expense],
        month: CalendarMonth,
    ) -> OwnershipReport {
        let trucks: HashMap<&TruckId, &Truck> = trucks.iter().map(|t| (&t.id, t)).collect();
        let ownership_of: HashMap<&TripId, TruckOwnership> = trips
            .iter()
            .map(|t| (&t.id, Self::trip_ownership(t, &trucks)))
            .collect();
        let index = TripIndex::new(charges, &[]);

        let mut self_owned = PartitionSummary::default();
        let mut market = PartitionSummary::default();

        for trip in trips
            .iter()
            .filter(|t| t.start_date.is_some_and(|d| month.contains(d)))
        {
            let summary = match ownership_of.get(&trip.id) {
                Some(TruckOwnership::Market) => &mut market,
                _ => &mut self_owned,
            };
            let totals = ChargeTotals::from_charges(index.charges(&trip.id));
            summary.trip_count += 1;
            summary.freight += or_zero(trip.amount);
            summary.billable += totals.billable;
            summary.deductions += totals.deductions;
            summary.truck_hire += or_zero(trip.truck_hire_cost);
        }

        let mut total_expense = Decimal::ZERO;
        for expense in expenses
            .iter()
            .filter(|e| e.date.is_some_and(|d| month.contains(d)))
        {
            let amount = or_zero(expense.amount);
            total_expense += amount;
            match classify(expense) {
                ExpenseCategory::Office => self_owned.expenses += amount,
                ExpenseCategory::Trip => {
                    let on_market = expense
                        .trip_id
                        .as_ref()
                        .and_then(|id| ownership_of.get(id))
                        .is_some_and(|o| *o == TruckOwnership::Market);
                    if on_market {
                        market.expenses += amount;
                    }
                }
                ExpenseCategory::Truck => {}
            }
        }

        for summary in [&mut self_owned, &mut market] {
            summary.profit =
                summary.freight + summary.billable - summary.deductions - summary.expenses;
        }

        OwnershipReport {
            month,
            label: month.label(),
            office_expense: self_owned.expenses,
            self_owned,
            market,
            total_expense,
        }
    }

    /// Ownership of the truck a trip ran on. Without a truck record, a trip
    /// with a supplier counts as market.
    fn trip_ownership(trip: &Trip, trucks: &HashMap<&TruckId, &Truck>) -> TruckOwnership {
        match trucks.get(&trip.truck_id) {
            Some(truck) => truck.ownership,
            None if trip.supplier_id.is_some() => TruckOwnership::Market,
            None => TruckOwnership::SelfOwned,
        }
    }
}
