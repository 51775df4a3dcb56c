//! Dashboard summary assembly.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::expense::Expense;
use crate::fiscal::{
    CalendarMonth, CategoryTotal, MonthlyCount, expense_category_totals, monthly_trip_counts,
};
use crate::reports::ReportService;
use crate::trip::{PartyPayment, Trip, TripCharge};

/// Figures shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Trip counts for the twelve months of the current fiscal year.
    pub monthly_trip_counts: Vec<MonthlyCount>,
    /// Expense totals per category for the current fiscal year.
    pub expense_category_totals: Vec<CategoryTotal>,
    /// Outstanding balance across every trip.
    pub total_receivable: Decimal,
    /// Profit of the current calendar month, all trucks.
    pub monthly_profit: Decimal,
}

/// Record sets the dashboard is computed from.
#[derive(Debug, Clone, Copy)]
pub struct DashboardInputs<'a> {
    /// The user's trips.
    pub trips: &'a [Trip],
    /// Charges on those trips.
    pub charges: &'a [TripCharge],
    /// Party payments.
    pub payments: &'a [PartyPayment],
    /// The user's expenses.
    pub expenses: &'a [Expense],
}

/// Builds the dashboard for the day `today`.
#[must_use]
pub fn build_dashboard(inputs: DashboardInputs<'_>, today: NaiveDate) -> DashboardSummary {
    DashboardSummary {
        monthly_trip_counts: monthly_trip_counts(inputs.trips, today),
        expense_category_totals: expense_category_totals(inputs.expenses, today),
        total_receivable: ReportService::total_receivable(
            inputs.trips,
            inputs.charges,
            inputs.payments,
        ),
        monthly_profit: ReportService::monthly_profit(
            inputs.trips,
            inputs.charges,
            inputs.expenses,
            CalendarMonth::of(today),
        ),
    }
}
