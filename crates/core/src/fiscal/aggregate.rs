//! Fiscal-year aggregations behind the dashboard charts.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use haulbook_shared::types::or_zero;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::period::{CalendarMonth, FiscalYear};
use crate::expense::{Expense, ExpenseCategory, classify};
use crate::trip::Trip;

/// Trips started in one month of the fiscal year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyCount {
    /// Label such as `"April 2023"`.
    pub label: String,
    /// Calendar year of the month.
    pub year: i32,
    /// Month number, 1 to 12.
    pub month: u32,
    /// Number of trips.
    pub count: u64,
}

/// Count and sum of a category's expenses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    /// Expense bucket.
    pub category: ExpenseCategory,
    /// Number of expenses.
    pub count: u64,
    /// Summed amount.
    pub amount: Decimal,
}

/// Trip counts for the twelve months of the fiscal year containing
/// `reference`, April first. Months without trips are present with a zero
/// count. Trips without a start date or outside the year are ignored.
#[must_use]
pub fn monthly_trip_counts(trips: &[Trip], reference: NaiveDate) -> Vec<MonthlyCount> {
    let fiscal_year = FiscalYear::containing(reference);
    let mut counts: BTreeMap<CalendarMonth, u64> =
        fiscal_year.months().into_iter().map(|m| (m, 0)).collect();

    for date in trips.iter().filter_map(|t| t.start_date) {
        if let Some(count) = counts.get_mut(&CalendarMonth::of(date)) {
            *count += 1;
        }
    }

    counts
        .into_iter()
        .map(|(month, count)| MonthlyCount {
            label: month.label(),
            year: month.year,
            month: month.month,
            count,
        })
        .collect()
}

/// Expense count and amount per category for the fiscal year containing
/// `reference`. Every category is present, in name order. Undated expenses
/// are ignored.
#[must_use]
pub fn expense_category_totals(expenses: &[Expense], reference: NaiveDate) -> Vec<CategoryTotal> {
    let fiscal_year = FiscalYear::containing(reference);
    let mut totals: BTreeMap<ExpenseCategory, (u64, Decimal)> = ExpenseCategory::ALL
        .into_iter()
        .map(|c| (c, (0, Decimal::ZERO)))
        .collect();

    for expense in expenses
        .iter()
        .filter(|e| e.date.is_some_and(|d| fiscal_year.contains(d)))
    {
        let (count, amount) = totals.entry(classify(expense)).or_default();
        *count += 1;
        *amount += or_zero(expense.amount);
    }

    totals
        .into_iter()
        .map(|(category, (count, amount))| CategoryTotal {
            category,
            count,
            amount,
        })
        .collect()
}
