//! Fiscal years and the per-year aggregations.

pub mod aggregate;
pub mod period;

pub use aggregate::{CategoryTotal, MonthlyCount, expense_category_totals, monthly_trip_counts};
pub use period::{CalendarMonth, FISCAL_START_MONTH, FiscalYear};
