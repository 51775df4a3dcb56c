//! Calendar months and April to March fiscal years.

use std::fmt;

use chrono::{Datelike, Month, NaiveDate};
use serde::{Deserialize, Serialize};

/// Month the fiscal year starts in.
pub const FISCAL_START_MONTH: u32 = 4;

/// A calendar month of a specific year.
///
/// Ordered by year, then month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CalendarMonth {
    /// Calendar year.
    pub year: i32,
    /// Month number, 1 to 12.
    pub month: u32,
}

impl CalendarMonth {
    /// Creates a month, or `None` when `month` is outside 1 to 12.
    #[must_use]
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// Month containing `date`.
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Following month.
    #[must_use]
    pub fn succ(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Returns true if `date` falls in this month.
    #[must_use]
    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// English month name.
    #[must_use]
    pub fn name(self) -> &'static str {
        u8::try_from(self.month)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .map_or("Unknown", |m| m.name())
    }

    /// Label such as `"April 2023"`.
    #[must_use]
    pub fn label(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name(), self.year)
    }
}

/// Fiscal year running April 1 to March 31 of the following year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FiscalYear {
    /// Calendar year the fiscal year starts in.
    pub start_year: i32,
}

impl FiscalYear {
    /// Fiscal year containing `date`. January to March belong to the fiscal
    /// year that started the previous April.
    #[must_use]
    pub fn containing(date: NaiveDate) -> Self {
        let start_year = if date.month() < FISCAL_START_MONTH {
            date.year() - 1
        } else {
            date.year()
        };
        Self { start_year }
    }

    /// First month (April of the start year).
    #[must_use]
    pub fn first_month(self) -> CalendarMonth {
        CalendarMonth {
            year: self.start_year,
            month: FISCAL_START_MONTH,
        }
    }

    /// First day, April 1.
    #[must_use]
    pub fn start_date(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.start_year, FISCAL_START_MONTH, 1)
    }

    /// Last day, March 31.
    #[must_use]
    pub fn end_date(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.start_year + 1, 3, 31)
    }

    /// The twelve months, April to March.
    #[must_use]
    pub fn months(self) -> [CalendarMonth; 12] {
        let mut month = self.first_month();
        std::array::from_fn(|_| {
            let current = month;
            month = month.succ();
            current
        })
    }

    /// Returns true if `date` falls in this fiscal year.
    #[must_use]
    pub fn contains(self, date: NaiveDate) -> bool {
        Self::containing(date) == self
    }
}

impl fmt::Display for FiscalYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FY {}-{:02}", self.start_year, (self.start_year + 1).rem_euclid(100))
    }
}
