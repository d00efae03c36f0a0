//! Calendar month navigation.

use chrono::{Datelike, Local, NaiveDate};
use std::fmt;
use std::str::FromStr;

use crate::error::TimetableError;

const MONTH_NAMES: [&str; 12] = [
    "Січень",
    "Лютий",
    "Березень",
    "Квітень",
    "Травень",
    "Червень",
    "Липень",
    "Серпень",
    "Вересень",
    "Жовтень",
    "Листопад",
    "Грудень",
];

/// A calendar month (`month` is 1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Month { year, month })
    }

    pub fn containing(date: NaiveDate) -> Self {
        Month {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The month containing today's local date.
    pub fn current() -> Self {
        Self::containing(Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn prev(&self) -> Option<Self> {
        self.offset(-1)
    }

    pub fn next(&self) -> Option<Self> {
        self.offset(1)
    }

    /// Move by `months`, crossing year boundaries as needed. `None` when the
    /// result falls outside the supported date range.
    pub fn offset(&self, months: i64) -> Option<Self> {
        let zero_based = i64::from(self.year)
            .checked_mul(12)?
            .checked_add(i64::from(self.month) - 1)?
            .checked_add(months)?;
        let year = i32::try_from(zero_based.div_euclid(12)).ok()?;
        Month::new(year, zero_based.rem_euclid(12) as u32 + 1)
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Every date in the month, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let month = self.month;
        self.first_day()
            .iter_days()
            .take_while(move |d| d.month() == month)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        Self::containing(date) == *self
    }

    pub fn is_current(&self, today: NaiveDate) -> bool {
        self.contains(today)
    }

    /// Capitalized month name and year, e.g. "Березень 2024".
    pub fn title(&self) -> String {
        format!("{} {}", MONTH_NAMES[(self.month - 1) as usize], self.year)
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Month {
    type Err = TimetableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TimetableError::InvalidMonth(s.to_string());
        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        if month.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Month::new(year, month).ok_or_else(invalid)
    }
}
