//! Calendar month keys (`YYYY-MM`)

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::types::{LedgerError, LedgerResult};

/// A calendar month, ordered chronologically and rendered as `YYYY-MM`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Create a month key, rejecting months outside 1..=12
    pub fn new(year: i32, month: u32) -> LedgerResult<Self> {
        let key = Self { year, month };
        if key.first_day_opt().is_none() {
            return Err(LedgerError::Validation(format!(
                "Invalid month: {year:04}-{month:02}"
            )));
        }
        Ok(key)
    }

    /// Month containing the given date
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    fn first_day_opt(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// First calendar day of the month
    pub fn first_day(&self) -> NaiveDate {
        // Keys are only built from valid dates or through `new`.
        self.first_day_opt().unwrap_or(NaiveDate::MIN)
    }

    /// Number of days in the month (28..=31)
    pub fn days_in_month(&self) -> u32 {
        let next = self.next();
        match (self.first_day_opt(), next.first_day_opt()) {
            (Some(first), Some(following)) => (following - first).num_days() as u32,
            _ => 31,
        }
    }

    /// The following calendar month
    pub fn next(&self) -> Self {
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

    /// Inclusive, contiguous sequence of months from `from` through `to`
    ///
    /// Empty when `to` precedes `from`.
    pub fn range(from: MonthKey, to: MonthKey) -> impl Iterator<Item = MonthKey> {
        std::iter::successors(Some(from), |m| Some(m.next())).take_while(move |m| *m <= to)
    }

    /// Number of months in `from..=to`, zero when `to` precedes `from`
    pub fn months_between(from: MonthKey, to: MonthKey) -> usize {
        let diff = (to.year - from.year) * 12 + to.month as i32 - from.month as i32;
        if diff < 0 {
            0
        } else {
            diff as usize + 1
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || LedgerError::Validation(format!("Invalid month key '{s}', expected YYYY-MM"));

        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }
}

impl TryFrom<String> for MonthKey {
    type Error = LedgerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MonthKey> for String {
    fn from(key: MonthKey) -> Self {
        key.to_string()
    }
}
