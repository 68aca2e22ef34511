//! The "today" every calculation is made against

use chrono::{Local, NaiveDate, NaiveDateTime};

/// Current local date and time, optionally pinned to a fixed day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clock {
    now: NaiveDateTime,
}

impl Clock {
    /// Wall clock in the local time zone
    pub fn system() -> Self {
        Self {
            now: Local::now().naive_local(),
        }
    }

    /// Pin the date, keeping the current local time of day
    pub fn on(date: NaiveDate) -> Self {
        Self {
            now: date.and_time(Local::now().time()),
        }
    }

    /// A fully fixed instant
    pub fn at(now: NaiveDateTime) -> Self {
        Self { now }
    }

    /// `Clock::on(date)` when an override is given, the wall clock otherwise
    pub fn from_override(date: Option<NaiveDate>) -> Self {
        date.map(Self::on).unwrap_or_else(Self::system)
    }

    pub fn today(&self) -> NaiveDate {
        self.now.date()
    }

    pub fn now(&self) -> NaiveDateTime {
        self.now
    }
}
