//! Per-day allowance state

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::money::Money;

/// The allowance fixed for the last day a redistribution decision was applied
///
/// Persisted between runs so that the next day-boundary crossing can work
/// out what was left over, and so that recomputing on the same day never
/// redistributes twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCheckpoint {
    pub date: NaiveDate,
    pub allowance_at_start: Money,
}

/// Allowance for one day, derived from the wallet and spends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyState {
    pub date: NaiveDate,
    pub allowance_at_start: Money,
    pub spent_today: Money,
}

impl DailyState {
    /// What can still be spent today (negative when overspent)
    pub fn remaining(&self) -> Money {
        self.allowance_at_start - self.spent_today
    }

    /// Whether today's allowance has been exceeded
    pub fn is_overspent(&self) -> bool {
        self.remaining().is_negative()
    }

    pub fn checkpoint(&self) -> DayCheckpoint {
        DayCheckpoint {
            date: self.date,
            allowance_at_start: self.allowance_at_start,
        }
    }
}
