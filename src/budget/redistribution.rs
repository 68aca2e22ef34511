//! Redistribution policy
//!
//! When a day ends with money left over (or overspent), the leftover is
//! either put on top of the new day or spread evenly over all remaining days.
//! Both options start from the same plan: the even split of everything that
//! is left of the budget *except* the leftover.

use serde::Serialize;

use crate::models::spend::spent_on;
use crate::models::{DayCheckpoint, DistributionChoice, Money, Spend};

/// Leftover of a finished day: its starting allowance minus what was spent on it
pub fn leftover(checkpoint: &DayCheckpoint, spends: &[Spend]) -> Money {
    checkpoint.allowance_at_start - spent_on(spends, checkpoint.date)
}

/// The per-day amount before the leftover is applied anywhere
pub fn plan(raw_remaining: Money, leftover: Money, days_remaining: u32) -> Money {
    (raw_remaining - leftover).split(days_remaining)
}

/// Allowance for the first day after a boundary crossing
pub fn apply(
    choice: DistributionChoice,
    raw_remaining: Money,
    leftover: Money,
    days_remaining: u32,
) -> Money {
    let base = plan(raw_remaining, leftover, days_remaining);
    match choice {
        DistributionChoice::AddToday => base + leftover,
        DistributionChoice::Rest => base + leftover.split(days_remaining),
    }
}

/// Both outcomes of a pending decision, so the user can compare them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RedistributionPreview {
    pub leftover: Money,
    pub days_remaining: u32,
    /// Today's allowance if the leftover goes to today
    pub add_today: Money,
    /// Allowance of each following day if the leftover goes to today
    pub add_today_following: Money,
    /// Allowance of today and each following day if the leftover is spread
    pub rest: Money,
}

impl RedistributionPreview {
    pub fn new(raw_remaining: Money, leftover: Money, days_remaining: u32) -> Self {
        Self {
            leftover,
            days_remaining,
            add_today: apply(
                DistributionChoice::AddToday,
                raw_remaining,
                leftover,
                days_remaining,
            ),
            add_today_following: plan(raw_remaining, leftover, days_remaining),
            rest: apply(
                DistributionChoice::Rest,
                raw_remaining,
                leftover,
                days_remaining,
            ),
        }
    }

    /// Allowance for today under the given choice
    pub fn allowance_for(&self, choice: DistributionChoice) -> Money {
        match choice {
            DistributionChoice::AddToday => self.add_today,
            DistributionChoice::Rest => self.rest,
        }
    }
}
