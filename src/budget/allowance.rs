//! Daily allowance calculator
//!
//! Turns a wallet, the spend log and "today" into today's allowance. The
//! even split of what is left of the budget is recomputed from scratch every
//! day, so overspending on one day is absorbed by the days that follow.
//!
//! Redistribution of a finished day's leftover happens exactly once per
//! day-boundary crossing. The [`DayCheckpoint`] records the last day a
//! decision was applied together with the allowance fixed for it; a
//! calculation on that same day just reuses it.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use super::redistribution::{self, RedistributionPreview};
use crate::models::spend::{spent_between, spent_on};
use crate::models::{
    DailyState, DayCheckpoint, DistributionChoice, Money, RedistributionMethod, Spend, Wallet,
};

/// Snapshot of everything the calculator reads
#[derive(Debug, Clone, Copy)]
pub struct AllowanceRequest<'a> {
    pub wallet: &'a Wallet,
    pub spends: &'a [Spend],
    pub method: RedistributionMethod,
    /// One-off decision for this crossing; overrides `method`
    pub choice: Option<DistributionChoice>,
    pub checkpoint: Option<DayCheckpoint>,
    pub as_of: NaiveDate,
}

/// A redistribution that was applied while computing today's allowance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AppliedRedistribution {
    pub choice: DistributionChoice,
    pub leftover: Money,
    pub from_date: NaiveDate,
}

/// Today's allowance and the bookkeeping that goes with it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AllowanceReport {
    pub today: DailyState,
    pub days_remaining: u32,
    /// Budget minus everything spent before today
    pub raw_remaining: Money,
    /// Budget minus everything spent so far, today included
    pub rest_budget: Money,
    /// Checkpoint to persist after this calculation
    pub checkpoint: DayCheckpoint,
    /// Whether `checkpoint` differs from the one passed in
    pub checkpoint_changed: bool,
    pub redistribution: Option<AppliedRedistribution>,
}

/// Result of a calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllowanceOutcome {
    Ready(AllowanceReport),
    /// The method is `Ask` and nobody has chosen yet; no allowance for the
    /// new day exists until a choice is supplied
    DecisionRequired {
        date: NaiveDate,
        from_date: NaiveDate,
        preview: RedistributionPreview,
    },
    /// The period has not started yet
    NotStarted { starts_on: NaiveDate },
    /// The period is over; the allowance is frozen at zero until a new
    /// wallet is set up
    Finished {
        finished_on: NaiveDate,
        rest_budget: Money,
    },
}

impl AllowanceOutcome {
    /// The report, if an allowance could be produced
    pub fn report(&self) -> Option<&AllowanceReport> {
        match self {
            Self::Ready(report) => Some(report),
            _ => None,
        }
    }

    /// Amount that can still be spent today; zero when no allowance applies
    pub fn remaining_today(&self) -> Money {
        self.report()
            .map(|r| r.today.remaining())
            .unwrap_or_else(Money::zero)
    }
}

/// Days left in the period including `as_of`; 0 once the period has ended
pub fn days_remaining(wallet: &Wallet, as_of: NaiveDate) -> u32 {
    wallet.days_remaining(as_of)
}

/// Compute the allowance for `request.as_of`
pub fn compute_allowance(request: &AllowanceRequest<'_>) -> AllowanceOutcome {
    let wallet = request.wallet;
    let as_of = request.as_of;

    if wallet.is_finished(as_of) {
        let spent = spent_between(request.spends, wallet.start_date(), wallet.finish_date());
        return AllowanceOutcome::Finished {
            finished_on: wallet.finish_date(),
            rest_budget: wallet.total_budget() - spent,
        };
    }

    if as_of < wallet.start_date() {
        return AllowanceOutcome::NotStarted {
            starts_on: wallet.start_date(),
        };
    }

    let days = days_remaining(wallet, as_of).max(1);
    let spent_before = spent_between(
        request.spends,
        wallet.start_date(),
        as_of - Duration::days(1),
    );
    let raw_remaining = wallet.total_budget() - spent_before;
    let spent_today = spent_on(request.spends, as_of);

    let ready = |allowance: Money,
                 checkpoint: DayCheckpoint,
                 checkpoint_changed: bool,
                 redistribution: Option<AppliedRedistribution>| {
        AllowanceOutcome::Ready(AllowanceReport {
            today: DailyState {
                date: as_of,
                allowance_at_start: allowance,
                spent_today,
            },
            days_remaining: days,
            raw_remaining,
            rest_budget: raw_remaining - spent_today,
            checkpoint,
            checkpoint_changed,
            redistribution,
        })
    };

    // A checkpoint left over from a previous wallet means nothing here
    let checkpoint = request.checkpoint.filter(|c| wallet.contains(c.date));

    match checkpoint {
        Some(cp) if cp.date == as_of => ready(cp.allowance_at_start, cp, false, None),
        Some(cp) if cp.date < as_of => {
            let leftover = redistribution::leftover(&cp, request.spends);

            let choice = if leftover.is_zero() {
                // Both options coincide, nothing to ask about
                Some(DistributionChoice::Rest)
            } else {
                request.choice.or_else(|| request.method.automatic_choice())
            };

            let Some(choice) = choice else {
                return AllowanceOutcome::DecisionRequired {
                    date: as_of,
                    from_date: cp.date,
                    preview: RedistributionPreview::new(raw_remaining, leftover, days),
                };
            };

            let allowance = redistribution::apply(choice, raw_remaining, leftover, days);
            let applied = (!leftover.is_zero()).then_some(AppliedRedistribution {
                choice,
                leftover,
                from_date: cp.date,
            });
            let next = DayCheckpoint {
                date: as_of,
                allowance_at_start: allowance,
            };
            ready(allowance, next, true, applied)
        }
        // The clock went backwards; keep the later checkpoint untouched
        Some(cp) => ready(raw_remaining.split(days), cp, false, None),
        None => {
            let allowance = raw_remaining.split(days);
            let next = DayCheckpoint {
                date: as_of,
                allowance_at_start: allowance,
            };
            ready(allowance, next, true, None)
        }
    }
}
