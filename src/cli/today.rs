//! `buckwheat today`
//!
//! Computes the day's allowance and publishes the result to the terminal
//! observers.

use clap::Args;

use crate::budget::{AllowanceOutcome, BudgetObserver, BudgetSnapshot, Subscribers};
use crate::config::settings::Settings;
use crate::display::format_outcome;
use crate::error::BuckwheatResult;
use crate::models::DistributionChoice;
use crate::services::{Clock, DailyService, DailyView};
use crate::storage::Storage;

/// Arguments of `buckwheat today`
#[derive(Args, Debug, Default)]
pub struct TodayArgs {
    /// Decide what happens to yesterday's leftover (add-today or rest)
    #[arg(short, long)]
    pub choice: Option<DistributionChoice>,
}

/// Prints the allowance card
struct AllowancePrinter<'a> {
    settings: &'a Settings,
}

impl BudgetObserver for AllowancePrinter<'_> {
    fn on_snapshot(&self, snapshot: &BudgetSnapshot<'_>) {
        print!("{}", format_outcome(snapshot.outcome, self.settings));
    }
}

/// Warns once today's allowance is exceeded
pub struct OverspendWarning<'a> {
    settings: &'a Settings,
}

impl<'a> OverspendWarning<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    /// The warning line, if one is due
    pub fn message(&self, outcome: &AllowanceOutcome) -> Option<String> {
        if self.settings.hide_overspending_warn {
            return None;
        }
        let remaining = outcome.remaining_today();
        remaining.is_negative().then(|| {
            format!(
                "Warning: today's budget is over by {}",
                self.settings.format_amount(remaining.abs())
            )
        })
    }
}

impl BudgetObserver for OverspendWarning<'_> {
    fn on_snapshot(&self, snapshot: &BudgetSnapshot<'_>) {
        if let Some(message) = self.message(snapshot.outcome) {
            println!("{}", message);
        }
    }
}

/// Run the calculation and hand it to `subscribers`
pub(crate) fn recompute(
    storage: &Storage,
    settings: &Settings,
    clock: &Clock,
    choice: Option<DistributionChoice>,
    subscribers: &Subscribers<'_>,
) -> BuckwheatResult<DailyView> {
    let view = DailyService::new(storage).calculate(
        settings.redistribution_method,
        choice,
        clock.today(),
    )?;

    subscribers.publish(&BudgetSnapshot {
        wallet: &view.wallet,
        as_of: view.as_of,
        outcome: &view.outcome,
    });

    Ok(view)
}

/// Handle `buckwheat today`
pub fn handle_today_command(
    storage: &Storage,
    settings: &Settings,
    clock: &Clock,
    args: TodayArgs,
) -> BuckwheatResult<()> {
    let printer = AllowancePrinter { settings };
    let warning = OverspendWarning::new(settings);

    let mut subscribers = Subscribers::new();
    subscribers.subscribe(&printer);
    subscribers.subscribe(&warning);

    recompute(storage, settings, clock, args.choice, &subscribers)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::BuckwheatPaths;
    use crate::models::{Money, RedistributionMethod, Spend, Wallet};
    use chrono::NaiveDate;
    use std::cell::Cell;
    use tempfile::TempDir;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    fn storage_with_wallet() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BuckwheatPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage
            .budget
            .replace_wallet(Wallet::new(day(1), day(10), Money::from_major(1000)).unwrap())
            .unwrap();
        (temp_dir, storage)
    }

    #[derive(Default)]
    struct Counter {
        calls: Cell<usize>,
    }

    impl BudgetObserver for Counter {
        fn on_snapshot(&self, _snapshot: &BudgetSnapshot<'_>) {
            self.calls.set(self.calls.get() + 1);
        }
    }

    #[test]
    fn test_recompute_publishes_once() {
        let (_temp_dir, storage) = storage_with_wallet();
        let settings = Settings::default();
        let counter = Counter::default();
        let mut subscribers = Subscribers::new();
        subscribers.subscribe(&counter);

        let view = recompute(&storage, &settings, &Clock::on(day(1)), None, &subscribers).unwrap();

        assert_eq!(counter.calls.get(), 1);
        assert_eq!(view.outcome.remaining_today(), Money::from_major(100));
    }

    #[test]
    fn test_overspend_warning() {
        let (_temp_dir, storage) = storage_with_wallet();
        storage
            .spends
            .insert(Spend::new(
                Money::from_major(130),
                day(1).and_hms_opt(10, 0, 0).unwrap(),
            ))
            .unwrap();

        let mut settings = Settings::default();
        settings.redistribution_method = RedistributionMethod::Rest;
        let view = DailyService::new(&storage)
            .calculate(settings.redistribution_method, None, day(1))
            .unwrap();

        let message = OverspendWarning::new(&settings).message(&view.outcome);
        assert_eq!(message.as_deref(), Some("Warning: today's budget is over by 30"));

        settings.hide_overspending_warn = true;
        assert!(OverspendWarning::new(&settings).message(&view.outcome).is_none());
    }

    #[test]
    fn test_no_warning_without_allowance() {
        let settings = Settings::default();
        let outcome = AllowanceOutcome::NotStarted { starts_on: day(3) };
        assert!(OverspendWarning::new(&settings).message(&outcome).is_none());
    }
}
