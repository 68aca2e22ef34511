//! Whole-period summary shown when a budget period is finished (or on demand)

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{Money, Spend, Wallet};

/// Statistics over one wallet's spends
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodSummary {
    pub total_budget: Money,
    pub start_date: NaiveDate,
    pub finish_date: NaiveDate,
    pub day_count: u32,
    pub spent: Money,
    pub rest: Money,
    pub spend_count: usize,
    /// Spent per elapsed day
    pub average_per_day: Money,
    pub largest_spend: Option<Money>,
    pub smallest_spend: Option<Money>,
}

impl PeriodSummary {
    /// Summarize the spends of `wallet` up to and including `as_of`
    pub fn build(wallet: &Wallet, spends: &[Spend], as_of: NaiveDate) -> Self {
        let last_day = as_of.min(wallet.finish_date());
        let in_period: Vec<&Spend> = spends
            .iter()
            .filter(|s| s.date() >= wallet.start_date() && s.date() <= last_day)
            .collect();

        let spent: Money = in_period.iter().map(|s| s.amount).sum();
        let elapsed_days = if last_day < wallet.start_date() {
            0
        } else {
            ((last_day - wallet.start_date()).num_days() + 1) as u32
        };

        Self {
            total_budget: wallet.total_budget(),
            start_date: wallet.start_date(),
            finish_date: wallet.finish_date(),
            day_count: wallet.day_count(),
            spent,
            rest: wallet.total_budget() - spent,
            spend_count: in_period.len(),
            average_per_day: spent.split(elapsed_days),
            largest_spend: in_period.iter().map(|s| s.amount).max(),
            smallest_spend: in_period.iter().map(|s| s.amount).min(),
        }
    }

    pub fn is_overspent(&self) -> bool {
        self.rest.is_negative()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, d).unwrap()
    }

    fn spend(d: u32, major: i64) -> Spend {
        Spend::new(Money::from_major(major), day(d).and_hms_opt(10, 0, 0).unwrap())
    }

    #[test]
    fn test_summary_of_finished_period() {
        let wallet = Wallet::new(day(1), day(4), Money::from_major(400)).unwrap();
        let spends = vec![spend(1, 50), spend(2, 120), spend(2, 30), spend(4, 100), spend(9, 999)];

        let summary = PeriodSummary::build(&wallet, &spends, day(20));
        assert_eq!(summary.spent, Money::from_major(300));
        assert_eq!(summary.rest, Money::from_major(100));
        assert_eq!(summary.spend_count, 4);
        assert_eq!(summary.average_per_day, Money::from_major(75));
        assert_eq!(summary.largest_spend, Some(Money::from_major(120)));
        assert_eq!(summary.smallest_spend, Some(Money::from_major(30)));
        assert!(!summary.is_overspent());
    }

    #[test]
    fn test_summary_mid_period() {
        let wallet = Wallet::new(day(1), day(10), Money::from_major(100)).unwrap();
        let spends = vec![spend(1, 60), spend(2, 60), spend(5, 10)];

        let summary = PeriodSummary::build(&wallet, &spends, day(2));
        assert_eq!(summary.spent, Money::from_major(120));
        assert_eq!(summary.average_per_day, Money::from_major(60));
        assert!(summary.is_overspent());
    }

    #[test]
    fn test_empty_summary() {
        let wallet = Wallet::new(day(1), day(10), Money::from_major(100)).unwrap();
        let summary = PeriodSummary::build(&wallet, &[], day(1));
        assert_eq!(summary.spend_count, 0);
        assert_eq!(summary.largest_spend, None);
        assert_eq!(summary.average_per_day, Money::zero());
    }
}
