//! Pure budget arithmetic
//!
//! Everything in here works on snapshots (wallet, spends, preferences, date)
//! and returns new values. Nothing touches storage or holds mutable state, so
//! it is safe to call from any number of readers.

pub mod allowance;
pub mod observer;
pub mod redistribution;
pub mod summary;

pub use allowance::{
    compute_allowance, days_remaining, AllowanceOutcome, AllowanceReport, AllowanceRequest,
    AppliedRedistribution,
};
pub use observer::{BudgetObserver, BudgetSnapshot, Subscribers};
pub use redistribution::RedistributionPreview;
pub use summary::PeriodSummary;
