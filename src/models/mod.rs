//! Core data models for Buckwheat
//!
//! This module contains the data structures of the daily-budget domain:
//! money, currencies, the wallet (budget period), spends and day state.

pub mod currency;
pub mod daily;
pub mod ids;
pub mod money;
pub mod redistribution;
pub mod spend;
pub mod wallet;

pub use currency::{find_currency, CurrencyInfo, CurrencyTag, CURRENCIES};
pub use daily::{DailyState, DayCheckpoint};
pub use ids::SpendId;
pub use money::{Money, MAX_AMOUNT};
pub use redistribution::{DistributionChoice, RedistributionMethod};
pub use spend::Spend;
pub use wallet::Wallet;
