//! Display formatting for terminal output

pub mod money;
pub mod spend;
pub mod wallet;

pub use money::{format_money, FormatOptions, NumberLocale};
pub use spend::{format_spend_history, format_spend_line, pretty_date};
pub use wallet::{
    format_currency_list, format_outcome, format_period_summary, format_settings, format_wallet,
};
