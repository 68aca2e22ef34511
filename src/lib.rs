//! Buckwheat - a daily allowance budget for the terminal
//!
//! You give Buckwheat a total budget and a finish date. Every day it tells
//! you how much you can spend today, and when a day ends with money left over
//! (or overspent) it moves the difference onto today or spreads it over the
//! remaining days.
//!
//! # Architecture
//!
//! - `models`: money, currencies, the wallet, spends and day checkpoints
//! - `budget`: pure allowance and redistribution arithmetic
//! - `storage`: JSON file repositories
//! - `services`: validation, persistence and auditing around the arithmetic
//! - `audit`: JSON-lines audit trail of every mutation
//! - `backup`: archive, retention and restore of the data files
//! - `display` and `cli`: terminal formatting and command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use buckwheat_cli::config::{paths::BuckwheatPaths, settings::Settings};
//!
//! let paths = BuckwheatPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! ```

pub mod audit;
pub mod backup;
pub mod budget;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::BuckwheatError;
