//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod backup;
pub mod settings;
pub mod spend;
pub mod today;
pub mod wallet;

pub use backup::{handle_backup_command, BackupCommands};
pub use settings::{handle_settings_command, SettingsCommands};
pub use spend::{handle_spend_command, SpendCommands};
pub use today::{handle_today_command, TodayArgs};
pub use wallet::{handle_wallet_command, WalletCommands};
