//! Service layer for Buckwheat
//!
//! Services sit between the CLI and storage: they validate input, run the
//! pure budget arithmetic over stored snapshots, persist the results and
//! write the audit trail.

pub mod clock;
pub mod daily;
pub mod settings;
pub mod spend;
pub mod wallet;

pub use clock::Clock;
pub use daily::{DailyService, DailyView};
pub use settings::SettingsService;
pub use spend::SpendService;
pub use wallet::{SetWalletInput, WalletService};
