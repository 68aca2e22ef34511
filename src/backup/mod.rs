//! Rolling backups of the data files
//!
//! A backup is a single JSON archive (`buckwheat-YYYYMMDD-HHMMSS-mmm.json`)
//! holding the settings, the wallet document and the spend log. Retention
//! keeps the newest `daily_count` backups plus the oldest backup of each of
//! the last `monthly_count` months.
//!
//! ```rust,ignore
//! use buckwheat_cli::backup::{BackupManager, RestoreManager};
//!
//! let manager = BackupManager::new(paths.clone(), settings.backup_retention.clone());
//! let (path, _expired) = manager.create_backup_with_retention()?;
//!
//! let result = RestoreManager::new(paths).restore_from_file(&path)?;
//! println!("{}", result.summary());
//! ```

mod manager;
mod restore;

pub use manager::{BackupArchive, BackupInfo, BackupManager};
pub use restore::{RestoreManager, RestoreResult, ValidationResult};
