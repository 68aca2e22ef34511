//! Path management for Buckwheat
//!
//! ## Path Resolution Order
//!
//! 1. `BUCKWHEAT_DATA_DIR` environment variable (if set)
//! 2. The platform config directory from `directories`
//!    (`~/.config/buckwheat` on Linux, `~/Library/Application Support/buckwheat`
//!    on macOS, `%APPDATA%\buckwheat` on Windows)

use std::path::PathBuf;

use directories::BaseDirs;

use crate::error::BuckwheatError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "BUCKWHEAT_DATA_DIR";

/// Manages all paths used by Buckwheat
#[derive(Debug, Clone)]
pub struct BuckwheatPaths {
    base_dir: PathBuf,
}

impl BuckwheatPaths {
    /// Resolve the base directory from the environment or the platform default
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, BuckwheatError> {
        let base_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create paths rooted at a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn backup_dir(&self) -> PathBuf {
        self.base_dir.join("backups")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Wallet and day checkpoint
    pub fn budget_file(&self) -> PathBuf {
        self.data_dir().join("budget.json")
    }

    pub fn spends_file(&self) -> PathBuf {
        self.data_dir().join("spends.json")
    }

    /// Ensure the base, data and backup directories exist
    pub fn ensure_directories(&self) -> Result<(), BuckwheatError> {
        for dir in [self.base_dir.clone(), self.data_dir(), self.backup_dir()] {
            std::fs::create_dir_all(&dir).map_err(|e| {
                BuckwheatError::Io(format!("Failed to create {}: {}", dir.display(), e))
            })?;
        }
        Ok(())
    }

    /// Check if Buckwheat has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, BuckwheatError> {
    let dirs = BaseDirs::new()
        .ok_or_else(|| BuckwheatError::Config("Could not determine home directory".into()))?;
    Ok(dirs.config_dir().join("buckwheat"))
}
