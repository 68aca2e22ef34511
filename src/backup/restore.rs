//! Restoring data from backup archives

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::config::paths::BuckwheatPaths;
use crate::config::settings::Settings;
use crate::error::{BuckwheatError, BuckwheatResult};
use crate::models::Spend;
use crate::storage::file_io::write_json_atomic;
use crate::storage::BudgetData;

use super::manager::{BackupArchive, ARCHIVE_SCHEMA_VERSION};

#[derive(Deserialize)]
struct SpendsDocument {
    spends: Vec<Spend>,
}

/// Handles restoring from backups
pub struct RestoreManager {
    paths: BuckwheatPaths,
}

impl RestoreManager {
    pub fn new(paths: BuckwheatPaths) -> Self {
        Self { paths }
    }

    /// Overwrite the current data with a backup's contents
    ///
    /// Every section is checked before anything is written, so a damaged
    /// archive leaves the current data untouched.
    pub fn restore_from_file(&self, backup_path: &Path) -> BuckwheatResult<RestoreResult> {
        let archive = read_archive(backup_path)?;
        self.restore_from_archive(&archive)
    }

    pub fn restore_from_archive(&self, archive: &BackupArchive) -> BuckwheatResult<RestoreResult> {
        check_archive(archive)?;
        self.paths.ensure_directories()?;

        let mut result = RestoreResult {
            schema_version: archive.schema_version,
            backup_date: archive.created_at,
            ..RestoreResult::default()
        };

        if !archive.settings.is_null() {
            write_json_atomic(self.paths.settings_file(), &archive.settings)?;
            result.settings_restored = true;
        }
        if !archive.budget.is_null() {
            write_json_atomic(self.paths.budget_file(), &archive.budget)?;
            result.budget_restored = true;
        }
        if !archive.spends.is_null() {
            write_json_atomic(self.paths.spends_file(), &archive.spends)?;
            result.spends_restored = true;
        }

        tracing::info!(
            backup_date = %archive.created_at,
            summary = %result.summary(),
            "backup restored"
        );
        Ok(result)
    }

    /// Check a backup file without restoring it
    pub fn validate_backup(&self, backup_path: &Path) -> BuckwheatResult<ValidationResult> {
        let archive = read_archive(backup_path)?;
        let problem = check_archive(&archive).err().map(|e| e.to_string());

        Ok(ValidationResult {
            is_valid: problem.is_none(),
            problem,
            schema_version: archive.schema_version,
            backup_date: archive.created_at,
            has_settings: !archive.settings.is_null(),
            has_budget: !archive.budget.is_null(),
            has_spends: !archive.spends.is_null(),
        })
    }
}

fn read_archive(backup_path: &Path) -> BuckwheatResult<BackupArchive> {
    let contents = fs::read_to_string(backup_path)
        .map_err(|e| BuckwheatError::Backup(format!("Failed to read backup file: {}", e)))?;

    serde_json::from_str(&contents)
        .map_err(|e| BuckwheatError::Backup(format!("Failed to parse backup file: {}", e)))
}

/// Every present section must deserialize into its typed document
fn check_archive(archive: &BackupArchive) -> BuckwheatResult<()> {
    if archive.schema_version > ARCHIVE_SCHEMA_VERSION {
        return Err(BuckwheatError::Backup(format!(
            "Backup schema v{} is newer than supported v{}",
            archive.schema_version, ARCHIVE_SCHEMA_VERSION
        )));
    }

    if !archive.settings.is_null() {
        serde_json::from_value::<Settings>(archive.settings.clone())
            .map_err(|e| BuckwheatError::Backup(format!("Backup settings are invalid: {}", e)))?;
    }

    if !archive.budget.is_null() {
        let budget = serde_json::from_value::<BudgetData>(archive.budget.clone())
            .map_err(|e| BuckwheatError::Backup(format!("Backup wallet is invalid: {}", e)))?;
        if let Some(wallet) = budget.wallet {
            wallet
                .validate()
                .map_err(|e| BuckwheatError::Backup(format!("Backup wallet is invalid: {}", e)))?;
        }
    }

    if !archive.spends.is_null() {
        let document = serde_json::from_value::<SpendsDocument>(archive.spends.clone())
            .map_err(|e| BuckwheatError::Backup(format!("Backup spends are invalid: {}", e)))?;
        for spend in &document.spends {
            spend
                .validate()
                .map_err(|e| BuckwheatError::Backup(format!("Backup spends are invalid: {}", e)))?;
        }
    }

    Ok(())
}

/// Result of a restore operation
#[derive(Debug, Default)]
pub struct RestoreResult {
    pub schema_version: u32,
    pub backup_date: DateTime<Utc>,
    pub settings_restored: bool,
    pub budget_restored: bool,
    pub spends_restored: bool,
}

impl RestoreResult {
    pub fn all_restored(&self) -> bool {
        self.settings_restored && self.budget_restored && self.spends_restored
    }

    pub fn summary(&self) -> String {
        let parts: Vec<_> = [
            (self.settings_restored, "settings"),
            (self.budget_restored, "wallet"),
            (self.spends_restored, "spends"),
        ]
        .into_iter()
        .filter_map(|(restored, name)| restored.then_some(name))
        .collect();

        if parts.is_empty() {
            "Nothing restored".to_string()
        } else {
            format!("Restored: {}", parts.join(", "))
        }
    }
}

/// Result of validating a backup
#[derive(Debug)]
pub struct ValidationResult {
    pub is_valid: bool,
    /// Why the archive cannot be restored
    pub problem: Option<String>,
    pub schema_version: u32,
    pub backup_date: DateTime<Utc>,
    pub has_settings: bool,
    pub has_budget: bool,
    pub has_spends: bool,
}

impl ValidationResult {
    pub fn is_complete(&self) -> bool {
        self.has_settings && self.has_budget && self.has_spends
    }

    pub fn summary(&self) -> String {
        if let Some(problem) = &self.problem {
            return format!("Invalid backup (v{}): {}", self.schema_version, problem);
        }

        let sections = [
            (self.has_settings, "settings"),
            (self.has_budget, "wallet"),
            (self.has_spends, "spends"),
        ];
        let missing: Vec<_> = sections
            .iter()
            .filter(|(present, _)| !present)
            .map(|(_, name)| *name)
            .collect();

        if missing.is_empty() {
            format!("Complete backup (v{})", self.schema_version)
        } else {
            format!(
                "Partial backup (v{}): missing {}",
                self.schema_version,
                missing.join(", ")
            )
        }
    }
}
