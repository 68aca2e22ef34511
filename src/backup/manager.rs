//! Backup creation, listing and retention

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::config::paths::BuckwheatPaths;
use crate::config::settings::BackupRetention;
use crate::error::{BuckwheatError, BuckwheatResult};

const FILE_PREFIX: &str = "buckwheat-";

/// Current archive layout
pub const ARCHIVE_SCHEMA_VERSION: u32 = 1;

/// Metadata about a backup on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupInfo {
    pub filename: String,
    pub path: PathBuf,
    pub created_at: DateTime<Utc>,
    pub size_bytes: u64,
    /// Oldest backup of its calendar month; kept under the monthly quota
    pub is_monthly: bool,
}

/// One backup file: every data document, verbatim
#[derive(Debug, Serialize, Deserialize)]
pub struct BackupArchive {
    pub schema_version: u32,
    pub created_at: DateTime<Utc>,
    /// config.json
    pub settings: serde_json::Value,
    /// data/budget.json (wallet and checkpoint)
    pub budget: serde_json::Value,
    /// data/spends.json
    pub spends: serde_json::Value,
}

/// Manages backup creation and retention
pub struct BackupManager {
    paths: BuckwheatPaths,
    retention: BackupRetention,
}

impl BackupManager {
    pub fn new(paths: BuckwheatPaths, retention: BackupRetention) -> Self {
        Self { paths, retention }
    }

    pub fn backup_dir(&self) -> PathBuf {
        self.paths.backup_dir()
    }

    /// Write a new archive of the current data files
    pub fn create_backup(&self) -> BuckwheatResult<PathBuf> {
        let backup_dir = self.backup_dir();
        fs::create_dir_all(&backup_dir).map_err(|e| {
            BuckwheatError::Backup(format!("Failed to create backup directory: {}", e))
        })?;

        let now = Utc::now();
        let filename = format!(
            "{}{}-{:03}.json",
            FILE_PREFIX,
            now.format("%Y%m%d-%H%M%S"),
            now.timestamp_subsec_millis()
        );
        let backup_path = backup_dir.join(&filename);

        let archive = BackupArchive {
            schema_version: ARCHIVE_SCHEMA_VERSION,
            created_at: now,
            settings: read_json_value(&self.paths.settings_file())?,
            budget: read_json_value(&self.paths.budget_file())?,
            spends: read_json_value(&self.paths.spends_file())?,
        };

        let json = serde_json::to_string_pretty(&archive)
            .map_err(|e| BuckwheatError::Json(format!("Failed to serialize backup: {}", e)))?;
        fs::write(&backup_path, json)
            .map_err(|e| BuckwheatError::Backup(format!("Failed to write backup file: {}", e)))?;

        tracing::info!(file = %filename, "backup created");
        Ok(backup_path)
    }

    /// All backups, newest first
    pub fn list_backups(&self) -> BuckwheatResult<Vec<BackupInfo>> {
        let backup_dir = self.backup_dir();
        if !backup_dir.exists() {
            return Ok(Vec::new());
        }

        let mut backups = Vec::new();
        let entries = fs::read_dir(&backup_dir).map_err(|e| {
            BuckwheatError::Backup(format!("Failed to read backup directory: {}", e))
        })?;
        for entry in entries {
            let entry = entry
                .map_err(|e| BuckwheatError::Io(format!("Failed to read directory entry: {}", e)))?;
            if let Some(info) = parse_backup_info(&entry.path()) {
                backups.push(info);
            }
        }

        backups.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        mark_monthly(&mut backups);
        Ok(backups)
    }

    /// Delete backups beyond the daily and monthly quotas
    pub fn enforce_retention(&self) -> BuckwheatResult<Vec<PathBuf>> {
        let (monthly, daily): (Vec<_>, Vec<_>) =
            self.list_backups()?.into_iter().partition(|b| b.is_monthly);

        let expired = daily
            .into_iter()
            .skip(self.retention.daily_count as usize)
            .chain(monthly.into_iter().skip(self.retention.monthly_count as usize));

        let mut deleted = Vec::new();
        for backup in expired {
            fs::remove_file(&backup.path).map_err(|e| {
                BuckwheatError::Backup(format!("Failed to delete {}: {}", backup.filename, e))
            })?;
            tracing::debug!(file = %backup.filename, "expired backup removed");
            deleted.push(backup.path);
        }

        Ok(deleted)
    }

    pub fn create_backup_with_retention(&self) -> BuckwheatResult<(PathBuf, Vec<PathBuf>)> {
        let backup_path = self.create_backup()?;
        let deleted = self.enforce_retention()?;
        Ok((backup_path, deleted))
    }

    /// Look up a backup by file name
    pub fn get_backup(&self, filename: &str) -> BuckwheatResult<Option<BackupInfo>> {
        Ok(self
            .list_backups()?
            .into_iter()
            .find(|b| b.filename == filename))
    }

    pub fn get_latest_backup(&self) -> BuckwheatResult<Option<BackupInfo>> {
        Ok(self.list_backups()?.into_iter().next())
    }
}

/// Flag the oldest backup of each calendar month; input is newest first
fn mark_monthly(backups: &mut [BackupInfo]) {
    let mut seen = HashSet::new();
    for backup in backups.iter_mut().rev() {
        let month = (backup.created_at.year(), backup.created_at.month());
        backup.is_monthly = seen.insert(month);
    }
}

fn parse_backup_info(path: &Path) -> Option<BackupInfo> {
    let filename = path.file_name()?.to_string_lossy().to_string();
    let stamp = filename.strip_prefix(FILE_PREFIX)?.strip_suffix(".json")?;
    let created_at = parse_backup_timestamp(stamp)?;
    let size_bytes = fs::metadata(path).ok()?.len();

    Some(BackupInfo {
        filename,
        path: path.to_path_buf(),
        created_at,
        size_bytes,
        is_monthly: false,
    })
}

/// Missing files are archived as `null`
fn read_json_value(path: &Path) -> BuckwheatResult<serde_json::Value> {
    if !path.exists() {
        return Ok(serde_json::Value::Null);
    }

    let contents = fs::read_to_string(path)
        .map_err(|e| BuckwheatError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
    serde_json::from_str(&contents)
        .map_err(|e| BuckwheatError::Json(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Parse `YYYYMMDD-HHMMSS-mmm`
fn parse_backup_timestamp(stamp: &str) -> Option<DateTime<Utc>> {
    let mut parts = stamp.split('-');
    let date = NaiveDate::parse_from_str(parts.next()?, "%Y%m%d").ok()?;
    let time = NaiveTime::parse_from_str(parts.next()?, "%H%M%S").ok()?;
    let millis: u32 = match parts.next() {
        Some(ms) => ms.parse().ok()?,
        None => 0,
    };
    if parts.next().is_some() {
        return None;
    }

    let time = time.with_nanosecond(millis * 1_000_000)?;
    Some(NaiveDateTime::new(date, time).and_utc())
}
