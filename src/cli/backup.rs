//! Backup CLI commands

use chrono::{DateTime, Utc};
use clap::Subcommand;
use std::path::PathBuf;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::backup::{BackupInfo, BackupManager, RestoreManager};
use crate::config::paths::BuckwheatPaths;
use crate::config::settings::Settings;
use crate::error::{BuckwheatError, BuckwheatResult};

/// Backup subcommands
#[derive(Subcommand)]
pub enum BackupCommands {
    /// Snapshot settings, wallet and spends into one archive
    Create,

    /// List available backups, newest first
    List,

    /// Restore from a backup
    Restore {
        /// Backup filename or path ('latest' for the most recent)
        backup: String,

        /// Overwrite the current data without asking
        #[arg(short, long)]
        force: bool,
    },

    /// Check that a backup can be restored
    Validate {
        /// Backup filename or path ('latest' for the most recent)
        backup: String,
    },

    /// Delete backups beyond the retention policy
    Prune,
}

#[derive(Tabled)]
struct BackupRow {
    #[tabled(rename = "File")]
    filename: String,
    #[tabled(rename = "Created")]
    created: String,
    #[tabled(rename = "Age")]
    age: String,
    #[tabled(rename = "Size")]
    size: String,
    #[tabled(rename = "Kind")]
    kind: &'static str,
}

fn backup_rows(backups: &[BackupInfo], now: DateTime<Utc>) -> Vec<BackupRow> {
    backups
        .iter()
        .map(|b| BackupRow {
            filename: b.filename.clone(),
            created: b.created_at.format("%Y-%m-%d %H:%M UTC").to_string(),
            age: format_age(now.signed_duration_since(b.created_at)),
            size: format_size(b.size_bytes),
            kind: if b.is_monthly { "monthly" } else { "daily" },
        })
        .collect()
}

/// Handle a backup command
pub fn handle_backup_command(
    paths: &BuckwheatPaths,
    settings: &Settings,
    cmd: BackupCommands,
) -> BuckwheatResult<()> {
    let manager = BackupManager::new(paths.clone(), settings.backup_retention.clone());
    let restorer = RestoreManager::new(paths.clone());

    match cmd {
        BackupCommands::Create => {
            let (path, pruned) = manager.create_backup_with_retention()?;
            println!("Backup created: {}", path.display());
            if !pruned.is_empty() {
                println!("Pruned {} old backup(s).", pruned.len());
            }
        }

        BackupCommands::List => {
            let backups = manager.list_backups()?;
            if backups.is_empty() {
                println!("No backups found.");
                println!("Create one with: buckwheat backup create");
                return Ok(());
            }

            let table = Table::new(backup_rows(&backups, Utc::now()))
                .with(Style::rounded())
                .to_string();
            println!("{}", table);
            println!("Total: {} backup(s)", backups.len());
        }

        BackupCommands::Restore { backup, force } => {
            let path = resolve_backup_path(&manager, paths, &backup)?;
            let validation = restorer.validate_backup(&path)?;

            println!("File:    {}", path.display());
            println!(
                "Created: {}",
                validation.backup_date.format("%Y-%m-%d %H:%M:%S UTC")
            );
            println!("Status:  {}", validation.summary());

            if !validation.is_valid {
                return Err(BuckwheatError::Backup(format!(
                    "{} cannot be restored",
                    path.display()
                )));
            }

            if !force {
                println!();
                println!("This overwrites the current wallet, spends and settings.");
                println!("Run again with --force to proceed:");
                println!("  buckwheat backup restore {} --force", backup);
                return Ok(());
            }

            let safety = manager.create_backup()?;
            println!("Current data saved to {}", safety.display());

            let result = restorer.restore_from_file(&path)?;
            println!("{}", result.summary());
            if !result.all_restored() {
                println!("Sections missing from the backup were left untouched.");
            }
        }

        BackupCommands::Validate { backup } => {
            let path = resolve_backup_path(&manager, paths, &backup)?;
            let validation = restorer.validate_backup(&path)?;
            let yes_no = |present: bool| if present { "yes" } else { "no" };

            println!("File:     {}", path.display());
            println!(
                "Created:  {}",
                validation.backup_date.format("%Y-%m-%d %H:%M:%S UTC")
            );
            println!("Settings: {}", yes_no(validation.has_settings));
            println!("Wallet:   {}", yes_no(validation.has_budget));
            println!("Spends:   {}", yes_no(validation.has_spends));
            println!("Status:   {}", validation.summary());
        }

        BackupCommands::Prune => {
            let deleted = manager.enforce_retention()?;
            let retention = &settings.backup_retention;
            println!(
                "Deleted {} backup(s); keeping {} daily and {} monthly.",
                deleted.len(),
                retention.daily_count,
                retention.monthly_count
            );
        }
    }

    Ok(())
}

/// Resolve `latest`, a path, or a file name in the backup directory
fn resolve_backup_path(
    manager: &BackupManager,
    paths: &BuckwheatPaths,
    backup: &str,
) -> BuckwheatResult<PathBuf> {
    let not_found = || BuckwheatError::NotFound {
        entity_type: "Backup",
        identifier: backup.to_string(),
    };

    if backup.eq_ignore_ascii_case("latest") {
        return manager
            .get_latest_backup()?
            .map(|b| b.path)
            .ok_or_else(not_found);
    }

    let path = PathBuf::from(backup);
    if path.is_file() {
        return Ok(path);
    }

    let in_dir = paths.backup_dir().join(backup);
    if in_dir.is_file() {
        return Ok(in_dir);
    }

    let with_ext = paths.backup_dir().join(format!("{}.json", backup));
    if with_ext.is_file() {
        return Ok(with_ext);
    }

    Err(not_found())
}

fn format_age(age: chrono::Duration) -> String {
    let minutes = age.num_minutes();
    match minutes {
        m if m < 1 => "just now".to_string(),
        m if m < 60 => format!("{}m", m),
        m if m < 60 * 24 => format!("{}h", m / 60),
        m => format!("{}d", m / (60 * 24)),
    }
}

fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::BackupRetention;
    use chrono::{Duration, TimeZone};
    use tempfile::TempDir;

    #[test]
    fn test_format_age() {
        assert_eq!(format_age(Duration::seconds(20)), "just now");
        assert_eq!(format_age(Duration::minutes(5)), "5m");
        assert_eq!(format_age(Duration::hours(3)), "3h");
        assert_eq!(format_age(Duration::days(40)), "40d");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }

    #[test]
    fn test_backup_rows() {
        let created = Utc.with_ymd_and_hms(2025, 5, 1, 10, 0, 0).unwrap();
        let rows = backup_rows(
            &[BackupInfo {
                filename: "buckwheat-20250501-100000.json".into(),
                path: PathBuf::from("x"),
                created_at: created,
                size_bytes: 100,
                is_monthly: true,
            }],
            created + Duration::hours(2),
        );
        assert_eq!(rows[0].age, "2h");
        assert_eq!(rows[0].kind, "monthly");
        assert_eq!(rows[0].created, "2025-05-01 10:00 UTC");
    }

    #[test]
    fn test_resolve_backup_path() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BuckwheatPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();
        let manager = BackupManager::new(paths.clone(), BackupRetention::default());

        assert!(resolve_backup_path(&manager, &paths, "latest")
            .unwrap_err()
            .is_not_found());

        let created = manager.create_backup().unwrap();
        let name = created.file_name().unwrap().to_string_lossy().to_string();

        assert_eq!(resolve_backup_path(&manager, &paths, "latest").unwrap(), created);
        assert_eq!(resolve_backup_path(&manager, &paths, &name).unwrap(), created);
        let stem = name.trim_end_matches(".json");
        assert_eq!(resolve_backup_path(&manager, &paths, stem).unwrap(), created);
        assert!(resolve_backup_path(&manager, &paths, "nope").is_err());
    }
}
