//! First-run setup

use crate::config::paths::BuckwheatPaths;
use crate::config::settings::Settings;
use crate::error::BuckwheatError;

use super::budget::BudgetData;
use super::file_io::write_json_atomic;

/// Create the directory layout, default settings and empty data files
///
/// Existing files are left alone, so running it twice is harmless.
pub fn initialize_storage(paths: &BuckwheatPaths) -> Result<(), BuckwheatError> {
    paths.ensure_directories()?;

    if !paths.settings_file().exists() {
        Settings::default().save(paths)?;
    }

    if !paths.budget_file().exists() {
        write_json_atomic(paths.budget_file(), &BudgetData::default())?;
    }

    if !paths.spends_file().exists() {
        write_json_atomic(paths.spends_file(), &serde_json::json!({ "spends": [] }))?;
    }

    tracing::info!(base = %paths.base_dir().display(), "storage initialized");
    Ok(())
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &BuckwheatPaths) -> bool {
    !paths.is_initialized()
}
