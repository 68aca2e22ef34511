//! Settings service
//!
//! Every settings change is saved and audited in one step.

use crate::audit::EntityType;
use crate::config::settings::Settings;
use crate::error::BuckwheatResult;
use crate::storage::Storage;

const SETTINGS_ENTITY_ID: &str = "settings";

pub struct SettingsService<'a> {
    storage: &'a Storage,
}

impl<'a> SettingsService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn load(&self) -> BuckwheatResult<Settings> {
        Settings::load_or_create(self.storage.paths())
    }

    /// Apply `change` to the stored settings
    ///
    /// Nothing is written when `change` fails or leaves the settings as they
    /// were.
    pub fn update<F>(&self, change: F) -> BuckwheatResult<Settings>
    where
        F: FnOnce(&mut Settings) -> BuckwheatResult<()>,
    {
        let before = self.load()?;
        let mut after = before.clone();
        change(&mut after)?;

        let before_json = serde_json::to_value(&before)?;
        let after_json = serde_json::to_value(&after)?;
        if before_json == after_json {
            tracing::debug!("settings unchanged");
            return Ok(after);
        }

        after.save(self.storage.paths())?;
        self.storage.log_update(
            EntityType::Settings,
            SETTINGS_ENTITY_ID,
            None,
            &before_json,
            &after_json,
        )?;

        tracing::info!("settings updated");
        Ok(after)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::BuckwheatPaths;
    use crate::error::BuckwheatError;
    use crate::models::{CurrencyTag, RedistributionMethod};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BuckwheatPaths::with_base_dir(temp_dir.path().to_path_buf());
        (temp_dir, Storage::new(paths).unwrap())
    }

    #[test]
    fn test_update_saves_and_audits() {
        let (_temp_dir, storage) = create_test_storage();
        let service = SettingsService::new(&storage);

        service
            .update(|s| {
                s.redistribution_method = RedistributionMethod::AddToday;
                s.currency = CurrencyTag::from_list("GBP")
                    .map_err(|e| BuckwheatError::Validation(e.to_string()))?;
                Ok(())
            })
            .unwrap();

        let loaded = service.load().unwrap();
        assert_eq!(loaded.redistribution_method, RedistributionMethod::AddToday);
        assert_eq!(loaded.currency, CurrencyTag::FromList("GBP".into()));

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert!(entries[0]
            .diff_summary
            .as_deref()
            .unwrap()
            .contains("redistribution_method"));
    }

    #[test]
    fn test_failed_or_empty_change_writes_nothing() {
        let (_temp_dir, storage) = create_test_storage();
        let service = SettingsService::new(&storage);

        assert!(service.update(|s| s.set_fraction_digits(5, 1)).is_err());
        service.update(|_| Ok(())).unwrap();

        assert!(!storage.paths().settings_file().exists());
        assert!(storage.audit().read_all().unwrap().is_empty());
    }
}
