use crate::models::{AdminSettings, LinkButton, SettingsPatch};
use crate::storage::{Storage, StorageError, SETTINGS_KEY};

pub struct SettingsStore<'a> {
    storage: &'a dyn Storage,
    settings: AdminSettings,
}

impl<'a> SettingsStore<'a> {
    /// Stored fields overlay the defaults; unreadable data falls back to defaults.
    pub fn load(storage: &'a dyn Storage) -> Self {
        let settings = match storage.get_item(SETTINGS_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "stored settings are unreadable, using defaults");
                AdminSettings::default()
            }),
            Ok(None) => AdminSettings::default(),
            Err(e) => {
                tracing::error!(error = %e, "failed to read settings from storage");
                AdminSettings::default()
            }
        };

        Self { storage, settings }
    }

    pub fn get(&self) -> &AdminSettings {
        &self.settings
    }

    pub fn update(&mut self, patch: SettingsPatch) {
        self.settings.apply(patch);
        tracing::info!("settings updated");
        self.persist();
    }

    /// Header links that have both a label and a URL, left then right.
    pub fn link_buttons(&self) -> (Option<LinkButton>, Option<LinkButton>) {
        (self.settings.left_button(), self.settings.right_button())
    }

    fn persist(&self) {
        let result = serde_json::to_string(&self.settings)
            .map_err(StorageError::from)
            .and_then(|json| self.storage.set_item(SETTINGS_KEY, &json));
        if let Err(e) = result {
            tracing::error!(error = %e, "failed to persist settings");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ColorsPatch;
    use crate::storage::test_utils::FlakyStorage;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_defaults_on_first_load() {
        let storage = MemoryStorage::new();
        let store = SettingsStore::load(&storage);
        assert_eq!(store.get(), &AdminSettings::default());
        assert_eq!(store.get().password, "admin123");
        assert_eq!(storage.get_item(SETTINGS_KEY).unwrap(), None);
    }

    #[test]
    fn test_update_merges_and_persists() {
        let storage = MemoryStorage::new();
        let mut store = SettingsStore::load(&storage);
        store.update(SettingsPatch {
            left_button_text: Some("X".to_string()),
            custom_colors: Some(ColorsPatch {
                background: Some("#000".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        });

        let reloaded = SettingsStore::load(&storage);
        assert_eq!(reloaded.get(), store.get());
        assert_eq!(reloaded.get().left_button_text.as_deref(), Some("X"));
        assert_eq!(reloaded.get().custom_colors.background, "#000");
        assert_eq!(reloaded.get().custom_colors.post_text, "hsl(210 15% 85%)");
        assert_eq!(reloaded.get().right_button_text.as_deref(), Some("Link 2"));
    }

    #[test]
    fn test_unreadable_settings_fall_back_to_defaults() {
        let storage = MemoryStorage::new();
        storage.set_item(SETTINGS_KEY, "[1, 2").unwrap();
        let store = SettingsStore::load(&storage);
        assert_eq!(store.get(), &AdminSettings::default());
    }

    #[test]
    fn test_failed_write_keeps_new_settings_in_memory() {
        let storage = FlakyStorage::new();
        let mut store = SettingsStore::load(&storage);
        storage.fail_writes(true);

        store.update(SettingsPatch {
            password: Some("s3cret".to_string()),
            ..Default::default()
        });
        assert_eq!(store.get().password, "s3cret");
        assert_eq!(storage.get_item(SETTINGS_KEY).unwrap(), None);
    }

    #[test]
    fn test_link_buttons() {
        let storage = MemoryStorage::new();
        let mut store = SettingsStore::load(&storage);
        store.update(SettingsPatch {
            left_button_text: Some(String::new()),
            ..Default::default()
        });

        let (left, right) = store.link_buttons();
        assert_eq!(left, None);
        assert_eq!(right.map(|b| b.label), Some("Link 2".to_string()));
    }
}
