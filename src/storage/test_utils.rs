use crate::config::ConfigManager;
use crate::storage::json::JsonStorage;
use crate::storage::{MemoryStorage, Storage, StorageError};
use std::sync::atomic::{AtomicBool, Ordering};
use tempfile::TempDir;

pub struct TestStorage {
    temp_dir: TempDir,
    storage: JsonStorage,
}

impl TestStorage {
    pub fn new() -> Self {
        let temp_dir = tempfile::Builder::new()
            .prefix("loadout_test")
            .tempdir()
            .expect("Failed to create temporary directory");

        let storage = JsonStorage::new(temp_dir.path().join("test_storage.json"));
        Self { temp_dir, storage }
    }

    pub fn storage(&self) -> &dyn Storage {
        &self.storage
    }

    pub fn path(&self) -> std::path::PathBuf {
        self.temp_dir.path().join("test_storage.json")
    }
}

/// Creates a config manager whose config file and data file both live in a
/// temporary directory, so tests never touch the user's real board.
pub fn create_test_config_manager() -> (ConfigManager, TempDir) {
    let temp_dir = tempfile::Builder::new()
        .prefix("loadout_test")
        .tempdir()
        .expect("Failed to create temporary directory");

    let mut config_manager = ConfigManager::new(Some(&temp_dir.path().join("config.json")))
        .expect("Failed to create config manager");
    let storage_path = temp_dir.path().join("test-data.json");
    config_manager
        .set("storage.type", "json")
        .expect("Failed to set storage.type");
    config_manager
        .set("storage.path", storage_path.to_str().unwrap())
        .expect("Failed to set storage.path");

    (config_manager, temp_dir)
}

/// In-memory storage whose writes can be switched off to simulate a full disk.
#[derive(Default)]
pub struct FlakyStorage {
    inner: MemoryStorage,
    fail_writes: AtomicBool,
}

impl FlakyStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Storage("quota exceeded".to_string()));
        }
        Ok(())
    }
}

impl Storage for FlakyStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check()?;
        self.inner.set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.check()?;
        self.inner.remove_item(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::POSTS_KEY;

    #[test]
    fn test_storage_initialization() {
        let test_storage = TestStorage::new();
        assert_eq!(test_storage.storage().get_item(POSTS_KEY).unwrap(), None);
        assert!(!test_storage.path().exists());
    }

    #[test]
    fn test_flaky_storage_keeps_last_good_value() {
        let storage = FlakyStorage::new();
        storage.set_item(POSTS_KEY, "[]").unwrap();
        storage.fail_writes(true);
        assert!(storage.set_item(POSTS_KEY, "[1]").is_err());
        assert_eq!(storage.get_item(POSTS_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_config_manager() {
        let (config_manager, _temp_dir) = create_test_config_manager();

        let storage_path = config_manager
            .get("storage.path")
            .expect("Storage path not set");
        assert!(storage_path.contains("loadout_test"));

        let storage = config_manager.create_storage().unwrap();
        assert!(storage.get_item(POSTS_KEY).is_ok());
    }
}
