use super::{Storage, StorageError};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// All keys live in a single JSON object on disk, values kept as raw strings.
pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = shellexpand::tilde(&path.as_ref().to_string_lossy()).to_string();
        Self {
            path: PathBuf::from(path),
        }
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>, StorageError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let contents = std::fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        Ok(serde_json::from_str(&contents)?)
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        // Create parent directories if they don't exist
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, json)?;

        // Verify the write was successful by reading back
        let read_back = self.read_entries()?;
        if read_back.len() != entries.len() {
            return Err(StorageError::Storage(
                "Data integrity check failed".to_string(),
            ));
        }

        Ok(())
    }
}

impl Storage for JsonStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.read_entries()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.read_entries()?;
        if entries.remove(key).is_some() {
            self.write_entries(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{POSTS_KEY, SETTINGS_KEY};

    #[test]
    fn test_json_storage_missing_file_is_empty() {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = JsonStorage::new(temp_dir.path().join("absent.json"));
        assert_eq!(storage.get_item(POSTS_KEY).unwrap(), None);
    }

    #[test]
    fn test_json_storage_creates_parent_dirs() {
        let temp_dir = tempfile::Builder::new()
            .prefix("loadout_test_json")
            .tempdir()
            .expect("Failed to create temporary directory");
        let storage_path = temp_dir.path().join("nested").join("data.json");

        let storage = JsonStorage::new(&storage_path);
        storage.set_item(SETTINGS_KEY, "{}").unwrap();
        assert!(storage_path.exists());
    }

    #[test]
    fn test_json_storage_keeps_keys_independent() {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = JsonStorage::new(temp_dir.path().join("data.json"));

        storage.set_item(POSTS_KEY, r#"[{"id":"1"}]"#).unwrap();
        storage.set_item(SETTINGS_KEY, r#"{"password":"x"}"#).unwrap();
        storage.set_item(POSTS_KEY, "[]").unwrap();

        assert_eq!(storage.get_item(POSTS_KEY).unwrap().as_deref(), Some("[]"));
        assert_eq!(
            storage.get_item(SETTINGS_KEY).unwrap().as_deref(),
            Some(r#"{"password":"x"}"#)
        );
    }

    #[test]
    fn test_json_storage_rejects_corrupt_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("data.json");
        std::fs::write(&path, "not json").unwrap();

        let storage = JsonStorage::new(&path);
        assert!(matches!(
            storage.get_item(POSTS_KEY),
            Err(StorageError::Serialization(_))
        ));
    }
}
