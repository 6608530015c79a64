use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

pub mod config;
pub mod json;
pub mod memory;
pub mod sqlite;
#[cfg(test)]
pub(crate) mod test_utils;

pub use json::JsonStorage;
pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

/// Key holding the serialized post collection.
pub const POSTS_KEY: &str = "portfolio-posts";
/// Key holding the serialized admin settings.
pub const SETTINGS_KEY: &str = "admin-settings";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Storage error: {0}")]
    Storage(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageType {
    Json,
    Sqlite,
}

impl StorageType {
    pub fn as_str(self) -> &'static str {
        match self {
            StorageType::Json => "json",
            StorageType::Sqlite => "sqlite",
        }
    }
}

impl fmt::Display for StorageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageType {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(StorageType::Json),
            "sqlite" => Ok(StorageType::Sqlite),
            other => Err(StorageError::Storage(format!(
                "Unknown storage type: {}",
                other
            ))),
        }
    }
}

/// String-keyed persistent storage, shaped like a browser's local storage.
pub trait Storage: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

pub fn create_storage(
    storage_type: StorageType,
    path: &Path,
) -> Result<Box<dyn Storage>, StorageError> {
    tracing::debug!(%storage_type, path = %path.display(), "opening storage");
    match storage_type {
        StorageType::Json => {
            let storage = JsonStorage::new(path);
            Ok(Box::new(storage))
        }
        StorageType::Sqlite => {
            let storage = SqliteStorage::new(path)?;
            Ok(Box::new(storage))
        }
    }
}
