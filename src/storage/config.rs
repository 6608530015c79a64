use crate::config::ConfigManager;
use crate::storage::StorageType;
use std::path::PathBuf;

/// Where and how the board's data is kept, resolved from configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub storage_type: StorageType,
    pub storage_path: PathBuf,
}

impl StorageConfig {
    pub fn from_config_manager(manager: &ConfigManager) -> Self {
        Self {
            storage_type: manager.storage_type(),
            storage_path: manager.storage_path(),
        }
    }
}
