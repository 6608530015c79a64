use crate::feed::POSTS_PER_PAGE;
use crate::storage::config::StorageConfig;
use crate::storage::{create_storage, Storage, StorageError, StorageType};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable that points at an alternate config file.
pub const CONFIG_ENV: &str = "LOADOUT_BOARD_CONFIG";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

impl From<StorageError> for ConfigError {
    fn from(error: StorageError) -> Self {
        ConfigError::Storage(error.to_string())
    }
}

const VALID_STORAGE_TYPES: &[&str] = &["json", "sqlite"];

/// Largest accepted `feed.page-size`.
pub const MAX_PAGE_SIZE: usize = 1000;

/// Keys accepted by `get`, `set` and `unset`, in listing order.
pub const CONFIG_KEYS: &[&str] = &[
    "storage.type",
    "storage.path",
    "feed.page-size",
    "clipboard.command",
];

fn validate_storage_path(path: &str) -> Result<PathBuf, ConfigError> {
    // Check for null bytes and other invalid characters
    if path.contains('\0') {
        return Err(ConfigError::InvalidConfig(
            "Path contains invalid characters".to_string(),
        ));
    }

    let path = shellexpand::tilde(path);
    let path = PathBuf::from(path.as_ref());

    if path.as_os_str().is_empty() {
        return Err(ConfigError::InvalidConfig(
            "Path cannot be empty".to_string(),
        ));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            return Err(ConfigError::InvalidConfig(format!(
                "Parent directory does not exist: {}",
                parent.display()
            )));
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::MetadataExt;
            if let Ok(metadata) = parent.metadata() {
                if metadata.mode() & 0o200 == 0 {
                    return Err(ConfigError::InvalidConfig(format!(
                        "Directory is not writable: {}",
                        parent.display()
                    )));
                }
            }
        }
    }

    Ok(path)
}

fn validate_storage_type(value: &str) -> Result<(), ConfigError> {
    if !VALID_STORAGE_TYPES.contains(&value) {
        return Err(ConfigError::InvalidConfig(format!(
            "storage.type must be one of: {}",
            VALID_STORAGE_TYPES.join(", ")
        )));
    }
    Ok(())
}

fn page_size_error() -> ConfigError {
    ConfigError::InvalidConfig(format!(
        "feed.page-size must be an integer between 1 and {}",
        MAX_PAGE_SIZE
    ))
}

fn validate_page_size(value: &str) -> Result<usize, ConfigError> {
    match value.parse::<usize>() {
        Ok(size) if (1..=MAX_PAGE_SIZE).contains(&size) => Ok(size),
        _ => Err(page_size_error()),
    }
}

fn validate_clipboard_command(value: &str) -> Result<(), ConfigError> {
    if value.split_whitespace().next().is_none() {
        return Err(ConfigError::InvalidConfig(
            "clipboard.command cannot be empty".to_string(),
        ));
    }
    Ok(())
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub storage_type: Option<String>,
    #[serde(default)]
    pub storage_path: Option<String>,
    #[serde(default)]
    pub page_size: Option<usize>,
    #[serde(default)]
    pub clipboard_command: Option<String>,
}

impl Config {
    pub fn with_defaults() -> Self {
        Self {
            storage_type: default_storage_type(),
            storage_path: default_storage_path(),
            page_size: Some(POSTS_PER_PAGE),
            clipboard_command: None,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref storage_type) = self.storage_type {
            validate_storage_type(storage_type)?;
        }
        if let Some(ref path) = self.storage_path {
            validate_storage_path(path)?;
        }
        if let Some(size) = self.page_size {
            validate_page_size(&size.to_string())?;
        }
        Ok(())
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("loadout-board")
}

fn default_storage_type() -> Option<String> {
    Some("json".to_string())
}

fn default_storage_path() -> Option<String> {
    Some(config_dir().join("data.json").to_string_lossy().to_string())
}

pub struct ConfigManager {
    path: PathBuf,
    config: Config,
}

impl ConfigManager {
    /// Opens the config at `config_path`, or the default location when `None`.
    /// A missing file yields an empty config; nothing is written until `set`.
    pub fn new(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = config_path.map_or_else(
            || config_dir().join("config.json"),
            |p| PathBuf::from(shellexpand::tilde(&p.to_string_lossy()).to_string()),
        );

        let config = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            if contents.trim().is_empty() {
                Config::default()
            } else {
                serde_json::from_str(&contents)?
            }
        } else {
            Config::default()
        };

        // Hand-edited files are not rejected; the accessors fall back per key.
        if let Err(e) = config.validate() {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "configuration has invalid values"
            );
        }
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(Self { path, config })
    }

    /// Honours `LOADOUT_BOARD_CONFIG` when it is set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let path = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        Self::new(path.as_deref())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<(), ConfigError> {
        self.config.validate()?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.config)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let config = &self.config;
        match key {
            "storage.type" => config.storage_type.clone(),
            "storage.path" => config.storage_path.clone(),
            "feed.page-size" => config.page_size.map(|v| v.to_string()),
            "clipboard.command" => config.clipboard_command.clone(),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut config = self.config.clone();

        match key {
            "storage.type" => {
                validate_storage_type(value)?;
                if config.storage_type.as_deref().is_some_and(|old| old != value) {
                    tracing::warn!(
                        from = ?config.storage_type,
                        to = value,
                        "storage type changed; existing posts are not migrated"
                    );
                }
                config.storage_type = Some(value.to_string());
            }
            "storage.path" => {
                let path = validate_storage_path(value)?;
                config.storage_path = Some(path.to_string_lossy().to_string());
            }
            "feed.page-size" => {
                config.page_size = Some(validate_page_size(value)?);
            }
            "clipboard.command" => {
                validate_clipboard_command(value)?;
                config.clipboard_command = Some(value.to_string());
            }
            _ => {
                return Err(ConfigError::InvalidKey(key.to_string()));
            }
        }

        config.validate()?;
        self.config = config;
        self.save()
    }

    pub fn unset(&mut self, key: &str) -> Result<(), ConfigError> {
        match key {
            "storage.type" => self.config.storage_type = None,
            "storage.path" => self.config.storage_path = None,
            "feed.page-size" => self.config.page_size = None,
            "clipboard.command" => self.config.clipboard_command = None,
            _ => return Err(ConfigError::InvalidKey(key.to_string())),
        }
        self.save()
    }

    /// Every known key with its effective value and whether that value is the default.
    pub fn list(&self) -> Vec<(String, String, bool)> {
        let defaults = ConfigManager {
            path: self.path.clone(),
            config: Config::with_defaults(),
        };

        CONFIG_KEYS
            .iter()
            .map(|key| match self.get(key) {
                Some(value) => (key.to_string(), value, false),
                None => (
                    key.to_string(),
                    defaults.get(key).unwrap_or_else(|| "null".to_string()),
                    true,
                ),
            })
            .collect()
    }

    pub fn storage_type(&self) -> StorageType {
        match self.config.storage_type.as_deref().map(str::parse::<StorageType>) {
            Some(Ok(storage_type)) => storage_type,
            Some(Err(_)) => {
                tracing::warn!(
                    storage_type = ?self.config.storage_type,
                    "unknown storage type, falling back to json"
                );
                StorageType::Json
            }
            None => StorageType::Json,
        }
    }

    pub fn storage_path(&self) -> PathBuf {
        self.config
            .storage_path
            .clone()
            .or_else(default_storage_path)
            .map(|p| PathBuf::from(shellexpand::tilde(&p).to_string()))
            .unwrap_or_else(|| config_dir().join("data.json"))
    }

    pub fn page_size(&self) -> usize {
        self.config
            .page_size
            .unwrap_or(POSTS_PER_PAGE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    pub fn clipboard_command(&self) -> Option<&str> {
        self.config.clipboard_command.as_deref()
    }

    pub fn create_storage(&self) -> Result<Box<dyn Storage>, StorageError> {
        let storage_config = StorageConfig::from_config_manager(self);
        create_storage(storage_config.storage_type, &storage_config.storage_path)
    }
}
