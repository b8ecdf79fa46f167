use std::env;
use std::path::PathBuf;

use dotenv::dotenv;

use crate::prelude::AppError;
use crate::storage::StorageMedium;

pub const DEFAULT_DATA_DIR: &str = "./.instance";
pub const DEFAULT_STORAGE_KEY: &str = "contacts";

pub const STORAGE_ENV: &str = "CONTACTS_STORAGE";
pub const DATA_DIR_ENV: &str = "CONTACTS_DATA_DIR";
pub const STORAGE_KEY_ENV: &str = "CONTACTS_STORAGE_KEY";

#[derive(Debug, Clone)]
pub struct Config {
    pub storage_medium: StorageMedium,
    pub data_dir: PathBuf,
    pub storage_key: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            storage_medium: StorageMedium::File,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl Config {
    /// Reads settings from the environment, after loading `.env` if present.
    pub fn from_env() -> Result<Self, AppError> {
        dotenv().ok();

        let defaults = Config::default();

        let storage_medium = match env::var(STORAGE_ENV) {
            Ok(choice) => StorageMedium::from(&choice)?,
            Err(_) => defaults.storage_medium,
        };

        let data_dir = env::var(DATA_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);

        let storage_key = env::var(STORAGE_KEY_ENV).unwrap_or(defaults.storage_key);

        Config::new(storage_medium, data_dir, &storage_key)
    }

    pub fn new(
        storage_medium: StorageMedium,
        data_dir: impl Into<PathBuf>,
        storage_key: &str,
    ) -> Result<Self, AppError> {
        let storage_key = storage_key.trim();

        if storage_key.is_empty() {
            return Err(AppError::Config("storage key must not be empty".to_string()));
        }
        if storage_key.contains(['/', '\\']) {
            return Err(AppError::Config(format!(
                "storage key '{storage_key}' must not contain path separators"
            )));
        }

        Ok(Config {
            storage_medium,
            data_dir: data_dir.into(),
            storage_key: storage_key.to_string(),
        })
    }
}

impl Config {
    /// Applies command line values on top of this configuration.
    pub fn with_overrides(
        self,
        storage_medium: Option<&str>,
        data_dir: Option<PathBuf>,
        storage_key: Option<&str>,
    ) -> Result<Self, AppError> {
        let storage_medium = match storage_medium {
            Some(choice) => StorageMedium::from(choice)?,
            None => self.storage_medium,
        };

        Config::new(
            storage_medium,
            data_dir.unwrap_or(self.data_dir),
            storage_key.unwrap_or(&self.storage_key),
        )
    }
}
