pub mod csv_port;
pub mod file;
pub mod memory;

use crate::config::Config;
use crate::prelude::AppError;
use std::fs;
use std::path::Path;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// A durable slot per key, the contract of a browser's local storage.
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, AppError>;

    fn set_item(&self, key: &str, value: &str) -> Result<(), AppError>;

    fn get_medium(&self) -> &str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageMedium {
    Memory,
    File,
}

impl StorageMedium {
    pub fn is_memory(&self) -> bool {
        matches!(self, StorageMedium::Memory)
    }

    pub fn is_file(&self) -> bool {
        matches!(self, StorageMedium::File)
    }

    pub fn is_which(&self) -> &str {
        if self.is_memory() { "memory" } else { "file" }
    }

    pub fn from(str: &str) -> Result<Self, AppError> {
        match str.trim().to_ascii_lowercase().as_str() {
            "memory" | "mem" => Ok(StorageMedium::Memory),
            "file" | "json" => Ok(StorageMedium::File),
            other => Err(AppError::Config(format!(
                "'{other}' is not a recognized storage medium"
            ))),
        }
    }
}

pub fn parse_storage_type(config: &Config) -> Box<dyn KeyValueStorage> {
    match config.storage_medium {
        StorageMedium::Memory => Box::new(MemoryStorage::new()),
        StorageMedium::File => Box::new(FileStorage::new(&config.data_dir)),
    }
}

pub fn create_file_parent(path: &Path) -> Result<(), AppError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_missing_parent_directories() -> Result<(), AppError> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("a").join("b").join("contacts.json");

        create_file_parent(&path)?;
        assert!(dir.path().join("a").join("b").is_dir());

        // Bare file names have no parent to create
        create_file_parent(Path::new("contacts.json"))?;
        Ok(())
    }

    #[test]
    fn parses_storage_medium_names() -> Result<(), AppError> {
        assert!(StorageMedium::from("mem")?.is_memory());
        assert!(StorageMedium::from("Memory")?.is_memory());
        assert!(StorageMedium::from("json")?.is_file());
        assert_eq!(StorageMedium::from(" file ")?.is_which(), "file");
        assert!(StorageMedium::from("sqlite").is_err());
        Ok(())
    }
}
