use super::*;

use std::cell::RefCell;
use std::collections::HashMap;

/// Volatile storage. Contents live as long as the value does.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populated storage, handy for reproducing stored states.
    pub fn with_item(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage
            .items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        storage
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn get_medium(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stores_and_replaces_items() -> Result<(), AppError> {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get_item("contacts")?, None);

        storage.set_item("contacts", "[]")?;
        assert_eq!(storage.get_item("contacts")?.as_deref(), Some("[]"));

        storage.set_item("contacts", r#"[{"id":1}]"#)?;
        assert_eq!(
            storage.get_item("contacts")?.as_deref(),
            Some(r#"[{"id":1}]"#)
        );
        assert_eq!(storage.get_item("work")?, None);
        Ok(())
    }
}
