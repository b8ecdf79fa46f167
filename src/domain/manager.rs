use super::*;

use log::{debug, info, warn};
use serde_json::Value;
use std::collections::HashSet;

use crate::config::DEFAULT_STORAGE_KEY;
use crate::storage::KeyValueStorage;

/// Owns the contact collection and the storage slot it is persisted to.
///
/// Every mutation rewrites the whole collection to the slot. If that write
/// fails the in-memory collection is restored, so callers never observe a
/// change that was not persisted.
pub struct ContactStore {
    contacts: Vec<Contact>,
    storage: Box<dyn KeyValueStorage>,
    key: String,
    ids: IdGenerator,
}

impl ContactStore {
    pub fn initialize(storage: Box<dyn KeyValueStorage>) -> Result<Self, AppError> {
        Self::initialize_with_key(storage, DEFAULT_STORAGE_KEY)
    }

    /// Loads the collection stored under `key`.
    ///
    /// A missing or empty slot yields an empty collection, and so does a slot
    /// holding data that does not parse. Read failures are returned.
    pub fn initialize_with_key(
        storage: Box<dyn KeyValueStorage>,
        key: &str,
    ) -> Result<Self, AppError> {
        let contacts = match storage.get_item(key)? {
            Some(data) if !data.trim().is_empty() => parse_collection(&data),
            _ => Vec::new(),
        };

        info!(
            "Loaded {} contact(s) from {} storage slot '{}'",
            contacts.len(),
            storage.get_medium(),
            key
        );

        let ids = IdGenerator::seeded(contacts.iter().map(|c| &c.id));

        Ok(ContactStore {
            contacts,
            storage,
            key: key.to_string(),
            ids,
        })
    }

    /// Ends the store's lifetime and returns the storage it wrote to.
    pub fn dispose(self) -> Box<dyn KeyValueStorage> {
        debug!("Disposing contact store for slot '{}'", self.key);
        self.storage
    }

    pub fn create(&mut self, fields: ContactFields) -> Result<Contact, AppError> {
        let fields = fields.trimmed();

        let missing = fields.missing_required();
        if !missing.is_empty() {
            return Err(AppError::missing_fields(&missing));
        }

        let contact = Contact::new(self.ids.next_id()?, fields);
        self.contacts.push(contact.clone());

        if let Err(e) = self.persist() {
            self.contacts.pop();
            return Err(e);
        }

        info!("Contact {} added", contact.id);
        Ok(contact)
    }

    pub fn update(&mut self, id: ContactId, patch: ContactPatch) -> Result<Contact, AppError> {
        let patch = patch.trimmed();

        let blank = patch.blank_required();
        if !blank.is_empty() {
            return Err(AppError::missing_fields(&blank));
        }

        let index = self.position(id).ok_or(AppError::NotFound(id))?;

        let previous = self.contacts[index].clone();
        self.contacts[index].apply(patch);

        if let Err(e) = self.persist() {
            self.contacts[index] = previous;
            return Err(e);
        }

        info!("Contact {} updated", id);
        Ok(self.contacts[index].clone())
    }

    /// Removes the contact if present. Deleting an unknown id is not an error.
    pub fn delete(&mut self, id: ContactId) -> Result<(), AppError> {
        let position = self.position(id);
        let removed = position.map(|index| (index, self.contacts.remove(index)));

        if let Err(e) = self.persist() {
            if let Some((index, contact)) = removed {
                self.contacts.insert(index, contact);
            }
            return Err(e);
        }

        match removed {
            Some(_) => info!("Contact {} deleted", id),
            None => debug!("Contact {} already absent, nothing deleted", id),
        }
        Ok(())
    }

    pub fn search(&self, term: &str) -> View<'_> {
        search::filter(&self.contacts, term)
    }

    pub fn get_all(&self) -> View<'_> {
        self.contacts.iter().collect()
    }

    pub fn get(&self, id: ContactId) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id == id)
    }

    pub fn count(view: &View<'_>) -> usize {
        search::count(view)
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    fn position(&self, id: ContactId) -> Option<usize> {
        self.contacts.iter().position(|c| c.id == id)
    }

    fn persist(&self) -> Result<(), AppError> {
        let data = serde_json::to_string(&self.contacts)?;
        self.storage.set_item(&self.key, &data)?;

        debug!(
            "Persisted {} contact(s) to {} storage slot '{}'",
            self.contacts.len(),
            self.storage.get_medium(),
            self.key
        );
        Ok(())
    }
}

/// Reads the stored list record by record. Records that do not parse, or
/// repeat an id already seen, are dropped with a warning.
fn parse_collection(data: &str) -> Vec<Contact> {
    let records: Vec<Value> = match serde_json::from_str(data) {
        Ok(records) => records,
        Err(e) => {
            warn!("Stored contacts are unreadable, starting with an empty list: {e}");
            return Vec::new();
        }
    };

    let mut seen = HashSet::new();
    let mut contacts = Vec::with_capacity(records.len());

    for (position, record) in records.into_iter().enumerate() {
        let contact: Contact = match serde_json::from_value(record) {
            Ok(contact) => contact,
            Err(e) => {
                warn!("Dropping unreadable stored contact at position {position}: {e}");
                continue;
            }
        };

        if !seen.insert(contact.id) {
            warn!("Dropping stored contact with duplicate id {}", contact.id);
            continue;
        }
        contacts.push(contact);
    }
    contacts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    struct FailingStorage;

    impl KeyValueStorage for FailingStorage {
        fn get_item(&self, _key: &str) -> Result<Option<String>, AppError> {
            Ok(None)
        }

        fn set_item(&self, _key: &str, _value: &str) -> Result<(), AppError> {
            Err(AppError::Io(std::io::Error::other("disk full")))
        }

        fn get_medium(&self) -> &str {
            "failing"
        }
    }

    fn empty_store() -> Result<ContactStore, AppError> {
        ContactStore::initialize(Box::new(MemoryStorage::new()))
    }

    fn ann() -> ContactFields {
        ContactFields::new("Ann Lee", "ann@x.com", "555-1111")
    }

    #[test]
    fn create_appends_and_persists() -> Result<(), AppError> {
        let mut store = empty_store()?;

        let first = store.create(ann())?;
        let second = store.create(ContactFields::new("Bob", "bob@y.org", "555-2222"))?;

        assert_ne!(first.id, second.id);
        assert_eq!(
            store.get_all().iter().map(|c| c.id).collect::<Vec<_>>(),
            vec![first.id, second.id]
        );

        let storage = store.dispose();
        let stored = storage.get_item("contacts")?.unwrap_or_default();
        let stored: Vec<Contact> = serde_json::from_str(&stored)?;
        assert_eq!(stored, vec![first, second]);
        Ok(())
    }

    #[test]
    fn create_rejects_blank_required_fields() -> Result<(), AppError> {
        let mut store = empty_store()?;

        let err = store
            .create(ContactFields::new("Ann", "   ", "555"))
            .unwrap_err();

        assert!(err.is_validation());
        assert!(store.is_empty());
        Ok(())
    }

    #[test]
    fn update_validates_provided_fields() -> Result<(), AppError> {
        let mut store = empty_store()?;
        let contact = store.create(ann())?;

        let err = store
            .update(contact.id, ContactPatch::default().phone(" "))
            .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(store.get(contact.id), Some(&contact));
        Ok(())
    }

    #[test]
    fn update_unknown_id_is_not_found() -> Result<(), AppError> {
        let mut store = empty_store()?;

        let err = store
            .update(ContactId(1), ContactPatch::default().name("X"))
            .unwrap_err();

        assert!(err.is_not_found());
        Ok(())
    }

    #[test]
    fn failed_persist_rolls_back() -> Result<(), AppError> {
        let mut store = ContactStore::initialize(Box::new(FailingStorage))?;

        assert!(store.create(ann()).is_err());
        assert!(store.is_empty());
        Ok(())
    }

    #[test]
    fn malformed_storage_yields_empty_collection() -> Result<(), AppError> {
        let storage = MemoryStorage::with_item("contacts", "{ not json");
        let mut store = ContactStore::initialize(Box::new(storage))?;

        assert!(store.is_empty());

        // The store stays usable and overwrites the bad data
        store.create(ann())?;
        let storage = store.dispose();
        let reloaded = ContactStore::initialize(storage)?;
        assert_eq!(reloaded.len(), 1);
        Ok(())
    }

    #[test]
    fn duplicate_stored_ids_are_dropped() -> Result<(), AppError> {
        let data = r#"[
            {"id":5,"name":"A","email":"a@x","phone":"1","dateAdded":"2024-01-01T00:00:00Z"},
            {"id":5,"name":"B","email":"b@x","phone":"2","dateAdded":"2024-01-02T00:00:00Z"},
            {"id":6,"name":"C","email":"c@x","phone":"3","dateAdded":"2024-01-03T00:00:00Z"}
        ]"#;
        let store = ContactStore::initialize(Box::new(MemoryStorage::with_item("contacts", data)))?;

        let names: Vec<&str> = store.get_all().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["A", "C"]);
        Ok(())
    }

    #[test]
    fn new_ids_stay_above_stored_ids() -> Result<(), AppError> {
        let far_future = u64::MAX / 2;
        let data = format!(
            r#"[{{"id":{far_future},"name":"A","email":"a@x","phone":"1","dateAdded":"2024-01-01T00:00:00Z"}}]"#
        );
        let mut store =
            ContactStore::initialize(Box::new(MemoryStorage::with_item("contacts", &data)))?;

        let created = store.create(ann())?;
        assert!(created.id.0 > far_future);
        Ok(())
    }

    #[test]
    fn unreadable_record_does_not_hide_the_others() -> Result<(), AppError> {
        let data = r#"[
            {"id":1,"name":"A","email":"a@x","phone":"1","dateAdded":"2024-01-01T00:00:00Z"},
            {"id":2,"name":"B","email":"b@x","phone":"2","dateAdded":"2024-01-02T00:00:00Z"},
            {"id":3,"name":"C","email":"c@x","phone":"3","dateAdded":"10/18/2026, 3:00:00 PM"}
        ]"#;
        let mut store =
            ContactStore::initialize(Box::new(MemoryStorage::with_item("contacts", data)))?;

        let names: Vec<&str> = store.get_all().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);

        // Saving again keeps the readable records
        store.create(ann())?;
        let reloaded = ContactStore::initialize(store.dispose())?;
        let names: Vec<&str> = reloaded.get_all().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "Ann Lee"]);
        Ok(())
    }

    #[test]
    fn create_fails_cleanly_when_ids_run_out() -> Result<(), AppError> {
        let data = format!(
            r#"[{{"id":{},"name":"A","email":"a@x","phone":"1","dateAdded":"2024-01-01T00:00:00Z"}}]"#,
            u64::MAX
        );
        let mut store =
            ContactStore::initialize(Box::new(MemoryStorage::with_item("contacts", &data)))?;

        let err = store.create(ann()).unwrap_err();

        assert!(matches!(err, AppError::IdsExhausted(ContactId(u64::MAX))));
        assert_eq!(store.len(), 1);
        Ok(())
    }

    #[test]
    fn custom_key_is_used() -> Result<(), AppError> {
        let mut store = ContactStore::initialize_with_key(Box::new(MemoryStorage::new()), "work")?;
        store.create(ann())?;

        let storage = store.dispose();
        assert!(storage.get_item("work")?.is_some());
        assert!(storage.get_item("contacts")?.is_none());
        Ok(())
    }
}
