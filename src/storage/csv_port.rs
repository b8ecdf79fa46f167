use super::*;

use csv::{Reader, Writer};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::prelude::{ContactFields, ContactStore, View};

pub const IMPORT_PATH: &str = "./import_export/contacts.csv";
pub const EXPORT_PATH: &str = "./import_export/exported.csv";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportRecord<'a> {
    id: u64,
    name: &'a str,
    email: &'a str,
    phone: &'a str,
    address: &'a str,
    date_added: String,
    date_updated: String,
}

#[derive(Debug, Deserialize)]
struct ImportRecord {
    name: String,
    email: String,
    phone: String,
    #[serde(default)]
    address: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: u64,
    pub skipped: u64,
}

/// Writes every contact of `view` to a CSV file and returns where it went.
pub fn export_contacts_to_csv(
    view: &View<'_>,
    dest: Option<&str>,
) -> Result<(PathBuf, u64), AppError> {
    let mut file_path = PathBuf::from(EXPORT_PATH);

    if let Some(path) = dest {
        file_path = PathBuf::from(path);

        if file_path.is_dir() {
            file_path = file_path.join("exported.csv");
        } else if file_path.extension().is_none_or(|ext| ext != "csv") {
            return Err(AppError::Validation(
                "Export file must be a .csv file".to_string(),
            ));
        }
    }

    create_file_parent(&file_path)?;
    let mut writer = Writer::from_path(&file_path)?;

    let mut counter: u64 = 0;
    for contact in view.iter() {
        writer.serialize(ExportRecord {
            id: contact.id.0,
            name: &contact.name,
            email: &contact.email,
            phone: &contact.phone,
            address: contact.address.as_deref().unwrap_or_default(),
            date_added: contact.added_on(),
            date_updated: contact.updated_on().unwrap_or_default(),
        })?;
        counter += 1;
    }

    writer.flush()?;

    info!("Exported {} contact(s) to {:?}", counter, file_path);
    Ok((file_path, counter))
}

/// Adds every row of a `name,email,phone[,address]` CSV file to `store`.
///
/// Each row goes through [`ContactStore::create`], so it gets a fresh id.
/// Rows with an empty required field are skipped.
pub fn import_contacts_from_csv(
    store: &mut ContactStore,
    src: Option<&str>,
) -> Result<(PathBuf, ImportSummary), AppError> {
    let file_path = PathBuf::from(src.unwrap_or(IMPORT_PATH));

    if !file_path.exists() {
        return Err(AppError::Config(format!(
            "CSV file {:?} not found",
            file_path
        )));
    }

    if file_path.extension().is_none_or(|ext| ext != "csv") {
        return Err(AppError::Validation("File not .csv".to_string()));
    }

    let mut reader = Reader::from_path(&file_path)?;
    let mut summary = ImportSummary::default();

    for (line, result) in reader.deserialize().enumerate() {
        let record: ImportRecord = result?;
        let fields = ContactFields {
            name: record.name,
            email: record.email,
            phone: record.phone,
            address: record.address,
        };

        match store.create(fields) {
            Ok(_) => summary.imported += 1,
            Err(e) if e.is_validation() => {
                warn!("Skipping CSV row {}: {}", line + 2, e);
                summary.skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    info!(
        "Imported {} contact(s) from {:?}, skipped {}",
        summary.imported, file_path, summary.skipped
    );
    Ok((file_path, summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::MemoryStorage;

    #[test]
    fn export_then_import_copies_contacts() -> Result<(), AppError> {
        let dir = tempfile::tempdir()?;

        let mut store = ContactStore::initialize(Box::new(MemoryStorage::new()))?;
        store.create(ContactFields::new("Ann Lee", "ann@x.com", "555-1111").with_address("1 Main St"))?;
        store.create(ContactFields::new("Bob", "bob@y.org", "555-2222"))?;

        let (path, total) =
            export_contacts_to_csv(&store.get_all(), dir.path().to_str())?;
        assert_eq!(total, 2);
        assert_eq!(path, dir.path().join("exported.csv"));

        let mut other = ContactStore::initialize(Box::new(MemoryStorage::new()))?;
        let (_, summary) = import_contacts_from_csv(&mut other, path.to_str())?;

        assert_eq!(summary, ImportSummary { imported: 2, skipped: 0 });
        let imported: Vec<(&str, Option<&str>)> = other
            .get_all()
            .iter()
            .map(|c| (c.name.as_str(), c.address.as_deref()))
            .collect();
        assert_eq!(imported, vec![("Ann Lee", Some("1 Main St")), ("Bob", None)]);
        Ok(())
    }

    #[test]
    fn import_skips_rows_missing_required_fields() -> Result<(), AppError> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("contacts.csv");
        fs::write(
            &path,
            "name,email,phone,address\nAnn,ann@x.com,555,\n,nobody@x.com,556,\nCid,cid@x.com,557,Elm Rd\n",
        )?;

        let mut store = ContactStore::initialize(Box::new(MemoryStorage::new()))?;
        let (_, summary) = import_contacts_from_csv(&mut store, path.to_str())?;

        assert_eq!(summary, ImportSummary { imported: 2, skipped: 1 });
        assert_eq!(store.len(), 2);
        Ok(())
    }

    #[test]
    fn rejects_non_csv_paths() -> Result<(), AppError> {
        let dir = tempfile::tempdir()?;
        let txt = dir.path().join("contacts.txt");
        fs::write(&txt, "name,email,phone\n")?;

        let mut store = ContactStore::initialize(Box::new(MemoryStorage::new()))?;

        assert!(import_contacts_from_csv(&mut store, txt.to_str()).is_err());
        assert!(export_contacts_to_csv(&store.get_all(), txt.to_str()).is_err());
        assert!(import_contacts_from_csv(&mut store, Some("./does/not/exist.csv")).is_err());
        Ok(())
    }
}
