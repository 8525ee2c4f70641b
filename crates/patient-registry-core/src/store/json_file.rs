//! JSON file-backed record store.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{Collection, RecordStore, StoreError, StoreResult};

/// Record store backed by a single JSON document on disk.
///
/// The document is an object mapping patient id to the persisted record
/// value. Every save rewrites the whole file.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store over the given path. The file is not touched until
    /// the first load or save.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Seed the backing file with an empty collection if it does not exist.
    pub fn create_if_missing(&self) -> StoreResult<()> {
        if !self.path.exists() {
            self.save(&Collection::new())?;
            tracing::info!(path = %self.path.display(), "seeded empty patient collection");
        }
        Ok(())
    }

    /// Path of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordStore for JsonFileStore {
    fn load(&self) -> StoreResult<Collection> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(StoreError::NotFound(self.path.display().to_string()));
            }
            Err(err) => return Err(err.into()),
        };
        let collection: Collection = serde_json::from_slice(&bytes)?;
        tracing::debug!(
            path = %self.path.display(),
            records = collection.len(),
            "loaded patient collection"
        );
        Ok(collection)
    }

    fn save(&self, collection: &Collection) -> StoreResult<()> {
        let bytes = serde_json::to_vec_pretty(collection)?;
        fs::write(&self.path, bytes)?;
        tracing::debug!(
            path = %self.path.display(),
            records = collection.len(),
            "saved patient collection"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Patient, PatientDraft};

    fn sample_patient(id: &str) -> Patient {
        Patient::from_draft(PatientDraft {
            id: id.into(),
            name: "Ananya".into(),
            age: 30,
            city: "Mumbai".into(),
            height: 1.75,
            weight: 70.0,
        })
        .unwrap()
    }

    #[test]
    fn test_load_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("patients.json"));

        let err = store.load().unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("patients.json"));

        let patient = sample_patient("P001");
        let mut collection = Collection::new();
        collection.insert(patient.id.clone(), patient.to_record());
        store.save(&collection).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, collection);
        assert_eq!(loaded["P001"].bmi, Some(22.86));
    }

    #[test]
    fn test_corrupt_document_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("patients.json");
        fs::write(&path, b"{ not json").unwrap();

        let store = JsonFileStore::new(&path);
        let err = store.load().unwrap_err();
        assert!(matches!(err, StoreError::Corrupt(_)));
    }

    #[test]
    fn test_create_if_missing_seeds_empty_collection() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("patients.json"));

        store.create_if_missing().unwrap();
        assert!(store.load().unwrap().is_empty());

        // a second call must not clobber existing data
        let patient = sample_patient("P001");
        let mut collection = Collection::new();
        collection.insert(patient.id.clone(), patient.to_record());
        store.save(&collection).unwrap();
        store.create_if_missing().unwrap();
        assert_eq!(store.load().unwrap().len(), 1);
    }
}
