//! Persistence layer for the patient collection.

mod json_file;

pub use json_file::*;

use std::collections::BTreeMap;

use thiserror::Error;

use crate::models::PatientRecord;

/// The full set of patient records, keyed by id.
pub type Collection = BTreeMap<String, PatientRecord>;

/// Store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("backing store not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed collection data: {0}")]
    Corrupt(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Whole-collection persistence.
///
/// `load` reads the entire collection into memory; `save` overwrites the
/// entire backing resource. Callers never see partial-collection writes,
/// but a crash mid-save can still truncate the backing document. No
/// locking is performed: concurrent load-mutate-save cycles can race, and
/// the last save wins.
pub trait RecordStore {
    /// Read the entire persisted collection.
    fn load(&self) -> StoreResult<Collection>;

    /// Overwrite the backing resource with the given collection.
    fn save(&self, collection: &Collection) -> StoreResult<()>;
}
