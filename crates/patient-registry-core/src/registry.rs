//! CRUD orchestration over a record store.

use thiserror::Error;

use crate::models::{Patient, PatientDraft, PatientPatch, PatientRecord, ValidationError};
use crate::query::{self, QueryError, SortField, SortOrder};
use crate::store::{Collection, RecordStore, StoreError};

/// Registry errors.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("patient not found: {0}")]
    NotFound(String),

    #[error("patient already exists: {0}")]
    Conflict(String),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type RegistryResult<T> = Result<T, RegistryError>;

/// Patient registry: validates, derives, and persists patient records.
///
/// Every operation performs its own full load-mutate-save cycle against the
/// underlying store; nothing is cached between calls. Cycles from
/// concurrent callers are not serialized, so two overlapping mutations can
/// lose the earlier one's save. That is an accepted limitation at the
/// intended single-process, low-concurrency scale; a deployment expecting
/// more should put a serialization point (single-writer queue or per-key
/// lock) in front of the store.
pub struct Registry<S: RecordStore> {
    store: S,
}

impl<S: RecordStore> Registry<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Validate and store a new patient.
    ///
    /// Fails with [`RegistryError::Conflict`] if the id is already taken.
    pub fn create(&self, draft: PatientDraft) -> RegistryResult<Patient> {
        let patient = Patient::from_draft(draft)?;
        let mut collection = self.store.load()?;
        if collection.contains_key(&patient.id) {
            return Err(RegistryError::Conflict(patient.id.clone()));
        }
        collection.insert(patient.id.clone(), patient.to_record());
        self.store.save(&collection)?;
        tracing::info!(id = %patient.id, "created patient");
        Ok(patient)
    }

    /// Single record by id.
    pub fn get(&self, id: &str) -> RegistryResult<PatientRecord> {
        let collection = self.store.load()?;
        collection
            .get(id)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))
    }

    /// The full collection, keyed by id.
    pub fn list(&self) -> RegistryResult<Collection> {
        Ok(self.store.load()?)
    }

    /// All records ordered by a whitelisted field.
    ///
    /// `sort_by` must be one of `height`, `weight`, or `bmi`; `order` must
    /// be `asc` or `desc`.
    pub fn sorted(&self, sort_by: &str, order: &str) -> RegistryResult<Vec<PatientRecord>> {
        let field: SortField = sort_by.parse()?;
        let order: SortOrder = order.parse()?;
        let collection = self.store.load()?;
        Ok(query::sort_records(&collection, field, order))
    }

    /// Apply a sparse patch to an existing patient and persist the result.
    ///
    /// The whole merged record is re-validated and its derived metrics
    /// refreshed before anything is written back.
    pub fn update(&self, id: &str, patch: &PatientPatch) -> RegistryResult<Patient> {
        let mut collection = self.store.load()?;
        let record = collection
            .get(id)
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))?;
        let current = Patient::from_record(id.to_string(), record);
        let updated = patch.apply(&current)?;
        collection.insert(updated.id.clone(), updated.to_record());
        self.store.save(&collection)?;
        tracing::info!(id = %updated.id, "updated patient");
        Ok(updated)
    }

    /// Remove a patient by id.
    pub fn delete(&self, id: &str) -> RegistryResult<()> {
        let mut collection = self.store.load()?;
        if collection.remove(id).is_none() {
            return Err(RegistryError::NotFound(id.to_string()));
        }
        self.store.save(&collection)?;
        tracing::info!(id, "deleted patient");
        Ok(())
    }
}
