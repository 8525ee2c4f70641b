//! Patient Registry Core Library
//!
//! Validated patient records with derived health metrics (body-mass index
//! and a weight-category verdict), whole-document JSON persistence, and
//! ordered views over the collection.
//!
//! # Architecture
//!
//! ```text
//! client payload → PatientDraft ──validate──▶ Patient
//!                                               │
//!                              bmi() / verdict() derived on demand
//!                                               │
//!                                          to_record()
//!                                               │
//!                  Collection (id → PatientRecord) ◀──load/save──▶ JsonFileStore
//! ```
//!
//! # Derived fields
//!
//! BMI and the verdict are pure functions of the stored height and weight.
//! The persisted document carries them only as a cache for external
//! consumers; they are recomputed on every write and never trusted on read.
//!
//! # Concurrency
//!
//! Each registry operation is an independent load-mutate-save cycle with no
//! cross-caller coordination. Concurrent mutations can race and the last
//! save wins. This is accepted at the intended single-process scale; see
//! [`registry::Registry`] for the upgrade path.
//!
//! # Modules
//!
//! - [`models`]: domain types (Patient, PatientPatch, Verdict)
//! - [`store`]: whole-collection persistence (RecordStore, JsonFileStore)
//! - [`query`]: ordered views over the collection
//! - [`registry`]: CRUD orchestration tying the pieces together

pub mod models;
pub mod query;
pub mod registry;
pub mod store;

// Re-export commonly used types
pub use models::{
    Gender, Patient, PatientDraft, PatientPatch, PatientRecord, ValidationError, Verdict,
    Violation,
};
pub use query::{QueryError, SortField, SortOrder};
pub use registry::{Registry, RegistryError, RegistryResult};
pub use store::{Collection, JsonFileStore, RecordStore, StoreError, StoreResult};
