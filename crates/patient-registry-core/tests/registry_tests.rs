//! Integration tests for the registry's load-mutate-save cycles.

use patient_registry_core::{
    JsonFileStore, PatientDraft, PatientPatch, Registry, RegistryError, StoreError, Verdict,
};

fn setup() -> (Registry<JsonFileStore>, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("patients.json"));
    store.create_if_missing().unwrap();
    (Registry::new(store), dir)
}

fn draft(id: &str, height: f64, weight: f64) -> PatientDraft {
    PatientDraft {
        id: id.into(),
        name: "Ananya".into(),
        age: 30,
        city: "Mumbai".into(),
        height,
        weight,
    }
}

#[test]
fn test_create_then_read_round_trip() {
    let (registry, _dir) = setup();

    registry.create(draft("P001", 1.75, 70.0)).unwrap();

    let record = registry.get("P001").unwrap();
    assert_eq!(record.name, "Ananya");
    assert_eq!(record.age, 30);
    assert_eq!(record.city, "Mumbai");
    assert_eq!(record.height, 1.75);
    assert_eq!(record.weight, 70.0);
    assert_eq!(record.bmi, Some(22.86));
    assert_eq!(record.verdict, Some(Verdict::NormalWeight));
}

#[test]
fn test_duplicate_create_is_conflict_not_overwrite() {
    let (registry, _dir) = setup();

    registry.create(draft("P001", 1.75, 70.0)).unwrap();
    let err = registry.create(draft("P001", 1.60, 50.0)).unwrap_err();
    assert!(matches!(err, RegistryError::Conflict(id) if id == "P001"));

    // original record survives untouched
    assert_eq!(registry.get("P001").unwrap().height, 1.75);
}

#[test]
fn test_invalid_draft_is_not_persisted() {
    let (registry, _dir) = setup();

    let err = registry.create(draft("P001", 0.0, 70.0)).unwrap_err();
    assert!(matches!(err, RegistryError::Validation(_)));
    assert!(registry.list().unwrap().is_empty());
}

#[test]
fn test_out_of_range_age_is_rejected_not_wrapped() {
    let (registry, _dir) = setup();

    let mut bad = draft("P001", 1.75, 70.0);
    bad.age = 5_000_000_000;
    let err = registry.create(bad).unwrap_err();
    assert!(matches!(err, RegistryError::Validation(_)));
    assert!(registry.list().unwrap().is_empty());
}

#[test]
fn test_get_unknown_id_is_not_found() {
    let (registry, _dir) = setup();

    let err = registry.get("P404").unwrap_err();
    assert!(matches!(err, RegistryError::NotFound(id) if id == "P404"));
}

#[test]
fn test_update_refreshes_derived_fields() {
    let (registry, _dir) = setup();

    registry.create(draft("P001", 1.75, 70.0)).unwrap();

    let patch: PatientPatch = serde_json::from_str(r#"{"weight":90.0}"#).unwrap();
    let updated = registry.update("P001", &patch).unwrap();
    assert_eq!(updated.verdict(), Verdict::Obese);

    let record = registry.get("P001").unwrap();
    assert_eq!(record.weight, 90.0);
    assert_eq!(record.bmi, Some(29.39));
    assert_eq!(record.verdict, Some(Verdict::Obese));
}

#[test]
fn test_update_with_empty_patch_changes_nothing() {
    let (registry, _dir) = setup();

    registry.create(draft("P001", 1.75, 70.0)).unwrap();
    let before = registry.get("P001").unwrap();

    registry.update("P001", &PatientPatch::default()).unwrap();
    assert_eq!(registry.get("P001").unwrap(), before);
}

#[test]
fn test_update_unknown_id_is_not_found() {
    let (registry, _dir) = setup();

    let patch: PatientPatch = serde_json::from_str(r#"{"city":"Delhi"}"#).unwrap();
    let err = registry.update("P404", &patch).unwrap_err();
    assert!(matches!(err, RegistryError::NotFound(_)));
}

#[test]
fn test_failed_update_leaves_record_intact() {
    let (registry, _dir) = setup();

    registry.create(draft("P001", 1.75, 70.0)).unwrap();
    let patch: PatientPatch = serde_json::from_str(r#"{"height":-2.0}"#).unwrap();
    let err = registry.update("P001", &patch).unwrap_err();
    assert!(matches!(err, RegistryError::Validation(_)));

    assert_eq!(registry.get("P001").unwrap().height, 1.75);
}

#[test]
fn test_delete_removes_record() {
    let (registry, _dir) = setup();

    registry.create(draft("P001", 1.75, 70.0)).unwrap();
    registry.delete("P001").unwrap();

    assert!(registry.list().unwrap().is_empty());
    let err = registry.delete("P001").unwrap_err();
    assert!(matches!(err, RegistryError::NotFound(_)));
}

#[test]
fn test_sorted_by_height() {
    let (registry, _dir) = setup();

    registry.create(draft("P001", 1.5, 70.0)).unwrap();
    registry.create(draft("P002", 1.8, 70.0)).unwrap();
    registry.create(draft("P003", 1.6, 70.0)).unwrap();

    let asc = registry.sorted("height", "asc").unwrap();
    let heights: Vec<f64> = asc.iter().map(|r| r.height).collect();
    assert_eq!(heights, vec![1.5, 1.6, 1.8]);

    let desc = registry.sorted("height", "desc").unwrap();
    let heights: Vec<f64> = desc.iter().map(|r| r.height).collect();
    assert_eq!(heights, vec![1.8, 1.6, 1.5]);
}

#[test]
fn test_sorted_rejects_invalid_parameters() {
    let (registry, _dir) = setup();

    assert!(matches!(
        registry.sorted("city", "asc").unwrap_err(),
        RegistryError::Query(_)
    ));
    assert!(matches!(
        registry.sorted("height", "upside-down").unwrap_err(),
        RegistryError::Query(_)
    ));
}

#[test]
fn test_missing_backing_file_surfaces_store_error() {
    let dir = tempfile::tempdir().unwrap();
    let registry = Registry::new(JsonFileStore::new(dir.path().join("absent.json")));

    let err = registry.list().unwrap_err();
    assert!(matches!(
        err,
        RegistryError::Store(StoreError::NotFound(_))
    ));
}
