//! Property tests for BMI derivation and the verdict categories.

use proptest::prelude::*;

use patient_registry_core::{Patient, PatientDraft, PatientPatch, Verdict};

fn valid_patient(height: f64, weight: f64) -> Patient {
    Patient::from_draft(PatientDraft {
        id: "P001".into(),
        name: "Ananya".into(),
        age: 30,
        city: "Mumbai".into(),
        height,
        weight,
    })
    .expect("draft within generated ranges must validate")
}

proptest! {
    #[test]
    fn bmi_matches_formula(height in 0.5f64..2.5, weight in 2.0f64..300.0) {
        let patient = valid_patient(height, weight);
        let expected = (weight / (height * height) * 100.0).round() / 100.0;
        prop_assert_eq!(patient.bmi(), expected);
    }

    #[test]
    fn verdict_is_consistent_with_bmi(height in 0.5f64..2.5, weight in 2.0f64..300.0) {
        let patient = valid_patient(height, weight);
        let bmi = patient.bmi();
        let expected = if bmi < 18.5 {
            Verdict::UnderWeight
        } else if bmi < 25.0 {
            Verdict::NormalWeight
        } else {
            Verdict::Obese
        };
        prop_assert_eq!(patient.verdict(), expected);
    }

    #[test]
    fn record_round_trip_preserves_patient(height in 0.5f64..2.5, weight in 2.0f64..300.0) {
        let patient = valid_patient(height, weight);
        let record = patient.to_record();

        let json = serde_json::to_string(&record).unwrap();
        let reread = serde_json::from_str(&json).unwrap();
        let rebuilt = Patient::from_record(patient.id.clone(), &reread);
        prop_assert_eq!(rebuilt, patient);
    }

    #[test]
    fn city_patch_never_moves_derived_fields(
        height in 0.5f64..2.5,
        weight in 2.0f64..300.0,
        city in "[A-Za-z]{1,40}",
    ) {
        let patient = valid_patient(height, weight);
        let patch: PatientPatch =
            serde_json::from_str(&format!(r#"{{"city":"{city}"}}"#)).unwrap();

        let updated = patch.apply(&patient).unwrap();
        prop_assert_eq!(updated.bmi(), patient.bmi());
        prop_assert_eq!(updated.verdict(), patient.verdict());
    }
}
