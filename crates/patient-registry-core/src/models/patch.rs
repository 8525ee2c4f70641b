//! Sparse patient updates.
//!
//! A patch distinguishes a field that is absent from one that is explicitly
//! null: absent fields leave the stored value untouched, while an explicit
//! null is a constraint violation (none of these fields are nullable).

use serde::{Deserialize, Deserializer, Serialize};

use super::patient::{Patient, PatientDraft, ValidationError, Violation};

/// Deserialize into the double-`Option` presence wrapper: the outer layer
/// records that the field appeared at all, the inner layer carries null.
fn presence<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// Gender accepted in update payloads.
///
/// There is no corresponding stored field; the value is validated and then
/// discarded.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

/// Sparse set of field changes for an existing patient.
///
/// Every field defaults to "absent"; [`PatientPatch::apply`] overlays the
/// present fields onto an existing patient and re-validates the whole
/// merged record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PatientPatch {
    #[serde(default, deserialize_with = "presence")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "presence")]
    pub city: Option<Option<String>>,
    #[serde(default, deserialize_with = "presence")]
    pub age: Option<Option<i64>>,
    #[serde(default, deserialize_with = "presence")]
    pub gender: Option<Option<Gender>>,
    #[serde(default, deserialize_with = "presence")]
    pub height: Option<Option<f64>>,
    #[serde(default, deserialize_with = "presence")]
    pub weight: Option<Option<f64>>,
}

impl PatientPatch {
    /// True if no field is present at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.city.is_none()
            && self.age.is_none()
            && self.gender.is_none()
            && self.height.is_none()
            && self.weight.is_none()
    }

    /// Apply this patch to an existing patient.
    ///
    /// Produces a new fully validated patient with the same id. Derived
    /// metrics are recomputed from the merged height and weight, so a
    /// weight-only patch refreshes BMI and verdict while a city-only patch
    /// leaves them numerically unchanged. Fails with a [`ValidationError`]
    /// and no partial effect if the merged record violates any constraint.
    pub fn apply(&self, current: &Patient) -> Result<Patient, ValidationError> {
        let mut violations = Vec::new();

        let name = match &self.name {
            Some(Some(value)) => value.clone(),
            Some(None) => {
                violations.push(Violation::new("name", "must not be null"));
                current.name.clone()
            }
            None => current.name.clone(),
        };
        let city = match &self.city {
            Some(Some(value)) => value.clone(),
            Some(None) => {
                violations.push(Violation::new("city", "must not be null"));
                current.city.clone()
            }
            None => current.city.clone(),
        };
        let age = match self.age {
            Some(Some(value)) => {
                // Updates require age strictly greater than 0, unlike
                // creation which accepts 0. The current age stands in so
                // the shared draft validation does not report age twice.
                if value <= 0 {
                    violations.push(Violation::new("age", "must be greater than 0"));
                    current.age as i64
                } else {
                    value
                }
            }
            Some(None) => {
                violations.push(Violation::new("age", "must not be null"));
                current.age as i64
            }
            None => current.age as i64,
        };
        if let Some(None) = self.gender {
            violations.push(Violation::new("gender", "must not be null"));
        }
        let height = match self.height {
            Some(Some(value)) => value,
            Some(None) => {
                violations.push(Violation::new("height", "must not be null"));
                current.height
            }
            None => current.height,
        };
        let weight = match self.weight {
            Some(Some(value)) => value,
            Some(None) => {
                violations.push(Violation::new("weight", "must not be null"));
                current.weight
            }
            None => current.weight,
        };

        let merged = PatientDraft {
            id: current.id.clone(),
            name,
            age,
            city,
            height,
            weight,
        };

        match Patient::from_draft(merged) {
            Ok(patient) if violations.is_empty() => Ok(patient),
            Ok(_) => Err(ValidationError { violations }),
            Err(mut err) => {
                violations.append(&mut err.violations);
                Err(ValidationError { violations })
            }
        }
    }
}
