//! Patient model with validated fields and derived health metrics.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum accepted length for a patient name, in characters.
pub const NAME_MAX_LEN: usize = 50;

/// Maximum accepted length for a city name, in characters.
pub const CITY_MAX_LEN: usize = 100;

/// Round to two decimal places.
///
/// Uses `f64::round`, which rounds half away from zero. This differs from
/// bankers' rounding, so a BMI landing exactly on a rounding threshold
/// resolves to the larger magnitude.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Weight category derived from BMI.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Verdict {
    #[serde(rename = "Under weight")]
    UnderWeight,
    #[serde(rename = "Normal weight")]
    NormalWeight,
    #[serde(rename = "Obese")]
    Obese,
}

impl Verdict {
    /// Classify a BMI value.
    ///
    /// Below 18.5 is under weight, 18.5 up to (but not including) 25 is
    /// normal weight, 25 and above is obese. A BMI of exactly 18.5 is
    /// normal weight; exactly 25 is obese.
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            Verdict::UnderWeight
        } else if bmi < 25.0 {
            Verdict::NormalWeight
        } else {
            Verdict::Obese
        }
    }

    /// The category label as persisted and displayed.
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::UnderWeight => "Under weight",
            Verdict::NormalWeight => "Normal weight",
            Verdict::Obese => "Obese",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single violated field constraint.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Violation {
    /// Name of the offending field.
    pub field: &'static str,
    /// Human-readable description of the constraint.
    pub message: String,
}

impl Violation {
    pub(crate) fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validation failure carrying every violated constraint, not just the first.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let detail = self
            .violations
            .iter()
            .map(|v| format!("{}: {}", v.field, v.message))
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "validation failed: {detail}")
    }
}

impl std::error::Error for ValidationError {}

/// Raw create payload as submitted by the client. Not yet validated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientDraft {
    /// Client-assigned unique identifier (e.g. "P001")
    pub id: String,
    pub name: String,
    pub age: i64,
    pub city: String,
    /// Height in meters
    pub height: f64,
    /// Weight in kilograms
    pub weight: f64,
}

/// A validated patient.
///
/// Derived metrics ([`Patient::bmi`] and [`Patient::verdict`]) are computed
/// from `height` and `weight` on demand and are never accepted as input.
#[derive(Debug, Clone, PartialEq)]
pub struct Patient {
    /// Unique identifier, immutable after creation
    pub id: String,
    pub name: String,
    pub age: u32,
    pub city: String,
    /// Height in meters, always > 0
    pub height: f64,
    /// Weight in kilograms, always > 0
    pub weight: f64,
}

impl Patient {
    /// Validate a draft, collecting every violated constraint.
    pub fn from_draft(draft: PatientDraft) -> Result<Self, ValidationError> {
        let mut violations = Vec::new();

        if draft.name.is_empty() || draft.name.chars().count() > NAME_MAX_LEN {
            violations.push(Violation::new(
                "name",
                format!("must be between 1 and {NAME_MAX_LEN} characters"),
            ));
        }
        let age = match u32::try_from(draft.age) {
            Ok(age) => age,
            Err(_) => {
                let message = if draft.age < 0 {
                    "must be a non-negative integer".to_string()
                } else {
                    format!("must be at most {}", u32::MAX)
                };
                violations.push(Violation::new("age", message));
                // placeholder, the violation above guarantees the early return
                0
            }
        };
        if draft.city.is_empty() || draft.city.chars().count() > CITY_MAX_LEN {
            violations.push(Violation::new(
                "city",
                format!("must be between 1 and {CITY_MAX_LEN} characters"),
            ));
        }
        // `!(x > 0.0)` also rejects NaN
        if !(draft.height > 0.0) {
            violations.push(Violation::new("height", "must be greater than 0"));
        }
        if !(draft.weight > 0.0) {
            violations.push(Violation::new("weight", "must be greater than 0"));
        }

        if !violations.is_empty() {
            return Err(ValidationError { violations });
        }

        Ok(Self {
            id: draft.id,
            name: draft.name,
            age,
            city: draft.city,
            height: draft.height,
            weight: draft.weight,
        })
    }

    /// Body-mass index: `weight / height²`, rounded to two decimals.
    pub fn bmi(&self) -> f64 {
        round2(self.weight / (self.height * self.height))
    }

    /// Weight category derived from the current BMI.
    pub fn verdict(&self) -> Verdict {
        Verdict::from_bmi(self.bmi())
    }

    /// Persisted form of this patient.
    ///
    /// The id is the collection key and is not repeated inside the value.
    /// `bmi` and `verdict` are written as a cache for external consumers of
    /// the document, freshly derived from the current height and weight.
    pub fn to_record(&self) -> PatientRecord {
        PatientRecord {
            name: self.name.clone(),
            age: self.age,
            city: self.city.clone(),
            height: self.height,
            weight: self.weight,
            bmi: Some(self.bmi()),
            verdict: Some(self.verdict()),
        }
    }

    /// Rebuild a patient from its persisted record.
    ///
    /// Cached derived fields in the record are ignored; the stored height
    /// and weight remain the single source of truth.
    pub fn from_record(id: String, record: &PatientRecord) -> Self {
        Self {
            id,
            name: record.name.clone(),
            age: record.age,
            city: record.city.clone(),
            height: record.height,
            weight: record.weight,
        }
    }
}

/// Patient record as persisted inside the collection document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientRecord {
    pub name: String,
    pub age: u32,
    pub city: String,
    pub height: f64,
    pub weight: f64,
    /// Cached BMI. Absent in hand-edited documents; refreshed on save.
    #[serde(default)]
    pub bmi: Option<f64>,
    /// Cached weight category. Absent in hand-edited documents.
    #[serde(default)]
    pub verdict: Option<Verdict>,
}
