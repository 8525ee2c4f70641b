//! Ordered views over the in-memory collection.

use std::cmp::Ordering;
use std::str::FromStr;

use thiserror::Error;

use crate::models::PatientRecord;
use crate::store::Collection;

/// Query parameter errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum QueryError {
    #[error("invalid sort field '{0}': choose from height, weight, or bmi")]
    InvalidField(String),

    #[error("invalid order '{0}': choose either 'asc' or 'desc'")]
    InvalidOrder(String),
}

pub type QueryResult<T> = Result<T, QueryError>;

/// Fields the collection can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Height,
    Weight,
    Bmi,
}

impl FromStr for SortField {
    type Err = QueryError;

    fn from_str(s: &str) -> QueryResult<Self> {
        match s {
            "height" => Ok(SortField::Height),
            "weight" => Ok(SortField::Weight),
            "bmi" => Ok(SortField::Bmi),
            other => Err(QueryError::InvalidField(other.to_string())),
        }
    }
}

/// Sort direction. Defaults to ascending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl FromStr for SortOrder {
    type Err = QueryError;

    fn from_str(s: &str) -> QueryResult<Self> {
        match s {
            "asc" => Ok(SortOrder::Ascending),
            "desc" => Ok(SortOrder::Descending),
            other => Err(QueryError::InvalidOrder(other.to_string())),
        }
    }
}

/// All record values ordered by the chosen field.
///
/// The sort is stable, so ties keep the collection's iteration order (id
/// order). A record with an absent cached BMI sorts with key 0 rather than
/// failing; this mirrors the permissive behavior of the persisted format,
/// where only the derived caches can be missing.
pub fn sort_records(
    collection: &Collection,
    field: SortField,
    order: SortOrder,
) -> Vec<PatientRecord> {
    let mut records: Vec<PatientRecord> = collection.values().cloned().collect();
    records.sort_by(|a, b| {
        let ord = sort_key(a, field)
            .partial_cmp(&sort_key(b, field))
            .unwrap_or(Ordering::Equal);
        match order {
            SortOrder::Ascending => ord,
            SortOrder::Descending => ord.reverse(),
        }
    });
    records
}

fn sort_key(record: &PatientRecord, field: SortField) -> f64 {
    match field {
        SortField::Height => record.height,
        SortField::Weight => record.weight,
        SortField::Bmi => record.bmi.unwrap_or(0.0),
    }
}
