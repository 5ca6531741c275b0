//! Term record.
//!
//! # Invariants
//! - A term always belongs to exactly one school.
//! - Default listing order is `ends_on` descending.

use super::validation::{require_text, require_value, ValidationError};
use super::RowId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Placeholder returned when a term's school cannot be resolved.
pub const UNKNOWN_SCHOOL_NAME: &str = "None";

/// One teaching period of a school (semester, quarter, cohort).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    pub id: Option<RowId>,
    pub name: String,
    pub starts_on: Option<NaiveDate>,
    pub ends_on: Option<NaiveDate>,
    pub school_id: Option<RowId>,
}

impl_record!(Term, "term");

impl Term {
    pub fn new(
        name: impl Into<String>,
        starts_on: NaiveDate,
        ends_on: NaiveDate,
        school_id: RowId,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            starts_on: Some(starts_on),
            ends_on: Some(ends_on),
            school_id: Some(school_id),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("term", "name", &self.name)?;
        require_value("term", "starts_on", &self.starts_on)?;
        require_value("term", "ends_on", &self.ends_on)?;
        require_value("term", "school_id", &self.school_id)?;
        Ok(())
    }
}
