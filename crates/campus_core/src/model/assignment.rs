//! Assignment record.
//!
//! # Invariants
//! - `name` is unique within one course.

use super::validation::{require_text, require_value, ValidationError};
use super::RowId;
use serde::{Deserialize, Serialize};

/// Graded work belonging to a course.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: Option<RowId>,
    pub course_id: Option<RowId>,
    pub name: String,
    /// Weight of this assignment in the final grade, as a fraction (0.8 = 80%).
    pub percent_of_grade: Option<f64>,
}

impl_record!(Assignment, "assignment");

impl Assignment {
    pub fn new(course_id: RowId, name: impl Into<String>, percent_of_grade: f64) -> Self {
        Self {
            id: None,
            course_id: Some(course_id),
            name: name.into(),
            percent_of_grade: Some(percent_of_grade),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_value("assignment", "course_id", &self.course_id)?;
        require_text("assignment", "name", &self.name)?;
        require_value("assignment", "percent_of_grade", &self.percent_of_grade)?;
        match self.percent_of_grade {
            Some(percent) if !percent.is_finite() => Err(ValidationError::InvalidFormat {
                entity: "assignment",
                field: "percent_of_grade",
            }),
            _ => Ok(()),
        }
    }
}
