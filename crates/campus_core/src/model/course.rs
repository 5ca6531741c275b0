//! Course record.
//!
//! # Invariants
//! - `course_code` is three letters ... three digits (e.g. `OOR-111`).
//! - `course_code` is unique within one term; courses without a term share
//!   one scope.

use super::validation::{is_course_code, require_format, require_text, ValidationError};
use super::RowId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: Option<RowId>,
    pub course_code: String,
    pub name: String,
    /// Unset until the course is scheduled into a term.
    pub term_id: Option<RowId>,
}

impl_record!(Course, "course");

impl Course {
    pub fn new(course_code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: None,
            course_code: course_code.into(),
            name: name.into(),
            term_id: None,
        }
    }

    /// Builder-style helper for courses created directly inside a term.
    pub fn in_term(mut self, term_id: RowId) -> Self {
        self.term_id = Some(term_id);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("course", "course_code", &self.course_code)?;
        require_text("course", "name", &self.name)?;
        require_format("course", "course_code", &self.course_code, is_course_code)
    }
}

#[cfg(test)]
mod tests {
    use super::Course;
    use crate::model::validation::ValidationError;

    #[test]
    fn numeric_course_code_is_rejected() {
        let course = Course::new("1", "Ruby");
        assert_eq!(
            course.validate().unwrap_err(),
            ValidationError::InvalidFormat {
                entity: "course",
                field: "course_code"
            }
        );
    }

    #[test]
    fn empty_course_reports_code_before_name() {
        let err = Course::default().validate().unwrap_err();
        assert_eq!(err.field(), "course_code");
    }
}
