//! Lesson record.

use super::validation::{require_text, ValidationError};
use super::RowId;
use serde::{Deserialize, Serialize};

/// One class session of a course, with optional homework links.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: Option<RowId>,
    pub name: String,
    pub course_id: Option<RowId>,
    /// Assignment to complete before the session.
    pub pre_class_assignment_id: Option<RowId>,
    /// Assignment worked on during the session.
    pub in_class_assignment_id: Option<RowId>,
}

impl_record!(Lesson, "lesson");

impl Lesson {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("lesson", "name", &self.name)
    }
}
