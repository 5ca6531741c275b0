//! Course roster records linking users to courses.
//!
//! Both link kinds block deleting their course while they exist.

use super::validation::{require_value, ValidationError};
use super::RowId;
use serde::{Deserialize, Serialize};

/// Enrollment of one user as a student of a course.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseStudent {
    pub id: Option<RowId>,
    pub course_id: Option<RowId>,
    pub student_id: Option<RowId>,
}

impl_record!(CourseStudent, "course_student");

impl CourseStudent {
    pub fn new(student_id: RowId) -> Self {
        Self {
            id: None,
            course_id: None,
            student_id: Some(student_id),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_value("course_student", "student_id", &self.student_id)
    }
}

/// Assignment of one user as an instructor of a course.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseInstructor {
    pub id: Option<RowId>,
    pub course_id: Option<RowId>,
    pub instructor_id: Option<RowId>,
}

impl_record!(CourseInstructor, "course_instructor");

impl CourseInstructor {
    pub fn new(instructor_id: RowId) -> Self {
        Self {
            id: None,
            course_id: None,
            instructor_id: Some(instructor_id),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_value("course_instructor", "instructor_id", &self.instructor_id)
    }
}
