//! School record.

use super::validation::{require_text, ValidationError};
use super::RowId;
use serde::{Deserialize, Serialize};

/// Top-level organisation owning terms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct School {
    pub id: Option<RowId>,
    pub name: String,
}

impl_record!(School, "school");

impl School {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("school", "name", &self.name)
    }
}
