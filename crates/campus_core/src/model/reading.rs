//! Reading record.
//!
//! # Invariants
//! - Default listing order is `order_number` ascending.
//! - `url` must use an `http`/`https` scheme when the reading is created;
//!   later updates only require it to be present.

use super::validation::{
    is_web_url, require_format, require_text, require_value, ValidationContext, ValidationError,
};
use super::RowId;
use serde::{Deserialize, Serialize};

/// Reading material attached to a lesson.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reading {
    pub id: Option<RowId>,
    pub lesson_id: Option<RowId>,
    pub order_number: Option<i64>,
    pub url: String,
    pub caption: Option<String>,
    /// `true` for material to read before class, `false` for follow-up.
    pub before_lesson: bool,
}

impl_record!(Reading, "reading");

/// Named reading filters by the `before_lesson` flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReadingScope {
    #[default]
    All,
    /// Readings assigned before the lesson.
    Pre,
    /// Everything else.
    Post,
}

impl Reading {
    pub fn new(lesson_id: RowId, order_number: i64, url: impl Into<String>) -> Self {
        Self {
            id: None,
            lesson_id: Some(lesson_id),
            order_number: Some(order_number),
            url: url.into(),
            caption: None,
            before_lesson: false,
        }
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn before_lesson(mut self) -> Self {
        self.before_lesson = true;
        self
    }

    /// Returns an unsaved copy of this reading.
    pub fn duplicate(&self) -> Self {
        Self {
            id: None,
            ..self.clone()
        }
    }

    pub fn validate(&self, context: ValidationContext) -> Result<(), ValidationError> {
        require_value("reading", "order_number", &self.order_number)?;
        require_value("reading", "lesson_id", &self.lesson_id)?;
        require_text("reading", "url", &self.url)?;
        if context == ValidationContext::Create {
            require_format("reading", "url", &self.url, is_web_url)?;
        }
        Ok(())
    }
}
