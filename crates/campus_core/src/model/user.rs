//! User record.
//!
//! # Invariants
//! - `email` is unique across all users, compared case-insensitively.
//! - `photo_url`, when set, must use an `http`/`https` scheme.

use super::validation::{
    is_email, is_web_url, require_format, require_text, ValidationError,
};
use super::RowId;
use serde::{Deserialize, Serialize};

/// A person who can be enrolled as a student or assigned as an instructor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Option<RowId>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub photo_url: Option<String>,
}

impl_record!(User, "user");

impl User {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            photo_url: None,
        }
    }

    pub fn with_photo_url(mut self, photo_url: impl Into<String>) -> Self {
        self.photo_url = Some(photo_url.into());
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("user", "first_name", &self.first_name)?;
        require_text("user", "last_name", &self.last_name)?;
        require_text("user", "email", &self.email)?;
        require_format("user", "email", &self.email, is_email)?;
        match self.photo_url.as_deref() {
            Some(photo_url) if !photo_url.trim().is_empty() => {
                require_format("user", "photo_url", photo_url, is_web_url)
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::User;

    #[test]
    fn blank_photo_url_is_allowed() {
        let user = User::new("Blake", "Strickland", "Myself@awesome.com").with_photo_url("");
        assert!(user.validate().is_ok());
    }

    #[test]
    fn photo_url_without_scheme_is_rejected() {
        let user =
            User::new("Blake", "Strickland", "Myself@awesome.com").with_photo_url("www.TIY.com");
        assert_eq!(user.validate().unwrap_err().field(), "photo_url");
    }
}
