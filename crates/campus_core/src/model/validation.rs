//! Field validation rules shared by every record type.
//!
//! # Responsibility
//! - Define the validation error taxonomy (presence/format/uniqueness/reference).
//! - Hold the compiled format patterns for urls, emails and course codes.
//!
//! # Invariants
//! - Presence means "non-blank": whitespace-only text counts as absent.
//! - Uniqueness and reference checks need storage and are raised by
//!   repositories; presence and format checks are raised by the records.

use super::RowId;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static WEB_URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^https?://\S+$").expect("valid web url regex"));
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[\w+\-.]+@[a-z\d\-]+(\.[a-z\d\-]+)*\.[a-z]+$").expect("valid email regex")
});
static COURSE_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]{3}.*\d{3}$").expect("valid course code regex"));

/// Which write path a validation runs for.
///
/// Some rules only apply when a record is first inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationContext {
    Create,
    Update,
}

/// Reason a record was refused before persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required field is missing or blank.
    Blank {
        entity: &'static str,
        field: &'static str,
    },
    /// Field value does not match its required pattern.
    InvalidFormat {
        entity: &'static str,
        field: &'static str,
    },
    /// Another row already holds this value within the uniqueness scope.
    Taken {
        entity: &'static str,
        field: &'static str,
    },
    /// Foreign key points at a row that does not exist.
    UnknownReference {
        entity: &'static str,
        field: &'static str,
        id: RowId,
    },
}

impl ValidationError {
    pub fn entity(&self) -> &'static str {
        match self {
            Self::Blank { entity, .. }
            | Self::InvalidFormat { entity, .. }
            | Self::Taken { entity, .. }
            | Self::UnknownReference { entity, .. } => entity,
        }
    }

    pub fn field(&self) -> &'static str {
        match self {
            Self::Blank { field, .. }
            | Self::InvalidFormat { field, .. }
            | Self::Taken { field, .. }
            | Self::UnknownReference { field, .. } => field,
        }
    }

    /// Stable machine-readable reason, used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Blank { .. } => "blank",
            Self::InvalidFormat { .. } => "invalid_format",
            Self::Taken { .. } => "taken",
            Self::UnknownReference { .. } => "unknown_reference",
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Blank { entity, field } => write!(f, "{entity}.{field} can't be blank"),
            Self::InvalidFormat { entity, field } => write!(f, "{entity}.{field} is invalid"),
            Self::Taken { entity, field } => {
                write!(f, "{entity}.{field} has already been taken")
            }
            Self::UnknownReference { entity, field, id } => {
                write!(f, "{entity}.{field} references missing row {id}")
            }
        }
    }
}

impl Error for ValidationError {}

/// Returns whether `value` is an absolute `http://` or `https://` url.
pub fn is_web_url(value: &str) -> bool {
    WEB_URL_RE.is_match(value.trim())
}

/// Returns whether `value` looks like `local@domain.tld`.
pub fn is_email(value: &str) -> bool {
    EMAIL_RE.is_match(value.trim())
}

/// Returns whether `value` starts with three letters and ends with three digits.
pub fn is_course_code(value: &str) -> bool {
    COURSE_CODE_RE.is_match(value.trim())
}

pub(crate) fn require_text(
    entity: &'static str,
    field: &'static str,
    value: &str,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Blank { entity, field });
    }
    Ok(())
}

pub(crate) fn require_value<T>(
    entity: &'static str,
    field: &'static str,
    value: &Option<T>,
) -> Result<(), ValidationError> {
    if value.is_none() {
        return Err(ValidationError::Blank { entity, field });
    }
    Ok(())
}

pub(crate) fn require_format(
    entity: &'static str,
    field: &'static str,
    value: &str,
    matches: fn(&str) -> bool,
) -> Result<(), ValidationError> {
    if !matches(value) {
        return Err(ValidationError::InvalidFormat { entity, field });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{is_course_code, is_email, is_web_url, require_text, ValidationError};

    #[test]
    fn web_url_requires_http_or_https_scheme() {
        assert!(is_web_url("http://www.ruby-docs.org"));
        assert!(is_web_url("https://www.ruby-docs.org/amazeballs"));
        assert!(is_web_url("HTTPS://example.com"));
        assert!(!is_web_url("www.ruby-docs.org"));
        assert!(!is_web_url("ftp://example.com"));
        assert!(!is_web_url("see http://example.com"));
    }

    #[test]
    fn email_requires_local_part_and_domain() {
        assert!(is_email("Myself@awesome.com"));
        assert!(is_email("first.last+tag@mail.example.org"));
        assert!(!is_email("Myself$awesome.com"));
        assert!(!is_email("nobody@"));
        assert!(!is_email("@example.com"));
    }

    #[test]
    fn course_code_needs_three_letters_then_three_digits() {
        assert!(is_course_code("OOR-111"));
        assert!(is_course_code("abc123"));
        assert!(!is_course_code("1"));
        assert!(!is_course_code("OO-111"));
        assert!(!is_course_code("OOR-11"));
    }

    #[test]
    fn whitespace_only_text_counts_as_blank() {
        let err = require_text("school", "name", "   ").unwrap_err();
        assert_eq!(
            err,
            ValidationError::Blank {
                entity: "school",
                field: "name"
            }
        );
        assert_eq!(err.to_string(), "school.name can't be blank");
    }
}
