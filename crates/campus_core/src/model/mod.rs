//! Domain records for schools, terms, courses and their coursework.
//!
//! # Responsibility
//! - Define the in-memory shape of every persisted record.
//! - Own presence/format validation that does not need storage.
//!
//! # Invariants
//! - `id` is `None` until the record has been inserted; a rejected insert
//!   leaves it `None`.
//! - Records never hold references to other records, only foreign-key ids.

/// Database-assigned integer primary key.
pub type RowId = i64;

/// Identity accessors shared by every persisted record.
pub trait Record {
    /// Singular entity name used in errors and log events.
    const ENTITY: &'static str;

    fn id(&self) -> Option<RowId>;
    fn set_id(&mut self, id: RowId);

    /// Returns whether this record has been assigned a database identity.
    fn is_persisted(&self) -> bool {
        self.id().is_some()
    }
}

macro_rules! impl_record {
    ($ty:ty, $entity:literal) => {
        impl $crate::model::Record for $ty {
            const ENTITY: &'static str = $entity;

            fn id(&self) -> Option<$crate::model::RowId> {
                self.id
            }

            fn set_id(&mut self, id: $crate::model::RowId) {
                self.id = Some(id);
            }
        }
    };
}

pub mod assignment;
pub mod course;
pub mod lesson;
pub mod reading;
pub mod roster;
pub mod school;
pub mod term;
pub mod user;
pub mod validation;
