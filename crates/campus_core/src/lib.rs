//! Core domain logic for campus records.
//! Schools, terms, courses, lessons, readings, assignments, users and course
//! rosters persisted in SQLite with their validation and deletion rules.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{open_db, open_db_in_memory, open_db_unmigrated, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::assignment::Assignment;
pub use model::course::Course;
pub use model::lesson::Lesson;
pub use model::reading::{Reading, ReadingScope};
pub use model::roster::{CourseInstructor, CourseStudent};
pub use model::school::School;
pub use model::term::Term;
pub use model::user::User;
pub use model::validation::{ValidationContext, ValidationError};
pub use model::{Record, RowId};
pub use repo::assignment_repo::{AssignmentRepository, SqliteAssignmentRepository};
pub use repo::course_repo::{CourseRepository, SqliteCourseRepository};
pub use repo::lesson_repo::{LessonRepository, SqliteLessonRepository};
pub use repo::reading_repo::{ReadingRepository, SqliteReadingRepository};
pub use repo::roster_repo::{RosterRepository, SqliteRosterRepository};
pub use repo::school_repo::{SchoolRepository, SqliteSchoolRepository};
pub use repo::term_repo::{SqliteTermRepository, TermRepository};
pub use repo::user_repo::{SqliteUserRepository, UserRepository};
pub use repo::{Edge, RepoError, RepoResult};
pub use service::campus_service::CampusService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
