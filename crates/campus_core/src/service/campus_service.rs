//! Record lifecycle service with checked outcomes.
//!
//! # Responsibility
//! - Save, destroy and associate records through the SQLite repositories.
//! - Turn refused writes into a `false` outcome instead of an error.
//!
//! # Invariants
//! - A refused save leaves a new record's `id` as `None`.
//! - A refused destroy leaves the row and every dependent row in place.
//! - Only storage and setup faults are returned as `Err`.

use crate::model::assignment::Assignment;
use crate::model::course::Course;
use crate::model::lesson::Lesson;
use crate::model::reading::Reading;
use crate::model::roster::{CourseInstructor, CourseStudent};
use crate::model::school::School;
use crate::model::term::Term;
use crate::model::user::User;
use crate::model::{Record, RowId};
use crate::repo::assignment_repo::{AssignmentRepository, SqliteAssignmentRepository};
use crate::repo::course_repo::{CourseRepository, SqliteCourseRepository};
use crate::repo::lesson_repo::{LessonRepository, SqliteLessonRepository};
use crate::repo::reading_repo::{ReadingRepository, SqliteReadingRepository};
use crate::repo::roster_repo::{RosterRepository, SqliteRosterRepository};
use crate::repo::school_repo::{SchoolRepository, SqliteSchoolRepository};
use crate::repo::term_repo::{SqliteTermRepository, TermRepository};
use crate::repo::user_repo::{SqliteUserRepository, UserRepository};
use crate::repo::{RepoError, RepoResult};
use log::{debug, error, warn};
use rusqlite::Connection;

/// Facade over every record repository sharing one connection.
pub struct CampusService<'conn> {
    schools: SqliteSchoolRepository<'conn>,
    terms: SqliteTermRepository<'conn>,
    courses: SqliteCourseRepository<'conn>,
    lessons: SqliteLessonRepository<'conn>,
    readings: SqliteReadingRepository<'conn>,
    assignments: SqliteAssignmentRepository<'conn>,
    users: SqliteUserRepository<'conn>,
    rosters: SqliteRosterRepository<'conn>,
}

impl<'conn> CampusService<'conn> {
    /// Builds every repository over a migrated connection.
    ///
    /// # Errors
    /// - Returns `UninitializedConnection` / `MissingRequiredTable` when
    ///   migrations have not been applied.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        Ok(Self {
            schools: SqliteSchoolRepository::try_new(conn)?,
            terms: SqliteTermRepository::try_new(conn)?,
            courses: SqliteCourseRepository::try_new(conn)?,
            lessons: SqliteLessonRepository::try_new(conn)?,
            readings: SqliteReadingRepository::try_new(conn)?,
            assignments: SqliteAssignmentRepository::try_new(conn)?,
            users: SqliteUserRepository::try_new(conn)?,
            rosters: SqliteRosterRepository::try_new(conn)?,
        })
    }

    pub fn schools(&self) -> &SqliteSchoolRepository<'conn> {
        &self.schools
    }

    pub fn terms(&self) -> &SqliteTermRepository<'conn> {
        &self.terms
    }

    pub fn courses(&self) -> &SqliteCourseRepository<'conn> {
        &self.courses
    }

    pub fn lessons(&self) -> &SqliteLessonRepository<'conn> {
        &self.lessons
    }

    pub fn readings(&self) -> &SqliteReadingRepository<'conn> {
        &self.readings
    }

    pub fn assignments(&self) -> &SqliteAssignmentRepository<'conn> {
        &self.assignments
    }

    pub fn users(&self) -> &SqliteUserRepository<'conn> {
        &self.users
    }

    pub fn rosters(&self) -> &SqliteRosterRepository<'conn> {
        &self.rosters
    }

    /// Inserts a new school or updates an existing one.
    ///
    /// Returns `Ok(false)` when validation refuses the write.
    pub fn save_school(&self, school: &mut School) -> RepoResult<bool> {
        save_record(
            school,
            |record| self.schools.create_school(record),
            |record| self.schools.update_school(record),
        )
    }

    pub fn save_term(&self, term: &mut Term) -> RepoResult<bool> {
        save_record(
            term,
            |record| self.terms.create_term(record),
            |record| self.terms.update_term(record),
        )
    }

    pub fn save_course(&self, course: &mut Course) -> RepoResult<bool> {
        save_record(
            course,
            |record| self.courses.create_course(record),
            |record| self.courses.update_course(record),
        )
    }

    pub fn save_lesson(&self, lesson: &mut Lesson) -> RepoResult<bool> {
        save_record(
            lesson,
            |record| self.lessons.create_lesson(record),
            |record| self.lessons.update_lesson(record),
        )
    }

    pub fn save_reading(&self, reading: &mut Reading) -> RepoResult<bool> {
        save_record(
            reading,
            |record| self.readings.create_reading(record),
            |record| self.readings.update_reading(record),
        )
    }

    pub fn save_assignment(&self, assignment: &mut Assignment) -> RepoResult<bool> {
        save_record(
            assignment,
            |record| self.assignments.create_assignment(record),
            |record| self.assignments.update_assignment(record),
        )
    }

    pub fn save_user(&self, user: &mut User) -> RepoResult<bool> {
        save_record(
            user,
            |record| self.users.create_user(record),
            |record| self.users.update_user(record),
        )
    }

    pub fn save_course_student(&self, link: &mut CourseStudent) -> RepoResult<bool> {
        save_record(
            link,
            |record| self.rosters.create_course_student(record),
            |record| self.rosters.update_course_student(record),
        )
    }

    pub fn save_course_instructor(&self, link: &mut CourseInstructor) -> RepoResult<bool> {
        save_record(
            link,
            |record| self.rosters.create_course_instructor(record),
            |record| self.rosters.update_course_instructor(record),
        )
    }

    /// Deletes a school. Refused (`Ok(false)`) while the school has terms.
    pub fn destroy_school(&self, school: &School) -> RepoResult<bool> {
        destroy_record(school, |id| self.schools.delete_school(id))
    }

    /// Deletes a term. Refused (`Ok(false)`) while courses belong to it.
    pub fn destroy_term(&self, term: &Term) -> RepoResult<bool> {
        destroy_record(term, |id| self.terms.delete_term(id))
    }

    /// Deletes a course with its lessons, readings and assignments.
    ///
    /// Refused (`Ok(false)`) while students or instructors are on its roster.
    pub fn destroy_course(&self, course: &Course) -> RepoResult<bool> {
        destroy_record(course, |id| self.courses.delete_course(id))
    }

    /// Deletes a lesson together with its readings.
    pub fn destroy_lesson(&self, lesson: &Lesson) -> RepoResult<bool> {
        destroy_record(lesson, |id| self.lessons.delete_lesson(id))
    }

    pub fn destroy_reading(&self, reading: &Reading) -> RepoResult<bool> {
        destroy_record(reading, |id| self.readings.delete_reading(id))
    }

    /// Deletes an assignment and clears lesson references to it.
    pub fn destroy_assignment(&self, assignment: &Assignment) -> RepoResult<bool> {
        destroy_record(assignment, |id| self.assignments.delete_assignment(id))
    }

    /// Deletes a user together with their roster rows.
    pub fn destroy_user(&self, user: &User) -> RepoResult<bool> {
        destroy_record(user, |id| self.users.delete_user(id))
    }

    pub fn destroy_course_student(&self, link: &CourseStudent) -> RepoResult<bool> {
        destroy_record(link, |id| self.rosters.delete_course_student(id))
    }

    pub fn destroy_course_instructor(&self, link: &CourseInstructor) -> RepoResult<bool> {
        destroy_record(link, |id| self.rosters.delete_course_instructor(id))
    }

    /// Moves `term` under `school` and saves it.
    pub fn append_term(&self, school: &School, term: &mut Term) -> RepoResult<bool> {
        term.school_id = Some(owner_id(school)?);
        self.save_term(term)
    }

    /// Schedules `course` into `term` and saves it.
    pub fn append_course(&self, term: &Term, course: &mut Course) -> RepoResult<bool> {
        course.term_id = Some(owner_id(term)?);
        self.save_course(course)
    }

    pub fn append_lesson(&self, course: &Course, lesson: &mut Lesson) -> RepoResult<bool> {
        lesson.course_id = Some(owner_id(course)?);
        self.save_lesson(lesson)
    }

    pub fn append_assignment(
        &self,
        course: &Course,
        assignment: &mut Assignment,
    ) -> RepoResult<bool> {
        assignment.course_id = Some(owner_id(course)?);
        self.save_assignment(assignment)
    }

    pub fn append_reading(&self, lesson: &Lesson, reading: &mut Reading) -> RepoResult<bool> {
        reading.lesson_id = Some(owner_id(lesson)?);
        self.save_reading(reading)
    }

    pub fn enroll_student(&self, course: &Course, link: &mut CourseStudent) -> RepoResult<bool> {
        link.course_id = Some(owner_id(course)?);
        self.save_course_student(link)
    }

    pub fn assign_instructor(
        &self,
        course: &Course,
        link: &mut CourseInstructor,
    ) -> RepoResult<bool> {
        link.course_id = Some(owner_id(course)?);
        self.save_course_instructor(link)
    }

    /// Links `assignment` as the homework due before `lesson`.
    pub fn set_pre_class_assignment(
        &self,
        lesson: &mut Lesson,
        assignment: &Assignment,
    ) -> RepoResult<bool> {
        lesson.pre_class_assignment_id = Some(owner_id(assignment)?);
        self.save_lesson(lesson)
    }

    /// Links `assignment` as the work done during `lesson`.
    pub fn set_in_class_assignment(
        &self,
        lesson: &mut Lesson,
        assignment: &Assignment,
    ) -> RepoResult<bool> {
        lesson.in_class_assignment_id = Some(owner_id(assignment)?);
        self.save_lesson(lesson)
    }
}

fn owner_id<R: Record>(owner: &R) -> RepoResult<RowId> {
    owner.id().ok_or(RepoError::Unsaved(R::ENTITY))
}

fn save_record<R: Record>(
    record: &mut R,
    create: impl FnOnce(&R) -> RepoResult<RowId>,
    update: impl FnOnce(&R) -> RepoResult<()>,
) -> RepoResult<bool> {
    let written = match record.id() {
        None => create(&*record).map(Some),
        Some(_) => update(&*record).map(|()| None),
    };

    match checked(R::ENTITY, "save", written)? {
        Some(Some(id)) => {
            record.set_id(id);
            debug!(
                "event=record_save module=service status=ok entity={} id={} mode=insert",
                R::ENTITY,
                id
            );
            Ok(true)
        }
        Some(None) => Ok(true),
        None => Ok(false),
    }
}

fn destroy_record<R: Record>(
    record: &R,
    delete: impl FnOnce(RowId) -> RepoResult<()>,
) -> RepoResult<bool> {
    let id = owner_id(record)?;
    match checked(R::ENTITY, "destroy", delete(id))? {
        Some(()) => {
            debug!(
                "event=record_destroy module=service status=ok entity={} id={}",
                R::ENTITY,
                id
            );
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Maps refused writes to `Ok(None)` and passes every other error through.
fn checked<T>(
    entity: &'static str,
    action: &'static str,
    result: RepoResult<T>,
) -> RepoResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(RepoError::Validation(err)) => {
            warn!(
                "event=record_{} module=service status=rejected entity={} field={} reason={}",
                action,
                entity,
                err.field(),
                err.code()
            );
            Ok(None)
        }
        Err(RepoError::Restricted {
            id,
            dependent,
            count,
            ..
        }) => {
            warn!(
                "event=record_{} module=service status=restricted entity={} id={} dependent={} count={}",
                action, entity, id, dependent, count
            );
            Ok(None)
        }
        Err(err) => {
            error!(
                "event=record_{} module=service status=error entity={} error={}",
                action, entity, err
            );
            Err(err)
        }
    }
}
