//! Course repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist courses and resolve their owned collections.
//! - Apply the course deletion rules: lessons (with their readings) and
//!   assignments go with the course; rosters block the delete.
//!
//! # Invariants
//! - `course_code` is unique per `term_id`; `NULL` terms form one scope.
//! - A course with students or instructors is never deleted.

use super::assignment_repo::AssignmentTable;
use super::lesson_repo::LessonTable;
use super::reading_repo::ReadingTable;
use super::roster_repo::{CourseInstructorTable, CourseStudentTable};
use super::table::{
    begin_immediate, count_referencing, delete_row, ensure_changed, ensure_no_dependents,
    ensure_reference, ensure_table_ready, exists, require_id, select_all, select_by_id,
    select_edge, select_joined, select_where, Edge, Table,
};
use super::RepoResult;
use crate::model::assignment::Assignment;
use crate::model::course::Course;
use crate::model::lesson::Lesson;
use crate::model::reading::Reading;
use crate::model::roster::{CourseInstructor, CourseStudent};
use crate::model::validation::ValidationError;
use crate::model::RowId;
use log::debug;
use rusqlite::{params, Connection, Row};

pub(crate) struct CourseTable;

impl Table for CourseTable {
    const NAME: &'static str = "courses";
    const COLUMNS: &'static [&'static str] = &["id", "course_code", "name", "term_id"];
    const ORDER_BY: &'static str = "id ASC";
    const REVERSE_ORDER_BY: &'static str = "id DESC";

    type Record = Course;

    fn parse_row(row: &Row<'_>) -> RepoResult<Course> {
        Ok(Course {
            id: row.get("id")?,
            course_code: row.get("course_code")?,
            name: row.get("name")?,
            term_id: row.get("term_id")?,
        })
    }
}

/// Repository interface for course records and their collections.
pub trait CourseRepository {
    fn create_course(&self, course: &Course) -> RepoResult<RowId>;
    fn update_course(&self, course: &Course) -> RepoResult<()>;
    fn get_course(&self, id: RowId) -> RepoResult<Option<Course>>;
    fn list_courses(&self) -> RepoResult<Vec<Course>>;
    fn edge_course(&self, edge: Edge) -> RepoResult<Option<Course>>;
    fn list_course_lessons(&self, course_id: RowId) -> RepoResult<Vec<Lesson>>;
    fn list_course_assignments(&self, course_id: RowId) -> RepoResult<Vec<Assignment>>;
    fn list_course_students(&self, course_id: RowId) -> RepoResult<Vec<CourseStudent>>;
    fn list_course_instructors(&self, course_id: RowId) -> RepoResult<Vec<CourseInstructor>>;
    /// Readings of every lesson of the course, in reading order.
    fn list_course_readings(&self, course_id: RowId) -> RepoResult<Vec<Reading>>;
    fn delete_course(&self, id: RowId) -> RepoResult<()>;
}

/// SQLite-backed course repository.
pub struct SqliteCourseRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCourseRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table_ready::<CourseTable>(conn)?;
        Ok(Self { conn })
    }

    fn validate_for_write(&self, course: &Course) -> RepoResult<()> {
        course.validate()?;
        ensure_reference(self.conn, "course", "term_id", "terms", course.term_id)?;

        let taken = exists(
            self.conn,
            "SELECT EXISTS(
                SELECT 1
                FROM courses
                WHERE course_code = ?1
                  AND term_id IS ?2
                  AND (?3 IS NULL OR id != ?3)
            );",
            params![course.course_code.trim(), course.term_id, course.id],
        )?;
        if taken {
            return Err(ValidationError::Taken {
                entity: "course",
                field: "course_code",
            }
            .into());
        }
        Ok(())
    }
}

impl CourseRepository for SqliteCourseRepository<'_> {
    fn create_course(&self, course: &Course) -> RepoResult<RowId> {
        self.validate_for_write(course)?;
        self.conn.execute(
            "INSERT INTO courses (course_code, name, term_id) VALUES (?1, ?2, ?3);",
            params![
                course.course_code.trim(),
                course.name.as_str(),
                course.term_id
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update_course(&self, course: &Course) -> RepoResult<()> {
        let id = require_id(course)?;
        self.validate_for_write(course)?;
        let changed = self.conn.execute(
            "UPDATE courses
             SET
                course_code = ?2,
                name = ?3,
                term_id = ?4
             WHERE id = ?1;",
            params![
                id,
                course.course_code.trim(),
                course.name.as_str(),
                course.term_id
            ],
        )?;
        ensure_changed(changed, "course", id)
    }

    fn get_course(&self, id: RowId) -> RepoResult<Option<Course>> {
        select_by_id::<CourseTable>(self.conn, id)
    }

    fn list_courses(&self) -> RepoResult<Vec<Course>> {
        select_all::<CourseTable>(self.conn)
    }

    fn edge_course(&self, edge: Edge) -> RepoResult<Option<Course>> {
        select_edge::<CourseTable>(self.conn, edge)
    }

    fn list_course_lessons(&self, course_id: RowId) -> RepoResult<Vec<Lesson>> {
        select_where::<LessonTable, _>(self.conn, "course_id = ?1", [course_id])
    }

    fn list_course_assignments(&self, course_id: RowId) -> RepoResult<Vec<Assignment>> {
        select_where::<AssignmentTable, _>(self.conn, "course_id = ?1", [course_id])
    }

    fn list_course_students(&self, course_id: RowId) -> RepoResult<Vec<CourseStudent>> {
        select_where::<CourseStudentTable, _>(self.conn, "course_id = ?1", [course_id])
    }

    fn list_course_instructors(&self, course_id: RowId) -> RepoResult<Vec<CourseInstructor>> {
        select_where::<CourseInstructorTable, _>(self.conn, "course_id = ?1", [course_id])
    }

    fn list_course_readings(&self, course_id: RowId) -> RepoResult<Vec<Reading>> {
        select_joined::<ReadingTable, _>(
            self.conn,
            "r",
            "INNER JOIN lessons l ON l.id = r.lesson_id WHERE l.course_id = ?1",
            "r.order_number ASC, r.id ASC",
            [course_id],
        )
    }

    fn delete_course(&self, id: RowId) -> RepoResult<()> {
        let tx = begin_immediate(self.conn)?;
        ensure_no_dependents(&tx, "course", id, "course_students", "course_id")?;
        ensure_no_dependents(&tx, "course", id, "course_instructors", "course_id")?;

        let lessons = count_referencing(&tx, "lessons", "course_id", id)?;
        let assignments = count_referencing(&tx, "assignments", "course_id", id)?;
        delete_row(&tx, "courses", "course", id)?;
        tx.commit()?;

        debug!(
            "event=record_cascade module=repo status=ok entity=course id={} lessons={} assignments={}",
            id, lessons, assignments
        );
        Ok(())
    }
}
