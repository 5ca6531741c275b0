//! Roster repository: course students and course instructors.
//!
//! # Invariants
//! - `student_id` / `instructor_id` must reference existing users.
//! - `course_id`, when set, must reference an existing course.

use super::table::{
    delete_row, ensure_changed, ensure_reference, ensure_table_ready, require_id, select_all,
    select_by_id, select_edge, Edge, Table,
};
use super::RepoResult;
use crate::model::roster::{CourseInstructor, CourseStudent};
use crate::model::RowId;
use rusqlite::{params, Connection, Row};

pub(crate) struct CourseStudentTable;

impl Table for CourseStudentTable {
    const NAME: &'static str = "course_students";
    const COLUMNS: &'static [&'static str] = &["id", "course_id", "student_id"];
    const ORDER_BY: &'static str = "id ASC";
    const REVERSE_ORDER_BY: &'static str = "id DESC";

    type Record = CourseStudent;

    fn parse_row(row: &Row<'_>) -> RepoResult<CourseStudent> {
        Ok(CourseStudent {
            id: row.get("id")?,
            course_id: row.get("course_id")?,
            student_id: row.get("student_id")?,
        })
    }
}

pub(crate) struct CourseInstructorTable;

impl Table for CourseInstructorTable {
    const NAME: &'static str = "course_instructors";
    const COLUMNS: &'static [&'static str] = &["id", "course_id", "instructor_id"];
    const ORDER_BY: &'static str = "id ASC";
    const REVERSE_ORDER_BY: &'static str = "id DESC";

    type Record = CourseInstructor;

    fn parse_row(row: &Row<'_>) -> RepoResult<CourseInstructor> {
        Ok(CourseInstructor {
            id: row.get("id")?,
            course_id: row.get("course_id")?,
            instructor_id: row.get("instructor_id")?,
        })
    }
}

/// Repository interface for course roster links.
pub trait RosterRepository {
    fn create_course_student(&self, link: &CourseStudent) -> RepoResult<RowId>;
    fn update_course_student(&self, link: &CourseStudent) -> RepoResult<()>;
    fn get_course_student(&self, id: RowId) -> RepoResult<Option<CourseStudent>>;
    fn list_course_students(&self) -> RepoResult<Vec<CourseStudent>>;
    fn edge_course_student(&self, edge: Edge) -> RepoResult<Option<CourseStudent>>;
    fn delete_course_student(&self, id: RowId) -> RepoResult<()>;

    fn create_course_instructor(&self, link: &CourseInstructor) -> RepoResult<RowId>;
    fn update_course_instructor(&self, link: &CourseInstructor) -> RepoResult<()>;
    fn get_course_instructor(&self, id: RowId) -> RepoResult<Option<CourseInstructor>>;
    fn list_course_instructors(&self) -> RepoResult<Vec<CourseInstructor>>;
    fn edge_course_instructor(&self, edge: Edge) -> RepoResult<Option<CourseInstructor>>;
    fn delete_course_instructor(&self, id: RowId) -> RepoResult<()>;
}

/// SQLite-backed roster repository.
pub struct SqliteRosterRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRosterRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table_ready::<CourseStudentTable>(conn)?;
        ensure_table_ready::<CourseInstructorTable>(conn)?;
        Ok(Self { conn })
    }

    fn validate_student(&self, link: &CourseStudent) -> RepoResult<()> {
        link.validate()?;
        ensure_reference(self.conn, "course_student", "course_id", "courses", link.course_id)?;
        ensure_reference(self.conn, "course_student", "student_id", "users", link.student_id)
    }

    fn validate_instructor(&self, link: &CourseInstructor) -> RepoResult<()> {
        link.validate()?;
        ensure_reference(
            self.conn,
            "course_instructor",
            "course_id",
            "courses",
            link.course_id,
        )?;
        ensure_reference(
            self.conn,
            "course_instructor",
            "instructor_id",
            "users",
            link.instructor_id,
        )
    }
}

impl RosterRepository for SqliteRosterRepository<'_> {
    fn create_course_student(&self, link: &CourseStudent) -> RepoResult<RowId> {
        self.validate_student(link)?;
        self.conn.execute(
            "INSERT INTO course_students (course_id, student_id) VALUES (?1, ?2);",
            params![link.course_id, link.student_id],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update_course_student(&self, link: &CourseStudent) -> RepoResult<()> {
        let id = require_id(link)?;
        self.validate_student(link)?;
        let changed = self.conn.execute(
            "UPDATE course_students SET course_id = ?2, student_id = ?3 WHERE id = ?1;",
            params![id, link.course_id, link.student_id],
        )?;
        ensure_changed(changed, "course_student", id)
    }

    fn get_course_student(&self, id: RowId) -> RepoResult<Option<CourseStudent>> {
        select_by_id::<CourseStudentTable>(self.conn, id)
    }

    fn list_course_students(&self) -> RepoResult<Vec<CourseStudent>> {
        select_all::<CourseStudentTable>(self.conn)
    }

    fn edge_course_student(&self, edge: Edge) -> RepoResult<Option<CourseStudent>> {
        select_edge::<CourseStudentTable>(self.conn, edge)
    }

    fn delete_course_student(&self, id: RowId) -> RepoResult<()> {
        delete_row(self.conn, "course_students", "course_student", id)
    }

    fn create_course_instructor(&self, link: &CourseInstructor) -> RepoResult<RowId> {
        self.validate_instructor(link)?;
        self.conn.execute(
            "INSERT INTO course_instructors (course_id, instructor_id) VALUES (?1, ?2);",
            params![link.course_id, link.instructor_id],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update_course_instructor(&self, link: &CourseInstructor) -> RepoResult<()> {
        let id = require_id(link)?;
        self.validate_instructor(link)?;
        let changed = self.conn.execute(
            "UPDATE course_instructors SET course_id = ?2, instructor_id = ?3 WHERE id = ?1;",
            params![id, link.course_id, link.instructor_id],
        )?;
        ensure_changed(changed, "course_instructor", id)
    }

    fn get_course_instructor(&self, id: RowId) -> RepoResult<Option<CourseInstructor>> {
        select_by_id::<CourseInstructorTable>(self.conn, id)
    }

    fn list_course_instructors(&self) -> RepoResult<Vec<CourseInstructor>> {
        select_all::<CourseInstructorTable>(self.conn)
    }

    fn edge_course_instructor(&self, edge: Edge) -> RepoResult<Option<CourseInstructor>> {
        select_edge::<CourseInstructorTable>(self.conn, edge)
    }

    fn delete_course_instructor(&self, id: RowId) -> RepoResult<()> {
        delete_row(self.conn, "course_instructors", "course_instructor", id)
    }
}
