//! Assignment repository contracts and SQLite implementation.
//!
//! # Invariants
//! - `name` is unique within one course.
//! - Deleting an assignment clears lesson pre/in-class references to it
//!   (`ON DELETE SET NULL`).

use super::table::{
    delete_row, ensure_changed, ensure_reference, ensure_table_ready, exists, require_id,
    select_all, select_by_id, select_edge, Edge, Table,
};
use super::RepoResult;
use crate::model::assignment::Assignment;
use crate::model::validation::ValidationError;
use crate::model::RowId;
use rusqlite::{params, Connection, Row};

pub(crate) struct AssignmentTable;

impl Table for AssignmentTable {
    const NAME: &'static str = "assignments";
    const COLUMNS: &'static [&'static str] = &["id", "course_id", "name", "percent_of_grade"];
    const ORDER_BY: &'static str = "id ASC";
    const REVERSE_ORDER_BY: &'static str = "id DESC";

    type Record = Assignment;

    fn parse_row(row: &Row<'_>) -> RepoResult<Assignment> {
        Ok(Assignment {
            id: row.get("id")?,
            course_id: row.get("course_id")?,
            name: row.get("name")?,
            percent_of_grade: row.get("percent_of_grade")?,
        })
    }
}

/// Repository interface for assignment records.
pub trait AssignmentRepository {
    fn create_assignment(&self, assignment: &Assignment) -> RepoResult<RowId>;
    fn update_assignment(&self, assignment: &Assignment) -> RepoResult<()>;
    fn get_assignment(&self, id: RowId) -> RepoResult<Option<Assignment>>;
    fn list_assignments(&self) -> RepoResult<Vec<Assignment>>;
    fn edge_assignment(&self, edge: Edge) -> RepoResult<Option<Assignment>>;
    fn delete_assignment(&self, id: RowId) -> RepoResult<()>;
}

/// SQLite-backed assignment repository.
pub struct SqliteAssignmentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAssignmentRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table_ready::<AssignmentTable>(conn)?;
        Ok(Self { conn })
    }

    fn validate_for_write(&self, assignment: &Assignment) -> RepoResult<()> {
        assignment.validate()?;
        ensure_reference(
            self.conn,
            "assignment",
            "course_id",
            "courses",
            assignment.course_id,
        )?;

        let taken = exists(
            self.conn,
            "SELECT EXISTS(
                SELECT 1
                FROM assignments
                WHERE name = ?1
                  AND course_id = ?2
                  AND (?3 IS NULL OR id != ?3)
            );",
            params![assignment.name.as_str(), assignment.course_id, assignment.id],
        )?;
        if taken {
            return Err(ValidationError::Taken {
                entity: "assignment",
                field: "name",
            }
            .into());
        }
        Ok(())
    }
}

impl AssignmentRepository for SqliteAssignmentRepository<'_> {
    fn create_assignment(&self, assignment: &Assignment) -> RepoResult<RowId> {
        self.validate_for_write(assignment)?;
        self.conn.execute(
            "INSERT INTO assignments (course_id, name, percent_of_grade) VALUES (?1, ?2, ?3);",
            params![
                assignment.course_id,
                assignment.name.as_str(),
                assignment.percent_of_grade
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update_assignment(&self, assignment: &Assignment) -> RepoResult<()> {
        let id = require_id(assignment)?;
        self.validate_for_write(assignment)?;
        let changed = self.conn.execute(
            "UPDATE assignments
             SET
                course_id = ?2,
                name = ?3,
                percent_of_grade = ?4
             WHERE id = ?1;",
            params![
                id,
                assignment.course_id,
                assignment.name.as_str(),
                assignment.percent_of_grade
            ],
        )?;
        ensure_changed(changed, "assignment", id)
    }

    fn get_assignment(&self, id: RowId) -> RepoResult<Option<Assignment>> {
        select_by_id::<AssignmentTable>(self.conn, id)
    }

    fn list_assignments(&self) -> RepoResult<Vec<Assignment>> {
        select_all::<AssignmentTable>(self.conn)
    }

    fn edge_assignment(&self, edge: Edge) -> RepoResult<Option<Assignment>> {
        select_edge::<AssignmentTable>(self.conn, edge)
    }

    fn delete_assignment(&self, id: RowId) -> RepoResult<()> {
        delete_row(self.conn, "assignments", "assignment", id)
    }
}
