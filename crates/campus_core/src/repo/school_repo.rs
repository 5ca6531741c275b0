//! School repository contracts and SQLite implementation.
//!
//! # Invariants
//! - Schools list in insertion (`id`) order.
//! - A school cannot be deleted while it still has terms.
//! - Courses reach a school only through its terms.

use super::course_repo::CourseTable;
use super::table::{
    begin_immediate, delete_row, ensure_changed, ensure_no_dependents, ensure_table_ready,
    require_id, select_all, select_by_id, select_edge, select_joined, Edge, Table,
};
use super::RepoResult;
use crate::model::course::Course;
use crate::model::school::School;
use crate::model::RowId;
use rusqlite::{params, Connection, Row};

pub(crate) struct SchoolTable;

impl Table for SchoolTable {
    const NAME: &'static str = "schools";
    const COLUMNS: &'static [&'static str] = &["id", "name"];
    const ORDER_BY: &'static str = "id ASC";
    const REVERSE_ORDER_BY: &'static str = "id DESC";

    type Record = School;

    fn parse_row(row: &Row<'_>) -> RepoResult<School> {
        Ok(School {
            id: row.get("id")?,
            name: row.get("name")?,
        })
    }
}

/// Repository interface for school records.
pub trait SchoolRepository {
    fn create_school(&self, school: &School) -> RepoResult<RowId>;
    fn update_school(&self, school: &School) -> RepoResult<()>;
    fn get_school(&self, id: RowId) -> RepoResult<Option<School>>;
    fn list_schools(&self) -> RepoResult<Vec<School>>;
    fn edge_school(&self, edge: Edge) -> RepoResult<Option<School>>;
    /// Courses of every term of the school, newest term first.
    fn list_school_courses(&self, school_id: RowId) -> RepoResult<Vec<Course>>;
    fn delete_school(&self, id: RowId) -> RepoResult<()>;
}

/// SQLite-backed school repository.
pub struct SqliteSchoolRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSchoolRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table_ready::<SchoolTable>(conn)?;
        Ok(Self { conn })
    }
}

impl SchoolRepository for SqliteSchoolRepository<'_> {
    fn create_school(&self, school: &School) -> RepoResult<RowId> {
        school.validate()?;
        self.conn.execute(
            "INSERT INTO schools (name) VALUES (?1);",
            [school.name.as_str()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update_school(&self, school: &School) -> RepoResult<()> {
        let id = require_id(school)?;
        school.validate()?;
        let changed = self.conn.execute(
            "UPDATE schools SET name = ?2 WHERE id = ?1;",
            params![id, school.name.as_str()],
        )?;
        ensure_changed(changed, "school", id)
    }

    fn get_school(&self, id: RowId) -> RepoResult<Option<School>> {
        select_by_id::<SchoolTable>(self.conn, id)
    }

    fn list_schools(&self) -> RepoResult<Vec<School>> {
        select_all::<SchoolTable>(self.conn)
    }

    fn edge_school(&self, edge: Edge) -> RepoResult<Option<School>> {
        select_edge::<SchoolTable>(self.conn, edge)
    }

    fn list_school_courses(&self, school_id: RowId) -> RepoResult<Vec<Course>> {
        select_joined::<CourseTable, _>(
            self.conn,
            "c",
            "INNER JOIN terms t ON t.id = c.term_id WHERE t.school_id = ?1",
            "t.ends_on DESC, t.id ASC, c.id ASC",
            [school_id],
        )
    }

    fn delete_school(&self, id: RowId) -> RepoResult<()> {
        let tx = begin_immediate(self.conn)?;
        ensure_no_dependents(&tx, "school", id, "terms", "school_id")?;
        delete_row(&tx, "schools", "school", id)?;
        tx.commit()?;
        Ok(())
    }
}
