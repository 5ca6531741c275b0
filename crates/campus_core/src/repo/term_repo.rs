//! Term repository contracts and SQLite implementation.
//!
//! # Invariants
//! - Terms list by `ends_on DESC`, ties broken by insertion order.
//! - `school_id` must reference an existing school.
//! - A term cannot be deleted while courses are scheduled into it.

use super::course_repo::CourseTable;
use super::table::{
    begin_immediate, delete_row, ensure_changed, ensure_no_dependents, ensure_reference,
    ensure_table_ready, require_id, select_all, select_by_id, select_edge, select_where, Edge,
    Table,
};
use super::RepoResult;
use crate::model::course::Course;
use crate::model::term::{Term, UNKNOWN_SCHOOL_NAME};
use crate::model::RowId;
use rusqlite::{params, Connection, OptionalExtension, Row};

pub(crate) struct TermTable;

impl Table for TermTable {
    const NAME: &'static str = "terms";
    const COLUMNS: &'static [&'static str] = &["id", "name", "starts_on", "ends_on", "school_id"];
    const ORDER_BY: &'static str = "ends_on DESC, id ASC";
    const REVERSE_ORDER_BY: &'static str = "ends_on ASC, id DESC";

    type Record = Term;

    fn parse_row(row: &Row<'_>) -> RepoResult<Term> {
        Ok(Term {
            id: row.get("id")?,
            name: row.get("name")?,
            starts_on: row.get("starts_on")?,
            ends_on: row.get("ends_on")?,
            school_id: row.get("school_id")?,
        })
    }
}

/// Repository interface for term records.
pub trait TermRepository {
    fn create_term(&self, term: &Term) -> RepoResult<RowId>;
    fn update_term(&self, term: &Term) -> RepoResult<()>;
    fn get_term(&self, id: RowId) -> RepoResult<Option<Term>>;
    fn list_terms(&self) -> RepoResult<Vec<Term>>;
    fn edge_term(&self, edge: Edge) -> RepoResult<Option<Term>>;
    fn list_terms_for_school(&self, school_id: RowId) -> RepoResult<Vec<Term>>;
    fn list_term_courses(&self, term_id: RowId) -> RepoResult<Vec<Course>>;
    /// Name of the term's school, or `"None"` when it cannot be resolved.
    fn school_name(&self, term_id: RowId) -> RepoResult<String>;
    fn delete_term(&self, id: RowId) -> RepoResult<()>;
}

/// SQLite-backed term repository.
pub struct SqliteTermRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTermRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table_ready::<TermTable>(conn)?;
        Ok(Self { conn })
    }

    fn validate_for_write(&self, term: &Term) -> RepoResult<()> {
        term.validate()?;
        ensure_reference(self.conn, "term", "school_id", "schools", term.school_id)
    }
}

impl TermRepository for SqliteTermRepository<'_> {
    fn create_term(&self, term: &Term) -> RepoResult<RowId> {
        self.validate_for_write(term)?;
        self.conn.execute(
            "INSERT INTO terms (name, starts_on, ends_on, school_id)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                term.name.as_str(),
                term.starts_on,
                term.ends_on,
                term.school_id
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update_term(&self, term: &Term) -> RepoResult<()> {
        let id = require_id(term)?;
        self.validate_for_write(term)?;
        let changed = self.conn.execute(
            "UPDATE terms
             SET
                name = ?2,
                starts_on = ?3,
                ends_on = ?4,
                school_id = ?5
             WHERE id = ?1;",
            params![
                id,
                term.name.as_str(),
                term.starts_on,
                term.ends_on,
                term.school_id
            ],
        )?;
        ensure_changed(changed, "term", id)
    }

    fn get_term(&self, id: RowId) -> RepoResult<Option<Term>> {
        select_by_id::<TermTable>(self.conn, id)
    }

    fn list_terms(&self) -> RepoResult<Vec<Term>> {
        select_all::<TermTable>(self.conn)
    }

    fn edge_term(&self, edge: Edge) -> RepoResult<Option<Term>> {
        select_edge::<TermTable>(self.conn, edge)
    }

    fn list_terms_for_school(&self, school_id: RowId) -> RepoResult<Vec<Term>> {
        select_where::<TermTable, _>(self.conn, "school_id = ?1", [school_id])
    }

    fn list_term_courses(&self, term_id: RowId) -> RepoResult<Vec<Course>> {
        select_where::<CourseTable, _>(self.conn, "term_id = ?1", [term_id])
    }

    fn school_name(&self, term_id: RowId) -> RepoResult<String> {
        let name = self
            .conn
            .query_row(
                "SELECT s.name
                 FROM terms t
                 INNER JOIN schools s ON s.id = t.school_id
                 WHERE t.id = ?1;",
                [term_id],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(name.unwrap_or_else(|| UNKNOWN_SCHOOL_NAME.to_string()))
    }

    fn delete_term(&self, id: RowId) -> RepoResult<()> {
        let tx = begin_immediate(self.conn)?;
        ensure_no_dependents(&tx, "term", id, "courses", "term_id")?;
        delete_row(&tx, "terms", "term", id)?;
        tx.commit()?;
        Ok(())
    }
}
