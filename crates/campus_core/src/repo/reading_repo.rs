//! Reading repository contracts and SQLite implementation.
//!
//! # Invariants
//! - Readings list by `order_number ASC`, ties broken by insertion order.
//! - `lesson_id` must reference an existing lesson.

use super::table::{
    bool_to_int, delete_row, ensure_changed, ensure_reference, ensure_table_ready, parse_bool,
    require_id, select_by_id, select_edge, select_where, Edge, Table,
};
use super::RepoResult;
use crate::model::reading::{Reading, ReadingScope};
use crate::model::validation::ValidationContext;
use crate::model::RowId;
use rusqlite::{params, Connection, Row};

pub(crate) struct ReadingTable;

impl ReadingTable {
    /// SQL predicate selecting one reading scope.
    pub(crate) fn scope_filter(scope: ReadingScope) -> &'static str {
        match scope {
            ReadingScope::All => "1 = 1",
            ReadingScope::Pre => "before_lesson = 1",
            ReadingScope::Post => "before_lesson != 1",
        }
    }
}

impl Table for ReadingTable {
    const NAME: &'static str = "readings";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "lesson_id",
        "order_number",
        "url",
        "caption",
        "before_lesson",
    ];
    const ORDER_BY: &'static str = "order_number ASC, id ASC";
    const REVERSE_ORDER_BY: &'static str = "order_number DESC, id DESC";

    type Record = Reading;

    fn parse_row(row: &Row<'_>) -> RepoResult<Reading> {
        Ok(Reading {
            id: row.get("id")?,
            lesson_id: row.get("lesson_id")?,
            order_number: row.get("order_number")?,
            url: row.get("url")?,
            caption: row.get("caption")?,
            before_lesson: parse_bool(row.get("before_lesson")?, "readings.before_lesson")?,
        })
    }
}

/// Repository interface for reading records.
pub trait ReadingRepository {
    fn create_reading(&self, reading: &Reading) -> RepoResult<RowId>;
    fn update_reading(&self, reading: &Reading) -> RepoResult<()>;
    fn get_reading(&self, id: RowId) -> RepoResult<Option<Reading>>;
    fn list_readings(&self, scope: ReadingScope) -> RepoResult<Vec<Reading>>;
    fn edge_reading(&self, edge: Edge) -> RepoResult<Option<Reading>>;
    fn delete_reading(&self, id: RowId) -> RepoResult<()>;
}

/// SQLite-backed reading repository.
pub struct SqliteReadingRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteReadingRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table_ready::<ReadingTable>(conn)?;
        Ok(Self { conn })
    }

    fn validate_for_write(
        &self,
        reading: &Reading,
        context: ValidationContext,
    ) -> RepoResult<()> {
        reading.validate(context)?;
        ensure_reference(
            self.conn,
            "reading",
            "lesson_id",
            "lessons",
            reading.lesson_id,
        )
    }
}

impl ReadingRepository for SqliteReadingRepository<'_> {
    fn create_reading(&self, reading: &Reading) -> RepoResult<RowId> {
        self.validate_for_write(reading, ValidationContext::Create)?;
        self.conn.execute(
            "INSERT INTO readings (
                lesson_id,
                order_number,
                url,
                caption,
                before_lesson
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                reading.lesson_id,
                reading.order_number,
                reading.url.as_str(),
                reading.caption.as_deref(),
                bool_to_int(reading.before_lesson),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update_reading(&self, reading: &Reading) -> RepoResult<()> {
        let id = require_id(reading)?;
        self.validate_for_write(reading, ValidationContext::Update)?;
        let changed = self.conn.execute(
            "UPDATE readings
             SET
                lesson_id = ?2,
                order_number = ?3,
                url = ?4,
                caption = ?5,
                before_lesson = ?6
             WHERE id = ?1;",
            params![
                id,
                reading.lesson_id,
                reading.order_number,
                reading.url.as_str(),
                reading.caption.as_deref(),
                bool_to_int(reading.before_lesson),
            ],
        )?;
        ensure_changed(changed, "reading", id)
    }

    fn get_reading(&self, id: RowId) -> RepoResult<Option<Reading>> {
        select_by_id::<ReadingTable>(self.conn, id)
    }

    fn list_readings(&self, scope: ReadingScope) -> RepoResult<Vec<Reading>> {
        select_where::<ReadingTable, _>(self.conn, ReadingTable::scope_filter(scope), [])
    }

    fn edge_reading(&self, edge: Edge) -> RepoResult<Option<Reading>> {
        select_edge::<ReadingTable>(self.conn, edge)
    }

    fn delete_reading(&self, id: RowId) -> RepoResult<()> {
        delete_row(self.conn, "readings", "reading", id)
    }
}
