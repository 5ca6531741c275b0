//! Lesson repository contracts and SQLite implementation.
//!
//! # Invariants
//! - Lessons list in insertion order.
//! - Deleting a lesson deletes its readings (`ON DELETE CASCADE`).
//! - Pre-class and in-class assignment ids must reference existing rows.

use super::reading_repo::ReadingTable;
use super::table::{
    count_referencing, delete_row, ensure_changed, ensure_reference, ensure_table_ready,
    require_id, select_all, select_by_id, select_edge, select_where, Edge, Table,
};
use super::RepoResult;
use crate::model::lesson::Lesson;
use crate::model::reading::{Reading, ReadingScope};
use crate::model::RowId;
use log::debug;
use rusqlite::{params, Connection, Row};

pub(crate) struct LessonTable;

impl Table for LessonTable {
    const NAME: &'static str = "lessons";
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "name",
        "course_id",
        "pre_class_assignment_id",
        "in_class_assignment_id",
    ];
    const ORDER_BY: &'static str = "id ASC";
    const REVERSE_ORDER_BY: &'static str = "id DESC";

    type Record = Lesson;

    fn parse_row(row: &Row<'_>) -> RepoResult<Lesson> {
        Ok(Lesson {
            id: row.get("id")?,
            name: row.get("name")?,
            course_id: row.get("course_id")?,
            pre_class_assignment_id: row.get("pre_class_assignment_id")?,
            in_class_assignment_id: row.get("in_class_assignment_id")?,
        })
    }
}

/// Repository interface for lesson records.
pub trait LessonRepository {
    fn create_lesson(&self, lesson: &Lesson) -> RepoResult<RowId>;
    fn update_lesson(&self, lesson: &Lesson) -> RepoResult<()>;
    fn get_lesson(&self, id: RowId) -> RepoResult<Option<Lesson>>;
    fn list_lessons(&self) -> RepoResult<Vec<Lesson>>;
    fn edge_lesson(&self, edge: Edge) -> RepoResult<Option<Lesson>>;
    fn list_lessons_with_pre_class_assignment(
        &self,
        assignment_id: RowId,
    ) -> RepoResult<Vec<Lesson>>;
    fn list_lessons_with_in_class_assignment(
        &self,
        assignment_id: RowId,
    ) -> RepoResult<Vec<Lesson>>;
    fn list_lesson_readings(
        &self,
        lesson_id: RowId,
        scope: ReadingScope,
    ) -> RepoResult<Vec<Reading>>;
    fn delete_lesson(&self, id: RowId) -> RepoResult<()>;
}

/// SQLite-backed lesson repository.
pub struct SqliteLessonRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteLessonRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table_ready::<LessonTable>(conn)?;
        Ok(Self { conn })
    }

    fn validate_for_write(&self, lesson: &Lesson) -> RepoResult<()> {
        lesson.validate()?;
        ensure_reference(self.conn, "lesson", "course_id", "courses", lesson.course_id)?;
        ensure_reference(
            self.conn,
            "lesson",
            "pre_class_assignment_id",
            "assignments",
            lesson.pre_class_assignment_id,
        )?;
        ensure_reference(
            self.conn,
            "lesson",
            "in_class_assignment_id",
            "assignments",
            lesson.in_class_assignment_id,
        )
    }
}

impl LessonRepository for SqliteLessonRepository<'_> {
    fn create_lesson(&self, lesson: &Lesson) -> RepoResult<RowId> {
        self.validate_for_write(lesson)?;
        self.conn.execute(
            "INSERT INTO lessons (
                name,
                course_id,
                pre_class_assignment_id,
                in_class_assignment_id
            ) VALUES (?1, ?2, ?3, ?4);",
            params![
                lesson.name.as_str(),
                lesson.course_id,
                lesson.pre_class_assignment_id,
                lesson.in_class_assignment_id,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update_lesson(&self, lesson: &Lesson) -> RepoResult<()> {
        let id = require_id(lesson)?;
        self.validate_for_write(lesson)?;
        let changed = self.conn.execute(
            "UPDATE lessons
             SET
                name = ?2,
                course_id = ?3,
                pre_class_assignment_id = ?4,
                in_class_assignment_id = ?5
             WHERE id = ?1;",
            params![
                id,
                lesson.name.as_str(),
                lesson.course_id,
                lesson.pre_class_assignment_id,
                lesson.in_class_assignment_id,
            ],
        )?;
        ensure_changed(changed, "lesson", id)
    }

    fn get_lesson(&self, id: RowId) -> RepoResult<Option<Lesson>> {
        select_by_id::<LessonTable>(self.conn, id)
    }

    fn list_lessons(&self) -> RepoResult<Vec<Lesson>> {
        select_all::<LessonTable>(self.conn)
    }

    fn edge_lesson(&self, edge: Edge) -> RepoResult<Option<Lesson>> {
        select_edge::<LessonTable>(self.conn, edge)
    }

    fn list_lessons_with_pre_class_assignment(
        &self,
        assignment_id: RowId,
    ) -> RepoResult<Vec<Lesson>> {
        select_where::<LessonTable, _>(self.conn, "pre_class_assignment_id = ?1", [assignment_id])
    }

    fn list_lessons_with_in_class_assignment(
        &self,
        assignment_id: RowId,
    ) -> RepoResult<Vec<Lesson>> {
        select_where::<LessonTable, _>(self.conn, "in_class_assignment_id = ?1", [assignment_id])
    }

    fn list_lesson_readings(
        &self,
        lesson_id: RowId,
        scope: ReadingScope,
    ) -> RepoResult<Vec<Reading>> {
        let filter = format!("lesson_id = ?1 AND {}", ReadingTable::scope_filter(scope));
        select_where::<ReadingTable, _>(self.conn, &filter, [lesson_id])
    }

    fn delete_lesson(&self, id: RowId) -> RepoResult<()> {
        let readings = count_referencing(self.conn, "readings", "lesson_id", id)?;
        delete_row(self.conn, "lessons", "lesson", id)?;
        debug!(
            "event=record_cascade module=repo status=ok entity=lesson id={} readings={}",
            id, readings
        );
        Ok(())
    }
}
