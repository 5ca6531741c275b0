//! Shared SQL plumbing for single-table repositories.
//!
//! Each repository describes its table once (name, columns, default order,
//! row parser) and reuses the select/exists/delete helpers below, so the
//! per-entity files only carry the SQL that is specific to them.

use super::{RepoError, RepoResult};
use crate::db::migrations::latest_version;
use crate::model::validation::ValidationError;
use crate::model::{Record, RowId};
use rusqlite::{Connection, Params, Row, Transaction, TransactionBehavior};

/// Static description of one table and its read model.
pub(crate) trait Table {
    const NAME: &'static str;
    const COLUMNS: &'static [&'static str];
    /// Default listing order.
    const ORDER_BY: &'static str;
    /// Exact reverse of `ORDER_BY`, used to pick the last row.
    const REVERSE_ORDER_BY: &'static str;

    type Record;

    fn parse_row(row: &Row<'_>) -> RepoResult<Self::Record>;
}

/// End of a table's default ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    First,
    Last,
}

pub(crate) fn select_where<T: Table, P: Params>(
    conn: &Connection,
    filter: &str,
    params: P,
) -> RepoResult<Vec<T::Record>> {
    let sql = format!(
        "SELECT {} FROM {} WHERE {filter} ORDER BY {};",
        T::COLUMNS.join(", "),
        T::NAME,
        T::ORDER_BY
    );
    collect_rows::<T, P>(conn, &sql, params)
}

pub(crate) fn select_all<T: Table>(conn: &Connection) -> RepoResult<Vec<T::Record>> {
    select_where::<T, _>(conn, "1 = 1", [])
}

pub(crate) fn select_by_id<T: Table>(
    conn: &Connection,
    id: RowId,
) -> RepoResult<Option<T::Record>> {
    let mut rows = select_where::<T, _>(conn, "id = ?1", [id])?;
    Ok(rows.pop())
}

pub(crate) fn select_edge<T: Table>(
    conn: &Connection,
    edge: Edge,
) -> RepoResult<Option<T::Record>> {
    let order_by = match edge {
        Edge::First => T::ORDER_BY,
        Edge::Last => T::REVERSE_ORDER_BY,
    };
    let sql = format!(
        "SELECT {} FROM {} ORDER BY {order_by} LIMIT 1;",
        T::COLUMNS.join(", "),
        T::NAME
    );
    let mut rows = collect_rows::<T, _>(conn, &sql, [])?;
    Ok(rows.pop())
}

/// Selects `T` rows through a join.
///
/// `alias` names `T`'s table inside `joins_and_filter`; selected columns are
/// re-aliased to their bare names so `T::parse_row` can read them.
pub(crate) fn select_joined<T: Table, P: Params>(
    conn: &Connection,
    alias: &str,
    joins_and_filter: &str,
    order_by: &str,
    params: P,
) -> RepoResult<Vec<T::Record>> {
    let columns = T::COLUMNS
        .iter()
        .map(|column| format!("{alias}.{column} AS {column}"))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!(
        "SELECT {columns} FROM {} {alias} {joins_and_filter} ORDER BY {order_by};",
        T::NAME
    );
    collect_rows::<T, P>(conn, &sql, params)
}

fn collect_rows<T: Table, P: Params>(
    conn: &Connection,
    sql: &str,
    params: P,
) -> RepoResult<Vec<T::Record>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(params)?;
    let mut records = Vec::new();
    while let Some(row) = rows.next()? {
        records.push(T::parse_row(row)?);
    }
    Ok(records)
}

/// Runs a `SELECT EXISTS(...)` query.
pub(crate) fn exists<P: Params>(conn: &Connection, sql: &str, params: P) -> RepoResult<bool> {
    let found: i64 = conn.query_row(sql, params, |row| row.get(0))?;
    Ok(found == 1)
}

pub(crate) fn row_exists(conn: &Connection, table: &str, id: RowId) -> RepoResult<bool> {
    exists(
        conn,
        &format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE id = ?1);"),
        [id],
    )
}

/// Fails with `UnknownReference` when a set foreign key has no target row.
pub(crate) fn ensure_reference(
    conn: &Connection,
    entity: &'static str,
    field: &'static str,
    table: &str,
    id: Option<RowId>,
) -> RepoResult<()> {
    let Some(id) = id else {
        return Ok(());
    };
    if !row_exists(conn, table, id)? {
        return Err(ValidationError::UnknownReference { entity, field, id }.into());
    }
    Ok(())
}

pub(crate) fn count_referencing(
    conn: &Connection,
    table: &str,
    column: &str,
    id: RowId,
) -> RepoResult<u64> {
    let count: i64 = conn.query_row(
        &format!("SELECT COUNT(*) FROM {table} WHERE {column} = ?1;"),
        [id],
        |row| row.get(0),
    )?;
    Ok(count.max(0) as u64)
}

/// Fails with `Restricted` when any `dependent` row references `id`.
pub(crate) fn ensure_no_dependents(
    conn: &Connection,
    entity: &'static str,
    id: RowId,
    dependent: &'static str,
    column: &str,
) -> RepoResult<()> {
    let count = count_referencing(conn, dependent, column, id)?;
    if count > 0 {
        return Err(RepoError::Restricted {
            entity,
            id,
            dependent,
            count,
        });
    }
    Ok(())
}

pub(crate) fn delete_row(
    conn: &Connection,
    table: &str,
    entity: &'static str,
    id: RowId,
) -> RepoResult<()> {
    let changed = conn.execute(&format!("DELETE FROM {table} WHERE id = ?1;"), [id])?;
    ensure_changed(changed, entity, id)
}

pub(crate) fn ensure_changed(changed: usize, entity: &'static str, id: RowId) -> RepoResult<()> {
    if changed == 0 {
        return Err(RepoError::NotFound { entity, id });
    }
    Ok(())
}

/// Returns the record id, or `Unsaved` for records that were never inserted.
pub(crate) fn require_id<R: Record>(record: &R) -> RepoResult<RowId> {
    record.id().ok_or(RepoError::Unsaved(R::ENTITY))
}

pub(crate) fn begin_immediate(conn: &Connection) -> RepoResult<Transaction<'_>> {
    Ok(Transaction::new_unchecked(
        conn,
        TransactionBehavior::Immediate,
    )?)
}

pub(crate) fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

pub(crate) fn parse_bool(value: i64, column: &str) -> RepoResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid boolean value `{other}` in {column}"
        ))),
    }
}

/// Verifies the connection is migrated and `T`'s table has every column.
pub(crate) fn ensure_table_ready<T: Table>(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, T::NAME)? {
        return Err(RepoError::MissingRequiredTable(T::NAME));
    }

    for column in T::COLUMNS {
        if !table_has_column(conn, T::NAME, column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: T::NAME,
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    exists(
        conn,
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
    )
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
