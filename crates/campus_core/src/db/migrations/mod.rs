//! SQLite migration registry and executor.
//!
//! # Responsibility
//! - Register schema migrations in strictly increasing order.
//! - Apply pending migrations and revert applied ones atomically.
//!
//! # Invariants
//! - `version` values must remain monotonic.
//! - Applied migration version is mirrored to `PRAGMA user_version`.
//! - Every `up` script has a `down` script that drops exactly what it created.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    up: &'static str,
    down: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        up: include_str!("0001_schools_terms.sql"),
        down: include_str!("0001_schools_terms.down.sql"),
    },
    Migration {
        version: 2,
        up: include_str!("0002_courses_lessons.sql"),
        down: include_str!("0002_courses_lessons.down.sql"),
    },
    Migration {
        version: 3,
        up: include_str!("0003_users_rosters.sql"),
        down: include_str!("0003_users_rosters.down.sql"),
    },
];

/// Returns the latest migration version known by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Reads the schema version stored in the connection.
pub fn current_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}

/// Applies all pending migrations on the provided connection.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let current = current_version(conn)?;
    let latest = latest_version();

    if current > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current,
            latest_supported: latest,
        });
    }

    if current == latest {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in MIGRATIONS {
        if migration.version <= current {
            continue;
        }

        tx.execute_batch(migration.up)?;
        tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))?;
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok direction=up from_version={} to_version={}",
        current, latest
    );
    Ok(())
}

/// Reverts applied migrations down to `target_version`.
///
/// `target_version = 0` drops every table this crate owns. Rolling back to
/// the current version is a no-op.
///
/// # Errors
/// - `InvalidRollbackTarget` when `target_version` is above the current version.
/// - `UnsupportedSchemaVersion` when the stored schema is newer than this binary.
pub fn rollback_migrations(conn: &mut Connection, target_version: u32) -> DbResult<()> {
    let current = current_version(conn)?;
    let latest = latest_version();

    if current > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current,
            latest_supported: latest,
        });
    }
    if target_version > current {
        return Err(DbError::InvalidRollbackTarget {
            current_version: current,
            target_version,
        });
    }
    if target_version == current {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in MIGRATIONS.iter().rev() {
        if migration.version > current || migration.version <= target_version {
            continue;
        }

        tx.execute_batch(migration.down)?;
        tx.execute_batch(&format!(
            "PRAGMA user_version = {};",
            migration.version - 1
        ))?;
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok direction=down from_version={} to_version={}",
        current, target_version
    );
    Ok(())
}

/// Drops every table and re-applies all migrations, leaving an empty schema.
pub fn reset_schema(conn: &mut Connection) -> DbResult<()> {
    rollback_migrations(conn, 0)?;
    apply_migrations(conn)
}

#[cfg(test)]
mod tests {
    use super::MIGRATIONS;

    #[test]
    fn migration_versions_are_strictly_increasing_from_one() {
        for (index, migration) in MIGRATIONS.iter().enumerate() {
            assert_eq!(migration.version as usize, index + 1);
        }
    }

    #[test]
    fn every_migration_has_a_down_script() {
        for migration in MIGRATIONS {
            assert!(migration.down.contains("DROP TABLE"));
        }
    }
}
