//! User repository contracts and SQLite implementation.
//!
//! # Invariants
//! - Emails are unique ignoring ASCII case.
//! - Deleting a user removes their roster rows.

use super::table::{
    delete_row, ensure_changed, ensure_table_ready, exists, require_id, select_all, select_by_id,
    select_edge, select_where, Edge, Table,
};
use super::RepoResult;
use crate::model::user::User;
use crate::model::validation::ValidationError;
use crate::model::RowId;
use rusqlite::{params, Connection, Row};

pub(crate) struct UserTable;

impl Table for UserTable {
    const NAME: &'static str = "users";
    const COLUMNS: &'static [&'static str] =
        &["id", "first_name", "last_name", "email", "photo_url"];
    const ORDER_BY: &'static str = "id ASC";
    const REVERSE_ORDER_BY: &'static str = "id DESC";

    type Record = User;

    fn parse_row(row: &Row<'_>) -> RepoResult<User> {
        Ok(User {
            id: row.get("id")?,
            first_name: row.get("first_name")?,
            last_name: row.get("last_name")?,
            email: row.get("email")?,
            photo_url: row.get("photo_url")?,
        })
    }
}

/// Repository interface for user records.
pub trait UserRepository {
    fn create_user(&self, user: &User) -> RepoResult<RowId>;
    fn update_user(&self, user: &User) -> RepoResult<()>;
    fn get_user(&self, id: RowId) -> RepoResult<Option<User>>;
    fn find_user_by_email(&self, email: &str) -> RepoResult<Option<User>>;
    fn list_users(&self) -> RepoResult<Vec<User>>;
    fn edge_user(&self, edge: Edge) -> RepoResult<Option<User>>;
    fn delete_user(&self, id: RowId) -> RepoResult<()>;
}

/// SQLite-backed user repository.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table_ready::<UserTable>(conn)?;
        Ok(Self { conn })
    }

    fn validate_for_write(&self, user: &User) -> RepoResult<()> {
        user.validate()?;

        let taken = exists(
            self.conn,
            "SELECT EXISTS(
                SELECT 1
                FROM users
                WHERE email = ?1 COLLATE NOCASE
                  AND (?2 IS NULL OR id != ?2)
            );",
            params![user.email.trim(), user.id],
        )?;
        if taken {
            return Err(ValidationError::Taken {
                entity: "user",
                field: "email",
            }
            .into());
        }
        Ok(())
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn create_user(&self, user: &User) -> RepoResult<RowId> {
        self.validate_for_write(user)?;
        self.conn.execute(
            "INSERT INTO users (first_name, last_name, email, photo_url)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                user.first_name.as_str(),
                user.last_name.as_str(),
                user.email.trim(),
                user.photo_url.as_deref(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update_user(&self, user: &User) -> RepoResult<()> {
        let id = require_id(user)?;
        self.validate_for_write(user)?;
        let changed = self.conn.execute(
            "UPDATE users
             SET
                first_name = ?2,
                last_name = ?3,
                email = ?4,
                photo_url = ?5
             WHERE id = ?1;",
            params![
                id,
                user.first_name.as_str(),
                user.last_name.as_str(),
                user.email.trim(),
                user.photo_url.as_deref(),
            ],
        )?;
        ensure_changed(changed, "user", id)
    }

    fn get_user(&self, id: RowId) -> RepoResult<Option<User>> {
        select_by_id::<UserTable>(self.conn, id)
    }

    fn find_user_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let mut users =
            select_where::<UserTable, _>(self.conn, "email = ?1 COLLATE NOCASE", [email.trim()])?;
        Ok(users.pop())
    }

    fn list_users(&self) -> RepoResult<Vec<User>> {
        select_all::<UserTable>(self.conn)
    }

    fn edge_user(&self, edge: Edge) -> RepoResult<Option<User>> {
        select_edge::<UserTable>(self.conn, edge)
    }

    fn delete_user(&self, id: RowId) -> RepoResult<()> {
        delete_row(self.conn, "users", "user", id)
    }
}
