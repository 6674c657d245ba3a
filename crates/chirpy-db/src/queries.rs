use anyhow::Result;
use chirpy_types::models::{Chirp, User};
use rusqlite::{Connection, OptionalExtension, Row};
use uuid::Uuid;

use crate::Database;

impl Database {
    // -- Users --

    pub fn insert_user(&self, user: &User) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (id, created_at, updated_at, email) VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![user.id, user.created_at, user.updated_at, user.email],
            )?;
            Ok(())
        })
    }

    pub fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.with_conn(|conn| query_user_by_email(conn, email))
    }

    /// Delete every user. Their chirps go with them via `ON DELETE CASCADE`.
    pub fn delete_all_users(&self) -> Result<usize> {
        self.with_conn(|conn| Ok(conn.execute("DELETE FROM users", [])?))
    }

    // -- Chirps --

    pub fn insert_chirp(&self, chirp: &Chirp) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO chirps (id, created_at, updated_at, body, user_id) VALUES (?1, ?2, ?3, ?4, ?5)",
                rusqlite::params![chirp.id, chirp.created_at, chirp.updated_at, chirp.body, chirp.user_id],
            )?;
            Ok(())
        })
    }

    pub fn get_chirp_by_id(&self, id: Uuid) -> Result<Option<Chirp>> {
        self.with_conn(|conn| {
            let chirp = conn
                .query_row(
                    "SELECT id, created_at, updated_at, body, user_id FROM chirps WHERE id = ?1",
                    [id],
                    chirp_from_row,
                )
                .optional()?;
            Ok(chirp)
        })
    }

    pub fn list_chirps(&self) -> Result<Vec<Chirp>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, created_at, updated_at, body, user_id
                 FROM chirps
                 ORDER BY created_at ASC",
            )?;

            let rows = stmt
                .query_map([], chirp_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(rows)
        })
    }
}

fn query_user_by_email(conn: &Connection, email: &str) -> Result<Option<User>> {
    let mut stmt =
        conn.prepare("SELECT id, created_at, updated_at, email FROM users WHERE email = ?1")?;

    let row = stmt
        .query_row([email], |row| {
            Ok(User {
                id: row.get(0)?,
                created_at: row.get(1)?,
                updated_at: row.get(2)?,
                email: row.get(3)?,
            })
        })
        .optional()?;

    Ok(row)
}

fn chirp_from_row(row: &Row<'_>) -> rusqlite::Result<Chirp> {
    Ok(Chirp {
        id: row.get(0)?,
        created_at: row.get(1)?,
        updated_at: row.get(2)?,
        body: row.get(3)?,
        user_id: row.get(4)?,
    })
}
