// SPDX-FileCopyrightText: 2026 Rollcall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User row operations.

use rusqlite::params;

use rollcall_core::RollcallError;

use crate::database::Database;
use crate::models::User;

/// Insert a user row, returning the storage-assigned id.
pub async fn insert_user(db: &Database, name: &str) -> Result<i64, RollcallError> {
    let name = name.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute("INSERT INTO users (name) VALUES (?1)", params![name])?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// List all user rows in storage-engine return order.
///
/// No `ORDER BY` on purpose: the listing surface documents storage return
/// order (typically insertion order) as non-contractual.
pub async fn list_users(db: &Database) -> Result<Vec<User>, RollcallError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare("SELECT id, name FROM users")?;
            let rows = stmt.query_map([], |row| {
                Ok(User {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?;
            let mut users = Vec::new();
            for row in rows {
                users.push(row?);
            }
            Ok(users)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Count user rows.
pub async fn count_users(db: &Database) -> Result<i64, RollcallError> {
    db.connection()
        .call(|conn| {
            let n = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
            Ok(n)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
