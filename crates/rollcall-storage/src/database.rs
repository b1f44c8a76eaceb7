// SPDX-FileCopyrightText: 2026 Rollcall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All access is serialized through tokio-rusqlite's single background
//! thread. The `Database` struct IS the single writer: query modules accept
//! `&Database` and call through `connection().call()`. Do NOT create
//! additional Connection instances for writes.

use tracing::debug;

use rollcall_core::RollcallError;

/// Handle to the SQLite database file.
///
/// Wraps a single [`tokio_rusqlite::Connection`] whose background thread
/// serializes all reads and writes, which eliminates SQLITE_BUSY errors
/// under concurrent request handling.
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl Database {
    /// Open (creating if absent) the database file at `path`.
    ///
    /// Applies connection PRAGMAs and runs all pending embedded migrations
    /// before returning, so a returned `Database` always has the full schema.
    pub async fn open(path: &str) -> Result<Self, RollcallError> {
        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(map_tr_err)?;

        conn.call(|conn| {
            conn.execute_batch(
                "PRAGMA journal_mode = WAL;
                 PRAGMA synchronous = NORMAL;
                 PRAGMA busy_timeout = 5000;
                 PRAGMA foreign_keys = ON;",
            )?;
            crate::migrations::run_migrations(conn)
                .map_err(|e| tokio_rusqlite::Error::Other(Box::new(e)))?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        debug!(path, "database opened, migrations applied");
        Ok(Self { conn })
    }

    /// Returns the underlying tokio-rusqlite connection.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    /// Probe the database with a trivial query.
    pub async fn ping(&self) -> Result<(), RollcallError> {
        self.conn
            .call(|conn| {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)
    }

    /// Checkpoint the WAL and release the connection.
    pub async fn close(&self) -> Result<(), RollcallError> {
        self.conn
            .call(|conn| {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        debug!("WAL checkpoint complete");
        Ok(())
    }
}

/// Map a tokio-rusqlite error into the crate-wide storage error.
pub fn map_tr_err(e: tokio_rusqlite::Error) -> RollcallError {
    RollcallError::Storage {
        source: Box::new(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn open_creates_file_and_schema() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("open.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        assert!(db_path.exists(), "database file should be created");

        // Schema is queryable immediately after open.
        let count: i64 = db
            .connection()
            .call(|conn| {
                let n = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
                Ok(n)
            })
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn reopen_is_idempotent() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("reopen.db");
        let path = db_path.to_str().unwrap();

        let db = Database::open(path).await.unwrap();
        db.close().await.unwrap();
        drop(db);

        // Second open runs migrations against the existing file without error.
        let db = Database::open(path).await.unwrap();
        db.ping().await.unwrap();
    }

    #[tokio::test]
    async fn ping_succeeds_on_open_database() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("ping.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        db.ping().await.unwrap();
    }
}
