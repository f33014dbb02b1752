// SPDX-FileCopyrightText: 2026 Dossio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background
//! thread. The host opens and migrates the database once at startup and
//! hands the ready handle to the services; nothing here initializes lazily.

use dossio_core::DossioError;

/// Convert a tokio-rusqlite `.call()` error into `DossioError::Storage`.
pub(crate) fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> DossioError {
    DossioError::Storage {
        source: Box::new(e),
    }
}

/// Connection setup errors carry a plain `rusqlite::Error`.
fn map_open_err(e: rusqlite::Error) -> DossioError {
    DossioError::Storage {
        source: Box::new(e),
    }
}

/// Handle to the SQLite database.
///
/// Cheap to clone; all clones share the single background writer thread.
#[derive(Clone)]
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl Database {
    /// Open (or create) the database file and apply PRAGMAs.
    ///
    /// Migrations are NOT run here; call [`Database::migrate`] explicitly
    /// at process start.
    pub async fn open(path: &str) -> Result<Self, DossioError> {
        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(map_open_err)?;
        let db = Self { conn };
        db.configure().await?;
        Ok(db)
    }

    /// Open an in-memory database (tests, `storage.path = ":memory:"`).
    pub async fn open_in_memory() -> Result<Self, DossioError> {
        let conn = tokio_rusqlite::Connection::open_in_memory()
            .await
            .map_err(map_open_err)?;
        let db = Self { conn };
        db.configure().await?;
        Ok(db)
    }

    async fn configure(&self) -> Result<(), DossioError> {
        self.conn
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch(
                    "PRAGMA journal_mode = WAL;
                     PRAGMA foreign_keys = ON;
                     PRAGMA busy_timeout = 5000;",
                )?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)
    }

    /// Run all pending embedded migrations.
    pub async fn migrate(&self) -> Result<(), DossioError> {
        self.conn
            .call(|conn| crate::migrations::apply(conn))
            .await
            .map_err(|e| DossioError::Storage {
                source: Box::new(e),
            })
    }

    /// Access the underlying tokio-rusqlite connection.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    /// Checkpoint and close the connection.
    pub async fn close(self) -> Result<(), DossioError> {
        self.conn
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)
    }
}
