// SPDX-FileCopyrightText: 2026 Attrib Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Store handle with PRAGMA setup, migrations, and lifecycle.
//!
//! All reads and writes are serialized through tokio-rusqlite's single
//! background thread. The [`Database`] value is the only writer for a run and
//! is passed explicitly to every query function.

use attrib_config::model::StorageConfig;
use attrib_core::{AttribError, Relation};
use tracing::debug;

use crate::migrations;

/// An open, migrated SQLite store.
pub struct Database {
    conn: tokio_rusqlite::Connection,
    path: String,
    wal_mode: bool,
}

impl Database {
    /// Open the store at `path` with WAL enabled.
    pub async fn open(path: &str) -> Result<Self, AttribError> {
        Self::open_with_config(&StorageConfig {
            database_path: path.to_string(),
            wal_mode: true,
        })
        .await
    }

    /// Open the store described by `config`, applying pending migrations.
    ///
    /// Any failure here is an [`AttribError::Connection`]: a run cannot
    /// proceed without its store.
    pub async fn open_with_config(config: &StorageConfig) -> Result<Self, AttribError> {
        let path = config.database_path.clone();
        let wal_mode = config.wal_mode;

        // Migrations need `&mut rusqlite::Connection`, so they run on a plain
        // connection before the async handle is opened.
        let prepare_path = path.clone();
        tokio::task::spawn_blocking(move || prepare_schema(&prepare_path, wal_mode))
            .await
            .map_err(|e| AttribError::Connection {
                source: Box::new(e),
            })??;

        let conn = tokio_rusqlite::Connection::open(&path)
            .await
            .map_err(|e| AttribError::Connection {
                source: Box::new(e),
            })?;

        conn.call(|conn| -> Result<(), rusqlite::Error> {
            conn.execute_batch("PRAGMA busy_timeout = 5000;")?;
            Ok(())
        })
        .await
        .map_err(|e| AttribError::Connection {
            source: Box::new(e),
        })?;

        debug!(path = %path, wal_mode, "store opened");
        Ok(Self {
            conn,
            path,
            wal_mode,
        })
    }

    /// The underlying tokio-rusqlite connection.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    /// Filesystem path of the store.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Checkpoint the WAL (if enabled) and release the connection.
    pub async fn close(self) -> Result<(), AttribError> {
        if self.wal_mode {
            self.conn
                .call(|conn| -> Result<(), rusqlite::Error> {
                    conn.query_row("PRAGMA wal_checkpoint(TRUNCATE);", [], |_| Ok(()))?;
                    Ok(())
                })
                .await
                .map_err(|e| AttribError::Connection {
                    source: Box::new(e),
                })?;
            debug!("WAL checkpoint complete");
        }
        self.conn.close().await.map_err(|e| AttribError::Connection {
            source: Box::new(e),
        })?;
        debug!(path = %self.path, "store closed");
        Ok(())
    }
}

fn prepare_schema(path: &str, wal_mode: bool) -> Result<(), AttribError> {
    let connection_err = |e: rusqlite::Error| AttribError::Connection {
        source: Box::new(e),
    };

    let mut conn = rusqlite::Connection::open(path).map_err(connection_err)?;
    if wal_mode {
        conn.query_row("PRAGMA journal_mode = WAL;", [], |row| row.get::<_, String>(0))
            .map_err(connection_err)?;
    }
    conn.execute_batch("PRAGMA synchronous = NORMAL;")
        .map_err(connection_err)?;
    migrations::run_migrations(&mut conn)
}

/// Returns a mapper from tokio-rusqlite errors to [`AttribError::Query`] on `relation`.
pub(crate) fn query_err(
    relation: Relation,
) -> impl FnOnce(tokio_rusqlite::Error<rusqlite::Error>) -> AttribError {
    move |e| AttribError::Query {
        relation: relation.to_string(),
        source: Box::new(e),
    }
}
