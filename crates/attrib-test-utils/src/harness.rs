// SPDX-FileCopyrightText: 2026 Attrib Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Temporary, migrated SQLite store for integration tests.

use std::path::{Path, PathBuf};

use attrib_config::model::AttribConfig;
use attrib_core::AttribError;
use attrib_storage::{insert_conversions, insert_costs, insert_sessions, Database};
use tempfile::TempDir;

use crate::fixtures::{sample_conversions, sample_costs, sample_sessions};

/// A database file inside its own temp directory.
///
/// The directory lives as long as the `TestStore`, so output artifacts
/// written next to the database are cleaned up with it.
pub struct TestStore {
    dir: TempDir,
    db_path: PathBuf,
}

impl TestStore {
    /// Create an empty, migrated store.
    pub async fn empty() -> Result<Self, AttribError> {
        let dir = tempfile::tempdir().map_err(|e| AttribError::Internal(e.to_string()))?;
        let db_path = dir.path().join("challenge.db");
        Database::open(&db_path.to_string_lossy()).await?.close().await?;
        Ok(Self { dir, db_path })
    }

    /// Create a store holding the sample sessions, conversions, and costs.
    pub async fn seeded() -> Result<Self, AttribError> {
        let store = Self::empty().await?;
        let db = store.open().await?;
        insert_sessions(&db, &sample_sessions()).await?;
        insert_conversions(&db, &sample_conversions()).await?;
        insert_costs(&db, &sample_costs()).await?;
        db.close().await?;
        Ok(store)
    }

    /// Open a new handle on the store.
    pub async fn open(&self) -> Result<Database, AttribError> {
        Database::open(&self.db_path.to_string_lossy()).await
    }

    /// Temp directory holding the database.
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// A config pointing storage, audit, report, and key file paths into
    /// the temp directory.
    pub fn config(&self) -> AttribConfig {
        let mut config = AttribConfig::default();
        config.storage.database_path = self.db_path.to_string_lossy().into_owned();
        config.scoring.api_key_file = self.path_string("api_key.txt");
        config.scoring.audit_path = self.path_string("api_responses.json");
        config.report.output_path = self.path_string("channel_reporting.csv");
        config
    }

    fn path_string(&self, name: &str) -> String {
        self.dir.path().join(name).to_string_lossy().into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use attrib_core::Relation;
    use attrib_storage::count_rows;

    #[tokio::test]
    async fn seeded_store_has_sample_rows() {
        let store = TestStore::seeded().await.unwrap();
        let db = store.open().await.unwrap();

        assert_eq!(count_rows(&db, Relation::SessionSources).await.unwrap(), 5);
        assert_eq!(count_rows(&db, Relation::Conversions).await.unwrap(), 2);
        assert_eq!(count_rows(&db, Relation::SessionCosts).await.unwrap(), 4);
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn config_points_into_temp_dir() {
        let store = TestStore::empty().await.unwrap();
        let config = store.config();
        let dir = store.dir().to_string_lossy();
        assert!(config.storage.database_path.starts_with(&*dir));
        assert!(config.report.output_path.starts_with(&*dir));
        assert!(config.scoring.api_key.is_none());
    }
}
