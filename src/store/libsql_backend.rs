//! libsql table provider — concrete `RecordTable`/`TableProvider`
//! backend over a local file or in-memory database.
//!
//! The provider plays the role the surrounding application plays for the
//! facade: it owns the database, creates the two workbench tables on
//! open, and hands out per-table handles. The facade itself never
//! depends on this module, only on the traits.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use libsql::{Connection, params};
use tracing::{debug, info};

use crate::config::StoreConfig;
use crate::error::{ProviderError, TableError};
use crate::store::facade::{DATABASES_TABLE, SCRIPTS_TABLE};
use crate::store::traits::{Record, RecordTable, TableProvider};

/// libsql-backed table provider.
///
/// Stores a single connection that is reused by every handle it gives
/// out. `libsql::Connection` is `Send + Sync` and safe for concurrent
/// async use.
pub struct LibSqlProvider {
    #[allow(dead_code)]
    db: Arc<libsql::Database>,
    conn: Connection,
}

impl LibSqlProvider {
    /// Open (or create) a local database file and create the tables.
    pub async fn new_local(path: &Path) -> Result<Self, ProviderError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ProviderError::Backend(format!("Failed to create database directory: {e}"))
            })?;
        }

        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(|e| ProviderError::Backend(format!("Failed to open libsql database: {e}")))?;

        let conn = db
            .connect()
            .map_err(|e| ProviderError::Backend(format!("Failed to create connection: {e}")))?;

        let provider = Self {
            db: Arc::new(db),
            conn,
        };
        provider.init_schema().await?;
        info!(path = %path.display(), "Record store database opened");
        Ok(provider)
    }

    /// Open the database file named by the config.
    pub async fn from_config(config: &StoreConfig) -> Result<Self, ProviderError> {
        Self::new_local(&config.db_path).await
    }

    /// Create an in-memory database (for tests and ephemeral stores).
    pub async fn new_memory() -> Result<Self, ProviderError> {
        let db = libsql::Builder::new_local(":memory:")
            .build()
            .await
            .map_err(|e| {
                ProviderError::Backend(format!("Failed to create in-memory database: {e}"))
            })?;

        let conn = db
            .connect()
            .map_err(|e| ProviderError::Backend(format!("Failed to create connection: {e}")))?;

        let provider = Self {
            db: Arc::new(db),
            conn,
        };
        provider.init_schema().await?;
        Ok(provider)
    }

    /// Create the scripts and databases tables if they do not exist.
    async fn init_schema(&self) -> Result<(), ProviderError> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS scripts (
                    key TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                );
                CREATE TABLE IF NOT EXISTS databases (
                    key TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                );",
            )
            .await
            .map_err(|e| ProviderError::Backend(format!("Failed to create tables: {e}")))?;
        debug!("Record tables ready");
        Ok(())
    }
}

impl TableProvider for LibSqlProvider {
    fn table(&self, name: &str) -> Result<Arc<dyn RecordTable>, ProviderError> {
        // Names reach SQL only from this fixed set.
        let table = match name {
            SCRIPTS_TABLE => SCRIPTS_TABLE,
            DATABASES_TABLE => DATABASES_TABLE,
            _ => {
                return Err(ProviderError::UnknownTable {
                    name: name.to_string(),
                });
            }
        };
        Ok(Arc::new(LibSqlTable {
            conn: self.conn.clone(),
            table,
        }))
    }
}

/// One keyed record table inside the provider's database.
pub struct LibSqlTable {
    conn: Connection,
    table: &'static str,
}

#[async_trait]
impl RecordTable for LibSqlTable {
    async fn put(&self, record: Record) -> Result<(), TableError> {
        self.conn
            .execute(
                &format!(
                    "INSERT INTO {} (key, value) VALUES (?1, ?2)
                     ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                    self.table
                ),
                params![record.key, record.value],
            )
            .await
            .map_err(|e| TableError::Query(format!("put: {e}")))?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), TableError> {
        self.conn
            .execute(
                &format!("DELETE FROM {} WHERE key = ?1", self.table),
                params![key],
            )
            .await
            .map_err(|e| TableError::Query(format!("delete: {e}")))?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Record>, TableError> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT key, value FROM {} WHERE key = ?1", self.table),
                params![key],
            )
            .await
            .map_err(|e| TableError::Query(format!("get: {e}")))?;

        match rows.next().await {
            Ok(Some(row)) => {
                let key: String = row
                    .get(0)
                    .map_err(|e| TableError::Query(format!("get row parse: {e}")))?;
                let value: String = row
                    .get(1)
                    .map_err(|e| TableError::Query(format!("get row parse: {e}")))?;
                Ok(Some(Record { key, value }))
            }
            Ok(None) => Ok(None),
            Err(e) => Err(TableError::Query(format!("get: {e}"))),
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    async fn scripts_table() -> (LibSqlProvider, Arc<dyn RecordTable>) {
        let provider = LibSqlProvider::new_memory().await.unwrap();
        let table = provider.table(SCRIPTS_TABLE).unwrap();
        (provider, table)
    }

    #[tokio::test]
    async fn put_then_get() {
        let (_provider, table) = scripts_table().await;

        table.put(Record::new("k1", "v1")).await.unwrap();
        let record = table.get("k1").await.unwrap().unwrap();
        assert_eq!(record.key, "k1");
        assert_eq!(record.value, "v1");
    }

    #[tokio::test]
    async fn put_overwrites_existing_key() {
        let (_provider, table) = scripts_table().await;

        table.put(Record::new("k1", "first")).await.unwrap();
        table.put(Record::new("k1", "second")).await.unwrap();

        let record = table.get("k1").await.unwrap().unwrap();
        assert_eq!(record.value, "second");
    }

    #[tokio::test]
    async fn get_missing_is_none() {
        let (_provider, table) = scripts_table().await;
        assert!(table.get("nonexistent").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let (_provider, table) = scripts_table().await;

        table.put(Record::new("k1", "v1")).await.unwrap();
        table.delete("k1").await.unwrap();
        assert!(table.get("k1").await.unwrap().is_none());

        // Deleting again, and deleting a key that never existed, succeed.
        table.delete("k1").await.unwrap();
        table.delete("never-there").await.unwrap();
    }

    #[tokio::test]
    async fn unknown_table_is_rejected() {
        let provider = LibSqlProvider::new_memory().await.unwrap();
        let Err(err) = provider.table("no_such_table") else {
            panic!("expected UnknownTable error, got Ok");
        };
        match err {
            ProviderError::UnknownTable { name } => assert_eq!(name, "no_such_table"),
            other => panic!("expected UnknownTable, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn new_local_creates_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let db_path = tmp.path().join("nested").join("dir").join("store.db");

        let provider = LibSqlProvider::new_local(&db_path).await.unwrap();
        assert!(db_path.exists());
        drop(provider);
    }

    #[tokio::test]
    async fn schema_init_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let db_path = tmp.path().join("store.db");

        let first = LibSqlProvider::new_local(&db_path).await.unwrap();
        drop(first);
        // Reopening runs init_schema again against existing tables.
        LibSqlProvider::new_local(&db_path).await.unwrap();
    }
}
