//! `RecordStore` — narrow, error-tolerant API over two keyed record
//! tables, one for editor scripts and one for database snapshots.
//!
//! Every operation is a single pass-through to the underlying table, and
//! no failure ever reaches the caller: writes and removes resolve to
//! nothing, reads collapse "absent" and "failed" into `None`, and each
//! caught error goes to the injected reporter instead.

use std::sync::Arc;

use tracing::debug;

use crate::report::{ErrorReporter, StoreFailure, StoreOp};
use crate::store::traits::{Record, RecordTable, TableProvider};

/// Name of the table holding script records.
pub const SCRIPTS_TABLE: &str = "scripts";
/// Name of the table holding database snapshot records.
pub const DATABASES_TABLE: &str = "databases";

/// Persistent record store for workbench scripts and database snapshots.
///
/// Holds two table handles bound at construction for the store's
/// lifetime, plus the reporter that receives every swallowed failure.
/// The store keeps no record state between calls; every read re-queries
/// the table.
pub struct RecordStore {
    scripts: Arc<dyn RecordTable>,
    databases: Arc<dyn RecordTable>,
    reporter: Arc<dyn ErrorReporter>,
}

impl RecordStore {
    /// Create a store directly from two table handles.
    pub fn new(
        scripts: Arc<dyn RecordTable>,
        databases: Arc<dyn RecordTable>,
        reporter: Arc<dyn ErrorReporter>,
    ) -> Self {
        Self {
            scripts,
            databases,
            reporter,
        }
    }

    /// Bind the store to the provider's scripts and databases tables.
    ///
    /// Returns `None` when either lookup fails; the failure is reported
    /// and never propagates. Callers that need a timeout around the
    /// missing ready signal must supply their own.
    pub fn open(provider: &dyn TableProvider, reporter: Arc<dyn ErrorReporter>) -> Option<Self> {
        let scripts = match provider.table(SCRIPTS_TABLE) {
            Ok(table) => table,
            Err(e) => {
                reporter.report(StoreFailure::keyless(StoreOp::Open, e));
                return None;
            }
        };
        let databases = match provider.table(DATABASES_TABLE) {
            Ok(table) => table,
            Err(e) => {
                reporter.report(StoreFailure::keyless(StoreOp::Open, e));
                return None;
            }
        };
        Some(Self::new(scripts, databases, reporter))
    }

    /// Upsert a script. The caller receives no success/failure signal;
    /// a table failure is reported and swallowed.
    pub async fn write_script(&self, script_id: &str, script: &str) {
        self.upsert(&self.scripts, StoreOp::WriteScript, script_id, script)
            .await;
    }

    /// Remove a script by id. Removing an absent id is a no-op.
    pub async fn remove_script(&self, script_id: &str) {
        self.remove(&self.scripts, StoreOp::RemoveScript, script_id)
            .await;
    }

    /// Look up a script by id.
    ///
    /// `None` covers both "never written" and "table failed"; a failure
    /// is additionally reported.
    pub async fn get_script(&self, script_id: &str) -> Option<String> {
        self.lookup(&self.scripts, StoreOp::GetScript, script_id)
            .await
    }

    /// Upsert a database snapshot. Same swallow-and-report semantics as
    /// `write_script`.
    pub async fn write_database(&self, database_id: &str, database: &str) {
        self.upsert(
            &self.databases,
            StoreOp::WriteDatabase,
            database_id,
            database,
        )
        .await;
    }

    /// Remove a database snapshot by id. Removing an absent id is a no-op.
    pub async fn remove_database(&self, database_id: &str) {
        self.remove(&self.databases, StoreOp::RemoveDatabase, database_id)
            .await;
    }

    /// Look up a database snapshot by id. Same conflation as `get_script`.
    pub async fn get_database(&self, database_id: &str) -> Option<String> {
        self.lookup(&self.databases, StoreOp::GetDatabase, database_id)
            .await
    }

    // ── Shared pass-through plumbing ────────────────────────────────

    async fn upsert(&self, table: &Arc<dyn RecordTable>, op: StoreOp, key: &str, value: &str) {
        match table.put(Record::new(key, value)).await {
            Ok(()) => debug!(op = op.as_str(), key, "Record written"),
            Err(e) => self.reporter.report(StoreFailure::new(op, key, e)),
        }
    }

    async fn remove(&self, table: &Arc<dyn RecordTable>, op: StoreOp, key: &str) {
        match table.delete(key).await {
            Ok(()) => debug!(op = op.as_str(), key, "Record removed"),
            Err(e) => self.reporter.report(StoreFailure::new(op, key, e)),
        }
    }

    async fn lookup(&self, table: &Arc<dyn RecordTable>, op: StoreOp, key: &str) -> Option<String> {
        match table.get(key).await {
            Ok(Some(record)) => Some(record.value),
            Ok(None) => None,
            Err(e) => {
                // Absent and failed are indistinguishable to the caller.
                self.reporter.report(StoreFailure::new(op, key, e));
                None
            }
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────────
