//! Keyed record table contract — the external collaborator the store
//! requires, not builds.
//!
//! A `RecordTable` is a persistent, asynchronous key-value collection
//! with per-key atomic put/get/delete. A `TableProvider` hands out table
//! handles by name and is expected to be fully initialized before the
//! store is opened; the store performs no provisioning, schema creation,
//! or migration of its own.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{ProviderError, TableError};

/// A single key/value row in a record table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Unique key within the table.
    pub key: String,
    /// Opaque stored value. The store validates nothing about it.
    pub value: String,
}

impl Record {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// An asynchronous keyed record table.
#[async_trait]
pub trait RecordTable: Send + Sync {
    /// Insert the record, or replace the existing record with the same key.
    async fn put(&self, record: Record) -> Result<(), TableError>;

    /// Remove the record with the given key.
    ///
    /// Removing an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<(), TableError>;

    /// Look up the record with the given key.
    async fn get(&self, key: &str) -> Result<Option<Record>, TableError>;
}

/// Hands out record table handles by name.
pub trait TableProvider: Send + Sync {
    /// Look up a table handle by name.
    fn table(&self, name: &str) -> Result<Arc<dyn RecordTable>, ProviderError>;
}
