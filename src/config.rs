//! Configuration types.

use std::path::PathBuf;

/// Configuration for the libsql table provider.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path of the local database file.
    pub db_path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("./data/workbench.db"),
        }
    }
}
