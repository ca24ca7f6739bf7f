//! Error types for the workbench record store.

/// Top-level error type for the crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Table error: {0}")]
    Table(#[from] TableError),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),
}

/// Failures surfaced by a keyed record table operation.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Query failed: {0}")]
    Query(String),
}

/// Failures surfaced by a table provider.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Unknown table: {name}")]
    UnknownTable { name: String },

    #[error("Backend failure: {0}")]
    Backend(String),
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;
