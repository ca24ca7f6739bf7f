//! Persistence layer — record store facade over keyed record tables.

pub mod facade;
pub mod libsql_backend;
pub mod traits;

pub use facade::RecordStore;
pub use libsql_backend::LibSqlProvider;
pub use traits::{Record, RecordTable, TableProvider};
