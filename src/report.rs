//! Error reporting — structured sink for failures the store swallows.
//!
//! The store never surfaces a failure to its caller. Instead of an ad hoc
//! log call at each site, every caught error is handed to an injected
//! `ErrorReporter`, so tests can assert on reported failures without
//! capturing log output.

use std::sync::Mutex;

use tracing::error;

use crate::error::Error;

/// The operation a failure was caught in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    Open,
    WriteScript,
    RemoveScript,
    GetScript,
    WriteDatabase,
    RemoveDatabase,
    GetDatabase,
}

impl StoreOp {
    /// Stable name used in log output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::WriteScript => "write_script",
            Self::RemoveScript => "remove_script",
            Self::GetScript => "get_script",
            Self::WriteDatabase => "write_database",
            Self::RemoveDatabase => "remove_database",
            Self::GetDatabase => "get_database",
        }
    }
}

/// A single failure swallowed by the store.
#[derive(Debug)]
pub struct StoreFailure {
    /// Where the failure was caught.
    pub op: StoreOp,
    /// Record key involved, if the operation had one.
    pub key: Option<String>,
    /// The underlying error.
    pub error: Error,
}

impl StoreFailure {
    /// Failure tied to a record key.
    pub fn new(op: StoreOp, key: impl Into<String>, error: impl Into<Error>) -> Self {
        Self {
            op,
            key: Some(key.into()),
            error: error.into(),
        }
    }

    /// Failure with no associated record key (initialization).
    pub fn keyless(op: StoreOp, error: impl Into<Error>) -> Self {
        Self {
            op,
            key: None,
            error: error.into(),
        }
    }
}

/// Sink for failures the store swallows.
pub trait ErrorReporter: Send + Sync {
    /// Record one swallowed failure.
    fn report(&self, failure: StoreFailure);
}

/// Default reporter — one structured log line per failure.
#[derive(Debug, Default)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn report(&self, failure: StoreFailure) {
        error!(
            op = failure.op.as_str(),
            key = failure.key.as_deref().unwrap_or("-"),
            error = %failure.error,
            "Record store operation failed"
        );
    }
}

/// Reporter that keeps every failure for later inspection.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    failures: Mutex<Vec<StoreFailure>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of failures reported so far.
    pub fn len(&self) -> usize {
        self.failures.lock().expect("Reporter mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drain and return all recorded failures, oldest first.
    pub fn take(&self) -> Vec<StoreFailure> {
        std::mem::take(&mut *self.failures.lock().expect("Reporter mutex poisoned"))
    }
}

impl ErrorReporter for RecordingReporter {
    fn report(&self, failure: StoreFailure) {
        self.failures
            .lock()
            .expect("Reporter mutex poisoned")
            .push(failure);
    }
}
