use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the scheduler core.
///
/// Per the error-handling design, most of these are logged and absorbed
/// rather than propagated to a caller — producers get no acknowledgement.
/// This enum exists for the subset that genuinely halts the scheduler
/// (FIFO creation, signal installation) and for the internal plumbing
/// that wants a typed `Result` instead of panicking.
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("failed to create admission fifo at {path}: {source}")]
    FifoCreate {
        path: PathBuf,
        #[source]
        source: nix::Error,
    },

    #[error("failed to open admission fifo at {path}: {source}")]
    FifoOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to install signal handlers: {0}")]
    SignalInstall(#[source] std::io::Error),

    #[error("fork failed: {0}")]
    Fork(#[source] nix::Error),

    #[error("exec of {path} failed: {source}")]
    Exec {
        path: PathBuf,
        #[source]
        source: nix::Error,
    },

    #[error("process table is full (capacity {capacity})")]
    TableFull { capacity: usize },

    #[error("program path {path} exceeds the {limit}-byte admission buffer")]
    PathTooLong { path: String, limit: usize },
}

pub type Result<T> = std::result::Result<T, SchedulerError>;
