use thiserror::Error;

/// Fatal pipeline failures. Both variants abort the run before any strategy
/// output is produced; the caller receives the human-readable reason and
/// never an internal panic or backtrace.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("file unreadable: {0}")]
    FileUnreadable(String),

    #[error("no text could be extracted from the document")]
    NoTextExtracted,
}

/// Per-record persistence failure during materialization. Reported, never
/// retried; records already created in the same batch stay in place.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record rejected by the store: {0}")]
    Rejected(String),

    #[error("record store unavailable: {0}")]
    Unavailable(String),
}
