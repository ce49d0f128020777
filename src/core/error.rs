use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Settings source unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum StoreError {
    /// The load procedure failed. The store stays unloaded and the next
    /// access runs the load again.
    #[error("Loading settings failed: {0}")]
    LoadFailed(#[source] SourceError),
}
