//! Server Error Types

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while starting or running the dashboard server
#[derive(Error, Debug)]
pub enum ServerError {
    /// Binding or accepting failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The built UI directory is missing
    #[error("Static directory not found: {0:?}")]
    StaticDirMissing(PathBuf),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;
