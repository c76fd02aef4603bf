//! Error types for vsh

use thiserror::Error;
use vsh_core::LoadError;

/// Result type alias for vsh operations
pub type VshResult<T> = Result<T, VshError>;

/// Error types for vsh shell operations
#[derive(Error, Debug)]
pub enum VshError {
    /// Malformed quoting in an input line
    #[error("parse error: {0}")]
    Parse(String),

    /// VFS image could not be loaded
    #[error(transparent)]
    Load(#[from] LoadError),

    /// IO error (sink writes, script reads)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Exit requested (not really an error)
    #[error("exit with code {0}")]
    Exit(i32),
}
