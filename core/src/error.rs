use thiserror::Error;

/// Errors produced while loading a VFS image.
///
/// On either variant the store that attempted the load is left untouched.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The image source could not be read.
    #[error("VFS file not found: {path}")]
    NotFound { path: String },

    /// The image source was read but is structurally invalid.
    #[error("invalid VFS image: {0}")]
    Malformed(String),
}
