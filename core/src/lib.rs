//! vsh Core - the in-memory virtual filesystem
//!
//! This crate provides:
//! - A flat, path-keyed VFS store of file and directory nodes
//! - Path normalization shared by every path-taking operation
//! - A loader for the hierarchical XML image format (with base64 bodies)
//!
//! The store performs no real file I/O on behalf of VFS entries; content
//! lives entirely in memory and is replaced wholesale on each load.

#![allow(missing_docs)]

mod error;
mod loader;
mod node;
pub mod path;
mod store;

pub use error::LoadError;
pub use node::{NodeKind, VfsNode};
pub use store::{VfsStore, DEFAULT_GROUP};
