//! vsh - Shell session emulator over the in-memory VFS
//!
//! This crate provides:
//! - A quote-aware line tokenizer
//! - Built-in commands (ls, cd, wc, chown, ...) operating on the VFS store
//! - An execution engine shared by the interactive REPL and script replay,
//!   with an explicit error-continuation policy per mode
//! - A pluggable output sink so a console, a capture buffer, or an
//!   embedding front end are interchangeable

pub mod builtins;
pub mod engine;
pub mod error;
pub mod lexer;
pub mod output;
pub mod session;

pub use builtins::{BuiltinFn, Registry};
pub use engine::{Engine, ErrorPolicy, LineOutcome};
pub use error::{VshError, VshResult};
pub use output::Output;
pub use session::{Session, SessionConfig};
