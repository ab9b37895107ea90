//! Songbook Core - domain model, error facility and logging facility
//!
//! This crate provides:
//! - The `Entity` contract describing how a type maps to a table
//! - The `Song` domain object
//! - The canonical structured error type (`ExError`) and its kind taxonomy
//! - The structured logging facility and its boundary macros

pub mod errors;
pub mod logging_facility;
pub mod model;

// Re-export commonly used types
pub use errors::{ExError, ExErrorKind, Result, SongbookError};
pub use model::{Entity, Song};
