//! Songbook Store - SQLite record mapper
//!
//! Provides:
//! - Connection bootstrap helpers (`db`)
//! - Classification of SQLite failures into the canonical error kinds
//! - The record mapper: type-level schema management, instance-level
//!   persistence, and single-table row readers

pub mod db;
pub mod errors;
pub mod mapper;

// Re-export key types
pub use errors::Result;
pub use mapper::{ColumnInfo, Persist, SchemaManager};
