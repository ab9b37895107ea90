//! Record mapper between `Entity` types and SQLite tables
//!
//! Operations are split by scope:
//! - `SchemaManager` works on the entity *type* (create, describe, drop the table)
//! - `Persist` works on one entity *instance* (insert it, record its identity)
//! - `query` reads rows back into instances
//!
//! Every operation takes the caller's connection explicitly; nothing here
//! holds a connection between calls.
//!
//! ## Logging Ownership
//!
//! `ensure_schema`, `persist` and `create` own the start/end/end_error
//! events. Helpers below them use `tracing::debug!` only.

pub mod query;
pub mod record;
pub mod schema;
mod sql;

pub use query::{all, count, find};
pub use record::Persist;
pub use schema::{ColumnInfo, SchemaManager};
