//! Type-level schema management
//!
//! One table per entity type: `id INTEGER PRIMARY KEY AUTOINCREMENT` followed
//! by one `TEXT` column per data field, in declaration order.

use crate::errors::{from_rusqlite, schema_not_ready, Result};
use crate::mapper::sql;
use rusqlite::Connection;
use songbook_core::{log_op_end, log_op_error, log_op_start, Entity};

/// A column as reported by SQLite's `PRAGMA table_info`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub name: String,
    pub declared_type: String,
    pub primary_key: bool,
}

/// Schema operations scoped to an entity type rather than an instance
pub struct SchemaManager;

impl SchemaManager {
    /// Create the entity's table if it is not present
    ///
    /// Idempotent: a second call leaves the table exactly as it is.
    ///
    /// ## Errors
    ///
    /// - `StoreUnavailable`: the store cannot be reached
    /// - `InvalidInput`: a field name is not a usable column name
    pub fn ensure_schema<E: Entity>(conn: &Connection) -> Result<()> {
        let table = E::table_name();
        log_op_start!("ensure_schema", table = table.as_str());
        let start = std::time::Instant::now();

        Self::ensure_schema_impl::<E>(conn).map_err(|e| {
            log_op_error!(
                "ensure_schema",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                table = table.as_str()
            );
            e.with_entity(E::TYPE_NAME)
        })?;

        log_op_end!(
            "ensure_schema",
            duration_ms = start.elapsed().as_millis() as u64,
            table = table.as_str()
        );

        Ok(())
    }

    fn ensure_schema_impl<E: Entity>(conn: &Connection) -> Result<()> {
        let ddl = sql::create_table::<E>()?;
        tracing::debug!(sql = %ddl, "creating table if absent");
        conn.execute(&ddl, [])
            .map_err(|e| from_rusqlite("ensure_schema", e))?;
        Ok(())
    }

    /// List the entity table's columns in column order
    ///
    /// ## Errors
    ///
    /// - `SchemaNotReady`: the table does not exist
    pub fn describe_schema<E: Entity>(conn: &Connection) -> Result<Vec<ColumnInfo>> {
        let pragma = sql::table_info::<E>()?;
        let mut stmt = conn
            .prepare(&pragma)
            .map_err(|e| from_rusqlite("describe_schema", e))?;

        let columns = stmt
            .query_map([], |row| {
                let pk: i64 = row.get("pk")?;
                Ok(ColumnInfo {
                    name: row.get("name")?,
                    declared_type: row.get("type")?,
                    primary_key: pk > 0,
                })
            })
            .map_err(|e| from_rusqlite("describe_schema", e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| from_rusqlite("describe_schema", e))?;

        // table_info answers an empty set for a missing table
        if columns.is_empty() {
            return Err(schema_not_ready("describe_schema", &E::table_name())
                .with_entity(E::TYPE_NAME));
        }

        Ok(columns)
    }

    /// Check whether the entity's table exists
    ///
    /// ## Errors
    ///
    /// - `StoreUnavailable`: the catalog cannot be read
    pub fn schema_exists<E: Entity>(conn: &Connection) -> Result<bool> {
        let found: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
                [E::table_name()],
                |row| row.get(0),
            )
            .map_err(|e| from_rusqlite("schema_exists", e))?;
        Ok(found > 0)
    }

    /// Drop the entity's table if it exists
    ///
    /// Used to reset a store between runs; rows are lost.
    ///
    /// ## Errors
    ///
    /// - `StoreUnavailable`: the store cannot be reached or written
    pub fn drop_schema<E: Entity>(conn: &Connection) -> Result<()> {
        let ddl = sql::drop_table::<E>()?;
        tracing::debug!(sql = %ddl, "dropping table");
        conn.execute(&ddl, [])
            .map_err(|e| from_rusqlite("drop_schema", e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use songbook_core::{ExErrorKind, Song};

    #[test]
    fn test_ensure_schema_creates_songs_table() {
        let conn = db::open_in_memory().unwrap();
        assert!(!SchemaManager::schema_exists::<Song>(&conn).unwrap());

        SchemaManager::ensure_schema::<Song>(&conn).unwrap();

        assert!(SchemaManager::schema_exists::<Song>(&conn).unwrap());
    }

    #[test]
    fn test_describe_schema_lists_identity_then_fields() {
        let conn = db::open_in_memory().unwrap();
        SchemaManager::ensure_schema::<Song>(&conn).unwrap();

        let columns = SchemaManager::describe_schema::<Song>(&conn).unwrap();
        let names: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();

        assert_eq!(names, vec!["id", "name", "album"]);
        assert_eq!(columns[0].declared_type, "INTEGER");
        assert!(columns[0].primary_key);
        assert!(columns[1..]
            .iter()
            .all(|c| c.declared_type == "TEXT" && !c.primary_key));
    }

    #[test]
    fn test_describe_missing_table_is_schema_not_ready() {
        let conn = db::open_in_memory().unwrap();
        let err = SchemaManager::describe_schema::<Song>(&conn).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::SchemaNotReady);
    }

    #[test]
    fn test_drop_schema_is_idempotent() {
        let conn = db::open_in_memory().unwrap();
        SchemaManager::ensure_schema::<Song>(&conn).unwrap();

        SchemaManager::drop_schema::<Song>(&conn).unwrap();
        SchemaManager::drop_schema::<Song>(&conn).unwrap();

        assert!(!SchemaManager::schema_exists::<Song>(&conn).unwrap());
    }
}
