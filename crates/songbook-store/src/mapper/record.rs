//! Instance-level persistence
//!
//! `persist` always inserts. The insert is committed before the identity is
//! read back from the connection, and the identity is written into the
//! instance only after both steps succeed, so a failed call leaves the
//! instance untouched.

use crate::errors::{from_rusqlite, Result};
use crate::mapper::sql;
use rusqlite::{params_from_iter, Connection};
use songbook_core::{log_op_end, log_op_error, log_op_start, Entity};

/// Persistence capability of a single entity instance
///
/// Implemented for every `Entity`. The connection is borrowed mutably, so no
/// other statement can run on it between the insert and the identity lookup.
pub trait Persist: Entity {
    /// Insert this instance as a new row and record the assigned identity
    ///
    /// Calling this on an already-saved instance inserts another row and
    /// replaces the identity with the new one.
    ///
    /// ## Errors
    ///
    /// - `SchemaNotReady`: the table has not been created
    /// - `ConstraintViolation`: a store-level constraint rejected the row
    /// - `StoreUnavailable`: the store cannot be reached or written
    fn persist(&mut self, conn: &mut Connection) -> Result<i64>;

    /// Build an unsaved instance from `fields`, persist it and return it
    ///
    /// Nothing is returned on failure.
    fn create(conn: &mut Connection, fields: Self::Fields) -> Result<Self>;
}

impl<E: Entity> Persist for E {
    fn persist(&mut self, conn: &mut Connection) -> Result<i64> {
        with_insert_boundary::<E>("persist", || insert_row(self, conn))
    }

    fn create(conn: &mut Connection, fields: Self::Fields) -> Result<Self> {
        let mut entity = E::from_fields(fields);
        with_insert_boundary::<E>("create", || insert_row(&mut entity, conn))?;
        Ok(entity)
    }
}

/// Emit start/end/end_error events around one insert operation
fn with_insert_boundary<E: Entity>(
    op: &'static str,
    insert: impl FnOnce() -> Result<i64>,
) -> Result<i64> {
    let table = E::table_name();
    log_op_start!(op, table = table.as_str());
    let start = std::time::Instant::now();

    let id = insert().map_err(|e| {
        log_op_error!(
            op,
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            table = table.as_str()
        );
        e.with_entity(E::TYPE_NAME)
    })?;

    log_op_end!(
        op,
        duration_ms = start.elapsed().as_millis() as u64,
        table = table.as_str(),
        row_id = id
    );

    Ok(id)
}

/// Insert, commit, then read the connection's last generated rowid
///
/// AUTOINCREMENT keys start at 1 and never go backwards, so the rowid read
/// after commit is always a fresh positive identity.
fn insert_row<E: Entity>(entity: &mut E, conn: &mut Connection) -> Result<i64> {
    let statement = sql::insert::<E>()?;

    let tx = conn
        .transaction()
        .map_err(|e| from_rusqlite("persist", e))?;
    let inserted = tx
        .execute(&statement, params_from_iter(entity.field_values()))
        .map_err(|e| from_rusqlite("persist", e))?;
    tx.commit().map_err(|e| from_rusqlite("persist", e))?;

    let id = conn.last_insert_rowid();
    tracing::debug!(inserted, row_id = id, "row committed");

    entity.assign_id(id);
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::mapper::SchemaManager;
    use songbook_core::{ExErrorKind, Song};

    fn songs_db() -> Connection {
        let conn = db::open_in_memory().unwrap();
        SchemaManager::ensure_schema::<Song>(&conn).unwrap();
        conn
    }

    #[test]
    fn test_persist_assigns_identity() {
        let mut conn = songs_db();
        let mut song = Song::new("Hold On", "Born to Sing");

        let id = song.persist(&mut conn).unwrap();

        assert_eq!(id, 1);
        assert_eq!(song.id, Some(1));
        assert_eq!(song.name, "Hold On");
        assert_eq!(song.album, "Born to Sing");
    }

    #[test]
    fn test_persist_twice_inserts_twice() {
        let mut conn = songs_db();
        let mut song = Song::new("Hello", "25");

        song.persist(&mut conn).unwrap();
        song.persist(&mut conn).unwrap();

        assert_eq!(song.id, Some(2));
        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM songs", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 2);
    }

    #[test]
    fn test_persist_without_schema_leaves_identity_unset() {
        let mut conn = db::open_in_memory().unwrap();
        let mut song = Song::new("Hello", "25");

        let err = song.persist(&mut conn).unwrap_err();

        assert_eq!(err.kind(), ExErrorKind::SchemaNotReady);
        assert_eq!(err.entity(), Some("Song"));
        assert_eq!(song.id, None);
    }

    #[test]
    fn test_create_returns_saved_instance() {
        let mut conn = songs_db();

        let song = Song::create(&mut conn, ("Hello".to_string(), "25".to_string())).unwrap();

        assert_eq!(song.id, Some(1));
        assert_eq!(song.name, "Hello");
        assert_eq!(song.album, "25");
    }
}
