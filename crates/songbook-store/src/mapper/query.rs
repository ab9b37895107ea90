//! Single-table row readers

use crate::errors::{from_rusqlite, Result};
use crate::mapper::sql;
use rusqlite::{Connection, OptionalExtension, Row};
use songbook_core::Entity;

/// Read one row into (id, data column values)
fn read_row<E: Entity>(row: &Row<'_>) -> rusqlite::Result<(i64, Vec<String>)> {
    let id: i64 = row.get(0)?;
    let values = (1..=E::DATA_FIELDS.len())
        .map(|idx| row.get::<_, String>(idx))
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok((id, values))
}

/// Load the row with the given identity, if any
///
/// ## Errors
///
/// - `SchemaNotReady`: the table has not been created
/// - `Serialization`: the row holds a NULL or non-text data column
pub fn find<E: Entity>(conn: &Connection, id: i64) -> Result<Option<E>> {
    let statement = sql::select_by_id::<E>()?;
    let raw = conn
        .query_row(&statement, [id], read_row::<E>)
        .optional()
        .map_err(|e| from_rusqlite("find", e).with_entity(E::TYPE_NAME))?;

    raw.map(|(id, values)| E::from_row(id, values)).transpose()
}

/// Load every row in identity (insertion) order
///
/// ## Errors
///
/// - `SchemaNotReady`: the table has not been created
/// - `Serialization`: a row holds a NULL or non-text data column
pub fn all<E: Entity>(conn: &Connection) -> Result<Vec<E>> {
    let statement = sql::select_all::<E>()?;
    let mut stmt = conn
        .prepare(&statement)
        .map_err(|e| from_rusqlite("all", e).with_entity(E::TYPE_NAME))?;

    let rows = stmt
        .query_map([], read_row::<E>)
        .map_err(|e| from_rusqlite("all", e))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| from_rusqlite("all", e).with_entity(E::TYPE_NAME))?;

    tracing::debug!(row_count = rows.len(), table = %E::table_name(), "table scanned");

    rows.into_iter()
        .map(|(id, values)| E::from_row(id, values))
        .collect()
}

/// Count the rows in the entity's table
///
/// ## Errors
///
/// - `SchemaNotReady`: the table has not been created
pub fn count<E: Entity>(conn: &Connection) -> Result<i64> {
    let statement = sql::count::<E>()?;
    conn.query_row(&statement, [], |row| row.get(0))
        .map_err(|e| from_rusqlite("count", e).with_entity(E::TYPE_NAME))
}
