//! SQL text for an entity's table
//!
//! Identifiers cannot be bound as parameters, so table and column names are
//! checked against a conservative pattern and double-quoted. Values are
//! always bound through numbered placeholders.

use songbook_core::errors::{Result, SongbookError};
use songbook_core::Entity;

/// Name of the implicit identity column
pub(crate) const ID_COLUMN: &str = "id";

/// Quote an identifier after checking it is `[A-Za-z_][A-Za-z0-9_]*`
fn quote_ident<E: Entity>(ident: &str) -> Result<String> {
    let mut chars = ident.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if !valid || ident.eq_ignore_ascii_case(ID_COLUMN) {
        return Err(SongbookError::InvalidColumnName {
            entity: E::TYPE_NAME.to_string(),
            column: ident.to_string(),
        }
        .into());
    }
    Ok(format!("\"{}\"", ident))
}

fn quoted_table<E: Entity>() -> Result<String> {
    quote_ident::<E>(&E::table_name())
}

fn quoted_fields<E: Entity>() -> Result<Vec<String>> {
    E::DATA_FIELDS
        .iter()
        .map(|field| quote_ident::<E>(field))
        .collect()
}

/// `CREATE TABLE IF NOT EXISTS` with the identity column first
pub(crate) fn create_table<E: Entity>() -> Result<String> {
    let columns: Vec<String> = quoted_fields::<E>()?
        .into_iter()
        .map(|column| format!("{} TEXT", column))
        .collect();

    Ok(format!(
        "CREATE TABLE IF NOT EXISTS {} ({} INTEGER PRIMARY KEY AUTOINCREMENT, {})",
        quoted_table::<E>()?,
        ID_COLUMN,
        columns.join(", ")
    ))
}

pub(crate) fn drop_table<E: Entity>() -> Result<String> {
    Ok(format!("DROP TABLE IF EXISTS {}", quoted_table::<E>()?))
}

pub(crate) fn table_info<E: Entity>() -> Result<String> {
    Ok(format!("PRAGMA table_info({})", quoted_table::<E>()?))
}

/// `INSERT` listing every data field, one placeholder per field
pub(crate) fn insert<E: Entity>() -> Result<String> {
    let columns = quoted_fields::<E>()?;
    let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{}", i)).collect();

    Ok(format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quoted_table::<E>()?,
        columns.join(", "),
        placeholders.join(", ")
    ))
}

fn select_columns<E: Entity>() -> Result<String> {
    let mut columns = vec![ID_COLUMN.to_string()];
    columns.extend(quoted_fields::<E>()?);
    Ok(columns.join(", "))
}

pub(crate) fn select_by_id<E: Entity>() -> Result<String> {
    Ok(format!(
        "SELECT {} FROM {} WHERE {} = ?1",
        select_columns::<E>()?,
        quoted_table::<E>()?,
        ID_COLUMN
    ))
}

pub(crate) fn select_all<E: Entity>() -> Result<String> {
    Ok(format!(
        "SELECT {} FROM {} ORDER BY {}",
        select_columns::<E>()?,
        quoted_table::<E>()?,
        ID_COLUMN
    ))
}

pub(crate) fn count<E: Entity>() -> Result<String> {
    Ok(format!("SELECT COUNT(*) FROM {}", quoted_table::<E>()?))
}
