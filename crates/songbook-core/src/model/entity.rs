//! Type-level description of a persistable domain object
//!
//! An `Entity` says which table its rows live in, which data fields map to
//! which columns, and how to move values between an instance and a row. The
//! identity column `id` is implicit and never listed in `DATA_FIELDS`.

use crate::errors::{Result, SongbookError};

/// A domain object that maps to exactly one table
pub trait Entity: Sized {
    /// Type name the table name is derived from (e.g. `Song`)
    const TYPE_NAME: &'static str;

    /// Data field names, in declaration (and column) order
    const DATA_FIELDS: &'static [&'static str];

    /// Values needed to build an unsaved instance
    type Fields;

    /// Build an instance with identity unset. Never touches the store.
    fn from_fields(fields: Self::Fields) -> Self;

    /// Rebuild an instance from a row's id and data column values
    ///
    /// `values` arrive in `DATA_FIELDS` order.
    fn from_row(id: i64, values: Vec<String>) -> Result<Self>;

    /// Data field values, in `DATA_FIELDS` order
    fn field_values(&self) -> Vec<&str>;

    /// Store-assigned identity, `None` until first successful persist
    fn id(&self) -> Option<i64>;

    /// Record the store-assigned identity
    fn assign_id(&mut self, id: i64);

    /// Table name: the pluralized, lower-cased type name
    fn table_name() -> String {
        table_name_for(Self::TYPE_NAME)
    }
}

/// Derive a table name from an entity type name
///
/// Lower-cases the name and applies regular English plural endings:
/// `Song` -> `songs`, `Box` -> `boxes`, `Category` -> `categories`.
pub fn table_name_for(type_name: &str) -> String {
    let lower = type_name.to_lowercase();

    if lower.ends_with('s')
        || lower.ends_with('x')
        || lower.ends_with('z')
        || lower.ends_with("ch")
        || lower.ends_with("sh")
    {
        return format!("{}es", lower);
    }

    if let Some(stem) = lower.strip_suffix('y') {
        let before_y = stem.chars().last();
        if before_y.is_some_and(|c| !"aeiou".contains(c)) {
            return format!("{}ies", stem);
        }
    }

    format!("{}s", lower)
}

/// Check that a row carries one value per declared data field
pub fn check_row_shape<E: Entity>(values: &[String]) -> Result<()> {
    if values.len() != E::DATA_FIELDS.len() {
        return Err(SongbookError::RowShapeMismatch {
            entity: E::TYPE_NAME.to_string(),
            expected: E::DATA_FIELDS.len(),
            actual: values.len(),
        }
        .into());
    }
    Ok(())
}
