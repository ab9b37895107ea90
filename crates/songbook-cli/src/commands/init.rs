//! Init command
//!
//! Usage: songbook init

use super::CommandResult;
use rusqlite::Connection;
use songbook_core::{Entity, Song};
use songbook_store::SchemaManager;
use std::io::Write;

/// Execute init: ensure the songs table exists
pub fn execute(conn: &Connection, out: &mut impl Write) -> CommandResult {
    SchemaManager::ensure_schema::<Song>(conn)?;
    writeln!(out, "✓ Table {} is ready", Song::table_name())?;
    Ok(())
}
