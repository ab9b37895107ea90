//! Song commands
//!
//! Usage:
//!   songbook add <NAME> <ALBUM>
//!   songbook list [--json]
//!   songbook show <ID>

use super::CommandResult;
use clap::Args;
use rusqlite::Connection;
use songbook_core::errors::SongbookError;
use songbook_core::{Entity, Song};
use songbook_store::mapper;
use songbook_store::{Persist, SchemaManager};
use std::io::Write;

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Song title
    pub name: String,

    /// Album title
    pub album: String,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Print a JSON array instead of tab-separated rows
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Song id
    pub id: i64,
}

/// Execute add: ensure the schema, then create the song
pub fn execute_add(args: AddArgs, conn: &mut Connection, out: &mut impl Write) -> CommandResult {
    SchemaManager::ensure_schema::<Song>(conn)?;
    let song = Song::create(conn, (args.name, args.album))?;

    let id = song.id.ok_or("song was saved without an id")?;
    writeln!(out, "{}", id)?;
    Ok(())
}

/// Execute list: print every song in insertion order
pub fn execute_list(args: ListArgs, conn: &Connection, out: &mut impl Write) -> CommandResult {
    let songs = mapper::all::<Song>(conn)?;

    if args.json {
        serde_json::to_writer_pretty(&mut *out, &songs)?;
        writeln!(out)?;
        return Ok(());
    }

    for song in &songs {
        write_row(out, song)?;
    }
    Ok(())
}

/// Execute show: print one song or fail if it does not exist
pub fn execute_show(args: ShowArgs, conn: &Connection, out: &mut impl Write) -> CommandResult {
    let song = mapper::find::<Song>(conn, args.id)?.ok_or_else(|| SongbookError::EntityNotFound {
        entity: Song::TYPE_NAME.to_string(),
        id: args.id,
    })?;

    write_row(out, &song)?;
    Ok(())
}

fn write_row(out: &mut impl Write, song: &Song) -> std::io::Result<()> {
    let id = song.id.map(|id| id.to_string()).unwrap_or_default();
    writeln!(out, "{}\t{}\t{}", id, song.name, song.album)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> CommandResult,
    {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn add(conn: &mut Connection, name: &str, album: &str) -> String {
        run(|out| {
            execute_add(
                AddArgs {
                    name: name.to_string(),
                    album: album.to_string(),
                },
                conn,
                out,
            )
        })
    }

    #[test]
    fn test_add_prints_assigned_id() {
        let mut conn = songbook_store::db::open_in_memory().unwrap();

        assert_eq!(add(&mut conn, "Hello", "25"), "1\n");
        assert_eq!(add(&mut conn, "Despacito", "Vida"), "2\n");
    }

    #[test]
    fn test_list_prints_rows_in_order() {
        let mut conn = songbook_store::db::open_in_memory().unwrap();
        add(&mut conn, "Hello", "25");
        add(&mut conn, "Despacito", "Vida");

        let listed = run(|out| execute_list(ListArgs { json: false }, &conn, out));

        assert_eq!(listed, "1\tHello\t25\n2\tDespacito\tVida\n");
    }

    #[test]
    fn test_list_json_is_an_array_of_songs() {
        let mut conn = songbook_store::db::open_in_memory().unwrap();
        add(&mut conn, "Hello", "25");

        let listed = run(|out| execute_list(ListArgs { json: true }, &conn, out));
        let songs: Vec<Song> = serde_json::from_str(&listed).unwrap();

        assert_eq!(songs, vec![Song {
            id: Some(1),
            name: "Hello".to_string(),
            album: "25".to_string(),
        }]);
    }

    #[test]
    fn test_show_missing_song_fails() {
        let mut conn = songbook_store::db::open_in_memory().unwrap();
        add(&mut conn, "Hello", "25");

        let mut out = Vec::new();
        let err = execute_show(ShowArgs { id: 5 }, &conn, &mut out).unwrap_err();

        assert!(err.to_string().contains("Song not found: 5"));
        assert!(out.is_empty());
    }
}
