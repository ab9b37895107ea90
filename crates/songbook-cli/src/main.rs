//! Songbook CLI
//!
//! Command-line front end for the songs table. Opens one connection for the
//! lifetime of the process and hands it to each command.

use clap::{Parser, Subcommand, ValueEnum};
use songbook_core::logging_facility::{self, Profile};
use std::path::PathBuf;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "songbook")]
#[command(about = "Songbook - store songs in a SQLite table", long_about = None)]
struct Cli {
    /// Path to the SQLite database file
    #[arg(long, global = true, env = "SONGBOOK_DB", default_value = "music.db")]
    db: PathBuf,

    /// Log output format (written to stderr)
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

impl From<LogFormat> for Profile {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Pretty => Profile::Development,
            LogFormat::Json => Profile::Production,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create the songs table if it does not exist
    Init,
    /// Save a new song and print its id
    Add(commands::songs::AddArgs),
    /// List saved songs in insertion order
    List(commands::songs::ListArgs),
    /// Show a single song by id
    Show(commands::songs::ShowArgs),
}

fn main() {
    let cli = Cli::parse();
    logging_facility::init(cli.log_format.into());

    let result = songbook_store::db::open(&cli.db)
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error>)
        .and_then(|mut conn| {
            let mut out = std::io::stdout().lock();
            match cli.command {
                Commands::Init => commands::init::execute(&conn, &mut out),
                Commands::Add(args) => commands::songs::execute_add(args, &mut conn, &mut out),
                Commands::List(args) => commands::songs::execute_list(args, &conn, &mut out),
                Commands::Show(args) => commands::songs::execute_show(args, &conn, &mut out),
            }
        });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
