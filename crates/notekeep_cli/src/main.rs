//! `notekeep` terminal front-end.
//!
//! # Responsibility
//! - Map subcommands onto `NoteBoard` actions over a SQLite-backed store.
//! - Print the projected note list; all storage rules live in core.

mod config;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use config::CliConfig;
use log::warn;
use notekeep_core::{
    core_version, init_logging, IdGenerator, Note, NoteBoard, NoteDraft, NotePatch,
    NoteRepository, SortKey, SqliteStore, SubmitOutcome, SystemClock, ViewQuery,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "notekeep", about = "Local notes manager", version = core_version())]
struct Cli {
    /// SQLite file holding the notes slot
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List notes, optionally filtered and sorted
    List {
        /// Case-insensitive text matched against title and content
        #[arg(long, default_value = "")]
        search: String,
        /// updated | created | title
        #[arg(long, default_value = "updated")]
        sort: SortKey,
    },
    /// Create a note (skipped when both fields are blank)
    Add {
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long, default_value = "")]
        content: String,
    },
    /// Edit the title and/or content of a note
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
    },
    /// Print one note in full
    Show { id: String },
    /// Delete a note
    Rm { id: String },
    /// Delete every note
    Clear {
        /// Confirm the irreversible wipe
        #[arg(long)]
        yes: bool,
    },
    /// Print the resolved store path
    Path,
}

type Board = NoteBoard<SqliteStore, SystemClock>;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = CliConfig::resolve(cli.db);

    if let Some(log) = config.log.as_ref() {
        if let Err(err) = init_logging(log.level.as_str(), &log.dir) {
            eprintln!("warning: file logging disabled: {err}");
        }
    }

    if let Commands::Path = cli.command {
        println!("{}", config.db_path.display());
        return Ok(());
    }

    let store = SqliteStore::open(&config.db_path)
        .with_context(|| format!("failed to open store at {}", config.db_path.display()))?;
    let repo = NoteRepository::with_parts(store, SystemClock, IdGenerator::new());
    let mut board = NoteBoard::open(repo);

    run(&mut board, cli.command)
}

fn run(board: &mut Board, command: Commands) -> Result<()> {
    match command {
        Commands::List { search, sort } => {
            let visible = board.visible(&ViewQuery::new(search, sort));
            if visible.is_empty() {
                if board.is_empty() {
                    println!("No notes yet. Create your first note!");
                } else {
                    println!("No matching notes.");
                }
            }
            for note in &visible {
                print_summary(note);
            }
        }
        Commands::Add { title, content } => match board.submit(NoteDraft::new(title, content), None) {
            SubmitOutcome::Created(note) => println!("Created {}", note.id),
            SubmitOutcome::Skipped => println!("Nothing to save: title and content are empty."),
            SubmitOutcome::Updated(note) => {
                warn!("event=cli_add module=cli status=unexpected note_id={}", note.id)
            }
            SubmitOutcome::Missing => warn!("event=cli_add module=cli status=unexpected"),
        },
        Commands::Edit { id, title, content } => {
            let Some(current) = board.get(&id).cloned() else {
                bail!("note not found: {id}");
            };
            let patch = NotePatch { title, content };
            if patch.is_empty() {
                bail!("nothing to change: pass --title and/or --content");
            }
            let draft = NoteDraft::new(
                patch.title.unwrap_or(current.title),
                patch.content.unwrap_or(current.content),
            );
            match board.submit(draft, Some(&id)) {
                SubmitOutcome::Updated(note) => println!("Updated {}", note.id),
                SubmitOutcome::Skipped => println!("Nothing to save: title and content are empty."),
                SubmitOutcome::Missing => bail!("note not found: {id}"),
                SubmitOutcome::Created(note) => {
                    warn!("event=cli_edit module=cli status=unexpected note_id={}", note.id)
                }
            }
        }
        Commands::Show { id } => {
            let Some(note) = board.get(&id) else {
                bail!("note not found: {id}");
            };
            println!("{}", note.display_title());
            println!("id: {}", note.id);
            println!("created: {}  updated: {}", note.created_at, note.updated_at);
            if !note.content.is_empty() {
                println!();
                println!("{}", note.content);
            }
        }
        Commands::Rm { id } => {
            if board.remove(&id) {
                println!("Deleted {id}");
            } else {
                println!("Nothing deleted: no note with id {id}");
            }
        }
        Commands::Clear { yes } => {
            if !yes {
                bail!("refusing to delete all notes without --yes; this cannot be undone");
            }
            let count = board.notes().len();
            board.clear_all();
            println!("Deleted {count} note(s)");
        }
        // Printed in `main` before the store is opened.
        Commands::Path => {}
    }
    Ok(())
}

fn print_summary(note: &Note) {
    let preview: String = note
        .content
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .take(60)
        .collect();
    println!(
        "{}  {}  (updated {})  {}",
        note.id,
        note.display_title(),
        note.updated_at,
        preview
    );
}
