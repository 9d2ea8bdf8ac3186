//! Command-line arguments.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "flashdeck", version, about = "Flashcards kept in a local SQLite store")]
pub struct Cli {
    /// SQLite store file.
    #[arg(long, env = "FLASHDECK_DB_PATH", default_value = "flashdeck.sqlite3")]
    pub db: PathBuf,

    /// Absolute directory for rolling log files. Logging is off when unset.
    #[arg(long, env = "FLASHDECK_LOG_DIR")]
    pub log_dir: Option<String>,

    /// trace|debug|info|warn|error. Defaults by build mode.
    #[arg(long, env = "FLASHDECK_LOG_LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Lists cards in deck order.
    List {
        /// Only cards carrying this tag.
        #[arg(long)]
        tag: Option<String>,
    },
    /// Lists cards due now.
    Due,
    /// Adds a card at the end of the deck.
    Add {
        front: String,
        back: String,
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// Replaces a card's content, keeping its schedule.
    Edit {
        id: String,
        front: String,
        back: String,
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// Removes a card.
    Remove { id: String },
    /// Moves a card to a zero-based position.
    Move { id: String, index: usize },
    /// Grades a card 0-5.
    Review { id: String, grade: u8 },
    /// Clears a card's review history.
    ResetProgress { id: String },
    /// Prints the raw stored snapshot.
    Export,
    /// Deletes the stored deck.
    Wipe,
}
