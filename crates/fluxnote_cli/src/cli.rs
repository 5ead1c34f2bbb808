//! Command-line definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "fluxnote")]
#[command(about = "Local notes store driven through the FluxNote core intents", long_about = None)]
#[command(version)]
pub struct Cli {
    /// SQLite notes database (default: $FLUXNOTE_DB_PATH or <tmp>/flux.db)
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Log level written to stderr (default: $FLUXNOTE_LOG_LEVEL or warn)
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List notes, most recently updated first
    List {
        /// Print the full state snapshot as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print one note as JSON
    Show { id: String },

    /// Create a note
    Add {
        title: String,

        #[arg(short, long, default_value = "")]
        content: String,
    },

    /// Change selected fields of a note
    Edit {
        id: String,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        content: Option<String>,

        #[arg(short, long)]
        language: Option<String>,

        /// Replace collaborators; repeat for several, order is kept
        #[arg(long = "collaborator", value_name = "USER_ID")]
        collaborators: Vec<String>,

        /// Clear the collaborator list
        #[arg(long, conflicts_with = "collaborators")]
        no_collaborators: bool,
    },

    /// Delete a note (unknown ids are ignored)
    Rm { id: String },

    /// Delete every note
    Clear {
        /// Required confirmation
        #[arg(long)]
        yes: bool,
    },

    /// Print core linkage probe (ping + version)
    Probe,
}
