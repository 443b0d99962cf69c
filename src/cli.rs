//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Track solved coding-interview problems.
///
/// Tracker resolves problem difficulty and category from a reference sheet
/// and merges imported LeetCode lists, files, and manual entries into your
/// collection without duplicates.
#[derive(Parser, Debug)]
#[command(name = "tracker")]
#[command(author, version, about)]
pub struct Args {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Reference sheet CSV export (overrides `metadata_file` in config)
    #[arg(long, global = true)]
    pub metadata: Option<PathBuf>,

    /// Collection JSON file (overrides `store_file` in config)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Tracker subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Look up difficulty and category for a problem name
    Resolve {
        /// Problem name in any spelling (title, paraphrase, or slug)
        name: String,
    },

    /// Add a single problem by title
    Add {
        /// Problem title
        title: String,

        /// Difficulty (Easy, Medium, Hard)
        #[arg(short, long)]
        difficulty: Option<String>,

        /// Initial status (Todo, "In Progress", Done)
        #[arg(short, long)]
        status: Option<String>,
    },

    /// Import problems from a JSON or plain-text file
    ImportFile {
        /// File to import
        path: PathBuf,
    },

    /// Import a saved LeetCode list, study plan, or tag response
    ImportPayload {
        /// Link the payload was fetched from (selects the provider)
        #[arg(short, long)]
        url: String,

        /// Saved GraphQL response JSON
        payload: PathBuf,
    },

    /// Fill unknown difficulty and category on tracked problems
    Backfill,
}
