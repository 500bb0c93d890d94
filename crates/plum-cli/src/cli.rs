use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "plum")]
#[command(about = "Tagged notes from the command line, synced between machines")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Optional path to the notes document
    #[arg(long, global = true, value_name = "PATH")]
    pub notes_path: Option<PathBuf>,

    /// Optional path to the settings document
    #[arg(long, global = true, value_name = "PATH")]
    pub settings_path: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new note
    #[command(visible_alias = "a")]
    Add {
        /// Note category, e.g. journal or todo
        #[arg(short, long)]
        kind: String,
        /// Comma-separated tags
        #[arg(short, long, value_name = "TAGS")]
        tags: Option<String>,
        /// Note text (read from piped stdin when omitted)
        text: Vec<String>,
    },
    /// List notes, optionally narrowed by filter clauses
    ///
    /// Clauses are mode/value pairs applied left to right: id, kind,
    /// tags-any, tags-all, date-range (DD/MM/YYYY,DD/MM/YYYY), author.
    #[command(visible_alias = "l")]
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Filter clauses, e.g. `kind todo tags-all work,urgent`
        #[arg(
            value_name = "CLAUSE",
            trailing_var_arg = true,
            allow_hyphen_values = true
        )]
        clauses: Vec<String>,
    },
    /// Replace fields of an existing note
    #[command(visible_alias = "u")]
    Update {
        /// Note ID
        id: String,
        /// New category
        #[arg(short, long)]
        kind: Option<String>,
        /// New comma-separated tags
        #[arg(short, long, value_name = "TAGS")]
        tags: Option<String>,
        /// New note text
        #[arg(short = 'n', long, alias = "note")]
        text: Option<String>,
    },
    /// Delete a note
    #[command(visible_alias = "r", alias = "rm")]
    Remove {
        /// Note ID
        id: String,
    },
    /// Show settings, or set one (author, syncserver)
    #[command(visible_alias = "s")]
    Settings {
        /// Setting name
        #[arg(requires = "value")]
        key: Option<String>,
        /// New value
        value: Option<String>,
    },
    /// Serve the sync endpoint for peers
    #[command(visible_alias = "d", alias = "dsync")]
    Daemon {
        /// Port to listen on
        port: Option<u16>,
    },
    /// Exchange notes with a sync daemon
    #[command(visible_alias = "p", alias = "psync")]
    Sync {
        /// Peer as host:port (defaults to the syncserver setting)
        address: Option<String>,
    },
}
