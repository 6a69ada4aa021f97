use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "markban")]
#[command(about = "Read and write kanban boards stored as markdown", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (defaults to <config dir>/markban/config.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print a board as JSON
    Parse {
        /// Board file, or `-` for stdin
        file: String,
    },

    /// Rewrite a board in canonical form
    #[command(alias = "fmt")]
    Format {
        /// Board file, or `-` for stdin
        file: String,

        /// Overwrite the file instead of printing
        #[arg(short, long)]
        write: bool,
    },

    /// Verify a board parses and regenerates stably
    Check {
        /// Board file, or `-` for stdin
        file: String,
    },

    /// Per-column card counts and overdue cards
    Summary {
        /// Board file, or `-` for stdin
        file: String,
    },

    /// Build markdown from a JSON board
    Generate {
        /// JSON file, or `-` for stdin
        file: String,
    },
}
