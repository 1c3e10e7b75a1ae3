//! CLI argument definitions for unitforge.
//!
//! Uses `clap` derive macros to define the full command surface. Each
//! command corresponds to a handler in the [`super::commands`] module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "unitforge",
    version,
    about = "Dependency and composition resolver for capability units",
    long_about = "unitforge resolves version constraints between capability units, merges \
                  include graphs into single documents, and pins resolved versions with \
                  checksums in a lock file."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve all units and regenerate unitforge.lock
    Lock {
        /// Directory containing unit subdirectories
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// Verify installed units against unitforge.lock
    Verify {
        /// Directory containing unit subdirectories
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
        /// Emit the report as JSON on stdout
        #[arg(long)]
        json: bool,
    },

    /// Compose a unit and its includes into one document
    Compose {
        /// Unit to compose: a name, or name@constraint
        unit: String,
        /// Directory containing unit subdirectories
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
        /// Write the composed document here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Display the include tree of a unit
    Tree {
        /// Unit to inspect: a name, or name@constraint
        unit: String,
        /// Directory containing unit subdirectories
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },
}

pub fn parse() -> Cli {
    Cli::parse()
}
