//! CLI argument definitions for the chordspell command-line interface.
//!
//! All `#[derive(Parser)]` and `#[derive(Subcommand)]` types are defined here,
//! keeping `main.rs` focused on dispatch logic.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use chordspell_cli::logging::DEFAULT_LOG_LEVEL;

/// Chordspell - chord transposition, spelling and dictionary validation
#[derive(Parser)]
#[command(name = "chordspell")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    /// Path to a chord dictionary JSON file (default: bundled dictionary)
    #[arg(long, global = true, env = "CHORDSPELL_DICTIONARY")]
    pub dictionary: Option<PathBuf>,

    /// Log level for stderr diagnostics (trace, debug, info, warn, error, off)
    #[arg(long, global = true, env = "CHORDSPELL_LOG", default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Show a chord card for a chord symbol such as "Ebmaj7" or "F#-7"
    Show {
        /// Chord symbol: optional root followed by a quality name or alias
        chord: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Spell a quality on a root
    Transpose {
        /// Root note (e.g., "B♭", "Bb", "F#")
        #[arg(short, long)]
        root: Option<String>,

        /// Quality name (e.g., "maj7", "m7b5")
        #[arg(short, long)]
        quality: String,

        /// Spell the quality on all 17 roots
        #[arg(long, conflicts_with = "root")]
        all_roots: bool,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Find (root, quality) pairs sounding the same pitch-class set
    Equivalents {
        /// Root note of the query chord
        #[arg(short, long)]
        root: String,

        /// Quality of the query chord
        #[arg(short, long)]
        quality: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Cross-check every dictionary entry (exit code 1 on issues)
    Validate {
        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Print the named-inversion map of the dictionary
    Inversions {
        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Export the dictionary as JSON
    Export {
        /// Comma-separated fields to include (default: all)
        #[arg(long, value_delimiter = ',')]
        fields: Vec<String>,

        /// Export one flat record per (quality, root) instead
        #[arg(long, conflicts_with = "fields")]
        expanded: bool,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List quality names with their display names
    List {
        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}
