//! Command line argument parsing for the wnquery CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// wnquery - query a WordNet lexicon from the command line
#[derive(Parser, Debug, Clone)]
#[command(name = "wnquery")]
#[command(about = "An in-memory WordNet query engine for VisDic XML lexicons")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct WnQueryArgs {
    /// Path to the lexicon XML file
    #[arg(value_name = "WN_XML_FILE")]
    pub wn_file: PathBuf,

    /// Destination character encoding for parsed text
    #[arg(short, long, default_value = "UTF-8")]
    pub encoding: String,

    /// Verbosity level (0=quiet, 1=normal, 2=verbose)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute; the interactive shell when omitted
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl WnQueryArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Output format for command results
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable text
    Human,
    /// JSON
    Json,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the interactive query shell
    Shell,

    /// Look up synsets by id, literal or word sense
    Lookup(LookupArgs),

    /// List relation targets of a synset or of all senses of a literal
    Relation(RelationArgs),

    /// Recursively trace a relation from a synset or literal
    Trace(TraceArgs),

    /// Check whether any of the given synsets is reachable via a relation
    Connected(ConnectedArgs),

    /// Check whether a literal is compatible with a synset
    Compatible(CompatibleArgs),

    /// Check whether two literals share a synset
    Synonyms(SynonymsArgs),

    /// Leacock-Chodorow similarity of two literals
    Similarity(SimilarityArgs),

    /// Show per-part-of-speech lexicon statistics
    Stats,
}

/// Arguments for the lookup command
#[derive(Parser, Debug, Clone)]
pub struct LookupArgs {
    /// Synset id or literal to look up
    #[arg(value_name = "TERM")]
    pub term: String,

    /// Part-of-speech (n, v, a, b); literals search all four when omitted
    #[arg(short, long)]
    pub pos: Option<String>,

    /// Treat TERM as a synset id instead of a literal (requires --pos)
    #[arg(long)]
    pub id: bool,

    /// Restrict to the word sense with this sense number (requires --pos)
    #[arg(short, long)]
    pub sense: Option<i32>,
}

/// Arguments for the relation command
#[derive(Parser, Debug, Clone)]
pub struct RelationArgs {
    /// Synset id or literal to start from
    #[arg(value_name = "TERM")]
    pub term: String,

    /// Part-of-speech (n, v, a, b)
    #[arg(value_name = "POS")]
    pub pos: String,

    /// Relation type (for example hypernym); lists the known relation
    /// types of each sense when omitted
    #[arg(value_name = "RELATION")]
    pub relation: Option<String>,

    /// Treat TERM as a synset id instead of a literal
    #[arg(long)]
    pub id: bool,
}

/// Arguments for the trace command
#[derive(Parser, Debug, Clone)]
pub struct TraceArgs {
    /// Synset id or literal to start from
    #[arg(value_name = "TERM")]
    pub term: String,

    /// Part-of-speech (n, v, a, b)
    #[arg(value_name = "POS")]
    pub pos: String,

    /// Relation type to follow
    #[arg(value_name = "RELATION")]
    pub relation: String,

    /// Treat TERM as a synset id instead of a literal
    #[arg(long)]
    pub id: bool,
}

/// Arguments for the connected command
#[derive(Parser, Debug, Clone)]
pub struct ConnectedArgs {
    /// Synset id or literal to start from
    #[arg(value_name = "TERM")]
    pub term: String,

    /// Part-of-speech (n, v, a, b)
    #[arg(value_name = "POS")]
    pub pos: String,

    /// Relation type to follow
    #[arg(value_name = "RELATION")]
    pub relation: String,

    /// Candidate target synset ids
    #[arg(value_name = "TARGET_ID", required = true)]
    pub targets: Vec<String>,

    /// Treat TERM as a synset id instead of a literal
    #[arg(long)]
    pub id: bool,
}

/// Arguments for the compatible command
#[derive(Parser, Debug, Clone)]
pub struct CompatibleArgs {
    /// Literal to check
    #[arg(value_name = "LITERAL")]
    pub literal: String,

    /// Part-of-speech (n, v, a, b)
    #[arg(value_name = "POS")]
    pub pos: String,

    /// Synset id to check against
    #[arg(value_name = "SYNSET_ID")]
    pub synset_id: String,

    /// Also accept literals of synsets reachable through hyponym edges
    #[arg(long)]
    pub hyponyms: bool,
}

/// Arguments for the synonyms command
#[derive(Parser, Debug, Clone)]
pub struct SynonymsArgs {
    /// First literal
    #[arg(value_name = "LITERAL1")]
    pub literal1: String,

    /// Second literal
    #[arg(value_name = "LITERAL2")]
    pub literal2: String,

    /// Part-of-speech (n, v, a, b)
    #[arg(value_name = "POS")]
    pub pos: String,
}

/// Arguments for the similarity command
#[derive(Parser, Debug, Clone)]
pub struct SimilarityArgs {
    /// First literal
    #[arg(value_name = "LITERAL1")]
    pub literal1: String,

    /// Second literal
    #[arg(value_name = "LITERAL2")]
    pub literal2: String,

    /// Part-of-speech (n, v, a, b)
    #[arg(value_name = "POS")]
    pub pos: String,

    /// Relation type used for connecting paths
    #[arg(value_name = "RELATION")]
    pub relation: String,

    /// Add an artificial root node to relation paths, making the
    /// partition fully interconnected
    #[arg(long)]
    pub top: bool,
}
