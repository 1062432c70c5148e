//! # wnquery
//!
//! An in-memory WordNet query engine for VisDic XML lexicons.
//!
//! ## Features
//!
//! - Streaming, fault-tolerant parser for the VisDic synset dialect
//! - Four per-part-of-speech partitions with id and literal indices
//! - Relation inversion for bidirectional graph traversal
//! - Lookup, trace, reachability and synonymy queries
//! - Leacock-Chodorow path-based semantic similarity

pub mod diagnostics;
pub mod error;
pub mod invert;
pub mod parser;
pub mod pos;
pub mod query;
pub mod similarity;
pub mod store;
pub mod synset;
pub mod transcode;

pub mod cli;

pub mod prelude {
    //! The most commonly used types, for glob import.
    pub use crate::diagnostics::{Diagnostics, NullDiagnostics, Severity, StderrDiagnostics};
    pub use crate::error::{Result, WnQueryError};
    pub use crate::pos::PartOfSpeech;
    pub use crate::query::WnQuery;
    pub use crate::synset::Synset;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
