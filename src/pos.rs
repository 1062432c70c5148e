//! Part-of-speech selector.
//!
//! The lexicon is partitioned into four independent graphs, one per
//! part-of-speech. Externally a partition is named by the one-letter form
//! used in the XML (`n`, `v`, `a`, `b`); internally everything is keyed by
//! the [`PartOfSpeech`] enum so an invalid selector is rejected once, at the
//! conversion step, instead of at every map access.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::WnQueryError;

/// One of the four lexicon partitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartOfSpeech {
    /// Nouns (`n`).
    Noun,
    /// Verbs (`v`).
    Verb,
    /// Adjectives (`a`).
    Adjective,
    /// Adverbs (`b`).
    Adverb,
}

/// All parts-of-speech in the order the original lexicon files use
/// (noun, verb, adjective, adverb).
pub const ALL_POS: [PartOfSpeech; 4] = [
    PartOfSpeech::Noun,
    PartOfSpeech::Verb,
    PartOfSpeech::Adjective,
    PartOfSpeech::Adverb,
];

impl PartOfSpeech {
    /// The one-letter external form (`n|v|a|b`).
    pub fn as_str(&self) -> &'static str {
        match self {
            PartOfSpeech::Noun => "n",
            PartOfSpeech::Verb => "v",
            PartOfSpeech::Adjective => "a",
            PartOfSpeech::Adverb => "b",
        }
    }

    /// Human-readable plural label, as used in statistics output.
    pub fn label(&self) -> &'static str {
        match self {
            PartOfSpeech::Noun => "Nouns",
            PartOfSpeech::Verb => "Verbs",
            PartOfSpeech::Adjective => "Adjectives",
            PartOfSpeech::Adverb => "Adverbs",
        }
    }

    /// Index of this partition in per-POS arrays.
    pub(crate) fn index(&self) -> usize {
        match self {
            PartOfSpeech::Noun => 0,
            PartOfSpeech::Verb => 1,
            PartOfSpeech::Adjective => 2,
            PartOfSpeech::Adverb => 3,
        }
    }
}

impl FromStr for PartOfSpeech {
    type Err = WnQueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "n" => Ok(PartOfSpeech::Noun),
            "v" => Ok(PartOfSpeech::Verb),
            "a" => Ok(PartOfSpeech::Adjective),
            "b" => Ok(PartOfSpeech::Adverb),
            other => Err(WnQueryError::invalid_pos(other)),
        }
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
