//! Graph queries over a loaded lexicon.
//!
//! [`WnQuery`] wraps a fully built [`LexicalStore`] (loaded and inverted)
//! and answers lookups, relation traversals, reachability checks and
//! synonymy tests. All operations are read-only; after construction the
//! engine never mutates the store, so shared references can be queried from
//! multiple threads.
//!
//! "Not found" is always a normal result (`None`, an empty vector, `false`),
//! never an error. An invalid part-of-speech selector cannot reach these
//! methods at all: it is rejected when the external string form is converted
//! to [`PartOfSpeech`].
//!
//! The recursive traversals (`trace_relation`, `is_id_connected_with`,
//! hyponym expansion) follow the relation graph with no cycle guard and do
//! not terminate on a cyclic graph; well-formed lexicons are acyclic per
//! relation type.

use std::collections::HashSet;
use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::diagnostics::Diagnostics;
use crate::error::{Result, WnQueryError};
use crate::invert::invert_relations;
use crate::parser::SynsetParser;
use crate::pos::{ALL_POS, PartOfSpeech};
use crate::store::{LexicalStore, Partition};
use crate::synset::Synset;

/// Per-partition synset and word-sense counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PosStats {
    /// The partition.
    pub pos: PartOfSpeech,
    /// Number of synsets.
    pub synsets: usize,
    /// Number of word senses (literal index entries).
    pub word_senses: usize,
}

/// Read-only query engine over a loaded lexicon.
#[derive(Debug)]
pub struct WnQuery {
    store: LexicalStore,
}

impl WnQuery {
    /// Wrap an already loaded and inverted store.
    pub fn new(store: LexicalStore) -> Self {
        WnQuery { store }
    }

    /// Read a lexicon file, build the indices and invert the relations.
    ///
    /// Character data is normalized to the destination encoding named by
    /// `encoding` (an unknown name fails before any parsing). Data-quality
    /// warnings go to `diagnostics`; structural faults abort the load.
    pub fn open<P: AsRef<Path>>(
        path: P,
        encoding: &str,
        diagnostics: &dyn Diagnostics,
    ) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            WnQueryError::other(format!("could not open file {}: {e}", path.display()))
        })?;
        let mut parser = SynsetParser::new(encoding)?;
        WnQuery::from_reader(&mut BufReader::new(file), &mut parser, diagnostics)
    }

    /// Build the engine from any buffered reader.
    pub fn from_reader<R: BufRead>(
        reader: &mut R,
        parser: &mut SynsetParser,
        diagnostics: &dyn Diagnostics,
    ) -> Result<Self> {
        let mut store = LexicalStore::new();
        store.load(reader, parser, diagnostics)?;
        invert_relations(&mut store, diagnostics);
        Ok(WnQuery { store })
    }

    /// The underlying store.
    pub fn store(&self) -> &LexicalStore {
        &self.store
    }

    pub(crate) fn partition(&self, pos: PartOfSpeech) -> &Partition {
        self.store.partition(pos)
    }

    /// Exact-match id lookup.
    pub fn look_up_id(&self, id: &str, pos: PartOfSpeech) -> Option<&Synset> {
        self.partition(pos).get(id)
    }

    /// Ids of the synsets containing `literal`, in index order.
    pub fn look_up_literal_ids(&self, literal: &str, pos: PartOfSpeech) -> &[String] {
        self.partition(pos).ids_for_literal(literal)
    }

    /// All synsets containing `literal`, in index order. Empty if the
    /// literal is unknown.
    pub fn look_up_literal(&self, literal: &str, pos: PartOfSpeech) -> Vec<&Synset> {
        let partition = self.partition(pos);
        partition
            .ids_for_literal(literal)
            .iter()
            .filter_map(|id| partition.get(id))
            .collect()
    }

    /// The first synset containing `literal` with the given sense number.
    ///
    /// Sense numbers are stored textually; they are compared after a
    /// leading-integer parse where a non-numeric sense counts as 0.
    pub fn look_up_sense(
        &self,
        literal: &str,
        sense_num: i32,
        pos: PartOfSpeech,
    ) -> Option<&Synset> {
        self.look_up_literal(literal, pos).into_iter().find(|syns| {
            syns.synonyms
                .iter()
                .any(|s| s.literal == literal && parse_sense_number(&s.sense) == sense_num)
        })
    }

    /// Target ids of all edges from `id` with the given relation type, in
    /// edge order. Empty if `id` is unknown or has no such edges.
    pub fn look_up_relation(&self, id: &str, pos: PartOfSpeech, relation: &str) -> Vec<String> {
        match self.partition(pos).get(id) {
            None => Vec::new(),
            Some(syns) => syns
                .ilrs
                .iter()
                .filter(|p| p.rtype == relation)
                .map(|p| p.target.clone())
                .collect(),
        }
    }

    /// Depth-first pre-order trace from `id` along edges of one relation
    /// type, collecting every visited synset present in the store.
    ///
    /// The start synset is included only if it has at least one outgoing
    /// edge of the requested type; an unknown start id yields an empty
    /// result. Does not terminate on a cyclic relation graph.
    pub fn trace_relation(&self, id: &str, pos: PartOfSpeech, relation: &str) -> Vec<String> {
        let mut result = Vec::new();
        self.trace_rec(self.partition(pos), id, relation, true, &mut result);
        result
    }

    fn trace_rec(
        &self,
        partition: &Partition,
        id: &str,
        relation: &str,
        is_start: bool,
        result: &mut Vec<String>,
    ) {
        let Some(syns) = partition.get(id) else {
            return;
        };
        let children: Vec<&str> = syns
            .ilrs
            .iter()
            .filter(|p| p.rtype == relation)
            .map(|p| p.target.as_str())
            .collect();
        if is_start && children.is_empty() {
            return;
        }
        result.push(id.to_string());
        for child in children {
            self.trace_rec(partition, child, relation, false, result);
        }
    }

    /// Like [`WnQuery::trace_relation`], but renders each visited synset
    /// indented by depth as `id  {literal:sense, …}  (definition)`.
    ///
    /// Unlike the plain trace, the start synset is rendered even when it
    /// has no edges of the requested type; an unknown id yields an empty
    /// string.
    pub fn trace_relation_formatted(
        &self,
        id: &str,
        pos: PartOfSpeech,
        relation: &str,
    ) -> String {
        let mut out = String::new();
        self.trace_formatted_rec(self.partition(pos), id, relation, 0, &mut out);
        out
    }

    fn trace_formatted_rec(
        &self,
        partition: &Partition,
        id: &str,
        relation: &str,
        level: usize,
        out: &mut String,
    ) {
        let Some(syns) = partition.get(id) else {
            return;
        };
        let _ = writeln!(out, "{}{}", "  ".repeat(level), syns.to_compact_line());
        for ptr in &syns.ilrs {
            if ptr.rtype == relation {
                self.trace_formatted_rec(partition, &ptr.target, relation, level + 1, out);
            }
        }
    }

    /// Depth-first search from `id` along edges of one relation type for
    /// any member of `targets`. Search order is edge order; the first match
    /// wins, including an immediate match of `id` itself. Returns the
    /// matched target id.
    pub fn is_id_connected_with(
        &self,
        id: &str,
        pos: PartOfSpeech,
        relation: &str,
        targets: &HashSet<String>,
    ) -> Option<String> {
        self.connected_rec(self.partition(pos), id, relation, targets)
    }

    fn connected_rec(
        &self,
        partition: &Partition,
        id: &str,
        relation: &str,
        targets: &HashSet<String>,
    ) -> Option<String> {
        if targets.contains(id) {
            return Some(id.to_string());
        }
        let syns = partition.get(id)?;
        for ptr in &syns.ilrs {
            if ptr.rtype == relation {
                if let Some(found) = self.connected_rec(partition, &ptr.target, relation, targets) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Try [`WnQuery::is_id_connected_with`] from every sense of `literal`
    /// in index order; the first success wins. Returns the sense id the
    /// connection starts from and the matched target id.
    pub fn is_literal_connected_with(
        &self,
        literal: &str,
        pos: PartOfSpeech,
        relation: &str,
        targets: &HashSet<String>,
    ) -> Option<(String, String)> {
        for id in self.look_up_literal_ids(literal, pos) {
            if let Some(found) = self.is_id_connected_with(id, pos, relation, targets) {
                return Some((id.clone(), found));
            }
        }
        None
    }

    /// True if `literal` is a direct sense of the synset `id`, or — when
    /// `expand_hyponyms` is set — of any synset reachable from it through
    /// one or more `hyponym` edges.
    pub fn is_literal_compatible_with_synset(
        &self,
        literal: &str,
        pos: PartOfSpeech,
        id: &str,
        expand_hyponyms: bool,
    ) -> bool {
        let Some(syns) = self.partition(pos).get(id) else {
            return false;
        };
        if syns.synonyms.iter().any(|s| s.literal == literal) {
            return true;
        }
        if expand_hyponyms {
            for ptr in &syns.ilrs {
                if ptr.rtype == "hyponym"
                    && self.is_literal_compatible_with_synset(literal, pos, &ptr.target, true)
                {
                    return true;
                }
            }
        }
        false
    }

    /// True if some sense of `literal1` directly contains `literal2` as a
    /// word sense. Returns the id of the shared synset (there may be more
    /// than one; the first in index order wins).
    pub fn are_synonyms(
        &self,
        literal1: &str,
        literal2: &str,
        pos: PartOfSpeech,
    ) -> Option<String> {
        self.look_up_literal_ids(literal1, pos)
            .iter()
            .find(|id| self.is_literal_compatible_with_synset(literal2, pos, id, false))
            .cloned()
    }

    /// Synset and word-sense counts for all four partitions.
    pub fn stats(&self) -> Vec<PosStats> {
        ALL_POS
            .iter()
            .map(|&pos| {
                let partition = self.partition(pos);
                PosStats {
                    pos,
                    synsets: partition.synset_count(),
                    word_senses: partition.word_sense_count(),
                }
            })
            .collect()
    }
}

/// Leading-integer parse with C `atoi` semantics: optional leading
/// whitespace and sign, then digits; anything else (or no digits) is 0.
pub(crate) fn parse_sense_number(text: &str) -> i32 {
    let trimmed = text.trim_start();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let mut value: i32 = 0;
    let mut seen = false;
    for c in digits.chars() {
        let Some(d) = c.to_digit(10) else {
            break;
        };
        seen = true;
        value = value.saturating_mul(10).saturating_add(d as i32);
    }
    if !seen {
        return 0;
    }
    if negative { -value } else { value }
}
