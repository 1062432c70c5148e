//! The in-memory lexical store.
//!
//! Four partitions, one per part-of-speech. Each partition keeps the
//! authoritative id-to-synset map plus a literal index mapping word forms to
//! the ids of the synsets containing them. Synsets are owned exclusively by
//! the id map; the literal index holds ids only and is built together with
//! the id map, never maintained independently.
//!
//! The store is built once, by driving the streaming parser to exhaustion,
//! and is read-only afterwards (the relation inverter's append-only pass is
//! the single post-load mutation).

use std::collections::BTreeMap;
use std::io::BufRead;

use ahash::AHashMap;

use crate::diagnostics::{Diagnostics, Severity};
use crate::error::Result;
use crate::parser::SynsetParser;
use crate::pos::PartOfSpeech;
use crate::synset::Synset;

/// One part-of-speech partition of the lexicon.
#[derive(Debug, Default)]
pub struct Partition {
    /// Authoritative synset storage, keyed by id. Ordered so that passes
    /// over the partition are deterministic.
    synsets: BTreeMap<String, Synset>,
    /// Literal index: word form to ids of containing synsets, in file order.
    literal_index: AHashMap<String, Vec<String>>,
}

impl Partition {
    /// Synset with the given id, if present.
    pub fn get(&self, id: &str) -> Option<&Synset> {
        self.synsets.get(id)
    }

    /// True if a synset with the given id is present.
    pub fn contains(&self, id: &str) -> bool {
        self.synsets.contains_key(id)
    }

    /// Ids of the synsets containing `literal`, in file order. Empty slice
    /// if the literal is unknown.
    pub fn ids_for_literal(&self, literal: &str) -> &[String] {
        self.literal_index
            .get(literal)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Iterate over all synsets in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Synset)> {
        self.synsets.iter()
    }

    /// Number of synsets in this partition.
    pub fn synset_count(&self) -> usize {
        self.synsets.len()
    }

    /// Number of word senses in this partition (literal index entries).
    pub fn word_sense_count(&self) -> usize {
        self.literal_index.values().map(Vec::len).sum()
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut Synset> {
        self.synsets.get_mut(id)
    }

    fn insert(&mut self, synset: Synset) {
        for sense in &synset.synonyms {
            self.literal_index
                .entry(sense.literal.clone())
                .or_default()
                .push(synset.id.clone());
        }
        self.synsets.insert(synset.id.clone(), synset);
    }
}

/// The four-partition lexical store.
#[derive(Debug, Default)]
pub struct LexicalStore {
    partitions: [Partition; 4],
}

impl LexicalStore {
    /// Create an empty store.
    pub fn new() -> Self {
        LexicalStore::default()
    }

    /// The partition for a part-of-speech.
    pub fn partition(&self, pos: PartOfSpeech) -> &Partition {
        &self.partitions[pos.index()]
    }

    pub(crate) fn partition_mut(&mut self, pos: PartOfSpeech) -> &mut Partition {
        &mut self.partitions[pos.index()]
    }

    /// Drive `parser` over `reader` until end of input, saving every parsed
    /// synset. Returns the number of synsets kept.
    ///
    /// Data-quality problems are reported to `diagnostics` and the offending
    /// record is skipped; only structural parse faults abort the load.
    pub fn load<R: BufRead>(
        &mut self,
        reader: &mut R,
        parser: &mut SynsetParser,
        diagnostics: &dyn Diagnostics,
    ) -> Result<usize> {
        let mut kept = 0;
        let mut line_no = 0u64;
        let mut record = Synset::new();
        loop {
            parser.parse_next(reader, &mut record, &mut line_no)?;
            if record.is_empty() {
                break;
            }
            if self.save_synset(std::mem::take(&mut record), line_no, diagnostics) {
                kept += 1;
            }
        }
        parser.finish(line_no)?;
        Ok(kept)
    }

    /// Store one parsed synset, indexing its literals.
    ///
    /// A duplicate id within a partition keeps the first record; an
    /// unrecognized part-of-speech discards the record. Both are warnings,
    /// not errors. Returns whether the synset was kept.
    pub fn save_synset(
        &mut self,
        synset: Synset,
        line_no: u64,
        diagnostics: &dyn Diagnostics,
    ) -> bool {
        if synset.is_empty() {
            return false;
        }
        let pos = match synset.pos.parse::<PartOfSpeech>() {
            Ok(pos) => pos,
            Err(_) => {
                diagnostics.log(
                    &format!(
                        "invalid part-of-speech '{}' for synset {} (input line {}), record discarded",
                        synset.pos, synset.id, line_no
                    ),
                    Severity::Warning,
                );
                return false;
            }
        };
        let partition = self.partition_mut(pos);
        if partition.contains(&synset.id) {
            diagnostics.log(
                &format!(
                    "synset with id {} already exists (input line {}), keeping the first",
                    synset.id, line_no
                ),
                Severity::Warning,
            );
            return false;
        }
        partition.insert(synset);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::MemoryDiagnostics;
    use crate::synset::WordSense;
    use std::io::Cursor;

    fn synset(id: &str, pos: &str, literals: &[(&str, &str)]) -> Synset {
        let mut s = Synset::new();
        s.id = id.to_string();
        s.pos = pos.to_string();
        for (lit, sense) in literals {
            s.synonyms.push(WordSense::new(*lit, *sense));
        }
        s
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut store = LexicalStore::new();
        let diag = MemoryDiagnostics::new();

        assert!(store.save_synset(synset("ENG20-1-n", "n", &[("dog", "1")]), 1, &diag));
        let part = store.partition(PartOfSpeech::Noun);
        assert!(part.contains("ENG20-1-n"));
        assert_eq!(part.ids_for_literal("dog"), ["ENG20-1-n".to_string()]);
        assert!(part.ids_for_literal("cat").is_empty());
        assert!(diag.messages().is_empty());
    }

    #[test]
    fn test_duplicate_id_keeps_first() {
        let mut store = LexicalStore::new();
        let diag = MemoryDiagnostics::new();

        assert!(store.save_synset(synset("ENG20-1-n", "n", &[("dog", "1")]), 1, &diag));
        assert!(!store.save_synset(synset("ENG20-1-n", "n", &[("cat", "1")]), 2, &diag));

        let part = store.partition(PartOfSpeech::Noun);
        assert_eq!(part.synset_count(), 1);
        assert_eq!(part.get("ENG20-1-n").unwrap().synonyms[0].literal, "dog");
        // The later record was not indexed either.
        assert!(part.ids_for_literal("cat").is_empty());

        let warnings = diag.messages_with_severity(Severity::Warning);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("ENG20-1-n"));
        assert!(warnings[0].contains("line 2"));
    }

    #[test]
    fn test_invalid_pos_discards_record() {
        let mut store = LexicalStore::new();
        let diag = MemoryDiagnostics::new();

        assert!(!store.save_synset(synset("ENG20-1-x", "x", &[("dog", "1")]), 7, &diag));
        for pos in crate::pos::ALL_POS {
            assert_eq!(store.partition(pos).synset_count(), 0);
        }
        let warnings = diag.messages_with_severity(Severity::Warning);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("'x'"));
        assert!(warnings[0].contains("line 7"));
    }

    #[test]
    fn test_same_id_in_different_pos_is_not_a_duplicate() {
        let mut store = LexicalStore::new();
        let diag = MemoryDiagnostics::new();

        assert!(store.save_synset(synset("ENG20-1", "n", &[("run", "1")]), 1, &diag));
        assert!(store.save_synset(synset("ENG20-1", "v", &[("run", "1")]), 2, &diag));
        assert_eq!(store.partition(PartOfSpeech::Noun).synset_count(), 1);
        assert_eq!(store.partition(PartOfSpeech::Verb).synset_count(), 1);
        assert!(diag.messages().is_empty());
    }

    #[test]
    fn test_literal_bucket_keeps_file_order() {
        let mut store = LexicalStore::new();
        let diag = MemoryDiagnostics::new();

        store.save_synset(synset("ENG20-9-n", "n", &[("bank", "1")]), 1, &diag);
        store.save_synset(synset("ENG20-3-n", "n", &[("bank", "2")]), 2, &diag);
        store.save_synset(synset("ENG20-5-n", "n", &[("bank", "3")]), 3, &diag);

        // Bucket order is insertion (file) order, not id order.
        assert_eq!(
            store.partition(PartOfSpeech::Noun).ids_for_literal("bank"),
            ["ENG20-9-n".to_string(), "ENG20-3-n".to_string(), "ENG20-5-n".to_string()]
        );
    }

    #[test]
    fn test_load_drives_parser_to_exhaustion() {
        let input = "<SYNSET><ID>ENG20-1-n</ID><POS>n</POS>\
                     <SYNONYM><LITERAL>dog<SENSE>1</SENSE></LITERAL></SYNONYM></SYNSET>\n\
                     <SYNSET><ID>ENG20-2-v</ID><POS>v</POS>\
                     <SYNONYM><LITERAL>dog<SENSE>1</SENSE></LITERAL></SYNONYM></SYNSET>\n";
        let mut store = LexicalStore::new();
        let mut parser = SynsetParser::utf8();
        let diag = MemoryDiagnostics::new();

        let kept = store
            .load(&mut Cursor::new(input), &mut parser, &diag)
            .unwrap();
        assert_eq!(kept, 2);
        assert_eq!(store.partition(PartOfSpeech::Noun).synset_count(), 1);
        assert_eq!(store.partition(PartOfSpeech::Verb).synset_count(), 1);
        assert_eq!(store.partition(PartOfSpeech::Adjective).synset_count(), 0);
    }
}
