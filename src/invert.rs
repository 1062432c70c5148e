//! Relation inversion.
//!
//! The lexicon files record most relations in one direction only (a synset
//! points at its hypernym, not at its hyponyms). To make the graph
//! traversable both ways, a single post-load pass walks every edge `(s, R,
//! t)` whose type has a configured inverse `R'` and appends the reverse edge
//! `(t, R', s)` to the target synset. Symmetric relations invert to
//! themselves. The pass never inverts the edges it adds.
//!
//! Edges whose target is missing from the partition, and self-referencing
//! edges, are skipped with a warning.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::diagnostics::{Diagnostics, Severity};
use crate::pos::{ALL_POS, PartOfSpeech};
use crate::store::LexicalStore;
use crate::synset::Pointer;

lazy_static! {
    /// Invertible relation types and their inverses.
    static ref INVERSES: HashMap<&'static str, &'static str> = {
        let mut inv = HashMap::new();
        inv.insert("hypernym", "hyponym");
        inv.insert("holo_member", "mero_member");
        inv.insert("holo_part", "mero_part");
        inv.insert("holo_portion", "mero_portion");
        inv.insert("region_domain", "region_member");
        inv.insert("usage_domain", "usage_member");
        inv.insert("category_domain", "category_member");
        inv.insert("near_antonym", "near_antonym");
        inv.insert("middle", "middle");
        inv.insert("verb_group", "verb_group");
        inv.insert("similar_to", "similar_to");
        inv.insert("also_see", "also_see");
        inv.insert("be_in_state", "be_in_state");
        inv.insert("eng_derivative", "eng_derivative");
        inv.insert("is_consequent_state_of", "has_consequent_state");
        inv.insert("is_preparatory_phase_of", "has_preparatory_phase");
        inv.insert("is_telos_of", "has_telos");
        inv.insert("subevent", "has_subevent");
        inv.insert("causes", "caused_by");
        inv
    };
}

/// The configured inverse of a relation type, if it has one.
pub fn inverse_of(relation: &str) -> Option<&'static str> {
    INVERSES.get(relation).copied()
}

/// Run the inversion pass over every partition of the store.
///
/// Must run exactly once, after the load completes; the pass appends edges
/// unconditionally, so re-running it duplicates the inverted edges.
pub fn invert_relations(store: &mut LexicalStore, diagnostics: &dyn Diagnostics) {
    for pos in ALL_POS {
        diagnostics.log(
            &format!("Inverting relations for {}...", pos.label().to_lowercase()),
            Severity::Info,
        );
        invert_partition(store, pos, diagnostics);
    }
}

/// Invert one partition.
///
/// All edge lists are snapshotted before any appends, so edges added by
/// this pass are never themselves inverted, regardless of iteration order.
fn invert_partition(store: &mut LexicalStore, pos: PartOfSpeech, diagnostics: &dyn Diagnostics) {
    let partition = store.partition_mut(pos);
    let snapshot: Vec<(String, Vec<Pointer>)> = partition
        .iter()
        .map(|(id, synset)| (id.clone(), synset.ilrs.clone()))
        .collect();

    for (source_id, edges) in snapshot {
        for edge in edges {
            let Some(inverse) = inverse_of(&edge.rtype) else {
                continue;
            };
            if !partition.contains(&edge.target) {
                diagnostics.log(
                    &format!(
                        "synset {} is missing ('{}' target from synset {})",
                        edge.target, edge.rtype, source_id
                    ),
                    Severity::Warning,
                );
                continue;
            }
            if edge.target == source_id {
                diagnostics.log(
                    &format!(
                        "self-referencing relation '{}' for synset {}",
                        inverse, source_id
                    ),
                    Severity::Warning,
                );
                continue;
            }
            if let Some(target) = partition.get_mut(&edge.target) {
                target.ilrs.push(Pointer::new(source_id.clone(), inverse));
            }
        }
    }
}
