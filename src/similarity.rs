//! Leacock-Chodorow semantic similarity.
//!
//! The similarity of two word senses is derived from the length of the
//! shortest path connecting them along one relation type, normalized by the
//! assumed maximum taxonomy depth: `sim = -log10(path / (2 * D))`. A path of
//! length 1 (the two senses are the same synset) gives the maximum score;
//! senses with no connecting path get a fixed sentinel instead.
//!
//! Reachability sets are computed by recursive descent over the relation
//! edges, each reached node tagged with its distance from the start (the
//! start itself counts as distance 1). With the artificial top enabled,
//! every relation-terminal node additionally reaches a synthetic root, which
//! makes any two senses of a partition connected — at a long, low-scoring
//! distance.

use serde::{Deserialize, Serialize};

use crate::pos::PartOfSpeech;
use crate::query::WnQuery;
use crate::store::Partition;

/// Longest assumed path from the taxonomy root to a leaf.
pub const LEACHO_DEPTH: f64 = 20.0;

/// Score for two senses with no connecting path (only possible without the
/// artificial top).
pub const LEACHO_NO_CONNECTION: f64 = -1.0;

/// Name of the synthetic root reached by relation-terminal nodes when the
/// artificial top is enabled.
const ARTIFICIAL_TOP: &str = "#TOP#";

/// Maximum possible similarity score: that of a sense paired with itself
/// (path length 1).
pub fn max_similarity() -> f64 {
    -(1.0 / (2.0 * LEACHO_DEPTH)).log10()
}

/// Similarity of one sense pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityScore {
    /// Leacock-Chodorow score; higher is more similar.
    pub score: f64,
    /// Id of the sense of the first literal.
    pub id1: String,
    /// Id of the sense of the second literal.
    pub id2: String,
}

impl WnQuery {
    /// Compute the Leacock-Chodorow similarity of every sense pair of two
    /// literals, following `relation` edges.
    ///
    /// Returns one entry per pair `(s1 ∈ senses(literal1), s2 ∈
    /// senses(literal2))`, sorted by score descending (ties keep generation
    /// order); pairs with no connecting path score
    /// [`LEACHO_NO_CONNECTION`]. Empty if either literal is unknown.
    ///
    /// With `add_artificial_top`, relation paths are extended by a synthetic
    /// shared root so the partition is fully interconnected; note that an
    /// unknown relation type then scores every pair at path length 3 (start
    /// node plus artificial root on each side).
    pub fn similarity_leacock_chodorow(
        &self,
        literal1: &str,
        literal2: &str,
        pos: PartOfSpeech,
        relation: &str,
        add_artificial_top: bool,
    ) -> Vec<SimilarityScore> {
        let senses1 = self.look_up_literal_ids(literal1, pos);
        let senses2 = self.look_up_literal_ids(literal2, pos);
        if senses1.is_empty() || senses2.is_empty() {
            return Vec::new();
        }

        let mut results = Vec::with_capacity(senses1.len() * senses2.len());
        for id1 in senses1 {
            for id2 in senses2 {
                results.push(SimilarityScore {
                    score: self.sim_leacho(id1, id2, pos, relation, add_artificial_top),
                    id1: id1.clone(),
                    id2: id2.clone(),
                });
            }
        }
        // Stable sort: equal scores stay in generation order.
        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        results
    }

    /// Similarity of one synset pair.
    fn sim_leacho(
        &self,
        id1: &str,
        id2: &str,
        pos: PartOfSpeech,
        relation: &str,
        add_artificial_top: bool,
    ) -> f64 {
        let partition = self.partition(pos);
        let mut reach1 = Vec::new();
        let mut reach2 = Vec::new();
        get_reach(partition, id1, relation, 1, add_artificial_top, &mut reach1);
        get_reach(partition, id2, relation, 1, add_artificial_top, &mut reach2);

        // Shortest connecting path through any common node. The search only
        // accepts sums strictly below 2*D, so extremely deep connections
        // fall back to the no-connection sentinel.
        let mut best: Option<u32> = None;
        let cutoff = (2.0 * LEACHO_DEPTH) as u32;
        for (n1, d1) in &reach1 {
            for (n2, d2) in &reach2 {
                if n1 == n2 {
                    let sum = d1 + d2;
                    if sum < best.unwrap_or(cutoff) {
                        best = Some(sum);
                    }
                }
            }
        }

        match best {
            // The common node is counted once, not twice.
            Some(sum) => -(f64::from(sum - 1) / (2.0 * LEACHO_DEPTH)).log10(),
            None => LEACHO_NO_CONNECTION,
        }
    }
}

/// Collect all nodes reachable from `id` along `relation` edges, tagged
/// with their distance from the start (`dist` for the start itself).
///
/// Nodes reachable along several paths appear once per path; the shortest
/// occurrence is what the caller's minimization uses. Terminal nodes reach
/// the artificial top at one step further when it is enabled. Recursive,
/// with no cycle guard.
fn get_reach(
    partition: &Partition,
    id: &str,
    relation: &str,
    dist: u32,
    add_top: bool,
    result: &mut Vec<(String, u32)>,
) {
    let Some(syns) = partition.get(id) else {
        return;
    };
    result.push((id.to_string(), dist));

    let mut has_children = false;
    for ptr in &syns.ilrs {
        if ptr.rtype == relation {
            has_children = true;
            get_reach(partition, &ptr.target, relation, dist + 1, add_top, result);
        }
    }
    if !has_children && add_top {
        result.push((ARTIFICIAL_TOP.to_string(), dist + 1));
    }
}
