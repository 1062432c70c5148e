//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, WnQueryArgs};
use crate::error::Result;
use crate::query::PosStats;
use crate::similarity::SimilarityScore;
use crate::synset::Synset;

/// Result structure for lookup commands.
#[derive(Debug, Serialize, Deserialize)]
pub struct LookupResults {
    pub synsets: Vec<Synset>,
}

/// Relation targets of one starting synset.
#[derive(Debug, Serialize, Deserialize)]
pub struct RelationResults {
    pub source_id: String,
    pub targets: Vec<String>,
}

/// Distinct relation types leaving one synset.
#[derive(Debug, Serialize, Deserialize)]
pub struct RelationTypeResults {
    pub source_id: String,
    pub relations: Vec<String>,
}

/// Result structure for the trace command.
#[derive(Debug, Serialize, Deserialize)]
pub struct TraceResults {
    pub start_id: String,
    pub visited: Vec<String>,
}

/// Result structure for connectivity checks.
#[derive(Debug, Serialize, Deserialize)]
pub struct ConnectedResult {
    pub connected: bool,
    /// Sense of the literal the connection starts from, if any.
    pub sense_id: Option<String>,
    /// The matched target id, if any.
    pub target_id: Option<String>,
}

/// Result structure for the compatible command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CompatibleResult {
    pub compatible: bool,
}

/// Result structure for the synonyms command.
#[derive(Debug, Serialize, Deserialize)]
pub struct SynonymsResult {
    pub synonyms: bool,
    /// A synset containing both literals, if any.
    pub synset_id: Option<String>,
}

/// Result structure for the similarity command.
#[derive(Debug, Serialize, Deserialize)]
pub struct SimilarityResults {
    pub scores: Vec<SimilarityScore>,
}

/// Result structure for the stats command.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResults {
    pub partitions: Vec<PosStats>,
}

/// Print a command result in the requested output format.
///
/// In human format only `human` is printed; in JSON format the `data`
/// structure is serialized instead, pretty-printed when requested.
pub fn output_result<T: Serialize>(human: &str, data: &T, args: &WnQueryArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            println!("{human}");
        }
        OutputFormat::Json => {
            let json = if args.pretty {
                serde_json::to_string_pretty(data)?
            } else {
                serde_json::to_string(data)?
            };
            println!("{json}");
        }
    }
    Ok(())
}

/// Render the per-partition statistics table.
pub fn render_stats(partitions: &[PosStats]) -> String {
    let mut out = String::from("PoS       \t#synsets\t#word senses\n");
    for row in partitions {
        out.push_str(&format!(
            "{:<10}\t{:>8}\t{:>11}\n",
            row.pos.label(),
            row.synsets,
            row.word_senses
        ));
    }
    out.pop();
    out
}

/// Render similarity scores, best first.
pub fn render_scores(scores: &[SimilarityScore]) -> String {
    let mut out = String::from("Results:");
    for s in scores {
        out.push_str(&format!("\n  {}    {}  {}", s.score, s.id1, s.id2));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pos::PartOfSpeech;

    #[test]
    fn test_render_stats_layout() {
        let rows = vec![
            PosStats {
                pos: PartOfSpeech::Noun,
                synsets: 12,
                word_senses: 30,
            },
            PosStats {
                pos: PartOfSpeech::Verb,
                synsets: 3,
                word_senses: 4,
            },
        ];
        let rendered = render_stats(&rows);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("PoS"));
        assert!(lines[1].starts_with("Nouns"));
        assert!(lines[1].contains("12"));
        assert!(lines[2].starts_with("Verbs"));
    }

    #[test]
    fn test_render_scores() {
        let scores = vec![SimilarityScore {
            score: 1.5,
            id1: "n-1".to_string(),
            id2: "n-2".to_string(),
        }];
        assert_eq!(render_scores(&scores), "Results:\n  1.5    n-1  n-2");
    }
}
