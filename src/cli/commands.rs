//! Command implementations for the wnquery CLI.

use std::collections::HashSet;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::cli::shell;
use crate::diagnostics::{Severity, StderrDiagnostics};
use crate::error::{Result, WnQueryError};
use crate::pos::{ALL_POS, PartOfSpeech};
use crate::query::WnQuery;

/// Execute a CLI command.
pub fn execute_command(args: WnQueryArgs) -> Result<()> {
    let diagnostics = match args.verbosity() {
        0 => StderrDiagnostics::with_max_severity(Severity::Error),
        1 => StderrDiagnostics::with_max_severity(Severity::Warning),
        _ => StderrDiagnostics::new(),
    };

    if args.verbosity() > 0 {
        eprintln!("Reading XML...");
    }
    let wn = WnQuery::open(&args.wn_file, &args.encoding, &diagnostics)?;

    match args.command.clone() {
        None | Some(Command::Shell) => shell::run_shell(&wn, &args),
        Some(Command::Lookup(lookup_args)) => lookup(&wn, lookup_args, &args),
        Some(Command::Relation(relation_args)) => relation(&wn, relation_args, &args),
        Some(Command::Trace(trace_args)) => trace(&wn, trace_args, &args),
        Some(Command::Connected(connected_args)) => connected(&wn, connected_args, &args),
        Some(Command::Compatible(compatible_args)) => compatible(&wn, compatible_args, &args),
        Some(Command::Synonyms(synonyms_args)) => synonyms(&wn, synonyms_args, &args),
        Some(Command::Similarity(similarity_args)) => similarity(&wn, similarity_args, &args),
        Some(Command::Stats) => stats(&wn, &args),
    }
}

/// Parse a part-of-speech argument that a command form requires.
fn required_pos(pos: &Option<String>, form: &str) -> Result<PartOfSpeech> {
    match pos {
        Some(p) => p.parse(),
        None => Err(WnQueryError::other(format!("{form} requires --pos"))),
    }
}

/// Ids to start a relation/trace query from: the term itself when it is a
/// synset id, otherwise every sense of the literal.
fn start_ids(wn: &WnQuery, term: &str, pos: PartOfSpeech, as_id: bool) -> Vec<String> {
    if as_id {
        vec![term.to_string()]
    } else {
        wn.look_up_literal_ids(term, pos).to_vec()
    }
}

/// Look up synsets by id, literal or word sense.
fn lookup(wn: &WnQuery, args: LookupArgs, cli_args: &WnQueryArgs) -> Result<()> {
    let mut synsets = Vec::new();

    if args.id {
        let pos = required_pos(&args.pos, "looking up by id")?;
        if let Some(syns) = wn.look_up_id(&args.term, pos) {
            synsets.push(syns.clone());
        }
    } else if let Some(sense) = args.sense {
        let pos = required_pos(&args.pos, "looking up a word sense")?;
        if let Some(syns) = wn.look_up_sense(&args.term, sense, pos) {
            synsets.push(syns.clone());
        }
    } else {
        match &args.pos {
            Some(p) => {
                let pos: PartOfSpeech = p.parse()?;
                synsets.extend(wn.look_up_literal(&args.term, pos).into_iter().cloned());
            }
            None => {
                for pos in ALL_POS {
                    synsets.extend(wn.look_up_literal(&args.term, pos).into_iter().cloned());
                }
            }
        }
    }

    let human = if synsets.is_empty() {
        "Not found".to_string()
    } else {
        synsets
            .iter()
            .map(|s| s.to_compact_line())
            .collect::<Vec<_>>()
            .join("\n")
    };
    output_result(&human, &LookupResults { synsets }, cli_args)
}

/// List relation targets, or all known relation types of each sense.
fn relation(wn: &WnQuery, args: RelationArgs, cli_args: &WnQueryArgs) -> Result<()> {
    let pos: PartOfSpeech = args.pos.parse()?;
    let sources = start_ids(wn, &args.term, pos, args.id);
    if sources.is_empty() {
        return output_result("Not found", &Vec::<RelationResults>::new(), cli_args);
    }

    match &args.relation {
        Some(rel) => {
            let mut results = Vec::new();
            let mut human = Vec::new();
            for source in sources {
                let targets = wn.look_up_relation(&source, pos, rel);
                human.push(synset_line(wn, &source, pos));
                for target in &targets {
                    human.push(format!("  {}", synset_line(wn, target, pos)));
                }
                results.push(RelationResults {
                    source_id: source,
                    targets,
                });
            }
            output_result(&human.join("\n"), &results, cli_args)
        }
        None => {
            let mut results = Vec::new();
            let mut human = Vec::new();
            for source in sources {
                let mut relations: Vec<String> = Vec::new();
                if let Some(syns) = wn.look_up_id(&source, pos) {
                    for ptr in &syns.ilrs {
                        if !relations.contains(&ptr.rtype) {
                            relations.push(ptr.rtype.clone());
                        }
                    }
                }
                human.push(synset_line(wn, &source, pos));
                for rel in &relations {
                    human.push(format!("  {rel}"));
                }
                results.push(RelationTypeResults {
                    source_id: source,
                    relations,
                });
            }
            output_result(&human.join("\n"), &results, cli_args)
        }
    }
}

/// Recursively trace a relation.
fn trace(wn: &WnQuery, args: TraceArgs, cli_args: &WnQueryArgs) -> Result<()> {
    let pos: PartOfSpeech = args.pos.parse()?;
    let sources = start_ids(wn, &args.term, pos, args.id);

    let mut results = Vec::new();
    let mut human = String::new();
    for source in sources {
        let rendered = wn.trace_relation_formatted(&source, pos, &args.relation);
        human.push_str(&rendered);
        results.push(TraceResults {
            visited: wn.trace_relation(&source, pos, &args.relation),
            start_id: source,
        });
    }
    if human.is_empty() {
        return output_result("Not found", &results, cli_args);
    }
    output_result(human.trim_end_matches('\n'), &results, cli_args)
}

/// Reachability check against a set of candidate target ids.
fn connected(wn: &WnQuery, args: ConnectedArgs, cli_args: &WnQueryArgs) -> Result<()> {
    let pos: PartOfSpeech = args.pos.parse()?;
    let targets: HashSet<String> = args.targets.iter().cloned().collect();

    let (result, human) = if args.id {
        match wn.is_id_connected_with(&args.term, pos, &args.relation, &targets) {
            Some(found) => {
                let human = format!("Connection found to {found}");
                (
                    ConnectedResult {
                        connected: true,
                        sense_id: None,
                        target_id: Some(found),
                    },
                    human,
                )
            }
            None => (
                ConnectedResult {
                    connected: false,
                    sense_id: None,
                    target_id: None,
                },
                "No connection found".to_string(),
            ),
        }
    } else {
        match wn.is_literal_connected_with(&args.term, pos, &args.relation, &targets) {
            Some((sense_id, target_id)) => {
                let human = format!(
                    "Connection found:\nSense of literal: {sense_id}\nTarget id: {target_id}"
                );
                (
                    ConnectedResult {
                        connected: true,
                        sense_id: Some(sense_id),
                        target_id: Some(target_id),
                    },
                    human,
                )
            }
            None => (
                ConnectedResult {
                    connected: false,
                    sense_id: None,
                    target_id: None,
                },
                "No connection found".to_string(),
            ),
        }
    };
    output_result(&human, &result, cli_args)
}

/// Literal/synset compatibility check.
fn compatible(wn: &WnQuery, args: CompatibleArgs, cli_args: &WnQueryArgs) -> Result<()> {
    let pos: PartOfSpeech = args.pos.parse()?;
    let is_compatible =
        wn.is_literal_compatible_with_synset(&args.literal, pos, &args.synset_id, args.hyponyms);
    let human = if is_compatible { "Compatible" } else { "Not compatible" };
    output_result(
        human,
        &CompatibleResult {
            compatible: is_compatible,
        },
        cli_args,
    )
}

/// Synonymy check.
fn synonyms(wn: &WnQuery, args: SynonymsArgs, cli_args: &WnQueryArgs) -> Result<()> {
    let pos: PartOfSpeech = args.pos.parse()?;
    let shared = wn.are_synonyms(&args.literal1, &args.literal2, pos);
    let human = match &shared {
        Some(id) => format!("Synonyms (shared synset {id})"),
        None => "Not synonyms".to_string(),
    };
    output_result(
        &human,
        &SynonymsResult {
            synonyms: shared.is_some(),
            synset_id: shared,
        },
        cli_args,
    )
}

/// Leacock-Chodorow similarity of all sense pairs.
fn similarity(wn: &WnQuery, args: SimilarityArgs, cli_args: &WnQueryArgs) -> Result<()> {
    let pos: PartOfSpeech = args.pos.parse()?;
    let scores = wn.similarity_leacock_chodorow(
        &args.literal1,
        &args.literal2,
        pos,
        &args.relation,
        args.top,
    );
    let human = render_scores(&scores);
    output_result(&human, &SimilarityResults { scores }, cli_args)
}

/// Per-partition statistics.
fn stats(wn: &WnQuery, cli_args: &WnQueryArgs) -> Result<()> {
    let partitions = wn.stats();
    let human = render_stats(&partitions);
    output_result(&human, &StatsResults { partitions }, cli_args)
}

/// Compact one-line rendering of a synset by id, or the bare id if it is
/// not in the store (a dangling relation target).
pub(crate) fn synset_line(wn: &WnQuery, id: &str, pos: PartOfSpeech) -> String {
    match wn.look_up_id(id, pos) {
        Some(syns) => syns.to_compact_line(),
        None => id.to_string(),
    }
}
