//! The interactive query shell.
//!
//! Reads dot-commands from standard input, one per line, and prints results
//! to standard output. Prompts and load-time chatter go to standard error so
//! the output stream stays clean for piping. An invalid part-of-speech in a
//! query is reported and the loop continues; only `.q` or end of input ends
//! the session.

use std::collections::HashSet;
use std::io::{self, BufRead, Write};

use crate::cli::args::WnQueryArgs;
use crate::cli::commands::synset_line;
use crate::cli::output::{render_scores, render_stats};
use crate::error::Result;
use crate::pos::{ALL_POS, PartOfSpeech};
use crate::query::{WnQuery, parse_sense_number};

const HELP: &str = "Available commands:\n\
.h                                               this help\n\
.q                                               quit\n\
.i   <id> <pos>                                  look up synset id in given POS (n,v,a,b)\n\
.l   <literal>                                   look up all synsets containing literal in all POS\n\
.l   <literal> <pos>                             look up all synsets containing literal in given POS\n\
.l   <literal> <sensenum> <pos>                  look up synset containing literal with given sense number in given POS\n\
.rl  <literal> <pos>                             list known relations of all senses of literal in POS\n\
.rl  <literal> <pos> <relation>                  look up relation of all senses of literal, list target synsets\n\
.ri  <id> <pos> <relation>                       look up relation of synset with id and POS, list target synsets\n\
.ti  <id> <pos> <relation>                       trace relations of synset with id and POS\n\
.tl  <literal> <pos> <relation>                  trace relations of all senses of literal in POS\n\
.ci  <id> <pos> <relation> <id1> [<id2>...]      check if any of id1,id2,... is reachable from id by following relation\n\
.cl  <literal> <pos> <relation> <id1> [<id2>...] check if any of id1,id2,... is reachable from any sense of literal\n\
.cli <literal> <pos> <id> [hyponyms]             check if synset contains literal, or if \"hyponyms\" is added, any of its hyponyms\n\
.slc <literal1> <literal2> <pos> <relation> [top] calculate Leacock-Chodorow similarity for all senses of literals\n\
                                                 if 'top' is added, an artificial root node is added to relation paths\n";

/// Run the interactive loop until `.q` or end of input.
pub fn run_shell(wn: &WnQuery, args: &WnQueryArgs) -> Result<()> {
    if args.verbosity() > 0 {
        eprintln!("{}", render_stats(&wn.stats()));
        eprintln!("Type your query, or .h for help, .q to quit");
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut line = String::new();
    loop {
        eprint!(">");
        io::stderr().flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let query = line.trim();
        if query == ".q" {
            break;
        }
        if query.is_empty() {
            continue;
        }
        match process_query(wn, query) {
            Ok(text) => println!("{text}\n"),
            // Bad part-of-speech (or similar request faults) fail only this
            // query, not the session.
            Err(e) => eprintln!("{e}"),
        }
    }
    Ok(())
}

/// Execute one dot-command and render its result.
pub fn process_query(wn: &WnQuery, query: &str) -> Result<String> {
    let t: Vec<&str> = query.split_whitespace().collect();
    let Some(&command) = t.first() else {
        return Ok(String::new());
    };

    match command {
        ".h" => Ok(HELP.to_string()),

        ".i" => {
            if t.len() != 3 {
                return Ok("Incorrect format for command .i".to_string());
            }
            let pos: PartOfSpeech = t[2].parse()?;
            Ok(match wn.look_up_id(t[1], pos) {
                Some(syns) => syns.to_compact_line(),
                None => "Synset not found".to_string(),
            })
        }

        ".l" => match t.len() {
            2 => {
                let mut lines = Vec::new();
                for pos in ALL_POS {
                    for syns in wn.look_up_literal(t[1], pos) {
                        lines.push(syns.to_compact_line());
                    }
                }
                Ok(if lines.is_empty() {
                    "Literal not found".to_string()
                } else {
                    lines.join("\n")
                })
            }
            3 => {
                let pos: PartOfSpeech = t[2].parse()?;
                let found = wn.look_up_literal(t[1], pos);
                Ok(if found.is_empty() {
                    "Literal not found".to_string()
                } else {
                    found
                        .iter()
                        .map(|s| s.to_compact_line())
                        .collect::<Vec<_>>()
                        .join("\n")
                })
            }
            4 => {
                let pos: PartOfSpeech = t[3].parse()?;
                Ok(
                    match wn.look_up_sense(t[1], parse_sense_number(t[2]), pos) {
                        Some(syns) => syns.to_compact_line(),
                        None => "Word sense not found".to_string(),
                    },
                )
            }
            _ => Ok("Incorrect format for command .l".to_string()),
        },

        ".rl" => match t.len() {
            3 => {
                let pos: PartOfSpeech = t[2].parse()?;
                let senses = wn.look_up_literal(t[1], pos);
                if senses.is_empty() {
                    return Ok("Literal not found".to_string());
                }
                let mut lines = Vec::new();
                for syns in senses {
                    lines.push(syns.to_compact_line());
                    let mut seen = HashSet::new();
                    for ptr in &syns.ilrs {
                        if seen.insert(ptr.rtype.as_str()) {
                            lines.push(format!("  {}", ptr.rtype));
                        }
                    }
                }
                Ok(lines.join("\n"))
            }
            4 => {
                let pos: PartOfSpeech = t[2].parse()?;
                let sense_ids = wn.look_up_literal_ids(t[1], pos);
                if sense_ids.is_empty() {
                    return Ok("Literal not found".to_string());
                }
                let mut lines = Vec::new();
                for id in sense_ids {
                    lines.push(synset_line(wn, id, pos));
                    for target in wn.look_up_relation(id, pos, t[3]) {
                        lines.push(format!("  {}", synset_line(wn, &target, pos)));
                    }
                }
                Ok(lines.join("\n"))
            }
            _ => Ok("Incorrect format for command .rl".to_string()),
        },

        ".ri" => {
            if t.len() != 4 {
                return Ok("Incorrect format for command .ri".to_string());
            }
            let pos: PartOfSpeech = t[2].parse()?;
            let targets = wn.look_up_relation(t[1], pos, t[3]);
            Ok(if targets.is_empty() {
                "Synset not found or has no relations of the specified type".to_string()
            } else {
                targets
                    .iter()
                    .map(|id| synset_line(wn, id, pos))
                    .collect::<Vec<_>>()
                    .join("\n")
            })
        }

        ".ti" => {
            if t.len() != 4 {
                return Ok("Incorrect format for command .ti".to_string());
            }
            let pos: PartOfSpeech = t[2].parse()?;
            let rendered = wn.trace_relation_formatted(t[1], pos, t[3]);
            Ok(if rendered.is_empty() {
                "Synset not found".to_string()
            } else {
                rendered.trim_end_matches('\n').to_string()
            })
        }

        ".tl" => {
            if t.len() != 4 {
                return Ok("Incorrect format for command .tl".to_string());
            }
            let pos: PartOfSpeech = t[2].parse()?;
            let sense_ids = wn.look_up_literal_ids(t[1], pos);
            if sense_ids.is_empty() {
                return Ok("Literal not found".to_string());
            }
            let mut out = String::new();
            for id in sense_ids {
                out.push_str(&wn.trace_relation_formatted(id, pos, t[3]));
            }
            Ok(out.trim_end_matches('\n').to_string())
        }

        ".ci" => {
            if t.len() < 5 {
                return Ok("Incorrect format for command .ci".to_string());
            }
            let pos: PartOfSpeech = t[2].parse()?;
            let targets: HashSet<String> = t[4..].iter().map(|s| s.to_string()).collect();
            Ok(match wn.is_id_connected_with(t[1], pos, t[3], &targets) {
                Some(found) => format!("Connection found to {found}"),
                None => "No connection found".to_string(),
            })
        }

        ".cl" => {
            if t.len() < 5 {
                return Ok("Incorrect format for command .cl".to_string());
            }
            let pos: PartOfSpeech = t[2].parse()?;
            let targets: HashSet<String> = t[4..].iter().map(|s| s.to_string()).collect();
            Ok(
                match wn.is_literal_connected_with(t[1], pos, t[3], &targets) {
                    Some((sense_id, target_id)) => format!(
                        "Connection found:\nSense of literal: {sense_id}\nTarget id: {target_id}"
                    ),
                    None => "No connection found".to_string(),
                },
            )
        }

        ".cli" => {
            if (t.len() != 4 && t.len() != 5) || (t.len() == 5 && t[4] != "hyponyms") {
                return Ok("Incorrect format for command .cli".to_string());
            }
            let pos: PartOfSpeech = t[2].parse()?;
            let hyponyms = t.len() == 5;
            Ok(
                if wn.is_literal_compatible_with_synset(t[1], pos, t[3], hyponyms) {
                    "Compatible".to_string()
                } else {
                    "Not compatible".to_string()
                },
            )
        }

        ".slc" => {
            if (t.len() != 5 && t.len() != 6) || (t.len() == 6 && t[5] != "top") {
                return Ok("Incorrect format for command .slc".to_string());
            }
            let pos: PartOfSpeech = t[3].parse()?;
            let add_top = t.len() == 6;
            let scores = wn.similarity_leacock_chodorow(t[1], t[2], pos, t[4], add_top);
            Ok(render_scores(&scores))
        }

        _ => Ok("Unknown command".to_string()),
    }
}
