//! wnquery CLI binary.

use anyhow::Context;
use clap::Parser;
use std::process;
use wnquery::cli::{args::WnQueryArgs, commands::execute_command};

fn main() {
    let args = WnQueryArgs::parse();
    let wn_file = args.wn_file.clone();

    if let Err(e) = execute_command(args).with_context(|| format!("querying {}", wn_file.display()))
    {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
