mod cli;
mod config;
mod convert;
mod decompose_cmd;
mod engine;
mod logging;
mod report;
mod roundtrip_cmd;
mod synopsis_cmd;
mod synthetic;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Decompose(args) => decompose_cmd::run(args),
        Command::Roundtrip(args) => roundtrip_cmd::run(args),
        Command::Synopsis(args) => synopsis_cmd::run(args),
    }
}
