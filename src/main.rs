mod cli;
mod commands;
mod config;
mod report;
mod ui;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use cli::{Cli, Command};
use std::io;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(if cli.quiet {
            log::LevelFilter::Error
        } else {
            log_level
        })
        .format_timestamp(None)
        .init();

    // Loaded once, immutable for the rest of the run.
    let table = config::load_table(cli.config.as_deref())?;

    match cli.command {
        Command::Resolve(args) => commands::resolve::run(&table, &args),
        Command::Plan(args) => commands::plan::run(&table, &args),
        Command::Apply(args) => commands::apply::run(&table, &args),
        Command::Policies => commands::policies::run(&table),
        Command::Batch(args) => commands::batch::run(&table, &args),
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "jconverge", &mut io::stdout());
            Ok(())
        }
    }
}
