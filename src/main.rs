//! dirwatch CLI - directory watcher with a single IO thread
//!
//! Usage: dirwatch <COMMAND>
//!
//! Commands:
//!   watch   Watch directories and print changes until Ctrl+C
//!   tree    Print the file tree under a root
//!   touch   Create a new, empty file
//!   mkdir   Create a directory

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = commands::load_config(cli.config.as_deref(), cli.json)?;

    match cli.command {
        Commands::Watch { dirs } => commands::watch::cmd_watch(&dirs, &config, cli.json),
        Commands::Tree { root } => commands::tree::cmd_tree(&root, &config, cli.json),
        Commands::Touch { file, mode } => commands::create::cmd_touch(&file, mode, &config, cli.json),
        Commands::Mkdir { dir, parents, mode } => {
            commands::create::cmd_mkdir(&dir, parents, mode, &config, cli.json)
        }
    }
}

/// `RUST_LOG` wins over `-v`
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_millis()
        .init();
}
