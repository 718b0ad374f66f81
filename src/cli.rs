use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// dirwatch - watch directories and create entries through a single IO thread
#[derive(Parser, Debug)]
#[command(name = "dirwatch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output NDJSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (defaults to ~/.config/dirwatch/config.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Watch directories and print changes until Ctrl+C
    Watch {
        /// Directories to watch
        #[arg(required = true, value_name = "DIR")]
        dirs: Vec<PathBuf>,
    },

    /// Print the file tree under a root
    Tree {
        /// Root of the enumeration
        #[arg(value_name = "ROOT")]
        root: PathBuf,
    },

    /// Create a new, empty file
    Touch {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Permission bits, in octal (unix only)
        #[arg(long, value_parser = parse_mode)]
        mode: Option<u32>,
    },

    /// Create a directory
    Mkdir {
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        /// Create missing parents; an existing directory is not an error
        #[arg(short, long)]
        parents: bool,

        /// Permission bits, in octal (unix only)
        #[arg(long, value_parser = parse_mode)]
        mode: Option<u32>,
    },
}

fn parse_mode(value: &str) -> Result<u32, String> {
    let digits = value.trim_start_matches("0o");
    u32::from_str_radix(digits, 8)
        .ok()
        .filter(|mode| *mode <= 0o7777)
        .ok_or_else(|| format!("invalid octal mode '{}'", value))
}
