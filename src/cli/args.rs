//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, ValueHint};
use clap_complete::Shell;

/// Interactive ancestry tree: add offspring, find, print, size and height queries
#[derive(Parser, Debug)]
#[command(name = "offspring")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Family file to load: `parent, child1, child2, ...` per line
    #[arg(value_hint = ValueHint::FilePath)]
    pub file: Option<PathBuf>,

    /// Config file (default: $XDG_CONFIG_HOME/offspring/offspring.toml)
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Debug output, repeat for more (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Generate shell completions and exit
    #[arg(long = "completions", value_enum)]
    pub generator: Option<Shell>,

    /// Show author and version
    #[arg(long)]
    pub info: bool,
}
