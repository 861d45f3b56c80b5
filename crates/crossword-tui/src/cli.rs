use crate::session::SolveRequest;
use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;

pub const DEFAULT_STRUCTURE: &str = "data/structure0.txt";
pub const DEFAULT_WORDS: &str = "data/words0.txt";

/// Solve crossword puzzles from a terminal form
#[derive(Debug, Parser)]
#[command(name = "crossword", version, about)]
pub struct Cli {
    /// Structure file: `_` marks an open cell, anything else is blocked
    #[arg(long, value_name = "PATH", default_value = DEFAULT_STRUCTURE)]
    pub structure: PathBuf,

    /// Words file: one candidate word per line
    #[arg(long, value_name = "PATH", default_value = DEFAULT_WORDS)]
    pub words: PathBuf,

    /// Write the solved grid to this image file
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Log verbosity (off, error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL", default_value = "info", value_parser = parse_level)]
    pub log_level: LevelFilter,

    /// Start solving as soon as the form opens
    #[arg(long)]
    pub solve: bool,
}

impl Cli {
    /// Form contents to start with
    pub fn request(&self) -> SolveRequest {
        SolveRequest {
            structure_path: self.structure.clone(),
            words_path: self.words.clone(),
            output_path: self.output.clone(),
        }
    }
}

fn parse_level(s: &str) -> Result<LevelFilter, String> {
    s.parse()
        .map_err(|_| format!("unknown log level `{}`", s))
}
