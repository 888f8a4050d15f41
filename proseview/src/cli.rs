use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "proseview",
    version,
    about = "Read chapters of web fiction saved as HTML in the terminal.",
    long_about = None
)]
pub struct Cli {
    /// Chapter files in reading order
    #[arg(name = "FILES", required_unless_present_any = ["history", "resume"])]
    pub files: Vec<PathBuf>,

    /// Title shown above the text (defaults to the folder name)
    #[arg(short, long)]
    pub title: Option<String>,

    /// Open this chapter (1-based) straight away
    #[arg(short, long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    pub start: Option<u64>,

    /// Element id holding the chapter text
    #[arg(long, value_name = "ID")]
    pub marker: Option<String>,

    /// Class substring to fall back on when no element has the id (repeatable)
    #[arg(long = "class", value_name = "SUBSTR")]
    pub classes: Vec<String>,

    /// Wrap width used by --dump
    #[arg(short, long, value_name = "COLS", default_value_t = 80)]
    pub width: u16,

    /// Print the wrapped chapter to stdout instead of opening the reader
    #[arg(short, long)]
    pub dump: bool,

    /// Print reading history
    #[arg(short = 'r', long)]
    pub history: bool,

    /// Reopen entry N of the reading history (see --history)
    #[arg(
        short = 'R',
        long,
        value_name = "N",
        value_parser = clap::value_parser!(u64).range(1..),
        conflicts_with_all = ["FILES", "history"]
    )]
    pub resume: Option<u64>,

    /// Use a specific configuration file
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Zero-based index of the chapter to open first.
    pub fn start_index(&self) -> Option<usize> {
        self.start.map(|n| n.saturating_sub(1) as usize)
    }
}
