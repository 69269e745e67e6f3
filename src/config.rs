use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

pub const DEFAULT_OUTPUT: &str = "encoded_text.bin";
pub const ARCHIVE_EXT: &str = "hpk";

#[derive(Parser, Debug)]
#[command(name = "huffpack", version = "0.1.0")]
#[command(about = "Huffman-code a text and decode it back.", long_about = None)]
pub struct Cli {
    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Encode, store the raw bytes, read them back and decode
    Run {
        /// Input text file, or - for stdin
        input: String,
        #[arg(short, long, default_value = DEFAULT_OUTPUT)]
        output: PathBuf,
        /// Print compression figures after the round trip
        #[arg(long)]
        stats: bool,
    },
    /// Encode a text into an archive that can be decoded later
    Encode {
        input: String,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Decode an archive (stdout unless -o is given)
    Decode {
        archive: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the code table of a text
    Codes {
        input: String,
        /// Also print the tree outline
        #[arg(long)]
        tree: bool,
    },
    /// Show archive metadata without decoding
    Inspect { archive: PathBuf },
}

/// `notes.txt` -> `notes.hpk`; stdin input falls back to `stdin.hpk`.
pub fn default_archive_path(input: &str) -> PathBuf {
    if input == "-" {
        return PathBuf::from(format!("stdin.{ARCHIVE_EXT}"));
    }
    PathBuf::from(input).with_extension(ARCHIVE_EXT)
}
