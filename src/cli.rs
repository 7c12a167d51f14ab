use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "akkordy")]
#[command(author, version, about = "Telegram bot that recognizes songs and finds chords for them", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the Telegram bot (long polling)
    Run,

    /// Resolve a song against the chord catalog and print the sheet
    Resolve {
        /// Artist as a recognizer would report it
        #[arg(short, long)]
        artist: String,

        /// Song title
        #[arg(short, long)]
        title: String,

        /// ISRC code, enables the English-market policy
        #[arg(long)]
        isrc: Option<String>,

        /// Also ask for performance tips
        #[arg(long)]
        tips: bool,
    },

    /// Recognize an audio file and look up its chords
    Recognize {
        /// Path to the audio clip
        file: PathBuf,
    },

    /// Normalize a raw chord block read from a file ("-" for stdin)
    Normalize {
        file: PathBuf,

        /// Chords the page declares, comma separated
        #[arg(short, long, value_delimiter = ',')]
        chords: Vec<String>,
    },

    /// Show what the transliteration heuristics make of a Latin string
    Translit {
        text: String,

        /// Use the ending-aware converter
        #[arg(long)]
        improved: bool,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
