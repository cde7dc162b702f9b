pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "quran-tools")]
#[command(about = "Quranic grammar (e'arab) and morphology (sarf) lookup", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/quran-tools/config.toml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all chapters
    Chapters,
    /// Show the grammatical analysis of a verse
    Earab {
        /// Chapter number (1-114)
        chapter: u32,
        /// Verse number within the chapter
        verse: u32,
        /// Also open the source page in the browser
        #[arg(long)]
        open: bool,
    },
    /// Show the Arabic text and translations of a verse
    Translate {
        /// Chapter number (1-114)
        chapter: u32,
        /// Verse number within the chapter
        verse: u32,
    },
    /// Show the morphological analysis of a word
    Sarf {
        /// Arabic word to look up
        word: String,
    },
}
