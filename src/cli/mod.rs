use clap::Parser;
use std::path::PathBuf;

use crate::utils::split_csv;

#[derive(Parser, Debug)]
#[command(
    name = "yt",
    about = "Fetch YouTube transcripts and send them to the console, clipboard, or an Obsidian vault",
    version,
    long_about = "A CLI tool for fetching the caption transcript of a YouTube video. \
By default the transcript is printed to the console; it can instead be copied to \
the clipboard or saved as a Markdown note with YAML front matter in an Obsidian vault."
)]
pub struct Cli {
    /// YouTube URL or bare 11-character video id
    #[arg(value_name = "URL_OR_ID")]
    pub url: String,

    /// Copy the transcript to the clipboard
    #[arg(short = 'c', long)]
    pub copy: bool,

    /// Save the transcript as a note in the Obsidian vault
    #[arg(short = 's', long)]
    pub save: bool,

    /// Video title, used for the note front matter and filename
    #[arg(short = 't', long, value_name = "TITLE")]
    pub title: Option<String>,

    /// Comma-separated tags for the note front matter
    #[arg(long, value_name = "TAGS")]
    pub tags: Option<String>,

    /// Comma-separated language preference order (defaults to the configured list)
    #[arg(short = 'l', long, value_name = "LANGS")]
    pub languages: Option<String>,

    /// Obsidian vault root for saved notes (defaults to the configured path)
    #[arg(short = 'o', long, value_name = "DIR", env = "YT_OBSIDIAN_PATH")]
    pub obsidian_path: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress progress indicators and status lines
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Parsed `--tags` list; empty when the flag was not given.
    pub fn tag_list(&self) -> Vec<String> {
        self.tags.as_deref().map(split_csv).unwrap_or_default()
    }

    /// Parsed `--languages` preference order, if given.
    pub fn language_list(&self) -> Option<Vec<String>> {
        self.languages.as_deref().map(split_csv)
    }
}
