//! YouTube Transcript - A Rust CLI tool for fetching video transcripts
//!
//! This library provides functionality to extract a video identifier from a
//! YouTube URL, fetch the caption transcript for it, and route the text to
//! the console, the system clipboard, or a Markdown note in an Obsidian vault.

pub mod cli;
pub mod config;
pub mod extractors;
pub mod output;
pub mod transcript;
pub mod utils;

pub use cli::Cli;
pub use config::Config;
pub use extractors::{extract_video_id, VideoId};
pub use transcript::{Transcript, TranscriptEntry, TranscriptPipeline, TranscriptSource};

/// Result type used throughout the library
pub type Result<T> = anyhow::Result<T>;

/// Error types specific to the transcript tool
#[derive(thiserror::Error, Debug)]
pub enum TranscriptError {
    #[error("Unrecognized YouTube URL or video id: {0}")]
    InvalidUrl(String),

    #[error("No transcript available for this video")]
    NoTranscript,

    #[error("Caption service error: {0}")]
    FetchFailed(String),

    #[error("Clipboard copy failed: {0}")]
    ClipboardFailed(String),

    #[error("Note save failed: {0}")]
    SaveFailed(String),
}
