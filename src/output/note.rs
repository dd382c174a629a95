use std::path::PathBuf;

use crate::extractors::VideoId;
use crate::utils::slugify_title;
use crate::{Result, TranscriptError};

/// Subdirectory of the vault that receives transcript notes.
const NOTES_SUBDIR: &str = "content/videos";

/// Writes transcript notes with YAML front matter into an Obsidian vault.
pub struct NoteWriter {
    vault_root: PathBuf,
}

impl NoteWriter {
    pub fn new(vault_root: impl Into<PathBuf>) -> Self {
        Self {
            vault_root: vault_root.into(),
        }
    }

    /// Deterministic note filename: slugified title (the id stands in when no
    /// title was given) joined with the video id.
    pub fn note_filename(&self, id: &VideoId, title: Option<&str>) -> String {
        let slug = slugify_title(title.unwrap_or(id.as_str()));
        format!("{}-{}.md", slug, id)
    }

    /// Write the note, overwriting any existing file at the same path.
    pub fn save(
        &self,
        id: &VideoId,
        transcript_text: &str,
        title: Option<&str>,
        tags: &[String],
        source_url: Option<&str>,
    ) -> Result<PathBuf> {
        let notes_dir = self.vault_root.join(NOTES_SUBDIR);
        fs_err::create_dir_all(&notes_dir).map_err(|e| TranscriptError::SaveFailed(e.to_string()))?;

        let path = notes_dir.join(self.note_filename(id, title));
        tracing::debug!("Writing note to {}", path.display());

        let content = render_note(id, transcript_text, title, tags, source_url);
        fs_err::write(&path, content).map_err(|e| TranscriptError::SaveFailed(e.to_string()))?;

        Ok(path)
    }
}

/// Front-matter block followed by the raw transcript body.
fn render_note(
    id: &VideoId,
    transcript_text: &str,
    title: Option<&str>,
    tags: &[String],
    source_url: Option<&str>,
) -> String {
    let date = chrono::Local::now().format("%Y-%m-%d");
    let url = source_url
        .map(str::to_string)
        .unwrap_or_else(|| id.watch_url());

    let mut lines = vec![
        "---".to_string(),
        format!("title: \"{}\"", title.unwrap_or("Untitled")),
        format!("video_id: {}", id),
        format!("date: {}", date),
        format!("url: {}", url),
    ];

    if !tags.is_empty() {
        lines.push(format!("tags: [{}]", tags.join(", ")));
    }

    lines.push("---".to_string());
    lines.push(String::new());

    format!("{}\n{}", lines.join("\n"), transcript_text)
}
