use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Matchers for the supported URL shapes, tried in order; first match wins.
static URL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?:youtube\.com/watch\?v=|youtu\.be/)([^&\n?#]+)").unwrap(),
        Regex::new(r"youtube\.com/embed/([^&\n?#]+)").unwrap(),
        Regex::new(r"youtube\.com/v/([^&\n?#]+)").unwrap(),
    ]
});

static BARE_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{11}$").unwrap());

/// An 11-character YouTube video identifier, fixed once extracted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoId(String);

impl VideoId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical watch URL for this video.
    pub fn watch_url(&self) -> String {
        format!("https://youtube.com/watch?v={}", self.0)
    }
}

impl std::fmt::Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Derive a video identifier from a URL or bare identifier string.
///
/// Tries the `watch?v=`, `youtu.be/`, `/embed/` and `/v/` forms in order.
/// A string that already satisfies the 11-character token shape is accepted
/// verbatim. Anything else yields `None`.
pub fn extract_video_id(input: &str) -> Option<VideoId> {
    for pattern in URL_PATTERNS.iter() {
        if let Some(captures) = pattern.captures(input) {
            return Some(VideoId(captures[1].to_string()));
        }
    }

    if BARE_ID.is_match(input) {
        return Some(VideoId(input.to_string()));
    }

    None
}
