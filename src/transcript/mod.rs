use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::extractors::VideoId;
use crate::{Result, TranscriptError};

pub mod youtube;

/// One caption unit with its timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptEntry {
    /// Caption text
    pub text: String,

    /// Start offset in seconds
    pub start: f64,

    /// Display duration in seconds
    pub duration: f64,
}

/// A fetched transcript: detected language plus the ordered caption entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    /// Language code of the caption track that was used
    pub language: String,

    /// Caption entries in original order
    pub entries: Vec<TranscriptEntry>,
}

impl Transcript {
    /// Newline-joined plain-text rendering of all entries in original order.
    pub fn text(&self) -> String {
        self.entries
            .iter()
            .map(|entry| entry.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Trait for transcript providers
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Fetch the transcript for a video, honoring the language preference order.
    async fn fetch(&self, id: &VideoId, languages: &[String]) -> Result<Transcript>;
}

/// Fetch pipeline: a single service call plus coarse error classification.
pub struct TranscriptPipeline {
    source: Box<dyn TranscriptSource>,
    languages: Vec<String>,
}

impl TranscriptPipeline {
    /// Create a pipeline backed by the YouTube caption service.
    pub fn new(config: &Config, languages: Option<Vec<String>>) -> Self {
        Self::with_source(
            Box::new(youtube::YouTubeSource::new()),
            languages.unwrap_or_else(|| config.languages.clone()),
        )
    }

    /// Create a pipeline with an explicit source, used by tests.
    pub fn with_source(source: Box<dyn TranscriptSource>, languages: Vec<String>) -> Self {
        Self { source, languages }
    }

    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    /// Fetch the transcript for a video.
    ///
    /// Any failure whose message mentions "transcript" is collapsed into the
    /// fixed no-transcript-available error; every other failure passes
    /// through unmodified.
    pub async fn fetch_for(&self, id: &VideoId) -> Result<Transcript> {
        match self.source.fetch(id, &self.languages).await {
            Ok(transcript) => Ok(transcript),
            Err(err) if err.to_string().to_lowercase().contains("transcript") => {
                Err(TranscriptError::NoTranscript.into())
            }
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::extract_video_id;

    fn sample_id() -> VideoId {
        extract_video_id("dQw4w9WgXcQ").unwrap()
    }

    fn sample_transcript() -> Transcript {
        Transcript {
            language: "en".to_string(),
            entries: vec![
                TranscriptEntry {
                    text: "first line".to_string(),
                    start: 0.0,
                    duration: 1.5,
                },
                TranscriptEntry {
                    text: "second line".to_string(),
                    start: 1.5,
                    duration: 2.0,
                },
            ],
        }
    }

    #[test]
    fn test_text_joins_entries_in_order() {
        assert_eq!(sample_transcript().text(), "first line\nsecond line");
    }

    #[tokio::test]
    async fn test_fetch_for_returns_transcript() {
        let mut source = MockTranscriptSource::new();
        source
            .expect_fetch()
            .returning(|_, _| Ok(sample_transcript()));

        let pipeline = TranscriptPipeline::with_source(Box::new(source), vec!["en".to_string()]);
        let transcript = pipeline.fetch_for(&sample_id()).await.unwrap();
        assert_eq!(transcript.language, "en");
        assert_eq!(transcript.entries.len(), 2);
    }

    #[tokio::test]
    async fn test_transcript_errors_collapse_to_not_available() {
        let mut source = MockTranscriptSource::new();
        source.expect_fetch().returning(|_, _| {
            Err(anyhow::anyhow!(
                "Could not retrieve a Transcript for the video"
            ))
        });

        let pipeline = TranscriptPipeline::with_source(Box::new(source), vec!["en".to_string()]);
        let err = pipeline.fetch_for(&sample_id()).await.unwrap_err();
        assert_eq!(err.to_string(), "No transcript available for this video");
    }

    #[tokio::test]
    async fn test_service_errors_keep_their_message() {
        let mut source = MockTranscriptSource::new();
        source.expect_fetch().returning(|_, _| {
            Err(TranscriptError::FetchFailed("HTTP 503 from watch page".to_string()).into())
        });

        let pipeline = TranscriptPipeline::with_source(Box::new(source), vec!["en".to_string()]);
        let err = pipeline.fetch_for(&sample_id()).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Caption service error: HTTP 503 from watch page"
        );
    }

    #[tokio::test]
    async fn test_other_errors_pass_through_unmodified() {
        let mut source = MockTranscriptSource::new();
        source
            .expect_fetch()
            .returning(|_, _| Err(anyhow::anyhow!("connection reset by peer")));

        let pipeline = TranscriptPipeline::with_source(Box::new(source), vec!["en".to_string()]);
        let err = pipeline.fetch_for(&sample_id()).await.unwrap_err();
        assert_eq!(err.to_string(), "connection reset by peer");
    }
}
