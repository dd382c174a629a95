use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use super::{Transcript, TranscriptEntry, TranscriptSource};
use crate::extractors::VideoId;
use crate::{Result, TranscriptError};

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

static CAPTION_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)<text start="([0-9.]+)" dur="([0-9.]+)"[^>]*>(.*?)</text>"#).unwrap()
});

/// One track from the caption list embedded in the watch page.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionTrack {
    base_url: String,
    language_code: String,
}

/// Transcript source backed by YouTube's caption endpoints.
///
/// The watch page embeds a player response whose `captionTracks` array lists
/// the timedtext URL for every available track; fetching a track returns
/// simple XML `<text>` elements.
pub struct YouTubeSource {
    client: Client,
}

impl YouTubeSource {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    async fn fetch_watch_page(&self, id: &VideoId) -> Result<String> {
        let url = format!("https://www.youtube.com/watch?v={}", id);
        tracing::debug!("Fetching watch page: {}", url);

        let response = self
            .client
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .header("Accept-Language", "en-US")
            // Skips the EU consent interstitial, which hides the player response
            .header("Cookie", "CONSENT=YES+1")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(TranscriptError::FetchFailed(format!(
                "HTTP {} from watch page",
                response.status()
            ))
            .into());
        }

        Ok(response.text().await?)
    }

    /// Pull the `captionTracks` array out of the embedded player response.
    fn parse_caption_tracks(html: &str) -> Result<Vec<CaptionTrack>> {
        let marker = "\"captionTracks\":";
        let start = html.find(marker).ok_or(TranscriptError::NoTranscript)?;

        // The array is a prefix of the remaining page; serde_json stops at
        // the first complete JSON value.
        let mut deserializer = serde_json::Deserializer::from_str(&html[start + marker.len()..]);
        let tracks: Vec<CaptionTrack> = Deserialize::deserialize(&mut deserializer)
            .map_err(|e| TranscriptError::FetchFailed(format!("malformed caption track list: {}", e)))?;

        if tracks.is_empty() {
            return Err(TranscriptError::NoTranscript.into());
        }

        Ok(tracks)
    }

    /// First track matching the preference order, else the first track the
    /// video offers.
    fn select_track<'a>(tracks: &'a [CaptionTrack], languages: &[String]) -> &'a CaptionTrack {
        for lang in languages {
            let match_prefix = format!("{}-", lang);
            if let Some(track) = tracks
                .iter()
                .find(|t| t.language_code == *lang || t.language_code.starts_with(&match_prefix))
            {
                return track;
            }
        }
        &tracks[0]
    }

    async fn fetch_track(&self, track: &CaptionTrack) -> Result<Vec<TranscriptEntry>> {
        let url = Url::parse(&track.base_url).map_err(|_| {
            TranscriptError::FetchFailed(format!("invalid caption track URL: {}", track.base_url))
        })?;

        let response = self
            .client
            .get(url)
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(TranscriptError::FetchFailed(format!(
                "HTTP {} from caption endpoint",
                response.status()
            ))
            .into());
        }

        let body = response.text().await?;
        Ok(Self::parse_timedtext(&body))
    }

    fn parse_timedtext(xml: &str) -> Vec<TranscriptEntry> {
        CAPTION_LINE
            .captures_iter(xml)
            .filter_map(|caps| {
                let start: f64 = caps[1].parse().ok()?;
                let duration: f64 = caps[2].parse().ok()?;
                Some(TranscriptEntry {
                    text: unescape_entities(&caps[3]),
                    start,
                    duration,
                })
            })
            .collect()
    }
}

#[async_trait]
impl TranscriptSource for YouTubeSource {
    async fn fetch(&self, id: &VideoId, languages: &[String]) -> Result<Transcript> {
        let html = self.fetch_watch_page(id).await?;
        let tracks = Self::parse_caption_tracks(&html)?;

        let track = Self::select_track(&tracks, languages);
        tracing::debug!("Selected caption track: {}", track.language_code);

        let entries = self.fetch_track(track).await?;
        if entries.is_empty() {
            return Err(TranscriptError::NoTranscript.into());
        }

        Ok(Transcript {
            language: track.language_code.clone(),
            entries,
        })
    }
}

impl Default for YouTubeSource {
    fn default() -> Self {
        Self::new()
    }
}

/// Timedtext payloads escape a small fixed set of entities.
fn unescape_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(lang: &str) -> CaptionTrack {
        CaptionTrack {
            base_url: format!("https://www.youtube.com/api/timedtext?lang={}", lang),
            language_code: lang.to_string(),
        }
    }

    #[test]
    fn test_parse_caption_tracks_from_player_response() {
        let html = r#"<script>var ytInitialPlayerResponse = {"captions":{"playerCaptionsTracklistRenderer":{"captionTracks":[{"baseUrl":"https://www.youtube.com/api/timedtext?v=abc&lang=en","name":{"simpleText":"English"},"vssId":".en","languageCode":"en","isTranslatable":true}]}}};</script>"#;
        let tracks = YouTubeSource::parse_caption_tracks(html).unwrap();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].language_code, "en");
        assert_eq!(
            tracks[0].base_url,
            "https://www.youtube.com/api/timedtext?v=abc&lang=en"
        );
    }

    #[test]
    fn test_missing_caption_tracks_means_no_transcript() {
        let err = YouTubeSource::parse_caption_tracks("<html>no captions here</html>").unwrap_err();
        assert_eq!(err.to_string(), "No transcript available for this video");
    }

    #[test]
    fn test_select_track_honors_preference_order() {
        let tracks = vec![track("de"), track("en"), track("fr")];
        let selected = YouTubeSource::select_track(&tracks, &["fr".to_string(), "en".to_string()]);
        assert_eq!(selected.language_code, "fr");
    }

    #[test]
    fn test_select_track_matches_regional_variants() {
        let tracks = vec![track("de"), track("en-GB")];
        let selected = YouTubeSource::select_track(&tracks, &["en".to_string()]);
        assert_eq!(selected.language_code, "en-GB");
    }

    #[test]
    fn test_select_track_falls_back_to_first_available() {
        let tracks = vec![track("ja"), track("ko")];
        let selected = YouTubeSource::select_track(&tracks, &["fr".to_string(), "en".to_string()]);
        assert_eq!(selected.language_code, "ja");
    }

    #[test]
    fn test_parse_timedtext_entries() {
        let xml = r#"<?xml version="1.0" encoding="utf-8"?>
<transcript>
  <text start="0.0" dur="1.5">Hello world</text>
  <text start="1.5" dur="2.25">it&#39;s &amp; &lt;time&gt;</text>
</transcript>"#;

        let entries = YouTubeSource::parse_timedtext(xml);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].text, "Hello world");
        assert_eq!(entries[0].start, 0.0);
        assert_eq!(entries[0].duration, 1.5);
        assert_eq!(entries[1].text, "it's & <time>");
        assert_eq!(entries[1].start, 1.5);
    }

    #[test]
    fn test_parse_timedtext_ignores_garbage() {
        assert!(YouTubeSource::parse_timedtext("<transcript></transcript>").is_empty());
    }
}
