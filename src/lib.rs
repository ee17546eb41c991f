pub mod config;
pub mod error;
pub mod pages;
pub mod pipeline;
pub mod server;
pub mod summarize;
pub mod youtube;

use url::Url;

use crate::error::{PipelineError, Result};

/// Length of every YouTube video identifier.
pub const VIDEO_ID_LEN: usize = 11;

/// Hosts we accept YouTube links from. Anything else is rejected outright,
/// including look-alikes such as `youtube.com.evil.com`.
const ALLOWED_HOSTS: [&str; 4] = ["youtube.com", "www.youtube.com", "m.youtube.com", "youtu.be"];

/// An 11-character YouTube video identifier. Always matches `[A-Za-z0-9_-]{11}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoId(String);

impl VideoId {
    /// Accept a candidate ID, enforcing the length and charset invariant.
    pub fn new(raw: &str) -> Option<Self> {
        if raw.len() != VIDEO_ID_LEN {
            return None;
        }
        if !raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
        {
            return None;
        }
        Some(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single captioned segment as returned by the transcript source.
/// Only `text` is used downstream; timing is kept for logging/inspection.
#[derive(Debug, Clone)]
pub struct Segment {
    pub text: String,
    pub start: f64,
    pub duration: f64,
}

/// The ordered concatenation of all segment texts for one video.
/// Invariant: non-empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptText(String);

impl TranscriptText {
    /// Join segments chronologically, one per line. A whitespace-only result
    /// means the fetch nominally succeeded but yielded nothing usable.
    pub fn from_segments(segments: &[Segment]) -> Result<Self> {
        let joined = segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        if joined.trim().is_empty() {
            return Err(PipelineError::EmptyTranscript);
        }
        Ok(Self(joined))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }
}

/// Extract the video ID from the YouTube URL shapes we accept:
/// `watch?v=ID`, `/embed/ID`, `/v/ID`, `/shorts/ID`, `youtu.be/ID`
/// (scheme and `www.` optional), or a bare 11-character ID.
///
/// Parses the full URL structure and validates the host against an
/// allow-list rather than searching for substrings, so URLs with other
/// query parameters before `v=` and spoofed hosts are handled correctly.
/// Never panics; malformed input yields `None`.
pub fn extract_video_id(input: &str) -> Option<VideoId> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    // Bare video ID
    if let Some(id) = VideoId::new(input) {
        return Some(id);
    }

    let with_scheme;
    let candidate = if input.contains("://") {
        input
    } else {
        with_scheme = format!("https://{input}");
        &with_scheme
    };

    let url = Url::parse(candidate).ok()?;
    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }
    let host = url.host_str()?;
    if !ALLOWED_HOSTS.contains(&host) {
        return None;
    }

    let raw_id = if host == "youtu.be" {
        url.path_segments()?.next().map(str::to_string)
    } else {
        let mut segments = url.path_segments()?;
        match segments.next() {
            Some("watch") => url
                .query_pairs()
                .find(|(key, _)| key == "v")
                .map(|(_, value)| value.into_owned()),
            Some("embed") | Some("v") | Some("shorts") => segments.next().map(str::to_string),
            _ => None,
        }
    }?;

    VideoId::new(&raw_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> Option<String> {
        extract_video_id(s).map(|v| v.as_str().to_string())
    }

    #[test]
    fn test_bare_video_id() {
        assert_eq!(id("dQw4w9WgXcQ"), Some("dQw4w9WgXcQ".to_string()));
    }

    #[test]
    fn test_watch_url() {
        assert_eq!(
            id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_watch_url_with_extra_params() {
        assert_eq!(
            id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=10s"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_watch_url_with_params_before_v() {
        assert_eq!(
            id("https://www.youtube.com/watch?feature=shared&v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_short_url() {
        assert_eq!(id("https://youtu.be/dQw4w9WgXcQ"), Some("dQw4w9WgXcQ".to_string()));
    }

    #[test]
    fn test_short_url_with_query() {
        assert_eq!(id("https://youtu.be/dQw4w9WgXcQ?t=42"), Some("dQw4w9WgXcQ".to_string()));
    }

    #[test]
    fn test_embed_url() {
        assert_eq!(
            id("https://www.youtube.com/embed/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_v_url() {
        assert_eq!(id("https://youtube.com/v/dQw4w9WgXcQ"), Some("dQw4w9WgXcQ".to_string()));
    }

    #[test]
    fn test_shorts_url() {
        assert_eq!(
            id("https://www.youtube.com/shorts/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_mobile_host() {
        assert_eq!(
            id("https://m.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_missing_scheme() {
        assert_eq!(id("youtube.com/watch?v=dQw4w9WgXcQ"), Some("dQw4w9WgXcQ".to_string()));
        assert_eq!(id("youtu.be/dQw4w9WgXcQ"), Some("dQw4w9WgXcQ".to_string()));
    }

    #[test]
    fn test_rejects_lookalike_host() {
        assert_eq!(id("https://youtube.com.evil.com/watch?v=dQw4w9WgXcQ"), None);
        assert_eq!(id("https://notyoutube.com/watch?v=dQw4w9WgXcQ"), None);
        assert_eq!(id("https://evil.com/youtube.com/watch?v=dQw4w9WgXcQ"), None);
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        assert_eq!(id("ftp://youtube.com/watch?v=dQw4w9WgXcQ"), None);
    }

    #[test]
    fn test_rejects_wrong_id_length() {
        assert_eq!(id("https://www.youtube.com/watch?v=short"), None);
        assert_eq!(id("https://youtu.be/dQw4w9WgXcQtoolong"), None);
    }

    #[test]
    fn test_rejects_bad_charset() {
        assert_eq!(id("https://www.youtube.com/watch?v=dQw4w9WgXc!"), None);
    }

    #[test]
    fn test_not_a_url() {
        assert_eq!(id("not a url"), None);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(id(""), None);
        assert_eq!(id("   "), None);
    }

    #[test]
    fn test_very_long_input() {
        let long = "a".repeat(100_000);
        assert_eq!(id(&long), None);
    }

    #[test]
    fn test_idempotent() {
        let input = "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=10s";
        assert_eq!(id(input), id(input));
    }

    #[test]
    fn test_whitespace_trimming() {
        assert_eq!(id("  https://youtu.be/dQw4w9WgXcQ  "), Some("dQw4w9WgXcQ".to_string()));
    }

    #[test]
    fn test_transcript_text_joins_in_order() {
        let segments = vec![
            Segment {
                text: "Hello world".to_string(),
                start: 0.0,
                duration: 1.5,
            },
            Segment {
                text: "This is a test".to_string(),
                start: 1.5,
                duration: 2.0,
            },
        ];
        let text = TranscriptText::from_segments(&segments).unwrap();
        assert_eq!(text.as_str(), "Hello world\nThis is a test");
    }

    #[test]
    fn test_transcript_text_rejects_whitespace_only() {
        let segments = vec![Segment {
            text: "   ".to_string(),
            start: 0.0,
            duration: 1.0,
        }];
        assert!(matches!(
            TranscriptText::from_segments(&segments),
            Err(PipelineError::EmptyTranscript)
        ));
    }

    #[test]
    fn test_transcript_text_rejects_no_segments() {
        assert!(matches!(
            TranscriptText::from_segments(&[]),
            Err(PipelineError::EmptyTranscript)
        ));
    }
}
