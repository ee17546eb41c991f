use std::borrow::Cow;

use async_trait::async_trait;
use log::{debug, warn};
use serde::Deserialize;

use crate::TranscriptText;
use crate::config::Config;
use crate::error::{PipelineError, Result};

const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Fixed instruction prompt. Not user-controllable; the transcript is the
/// only variable input.
const SYSTEM_PROMPT: &str = "You are a helpful assistant that summarizes YouTube video transcripts. \
Structure your answer in Markdown with these sections:\n\
- **Overview**: two to three sentences covering what the video is about.\n\
- **Key points**: bullet points capturing the main arguments and important details.\n\
- **Topics**: the topics, keywords, and any acronyms mentioned, each with a short explanation.\n\
- **Actionable items**: concrete takeaways for the viewer, if the video contains any.\n\
Base the summary only on the transcript you are given.";

/// Appended when a transcript is cut at the length cap.
const TRUNCATION_MARKER: &str = "\n[transcript truncated]";

/// Produces a summary for a transcript. The production implementation calls
/// an LLM completion API; tests substitute a fake.
#[async_trait]
pub trait SummaryBackend: Send + Sync {
    async fn summarize(&self, transcript: &TranscriptText) -> Result<String>;
}

/// Summary generation via OpenAI's chat-completions API. One synchronous
/// request per transcript, no streaming, no follow-ups. All configuration is
/// captured at construction and immutable afterwards.
pub struct OpenAiBackend {
    client: reqwest::Client,
    api_key: String,
    model: String,
    max_transcript_chars: usize,
}

impl OpenAiBackend {
    pub fn new(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client,
            api_key: config.openai_api_key.clone(),
            model: config.model.clone(),
            max_transcript_chars: config.max_transcript_chars,
        }
    }
}

#[async_trait]
impl SummaryBackend for OpenAiBackend {
    async fn summarize(&self, transcript: &TranscriptText) -> Result<String> {
        let text = truncate_transcript(transcript, self.max_transcript_chars);

        debug!(
            "Requesting summary: model={} transcript_chars={}",
            self.model,
            text.chars().count()
        );

        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": format!("Summarize this video transcript:\n\n{text}") }
            ]
        });

        let resp = self
            .client
            .post(OPENAI_CHAT_URL)
            .bearer_auth(&self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!("OpenAI API returned {status}: {body}");
            return Err(classify_api_error(status.as_u16(), &body));
        }

        let completion: ChatResponse = resp.json().await?;
        extract_completion_text(completion)
    }
}

/// Truncate over-length transcripts to exactly the cap (in chars) plus a
/// marker. Truncation is logged, never an error.
pub fn truncate_transcript(transcript: &TranscriptText, max_chars: usize) -> Cow<'_, str> {
    if transcript.char_len() <= max_chars {
        return Cow::Borrowed(transcript.as_str());
    }
    warn!(
        "Transcript has {} chars, truncating to {max_chars}",
        transcript.char_len()
    );
    let mut truncated: String = transcript.as_str().chars().take(max_chars).collect();
    truncated.push_str(TRUNCATION_MARKER);
    Cow::Owned(truncated)
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: Option<String>,
    code: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

/// Map an OpenAI error response onto the failure taxonomy. 401/403 is a
/// credential problem, 429 is quota, a content-filter code is a moderation
/// block, everything else is unclassified.
fn classify_api_error(status: u16, body: &str) -> PipelineError {
    let parsed = serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|b| b.error);
    let code = parsed
        .as_ref()
        .and_then(|e| e.code.as_deref().or(e.kind.as_deref()))
        .unwrap_or_default();
    let message = parsed.as_ref().and_then(|e| e.message.clone());

    match status {
        401 | 403 => PipelineError::AuthFailure,
        429 => PipelineError::QuotaExceeded,
        _ if code == "insufficient_quota" || code == "rate_limit_exceeded" => {
            PipelineError::QuotaExceeded
        }
        _ if code == "content_filter" || code == "content_policy_violation" => {
            PipelineError::ContentBlocked { reason: message }
        }
        _ => PipelineError::unavailable(format!("OpenAI API returned {status}")),
    }
}

/// Pull the generated text out of a successful completion, verbatim. A
/// `content_filter` finish reason means the model was stopped by moderation.
fn extract_completion_text(completion: ChatResponse) -> Result<String> {
    let choice = completion
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| PipelineError::unavailable("completion response had no choices"))?;

    if choice.finish_reason.as_deref() == Some("content_filter") {
        return Err(PipelineError::ContentBlocked {
            reason: Some("content filter".to_string()),
        });
    }

    choice
        .message
        .content
        .filter(|text| !text.is_empty())
        .ok_or_else(|| PipelineError::unavailable("completion response had no content"))
}
