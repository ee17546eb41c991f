use thiserror::Error;

/// Closed set of failure kinds for the summarization pipeline. Every upstream
/// failure is converted to one of these at the boundary of the component that
/// produced it; raw upstream detail goes to the logs, never to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    #[error("input is not a recognizable YouTube link")]
    InvalidUrl,

    #[error("video has no transcript track")]
    NoTranscript,

    #[error("transcripts are disabled for this video")]
    TranscriptsDisabled,

    #[error("transcript fetch succeeded but produced no usable text")]
    EmptyTranscript,

    #[error("upstream service unavailable: {detail}")]
    Unavailable { detail: String },

    #[error("LLM credential rejected")]
    AuthFailure,

    #[error("LLM quota or rate limit exhausted")]
    QuotaExceeded,

    #[error("LLM declined to respond{}", reason_suffix(.reason))]
    ContentBlocked { reason: Option<String> },
}

fn reason_suffix(reason: &Option<String>) -> String {
    match reason {
        Some(r) => format!(" ({r})"),
        None => String::new(),
    }
}

impl PipelineError {
    /// Short human-readable message shown to the end user. Total over the
    /// enum; never leaks upstream detail.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidUrl => {
                "That doesn't look like a YouTube link. Please paste a full video URL.".to_string()
            }
            Self::NoTranscript => "This video has no transcript to summarize.".to_string(),
            Self::TranscriptsDisabled => {
                "Transcripts are disabled for this video.".to_string()
            }
            Self::EmptyTranscript => {
                "The video's transcript is empty, so there is nothing to summarize.".to_string()
            }
            Self::Unavailable { .. } => {
                "An upstream service is unavailable right now. Please try again later.".to_string()
            }
            Self::AuthFailure => {
                "The summarization service rejected our credentials. Please contact the operator."
                    .to_string()
            }
            Self::QuotaExceeded => {
                "The summarization service is over its quota. Please try again later.".to_string()
            }
            Self::ContentBlocked { reason } => match reason {
                Some(r) => format!("The summarization service declined this video ({r})."),
                None => "The summarization service declined this video.".to_string(),
            },
        }
    }

    /// Wrap an unclassified upstream failure.
    pub fn unavailable(detail: impl Into<String>) -> Self {
        Self::Unavailable {
            detail: detail.into(),
        }
    }
}

impl From<reqwest::Error> for PipelineError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::unavailable("request timed out")
        } else {
            Self::unavailable(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
