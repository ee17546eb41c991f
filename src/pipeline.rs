use log::{debug, info};

use crate::error::{PipelineError, Result};
use crate::summarize::SummaryBackend;
use crate::youtube::TranscriptFetcher;
use crate::{VideoId, extract_video_id};

/// The success terminal of one request.
#[derive(Debug, Clone)]
pub struct Summary {
    pub video_id: VideoId,
    pub text: String,
}

/// Sequences one request through validate → fetch transcript → summarize.
/// Stateless and reentrant; each call is independent. Any stage failure
/// short-circuits — later collaborators are never called after a failure,
/// and `Err` is terminal for the request (no retry, no resumption).
pub struct Pipeline<F, S> {
    fetcher: F,
    backend: S,
}

impl<F: TranscriptFetcher, S: SummaryBackend> Pipeline<F, S> {
    pub fn new(fetcher: F, backend: S) -> Self {
        Self { fetcher, backend }
    }

    pub async fn run(&self, raw_url: &str) -> Result<Summary> {
        debug!("Validating input URL");
        let video_id = extract_video_id(raw_url).ok_or(PipelineError::InvalidUrl)?;

        debug!("Fetching transcript for video {video_id}");
        let transcript = self.fetcher.fetch(&video_id).await?;

        debug!(
            "Summarizing transcript for video {video_id} ({} chars)",
            transcript.char_len()
        );
        let text = self.backend.summarize(&transcript).await?;

        info!("Summarized video {video_id}");
        Ok(Summary { video_id, text })
    }
}
