use std::time::Duration;

use eyre::{Result, WrapErr, bail};
use log::debug;

/// Default cap on transcript length, in characters.
pub const DEFAULT_MAX_TRANSCRIPT_CHARS: usize = 60_000;

/// Default model handle for summarization.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Timeout applied to each outbound call (transcript fetch, completion).
pub const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(120);

/// Process-wide configuration, read once at startup and immutable afterwards.
/// A missing credential or secret is fatal: the process refuses to serve.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub secret_key: String,
    pub model: String,
    pub max_transcript_chars: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let openai_api_key = require("OPENAI_API_KEY")?;
        let secret_key = require("SECRET_KEY")?;
        // The signing key derivation needs enough entropy to work with
        if secret_key.len() < 32 {
            bail!("SECRET_KEY must be at least 32 bytes");
        }

        let model = std::env::var("YTBRIEF_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let max_transcript_chars = match std::env::var("MAX_TRANSCRIPT_CHARS") {
            Ok(raw) => raw
                .parse::<usize>()
                .wrap_err("MAX_TRANSCRIPT_CHARS must be a positive integer")?,
            Err(_) => DEFAULT_MAX_TRANSCRIPT_CHARS,
        };
        if max_transcript_chars == 0 {
            bail!("MAX_TRANSCRIPT_CHARS must be greater than zero");
        }

        debug!("Config: model={model} max_transcript_chars={max_transcript_chars}");

        Ok(Self {
            openai_api_key,
            secret_key,
            model,
            max_transcript_chars,
        })
    }
}

fn require(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => bail!("{name} environment variable is not set"),
    }
}
