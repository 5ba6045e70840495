//! Speech providers: text-to-speech for the interviewer voice and
//! speech-to-text for candidate answers.
//!
//! Both sit behind traits so the interview flow can be exercised without a
//! network. `AppState` carries them as `Arc<dyn SpeechSynthesizer>` and
//! `Arc<dyn SpeechTranscriber>`.

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod stt;
pub mod tts;

#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    EmptyInput(String),

    #[error("{provider} rejected the API key")]
    Unauthorized { provider: &'static str },

    #[error("{provider} is rate limiting requests. Try again in a moment.")]
    RateLimited { provider: &'static str },

    #[error("{provider} had a server error (status {status})")]
    ServerError { provider: &'static str, status: u16 },

    #[error("{provider} API error (status {status}): {message}")]
    Api {
        provider: &'static str,
        status: u16,
        message: String,
    },

    #[error("{provider} returned an unexpected response: {message}")]
    Decode {
        provider: &'static str,
        message: String,
    },
}

/// Maps a non-success provider status to a `SpeechError`.
pub(crate) fn classify_status(provider: &'static str, status: u16, body: String) -> SpeechError {
    match status {
        401 | 403 => SpeechError::Unauthorized { provider },
        429 => SpeechError::RateLimited { provider },
        s if s >= 500 => SpeechError::ServerError { provider, status: s },
        s => SpeechError::Api {
            provider,
            status: s,
            message: body,
        },
    }
}

/// Synthesized audio plus its MIME type.
#[derive(Debug, Clone)]
pub struct SynthesizedAudio {
    pub audio: Bytes,
    pub content_type: String,
}

/// A word with its timing inside the submitted audio, in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordTiming {
    pub word: String,
    pub start: f64,
    pub end: f64,
    #[serde(default)]
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    pub text: String,
    pub confidence: f64,
    pub words: Vec<WordTiming>,
}

#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str) -> Result<SynthesizedAudio, SpeechError>;
}

#[async_trait]
pub trait SpeechTranscriber: Send + Sync {
    async fn transcribe(&self, audio: Bytes, mime_type: &str) -> Result<Transcript, SpeechError>;
}
