use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{header, Client};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::SttConfig;
use crate::speech::{classify_status, SpeechError, SpeechTranscriber, Transcript, WordTiming};

const PROVIDER: &str = "Deepgram";

#[derive(Debug, Deserialize)]
struct ListenResponse {
    results: ListenResults,
}

#[derive(Debug, Deserialize)]
struct ListenResults {
    channels: Vec<Channel>,
}

#[derive(Debug, Deserialize)]
struct Channel {
    alternatives: Vec<Alternative>,
}

#[derive(Debug, Deserialize)]
struct Alternative {
    #[serde(default)]
    transcript: String,
    #[serde(default)]
    confidence: f64,
    #[serde(default)]
    words: Vec<WordTiming>,
}

impl ListenResponse {
    /// Takes the first alternative of the first channel. Silence yields an
    /// empty transcript rather than an error.
    fn into_transcript(self) -> Transcript {
        self.results
            .channels
            .into_iter()
            .next()
            .and_then(|c| c.alternatives.into_iter().next())
            .map(|alt| Transcript {
                text: alt.transcript.trim().to_string(),
                confidence: alt.confidence,
                words: alt.words,
            })
            .unwrap_or(Transcript {
                text: String::new(),
                confidence: 0.0,
                words: Vec::new(),
            })
    }
}

/// Deepgram pre-recorded transcription client.
#[derive(Clone)]
pub struct DeepgramClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl DeepgramClient {
    pub fn new(config: &SttConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .context("Failed to build STT HTTP client")?;
        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl SpeechTranscriber for DeepgramClient {
    async fn transcribe(&self, audio: Bytes, mime_type: &str) -> Result<Transcript, SpeechError> {
        if audio.is_empty() {
            return Err(SpeechError::EmptyInput("Audio payload is empty".to_string()));
        }

        let audio_len = audio.len();
        let response = self
            .client
            .post(format!("{}/v1/listen", self.base_url))
            .query(&[
                ("model", self.model.as_str()),
                ("smart_format", "true"),
                ("punctuate", "true"),
            ])
            .header(header::AUTHORIZATION, format!("Token {}", self.api_key))
            .header(header::CONTENT_TYPE, mime_type)
            .body(audio)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("{PROVIDER} returned {status}: {body}");
            return Err(classify_status(PROVIDER, status.as_u16(), body));
        }

        let parsed: ListenResponse = response.json().await.map_err(|e| SpeechError::Decode {
            provider: PROVIDER,
            message: e.to_string(),
        })?;
        let transcript = parsed.into_transcript();

        debug!(
            "Transcribed {audio_len} bytes into {} words (confidence {:.2})",
            transcript.words.len(),
            transcript.confidence
        );
        Ok(transcript)
    }
}
