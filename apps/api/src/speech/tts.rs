use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{header, Client};
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::TtsConfig;
use crate::speech::{classify_status, SpeechError, SpeechSynthesizer, SynthesizedAudio};

const PROVIDER: &str = "ElevenLabs";
const AUDIO_MPEG: &str = "audio/mpeg";
/// Interview lines are a sentence or two; anything longer is a bug upstream.
const MAX_TEXT_CHARS: usize = 2_500;

#[derive(Debug, Serialize)]
struct TtsRequest<'a> {
    text: &'a str,
    model_id: &'a str,
}

/// ElevenLabs text-to-speech client. Returns MP3 bytes.
#[derive(Clone)]
pub struct ElevenLabsClient {
    client: Client,
    api_key: String,
    base_url: String,
    voice_id: String,
    model_id: String,
}

impl ElevenLabsClient {
    pub fn new(config: &TtsConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .context("Failed to build TTS HTTP client")?;
        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            voice_id: config.voice_id.clone(),
            model_id: config.model_id.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/text-to-speech/{}", self.base_url, self.voice_id)
    }
}

#[async_trait]
impl SpeechSynthesizer for ElevenLabsClient {
    async fn synthesize(&self, text: &str) -> Result<SynthesizedAudio, SpeechError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SpeechError::EmptyInput(
                "Cannot synthesize empty text".to_string(),
            ));
        }
        if text.chars().count() > MAX_TEXT_CHARS {
            warn!("TTS text is {} chars, provider may truncate", text.chars().count());
        }

        let response = self
            .client
            .post(self.endpoint())
            .header("xi-api-key", &self.api_key)
            .header(header::ACCEPT, AUDIO_MPEG)
            .json(&TtsRequest {
                text,
                model_id: &self.model_id,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("{PROVIDER} returned {status}: {body}");
            return Err(classify_status(PROVIDER, status.as_u16(), body));
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(AUDIO_MPEG)
            .to_string();
        let audio = response.bytes().await?;

        if audio.is_empty() {
            return Err(SpeechError::Decode {
                provider: PROVIDER,
                message: "empty audio body".to_string(),
            });
        }

        debug!("Synthesized {} bytes of audio for {} chars", audio.len(), text.len());
        Ok(SynthesizedAudio {
            audio,
            content_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> TtsConfig {
        TtsConfig {
            api_key: "key".to_string(),
            base_url: "https://tts.example.com/".to_string(),
            voice_id: "voice-1".to_string(),
            model_id: "model-1".to_string(),
        }
    }

    #[test]
    fn test_endpoint_includes_voice_and_trims_slash() {
        let client = ElevenLabsClient::new(&config()).unwrap();
        assert_eq!(
            client.endpoint(),
            "https://tts.example.com/v1/text-to-speech/voice-1"
        );
    }

    #[tokio::test]
    async fn test_blank_text_rejected_before_network() {
        let client = ElevenLabsClient::new(&config()).unwrap();
        let err = client.synthesize("   ").await.unwrap_err();
        assert!(matches!(err, SpeechError::EmptyInput(_)));
    }

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(TtsRequest {
            text: "Hello",
            model_id: "m",
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"text": "Hello", "model_id": "m"}));
    }
}
