use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::interview::backchannel::BackchannelPolicy;
use crate::llm_client::LlmClient;
use crate::speech::{SpeechSynthesizer, SpeechTranscriber};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub llm: LlmClient,
    /// Interviewer voice. Default: ElevenLabsClient.
    pub tts: Arc<dyn SpeechSynthesizer>,
    /// Candidate answer transcription. Default: DeepgramClient.
    pub stt: Arc<dyn SpeechTranscriber>,
    pub backchannel: BackchannelPolicy,
    pub config: Config,
}
