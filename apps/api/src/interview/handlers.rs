use std::time::Duration;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header, HeaderMap},
    Json,
};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::backchannel::pick_backchannel;
use crate::interview::conversation::{ConversationManager, InterviewContext, InterviewTurn, SpokenTurn};
use crate::interview::phase::{advance_phase, ConversationState};
use crate::interview::repository::{create_session, delete_session, load_session, update_state};
use crate::speech::Transcript;
use crate::state::AppState;

pub const MAX_QUESTIONS: usize = 20;
/// Upper bound on a single recorded answer.
pub const MAX_AUDIO_BYTES: usize = 10 * 1024 * 1024;

#[derive(Deserialize)]
pub struct StartInterviewRequest {
    #[serde(default)]
    pub user_id: Option<Uuid>,
    pub candidate_name: String,
    pub company: String,
    pub role: String,
    #[serde(default)]
    pub questions: Vec<String>,
}

/// One interviewer turn, with the MP3 audio base64-encoded.
#[derive(Serialize)]
pub struct TurnResponse {
    pub session_id: Uuid,
    pub state: ConversationState,
    pub turn: InterviewTurn,
    pub audio_base64: String,
    pub content_type: String,
}

impl TurnResponse {
    fn new(session_id: Uuid, state: ConversationState, spoken: SpokenTurn) -> Self {
        Self {
            session_id,
            state,
            turn: spoken.turn,
            audio_base64: STANDARD.encode(&spoken.audio),
            content_type: spoken.content_type,
        }
    }
}

#[derive(Deserialize)]
pub struct BackchannelQuery {
    /// How long the candidate has been talking in the current answer.
    pub speaking_ms: u64,
    /// Time since the last backchannel; absent if none has played yet.
    pub since_last_ms: Option<u64>,
    /// Also synthesize the phrase.
    #[serde(default)]
    pub audio: bool,
}

#[derive(Serialize)]
pub struct BackchannelResponse {
    pub should_backchannel: bool,
    pub phrase: Option<&'static str>,
    pub audio_base64: Option<String>,
    pub content_type: Option<String>,
}

fn required(value: &str, field: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(trimmed.to_string())
}

fn build_context(req: &StartInterviewRequest) -> Result<InterviewContext, AppError> {
    let questions: Vec<String> = req
        .questions
        .iter()
        .map(|q| q.trim())
        .filter(|q| !q.is_empty())
        .map(String::from)
        .collect();
    if questions.len() > MAX_QUESTIONS {
        return Err(AppError::Validation(format!(
            "Too many questions ({}), max {MAX_QUESTIONS}",
            questions.len()
        )));
    }
    Ok(InterviewContext {
        candidate: required(&req.candidate_name, "candidate_name")?,
        company: required(&req.company, "company")?,
        role: required(&req.role, "role")?,
        questions,
    })
}

fn manager() -> ConversationManager<StdRng> {
    ConversationManager::new(StdRng::from_entropy())
}

/// POST /api/interview/start
pub async fn handle_start(
    State(state): State<AppState>,
    Json(req): Json<StartInterviewRequest>,
) -> Result<Json<TurnResponse>, AppError> {
    let ctx = build_context(&req)?;
    let conversation = ConversationState::new(ctx.questions.len());

    // Persist first so a rejected user_id never costs a synthesis call.
    let session_id = create_session(&state.db, req.user_id, &ctx, &conversation).await?;
    let spoken = match manager()
        .speak_turn(&conversation, &ctx, state.tts.as_ref())
        .await
    {
        Ok(spoken) => spoken,
        Err(e) => {
            if let Err(cleanup) = delete_session(&state.db, session_id).await {
                warn!("Failed to remove unvoiced interview {session_id}: {cleanup:#}");
            }
            return Err(e.into());
        }
    };
    info!(
        "Started interview {session_id} for {} ({} questions)",
        ctx.role,
        ctx.questions.len()
    );

    Ok(Json(TurnResponse::new(session_id, conversation, spoken)))
}

/// POST /api/interview/:id/next
pub async fn handle_next(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TurnResponse>, AppError> {
    let row = load_session(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Interview session {id} not found")))?;
    let (ctx, current) = row.decode()?;
    if current.is_completed() {
        return Err(AppError::Validation(format!(
            "Interview session {id} is already completed"
        )));
    }

    let next = advance_phase(&current);
    // Voice the turn before persisting so a TTS failure doesn't skip it.
    let spoken = manager().speak_turn(&next, &ctx, state.tts.as_ref()).await?;
    update_state(&state.db, id, &next).await?;
    info!("Interview {id} advanced to {:?}", next.phase);

    Ok(Json(TurnResponse::new(id, next, spoken)))
}

/// GET /api/interview/backchannel
pub async fn handle_backchannel(
    State(state): State<AppState>,
    Query(params): Query<BackchannelQuery>,
) -> Result<Json<BackchannelResponse>, AppError> {
    let should = state.backchannel.should_backchannel(
        Duration::from_millis(params.speaking_ms),
        params.since_last_ms.map(Duration::from_millis),
    );
    if !should {
        return Ok(Json(BackchannelResponse {
            should_backchannel: false,
            phrase: None,
            audio_base64: None,
            content_type: None,
        }));
    }

    let phrase = pick_backchannel(&mut StdRng::from_entropy());
    let (audio_base64, content_type) = if params.audio {
        let audio = state.tts.synthesize(phrase).await?;
        (Some(STANDARD.encode(&audio.audio)), Some(audio.content_type))
    } else {
        (None, None)
    };

    Ok(Json(BackchannelResponse {
        should_backchannel: true,
        phrase: Some(phrase),
        audio_base64,
        content_type,
    }))
}

/// POST /api/interview/transcribe
/// Body is the raw recording; `Content-Type` carries its MIME type.
pub async fn handle_transcribe(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Transcript>, AppError> {
    let mime_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .filter(|v| v.starts_with("audio/") || v.starts_with("video/webm"))
        .ok_or_else(|| {
            AppError::Validation("Content-Type must be an audio MIME type".to_string())
        })?
        .to_string();

    let transcript = state.stt.transcribe(body, &mime_type).await?;
    Ok(Json(transcript))
}
