//! Interviewer turn rendering. Picks a template for the current phase, fills
//! the session placeholders, and optionally voices it through a synthesizer.
//!
//! Randomness comes from the injected `R: Rng`, so a seeded `StdRng` gives
//! repeatable turns.

use std::sync::LazyLock;

use bytes::Bytes;
use rand::seq::SliceRandom;
use rand::Rng;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::errors::AppError;
use crate::interview::phase::{ConversationState, InterviewPhase};
use crate::interview::templates::{for_phase, QUESTION_TRANSITIONS};
use crate::speech::{SpeechError, SpeechSynthesizer};

/// Chance of opening a follow-up question with a transition phrase.
const TRANSITION_PROBABILITY: f64 = 0.5;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(candidate|company|role|question)\}").expect("valid placeholder regex"));

#[derive(Debug, Error)]
pub enum InterviewError {
    #[error("Question {index} is out of range for a session with {total} questions")]
    QuestionOutOfRange { index: usize, total: usize },

    #[error(transparent)]
    Speech(#[from] SpeechError),
}

impl From<InterviewError> for AppError {
    fn from(e: InterviewError) -> Self {
        match e {
            InterviewError::Speech(e) => AppError::Speech(e),
            other => AppError::Internal(anyhow::anyhow!(other)),
        }
    }
}

/// Per-session values substituted into templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewContext {
    pub candidate: String,
    pub company: String,
    pub role: String,
    pub questions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterviewTurn {
    pub phase: InterviewPhase,
    pub text: String,
    /// Set only for `Questions` turns.
    pub question_index: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct SpokenTurn {
    pub turn: InterviewTurn,
    pub audio: Bytes,
    pub content_type: String,
}

pub struct ConversationManager<R: Rng> {
    rng: R,
}

impl<R: Rng> ConversationManager<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Text for the interviewer's turn in `state`.
    pub fn render_turn(
        &mut self,
        state: &ConversationState,
        ctx: &InterviewContext,
    ) -> Result<InterviewTurn, InterviewError> {
        let question = match state.phase {
            InterviewPhase::Questions => Some(ctx.questions.get(state.question_index).ok_or(
                InterviewError::QuestionOutOfRange {
                    index: state.question_index,
                    total: ctx.questions.len(),
                },
            )?),
            _ => None,
        };

        let template = for_phase(state.phase)
            .choose(&mut self.rng)
            .copied()
            .unwrap_or_default();
        let mut text = fill_placeholders(template, ctx, question.map(String::as_str));

        if state.phase == InterviewPhase::Questions
            && state.question_index > 0
            && self.rng.gen_bool(TRANSITION_PROBABILITY)
        {
            if let Some(prefix) = QUESTION_TRANSITIONS.choose(&mut self.rng) {
                text = format!("{prefix} {text}");
            }
        }

        Ok(InterviewTurn {
            phase: state.phase,
            text,
            question_index: question.map(|_| state.question_index),
        })
    }

    /// Renders the turn and voices it.
    pub async fn speak_turn(
        &mut self,
        state: &ConversationState,
        ctx: &InterviewContext,
        synthesizer: &dyn SpeechSynthesizer,
    ) -> Result<SpokenTurn, InterviewError> {
        let turn = self.render_turn(state, ctx)?;
        let audio = synthesizer.synthesize(&turn.text).await?;
        Ok(SpokenTurn {
            turn,
            audio: audio.audio,
            content_type: audio.content_type,
        })
    }
}

/// Single pass over the template, so placeholder-like text inside the
/// substituted values is left alone.
fn fill_placeholders(template: &str, ctx: &InterviewContext, question: Option<&str>) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| match &caps[1] {
            "candidate" => ctx.candidate.clone(),
            "company" => ctx.company.clone(),
            "role" => ctx.role.clone(),
            _ => question.unwrap_or_default().to_string(),
        })
        .into_owned()
}
