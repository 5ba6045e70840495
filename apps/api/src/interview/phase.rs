use serde::{Deserialize, Serialize};

/// Linear interview phases. `Completed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewPhase {
    Welcome,
    SmallTalk,
    CompanyIntro,
    Questions,
    WrapUp,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationState {
    pub phase: InterviewPhase,
    /// Index into the session's question list. Only meaningful in `Questions`.
    pub question_index: usize,
    pub total_questions: usize,
}

impl ConversationState {
    pub fn new(total_questions: usize) -> Self {
        Self {
            phase: InterviewPhase::Welcome,
            question_index: 0,
            total_questions,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.phase == InterviewPhase::Completed
    }
}

/// Returns the state after one step. Pure; advancing `Completed` returns it unchanged.
pub fn advance_phase(state: &ConversationState) -> ConversationState {
    let next = |phase, question_index| ConversationState {
        phase,
        question_index,
        ..*state
    };

    match state.phase {
        InterviewPhase::Welcome => next(InterviewPhase::SmallTalk, 0),
        InterviewPhase::SmallTalk => next(InterviewPhase::CompanyIntro, 0),
        InterviewPhase::CompanyIntro if state.total_questions == 0 => next(InterviewPhase::WrapUp, 0),
        InterviewPhase::CompanyIntro => next(InterviewPhase::Questions, 0),
        InterviewPhase::Questions if state.question_index + 1 < state.total_questions => {
            next(InterviewPhase::Questions, state.question_index + 1)
        }
        InterviewPhase::Questions => next(InterviewPhase::WrapUp, state.question_index),
        InterviewPhase::WrapUp => next(InterviewPhase::Completed, state.question_index),
        InterviewPhase::Completed => *state,
    }
}
