// Canned interviewer lines. Placeholders: {candidate} {company} {role} {question}.

use crate::interview::phase::InterviewPhase;

pub const WELCOME: &[&str] = &[
    "Hi {candidate}, thanks for joining me today. I'm looking forward to talking about the {role} position at {company}.",
    "Hello {candidate}, welcome! Thanks for taking the time to interview for the {role} role with {company}.",
    "Hi {candidate}, great to meet you. Today we'll be chatting about the {role} opening at {company}.",
];

pub const SMALL_TALK: &[&str] = &[
    "Before we dive in, how has your day been so far?",
    "How are you doing today? Did you find everything you needed to get set up?",
    "Let's start easy. How's your week been going?",
];

pub const COMPANY_INTRO: &[&str] = &[
    "Let me tell you a little about {company}. The team you'd be joining as a {role} works closely with product and engineering, and we care a lot about ownership.",
    "A quick bit of context on {company}: we're growing fast, and the {role} role sits right at the center of that growth.",
    "So, about {company}. The {role} position is new on the team, and whoever joins will have a big say in how it takes shape.",
];

pub const QUESTION: &[&str] = &["{question}"];

pub const QUESTION_TRANSITIONS: &[&str] = &[
    "Great, let's move on.",
    "Thanks for sharing that.",
    "Okay, next question.",
    "That's helpful context.",
];

pub const WRAP_UP: &[&str] = &[
    "That's all the questions I have, {candidate}. Thanks so much for your time today. We'll be in touch about next steps.",
    "Thank you, {candidate}. I really enjoyed our conversation about the {role} role. You'll hear from {company} soon.",
    "We're at time. Thanks for walking me through your experience, {candidate}. Best of luck, and we'll follow up shortly.",
];

pub const COMPLETED: &[&str] = &["This interview has ended. Thanks again, {candidate}."];

pub const BACKCHANNELS: &[&str] = &["Mhm.", "I see.", "Right.", "Okay.", "Got it.", "Interesting.", "Uh-huh."];

pub fn for_phase(phase: InterviewPhase) -> &'static [&'static str] {
    match phase {
        InterviewPhase::Welcome => WELCOME,
        InterviewPhase::SmallTalk => SMALL_TALK,
        InterviewPhase::CompanyIntro => COMPANY_INTRO,
        InterviewPhase::Questions => QUESTION,
        InterviewPhase::WrapUp => WRAP_UP,
        InterviewPhase::Completed => COMPLETED,
    }
}
