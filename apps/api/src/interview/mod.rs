// Mock interview: linear phase sequencer, templated interviewer turns voiced
// through the TTS backend, backchannel timing, and answer transcription.

pub mod backchannel;
pub mod conversation;
pub mod handlers;
pub mod phase;
pub mod repository;
pub mod templates;
