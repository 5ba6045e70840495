use std::time::Duration;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::interview::templates::BACKCHANNELS;

/// Time-elapsed rule for short acknowledgments while the candidate talks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackchannelPolicy {
    /// How long the candidate must have been speaking.
    pub min_speaking: Duration,
    /// Minimum spacing between two backchannels.
    pub min_gap: Duration,
}

impl Default for BackchannelPolicy {
    fn default() -> Self {
        Self {
            min_speaking: Duration::from_secs(4),
            min_gap: Duration::from_secs(6),
        }
    }
}

impl BackchannelPolicy {
    /// `since_last` is `None` when no backchannel has played yet in this answer.
    pub fn should_backchannel(&self, speaking_for: Duration, since_last: Option<Duration>) -> bool {
        speaking_for >= self.min_speaking && since_last.map_or(true, |gap| gap >= self.min_gap)
    }
}

pub fn pick_backchannel<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    BACKCHANNELS.choose(rng).copied().unwrap_or("Mhm.")
}
