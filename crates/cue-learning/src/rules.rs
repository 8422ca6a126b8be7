use cue_core::Angle;
use cue_core::BANK_PENALTY;
use cue_core::MAX_KICK_RAILS;
use cue_core::Probability;
use cue_core::SAFETY_THRESHOLD;
use cue_core::STRAIGHT_THRESHOLD;

/// Selection knobs for the advisor.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdvisorRules {
    /// Cuts at or below this are preferred to everything else.
    pub straight: Angle,
    /// Safeties join the pool when no pot is likelier than this.
    pub safety: Probability,
    pub kick_rails: usize,
    pub bank_penalty: Probability,
}

impl Default for AdvisorRules {
    fn default() -> Self {
        Self {
            straight: STRAIGHT_THRESHOLD,
            safety: SAFETY_THRESHOLD,
            kick_rails: MAX_KICK_RAILS,
            bank_penalty: BANK_PENALTY,
        }
    }
}
