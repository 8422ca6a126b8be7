use super::*;
use cue_core::Points;

/// Variant-specific extras carried by a [`Ruling`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Detail {
    #[default]
    None,
    /// UK blackball visit accounting for the player about to shoot.
    Visit {
        shots: u8,
        free_ball: bool,
        choice_required: bool,
    },
    /// Snooker scoring.
    Score {
        scored: Points,
        penalty: Points,
        scores: [Points; 2],
        run: Points,
    },
}

/// The referee's verdict on one shot.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ruling {
    pub legal: bool,
    pub foul: bool,
    pub reason: Option<Reason>,
    pub potted: Vec<Ball>,
    pub next: Player,
    pub ball_in_hand: bool,
    pub over: bool,
    pub winner: Option<Winner>,
    pub detail: Detail,
}

impl Ruling {
    /// Stable answer for any shot submitted after the frame ended.
    pub fn frame_over(status: &Status) -> Self {
        Self {
            legal: false,
            foul: false,
            reason: Some(Reason::FrameOver),
            potted: Vec::new(),
            next: status.turn(),
            ball_in_hand: false,
            over: true,
            winner: status.winner(),
            detail: Detail::None,
        }
    }
    /// Ruling skeleton reflecting `status` after the shot has been applied.
    pub(crate) fn after(shot: &Shot, status: &Status, reason: Option<Reason>) -> Self {
        let foul = reason.is_some();
        Self {
            legal: !foul,
            foul,
            reason,
            potted: shot.potted.clone(),
            next: status.turn(),
            ball_in_hand: false,
            over: status.is_over(),
            winner: status.winner(),
            detail: Detail::None,
        }
    }
    pub(crate) fn with_hand(mut self, ball_in_hand: bool) -> Self {
        self.ball_in_hand = ball_in_hand;
        self
    }
    pub(crate) fn with_detail(mut self, detail: Detail) -> Self {
        self.detail = detail;
        self
    }
}

impl std::fmt::Display for Ruling {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.reason {
            Some(reason) if self.foul => write!(f, "foul ({})", reason)?,
            Some(reason) => write!(f, "{}", reason)?,
            None => write!(f, "legal")?,
        }
        write!(f, " -> {}", self.next)?;
        if self.ball_in_hand {
            write!(f, " in hand")?;
        }
        if let Some(winner) = self.winner {
            write!(f, " | winner {}", winner)?;
        }
        Ok(())
    }
}
