use super::*;
use cue_core::Angle;
use cue_core::Length;
use cue_core::Utility;
use cue_rules::Ball;
use cue_table::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    Pot,
    Safety,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pot => write!(f, "pot"),
            Self::Safety => write!(f, "safety"),
        }
    }
}

/// The advisor's recommendation for one shot.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Plan {
    pub action: Action,
    pub kind: Kind,
    pub target: Option<Ball>,
    /// Index of the target in [`TableState::balls`].
    pub target_index: Option<usize>,
    /// Index into the table's pockets.
    pub pocket: Option<usize>,
    pub aim: Point,
    pub params: CueParams,
    /// Where the cue ball should finish, and how closely.
    pub position: Point,
    pub window: Length,
    pub ev: Utility,
    pub notes: String,
    /// Cut angle and object-to-pocket distance of a pot, the signature
    /// outcomes are learned against.
    pub angle: Option<Angle>,
    pub to_pocket: Option<Length>,
    /// Chosen placement when the cue ball is in hand.
    pub cue: Option<Point>,
}

impl Plan {
    pub fn is_safety(&self) -> bool {
        self.action == Action::Safety
    }
    pub fn bucket(&self) -> Option<Bucket> {
        match (self.angle, self.to_pocket) {
            (Some(angle), Some(distance)) => Some(Bucket::of(angle, distance)),
            _ => None,
        }
    }
}

impl std::fmt::Display for Plan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}) aim={} ev={:.3}", self.notes, self.params, self.aim, self.ev)
    }
}
