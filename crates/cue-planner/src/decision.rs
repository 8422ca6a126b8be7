use super::*;
use cue_core::Angle;
use cue_core::SAFETY_POWER;
use cue_core::Utility;
use cue_rules::Ball;
use cue_table::Point;

/// Cue-tip offset, each component in `[-1, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Spin {
    pub top: f32,
    pub side: f32,
    pub back: f32,
}

impl Spin {
    pub const NONE: Self = Self::new(0.0, 0.0, 0.0);
    pub const fn new(top: f32, side: f32, back: f32) -> Self {
        Self { top, side, back }
    }
    /// The planner's default spin grid.
    pub const fn grid() -> [Self; 8] {
        [
            Self::new(0.0, 0.0, 0.0),
            Self::new(0.3, 0.0, -0.3),
            Self::new(-0.3, 0.3, 0.0),
            Self::new(-0.3, -0.3, 0.0),
            Self::new(0.5, 0.0, -0.5),
            Self::new(-0.5, 0.5, 0.0),
            Self::new(-0.5, -0.5, 0.0),
            Self::new(0.0, 0.5, 0.0),
        ]
    }
}

impl std::fmt::Display for Spin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2},{:.2},{:.2}", self.top, self.side, self.back)
    }
}

/// A proposed shot.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Decision {
    /// Cue direction, radians from the +x axis.
    pub angle: Angle,
    pub power: f32,
    pub spin: Spin,
    pub target: Option<Ball>,
    /// Pocket mouth aimed for.
    pub pocket: Option<Point>,
    /// Ghost-ball point the cue ball is sent to.
    pub aim: Option<Point>,
    pub quality: Utility,
    pub rationale: String,
    /// Where to place the cue ball when it is in hand.
    pub cue: Option<Point>,
}

impl Decision {
    /// Aim at the corner farthest from the cue ball, medium pace, no spin.
    pub fn safety(snapshot: &Snapshot, cue: Option<Point>) -> Self {
        let table = snapshot.table();
        let from = cue.unwrap_or_else(|| table.center());
        let corner = table
            .corners()
            .into_iter()
            .max_by(|a, b| a.distance(&from).total_cmp(&b.distance(&from)))
            .unwrap_or_else(|| table.center());
        Self {
            angle: (corner - from).heading(),
            power: SAFETY_POWER,
            spin: Spin::NONE,
            target: None,
            pocket: None,
            aim: None,
            quality: 0.0,
            rationale: String::from("safety"),
            cue: None,
        }
    }
    pub fn is_safety(&self) -> bool {
        self.target.is_none()
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} q={:.3} angle={:.3} power={:.2} spin={}",
            self.rationale, self.quality, self.angle, self.power, self.spin
        )
    }
}
