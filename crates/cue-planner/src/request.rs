use super::*;
use cue_core::Angle;
use cue_core::Length;
use cue_rules::Ball;
use cue_rules::Target;
use cue_rules::Variant;
use cue_table::Point;
use std::time::Duration;

/// Region the cue ball must be placed in when in hand.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Baulk {
    line: Length,
}

impl Baulk {
    /// Everything with `x` at or below `line`.
    pub fn behind(line: Length) -> Self {
        Self { line }
    }
    pub fn line(&self) -> Length {
        self.line
    }
    pub fn admits(&self, p: &Point) -> bool {
        p.x <= self.line
    }
    /// Pull `p` back over the line if it has strayed past it.
    pub fn clip(&self, p: Point) -> Point {
        Point::new(p.x.min(self.line), p.y)
    }
}

/// Everything the planner needs for one decision.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AimRequest {
    pub variant: Variant,
    pub target: Target,
    pub snapshot: Snapshot,
    pub ball_in_hand: bool,
    pub baulk: Option<Baulk>,
    pub budget: Option<Duration>,
    pub seed: Option<u64>,
    pub max_cut: Option<Angle>,
    pub min_view: Option<f32>,
}

impl AimRequest {
    pub fn new(variant: Variant, target: Target, snapshot: Snapshot) -> Self {
        Self {
            variant,
            target,
            snapshot,
            ball_in_hand: false,
            baulk: None,
            budget: None,
            seed: None,
            max_cut: None,
            min_view: None,
        }
    }
    pub fn in_hand(mut self, baulk: Option<Baulk>) -> Self {
        self.ball_in_hand = true;
        self.baulk = baulk;
        self
    }
    pub fn with_budget(mut self, budget: Duration) -> Self {
        self.budget = Some(budget);
        self
    }
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
    pub fn with_limits(mut self, max_cut: Angle, min_view: f32) -> Self {
        self.max_cut = Some(max_cut);
        self.min_view = Some(min_view);
        self
    }
    /// Arena indices of balls `target` allows under `diff`.
    pub fn legal(&self, target: &Target, diff: &Diff) -> Vec<usize> {
        let (indices, balls): (Vec<usize>, Vec<Ball>) = self
            .snapshot
            .objects(diff)
            .map(|(i, p)| (i, p.ball))
            .unzip();
        target
            .legal(&balls)
            .into_iter()
            .map(|k| indices[k])
            .collect()
    }
}
