use super::*;
use cue_core::Angle;
use cue_core::MAX_CUT_ANGLE;
use cue_core::MC_BASE_SAMPLES;
use cue_core::MIN_VIEW_SCORE;
use cue_core::PENALTY_SCRATCH;
use cue_core::QUALITY_THRESHOLD;
use cue_core::RUNOUT_BREADTH;
use cue_core::RUNOUT_DEPTH;
use cue_core::Utility;
use cue_core::WEIGHT_ALIGN;
use cue_core::WEIGHT_NEAR;
use cue_core::WEIGHT_NEXT;
use cue_core::WEIGHT_POT;
use cue_core::WEIGHT_RUNOUT;
use cue_core::WEIGHT_VIEW;

/// Coefficients of the composite shot quality.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Weights {
    pub pot: Utility,
    pub align: Utility,
    pub view: Utility,
    pub next: Utility,
    pub near: Utility,
    pub runout: Utility,
    pub scratch: Utility,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            pot: WEIGHT_POT,
            align: WEIGHT_ALIGN,
            view: WEIGHT_VIEW,
            next: WEIGHT_NEXT,
            near: WEIGHT_NEAR,
            runout: WEIGHT_RUNOUT,
            scratch: PENALTY_SCRATCH,
        }
    }
}

/// Search grid and thresholds for [`Planner`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlannerConfig {
    pub powers: Vec<f32>,
    pub spins: Vec<Spin>,
    pub weights: Weights,
    pub max_cut: Angle,
    pub min_view: f32,
    /// Monte Carlo samples before length scaling.
    pub samples: usize,
    pub depth: usize,
    pub breadth: usize,
    /// Minimum quality for a pot to beat the safety fallback.
    pub threshold: Utility,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            powers: vec![0.5, 0.7, 0.9, 1.0],
            spins: Spin::grid().to_vec(),
            weights: Weights::default(),
            max_cut: MAX_CUT_ANGLE,
            min_view: MIN_VIEW_SCORE,
            samples: MC_BASE_SAMPLES,
            depth: RUNOUT_DEPTH,
            breadth: RUNOUT_BREADTH,
            threshold: QUALITY_THRESHOLD,
        }
    }
}
