//! Core type aliases, traits, and tuning constants for cue-sports adjudication.
//!
//! Every other crate in the workspace reads its thresholds and weights from
//! here, so a tuning pass only ever touches this file.
#![allow(dead_code)]

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Table-space distances (same unit as the caller's table width).
pub type Length = f32;
/// Angles in radians.
pub type Angle = f32;
/// Pot chances, sampling fractions, and learned success rates.
pub type Probability = f32;
/// Quality scores and expected values.
pub type Utility = f32;
/// Snooker frame points.
pub type Points = u32;

// ============================================================================
// TRAITS
// ============================================================================
/// Random instance generation for testing and Monte Carlo sampling.
pub trait Arbitrary {
    /// Generate a uniformly random instance.
    fn random() -> Self;
}

// ============================================================================
// TABLE GEOMETRY
// All multipliers are in units of ball radius.
// ============================================================================
/// How far a pocket's capture point sits inside the mouth, toward the centre.
pub const POCKET_ENTRY_OFFSET: f32 = 1.05;
/// A path is obstructed when it passes within this many radii of a ball centre.
pub const OBSTRUCTION_REACH: f32 = 2.0;
/// Extra margin applied to the cue-to-ghost path (the cue ball is wider than a line).
pub const CUE_PATH_MARGIN: f32 = 1.1;
/// Another ball this close to a pocket entry blocks the pocket.
pub const POCKET_CLEARANCE: f32 = 1.1;

// ============================================================================
// RULE ENGINES
// ============================================================================
/// Object balls per group in 8-ball variants.
pub const GROUP_SIZE: u8 = 7;
/// Reds racked at the start of a snooker frame.
pub const REDS: u8 = 15;
/// Consecutive fouls that lose a 9-ball frame.
pub const FOUL_LIMIT: u8 = 3;
/// Smallest penalty a snooker foul can award.
pub const SNOOKER_MIN_PENALTY: Points = 4;
/// Shots granted to the incoming player after a UK 8-ball foul.
pub const VISIT_SHOTS: u8 = 2;

// ============================================================================
// BASIC PLANNER
// Candidate filters and composite quality weights.
// quality = Σ wᵢ·termᵢ − penalty, clamped into [0, 1].
// ============================================================================
/// Largest cut angle admitted by the strict candidate filter (45°).
pub const MAX_CUT_ANGLE: Angle = std::f32::consts::FRAC_PI_4;
/// Smallest pocket-view score admitted by the strict candidate filter.
pub const MIN_VIEW_SCORE: f32 = 0.3;
/// Weight of the Monte Carlo pot probability.
pub const WEIGHT_POT: Utility = 0.30;
/// Weight of the cut-angle alignment.
pub const WEIGHT_ALIGN: Utility = 0.20;
/// Weight of the pocket view.
pub const WEIGHT_VIEW: Utility = 0.18;
/// Weight of the cue-ball proximity to the next object ball.
pub const WEIGHT_NEXT: Utility = 0.08;
/// Weight of the target-to-pocket closeness.
pub const WEIGHT_NEAR: Utility = 0.08;
/// Weight of the recursive run-out potential.
pub const WEIGHT_RUNOUT: Utility = 0.16;
/// Subtracted when the projected cue ball rests on a pocket.
pub const PENALTY_SCRATCH: Utility = 0.20;
/// Cue ball resting within this many radii of a pocket counts as a scratch risk.
pub const SCRATCH_RADII: f32 = 1.2;
/// Object balls farther than this many radii from the pocket score zero closeness.
pub const NEAR_HOLE_RADII: f32 = 20.0;
/// The search stops early once a decision beats this quality.
pub const QUALITY_THRESHOLD: Utility = 0.1;
/// Plies explored by the run-out lookahead.
pub const RUNOUT_DEPTH: usize = 2;
/// Continuations explored per ply of the run-out lookahead.
pub const RUNOUT_BREADTH: usize = 3;
/// Power assumed for continuation shots inside the lookahead.
pub const LOOKAHEAD_POWER: f32 = 0.7;
/// Cue travel after contact as a fraction of the table diagonal at full power.
pub const ROLL_FRACTION: f32 = 0.1;
/// Cloth friction the roll fraction is calibrated against.
pub const NOMINAL_FRICTION: f32 = 0.98;
/// Side-spin swerve as a fraction of the longer table side at full power.
pub const SIDE_FRACTION: f32 = 0.04;
/// Ball-in-hand placements behind the ghost point, in radii.
pub const PLACEMENT_RADII: [f32; 5] = [4.0, 6.0, 8.0, 10.0, 12.0];
/// Power of the corner safety fallback.
pub const SAFETY_POWER: f32 = 0.5;

// ============================================================================
// MONTE CARLO POT ESTIMATION
// samples = round(BASE · clamp(1 + 2·length/diagonal, 1, GROWTH))
// ============================================================================
/// Samples drawn for a zero-length shot.
pub const MC_BASE_SAMPLES: usize = 28;
/// Cap on the length-driven sample growth factor.
pub const MC_MAX_GROWTH: f32 = 3.0;
/// Aim jitter standard deviation (radians) before length and power scaling.
pub const MC_JITTER: Angle = 0.01;
/// A jittered ghost farther than this many radii from the ideal one misses.
pub const MC_TOLERANCE: f32 = 0.5;

// ============================================================================
// ADVANCED PLANNER
// ============================================================================
/// Cut angles at or below this (15°) are "straight" and preferred exclusively.
pub const STRAIGHT_THRESHOLD: Angle = std::f32::consts::PI / 12.0;
/// Below this best pot probability, safeties join the candidate pool.
pub const SAFETY_THRESHOLD: Probability = 0.25;
/// Deepest cushion sequence searched for kick safeties.
pub const MAX_KICK_RAILS: usize = 4;
/// Pot probability multiplier for bank shots.
pub const BANK_PENALTY: Probability = 0.5;
/// Another ball within this many radii makes a target "crowded".
pub const CROWD_RADII: f32 = 2.2;
/// A pocket within this many radii of the cue line makes a target invisible.
pub const POCKET_LINE_RADII: f32 = 1.5;
/// Foul risk assigned to a rollout ending near a pocket.
pub const FOUL_RISK: Utility = 0.6;
/// Rollout within this many radii of a pocket carries the foul risk.
pub const FOUL_RISK_RADII: f32 = 1.1;
/// Radius of the advertised position window, in ball radii.
pub const POSITION_WINDOW_RADII: f32 = 4.0;

// ============================================================================
// SHOT MEMORY
// Learned success rates keyed by (angle bucket, distance bucket).
// ============================================================================
/// Width of an angle bucket in degrees.
pub const ANGLE_BUCKET_DEGREES: f32 = 10.0;
/// Width of a distance bucket in table units.
pub const DISTANCE_BUCKET: Length = 50.0;
/// Buckets retained before the least recently touched one is evicted.
pub const MEMORY_CAPACITY: usize = 1024;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "logging")]
pub fn log() -> anyhow::Result<()> {
    std::fs::create_dir_all("logs")?;
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)?
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time))?,
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file])?;
    log::info!("logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_weights_leave_headroom_for_penalty() {
        let total =
            WEIGHT_POT + WEIGHT_ALIGN + WEIGHT_VIEW + WEIGHT_NEXT + WEIGHT_NEAR + WEIGHT_RUNOUT;
        assert!((total - 1.0).abs() < 1e-6);
        assert!(PENALTY_SCRATCH < total);
    }

    #[test]
    fn strict_filter_is_looser_than_straight_preference() {
        assert!(STRAIGHT_THRESHOLD < MAX_CUT_ANGLE);
    }
}
