use super::*;
use cue_core::CUE_PATH_MARGIN;
use cue_core::Length;
use cue_core::MC_BASE_SAMPLES;
use cue_core::MC_JITTER;
use cue_core::MC_MAX_GROWTH;
use cue_core::MC_TOLERANCE;
use cue_core::Probability;
use cue_table::Point;
use rand::Rng;
use rand::rngs::SmallRng;

/// Deterministic sample stream for one (target, pocket, power) evaluation.
pub fn stream(seed: u64, pair: &Pair, power: f32) -> SmallRng {
    use rand::SeedableRng;
    use std::hash::DefaultHasher;
    use std::hash::Hash;
    use std::hash::Hasher;
    let ref mut hasher = DefaultHasher::new();
    seed.hash(hasher);
    pair.target.hash(hasher);
    pair.pocket.hash(hasher);
    power.to_bits().hash(hasher);
    SmallRng::seed_from_u64(hasher.finish())
}

/// Samples drawn for a shot of `length` on a table of `diagonal`.
pub fn samples(length: Length, diagonal: Length, base: usize) -> usize {
    let growth = (1.0 + 2.0 * length / diagonal).clamp(1.0, MC_MAX_GROWTH);
    (base as f32 * growth).round() as usize
}

/// Approximately standard normal: centred, rescaled sum of three uniforms.
fn jitter<R: Rng>(rng: &mut R) -> f32 {
    let sum = rng.random::<f32>() + rng.random::<f32>() + rng.random::<f32>();
    (sum - 1.5) * 2.0
}

/// Fraction of jittered aims that still send the cue ball to the ghost point.
///
/// Each sample perturbs the cue heading; the aim counts if the perturbed
/// contact point lies within tolerance of the ideal ghost, on the cloth, and
/// the cue's path to it stays clear.
pub fn pot_chance<R: Rng>(
    rng: &mut R,
    snapshot: &Snapshot,
    diff: &Diff,
    cue: &Point,
    pair: &Pair,
    power: f32,
    base: usize,
) -> Probability {
    let table = snapshot.table();
    let r = table.radius();
    let diagonal = table.diagonal();
    let length = pair.length(cue);
    let reach = cue.distance(&pair.ghost);
    let heading = (pair.ghost - *cue).heading();
    let sigma = MC_JITTER * (1.0 + length / diagonal) * (0.75 + 0.5 * power);
    let ref obstacles = snapshot.obstacles(diff, pair.target);
    let n = samples(length, diagonal, base).max(1);
    let hits = (0..n)
        .map(|_| heading + sigma * jitter(rng))
        .map(|a| *cue + Point::polar(a) * reach)
        .filter(|g| g.distance(&pair.ghost) <= MC_TOLERANCE * r)
        .filter(|g| table.contains(g))
        .filter(|g| !cue_table::blocked(cue, g, obstacles, r, CUE_PATH_MARGIN))
        .count();
    hits as Probability / n as Probability
}

/// [`pot_chance`] with the default sample base.
pub fn estimate<R: Rng>(rng: &mut R, snapshot: &Snapshot, diff: &Diff, cue: &Point, pair: &Pair, power: f32) -> Probability {
    pot_chance(rng, snapshot, diff, cue, pair, power, MC_BASE_SAMPLES)
}
