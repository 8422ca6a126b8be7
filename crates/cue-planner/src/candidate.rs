use super::*;
use cue_core::Angle;
use cue_core::CUE_PATH_MARGIN;
use cue_core::Length;
use cue_core::POCKET_CLEARANCE;
use cue_core::Utility;
use cue_table::Point;
use std::f32::consts::FRAC_PI_2;

/// A geometrically feasible (target ball, pocket) pairing.
///
/// Feasibility here ignores the cue ball: the ghost point is on the cloth,
/// the target's path to the pocket is clear and nothing crowds the entry.
/// Whether the cue can reach the ghost is [`Pair::open_from`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pair {
    pub target: usize,
    pub pocket: usize,
    pub at: Point,
    pub mouth: Point,
    pub entry: Point,
    pub ghost: Point,
    pub view: f32,
}

impl Pair {
    pub fn survey(snapshot: &Snapshot, diff: &Diff, target: usize, pocket: usize) -> Option<Self> {
        let table = snapshot.table();
        let r = table.radius();
        let at = snapshot.ball(target)?.at;
        let mouth = table.pocket(pocket)?;
        let entry = table.entry(mouth);
        let ghost = cue_table::ghost(&at, &entry, r);
        if !table.contains(&ghost) {
            return None;
        }
        let ref obstacles = snapshot.obstacles(diff, target);
        if cue_table::blocked(&at, &entry, obstacles, r, 1.0) {
            return None;
        }
        if obstacles.iter().any(|b| b.distance(&entry) < POCKET_CLEARANCE * r) {
            return None;
        }
        Some(Self {
            target,
            pocket,
            at,
            mouth,
            entry,
            ghost,
            view: cue_table::view(at.distance(&entry), r),
        })
    }
    /// Can a cue ball at `cue` travel to the ghost point untouched?
    pub fn open_from(&self, snapshot: &Snapshot, diff: &Diff, cue: &Point) -> bool {
        let ref obstacles = snapshot.obstacles(diff, self.target);
        !cue_table::blocked(cue, &self.ghost, obstacles, snapshot.table().radius(), CUE_PATH_MARGIN)
    }
    pub fn cut(&self, cue: &Point) -> Angle {
        cue_table::cut(cue, &self.at, &self.entry)
    }
    /// `1` dead straight, `0` at a right-angle cut or worse.
    pub fn alignment(&self, cue: &Point) -> Utility {
        1.0 - (self.cut(cue) / FRAC_PI_2).min(1.0)
    }
    /// Total ball travel: cue to target plus target to entry.
    pub fn length(&self, cue: &Point) -> Length {
        cue.distance(&self.at) + self.at.distance(&self.entry)
    }
    /// Cheap deterministic shot score for ranking continuations.
    pub fn ease(&self, cue: &Point, diagonal: Length) -> Utility {
        let short = 1.0 - (self.length(cue) / diagonal).min(1.0);
        0.5 * self.alignment(cue) + 0.25 * self.view + 0.25 * short
    }
}

/// Every feasible pairing of `legal` balls with the table's pockets.
pub fn survey(snapshot: &Snapshot, diff: &Diff, legal: &[usize]) -> Vec<Pair> {
    let pockets = snapshot.table().pockets().len();
    legal
        .iter()
        .flat_map(|t| (0..pockets).map(move |p| (*t, p)))
        .filter_map(|(t, p)| Pair::survey(snapshot, diff, t, p))
        .collect()
}

/// Pairs within the cut and view limits from `cue`, straightest first.
pub fn clear(pairs: &[Pair], cue: &Point, max_cut: Angle, min_view: f32) -> Vec<Pair> {
    let mut clear = pairs
        .iter()
        .filter(|p| p.cut(cue) <= max_cut && p.view >= min_view)
        .copied()
        .collect::<Vec<_>>();
    clear.sort_by(|a, b| {
        a.cut(cue)
            .total_cmp(&b.cut(cue))
            .then(b.view.total_cmp(&a.view))
    });
    clear
}
