use cue_core::Arbitrary;
use cue_core::NOMINAL_FRICTION;
use cue_rules::Ball;
use cue_table::Point;
use cue_table::Table;

/// A ball at rest somewhere on the cloth.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placed {
    pub ball: Ball,
    pub at: Point,
}

impl Placed {
    pub fn new(ball: Ball, at: Point) -> Self {
        Self { ball, at }
    }
}

/// Read-only table picture handed to a planner.
///
/// The ball vector is an arena: an index names the same ball for the whole
/// planning call, and hypothetical continuations are expressed as a [`Diff`]
/// against it rather than as edited copies.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    table: Table,
    balls: Vec<Placed>,
    /// Cloth friction; scales how far the cue ball rolls after contact.
    friction: f32,
}

impl Snapshot {
    /// Balls beyond the 64th are dropped; no variant racks that many.
    pub fn new(table: Table, mut balls: Vec<Placed>, friction: f32) -> Self {
        balls.truncate(u64::BITS as usize);
        Self {
            table,
            balls,
            friction,
        }
    }
    pub fn table(&self) -> &Table {
        &self.table
    }
    pub fn balls(&self) -> &[Placed] {
        &self.balls
    }
    pub fn friction(&self) -> f32 {
        self.friction
    }
    pub fn ball(&self, index: usize) -> Option<&Placed> {
        self.balls.get(index)
    }
    /// Arena index of the cue ball.
    pub fn cue(&self) -> Option<usize> {
        self.balls.iter().position(|p| p.ball.is_cue())
    }
    /// Cue ball position under `diff`.
    pub fn cue_at(&self, diff: &Diff) -> Option<Point> {
        diff.cue()
            .or_else(|| self.cue().map(|i| self.balls[i].at))
    }
    /// Object balls still on the table under `diff`, with their arena index.
    pub fn objects<'a>(&'a self, diff: &'a Diff) -> impl Iterator<Item = (usize, &'a Placed)> + 'a {
        self.balls
            .iter()
            .enumerate()
            .filter(|(_, p)| p.ball.is_object())
            .filter(|(i, _)| !diff.is_potted(*i))
    }
    /// Positions of object balls under `diff` other than `except`.
    pub fn obstacles(&self, diff: &Diff, except: usize) -> Vec<Point> {
        self.objects(diff)
            .filter(|(i, _)| *i != except)
            .map(|(_, p)| p.at)
            .collect()
    }
}

impl Arbitrary for Snapshot {
    /// Default table with the cue and a random subset of the fifteen numbered balls.
    fn random() -> Self {
        let table = Table::default();
        let r = table.radius();
        let spot = |u: Point| {
            Point::new(
                r + u.x * (table.width() - 2.0 * r),
                r + u.y * (table.height() - 2.0 * r),
            )
        };
        let mut balls = vec![Placed::new(Ball::Cue, spot(Point::random()))];
        balls.extend(
            (1..=15u8)
                .filter(|_| rand::random_bool(0.6))
                .map(|n| Placed::new(Ball::Number(n), spot(Point::random()))),
        );
        Self::new(table, balls, NOMINAL_FRICTION)
    }
}

/// A hypothetical continuation of a [`Snapshot`]: which arena balls have
/// dropped and where the cue ball now rests.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diff {
    potted: u64,
    cue: Option<Point>,
}

impl Diff {
    pub fn pot(mut self, index: usize) -> Self {
        self.potted |= 1u64.checked_shl(index as u32).unwrap_or(0);
        self
    }
    pub fn with_cue(mut self, at: Point) -> Self {
        self.cue = Some(at);
        self
    }
    pub fn is_potted(&self, index: usize) -> bool {
        self.potted & 1u64.checked_shl(index as u32).unwrap_or(0) != 0
    }
    pub fn potted(&self) -> u64 {
        self.potted
    }
    pub fn cue(&self) -> Option<Point> {
        self.cue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> Snapshot {
        Snapshot::new(
            Table::default(),
            vec![
                Placed::new(Ball::Number(1), Point::new(100.0, 100.0)),
                Placed::new(Ball::Cue, Point::new(500.0, 250.0)),
                Placed::new(Ball::Number(2), Point::new(900.0, 400.0)),
            ],
            0.98,
        )
    }

    #[test]
    fn cue_is_found_anywhere_in_arena() {
        let s = snapshot();
        assert_eq!(s.cue(), Some(1));
        assert_eq!(s.cue_at(&Diff::default()), Some(Point::new(500.0, 250.0)));
    }

    #[test]
    fn diff_hides_potted_balls_and_moves_cue() {
        let s = snapshot();
        let diff = Diff::default().pot(0).with_cue(Point::new(10.0, 10.0));
        let left = s.objects(&diff).map(|(i, _)| i).collect::<Vec<_>>();
        assert_eq!(left, vec![2]);
        assert_eq!(s.cue_at(&diff), Some(Point::new(10.0, 10.0)));
        assert!(s.obstacles(&diff, 2).is_empty());
        assert_eq!(s.obstacles(&Diff::default(), 2), vec![Point::new(100.0, 100.0)]);
    }

    #[test]
    fn out_of_range_indices_are_ignored() {
        let diff = Diff::default().pot(64).pot(3);
        assert!(!diff.is_potted(64));
        assert!(diff.is_potted(3));
        assert_eq!(diff.potted(), 8);
    }

    #[test]
    fn random_snapshots_stay_on_the_cloth() {
        for _ in 0..32 {
            let s = Snapshot::random();
            assert_eq!(s.cue(), Some(0));
            assert!(s.balls().iter().all(|p| s.table().contains(&p.at)));
        }
    }
}
