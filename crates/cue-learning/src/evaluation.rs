use super::*;
use cue_core::FOUL_RISK;
use cue_core::FOUL_RISK_RADII;
use cue_core::Length;
use cue_core::Probability;
use cue_core::Utility;
use cue_rules::Colour;
use cue_table::Point;

/// Where the cue ball stops after driving the object at `at` toward
/// `toward`, by stroke. Offsets are in ball radii.
pub fn rollout(radius: Length, cue: Point, at: Point, toward: Point, spin: Spin) -> Point {
    let forward = (toward - at).unit();
    let back = (cue - at).unit();
    let side = std::f32::consts::PI / 12.0;
    match spin {
        Spin::Stun => at,
        Spin::FollowShort => at + forward * (3.0 * radius),
        Spin::FollowLong => at + forward * (6.0 * radius),
        Spin::DrawShort => at + back * (2.0 * radius),
        Spin::DrawLong => at + back * (4.0 * radius),
        Spin::SideLeft => at + forward.rotate(-side) * (4.0 * radius),
        Spin::SideRight => at + forward.rotate(side) * (4.0 * radius),
    }
}

/// Scores candidates against one table.
pub struct Judge<'a> {
    state: &'a TableState,
    memory: &'a dyn ShotMemory,
    rules: &'a AdvisorRules,
}

impl<'a> Judge<'a> {
    pub fn new(state: &'a TableState, memory: &'a dyn ShotMemory, rules: &'a AdvisorRules) -> Self {
        Self {
            state,
            memory,
            rules,
        }
    }
    pub fn state(&self) -> &TableState {
        self.state
    }
    /// Cue-ball resting point after `shot`; safeties leave it where it is.
    pub fn rest(&self, shot: &Candidate) -> Point {
        let Some(at) = self.state.ball(shot.target).map(|p| p.at) else {
            return shot.cue;
        };
        match shot.entry {
            Some(entry) => rollout(self.state.radius(), shot.cue, at, entry, shot.params.spin),
            None => shot.cue,
        }
    }
    /// Heuristic pot chance blended with what the memory has learned
    /// about similar shots. Safeties never pot.
    pub fn pot(&self, shot: &Candidate) -> Probability {
        let (true, Some(angle)) = (shot.is_pot(), shot.angle) else {
            return 0.0;
        };
        let Some(at) = self.state.ball(shot.target).map(|p| p.at) else {
            return 0.0;
        };
        let table = self.state.table();
        let r = self.state.radius();
        let diagonal = table.diagonal();
        let degrees = angle.to_degrees();
        let view = (2.0 * r).atan2(shot.to_pocket.max(1.0)).to_degrees();
        let ratio = degrees / (view + 1e-6);
        let aim = match ratio {
            x if x <= 1.0 => 0.9,
            x if x <= 1.5 => 0.6,
            _ => 0.3,
        };
        let distance = 1.0 - ((shot.to_target + shot.to_pocket) / diagonal).min(1.0);
        let mut p = aim * 0.8 + distance * 0.2;
        if shot.kind == Kind::Bank {
            p *= self.rules.bank_penalty;
        }
        if let Some(rate) = self.memory.rate(Bucket::of(angle, shot.to_pocket)) {
            p = (p + rate) / 2.0;
        }
        if table.cushion_gap(&at) < 2.0 * r {
            p -= 0.1;
        }
        if self.state.shots() > 1 {
            p += 0.05;
        }
        p += ((10.0 - degrees) / 100.0).max(0.0);
        let center = 1.0 - (self.rest(shot).distance(&table.center()) / diagonal).min(1.0);
        p = p * 0.9 + center * 0.1;
        p.clamp(0.0, 1.0)
    }
    /// Value of the follow-up `shot`, judged on this (post-shot) table.
    pub fn position(&self, shot: &Candidate, colour: Colour) -> Utility {
        let table = self.state.table();
        let straight = self.rules.straight;
        let bonus = shot
            .angle
            .map(|a| ((straight - a) / straight).max(0.0) * 0.2)
            .unwrap_or(0.0);
        let base = match self.state.count(colour) {
            0 | 1 => 1.2,
            _ => 0.8,
        };
        let center = 0.1 * (1.0 - (self.rest(shot).distance(&table.center()) / table.diagonal()).min(1.0));
        (self.pot(shot) + bonus) * base + center
    }
    /// Penalty for leaving the cue ball hanging over a pocket.
    pub fn risk(&self, shot: &Candidate) -> Utility {
        let reach = self.state.radius() * FOUL_RISK_RADII;
        match self.state.table().near_pocket(&self.rest(shot), reach) {
            true => FOUL_RISK,
            false => 0.0,
        }
    }
    /// Safeties are worth more the farther the cue sits from the nearest
    /// opponent ball.
    pub fn safety(&self, opponent: Option<Colour>) -> Utility {
        let (Some(cue), Some(colour)) = (self.state.cue(), opponent) else {
            return 0.5;
        };
        self.state
            .own(colour)
            .map(|(_, p)| p.at.distance(&cue))
            .min_by(|a, b| a.total_cmp(b))
            .map_or(0.5, |d| 0.3 + 0.4 * (d / self.state.table().diagonal()))
    }
    /// Expected value of `shot`: pot chance times one plus the best
    /// follow-up, less foul risk.
    pub fn value(&self, shot: &Candidate, colour: Colour, opponent: Option<Colour>) -> Utility {
        if !shot.is_pot() {
            return self.safety(opponent);
        }
        let p = self.pot(shot);
        let ref next = self.state.after(shot.target, self.rest(shot));
        let follow = next
            .cue()
            .and_then(|cue| fast(next, colour, cue))
            .map(|nc| Judge::new(next, self.memory, self.rules).position(&nc, colour))
            .unwrap_or(0.0)
            .max(0.0);
        p * (1.0 + follow) - self.risk(shot)
    }
}
