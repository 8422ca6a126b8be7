use super::*;
use cue_core::POSITION_WINDOW_RADII;
use cue_core::Utility;
use cue_rules::Colour;
use cue_table::Point;
use std::sync::Arc;

/// Shot selector for UK blackball.
///
/// Generates candidates for the shooter's colour, keeps straight pots
/// exclusively when any exist, and picks the highest expected value.
/// Outcomes reported through [`Advisor::record`] feed the shared
/// [`ShotMemory`] and sharpen later pot estimates.
#[derive(Clone)]
pub struct Advisor {
    memory: Arc<dyn ShotMemory>,
}

impl Default for Advisor {
    fn default() -> Self {
        Self::new(Arc::new(Memory::default()))
    }
}

impl std::fmt::Debug for Advisor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Advisor")
            .field("memory", &self.memory.len())
            .finish()
    }
}

impl Advisor {
    pub fn new(memory: Arc<dyn ShotMemory>) -> Self {
        Self { memory }
    }
    pub fn memory(&self) -> &Arc<dyn ShotMemory> {
        &self.memory
    }
    /// Best plan for the shooter, or `None` without a cue ball or any
    /// ball to play at.
    pub fn select(&self, state: &TableState, rules: Option<AdvisorRules>) -> Option<Plan> {
        let ref rules = rules.unwrap_or_default();
        if state.is_open() {
            let yellow = self.choose(state, Colour::Yellow, Some(Colour::Red), rules);
            let red = self.choose(state, Colour::Red, Some(Colour::Yellow), rules);
            return match (yellow, red) {
                (Some(y), Some(r)) if r.ev > y.ev => Some(r),
                (Some(y), _) => Some(y),
                (None, r) => r,
            };
        }
        let group = state.ball_on()?;
        let own = group.colour()?;
        let opponent = group.other().colour();
        match state.count(own) {
            0 => self.choose(state, Colour::Black, opponent, rules),
            _ => self.choose(state, own, opponent, rules),
        }
    }
    /// Report whether a pot plan went in. Safeties teach nothing.
    pub fn record(&self, plan: &Plan, success: bool) {
        if let Some(bucket) = plan.bucket().filter(|_| !plan.is_safety()) {
            log::debug!("recording {} at bucket {}", if success { "pot" } else { "miss" }, bucket);
            self.memory.record(bucket, success);
        }
    }
    pub fn reset(&self) {
        self.memory.reset();
    }
}

/// Selection internals.
impl Advisor {
    fn pool(&self, state: &TableState, colour: Colour, cue: Point, rules: &AdvisorRules) -> Vec<Candidate> {
        let ref judge = Judge::new(state, self.memory.as_ref(), rules);
        let mut pool = pots(state, colour, cue);
        if pool.is_empty() {
            pool = banks(state, colour, cue);
        }
        pool.extend(free_balls(state));
        if pool.is_empty() {
            pool = kicks(state, colour, cue, rules.kick_rails);
        }
        if pool.is_empty() {
            pool.extend(gentle(state, colour, cue));
        } else {
            let best = pool.iter().map(|c| judge.pot(c)).fold(0.0, Utility::max);
            if best < rules.safety {
                pool.extend(gentle(state, colour, cue));
            }
        }
        let straight = pool
            .iter()
            .filter(|c| c.angle.is_some_and(|a| a <= rules.straight))
            .copied()
            .collect::<Vec<_>>();
        match straight.is_empty() {
            true => pool,
            false => straight,
        }
    }
    fn choose(
        &self,
        state: &TableState,
        colour: Colour,
        opponent: Option<Colour>,
        rules: &AdvisorRules,
    ) -> Option<Plan> {
        let cue = state.cue()?;
        let pool = self.pool(state, colour, cue, rules);
        let ref judge = Judge::new(state, self.memory.as_ref(), rules);
        let (shot, ev) = pool
            .into_iter()
            .map(|c| (c, judge.value(&c, colour, opponent)))
            .fold(None, |best: Option<(Candidate, Utility)>, (c, ev)| match best {
                Some((_, top)) if ev <= top => best,
                _ => Some((c, ev)),
            })?;
        log::trace!("{} {} ev={:.3} for {}", shot.kind, shot.params, ev, colour);
        Some(self.plan(judge, shot, ev))
    }
    fn plan(&self, judge: &Judge<'_>, shot: Candidate, ev: Utility) -> Plan {
        let state = judge.state();
        let target = state.ball(shot.target).copied();
        let at = target.map(|p| p.at).unwrap_or(shot.cue);
        let (aim, position) = match shot.action() {
            Action::Safety => (shot.anchor.unwrap_or(at), shot.cue),
            Action::Pot => (at, judge.rest(&shot)),
        };
        let notes = match (shot.kind, target) {
            (Kind::Kick | Kind::Gentle, _) => String::from("safety play"),
            (Kind::Direct, Some(t)) => format!("pot {}", t.ball),
            (kind, Some(t)) => format!("pot {} ({})", t.ball, kind),
            (_, None) => String::from("pot"),
        };
        let pot = shot.is_pot();
        Plan {
            action: shot.action(),
            kind: shot.kind,
            target: target.map(|p| p.ball),
            target_index: target.map(|_| shot.target),
            pocket: shot.pocket,
            aim,
            params: shot.params,
            position,
            window: state.radius() * POSITION_WINDOW_RADII,
            ev,
            notes,
            angle: shot.angle.filter(|_| pot),
            to_pocket: Some(shot.to_pocket).filter(|_| pot),
            cue: (shot.kind == Kind::FreeBall || state.free_ball()).then_some(shot.cue),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cue_planner::Placed;
    use cue_rules::Ball;
    use cue_rules::Group;
    use cue_table::Table;

    fn pockets(points: &[(f32, f32)]) -> Vec<Point> {
        points.iter().map(|(x, y)| Point::new(*x, *y)).collect()
    }
    fn full() -> Table {
        let six = [(0.0, 0.0), (1000.0, 0.0), (0.0, 250.0), (1000.0, 250.0), (0.0, 500.0), (1000.0, 500.0)];
        Table::new(1000.0, 500.0, 10.0, pockets(&six)).unwrap()
    }
    fn ball(colour: Colour, x: f32, y: f32) -> Placed {
        Placed::new(Ball::Colour(colour), Point::new(x, y))
    }
    fn cue(x: f32, y: f32) -> Placed {
        Placed::new(Ball::Cue, Point::new(x, y))
    }

    #[test]
    fn open_table_takes_the_better_colour() {
        let state = TableState::new(
            full(),
            vec![cue(100.0, 100.0), ball(Colour::Yellow, 200.0, 100.0), ball(Colour::Red, 800.0, 400.0)],
        );
        let plan = Advisor::default().select(&state, None).unwrap();
        assert_eq!(plan.target, Some(Ball::Colour(Colour::Red)));
        assert_eq!(plan.action, Action::Pot);
        assert_eq!(plan.target_index, Some(2));
    }

    #[test]
    fn blocked_pot_falls_back_to_safety() {
        let state = TableState::new(
            full(),
            vec![cue(100.0, 250.0), ball(Colour::Yellow, 200.0, 250.0), ball(Colour::Red, 150.0, 250.0)],
        )
        .with_group(Group::Yellow);
        let plan = Advisor::default().select(&state, None).unwrap();
        assert_eq!(plan.action, Action::Safety);
        assert!(plan.angle.is_none());
    }

    #[test]
    fn cushion_escape_aims_at_a_rail() {
        let table = Table::new(300.0, 100.0, 5.0, pockets(&[(0.0, 0.0), (300.0, 0.0), (0.0, 100.0), (300.0, 100.0)])).unwrap();
        let state = TableState::new(
            table,
            vec![cue(50.0, 50.0), ball(Colour::Yellow, 250.0, 50.0), ball(Colour::Red, 150.0, 50.0)],
        )
        .with_group(Group::Yellow);
        let plan = Advisor::default().select(&state, None).unwrap();
        assert_eq!(plan.action, Action::Safety);
        assert_eq!(plan.kind, Kind::Kick);
        let aim = plan.aim;
        assert!(aim.x == 0.0 || aim.x == 300.0 || aim.y == 0.0 || aim.y == 100.0);
    }

    #[test]
    fn straight_pot_is_preferred() {
        let state = TableState::new(
            full(),
            vec![cue(100.0, 250.0), ball(Colour::Yellow, 800.0, 250.0), ball(Colour::Yellow, 200.0, 300.0)],
        )
        .with_group(Group::Yellow);
        let plan = Advisor::default().select(&state, None).unwrap();
        assert_eq!(plan.target, Some(Ball::Colour(Colour::Yellow)));
        assert_eq!(plan.aim, Point::new(800.0, 250.0));
        assert_eq!(plan.pocket, Some(3));
    }

    #[test]
    fn pocket_on_the_line_blocks_the_view() {
        let table = Table::new(
            300.0,
            200.0,
            10.0,
            pockets(&[(150.0, 100.0), (0.0, 0.0), (300.0, 0.0), (0.0, 200.0), (300.0, 200.0)]),
        )
        .unwrap();
        let state = TableState::new(
            table,
            vec![cue(50.0, 100.0), ball(Colour::Yellow, 250.0, 100.0), ball(Colour::Red, 150.0, 150.0)],
        )
        .with_group(Group::Yellow);
        let plan = Advisor::default().select(&state, None).unwrap();
        assert_eq!(plan.action, Action::Safety);
    }

    #[test]
    fn clustered_targets_are_avoided() {
        let table = Table::new(300.0, 200.0, 10.0, pockets(&[(0.0, 0.0), (300.0, 0.0), (0.0, 200.0), (300.0, 200.0)])).unwrap();
        let state = TableState::new(
            table,
            vec![
                cue(50.0, 50.0),
                ball(Colour::Yellow, 200.0, 100.0),
                ball(Colour::Yellow, 215.0, 105.0),
                ball(Colour::Red, 150.0, 150.0),
            ],
        )
        .with_group(Group::Yellow);
        let plan = Advisor::default().select(&state, None).unwrap();
        assert_eq!(plan.action, Action::Safety);
    }

    #[test]
    fn cleared_group_plays_the_black() {
        let state = TableState::new(
            full(),
            vec![cue(300.0, 250.0), ball(Colour::Black, 500.0, 250.0), ball(Colour::Red, 700.0, 100.0)],
        )
        .with_group(Group::Yellow);
        let plan = Advisor::default().select(&state, None).unwrap();
        assert_eq!(plan.target, Some(Ball::Colour(Colour::Black)));
        assert_eq!(plan.action, Action::Pot);
        assert_eq!(plan.pocket, Some(3));
    }

    #[test]
    fn no_cue_ball_no_plan() {
        let state = TableState::new(full(), vec![ball(Colour::Yellow, 200.0, 100.0)]).with_group(Group::Yellow);
        assert!(Advisor::default().select(&state, None).is_none());
    }

    #[test]
    fn recorded_outcomes_reach_the_memory() {
        let advisor = Advisor::default();
        let state = TableState::new(
            full(),
            vec![cue(100.0, 250.0), ball(Colour::Yellow, 800.0, 250.0)],
        )
        .with_group(Group::Yellow);
        let plan = advisor.select(&state, None).unwrap();
        let bucket = plan.bucket().unwrap();
        advisor.record(&plan, false);
        advisor.record(&plan, true);
        assert_eq!(advisor.memory().rate(bucket), Some(0.5));
        advisor.reset();
        assert!(advisor.memory().is_empty());
    }

    #[test]
    fn safeties_are_not_recorded() {
        let advisor = Advisor::default();
        let state = TableState::new(
            full(),
            vec![cue(100.0, 250.0), ball(Colour::Yellow, 200.0, 250.0), ball(Colour::Red, 150.0, 250.0)],
        )
        .with_group(Group::Yellow);
        let plan = advisor.select(&state, None).unwrap();
        advisor.record(&plan, true);
        assert!(advisor.memory().is_empty());
    }

    #[test]
    fn shared_memory_sees_every_advisor() {
        let memory: Arc<dyn ShotMemory> = Arc::new(Memory::default());
        let a = Advisor::new(memory.clone());
        let b = Advisor::new(memory.clone());
        let state = TableState::new(full(), vec![cue(100.0, 250.0), ball(Colour::Yellow, 800.0, 250.0)])
            .with_group(Group::Yellow);
        let plan = a.select(&state, None).unwrap();
        a.record(&plan, true);
        assert_eq!(b.memory().len(), 1);
        assert_eq!(memory.len(), 1);
    }

    #[test]
    fn free_ball_offers_a_placement() {
        let state = TableState::new(
            full(),
            vec![cue(900.0, 400.0), ball(Colour::Red, 200.0, 150.0), ball(Colour::Yellow, 600.0, 200.0)],
        )
        .with_group(Group::Yellow)
        .with_free_ball()
        .with_shots(2);
        let plan = Advisor::default().select(&state, None).unwrap();
        assert_eq!(plan.action, Action::Pot);
        assert!(plan.cue.is_some());
    }

    #[test]
    fn plans_stay_bounded_on_random_tables() {
        use cue_core::Arbitrary;
        let advisor = Advisor::default();
        for _ in 0..16 {
            let table = Table::default();
            let r = table.radius();
            let spot = || {
                let u = Point::random();
                Point::new(r + u.x * (table.width() - 2.0 * r), r + u.y * (table.height() - 2.0 * r))
            };
            let mut balls = vec![Placed::new(Ball::Cue, spot())];
            for _ in 0..rand::random_range(1..8) {
                let colour = match rand::random_bool(0.5) {
                    true => Colour::Yellow,
                    false => Colour::Red,
                };
                balls.push(Placed::new(Ball::Colour(colour), spot()));
            }
            let state = TableState::new(table.clone(), balls);
            let Some(plan) = advisor.select(&state, None) else {
                continue;
            };
            assert!(plan.ev.is_finite());
            assert!(plan.ev <= 2.6);
            assert!(plan.target_index.is_some());
            assert!(plan.aim.is_finite());
        }
    }
}
