use super::*;
use cue_core::NEAR_HOLE_RADII;
use cue_core::PLACEMENT_RADII;
use cue_core::Probability;
use cue_core::SCRATCH_RADII;
use cue_core::Utility;
use cue_table::Point;

/// One unit of search work: a pair, a cue position and a pace.
#[derive(Debug, Clone, Copy)]
struct Job {
    pair: Pair,
    cue: Point,
    power: f32,
}

/// Variant-agnostic shot search.
///
/// Enumerates (target, pocket) pairs, estimates each pot by Monte Carlo
/// over a power and spin grid, scores position and run-out potential, and
/// keeps the best decision found before the deadline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Planner {
    config: PlannerConfig,
}

impl Planner {
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn plan(&self, request: &AimRequest) -> Decision {
        let deadline = Deadline::new(request.budget);
        let snapshot = &request.snapshot;
        let diff = Diff::default();
        let cue = snapshot.cue_at(&diff);
        let safety = || Decision::safety(snapshot, cue);
        if cue.is_none() && !request.ball_in_hand {
            log::debug!("planner: no cue ball and not in hand, playing safe");
            return safety();
        }
        let seed = request.seed.unwrap_or_else(rand::random);
        let max_cut = request.max_cut.unwrap_or(self.config.max_cut);
        let min_view = request.min_view.unwrap_or(self.config.min_view);
        let legal = request.legal(&request.target, &diff);
        let surveyed = survey(snapshot, &diff, &legal);
        let strict = cue
            .map(|c| clear(&surveyed, &c, max_cut, min_view))
            .unwrap_or_default();
        let pairs = match strict.is_empty() {
            true => surveyed,
            false => strict,
        };
        let jobs = self.jobs(request, &pairs, cue);
        log::debug!(
            "planner: {} legal, {} pairs, {} jobs, seed {}",
            legal.len(),
            pairs.len(),
            jobs.len(),
            seed
        );

        let mut best = None;
        for strict in [true, false] {
            let found = self.search(request, &jobs, seed, strict, min_view, &deadline);
            best = match (best, found) {
                (Some(a), Some(b)) => Some(better((0, a), (1, b)).1),
                (a, b) => a.or(b),
            };
            if deadline.expired() {
                log::debug!("planner: deadline after {:?}", deadline.elapsed());
                break;
            }
            if best.as_ref().is_some_and(|d: &Decision| d.quality >= self.config.threshold) {
                break;
            }
        }
        match best {
            Some(decision) if decision.quality >= self.config.threshold => {
                log::debug!("planner: {}", decision);
                decision
            }
            _ => {
                log::debug!("planner: nothing above {:.2}, playing safe", self.config.threshold);
                safety()
            }
        }
    }
}

/// Search internals.
impl Planner {
    fn jobs(&self, request: &AimRequest, pairs: &[Pair], cue: Option<Point>) -> Vec<Job> {
        let snapshot = &request.snapshot;
        let diff = Diff::default();
        let mut jobs = Vec::new();
        for pair in pairs {
            let spots = match request.ball_in_hand {
                true => self.placements(request, pair),
                false => cue.into_iter().collect(),
            };
            for spot in spots {
                if !pair.open_from(snapshot, &diff, &spot) {
                    continue;
                }
                for power in self.config.powers.iter().copied() {
                    jobs.push(Job {
                        pair: *pair,
                        cue: spot,
                        power,
                    });
                }
            }
        }
        jobs
    }

    /// Cue placements behind the ghost along the pocket line.
    fn placements(&self, request: &AimRequest, pair: &Pair) -> Vec<Point> {
        let snapshot = &request.snapshot;
        let table = snapshot.table();
        let r = table.radius();
        let diff = Diff::default();
        let back = (pair.at - pair.entry).unit();
        PLACEMENT_RADII
            .iter()
            .map(|m| pair.ghost + back * (m * r))
            .filter(|p| table.contains(p))
            .filter(|p| snapshot.objects(&diff).all(|(_, b)| b.at.distance(p) >= 2.0 * r))
            .filter(|p| request.baulk.is_none_or(|b| b.admits(p)))
            .collect()
    }

    fn search(
        &self,
        request: &AimRequest,
        jobs: &[Job],
        seed: u64,
        strict: bool,
        min_view: f32,
        deadline: &Deadline,
    ) -> Option<Decision> {
        #[cfg(feature = "parallel")]
        let found = self.parallel(request, jobs, seed, strict, min_view, deadline);
        #[cfg(not(feature = "parallel"))]
        let found = self.sequential(request, jobs, seed, strict, min_view, deadline);
        found.map(|(_, decision)| decision)
    }

    #[cfg_attr(feature = "parallel", allow(dead_code))]
    fn sequential(
        &self,
        request: &AimRequest,
        jobs: &[Job],
        seed: u64,
        strict: bool,
        min_view: f32,
        deadline: &Deadline,
    ) -> Option<(usize, Decision)> {
        jobs.iter()
            .enumerate()
            .filter_map(|(i, job)| self.attempt(request, i, job, seed, strict, min_view, deadline))
            .reduce(better)
    }

    /// Same reduction as [`Planner::sequential`]; ties resolve by job index,
    /// so the winner does not depend on scheduling.
    #[cfg(feature = "parallel")]
    fn parallel(
        &self,
        request: &AimRequest,
        jobs: &[Job],
        seed: u64,
        strict: bool,
        min_view: f32,
        deadline: &Deadline,
    ) -> Option<(usize, Decision)> {
        use rayon::iter::IndexedParallelIterator;
        use rayon::iter::IntoParallelRefIterator;
        use rayon::iter::ParallelIterator;
        jobs.par_iter()
            .enumerate()
            .filter_map(|(i, job)| self.attempt(request, i, job, seed, strict, min_view, deadline))
            .reduce_with(better)
    }

    fn attempt(
        &self,
        request: &AimRequest,
        index: usize,
        job: &Job,
        seed: u64,
        strict: bool,
        min_view: f32,
        deadline: &Deadline,
    ) -> Option<(usize, Decision)> {
        if deadline.expired() {
            return None;
        }
        self.evaluate(request, job, seed, strict, min_view, deadline)
            .map(|d| (index, d))
    }

    /// Best spin for one job; the pot estimate is shared across spins.
    fn evaluate(
        &self,
        request: &AimRequest,
        job: &Job,
        seed: u64,
        strict: bool,
        min_view: f32,
        deadline: &Deadline,
    ) -> Option<Decision> {
        let snapshot = &request.snapshot;
        let diff = Diff::default();
        let ref mut rng = stream(seed, &job.pair, job.power);
        let pot = pot_chance(rng, snapshot, &diff, &job.cue, &job.pair, job.power, self.config.samples);
        let mut best: Option<Decision> = None;
        for spin in self.config.spins.iter() {
            if deadline.expired() {
                break;
            }
            let Some(decision) = self.score(request, job, spin, pot, strict, min_view) else {
                continue;
            };
            if best.as_ref().is_none_or(|b| decision.quality > b.quality) {
                best = Some(decision);
            }
        }
        best
    }

    fn score(
        &self,
        request: &AimRequest,
        job: &Job,
        spin: &Spin,
        pot: Probability,
        strict: bool,
        min_view: f32,
    ) -> Option<Decision> {
        let snapshot = &request.snapshot;
        let table = snapshot.table();
        let r = table.radius();
        let diagonal = table.diagonal();
        let ref pair = job.pair;
        let ref cue = job.cue;
        let align = pair.alignment(cue);
        if strict && (align < 0.5 || pair.view < min_view) {
            return None;
        }
        let ball = snapshot.ball(pair.target)?.ball;
        let rest = rest(snapshot, cue, &pair.at, &pair.entry, job.power, spin);
        let follow = request.target.after(request.variant, &ball);
        let ref after = Diff::default().pot(pair.target).with_cue(rest);
        let next = request
            .legal(&follow, after)
            .iter()
            .filter_map(|i| snapshot.ball(*i))
            .map(|p| 1.0 - (rest.distance(&p.at) / diagonal).min(1.0))
            .reduce(Utility::max)
            .unwrap_or(1.0);
        let near = 1.0 - (pair.at.distance(&pair.entry) / (NEAR_HOLE_RADII * r)).min(1.0);
        let scratch = match table.near_pocket(&rest, SCRATCH_RADII * r) {
            true => 1.0,
            false => 0.0,
        };
        let runout = runout(request, &follow, after, self.config.depth, self.config.breadth);
        let ref w = self.config.weights;
        let quality = (w.pot * pot
            + w.align * align
            + w.view * pair.view
            + w.next * next
            + w.near * near
            + w.runout * runout
            - w.scratch * scratch)
            .clamp(0.0, 1.0);
        let angle = (pair.ghost - *cue).heading();
        log::trace!(
            "planner: {} via pocket {} power {:.2} spin {} -> {:.3}",
            ball,
            pair.pocket,
            job.power,
            spin,
            quality
        );
        Some(Decision {
            angle,
            power: job.power,
            spin: *spin,
            target: Some(ball),
            pocket: Some(pair.mouth),
            aim: Some(pair.ghost),
            quality,
            rationale: format!(
                "target={} pocket={} angle={:.2} power={:.2} spin={} pc={:.2} ca={:.2} vs={:.2} np={:.2} nh={:.2} ro={:.2} r={:.0}",
                ball, pair.pocket, angle, job.power, spin, pot, align, pair.view, next, near, runout, scratch
            ),
            cue: request.ball_in_hand.then_some(*cue),
        })
    }
}

/// Higher quality wins; ties go to the earlier job.
fn better(a: (usize, Decision), b: (usize, Decision)) -> (usize, Decision) {
    match b.1.quality.total_cmp(&a.1.quality) {
        std::cmp::Ordering::Greater => b,
        std::cmp::Ordering::Less => a,
        std::cmp::Ordering::Equal if b.0 < a.0 => b,
        std::cmp::Ordering::Equal => a,
    }
}

/// Plan with the default configuration.
pub fn plan_shot(request: &AimRequest) -> Decision {
    Planner::default().plan(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cue_core::Arbitrary;
    use cue_core::QUALITY_THRESHOLD;
    use cue_rules::Ball;
    use cue_rules::Group;
    use cue_rules::Target;
    use cue_rules::Variant;
    use cue_table::Table;
    use std::time::Duration;
    use std::time::Instant;

    fn request(balls: &[(Ball, f32, f32)]) -> AimRequest {
        let balls = balls
            .iter()
            .map(|(b, x, y)| Placed::new(*b, Point::new(*x, *y)))
            .collect();
        let snapshot = Snapshot::new(Table::default(), balls, 0.98);
        AimRequest::new(Variant::NineBall, Target::Lowest, snapshot).with_seed(11)
    }

    fn straight() -> AimRequest {
        request(&[(Ball::Cue, 300.0, 250.0), (Ball::Number(1), 150.0, 125.0)])
    }

    #[test]
    fn straight_shot_goes_to_the_corner() {
        let decision = plan_shot(&straight());
        assert_eq!(decision.target, Some(Ball::Number(1)));
        assert_eq!(decision.pocket, Some(Point::new(0.0, 0.0)));
        assert!(decision.quality > QUALITY_THRESHOLD && decision.quality <= 1.0);
        assert!(decision.rationale.starts_with("target=1"));
        assert!(decision.cue.is_none());
    }

    #[test]
    fn seeded_plans_repeat_exactly() {
        let a = plan_shot(&straight());
        let b = plan_shot(&straight());
        assert_eq!(a, b);
    }

    #[test]
    fn spent_budget_falls_back_to_safety() {
        let decision = plan_shot(&straight().with_budget(Duration::ZERO));
        assert!(decision.is_safety());
        assert_eq!(decision.rationale, "safety");
        assert_eq!(decision.quality, 0.0);
    }

    #[test]
    fn nothing_legal_plays_safe() {
        let mut req = straight();
        req.target = Target::Group(Group::Stripes);
        let decision = plan_shot(&req);
        assert!(decision.is_safety());
    }

    #[test]
    fn ball_in_hand_places_behind_the_ghost() {
        let req = request(&[(Ball::Number(1), 150.0, 125.0), (Ball::Number(2), 800.0, 400.0)])
            .in_hand(Some(Baulk::behind(300.0)));
        let decision = plan_shot(&req);
        let cue = decision.cue.unwrap();
        assert_eq!(decision.target, Some(Ball::Number(1)));
        assert!(cue.x <= 300.0);
        assert!(req.snapshot.table().contains(&cue));
        assert!(cue.distance(&Point::new(150.0, 125.0)) >= 24.0);
    }

    #[test]
    fn baulk_can_rule_out_every_placement() {
        let req = request(&[(Ball::Number(1), 150.0, 125.0)]).in_hand(Some(Baulk::behind(5.0)));
        let decision = plan_shot(&req);
        assert!(decision.is_safety());
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_search_matches_sequential() {
        let mut req = request(&[
            (Ball::Cue, 500.0, 250.0),
            (Ball::Number(1), 150.0, 125.0),
            (Ball::Number(2), 800.0, 380.0),
            (Ball::Number(3), 480.0, 60.0),
            (Ball::Number(4), 700.0, 200.0),
        ]);
        req.target = Target::Open;
        let planner = Planner::default();
        let cue = req.snapshot.cue_at(&Diff::default());
        let legal = req.legal(&req.target, &Diff::default());
        let pairs = survey(&req.snapshot, &Diff::default(), &legal);
        let jobs = planner.jobs(&req, &pairs, cue);
        assert!(!jobs.is_empty());
        let deadline = Deadline::new(None);
        let min_view = planner.config().min_view;
        for strict in [true, false] {
            let a = planner.sequential(&req, &jobs, 11, strict, min_view, &deadline);
            let b = planner.parallel(&req, &jobs, 11, strict, min_view, &deadline);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn ties_keep_the_earlier_job() {
        let d = plan_shot(&straight());
        let (i, _) = better((3, d.clone()), (5, d.clone()));
        assert_eq!(i, 3);
        let (i, _) = better((5, d.clone()), (3, d));
        assert_eq!(i, 3);
    }

    #[test]
    fn random_tables_yield_bounded_decisions() {
        for seed in 0..6 {
            let snapshot = Snapshot::random();
            let req = AimRequest::new(Variant::American, Target::Open, snapshot)
                .with_seed(seed)
                .with_budget(Duration::from_millis(200));
            let decision = plan_shot(&req);
            assert!((0.0..=1.0).contains(&decision.quality));
            assert!(!decision.rationale.is_empty());
            assert!(decision.angle.is_finite());
        }
    }

    #[test]
    fn deadline_bounds_the_search() {
        let snapshot = Snapshot::random();
        let budget = Duration::from_millis(20);
        let req = AimRequest::new(Variant::American, Target::Open, snapshot).with_budget(budget);
        let start = Instant::now();
        plan_shot(&req);
        assert!(start.elapsed() < budget + Duration::from_secs(2));
    }
}
