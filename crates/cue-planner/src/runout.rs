use super::*;
use cue_core::LOOKAHEAD_POWER;
use cue_core::Utility;
use cue_rules::Target;

/// How much of a clearance remains from the position described by `diff`.
///
/// Pots the best `breadth` continuations by [`Pair::ease`] in turn, each
/// worth `ease · (0.5 + 0.5 · rest_of_runout)`. Nothing left to pot is a
/// completed run; no pottable ball, no cue ball, or no depth left is zero.
pub fn runout(request: &AimRequest, target: &Target, diff: &Diff, depth: usize, breadth: usize) -> Utility {
    let legal = request.legal(target, diff);
    if legal.is_empty() {
        return 1.0;
    }
    if depth == 0 {
        return 0.0;
    }
    let Some(cue) = request.snapshot.cue_at(diff) else {
        return 0.0;
    };
    let snapshot = &request.snapshot;
    let table = snapshot.table();
    let mut ranked = survey(snapshot, diff, &legal)
        .into_iter()
        .filter(|pair| pair.open_from(snapshot, diff, &cue))
        .map(|pair| (pair.ease(&cue, table.diagonal()), pair))
        .collect::<Vec<(Utility, Pair)>>();
    ranked.sort_by(|(a, x), (b, y)| {
        b.total_cmp(a)
            .then(x.target.cmp(&y.target))
            .then(x.pocket.cmp(&y.pocket))
    });
    ranked
        .into_iter()
        .take(breadth)
        .filter_map(|(ease, pair)| {
            let ball = snapshot.ball(pair.target)?.ball;
            let rest = rest(snapshot, &cue, &pair.at, &pair.entry, LOOKAHEAD_POWER, &Spin::NONE);
            let next = diff.pot(pair.target).with_cue(rest);
            let follow = target.after(request.variant, &ball);
            Some(ease * (0.5 + 0.5 * runout(request, &follow, &next, depth - 1, breadth)))
        })
        .fold(0.0, Utility::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cue_rules::Ball;
    use cue_rules::Variant;
    use cue_table::Point;
    use cue_table::Table;

    fn request(balls: &[(Ball, f32, f32)]) -> AimRequest {
        let balls = balls
            .iter()
            .map(|(b, x, y)| Placed::new(*b, Point::new(*x, *y)))
            .collect();
        let snapshot = Snapshot::new(Table::default(), balls, 0.98);
        AimRequest::new(Variant::NineBall, Target::Lowest, snapshot)
    }

    #[test]
    fn cleared_table_is_a_finished_run() {
        let req = request(&[(Ball::Cue, 500.0, 250.0)]);
        assert_eq!(runout(&req, &Target::Lowest, &Diff::default(), 2, 3), 1.0);
    }

    #[test]
    fn exhausted_depth_is_worth_nothing() {
        let req = request(&[(Ball::Cue, 300.0, 250.0), (Ball::Number(1), 150.0, 125.0)]);
        assert_eq!(runout(&req, &Target::Lowest, &Diff::default(), 0, 3), 0.0);
    }

    #[test]
    fn last_ball_scores_its_ease() {
        let req = request(&[(Ball::Cue, 300.0, 250.0), (Ball::Number(1), 150.0, 125.0)]);
        let value = runout(&req, &Target::Lowest, &Diff::default(), 1, 3);
        assert!(value > 0.5 && value <= 1.0, "value = {}", value);
        let deeper = runout(&req, &Target::Lowest, &Diff::default(), 2, 3);
        assert_eq!(value, deeper);
    }

    #[test]
    fn more_balls_never_raise_the_value() {
        let one = request(&[(Ball::Cue, 300.0, 250.0), (Ball::Number(1), 150.0, 125.0)]);
        let two = request(&[
            (Ball::Cue, 300.0, 250.0),
            (Ball::Number(1), 150.0, 125.0),
            (Ball::Number(2), 800.0, 400.0),
        ]);
        let a = runout(&one, &Target::Lowest, &Diff::default(), 2, 3);
        let b = runout(&two, &Target::Lowest, &Diff::default(), 2, 3);
        assert!(b <= a);
    }

    #[test]
    fn missing_cue_ball_is_worth_nothing() {
        let req = request(&[(Ball::Number(1), 150.0, 125.0)]);
        assert_eq!(runout(&req, &Target::Lowest, &Diff::default(), 2, 3), 0.0);
    }
}
