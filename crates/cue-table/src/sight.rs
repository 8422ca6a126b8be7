use super::*;
use cue_core::Angle;
use cue_core::Length;
use cue_core::OBSTRUCTION_REACH;

/// Shortest distance from `p` to the segment `a`–`b`.
pub fn segment_distance(a: &Point, b: &Point, p: &Point) -> Length {
    let ab = *b - *a;
    let len = ab.dot(&ab);
    if len <= f32::EPSILON {
        return a.distance(p);
    }
    let t = ((*p - *a).dot(&ab) / len).clamp(0.0, 1.0);
    a.lerp(b, t).distance(p)
}

/// Does a ball centred at `ball` stand in the way of a ball travelling from `a` to `b`?
///
/// Only balls strictly between the endpoints count; the reach is
/// `2 · radius · margin` from the travel line.
pub fn obstructs(a: &Point, b: &Point, ball: &Point, radius: Length, margin: f32) -> bool {
    let ab = *b - *a;
    let len = ab.dot(&ab);
    if len <= f32::EPSILON {
        return false;
    }
    let t = (*ball - *a).dot(&ab) / len;
    if t <= 0.0 || t >= 1.0 {
        return false;
    }
    a.lerp(b, t).distance(ball) < OBSTRUCTION_REACH * radius * margin
}

/// True if any of `balls` obstructs the path from `a` to `b`.
pub fn blocked<'a, I>(a: &Point, b: &Point, balls: I, radius: Length, margin: f32) -> bool
where
    I: IntoIterator<Item = &'a Point>,
{
    balls
        .into_iter()
        .any(|ball| obstructs(a, b, ball, radius, margin))
}

/// Angle between the cue→target and target→pocket directions, in `[0, π]`.
pub fn cut(cue: &Point, target: &Point, pocket: &Point) -> Angle {
    let incoming = *target - *cue;
    let outgoing = *pocket - *target;
    let denom = incoming.norm() * outgoing.norm();
    if denom <= f32::EPSILON {
        return 0.0;
    }
    (incoming.dot(&outgoing) / denom).clamp(-1.0, 1.0).acos()
}

/// Angular subtense of a ball-width gap seen from `distance` away.
pub fn subtense(distance: Length, radius: Length) -> Angle {
    (2.0 * radius).atan2(distance)
}

/// Pocket view score: [`subtense`] as a fraction of a right angle, capped at 1.
pub fn view(distance: Length, radius: Length) -> f32 {
    (subtense(distance, radius) / std::f32::consts::FRAC_PI_2).min(1.0)
}

/// Ghost-ball point: where the cue ball's centre must be at contact to send
/// `target` toward `entry`.
pub fn ghost(target: &Point, entry: &Point, radius: Length) -> Point {
    *target - (*entry - *target).unit() * (2.0 * radius)
}
