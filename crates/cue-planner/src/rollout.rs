use super::*;
use cue_core::NOMINAL_FRICTION;
use cue_core::ROLL_FRACTION;
use cue_core::SIDE_FRACTION;
use cue_table::Point;

/// Where the cue ball comes to rest after sending `target` to `entry`.
///
/// Travel follows the tangent line `(target − cue) − (entry − target)`;
/// follow lengthens it, draw shortens it, side pushes it sideways. A cloth
/// grabbier than [`NOMINAL_FRICTION`] shortens the roll in proportion. The
/// result is kept on the cloth.
pub fn rest(snapshot: &Snapshot, cue: &Point, target: &Point, entry: &Point, power: f32, spin: &Spin) -> Point {
    let table = snapshot.table();
    let cloth = snapshot.friction().clamp(0.0, 1.0) / NOMINAL_FRICTION;
    let tangent = (*target - *cue) - (*entry - *target);
    let dir = tangent.unit();
    let travel = power * ROLL_FRACTION * table.diagonal() * (1.0 + spin.top - spin.back) * cloth;
    let side = spin.side * power * SIDE_FRACTION * table.longest();
    table.clamp(*target + dir * travel + dir.perp() * side)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cue_table::Table;

    fn cloth(friction: f32) -> Snapshot {
        Snapshot::new(Table::default(), vec![], friction)
    }

    #[test]
    fn rest_stays_on_cloth() {
        let ref snapshot = cloth(NOMINAL_FRICTION);
        let table = snapshot.table();
        let cue = Point::new(900.0, 400.0);
        let target = Point::new(980.0, 480.0);
        let entry = table.entry(Point::new(1000.0, 500.0));
        for spin in Spin::grid() {
            let rest = rest(snapshot, &cue, &target, &entry, 1.0, &spin);
            assert!(table.contains(&rest));
        }
    }

    #[test]
    fn follow_travels_further_than_draw() {
        let ref snapshot = cloth(NOMINAL_FRICTION);
        let table = snapshot.table();
        let cue = Point::new(200.0, 250.0);
        let target = Point::new(500.0, 250.0);
        let entry = Point::new(500.0, 20.0);
        let follow = rest(snapshot, &cue, &target, &entry, 0.5, &Spin::new(0.5, 0.0, -0.5));
        let draw = rest(snapshot, &cue, &target, &entry, 0.5, &Spin::new(-0.5, 0.0, 0.5));
        assert!(follow.distance(&target) > draw.distance(&target));
    }

    #[test]
    fn side_moves_across_the_line() {
        let ref snapshot = cloth(NOMINAL_FRICTION);
        let table = snapshot.table();
        let cue = Point::new(200.0, 250.0);
        let target = Point::new(400.0, 250.0);
        let entry = Point::new(400.0, 100.0);
        let left = rest(snapshot, &cue, &target, &entry, 0.5, &Spin::new(0.0, 0.5, 0.0));
        let right = rest(snapshot, &cue, &target, &entry, 0.5, &Spin::new(0.0, -0.5, 0.0));
        let plain = rest(snapshot, &cue, &target, &entry, 0.5, &Spin::NONE);
        assert!(left.distance(&right) > 1.0);
        assert!((left.distance(&plain) - right.distance(&plain)).abs() < 1e-3);
    }

    #[test]
    fn grabby_cloth_shortens_the_roll() {
        let cue = Point::new(200.0, 250.0);
        let target = Point::new(500.0, 250.0);
        let entry = Point::new(500.0, 20.0);
        let fast = rest(&cloth(NOMINAL_FRICTION), &cue, &target, &entry, 0.5, &Spin::NONE);
        let slow = rest(&cloth(NOMINAL_FRICTION / 2.0), &cue, &target, &entry, 0.5, &Spin::NONE);
        let a = fast.distance(&target);
        let b = slow.distance(&target);
        assert!(b < a);
        assert!((b - a / 2.0).abs() < 1e-2);
    }
}
