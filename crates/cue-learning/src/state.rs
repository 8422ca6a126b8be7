use cue_planner::Baulk;
use cue_planner::Placed;
use cue_rules::Ball;
use cue_rules::Colour;
use cue_rules::Group;
use cue_rules::Rules;
use cue_rules::UkPool;
use cue_table::Point;
use cue_table::Table;

/// What the advisor sees of a UK blackball frame: where everything
/// rests, and the parts of the match state that shape shot choice.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableState {
    table: Table,
    balls: Vec<Placed>,
    ball_on: Option<Group>,
    open: bool,
    shots: u8,
    free_ball: bool,
    from_baulk: bool,
    baulk: Option<Baulk>,
}

impl TableState {
    /// Open table, one shot in the visit.
    pub fn new(table: Table, balls: Vec<Placed>) -> Self {
        Self {
            table,
            balls,
            ball_on: None,
            open: true,
            shots: 1,
            free_ball: false,
            from_baulk: false,
            baulk: None,
        }
    }
    /// Read the shooter's situation off a live frame.
    pub fn of(game: &UkPool, table: Table, balls: Vec<Placed>, baulk: Option<Baulk>) -> Self {
        let state = game.state();
        Self {
            table,
            balls,
            ball_on: state.group(game.turn()),
            open: state.is_open(),
            shots: state.shots(),
            free_ball: state.free_ball(),
            from_baulk: state.must_play_from_baulk(),
            baulk,
        }
    }
    pub fn with_group(mut self, group: Group) -> Self {
        self.ball_on = Some(group);
        self.open = false;
        self
    }
    pub fn with_shots(mut self, shots: u8) -> Self {
        self.shots = shots;
        self
    }
    pub fn with_free_ball(mut self) -> Self {
        self.free_ball = true;
        self
    }
    pub fn from_baulk(mut self, baulk: Baulk) -> Self {
        self.from_baulk = true;
        self.baulk = Some(baulk);
        self
    }
}

impl TableState {
    pub fn table(&self) -> &Table {
        &self.table
    }
    pub fn balls(&self) -> &[Placed] {
        &self.balls
    }
    pub fn ball(&self, index: usize) -> Option<&Placed> {
        self.balls.get(index)
    }
    pub fn ball_on(&self) -> Option<Group> {
        self.ball_on
    }
    pub fn is_open(&self) -> bool {
        self.open
    }
    pub fn shots(&self) -> u8 {
        self.shots
    }
    pub fn free_ball(&self) -> bool {
        self.free_ball
    }
    pub fn must_play_from_baulk(&self) -> bool {
        self.from_baulk
    }
    /// Restriction on where an in-hand cue ball may be placed.
    pub fn placement(&self) -> Option<Baulk> {
        self.baulk.filter(|_| self.from_baulk)
    }
    pub fn radius(&self) -> f32 {
        self.table.radius()
    }
}

impl TableState {
    pub fn cue_index(&self) -> Option<usize> {
        self.balls.iter().position(|p| p.ball.is_cue())
    }
    pub fn cue(&self) -> Option<Point> {
        self.cue_index().map(|i| self.balls[i].at)
    }
    /// Balls of `colour` with their index. Black accepts the 8; the two
    /// groups accept their conventional numbered sets.
    pub fn own(&self, colour: Colour) -> impl Iterator<Item = (usize, &Placed)> + '_ {
        self.balls
            .iter()
            .enumerate()
            .filter(move |(_, p)| Self::admits(colour, &p.ball))
    }
    pub fn count(&self, colour: Colour) -> usize {
        self.own(colour).count()
    }
    /// Every ball except the cue and the listed indices.
    pub fn obstacles(&self, except: &[usize]) -> Vec<Point> {
        self.balls
            .iter()
            .enumerate()
            .filter(|(i, p)| !p.ball.is_cue() && !except.contains(i))
            .map(|(_, p)| p.at)
            .collect()
    }
    /// The table after `target` drops and the cue ball comes to rest at `cue`.
    pub fn after(&self, target: usize, cue: Point) -> Self {
        let mut next = self.clone();
        next.balls = self
            .balls
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != target)
            .map(|(_, p)| match p.ball.is_cue() {
                true => Placed::new(Ball::Cue, cue),
                false => *p,
            })
            .collect();
        next
    }
    fn admits(colour: Colour, ball: &Ball) -> bool {
        match colour {
            Colour::Black => ball.is_black(),
            c => Group::of_colour(c).is_some_and(|g| g.admits(ball)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> TableState {
        TableState::new(
            Table::default(),
            vec![
                Placed::new(Ball::Cue, Point::new(100.0, 100.0)),
                Placed::new(Ball::Colour(Colour::Yellow), Point::new(200.0, 100.0)),
                Placed::new(Ball::Colour(Colour::Red), Point::new(300.0, 100.0)),
                Placed::new(Ball::Number(3), Point::new(400.0, 100.0)),
                Placed::new(Ball::Colour(Colour::Black), Point::new(500.0, 250.0)),
            ],
        )
    }

    #[test]
    fn own_balls_include_numbered_stand_ins() {
        let state = state();
        assert_eq!(state.count(Colour::Yellow), 2);
        assert_eq!(state.count(Colour::Red), 1);
        assert_eq!(state.count(Colour::Black), 1);
        assert_eq!(state.count(Colour::Pink), 0);
    }

    #[test]
    fn after_drops_target_and_moves_cue() {
        let next = state().after(1, Point::new(250.0, 250.0));
        assert_eq!(next.balls().len(), 4);
        assert_eq!(next.cue(), Some(Point::new(250.0, 250.0)));
        assert_eq!(next.count(Colour::Yellow), 1);
    }

    #[test]
    fn obstacles_skip_the_cue() {
        let state = state();
        assert_eq!(state.obstacles(&[]).len(), 4);
        assert_eq!(state.obstacles(&[1, 2]).len(), 2);
    }

    #[test]
    fn baulk_only_binds_when_required() {
        let state = state();
        assert_eq!(state.placement(), None);
        let state = state.from_baulk(Baulk::behind(200.0));
        assert!(state.must_play_from_baulk());
        assert_eq!(state.placement(), Some(Baulk::behind(200.0)));
    }

    #[test]
    fn live_frame_starts_open() {
        let game = UkPool::default();
        let state = TableState::of(&game, Table::default(), vec![], None);
        assert!(state.is_open());
        assert_eq!(state.ball_on(), None);
        assert_eq!(state.shots(), 1);
        assert!(!state.free_ball());
    }
}
