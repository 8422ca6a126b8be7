use super::*;
use cue_core::Points;
use cue_core::REDS;

/// Which ball is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// Reds remain (or the last red has just gone down and a colour is owed).
    Reds { colour_on: bool },
    /// Colours in ascending value, each removed once potted.
    Colours,
}

/// Persistent state of one snooker frame.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SnookerState {
    reds: u8,
    colours: Vec<Colour>,
    phase: Phase,
    scores: [Points; 2],
    run: Points,
    best: [Points; 2],
    free_ball: bool,
    fouled: bool,
    status: Status,
}

impl SnookerState {
    fn racked(reds: u8) -> Self {
        Self {
            reds,
            colours: Colour::sequence().to_vec(),
            phase: match reds {
                0 => Phase::Colours,
                _ => Phase::Reds { colour_on: false },
            },
            scores: [0; 2],
            run: 0,
            best: [0; 2],
            free_ball: false,
            fouled: false,
            status: Status::default(),
        }
    }
    pub fn reds(&self) -> u8 {
        self.reds
    }
    /// Colours on the table, in sequence order.
    pub fn colours(&self) -> &[Colour] {
        &self.colours
    }
    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn score(&self, player: Player) -> Points {
        self.scores[player.index()]
    }
    pub fn scores(&self) -> [Points; 2] {
        self.scores
    }
    /// Points in the current break.
    pub fn run(&self) -> Points {
        self.run
    }
    /// Highest break so far this frame.
    pub fn best(&self, player: Player) -> Points {
        self.best[player.index()]
    }
    pub fn free_ball(&self) -> bool {
        self.free_ball
    }
    pub fn status(&self) -> &Status {
        &self.status
    }
    /// Balls legal to strike first, free ball aside.
    pub fn on(&self) -> Vec<Ball> {
        match self.phase {
            Phase::Reds { colour_on: false } => vec![Ball::Colour(Colour::Red)],
            Phase::Reds { colour_on: true } => self.colours.iter().copied().map(Ball::from).collect(),
            Phase::Colours => self.colours.first().copied().map(Ball::from).into_iter().collect(),
        }
    }
    /// Highest value among the balls on.
    pub fn on_value(&self) -> Points {
        self.on().iter().map(Ball::points).max().unwrap_or(0)
    }
    /// Points still available to the player at the table.
    pub fn remaining(&self) -> Points {
        let colours = self.colours.iter().map(Colour::value).sum::<Points>();
        let reds = self.reds as Points * (1 + Colour::Black.value());
        match self.phase {
            Phase::Reds { colour_on: true } => reds + Colour::Black.value() + colours,
            _ => reds + colours,
        }
    }
    fn award(&mut self, player: Player, points: Points) {
        self.scores[player.index()] += points;
    }
    fn extend(&mut self, points: Points) {
        let shooter = self.status.turn();
        self.award(shooter, points);
        self.run += points;
        let best = &mut self.best[shooter.index()];
        *best = (*best).max(self.run);
    }
    /// After a red owed its colour, or a miss, fall back to red (or the sequence).
    fn settle(&mut self) {
        self.phase = match (self.phase, self.reds) {
            (Phase::Colours, _) => Phase::Colours,
            (_, 0) => Phase::Colours,
            (_, _) => Phase::Reds { colour_on: false },
        };
    }
    fn conclude(&mut self) {
        let [a, b] = self.scores;
        let winner = match a.cmp(&b) {
            std::cmp::Ordering::Greater => Winner::Player(Player::A),
            std::cmp::Ordering::Less => Winner::Player(Player::B),
            std::cmp::Ordering::Equal => Winner::Tie,
        };
        self.status.finish(winner);
    }
}

/// Snooker referee: red and colour alternation, then the colours in order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snooker {
    rules: SnookerRules,
    state: SnookerState,
}

impl Default for Snooker {
    fn default() -> Self {
        Self::new(SnookerRules::default())
    }
}

impl Snooker {
    pub fn new(rules: SnookerRules) -> Self {
        Self::with_reds(rules, REDS)
    }
    /// Short-format frame (six-red, ten-red) or a colours-only endgame with zero.
    pub fn with_reds(rules: SnookerRules, reds: u8) -> Self {
        Self {
            rules,
            state: SnookerState::racked(reds.min(REDS)),
        }
    }
    pub fn rules(&self) -> &SnookerRules {
        &self.rules
    }
    /// Grant the incoming player a free ball after the previous shot's foul.
    pub fn award_free_ball(&mut self) -> anyhow::Result<()> {
        if self.state.status.is_over() {
            anyhow::bail!("frame is over");
        }
        if !self.state.fouled {
            anyhow::bail!("a free ball can only follow a foul");
        }
        self.state.free_ball = true;
        log::debug!("snooker free ball to {}", self.state.status.turn());
        Ok(())
    }
    /// First-contact and pot legality; returns the free-ball surrogate on success.
    fn fault(&self, shot: &Shot, pots: &[Colour]) -> Result<Option<Colour>, Reason> {
        let Some(first) = shot.first().and_then(|b| b.colour()) else {
            return Err(Reason::NoContact);
        };
        if shot.scratched() {
            return Err(Reason::Scratch);
        }
        let on = self.state.on();
        let surrogate = match on.contains(&Ball::Colour(first)) {
            true => None,
            false if self.state.free_ball => Some(first),
            false => return Err(Reason::WrongFirstContact),
        };
        let legal = |c: &Colour| surrogate == Some(*c) || on.contains(&Ball::Colour(*c));
        let clean = match self.state.phase {
            Phase::Reds { colour_on: true } => match pots {
                [] => true,
                [c] => *c == first,
                _ => false,
            },
            Phase::Reds { colour_on: false } => pots.iter().all(legal),
            Phase::Colours => {
                let once = |c: &Colour| pots.iter().filter(|p| *p == c).count() == 1;
                pots.iter().all(legal) && pots.iter().all(once)
            }
        };
        match clean {
            true => Ok(surrogate),
            false => Err(Reason::WrongBallPotted),
        }
    }
    fn penalty(&self, shot: &Shot, pots: &[Colour]) -> Points {
        let first = shot.first().map(|b| b.points()).unwrap_or(0);
        let potted = pots.iter().map(Colour::value).max().unwrap_or(0);
        self.rules
            .minimum_penalty
            .max(self.state.on_value())
            .max(first)
            .max(potted)
    }
    /// Apply a foul: points to the opponent, reds stay down, colours come back.
    fn punish(&mut self, pots: &[Colour], penalty: Points) {
        let last_black = self.state.phase == Phase::Colours && self.state.colours == [Colour::Black];
        let reds = pots.iter().filter(|c| **c == Colour::Red).count() as u8;
        self.state.reds = self.state.reds.saturating_sub(reds);
        self.state.status.foul();
        self.state.status.pass();
        let incoming = self.state.status.turn();
        self.state.award(incoming, penalty);
        self.state.run = 0;
        self.state.fouled = true;
        self.state.settle();
        if last_black {
            self.state.conclude();
        }
    }
    /// Apply a legal shot; returns points scored.
    fn reward(&mut self, pots: &[Colour], surrogate: Option<Colour>) -> Points {
        let surrogated = surrogate.is_some_and(|s| pots.contains(&s));
        let scored = match self.state.phase {
            Phase::Reds { colour_on: false } => {
                let reds = pots.iter().filter(|c| **c == Colour::Red).count() as u8;
                self.state.reds = self.state.reds.saturating_sub(reds);
                let scored = reds as Points + surrogated as Points;
                if scored > 0 {
                    self.state.phase = Phase::Reds { colour_on: true };
                }
                scored
            }
            Phase::Reds { colour_on: true } => {
                let scored = pots.iter().map(Colour::value).sum();
                self.state.settle();
                scored
            }
            Phase::Colours => {
                let on = self.state.colours.first().copied();
                match on {
                    Some(ball) if pots.contains(&ball) => {
                        self.state.colours.remove(0);
                        ball.value()
                    }
                    Some(ball) if surrogated => ball.value(),
                    _ => 0,
                }
            }
        };
        self.state.status.clean();
        self.state.fouled = false;
        match scored {
            0 => {
                self.state.status.pass();
                self.state.run = 0;
                self.state.settle();
            }
            points => self.state.extend(points),
        }
        if self.state.phase == Phase::Colours && self.state.colours.is_empty() {
            self.state.conclude();
        }
        scored
    }
}

impl Rules for Snooker {
    type State = SnookerState;
    fn variant(&self) -> Variant {
        Variant::Snooker
    }
    fn state(&self) -> &SnookerState {
        &self.state
    }
    fn status(&self) -> &Status {
        &self.state.status
    }
    fn target(&self) -> Target {
        let mut on = self.state.on();
        if self.state.free_ball {
            if self.state.reds > 0 {
                on.push(Ball::Colour(Colour::Red));
            }
            on.extend(self.state.colours.iter().copied().map(Ball::from));
            on.sort();
            on.dedup();
        }
        Target::Balls(on)
    }
    fn shot(&mut self, shot: &Shot) -> Ruling {
        if self.state.status.is_over() {
            return Ruling::frame_over(&self.state.status);
        }
        let shot = shot.canonical(Variant::Snooker);
        let malformed = shot.malformed(Variant::Snooker);
        let pots = match malformed {
            true => Vec::new(),
            false => shot.objects().filter_map(|b| b.colour()).collect::<Vec<Colour>>(),
        };
        let verdict = match malformed {
            true => Err(Reason::NoContact),
            false => self.fault(&shot, &pots),
        };
        self.state.free_ball = false;
        let (reason, scored, penalty) = match verdict {
            Ok(surrogate) => (None, self.reward(&pots, surrogate), 0),
            Err(reason) => {
                let penalty = self.penalty(&shot, &pots);
                self.punish(&pots, penalty);
                (Some(reason), 0, penalty)
            }
        };

        let ruling = Ruling::after(&shot, &self.state.status, reason)
            .with_hand(shot.scratched())
            .with_detail(Detail::Score {
                scored,
                penalty,
                scores: self.state.scores,
                run: self.state.run,
            });
        log::debug!("snooker {} => {}", shot, ruling);
        if ruling.over {
            log::info!("snooker frame over {:?}, winner {:?}", self.state.scores, ruling.winner);
        }
        ruling
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Ball = Ball::Colour(Colour::Red);
    const BLACK: Ball = Ball::Colour(Colour::Black);
    const PINK: Ball = Ball::Colour(Colour::Pink);
    const GREEN: Ball = Ball::Colour(Colour::Green);
    const YELLOW: Ball = Ball::Colour(Colour::Yellow);

    fn pot(ball: Ball) -> Shot {
        Shot::new(vec![ball], vec![ball])
    }

    fn miss(ball: Ball) -> Shot {
        Shot::new(vec![ball], vec![])
    }

    #[test]
    fn red_then_black_builds_a_break() {
        let mut game = Snooker::default();
        assert!(game.shot(&pot(RED)).legal);
        assert_eq!(game.state().phase(), Phase::Reds { colour_on: true });
        let ruling = game.shot(&pot(BLACK));
        assert!(ruling.legal);
        assert_eq!(game.state().score(Player::A), 8);
        assert_eq!(game.state().run(), 8);
        assert_eq!(game.state().colours().len(), 6);
        assert_eq!(game.state().reds(), 14);
        assert_eq!(game.state().phase(), Phase::Reds { colour_on: false });
        assert_eq!(ruling.next, Player::A);
    }

    #[test]
    fn several_reds_score_together() {
        let mut game = Snooker::default();
        let ruling = game.shot(&Shot::new(vec![RED], vec![RED, RED, RED]));
        assert_eq!(ruling.detail, Detail::Score { scored: 3, penalty: 0, scores: [3, 0], run: 3 });
        assert_eq!(game.state().reds(), 12);
    }

    #[test]
    fn wrong_first_contact_awards_its_value() {
        let mut game = Snooker::default();
        let ruling = game.shot(&miss(PINK));
        assert_eq!(ruling.reason, Some(Reason::WrongFirstContact));
        assert_eq!(game.state().score(Player::B), 6);
        assert_eq!(ruling.next, Player::B);
    }

    #[test]
    fn minimum_penalty_is_four() {
        let mut game = Snooker::default();
        let ruling = game.shot(&Shot::default());
        assert_eq!(ruling.reason, Some(Reason::NoContact));
        assert_eq!(game.state().score(Player::B), 4);
    }

    #[test]
    fn foul_while_on_a_colour_uses_highest_ball_on() {
        let mut game = Snooker::default();
        game.shot(&pot(RED));
        game.shot(&Shot::default());
        assert_eq!(game.state().score(Player::B), 7);
        assert_eq!(game.state().phase(), Phase::Reds { colour_on: false });
        assert_eq!(game.state().run(), 0);
    }

    #[test]
    fn two_colours_on_one_shot_is_wrong_ball() {
        let mut game = Snooker::default();
        game.shot(&pot(RED));
        let ruling = game.shot(&Shot::new(vec![PINK], vec![PINK, BLACK]));
        assert_eq!(ruling.reason, Some(Reason::WrongBallPotted));
        assert_eq!(game.state().colours().len(), 6);
        assert_eq!(game.state().score(Player::B), 7);
    }

    #[test]
    fn reds_potted_on_foul_stay_down() {
        let mut game = Snooker::default();
        let ruling = game.shot(&Shot::new(vec![RED], vec![RED, Ball::Cue]));
        assert_eq!(ruling.reason, Some(Reason::Scratch));
        assert!(ruling.ball_in_hand);
        assert_eq!(game.state().reds(), 14);
        assert_eq!(game.state().score(Player::A), 0);
    }

    #[test]
    fn last_red_and_colour_open_the_sequence() {
        let mut game = Snooker::with_reds(SnookerRules::default(), 1);
        game.shot(&pot(RED));
        assert_eq!(game.state().phase(), Phase::Reds { colour_on: true });
        game.shot(&pot(BLACK));
        assert_eq!(game.state().phase(), Phase::Colours);
        assert_eq!(game.state().colours().len(), 6);
        assert_eq!(game.target(), Target::Balls(vec![YELLOW]));
    }

    #[test]
    fn missing_after_last_red_opens_the_sequence() {
        let mut game = Snooker::with_reds(SnookerRules::default(), 1);
        game.shot(&pot(RED));
        game.shot(&miss(BLACK));
        assert_eq!(game.state().phase(), Phase::Colours);
        assert_eq!(game.turn(), Player::B);
    }

    #[test]
    fn clearing_the_colours_ends_the_frame() {
        let mut game = Snooker::with_reds(SnookerRules::default(), 0);
        for colour in Colour::sequence() {
            let ruling = game.shot(&pot(Ball::Colour(colour)));
            assert!(ruling.legal);
        }
        assert!(game.is_over());
        assert_eq!(game.state().score(Player::A), 27);
        assert_eq!(game.status().winner(), Some(Winner::Player(Player::A)));
        assert_eq!(game.state().best(Player::A), 27);
    }

    #[test]
    fn colour_out_of_order_is_a_foul() {
        let mut game = Snooker::with_reds(SnookerRules::default(), 0);
        let ruling = game.shot(&pot(GREEN));
        assert_eq!(ruling.reason, Some(Reason::WrongFirstContact));
        assert_eq!(game.state().colours().len(), 6);
    }

    #[test]
    fn ball_on_reported_twice_is_wrong_ball() {
        let mut game = Snooker::with_reds(SnookerRules::default(), 0);
        let ruling = game.shot(&Shot::new(vec![YELLOW], vec![YELLOW, YELLOW]));
        assert_eq!(ruling.reason, Some(Reason::WrongBallPotted));
        assert_eq!(game.state().colours().first(), Some(&Colour::Yellow));
        assert_eq!(game.state().score(Player::A), 0);
        assert_eq!(game.state().score(Player::B), 4);
    }

    #[test]
    fn free_ball_and_ball_on_together_score_once() {
        let mut game = Snooker::with_reds(SnookerRules::default(), 0);
        game.shot(&Shot::default());
        game.award_free_ball().unwrap();
        let brown = Ball::Colour(Colour::Brown);
        let ruling = game.shot(&Shot::new(vec![brown], vec![brown, YELLOW]));
        assert!(ruling.legal);
        assert_eq!(game.state().score(Player::B), 4 + 2);
        assert_eq!(game.state().colours().first(), Some(&Colour::Green));
    }

    #[test]
    fn foul_on_the_last_black_settles_the_frame() {
        let mut game = Snooker::with_reds(SnookerRules::default(), 0);
        for colour in &Colour::sequence()[..5] {
            game.shot(&pot(Ball::Colour(*colour)));
        }
        assert_eq!(game.state().score(Player::A), 20);
        let ruling = game.shot(&Shot::default());
        assert!(ruling.over);
        assert_eq!(game.state().score(Player::B), 7);
        assert_eq!(ruling.winner, Some(Winner::Player(Player::A)));
    }

    #[test]
    fn level_scores_tie() {
        let mut game = Snooker::with_reds(SnookerRules::default(), 0);
        assert_eq!(game.state().remaining(), 27);
        game.shot(&pot(YELLOW));
        game.shot(&pot(GREEN));
        game.shot(&pot(Ball::Colour(Colour::Brown)));
        game.shot(&Shot::default()); // foul on the blue, five away
        game.shot(&pot(Ball::Colour(Colour::Blue)));
        game.shot(&pot(PINK));
        game.shot(&miss(BLACK));
        assert_eq!(game.state().scores(), [9, 16]);
        let ruling = game.shot(&pot(BLACK));
        assert!(ruling.over);
        assert_eq!(ruling.winner, Some(Winner::Tie));
    }

    #[test]
    fn free_ball_surrogate_scores_as_red() {
        let mut game = Snooker::default();
        assert!(game.award_free_ball().is_err());
        game.shot(&Shot::default());
        assert!(game.award_free_ball().is_ok());
        assert!(game.target() != Target::Balls(vec![RED]));
        let ruling = game.shot(&pot(GREEN));
        assert!(ruling.legal);
        assert_eq!(game.state().score(Player::B), 4 + 1);
        assert_eq!(game.state().colours().len(), 6);
        assert_eq!(game.state().reds(), 15);
        assert_eq!(game.state().phase(), Phase::Reds { colour_on: true });
        assert!(!game.state().free_ball());
    }

    #[test]
    fn free_ball_in_sequence_keeps_ball_on() {
        let mut game = Snooker::with_reds(SnookerRules::default(), 0);
        game.shot(&Shot::default());
        game.award_free_ball().unwrap();
        let ruling = game.shot(&pot(Ball::Colour(Colour::Brown)));
        assert!(ruling.legal);
        assert_eq!(game.state().score(Player::B), 4 + 2);
        assert_eq!(game.state().colours().first(), Some(&Colour::Yellow));
        assert_eq!(game.target(), Target::Balls(vec![YELLOW]));
    }

    #[test]
    fn numbered_balls_are_malformed() {
        let mut game = Snooker::default();
        let ruling = game.shot(&Shot::new(vec![Ball::Number(3)], vec![Ball::Number(3)]));
        assert_eq!(ruling.reason, Some(Reason::NoContact));
        assert_eq!(game.state().reds(), 15);
    }

    #[test]
    fn random_play_keeps_invariants() {
        use cue_core::Arbitrary;
        for _ in 0..64 {
            let mut game = Snooker::with_reds(SnookerRules::default(), rand::random_range(0..=REDS));
            for _ in 0..128 {
                let shot = match rand::random::<bool>() {
                    true => Shot::random_in(Variant::Snooker),
                    false => Shot::random(),
                };
                let before = game.state().clone();
                let ruling = game.shot(&shot);
                assert_eq!(ruling.over, game.is_over());
                assert!(game.state().reds() <= before.reds());
                assert!(game.state().score(Player::A) >= before.score(Player::A));
                assert!(game.state().score(Player::B) >= before.score(Player::B));
                if ruling.foul {
                    assert!(ruling.detail != Detail::None);
                }
                if game.is_over() {
                    assert!(game.status().winner().is_some());
                }
            }
        }
    }
}
