use super::*;

/// Persistent state of one 9-ball rack.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NineBallState {
    rack: Rack,
    breaking: bool,
    push_out: bool,
    ball_in_hand: bool,
    status: Status,
}

impl Default for NineBallState {
    fn default() -> Self {
        Self {
            rack: Rack::full(9),
            breaking: true,
            push_out: false,
            ball_in_hand: false,
            status: Status::default(),
        }
    }
}

impl NineBallState {
    pub fn rack(&self) -> Rack {
        self.rack
    }
    /// Lowest numbered ball on the table, the only legal first contact.
    pub fn lowest(&self) -> u8 {
        self.rack.lowest().unwrap_or(9)
    }
    pub fn is_breaking(&self) -> bool {
        self.breaking
    }
    pub fn push_out_available(&self) -> bool {
        self.push_out
    }
    pub fn ball_in_hand(&self) -> bool {
        self.ball_in_hand
    }
    pub fn status(&self) -> &Status {
        &self.status
    }
}

/// 9-ball referee: lowest ball first, the 9 wins, three fouls lose.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NineBall {
    rules: NineBallRules,
    state: NineBallState,
}

impl NineBall {
    pub fn new(rules: NineBallRules) -> Self {
        Self {
            rules,
            state: NineBallState::default(),
        }
    }
    pub fn rules(&self) -> &NineBallRules {
        &self.rules
    }
    fn fault(&self, shot: &Shot) -> Option<Reason> {
        if shot.push_out {
            return match (self.state.push_out, shot.scratched()) {
                (false, _) => Some(Reason::IllegalPushOut),
                (true, true) => Some(Reason::Scratch),
                (true, false) => None,
            };
        }
        let Some(first) = shot.first() else {
            return Some(Reason::NoContact);
        };
        if shot.scratched() {
            return Some(Reason::Scratch);
        }
        if first != Ball::Number(self.state.lowest()) {
            return Some(Reason::WrongFirstContact);
        }
        if self.rules.require_rail && shot.railless() {
            return Some(match self.state.breaking {
                true => Reason::IllegalBreak,
                false => Reason::NoRail,
            });
        }
        None
    }
}

impl Rules for NineBall {
    type State = NineBallState;
    fn variant(&self) -> Variant {
        Variant::NineBall
    }
    fn state(&self) -> &NineBallState {
        &self.state
    }
    fn status(&self) -> &Status {
        &self.state.status
    }
    fn target(&self) -> Target {
        Target::Lowest
    }
    fn shot(&mut self, shot: &Shot) -> Ruling {
        if self.state.status.is_over() {
            return Ruling::frame_over(&self.state.status);
        }
        let shot = shot.canonical(Variant::NineBall);
        let malformed = shot.malformed(Variant::NineBall);
        let shooter = self.state.status.turn();
        let breaking = self.state.breaking;
        let pushing = shot.push_out && !malformed;
        let pots = match malformed {
            true => Vec::new(),
            false => shot.objects().filter_map(|b| b.number()).collect::<Vec<u8>>(),
        };
        let mut reason = match malformed {
            true => Some(Reason::NoContact),
            false => self.fault(&shot),
        };
        let foul = reason.is_some();

        // the 9 wins on any legal contact, otherwise comes back up
        let nine = pots.contains(&9);
        let respotting = breaking && self.rules.nine_on_break == NineOnBreak::Respot;
        let wins = nine && !foul && !pushing && !respotting;
        pots.iter()
            .filter(|n| wins || **n != 9)
            .for_each(|n| self.state.rack.remove(*n));

        self.state.ball_in_hand = false;
        if wins {
            self.state.status.clean();
            self.state.status.finish(Winner::from(shooter));
        } else if foul {
            let streak = self.state.status.foul();
            if self.rules.three_foul_loss && streak >= self.rules.foul_limit {
                reason = Some(Reason::ConsecutiveFouls);
                self.state.status.forgive();
                self.state.status.finish(Winner::from(!shooter));
            } else {
                self.state.status.pass();
                self.state.ball_in_hand = true;
            }
        } else {
            self.state.status.clean();
            if pushing || pots.is_empty() {
                self.state.status.pass();
            }
        }
        self.state.push_out = breaking && !self.state.status.is_over();
        self.state.breaking = false;

        let ruling = Ruling::after(&shot, &self.state.status, reason).with_hand(self.state.ball_in_hand);
        log::debug!("9-ball {} => {}", shot, ruling);
        if ruling.over {
            log::info!("9-ball frame over, winner {:?}", ruling.winner);
        }
        ruling
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(ns: &[u8]) -> Vec<Ball> {
        ns.iter().map(|n| Ball::Number(*n)).collect()
    }

    /// Legal break that drops nothing, leaving B at the table.
    fn broken() -> NineBall {
        let mut game = NineBall::default();
        assert!(game.shot(&Shot::new(n(&[1]), vec![])).legal);
        game
    }

    #[test]
    fn wrong_first_contact_gives_ball_in_hand() {
        let mut game = broken();
        let ruling = game.shot(&Shot::new(n(&[2]), vec![]));
        assert!(ruling.foul);
        assert_eq!(ruling.reason, Some(Reason::WrongFirstContact));
        assert!(ruling.ball_in_hand);
        assert_eq!(ruling.next, Player::A);
    }

    #[test]
    fn nine_on_legal_contact_wins_regardless() {
        let mut game = broken();
        let ruling = game.shot(&Shot::new(n(&[1]), n(&[4, 9, 6])));
        assert!(ruling.over);
        assert_eq!(ruling.winner, Some(Winner::Player(Player::B)));
    }

    #[test]
    fn nine_on_foul_is_respotted() {
        let mut game = broken();
        let ruling = game.shot(&Shot::new(n(&[3]), n(&[9])));
        assert!(!ruling.over);
        assert!(game.state().rack().contains(9));
    }

    #[test]
    fn nine_on_break_can_respot() {
        let mut game = NineBall::new(NineBallRules {
            nine_on_break: NineOnBreak::Respot,
            ..NineBallRules::default()
        });
        let ruling = game.shot(&Shot::new(n(&[1]), n(&[9])));
        assert!(!ruling.over);
        assert!(game.state().rack().contains(9));
        assert_eq!(ruling.next, Player::A);
    }

    #[test]
    fn three_consecutive_fouls_lose() {
        let mut game = broken();
        let miss = Shot::new(n(&[5]), vec![]);
        let safe = Shot::new(n(&[1]), vec![]);
        game.shot(&miss); // B foul 1
        game.shot(&safe); // A legal
        game.shot(&miss); // B foul 2
        game.shot(&safe); // A legal
        let ruling = game.shot(&miss); // B foul 3
        assert_eq!(ruling.reason, Some(Reason::ConsecutiveFouls));
        assert_eq!(ruling.winner, Some(Winner::Player(Player::A)));
        assert_eq!(game.status().fouls(Player::B), 0);
    }

    #[test]
    fn legal_shot_resets_streak() {
        let mut game = broken();
        game.shot(&Shot::new(n(&[5]), vec![]));
        assert_eq!(game.status().fouls(Player::B), 1);
        game.shot(&Shot::new(n(&[1]), vec![]));
        game.shot(&Shot::new(n(&[1]), n(&[1])));
        assert_eq!(game.status().fouls(Player::B), 0);
    }

    #[test]
    fn push_out_after_break_waives_contact() {
        let mut game = broken();
        assert!(game.state().push_out_available());
        let ruling = game.shot(&Shot::new(vec![], vec![]).declaring_push_out());
        assert!(ruling.legal);
        assert!(!ruling.ball_in_hand);
        assert_eq!(ruling.next, Player::A);
        assert!(!game.state().push_out_available());
    }

    #[test]
    fn late_push_out_is_a_foul() {
        let mut game = broken();
        game.shot(&Shot::new(n(&[1]), vec![]));
        let ruling = game.shot(&Shot::new(n(&[1]), vec![]).declaring_push_out());
        assert_eq!(ruling.reason, Some(Reason::IllegalPushOut));
        assert!(ruling.ball_in_hand);
    }

    #[test]
    fn scratch_on_break_still_opens_push_out() {
        let mut game = NineBall::default();
        let ruling = game.shot(&Shot::new(n(&[1]), vec![Ball::Cue]));
        assert_eq!(ruling.reason, Some(Reason::Scratch));
        assert!(ruling.ball_in_hand);
        assert!(game.state().push_out_available());
    }

    #[test]
    fn stripes_are_unknown_in_nine_ball() {
        let mut game = broken();
        let ruling = game.shot(&Shot::parse(Variant::NineBall, &["1"], &["12"]));
        assert_eq!(ruling.reason, Some(Reason::NoContact));
    }

    #[test]
    fn random_play_keeps_invariants() {
        use cue_core::Arbitrary;
        for _ in 0..64 {
            let mut game = NineBall::default();
            for _ in 0..64 {
                let shot = match rand::random::<bool>() {
                    true => Shot::random_in(Variant::NineBall),
                    false => Shot::random(),
                };
                let ruling = game.shot(&shot);
                assert_eq!(ruling.over, game.is_over());
                assert_eq!(ruling.next, game.turn());
                if game.is_over() {
                    assert!(game.status().winner().is_some());
                    assert_eq!(game.shot(&shot).reason, Some(Reason::FrameOver));
                }
            }
        }
    }
}
