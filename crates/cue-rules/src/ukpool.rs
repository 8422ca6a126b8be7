use super::*;
use cue_core::GROUP_SIZE;
use cue_core::VISIT_SHOTS;

/// Persistent state of one UK blackball frame.
///
/// Balls are tracked as counts per colour; which yellow went down is
/// irrelevant to the rules.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UkState {
    yellow: u8,
    red: u8,
    black: bool,
    groups: [Option<Group>; 2],
    open: bool,
    breaking: bool,
    shots: u8,
    free_ball: bool,
    baulk: bool,
    choice: bool,
    ball_in_hand: bool,
    status: Status,
}

impl Default for UkState {
    fn default() -> Self {
        Self {
            yellow: GROUP_SIZE,
            red: GROUP_SIZE,
            black: true,
            groups: [None; 2],
            open: true,
            breaking: true,
            shots: 1,
            free_ball: false,
            baulk: false,
            choice: false,
            ball_in_hand: false,
            status: Status::default(),
        }
    }
}

impl UkState {
    /// Balls of a colour still on the table.
    pub fn count(&self, colour: Colour) -> u8 {
        match colour {
            Colour::Yellow => self.yellow,
            Colour::Red => self.red,
            Colour::Black => self.black as u8,
            _ => 0,
        }
    }
    pub fn group(&self, player: Player) -> Option<Group> {
        self.groups[player.index()]
    }
    /// Own-group balls left for `player`; zero while unassigned.
    pub fn remaining(&self, player: Player) -> u8 {
        self.group(player)
            .and_then(|g| g.colour())
            .map_or(0, |c| self.count(c))
    }
    /// Group assigned and cleared: only the black is left to play.
    pub fn on_black(&self, player: Player) -> bool {
        self.group(player).is_some() && self.remaining(player) == 0
    }
    pub fn is_open(&self) -> bool {
        self.open
    }
    pub fn is_breaking(&self) -> bool {
        self.breaking
    }
    /// Shots left in the current visit.
    pub fn shots(&self) -> u8 {
        self.shots
    }
    pub fn free_ball(&self) -> bool {
        self.free_ball
    }
    pub fn must_play_from_baulk(&self) -> bool {
        self.baulk
    }
    pub fn choice_required(&self) -> bool {
        self.choice
    }
    pub fn ball_in_hand(&self) -> bool {
        self.ball_in_hand
    }
    pub fn status(&self) -> &Status {
        &self.status
    }
    fn both_colours_up(&self) -> bool {
        self.yellow > 0 && self.red > 0
    }
    fn assign(&mut self, player: Player, group: Group) {
        self.groups[player.index()] = Some(group);
        self.groups[(!player).index()] = Some(group.other());
        self.open = false;
        self.choice = false;
    }
    fn remove(&mut self, colour: Colour) {
        match colour {
            Colour::Yellow => self.yellow = self.yellow.saturating_sub(1),
            Colour::Red => self.red = self.red.saturating_sub(1),
            Colour::Black => self.black = false,
            _ => {}
        }
    }
}

/// UK blackball referee: yellows and reds, two-shot visits after a foul.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UkPool {
    rules: UkRules,
    state: UkState,
}

impl UkPool {
    pub fn new(rules: UkRules) -> Self {
        Self {
            rules,
            state: UkState::default(),
        }
    }
    pub fn rules(&self) -> &UkRules {
        &self.rules
    }
    /// Settle a pending open-table choice after both colours dropped.
    pub fn choose_group(&mut self, player: Player, group: Group) -> anyhow::Result<()> {
        if self.state.status.is_over() {
            anyhow::bail!("frame is over");
        }
        if !self.state.open {
            anyhow::bail!("groups are already assigned");
        }
        if !self.state.choice {
            anyhow::bail!("no group choice is pending");
        }
        if group.colour().is_none() {
            anyhow::bail!("{} is not a blackball group", group);
        }
        self.state.assign(player, group);
        log::debug!("uk-8-ball {} chooses {}", player, group);
        Ok(())
    }
    fn contact_fault(&self, first: Colour) -> Option<Reason> {
        let shooter = self.state.status.turn();
        match self.state.group(shooter).and_then(|g| g.colour()) {
            None if first == Colour::Black && self.state.both_colours_up() => {
                Some(Reason::BlackContactedEarly)
            }
            None => None,
            Some(own) if first == own => None,
            Some(_) if first == Colour::Black && self.state.remaining(shooter) > 0 => {
                Some(Reason::BlackContactedEarly)
            }
            Some(_) if first == Colour::Black => None,
            Some(_) => Some(Reason::WrongFirstContact),
        }
    }
    /// Fouls in priority order, black aside.
    fn fault(&self, shot: &Shot, free: bool) -> Option<Reason> {
        let Some(first) = shot.first().and_then(|b| b.colour()) else {
            return Some(Reason::NoContact);
        };
        if shot.scratched() {
            return Some(Reason::Scratch);
        }
        if self.state.baulk && !shot.from_hand {
            return Some(Reason::MustPlayFromBaulk);
        }
        if !free {
            if let Some(reason) = self.contact_fault(first) {
                return Some(reason);
            }
        }
        let colours = shot
            .objects()
            .filter_map(|b| b.colour())
            .filter(|c| *c != Colour::Black)
            .collect::<Vec<Colour>>();
        if self.state.open && !self.state.breaking && !self.rules.allow_combinations && !free {
            if colours.iter().any(|c| *c != first) {
                return Some(Reason::WrongBallPotted);
            }
        }
        if self.rules.require_cushion_if_no_pot && shot.railless() {
            return Some(match self.state.breaking {
                true => Reason::IllegalBreak,
                false => Reason::NoRail,
            });
        }
        if let Some(theirs) = self
            .state
            .group(!self.state.status.turn())
            .and_then(|g| g.colour())
        {
            let exempt = (free && first == theirs) as usize;
            if colours.iter().filter(|c| **c == theirs).count() > exempt {
                return Some(Reason::PottedOpponentBall);
            }
        }
        None
    }
    fn visit(&self, choice: bool) -> Detail {
        Detail::Visit {
            shots: self.state.shots,
            free_ball: self.state.free_ball,
            choice_required: choice,
        }
    }
}

impl Rules for UkPool {
    type State = UkState;
    fn variant(&self) -> Variant {
        Variant::UkPool
    }
    fn state(&self) -> &UkState {
        &self.state
    }
    fn status(&self) -> &Status {
        &self.state.status
    }
    fn target(&self) -> Target {
        let black = Ball::Colour(Colour::Black);
        let yellow = Ball::Colour(Colour::Yellow);
        let red = Ball::Colour(Colour::Red);
        match self.state.group(self.state.status.turn()) {
            _ if self.state.free_ball => Target::Balls(vec![yellow, red, black]),
            Some(group) => Target::Group(group),
            None if self.state.both_colours_up() => Target::Open,
            None => Target::Balls(vec![yellow, red, black]),
        }
    }
    fn shot(&mut self, shot: &Shot) -> Ruling {
        if self.state.status.is_over() {
            return Ruling::frame_over(&self.state.status);
        }
        let shot = shot.canonical(Variant::UkPool);
        let malformed = shot.malformed(Variant::UkPool);
        let shooter = self.state.status.turn();
        let breaking = self.state.breaking;
        let open = self.state.open;
        let free = self.state.free_ball;
        let owned = self.state.remaining(shooter);
        let pots = match malformed {
            true => Vec::new(),
            false => shot.objects().filter_map(|b| b.colour()).collect::<Vec<Colour>>(),
        };
        let mut reason = match malformed {
            true => Some(Reason::NoContact),
            false => self.fault(&shot, free),
        };

        // black
        let mut winner = None;
        let mut respot = false;
        if pots.contains(&Colour::Black) {
            let early = (!open && owned > 0) || (open && self.state.both_colours_up());
            match (breaking, reason) {
                (true, None) if self.rules.black_on_break == BlackOnBreak::Respot => respot = true,
                (_, Some(_)) => winner = Some(!shooter),
                (false, None) if early => {
                    reason = Some(Reason::MoneyBallEarly);
                    winner = Some(!shooter);
                }
                (_, None) => winner = Some(shooter),
            }
        }
        pots.iter()
            .filter(|c| !(respot && **c == Colour::Black))
            .for_each(|c| self.state.remove(*c));

        let foul = reason.is_some();
        let mut choice = false;
        self.state.free_ball = false;
        self.state.baulk = false;
        self.state.ball_in_hand = false;
        if foul {
            self.state.status.foul();
        } else {
            self.state.status.clean();
        }
        if let Some(w) = winner {
            self.state.shots = 0;
            self.state.choice = false;
            self.state.status.finish(Winner::from(w));
        } else if foul {
            self.state.status.pass();
            let incoming = self.state.status.turn();
            self.state.shots = match self.state.on_black(incoming) && !self.rules.two_visits_carry_on_black {
                true => 1,
                false => VISIT_SHOTS,
            };
            self.state.baulk = true;
            self.state.ball_in_hand = true;
            self.state.free_ball = !breaking;
            self.state.choice = false;
        } else {
            if open {
                let yellow = pots.contains(&Colour::Yellow);
                let red = pots.contains(&Colour::Red);
                match (yellow, red) {
                    (true, false) => self.state.assign(shooter, Group::Yellow),
                    (false, true) => self.state.assign(shooter, Group::Red),
                    (true, true) => choice = true,
                    (false, false) => {}
                }
            }
            self.state.choice = choice;
            let own = self
                .state
                .group(shooter)
                .and_then(|g| g.colour())
                .is_some_and(|c| pots.contains(&c));
            if choice {
                self.state.shots = self.state.shots.max(1);
            } else if !own {
                self.state.shots = self.state.shots.saturating_sub(1);
                if self.state.shots == 0 {
                    self.state.status.pass();
                    self.state.shots = 1;
                }
            }
        }
        self.state.breaking = false;

        let ruling = Ruling::after(&shot, &self.state.status, reason)
            .with_hand(self.state.ball_in_hand)
            .with_detail(self.visit(choice));
        log::debug!("uk-8-ball {} => {}", shot, ruling);
        if ruling.over {
            log::info!("uk-8-ball frame over, winner {:?}", ruling.winner);
        }
        ruling
    }
}
