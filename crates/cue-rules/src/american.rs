use super::*;

/// Persistent state of one American 8-ball frame.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AmericanState {
    rack: Rack,
    groups: [Option<Group>; 2],
    open: bool,
    breaking: bool,
    ball_in_hand: bool,
    status: Status,
}

impl Default for AmericanState {
    fn default() -> Self {
        Self {
            rack: Rack::full(15),
            groups: [None; 2],
            open: true,
            breaking: true,
            ball_in_hand: false,
            status: Status::default(),
        }
    }
}

impl AmericanState {
    pub fn rack(&self) -> Rack {
        self.rack
    }
    pub fn group(&self, player: Player) -> Option<Group> {
        self.groups[player.index()]
    }
    pub fn is_open(&self) -> bool {
        self.open
    }
    pub fn is_breaking(&self) -> bool {
        self.breaking
    }
    pub fn ball_in_hand(&self) -> bool {
        self.ball_in_hand
    }
    pub fn status(&self) -> &Status {
        &self.status
    }
    /// Own-group balls left for `player`; zero while unassigned.
    pub fn remaining(&self, player: Player) -> usize {
        match self.group(player) {
            Some(Group::Solids) => self.rack.within(1..=7),
            Some(Group::Stripes) => self.rack.within(9..=15),
            _ => 0,
        }
    }
    fn assign(&mut self, player: Player, group: Group) {
        self.groups[player.index()] = Some(group);
        self.groups[(!player).index()] = Some(group.other());
        self.open = false;
    }
}

/// American 8-ball referee: solids and stripes, 8 last.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct American {
    rules: AmericanRules,
    state: AmericanState,
}

impl American {
    pub fn new(rules: AmericanRules) -> Self {
        Self {
            rules,
            state: AmericanState::default(),
        }
    }
    pub fn rules(&self) -> &AmericanRules {
        &self.rules
    }
    /// Is `first` a legal first contact for the shooter?
    fn contact_fault(&self, first: &Ball) -> Option<Reason> {
        let shooter = self.state.status.turn();
        let eight = first.is_black();
        match self.state.group(shooter) {
            None => eight.then_some(Reason::BlackContactedEarly),
            Some(_) if self.state.remaining(shooter) == 0 => {
                (!eight).then_some(Reason::WrongFirstContact)
            }
            Some(_) if eight => Some(Reason::BlackContactedEarly),
            Some(group) => (!group.admits(first)).then_some(Reason::WrongFirstContact),
        }
    }
    /// Fouls in priority order, money ball aside.
    fn fault(&self, shot: &Shot) -> Option<Reason> {
        let Some(first) = shot.first() else {
            return Some(Reason::NoContact);
        };
        if shot.scratched() {
            return Some(Reason::Scratch);
        }
        if let Some(reason) = self.contact_fault(&first) {
            return Some(reason);
        }
        if shot.railless() {
            return Some(match self.state.breaking {
                true => Reason::IllegalBreak,
                false => Reason::NoRail,
            });
        }
        None
    }
}

impl Rules for American {
    type State = AmericanState;
    fn variant(&self) -> Variant {
        Variant::American
    }
    fn state(&self) -> &AmericanState {
        &self.state
    }
    fn status(&self) -> &Status {
        &self.state.status
    }
    fn target(&self) -> Target {
        match self.state.group(self.state.status.turn()) {
            None => Target::Open,
            Some(group) => Target::Group(group),
        }
    }
    fn shot(&mut self, shot: &Shot) -> Ruling {
        if self.state.status.is_over() {
            return Ruling::frame_over(&self.state.status);
        }
        let shot = shot.canonical(Variant::American);
        let malformed = shot.malformed(Variant::American);
        let shooter = self.state.status.turn();
        let breaking = self.state.breaking;
        let open = self.state.open;
        let owned = self.state.remaining(shooter);
        let pots = match malformed {
            true => Vec::new(),
            false => shot.objects().filter_map(|b| b.number()).collect::<Vec<u8>>(),
        };
        let mut reason = match malformed {
            true => Some(Reason::NoContact),
            false => self.fault(&shot),
        };

        // money ball
        let mut winner = None;
        let mut respot = false;
        if pots.contains(&8) {
            match (breaking, reason) {
                (true, None) if self.rules.eight_on_break == EightOnBreak::Win => {
                    winner = Some(shooter)
                }
                (true, None) => respot = true,
                (_, Some(_)) => winner = Some(!shooter),
                (false, None) if open || owned > 0 => {
                    reason = Some(Reason::MoneyBallEarly);
                    winner = Some(!shooter);
                }
                (false, None) => winner = Some(shooter),
            }
        }
        pots.iter()
            .filter(|n| !(respot && **n == 8))
            .for_each(|n| self.state.rack.remove(*n));

        // group assignment
        let foul = reason.is_some();
        if !foul && open {
            let solids = pots.iter().any(|n| Group::Solids.admits(&Ball::Number(*n)));
            let stripes = pots.iter().any(|n| Group::Stripes.admits(&Ball::Number(*n)));
            match (solids, stripes) {
                (true, false) => self.state.assign(shooter, Group::Solids),
                (false, true) => self.state.assign(shooter, Group::Stripes),
                _ => {}
            }
        }

        // continuation
        let group = self.state.group(shooter);
        let keeps = !foul
            && ((open && pots.iter().any(|n| *n != 8))
                || pots
                    .iter()
                    .any(|n| group.is_some_and(|g| g.admits(&Ball::Number(*n)))));
        if foul {
            self.state.status.foul();
        } else {
            self.state.status.clean();
        }
        self.state.breaking = false;
        self.state.ball_in_hand = false;
        match winner {
            Some(w) => self.state.status.finish(Winner::from(w)),
            None if foul => {
                self.state.status.pass();
                self.state.ball_in_hand = true;
            }
            None if !keeps => self.state.status.pass(),
            None => {}
        }

        let ruling = Ruling::after(&shot, &self.state.status, reason).with_hand(self.state.ball_in_hand);
        log::debug!("american {} => {}", shot, ruling);
        if ruling.over {
            log::info!("american frame over, winner {:?}", ruling.winner);
        }
        ruling
    }
}
