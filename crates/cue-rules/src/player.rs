use cue_core::Arbitrary;
use std::ops::Not;

/// One of the two players at the table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Player {
    #[default]
    A,
    B,
}

impl Player {
    pub const fn index(&self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
        }
    }
}

impl Not for Player {
    type Output = Self;
    fn not(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

impl Arbitrary for Player {
    fn random() -> Self {
        if rand::random::<bool>() { Self::A } else { Self::B }
    }
}

impl TryFrom<&str> for Player {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.trim() {
            "A" | "a" => Ok(Self::A),
            "B" | "b" => Ok(Self::B),
            _ => Err(anyhow::anyhow!("invalid player: {}", s)),
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
        }
    }
}

/// Frame result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Winner {
    Player(Player),
    Tie,
}

impl From<Player> for Winner {
    fn from(p: Player) -> Self {
        Self::Player(p)
    }
}

impl std::fmt::Display for Winner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Player(p) => write!(f, "{}", p),
            Self::Tie => write!(f, "tie"),
        }
    }
}

/// Bookkeeping common to every variant: whose turn it is, foul streaks,
/// and the terminal flag.
///
/// Once `over` is set, `winner` is set too and nothing here changes again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Status {
    turn: Player,
    fouls: [u8; 2],
    over: bool,
    winner: Option<Winner>,
}

impl Status {
    pub fn turn(&self) -> Player {
        self.turn
    }
    pub fn fouls(&self, player: Player) -> u8 {
        self.fouls[player.index()]
    }
    pub fn is_over(&self) -> bool {
        self.over
    }
    pub fn winner(&self) -> Option<Winner> {
        self.winner
    }
    pub(crate) fn pass(&mut self) {
        self.turn = !self.turn;
    }
    /// Shooter committed a foul; returns the new streak.
    pub(crate) fn foul(&mut self) -> u8 {
        let streak = &mut self.fouls[self.turn.index()];
        *streak = streak.saturating_add(1);
        *streak
    }
    /// Shooter played a legal shot.
    pub(crate) fn clean(&mut self) {
        self.fouls[self.turn.index()] = 0;
    }
    pub(crate) fn forgive(&mut self) {
        self.fouls = [0; 2];
    }
    pub(crate) fn finish(&mut self, winner: Winner) {
        self.over = true;
        self.winner = Some(winner);
    }
}
