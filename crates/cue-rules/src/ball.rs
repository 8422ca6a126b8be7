use cue_core::Arbitrary;
use cue_core::Points;

/// Named ball colours across UK blackball and snooker.
///
/// In UK pool only `Yellow`, `Red` and `Black` are used; the second group is
/// sometimes labelled blue by callers, which normalisation folds into `Yellow`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Colour {
    Red,
    Yellow,
    Green,
    Brown,
    Blue,
    Pink,
    Black,
}

impl Colour {
    /// Snooker colours in potting order for the final sequence.
    pub const fn sequence() -> [Self; 6] {
        [
            Self::Yellow,
            Self::Green,
            Self::Brown,
            Self::Blue,
            Self::Pink,
            Self::Black,
        ]
    }
    /// Snooker point value.
    pub const fn value(&self) -> Points {
        match self {
            Self::Red => 1,
            Self::Yellow => 2,
            Self::Green => 3,
            Self::Brown => 4,
            Self::Blue => 5,
            Self::Pink => 6,
            Self::Black => 7,
        }
    }
}

impl TryFrom<&str> for Colour {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.trim().to_ascii_lowercase().as_str() {
            "red" => Ok(Self::Red),
            "yellow" => Ok(Self::Yellow),
            "green" => Ok(Self::Green),
            "brown" => Ok(Self::Brown),
            "blue" => Ok(Self::Blue),
            "pink" => Ok(Self::Pink),
            "black" => Ok(Self::Black),
            _ => Err(anyhow::anyhow!("invalid colour: {}", s)),
        }
    }
}

impl std::fmt::Display for Colour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Red => write!(f, "red"),
            Self::Yellow => write!(f, "yellow"),
            Self::Green => write!(f, "green"),
            Self::Brown => write!(f, "brown"),
            Self::Blue => write!(f, "blue"),
            Self::Pink => write!(f, "pink"),
            Self::Black => write!(f, "black"),
        }
    }
}

/// Canonical ball identifier.
///
/// Numbered balls follow pool conventions (1–7 solids, 8, 9–15 stripes);
/// colours cover UK blackball and snooker. Anything the boundary parser
/// could not place becomes `Unknown`, which the engines treat as a
/// no-contact foul.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Ball {
    Cue,
    Number(u8),
    Colour(Colour),
    Unknown,
}

impl Ball {
    pub fn is_cue(&self) -> bool {
        matches!(self, Self::Cue)
    }
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Number(_) | Self::Colour(_))
    }
    /// The 8 or the black.
    pub fn is_black(&self) -> bool {
        matches!(self, Self::Number(8) | Self::Colour(Colour::Black))
    }
    pub fn number(&self) -> Option<u8> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }
    pub fn colour(&self) -> Option<Colour> {
        match self {
            Self::Colour(c) => Some(*c),
            _ => None,
        }
    }
    /// Snooker value; zero for anything that is not a colour.
    pub fn points(&self) -> Points {
        self.colour().map(|c| c.value()).unwrap_or(0)
    }
}

impl Arbitrary for Ball {
    fn random() -> Self {
        match rand::random_range(0..32u8) {
            0 => Self::Cue,
            1 => Self::Unknown,
            n @ 2..=16 => Self::Number(n - 1),
            n => Self::Colour(match n % 7 {
                0 => Colour::Red,
                1 => Colour::Yellow,
                2 => Colour::Green,
                3 => Colour::Brown,
                4 => Colour::Blue,
                5 => Colour::Pink,
                _ => Colour::Black,
            }),
        }
    }
}

impl From<Colour> for Ball {
    fn from(c: Colour) -> Self {
        Self::Colour(c)
    }
}

/// Variant-agnostic parse. Accepts `cue`/`white`/`0`, numbers with optional
/// `ball_`, `ball` or `#` prefixes, `eight`, and colour names.
impl TryFrom<&str> for Ball {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let token = s.trim().to_ascii_lowercase();
        match token.as_str() {
            "cue" | "white" | "cueball" | "cue_ball" | "0" => return Ok(Self::Cue),
            "eight" => return Ok(Self::Number(8)),
            _ => {}
        }
        if let Ok(colour) = Colour::try_from(token.as_str()) {
            return Ok(Self::Colour(colour));
        }
        let digits = ["ball_", "ball", "#"]
            .iter()
            .find_map(|prefix| token.strip_prefix(prefix))
            .unwrap_or(token.as_str());
        match digits.parse::<u8>() {
            Ok(0) => Ok(Self::Cue),
            Ok(n @ 1..=15) => Ok(Self::Number(n)),
            _ => Err(anyhow::anyhow!("invalid ball: {}", s)),
        }
    }
}

impl std::fmt::Display for Ball {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cue => write!(f, "cue"),
            Self::Number(n) => write!(f, "{}", n),
            Self::Colour(c) => write!(f, "{}", c),
            Self::Unknown => write!(f, "?"),
        }
    }
}

/// A set of object balls a player may be assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Group {
    Solids,
    Stripes,
    Yellow,
    Red,
}

impl Group {
    pub fn other(&self) -> Self {
        match self {
            Self::Solids => Self::Stripes,
            Self::Stripes => Self::Solids,
            Self::Yellow => Self::Red,
            Self::Red => Self::Yellow,
        }
    }
    /// Does this group own the ball? UK groups also claim the conventional
    /// numbered sets so numbered racks can stand in for colours.
    pub fn admits(&self, ball: &Ball) -> bool {
        match (self, ball) {
            (Self::Solids, Ball::Number(n)) => (1..=7).contains(n),
            (Self::Stripes, Ball::Number(n)) => (9..=15).contains(n),
            (Self::Yellow, Ball::Colour(Colour::Yellow)) => true,
            (Self::Red, Ball::Colour(Colour::Red)) => true,
            (Self::Yellow, Ball::Number(n)) => (1..=7).contains(n),
            (Self::Red, Ball::Number(n)) => (9..=15).contains(n),
            _ => false,
        }
    }
    /// The money ball that becomes legal once the group is cleared.
    pub fn money(&self) -> Ball {
        match self {
            Self::Solids | Self::Stripes => Ball::Number(8),
            Self::Yellow | Self::Red => Ball::Colour(Colour::Black),
        }
    }
    /// Group owning a numbered ball.
    pub fn of_number(n: u8) -> Option<Self> {
        match n {
            1..=7 => Some(Self::Solids),
            9..=15 => Some(Self::Stripes),
            _ => None,
        }
    }
    /// UK group owning a colour.
    pub fn of_colour(c: Colour) -> Option<Self> {
        match c {
            Colour::Yellow => Some(Self::Yellow),
            Colour::Red => Some(Self::Red),
            _ => None,
        }
    }
    pub fn colour(&self) -> Option<Colour> {
        match self {
            Self::Yellow => Some(Colour::Yellow),
            Self::Red => Some(Colour::Red),
            _ => None,
        }
    }
}

impl TryFrom<&str> for Group {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.trim().to_ascii_lowercase().as_str() {
            "solids" | "solid" => Ok(Self::Solids),
            "stripes" | "stripe" => Ok(Self::Stripes),
            "yellow" | "yellows" | "blue" | "blues" => Ok(Self::Yellow),
            "red" | "reds" => Ok(Self::Red),
            _ => Err(anyhow::anyhow!("invalid group: {}", s)),
        }
    }
}

impl std::fmt::Display for Group {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Solids => write!(f, "solids"),
            Self::Stripes => write!(f, "stripes"),
            Self::Yellow => write!(f, "yellows"),
            Self::Red => write!(f, "reds"),
        }
    }
}
