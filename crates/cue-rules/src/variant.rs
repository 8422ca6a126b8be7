use super::*;

/// The four supported games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Variant {
    American,
    NineBall,
    UkPool,
    Snooker,
}

impl Variant {
    pub const fn all() -> [Self; 4] {
        [Self::American, Self::NineBall, Self::UkPool, Self::Snooker]
    }
}

/// Boundary normalisation: caller labels into canonical [`Ball`]s.
impl Variant {
    /// Normalise a textual ball label. Never fails; unplaceable input is `Unknown`.
    pub fn ball(&self, token: &str) -> Ball {
        match Ball::try_from(token) {
            Ok(ball) => self.canonical(ball),
            Err(_) if self.is_snooker_red(token) => Ball::Colour(Colour::Red),
            Err(_) => Ball::Unknown,
        }
    }
    /// Normalise a numeric ball label.
    pub fn number(&self, n: i64) -> Ball {
        match n {
            0 => Ball::Cue,
            1..=15 => self.canonical(Ball::Number(n as u8)),
            _ => Ball::Unknown,
        }
    }
    /// Map a parsed ball into this variant's vocabulary.
    pub fn canonical(&self, ball: Ball) -> Ball {
        match (self, ball) {
            (_, Ball::Cue) => Ball::Cue,
            (_, Ball::Unknown) => Ball::Unknown,
            (Self::American, Ball::Number(n)) if (1..=15).contains(&n) => ball,
            (Self::American, Ball::Colour(Colour::Black)) => Ball::Number(8),
            (Self::NineBall, Ball::Number(n)) if (1..=9).contains(&n) => ball,
            (Self::UkPool, Ball::Number(n)) => match n {
                1..=7 => Ball::Colour(Colour::Yellow),
                8 => Ball::Colour(Colour::Black),
                9..=15 => Ball::Colour(Colour::Red),
                _ => Ball::Unknown,
            },
            (Self::UkPool, Ball::Colour(Colour::Blue)) => Ball::Colour(Colour::Yellow),
            (Self::UkPool, Ball::Colour(Colour::Yellow | Colour::Red | Colour::Black)) => ball,
            (Self::Snooker, Ball::Colour(_)) => ball,
            _ => Ball::Unknown,
        }
    }
    /// Is this a canonical object ball of the variant?
    pub fn admits(&self, ball: &Ball) -> bool {
        ball.is_object() && self.canonical(*ball) == *ball
    }
    fn is_snooker_red(&self, token: &str) -> bool {
        let token = token.trim().to_ascii_lowercase();
        *self == Self::Snooker
            && token
                .strip_prefix('r')
                .and_then(|n| n.parse::<u8>().ok())
                .is_some_and(|n| (1..=cue_core::REDS).contains(&n))
    }
}

impl TryFrom<&str> for Variant {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.trim().to_ascii_lowercase().replace(['-', '_', ' '], "").as_str() {
            "american" | "americanbilliards" | "8ball" | "eightball" => Ok(Self::American),
            "9ball" | "nineball" | "nine" => Ok(Self::NineBall),
            "uk" | "ukpool" | "uk8" | "uk8ball" | "blackball" => Ok(Self::UkPool),
            "snooker" => Ok(Self::Snooker),
            _ => Err(anyhow::anyhow!("invalid variant: {}", s)),
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::American => write!(f, "american"),
            Self::NineBall => write!(f, "9-ball"),
            Self::UkPool => write!(f, "uk-8-ball"),
            Self::Snooker => write!(f, "snooker"),
        }
    }
}
