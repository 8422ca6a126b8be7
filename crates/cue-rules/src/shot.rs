use super::*;
use cue_core::Arbitrary;

/// Physical facts of one completed shot, as resolved by the caller.
///
/// `contacts` is ordered; its first element is the first object ball the cue
/// ball touched. `potted` is unordered and may include the cue ball.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shot {
    pub contacts: Vec<Ball>,
    pub potted: Vec<Ball>,
    pub cue_off_table: bool,
    pub no_cushion: bool,
    pub from_hand: bool,
    pub push_out: bool,
}

/// Construction.
impl Shot {
    pub fn new(contacts: Vec<Ball>, potted: Vec<Ball>) -> Self {
        Self {
            contacts,
            potted,
            ..Self::default()
        }
    }
    /// Boundary constructor: normalise caller labels for `variant`.
    pub fn parse(variant: Variant, contacts: &[&str], potted: &[&str]) -> Self {
        Self::new(
            contacts.iter().map(|t| variant.ball(t)).collect(),
            potted.iter().map(|t| variant.ball(t)).collect(),
        )
    }
    /// Re-express every ball in `variant`'s vocabulary.
    pub fn canonical(&self, variant: Variant) -> Self {
        Self {
            contacts: self.contacts.iter().map(|b| variant.canonical(*b)).collect(),
            potted: self.potted.iter().map(|b| variant.canonical(*b)).collect(),
            ..self.clone()
        }
    }
    pub fn off_table(mut self) -> Self {
        self.cue_off_table = true;
        self
    }
    pub fn without_cushion(mut self) -> Self {
        self.no_cushion = true;
        self
    }
    pub fn placed_from_hand(mut self) -> Self {
        self.from_hand = true;
        self
    }
    pub fn declaring_push_out(mut self) -> Self {
        self.push_out = true;
        self
    }
}

/// Queries used by every engine.
impl Shot {
    /// First object ball contacted.
    pub fn first(&self) -> Option<Ball> {
        self.contacts.first().copied()
    }
    /// Cue ball pocketed or off the table.
    pub fn scratched(&self) -> bool {
        self.cue_off_table || self.potted.iter().any(Ball::is_cue)
    }
    /// Potted object balls, cue excluded.
    pub fn objects(&self) -> impl Iterator<Item = Ball> + '_ {
        self.potted.iter().copied().filter(|b| !b.is_cue())
    }
    pub fn pots(&self, ball: Ball) -> bool {
        self.potted.contains(&ball)
    }
    /// No object ball dropped and nothing reached a cushion after contact.
    pub fn railless(&self) -> bool {
        self.no_cushion && self.objects().next().is_none()
    }
    /// Any identifier the variant cannot place: an unknown or foreign first
    /// contact, or an unknown or foreign ball among the pots.
    pub fn malformed(&self, variant: Variant) -> bool {
        self.first().is_some_and(|b| !variant.admits(&b))
            || self.potted.iter().any(|b| !b.is_cue() && !variant.admits(b))
    }
}

impl Arbitrary for Shot {
    /// Mostly well-formed numbered-ball shots with the occasional stray label.
    fn random() -> Self {
        let contacts = (0..rand::random_range(0..3usize))
            .map(|_| Ball::random())
            .collect();
        let potted = (0..rand::random_range(0..3usize))
            .map(|_| Ball::random())
            .collect();
        Self {
            contacts,
            potted,
            cue_off_table: rand::random_range(0..8u8) == 0,
            no_cushion: rand::random::<bool>(),
            from_hand: rand::random::<bool>(),
            push_out: rand::random_range(0..8u8) == 0,
        }
    }
}

impl Shot {
    /// Random shot drawn only from balls `variant` recognises.
    pub fn random_in(variant: Variant) -> Self {
        let mut shot = Self::random();
        shot.contacts.retain(|b| variant.admits(&variant.canonical(*b)));
        shot.potted.retain(|b| b.is_cue() || variant.admits(&variant.canonical(*b)));
        shot.canonical(variant)
    }
}

impl std::fmt::Display for Shot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let join = |balls: &[Ball]| {
            balls
                .iter()
                .map(|b| b.to_string())
                .collect::<Vec<_>>()
                .join(",")
        };
        write!(f, "hit[{}] pot[{}]", join(&self.contacts), join(&self.potted))?;
        if self.cue_off_table {
            write!(f, " off")?;
        }
        if self.no_cushion {
            write!(f, " no-rail")?;
        }
        if self.from_hand {
            write!(f, " hand")?;
        }
        if self.push_out {
            write!(f, " push")?;
        }
        Ok(())
    }
}
