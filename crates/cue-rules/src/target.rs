use super::*;

/// Which object balls the player at the table may legally aim at.
///
/// Derived by each engine for the active player and consumed by the planners,
/// which apply it to whatever is still on the cloth.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Target {
    /// Numerically lowest numbered ball remaining.
    Lowest,
    /// Any object ball except the 8 or the black.
    Open,
    /// The player's group, then the group's money ball once cleared.
    Group(Group),
    /// An explicit set of balls.
    Balls(Vec<Ball>),
}

impl Target {
    /// Indices into `balls` (balls on the table) that are legal to aim at.
    pub fn legal(&self, balls: &[Ball]) -> Vec<usize> {
        let objects = balls
            .iter()
            .enumerate()
            .filter(|(_, b)| b.is_object());
        match self {
            Self::Lowest => objects
                .filter_map(|(i, b)| b.number().map(|n| (n, i)))
                .min()
                .map(|(_, i)| vec![i])
                .unwrap_or_default(),
            Self::Open => objects
                .filter(|(_, b)| !b.is_black())
                .map(|(i, _)| i)
                .collect(),
            Self::Group(group) => {
                let own = objects
                    .clone()
                    .filter(|(_, b)| group.admits(b))
                    .map(|(i, _)| i)
                    .collect::<Vec<_>>();
                match own.is_empty() {
                    false => own,
                    true => objects
                        .filter(|(_, b)| **b == group.money())
                        .map(|(i, _)| i)
                        .collect(),
                }
            }
            Self::Balls(set) => objects
                .filter(|(_, b)| set.contains(b))
                .map(|(i, _)| i)
                .collect(),
        }
    }
    pub fn admits(&self, ball: &Ball, balls: &[Ball]) -> bool {
        self.legal(balls).iter().any(|i| balls[*i] == *ball)
    }
    /// Rule for the same player's next shot, assuming `potted` drops legally.
    ///
    /// An open table closes onto the potted ball's group. Snooker alternates
    /// red and colour.
    pub fn after(&self, variant: Variant, potted: &Ball) -> Self {
        match (variant, self) {
            (Variant::Snooker, _) => match potted.colour() {
                Some(Colour::Red) => Self::Balls(Colour::sequence().into_iter().map(Ball::from).collect()),
                _ => Self::Balls(vec![Ball::Colour(Colour::Red)]),
            },
            (_, Self::Open | Self::Balls(_)) => potted
                .number()
                .and_then(Group::of_number)
                .or_else(|| potted.colour().and_then(Group::of_colour))
                .map(Self::Group)
                .unwrap_or_else(|| self.clone()),
            (_, other) => other.clone(),
        }
    }
}
