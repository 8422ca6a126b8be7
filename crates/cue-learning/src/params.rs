/// How hard the cue ball is struck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Speed {
    Soft,
    Medium,
    Firm,
}

impl Speed {
    /// Normalised power in `(0, 1]`.
    pub fn power(&self) -> f32 {
        match self {
            Self::Soft => 0.4,
            Self::Medium => 0.65,
            Self::Firm => 0.9,
        }
    }
}

impl std::fmt::Display for Speed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Soft => write!(f, "soft"),
            Self::Medium => write!(f, "med"),
            Self::Firm => write!(f, "firm"),
        }
    }
}

/// Discrete cue-ball action after contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Spin {
    Stun,
    FollowShort,
    FollowLong,
    DrawShort,
    DrawLong,
    SideLeft,
    SideRight,
}

impl std::fmt::Display for Spin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stun => write!(f, "stun"),
            Self::FollowShort => write!(f, "followS"),
            Self::FollowLong => write!(f, "followL"),
            Self::DrawShort => write!(f, "drawS"),
            Self::DrawLong => write!(f, "drawL"),
            Self::SideLeft => write!(f, "sideL"),
            Self::SideRight => write!(f, "sideR"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CueParams {
    pub speed: Speed,
    pub spin: Spin,
}

impl CueParams {
    pub const fn new(speed: Speed, spin: Spin) -> Self {
        Self { speed, spin }
    }
    /// Every pot candidate is tried with each of these.
    pub const fn variations() -> [Self; 9] {
        [
            Self::new(Speed::Soft, Spin::Stun),
            Self::new(Speed::Medium, Spin::Stun),
            Self::new(Speed::Firm, Spin::Stun),
            Self::new(Speed::Medium, Spin::FollowShort),
            Self::new(Speed::Firm, Spin::FollowLong),
            Self::new(Speed::Medium, Spin::DrawShort),
            Self::new(Speed::Firm, Spin::DrawLong),
            Self::new(Speed::Medium, Spin::SideLeft),
            Self::new(Speed::Medium, Spin::SideRight),
        ]
    }
}

impl std::fmt::Display for CueParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.speed, self.spin)
    }
}
