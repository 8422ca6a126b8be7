/// Why a shot was not a plain legal shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Reason {
    FrameOver,
    NoContact,
    Scratch,
    WrongFirstContact,
    BlackContactedEarly,
    NoRail,
    IllegalBreak,
    WrongBallPotted,
    PottedOpponentBall,
    MoneyBallEarly,
    MustPlayFromBaulk,
    IllegalPushOut,
    ConsecutiveFouls,
}

impl Reason {
    /// Stable snake-case code for adapters and logs.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::FrameOver => "frame_over",
            Self::NoContact => "no_contact",
            Self::Scratch => "scratch",
            Self::WrongFirstContact => "wrong_first_contact",
            Self::BlackContactedEarly => "black_contacted_early",
            Self::NoRail => "no_rail",
            Self::IllegalBreak => "illegal_break",
            Self::WrongBallPotted => "wrong_ball_potted",
            Self::PottedOpponentBall => "potted_opponent_ball",
            Self::MoneyBallEarly => "money_ball_early",
            Self::MustPlayFromBaulk => "must_play_from_baulk",
            Self::IllegalPushOut => "illegal_push_out",
            Self::ConsecutiveFouls => "consecutive_fouls",
        }
    }
}

impl std::fmt::Display for Reason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
