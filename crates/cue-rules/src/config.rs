use super::*;
use cue_core::FOUL_LIMIT;
use cue_core::Points;
use cue_core::SNOOKER_MIN_PENALTY;

/// What happens when the 8 drops on a foul-free American break.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EightOnBreak {
    #[default]
    Win,
    Respot,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AmericanRules {
    pub eight_on_break: EightOnBreak,
}

/// What happens when the 9 drops on a legal break.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NineOnBreak {
    #[default]
    Win,
    Respot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NineBallRules {
    pub foul_limit: u8,
    pub three_foul_loss: bool,
    pub nine_on_break: NineOnBreak,
    pub require_rail: bool,
}

impl Default for NineBallRules {
    fn default() -> Self {
        Self {
            foul_limit: FOUL_LIMIT,
            three_foul_loss: true,
            nine_on_break: NineOnBreak::default(),
            require_rail: true,
        }
    }
}

/// What happens when the black drops on a legal UK break.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BlackOnBreak {
    #[default]
    Respot,
    Win,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UkRules {
    pub black_on_break: BlackOnBreak,
    /// Open-table pots may mix colours or differ from the first contact.
    pub allow_combinations: bool,
    pub require_cushion_if_no_pot: bool,
    /// Incoming player on the black still receives two shots after a foul.
    pub two_visits_carry_on_black: bool,
}

impl Default for UkRules {
    fn default() -> Self {
        Self {
            black_on_break: BlackOnBreak::default(),
            allow_combinations: false,
            require_cushion_if_no_pot: true,
            two_visits_carry_on_black: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SnookerRules {
    pub minimum_penalty: Points,
}

impl Default for SnookerRules {
    fn default() -> Self {
        Self {
            minimum_penalty: SNOOKER_MIN_PENALTY,
        }
    }
}

/// Variant selection plus its rule options, fixed at frame creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Config {
    American(AmericanRules),
    NineBall(NineBallRules),
    UkPool(UkRules),
    Snooker(SnookerRules),
}

impl Config {
    pub fn variant(&self) -> Variant {
        match self {
            Self::American(_) => Variant::American,
            Self::NineBall(_) => Variant::NineBall,
            Self::UkPool(_) => Variant::UkPool,
            Self::Snooker(_) => Variant::Snooker,
        }
    }
}

impl From<Variant> for Config {
    fn from(variant: Variant) -> Self {
        match variant {
            Variant::American => Self::American(AmericanRules::default()),
            Variant::NineBall => Self::NineBall(NineBallRules::default()),
            Variant::UkPool => Self::UkPool(UkRules::default()),
            Variant::Snooker => Self::Snooker(SnookerRules::default()),
        }
    }
}
