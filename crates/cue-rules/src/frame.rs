use super::*;

/// Any variant's referee behind one type.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Frame {
    American(American),
    NineBall(NineBall),
    UkPool(UkPool),
    Snooker(Snooker),
}

impl From<Config> for Frame {
    fn from(config: Config) -> Self {
        match config {
            Config::American(rules) => Self::American(American::new(rules)),
            Config::NineBall(rules) => Self::NineBall(NineBall::new(rules)),
            Config::UkPool(rules) => Self::UkPool(UkPool::new(rules)),
            Config::Snooker(rules) => Self::Snooker(Snooker::new(rules)),
        }
    }
}

impl From<Variant> for Frame {
    fn from(variant: Variant) -> Self {
        Self::from(Config::from(variant))
    }
}

impl Frame {
    /// UK blackball: resolve a pending open-table group choice.
    pub fn choose_group(&mut self, player: Player, group: Group) -> anyhow::Result<()> {
        match self {
            Self::UkPool(game) => game.choose_group(player, group),
            other => anyhow::bail!("{} has no group choice", other.variant()),
        }
    }
    /// Snooker: grant the incoming player a free ball.
    pub fn award_free_ball(&mut self) -> anyhow::Result<()> {
        match self {
            Self::Snooker(game) => game.award_free_ball(),
            other => anyhow::bail!("{} has no free ball award", other.variant()),
        }
    }
}

impl Rules for Frame {
    type State = Frame;
    fn variant(&self) -> Variant {
        match self {
            Self::American(game) => game.variant(),
            Self::NineBall(game) => game.variant(),
            Self::UkPool(game) => game.variant(),
            Self::Snooker(game) => game.variant(),
        }
    }
    fn shot(&mut self, shot: &Shot) -> Ruling {
        match self {
            Self::American(game) => game.shot(shot),
            Self::NineBall(game) => game.shot(shot),
            Self::UkPool(game) => game.shot(shot),
            Self::Snooker(game) => game.shot(shot),
        }
    }
    fn state(&self) -> &Frame {
        self
    }
    fn status(&self) -> &Status {
        match self {
            Self::American(game) => game.status(),
            Self::NineBall(game) => game.status(),
            Self::UkPool(game) => game.status(),
            Self::Snooker(game) => game.status(),
        }
    }
    fn target(&self) -> Target {
        match self {
            Self::American(game) => game.target(),
            Self::NineBall(game) => game.target(),
            Self::UkPool(game) => game.target(),
            Self::Snooker(game) => game.target(),
        }
    }
}
