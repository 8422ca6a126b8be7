/// One of the four cushions bounding the playing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rail {
    Left,
    Right,
    Top,
    Bottom,
}

impl Rail {
    pub const fn all() -> [Self; 4] {
        [Self::Left, Self::Right, Self::Top, Self::Bottom]
    }
}

/// Named pocket positions of a six-pocket table.
///
/// Labels read with the long side vertical: `ML`/`MR` are the side pockets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mouth {
    TL,
    TR,
    ML,
    MR,
    BL,
    BR,
}

impl Mouth {
    pub const fn all() -> [Self; 6] {
        [Self::TL, Self::TR, Self::ML, Self::MR, Self::BL, Self::BR]
    }
    pub fn is_side(&self) -> bool {
        matches!(self, Self::ML | Self::MR)
    }
}

impl From<usize> for Mouth {
    fn from(n: usize) -> Self {
        Self::all()[n % 6]
    }
}

impl From<Mouth> for usize {
    fn from(m: Mouth) -> Self {
        m as usize
    }
}

impl TryFrom<&str> for Mouth {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TL" => Ok(Self::TL),
            "TR" => Ok(Self::TR),
            "ML" => Ok(Self::ML),
            "MR" => Ok(Self::MR),
            "BL" => Ok(Self::BL),
            "BR" => Ok(Self::BR),
            _ => Err(anyhow::anyhow!("invalid pocket: {}", s)),
        }
    }
}

impl std::fmt::Display for Mouth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TL => write!(f, "TL"),
            Self::TR => write!(f, "TR"),
            Self::ML => write!(f, "ML"),
            Self::MR => write!(f, "MR"),
            Self::BL => write!(f, "BL"),
            Self::BR => write!(f, "BR"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mouth_labels_parse_back() {
        for mouth in Mouth::all() {
            assert_eq!(Mouth::try_from(mouth.to_string().as_str()).ok(), Some(mouth));
        }
        assert!(Mouth::try_from("XX").is_err());
    }

    #[test]
    fn mouth_index_matches_order() {
        for (i, mouth) in Mouth::all().into_iter().enumerate() {
            assert_eq!(usize::from(mouth), i);
            assert_eq!(Mouth::from(i), mouth);
        }
    }
}
