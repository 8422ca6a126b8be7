use cue_core::Angle;
use cue_core::Arbitrary;
use cue_core::Length;
use std::ops::Add;
use std::ops::Mul;
use std::ops::Neg;
use std::ops::Sub;

/// A position or displacement on the table surface.
///
/// Origin is the top-left corner; `x` grows along the width and `y` along
/// the height. Units are whatever the caller measures the table in.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: Length,
    pub y: Length,
}

impl Point {
    pub const fn new(x: Length, y: Length) -> Self {
        Self { x, y }
    }
    pub fn norm(&self) -> Length {
        self.x.hypot(self.y)
    }
    pub fn distance(&self, other: &Self) -> Length {
        (*self - *other).norm()
    }
    pub fn dot(&self, other: &Self) -> Length {
        self.x * other.x + self.y * other.y
    }
    pub fn cross(&self, other: &Self) -> Length {
        self.x * other.y - self.y * other.x
    }
    /// Unit vector in the same direction. Zero vectors stay zero.
    pub fn unit(&self) -> Self {
        match self.norm() {
            n if n > f32::EPSILON => *self * (1.0 / n),
            _ => Self::default(),
        }
    }
    /// Counter-clockwise perpendicular.
    pub fn perp(&self) -> Self {
        Self::new(-self.y, self.x)
    }
    /// Heading of this vector, `atan2(y, x)`.
    pub fn heading(&self) -> Angle {
        self.y.atan2(self.x)
    }
    /// Unit vector at the given heading.
    pub fn polar(angle: Angle) -> Self {
        Self::new(angle.cos(), angle.sin())
    }
    pub fn rotate(&self, angle: Angle) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        *self + (*other - *self) * t
    }
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Point {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Point {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

impl From<Point> for (f32, f32) {
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

impl Arbitrary for Point {
    /// Uniform over the unit square.
    fn random() -> Self {
        Self::new(rand::random::<f32>(), rand::random::<f32>())
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.0},{:.0})", self.x, self.y)
    }
}
