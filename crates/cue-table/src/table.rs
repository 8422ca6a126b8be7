use super::*;
use cue_core::Length;
use cue_core::POCKET_ENTRY_OFFSET;

/// The playing surface: a rectangle, a ball radius, and an ordered set of pockets.
///
/// Immutable once built. Pocket order is the caller's; planners report the
/// pocket they chose by index into [`Table::pockets`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Table {
    width: Length,
    height: Length,
    radius: Length,
    pockets: Vec<Point>,
}

/// Construction.
impl Table {
    pub fn new(width: Length, height: Length, radius: Length, pockets: Vec<Point>) -> anyhow::Result<Self> {
        if !(width.is_finite() && height.is_finite() && radius.is_finite()) {
            anyhow::bail!("table dimensions must be finite");
        }
        if width <= 0.0 || height <= 0.0 || radius <= 0.0 {
            anyhow::bail!("table dimensions must be positive: {}x{} r={}", width, height, radius);
        }
        if 2.0 * radius >= width.min(height) {
            anyhow::bail!("ball radius {} does not fit a {}x{} table", radius, width, height);
        }
        if pockets.iter().any(|p| !p.is_finite()) {
            anyhow::bail!("pocket positions must be finite");
        }
        Ok(Self {
            width,
            height,
            radius,
            pockets,
        })
    }
    /// Six-pocket table with the side pockets halfway along the long rails,
    /// in [`Mouth`] order.
    pub fn standard(width: Length, height: Length, radius: Length) -> anyhow::Result<Self> {
        let pockets = Mouth::all()
            .into_iter()
            .map(|m| Self::locate(m, width, height))
            .collect();
        Self::new(width, height, radius, pockets)
    }
    fn locate(mouth: Mouth, width: Length, height: Length) -> Point {
        let (short, long) = (width.min(height), width.max(height));
        let (x, y) = match mouth {
            Mouth::TL => (0.0, 0.0),
            Mouth::TR => (short, 0.0),
            Mouth::ML => (0.0, long / 2.0),
            Mouth::MR => (short, long / 2.0),
            Mouth::BL => (0.0, long),
            Mouth::BR => (short, long),
        };
        match height >= width {
            true => Point::new(x, y),
            false => Point::new(y, x),
        }
    }
}

impl Default for Table {
    /// Landscape 2:1 table in screen units, six pockets.
    fn default() -> Self {
        let (width, height, radius) = (1000.0, 500.0, 12.0);
        Self {
            width,
            height,
            radius,
            pockets: Mouth::all()
                .into_iter()
                .map(|m| Self::locate(m, width, height))
                .collect(),
        }
    }
}

/// Accessors and derived dimensions.
impl Table {
    pub fn width(&self) -> Length {
        self.width
    }
    pub fn height(&self) -> Length {
        self.height
    }
    pub fn radius(&self) -> Length {
        self.radius
    }
    pub fn pockets(&self) -> &[Point] {
        &self.pockets
    }
    pub fn pocket(&self, index: usize) -> Option<Point> {
        self.pockets.get(index).copied()
    }
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
    pub fn diagonal(&self) -> Length {
        self.width.hypot(self.height)
    }
    pub fn longest(&self) -> Length {
        self.width.max(self.height)
    }
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(0.0, 0.0),
            Point::new(self.width, 0.0),
            Point::new(0.0, self.height),
            Point::new(self.width, self.height),
        ]
    }
}

/// Spatial queries.
impl Table {
    /// True if a ball centred at `p` lies fully on the cloth.
    pub fn contains(&self, p: &Point) -> bool {
        p.x >= self.radius
            && p.x <= self.width - self.radius
            && p.y >= self.radius
            && p.y <= self.height - self.radius
    }
    /// Nearest position where a ball centre may rest.
    pub fn clamp(&self, p: Point) -> Point {
        Point::new(
            p.x.clamp(self.radius, self.width - self.radius),
            p.y.clamp(self.radius, self.height - self.radius),
        )
    }
    /// Capture point of a pocket: the mouth pulled toward the table centre
    /// by a little more than one ball radius.
    pub fn entry(&self, pocket: Point) -> Point {
        pocket + (self.center() - pocket).unit() * (self.radius * POCKET_ENTRY_OFFSET)
    }
    pub fn entries(&self) -> Vec<Point> {
        self.pockets.iter().map(|p| self.entry(*p)).collect()
    }
    /// Index and position of the pocket whose mouth is closest to `p`.
    pub fn nearest_pocket(&self, p: &Point) -> Option<(usize, Point)> {
        self.pockets
            .iter()
            .copied()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.distance(p).total_cmp(&b.distance(p)))
    }
    /// True if `p` lies within `reach` of any pocket mouth.
    pub fn near_pocket(&self, p: &Point, reach: Length) -> bool {
        self.pockets.iter().any(|pocket| pocket.distance(p) < reach)
    }
    /// Distance from `p` to the closest cushion line.
    pub fn cushion_gap(&self, p: &Point) -> Length {
        p.x.min(self.width - p.x).min(p.y).min(self.height - p.y)
    }
    /// Reflection of `p` across a cushion line.
    pub fn mirror(&self, p: Point, rail: Rail) -> Point {
        match rail {
            Rail::Left => Point::new(-p.x, p.y),
            Rail::Right => Point::new(2.0 * self.width - p.x, p.y),
            Rail::Top => Point::new(p.x, -p.y),
            Rail::Bottom => Point::new(p.x, 2.0 * self.height - p.y),
        }
    }
    /// Where the line from `from` toward `to` meets a cushion line, if it ever does.
    pub fn cushion(&self, from: Point, to: Point, rail: Rail) -> Option<Point> {
        let d = to - from;
        let hit = match rail {
            Rail::Left | Rail::Right => {
                let x = if rail == Rail::Left { 0.0 } else { self.width };
                (d.x.abs() > f32::EPSILON).then(|| Point::new(x, from.y + d.y * (x - from.x) / d.x))
            }
            Rail::Top | Rail::Bottom => {
                let y = if rail == Rail::Top { 0.0 } else { self.height };
                (d.y.abs() > f32::EPSILON).then(|| Point::new(from.x + d.x * (y - from.y) / d.y, y))
            }
        };
        hit.filter(Point::is_finite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Table {
        Table::standard(500.0, 1000.0, 10.0).unwrap()
    }

    #[test]
    fn rejects_degenerate_dimensions() {
        assert!(Table::new(0.0, 100.0, 1.0, vec![]).is_err());
        assert!(Table::new(100.0, 100.0, -1.0, vec![]).is_err());
        assert!(Table::new(100.0, 100.0, 60.0, vec![]).is_err());
        assert!(Table::new(f32::NAN, 100.0, 1.0, vec![]).is_err());
    }

    #[test]
    fn standard_side_pockets_sit_on_long_rails() {
        let portrait = table();
        assert_eq!(portrait.pocket(Mouth::ML as usize), Some(Point::new(0.0, 500.0)));
        let landscape = Table::standard(1000.0, 500.0, 10.0).unwrap();
        assert_eq!(landscape.pocket(Mouth::ML as usize), Some(Point::new(500.0, 0.0)));
        assert_eq!(landscape.pockets().len(), 6);
    }

    #[test]
    fn entry_moves_toward_center() {
        let t = table();
        for pocket in t.pockets() {
            let entry = t.entry(*pocket);
            assert!((entry.distance(pocket) - 10.5).abs() < 1e-3);
            assert!(entry.distance(&t.center()) < pocket.distance(&t.center()));
        }
    }

    #[test]
    fn contains_respects_radius() {
        let t = table();
        assert!(t.contains(&Point::new(10.0, 10.0)));
        assert!(!t.contains(&Point::new(9.0, 500.0)));
        assert!(t.contains(&t.clamp(Point::new(-50.0, 2000.0))));
    }

    #[test]
    fn mirror_then_cushion_lands_on_rail() {
        let t = table();
        let from = Point::new(100.0, 100.0);
        let to = Point::new(200.0, 300.0);
        let image = t.mirror(to, Rail::Left);
        assert_eq!(image, Point::new(-200.0, 300.0));
        let hit = t.cushion(from, image, Rail::Left).unwrap();
        assert!(hit.x.abs() < 1e-4);
        assert!(hit.y > from.y && hit.y < to.y);
        assert!(t.cushion(from, Point::new(100.0, 900.0), Rail::Left).is_none());
    }

    #[test]
    fn nearest_pocket_of_corner_point() {
        let t = table();
        let (index, _) = t.nearest_pocket(&Point::new(480.0, 990.0)).unwrap();
        assert_eq!(Mouth::from(index), Mouth::BR);
    }

    #[test]
    fn default_matches_standard_layout() {
        assert_eq!(Table::default(), Table::standard(1000.0, 500.0, 12.0).unwrap());
    }
}
