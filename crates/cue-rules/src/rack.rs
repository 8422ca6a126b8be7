/// Numbered balls still on the table, as a bitmask over 1..=15.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rack(u16);

impl Rack {
    /// Balls `1..=n`.
    pub fn full(n: u8) -> Self {
        Self((1..=n.min(15)).fold(0, |mask, b| mask | 1 << b))
    }
    pub fn contains(&self, n: u8) -> bool {
        (1..=15).contains(&n) && self.0 & (1 << n) != 0
    }
    pub fn insert(&mut self, n: u8) {
        if (1..=15).contains(&n) {
            self.0 |= 1 << n;
        }
    }
    pub fn remove(&mut self, n: u8) {
        if (1..=15).contains(&n) {
            self.0 &= !(1 << n);
        }
    }
    pub fn lowest(&self) -> Option<u8> {
        match self.0 {
            0 => None,
            mask => Some(mask.trailing_zeros() as u8),
        }
    }
    pub fn count(&self) -> usize {
        self.0.count_ones() as usize
    }
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (1..=15).filter(|n| self.contains(*n))
    }
    /// How many of `range` remain.
    pub fn within(&self, range: std::ops::RangeInclusive<u8>) -> usize {
        range.filter(|n| self.contains(*n)).count()
    }
}

impl From<Rack> for u16 {
    fn from(rack: Rack) -> Self {
        rack.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_rack_counts() {
        assert_eq!(Rack::full(15).count(), 15);
        assert_eq!(Rack::full(9).count(), 9);
        assert!(!Rack::full(9).contains(10));
        assert!(!Rack::full(15).contains(0));
    }

    #[test]
    fn lowest_tracks_removals() {
        let mut rack = Rack::full(9);
        assert_eq!(rack.lowest(), Some(1));
        rack.remove(1);
        rack.remove(2);
        assert_eq!(rack.lowest(), Some(3));
        rack.insert(2);
        assert_eq!(rack.lowest(), Some(2));
    }

    #[test]
    fn within_counts_groups() {
        let mut rack = Rack::full(15);
        rack.remove(3);
        rack.remove(12);
        assert_eq!(rack.within(1..=7), 6);
        assert_eq!(rack.within(9..=15), 6);
        assert_eq!(rack.iter().count(), 13);
    }
}
