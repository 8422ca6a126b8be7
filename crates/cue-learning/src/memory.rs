use cue_core::ANGLE_BUCKET_DEGREES;
use cue_core::Angle;
use cue_core::DISTANCE_BUCKET;
use cue_core::Length;
use cue_core::MEMORY_CAPACITY;
use cue_core::Probability;
use std::collections::HashMap;
use std::sync::PoisonError;
use std::sync::RwLock;
use std::sync::RwLockReadGuard;
use std::sync::RwLockWriteGuard;

/// Coarse shot signature: cut angle in 10° steps, object-to-pocket
/// distance in 50-unit steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bucket {
    angle: i32,
    distance: i32,
}

impl Bucket {
    pub fn of(angle: Angle, distance: Length) -> Self {
        Self {
            angle: (angle.to_degrees() / ANGLE_BUCKET_DEGREES).round() as i32,
            distance: (distance / DISTANCE_BUCKET).round() as i32,
        }
    }
    pub fn angle(&self) -> i32 {
        self.angle
    }
    pub fn distance(&self) -> i32 {
        self.distance
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.angle, self.distance)
    }
}

/// Outcomes recorded against one [`Bucket`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tally {
    pub success: u32,
    pub attempts: u32,
}

impl Tally {
    pub fn rate(&self) -> Option<Probability> {
        (self.attempts > 0).then(|| self.success as Probability / self.attempts as Probability)
    }
}

/// Learned pot success rates, shared between the advisor and whoever
/// reports outcomes back to it.
pub trait ShotMemory: Send + Sync {
    /// Success rate for shots like this one, if any were recorded.
    fn rate(&self, bucket: Bucket) -> Option<Probability>;
    fn record(&self, bucket: Bucket, success: bool);
    fn reset(&self);
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Default)]
struct Ledger {
    tallies: HashMap<Bucket, (Tally, u64)>,
    clock: u64,
}

/// Bounded in-memory [`ShotMemory`].
///
/// Once `capacity` buckets are held, recording into a new bucket evicts
/// the one recorded into least recently. Reads do not count as touches.
#[derive(Debug)]
pub struct Memory {
    capacity: usize,
    ledger: RwLock<Ledger>,
}

impl Default for Memory {
    fn default() -> Self {
        Self::new(MEMORY_CAPACITY)
    }
}

impl Memory {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            ledger: RwLock::new(Ledger::default()),
        }
    }
    pub fn capacity(&self) -> usize {
        self.capacity
    }
    pub fn tally(&self, bucket: Bucket) -> Option<Tally> {
        self.read().tallies.get(&bucket).map(|(t, _)| *t)
    }
    /// Every bucket with its tally, oldest touch first.
    pub fn tallies(&self) -> Vec<(Bucket, Tally)> {
        let ledger = self.read();
        let mut tallies = ledger
            .tallies
            .iter()
            .map(|(b, (t, touched))| (*touched, *b, *t))
            .collect::<Vec<_>>();
        tallies.sort_by_key(|(touched, b, _)| (*touched, *b));
        tallies.into_iter().map(|(_, b, t)| (b, t)).collect()
    }
    /// Rebuild from persisted tallies, oldest first.
    pub fn restore<I>(capacity: usize, tallies: I) -> Self
    where
        I: IntoIterator<Item = (Bucket, Tally)>,
    {
        let memory = Self::new(capacity);
        {
            let mut ledger = memory.write();
            for (bucket, tally) in tallies {
                Self::make_room(&mut ledger, memory.capacity, bucket);
                ledger.clock += 1;
                let clock = ledger.clock;
                ledger.tallies.insert(bucket, (tally, clock));
            }
        }
        memory
    }
    fn make_room(ledger: &mut Ledger, capacity: usize, incoming: Bucket) {
        if ledger.tallies.contains_key(&incoming) || ledger.tallies.len() < capacity {
            return;
        }
        let stale = ledger
            .tallies
            .iter()
            .min_by_key(|(b, (_, touched))| (*touched, **b))
            .map(|(b, _)| *b);
        if let Some(stale) = stale {
            log::trace!("evicting shot bucket {}", stale);
            ledger.tallies.remove(&stale);
        }
    }
    fn read(&self) -> RwLockReadGuard<'_, Ledger> {
        self.ledger.read().unwrap_or_else(PoisonError::into_inner)
    }
    fn write(&self) -> RwLockWriteGuard<'_, Ledger> {
        self.ledger.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ShotMemory for Memory {
    fn rate(&self, bucket: Bucket) -> Option<Probability> {
        self.tally(bucket).and_then(|t| t.rate())
    }
    fn record(&self, bucket: Bucket, success: bool) {
        let mut ledger = self.write();
        Self::make_room(&mut ledger, self.capacity, bucket);
        ledger.clock += 1;
        let clock = ledger.clock;
        let (tally, touched) = ledger.tallies.entry(bucket).or_default();
        tally.attempts += 1;
        tally.success += success as u32;
        *touched = clock;
    }
    fn reset(&self) {
        let mut ledger = self.write();
        ledger.tallies.clear();
        ledger.clock = 0;
    }
    fn len(&self) -> usize {
        self.read().tallies.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buckets_round_to_nearest_step() {
        let bucket = Bucket::of(14f32.to_radians(), 74.0);
        assert_eq!(bucket.angle(), 1);
        assert_eq!(bucket.distance(), 1);
        let bucket = Bucket::of(16f32.to_radians(), 76.0);
        assert_eq!(bucket.angle(), 2);
        assert_eq!(bucket.distance(), 2);
    }

    #[test]
    fn rate_tracks_recorded_outcomes() {
        let memory = Memory::default();
        let bucket = Bucket::of(0.1, 120.0);
        assert_eq!(memory.rate(bucket), None);
        memory.record(bucket, true);
        memory.record(bucket, false);
        memory.record(bucket, true);
        memory.record(bucket, true);
        assert_eq!(memory.rate(bucket), Some(0.75));
        assert_eq!(memory.len(), 1);
    }

    #[test]
    fn reset_forgets_everything() {
        let memory = Memory::default();
        memory.record(Bucket::of(0.0, 0.0), true);
        memory.record(Bucket::of(1.0, 300.0), false);
        assert_eq!(memory.len(), 2);
        memory.reset();
        assert!(memory.is_empty());
    }

    #[test]
    fn full_memory_evicts_least_recently_recorded() {
        let memory = Memory::new(2);
        let a = Bucket::of(0.0, 0.0);
        let b = Bucket::of(0.0, 100.0);
        let c = Bucket::of(0.0, 200.0);
        memory.record(a, true);
        memory.record(b, true);
        memory.record(a, false);
        memory.record(c, true);
        assert_eq!(memory.len(), 2);
        assert!(memory.tally(a).is_some());
        assert!(memory.tally(b).is_none());
        assert!(memory.tally(c).is_some());
    }

    #[test]
    fn restore_keeps_touch_order() {
        let memory = Memory::new(8);
        let a = Bucket::of(0.0, 0.0);
        let b = Bucket::of(0.5, 0.0);
        memory.record(b, true);
        memory.record(a, false);
        let restored = Memory::restore(1, memory.tallies());
        assert_eq!(restored.len(), 1);
        assert_eq!(restored.tally(a), Some(Tally { success: 0, attempts: 1 }));
    }

    #[test]
    fn memory_is_shareable() {
        use std::sync::Arc;
        let memory: Arc<dyn ShotMemory> = Arc::new(Memory::default());
        let bucket = Bucket::of(0.2, 40.0);
        std::thread::scope(|s| {
            for _ in 0..4 {
                let memory = memory.clone();
                s.spawn(move || (0..25).for_each(|_| memory.record(bucket, true)));
            }
        });
        assert_eq!(memory.rate(bucket), Some(1.0));
        assert_eq!(memory.len(), 1);
    }
}
