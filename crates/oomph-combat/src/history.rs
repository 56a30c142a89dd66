//! Fixed-capacity ring of past entity positions.

use oomph_math::Vec3;
use serde::{Deserialize, Serialize};

/// Enough for roughly a second of rewind at 20 ticks per second.
pub const DEFAULT_CAPACITY: usize = 20;

/// Where an entity was on a given tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub tick: i64,
    pub position: Vec3,
    pub prev_position: Vec3,
    /// The entity teleported onto `position` this tick.
    pub teleport: bool,
}

/// Ring buffer of [`HistoryEntry`], oldest overwritten first. Lookups return
/// copies.
#[derive(Debug, Clone)]
pub struct PositionHistory {
    entries: Vec<Option<HistoryEntry>>,
    head: usize,
    len: usize,
}

impl Default for PositionHistory {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl PositionHistory {
    /// Create an empty history. A capacity of 0 is raised to 1.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: vec![None; capacity.max(1)],
            head: 0,
            len: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.entries.iter_mut().for_each(|e| *e = None);
        self.head = 0;
        self.len = 0;
    }

    pub fn add(&mut self, entry: HistoryEntry) {
        self.entries[self.head] = Some(entry);
        self.head = (self.head + 1) % self.capacity();
        self.len = (self.len + 1).min(self.capacity());
    }

    /// Entries from newest to oldest.
    pub fn iter_newest(&self) -> impl Iterator<Item = HistoryEntry> + '_ {
        let cap = self.capacity();
        (1..=self.len).filter_map(move |back| self.entries[(self.head + cap - back) % cap])
    }

    pub fn newest(&self) -> Option<HistoryEntry> {
        self.iter_newest().next()
    }

    /// Entry recorded for exactly `tick`. Scans newest first and stops once
    /// it has passed below `tick`.
    pub fn get(&self, tick: i64) -> Option<HistoryEntry> {
        for entry in self.iter_newest() {
            if entry.tick == tick {
                return Some(entry);
            }
            if entry.tick < tick {
                break;
            }
        }
        None
    }

    /// Entry whose tick is nearest to `tick`; the newer one wins a tie.
    pub fn get_closest(&self, tick: i64) -> Option<HistoryEntry> {
        let mut best: Option<HistoryEntry> = None;
        for entry in self.iter_newest() {
            let closer = match best {
                Some(b) => (entry.tick - tick).abs() < (b.tick - tick).abs(),
                None => true,
            };
            if closer {
                best = Some(entry);
            }
        }
        best
    }

    /// All entries with `start <= tick <= end`, oldest first.
    pub fn get_range(&self, start: i64, end: i64) -> Vec<HistoryEntry> {
        let mut out: Vec<HistoryEntry> = self
            .iter_newest()
            .filter(|e| e.tick >= start && e.tick <= end)
            .collect();
        out.reverse();
        out
    }
}
