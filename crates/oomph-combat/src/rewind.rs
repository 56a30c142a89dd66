//! Position histories for every tracked entity.

use std::collections::HashMap;

use oomph_math::Vec3;
use tracing::trace;

use crate::history::{HistoryEntry, PositionHistory, DEFAULT_CAPACITY};

/// One [`PositionHistory`] per entity runtime id.
#[derive(Debug, Clone)]
pub struct RewindTracker {
    capacity: usize,
    entities: HashMap<u64, PositionHistory>,
}

impl Default for RewindTracker {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl RewindTracker {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entities: HashMap::new(),
        }
    }

    /// Record where entity `id` is on `tick`. The previous position is the
    /// newest recorded one, or `position` itself for a new entity.
    pub fn record(&mut self, id: u64, tick: i64, position: Vec3, teleport: bool) {
        let capacity = self.capacity;
        let history = self
            .entities
            .entry(id)
            .or_insert_with(|| PositionHistory::new(capacity));
        let prev_position = history.newest().map_or(position, |e| e.position);
        history.add(HistoryEntry {
            tick,
            position,
            prev_position,
            teleport,
        });
    }

    /// Forget a despawned entity.
    pub fn remove(&mut self, id: u64) -> bool {
        let removed = self.entities.remove(&id).is_some();
        if removed {
            trace!(id, "Stopped tracking entity");
        }
        removed
    }

    pub fn history(&self, id: u64) -> Option<&PositionHistory> {
        self.entities.get(&id)
    }

    /// Where `id` was at `tick`, falling back to the nearest recorded tick.
    pub fn rewind(&self, id: u64, tick: i64) -> Option<HistoryEntry> {
        let history = self.entities.get(&id)?;
        history.get(tick).or_else(|| history.get_closest(tick))
    }

    pub fn tracked(&self) -> usize {
        self.entities.len()
    }
}
