//! Lag-compensation helpers for combat checks: per-entity position history
//! and the descriptive statistics detections run over samples.

pub mod history;
pub mod rewind;
pub mod stats;

pub use history::{HistoryEntry, PositionHistory, DEFAULT_CAPACITY};
pub use rewind::RewindTracker;
