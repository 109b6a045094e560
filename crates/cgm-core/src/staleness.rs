//! Data staleness tracking
//!
//! Readings arrive roughly every [`SGV_INTERVAL_SECS`]. When updates stop
//! coming in, the graph leaves empty slots at its right edge so the gap is
//! visible: one slot per reading interval that has passed since the newest
//! reading was taken.

use log::trace;

use crate::ui::components::graph::constants::GRAPH_MAX_SGV_COUNT;

/// Expected interval between two sensor readings, in seconds
pub const SGV_INTERVAL_SECS: u64 = 5 * 60;

/// Tracks how old the newest reading is
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Staleness {
    /// Host clock (seconds) when the last update was received
    received_at: Option<u64>,
    /// Age of the newest reading at the time it was received, in seconds
    recency_secs: u64,
}

impl Staleness {
    /// Create a tracker that has not seen any update yet
    pub const fn new() -> Self {
        Self {
            received_at: None,
            recency_secs: 0,
        }
    }

    /// Record an update received at `now` whose newest reading was already
    /// `recency_secs` old.
    pub fn on_update(&mut self, now: u64, recency_secs: u32) {
        self.received_at = Some(now);
        self.recency_secs = u64::from(recency_secs);
    }

    /// Seconds since the last update was received, `None` before any update
    pub fn phone_staleness(&self, now: u64) -> Option<u64> {
        self.received_at.map(|at| now.saturating_sub(at))
    }

    /// Age of the newest reading at `now`, `None` before any update
    pub fn total_staleness(&self, now: u64) -> Option<u64> {
        self.phone_staleness(now)
            .map(|elapsed| elapsed.saturating_add(self.recency_secs))
    }

    /// Number of empty slots to reserve at the right edge of the graph
    pub fn graph_padding(&self, now: u64) -> u32 {
        let Some(staleness) = self.total_staleness(now) else {
            return 0;
        };

        let intervals = (staleness / SGV_INTERVAL_SECS).min(GRAPH_MAX_SGV_COUNT as u64);
        trace!("Staleness {}s -> {} padding slots", staleness, intervals);
        intervals as u32
    }
}
