//! Fixed-capacity buffer of recent readings

use heapless::Vec;
use log::debug;

use super::constants::GRAPH_MAX_SGV_COUNT;

/// The most recent readings, newest first
///
/// Holds at most `N` scaled readings. Each update replaces the whole
/// contents; input beyond the capacity is dropped.
#[derive(Debug, Clone, Default)]
pub struct SgvBuffer<const N: usize = GRAPH_MAX_SGV_COUNT> {
    sgvs: Vec<u8, N>,
}

impl<const N: usize> SgvBuffer<N> {
    /// Create an empty buffer
    pub const fn new() -> Self {
        Self { sgvs: Vec::new() }
    }

    /// Replace the contents with the first `count` readings of `sgvs`.
    ///
    /// `count` is clamped to `[0, N]` and to the length of `sgvs`.
    /// Returns the number of readings stored.
    pub fn replace(&mut self, sgvs: &[u8], count: i32) -> usize {
        let requested = usize::try_from(count).unwrap_or(0);
        let stored = requested.min(N).min(sgvs.len());
        if stored < requested {
            debug!(
                "Truncating graph update from {} to {} readings",
                requested, stored
            );
        }

        self.sgvs.clear();
        // `stored <= N`, so this always fits.
        let _ = self.sgvs.extend_from_slice(&sgvs[..stored]);
        stored
    }

    /// Stored readings, newest first
    pub fn as_slice(&self) -> &[u8] {
        &self.sgvs
    }

    /// Number of stored readings
    pub fn len(&self) -> usize {
        self.sgvs.len()
    }

    /// Whether the buffer holds no readings
    pub fn is_empty(&self) -> bool {
        self.sgvs.is_empty()
    }

    /// Maximum number of readings the buffer can hold
    pub const fn capacity(&self) -> usize {
        N
    }
}
