//! Glucose value to screen row transformation
//!
//! Maps a value in mg/dL to a Y coordinate inside the graph's frame using the
//! graph bounds from [`GraphPreferences`]. Screen Y grows downwards, so the
//! bottom of the graph is the last row.

use crate::preferences::GraphPreferences;

use super::constants::GRAPH_POINT_SIZE_PX;

/// Vertical scale of one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphScale {
    height: i32,
    graph_min: i32,
    graph_max: i32,
}

impl GraphScale {
    /// Create a scale for a frame `height` pixels tall.
    ///
    /// `prefs` must have `top_of_graph != bottom_of_graph`, see
    /// [`GraphPreferences::validate`].
    pub fn new(height: u32, prefs: &GraphPreferences) -> Self {
        Self {
            height: i32::try_from(height).unwrap_or(i32::MAX),
            graph_min: i32::from(prefs.bottom_of_graph),
            graph_max: i32::from(prefs.top_of_graph),
        }
    }

    /// Unclamped linear mapping, truncated toward zero
    pub fn bg_to_y(&self, bg: u16) -> i32 {
        let height = self.height as f32;
        let offset = (i32::from(bg) - self.graph_min) as f32;
        let range = (self.graph_max - self.graph_min) as f32;

        (height - offset / range * height - 1.0) as i32
    }

    /// Row of a plotted point's top edge, kept inside the frame
    pub fn y_for_point(&self, bg: u16) -> i32 {
        let y = self.bg_to_y(bg);
        let min = 0;
        let max = self.height - GRAPH_POINT_SIZE_PX as i32;

        if y < min {
            min
        } else if y > max {
            max
        } else {
            y
        }
    }

    /// Row of a reference line.
    ///
    /// Not clamped: a bound at or beyond the graph edges lands on or outside
    /// the frame edge, and the frame clips it.
    pub fn y_for_line(&self, bg: u16) -> i32 {
        self.bg_to_y(bg)
    }

    /// Frame height in pixels
    pub fn height(&self) -> i32 {
        self.height
    }
}
