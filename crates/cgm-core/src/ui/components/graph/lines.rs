//! Dashed horizontal reference lines
//!
//! Target range bounds and gridlines are both drawn as dashed lines spanning
//! the full width of the frame, with different dash patterns.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use super::constants::{
    GRIDLINE_DASH_PX, GRIDLINE_GAP_PX, GRIDLINE_PHASE_PX, TARGET_LINE_DASH_PX, TARGET_LINE_GAP_PX,
};

/// Dash pattern for a horizontal line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashPattern {
    /// Length of each dash in pixels
    pub dash_length: u32,
    /// Length of gap between dashes in pixels
    pub gap_length: u32,
    /// X offset of the first dash in pixels
    pub phase: u32,
}

impl DashPattern {
    /// Pattern used for the target range bounds
    pub const TARGET_RANGE: Self = Self {
        dash_length: TARGET_LINE_DASH_PX,
        gap_length: TARGET_LINE_GAP_PX,
        phase: 0,
    };

    /// Sparser pattern used for horizontal gridlines
    pub const GRIDLINE: Self = Self {
        dash_length: GRIDLINE_DASH_PX,
        gap_length: GRIDLINE_GAP_PX,
        phase: GRIDLINE_PHASE_PX,
    };

    fn period(&self) -> u32 {
        (self.dash_length + self.gap_length).max(1)
    }
}

/// Draw a dashed line across row `y`, from x = `pattern.phase` up to `width`.
///
/// The last dash may extend past `width`; callers draw into a clipped target.
pub(super) fn draw_dashed_hline<D: DrawTarget>(
    y: i32,
    width: u32,
    pattern: DashPattern,
    color: D::Color,
    display: &mut D,
) -> Result<(), D::Error> {
    if pattern.dash_length == 0 {
        return Ok(());
    }

    let dash = Size::new(pattern.dash_length, 1);

    for x in (pattern.phase..width).step_by(pattern.period() as usize) {
        display.fill_solid(&Rectangle::new(Point::new(x as i32, y), dash), color)?;
    }

    Ok(())
}
