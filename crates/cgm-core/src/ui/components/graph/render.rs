//! Single-frame trend graph rendering
//!
//! Rendering is a pure function of the readings, the preferences, the
//! staleness padding and the frame size. Nothing is cached between frames.
//!
//! Layers, back to front:
//! 1. Readings as filled squares, newest at the right edge
//! 2. Target range bounds as dashed lines
//! 3. Horizontal gridlines as sparse dashed lines

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

use crate::preferences::GraphPreferences;

use super::constants::{GRAPH_POINT_SIZE_PX, SGV_NO_READING, SGV_SCALE};
use super::lines::{DashPattern, draw_dashed_hline};
use super::scale::GraphScale;

/// Read-only inputs of a frame besides the readings
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a, C> {
    /// Graph and target range bounds, gridline spacing
    pub prefs: &'a GraphPreferences,
    /// Empty slots to leave at the right edge for stale data
    pub staleness_padding: u32,
    /// Foreground color for points and lines
    pub color: C,
}

/// Top-left corners of the squares to plot for `sgvs`
///
/// Index 0 is the newest reading and lands rightmost, `staleness_padding`
/// slots in from the right edge. Empty slots are skipped.
pub fn plot_points<'a>(
    sgvs: &'a [u8],
    size: Size,
    prefs: &'a GraphPreferences,
    staleness_padding: u32,
) -> impl Iterator<Item = Point> + 'a {
    let scale = GraphScale::new(size.height, prefs);
    let width = i32::try_from(size.width).unwrap_or(i32::MAX);
    let point_size = GRAPH_POINT_SIZE_PX as i32;

    sgvs.iter()
        .enumerate()
        .filter(|&(_, &sgv)| sgv != SGV_NO_READING)
        .map(move |(i, &sgv)| {
            let slots = (i as u32).saturating_add(1).saturating_add(staleness_padding);
            let offset = point_size.saturating_mul(i32::try_from(slots).unwrap_or(i32::MAX));
            let x = width.saturating_sub(offset);
            let y = scale.y_for_point(u16::from(sgv) * SGV_SCALE);

            Point::new(x, y)
        })
}

/// Values at which horizontal gridlines are drawn
///
/// Multiples of the spacing strictly between 0 and the top of the graph,
/// excluding those at or below the bottom of the graph and those that
/// coincide with a target range bound.
pub fn gridline_values(prefs: &GraphPreferences) -> impl Iterator<Item = u16> {
    let spacing = prefs.h_gridlines;
    let end = if spacing == 0 { 0 } else { prefs.top_of_graph };
    let bottom = prefs.bottom_of_graph;
    let targets = prefs.target_range();

    (spacing..end)
        .step_by(usize::from(spacing.max(1)))
        .filter(move |g| *g > bottom && !targets.contains(g))
}

/// Draw one frame of the graph onto `display`.
///
/// `display` is treated as the graph's own surface: (0, 0) is the frame's
/// top-left corner and everything outside `size` is clipped.
pub fn render<D: DrawTarget>(
    display: &mut D,
    size: Size,
    sgvs: &[u8],
    ctx: &RenderContext<'_, D::Color>,
) -> Result<(), D::Error> {
    let mut layer = display.clipped(&Rectangle::new(Point::zero(), size));
    let scale = GraphScale::new(size.height, ctx.prefs);

    let point_style = PrimitiveStyle::with_fill(ctx.color);
    let point_size = Size::new_equal(GRAPH_POINT_SIZE_PX);
    for point in plot_points(sgvs, size, ctx.prefs, ctx.staleness_padding) {
        Rectangle::new(point, point_size)
            .into_styled(point_style)
            .draw(&mut layer)?;
    }

    for bound in ctx.prefs.target_range() {
        draw_dashed_hline(
            scale.y_for_line(bound),
            size.width,
            DashPattern::TARGET_RANGE,
            ctx.color,
            &mut layer,
        )?;
    }

    for value in gridline_values(ctx.prefs) {
        draw_dashed_hline(
            scale.y_for_line(value),
            size.width,
            DashPattern::GRIDLINE,
            ctx.color,
            &mut layer,
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use embedded_graphics::mock_display::MockDisplay;
    use embedded_graphics::pixelcolor::BinaryColor;
    use std::vec::Vec;

    const FRAME: Size = Size::new(60, 40);

    fn prefs() -> GraphPreferences {
        GraphPreferences {
            bottom_of_graph: 40,
            top_of_graph: 400,
            bottom_of_range: 70,
            top_of_range: 180,
            h_gridlines: 0,
        }
    }

    fn ctx(prefs: &GraphPreferences, staleness_padding: u32) -> RenderContext<'_, BinaryColor> {
        RenderContext {
            prefs,
            staleness_padding,
            color: BinaryColor::On,
        }
    }

    fn display() -> MockDisplay<BinaryColor> {
        let mut display = MockDisplay::new();
        display.set_allow_overdraw(true);
        display
    }

    fn lit(display: &MockDisplay<BinaryColor>, x: i32, y: i32) -> bool {
        display.get_pixel(Point::new(x, y)) == Some(BinaryColor::On)
    }

    #[test]
    fn test_skips_empty_slots() {
        let prefs = prefs();
        let points: Vec<Point> = plot_points(&[0, 120, 180], FRAME, &prefs, 0).collect();

        // Index 1 -> x = 60 - 3 * 2, index 2 -> x = 60 - 3 * 3
        assert_eq!(points, [Point::new(54, 16), Point::new(51, 3)]);
    }

    #[test]
    fn test_point_count_excludes_sentinels() {
        let prefs = prefs();
        let sgvs = [90, 0, 95, 100, 0, 0, 110, 120];
        let expected = sgvs.iter().filter(|&&sgv| sgv != SGV_NO_READING).count();

        assert_eq!(plot_points(&sgvs, FRAME, &prefs, 0).count(), expected);
    }

    #[test]
    fn test_staleness_padding_shifts_left() {
        let prefs = prefs();
        let fresh: Vec<Point> = plot_points(&[100, 100], FRAME, &prefs, 0).collect();
        let stale: Vec<Point> = plot_points(&[100, 100], FRAME, &prefs, 2).collect();

        for (fresh, stale) in fresh.iter().zip(stale.iter()) {
            assert_eq!(fresh.x - stale.x, 2 * GRAPH_POINT_SIZE_PX as i32);
            assert_eq!(fresh.y, stale.y);
        }
    }

    #[test]
    fn test_huge_padding_does_not_overflow() {
        let prefs = prefs();
        let points: Vec<Point> = plot_points(&[100], FRAME, &prefs, u32::MAX).collect();

        assert_eq!(points.len(), 1);
        assert!(points[0].x < 0);
    }

    #[test]
    fn test_points_stay_inside_frame_vertically() {
        let prefs = prefs();
        let sgvs: Vec<u8> = (1..=u8::MAX).collect();
        let max_y = FRAME.height as i32 - GRAPH_POINT_SIZE_PX as i32;

        for point in plot_points(&sgvs, FRAME, &prefs, 0) {
            assert!((0..=max_y).contains(&point.y));
        }
    }

    #[test]
    fn test_gridline_values() {
        let prefs = GraphPreferences {
            h_gridlines: 50,
            ..prefs()
        };
        let values: Vec<u16> = gridline_values(&prefs).collect();

        assert_eq!(values, [50, 100, 150, 200, 250, 300, 350]);
    }

    #[test]
    fn test_gridlines_skip_bottom_and_targets() {
        let prefs = GraphPreferences {
            h_gridlines: 35,
            ..prefs()
        };
        let values: Vec<u16> = gridline_values(&prefs).collect();

        // 35 is below the graph, 70 is the lower target bound
        assert_eq!(values, [105, 140, 175, 210, 245, 280, 315, 350, 385]);
    }

    #[test]
    fn test_gridlines_skip_upper_target() {
        let prefs = GraphPreferences {
            h_gridlines: 90,
            ..prefs()
        };
        let values: Vec<u16> = gridline_values(&prefs).collect();

        assert_eq!(values, [90, 270, 360]);
    }

    #[test]
    fn test_gridlines_disabled() {
        let prefs = prefs();
        assert_eq!(gridline_values(&prefs).count(), 0);
    }

    #[test]
    fn test_render_draws_points() {
        let prefs = prefs();
        let mut display = display();

        render(&mut display, FRAME, &[0, 120, 180], &ctx(&prefs, 0)).unwrap();

        // Square at (54, 16)
        assert!(lit(&display, 54, 16));
        assert!(lit(&display, 56, 18));
        assert!(!lit(&display, 53, 16));
        assert!(!lit(&display, 57, 16));
        // Square at (51, 3)
        assert!(lit(&display, 51, 3));
        assert!(lit(&display, 53, 5));
        // Nothing for the empty newest slot
        assert!(!lit(&display, 57, 10));
    }

    #[test]
    fn test_render_draws_target_lines() {
        let prefs = prefs();
        let mut display = display();

        render(&mut display, FRAME, &[], &ctx(&prefs, 0)).unwrap();

        // 180 -> row 23, 70 -> row 35
        for y in [23, 35] {
            assert!(lit(&display, 0, y));
            assert!(lit(&display, 1, y));
            assert!(!lit(&display, 2, y));
            assert!(!lit(&display, 3, y));
            assert!(lit(&display, 4, y));
        }
    }

    #[test]
    fn test_render_draws_gridlines() {
        let prefs = GraphPreferences {
            h_gridlines: 200,
            ..prefs()
        };
        let mut display = display();

        render(&mut display, FRAME, &[], &ctx(&prefs, 0)).unwrap();

        // 200 -> row 40 - 160/360*40 - 1 = 21.2 -> 21
        assert!(!lit(&display, 0, 21));
        assert!(lit(&display, 2, 21));
        assert!(!lit(&display, 3, 21));
        assert!(lit(&display, 10, 21));
    }

    #[test]
    fn test_off_surface_lines_are_clipped() {
        let prefs = GraphPreferences {
            top_of_range: 400,
            bottom_of_range: 20,
            ..prefs()
        };
        let mut display = MockDisplay::<BinaryColor>::new();

        // MockDisplay panics on out of bounds drawing, so this only passes
        // if both lines (rows -1 and 41) are clipped away.
        render(&mut display, FRAME, &[], &ctx(&prefs, 0)).unwrap();
        assert_eq!(display.affected_area().size, Size::zero());
    }

    #[test]
    fn test_frame_clips_to_size() {
        let prefs = prefs();
        let mut display = display();

        render(&mut display, Size::new(20, 40), &[], &ctx(&prefs, 0)).unwrap();

        assert!(lit(&display, 16, 23));
        assert!(!lit(&display, 20, 23));
        assert!(display.affected_area().size.width <= 20);
    }

    #[test]
    fn test_render_is_idempotent() {
        let prefs = GraphPreferences {
            h_gridlines: 50,
            ..prefs()
        };
        let sgvs = [0, 120, 180, 60, 0, 75];
        let mut first = display();
        let mut second = display();

        render(&mut first, FRAME, &sgvs, &ctx(&prefs, 1)).unwrap();
        render(&mut second, FRAME, &sgvs, &ctx(&prefs, 1)).unwrap();
        render(&mut second, FRAME, &sgvs, &ctx(&prefs, 1)).unwrap();

        assert_eq!(first, second);
    }
}
