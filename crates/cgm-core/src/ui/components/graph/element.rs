//! Trend graph element with its connection status widget
//!
//! The element owns the reading buffer and the status widget, and ties them
//! to the host's update/tick/draw cycle:
//!
//! - [`GraphElement::update`] replaces the readings and schedules a redraw
//! - [`GraphElement::tick`] only refreshes the status widget
//! - [`GraphElement::draw`] renders the current readings

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::debug;

use crate::message::GraphUpdate;
use crate::ui::components::connection_status::ConnectionStatus;
use crate::ui::core::Element;

use super::buffer::SgvBuffer;
use super::constants::{CONNECTION_STATUS_OFFSET_PX, GRAPH_MAX_SGV_COUNT};
use super::render::{RenderContext, render};

/// Glucose trend graph filling its parent's frame
///
/// Generic over the status widget `S` and the buffer capacity `N`.
pub struct GraphElement<S: ConnectionStatus, const N: usize = GRAPH_MAX_SGV_COUNT> {
    /// Frame of the graph in surface coordinates
    bounds: Rectangle,
    /// Most recent readings, newest first
    sgvs: SgvBuffer<N>,
    /// Status widget in the top-left corner
    conn_status: S,
    /// Dirty flag for rendering optimization
    dirty: bool,
}

impl<S: ConnectionStatus, const N: usize> GraphElement<S, N> {
    /// Create an empty graph covering `parent`.
    ///
    /// `status_context` is handed to the status widget's constructor.
    pub fn create(parent: Rectangle, status_context: S::Context) -> Self {
        let sgvs = SgvBuffer::new();
        let conn_status = S::create(
            parent,
            Point::new_equal(CONNECTION_STATUS_OFFSET_PX),
            status_context,
        );
        debug!(
            "Graph created: {}x{} at ({}, {}), capacity {}",
            parent.size.width, parent.size.height, parent.top_left.x, parent.top_left.y, N
        );

        Self {
            bounds: parent,
            sgvs,
            conn_status,
            dirty: true,
        }
    }

    /// Release the status widget, then the buffer
    pub fn destroy(self) {
        let Self {
            sgvs, conn_status, ..
        } = self;

        conn_status.destroy();
        drop(sgvs);
        debug!("Graph destroyed");
    }

    /// Replace the readings with the first `count` entries of `sgvs`.
    ///
    /// `count` is clamped to the buffer capacity; anything beyond it is
    /// dropped without error.
    pub fn update(&mut self, sgvs: &[u8], count: i32) {
        let stored = self.sgvs.replace(sgvs, count);
        debug!("Graph updated with {} readings", stored);

        self.dirty = true;
        self.conn_status.refresh();
    }

    /// [`GraphElement::update`] from a decoded update message
    pub fn apply(&mut self, update: &GraphUpdate<'_>) {
        self.update(update.sgvs, update.count);
    }

    /// Periodic refresh of the status widget; readings are left alone
    pub fn tick(&mut self) {
        self.conn_status.refresh();
    }

    /// Draw the current readings into the element's frame
    pub fn draw<D: DrawTarget>(
        &self,
        display: &mut D,
        ctx: &RenderContext<'_, D::Color>,
    ) -> Result<(), D::Error> {
        let mut layer = display.translated(self.bounds.top_left);
        render(&mut layer, self.bounds.size, self.sgvs.as_slice(), ctx)
    }

    /// Stored readings, newest first
    pub fn sgvs(&self) -> &[u8] {
        self.sgvs.as_slice()
    }

    /// The status widget
    pub fn conn_status(&self) -> &S {
        &self.conn_status
    }

    /// The status widget, mutably (e.g. to mark it clean after drawing)
    pub fn conn_status_mut(&mut self) -> &mut S {
        &mut self.conn_status
    }
}

impl<S: ConnectionStatus, const N: usize> Element for GraphElement<S, N> {
    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{APP_KEY_SGV_COUNT, APP_KEY_SGVS, DictValue};
    use crate::preferences::GraphPreferences;
    use core::cell::Cell;
    use embedded_graphics::mock_display::MockDisplay;
    use embedded_graphics::pixelcolor::BinaryColor;

    /// Status widget double that counts refreshes
    struct CountingStatus<'a> {
        position: Point,
        refreshes: u32,
        destroyed: &'a Cell<bool>,
    }

    impl<'a> ConnectionStatus for CountingStatus<'a> {
        type Context = &'a Cell<bool>;

        fn create(parent: Rectangle, position: Point, destroyed: &'a Cell<bool>) -> Self {
            Self {
                position: parent.top_left + position,
                refreshes: 0,
                destroyed,
            }
        }

        fn refresh(&mut self) {
            self.refreshes += 1;
        }

        fn destroy(self) {
            self.destroyed.set(true);
        }
    }

    type TestGraph<'a> = GraphElement<CountingStatus<'a>, 4>;

    fn parent() -> Rectangle {
        Rectangle::new(Point::new(2, 10), Size::new(60, 40))
    }

    fn prefs() -> GraphPreferences {
        GraphPreferences {
            bottom_of_graph: 40,
            top_of_graph: 400,
            bottom_of_range: 70,
            top_of_range: 180,
            h_gridlines: 0,
        }
    }

    #[test]
    fn test_create() {
        let destroyed = Cell::new(false);
        let graph = TestGraph::create(parent(), &destroyed);

        assert_eq!(graph.bounds(), parent());
        assert!(graph.is_dirty());
        assert!(graph.sgvs().is_empty());
        assert_eq!(graph.conn_status().position, Point::new(3, 11));
    }

    #[test]
    fn test_destroy_releases_status_widget() {
        let destroyed = Cell::new(false);
        let graph = TestGraph::create(parent(), &destroyed);

        graph.destroy();
        assert!(destroyed.get());
    }

    #[test]
    fn test_update_marks_dirty_and_refreshes() {
        let destroyed = Cell::new(false);
        let mut graph = TestGraph::create(parent(), &destroyed);
        graph.mark_clean();

        graph.update(&[60, 70, 80], 3);

        assert!(graph.is_dirty());
        assert_eq!(graph.sgvs(), &[60, 70, 80]);
        assert_eq!(graph.conn_status().refreshes, 1);
    }

    #[test]
    fn test_update_truncates_to_capacity() {
        let destroyed = Cell::new(false);
        let mut graph = TestGraph::create(parent(), &destroyed);

        graph.update(&[1, 2, 3, 4, 5, 6, 7], 7);

        assert_eq!(graph.sgvs(), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_tick_only_refreshes_status() {
        let destroyed = Cell::new(false);
        let mut graph = TestGraph::create(parent(), &destroyed);
        graph.update(&[60, 70], 2);
        graph.mark_clean();

        graph.tick();

        assert!(!graph.is_dirty());
        assert_eq!(graph.sgvs(), &[60, 70]);
        assert_eq!(graph.conn_status().refreshes, 2);
    }

    #[test]
    fn test_apply_message() {
        let destroyed = Cell::new(false);
        let mut graph = TestGraph::create(parent(), &destroyed);
        let sgvs = [90, 0, 100];
        let dict = [
            (APP_KEY_SGV_COUNT, DictValue::Int32(3)),
            (APP_KEY_SGVS, DictValue::Bytes(&sgvs)),
        ];

        let update = GraphUpdate::from_dict(&dict[..]).unwrap();
        graph.apply(&update);

        assert_eq!(graph.sgvs(), &sgvs);
    }

    #[test]
    fn test_draw_is_translated_and_clipped() {
        let destroyed = Cell::new(false);
        let prefs = GraphPreferences {
            top_of_range: 400,
            ..prefs()
        };
        let mut graph = TestGraph::create(parent(), &destroyed);
        graph.update(&[0, 120], 2);

        let mut display = MockDisplay::<BinaryColor>::new();
        display.set_allow_overdraw(true);
        let ctx = RenderContext {
            prefs: &prefs,
            staleness_padding: 0,
            color: BinaryColor::On,
        };
        graph.draw(&mut display, &ctx).unwrap();

        // Point at local (54, 16) lands at (56, 26)
        assert_eq!(display.get_pixel(Point::new(56, 26)), Some(BinaryColor::On));
        // Upper target line at local row -1 would be row 9: outside the frame
        assert_eq!(display.get_pixel(Point::new(2, 9)), None);
        // Lower target line at local row 35 lands on row 45
        assert_eq!(display.get_pixel(Point::new(2, 45)), Some(BinaryColor::On));
        assert_eq!(display.affected_area().top_left.y, 10 + 16);
    }
}
