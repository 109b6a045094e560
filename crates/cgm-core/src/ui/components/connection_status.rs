//! Connection status sub-widget
//!
//! The graph owns a small status widget in its top-left corner and refreshes
//! it whenever data arrives or the clock ticks. The graph only relies on the
//! [`ConnectionStatus`] trait, so any widget (or a test double) can sit there.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};
use log::debug;

use crate::ui::core::Element;

/// Side length of the disconnected icon in pixels
pub const CONNECTION_ICON_SIZE_PX: u32 = 9;

/// Inset of the icon's cross from its border in pixels
const CONNECTION_ICON_INSET_PX: i32 = 2;

/// Capabilities the graph needs from its status widget
pub trait ConnectionStatus: Sized {
    /// Construction input besides placement (e.g. where to read link state)
    type Context;

    /// Create the widget at `position`, relative to the parent's top-left corner
    fn create(parent: Rectangle, position: Point, context: Self::Context) -> Self;

    /// Re-read the connection state
    fn refresh(&mut self);

    /// Release the widget
    fn destroy(self) {}
}

/// State of the link between the watch and its data source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    /// Data can reach the watch
    Connected,
    /// The watch lost its link
    Disconnected,
}

/// Source of the current link state
pub trait LinkProbe {
    /// Current link state
    fn state(&self) -> LinkState;
}

impl<F: Fn() -> LinkState> LinkProbe for F {
    fn state(&self) -> LinkState {
        self()
    }
}

/// Icon that appears while the link is down
pub struct ConnectionIndicator<P: LinkProbe> {
    bounds: Rectangle,
    probe: P,
    state: LinkState,
    dirty: bool,
}

impl<P: LinkProbe> ConnectionStatus for ConnectionIndicator<P> {
    type Context = P;

    fn create(parent: Rectangle, position: Point, probe: P) -> Self {
        let bounds = Rectangle::new(
            parent.top_left + position,
            Size::new_equal(CONNECTION_ICON_SIZE_PX),
        );
        let state = probe.state();

        Self {
            bounds,
            probe,
            state,
            dirty: true,
        }
    }

    fn refresh(&mut self) {
        let state = self.probe.state();
        if state != self.state {
            debug!("Link state changed: {:?} -> {:?}", self.state, state);
            self.state = state;
            self.dirty = true;
        }
    }
}

impl<P: LinkProbe> ConnectionIndicator<P> {
    /// Last link state seen by [`ConnectionStatus::refresh`]
    pub fn state(&self) -> LinkState {
        self.state
    }

    /// Draw the icon if the link is down. Draws nothing while connected.
    pub fn draw<D: DrawTarget>(&self, display: &mut D, color: D::Color) -> Result<(), D::Error> {
        if self.state == LinkState::Connected {
            return Ok(());
        }

        let style = PrimitiveStyle::with_stroke(color, 1);
        self.bounds.into_styled(style).draw(display)?;

        let inset = Point::new_equal(CONNECTION_ICON_INSET_PX);
        let far = self.bounds.size.width as i32 - 1 - CONNECTION_ICON_INSET_PX;
        let top_left = self.bounds.top_left;

        Line::new(top_left + inset, top_left + Point::new_equal(far))
            .into_styled(style)
            .draw(display)?;
        Line::new(
            top_left + Point::new(far, CONNECTION_ICON_INSET_PX),
            top_left + Point::new(CONNECTION_ICON_INSET_PX, far),
        )
        .into_styled(style)
        .draw(display)?;

        Ok(())
    }
}

impl<P: LinkProbe> Element for ConnectionIndicator<P> {
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
