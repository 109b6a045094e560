//! Core UI traits shared by watch-face elements

use embedded_graphics::primitives::Rectangle;

/// A rectangular piece of the watch face with its own redraw state.
///
/// Drawing itself is not part of this trait because elements need different
/// render inputs. The host draws an element while it is dirty and then calls
/// [`Element::mark_clean`].
pub trait Element {
    /// Frame of this element in surface coordinates
    fn bounds(&self) -> Rectangle;

    /// Check if this element needs to be redrawn
    fn is_dirty(&self) -> bool;

    /// Mark this element as clean (already drawn)
    fn mark_clean(&mut self);

    /// Mark this element as dirty (needs redraw)
    fn mark_dirty(&mut self);
}
