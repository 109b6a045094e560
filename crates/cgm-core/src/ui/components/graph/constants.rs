//! Constants for graph rendering
//!
//! All magic numbers are defined here with descriptive names and units.

/// Maximum number of readings the graph buffer holds
///
/// One reading every five minutes, so this covers twelve hours.
pub const GRAPH_MAX_SGV_COUNT: usize = 144;

/// Side length of a plotted reading in pixels
pub const GRAPH_POINT_SIZE_PX: u32 = 3;

/// Readings are sent halved so that they fit in one byte
pub const SGV_SCALE: u16 = 2;

/// Stored value meaning "no reading in this slot"
pub const SGV_NO_READING: u8 = 0;

/// Offset of the connection status icon from the parent's top-left corner
pub const CONNECTION_STATUS_OFFSET_PX: i32 = 1;

/// Target range line dash length in pixels
pub const TARGET_LINE_DASH_PX: u32 = 2;

/// Target range line gap length in pixels
pub const TARGET_LINE_GAP_PX: u32 = 2;

/// Gridline dash length in pixels
pub const GRIDLINE_DASH_PX: u32 = 1;

/// Gridline gap length in pixels
pub const GRIDLINE_GAP_PX: u32 = 7;

/// Horizontal offset of the first gridline dash in pixels
///
/// Keeps gridline dots from lining up with the target line dashes.
pub const GRIDLINE_PHASE_PX: u32 = 2;
