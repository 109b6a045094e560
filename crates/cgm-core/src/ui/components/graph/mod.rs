//! Glucose trend graph for small embedded displays
//!
//! Plots the most recent readings right to left, one square per reading,
//! over dashed target range lines and optional horizontal gridlines.
//!
//! # Memory Characteristics
//!
//! The buffer capacity is a const generic (`N`, default
//! [`constants::GRAPH_MAX_SGV_COUNT`]) and readings take one byte each, so the
//! element lives entirely inline. Rendering allocates nothing: points and
//! gridlines are produced by iterators.
//!
//! # Examples
//!
//! ```ignore
//! use cgm_core::preferences::GraphPreferences;
//! use cgm_core::ui::components::connection_status::{ConnectionIndicator, LinkState};
//! use cgm_core::ui::components::graph::*;
//!
//! let mut graph = GraphElement::<ConnectionIndicator<_>>::create(bounds, || LinkState::Connected);
//! graph.update(&[60, 62, 0, 65], 4);
//!
//! let prefs = GraphPreferences::default();
//! let ctx = RenderContext { prefs: &prefs, staleness_padding: 0, color: BinaryColor::On };
//! graph.draw(&mut display, &ctx)?;
//! ```

mod buffer;
pub mod constants;
mod element;
mod lines;
mod render;
mod scale;

// Re-export main types
pub use buffer::SgvBuffer;
pub use element::GraphElement;
pub use lines::DashPattern;
pub use render::{RenderContext, gridline_values, plot_points, render};
pub use scale::GraphScale;
