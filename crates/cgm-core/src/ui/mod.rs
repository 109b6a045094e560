//! UI building blocks for the watch face

pub mod components;
pub mod core;

pub use self::core::Element;
