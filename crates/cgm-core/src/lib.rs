//! Hardware-independent core library for the CGM watch face
//!
//! This crate holds the glucose trend graph element: the fixed-capacity
//! reading buffer, the reading-to-screen mapping, and the reference line
//! rendering. Everything draws through `embedded-graphics`, so the same code
//! runs on the watch and in the desktop simulator.
//!
//! It is `#![no_std]` and allocation-free.

#![no_std]

pub mod message;
pub mod preferences;
pub mod staleness;
pub mod ui;
