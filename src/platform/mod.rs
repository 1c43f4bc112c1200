//! Platform abstraction layer
//!
//! Browser/native event handling is reduced to intent flags here; the
//! simulation only ever sees a [`crate::sim::TickInput`].

pub mod input;

pub use input::{InputLatch, Key, TouchZone};
