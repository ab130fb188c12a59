//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame and tick timing
//! - Browser callback handles (animation frames, event listeners)

pub mod clock;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use clock::{FrameClock, TickTimer};
