//! Continuous-motion simulator (fruit slicer)
//!
//! A timed spawner launches entities from below the canvas; they rise and
//! fall under constant gravity. Pointer samples slice whatever they touch.

pub mod state;
pub mod tick;

pub use state::{
    Entity, EntityKind, MotionConfig, MotionEvent, MotionPhase, MotionState, Trail,
};
pub use tick::{
    fragment_expired, integrate, integrate_fragment, is_offscreen, register_pointer_sample,
    reset, spawn, step,
};
