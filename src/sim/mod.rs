//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only, carried inside each snapshot
//! - Every operation maps a snapshot (plus input) to a new snapshot
//! - Host time enters only as an explicit `now_ms` argument
//! - No rendering or platform dependencies

pub mod collision;
pub mod grid;
pub mod motion;
pub mod placement;

pub use collision::{cell_in_bounds, point_hits_circle, sd_circle, wrap_cell};
pub use grid::{Cell, Direction, FoodKind, GridConfig, GridEvent, GridPhase, GridState};
pub use motion::{Entity, EntityKind, MotionConfig, MotionEvent, MotionPhase, MotionState};
pub use placement::{random_free_cell, random_free_cells};
