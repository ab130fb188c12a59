//! Grid simulator (snake)
//!
//! Discrete ticks on a fixed square grid. States: `Running`, `Paused`, `Over`.

pub mod state;
pub mod tick;

pub use state::{
    Cell, DeathCause, Direction, Food, FoodKind, GridConfig, GridEvent, GridPhase, GridState,
    INITIAL_DIRECTION, INITIAL_FOOD, INITIAL_SNAKE,
};
pub use tick::{reset, set_direction, tick, toggle_pause};
