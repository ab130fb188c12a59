//! Arcade Zone - two small browser arcade games
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid snake, falling-fruit slicer)
//! - `highscores`: Per-game best score tracking
//! - `persistence`: Key-value score storage (LocalStorage on web)
//! - `settings`: Data-driven tuning for both games
//! - `nav`: Screen routing and the home screen catalog
//! - `app`: Shell tying routing, sessions and storage together
//! - `platform`: Frame/tick clocks and browser handles
//! - `renderer`: Canvas 2D painter (web only)

pub mod app;
pub mod highscores;
pub mod nav;
pub mod persistence;
pub mod platform;
#[cfg(target_arch = "wasm32")]
pub mod renderer;
pub mod settings;
pub mod sim;

pub use app::{Arcade, Session};
pub use highscores::HighScore;
pub use nav::{Router, Screen};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Grid dimensions (cells per side)
    pub const GRID_SIZE: i32 = 20;
    /// Pixel size of one grid cell
    pub const CELL_SIZE: f32 = 20.0;

    /// Initial tick interval in milliseconds
    pub const INITIAL_SPEED_MS: u32 = 150;
    /// Fastest allowed tick interval
    pub const MIN_SPEED_MS: u32 = 50;
    /// Slowest allowed tick interval
    pub const MAX_SPEED_MS: u32 = 300;
    /// How long ghost mode lasts once eaten
    pub const GHOST_DURATION_MS: u64 = 5000;
    /// Score step that triggers a level up
    pub const POINTS_PER_LEVEL: u32 = 5;
    /// Obstacle cap regardless of level
    pub const MAX_OBSTACLES: usize = 8;

    /// Slicer canvas dimensions
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Fixed motion step (60 Hz, one canvas frame)
    pub const MOTION_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Gravity added to vertical velocity per step (px/step²)
    pub const GRAVITY: f32 = 0.1;
    /// Minimum time between spawns
    pub const SPAWN_INTERVAL_MS: f64 = 10_000.0;
    /// Cap on simultaneously active fruits
    pub const MAX_ACTIVE_ENTITIES: usize = 4;
    /// Entities below `CANVAS_HEIGHT + DESPAWN_MARGIN` are removed
    pub const DESPAWN_MARGIN: f32 = 50.0;
    /// Pointer samples kept for the blade trail
    pub const TRAIL_LENGTH: usize = 10;
}

/// Wrap a coordinate into `[0, size)` (toroidal grid)
#[inline]
pub fn wrap_coord(value: i32, size: i32) -> i32 {
    value.rem_euclid(size)
}

/// Clamp a pointer position to the visible canvas
#[inline]
pub fn clamp_to_canvas(point: glam::Vec2, width: f32, height: f32) -> glam::Vec2 {
    point.clamp(glam::Vec2::ZERO, glam::Vec2::new(width, height))
}
