//! Game settings and tuning
//!
//! Persisted in LocalStorage on the web. Every field has a default, so a
//! partial or older JSON document still loads.

use serde::{Deserialize, Serialize};

use crate::sim::{GridConfig, MotionConfig};

/// Smallest grid that still fits the starting snake and food
pub const MIN_GRID_SIZE: i32 = 16;
pub const MAX_GRID_SIZE: i32 = 64;
/// Longest blade trail kept, in pointer samples
pub const MAX_TRAIL_LENGTH: usize = 64;
/// Longest ghost mode allowed
pub const MAX_GHOST_DURATION_MS: u64 = 60_000;

/// Tuning for both games
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub grid: GridConfig,
    pub motion: MotionConfig,
}

impl Settings {
    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "arcade_zone_settings";

    /// Parse settings from JSON and clamp out-of-range values
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let settings: Settings = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Clamp values the simulators cannot run with
    pub fn sanitized(mut self) -> Self {
        let grid = &mut self.grid;
        grid.grid_size = grid.grid_size.clamp(MIN_GRID_SIZE, MAX_GRID_SIZE);
        grid.min_speed_ms = grid.min_speed_ms.max(1);
        grid.max_speed_ms = grid.max_speed_ms.max(grid.min_speed_ms);
        grid.initial_speed_ms = grid.initial_speed_ms.clamp(grid.min_speed_ms, grid.max_speed_ms);
        grid.speed_step_ms = grid.speed_step_ms.min(grid.max_speed_ms);
        grid.points_per_level = grid.points_per_level.max(1);
        grid.ghost_duration_ms = grid.ghost_duration_ms.min(MAX_GHOST_DURATION_MS);
        // Leave most of the board open
        let cells = (grid.grid_size * grid.grid_size) as usize;
        grid.max_obstacles = grid.max_obstacles.min(cells / 4);
        grid.base_obstacles = grid.base_obstacles.min(grid.max_obstacles);

        let defaults = MotionConfig::default();
        let motion = &mut self.motion;
        motion.width = motion.width.max(1.0);
        motion.height = motion.height.max(1.0);
        motion.fragment_decay = motion.fragment_decay.clamp(0.0, 0.999);
        motion.hit_radius_factor = motion.hit_radius_factor.max(0.0);
        motion.trail_length = motion.trail_length.min(MAX_TRAIL_LENGTH);
        // Entities must fall and fragments must shrink out eventually
        if motion.gravity.is_nan() || motion.gravity <= 0.0 {
            motion.gravity = defaults.gravity;
        }
        if motion.fragment_min_scale.is_nan() || motion.fragment_min_scale <= 0.0 {
            motion.fragment_min_scale = defaults.fragment_min_scale;
        }
        self
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring malformed settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native: read the JSON file named by `ARCADE_ZONE_SETTINGS`, if any
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var("ARCADE_ZONE_SETTINGS") else {
            return Self::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path);
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings in {}: {}", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read settings {}: {}", path, e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GridState, MotionState};

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "grid": { "initial_speed_ms": 200 } }"#).unwrap();
        assert_eq!(settings.grid.initial_speed_ms, 200);
        assert_eq!(settings.grid.grid_size, 20);
        assert_eq!(settings.motion, MotionConfig::default());
    }

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(Settings::from_json("{}").unwrap(), Settings::default());
    }

    #[test]
    fn test_malformed_json_errors() {
        assert!(Settings::from_json("{ grid: ").is_err());
    }

    #[test]
    fn test_sanitize_clamps() {
        let settings = Settings::from_json(
            r#"{ "grid": { "grid_size": 4, "initial_speed_ms": 1000, "points_per_level": 0 },
                 "motion": { "fragment_decay": 1.5 } }"#,
        )
        .unwrap();
        assert_eq!(settings.grid.grid_size, MIN_GRID_SIZE);
        assert_eq!(settings.grid.initial_speed_ms, 300);
        assert_eq!(settings.grid.points_per_level, 1);
        assert!(settings.motion.fragment_decay < 1.0);
    }

    #[test]
    fn test_sanitize_bounds_capacities() {
        let settings = Settings::from_json(
            r#"{ "grid": { "ghost_duration_ms": 18446744073709551615,
                           "base_obstacles": 18446744073709551615,
                           "max_obstacles": 18446744073709551615,
                           "speed_step_ms": 4000000000 },
                 "motion": { "trail_length": 18446744073709551615,
                             "gravity": -3.0, "fragment_min_scale": 0.0 } }"#,
        )
        .unwrap();
        assert_eq!(settings.grid.ghost_duration_ms, MAX_GHOST_DURATION_MS);
        assert_eq!(settings.grid.max_obstacles, 100);
        assert_eq!(settings.grid.base_obstacles, 100);
        assert_eq!(settings.grid.speed_step_ms, 300);
        assert_eq!(settings.motion.trail_length, MAX_TRAIL_LENGTH);
        assert!(settings.motion.gravity > 0.0);
        assert!(settings.motion.fragment_min_scale > 0.0);

        // Both games start from the clamped settings
        let motion = MotionState::new(1, settings.motion.clone(), 0);
        assert_eq!(motion.trail.len(), 0);
        let grid = GridState::new(1, settings.grid.clone(), 0);
        assert_eq!(grid.config.obstacle_count(40), 100);
    }

    #[test]
    fn test_json_roundtrip() {
        let mut settings = Settings::default();
        settings.motion.spawn_interval_ms = 2_500.0;
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }
}
