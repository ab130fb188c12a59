//! Grid game state and core types
//!
//! A `GridState` is an immutable snapshot: every operation in `tick` takes
//! the previous snapshot and returns the next one.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Integer grid coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Neighbouring cell one step in `direction` (may leave the grid)
    pub fn offset(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Heading of the snake. Screen coordinates: y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit vector for one step
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Map a keyboard key name (`KeyboardEvent.key`) to a heading
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" | "w" | "W" => Some(Direction::Up),
            "ArrowDown" | "s" | "S" => Some(Direction::Down),
            "ArrowLeft" | "a" | "A" => Some(Direction::Left),
            "ArrowRight" | "d" | "D" => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Food types with their points and side effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FoodKind {
    #[default]
    Normal,
    SpeedUp,
    SlowDown,
    Ghost,
}

impl FoodKind {
    pub fn points(self) -> u32 {
        match self {
            FoodKind::Normal => 1,
            FoodKind::SpeedUp => 2,
            FoodKind::SlowDown => 3,
            FoodKind::Ghost => 5,
        }
    }

    /// Change applied to the tick interval when eaten (negative = faster)
    pub fn speed_delta_ms(self, step_ms: u32) -> i32 {
        match self {
            FoodKind::SpeedUp => -(step_ms.min(i32::MAX as u32) as i32),
            FoodKind::SlowDown => step_ms.min(i32::MAX as u32) as i32,
            FoodKind::Normal | FoodKind::Ghost => 0,
        }
    }

    /// CSS color used by the renderer
    pub fn color(self) -> &'static str {
        match self {
            FoodKind::Normal => "#ff3333",
            FoodKind::SpeedUp => "#ffff00",
            FoodKind::SlowDown => "#00ff00",
            FoodKind::Ghost => "#aa88ff",
        }
    }

    /// Weighted roll: 60% normal, 15% speed up, 15% slow down, 10% ghost
    pub fn roll<R: Rng>(rng: &mut R) -> Self {
        let roll: f32 = rng.random();
        if roll < 0.6 {
            FoodKind::Normal
        } else if roll < 0.75 {
            FoodKind::SpeedUp
        } else if roll < 0.9 {
            FoodKind::SlowDown
        } else {
            FoodKind::Ghost
        }
    }
}

/// A food item on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Food {
    pub position: Cell,
    pub kind: FoodKind,
}

/// Current phase of the grid game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridPhase {
    Running,
    Paused,
    /// Terminal until reset
    Over,
}

/// What ended the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    Wall,
    SelfBite,
    Obstacle,
}

/// Things that happened during the last operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridEvent {
    FoodEaten { kind: FoodKind, points: u32 },
    SpeedChanged(u32),
    GhostStarted { until_ms: u64 },
    GhostExpired,
    LevelUp(u32),
    NewHighScore(u32),
    /// No free cell was left for food
    BoardFull,
    GameOver(DeathCause),
}

/// Tuning for the grid game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub grid_size: i32,
    pub initial_speed_ms: u32,
    pub min_speed_ms: u32,
    pub max_speed_ms: u32,
    /// Interval change applied by speed-up / slow-down food
    pub speed_step_ms: u32,
    pub ghost_duration_ms: u64,
    pub points_per_level: u32,
    pub base_obstacles: usize,
    pub max_obstacles: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            initial_speed_ms: INITIAL_SPEED_MS,
            min_speed_ms: MIN_SPEED_MS,
            max_speed_ms: MAX_SPEED_MS,
            speed_step_ms: 20,
            ghost_duration_ms: GHOST_DURATION_MS,
            points_per_level: POINTS_PER_LEVEL,
            base_obstacles: 3,
            max_obstacles: MAX_OBSTACLES,
        }
    }
}

impl GridConfig {
    /// Obstacles generated when reaching `level`
    pub fn obstacle_count(&self, level: u32) -> usize {
        self.base_obstacles
            .saturating_add((level / 2) as usize)
            .min(self.max_obstacles)
    }

    pub fn clamp_speed(&self, speed_ms: i64) -> u32 {
        speed_ms.clamp(self.min_speed_ms as i64, self.max_speed_ms as i64) as u32
    }
}

pub const INITIAL_SNAKE: [Cell; 1] = [Cell::new(8, 8)];
pub const INITIAL_FOOD: Cell = Cell::new(15, 10);
pub const INITIAL_DIRECTION: Direction = Direction::Right;

/// Complete grid game snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridState {
    pub config: GridConfig,
    /// Snake cells, head first
    pub snake: VecDeque<Cell>,
    /// `None` only once the board has no free cell left
    pub food: Option<Food>,
    pub obstacles: Vec<Cell>,
    /// Heading applied on the last tick
    pub direction: Direction,
    /// Heading requested for the next tick
    pub pending_direction: Direction,
    /// Tick interval in milliseconds
    pub speed_ms: u32,
    pub level: u32,
    pub score: u32,
    pub high_score: u32,
    /// Ghost mode expiry timestamp (host clock, ms); `Some` while active
    pub ghost_until_ms: Option<u64>,
    pub phase: GridPhase,
    /// Ticks advanced since the last reset
    pub ticks: u64,
    rng: Pcg32,
    /// Events produced by the operation that created this snapshot
    #[serde(skip)]
    pub events: Vec<GridEvent>,
}

impl GridState {
    /// Create a fresh game
    pub fn new(seed: u64, config: GridConfig, high_score: u32) -> Self {
        Self::initial(Pcg32::seed_from_u64(seed), config, high_score)
    }

    pub(super) fn initial(rng: Pcg32, config: GridConfig, high_score: u32) -> Self {
        let speed_ms = config.initial_speed_ms;
        Self {
            config,
            snake: INITIAL_SNAKE.iter().copied().collect(),
            food: Some(Food {
                position: INITIAL_FOOD,
                kind: FoodKind::Normal,
            }),
            obstacles: Vec::new(),
            direction: INITIAL_DIRECTION,
            pending_direction: INITIAL_DIRECTION,
            speed_ms,
            level: 1,
            score: 0,
            high_score,
            ghost_until_ms: None,
            phase: GridPhase::Running,
            ticks: 0,
            rng,
            events: Vec::new(),
        }
    }

    pub fn head(&self) -> Cell {
        self.snake[0]
    }

    pub fn len(&self) -> usize {
        self.snake.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snake.is_empty()
    }

    pub fn ghost_active(&self) -> bool {
        self.ghost_until_ms.is_some()
    }

    pub fn is_over(&self) -> bool {
        self.phase == GridPhase::Over
    }

    /// Whether any snake segment, obstacle or the food occupies `cell`
    pub fn occupied(&self, cell: Cell) -> bool {
        self.snake.contains(&cell)
            || self.obstacles.contains(&cell)
            || self.food.is_some_and(|f| f.position == cell)
    }

    pub(super) fn rng_mut(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    pub(super) fn take_rng(&self) -> Pcg32 {
        self.rng.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_opposites() {
        for dir in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
            assert_eq!(dir.opposite().opposite(), dir);
            let (dx, dy) = dir.delta();
            let (ox, oy) = dir.opposite().delta();
            assert_eq!((dx + ox, dy + oy), (0, 0));
        }
    }

    #[test]
    fn test_obstacle_count_caps() {
        let config = GridConfig::default();
        assert_eq!(config.obstacle_count(1), 3);
        assert_eq!(config.obstacle_count(2), 4);
        assert_eq!(config.obstacle_count(9), 7);
        assert_eq!(config.obstacle_count(10), 8);
        assert_eq!(config.obstacle_count(40), 8);
    }

    #[test]
    fn test_initial_state() {
        let state = GridState::new(1, GridConfig::default(), 12);
        assert_eq!(state.snake.len(), 1);
        assert_eq!(state.head(), Cell::new(8, 8));
        assert_eq!(state.food.map(|f| f.position), Some(INITIAL_FOOD));
        assert_eq!(state.speed_ms, INITIAL_SPEED_MS);
        assert_eq!(state.level, 1);
        assert_eq!(state.high_score, 12);
        assert_eq!(state.phase, GridPhase::Running);
        assert!(state.obstacles.is_empty());
        assert!(!state.ghost_active());
    }

    #[test]
    fn test_food_roll_weights() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut counts = [0u32; 4];
        for _ in 0..10_000 {
            let idx = match FoodKind::roll(&mut rng) {
                FoodKind::Normal => 0,
                FoodKind::SpeedUp => 1,
                FoodKind::SlowDown => 2,
                FoodKind::Ghost => 3,
            };
            counts[idx] += 1;
        }
        assert!((5500..6500).contains(&counts[0]));
        assert!((1200..1800).contains(&counts[1]));
        assert!((1200..1800).contains(&counts[2]));
        assert!((700..1300).contains(&counts[3]));
    }

    #[test]
    fn test_clamp_speed() {
        let config = GridConfig::default();
        assert_eq!(config.clamp_speed(30), 50);
        assert_eq!(config.clamp_speed(400), 300);
        assert_eq!(config.clamp_speed(130), 130);
    }
}
