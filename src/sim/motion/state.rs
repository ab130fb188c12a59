//! Slicer game state and core types
//!
//! Positions are canvas pixels (y grows downward); velocities are pixels per
//! step, where one step is one 60 Hz frame.

use std::collections::VecDeque;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Entity catalog: six fruits and one hazard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Apple,
    Orange,
    Banana,
    Watermelon,
    Kiwi,
    Coconut,
    Bomb,
}

impl EntityKind {
    /// Every kind, in catalog order (spawns pick uniformly from this)
    pub const ALL: [EntityKind; 7] = [
        EntityKind::Apple,
        EntityKind::Orange,
        EntityKind::Banana,
        EntityKind::Watermelon,
        EntityKind::Kiwi,
        EntityKind::Coconut,
        EntityKind::Bomb,
    ];

    pub fn points(self) -> i64 {
        match self {
            EntityKind::Apple => 1,
            EntityKind::Orange => 2,
            EntityKind::Banana => 3,
            EntityKind::Watermelon => 5,
            EntityKind::Kiwi => 4,
            EntityKind::Coconut => 6,
            EntityKind::Bomb => -10,
        }
    }

    /// Base radius in pixels
    pub fn size(self) -> f32 {
        match self {
            EntityKind::Kiwi => 20.0,
            EntityKind::Apple | EntityKind::Orange | EntityKind::Bomb => 25.0,
            EntityKind::Banana | EntityKind::Coconut => 30.0,
            EntityKind::Watermelon => 35.0,
        }
    }

    pub fn is_hazard(self) -> bool {
        self == EntityKind::Bomb
    }

    pub fn emoji(self) -> &'static str {
        match self {
            EntityKind::Apple => "🍎",
            EntityKind::Orange => "🍊",
            EntityKind::Banana => "🍌",
            EntityKind::Watermelon => "🍉",
            EntityKind::Kiwi => "🥝",
            EntityKind::Coconut => "🥥",
            EntityKind::Bomb => "💣",
        }
    }
}

/// A falling fruit, hazard, or slice fragment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub kind: EntityKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub rotation: f32,
    pub scale: f32,
}

impl Entity {
    pub fn new(id: u32, kind: EntityKind, pos: Vec2, vel: Vec2) -> Self {
        Self {
            id,
            kind,
            pos,
            vel,
            rotation: 0.0,
            scale: 1.0,
        }
    }

    pub fn size(&self) -> f32 {
        self.kind.size()
    }

    pub fn is_hazard(&self) -> bool {
        self.kind.is_hazard()
    }

    pub fn point_value(&self) -> i64 {
        self.kind.points()
    }
}

/// Bounded history of pointer samples, oldest first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Trail {
    points: VecDeque<Vec2>,
    capacity: usize,
}

impl Trail {
    pub fn new(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity.min(TRAIL_LENGTH)),
            capacity,
        }
    }

    pub fn push(&mut self, point: Vec2) {
        if self.capacity == 0 {
            return;
        }
        if self.points.len() == self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(point);
    }

    pub fn points(&self) -> impl ExactSizeIterator<Item = &Vec2> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Current phase of the slicer game (no pause)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotionPhase {
    Running,
    /// Terminal until reset
    Over,
}

/// Things that happened during the last operation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MotionEvent {
    Spawned { id: u32, kind: EntityKind },
    Sliced { kind: EntityKind, points: i64 },
    HazardHit,
    NewHighScore(i64),
    GameOver,
}

/// Tuning for the slicer game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub width: f32,
    pub height: f32,
    /// Added to vertical velocity every step
    pub gravity: f32,
    pub spawn_interval_ms: f64,
    pub max_active: usize,
    /// Entities are removed past `height + despawn_margin`
    pub despawn_margin: f32,
    /// Hit radius as a multiple of entity size
    pub hit_radius_factor: f32,
    pub rotation_rate: f32,
    pub fragment_rotation_rate: f32,
    /// Initial scale of slice fragments
    pub fragment_scale: f32,
    /// Per-step scale multiplier of fragments
    pub fragment_decay: f32,
    /// Fragments at or below this scale are removed
    pub fragment_min_scale: f32,
    /// Sideways velocity added (±) to each fragment
    pub fragment_spread: f32,
    /// Extra upward velocity given to fragments
    pub fragment_lift: f32,
    pub trail_length: usize,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
            gravity: GRAVITY,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            max_active: MAX_ACTIVE_ENTITIES,
            despawn_margin: DESPAWN_MARGIN,
            hit_radius_factor: 1.5,
            rotation_rate: 0.005,
            fragment_rotation_rate: 0.01,
            fragment_scale: 0.7,
            fragment_decay: 0.98,
            fragment_min_scale: 0.1,
            fragment_spread: 1.0,
            fragment_lift: 1.0,
            trail_length: TRAIL_LENGTH,
        }
    }
}

impl MotionConfig {
    /// y beyond which entities are gone
    pub fn despawn_y(&self) -> f32 {
        self.height + self.despawn_margin
    }
}

/// Complete slicer game snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotionState {
    pub config: MotionConfig,
    /// Sliceable entities, in spawn order
    pub entities: Vec<Entity>,
    /// Slice fragments (visual only, never scored)
    pub fragments: Vec<Entity>,
    pub trail: Trail,
    pub score: i64,
    pub high_score: i64,
    pub phase: MotionPhase,
    /// Host time of the last spawn; `None` until the first step
    pub last_spawn_ms: Option<f64>,
    /// Integration steps since the last reset
    pub steps: u64,
    rng: Pcg32,
    next_id: u32,
    /// Events produced by the operation that created this snapshot
    #[serde(skip)]
    pub events: Vec<MotionEvent>,
}

impl MotionState {
    /// Create a fresh game
    pub fn new(seed: u64, config: MotionConfig, high_score: i64) -> Self {
        Self::initial(Pcg32::seed_from_u64(seed), config, high_score)
    }

    pub(super) fn initial(rng: Pcg32, config: MotionConfig, high_score: i64) -> Self {
        let trail = Trail::new(config.trail_length);
        Self {
            config,
            entities: Vec::new(),
            fragments: Vec::new(),
            trail,
            score: 0,
            high_score,
            phase: MotionPhase::Running,
            last_spawn_ms: None,
            steps: 0,
            rng,
            next_id: 1,
            events: Vec::new(),
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_over(&self) -> bool {
        self.phase == MotionPhase::Over
    }

    pub(super) fn rng_mut(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    pub(super) fn take_rng(&self) -> Pcg32 {
        self.rng.clone()
    }
}
