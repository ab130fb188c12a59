//! Slicer game operations: spawner, integrator and pointer hit testing
//!
//! Like the grid game, every operation maps a snapshot to a new snapshot.
//! The host applies frame steps and pointer samples one at a time to the
//! current snapshot, so a sample never sees a half-integrated entity list.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::state::{Entity, EntityKind, MotionConfig, MotionEvent, MotionPhase, MotionState};
use crate::clamp_to_canvas;
use crate::sim::collision::point_hits_circle;

/// Upward launch speed of a new entity (px/step)
const LAUNCH_SPEED: f32 = 10.0;
/// Random extra launch speed, `[0, LAUNCH_JITTER)`
const LAUNCH_JITTER: f32 = 0.1;
/// Horizontal speed range, centred on zero
const DRIFT_JITTER: f32 = 0.1;
/// Spawn depth below the bottom edge
const SPAWN_DEPTH: f32 = 30.0;
/// Keep spawns away from the left edge...
const SPAWN_INSET_LEFT: f32 = 10.0;
/// ...and the right edge (total horizontal margin)
const SPAWN_MARGIN_X: f32 = 80.0;

fn next_of(prev: &MotionState) -> MotionState {
    let mut next = prev.clone();
    next.events.clear();
    next
}

/// Advance one entity by `dt` steps: linear motion plus gravity
pub fn integrate(entity: &Entity, dt: f32, config: &MotionConfig) -> Entity {
    let mut e = *entity;
    e.pos += e.vel * dt;
    e.vel.y += config.gravity * dt;
    e.rotation += config.rotation_rate * dt;
    e
}

/// Advance a slice fragment: spins faster and shrinks every step
pub fn integrate_fragment(fragment: &Entity, dt: f32, config: &MotionConfig) -> Entity {
    let mut e = *fragment;
    e.pos += e.vel * dt;
    e.vel.y += config.gravity * dt;
    e.rotation += config.fragment_rotation_rate * dt;
    e.scale *= config.fragment_decay.powf(dt);
    e
}

/// Whether an entity has fallen out of view
pub fn is_offscreen(entity: &Entity, config: &MotionConfig) -> bool {
    entity.pos.y >= config.despawn_y()
}

/// Whether a fragment should be dropped
pub fn fragment_expired(fragment: &Entity, config: &MotionConfig) -> bool {
    is_offscreen(fragment, config) || fragment.scale <= config.fragment_min_scale
}

/// Emit a new entity if the spawn interval has elapsed and there is room.
///
/// The first call after creation or reset only starts the interval.
pub fn spawn(prev: &MotionState, now_ms: f64) -> MotionState {
    let mut next = next_of(prev);
    if next.phase == MotionPhase::Running {
        try_spawn(&mut next, now_ms);
    }
    next
}

fn try_spawn(state: &mut MotionState, now_ms: f64) -> bool {
    let last = *state.last_spawn_ms.get_or_insert(now_ms);
    if now_ms - last <= state.config.spawn_interval_ms
        || state.entities.len() >= state.config.max_active
    {
        return false;
    }

    let width = state.config.width;
    let height = state.config.height;
    let rng = state.rng_mut();
    let kind = EntityKind::ALL[rng.random_range(0..EntityKind::ALL.len())];
    let x = rng.random::<f32>() * (width - SPAWN_MARGIN_X).max(0.0) + SPAWN_INSET_LEFT;
    let vel = Vec2::new(
        (rng.random::<f32>() - 0.5) * DRIFT_JITTER,
        -LAUNCH_SPEED - rng.random::<f32>() * LAUNCH_JITTER,
    );
    let rotation = rng.random::<f32>() * TAU;

    let id = state.next_entity_id();
    let mut entity = Entity::new(id, kind, Vec2::new(x, height + SPAWN_DEPTH), vel);
    entity.rotation = rotation;
    state.entities.push(entity);
    state.last_spawn_ms = Some(now_ms);
    state.events.push(MotionEvent::Spawned { id, kind });
    log::debug!("Spawned {:?} #{} at x={:.0}", kind, id, x);
    true
}

/// One frame: spawn check, then integrate entities and fragments by one step
pub fn step(prev: &MotionState, now_ms: f64) -> MotionState {
    let mut next = next_of(prev);
    if next.phase != MotionPhase::Running {
        return next;
    }

    try_spawn(&mut next, now_ms);

    let config = &next.config;
    let entities: Vec<Entity> = next
        .entities
        .iter()
        .map(|e| integrate(e, 1.0, config))
        .filter(|e| !is_offscreen(e, config))
        .collect();
    let fragments: Vec<Entity> = next
        .fragments
        .iter()
        .map(|f| integrate_fragment(f, 1.0, config))
        .filter(|f| !fragment_expired(f, config))
        .collect();
    next.entities = entities;
    next.fragments = fragments;
    next.steps += 1;
    next
}

/// Two diverging halves of a sliced entity
fn slice_fragments(state: &mut MotionState, entity: &Entity) -> [Entity; 2] {
    let spread = state.config.fragment_spread;
    let lift = state.config.fragment_lift;
    let scale = state.config.fragment_scale;
    let mut half = |dx: f32| Entity {
        id: state.next_entity_id(),
        vel: entity.vel + Vec2::new(dx, -lift),
        scale,
        ..*entity
    };
    [half(-spread), half(spread)]
}

/// Feed one pointer sample: extend the trail and slice everything under it.
///
/// All hits in the sample are processed in the same pass. A hazard ends the
/// game but fruit sliced by the same sample still score.
pub fn register_pointer_sample(prev: &MotionState, point: Vec2) -> MotionState {
    let mut next = next_of(prev);
    if next.phase != MotionPhase::Running {
        return next;
    }

    let point = clamp_to_canvas(point, next.config.width, next.config.height);
    next.trail.push(point);

    let factor = next.config.hit_radius_factor;
    let (hits, kept): (Vec<Entity>, Vec<Entity>) = std::mem::take(&mut next.entities)
        .into_iter()
        .partition(|e| point_hits_circle(point, e.pos, e.size() * factor));
    next.entities = kept;

    for entity in &hits {
        let halves = slice_fragments(&mut next, entity);
        next.fragments.extend(halves);

        if entity.is_hazard() {
            if next.phase == MotionPhase::Running {
                log::info!("Hazard sliced - game over (score {})", next.score);
                next.phase = MotionPhase::Over;
                next.events.push(MotionEvent::HazardHit);
                next.events.push(MotionEvent::GameOver);
            }
        } else {
            let points = entity.point_value();
            next.score += points;
            next.events.push(MotionEvent::Sliced {
                kind: entity.kind,
                points,
            });
        }
    }

    if next.score > next.high_score {
        next.high_score = next.score;
        next.events.push(MotionEvent::NewHighScore(next.score));
    }

    next
}

/// Start over: no entities, score 0, `Running`; high score is kept.
pub fn reset(prev: &MotionState) -> MotionState {
    log::info!("Slicer game reset (score was {})", prev.score);
    MotionState::initial(prev.take_rng(), prev.config.clone(), prev.high_score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn fresh() -> MotionState {
        MotionState::new(42, MotionConfig::default(), 0)
    }

    fn place(state: &mut MotionState, kind: EntityKind, x: f32, y: f32) -> u32 {
        let id = state.next_entity_id();
        state
            .entities
            .push(Entity::new(id, kind, Vec2::new(x, y), Vec2::new(0.0, -10.0)));
        id
    }

    #[test]
    fn test_spawn_waits_for_interval() {
        let state = fresh();
        let state = spawn(&state, 1_000.0);
        assert!(state.entities.is_empty());
        assert_eq!(state.last_spawn_ms, Some(1_000.0));

        let state = spawn(&state, 11_000.0);
        assert!(state.entities.is_empty()); // exactly the interval is not enough

        let state = spawn(&state, 11_001.0);
        assert_eq!(state.entities.len(), 1);
        let e = state.entities[0];
        assert_eq!(e.pos.y, 630.0);
        assert!(e.pos.x >= 10.0 && e.pos.x < 730.0);
        assert!(e.vel.y <= -10.0 && e.vel.y > -10.1);
        assert!(e.vel.x.abs() <= 0.05);
        assert_eq!(e.scale, 1.0);
        assert!(matches!(state.events[0], MotionEvent::Spawned { .. }));
    }

    #[test]
    fn test_spawn_respects_cap() {
        let mut state = fresh();
        state.last_spawn_ms = Some(0.0);
        for i in 0..4 {
            place(&mut state, EntityKind::Apple, 100.0 * i as f32, 300.0);
        }
        let next = spawn(&state, 50_000.0);
        assert_eq!(next.entities.len(), 4);
        assert_eq!(next.last_spawn_ms, Some(0.0));
    }

    #[test]
    fn test_kinematics_still_rising() {
        let config = MotionConfig::default();
        let mut e = Entity::new(1, EntityKind::Apple, Vec2::new(400.0, 590.0), Vec2::new(0.0, -10.0));
        for _ in 0..10 {
            e = integrate(&e, 1.0, &config);
        }
        // y = 590 + sum_{k=0}^{9} (-10 + 0.1k) = 494.5
        assert!(e.pos.y < 590.0);
        assert!((e.pos.y - 494.5).abs() < 1e-3);
        assert!((e.vel.y - -9.0).abs() < 1e-4);
        assert!((e.rotation - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_entities_removed_below_screen() {
        let mut state = fresh();
        place(&mut state, EntityKind::Kiwi, 100.0, 649.0);
        state.entities[0].vel = Vec2::new(0.0, 2.0);
        let next = step(&state, 0.0);
        assert!(next.entities.is_empty());
        assert_eq!(next.steps, 1);
    }

    #[test]
    fn test_fragments_shrink_and_expire() {
        let mut state = fresh();
        state.config.gravity = 0.0;
        let id = state.next_entity_id();
        let mut fragment = Entity::new(id, EntityKind::Orange, Vec2::new(100.0, 100.0), Vec2::ZERO);
        fragment.scale = 0.7;
        state.fragments.push(fragment);

        let mut steps = 0;
        while !state.fragments.is_empty() {
            state = step(&state, 0.0);
            steps += 1;
            assert!(steps < 200);
        }
        // 0.7 * 0.98^n <= 0.1 first holds at n = 97
        assert_eq!(steps, 97);
    }

    #[test]
    fn test_slice_scores_and_fragments() {
        let mut state = fresh();
        place(&mut state, EntityKind::Watermelon, 100.0, 100.0);
        place(&mut state, EntityKind::Apple, 600.0, 100.0);

        let next = register_pointer_sample(&state, Vec2::new(130.0, 120.0));
        assert_eq!(next.score, 5);
        assert_eq!(next.high_score, 5);
        assert_eq!(next.entities.len(), 1);
        assert_eq!(next.entities[0].kind, EntityKind::Apple);
        assert_eq!(next.fragments.len(), 2);
        let (a, b) = (next.fragments[0], next.fragments[1]);
        assert_eq!(a.pos, Vec2::new(100.0, 100.0));
        assert_eq!(a.vel, Vec2::new(-1.0, -11.0));
        assert_eq!(b.vel, Vec2::new(1.0, -11.0));
        assert_eq!(a.scale, 0.7);
        assert_ne!(a.id, b.id);
        assert!(next.events.contains(&MotionEvent::Sliced {
            kind: EntityKind::Watermelon,
            points: 5
        }));
        assert!(next.events.contains(&MotionEvent::NewHighScore(5)));
        assert_eq!(next.trail.len(), 1);
    }

    #[test]
    fn test_miss_changes_nothing_but_trail() {
        let mut state = fresh();
        place(&mut state, EntityKind::Apple, 100.0, 100.0);
        // 25 * 1.5 = 37.5 hit radius
        let next = register_pointer_sample(&state, Vec2::new(137.5, 100.0));
        assert_eq!(next.entities.len(), 1);
        assert_eq!(next.score, 0);
        assert!(next.events.is_empty());
        assert_eq!(next.trail.len(), 1);
    }

    #[test]
    fn test_hazard_ends_game_without_scoring() {
        let mut state = fresh();
        state.score = 7;
        state.high_score = 20;
        place(&mut state, EntityKind::Bomb, 300.0, 300.0);

        let next = register_pointer_sample(&state, Vec2::new(300.0, 300.0));
        assert_eq!(next.phase, MotionPhase::Over);
        assert_eq!(next.score, 7);
        assert_eq!(next.high_score, 20);
        assert!(next.events.contains(&MotionEvent::HazardHit));
        assert!(next.events.contains(&MotionEvent::GameOver));
        assert_eq!(next.fragments.len(), 2);

        // Over is terminal: samples and frames are ignored
        let mut later = next.clone();
        place(&mut later, EntityKind::Coconut, 300.0, 300.0);
        let after = register_pointer_sample(&later, Vec2::new(300.0, 300.0));
        assert_eq!(after.score, 7);
        assert_eq!(after.entities.len(), 1);
        let after = step(&after, 99_999.0);
        assert_eq!(after.steps, later.steps);
    }

    #[test]
    fn test_hazard_and_fruit_in_same_sample() {
        // Fruit sliced by the fatal sample still count
        let mut state = fresh();
        place(&mut state, EntityKind::Bomb, 300.0, 300.0);
        place(&mut state, EntityKind::Coconut, 310.0, 300.0);
        let next = register_pointer_sample(&state, Vec2::new(305.0, 300.0));
        assert_eq!(next.phase, MotionPhase::Over);
        assert_eq!(next.score, 6);
        assert!(next.entities.is_empty());
        assert_eq!(next.fragments.len(), 4);
        let overs = next
            .events
            .iter()
            .filter(|e| **e == MotionEvent::GameOver)
            .count();
        assert_eq!(overs, 1);
    }

    #[test]
    fn test_pointer_clamped_to_canvas() {
        let state = fresh();
        let next = register_pointer_sample(&state, Vec2::new(-50.0, 900.0));
        assert_eq!(next.trail.points().next(), Some(&Vec2::new(0.0, 600.0)));
    }

    #[test]
    fn test_reset() {
        let mut state = fresh();
        state.high_score = 3;
        place(&mut state, EntityKind::Banana, 100.0, 100.0);
        let state = register_pointer_sample(&state, Vec2::new(100.0, 100.0));
        let state = step(&state, 5.0);
        let fresh_state = reset(&state);
        for s in [&fresh_state, &reset(&fresh_state)] {
            assert_eq!(s.score, 0);
            assert_eq!(s.high_score, 3);
            assert!(s.entities.is_empty());
            assert!(s.fragments.is_empty());
            assert!(s.trail.is_empty());
            assert_eq!(s.phase, MotionPhase::Running);
            assert_eq!(s.last_spawn_ms, None);
        }
    }

    #[test]
    fn test_determinism() {
        let mut a = MotionState::new(99, MotionConfig::default(), 0);
        let mut b = MotionState::new(99, MotionConfig::default(), 0);
        for frame in 0..2_000 {
            let now = frame as f64 * 16.0;
            a = step(&a, now);
            b = step(&b, now);
        }
        assert_eq!(a.entities, b.entities);
        assert!(a.steps == 2_000);
    }

    fn fruit_strategy() -> impl Strategy<Value = EntityKind> {
        prop::sample::select(
            EntityKind::ALL
                .iter()
                .copied()
                .filter(|k| !k.is_hazard())
                .collect::<Vec<_>>(),
        )
    }

    proptest! {
        #[test]
        fn prop_score_is_sum_of_hits(
            kinds in prop::collection::vec(fruit_strategy(), 1..20),
            prior_high in 0i64..60,
        ) {
            let mut state = MotionState::new(1, MotionConfig::default(), prior_high);
            let mut expected = 0;
            let mut best = prior_high;
            for kind in kinds {
                place(&mut state, kind, 400.0, 300.0);
                let before_high = state.high_score;
                state = register_pointer_sample(&state, Vec2::new(400.0, 300.0));
                expected += kind.points();
                best = best.max(expected);
                prop_assert_eq!(state.score, expected);
                prop_assert_eq!(state.high_score, best);
                let announced = state.events.iter().any(|e| matches!(e, MotionEvent::NewHighScore(_)));
                prop_assert_eq!(announced, expected > before_high);
            }
        }
    }
}
