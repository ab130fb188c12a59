//! Grid game operations
//!
//! Each operation takes the previous snapshot and returns a new one with its
//! `events` describing what happened. Nothing here blocks or schedules work:
//! ghost mode expiry is a timestamp checked at the start of every tick.

use super::state::{
    DeathCause, Direction, Food, FoodKind, GridEvent, GridPhase, GridState,
};
use crate::sim::collision::{cell_hits, cell_in_bounds, wrap_cell};
use crate::sim::placement::{random_free_cell, random_free_cells};

/// Fresh copy of `prev` with last operation's events cleared
fn next_of(prev: &GridState) -> GridState {
    let mut next = prev.clone();
    next.events.clear();
    next
}

/// Request a heading for the next tick.
///
/// A reversal of the heading applied on the last tick is ignored, which also
/// covers two quick presses within one tick (e.g. UP then LEFT while moving
/// RIGHT is fine, but RIGHT -> UP -> LEFT cannot sneak a reversal in).
pub fn set_direction(prev: &GridState, requested: Direction) -> GridState {
    let mut next = next_of(prev);
    if next.phase != GridPhase::Over && requested != next.direction.opposite() {
        next.pending_direction = requested;
    }
    next
}

/// Toggle between `Running` and `Paused`. No effect once the game is over.
pub fn toggle_pause(prev: &GridState) -> GridState {
    let mut next = next_of(prev);
    next.phase = match next.phase {
        GridPhase::Running => GridPhase::Paused,
        GridPhase::Paused => GridPhase::Running,
        GridPhase::Over => GridPhase::Over,
    };
    log::debug!("Grid phase: {:?} -> {:?}", prev.phase, next.phase);
    next
}

/// Start over: initial snake, food, speed and level; high score is kept.
pub fn reset(prev: &GridState) -> GridState {
    log::info!("Grid game reset (score was {})", prev.score);
    GridState::initial(prev.take_rng(), prev.config.clone(), prev.high_score)
}

/// Advance the game by one tick. `now_ms` is the host clock used for ghost
/// mode expiry.
pub fn tick(prev: &GridState, now_ms: u64) -> GridState {
    let mut next = next_of(prev);
    if next.phase != GridPhase::Running {
        return next;
    }

    // Ghost mode expiry
    if next.ghost_until_ms.is_some_and(|until| now_ms >= until) {
        next.ghost_until_ms = None;
        next.events.push(GridEvent::GhostExpired);
    }

    next.direction = next.pending_direction;
    next.ticks += 1;

    let grid_size = next.config.grid_size;
    let ghost = next.ghost_active();
    let mut head = next.head().offset(next.direction);

    if ghost {
        head = wrap_cell(head, grid_size);
    } else if !cell_in_bounds(head, grid_size) {
        return game_over(next, DeathCause::Wall);
    }

    if cell_hits(head, &next.snake) {
        return game_over(next, DeathCause::SelfBite);
    }

    if !ghost && cell_hits(head, &next.obstacles) {
        return game_over(next, DeathCause::Obstacle);
    }

    next.snake.push_front(head);

    match next.food {
        Some(food) if food.position == head => eat(&mut next, food, now_ms),
        _ => {
            next.snake.pop_back();
        }
    }

    next
}

fn game_over(mut state: GridState, cause: DeathCause) -> GridState {
    log::info!(
        "Grid game over ({:?}) - score {}, level {}",
        cause,
        state.score,
        state.level
    );
    state.phase = GridPhase::Over;
    state.events.push(GridEvent::GameOver(cause));
    state
}

fn eat(state: &mut GridState, food: Food, now_ms: u64) {
    let points = food.kind.points();
    let old_score = state.score;
    state.score += points;
    state.events.push(GridEvent::FoodEaten {
        kind: food.kind,
        points,
    });

    if state.score > state.high_score {
        state.high_score = state.score;
        state.events.push(GridEvent::NewHighScore(state.score));
    }

    // Food effects
    match food.kind {
        FoodKind::SpeedUp | FoodKind::SlowDown => {
            let delta = food.kind.speed_delta_ms(state.config.speed_step_ms);
            let speed = state.config.clamp_speed(state.speed_ms as i64 + delta as i64);
            if speed != state.speed_ms {
                state.speed_ms = speed;
                state.events.push(GridEvent::SpeedChanged(speed));
            }
        }
        FoodKind::Ghost => {
            let until_ms = now_ms.saturating_add(state.config.ghost_duration_ms);
            state.ghost_until_ms = Some(until_ms);
            state.events.push(GridEvent::GhostStarted { until_ms });
        }
        FoodKind::Normal => {}
    }

    regenerate_food(state);

    // Level up each time the score crosses a multiple of `points_per_level`
    let per_level = state.config.points_per_level.max(1);
    if state.score / per_level > old_score / per_level {
        state.level += 1;
        state.events.push(GridEvent::LevelUp(state.level));
        log::info!("Level {} reached (score {})", state.level, state.score);
        regenerate_obstacles(state);
    }
}

/// Place new food on a cell free of snake and obstacles, with a fresh kind
fn regenerate_food(state: &mut GridState) {
    let grid_size = state.config.grid_size;
    let snake = state.snake.clone();
    let obstacles = state.obstacles.clone();
    let position = random_free_cell(state.rng_mut(), grid_size, |c| {
        snake.contains(&c) || obstacles.contains(&c)
    });
    let kind = FoodKind::roll(state.rng_mut());
    state.food = position.map(|position| Food { position, kind });
    if state.food.is_none() {
        log::warn!("No free cell left for food");
        state.events.push(GridEvent::BoardFull);
    }
}

/// Replace the obstacle set, avoiding the snake, the food and each other
fn regenerate_obstacles(state: &mut GridState) {
    let grid_size = state.config.grid_size;
    let count = state.config.obstacle_count(state.level);
    let snake = state.snake.clone();
    let food = state.food.map(|f| f.position);
    state.obstacles = random_free_cells(state.rng_mut(), grid_size, count, |c| {
        snake.contains(&c) || food == Some(c)
    });
}
