//! Host-side clocks
//!
//! The simulators never read a clock themselves. These helpers turn the
//! host's frame timestamps into "how many steps to run now".

use crate::consts::{MAX_SUBSTEPS, MOTION_DT};

/// Fixed-timestep accumulator for per-frame simulations
#[derive(Debug, Clone)]
pub struct FrameClock {
    step: f32,
    max_substeps: u32,
    accumulator: f32,
    last_time_ms: Option<f64>,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(MOTION_DT, MAX_SUBSTEPS)
    }
}

impl FrameClock {
    pub fn new(step: f32, max_substeps: u32) -> Self {
        Self {
            step,
            max_substeps,
            accumulator: 0.0,
            last_time_ms: None,
        }
    }

    /// Feed a frame timestamp (ms); returns the number of fixed steps to run.
    /// The first frame runs a single step. Long stalls are clamped to 100 ms
    /// and anything beyond `max_substeps` is dropped.
    pub fn advance(&mut self, now_ms: f64) -> u32 {
        let dt = match self.last_time_ms {
            Some(last) => (((now_ms - last) / 1000.0) as f32).clamp(0.0, 0.1),
            None => self.step,
        };
        self.last_time_ms = Some(now_ms);
        self.accumulator += dt;

        let mut steps = 0;
        while self.accumulator >= self.step && steps < self.max_substeps {
            self.accumulator -= self.step;
            steps += 1;
        }
        if steps == self.max_substeps {
            self.accumulator = 0.0;
        }
        steps
    }
}

/// Due-time gate for a variable-interval tick
#[derive(Debug, Clone)]
pub struct TickTimer {
    interval_ms: u32,
    next_due_ms: Option<f64>,
}

impl TickTimer {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms,
            next_due_ms: None,
        }
    }

    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Whether a tick is due at `now_ms`. Arms on first poll; fires at most
    /// once per poll so a stalled tab does not replay a burst of ticks.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        let due = *self
            .next_due_ms
            .get_or_insert(now_ms + self.interval_ms as f64);
        if now_ms < due {
            return false;
        }
        self.next_due_ms = Some(now_ms + self.interval_ms as f64);
        true
    }

    /// Adopt a new interval, re-arming from `now_ms` if it changed.
    /// Returns true when the timer was re-armed.
    pub fn rearm_if_changed(&mut self, interval_ms: u32, now_ms: f64) -> bool {
        if interval_ms == self.interval_ms {
            return false;
        }
        log::debug!("Tick interval {} -> {} ms", self.interval_ms, interval_ms);
        self.interval_ms = interval_ms;
        self.next_due_ms = Some(now_ms + interval_ms as f64);
        true
    }

    /// Disarm; the next poll starts a fresh interval
    pub fn cancel(&mut self) {
        self.next_due_ms = None;
    }
}
