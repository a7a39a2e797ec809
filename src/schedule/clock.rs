use std::time::{Duration, Instant};

use crate::schedule::deadline::{IdleDeadline, IdleRequestOptions, InstantDeadline, StepBudgetDeadline};

/// Source of display-refresh timestamps.
pub trait FrameScheduler {
    /// Block until the next frame and return its timestamp in milliseconds.
    ///
    /// Timestamps are monotonically increasing. `None` means the host is shutting down.
    fn next_frame(&mut self) -> Option<f64>;
}

/// Source of budgeted idle slots.
pub trait IdleScheduler {
    type Deadline: IdleDeadline;

    /// Wait for the next idle slot, or until `options.timeout` forces one.
    fn next_idle_slot(&mut self, options: IdleRequestOptions) -> Self::Deadline;
}

/// Deterministic clock for tests and offline simulation.
///
/// Frames arrive every `frame_ms`. Idle slots carry a [`StepBudgetDeadline`] of `idle_budget`
/// steps. A *starved* clock models a host that is almost never idle: every slot carries a single
/// step, and a slot answering a request with a timeout reports `did_timeout`. Untimed requests
/// still get their one-step slot, since the runtime serves each request before moving on.
#[derive(Debug, Clone)]
pub struct VirtualClock {
    now: f64,
    frame_ms: f64,
    frames_left: Option<u64>,
    idle_budget: u32,
    starved: bool,
    requests: Vec<IdleRequestOptions>,
}

impl VirtualClock {
    pub fn new(frame_ms: f64, idle_budget: u32) -> Self {
        Self {
            now: 0.0,
            frame_ms,
            frames_left: None,
            idle_budget,
            starved: false,
            requests: Vec::new(),
        }
    }

    /// Stop producing frames after `frames` more.
    pub fn with_frame_limit(mut self, frames: u64) -> Self {
        self.frames_left = Some(frames);
        self
    }

    pub fn starved(mut self, starved: bool) -> Self {
        self.starved = starved;
        self
    }

    pub fn now(&self) -> f64 {
        self.now
    }

    /// Every idle request received, in order.
    pub fn requests(&self) -> &[IdleRequestOptions] {
        &self.requests
    }
}

impl FrameScheduler for VirtualClock {
    fn next_frame(&mut self) -> Option<f64> {
        if let Some(left) = self.frames_left.as_mut() {
            if *left == 0 {
                return None;
            }
            *left -= 1;
        }
        self.now += self.frame_ms;
        Some(self.now)
    }
}

impl IdleScheduler for VirtualClock {
    type Deadline = StepBudgetDeadline;

    fn next_idle_slot(&mut self, options: IdleRequestOptions) -> StepBudgetDeadline {
        self.requests.push(options);
        if self.starved {
            return StepBudgetDeadline::new(1, options.timeout.is_some());
        }
        StepBudgetDeadline::new(self.idle_budget, false)
    }
}

/// Wall-clock scheduler: sleeps to a fixed refresh rate and grants a fixed idle budget per slot.
#[derive(Debug, Clone)]
pub struct RealtimeClock {
    origin: Instant,
    next_tick: Instant,
    frame: Duration,
    idle_budget: Duration,
    frames_left: Option<u64>,
}

impl RealtimeClock {
    pub fn new(frame: Duration, idle_budget: Duration) -> Self {
        let origin = Instant::now();
        Self {
            origin,
            next_tick: origin + frame,
            frame,
            idle_budget,
            frames_left: None,
        }
    }

    pub fn with_frame_limit(mut self, frames: u64) -> Self {
        self.frames_left = Some(frames);
        self
    }
}

impl FrameScheduler for RealtimeClock {
    fn next_frame(&mut self) -> Option<f64> {
        if let Some(left) = self.frames_left.as_mut() {
            if *left == 0 {
                return None;
            }
            *left -= 1;
        }
        let now = Instant::now();
        if self.next_tick > now {
            std::thread::sleep(self.next_tick - now);
        }
        self.next_tick += self.frame;
        Some(self.origin.elapsed().as_secs_f64() * 1000.0)
    }
}

impl IdleScheduler for RealtimeClock {
    type Deadline = InstantDeadline;

    fn next_idle_slot(&mut self, _options: IdleRequestOptions) -> InstantDeadline {
        // Frames are paced by sleeping, so the time between them is always idle.
        InstantDeadline::new(self.idle_budget, false)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/clock.rs"]
mod tests;
