use std::cell::Cell;
use std::time::{Duration, Instant};

/// Options passed along with an idle-slot request.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct IdleRequestOptions {
    /// Upper bound (ms) on how long the host may wait before running the slot anyway.
    pub timeout: Option<f64>,
}

impl IdleRequestOptions {
    pub fn with_timeout(timeout_ms: f64) -> Self {
        Self {
            timeout: Some(timeout_ms),
        }
    }
}

/// Budget handed to a cooperative task for one idle slot.
pub trait IdleDeadline {
    /// Milliseconds left in this slot. `<= 0` means the task should yield.
    fn time_remaining(&self) -> f64;
    /// True when the slot was forced by a request timeout rather than genuine idleness.
    fn did_timeout(&self) -> bool;
}

/// Wall-clock deadline.
#[derive(Clone, Copy, Debug)]
pub struct InstantDeadline {
    end: Instant,
    did_timeout: bool,
}

impl InstantDeadline {
    pub fn new(budget: Duration, did_timeout: bool) -> Self {
        Self {
            end: Instant::now() + budget,
            did_timeout,
        }
    }
}

impl IdleDeadline for InstantDeadline {
    fn time_remaining(&self) -> f64 {
        self.end
            .saturating_duration_since(Instant::now())
            .as_secs_f64()
            * 1000.0
    }

    fn did_timeout(&self) -> bool {
        self.did_timeout
    }
}

/// Deterministic deadline: every `time_remaining` query consumes one step of budget.
///
/// A budget of `n` lets a grow loop append `n` segments before it yields.
#[derive(Debug)]
pub struct StepBudgetDeadline {
    remaining: Cell<u32>,
    did_timeout: bool,
}

impl StepBudgetDeadline {
    pub fn new(steps: u32, did_timeout: bool) -> Self {
        Self {
            remaining: Cell::new(steps),
            did_timeout,
        }
    }

    pub fn steps_left(&self) -> u32 {
        self.remaining.get()
    }
}

impl IdleDeadline for StepBudgetDeadline {
    fn time_remaining(&self) -> f64 {
        let left = self.remaining.get().saturating_sub(1);
        self.remaining.set(left);
        f64::from(left)
    }

    fn did_timeout(&self) -> bool {
        self.did_timeout
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/deadline.rs"]
mod tests;
