use crate::backdrop::scrolling::{FrameOutcome, ScrollingBackdrop};
use crate::drawable::sink::Drawable;
use crate::foundation::error::RidgelineResult;
use crate::schedule::clock::{FrameScheduler, IdleScheduler};

/// Counters from one [`Runtime::run`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct RunStats {
    pub frames: u64,
    pub idle_slots: u64,
}

/// Drives a backdrop from a frame scheduler and an idle scheduler on one thread.
///
/// Each iteration serves the idle requests that were pending when it began (suspended runs are
/// picked up next iteration), then waits for a frame. When the frame loop ends, remaining catch-up
/// work is drained.
#[derive(Debug)]
pub struct Runtime<F, I> {
    frames: F,
    idle: I,
}

impl<F: FrameScheduler, I: IdleScheduler> Runtime<F, I> {
    pub fn new(frames: F, idle: I) -> Self {
        Self { frames, idle }
    }

    pub fn frames(&self) -> &F {
        &self.frames
    }

    pub fn idle(&self) -> &I {
        &self.idle
    }

    pub fn into_parts(self) -> (F, I) {
        (self.frames, self.idle)
    }

    /// Give each currently pending request one idle slot. Returns the number of slots used.
    pub fn serve_idle_round<D: Drawable>(
        &mut self,
        backdrop: &mut ScrollingBackdrop<D>,
    ) -> RidgelineResult<u64> {
        let mut slots = 0;
        for request in backdrop.take_idle_requests() {
            let deadline = self.idle.next_idle_slot(request.options);
            backdrop.run_idle(request.element, &deadline)?;
            slots += 1;
        }
        Ok(slots)
    }

    /// Serve idle slots until no catch-up work is left and every element covers the viewport.
    pub fn drain_idle<D: Drawable>(
        &mut self,
        backdrop: &mut ScrollingBackdrop<D>,
    ) -> RidgelineResult<u64> {
        let mut slots = self.serve_until_idle(backdrop)?;
        // Runs that began before the last scroll targeted an older region.
        if backdrop.notify_lagging() > 0 {
            slots += self.serve_until_idle(backdrop)?;
        }
        Ok(slots)
    }

    fn serve_until_idle<D: Drawable>(
        &mut self,
        backdrop: &mut ScrollingBackdrop<D>,
    ) -> RidgelineResult<u64> {
        let mut slots = 0;
        while backdrop.has_pending_work() {
            slots += self.serve_idle_round(backdrop)?;
        }
        Ok(slots)
    }

    /// Run until the frame loop stops or the frame scheduler shuts down.
    pub fn run<D: Drawable>(
        &mut self,
        backdrop: &mut ScrollingBackdrop<D>,
    ) -> RidgelineResult<RunStats> {
        self.run_with(backdrop, |_| {})
    }

    /// Like [`Runtime::run`], calling `after_frame` once per processed frame.
    #[tracing::instrument(level = "debug", skip_all, fields(surface = %backdrop.surface()))]
    pub fn run_with<D: Drawable>(
        &mut self,
        backdrop: &mut ScrollingBackdrop<D>,
        mut after_frame: impl FnMut(&mut ScrollingBackdrop<D>),
    ) -> RidgelineResult<RunStats> {
        let mut stats = RunStats::default();
        loop {
            stats.idle_slots += self.serve_idle_round(backdrop)?;
            if !backdrop.is_playing() {
                break;
            }
            let Some(timestamp) = self.frames.next_frame() else {
                tracing::debug!(frames = stats.frames, "frame scheduler shut down");
                break;
            };
            stats.frames += 1;
            let outcome = backdrop.on_frame(timestamp);
            after_frame(backdrop);
            if outcome == FrameOutcome::Stopped {
                break;
            }
        }
        stats.idle_slots += self.drain_idle(backdrop)?;
        tracing::debug!(
            frames = stats.frames,
            idle_slots = stats.idle_slots,
            x = backdrop.viewport().x,
            "run finished"
        );
        Ok(stats)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/runtime.rs"]
mod tests;
