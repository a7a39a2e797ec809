use std::collections::VecDeque;

use crate::backdrop::context::SurfaceId;
use crate::backdrop::element::{BackdropElement, ElementId, INITIAL_FILL_TIMEOUT_MS, TaskPoll};
use crate::backdrop::options::ElementOptions;
use crate::backdrop::strategy::Strategy;
use crate::drawable::sink::Drawable;
use crate::foundation::core::Viewport;
use crate::foundation::error::{RidgelineError, RidgelineResult};
use crate::schedule::deadline::{IdleDeadline, IdleRequestOptions};

/// A pending idle-slot request for one element's catch-up run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IdleRequest {
    pub element: ElementId,
    pub options: IdleRequestOptions,
}

/// What a frame did to the backdrop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FrameOutcome {
    /// The frame loop is not running; nothing changed.
    NotPlaying,
    /// First frame after `play`: the timestamp was recorded, nothing moved.
    Started,
    /// The viewport moved by `delta`; `queued` elements were asked to catch up.
    Advanced { delta: f64, queued: usize },
    /// Speed was zero when the frame was processed; the loop has ended.
    Stopped,
}

/// Scroll coordinator for one rendering surface.
///
/// Owns the viewport, the scroll speed (units per millisecond), and the elements drawn on the
/// surface. Frames move `viewport.x`; elements whose rendered coverage falls behind the new right
/// edge get a catch-up run queued on the idle scheduler.
#[derive(Debug)]
pub struct ScrollingBackdrop<D> {
    surface: SurfaceId,
    viewport: Viewport,
    speed: f64,
    playing: bool,
    last_frame: Option<f64>,
    elements: Vec<BackdropElement<D>>,
    idle_requests: VecDeque<IdleRequest>,
}

impl<D: Drawable> ScrollingBackdrop<D> {
    pub fn new(surface: SurfaceId, viewport: Viewport) -> Self {
        Self {
            surface,
            viewport,
            speed: 0.0,
            playing: false,
            last_frame: None,
            elements: Vec::new(),
            idle_requests: VecDeque::new(),
        }
    }

    pub fn surface(&self) -> SurfaceId {
        self.surface
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Set the scroll speed and start the frame loop if it isn't running.
    ///
    /// Returns `true` when this call started the loop.
    pub fn play(&mut self, speed: f64) -> bool {
        if !speed.is_finite() {
            tracing::warn!(surface = %self.surface, speed, "ignoring non-finite scroll speed");
            return false;
        }
        self.speed = speed;
        if self.playing {
            return false;
        }
        self.playing = true;
        self.last_frame = None;
        tracing::debug!(surface = %self.surface, speed, "frame loop started");
        true
    }

    /// Set the speed to zero. The loop notices on its next frame.
    pub fn stop(&mut self) {
        self.speed = 0.0;
    }

    /// Advance the loop by one display frame at `timestamp` ms.
    #[tracing::instrument(level = "trace", skip(self), fields(surface = %self.surface))]
    pub fn on_frame(&mut self, timestamp: f64) -> FrameOutcome {
        if !self.playing {
            return FrameOutcome::NotPlaying;
        }
        let Some(last) = self.last_frame.replace(timestamp) else {
            if self.speed == 0.0 {
                return self.end_loop();
            }
            return FrameOutcome::Started;
        };

        let delta = (timestamp - last) * self.speed;
        self.viewport.x += delta;
        let queued = self.notify_lagging();

        if self.speed == 0.0 {
            return self.end_loop();
        }
        FrameOutcome::Advanced { delta, queued }
    }

    fn end_loop(&mut self) -> FrameOutcome {
        self.playing = false;
        self.last_frame = None;
        tracing::debug!(surface = %self.surface, x = self.viewport.x, "frame loop stopped");
        FrameOutcome::Stopped
    }

    /// Move the viewport to `x` without going through the frame loop.
    pub fn scroll_to(&mut self, x: f64) -> usize {
        self.viewport.x = x;
        self.notify_lagging()
    }

    pub fn scroll_by(&mut self, dx: f64) -> usize {
        self.scroll_to(self.viewport.x + dx)
    }

    /// Queue a catch-up for every element whose coverage ends before the viewport's right edge.
    ///
    /// Returns how many new idle requests were created; elements already catching up are
    /// coalesced into their in-flight run.
    pub fn notify_lagging(&mut self) -> usize {
        let right = self.viewport.right();
        let mut queued = 0;
        for (index, element) in self.elements.iter_mut().enumerate() {
            if right <= element.render_max() {
                continue;
            }
            if let Some(options) = element.queue_update(IdleRequestOptions::default()) {
                self.idle_requests.push_back(IdleRequest {
                    element: ElementId(index),
                    options,
                });
                queued += 1;
            }
        }
        queued
    }

    /// Bind a new element to `drawable` and queue its initial fill.
    ///
    /// The fill is requested with a short timeout so it runs even on a busy host.
    pub fn add_element(
        &mut self,
        drawable: D,
        strategy: Strategy,
        options: ElementOptions,
    ) -> RidgelineResult<ElementId> {
        let mut element = BackdropElement::new(drawable, strategy, options, &self.viewport)?;
        let id = ElementId(self.elements.len());
        if let Some(options) =
            element.queue_update(IdleRequestOptions::with_timeout(INITIAL_FILL_TIMEOUT_MS))
        {
            self.idle_requests.push_back(IdleRequest {
                element: id,
                options,
            });
        }
        tracing::debug!(
            surface = %self.surface,
            element = %id,
            strategy = ?element.strategy().kind(),
            "element added"
        );
        self.elements.push(element);
        Ok(id)
    }

    pub fn element(&self, id: ElementId) -> Option<&BackdropElement<D>> {
        self.elements.get(id.0)
    }

    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut BackdropElement<D>> {
        self.elements.get_mut(id.0)
    }

    pub fn elements(&self) -> &[BackdropElement<D>] {
        &self.elements
    }

    /// Ask one element to catch up. Returns `false` when it already has a run in flight.
    pub fn queue_update(
        &mut self,
        id: ElementId,
        options: IdleRequestOptions,
    ) -> RidgelineResult<bool> {
        let element = self.elements.get_mut(id.0).ok_or_else(|| unknown_element(id))?;
        match element.queue_update(options) {
            Some(options) => {
                self.idle_requests.push_back(IdleRequest {
                    element: id,
                    options,
                });
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Hand every pending idle request to the host.
    pub fn take_idle_requests(&mut self) -> Vec<IdleRequest> {
        self.idle_requests.drain(..).collect()
    }

    pub fn pending_requests(&self) -> usize {
        self.idle_requests.len()
    }

    pub fn has_pending_work(&self) -> bool {
        !self.idle_requests.is_empty()
    }

    /// Run one idle slot for element `id`, re-queueing its request if the run suspends.
    pub fn run_idle(
        &mut self,
        id: ElementId,
        deadline: &dyn IdleDeadline,
    ) -> RidgelineResult<TaskPoll> {
        let viewport = self.viewport;
        let element = self.elements.get_mut(id.0).ok_or_else(|| unknown_element(id))?;
        let poll = element.resume(&viewport, deadline);
        if let TaskPoll::Pending(options) = poll {
            self.idle_requests.push_back(IdleRequest {
                element: id,
                options,
            });
        }
        Ok(poll)
    }

    /// Bring every element up to date with the current viewport, ignoring time budgets.
    pub fn update_all_now(&mut self) {
        for element in &mut self.elements {
            element.update_now(&self.viewport);
        }
    }
}

fn unknown_element(id: ElementId) -> RidgelineError {
    RidgelineError::scene(format!("no element {id} in this backdrop"))
}

#[cfg(test)]
#[path = "../../tests/unit/backdrop/scrolling.rs"]
mod tests;
