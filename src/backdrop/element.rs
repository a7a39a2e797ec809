use std::collections::VecDeque;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::backdrop::command::{PathCommand, SegmentRecord};
use crate::backdrop::options::{DEFAULT_POINT_DISTANCE, ElementOptions, require_elevation_span};
use crate::backdrop::strategy::{
    AdvanceRule, GenerationContext, SegmentStrategy, Strategy, random_elevation,
};
use crate::drawable::sink::{Drawable, DrawableKind};
use crate::foundation::core::{BezPath, Point, Vector2, Viewport};
use crate::foundation::error::{RidgelineError, RidgelineResult};
use crate::schedule::deadline::{IdleDeadline, IdleRequestOptions};

/// Tolerance when checking the pruning look-ahead against the resulting `render_min`.
pub const RENDER_MIN_EPSILON: f64 = 1e-4;

/// Timeout for the initial fill, so first paint is never blocked indefinitely.
pub const INITIAL_FILL_TIMEOUT_MS: f64 = 100.0;

/// Timeout used for every resume after a slot that was itself forced by a timeout.
pub const TIMEOUT_RESUME_MS: f64 = 1.0;

/// Consecutive steps without x progress before a grow phase is abandoned.
pub(crate) const MAX_STALLED_STEPS: usize = 64;

/// Index of an element within its [`crate::ScrollingBackdrop`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(pub usize);

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Handle for the one catch-up run an element may have in flight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CatchUp {
    /// Viewport snapshot taken when the run first gets an idle slot; later slices grow and
    /// prune against the same snapshot.
    pub region: Option<Viewport>,
    /// Options for the idle slot the run is waiting on.
    pub request: IdleRequestOptions,
    /// Idle slots consumed so far.
    pub slices: u32,
}

/// Result of resuming a catch-up run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TaskPoll {
    /// Budget ran out mid-grow; schedule another idle slot with these options.
    Pending(IdleRequestOptions),
    /// Grow, prune and commit all finished (or nothing was queued).
    Ready,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum GrowOutcome {
    Complete,
    Suspended,
    Abandoned,
}

/// Procedurally drawn path in a scrolling backdrop.
///
/// Holds a window of path segments covering the viewport: catch-up runs append segments on the
/// right until `render_max` passes the viewport's right edge, then drop segments that have
/// scrolled off the left, then write the whole path to the drawable.
#[derive(Debug)]
pub struct BackdropElement<D> {
    drawable: D,
    strategy: Strategy,
    rng: StdRng,
    elevation_min: f64,
    elevation_max: f64,
    elevation_base: f64,
    point_distance: f64,
    cursor_start: Vector2,
    segments: VecDeque<SegmentRecord>,
    catch_up: Option<CatchUp>,
}

impl<D: Drawable> BackdropElement<D> {
    /// Bind a new element to `drawable`, taking defaults from `region`.
    ///
    /// Elevations default to the viewport's vertical extent (`bottom` as minimum and base, `top`
    /// as maximum). The start cursor defaults to the pre-seeded spline's cursor, if any, else a
    /// random elevation at `region.left()`. An explicit `cursor_start` must match a seeded
    /// spline's cursor, since the spline's first curve is fitted from that point.
    pub fn new(
        drawable: D,
        strategy: Strategy,
        options: ElementOptions,
        region: &Viewport,
    ) -> RidgelineResult<Self> {
        let kind = drawable.kind();
        if kind != DrawableKind::Path {
            return Err(RidgelineError::drawable(format!(
                "backdrop elements draw into a path, got a {kind} drawable"
            )));
        }
        options.validate()?;

        let mut rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let elevation_min = options.elevation_min.unwrap_or(region.bottom());
        let elevation_max = options.elevation_max.unwrap_or(region.top());
        let elevation_base = options.elevation_base.unwrap_or(region.bottom());
        if strategy.advance_rule() == AdvanceRule::Diagonal {
            require_elevation_span(elevation_min, elevation_max)?;
        }

        let seeded_cursor = options
            .spline
            .filter(|s| s.is_seeded())
            .map(|s| s.cursor());
        if let (Some(explicit), Some(seeded)) = (options.cursor_start, seeded_cursor) {
            if !explicit.equals(seeded) {
                return Err(RidgelineError::validation(format!(
                    "cursorStart {explicit} does not match the spline cursor {seeded}"
                )));
            }
        }
        let cursor_start = match options.cursor_start.or(seeded_cursor) {
            Some(c) => c,
            None => Vector2::new(
                region.left(),
                random_elevation(&mut rng, elevation_min, elevation_max),
            ),
        };
        let strategy = match options.spline {
            Some(spline) => strategy.with_spline(spline),
            None => strategy,
        };

        Ok(Self {
            drawable,
            strategy,
            rng,
            elevation_min,
            elevation_max,
            elevation_base,
            point_distance: options.point_distance.unwrap_or(DEFAULT_POINT_DISTANCE),
            cursor_start,
            segments: VecDeque::new(),
            catch_up: None,
        })
    }

    pub fn drawable(&self) -> &D {
        &self.drawable
    }

    pub fn drawable_mut(&mut self) -> &mut D {
        &mut self.drawable
    }

    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    pub fn elevation_min(&self) -> f64 {
        self.elevation_min
    }

    pub fn elevation_max(&self) -> f64 {
        self.elevation_max
    }

    pub fn elevation_base(&self) -> f64 {
        self.elevation_base
    }

    pub fn point_distance(&self) -> f64 {
        self.point_distance
    }

    pub fn cursor_start(&self) -> Vector2 {
        self.cursor_start
    }

    pub fn segments(&self) -> &VecDeque<SegmentRecord> {
        &self.segments
    }

    /// Leftmost rendered x.
    pub fn render_min(&self) -> f64 {
        self.cursor_start.x
    }

    /// Rightmost rendered x.
    pub fn render_max(&self) -> f64 {
        self.segments
            .back()
            .map_or(self.render_min(), |s| s.endpoint.x)
    }

    /// What `render_min` becomes if the first segment is removed.
    pub fn next_render_min(&self) -> Option<f64> {
        self.segments.front().map(|s| s.endpoint.x)
    }

    pub fn catch_up(&self) -> Option<&CatchUp> {
        self.catch_up.as_ref()
    }

    pub fn is_update_queued(&self) -> bool {
        self.catch_up.is_some()
    }

    /// Uniform random elevation in this element's range.
    pub fn random_elevation(&mut self) -> f64 {
        random_elevation(&mut self.rng, self.elevation_min, self.elevation_max)
    }

    /// Open a catch-up run.
    ///
    /// Returns the idle-slot options to schedule with, or `None` when a run is already in flight
    /// (the request is coalesced into it).
    pub fn queue_update(&mut self, options: IdleRequestOptions) -> Option<IdleRequestOptions> {
        if self.catch_up.is_some() {
            return None;
        }
        self.catch_up = Some(CatchUp {
            region: None,
            request: options,
            slices: 0,
        });
        Some(options)
    }

    /// Continue the in-flight catch-up inside one idle slot.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn resume(&mut self, viewport: &Viewport, deadline: &dyn IdleDeadline) -> TaskPoll {
        let Some(mut task) = self.catch_up else {
            tracing::debug!("resume without a queued catch-up");
            return TaskPoll::Ready;
        };
        task.slices += 1;
        let region = *task.region.get_or_insert(*viewport);

        if self.grow(region.right(), Some(deadline)) == GrowOutcome::Suspended {
            // A slot forced by timeout means the host is busy; keep forcing until done.
            task.request = if deadline.did_timeout() {
                IdleRequestOptions::with_timeout(TIMEOUT_RESUME_MS)
            } else {
                IdleRequestOptions::default()
            };
            tracing::debug!(
                slices = task.slices,
                render_max = self.render_max(),
                target = region.right(),
                timeout = ?task.request.timeout,
                "catch-up suspended"
            );
            self.catch_up = Some(task);
            return TaskPoll::Pending(task.request);
        }

        self.prune(region.left());
        self.commit();
        self.catch_up = None;
        TaskPoll::Ready
    }

    /// Run a full grow, prune and commit pass without any time budget.
    ///
    /// Does not touch a queued catch-up run.
    pub fn update_now(&mut self, region: &Viewport) {
        self.grow(region.right(), None);
        self.prune(region.left());
        self.commit();
    }

    fn grow(&mut self, target_right: f64, deadline: Option<&dyn IdleDeadline>) -> GrowOutcome {
        let mut cursor = self
            .segments
            .back()
            .map_or(self.cursor_start, |s| s.endpoint);
        let mut stalled = 0usize;

        while self.render_max() < target_right {
            let before = cursor;
            let mut ctx = GenerationContext {
                rng: &mut self.rng,
                elevation_min: self.elevation_min,
                elevation_max: self.elevation_max,
                point_distance: self.point_distance,
            };
            let command = self.strategy.next_segment(&mut cursor, &mut ctx);
            self.check_step(before, cursor, command);

            // Steps without x progress are neither recorded nor allowed to yield.
            if cursor.x <= before.x {
                cursor = before;
                stalled += 1;
                if stalled >= MAX_STALLED_STEPS {
                    tracing::error!(
                        strategy = ?self.strategy.kind(),
                        stalled,
                        render_max = self.render_max(),
                        target_right,
                        "strategy is not advancing; abandoning grow phase"
                    );
                    return GrowOutcome::Abandoned;
                }
                continue;
            }
            stalled = 0;
            self.segments.push_back(SegmentRecord::new(command, cursor));

            if let Some(deadline) = deadline {
                if deadline.time_remaining() <= 0.0 && self.render_max() < target_right {
                    return GrowOutcome::Suspended;
                }
            }
        }
        GrowOutcome::Complete
    }

    fn check_step(&self, before: Vector2, after: Vector2, command: PathCommand) {
        if after.equals(before) {
            tracing::warn!(
                strategy = ?self.strategy.kind(),
                cursor = %after,
                %command,
                "strategy returned a segment with zero displacement"
            );
        } else if after.x < before.x {
            tracing::warn!(
                strategy = ?self.strategy.kind(),
                from = %before,
                to = %after,
                "strategy moved the cursor left; segment endpoints are no longer ordered"
            );
        }
    }

    fn prune(&mut self, left: f64) {
        while let Some(next_render_min) = self.next_render_min() {
            if next_render_min.is_nan() || next_render_min >= left {
                break;
            }
            let Some(removed) = self.segments.pop_front() else {
                break;
            };
            self.cursor_start = removed.endpoint;

            let render_min = self.render_min();
            let drift = next_render_min - render_min;
            if !drift.is_finite() || drift.abs() > RENDER_MIN_EPSILON {
                tracing::warn!(
                    strategy = ?self.strategy.kind(),
                    next_render_min,
                    render_min,
                    removed = %removed.command,
                    remaining = self.segments.len(),
                    "look-ahead render_min disagrees with render_min after pruning"
                );
            }
        }
    }

    /// `M` to the start cursor.
    pub fn path_start(&self) -> String {
        format!("M {}", self.cursor_start)
    }

    /// Drop to the base elevation, run back to `render_min` and close.
    pub fn path_end(&self) -> String {
        format!("V {} H {} Z", self.elevation_base, self.render_min())
    }

    /// The full path description for the current buffer.
    pub fn path_data(&self) -> String {
        let body = self
            .segments
            .iter()
            .map(|s| s.command.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        format!("{} {} {}", self.path_start(), body, self.path_end())
    }

    /// Write [`BackdropElement::path_data`] to the drawable.
    pub fn commit(&mut self) {
        let d = self.path_data();
        self.drawable.set_path_data(&d);
    }

    /// The current path as a `kurbo` path, closed along the base elevation.
    pub fn to_bez_path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(Point::from(self.cursor_start));
        for segment in &self.segments {
            match segment.command {
                PathCommand::LineTo(p) => path.line_to(Point::from(p)),
                PathCommand::CurveTo {
                    control1,
                    control2,
                    endpoint,
                } => path.curve_to(
                    Point::from(control1),
                    Point::from(control2),
                    Point::from(endpoint),
                ),
            }
        }
        path.line_to((self.render_max(), self.elevation_base));
        path.line_to((self.render_min(), self.elevation_base));
        path.close_path();
        path
    }
}

#[cfg(test)]
#[path = "../../tests/unit/backdrop/element.rs"]
mod tests;
