//! Ridgeline generates endless terrain silhouettes as scrolling vector paths.
//!
//! A [`ScrollingBackdrop`] owns a viewport that scrolls right at a fixed speed. Each
//! [`BackdropElement`] keeps a window of path segments covering that viewport: when the viewport
//! outruns the element, a catch-up run grows the window on the right, drops what scrolled off on
//! the left, and writes the full path to a [`Drawable`]. Catch-up runs are cooperative and
//! resume across idle slots handed out by an [`IdleScheduler`].
//!
//! - Build elements with a [`Strategy`] and [`ElementOptions`]
//! - Drive frames and idle slots with a [`Runtime`] (or call [`ScrollingBackdrop::on_frame`] and
//!   [`ScrollingBackdrop::run_idle`] from your own loop)
//! - Load whole scenes from JSON with [`SceneConfig`] and [`Scene`]
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod backdrop;
pub(crate) mod drawable;
pub(crate) mod schedule;
/// JSON scene descriptions wired into a document and a backdrop.
pub mod scene;
pub(crate) mod spline;

pub use crate::foundation::core::{BezPath, Point, Rect, Vec2, Vector2, Viewport};
pub use crate::foundation::error::{RidgelineError, RidgelineResult};

pub use crate::backdrop::command::{PathCommand, SegmentRecord};
pub use crate::backdrop::context::{BackdropContext, SurfaceId};
pub use crate::backdrop::element::{
    BackdropElement, CatchUp, ElementId, INITIAL_FILL_TIMEOUT_MS, RENDER_MIN_EPSILON,
    TIMEOUT_RESUME_MS, TaskPoll,
};
pub use crate::backdrop::options::{DEFAULT_POINT_DISTANCE, ElementOptions};
pub use crate::backdrop::polygon::GrowthPolygon;
pub use crate::backdrop::scrolling::{FrameOutcome, IdleRequest, ScrollingBackdrop};
pub use crate::backdrop::strategy::{
    AdvanceRule, GenerationContext, SegmentStrategy, Strategy, StrategyKind,
};
pub use crate::drawable::sink::{Drawable, DrawableKind, RecordingDrawable};
pub use crate::drawable::svg::{ShapeHandle, SvgDocument};
pub use crate::scene::{LayerConfig, LayerKind, LayerSummary, Scene, SceneConfig};
pub use crate::schedule::clock::{FrameScheduler, IdleScheduler, RealtimeClock, VirtualClock};
pub use crate::schedule::deadline::{
    IdleDeadline, IdleRequestOptions, InstantDeadline, StepBudgetDeadline,
};
pub use crate::schedule::runtime::{RunStats, Runtime};
pub use crate::spline::catmull_rom::{
    BezierStep, CENTRIPETAL_ALPHA, SplineFitter, catmull_rom_to_cubic,
};
