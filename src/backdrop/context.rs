use std::collections::BTreeMap;

use crate::backdrop::element::ElementId;
use crate::backdrop::options::ElementOptions;
use crate::backdrop::scrolling::ScrollingBackdrop;
use crate::backdrop::strategy::Strategy;
use crate::drawable::sink::Drawable;
use crate::foundation::core::Viewport;
use crate::foundation::error::{RidgelineError, RidgelineResult};

/// Identity of a rendering surface (one SVG root, one canvas, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SurfaceId(pub u32);

impl std::fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "surface:{}", self.0)
    }
}

/// Registry of scroll coordinators, one per surface.
///
/// Elements added for the same surface share one [`ScrollingBackdrop`], so they scroll together.
#[derive(Debug)]
pub struct BackdropContext<D> {
    backdrops: BTreeMap<SurfaceId, ScrollingBackdrop<D>>,
}

impl<D> Default for BackdropContext<D> {
    fn default() -> Self {
        Self {
            backdrops: BTreeMap::new(),
        }
    }
}

impl<D: Drawable> BackdropContext<D> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The backdrop for `surface`, created with `viewport` on first use.
    ///
    /// `viewport` is ignored when the surface already has a backdrop.
    pub fn backdrop_for(
        &mut self,
        surface: SurfaceId,
        viewport: Viewport,
    ) -> &mut ScrollingBackdrop<D> {
        self.backdrops.entry(surface).or_insert_with(|| {
            tracing::debug!(%surface, ?viewport, "backdrop created");
            ScrollingBackdrop::new(surface, viewport)
        })
    }

    pub fn get(&self, surface: SurfaceId) -> Option<&ScrollingBackdrop<D>> {
        self.backdrops.get(&surface)
    }

    pub fn get_mut(&mut self, surface: SurfaceId) -> Option<&mut ScrollingBackdrop<D>> {
        self.backdrops.get_mut(&surface)
    }

    pub fn surfaces(&self) -> impl Iterator<Item = SurfaceId> + '_ {
        self.backdrops.keys().copied()
    }

    /// Register an element on `surface`, creating its backdrop if needed.
    pub fn add_element(
        &mut self,
        surface: SurfaceId,
        viewport: Viewport,
        drawable: D,
        strategy: Strategy,
        options: ElementOptions,
    ) -> RidgelineResult<ElementId> {
        self.backdrop_for(surface, viewport)
            .add_element(drawable, strategy, options)
    }

    pub fn play(&mut self, surface: SurfaceId, speed: f64) -> RidgelineResult<bool> {
        Ok(self.require(surface)?.play(speed))
    }

    pub fn stop(&mut self, surface: SurfaceId) -> RidgelineResult<()> {
        self.require(surface)?.stop();
        Ok(())
    }

    fn require(&mut self, surface: SurfaceId) -> RidgelineResult<&mut ScrollingBackdrop<D>> {
        self.backdrops
            .get_mut(&surface)
            .ok_or_else(|| RidgelineError::scene(format!("no backdrop for {surface}")))
    }
}
