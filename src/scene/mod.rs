pub(crate) mod config;

use crate::backdrop::context::{BackdropContext, SurfaceId};
use crate::backdrop::element::ElementId;
use crate::backdrop::polygon::GrowthPolygon;
use crate::backdrop::scrolling::ScrollingBackdrop;
use crate::backdrop::strategy::{Strategy, StrategyKind};
use crate::drawable::svg::{ShapeHandle, SvgDocument};
use crate::foundation::core::Viewport;
use crate::foundation::error::{RidgelineError, RidgelineResult};
use crate::schedule::clock::{FrameScheduler, IdleScheduler};
use crate::schedule::runtime::{RunStats, Runtime};

pub use config::{LayerConfig, LayerKind, SceneConfig};

#[derive(Debug)]
enum SceneLayer {
    Path {
        id: String,
        element: ElementId,
    },
    Polygon {
        id: String,
        shape: GrowthPolygon<ShapeHandle>,
    },
}

/// Per-layer state reported by `ridgeline inspect`.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerSummary {
    pub id: String,
    pub kind: LayerKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<StrategyKind>,
    /// Buffered segments for path layers, ridge points for polygon layers.
    pub len: usize,
    pub render_min: f64,
    pub render_max: f64,
}

/// A [`SceneConfig`] wired into an SVG document and a backdrop.
#[derive(Debug)]
pub struct Scene {
    view_box: Viewport,
    speed: f64,
    surface: SurfaceId,
    document: SvgDocument,
    context: BackdropContext<ShapeHandle>,
    layers: Vec<SceneLayer>,
}

impl Scene {
    #[tracing::instrument(level = "debug", skip_all, fields(layers = config.layers.len()))]
    pub fn build(config: &SceneConfig) -> RidgelineResult<Self> {
        config.validate()?;
        let view_box = config.view_box;
        let surface = SurfaceId(0);
        let mut document = SvgDocument::new();
        let mut context = BackdropContext::new();
        context.backdrop_for(surface, view_box);

        let mut layers = Vec::with_capacity(config.layers.len());
        for (index, layer) in config.layers.iter().enumerate() {
            let options = config
                .layer_options(index)
                .ok_or_else(|| RidgelineError::scene(format!("missing layer {index}")))?;
            let handle = document.add_shape(layer.id.clone(), layer.kind.into(), &layer.fill)?;
            let built = match layer.kind {
                LayerKind::Path => SceneLayer::Path {
                    id: layer.id.clone(),
                    element: context.add_element(
                        surface,
                        view_box,
                        handle,
                        Strategy::from_kind(layer.strategy),
                        options,
                    )?,
                },
                LayerKind::Polygon => SceneLayer::Polygon {
                    id: layer.id.clone(),
                    shape: GrowthPolygon::new(handle, &options, &view_box)?,
                },
            };
            layers.push(built);
        }

        Ok(Self {
            view_box,
            speed: config.speed,
            surface,
            document,
            context,
            layers,
        })
    }

    pub fn document(&self) -> &SvgDocument {
        &self.document
    }

    pub fn surface(&self) -> SurfaceId {
        self.surface
    }

    pub fn backdrop(&self) -> Option<&ScrollingBackdrop<ShapeHandle>> {
        self.context.get(self.surface)
    }

    pub fn backdrop_mut(&mut self) -> &mut ScrollingBackdrop<ShapeHandle> {
        self.context.backdrop_for(self.surface, self.view_box)
    }

    /// Current viewport of the scene's surface.
    pub fn viewport(&self) -> Viewport {
        self.backdrop().map_or(self.view_box, |b| *b.viewport())
    }

    /// Start scrolling at the configured speed.
    pub fn play(&mut self) -> RidgelineResult<bool> {
        self.context.play(self.surface, self.speed)
    }

    pub fn stop(&mut self) -> RidgelineResult<()> {
        self.context.stop(self.surface)
    }

    /// Drive the scene until its frame loop ends, keeping polygon layers in step every frame.
    pub fn run<F: FrameScheduler, I: IdleScheduler>(
        &mut self,
        runtime: &mut Runtime<F, I>,
    ) -> RidgelineResult<RunStats> {
        let Self {
            context,
            layers,
            surface,
            view_box,
            ..
        } = self;
        let backdrop = context.backdrop_for(*surface, *view_box);
        update_polygons(layers, backdrop.viewport());
        let stats = runtime.run_with(backdrop, |b| update_polygons(layers, b.viewport()))?;
        update_polygons(layers, backdrop.viewport());
        Ok(stats)
    }

    /// Finish all pending catch-up work without scrolling.
    pub fn settle<F: FrameScheduler, I: IdleScheduler>(
        &mut self,
        runtime: &mut Runtime<F, I>,
    ) -> RidgelineResult<u64> {
        let Self {
            context,
            layers,
            surface,
            view_box,
            ..
        } = self;
        let backdrop = context.backdrop_for(*surface, *view_box);
        let slots = runtime.drain_idle(backdrop)?;
        update_polygons(layers, backdrop.viewport());
        Ok(slots)
    }

    pub fn layer_summaries(&self) -> Vec<LayerSummary> {
        let backdrop = self.backdrop();
        self.layers
            .iter()
            .filter_map(|layer| match layer {
                SceneLayer::Path { id, element } => {
                    let el = backdrop?.element(*element)?;
                    Some(LayerSummary {
                        id: id.clone(),
                        kind: LayerKind::Path,
                        strategy: Some(el.strategy().kind()),
                        len: el.segments().len(),
                        render_min: el.render_min(),
                        render_max: el.render_max(),
                    })
                }
                SceneLayer::Polygon { id, shape } => Some(LayerSummary {
                    id: id.clone(),
                    kind: LayerKind::Polygon,
                    strategy: None,
                    len: shape.points().len().saturating_sub(2),
                    render_min: shape.points().get(1).map_or(0.0, |p| p.x),
                    render_max: shape.render_max(),
                }),
            })
            .collect()
    }

    /// The document as SVG, viewed through the current viewport.
    pub fn to_svg_string(&self) -> String {
        self.document.to_svg_string(&self.viewport())
    }
}

fn update_polygons(layers: &mut [SceneLayer], viewport: &Viewport) {
    for layer in layers {
        if let SceneLayer::Polygon { shape, .. } = layer {
            shape.update(viewport);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/scene.rs"]
mod tests;
