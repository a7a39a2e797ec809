use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::backdrop::options::ElementOptions;
use crate::backdrop::strategy::StrategyKind;
use crate::drawable::sink::DrawableKind;
use crate::foundation::core::Viewport;
use crate::foundation::error::{RidgelineError, RidgelineResult};

/// Shape a layer draws into.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    /// A windowed [`crate::BackdropElement`].
    #[default]
    Path,
    /// A growth-only [`crate::GrowthPolygon`].
    Polygon,
}

impl From<LayerKind> for DrawableKind {
    fn from(kind: LayerKind) -> Self {
        match kind {
            LayerKind::Path => DrawableKind::Path,
            LayerKind::Polygon => DrawableKind::Polygon,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LayerConfig {
    pub id: String,
    #[serde(default)]
    pub kind: LayerKind,
    /// Ignored by polygon layers, which always grow diagonally.
    #[serde(default)]
    pub strategy: StrategyKind,
    #[serde(default = "default_fill")]
    pub fill: String,
    #[serde(default)]
    pub options: ElementOptions,
}

fn default_fill() -> String {
    "black".to_owned()
}

/// A scene: one surface, its viewport, its scroll speed, and the layers drawn on it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SceneConfig {
    pub view_box: Viewport,
    /// Scroll speed in viewport units per millisecond.
    #[serde(default)]
    pub speed: f64,
    /// Base seed; layers without their own seed get `seed + layer index`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub layers: Vec<LayerConfig>,
}

impl SceneConfig {
    pub fn from_reader<R: std::io::Read>(r: R) -> RidgelineResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| RidgelineError::serde(format!("parse scene JSON: {e}")))
    }

    pub fn from_path(path: impl AsRef<Path>) -> RidgelineResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            RidgelineError::scene(format!("open scene JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn validate(&self) -> RidgelineResult<()> {
        let vb = &self.view_box;
        Viewport::new(vb.x, vb.y, vb.width, vb.height)?;
        if !self.speed.is_finite() || self.speed < 0.0 {
            return Err(RidgelineError::validation("speed must be finite and >= 0"));
        }
        if self.layers.is_empty() {
            return Err(RidgelineError::validation("scene must have at least one layer"));
        }
        for (i, layer) in self.layers.iter().enumerate() {
            if layer.id.trim().is_empty() {
                return Err(RidgelineError::validation(format!(
                    "layer {i} has an empty id"
                )));
            }
            if self.layers[..i].iter().any(|l| l.id == layer.id) {
                return Err(RidgelineError::validation(format!(
                    "duplicate layer id '{}'",
                    layer.id
                )));
            }
            layer.options.validate().map_err(|e| {
                RidgelineError::validation(format!("layer '{}': {e}", layer.id))
            })?;
        }
        Ok(())
    }

    /// Options for layer `index`, with the scene seed filled in when the layer has none.
    pub fn layer_options(&self, index: usize) -> Option<ElementOptions> {
        let layer = self.layers.get(index)?;
        let mut options = layer.options.clone();
        if options.seed.is_none() {
            options.seed = self.seed.map(|s| s.wrapping_add(index as u64));
        }
        Some(options)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/config.rs"]
mod tests;
