use crate::foundation::core::Vector2;
use crate::foundation::error::{RidgelineError, RidgelineResult};
use crate::spline::catmull_rom::SplineFitter;

/// Construction options for a [`crate::BackdropElement`].
///
/// Every field is optional; unset values default from the viewport the element is created
/// against (see [`crate::BackdropElement::new`]).
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ElementOptions {
    /// Lowest (most positive) elevation. Defaults to the viewport bottom.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation_min: Option<f64>,
    /// Highest (most negative) elevation. Defaults to the viewport top.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation_max: Option<f64>,
    /// y of the flat closing edge. Defaults to the viewport bottom.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation_base: Option<f64>,
    /// Where the path starts. Defaults to a random elevation at the viewport's left edge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor_start: Option<Vector2>,
    /// Horizontal spacing for fixed-spacing strategies. Defaults to 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point_distance: Option<f64>,
    /// Pre-seeded spline window for smoothed strategies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spline: Option<SplineFitter>,
    /// RNG seed. Unseeded elements draw from OS entropy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

pub const DEFAULT_POINT_DISTANCE: f64 = 1.0;

impl ElementOptions {
    pub fn validate(&self) -> RidgelineResult<()> {
        let scalars = [
            ("elevationMin", self.elevation_min),
            ("elevationMax", self.elevation_max),
            ("elevationBase", self.elevation_base),
            ("pointDistance", self.point_distance),
        ];
        for (name, value) in scalars {
            if value.is_some_and(|v| !v.is_finite()) {
                return Err(RidgelineError::validation(format!(
                    "{name} must be finite"
                )));
            }
        }
        if self.point_distance.is_some_and(|d| d <= 0.0) {
            return Err(RidgelineError::validation("pointDistance must be > 0"));
        }
        if self.cursor_start.is_some_and(|c| !c.is_finite()) {
            return Err(RidgelineError::validation("cursorStart must be finite"));
        }
        Ok(())
    }
}

/// Diagonal growth advances x by the elevation change, so a flat range can never move right.
pub(crate) fn require_elevation_span(min: f64, max: f64) -> RidgelineResult<()> {
    if min == max {
        return Err(RidgelineError::validation(format!(
            "elevationMin and elevationMax must differ for diagonal growth (both are {min})"
        )));
    }
    Ok(())
}
