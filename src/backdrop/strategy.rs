use rand::Rng;
use rand::rngs::StdRng;

use crate::backdrop::command::PathCommand;
use crate::foundation::core::Vector2;
use crate::spline::catmull_rom::SplineFitter;

/// Per-element inputs a strategy draws on for one step.
pub struct GenerationContext<'a> {
    pub rng: &'a mut StdRng,
    /// Lowest (most positive) intended elevation.
    pub elevation_min: f64,
    /// Highest (most negative) intended elevation.
    pub elevation_max: f64,
    /// Horizontal spacing for fixed-spacing strategies.
    pub point_distance: f64,
}

impl GenerationContext<'_> {
    /// Uniform elevation between `elevation_min` and `elevation_max`, in either order.
    pub fn random_elevation(&mut self) -> f64 {
        random_elevation(self.rng, self.elevation_min, self.elevation_max)
    }
}

pub(crate) fn random_elevation(rng: &mut StdRng, min: f64, max: f64) -> f64 {
    rng.random::<f64>() * (max - min) + min
}

/// The single capability of a generation policy.
pub trait SegmentStrategy {
    /// Produce the next drawing command and move `cursor` to its endpoint.
    ///
    /// Implementations must eventually advance `cursor.x`; the element logs steps that don't.
    fn next_segment(&mut self, cursor: &mut Vector2, ctx: &mut GenerationContext<'_>)
    -> PathCommand;
}

/// Serializable strategy selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StrategyKind {
    /// Slope ±1 straight lines.
    DiagonalMountains,
    /// Slope ±1 raw points, spline-smoothed.
    DiagonalHills,
    /// Fixed spacing, random elevation, straight lines.
    #[default]
    RandomMountains,
    /// Fixed spacing, random elevation, spline-smoothed.
    RandomHills,
}

/// How far the next raw point sits to the right of the last one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdvanceRule {
    /// x-advance equals the elevation change, so every slope is ±1.
    Diagonal,
    /// x-advance is always `point_distance`.
    FixedSpacing,
}

impl AdvanceRule {
    fn raw_point(self, from: Vector2, ctx: &mut GenerationContext<'_>) -> Vector2 {
        let elevation = ctx.random_elevation();
        let advance = match self {
            Self::Diagonal => (elevation - from.y).abs(),
            Self::FixedSpacing => ctx.point_distance,
        };
        Vector2::new(from.x + advance, elevation)
    }
}

/// Generation policy for a [`crate::BackdropElement`], chosen at construction.
#[derive(Clone, Debug, PartialEq)]
pub enum Strategy {
    DiagonalMountains,
    RandomMountains,
    /// `spline` is seeded from the cursor on first use when not supplied.
    DiagonalHills { spline: Option<SplineFitter> },
    RandomHills { spline: Option<SplineFitter> },
}

impl Strategy {
    pub fn from_kind(kind: StrategyKind) -> Self {
        match kind {
            StrategyKind::DiagonalMountains => Self::DiagonalMountains,
            StrategyKind::RandomMountains => Self::RandomMountains,
            StrategyKind::DiagonalHills => Self::DiagonalHills { spline: None },
            StrategyKind::RandomHills => Self::RandomHills { spline: None },
        }
    }

    pub fn kind(&self) -> StrategyKind {
        match self {
            Self::DiagonalMountains => StrategyKind::DiagonalMountains,
            Self::RandomMountains => StrategyKind::RandomMountains,
            Self::DiagonalHills { .. } => StrategyKind::DiagonalHills,
            Self::RandomHills { .. } => StrategyKind::RandomHills,
        }
    }

    pub fn advance_rule(&self) -> AdvanceRule {
        match self {
            Self::DiagonalMountains | Self::DiagonalHills { .. } => AdvanceRule::Diagonal,
            Self::RandomMountains | Self::RandomHills { .. } => AdvanceRule::FixedSpacing,
        }
    }

    pub fn is_smoothed(&self) -> bool {
        matches!(self, Self::DiagonalHills { .. } | Self::RandomHills { .. })
    }

    /// Replace the spline state of a smoothed strategy. Straight-line strategies ignore it.
    pub fn with_spline(mut self, fitter: SplineFitter) -> Self {
        let kind = self.kind();
        match self.spline_slot() {
            Some(slot) => *slot = Some(fitter),
            None => tracing::debug!(?kind, "spline option ignored"),
        }
        self
    }

    /// Current spline window, if this strategy smooths and has been seeded.
    pub fn spline(&self) -> Option<&SplineFitter> {
        match self {
            Self::DiagonalHills { spline } | Self::RandomHills { spline } => spline.as_ref(),
            Self::DiagonalMountains | Self::RandomMountains => None,
        }
    }

    fn spline_slot(&mut self) -> Option<&mut Option<SplineFitter>> {
        match self {
            Self::DiagonalHills { spline } | Self::RandomHills { spline } => Some(spline),
            Self::DiagonalMountains | Self::RandomMountains => None,
        }
    }
}

impl SegmentStrategy for Strategy {
    fn next_segment(
        &mut self,
        cursor: &mut Vector2,
        ctx: &mut GenerationContext<'_>,
    ) -> PathCommand {
        let rule = self.advance_rule();
        let Some(slot) = self.spline_slot() else {
            let p = rule.raw_point(*cursor, ctx);
            cursor.update_from(p);
            return PathCommand::LineTo(p);
        };

        // The fitter emits one point behind its newest input, so raw points continue from
        // `next_endpoint` while the drawn segment starts at the cursor.
        let seeded = match slot.take() {
            Some(fitter) if fitter.is_seeded() => fitter,
            _ => {
                let first = rule.raw_point(*cursor, ctx);
                SplineFitter::new(*cursor, first, None)
            }
        };
        let fitter = slot.insert(seeded);
        let raw = rule.raw_point(fitter.next_endpoint(), ctx);
        let step = fitter.add_point(raw);
        cursor.update_from(step.endpoint);
        PathCommand::CurveTo {
            control1: step.control1,
            control2: step.control2,
            endpoint: step.endpoint,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/backdrop/strategy.rs"]
mod tests;
