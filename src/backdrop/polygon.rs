use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::backdrop::element::MAX_STALLED_STEPS;
use crate::backdrop::options::{ElementOptions, require_elevation_span};
use crate::backdrop::strategy::random_elevation;
use crate::drawable::sink::{Drawable, DrawableKind};
use crate::foundation::core::{Vector2, Viewport};
use crate::foundation::error::{RidgelineError, RidgelineResult};

/// Growth-only mountain polygon.
///
/// A simpler fallback for hosts that can only draw point lists. Diagonal ridge points are appended
/// as the viewport moves right and never removed, so memory grows with distance scrolled. Prefer
/// [`crate::BackdropElement`] wherever a path drawable is available.
///
/// Point layout: `[lower-right, lower-left, ridge...]`. The lower-right corner follows
/// `render_max` so the shape closes along the base elevation.
#[derive(Debug)]
pub struct GrowthPolygon<D> {
    drawable: D,
    rng: StdRng,
    elevation_min: f64,
    elevation_max: f64,
    last_elevation: Option<f64>,
    render_max: f64,
    points: Vec<Vector2>,
}

impl<D: Drawable> GrowthPolygon<D> {
    /// Bind to a polygon drawable. Uses the elevation, base and seed fields of `options`.
    pub fn new(drawable: D, options: &ElementOptions, region: &Viewport) -> RidgelineResult<Self> {
        let kind = drawable.kind();
        if kind != DrawableKind::Polygon {
            return Err(RidgelineError::drawable(format!(
                "growth polygons draw into a polygon, got a {kind} drawable"
            )));
        }
        options.validate()?;

        let elevation_min = options.elevation_min.unwrap_or(region.bottom());
        let elevation_max = options.elevation_max.unwrap_or(region.top());
        require_elevation_span(elevation_min, elevation_max)?;

        let base = options.elevation_base.unwrap_or(region.bottom());
        let left = region.left();
        Ok(Self {
            drawable,
            rng: match options.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            },
            elevation_min,
            elevation_max,
            last_elevation: None,
            render_max: left,
            points: vec![Vector2::new(left, base), Vector2::new(left, base)],
        })
    }

    pub fn drawable(&self) -> &D {
        &self.drawable
    }

    pub fn points(&self) -> &[Vector2] {
        &self.points
    }

    pub fn render_max(&self) -> f64 {
        self.render_max
    }

    /// Extend the ridge past `viewport.right()` and write the point list.
    pub fn update(&mut self, viewport: &Viewport) {
        let target = viewport.right();
        let mut stalled = 0usize;
        while self.render_max < target {
            let elevation = random_elevation(&mut self.rng, self.elevation_min, self.elevation_max);
            if let Some(last) = self.last_elevation {
                let advance = (elevation - last).abs();
                if advance <= 0.0 {
                    stalled += 1;
                    if stalled >= MAX_STALLED_STEPS {
                        tracing::error!(
                            render_max = self.render_max,
                            target,
                            "polygon ridge is not advancing; abandoning update"
                        );
                        break;
                    }
                    continue;
                }
                stalled = 0;
                self.render_max += advance;
            }
            self.last_elevation = Some(elevation);
            self.points.push(Vector2::new(self.render_max, elevation));
        }

        self.points[0] = self.points[0].with_x(self.render_max);
        self.drawable.set_points(&self.points);
    }
}
