use crate::foundation::core::Vector2;

/// Centripetal parameterization.
pub const CENTRIPETAL_ALPHA: f64 = 0.5;

/// One cubic Bezier segment produced by [`SplineFitter::add_point`].
///
/// The segment starts at the fitter's cursor before the call; it is drawn as
/// `C control1 control2 endpoint`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BezierStep {
    pub control1: Vector2,
    pub control2: Vector2,
    pub endpoint: Vector2,
}

/// Convert four Catmull-Rom points to the cubic Bezier spanning `p1..p2`.
///
/// Returns `[p1, b1, b2, p2]`. Uses the non-uniform formulation from Yuksel et al., "On the
/// parameterization of Catmull-Rom curves", eq. (2). `alpha` 0 is uniform, 0.5 centripetal,
/// 1 chordal.
///
/// Coincident neighbours make the closed form divide by zero. Those cases take the analytic
/// limit instead: the control point collapses onto its segment endpoint.
pub fn catmull_rom_to_cubic(points: [Vector2; 4], alpha: f64) -> [Vector2; 4] {
    let [p0, p1, p2, p3] = points;
    let d1 = p0.distance_to(p1).powf(alpha);
    let d2 = p1.distance_to(p2).powf(alpha);
    let d3 = p2.distance_to(p3).powf(alpha);
    let (d1s, d2s, d3s) = (d1 * d1, d2 * d2, d3 * d3);

    let b1 = if d1 == 0.0 || d2 == 0.0 {
        tracing::debug!(%p0, %p1, %p2, "coincident spline points, clamping first control point");
        p1
    } else {
        (p2 * d1s - p0 * d2s + p1 * (2.0 * d1s + 3.0 * d1 * d2 + d2s)) / (3.0 * d1 * (d1 + d2))
    };
    let b2 = if d3 == 0.0 || d2 == 0.0 {
        tracing::debug!(%p1, %p2, %p3, "coincident spline points, clamping second control point");
        p2
    } else {
        (p1 * d3s - p3 * d2s + p2 * (2.0 * d3s + 3.0 * d3 * d2 + d2s)) / (3.0 * d3 * (d3 + d2))
    };

    [p1, b1, b2, p2]
}

/// Sliding three-point window that turns a stream of points into smooth cubic segments.
///
/// Each [`SplineFitter::add_point`] needs four points, so the fitter holds three between calls
/// and always emits the segment one point behind the newest input.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplineFitter {
    previous: Vector2,
    cursor: Vector2,
    next_endpoint: Vector2,
}

impl Default for SplineFitter {
    fn default() -> Self {
        Self {
            previous: Vector2::INVALID,
            cursor: Vector2::INVALID,
            next_endpoint: Vector2::INVALID,
        }
    }
}

impl SplineFitter {
    /// Start drawing at `origin` toward `first_endpoint`. Without `previous` the lead-in has
    /// zero length.
    pub fn new(origin: Vector2, first_endpoint: Vector2, previous: Option<Vector2>) -> Self {
        Self {
            previous: previous.unwrap_or(origin),
            cursor: origin,
            next_endpoint: first_endpoint,
        }
    }

    pub fn previous(&self) -> Vector2 {
        self.previous
    }

    pub fn cursor(&self) -> Vector2 {
        self.cursor
    }

    pub fn next_endpoint(&self) -> Vector2 {
        self.next_endpoint
    }

    /// False for a default-constructed fitter that has never been seeded.
    pub fn is_seeded(&self) -> bool {
        !(self.previous.is_invalid() || self.cursor.is_invalid() || self.next_endpoint.is_invalid())
    }

    /// Push `new_point` and return the curve from the current cursor to the current
    /// `next_endpoint`. `new_point` becomes the endpoint returned by the *following* call.
    pub fn add_point(&mut self, new_point: Vector2) -> BezierStep {
        let [_, control1, control2, endpoint] = catmull_rom_to_cubic(
            [self.previous, self.cursor, self.next_endpoint, new_point],
            CENTRIPETAL_ALPHA,
        );

        self.previous = self.cursor;
        self.cursor = self.next_endpoint;
        self.next_endpoint = new_point;

        BezierStep {
            control1,
            control2,
            endpoint,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/spline/catmull_rom.rs"]
mod tests;
