use crate::foundation::error::{RidgelineError, RidgelineResult};

pub use kurbo::{BezPath, Point, Rect, Vec2};

/// A 2D point on the infinite horizontal canvas.
///
/// Arithmetic returns new values. The only in-place mutation is [`Vector2::update_from`], which
/// lets a generation step reuse one cursor instead of allocating a fresh point per step.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Sentinel for "not yet initialized". Compare with [`Vector2::is_invalid`], never `==`.
    pub const INVALID: Self = Self {
        x: f64::NAN,
        y: f64::NAN,
    };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Parse an `x,y` ordered pair.
    pub fn parse(ordered_pair: &str) -> RidgelineResult<Self> {
        let (x, y) = ordered_pair.split_once(',').ok_or_else(|| {
            RidgelineError::validation(format!("expected 'x,y' pair, got '{ordered_pair}'"))
        })?;
        let parse = |s: &str| {
            s.trim().parse::<f64>().map_err(|e| {
                RidgelineError::validation(format!("bad coordinate '{s}' in '{ordered_pair}': {e}"))
            })
        };
        Ok(Self::new(parse(x)?, parse(y)?))
    }

    pub fn plus(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }

    pub fn minus(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }

    pub fn scale(self, k: f64) -> Self {
        Self::new(self.x * k, self.y * k)
    }

    pub fn divide(self, k: f64) -> Self {
        Self::new(self.x / k, self.y / k)
    }

    pub fn with_x(self, x: f64) -> Self {
        Self::new(x, self.y)
    }

    pub fn with_y(self, y: f64) -> Self {
        Self::new(self.x, y)
    }

    pub fn squared_magnitude(self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    pub fn magnitude(self) -> f64 {
        self.squared_magnitude().sqrt()
    }

    pub fn squared_distance_to(self, other: Self) -> f64 {
        self.minus(other).squared_magnitude()
    }

    pub fn distance_to(self, other: Self) -> f64 {
        self.minus(other).magnitude()
    }

    /// Exact coordinate equality. NaN never equals anything, including itself.
    pub fn equals(self, other: Self) -> bool {
        self.x == other.x && self.y == other.y
    }

    pub fn approx_equals(self, other: Self, epsilon: f64) -> bool {
        (self.x - other.x).abs() <= epsilon && (self.y - other.y).abs() <= epsilon
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// True when either coordinate is NaN (covers [`Vector2::INVALID`]).
    pub fn is_invalid(self) -> bool {
        self.x.is_nan() || self.y.is_nan()
    }

    /// Copy `other` into `self` in place.
    pub fn update_from(&mut self, other: Self) {
        self.x = other.x;
        self.y = other.y;
    }
}

impl std::fmt::Display for Vector2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl std::ops::Add for Vector2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.plus(rhs)
    }
}

impl std::ops::Sub for Vector2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.minus(rhs)
    }
}

impl std::ops::Mul<f64> for Vector2 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        self.scale(rhs)
    }
}

impl std::ops::Div<f64> for Vector2 {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        self.divide(rhs)
    }
}

impl From<Point> for Vector2 {
    fn from(p: Point) -> Self {
        Self::new(p.x, p.y)
    }
}

impl From<Vector2> for Point {
    fn from(v: Vector2) -> Self {
        Point::new(v.x, v.y)
    }
}

impl From<Vec2> for Vector2 {
    fn from(v: Vec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Vector2> for Vec2 {
    fn from(v: Vector2) -> Self {
        Vec2::new(v.x, v.y)
    }
}

/// The visible window onto the infinite horizontal canvas.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> RidgelineResult<Self> {
        if !(x.is_finite() && y.is_finite() && width.is_finite() && height.is_finite()) {
            return Err(RidgelineError::validation("Viewport values must be finite"));
        }
        if width <= 0.0 || height <= 0.0 {
            return Err(RidgelineError::validation(
                "Viewport width and height must be > 0",
            ));
        }
        Ok(Self {
            x,
            y,
            width,
            height,
        })
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn to_rect(&self) -> Rect {
        Rect::new(self.left(), self.top(), self.right(), self.bottom())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
