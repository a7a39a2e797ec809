use crate::foundation::core::Vector2;

/// One drawing command in a generated path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    /// `L x y`
    LineTo(Vector2),
    /// `C x1 y1 x2 y2 x y`
    CurveTo {
        control1: Vector2,
        control2: Vector2,
        endpoint: Vector2,
    },
}

impl PathCommand {
    pub fn endpoint(&self) -> Vector2 {
        match *self {
            Self::LineTo(p) => p,
            Self::CurveTo { endpoint, .. } => endpoint,
        }
    }
}

impl std::fmt::Display for PathCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LineTo(p) => write!(f, "L {} {}", p.x, p.y),
            Self::CurveTo {
                control1: c1,
                control2: c2,
                endpoint: p,
            } => write!(f, "C {} {} {} {} {} {}", c1.x, c1.y, c2.x, c2.y, p.x, p.y),
        }
    }
}

/// Buffer entry: a drawing command and the cursor position after it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentRecord {
    pub command: PathCommand,
    pub endpoint: Vector2,
}

impl SegmentRecord {
    pub fn new(command: PathCommand, endpoint: Vector2) -> Self {
        Self { command, endpoint }
    }
}
