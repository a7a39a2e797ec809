use crate::foundation::core::Vector2;

/// What kind of geometry a drawable accepts.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawableKind {
    /// Accepts a path description (`M ... Z`).
    Path,
    /// Accepts an ordered point list.
    Polygon,
    /// Anything else; elements refuse to bind to it.
    Other(String),
}

impl std::fmt::Display for DrawableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Path => f.write_str("path"),
            Self::Polygon => f.write_str("polygon"),
            Self::Other(name) => f.write_str(name),
        }
    }
}

/// Sink contract for generated geometry.
///
/// Elements write their full geometry on every commit; a drawable never sees partial updates.
/// Geometry of the wrong form for the drawable's [`DrawableKind`] is ignored by implementors.
pub trait Drawable {
    /// Geometry form this drawable accepts. Checked once, when an element binds to it.
    fn kind(&self) -> DrawableKind;
    /// Replace the path description.
    fn set_path_data(&mut self, d: &str);
    /// Replace the point list.
    fn set_points(&mut self, points: &[Vector2]);
}

/// In-memory drawable for tests and debugging. Keeps every geometry update it receives.
#[derive(Debug)]
pub struct RecordingDrawable {
    kind: DrawableKind,
    path_updates: Vec<String>,
    point_updates: Vec<Vec<Vector2>>,
}

impl RecordingDrawable {
    pub fn new(kind: DrawableKind) -> Self {
        Self {
            kind,
            path_updates: Vec::new(),
            point_updates: Vec::new(),
        }
    }

    pub fn path() -> Self {
        Self::new(DrawableKind::Path)
    }

    pub fn polygon() -> Self {
        Self::new(DrawableKind::Polygon)
    }

    /// Most recent path description, if any was written.
    pub fn path_data(&self) -> Option<&str> {
        self.path_updates.last().map(String::as_str)
    }

    /// Most recent point list, if any was written.
    pub fn points(&self) -> Option<&[Vector2]> {
        self.point_updates.last().map(Vec::as_slice)
    }

    /// Every path description in write order.
    pub fn path_updates(&self) -> &[String] {
        &self.path_updates
    }

    pub fn update_count(&self) -> usize {
        self.path_updates.len() + self.point_updates.len()
    }
}

impl Drawable for RecordingDrawable {
    fn kind(&self) -> DrawableKind {
        self.kind.clone()
    }

    fn set_path_data(&mut self, d: &str) {
        if self.kind == DrawableKind::Path {
            self.path_updates.push(d.to_owned());
        }
    }

    fn set_points(&mut self, points: &[Vector2]) {
        if self.kind == DrawableKind::Polygon {
            self.point_updates.push(points.to_vec());
        }
    }
}

impl<D: Drawable + ?Sized> Drawable for Box<D> {
    fn kind(&self) -> DrawableKind {
        (**self).kind()
    }

    fn set_path_data(&mut self, d: &str) {
        (**self).set_path_data(d);
    }

    fn set_points(&mut self, points: &[Vector2]) {
        (**self).set_points(points);
    }
}
