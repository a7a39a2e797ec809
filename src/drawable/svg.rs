use std::cell::RefCell;
use std::fmt::Write as _;
use std::rc::Rc;

use crate::drawable::sink::{Drawable, DrawableKind};
use crate::foundation::core::{Vector2, Viewport};
use crate::foundation::error::{RidgelineError, RidgelineResult};

#[derive(Debug)]
struct SvgShape {
    id: String,
    kind: DrawableKind,
    fill: String,
    d: String,
    points: Vec<Vector2>,
}

/// Shared handle to one shape inside an [`SvgDocument`].
///
/// The document and the element writing to the shape both hold a handle; everything runs on one
/// cooperative timeline, so `Rc<RefCell<_>>` is enough.
#[derive(Clone, Debug)]
pub struct ShapeHandle(Rc<RefCell<SvgShape>>);

impl ShapeHandle {
    pub fn id(&self) -> String {
        self.0.borrow().id.clone()
    }

    pub fn fill(&self) -> String {
        self.0.borrow().fill.clone()
    }

    pub fn path_data(&self) -> String {
        self.0.borrow().d.clone()
    }

    pub fn points(&self) -> Vec<Vector2> {
        self.0.borrow().points.clone()
    }
}

impl Drawable for ShapeHandle {
    fn kind(&self) -> DrawableKind {
        self.0.borrow().kind.clone()
    }

    fn set_path_data(&mut self, d: &str) {
        let mut shape = self.0.borrow_mut();
        if shape.kind == DrawableKind::Path {
            d.clone_into(&mut shape.d);
        }
    }

    fn set_points(&mut self, points: &[Vector2]) {
        let mut shape = self.0.borrow_mut();
        if shape.kind == DrawableKind::Polygon {
            shape.points.clear();
            shape.points.extend_from_slice(points);
        }
    }
}

/// Minimal in-memory SVG document: an ordered list of named shapes.
#[derive(Debug, Default)]
pub struct SvgDocument {
    shapes: Vec<ShapeHandle>,
}

impl SvgDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a shape. Ids must be unique within the document.
    pub fn add_shape(
        &mut self,
        id: impl Into<String>,
        kind: DrawableKind,
        fill: impl Into<String>,
    ) -> RidgelineResult<ShapeHandle> {
        let id = id.into();
        if self.get_element_by_id(&id).is_some() {
            return Err(RidgelineError::validation(format!(
                "duplicate shape id '{id}'"
            )));
        }
        let handle = ShapeHandle(Rc::new(RefCell::new(SvgShape {
            id,
            kind,
            fill: fill.into(),
            d: String::new(),
            points: Vec::new(),
        })));
        self.shapes.push(handle.clone());
        Ok(handle)
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<ShapeHandle> {
        self.shapes.iter().find(|s| s.0.borrow().id == id).cloned()
    }

    /// Like [`SvgDocument::get_element_by_id`], but a missing id is an error.
    pub fn require(&self, id: &str) -> RidgelineResult<ShapeHandle> {
        self.get_element_by_id(id)
            .ok_or_else(|| RidgelineError::drawable(format!("no element with id '{id}'")))
    }

    pub fn shapes(&self) -> &[ShapeHandle] {
        &self.shapes
    }

    /// Serialize the document as a standalone SVG with `view_box` as its viewport.
    ///
    /// Only path and polygon shapes are written.
    pub fn to_svg_string(&self, view_box: &Viewport) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}" preserveAspectRatio="xMinYMax slice">"#,
            view_box.x, view_box.y, view_box.width, view_box.height
        );
        for handle in &self.shapes {
            let shape = handle.0.borrow();
            match &shape.kind {
                DrawableKind::Path => {
                    let _ = writeln!(
                        out,
                        r#"  <path id="{}" fill="{}" d="{}"/>"#,
                        escape_attr(&shape.id),
                        escape_attr(&shape.fill),
                        escape_attr(&shape.d)
                    );
                }
                DrawableKind::Polygon => {
                    let points = shape
                        .points
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(" ");
                    let _ = writeln!(
                        out,
                        r#"  <polygon id="{}" fill="{}" points="{}"/>"#,
                        escape_attr(&shape.id),
                        escape_attr(&shape.fill),
                        points
                    );
                }
                // Shapes with no geometry this document can write are left out.
                DrawableKind::Other(tag) => {
                    tracing::debug!(id = %shape.id, %tag, "skipping shape without svg geometry");
                }
            }
        }
        out.push_str("</svg>\n");
        out
    }
}

fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/drawable/svg.rs"]
mod tests;
