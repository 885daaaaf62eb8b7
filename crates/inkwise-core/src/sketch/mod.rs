//! Drawing-model abstraction used by the gesture controller.
//!
//! The controller only mutates selection, ink and highlight state through
//! [`SketchModel`]; it owns none of it.

mod memory;

pub use memory::{MemorySketch, Outline};

use crate::segment::Primitive;
use crate::stroke::Stroke;
use kurbo::{BezPath, Point, Rect, Shape};
use peniko::Color;
use std::sync::Arc;
use uuid::Uuid;

/// Unique identifier for a piece of ink.
pub type InkId = Uuid;

/// A stroke placed in the drawing.
#[derive(Debug, Clone)]
pub struct Ink {
    id: InkId,
    stroke: Arc<Stroke>,
    /// Primitives fitted to the stroke, empty for unstructured ink.
    segments: Vec<Primitive>,
}

impl Ink {
    /// Ink with no structure attached.
    pub fn unstructured(stroke: Arc<Stroke>) -> Self {
        Self {
            id: Uuid::new_v4(),
            stroke,
            segments: Vec::new(),
        }
    }

    /// Ink carrying the primitives fitted to its stroke.
    pub fn segmented(stroke: Arc<Stroke>, segments: Vec<Primitive>) -> Self {
        Self {
            id: Uuid::new_v4(),
            stroke,
            segments,
        }
    }

    pub fn id(&self) -> InkId {
        self.id
    }

    pub fn stroke(&self) -> &Arc<Stroke> {
        &self.stroke
    }

    pub fn segments(&self) -> &[Primitive] {
        &self.segments
    }

    pub fn is_structured(&self) -> bool {
        !self.segments.is_empty()
    }

    pub fn bounds(&self) -> Rect {
        self.stroke.bounds()
    }

    /// Fraction (0..1) of the stroke's points that lie inside `area`.
    pub fn overlap(&self, area: &BezPath) -> f64 {
        if self.stroke.is_empty() {
            return 0.0;
        }
        let hits = self.stroke.positions().filter(|p| area.contains(*p)).count();
        hits as f64 / self.stroke.len() as f64
    }
}

/// Operations the gesture controller performs on the drawing.
pub trait SketchModel {
    /// Ids of the ink lying inside `area`.
    fn search(&self, area: &BezPath) -> Vec<InkId>;

    /// Replace the selection.
    fn set_selection(&mut self, ids: &[InkId]);

    fn clear_selection(&mut self);

    /// Add ink to the drawing.
    fn add_ink(&mut self, ink: Ink);

    /// Draw a highlight outline through `points`.
    fn show_outline(&mut self, points: &[Point], color: Color);

    /// Remove every highlight outline.
    fn clear_highlights(&mut self);
}
