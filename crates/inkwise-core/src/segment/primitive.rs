//! Geometric primitives fitted to stroke sub-ranges.

use crate::stroke::Stroke;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shape fitted to a primitive's span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveKind {
    Line,
}

impl PrimitiveKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrimitiveKind::Line => "Line",
        }
    }
}

/// How strongly a primitive is believed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Certainty {
    Yes,
    Maybe,
    No,
    #[default]
    Unknown,
}

/// A finalised region reinterpreted as a typed shape over `[start, end]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Primitive {
    pub kind: PrimitiveKind,
    /// First stroke index covered.
    pub start: usize,
    /// Last stroke index covered.
    pub end: usize,
    pub certainty: Certainty,
    /// Fitting error recorded at each growth step.
    pub errors: Vec<f64>,
}

impl Primitive {
    /// Number of stroke points covered.
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Error recorded at the last growth step.
    pub fn final_error(&self) -> f64 {
        self.errors.last().copied().unwrap_or(0.0)
    }

    /// Start and end positions on the stroke.
    pub fn endpoints(&self, stroke: &Stroke) -> (Point, Point) {
        (stroke.pos(self.start), stroke.pos(self.end))
    }

    /// Path length of the covered stroke span.
    pub fn path_length(&self, stroke: &Stroke) -> f64 {
        stroke.path_length(self.start, self.end)
    }

    /// Angle of the segment measured from its left-most to its right-most
    /// endpoint (ties on x broken by y), in `(-pi/2, pi/2]`.
    pub fn fixed_angle(&self, stroke: &Stroke) -> f64 {
        let (a, b) = self.endpoints(stroke);
        let (left, right) = if (a.x, a.y) > (b.x, b.y) { (b, a) } else { (a, b) };
        (right.y - left.y).atan2(right.x - left.x)
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}, {} (points: {}, error: {:.2}, {:?})]",
            self.kind.as_str(),
            self.start,
            self.end,
            self.len(),
            self.final_error(),
            self.certainty
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_4;

    fn primitive(start: usize, end: usize) -> Primitive {
        Primitive {
            kind: PrimitiveKind::Line,
            start,
            end,
            certainty: Certainty::Yes,
            errors: vec![0.0, 1.5],
        }
    }

    #[test]
    fn test_fixed_angle_is_direction_independent() {
        let stroke = Stroke::from_speeds(
            vec![Point::new(10.0, 10.0), Point::new(5.0, 5.0), Point::new(0.0, 0.0)],
            vec![1.0; 3],
        )
        .unwrap();
        let angle = primitive(0, 2).fixed_angle(&stroke);
        assert!((angle - FRAC_PI_4).abs() < 1e-12);
    }

    #[test]
    fn test_display() {
        let p = primitive(3, 7);
        assert_eq!(p.len(), 5);
        assert_eq!(p.to_string(), "Line[3, 7 (points: 5, error: 1.50, Yes)]");
    }
}
