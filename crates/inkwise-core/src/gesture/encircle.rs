//! Encircle-to-select gesture finder.

use super::{GestureDetection, GestureFinder, GesturePayload};
use crate::geometry::{closed_polygon, polyline_length};
use crate::stroke::Stroke;
use kurbo::Point;
use std::sync::Arc;

/// Shortest path that can count as a loop.
pub const DEFAULT_MIN_LOOP_LENGTH: f64 = 60.0;
/// Closure gap, as a fraction of the path length, at which probability hits zero.
pub const DEFAULT_CLOSURE_FRACTION: f64 = 0.25;

/// Recognises strokes that close on themselves.
///
/// Probability falls linearly from 1 for a perfectly closed loop to 0 when
/// the gap between the endpoints reaches `closure_fraction` of the path.
#[derive(Debug, Clone)]
pub struct EncircleFinder {
    pub min_loop_length: f64,
    pub closure_fraction: f64,
}

impl Default for EncircleFinder {
    fn default() -> Self {
        Self {
            min_loop_length: DEFAULT_MIN_LOOP_LENGTH,
            closure_fraction: DEFAULT_CLOSURE_FRACTION,
        }
    }
}

impl EncircleFinder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GestureFinder for EncircleFinder {
    fn name(&self) -> &str {
        "encircle"
    }

    fn find_gesture(&self, stroke: &Arc<Stroke>) -> GestureDetection {
        if stroke.len() < 3 {
            return GestureDetection::no_match(stroke.clone());
        }

        let points: Vec<Point> = stroke.positions().collect();
        let length = polyline_length(&points);
        if length < self.min_loop_length {
            return GestureDetection::no_match(stroke.clone());
        }

        let gap = points[0].distance(points[points.len() - 1]);
        let probability = 1.0 - gap / (self.closure_fraction * length);
        if probability <= 0.0 {
            return GestureDetection::no_match(stroke.clone());
        }

        GestureDetection::matched(
            stroke.clone(),
            probability,
            GesturePayload::Encircle {
                area: closed_polygon(&points),
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Shape;
    use std::f64::consts::TAU;

    fn circle(samples: usize, radius: f64) -> Arc<Stroke> {
        let positions = (0..samples)
            .map(|i| {
                let a = TAU * i as f64 / samples as f64;
                Point::new(100.0 + radius * a.cos(), 100.0 + radius * a.sin())
            })
            .collect();
        Arc::new(Stroke::from_speeds(positions, vec![1.0; samples]).unwrap())
    }

    #[test]
    fn test_circle_is_encircle() {
        let detection = EncircleFinder::new().find_gesture(&circle(32, 50.0));
        assert!(detection.is_match());
        assert!(detection.probability > 0.8);

        let payload = detection.payload.unwrap();
        assert!(payload.area().contains(Point::new(100.0, 100.0)));
        assert!(!payload.area().contains(Point::new(200.0, 200.0)));
    }

    #[test]
    fn test_straight_line_is_not() {
        let positions = (0..10).map(|i| Point::new(i as f64 * 20.0, 0.0)).collect();
        let stroke = Arc::new(Stroke::from_speeds(positions, vec![1.0; 10]).unwrap());
        let detection = EncircleFinder::new().find_gesture(&stroke);
        assert!(!detection.is_match());
        assert!(detection.probability.abs() < f64::EPSILON);
    }

    #[test]
    fn test_tiny_loop_is_not() {
        let detection = EncircleFinder::new().find_gesture(&circle(16, 5.0));
        assert!(!detection.is_match());
    }
}
