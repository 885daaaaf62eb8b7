//! Finished pen strokes and their per-point attributes.
//!
//! A [`Stroke`] never changes after pen-up. Derived values such as speed and
//! curvature live in a [`PointAttributes`] side-table indexed by stroke
//! position rather than on the points themselves.

use crate::config::CURVATURE_WINDOW;
use crate::error::StrokeError;
use crate::geometry::polyline_length;
use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};

/// A sampled pen position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokePoint {
    /// Position in world coordinates.
    pub pos: Point,
    /// Sample time in milliseconds.
    pub time_ms: f64,
}

impl StrokePoint {
    pub fn new(pos: Point, time_ms: f64) -> Self {
        Self { pos, time_ms }
    }
}

/// Derived per-point values, one entry per stroke index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointAttributes {
    /// Instantaneous pen speed (units per millisecond).
    pub speed: Vec<f64>,
    /// Signed curvature, when it could be estimated.
    pub curvature: Vec<Option<f64>>,
}

impl PointAttributes {
    /// Attributes carrying speed only.
    pub fn from_speeds(speed: Vec<f64>) -> Self {
        let curvature = vec![None; speed.len()];
        Self { speed, curvature }
    }
}

/// One continuous pen-down to pen-up sequence.
///
/// Deserialization goes through [`Stroke::new`], so a stored stroke with a
/// mismatched attribute table is rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StrokeData")]
pub struct Stroke {
    points: Vec<StrokePoint>,
    attributes: PointAttributes,
}

/// Unchecked serialized form of a [`Stroke`].
#[derive(Deserialize)]
struct StrokeData {
    points: Vec<StrokePoint>,
    attributes: PointAttributes,
}

impl TryFrom<StrokeData> for Stroke {
    type Error = StrokeError;

    fn try_from(data: StrokeData) -> Result<Self, Self::Error> {
        Stroke::new(data.points, data.attributes)
    }
}

impl Stroke {
    /// Create a stroke from points and a matching attribute table.
    pub fn new(points: Vec<StrokePoint>, attributes: PointAttributes) -> Result<Self, StrokeError> {
        let n = points.len();
        for len in [attributes.speed.len(), attributes.curvature.len()] {
            if len != n {
                return Err(StrokeError::AttributeMismatch {
                    points: n,
                    attributes: len,
                });
            }
        }
        Ok(Self { points, attributes })
    }

    /// Create a stroke from positions with upstream-computed speeds.
    ///
    /// Timestamps are unknown and recorded as zero.
    pub fn from_speeds(positions: Vec<Point>, speeds: Vec<f64>) -> Result<Self, StrokeError> {
        let points = positions.into_iter().map(|pos| StrokePoint::new(pos, 0.0)).collect();
        Self::new(points, PointAttributes::from_speeds(speeds))
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the stroke has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All sampled points.
    pub fn points(&self) -> &[StrokePoint] {
        &self.points
    }

    /// Position of the point at `index`.
    pub fn pos(&self, index: usize) -> Point {
        self.points[index].pos
    }

    /// Positions in stroke order.
    pub fn positions(&self) -> impl Iterator<Item = Point> + '_ {
        self.points.iter().map(|p| p.pos)
    }

    /// Speed of the point at `index`.
    pub fn speed(&self, index: usize) -> f64 {
        self.attributes.speed[index]
    }

    pub fn speeds(&self) -> &[f64] {
        &self.attributes.speed
    }

    pub fn curvature(&self, index: usize) -> Option<f64> {
        self.attributes.curvature[index]
    }

    /// Mean speed over the whole stroke (zero when empty).
    pub fn mean_speed(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        self.attributes.speed.iter().sum::<f64>() / self.len() as f64
    }

    /// Length of the path between two indices (inclusive).
    pub fn path_length(&self, start: usize, end: usize) -> f64 {
        if start >= end || end >= self.len() {
            return 0.0;
        }
        let positions: Vec<Point> = self.points[start..=end].iter().map(|p| p.pos).collect();
        polyline_length(&positions)
    }

    /// Axis-aligned bounds of the stroke.
    pub fn bounds(&self) -> Rect {
        let mut positions = self.positions();
        let Some(first) = positions.next() else {
            return Rect::ZERO;
        };
        positions.fold(Rect::from_points(first, first), |rect, p| rect.union_pt(p))
    }

    /// Open polyline path through the stroke.
    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let mut positions = self.positions();
        if let Some(first) = positions.next() {
            path.move_to(first);
            for point in positions {
                path.line_to(point);
            }
        }
        path
    }
}

/// Collects pen samples until pen-up, then derives the attribute table.
#[derive(Debug, Clone)]
pub struct StrokeBuilder {
    samples: Vec<StrokePoint>,
}

impl Default for StrokeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StrokeBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self {
            samples: Vec::new(),
        }
    }

    /// Add a pen sample.
    pub fn add_sample(&mut self, pos: Point, time_ms: f64) {
        self.samples.push(StrokePoint::new(pos, time_ms));
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Finish the stroke, computing speed and curvature for every point.
    pub fn finish(self) -> Stroke {
        let speed = sample_speeds(&self.samples);
        let curvature = (0..self.samples.len())
            .map(|i| sample_curvature(&self.samples, i, CURVATURE_WINDOW))
            .collect();
        Stroke {
            points: self.samples,
            attributes: PointAttributes { speed, curvature },
        }
    }
}

/// Speed by central difference; endpoints use their single neighbour.
fn sample_speeds(samples: &[StrokePoint]) -> Vec<f64> {
    let n = samples.len();
    (0..n)
        .map(|i| {
            if n < 2 {
                return 0.0;
            }
            let a = &samples[i.saturating_sub(1)];
            let b = &samples[(i + 1).min(n - 1)];
            let dt = b.time_ms - a.time_ms;
            if dt <= f64::EPSILON {
                0.0
            } else {
                a.pos.distance(b.pos) / dt
            }
        })
        .collect()
}

/// Turning angle per unit length across a euclidean window centred on `i`.
fn sample_curvature(samples: &[StrokePoint], i: usize, window: f64) -> Option<f64> {
    let half = window / 2.0;
    let here = samples[i].pos;

    let before = samples[..i]
        .iter()
        .rev()
        .find(|s| s.pos.distance(here) >= half)
        .or_else(|| samples.first())?;
    let after = samples[i + 1..]
        .iter()
        .find(|s| s.pos.distance(here) >= half)
        .or_else(|| samples.last())?;

    let incoming = here - before.pos;
    let outgoing = after.pos - here;
    let span = incoming.hypot() + outgoing.hypot();
    if incoming.hypot2() < f64::EPSILON || outgoing.hypot2() < f64::EPSILON {
        return None;
    }

    let turn = incoming.cross(outgoing).atan2(incoming.dot(outgoing));
    Some(turn / span)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight_samples(n: usize, spacing: f64, dt: f64) -> StrokeBuilder {
        let mut builder = StrokeBuilder::new();
        for i in 0..n {
            builder.add_sample(Point::new(i as f64 * spacing, 0.0), i as f64 * dt);
        }
        builder
    }

    #[test]
    fn test_attribute_mismatch() {
        let result = Stroke::from_speeds(vec![Point::ZERO, Point::new(1.0, 0.0)], vec![1.0]);
        assert_eq!(
            result,
            Err(StrokeError::AttributeMismatch { points: 2, attributes: 1 })
        );
    }

    #[test]
    fn test_deserialize_checks_attributes() {
        let stroke = straight_samples(3, 10.0, 5.0).finish();
        let json = serde_json::to_value(&stroke).unwrap();
        let restored: Stroke = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(restored, stroke);

        // Speed table longer than the point list
        let mut bad = json;
        bad["attributes"]["speed"] = serde_json::json!([1.0, 10.0, 10.0, 10.0, 1.0]);
        let result = serde_json::from_value::<Stroke>(bad);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("5 entries for 3 points"));
    }

    #[test]
    fn test_builder_uniform_speed() {
        let stroke = straight_samples(6, 10.0, 5.0).finish();
        assert_eq!(stroke.len(), 6);
        for i in 0..stroke.len() {
            assert!((stroke.speed(i) - 2.0).abs() < 1e-12);
        }
        assert!((stroke.mean_speed() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_builder_repeated_timestamp() {
        let mut builder = StrokeBuilder::new();
        builder.add_sample(Point::new(0.0, 0.0), 0.0);
        builder.add_sample(Point::new(5.0, 0.0), 0.0);
        let stroke = builder.finish();
        assert_eq!(stroke.speeds(), &[0.0, 0.0]);
    }

    #[test]
    fn test_builder_curvature() {
        let straight = straight_samples(10, 10.0, 1.0).finish();
        assert!(straight.curvature(5).unwrap().abs() < 1e-12);

        // Left turn at the fifth sample
        let mut builder = StrokeBuilder::new();
        for i in 0..5 {
            builder.add_sample(Point::new(i as f64 * 10.0, 0.0), i as f64);
        }
        for i in 1..5 {
            builder.add_sample(Point::new(40.0, i as f64 * 10.0), (4 + i) as f64);
        }
        let turned = builder.finish();
        assert!(turned.curvature(4).unwrap() > 0.0);
    }

    #[test]
    fn test_single_sample() {
        let mut builder = StrokeBuilder::new();
        builder.add_sample(Point::new(1.0, 2.0), 0.0);
        let stroke = builder.finish();
        assert_eq!(stroke.speeds(), &[0.0]);
        assert_eq!(stroke.curvature(0), None);
    }

    #[test]
    fn test_bounds_and_length() {
        let stroke = Stroke::from_speeds(
            vec![Point::new(0.0, 0.0), Point::new(30.0, 40.0), Point::new(30.0, 100.0)],
            vec![1.0; 3],
        )
        .unwrap();

        let bounds = stroke.bounds();
        assert!((bounds.x1 - 30.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 100.0).abs() < f64::EPSILON);
        assert!((stroke.path_length(0, 2) - 110.0).abs() < 1e-12);
        assert!(stroke.path_length(2, 1).abs() < f64::EPSILON);
        assert_eq!(Stroke::from_speeds(vec![], vec![]).unwrap().bounds(), Rect::ZERO);
    }
}
