//! Small geometric helpers over `kurbo` points.

use kurbo::{BezPath, Line, ParamCurve, ParamCurveNearest, Point};

/// Accuracy passed to `kurbo` nearest-point queries.
const NEAREST_ACCURACY: f64 = 1e-9;

/// Perpendicular distance from `point` to the infinite line through
/// `line_start` and `line_end`.
///
/// Falls back to the distance to `line_start` when the line is degenerate.
pub fn perpendicular_distance(point: Point, line_start: Point, line_end: Point) -> f64 {
    let dx = line_end.x - line_start.x;
    let dy = line_end.y - line_start.y;

    let line_len_sq = dx * dx + dy * dy;
    if line_len_sq < f64::EPSILON {
        return point.distance(line_start);
    }

    // Area of triangle * 2 / base = height
    let area2 = ((point.x - line_start.x) * dy - (point.y - line_start.y) * dx).abs();
    area2 / line_len_sq.sqrt()
}

/// Nearest point to `point` on the polyline through `points`.
pub fn nearest_point_on_polyline(point: Point, points: &[Point]) -> Option<Point> {
    match points {
        [] => None,
        [only] => Some(*only),
        _ => points
            .windows(2)
            .map(|w| {
                let segment = Line::new(w[0], w[1]);
                let nearest = segment.nearest(point, NEAREST_ACCURACY);
                (nearest.distance_sq, segment.eval(nearest.t))
            })
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, p)| p),
    }
}

/// Total length of the polyline through `points`.
pub fn polyline_length(points: &[Point]) -> f64 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}

/// Closed polygon through `points`, suitable for containment queries.
pub fn closed_polygon(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let Some((first, rest)) = points.split_first() else {
        return path;
    };

    path.move_to(*first);
    for point in rest {
        path.line_to(*point);
    }
    path.close_path();
    path
}
