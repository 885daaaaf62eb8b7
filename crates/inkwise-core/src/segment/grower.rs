//! Greedy growth of a single index region along a stroke.

use crate::config::ExpansionRule;
use crate::geometry::perpendicular_distance;
use crate::stroke::Stroke;
use std::collections::HashSet;

/// Mean squared perpendicular distance of the points in `[a, b]` from the
/// line through their endpoints, normalised by `b - a`.
///
/// Zero for a single point or exactly collinear points.
pub fn mean_squared_perpendicular_error(stroke: &Stroke, a: usize, b: usize) -> f64 {
    if b <= a {
        return 0.0;
    }
    let start = stroke.pos(a);
    let end = stroke.pos(b);
    let sum: f64 = (a..=b)
        .map(|i| {
            let d = perpendicular_distance(stroke.pos(i), start, end);
            d * d
        })
        .sum();
    sum / (b - a) as f64
}

/// A contiguous span of stroke indices grown from a single seed.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    /// Indices in the order they were added.
    indices: Vec<usize>,
    /// Fitting error recorded at each addition (0.0 for the seed).
    errors: Vec<f64>,
    /// Indices that were tried and rejected.
    taboo: HashSet<usize>,
    start: usize,
    end: usize,
}

impl Region {
    /// A single-index region.
    pub fn seed(index: usize) -> Self {
        Self {
            indices: vec![index],
            errors: vec![0.0],
            taboo: HashSet::new(),
            start: index,
            end: index,
        }
    }

    /// Lowest index in the region.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Highest index in the region.
    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Always false; a region holds at least its seed.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn errors(&self) -> &[f64] {
        &self.errors
    }

    pub fn is_taboo(&self, index: usize) -> bool {
        self.taboo.contains(&index)
    }

    fn push(&mut self, index: usize, error: f64) {
        debug_assert!(index + 1 == self.start || index == self.end + 1);
        self.indices.push(index);
        self.errors.push(error);
        self.start = self.start.min(index);
        self.end = self.end.max(index);
    }
}

/// Which side of the region a step tries to extend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Prev,
    Next,
}

/// Owns one region and extends it one index per step while the fit holds.
#[derive(Debug, Clone)]
pub struct SegmentGrower<'a> {
    stroke: &'a Stroke,
    region: Region,
    tolerance: f64,
    rule: ExpansionRule,
}

impl<'a> SegmentGrower<'a> {
    /// Seed a grower at `index`, which must lie inside the stroke.
    pub fn new(stroke: &'a Stroke, index: usize, tolerance: f64, rule: ExpansionRule) -> Self {
        debug_assert!(index < stroke.len());
        Self {
            stroke,
            region: Region::seed(index),
            tolerance,
            rule,
        }
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    pub fn into_region(self) -> Region {
        self.region
    }

    /// Neighbour before the region, if it exists and was never rejected.
    fn prev_candidate(&self) -> Option<usize> {
        self.region
            .start
            .checked_sub(1)
            .filter(|i| !self.region.is_taboo(*i))
    }

    /// Neighbour after the region, if it exists and was never rejected.
    fn next_candidate(&self) -> Option<usize> {
        Some(self.region.end + 1).filter(|&i| i < self.stroke.len() && !self.region.is_taboo(i))
    }

    /// True once neither neighbour can be tried again.
    pub fn is_exhausted(&self) -> bool {
        self.prev_candidate().is_none() && self.next_candidate().is_none()
    }

    /// Try to extend the region by one index.
    ///
    /// Returns the added index, or `None` when no expansion is possible.
    /// Every neighbour measured during a failed step becomes taboo.
    pub fn step(&mut self) -> Option<usize> {
        let (start, end) = (self.region.start, self.region.end);
        let prev = self.prev_candidate();
        let next = self.next_candidate();

        let mut error_prev = f64::INFINITY;
        let mut error_next = f64::INFINITY;
        if let Some(p) = prev {
            error_prev = mean_squared_perpendicular_error(self.stroke, p, end);
        }
        if let Some(n) = next {
            let error = mean_squared_perpendicular_error(self.stroke, start, n);
            match self.rule {
                ExpansionRule::Corrected => error_next = error,
                ExpansionRule::Literal => error_prev = error,
            }
        }

        let choice = if error_prev < error_next {
            Some((Direction::Prev, error_prev))
        } else if error_next < error_prev || error_next.is_finite() {
            // Exact finite ties grow forward
            Some((Direction::Next, error_next))
        } else {
            None
        };

        let target = choice.and_then(|(direction, error)| {
            let index = match direction {
                Direction::Prev => prev,
                Direction::Next => next,
            }?;
            (error < self.tolerance).then_some((index, error))
        });

        match target {
            Some((index, error)) => {
                log::debug!(
                    "Region [{}, {}] grows to {} (error {:.3})",
                    start,
                    end,
                    index,
                    error
                );
                self.region.push(index, error);
                Some(index)
            }
            None => {
                self.region.taboo.extend(prev);
                self.region.taboo.extend(next);
                log::debug!(
                    "Region [{}, {}] cannot grow (prev {:.3}, next {:.3})",
                    start,
                    end,
                    error_prev,
                    error_next
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    fn stroke_from(positions: Vec<Point>) -> Stroke {
        let n = positions.len();
        Stroke::from_speeds(positions, vec![1.0; n]).unwrap()
    }

    fn line(n: usize) -> Stroke {
        stroke_from((0..n).map(|i| Point::new(i as f64 * 10.0, 0.0)).collect())
    }

    /// Horizontal run of `n` points, then a vertical run of `n - 1` points
    /// from the corner at index `n - 1`.
    fn right_angle(n: usize, spacing: f64) -> Stroke {
        let corner = (n - 1) as f64 * spacing;
        let mut positions: Vec<Point> = (0..n).map(|i| Point::new(i as f64 * spacing, 0.0)).collect();
        positions.extend((1..n).map(|j| Point::new(corner, j as f64 * spacing)));
        stroke_from(positions)
    }

    #[test]
    fn test_error_zero_for_collinear() {
        let stroke = stroke_from(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 2.0),
            Point::new(5.0, 5.0),
        ]);
        assert!(mean_squared_perpendicular_error(&stroke, 0, 3).abs() < 1e-12);
        assert!(mean_squared_perpendicular_error(&stroke, 2, 2).abs() < f64::EPSILON);
    }

    #[test]
    fn test_error_value() {
        // Middle point is 3 units off the chord; normalised by b - a = 2
        let stroke = stroke_from(vec![
            Point::new(0.0, 0.0),
            Point::new(5.0, 3.0),
            Point::new(10.0, 0.0),
        ]);
        let error = mean_squared_perpendicular_error(&stroke, 0, 2);
        assert!((error - 4.5).abs() < 1e-12);
        assert!(error >= 0.0);
    }

    #[test]
    fn test_tie_grows_forward() {
        let stroke = line(5);
        let mut grower = SegmentGrower::new(&stroke, 2, 60.0, ExpansionRule::Corrected);
        assert_eq!(grower.step(), Some(3));
        assert_eq!(grower.step(), Some(4));
        // Forward side is exhausted, so backward wins
        assert_eq!(grower.step(), Some(1));
        assert_eq!(grower.step(), Some(0));
        assert_eq!(grower.step(), None);
        assert!(grower.is_exhausted());

        let region = grower.region();
        assert_eq!((region.start(), region.end()), (0, 4));
        assert_eq!(region.indices(), &[2, 3, 4, 1, 0]);
        assert_eq!(region.errors().len(), region.indices().len());
    }

    #[test]
    fn test_stops_at_corner() {
        let stroke = right_angle(10, 20.0);
        let mut grower = SegmentGrower::new(&stroke, 1, 60.0, ExpansionRule::Corrected);
        while grower.step().is_some() {}

        let region = grower.region();
        assert_eq!((region.start(), region.end()), (0, 9));
        assert!(region.is_taboo(10));
        assert!(region.errors().iter().all(|&e| e < 60.0));
    }

    #[test]
    fn test_step_after_exhaustion_is_none() {
        let stroke = right_angle(10, 20.0);
        let mut grower = SegmentGrower::new(&stroke, 1, 60.0, ExpansionRule::Corrected);
        while grower.step().is_some() {}

        let before = grower.region().clone();
        for _ in 0..5 {
            assert_eq!(grower.step(), None);
        }
        assert_eq!(grower.region(), &before);
    }

    #[test]
    fn test_taboo_is_never_retried() {
        // A single step that fails marks both neighbours taboo
        let stroke = stroke_from(vec![
            Point::new(0.0, 100.0),
            Point::new(0.0, 0.0),
            Point::new(100.0, 100.0),
        ]);
        let mut grower = SegmentGrower::new(&stroke, 1, 60.0, ExpansionRule::Corrected);
        // Two-point spans always fit exactly; only longer spans can fail
        assert_eq!(grower.step(), Some(2));
        assert_eq!(grower.step(), None);
        assert!(grower.region().is_taboo(0));
        assert!(grower.is_exhausted());
        assert_eq!(grower.step(), None);
        assert_eq!((grower.region().start(), grower.region().end()), (1, 2));
    }

    #[test]
    fn test_zero_tolerance_never_grows() {
        let stroke = line(4);
        let mut grower = SegmentGrower::new(&stroke, 1, 0.0, ExpansionRule::Corrected);
        assert_eq!(grower.step(), None);
        assert!(grower.region().is_taboo(0));
        assert!(grower.region().is_taboo(2));
        assert_eq!(grower.region().len(), 1);
    }

    #[test]
    fn test_literal_rule_grows_backward_with_forward_error() {
        let stroke = line(5);
        let mut grower = SegmentGrower::new(&stroke, 2, 60.0, ExpansionRule::Literal);
        assert_eq!(grower.step(), Some(1));
        assert_eq!(grower.step(), Some(0));
        // Nothing before index 0, so the backward attempt fails and the
        // forward neighbour that was measured becomes taboo
        assert_eq!(grower.step(), None);
        assert!(grower.region().is_taboo(3));
        assert!(grower.is_exhausted());
        assert_eq!((grower.region().start(), grower.region().end()), (0, 2));
    }

    #[test]
    fn test_literal_rule_at_stroke_end() {
        let stroke = line(5);
        let mut grower = SegmentGrower::new(&stroke, 4, 60.0, ExpansionRule::Literal);
        // Without a forward neighbour the literal rule behaves normally
        assert_eq!(grower.step(), Some(3));
        assert_eq!(grower.region().start(), 3);
    }
}
