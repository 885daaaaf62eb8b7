//! Speed-based corner and segment-interior candidates.

use crate::config::SLOW_POINT_MERGE_DISTANCE;
use crate::stroke::Stroke;

/// Slow and fast point indices of a finished stroke.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KinematicProfile {
    /// Corner candidates, in stroke order.
    pub slow: Vec<usize>,
    /// One segment-interior seed per gap between consecutive slow points.
    pub fast: Vec<usize>,
}

impl KinematicProfile {
    /// Profile a stroke using the given slow-point speed multiplier.
    pub fn of(stroke: &Stroke, speed_multiplier: f64) -> Self {
        let slow = find_slow_points(stroke, speed_multiplier);
        let fast = find_fast_points(stroke, &slow);
        Self { slow, fast }
    }
}

/// Indices whose speed is strictly below `speed_multiplier` times the mean.
///
/// A slow point within [`SLOW_POINT_MERGE_DISTANCE`] of the previously
/// accepted one replaces it only if it is strictly slower.
pub fn find_slow_points(stroke: &Stroke, speed_multiplier: f64) -> Vec<usize> {
    let threshold = speed_multiplier * stroke.mean_speed();
    let mut slow: Vec<usize> = Vec::new();

    for (i, &speed) in stroke.speeds().iter().enumerate() {
        if speed >= threshold {
            continue;
        }
        match slow.last().copied() {
            Some(prev) if stroke.pos(prev).distance(stroke.pos(i)) < SLOW_POINT_MERGE_DISTANCE => {
                if stroke.speed(prev) > speed {
                    let last = slow.len() - 1;
                    slow[last] = i;
                }
            }
            _ => slow.push(i),
        }
    }

    slow
}

/// The fastest index between each pair of consecutive slow points.
///
/// Spans are scanned inclusively; the first maximum wins and a span with no
/// positive speed contributes nothing.
pub fn find_fast_points(stroke: &Stroke, slow: &[usize]) -> Vec<usize> {
    slow.windows(2)
        .filter_map(|pair| {
            let mut fastest: Option<(usize, f64)> = None;
            for i in pair[0]..=pair[1] {
                let speed = stroke.speed(i);
                if speed > fastest.map_or(0.0, |(_, s)| s) {
                    fastest = Some((i, speed));
                }
            }
            fastest.map(|(i, _)| i)
        })
        .collect()
}
