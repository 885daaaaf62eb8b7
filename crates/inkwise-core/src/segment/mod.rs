//! Corner-based stroke segmentation.
//!
//! One [`SegmentGrower`] is seeded at every fast point of the stroke. All
//! growers are stepped round by round until none of them can expand, or
//! until [`MAX_GROWTH_ROUNDS`] rounds have run. Each final region becomes a
//! [`Primitive`]. Regions grown from adjacent seeds may overlap; they are
//! reported as grown.

mod grower;
mod primitive;

pub use grower::{Region, SegmentGrower, mean_squared_perpendicular_error};
pub use primitive::{Certainty, Primitive, PrimitiveKind};

use crate::config::{MAX_GROWTH_ROUNDS, RecognizerConfig};
use crate::error::SegmentationWarning;
use crate::kinematics::KinematicProfile;
use crate::stroke::Stroke;

/// Output of [`segment`].
#[derive(Debug, Clone, PartialEq)]
pub struct Segmentation {
    /// One primitive per seed, in seed order.
    pub primitives: Vec<Primitive>,
    /// Growth rounds that were run.
    pub rounds: usize,
    /// Set when the result is partial or degenerate.
    pub warning: Option<SegmentationWarning>,
}

impl Segmentation {
    /// True unless growth was cut off by the round cap.
    pub fn converged(&self) -> bool {
        !matches!(self.warning, Some(SegmentationWarning::NoConvergence { .. }))
    }
}

/// Segment a finished stroke into primitives.
pub fn segment(stroke: &Stroke, config: &RecognizerConfig) -> Segmentation {
    if stroke.len() < 2 {
        return Segmentation {
            primitives: Vec::new(),
            rounds: 0,
            warning: Some(SegmentationWarning::InsufficientData {
                points: stroke.len(),
            }),
        };
    }

    let profile = KinematicProfile::of(stroke, config.speed_multiplier);
    log::debug!(
        "Profiled {} points: {} slow, {} fast",
        stroke.len(),
        profile.slow.len(),
        profile.fast.len()
    );

    let mut growers: Vec<SegmentGrower<'_>> = profile
        .fast
        .iter()
        .map(|&seed| SegmentGrower::new(stroke, seed, config.error_tolerance, config.expansion))
        .collect();

    let mut rounds = 0;
    let mut converged = growers.is_empty();
    while !converged && rounds < MAX_GROWTH_ROUNDS {
        rounds += 1;
        let mut grew = false;
        for grower in &mut growers {
            grew |= grower.step().is_some();
        }
        converged = !grew;
        log::debug!("Round {}: {}", rounds, if grew { "growing" } else { "stable" });
    }

    let warning = if converged {
        None
    } else {
        log::warn!(
            "Segment growth still active after {} rounds; returning partial regions",
            rounds
        );
        Some(SegmentationWarning::NoConvergence { rounds })
    };

    let tolerance = config.error_tolerance;
    let primitives = growers
        .into_iter()
        .map(|grower| into_primitive(grower.into_region(), tolerance))
        .collect();

    Segmentation {
        primitives,
        rounds,
        warning,
    }
}

fn into_primitive(region: Region, tolerance: f64) -> Primitive {
    let final_error = region.errors().last().copied().unwrap_or(0.0);
    let certainty = if region.len() < 2 {
        Certainty::Unknown
    } else if final_error <= tolerance / 4.0 {
        Certainty::Yes
    } else {
        Certainty::Maybe
    };

    Primitive {
        kind: PrimitiveKind::Line,
        start: region.start(),
        end: region.end(),
        certainty,
        errors: region.errors().to_vec(),
    }
}
