//! Picks the most likely gesture among all registered finders.

use super::{EncircleFinder, GestureCandidate, GestureDetection, GestureFinder};
use crate::stroke::Stroke;
use std::sync::Arc;

/// Runs every registered [`GestureFinder`] over a stroke.
#[derive(Default)]
pub struct GestureArbiter {
    finders: Vec<Box<dyn GestureFinder>>,
}

impl GestureArbiter {
    /// Create an arbiter with no finders.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an arbiter with the built-in finders registered.
    pub fn with_default_finders() -> Self {
        let mut arbiter = Self::new();
        arbiter.register(Box::new(EncircleFinder::new()));
        arbiter
    }

    /// Register a finder. Earlier finders win probability ties.
    pub fn register(&mut self, finder: Box<dyn GestureFinder>) {
        self.finders.push(finder);
    }

    pub fn len(&self) -> usize {
        self.finders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.finders.is_empty()
    }

    /// The most probable gesture reading of `stroke`, if any finder matched.
    pub fn detect(&self, stroke: &Arc<Stroke>) -> Option<GestureCandidate> {
        if stroke.len() < 2 {
            return None;
        }

        let mut best: Option<GestureDetection> = None;
        for finder in &self.finders {
            let detection = finder.find_gesture(stroke);
            if !detection.is_match() {
                log::debug!("Gesture finder {} found nothing", finder.name());
                continue;
            }
            log::debug!(
                "Gesture finder {} matched with p={:.2}",
                finder.name(),
                detection.probability
            );
            if best.as_ref().is_none_or(|b| detection.probability > b.probability) {
                best = Some(detection);
            }
        }

        best.and_then(GestureDetection::into_candidate)
    }
}
