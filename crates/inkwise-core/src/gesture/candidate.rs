//! Gesture detection results and pending gesture candidates.

use crate::sketch::InkId;
use crate::stroke::Stroke;
use kurbo::BezPath;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Kinds of gesture a stroke can be read as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GestureKind {
    /// A closed loop drawn around ink to select it.
    Encircle,
}

impl GestureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GestureKind::Encircle => "encircle",
        }
    }
}

/// Detector-specific data attached to a match.
#[derive(Debug, Clone)]
pub enum GesturePayload {
    Encircle {
        /// Region enclosed by the loop.
        area: BezPath,
    },
}

impl GesturePayload {
    pub fn kind(&self) -> GestureKind {
        match self {
            GesturePayload::Encircle { .. } => GestureKind::Encircle,
        }
    }

    /// Spatial area the gesture acts on.
    pub fn area(&self) -> &BezPath {
        match self {
            GesturePayload::Encircle { area } => area,
        }
    }
}

/// Result of running one gesture finder over a stroke.
#[derive(Debug, Clone)]
pub struct GestureDetection {
    pub stroke: Arc<Stroke>,
    /// Match probability in `[0, 1]`; zero means no match.
    pub probability: f64,
    pub payload: Option<GesturePayload>,
}

impl GestureDetection {
    /// A result reporting no match.
    pub fn no_match(stroke: Arc<Stroke>) -> Self {
        Self {
            stroke,
            probability: 0.0,
            payload: None,
        }
    }

    /// A match with the given probability, clamped to `[0, 1]`.
    pub fn matched(stroke: Arc<Stroke>, probability: f64, payload: GesturePayload) -> Self {
        Self {
            stroke,
            probability: probability.clamp(0.0, 1.0),
            payload: Some(payload),
        }
    }

    pub fn is_match(&self) -> bool {
        self.probability > 0.0 && self.payload.is_some()
    }

    /// Turn a match into a candidate; `None` when nothing matched.
    pub fn into_candidate(self) -> Option<GestureCandidate> {
        if !self.is_match() {
            return None;
        }
        let payload = self.payload?;
        Some(GestureCandidate::new(
            self.stroke,
            payload.kind(),
            self.probability,
            payload.area().clone(),
        ))
    }
}

/// A stroke that may be a gesture, held until confirmed or reverted.
#[derive(Debug, Clone)]
pub struct GestureCandidate {
    stroke: Arc<Stroke>,
    kind: GestureKind,
    probability: f64,
    area: BezPath,
    /// Ink selected when the candidate was offered.
    selection: Vec<InkId>,
    confirmed: bool,
}

impl GestureCandidate {
    pub fn new(stroke: Arc<Stroke>, kind: GestureKind, probability: f64, area: BezPath) -> Self {
        Self {
            stroke,
            kind,
            probability,
            area,
            selection: Vec::new(),
            confirmed: false,
        }
    }

    /// The stroke the gesture was drawn with.
    pub fn stroke(&self) -> &Arc<Stroke> {
        &self.stroke
    }

    pub fn kind(&self) -> GestureKind {
        self.kind
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    pub fn area(&self) -> &BezPath {
        &self.area
    }

    pub fn selection(&self) -> &[InkId] {
        &self.selection
    }

    /// True once the user acted on the gesture.
    pub fn is_confirmed(&self) -> bool {
        self.confirmed
    }

    pub(crate) fn set_selection(&mut self, selection: Vec<InkId>) {
        self.selection = selection;
    }

    pub(crate) fn mark_confirmed(&mut self) {
        self.confirmed = true;
    }
}
