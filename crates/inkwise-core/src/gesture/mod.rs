//! Gesture detection and the speculative gesture state machine.

mod arbiter;
mod candidate;
mod controller;
mod encircle;
mod timer;

pub use arbiter::GestureArbiter;
pub use candidate::{GestureCandidate, GestureDetection, GestureKind, GesturePayload};
pub use controller::{GestureController, GestureState, Reverted};
pub use encircle::EncircleFinder;
pub use timer::RevertTimer;

use crate::stroke::Stroke;
use std::sync::Arc;

/// A pluggable gesture detector.
///
/// A detection with probability 0 means "no match".
pub trait GestureFinder {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Judge how likely `stroke` is this finder's gesture.
    fn find_gesture(&self, stroke: &Arc<Stroke>) -> GestureDetection;
}
