//! Speculative gesture state machine.
//!
//! A stroke that looks like a gesture cannot be told apart from ordinary
//! ink until the user's next action. The controller holds such a stroke as a
//! pending candidate: the gesture's effect (highlight and selection) is
//! applied immediately, and the candidate is either confirmed by a
//! follow-up action or reverted by timeout, in which case the original
//! stroke goes back into the drawing as plain ink.

use super::GestureCandidate;
use super::timer::RevertTimer;
use crate::config::{GESTURE_PROXIMITY_RADIUS, GESTURE_TIMEOUT_MS};
use crate::error::{GestureError, GestureResult};
use crate::geometry::nearest_point_on_polyline;
use crate::sketch::{Ink, InkId, SketchModel};
use kurbo::Point;
use peniko::Color;
use std::fmt;

#[cfg(target_arch = "wasm32")]
use web_time::{Duration, Instant};
#[cfg(not(target_arch = "wasm32"))]
use std::time::{Duration, Instant};

/// Controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureState {
    /// No candidate.
    #[default]
    Idle,
    /// One unconfirmed candidate with the revert timer running.
    Pending,
}

impl fmt::Display for GestureState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GestureState::Idle => f.write_str("idle"),
            GestureState::Pending => f.write_str("pending"),
        }
    }
}

/// Outcome of reverting a pending gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reverted {
    /// Ink re-created from the gesture stroke, if it was never confirmed.
    pub restored_ink: Option<InkId>,
}

/// Owns at most one pending gesture and its revert timer.
#[derive(Debug, Clone)]
pub struct GestureController {
    pending: Option<GestureCandidate>,
    /// Most recently confirmed gesture, until taken.
    confirmed: Option<GestureCandidate>,
    timer: RevertTimer,
    highlight_color: Color,
}

impl Default for GestureController {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureController {
    /// Create an idle controller with the standard timeout.
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_millis(GESTURE_TIMEOUT_MS))
    }

    /// Create an idle controller with a custom revert delay.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            pending: None,
            confirmed: None,
            timer: RevertTimer::new(timeout),
            highlight_color: Color::from_rgba8(255, 255, 0, 128),
        }
    }

    pub fn state(&self) -> GestureState {
        if self.pending.is_some() {
            GestureState::Pending
        } else {
            GestureState::Idle
        }
    }

    pub fn is_gesturing(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<&GestureCandidate> {
        self.pending.as_ref()
    }

    /// Take the most recently confirmed gesture.
    pub fn take_confirmed(&mut self) -> Option<GestureCandidate> {
        self.confirmed.take()
    }

    /// When the pending gesture will revert, if one is pending.
    pub fn deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    pub fn highlight_color(&self) -> Color {
        self.highlight_color
    }

    /// Make `candidate` the pending gesture and apply its effect.
    ///
    /// Valid in any state. A previous pending candidate is dropped after its
    /// highlight and selection are cleared.
    pub fn offer<M: SketchModel + ?Sized>(
        &mut self,
        mut candidate: GestureCandidate,
        model: &mut M,
        now: Instant,
    ) {
        if self.pending.take().is_some() {
            log::info!("Replacing pending gesture");
            model.clear_selection();
        }
        model.clear_highlights();

        let outline: Vec<Point> = candidate.stroke().positions().collect();
        model.show_outline(&outline, self.highlight_color);

        let selection = model.search(candidate.area());
        model.set_selection(&selection);
        log::info!(
            "Pending {} gesture (p={:.2}) selects {} ink",
            candidate.kind().as_str(),
            candidate.probability(),
            selection.len()
        );
        candidate.set_selection(selection);

        self.pending = Some(candidate);
        self.timer.start(now);
    }

    /// Give the pending gesture a full timeout again from `now`.
    pub fn restart_timer(&mut self, now: Instant) -> GestureResult<()> {
        self.require_pending("restart_timer")?;
        log::debug!("Restarted gesture timer");
        self.timer.restart(now);
        Ok(())
    }

    /// Accept the pending gesture, leaving selection and ink as they are.
    pub fn confirm(&mut self) -> GestureResult<()> {
        self.require_pending("confirm")?;
        self.timer.cancel();
        if let Some(mut candidate) = self.pending.take() {
            log::info!("Confirmed {} gesture", candidate.kind().as_str());
            candidate.mark_confirmed();
            self.confirmed = Some(candidate);
        }
        Ok(())
    }

    /// Undo the pending gesture's effect.
    ///
    /// Clears selection and highlights, and puts the gesture stroke back as
    /// unstructured ink unless the candidate was confirmed.
    pub fn revert<M: SketchModel + ?Sized>(&mut self, model: &mut M) -> GestureResult<Reverted> {
        self.require_pending("revert")?;
        self.timer.cancel();
        model.clear_selection();

        let restored_ink = match self.pending.take() {
            Some(candidate) if !candidate.is_confirmed() => {
                let ink = Ink::unstructured(candidate.stroke().clone());
                let id = ink.id();
                model.add_ink(ink);
                Some(id)
            }
            _ => None,
        };
        log::info!(
            "Reverted pending gesture (ink restored: {})",
            restored_ink.is_some()
        );

        model.clear_highlights();
        Ok(Reverted { restored_ink })
    }

    /// Revert the pending gesture if its timer has run out.
    ///
    /// Call from the event loop; fires at most once per offer or restart.
    pub fn poll<M: SketchModel + ?Sized>(&mut self, now: Instant, model: &mut M) -> Option<Reverted> {
        if !self.timer.fire_if_due(now) {
            return None;
        }
        log::debug!("Gesture timer expired");
        match self.revert(model) {
            Ok(reverted) => Some(reverted),
            Err(e) => {
                log::warn!("Gesture timer fired without a pending gesture: {}", e);
                None
            }
        }
    }

    /// Whether `point` is within the area of effect of the pending stroke.
    pub fn is_near(&self, point: Point) -> bool {
        let Some(candidate) = &self.pending else {
            return false;
        };
        let points: Vec<Point> = candidate.stroke().positions().collect();
        nearest_point_on_polyline(point, &points)
            .is_some_and(|nearest| nearest.distance(point) < GESTURE_PROXIMITY_RADIUS)
    }

    fn require_pending(&self, operation: &'static str) -> GestureResult<()> {
        match self.state() {
            GestureState::Pending => Ok(()),
            state => Err(GestureError::InvalidTransition { operation, state }),
        }
    }
}
