//! Inkwise Core Library
//!
//! Interprets finished freehand strokes: splits them into straight
//! primitives at their corners, and holds gesture-like strokes as pending
//! gestures until the user confirms them or they revert to ink.

pub mod config;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod kinematics;
pub mod segment;
pub mod sketch;
pub mod stroke;

pub use config::{ExpansionRule, RecognizerConfig};
pub use error::{ConfigError, GestureError, GestureResult, SegmentationWarning, StrokeError};
pub use gesture::{
    EncircleFinder, GestureArbiter, GestureCandidate, GestureController, GestureDetection,
    GestureFinder, GestureKind, GesturePayload, GestureState, Reverted,
};
pub use kinematics::{KinematicProfile, find_fast_points, find_slow_points};
pub use segment::{Certainty, Primitive, PrimitiveKind, Segmentation, segment};
pub use sketch::{Ink, InkId, MemorySketch, SketchModel};
pub use stroke::{PointAttributes, Stroke, StrokeBuilder, StrokePoint};
