//! Recognizer tuning parameters and fixed constants.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Default fraction of the mean speed below which a point counts as slow.
pub const DEFAULT_SPEED_MULTIPLIER: f64 = 0.75;
/// Default maximum mean-squared perpendicular error admitted during growth.
pub const DEFAULT_ERROR_TOLERANCE: f64 = 60.0;

/// Rounds of segment growth before the orchestrator gives up.
pub const MAX_GROWTH_ROUNDS: usize = 10;
/// Slow points closer than this to the previous slow point are merged.
pub const SLOW_POINT_MERGE_DISTANCE: f64 = 20.0;
/// Euclidean window used when estimating curvature.
pub const CURVATURE_WINDOW: f64 = 24.0;

/// Delay before an unconfirmed gesture is reverted back to ink.
pub const GESTURE_TIMEOUT_MS: u64 = 5000;
/// Area-of-effect diameter around a pending gesture.
pub const GESTURE_AOE_DISTANCE: f64 = 20.0;
/// Input closer than this to a pending gesture's stroke is related to it.
pub const GESTURE_PROXIMITY_RADIUS: f64 = GESTURE_AOE_DISTANCE / 2.0;

/// How a segment grower picks its expansion direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpansionRule {
    /// Compare the error of growing backward against growing forward.
    #[default]
    Corrected,
    /// Historical behavior: the forward error is recorded in the backward
    /// slot, so a feasible forward neighbour makes the grower try to extend
    /// backward using the forward error.
    Literal,
}

/// Parameters for stroke segmentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognizerConfig {
    /// Slow-point threshold as a fraction of the stroke's mean speed.
    #[serde(alias = "hs-speed-mult")]
    pub speed_multiplier: f64,
    /// Maximum error tolerated before a grower stops expanding.
    #[serde(alias = "hs-error-tolerance")]
    pub error_tolerance: f64,
    /// Direction selection rule used by the growers.
    pub expansion: ExpansionRule,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            speed_multiplier: DEFAULT_SPEED_MULTIPLIER,
            error_tolerance: DEFAULT_ERROR_TOLERANCE,
            expansion: ExpansionRule::default(),
        }
    }
}

impl RecognizerConfig {
    /// Allowed range for `speed_multiplier`.
    pub const SPEED_MULTIPLIER_RANGE: (f64, f64) = (0.0, 1.0);
    /// Allowed range for `error_tolerance`.
    pub const ERROR_TOLERANCE_RANGE: (f64, f64) = (0.0, 100.0);

    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_speed_multiplier(mut self, speed_multiplier: f64) -> Self {
        self.speed_multiplier = speed_multiplier;
        self
    }

    pub fn with_error_tolerance(mut self, error_tolerance: f64) -> Self {
        self.error_tolerance = error_tolerance;
        self
    }

    pub fn with_expansion(mut self, expansion: ExpansionRule) -> Self {
        self.expansion = expansion;
        self
    }

    /// Check every parameter against its bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("speed_multiplier", self.speed_multiplier, Self::SPEED_MULTIPLIER_RANGE)?;
        check_range("error_tolerance", self.error_tolerance, Self::ERROR_TOLERANCE_RANGE)?;
        Ok(())
    }

    /// Parse a JSON config. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

fn check_range(name: &'static str, value: f64, (min, max): (f64, f64)) -> Result<(), ConfigError> {
    // NaN fails `contains`
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { name, value, min, max })
    }
}
