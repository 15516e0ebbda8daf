//! # Analysis Settings
//!
//! Tunables for the sampler. They never change reactions, only how densely
//! the internal-force functions are sampled and when two stations count as
//! the same position.
//!
//! Settings can travel inside the input JSON (`"settings": {...}`) or be
//! overridden by the caller before the analysis runs.

use serde::{Deserialize, Serialize};

use crate::errors::{FlexureError, FlexureResult};

/// Default number of uniform grid intervals over the beam length
pub const DEFAULT_GRID_INTERVALS: usize = 200;

/// Fewer intervals than this produce diagrams too coarse to be useful
pub const MIN_GRID_INTERVALS: usize = 10;

/// Default coincidence tolerance, as a fraction of the beam length
pub const DEFAULT_POSITION_TOLERANCE: f64 = 1e-9;

/// Sampling configuration for one analysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisSettings {
    /// Number of equal intervals in the uniform sampling grid
    pub grid_intervals: usize,

    /// Two stations closer than `position_tolerance * length` are merged
    pub position_tolerance: f64,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        AnalysisSettings {
            grid_intervals: DEFAULT_GRID_INTERVALS,
            position_tolerance: DEFAULT_POSITION_TOLERANCE,
        }
    }
}

impl AnalysisSettings {
    /// Builder-style override of the grid density (clamped to the minimum)
    pub fn with_grid_intervals(mut self, intervals: usize) -> Self {
        self.grid_intervals = intervals.max(MIN_GRID_INTERVALS);
        self
    }

    /// Reject settings that would make sampling meaningless
    pub fn validate(&self) -> FlexureResult<()> {
        if self.grid_intervals < MIN_GRID_INTERVALS {
            return Err(FlexureError::validation(
                "settings.gridIntervals",
                self.grid_intervals.to_string(),
                format!("At least {} grid intervals are required", MIN_GRID_INTERVALS),
            ));
        }
        if !self.position_tolerance.is_finite()
            || self.position_tolerance <= 0.0
            || self.position_tolerance >= 1e-3
        {
            return Err(FlexureError::validation(
                "settings.positionTolerance",
                self.position_tolerance.to_string(),
                "Position tolerance must be in (0, 1e-3)",
            ));
        }
        Ok(())
    }
}
