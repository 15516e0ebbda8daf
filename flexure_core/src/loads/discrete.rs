//! Discrete Load Primitives
//!
//! Value types for the actions applied along the beam axis: point forces,
//! point moments, linearly varying distributed loads and internal hinges.
//! All positions are measured from the left end of the beam.
//!
//! Transverse loads are entered downward positive, moments counter-clockwise
//! positive. Conversion to the internal upward-positive convention happens in
//! the equilibrium and internal-force code, never here.

use serde::{Deserialize, Serialize};

// ============================================================================
// Point Load
// ============================================================================

/// Concentrated transverse force
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointLoad {
    /// Distance from the left end
    pub position: f64,
    /// Force, downward positive
    pub magnitude: f64,
}

impl PointLoad {
    /// Create a downward-positive point load
    pub fn new(position: f64, magnitude: f64) -> Self {
        PointLoad {
            position,
            magnitude,
        }
    }

    /// Create a point load whose magnitude is given upward positive
    pub fn upward(position: f64, magnitude: f64) -> Self {
        PointLoad::new(position, -magnitude)
    }
}

// ============================================================================
// Point Moment
// ============================================================================

/// Concentrated couple, counter-clockwise positive
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointMoment {
    pub position: f64,
    pub magnitude: f64,
}

impl PointMoment {
    pub fn new(position: f64, magnitude: f64) -> Self {
        PointMoment {
            position,
            magnitude,
        }
    }
}

// ============================================================================
// Distributed Load
// ============================================================================

/// Linearly varying (trapezoidal) load between `start` and `end`.
///
/// A UDL is the case `magnitude_start == magnitude_end`; anything else is a
/// UVL. Intensities are force per unit length, downward positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistributedLoad {
    pub start: f64,
    pub end: f64,
    pub magnitude_start: f64,
    pub magnitude_end: f64,
}

impl DistributedLoad {
    /// Create a linearly varying load
    pub fn new(start: f64, end: f64, magnitude_start: f64, magnitude_end: f64) -> Self {
        DistributedLoad {
            start,
            end,
            magnitude_start,
            magnitude_end,
        }
    }

    /// Create a uniform load
    pub fn uniform(start: f64, end: f64, magnitude: f64) -> Self {
        DistributedLoad::new(start, end, magnitude, magnitude)
    }

    /// True for a constant-intensity load
    pub fn is_uniform(&self) -> bool {
        self.magnitude_start == self.magnitude_end
    }

    /// Loaded length
    pub fn length(&self) -> f64 {
        self.end - self.start
    }

    /// Change in intensity per unit length
    pub fn slope(&self) -> f64 {
        (self.magnitude_end - self.magnitude_start) / self.length()
    }

    /// Intensity at `x`; zero outside `[start, end]`
    pub fn intensity_at(&self, x: f64) -> f64 {
        if x < self.start || x > self.end {
            0.0
        } else {
            self.magnitude_start + self.slope() * (x - self.start)
        }
    }

    /// Total resultant force: trapezoid area
    pub fn resultant(&self) -> f64 {
        (self.magnitude_start + self.magnitude_end) / 2.0 * self.length()
    }

    /// Position of the resultant.
    ///
    /// Falls back to the midpoint when the resultant vanishes (equal and
    /// opposite end intensities), where the load reduces to a pure couple.
    pub fn centroid(&self) -> f64 {
        let sum = self.magnitude_start + self.magnitude_end;
        if sum == 0.0 {
            return (self.start + self.end) / 2.0;
        }
        self.start + self.length() * (self.magnitude_start + 2.0 * self.magnitude_end) / (3.0 * sum)
    }

    /// `∫ w dx` and `∫ w·(x - about) dx` over the part of the load inside
    /// `[lo, hi]`. Both are zero when the intervals do not overlap.
    pub fn integrals_between(&self, lo: f64, hi: f64, about: f64) -> (f64, f64) {
        let a = lo.max(self.start);
        let b = hi.min(self.end);
        if b <= a {
            return (0.0, 0.0);
        }
        let l = b - a;
        let wa = self.intensity_at(a);
        let k = self.slope();

        let force = wa * l + k * l * l / 2.0;
        // first moment about `a`, then shifted to `about`
        let moment_about_a = wa * l * l / 2.0 + k * l * l * l / 3.0;
        (force, moment_about_a + (a - about) * force)
    }
}

// ============================================================================
// Hinge
// ============================================================================

/// Side of an internal release on which the zero-moment condition is written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HingeSide {
    Left,
    Right,
}

impl HingeSide {
    /// Normalize `"l"`, `"left"`, `"r"`, `"right"` (any case)
    pub fn from_alias(raw: &str) -> Option<HingeSide> {
        match raw.trim().to_lowercase().as_str() {
            "l" | "left" => Some(HingeSide::Left),
            "r" | "right" => Some(HingeSide::Right),
            _ => None,
        }
    }
}

/// Internal release: bending moment is zero at `position`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hinge {
    pub position: f64,
    pub side: HingeSide,
}

impl Hinge {
    pub fn new(position: f64, side: HingeSide) -> Self {
        Hinge { position, side }
    }
}
