//! Applied loads and their equilibrium contributions
//!
//! # Overview
//!
//! - [`PointLoad`] - concentrated transverse force
//! - [`PointMoment`] - concentrated couple
//! - [`DistributedLoad`] - UDL / UVL over an interval
//! - [`Hinge`] - internal moment release (not a load, but positioned like one)
//! - [`Load`] - the closed set of applied actions
//! - [`Region`] - which part of the beam a free-body sum runs over
//!
//! # Example
//!
//! ```
//! use flexure_core::loads::{DistributedLoad, Load, PointLoad, Region};
//!
//! let loads = vec![
//!     Load::Point(PointLoad::new(5.0, 10.0)),
//!     Load::Distributed(DistributedLoad::uniform(0.0, 10.0, 2.0)),
//! ];
//!
//! let total: f64 = loads.iter().map(|l| l.downward_force(Region::Whole)).sum();
//! assert!((total - 30.0).abs() < 1e-12);
//! ```

pub mod discrete;

pub use discrete::{DistributedLoad, Hinge, HingeSide, PointLoad, PointMoment};

use serde::{Deserialize, Serialize};

/// Portion of the beam a free-body sum runs over.
///
/// Concentrated actions sitting exactly on the boundary of `LeftOf`/`RightOf`
/// are excluded from both.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Region {
    /// The whole beam
    Whole,
    /// Everything strictly left of the position
    LeftOf(f64),
    /// Everything strictly right of the position
    RightOf(f64),
}

impl Region {
    /// Free body on one side of an internal hinge
    pub fn beside(hinge: &Hinge) -> Region {
        match hinge.side {
            HingeSide::Left => Region::LeftOf(hinge.position),
            HingeSide::Right => Region::RightOf(hinge.position),
        }
    }

    /// Whether a concentrated action at `x` belongs to this region
    pub fn contains(&self, x: f64) -> bool {
        match *self {
            Region::Whole => true,
            Region::LeftOf(h) => x < h,
            Region::RightOf(h) => x > h,
        }
    }

    /// `(lo, hi)` window for integrating distributed actions
    pub fn bounds(&self) -> (f64, f64) {
        match *self {
            Region::Whole => (f64::NEG_INFINITY, f64::INFINITY),
            Region::LeftOf(h) => (f64::NEG_INFINITY, h),
            Region::RightOf(h) => (h, f64::INFINITY),
        }
    }
}

/// An applied action on the beam
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Load {
    Point(PointLoad),
    Moment(PointMoment),
    Distributed(DistributedLoad),
}

impl Load {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Load::Point(_) => "Point",
            Load::Moment(_) => "Moment",
            Load::Distributed(d) if d.is_uniform() => "UDL",
            Load::Distributed(_) => "UVL",
        }
    }

    /// Positions where this load causes a discontinuity or a change of shape
    pub fn critical_positions(&self) -> Vec<f64> {
        match self {
            Load::Point(p) => vec![p.position],
            Load::Moment(m) => vec![m.position],
            Load::Distributed(d) => vec![d.start, d.end],
        }
    }

    /// Resultant downward force of the part of this load inside `region`
    pub fn downward_force(&self, region: Region) -> f64 {
        match self {
            Load::Point(p) if region.contains(p.position) => p.magnitude,
            Load::Point(_) | Load::Moment(_) => 0.0,
            Load::Distributed(d) => {
                let (lo, hi) = region.bounds();
                d.integrals_between(lo, hi, 0.0).0
            }
        }
    }

    /// Counter-clockwise moment about `about` of the part of this load inside `region`
    pub fn ccw_moment_about(&self, about: f64, region: Region) -> f64 {
        match self {
            // a downward force to the right of the pivot turns clockwise
            Load::Point(p) if region.contains(p.position) => -p.magnitude * (p.position - about),
            Load::Moment(m) if region.contains(m.position) => m.magnitude,
            Load::Point(_) | Load::Moment(_) => 0.0,
            Load::Distributed(d) => {
                let (lo, hi) = region.bounds();
                -d.integrals_between(lo, hi, about).1
            }
        }
    }
}
