//! Sampler / Diagram Generator
//!
//! Evaluates the internal-force functions on a set of stations:
//!
//! - a uniform grid of `grid_intervals` intervals for visual smoothness,
//! - every critical position (beam ends, supports, load boundaries, hinges),
//! - every stationary point of `V` or `M` found from the closed-form pieces.
//!
//! Extrema of a beam almost always sit on critical or stationary positions,
//! so they are exact rather than limited by the grid spacing.
//!
//! At a critical station where the one-sided limits differ, both values are
//! emitted, left limit first, so a plotted diagram shows the vertical jump.
//!
//! ## Example
//! ```rust
//! use flexure_core::calculations::analysis::BeamAnalysis;
//! use flexure_core::input::BeamInput;
//!
//! let input = BeamInput::new(10.0)
//!     .with_support(0.0, "pin", None)
//!     .with_support(10.0, "roller", None)
//!     .with_point_force(5.0, 10.0);
//!
//! let mut analysis = BeamAnalysis::from_input(&input)?;
//! analysis.solve()?;
//!
//! let shear = analysis.shear_values()?;
//! let peak = shear.iter().cloned().fold(f64::MIN, f64::max);
//! assert!((peak - 5.0).abs() < 1e-9);
//! # Ok::<(), flexure_core::errors::FlexureError>(())
//! ```

use log::trace;
use serde::{Deserialize, Serialize};

use crate::errors::FlexureResult;
use crate::loads::Load;
use crate::model::BeamModel;
use crate::settings::AnalysisSettings;
use crate::supports::SupportKind;

use super::internal_forces::{InternalForces, Limit};

/// Quantity sampled by a [`Samples`] iterator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quantity {
    Shear,
    Moment,
}

/// A position along the beam at which the functions are evaluated
#[derive(Debug, Clone, Copy, PartialEq)]
struct Station {
    x: f64,
    /// Both one-sided limits are evaluated here
    critical: bool,
}

/// One `(x, value)` sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplePoint {
    pub x: f64,
    pub value: f64,
}

/// What makes a critical point worth annotating
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CriticalKind {
    BeamEnd,
    Support { label: String, support: SupportKind },
    PointLoad,
    PointMoment,
    LoadBoundary,
    Hinge,
    /// Zero shear or zero load intensity between critical points
    Stationary,
}

/// Values on both sides of a critical position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriticalPoint {
    pub x: f64,
    pub kinds: Vec<CriticalKind>,
    pub shear_left: f64,
    pub shear_right: f64,
    pub moment_left: f64,
    pub moment_right: f64,
}

/// Extreme value of one quantity and where it occurs
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Extremum {
    pub max: f64,
    pub max_at: f64,
    pub min: f64,
    pub min_at: f64,
}

impl Extremum {
    /// Fold over samples. An empty sequence yields all zeros.
    pub fn from_samples(samples: impl IntoIterator<Item = SamplePoint>) -> Self {
        let mut iter = samples.into_iter();
        let Some(first) = iter.next() else {
            return Extremum::default();
        };
        iter.fold(
            Extremum {
                max: first.value,
                max_at: first.x,
                min: first.value,
                min_at: first.x,
            },
            |mut acc, p| {
                if p.value > acc.max {
                    acc.max = p.value;
                    acc.max_at = p.x;
                }
                if p.value < acc.min {
                    acc.min = p.value;
                    acc.min_at = p.x;
                }
                acc
            },
        )
    }
}

/// Shear and moment extrema over a full sample sequence.
///
/// Serialized with the legacy web response names (`maxshearForces`,
/// `bendingMoments`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DiagramExtrema {
    #[serde(rename = "maxshearForces")]
    pub max_shear: f64,
    #[serde(rename = "minshearForces")]
    pub min_shear: f64,
    #[serde(rename = "bendingMoments")]
    pub max_moment: f64,
    #[serde(rename = "minbendingMoments")]
    pub min_moment: f64,
    #[serde(rename = "maxShearAt")]
    pub max_shear_at: f64,
    #[serde(rename = "minShearAt")]
    pub min_shear_at: f64,
    #[serde(rename = "maxMomentAt")]
    pub max_moment_at: f64,
    #[serde(rename = "minMomentAt")]
    pub min_moment_at: f64,
}

impl DiagramExtrema {
    pub fn new(shear: Extremum, moment: Extremum) -> Self {
        DiagramExtrema {
            max_shear: shear.max,
            min_shear: shear.min,
            max_moment: moment.max,
            min_moment: moment.min,
            max_shear_at: shear.max_at,
            min_shear_at: shear.min_at,
            max_moment_at: moment.max_at,
            min_moment_at: moment.min_at,
        }
    }
}

/// Everything a renderer needs, independent of any image format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramData {
    pub length: f64,
    pub shear: Vec<SamplePoint>,
    pub moment: Vec<SamplePoint>,
    pub critical_points: Vec<CriticalPoint>,
    pub extrema: DiagramExtrema,
}

// =============================================================================
// SAMPLER
// =============================================================================

/// Grid stations within `merge_distance` of a critical station fold into it.
/// Distinct critical positions are never folded together, however close, so
/// each keeps its own pair of one-sided limits.
fn folds_into(last: &Station, next: &Station, merge_distance: f64) -> bool {
    if last.critical && next.critical {
        next.x == last.x
    } else {
        next.x - last.x <= merge_distance
    }
}

/// Station layout for one solved beam
#[derive(Debug, Clone)]
pub struct Sampler<'a> {
    model: &'a BeamModel,
    forces: &'a InternalForces,
    stations: Vec<Station>,
}

impl<'a> Sampler<'a> {
    /// Lay out stations for `model`, whose functions are `forces`.
    ///
    /// Fails with [`crate::errors::FlexureError::Validation`] if `settings`
    /// are out of range.
    pub fn new(
        model: &'a BeamModel,
        forces: &'a InternalForces,
        settings: &AnalysisSettings,
    ) -> FlexureResult<Self> {
        settings.validate()?;
        let length = forces.length();
        let n = settings.grid_intervals;
        let merge_distance = settings.position_tolerance * length;

        let mut stations: Vec<Station> = (0..=n)
            .map(|i| Station {
                x: length * i as f64 / n as f64,
                critical: false,
            })
            .collect();
        stations.extend(forces.breakpoints().iter().map(|&x| Station { x, critical: true }));
        stations.extend(
            forces
                .stationary_points()
                .into_iter()
                .map(|x| Station { x, critical: true }),
        );

        // critical stations sort first so merging keeps their exact position
        stations.sort_by(|a, b| a.x.total_cmp(&b.x).then(b.critical.cmp(&a.critical)));
        let mut merged: Vec<Station> = Vec::with_capacity(stations.len());
        for station in stations {
            match merged.last_mut() {
                Some(last) if folds_into(last, &station, merge_distance) => {
                    if station.critical && !last.critical {
                        *last = station;
                    }
                }
                _ => merged.push(station),
            }
        }
        trace!("sampler laid out {} stations", merged.len());

        Ok(Sampler {
            model,
            forces,
            stations: merged,
        })
    }

    /// Lazily evaluated samples of one quantity. The iterator borrows the
    /// internal forces, not the sampler.
    pub fn samples(&self, quantity: Quantity) -> Samples<'a> {
        Samples {
            forces: self.forces,
            stations: self.stations.clone().into_iter(),
            quantity,
            pending: None,
        }
    }

    pub fn shear(&self) -> Samples<'a> {
        self.samples(Quantity::Shear)
    }

    pub fn moment(&self) -> Samples<'a> {
        self.samples(Quantity::Moment)
    }

    pub fn extrema(&self) -> DiagramExtrema {
        DiagramExtrema::new(
            Extremum::from_samples(self.shear()),
            Extremum::from_samples(self.moment()),
        )
    }

    /// Critical positions with both one-sided values, ascending
    pub fn critical_points(&self) -> Vec<CriticalPoint> {
        let mut tagged: Vec<(f64, CriticalKind)> = vec![
            (0.0, CriticalKind::BeamEnd),
            (self.forces.length(), CriticalKind::BeamEnd),
        ];
        for support in self.model.supports() {
            tagged.push((
                support.position(),
                CriticalKind::Support {
                    label: support.label().to_string(),
                    support: support.kind(),
                },
            ));
        }
        for load in self.model.loads() {
            match load {
                Load::Point(p) => tagged.push((p.position, CriticalKind::PointLoad)),
                Load::Moment(m) => tagged.push((m.position, CriticalKind::PointMoment)),
                Load::Distributed(d) => {
                    tagged.push((d.start, CriticalKind::LoadBoundary));
                    tagged.push((d.end, CriticalKind::LoadBoundary));
                }
            }
        }
        for hinge in self.model.hinges() {
            tagged.push((hinge.position, CriticalKind::Hinge));
        }
        for x in self.forces.stationary_points() {
            tagged.push((x, CriticalKind::Stationary));
        }
        tagged.sort_by(|a, b| a.0.total_cmp(&b.0));

        // same grouping as critical stations: exact positions only
        let mut points: Vec<CriticalPoint> = Vec::new();
        for (x, kind) in tagged {
            match points.last_mut() {
                Some(last) if last.x == x => {
                    if !last.kinds.contains(&kind) {
                        last.kinds.push(kind);
                    }
                }
                _ => points.push(CriticalPoint {
                    x,
                    kinds: vec![kind],
                    shear_left: self.forces.shear_limit(x, Limit::Left),
                    shear_right: self.forces.shear_limit(x, Limit::Right),
                    moment_left: self.forces.moment_limit(x, Limit::Left),
                    moment_right: self.forces.moment_limit(x, Limit::Right),
                }),
            }
        }
        points
    }

    /// Collect everything into a renderer-ready bundle
    pub fn diagram(&self) -> DiagramData {
        DiagramData {
            length: self.forces.length(),
            shear: self.shear().collect(),
            moment: self.moment().collect(),
            critical_points: self.critical_points(),
            extrema: self.extrema(),
        }
    }
}

/// Ordered, lazily computed `(x, value)` samples
#[derive(Debug, Clone)]
pub struct Samples<'a> {
    forces: &'a InternalForces,
    stations: std::vec::IntoIter<Station>,
    quantity: Quantity,
    pending: Option<SamplePoint>,
}

impl Samples<'_> {
    fn eval(&self, x: f64, limit: Limit) -> f64 {
        match self.quantity {
            Quantity::Shear => self.forces.shear_limit(x, limit),
            Quantity::Moment => self.forces.moment_limit(x, limit),
        }
    }
}

/// Jumps smaller than this (relative) are not reported as two samples
const JUMP_TOLERANCE: f64 = 1e-12;

impl Iterator for Samples<'_> {
    type Item = SamplePoint;

    fn next(&mut self) -> Option<SamplePoint> {
        if let Some(point) = self.pending.take() {
            return Some(point);
        }
        let station = self.stations.next()?;

        let x = station.x;
        let right = self.eval(x, Limit::Right);
        if station.critical {
            let left = self.eval(x, Limit::Left);
            if (left - right).abs() > JUMP_TOLERANCE * (1.0 + left.abs().max(right.abs())) {
                self.pending = Some(SamplePoint { x, value: right });
                return Some(SamplePoint { x, value: left });
            }
        }
        Some(SamplePoint { x, value: right })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.stations.len() + usize::from(self.pending.is_some());
        (remaining, Some(remaining * 2))
    }
}
