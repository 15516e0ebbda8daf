//! # Beam Model
//!
//! The validated, typed description of one beam: its length, its supports
//! and everything applied to it. Every position is checked against the beam
//! when an entity is added, so nothing invalid ever reaches the solver.
//!
//! ## Example
//!
//! ```rust
//! use flexure_core::loads::{Load, PointLoad};
//! use flexure_core::model::{Beam, BeamModel};
//! use flexure_core::supports::{Support, SupportKind};
//!
//! let mut model = BeamModel::new(Beam::new(10.0)?);
//! model.add_support(Support::new(0.0, SupportKind::Pin, "A"))?;
//! model.add_support(Support::new(10.0, SupportKind::Roller, "B"))?;
//! model.add_load(Load::Point(PointLoad::new(5.0, 10.0)))?;
//!
//! assert!(model.add_load(Load::Point(PointLoad::new(12.0, 1.0))).is_err());
//! # Ok::<(), flexure_core::errors::FlexureError>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{FlexureError, FlexureResult};
use crate::loads::{Hinge, Load};
use crate::supports::Support;

/// Coordinate frame `0 <= x <= length`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BeamRecord")]
pub struct Beam {
    length: f64,
}

/// Wire shape of [`Beam`]; deserialization goes through [`Beam::new`]
#[derive(Deserialize)]
struct BeamRecord {
    length: f64,
}

impl TryFrom<BeamRecord> for Beam {
    type Error = FlexureError;

    fn try_from(record: BeamRecord) -> FlexureResult<Self> {
        Beam::new(record.length)
    }
}

impl Beam {
    /// Create a beam; the length must be finite and positive
    pub fn new(length: f64) -> FlexureResult<Self> {
        check_finite("beamLength", length)?;
        if length <= 0.0 {
            return Err(FlexureError::validation(
                "beamLength",
                length.to_string(),
                "Beam length must be positive",
            ));
        }
        Ok(Beam { length })
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    /// Check that `position` lies on the beam
    pub fn check_position(&self, field: &str, position: f64) -> FlexureResult<()> {
        check_finite(field, position)?;
        if position < 0.0 || position > self.length {
            return Err(FlexureError::validation(
                field,
                position.to_string(),
                format!("Position must lie within [0, {}]", self.length),
            ));
        }
        Ok(())
    }
}

/// Reject NaN and infinities with a field-specific message
pub fn check_finite(field: &str, value: f64) -> FlexureResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(FlexureError::validation(
            field,
            value.to_string(),
            "Value must be a finite number",
        ))
    }
}

/// A beam together with its supports, loads and hinges.
///
/// Deserialized models are rebuilt through the `add_*` checks, and their
/// supports always start unsolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BeamModelRecord")]
pub struct BeamModel {
    beam: Beam,
    supports: Vec<Support>,
    loads: Vec<Load>,
    hinges: Vec<Hinge>,
}

#[derive(Deserialize)]
struct BeamModelRecord {
    beam: BeamRecord,
    #[serde(default)]
    supports: Vec<Support>,
    #[serde(default)]
    loads: Vec<Load>,
    #[serde(default)]
    hinges: Vec<Hinge>,
}

impl TryFrom<BeamModelRecord> for BeamModel {
    type Error = FlexureError;

    fn try_from(record: BeamModelRecord) -> FlexureResult<Self> {
        let mut model = BeamModel::new(Beam::try_from(record.beam)?);
        for support in record.supports {
            model.add_support(support)?;
        }
        for load in record.loads {
            model.add_load(load)?;
        }
        for hinge in record.hinges {
            model.add_hinge(hinge)?;
        }
        Ok(model)
    }
}

impl BeamModel {
    /// Parse a serialized model, reporting rule violations as
    /// [`FlexureError::Validation`] rather than as a JSON error
    pub fn from_json(json: &str) -> FlexureResult<Self> {
        let record: BeamModelRecord = serde_json::from_str(json)?;
        BeamModel::try_from(record)
    }

    /// Create an empty model on `beam`
    pub fn new(beam: Beam) -> Self {
        BeamModel {
            beam,
            supports: Vec::new(),
            loads: Vec::new(),
            hinges: Vec::new(),
        }
    }

    /// Add a support. Unlabelled supports are named `R1`, `R2`, ... by index.
    pub fn add_support(&mut self, support: Support) -> FlexureResult<()> {
        let index = self.supports.len();
        self.beam
            .check_position(&format!("supports[{}].distance", index), support.position())?;
        let support = if support.label().trim().is_empty() {
            Support::new(support.position(), support.kind(), format!("R{}", index + 1))
        } else {
            support
        };
        self.supports.push(support);
        Ok(())
    }

    /// Add an applied load
    pub fn add_load(&mut self, load: Load) -> FlexureResult<()> {
        let field = format!("loads[{}]", self.loads.len());
        match &load {
            Load::Point(p) => {
                self.beam.check_position(&format!("{field}.distance"), p.position)?;
                check_finite(&format!("{field}.magnitude"), p.magnitude)?;
            }
            Load::Moment(m) => {
                self.beam.check_position(&format!("{field}.distance"), m.position)?;
                check_finite(&format!("{field}.magnitude"), m.magnitude)?;
            }
            Load::Distributed(d) => {
                self.beam.check_position(&format!("{field}.start"), d.start)?;
                self.beam.check_position(&format!("{field}.end"), d.end)?;
                if d.end <= d.start {
                    return Err(FlexureError::validation(
                        format!("{field}.end"),
                        d.end.to_string(),
                        format!("End must be greater than start ({})", d.start),
                    ));
                }
                check_finite(&format!("{field}.magnitudeStart"), d.magnitude_start)?;
                check_finite(&format!("{field}.magnitudeEnd"), d.magnitude_end)?;
            }
        }
        self.loads.push(load);
        Ok(())
    }

    /// Add an internal hinge
    pub fn add_hinge(&mut self, hinge: Hinge) -> FlexureResult<()> {
        self.beam
            .check_position(&format!("hinges[{}].distance", self.hinges.len()), hinge.position)?;
        self.hinges.push(hinge);
        Ok(())
    }

    pub fn beam(&self) -> &Beam {
        &self.beam
    }

    pub fn length(&self) -> f64 {
        self.beam.length()
    }

    pub fn supports(&self) -> &[Support] {
        &self.supports
    }

    pub(crate) fn supports_mut(&mut self) -> &mut [Support] {
        &mut self.supports
    }

    pub fn loads(&self) -> &[Load] {
        &self.loads
    }

    pub fn hinges(&self) -> &[Hinge] {
        &self.hinges
    }

    /// True once every support carries its solved reaction
    pub fn is_solved(&self) -> bool {
        !self.supports.is_empty() && self.supports.iter().all(Support::is_solved)
    }

    /// Beam ends plus every support, load boundary and hinge position,
    /// sorted ascending (duplicates kept).
    pub fn critical_positions(&self) -> Vec<f64> {
        let mut positions = vec![0.0, self.length()];
        positions.extend(self.supports.iter().map(Support::position));
        positions.extend(self.loads.iter().flat_map(Load::critical_positions));
        positions.extend(self.hinges.iter().map(|h| h.position));
        positions.sort_by(f64::total_cmp);
        positions
    }
}
