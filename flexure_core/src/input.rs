//! # Beam Input
//!
//! The request-shaped description a caller hands to the engine, and the
//! strict validation step that turns it into a [`BeamModel`].
//!
//! Field names follow the JSON contract of the beam service
//! (`beamLength`, `pointForces`, `udls`, ...). Validation is eager: the first
//! invalid field is reported with its full path (`udls[1].end`) and nothing
//! is solved.
//!
//! ## Example
//!
//! ```rust
//! use flexure_core::input::BeamInput;
//!
//! let json = r#"{
//!     "beamLength": 10,
//!     "supports": [
//!         {"distance": 0, "type": "pin", "label": "A"},
//!         {"distance": 10, "type": "Roller"}
//!     ],
//!     "pointForces": [{"distance": 5, "magnitude": 10}]
//! }"#;
//!
//! let input: BeamInput = serde_json::from_str(json).unwrap();
//! let model = input.to_model().unwrap();
//! assert_eq!(model.supports().len(), 2);
//! assert_eq!(model.supports()[1].label(), "R2");
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{FlexureError, FlexureResult};
use crate::loads::{DistributedLoad, Hinge, HingeSide, Load, PointLoad, PointMoment};
use crate::model::{check_finite, Beam, BeamModel};
use crate::settings::AnalysisSettings;
use crate::supports::{Support, SupportKind};

/// Support description: `{distance, type, label?}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportInput {
    pub distance: f64,
    /// Any alias accepted by [`SupportKind::from_alias`]
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub label: Option<String>,
}

/// Point force: `{distance, magnitude, inverted?}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointForceInput {
    pub distance: f64,
    /// Downward positive, or upward positive when `inverted` is set
    pub magnitude: f64,
    #[serde(default)]
    pub inverted: bool,
}

/// Point moment: `{distance, magnitude}`, counter-clockwise positive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointMomentInput {
    pub distance: f64,
    pub magnitude: f64,
}

/// Distributed load: `{start, end, magnitudeStart, magnitudeEnd}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributedLoadInput {
    pub start: f64,
    pub end: f64,
    pub magnitude_start: f64,
    pub magnitude_end: f64,
}

/// Hinge release: `{distance, side}` with side `l`/`left`/`r`/`right`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HingeInput {
    pub distance: f64,
    pub side: String,
}

/// Complete beam description as received from a caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeamInput {
    pub beam_length: f64,
    #[serde(default)]
    pub supports: Vec<SupportInput>,
    #[serde(default)]
    pub point_forces: Vec<PointForceInput>,
    #[serde(default)]
    pub point_moments: Vec<PointMomentInput>,
    #[serde(default)]
    pub udls: Vec<DistributedLoadInput>,
    #[serde(default)]
    pub hinges: Vec<HingeInput>,
    /// Optional sampling overrides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<AnalysisSettings>,
}

impl BeamInput {
    /// Start an input for a beam of the given length with nothing on it
    pub fn new(beam_length: f64) -> Self {
        BeamInput {
            beam_length,
            supports: Vec::new(),
            point_forces: Vec::new(),
            point_moments: Vec::new(),
            udls: Vec::new(),
            hinges: Vec::new(),
            settings: None,
        }
    }

    /// Add a support (builder style)
    pub fn with_support(mut self, distance: f64, kind: impl Into<String>, label: Option<&str>) -> Self {
        self.supports.push(SupportInput {
            distance,
            kind: kind.into(),
            label: label.map(str::to_string),
        });
        self
    }

    /// Add a downward-positive point force (builder style)
    pub fn with_point_force(mut self, distance: f64, magnitude: f64) -> Self {
        self.point_forces.push(PointForceInput {
            distance,
            magnitude,
            inverted: false,
        });
        self
    }

    /// Add a counter-clockwise point moment (builder style)
    pub fn with_point_moment(mut self, distance: f64, magnitude: f64) -> Self {
        self.point_moments.push(PointMomentInput {
            distance,
            magnitude,
        });
        self
    }

    /// Add a distributed load (builder style)
    pub fn with_udl(mut self, start: f64, end: f64, magnitude_start: f64, magnitude_end: f64) -> Self {
        self.udls.push(DistributedLoadInput {
            start,
            end,
            magnitude_start,
            magnitude_end,
        });
        self
    }

    /// Add a hinge (builder style)
    pub fn with_hinge(mut self, distance: f64, side: impl Into<String>) -> Self {
        self.hinges.push(HingeInput {
            distance,
            side: side.into(),
        });
        self
    }

    /// Sampling settings, falling back to the defaults
    pub fn settings(&self) -> AnalysisSettings {
        self.settings.unwrap_or_default()
    }

    /// Validate every field and build the typed model.
    pub fn to_model(&self) -> FlexureResult<BeamModel> {
        let beam = Beam::new(self.beam_length)?;
        if let Some(settings) = &self.settings {
            settings.validate()?;
        }
        let mut model = BeamModel::new(beam);

        for (i, s) in self.supports.iter().enumerate() {
            beam.check_position(&format!("supports[{i}].distance"), s.distance)?;
            let kind = SupportKind::from_alias(&s.kind).ok_or_else(|| {
                FlexureError::validation(
                    format!("supports[{i}].type"),
                    s.kind.clone(),
                    "Unrecognized support type (expected pin, roller or fixed)",
                )
            })?;
            let label = s.label.clone().unwrap_or_default();
            model.add_support(Support::new(s.distance, kind, label))?;
        }

        for (i, f) in self.point_forces.iter().enumerate() {
            beam.check_position(&format!("pointForces[{i}].distance"), f.distance)?;
            check_finite(&format!("pointForces[{i}].magnitude"), f.magnitude)?;
            let load = if f.inverted {
                PointLoad::upward(f.distance, f.magnitude)
            } else {
                PointLoad::new(f.distance, f.magnitude)
            };
            model.add_load(Load::Point(load))?;
        }

        for (i, m) in self.point_moments.iter().enumerate() {
            beam.check_position(&format!("pointMoments[{i}].distance"), m.distance)?;
            check_finite(&format!("pointMoments[{i}].magnitude"), m.magnitude)?;
            model.add_load(Load::Moment(PointMoment::new(m.distance, m.magnitude)))?;
        }

        for (i, d) in self.udls.iter().enumerate() {
            beam.check_position(&format!("udls[{i}].start"), d.start)?;
            beam.check_position(&format!("udls[{i}].end"), d.end)?;
            if d.end <= d.start {
                return Err(FlexureError::validation(
                    format!("udls[{i}].end"),
                    d.end.to_string(),
                    format!("End must be greater than start ({})", d.start),
                ));
            }
            check_finite(&format!("udls[{i}].magnitudeStart"), d.magnitude_start)?;
            check_finite(&format!("udls[{i}].magnitudeEnd"), d.magnitude_end)?;
            model.add_load(Load::Distributed(DistributedLoad::new(
                d.start,
                d.end,
                d.magnitude_start,
                d.magnitude_end,
            )))?;
        }

        for (i, h) in self.hinges.iter().enumerate() {
            beam.check_position(&format!("hinges[{i}].distance"), h.distance)?;
            let side = HingeSide::from_alias(&h.side).ok_or_else(|| {
                FlexureError::validation(
                    format!("hinges[{i}].side"),
                    h.side.clone(),
                    "Unrecognized hinge side (expected l, left, r or right)",
                )
            })?;
            model.add_hinge(Hinge::new(h.distance, side))?;
        }

        Ok(model)
    }
}

impl TryFrom<&BeamInput> for BeamModel {
    type Error = FlexureError;

    fn try_from(input: &BeamInput) -> FlexureResult<Self> {
        input.to_model()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validation_field(input: &BeamInput) -> String {
        match input.to_model() {
            Err(FlexureError::Validation { field, .. }) => field,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    fn simple_input() -> BeamInput {
        BeamInput::new(10.0)
            .with_support(0.0, "pin", Some("A"))
            .with_support(10.0, "roller", Some("B"))
    }

    #[test]
    fn test_full_request_parses() {
        let json = r#"{
            "beamLength": "12",
            "supports": [{"distance": 0, "type": "fixed", "label": "A"}],
            "pointForces": [{"distance": 3, "magnitude": 5, "inverted": true}],
            "pointMoments": [{"distance": 6, "magnitude": -2}],
            "udls": [{"start": 0, "end": 4, "magnitudeStart": 1, "magnitudeEnd": 3}],
            "hinges": [{"distance": 8, "side": "l"}]
        }"#;
        // beamLength must be numeric; strings are rejected at the serde layer
        assert!(serde_json::from_str::<BeamInput>(json).is_err());

        let json = json.replace("\"12\"", "12");
        let input: BeamInput = serde_json::from_str(&json).unwrap();
        let model = input.to_model().unwrap();
        assert_eq!(model.supports()[0].kind(), SupportKind::Fixed);
        assert_eq!(model.loads().len(), 3);
        assert_eq!(model.hinges()[0].side, HingeSide::Left);
        // inverted force is stored downward positive
        assert_eq!(model.loads()[0], Load::Point(PointLoad::new(3.0, -5.0)));
    }

    #[test]
    fn test_missing_collections_default_to_empty() {
        let input: BeamInput = serde_json::from_str(r#"{"beamLength": 4}"#).unwrap();
        let model = input.to_model().unwrap();
        assert!(model.supports().is_empty());
        assert!(model.loads().is_empty());
        assert_eq!(input.settings(), AnalysisSettings::default());
    }

    #[test]
    fn test_unknown_support_type_rejected() {
        let input = simple_input().with_support(5.0, "spring", None);
        assert_eq!(validation_field(&input), "supports[2].type");
    }

    #[test]
    fn test_udl_end_before_start_rejected() {
        let input = simple_input().with_udl(0.0, 4.0, 1.0, 1.0).with_udl(6.0, 6.0, 1.0, 1.0);
        assert_eq!(validation_field(&input), "udls[1].end");

        let input = simple_input().with_udl(5.0, 2.0, 1.0, 1.0);
        assert_eq!(validation_field(&input), "udls[0].end");
    }

    #[test]
    fn test_positions_outside_beam_rejected() {
        assert_eq!(
            validation_field(&simple_input().with_point_force(10.5, 1.0)),
            "pointForces[0].distance"
        );
        assert_eq!(
            validation_field(&simple_input().with_point_moment(-1.0, 1.0)),
            "pointMoments[0].distance"
        );
        assert_eq!(
            validation_field(&simple_input().with_hinge(11.0, "r")),
            "hinges[0].distance"
        );
    }

    #[test]
    fn test_bad_hinge_side_rejected() {
        assert_eq!(validation_field(&simple_input().with_hinge(5.0, "up")), "hinges[0].side");
    }

    #[test]
    fn test_non_positive_length_rejected() {
        assert_eq!(validation_field(&BeamInput::new(0.0)), "beamLength");
        assert_eq!(validation_field(&BeamInput::new(-2.0)), "beamLength");
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let mut input = simple_input();
        input.settings = Some(AnalysisSettings {
            grid_intervals: 2,
            ..Default::default()
        });
        assert_eq!(validation_field(&input), "settings.gridIntervals");
    }

    #[test]
    fn test_try_from() {
        let model = BeamModel::try_from(&simple_input()).unwrap();
        assert_eq!(model.length(), 10.0);
    }
}
