//! # Analysis Report
//!
//! Serializable snapshot of a solved analysis: reactions per support,
//! shear/moment extrema and the full diagram data.
//!
//! ## JSON shape
//!
//! ```json
//! {
//!   "schemaVersion": "0.1.0",
//!   "generatedAt": "2026-01-01T00:00:00Z",
//!   "beamLength": 10.0,
//!   "reactions": [{ "label": "A", "position": 0.0, "kind": "pin", "rx": 0.0, "ry": 5.0 }],
//!   "extrema": { "maxshearForces": 5.0, "minshearForces": -5.0, "bendingMoments": 25.0, ... },
//!   "diagram": { "length": 10.0, "shear": [...], "moment": [...], "criticalPoints": [...] }
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calculations::analysis::BeamAnalysis;
use crate::calculations::diagram::{DiagramData, DiagramExtrema};
use crate::calculations::equilibrium::total_applied_load;
use crate::errors::{FlexureError, FlexureResult};
use crate::supports::{Support, SupportKind};

/// Current schema version of report files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Solved reaction of one support
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactionReport {
    pub label: String,
    pub position: f64,
    pub kind: SupportKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rx: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ry: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub m: Option<f64>,
}

impl ReactionReport {
    fn from_support(support: &Support) -> FlexureResult<Self> {
        let reaction = support.reaction().ok_or(FlexureError::ModelNotSolved)?;
        Ok(ReactionReport {
            label: support.label().to_string(),
            position: support.position(),
            kind: support.kind(),
            rx: reaction.rx,
            ry: reaction.ry,
            m: reaction.m,
        })
    }
}

/// Complete result of one beam analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub schema_version: String,
    pub generated_at: DateTime<Utc>,
    pub beam_length: f64,
    /// Sum of applied downward force
    pub total_load: f64,
    /// In input order
    pub reactions: Vec<ReactionReport>,
    pub extrema: DiagramExtrema,
    pub diagram: DiagramData,
}

impl AnalysisReport {
    /// Snapshot a solved analysis
    pub fn from_analysis(analysis: &BeamAnalysis) -> FlexureResult<Self> {
        let diagram = analysis.diagram()?;
        let model = analysis.model();
        let reactions = model
            .supports()
            .iter()
            .map(ReactionReport::from_support)
            .collect::<FlexureResult<Vec<_>>>()?;

        Ok(AnalysisReport {
            schema_version: SCHEMA_VERSION.to_string(),
            generated_at: Utc::now(),
            beam_length: model.length(),
            total_load: total_applied_load(model.loads()),
            reactions,
            extrema: diagram.extrema,
            diagram,
        })
    }

    /// Look up a reaction by support label
    pub fn reaction(&self, label: &str) -> Option<&ReactionReport> {
        self.reactions.iter().find(|r| r.label == label)
    }

    /// Sum of vertical reactions, equal to `total_load` for a correct solution
    pub fn total_vertical_reaction(&self) -> f64 {
        self.reactions.iter().filter_map(|r| r.ry).sum()
    }
}
