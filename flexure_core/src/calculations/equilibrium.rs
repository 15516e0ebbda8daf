//! Equilibrium Formulation
//!
//! Builds the linear system `A·u = b` whose unknowns are the reaction
//! components of every support.
//!
//! ## Unknown order
//! Supports in ascending position (input order breaks ties), each contributing
//! its components in `Rx, Ry, M` order.
//!
//! ## Equation order
//! 1. ΣFx = 0
//! 2. ΣFy = 0
//! 3. ΣM about x = 0
//! 4. One release equation per hinge, ascending position: the moment about the
//!    hinge of everything strictly on the hinge's side is zero.
//!
//! Forces are upward positive and moments counter-clockwise positive
//! throughout; applied loads are converted from their downward-positive input
//! convention by [`Load::downward_force`] and [`Load::ccw_moment_about`].

use log::debug;
use nalgebra::{DMatrix, DVector};

use crate::errors::{FlexureError, FlexureResult};
use crate::loads::{Hinge, Load, Region};
use crate::model::BeamModel;
use crate::supports::{ReactionComponent, Support};

/// One unknown reaction component
#[derive(Debug, Clone, PartialEq)]
pub struct Unknown {
    /// Index of the owning support in the model's input order
    pub support: usize,
    pub component: ReactionComponent,
    /// Human-readable name, e.g. `"A.Ry"`
    pub name: String,
}

/// What a row of the system expresses
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Equation {
    ForceX,
    ForceY,
    /// Global moment balance about `x = 0`
    MomentAboutOrigin,
    /// Zero moment at an internal release
    HingeRelease(Hinge),
}

/// The assembled linear system
#[derive(Debug, Clone)]
pub struct EquilibriumSystem {
    pub matrix: DMatrix<f64>,
    pub rhs: DVector<f64>,
    pub unknowns: Vec<Unknown>,
    pub equations: Vec<Equation>,
}

/// Order unknowns by support position, then by component
fn collect_unknowns(supports: &[Support]) -> Vec<Unknown> {
    let mut order: Vec<usize> = (0..supports.len()).collect();
    order.sort_by(|&a, &b| supports[a].position().total_cmp(&supports[b].position()));

    order
        .into_iter()
        .flat_map(|index| {
            let support = &supports[index];
            support.kind().components().iter().map(move |&component| Unknown {
                support: index,
                component,
                name: support.unknown_name(component),
            })
        })
        .collect()
}

/// Coefficient of one unknown in a moment equation about `about`,
/// restricted to `region`
fn moment_coefficient(support: &Support, component: ReactionComponent, about: f64, region: Region) -> f64 {
    if !region.contains(support.position()) {
        return 0.0;
    }
    match component {
        ReactionComponent::Rx => 0.0,
        ReactionComponent::Ry => support.position() - about,
        ReactionComponent::M => 1.0,
    }
}

/// Build the equilibrium system for `model`.
///
/// Fails with [`FlexureError::Indeterminate`] when the number of equations
/// does not match the number of unknown reaction components.
pub fn formulate(model: &BeamModel) -> FlexureResult<EquilibriumSystem> {
    let supports = model.supports();
    let loads = model.loads();
    let unknowns = collect_unknowns(supports);

    let mut hinges: Vec<Hinge> = model.hinges().to_vec();
    hinges.sort_by(|a, b| a.position.total_cmp(&b.position));

    let mut equations = vec![
        Equation::ForceX,
        Equation::ForceY,
        Equation::MomentAboutOrigin,
    ];
    equations.extend(hinges.into_iter().map(Equation::HingeRelease));

    if equations.len() != unknowns.len() {
        return Err(FlexureError::Indeterminate {
            unknowns: unknowns.len(),
            equations: equations.len(),
        });
    }

    let n = unknowns.len();
    let mut matrix = DMatrix::<f64>::zeros(n, n);
    let mut rhs = DVector::<f64>::zeros(n);

    for (row, equation) in equations.iter().enumerate() {
        for (col, unknown) in unknowns.iter().enumerate() {
            let support = &supports[unknown.support];
            matrix[(row, col)] = match equation {
                Equation::ForceX if unknown.component == ReactionComponent::Rx => 1.0,
                Equation::ForceY if unknown.component == ReactionComponent::Ry => 1.0,
                Equation::ForceX | Equation::ForceY => 0.0,
                Equation::MomentAboutOrigin => {
                    moment_coefficient(support, unknown.component, 0.0, Region::Whole)
                }
                Equation::HingeRelease(hinge) => {
                    moment_coefficient(support, unknown.component, hinge.position, Region::beside(hinge))
                }
            };
        }

        // Loads are transverse: nothing to balance horizontally
        rhs[row] = match equation {
            Equation::ForceX => 0.0,
            Equation::ForceY => loads.iter().map(|l| l.downward_force(Region::Whole)).sum(),
            Equation::MomentAboutOrigin => -loads
                .iter()
                .map(|l| l.ccw_moment_about(0.0, Region::Whole))
                .sum::<f64>(),
            Equation::HingeRelease(hinge) => -loads
                .iter()
                .map(|l| l.ccw_moment_about(hinge.position, Region::beside(hinge)))
                .sum::<f64>(),
        };
    }

    debug!(
        "formulated {}x{} equilibrium system ({} hinge releases)",
        n,
        n,
        n.saturating_sub(3)
    );

    Ok(EquilibriumSystem {
        matrix,
        rhs,
        unknowns,
        equations,
    })
}

/// Net residuals `(ΣFy, ΣM)` of a solved model, re-derived from the stored
/// reactions, with moments taken about `about`. Both vanish for a correct
/// solution.
pub fn equilibrium_residuals(model: &BeamModel, about: f64) -> FlexureResult<(f64, f64)> {
    if !model.is_solved() {
        return Err(FlexureError::ModelNotSolved);
    }

    let mut force = 0.0;
    let mut moment = 0.0;
    for support in model.supports() {
        let reaction = support.reaction().unwrap_or_default();
        let ry = reaction.get(ReactionComponent::Ry);
        force += ry;
        moment += ry * (support.position() - about) + reaction.get(ReactionComponent::M);
    }
    for load in model.loads() {
        force -= load.downward_force(Region::Whole);
        moment += load.ccw_moment_about(about, Region::Whole);
    }
    Ok((force, moment))
}

/// Sum of all applied downward force, handy for reporting
pub fn total_applied_load(loads: &[Load]) -> f64 {
    loads.iter().map(|l| l.downward_force(Region::Whole)).sum()
}
