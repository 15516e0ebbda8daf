//! Linear Solver
//!
//! Dense LU factorisation with partial pivoting for the (small) equilibrium
//! system, plus the write-back of solved components into their supports.
//!
//! Near-singular configurations (a roller sitting on a pin, a hinge with
//! nothing on its side) are real inputs, so singularity is decided by an
//! explicit threshold, [`PIVOT_TOLERANCE`], rather than by whatever the
//! floating-point arithmetic happens to produce.

use log::{debug, warn};
use nalgebra::DVector;

use crate::errors::{FlexureError, FlexureResult};
use crate::model::BeamModel;
use crate::supports::Reaction;

use super::equilibrium::EquilibriumSystem;

/// A system is singular when some pivot of its LU factorisation satisfies
/// `|u_ii| <= PIVOT_TOLERANCE * max|a_ij|`.
pub const PIVOT_TOLERANCE: f64 = 1e-10;

/// Pivots within this factor of the threshold are solved but logged
const NEAR_SINGULAR_FACTOR: f64 = 100.0;

/// Solved unknowns, in the system's unknown order
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub values: DVector<f64>,
    /// `max |A·u - b|`
    pub residual: f64,
}

/// Solve `A·u = b`.
///
/// Fails with [`FlexureError::SingularSystem`] naming the first unknown whose
/// pivot falls below the tolerance.
pub fn solve_system(system: &EquilibriumSystem) -> FlexureResult<Solution> {
    let scale = system.matrix.amax();
    let threshold = PIVOT_TOLERANCE * scale;
    let name_of = |i: usize| {
        system
            .unknowns
            .get(i)
            .map(|u| u.name.clone())
            .unwrap_or_else(|| format!("#{}", i))
    };

    if scale == 0.0 {
        return Err(FlexureError::singular(name_of(0), 0.0, PIVOT_TOLERANCE));
    }

    let lu = system.matrix.clone().lu();
    let upper = lu.u();
    for (i, pivot) in upper.diagonal().iter().enumerate() {
        let relative = pivot.abs() / scale;
        if pivot.abs() <= threshold {
            return Err(FlexureError::singular(name_of(i), relative, PIVOT_TOLERANCE));
        }
        if pivot.abs() <= threshold * NEAR_SINGULAR_FACTOR {
            warn!(
                "near-singular pivot {:e} at unknown '{}' (tolerance {:e})",
                relative,
                name_of(i),
                PIVOT_TOLERANCE
            );
        }
    }

    let values = lu
        .solve(&system.rhs)
        .ok_or_else(|| FlexureError::singular(name_of(0), 0.0, PIVOT_TOLERANCE))?;
    let residual = (&system.matrix * &values - &system.rhs).amax();
    debug!("solved {} unknowns, residual {:e}", values.len(), residual);

    Ok(Solution { values, residual })
}

/// Write solved components into their supports (the one-shot
/// `Unsolved -> Solved` transition).
pub fn apply_solution(model: &mut BeamModel, system: &EquilibriumSystem, solution: &Solution) {
    let mut reactions = vec![Reaction::default(); model.supports().len()];
    for (unknown, value) in system.unknowns.iter().zip(solution.values.iter()) {
        reactions[unknown.support] = reactions[unknown.support].with(unknown.component, *value);
    }

    for (support, reaction) in model.supports_mut().iter_mut().zip(reactions) {
        if !support.settle(reaction) {
            debug!("support '{}' already solved, keeping recorded reaction", support.label());
        }
    }
}
