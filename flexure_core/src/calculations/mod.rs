//! # Beam Calculations
//!
//! The analysis pipeline, one module per stage:
//!
//! - [`equilibrium`] - assembles `A·u = b` for the unknown reaction components
//! - [`solver`] - LU solve and write-back into the supports
//! - [`internal_forces`] - piecewise shear and moment functions
//! - [`diagram`] - sampling, critical points and extrema
//! - [`analysis`] - [`BeamAnalysis`], which owns a model and drives the stages
//!
//! Every stage is a plain function over borrowed data except the solver's
//! write-back, which settles each support exactly once.

pub mod analysis;
pub mod diagram;
pub mod equilibrium;
pub mod internal_forces;
pub mod solver;

// Re-export commonly used types
pub use analysis::{analyze, BeamAnalysis};
pub use diagram::{CriticalKind, CriticalPoint, DiagramData, DiagramExtrema, Extremum, SamplePoint};
pub use equilibrium::{formulate, EquilibriumSystem};
pub use internal_forces::{InternalForces, Limit};
pub use solver::{solve_system, Solution, PIVOT_TOLERANCE};
