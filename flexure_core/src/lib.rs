//! # flexure_core - Beam Analysis Engine
//!
//! `flexure_core` computes the support reactions, shear force and bending
//! moment of a straight, statically loaded beam. Inputs and outputs are
//! JSON-serializable so the engine can sit behind a CLI, a web service or a
//! plotting front end without glue code.
//!
//! ## Design Philosophy
//!
//! - **Validate first**: loose input records become typed primitives before any solving
//! - **JSON-First**: input, report and errors implement Serialize/Deserialize
//! - **Rich Errors**: structured error types naming the offending field or unknown
//! - **Exact sampling**: extrema come from closed-form stationary points, not the grid
//!
//! ## Sign convention
//!
//! Applied forces and distributed loads are entered downward positive.
//! Reactions are upward positive, moments counter-clockwise positive. Shear is
//! positive when the resultant left of the cut acts upward; bending moment is
//! positive when sagging.
//!
//! ## Quick Start
//!
//! ```rust
//! use flexure_core::{analyze, BeamInput};
//!
//! let input = BeamInput::new(6.0)
//!     .with_support(0.0, "pin", None)
//!     .with_support(6.0, "roller", None)
//!     .with_udl(0.0, 6.0, 2.0, 2.0);
//!
//! let report = analyze(&input)?;
//! assert!((report.extrema.max_moment - 9.0).abs() < 1e-9);
//! assert!((report.extrema.max_moment_at - 3.0).abs() < 1e-9);
//! # Ok::<(), flexure_core::FlexureError>(())
//! ```
//!
//! ## Modules
//!
//! - [`model`] - beam geometry and the validated model
//! - [`supports`] - support kinds, reaction components, solve state
//! - [`loads`] - point forces, point moments, distributed loads, hinges
//! - [`input`] - request-shaped input records and their validation
//! - [`calculations`] - equilibrium, solver, internal forces, sampling
//! - [`report`] - serializable analysis report
//! - [`settings`] - sampling configuration
//! - [`errors`] - structured error types
//! - [`file_io`] - input loading and atomic report saves

pub mod calculations;
pub mod errors;
pub mod file_io;
pub mod input;
pub mod loads;
pub mod model;
pub mod report;
pub mod settings;
pub mod supports;

// Re-export commonly used types at crate root for convenience
pub use calculations::{analyze, BeamAnalysis};
pub use errors::{FlexureError, FlexureResult};
pub use file_io::{load_input, save_report};
pub use input::BeamInput;
pub use model::{Beam, BeamModel};
pub use report::{AnalysisReport, SCHEMA_VERSION};
pub use settings::AnalysisSettings;
