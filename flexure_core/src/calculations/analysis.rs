//! # Beam Analysis
//!
//! Stateful entry point tying the pipeline together:
//!
//! ```text
//! BeamInput ──► BeamModel ──► EquilibriumSystem ──► Solution
//!                   ▲                                   │
//!                   └──────── reactions settled ◄───────┘
//!                                    │
//!                                    ▼
//!                  InternalForces ──► Sampler ──► AnalysisReport
//! ```
//!
//! Queries on an unsolved analysis fail with
//! [`FlexureError::ModelNotSolved`]. Solving is idempotent: once every
//! support holds a reaction, further calls to [`BeamAnalysis::solve`] do not
//! touch them.
//!
//! ## Example
//! ```rust
//! use flexure_core::calculations::analysis::BeamAnalysis;
//! use flexure_core::input::BeamInput;
//!
//! let input = BeamInput::new(6.0)
//!     .with_support(0.0, "fixed", None)
//!     .with_udl(0.0, 6.0, 2.0, 2.0);
//!
//! let mut analysis = BeamAnalysis::from_input(&input)?;
//! analysis.solve()?;
//! let extrema = analysis.extrema()?;
//! assert!((extrema.min_moment + 36.0).abs() < 1e-9);
//! # Ok::<(), flexure_core::errors::FlexureError>(())
//! ```

use log::{debug, info};

use crate::errors::{FlexureError, FlexureResult};
use crate::input::BeamInput;
use crate::model::BeamModel;
use crate::report::AnalysisReport;
use crate::settings::AnalysisSettings;

use super::diagram::{DiagramData, DiagramExtrema, Sampler, Samples};
use super::equilibrium::{equilibrium_residuals, formulate};
use super::internal_forces::InternalForces;
use super::solver::{apply_solution, solve_system};

/// A beam model together with its (eventual) solution
#[derive(Debug, Clone)]
pub struct BeamAnalysis {
    model: BeamModel,
    settings: AnalysisSettings,
    forces: Option<InternalForces>,
}

impl BeamAnalysis {
    pub fn new(model: BeamModel) -> Self {
        BeamAnalysis {
            model,
            settings: AnalysisSettings::default(),
            forces: None,
        }
    }

    /// Replace the sampling settings after checking they are in range
    pub fn with_settings(mut self, settings: AnalysisSettings) -> FlexureResult<Self> {
        settings.validate()?;
        self.settings = settings;
        Ok(self)
    }

    /// Validate `input` and build an unsolved analysis with its settings
    pub fn from_input(input: &BeamInput) -> FlexureResult<Self> {
        BeamAnalysis::new(input.to_model()?).with_settings(input.settings())
    }

    pub fn model(&self) -> &BeamModel {
        &self.model
    }

    pub fn settings(&self) -> &AnalysisSettings {
        &self.settings
    }

    pub fn is_solved(&self) -> bool {
        self.forces.is_some()
    }

    /// Compute the support reactions and the internal-force functions.
    ///
    /// On failure the model is left untouched, still unsolved.
    pub fn solve(&mut self) -> FlexureResult<()> {
        if self.forces.is_some() {
            debug!("analysis already solved");
            return Ok(());
        }

        if !self.model.is_solved() {
            let system = formulate(&self.model)?;
            let solution = solve_system(&system)?;
            apply_solution(&mut self.model, &system, &solution);
        }

        let (force, moment) = equilibrium_residuals(&self.model, 0.0)?;
        debug!("equilibrium residuals: ΣFy = {:e}, ΣM = {:e}", force, moment);

        self.forces = Some(InternalForces::from_model(&self.model)?);
        info!(
            "solved beam of length {} with {} supports and {} loads",
            self.model.length(),
            self.model.supports().len(),
            self.model.loads().len()
        );
        Ok(())
    }

    /// Internal-force functions of the solved beam
    pub fn internal_forces(&self) -> FlexureResult<&InternalForces> {
        self.forces.as_ref().ok_or(FlexureError::ModelNotSolved)
    }

    pub fn shear_at(&self, x: f64) -> FlexureResult<f64> {
        Ok(self.internal_forces()?.shear_at(x))
    }

    pub fn moment_at(&self, x: f64) -> FlexureResult<f64> {
        Ok(self.internal_forces()?.moment_at(x))
    }

    fn sampler(&self) -> FlexureResult<Sampler<'_>> {
        let forces = self.internal_forces()?;
        Sampler::new(&self.model, forces, &self.settings)
    }

    /// Shear samples, left limit before right limit at discontinuities
    pub fn shear_values(&self) -> FlexureResult<Vec<f64>> {
        Ok(self.sampler()?.shear().map(|p| p.value).collect())
    }

    /// Moment samples, left limit before right limit at discontinuities
    pub fn moment_values(&self) -> FlexureResult<Vec<f64>> {
        Ok(self.sampler()?.moment().map(|p| p.value).collect())
    }

    /// Lazy `(x, V)` samples; the iterator borrows the analysis
    pub fn shear_samples(&self) -> FlexureResult<Samples<'_>> {
        Ok(self.sampler()?.shear())
    }

    /// Lazy `(x, M)` samples; the iterator borrows the analysis
    pub fn moment_samples(&self) -> FlexureResult<Samples<'_>> {
        Ok(self.sampler()?.moment())
    }

    pub fn extrema(&self) -> FlexureResult<DiagramExtrema> {
        Ok(self.sampler()?.extrema())
    }

    pub fn diagram(&self) -> FlexureResult<DiagramData> {
        Ok(self.sampler()?.diagram())
    }

    pub fn report(&self) -> FlexureResult<AnalysisReport> {
        AnalysisReport::from_analysis(self)
    }
}

/// Validate, solve and report in one call.
///
/// # Example
///
/// ```rust
/// use flexure_core::calculations::analysis::analyze;
/// use flexure_core::input::BeamInput;
///
/// let input = BeamInput::new(10.0)
///     .with_support(0.0, "pin", None)
///     .with_support(10.0, "roller", None)
///     .with_point_force(3.0, 10.0);
///
/// let report = analyze(&input)?;
/// assert!((report.reactions[0].ry.unwrap() - 7.0).abs() < 1e-9);
/// # Ok::<(), flexure_core::errors::FlexureError>(())
/// ```
pub fn analyze(input: &BeamInput) -> FlexureResult<AnalysisReport> {
    let mut analysis = BeamAnalysis::from_input(input)?;
    analysis.solve()?;
    analysis.report()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cantilever() -> BeamInput {
        BeamInput::new(4.0)
            .with_support(0.0, "fixed", Some("W"))
            .with_point_force(4.0, 5.0)
    }

    #[test]
    fn test_queries_before_solve_fail() {
        let analysis = BeamAnalysis::from_input(&cantilever()).unwrap();
        assert!(!analysis.is_solved());
        assert_eq!(analysis.shear_at(1.0), Err(FlexureError::ModelNotSolved));
        assert_eq!(analysis.moment_values(), Err(FlexureError::ModelNotSolved));
        assert!(matches!(analysis.shear_samples(), Err(FlexureError::ModelNotSolved)));
        assert_eq!(analysis.report().unwrap_err(), FlexureError::ModelNotSolved);
    }

    #[test]
    fn test_cantilever_tip_load() {
        let mut analysis = BeamAnalysis::from_input(&cantilever()).unwrap();
        analysis.solve().unwrap();

        let reaction = analysis.model().supports()[0].reaction().unwrap();
        assert!((reaction.ry.unwrap() - 5.0).abs() < 1e-9);
        assert!((reaction.m.unwrap() - 20.0).abs() < 1e-9);

        assert!((analysis.moment_at(0.0).unwrap() + 20.0).abs() < 1e-9);
        assert!(analysis.moment_at(4.0).unwrap().abs() < 1e-9);
        assert!((analysis.shear_at(2.0).unwrap() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_solve_is_idempotent() {
        let mut analysis = BeamAnalysis::from_input(&cantilever()).unwrap();
        analysis.solve().unwrap();
        let first = analysis.model().supports()[0].reaction();
        let moments = analysis.moment_values().unwrap();

        analysis.solve().unwrap();
        assert_eq!(analysis.model().supports()[0].reaction(), first);
        assert_eq!(analysis.moment_values().unwrap(), moments);
    }

    #[test]
    fn test_failed_solve_leaves_model_unsolved() {
        let input = BeamInput::new(10.0)
            .with_support(0.0, "pin", None)
            .with_support(10.0, "pin", None);
        let mut analysis = BeamAnalysis::from_input(&input).unwrap();
        assert!(matches!(analysis.solve(), Err(FlexureError::Indeterminate { .. })));
        assert!(!analysis.is_solved());
        assert!(analysis.model().supports().iter().all(|s| !s.is_solved()));
    }

    #[test]
    fn test_lazy_samples_match_collected_values() {
        let mut analysis = BeamAnalysis::from_input(&cantilever()).unwrap();
        analysis.solve().unwrap();
        let lazy: Vec<f64> = analysis.shear_samples().unwrap().map(|p| p.value).collect();
        assert_eq!(lazy, analysis.shear_values().unwrap());
    }

    #[test]
    fn test_with_settings_validates() {
        let model = cantilever().to_model().unwrap();
        let bad = AnalysisSettings {
            grid_intervals: 0,
            position_tolerance: 0.9,
        };
        let err = BeamAnalysis::new(model.clone()).with_settings(bad).unwrap_err();
        assert!(matches!(err, FlexureError::Validation { .. }));

        let coarse = AnalysisSettings::default().with_grid_intervals(10);
        let analysis = BeamAnalysis::new(model).with_settings(coarse).unwrap();
        assert_eq!(analysis.settings().grid_intervals, 10);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let mut input = cantilever();
        input.settings = Some(AnalysisSettings {
            grid_intervals: 2,
            ..AnalysisSettings::default()
        });
        let err = BeamAnalysis::from_input(&input).unwrap_err();
        assert!(err.is_configuration_error());
    }
}
