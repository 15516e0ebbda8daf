//! Internal-Force Functions
//!
//! Shear `V(x)` and bending moment `M(x)` of a solved beam, written with
//! singularity (Macaulay) functions so one closed expression covers the whole
//! span:
//!
//! ```text
//! V(x) = Σ F_i <x - a_i>^0
//!        - Σ [ w_s <x - s>^1 + k/2 <x - s>^2 - w_e <x - e>^1 - k/2 <x - e>^2 ]
//! M(x) = Σ F_i <x - a_i>^1 - Σ C_j <x - c_j>^0
//!        - Σ [ w_s/2 <x - s>^2 + k/6 <x - s>^3 - w_e/2 <x - e>^2 - k/6 <x - e>^3 ]
//! ```
//!
//! `F` are upward forces (reactions, and point loads with their sign
//! flipped), `C` counter-clockwise couples (applied moments and moment
//! reactions), `w` downward intensities and `k` their slope.
//!
//! ## Sign Convention
//! - Positive shear: resultant of the forces left of the section points up
//! - Positive moment: sagging (tension on the bottom fibre)
//!
//! ## Discontinuities
//! Concentrated actions make `V` (forces) or `M` (couples) jump. Both
//! one-sided limits are available through [`Limit`]; the plain accessors
//! report the right-hand limit, i.e. actions located exactly at `x` are
//! included.

use serde::{Deserialize, Serialize};

use crate::errors::{FlexureError, FlexureResult};
use crate::loads::Load;
use crate::model::BeamModel;

/// Which one-sided limit to evaluate at a discontinuity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Limit {
    /// Actions strictly left of `x`
    Left,
    /// Actions at or left of `x`
    Right,
}

/// One singularity-function contribution
#[derive(Debug, Clone, Copy, PartialEq)]
enum Term {
    /// Upward concentrated force
    Force { at: f64, value: f64 },
    /// Counter-clockwise concentrated couple
    Couple { at: f64, value: f64 },
    /// Downward linearly varying load
    Ramp {
        start: f64,
        end: f64,
        w_start: f64,
        w_end: f64,
    },
}

/// `<x - a>^0` with the chosen one-sided convention at `x == a`
fn step(x: f64, a: f64, limit: Limit) -> f64 {
    if x > a || (x == a && limit == Limit::Right) {
        1.0
    } else {
        0.0
    }
}

/// `<x - a>^n` for `n >= 1` (continuous, so no limit needed)
fn bracket(x: f64, a: f64, n: i32) -> f64 {
    if x > a {
        (x - a).powi(n)
    } else {
        0.0
    }
}

impl Term {
    fn shear(&self, x: f64, limit: Limit) -> f64 {
        match *self {
            Term::Force { at, value } => value * step(x, at, limit),
            Term::Couple { .. } => 0.0,
            Term::Ramp {
                start,
                end,
                w_start,
                w_end,
            } => {
                let k = (w_end - w_start) / (end - start);
                -(w_start * bracket(x, start, 1) + k / 2.0 * bracket(x, start, 2)
                    - w_end * bracket(x, end, 1)
                    - k / 2.0 * bracket(x, end, 2))
            }
        }
    }

    fn moment(&self, x: f64, limit: Limit) -> f64 {
        match *self {
            Term::Force { at, value } => value * bracket(x, at, 1),
            Term::Couple { at, value } => -value * step(x, at, limit),
            Term::Ramp {
                start,
                end,
                w_start,
                w_end,
            } => {
                let k = (w_end - w_start) / (end - start);
                -(w_start / 2.0 * bracket(x, start, 2) + k / 6.0 * bracket(x, start, 3)
                    - w_end / 2.0 * bracket(x, end, 2)
                    - k / 6.0 * bracket(x, end, 3))
            }
        }
    }

    /// Add this term's expansion on a segment starting at `origin` (where
    /// every bracket whose anchor is `<= origin` is active) to `shear`/`moment`
    fn expand_into(&self, origin: f64, shear: &mut Polynomial, moment: &mut Polynomial) {
        match *self {
            Term::Force { at, value } if at <= origin => {
                shear.add_shifted_power(value, origin - at, 0);
                moment.add_shifted_power(value, origin - at, 1);
            }
            Term::Couple { at, value } if at <= origin => {
                moment.add_shifted_power(-value, origin - at, 0);
            }
            Term::Force { .. } | Term::Couple { .. } => {}
            Term::Ramp {
                start,
                end,
                w_start,
                w_end,
            } => {
                let k = (w_end - w_start) / (end - start);
                if start <= origin {
                    let d = origin - start;
                    shear.add_shifted_power(-w_start, d, 1);
                    shear.add_shifted_power(-k / 2.0, d, 2);
                    moment.add_shifted_power(-w_start / 2.0, d, 2);
                    moment.add_shifted_power(-k / 6.0, d, 3);
                }
                if end <= origin {
                    let d = origin - end;
                    shear.add_shifted_power(w_end, d, 1);
                    shear.add_shifted_power(k / 2.0, d, 2);
                    moment.add_shifted_power(w_end / 2.0, d, 2);
                    moment.add_shifted_power(k / 6.0, d, 3);
                }
            }
        }
    }
}

// =============================================================================
// CLOSED-FORM PIECES
// =============================================================================

/// Cubic in the local coordinate `t = x - start`: `c0 + c1 t + c2 t² + c3 t³`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Polynomial(pub [f64; 4]);

impl Polynomial {
    /// Evaluate at local coordinate `t` (Horner)
    pub fn eval(&self, t: f64) -> f64 {
        self.0.iter().rev().fold(0.0, |acc, c| acc * t + c)
    }

    /// Coefficients of the first derivative
    pub fn derivative(&self) -> Polynomial {
        let [_, c1, c2, c3] = self.0;
        Polynomial([c1, 2.0 * c2, 3.0 * c3, 0.0])
    }

    /// Add `coef * (t + d)^n` (binomial expansion, `n <= 3`)
    fn add_shifted_power(&mut self, coef: f64, d: f64, n: usize) {
        const BINOMIAL: [[f64; 4]; 4] = [
            [1.0, 0.0, 0.0, 0.0],
            [1.0, 1.0, 0.0, 0.0],
            [1.0, 2.0, 1.0, 0.0],
            [1.0, 3.0, 3.0, 1.0],
        ];
        for j in 0..=n {
            self.0[j] += coef * BINOMIAL[n][j] * d.powi((n - j) as i32);
        }
    }

    /// Real roots strictly inside `(0, span)`, ascending. Only degree <= 2 is
    /// solved; higher-degree polynomials return no roots.
    pub fn roots_within(&self, span: f64) -> Vec<f64> {
        let [c0, c1, c2, c3] = self.0;
        let scale = self.0.iter().fold(0.0_f64, |m, c| m.max(c.abs()));
        if scale == 0.0 || c3.abs() > scale * 1e-12 {
            return Vec::new();
        }
        let negligible = |c: f64| c.abs() <= scale * 1e-12;

        let mut roots = if !negligible(c2) {
            let disc = c1 * c1 - 4.0 * c2 * c0;
            if disc < 0.0 {
                Vec::new()
            } else {
                // numerically stable quadratic formula
                let q = -0.5 * (c1 + c1.signum() * disc.sqrt());
                let mut r = Vec::with_capacity(2);
                if q != 0.0 {
                    r.push(q / c2);
                    r.push(c0 / q);
                } else {
                    r.push(0.0);
                }
                r
            }
        } else if !negligible(c1) {
            vec![-c0 / c1]
        } else {
            Vec::new()
        };

        roots.retain(|t| *t > 0.0 && *t < span);
        roots.sort_by(f64::total_cmp);
        roots.dedup();
        roots
    }
}

/// Closed-form shear and moment on one open interval free of discontinuities
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Piece {
    pub start: f64,
    pub end: f64,
    /// `V(start + t)`
    pub shear: Polynomial,
    /// `M(start + t)`
    pub moment: Polynomial,
}

// =============================================================================
// INTERNAL FORCES
// =============================================================================

/// Shear and moment functions of a solved beam
#[derive(Debug, Clone, PartialEq)]
pub struct InternalForces {
    length: f64,
    terms: Vec<Term>,
    breakpoints: Vec<f64>,
}

impl InternalForces {
    /// Build the functions from a solved model.
    ///
    /// Fails with [`FlexureError::ModelNotSolved`] if any support is still
    /// unsolved.
    pub fn from_model(model: &BeamModel) -> FlexureResult<Self> {
        if !model.is_solved() {
            return Err(FlexureError::ModelNotSolved);
        }

        let mut terms = Vec::with_capacity(model.supports().len() * 2 + model.loads().len());
        for support in model.supports() {
            let reaction = support.reaction().ok_or(FlexureError::ModelNotSolved)?;
            let at = support.position();
            if let Some(ry) = reaction.ry {
                terms.push(Term::Force { at, value: ry });
            }
            if let Some(m) = reaction.m {
                terms.push(Term::Couple { at, value: m });
            }
            // rx is axial and enters neither V nor M
        }
        for load in model.loads() {
            terms.push(match *load {
                Load::Point(p) => Term::Force {
                    at: p.position,
                    value: -p.magnitude,
                },
                Load::Moment(m) => Term::Couple {
                    at: m.position,
                    value: m.magnitude,
                },
                Load::Distributed(d) => Term::Ramp {
                    start: d.start,
                    end: d.end,
                    w_start: d.magnitude_start,
                    w_end: d.magnitude_end,
                },
            });
        }

        let mut breakpoints = model.critical_positions();
        breakpoints.dedup();

        Ok(InternalForces {
            length: model.length(),
            terms,
            breakpoints,
        })
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    /// Sorted, deduplicated positions where the functions change form
    pub fn breakpoints(&self) -> &[f64] {
        &self.breakpoints
    }

    /// Shear at `x` (right-hand limit)
    pub fn shear_at(&self, x: f64) -> f64 {
        self.shear_limit(x, Limit::Right)
    }

    /// Moment at `x` (right-hand limit)
    pub fn moment_at(&self, x: f64) -> f64 {
        self.moment_limit(x, Limit::Right)
    }

    /// One-sided shear at `x`
    pub fn shear_limit(&self, x: f64, limit: Limit) -> f64 {
        self.terms.iter().map(|t| t.shear(x, limit)).sum()
    }

    /// One-sided moment at `x`
    pub fn moment_limit(&self, x: f64, limit: Limit) -> f64 {
        self.terms.iter().map(|t| t.moment(x, limit)).sum()
    }

    /// Closed-form polynomials between consecutive breakpoints
    pub fn pieces(&self) -> Vec<Piece> {
        self.breakpoints
            .windows(2)
            .filter(|w| w[1] > w[0])
            .map(|w| {
                let mut shear = Polynomial::default();
                let mut moment = Polynomial::default();
                for term in &self.terms {
                    term.expand_into(w[0], &mut shear, &mut moment);
                }
                Piece {
                    start: w[0],
                    end: w[1],
                    shear,
                    moment,
                }
            })
            .collect()
    }

    /// Interior positions where `V` or `M` is stationary: zeros of `V`
    /// (moment extrema) and zeros of `dV/dx` (shear extrema under a UVL).
    pub fn stationary_points(&self) -> Vec<f64> {
        let mut points: Vec<f64> = self
            .pieces()
            .iter()
            .flat_map(|piece| {
                let span = piece.end - piece.start;
                piece
                    .shear
                    .roots_within(span)
                    .into_iter()
                    .chain(piece.shear.derivative().roots_within(span))
                    .map(move |t| piece.start + t)
            })
            .collect();
        points.sort_by(f64::total_cmp);
        points
    }
}
