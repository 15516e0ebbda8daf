//! End-to-end beam scenarios with hand-checked answers.

use approx::{assert_abs_diff_eq, assert_relative_eq};

use flexure_core::calculations::analysis::{analyze, BeamAnalysis};
use flexure_core::calculations::equilibrium::equilibrium_residuals;
use flexure_core::calculations::internal_forces::Limit;
use flexure_core::errors::FlexureError;
use flexure_core::input::BeamInput;
use flexure_core::loads::DistributedLoad;
use flexure_core::supports::ReactionComponent;

const EPS: f64 = 1e-9;

fn solved(input: &BeamInput) -> BeamAnalysis {
    let mut analysis = BeamAnalysis::from_input(input).expect("valid input");
    analysis.solve().expect("solvable beam");
    analysis
}

fn reaction(analysis: &BeamAnalysis, index: usize, component: ReactionComponent) -> f64 {
    analysis.model().supports()[index]
        .reaction()
        .expect("solved support")
        .get(component)
}

fn max_abs(values: &[f64]) -> f64 {
    values.iter().fold(0.0_f64, |m, v| m.max(v.abs()))
}

#[test]
fn simply_supported_central_point_load() {
    let input = BeamInput::new(10.0)
        .with_support(0.0, "pin", None)
        .with_support(10.0, "roller", None)
        .with_point_force(5.0, 10.0);
    let analysis = solved(&input);

    assert_abs_diff_eq!(reaction(&analysis, 0, ReactionComponent::Ry), 5.0, epsilon = EPS);
    assert_abs_diff_eq!(reaction(&analysis, 1, ReactionComponent::Ry), 5.0, epsilon = EPS);

    let extrema = analysis.extrema().unwrap();
    assert_abs_diff_eq!(extrema.max_moment, 25.0, epsilon = EPS);
    assert_abs_diff_eq!(extrema.max_moment_at, 5.0, epsilon = EPS);
    assert_abs_diff_eq!(max_abs(&analysis.shear_values().unwrap()), 5.0, epsilon = EPS);
    assert_abs_diff_eq!(extrema.max_shear, 5.0, epsilon = EPS);
    assert_abs_diff_eq!(extrema.min_shear, -5.0, epsilon = EPS);
}

#[test]
fn cantilever_with_end_moment() {
    let input = BeamInput::new(4.0)
        .with_support(0.0, "fixed", None)
        .with_point_moment(4.0, 8.0);
    let analysis = solved(&input);

    assert_abs_diff_eq!(reaction(&analysis, 0, ReactionComponent::M), -8.0, epsilon = EPS);
    assert_abs_diff_eq!(reaction(&analysis, 0, ReactionComponent::Ry), 0.0, epsilon = EPS);
    assert!(max_abs(&analysis.shear_values().unwrap()) < EPS);

    // constant moment along the span, released at the tip
    assert_abs_diff_eq!(analysis.moment_at(2.0).unwrap(), 8.0, epsilon = EPS);
    let forces = analysis.internal_forces().unwrap();
    assert_abs_diff_eq!(forces.moment_limit(4.0, Limit::Left), 8.0, epsilon = EPS);
    assert_abs_diff_eq!(forces.moment_limit(4.0, Limit::Right), 0.0, epsilon = EPS);
}

#[test]
fn uniform_load_parabola() {
    let input = BeamInput::new(6.0)
        .with_support(0.0, "pin", None)
        .with_support(6.0, "roller", None)
        .with_udl(0.0, 6.0, 2.0, 2.0);
    let analysis = solved(&input);

    assert_abs_diff_eq!(reaction(&analysis, 0, ReactionComponent::Ry), 6.0, epsilon = EPS);
    assert_abs_diff_eq!(reaction(&analysis, 1, ReactionComponent::Ry), 6.0, epsilon = EPS);

    let extrema = analysis.extrema().unwrap();
    assert_abs_diff_eq!(extrema.max_moment, 9.0, epsilon = EPS);
    assert_abs_diff_eq!(extrema.max_moment_at, 3.0, epsilon = EPS);
    assert_abs_diff_eq!(analysis.moment_at(1.5).unwrap(), 6.75, epsilon = EPS);
}

#[test]
fn triangular_load_matches_closed_form() {
    let load = DistributedLoad::new(0.0, 6.0, 0.0, 3.0);
    assert_abs_diff_eq!(load.resultant(), 9.0, epsilon = EPS);
    assert_abs_diff_eq!(load.centroid(), 4.0, epsilon = EPS);

    let input = BeamInput::new(6.0)
        .with_support(0.0, "pin", None)
        .with_support(6.0, "roller", None)
        .with_udl(0.0, 6.0, 0.0, 3.0);
    let analysis = solved(&input);

    assert_abs_diff_eq!(reaction(&analysis, 0, ReactionComponent::Ry), 3.0, epsilon = EPS);
    assert_abs_diff_eq!(reaction(&analysis, 1, ReactionComponent::Ry), 6.0, epsilon = EPS);

    // M_max = w L² / (9√3) at x = L / √3
    let extrema = analysis.extrema().unwrap();
    assert_relative_eq!(extrema.max_moment, 3.0 * 36.0 / (9.0 * 3.0_f64.sqrt()), max_relative = 1e-9);
    assert_relative_eq!(extrema.max_moment_at, 6.0 / 3.0_f64.sqrt(), max_relative = 1e-9);
}

#[test]
fn symmetric_loading_gives_equal_reactions() {
    let input = BeamInput::new(12.0)
        .with_support(0.0, "pin", None)
        .with_support(12.0, "roller", None)
        .with_point_force(3.0, 6.0)
        .with_point_force(9.0, 6.0)
        .with_udl(0.0, 12.0, 1.0, 1.0);
    let analysis = solved(&input);

    let left = reaction(&analysis, 0, ReactionComponent::Ry);
    let right = reaction(&analysis, 1, ReactionComponent::Ry);
    assert_abs_diff_eq!(left, right, epsilon = EPS);
    assert_abs_diff_eq!(left, 12.0, epsilon = EPS);
}

#[test]
fn equilibrium_holds_about_any_point() {
    let input = BeamInput::new(9.0)
        .with_support(1.0, "pin", None)
        .with_support(7.5, "roller", None)
        .with_point_force(0.0, 4.0)
        .with_point_force(9.0, 2.5)
        .with_point_moment(4.0, -6.0)
        .with_udl(2.0, 8.0, 1.0, 3.5);
    let analysis = solved(&input);

    for about in [0.0, 1.0, 4.5, 9.0, -3.0] {
        let (force, moment) = equilibrium_residuals(analysis.model(), about).unwrap();
        assert_abs_diff_eq!(force, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(moment, 0.0, epsilon = 1e-9);
    }

    // free ends carry no moment
    assert_abs_diff_eq!(analysis.moment_at(9.0).unwrap(), 0.0, epsilon = 1e-9);
    let forces = analysis.internal_forces().unwrap();
    assert_abs_diff_eq!(forces.moment_limit(0.0, Limit::Left), 0.0, epsilon = 1e-9);
}

#[test]
fn moment_change_equals_shear_area() {
    let input = BeamInput::new(8.0)
        .with_support(0.0, "pin", None)
        .with_support(8.0, "roller", None)
        .with_udl(0.0, 8.0, 0.0, 3.0)
        .with_point_force(5.0, 4.0);
    let analysis = solved(&input);

    // Simpson's rule is exact for the quadratic shear between 1 and 4
    let (a, b, n) = (1.0, 4.0, 30);
    let h = (b - a) / n as f64;
    let mut area = analysis.shear_at(a).unwrap() + analysis.shear_at(b).unwrap();
    for i in 1..n {
        let weight = if i % 2 == 1 { 4.0 } else { 2.0 };
        area += weight * analysis.shear_at(a + i as f64 * h).unwrap();
    }
    area *= h / 3.0;

    let delta = analysis.moment_at(b).unwrap() - analysis.moment_at(a).unwrap();
    assert_relative_eq!(area, delta, max_relative = 1e-9);
}

#[test]
fn gerber_beam_releases_moment_at_hinge() {
    let input = BeamInput::new(10.0)
        .with_support(0.0, "fixed", Some("A"))
        .with_support(10.0, "roller", Some("C"))
        .with_hinge(6.0, "right")
        .with_point_force(8.0, 10.0);
    let analysis = solved(&input);

    assert_abs_diff_eq!(reaction(&analysis, 1, ReactionComponent::Ry), 5.0, epsilon = EPS);
    assert_abs_diff_eq!(reaction(&analysis, 0, ReactionComponent::Ry), 5.0, epsilon = EPS);
    assert_abs_diff_eq!(reaction(&analysis, 0, ReactionComponent::M), 30.0, epsilon = EPS);

    assert_abs_diff_eq!(analysis.moment_at(6.0).unwrap(), 0.0, epsilon = EPS);
    assert_abs_diff_eq!(analysis.moment_at(0.0).unwrap(), -30.0, epsilon = EPS);
    assert_abs_diff_eq!(analysis.moment_at(8.0).unwrap(), 10.0, epsilon = EPS);

    let (force, moment) = equilibrium_residuals(analysis.model(), 3.0).unwrap();
    assert_abs_diff_eq!(force, 0.0, epsilon = EPS);
    assert_abs_diff_eq!(moment, 0.0, epsilon = EPS);
}

#[test]
fn moment_at_hinge_acts_on_the_released_face() {
    let base = || {
        BeamInput::new(10.0)
            .with_support(0.0, "fixed", None)
            .with_support(10.0, "roller", None)
            .with_point_moment(6.0, 12.0)
    };

    let left = solved(&base().with_hinge(6.0, "l"));
    let forces = left.internal_forces().unwrap();
    assert_abs_diff_eq!(forces.moment_limit(6.0, Limit::Left), 0.0, epsilon = EPS);
    assert_abs_diff_eq!(forces.moment_limit(6.0, Limit::Right), -12.0, epsilon = EPS);
    assert_abs_diff_eq!(reaction(&left, 1, ReactionComponent::Ry), -3.0, epsilon = EPS);

    let right = solved(&base().with_hinge(6.0, "r"));
    let forces = right.internal_forces().unwrap();
    assert_abs_diff_eq!(forces.moment_limit(6.0, Limit::Left), 12.0, epsilon = EPS);
    assert_abs_diff_eq!(forces.moment_limit(6.0, Limit::Right), 0.0, epsilon = EPS);
    assert_abs_diff_eq!(reaction(&right, 1, ReactionComponent::Ry), 0.0, epsilon = EPS);
}

#[test]
fn solving_twice_is_idempotent() {
    let input = BeamInput::new(5.0)
        .with_support(0.0, "pin", None)
        .with_support(5.0, "roller", None)
        .with_udl(1.0, 4.0, 2.0, 1.0);
    let mut analysis = solved(&input);
    let reactions: Vec<_> = analysis.model().supports().iter().map(|s| s.reaction()).collect();

    analysis.solve().unwrap();
    let again: Vec<_> = analysis.model().supports().iter().map(|s| s.reaction()).collect();
    assert_eq!(reactions, again);

    let fresh = solved(&input);
    let fresh_reactions: Vec<_> = fresh.model().supports().iter().map(|s| s.reaction()).collect();
    assert_eq!(reactions, fresh_reactions);
}

#[test]
fn unloaded_beam_has_zero_extrema() {
    let input = BeamInput::new(3.0)
        .with_support(0.0, "pin", None)
        .with_support(3.0, "roller", None);
    let report = analyze(&input).unwrap();

    assert_eq!(report.extrema.max_shear, 0.0);
    assert_eq!(report.extrema.min_shear, 0.0);
    assert_eq!(report.extrema.max_moment, 0.0);
    assert_eq!(report.extrema.min_moment, 0.0);
}

#[test]
fn invalid_input_rejected_before_solving() {
    let bad_udl = BeamInput::new(6.0)
        .with_support(0.0, "pin", None)
        .with_support(6.0, "roller", None)
        .with_udl(4.0, 4.0, 1.0, 1.0);
    match BeamAnalysis::from_input(&bad_udl) {
        Err(FlexureError::Validation { field, .. }) => assert_eq!(field, "udls[0].end"),
        other => panic!("expected validation error, got {other:?}"),
    }

    let bad_alias = BeamInput::new(6.0).with_support(0.0, "sliding", None);
    match analyze(&bad_alias) {
        Err(FlexureError::Validation { field, value, .. }) => {
            assert_eq!(field, "supports[0].type");
            assert_eq!(value, "sliding");
        }
        other => panic!("expected validation error, got {other:?}"),
    }

    let outside = BeamInput::new(6.0).with_support(7.0, "fixed", None);
    assert!(matches!(analyze(&outside), Err(FlexureError::Validation { .. })));

    assert!(matches!(
        analyze(&BeamInput::new(-1.0)),
        Err(FlexureError::Validation { .. })
    ));
}

#[test]
fn indeterminate_and_unstable_configurations() {
    let two_pins = BeamInput::new(10.0)
        .with_support(0.0, "pin", None)
        .with_support(10.0, "pin", None)
        .with_point_force(5.0, 1.0);
    assert_eq!(
        analyze(&two_pins).unwrap_err(),
        FlexureError::Indeterminate {
            unknowns: 4,
            equations: 3
        }
    );

    let two_rollers = BeamInput::new(10.0)
        .with_support(0.0, "roller", None)
        .with_support(10.0, "roller", None);
    assert!(matches!(
        analyze(&two_rollers),
        Err(FlexureError::Indeterminate { unknowns: 2, equations: 3 })
    ));
}

#[test]
fn singular_configurations() {
    let coincident = BeamInput::new(10.0)
        .with_support(0.0, "pin", Some("A"))
        .with_support(0.0, "roller", Some("B"))
        .with_point_force(5.0, 1.0);
    match analyze(&coincident) {
        Err(FlexureError::SingularSystem { unknown, .. }) => assert_eq!(unknown, "B.Ry"),
        other => panic!("expected singular system, got {other:?}"),
    }

    // nothing on the released side of the hinge
    let dangling = BeamInput::new(10.0)
        .with_support(0.0, "fixed", None)
        .with_support(4.0, "roller", None)
        .with_hinge(6.0, "right");
    assert!(matches!(
        analyze(&dangling),
        Err(FlexureError::SingularSystem { .. })
    ));
}

#[test]
fn json_request_with_inverted_force() {
    let json = r#"{
        "beamLength": 2,
        "supports": [{"distance": 0, "type": "clamped", "label": "W"}],
        "pointForces": [{"distance": 2, "magnitude": 4, "inverted": true}],
        "settings": {"gridIntervals": 40}
    }"#;
    let input: BeamInput = serde_json::from_str(json).unwrap();
    assert_eq!(input.settings().grid_intervals, 40);

    let report = analyze(&input).unwrap();
    let wall = report.reaction("W").unwrap();
    assert_abs_diff_eq!(wall.ry.unwrap(), -4.0, epsilon = EPS);
    assert_abs_diff_eq!(wall.m.unwrap(), -8.0, epsilon = EPS);
    assert_abs_diff_eq!(report.extrema.max_moment, 8.0, epsilon = EPS);
    assert_abs_diff_eq!(report.extrema.max_moment_at, 0.0, epsilon = EPS);
}

#[test]
fn diagram_marks_jumps_and_critical_points() {
    let input = BeamInput::new(10.0)
        .with_support(0.0, "pin", None)
        .with_support(10.0, "roller", None)
        .with_point_force(4.0, 10.0)
        .with_point_moment(7.0, 5.0);
    let analysis = solved(&input);
    let diagram = analysis.diagram().unwrap();

    let xs: Vec<f64> = diagram.critical_points.iter().map(|p| p.x).collect();
    assert_eq!(xs, vec![0.0, 4.0, 7.0, 10.0]);

    let at_moment = &diagram.critical_points[2];
    assert_abs_diff_eq!(at_moment.moment_left - at_moment.moment_right, 5.0, epsilon = EPS);
    assert_abs_diff_eq!(at_moment.shear_left, at_moment.shear_right, epsilon = EPS);

    // V(0⁻) = 0 then the reaction
    assert_eq!(diagram.shear[0].x, 0.0);
    assert_eq!(diagram.shear[0].value, 0.0);
    assert!(diagram.shear[1].value > 0.0);
}
