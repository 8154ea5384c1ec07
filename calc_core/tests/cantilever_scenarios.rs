use calc_core::calculations::cantilever::{BeamParameters, CantileverBeam};
use calc_core::calculations::voltage_drop::voltage_at_load;
use calc_core::calculations::{CalculationItem, CantileverInput, LoadCase, VoltageDropInput};
use calc_core::file_io::{load_calculation_set, save_calculation_set};
use calc_core::project::CalculationSet;
use calc_core::sampling::{return_max, Response};
use calc_core::units::{unit_display, Dimension, Quantity};
use chrono::NaiveDate;

fn q(text: &str) -> Quantity {
    Quantity::parse(text).expect("quantity parses")
}

fn close(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol * b.abs().max(1.0)
}

/// 1200 lbf at 15 ft on a 25 ft span, E = 27.5e6 psi, I = 209 in⁴
fn sign_arm() -> CantileverBeam {
    let ei = BeamParameters::from_modulus(q("27_500_000 lbf/in**2"), q("209 in**4"))
        .expect("modulus and inertia have the right dimensions");
    let params = BeamParameters::intermediate_load(q("1200 lbf"), q("25 ft"), ei, q("15 ft"))
        .expect("load lies within the span");
    CantileverBeam::new(params).expect("valid beam")
}

#[test]
fn end_load_closed_form_scenario() {
    let params = BeamParameters::end_load(q("1000 N"), q("2 m"), q("5000 N*m**2")).expect("valid parameters");
    let beam = CantileverBeam::new(params).expect("valid beam");

    assert!(close(beam.max_deflection().value(), 0.5333, 1e-4));
    assert!(close(beam.max_slope().value(), 0.4, 1e-12));
    assert!(close(beam.max_moment().value(), -2000.0, 1e-12));
    assert_eq!(beam.deflection(q("0 m")).expect("length").value(), 0.0);
    assert!(close(
        beam.deflection(q("2 m")).expect("length").value(),
        -beam.max_deflection().value(),
        1e-12
    ));
    assert!(close(beam.moment(q("0 m")).expect("length").value(), beam.max_moment().value(), 1e-12));
    assert_eq!(beam.moment(q("2 m")).expect("length").value(), 0.0);
    for &x in beam.grid() {
        assert_eq!(beam.shear_at(x), 1000.0);
    }
}

#[test]
fn intermediate_load_in_us_units() {
    let beam = sign_arm();

    assert_eq!(beam.deflection(q("0 ft")).expect("length").value(), 0.0);

    let tip = beam.deflection(q("25 ft")).expect("length");
    assert!(tip.is_finite());
    assert!(tip.value() <= 0.0);
    assert!(close(tip.value(), -beam.max_deflection().value(), 1e-12));

    // F·a²·(3L - a)/(6EI) in inches
    let expected_in = 1200.0 * 180.0_f64.powi(2) * (900.0 - 180.0) / (6.0 * 27.5e6 * 209.0);
    assert!(close(beam.max_deflection().to("in").expect("length unit"), expected_in, 1e-9));
    assert!(close(tip.to("in").expect("length unit"), -expected_in, 1e-9));

    assert_eq!(beam.shear(q("10 ft")).expect("length").value(), q("1200 lbf").value());
    assert_eq!(beam.shear(q("15 ft")).expect("length").value(), q("1200 lbf").value());
    assert_eq!(beam.shear(q("20 ft")).expect("length").value(), 0.0);
    assert!(close(beam.max_moment().to("lbf*ft").expect("moment unit"), -18_000.0, 1e-9));
}

#[test]
fn intermediate_load_at_tip_equals_end_load() {
    let (f, l, ei) = (q("3 kip"), q("12 ft"), q("2e9 lbf*in**2"));
    let tip = CantileverBeam::new(BeamParameters::intermediate_load(f, l, ei, l).expect("valid"))
        .expect("valid beam");
    let end = CantileverBeam::new(BeamParameters::end_load(f, l, ei).expect("valid")).expect("valid beam");

    for &x in end.grid() {
        for response in Response::ALL {
            assert!(close(tip.response_at(response, x), end.response_at(response, x), 1e-12));
        }
    }
    assert!(close(tip.max_deflection().value(), end.max_deflection().value(), 1e-12));
}

#[test]
fn uniform_load_boundary_values() {
    let params = BeamParameters::uniform_distributed_load(q("2 kN/m"), q("3 m"), q("4e6 N*m**2")).expect("valid");
    let beam = CantileverBeam::new(params).expect("valid beam");

    assert_eq!(beam.shear(q("3 m")).expect("length").value(), 0.0);
    assert_eq!(beam.moment(q("3 m")).expect("length").value(), 0.0);
    assert!(close(beam.shear(q("0 m")).expect("length").value(), 6000.0, 1e-12));
    assert!(close(beam.moment(q("0 m")).expect("length").value(), -9000.0, 1e-12));
    assert_eq!(beam.max_moment().dimension(), Dimension::MOMENT);
    assert!(close(beam.max_moment().value(), -9000.0, 1e-12));
}

#[test]
fn out_of_span_load_is_rejected() {
    let err = BeamParameters::intermediate_load(q("1 kip"), q("10 ft"), q("1e9 lbf*in**2"), q("11 ft"))
        .expect_err("load beyond the free end");
    assert_eq!(err.error_code(), "INVALID_INPUT");
}

#[test]
fn dimension_mismatch_surfaces_unchanged() {
    let err = BeamParameters::from_modulus(q("209 in**4"), q("27_500_000 psi")).expect_err("swapped inputs");
    assert_eq!(err.error_code(), "DIMENSION_MISMATCH");
}

#[test]
fn sampled_extremum_examples() {
    assert_eq!(return_max(&[-5.0, -3.0, 2.0]), Some(-5.0));
    assert_eq!(return_max(&[-2.0, 2.0]), Some(2.0));
}

#[test]
fn voltage_drop_scenario() {
    let v = voltage_at_load(q("24 V"), q("2 A"), q("2 ohm")).expect("valid circuit");
    assert!(close(v.value(), 20.0, 1e-12));
    assert_eq!(unit_display(v, false), "20.000 V");
}

#[test]
fn calculation_set_save_run_roundtrip() {
    let path = std::env::temp_dir().join("beamcalc_scenario_set.bcalc");

    let mut set = CalculationSet::new("Scenario", "Engineer");
    for case in LoadCase::ALL {
        set.add_item(CalculationItem::Cantilever(CantileverInput::example(case)));
    }
    set.add_item(CalculationItem::VoltageDrop(VoltageDropInput::default()));
    set.set_expiration(NaiveDate::from_ymd_opt(2030, 12, 31));
    save_calculation_set(&set, &path).expect("save succeeds");

    let loaded = load_calculation_set(&path).expect("load succeeds");
    let today = NaiveDate::from_ymd_opt(2030, 12, 31).expect("valid date");
    let runs = loaded.run_all(today).expect("not yet expired");
    assert_eq!(runs.len(), 4);
    assert!(runs.iter().all(|r| r.outcome.is_ok()));

    let later = NaiveDate::from_ymd_opt(2031, 1, 1).expect("valid date");
    let err = loaded.run_all(later).expect_err("expired");
    assert_eq!(err.error_code(), "EXPIRED");

    let _ = std::fs::remove_file(&path);
}
