use adaptune::solve;

mod common;
use common::{assert_valid_scale, equal_spec};

const JUST_FIFTH: f64 = 701.9550008653874;

#[test]
fn empty_target_list_falls_back_to_pure_fifth() {
    let _ = env_logger::try_init();

    let spec = equal_spec(&[]);
    let solution = solve(&spec).unwrap();

    // the synthesized 3/2 fallback drives the solve to the just fifth
    assert!(
        (solution.generator_cents - JUST_FIFTH).abs() < 0.01,
        "generator {} not near just fifth",
        solution.generator_cents
    );
    assert_valid_scale(&solution.notes_cents, 12, solution.period_cents);
    assert_eq!(solution.intervals.len(), 12);
}

#[test]
fn single_fifth_constraint_converges_inside_bracket() {
    let spec = equal_spec(&[(3, 2, "P5")]);
    let solution = solve(&spec).unwrap();

    assert!(solution.generator_cents >= 701.9 && solution.generator_cents <= 702.0);
    assert!(solution.generator_cents >= 0.575 * 1200.0);
    assert!(solution.generator_cents <= 0.595 * 1200.0);
}

#[test]
fn repeated_solves_never_drift() {
    let spec = equal_spec(&[(3, 2, "P5"), (5, 4, "M3")]);
    let first = solve(&spec).unwrap();
    for _ in 0..10 {
        let again = solve(&spec).unwrap();
        assert_eq!(
            first.generator_cents.to_bits(),
            again.generator_cents.to_bits()
        );
        assert!(again.generator_cents >= 0.575 * 1200.0);
        assert!(again.generator_cents <= 0.595 * 1200.0);
    }
}

#[test]
fn meantone_leaning_targets_flatten_the_fifth() {
    // heavy major-third weighting drags the fifth flat of just
    let mut spec = equal_spec(&[(3, 2, "P5"), (5, 4, "M3")]);
    spec.target_weights.insert("3/2".to_string(), 0.1);
    spec.target_weights.insert("5/4".to_string(), 0.9);
    let solution = solve(&spec).unwrap();

    assert!(
        solution.generator_cents < JUST_FIFTH,
        "generator {} should be tempered flat",
        solution.generator_cents
    );
    assert_valid_scale(&solution.notes_cents, 12, solution.period_cents);
}

#[test]
fn non_octave_cycle_scales_the_bracket() {
    let mut spec = equal_spec(&[(3, 2, "P5")]);
    spec.cycle_cents = 1100.0;
    let solution = solve(&spec).unwrap();

    assert!(solution.generator_cents >= 0.575 * 1100.0);
    assert!(solution.generator_cents <= 0.595 * 1100.0);
    assert_valid_scale(&solution.notes_cents, 12, 1100.0);
}
