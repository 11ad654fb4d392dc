use adaptune::{solve, WolfPlacement};

mod common;
use common::{assert_valid_scale, equal_spec};

fn notes_bits(notes: &[f64]) -> Vec<u64> {
    notes.iter().map(|c| c.to_bits()).collect()
}

#[test]
fn manual_edge_round_trips_through_flat_count() {
    let _ = env_logger::try_init();

    // edge e and flats f describe the same chain when
    // (n - 1 - e) mod n == f mod n
    let n = 12i64;
    for edge in [0, 3, 7, n - 1] {
        let flats = ((n - 1 - edge).rem_euclid(n)) as i32;

        let mut manual = equal_spec(&[(3, 2, "P5")]);
        manual.wolf = WolfPlacement::Manual { edge };
        let mut auto = equal_spec(&[(3, 2, "P5")]);
        auto.key.flats = flats;

        let a = solve(&manual).unwrap();
        let b = solve(&auto).unwrap();
        assert_eq!(
            notes_bits(&a.notes_cents),
            notes_bits(&b.notes_cents),
            "edge {} vs flats {}",
            edge,
            flats
        );
    }
}

#[test]
fn extreme_edges_both_produce_valid_scales() {
    for edge in [0, 11] {
        let mut spec = equal_spec(&[(3, 2, "P5")]);
        spec.wolf = WolfPlacement::Manual { edge };
        let solution = solve(&spec).unwrap();
        assert_valid_scale(&solution.notes_cents, 12, solution.period_cents);
        assert_eq!(solution.generator_cents.to_bits(), {
            // wolf placement must not touch the solved generator
            let mut base = equal_spec(&[(3, 2, "P5")]);
            base.wolf = WolfPlacement::Auto;
            solve(&base).unwrap().generator_cents.to_bits()
        });
    }
}

#[test]
fn out_of_range_edge_clamps_instead_of_failing() {
    let mut clamped = equal_spec(&[(3, 2, "P5")]);
    clamped.wolf = WolfPlacement::Manual { edge: 999 };
    let mut top = equal_spec(&[(3, 2, "P5")]);
    top.wolf = WolfPlacement::Manual { edge: 11 };

    let a = solve(&clamped).unwrap();
    let b = solve(&top).unwrap();
    assert_eq!(notes_bits(&a.notes_cents), notes_bits(&b.notes_cents));
}

#[test]
fn flat_rotation_changes_the_pitch_set() {
    // rotating the chain to the flat side swaps sharp-side pitches for
    // flat-side ones, so the pitch multiset genuinely changes
    let mut sharp = equal_spec(&[(3, 2, "P5"), (5, 4, "M3")]);
    sharp.key.flats = 0;
    let mut flat = sharp.clone();
    flat.key.flats = 3;

    let a = solve(&sharp).unwrap();
    let b = solve(&flat).unwrap();
    assert!(a
        .notes_cents
        .iter()
        .zip(b.notes_cents.iter())
        .any(|(x, y)| (x - y).abs() > 1.0));
}

#[test]
fn tonic_choice_keeps_degree_zero_at_zero() {
    for tonic in [0, 4, 11] {
        let mut spec = equal_spec(&[(3, 2, "P5")]);
        spec.key.tonic = tonic;
        let solution = solve(&spec).unwrap();
        assert_valid_scale(&solution.notes_cents, 12, solution.period_cents);
    }
}
