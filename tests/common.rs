use adaptune::solver::ratio::JustRatio;
use adaptune::TemperamentSpec;

/// A spec with equal-weighted targets and no blending.
pub fn equal_spec(targets: &[(u32, u32, &str)]) -> TemperamentSpec {
    let mut spec = TemperamentSpec::default();
    spec.targets = targets
        .iter()
        .map(|&(num, den, label)| JustRatio::new(num, den, label))
        .collect();
    spec
}

/// A spec with the anchor blend active at the given axes and stiffness.
pub fn blend_spec(x: f64, y: f64, z: f64, stiffness: f64) -> TemperamentSpec {
    let mut spec = TemperamentSpec::default();
    spec.octave_blend.enabled = true;
    spec.octave_blend.x = x;
    spec.octave_blend.y = y;
    spec.octave_blend.z = z;
    spec.octave_stiffness = stiffness;
    spec
}

/// Assert the basic shape every solved scale must have.
pub fn assert_valid_scale(notes: &[f64], n: usize, period: f64) {
    assert_eq!(notes.len(), n);
    assert_eq!(notes[0], 0.0, "tonic must read 0: {:?}", notes);
    for w in notes.windows(2) {
        assert!(w[0] <= w[1], "scale not ascending: {:?}", notes);
    }
    assert!(
        notes
            .iter()
            .all(|&c| c.is_finite() && (0.0..period).contains(&c)),
        "cents out of range: {:?}",
        notes
    );
}
