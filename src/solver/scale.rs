//! Chain-of-generators degree assignment.
//!
//! Walks the generator chain, places the wolf (the one irregular interval
//! where the finite chain closes on itself), assigns cents to each scale
//! degree and re-orders degrees by ascending pitch.

use log::debug;

use crate::config::WolfPlacement;

use super::cents::{nearest_step_for_ratio, wrap_to_cycle};

/// A mapped scale, prior to interval analysis.
#[derive(Debug, Clone)]
pub struct MappedScale {
    /// Degree -> cents, ascending, `notes_cents[0] == 0`.
    pub notes_cents: Vec<f64>,
    /// Raw (non-wrapped) chain cents per degree, same ordering as
    /// `notes_cents`. Meaningful under a stretched period, where chain
    /// position rather than wrapped pitch class decides octave placement.
    pub cents_absolute: Vec<f64>,
    /// Generator chain step size in scale-degree units.
    pub step_size: usize,
    /// Chain position of the wolf discontinuity.
    pub start_index: usize,
}

/// Convert the wolf placement into the chain start index.
///
/// A manual edge index is clamped into `[0, n)` and converted via
/// `(n - 1 - edge) mod n`; auto placement rotates the start by the
/// configured number of flats.
pub fn wolf_start_index(wolf: &WolfPlacement, flats: i32, n: usize) -> usize {
    let n_i = n as i64;
    match wolf {
        WolfPlacement::Manual { edge } => {
            let e = (*edge).clamp(0, n_i - 1);
            ((n_i - 1 - e).rem_euclid(n_i)) as usize
        }
        WolfPlacement::Auto => (flats as i64).rem_euclid(n_i) as usize,
    }
}

/// Assign cents to all `n` degrees by walking the generator chain.
pub fn map_scale(
    generator_cents: f64,
    period_cents: f64,
    n: usize,
    tonic: usize,
    flats: i32,
    wolf: &WolfPlacement,
) -> MappedScale {
    let step_size = nearest_step_for_ratio(generator_cents, n, period_cents);
    let start_index = wolf_start_index(wolf, flats, n);
    let tonic = tonic % n;

    let mut wrapped = vec![0.0_f64; n];
    let mut absolute = vec![0.0_f64; n];
    for k in 0..n {
        let gen_offset = k as i64 - start_index as i64;
        let raw = gen_offset as f64 * generator_cents;
        let degree =
            (tonic as i64 + gen_offset * step_size as i64).rem_euclid(n as i64) as usize;
        wrapped[degree] = wrap_to_cycle(raw, period_cents);
        absolute[degree] = raw;
    }

    // shift so the tonic reads 0
    let tonic_cents = wrapped[tonic];
    let tonic_absolute = absolute[tonic];
    let mut pairs: Vec<(f64, f64)> = wrapped
        .iter()
        .zip(absolute.iter())
        .map(|(&w, &a)| {
            (
                wrap_to_cycle(w - tonic_cents, period_cents),
                a - tonic_absolute,
            )
        })
        .collect();

    // degree order becomes pitch order
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

    // the tonic lands at index 0 with value 0; re-apply the zero offset in
    // case a degree sat exactly on the wrap boundary
    let base = pairs[0].0;
    let base_absolute = pairs[0].1;
    let notes_cents: Vec<f64> = pairs
        .iter()
        .map(|p| wrap_to_cycle(p.0 - base, period_cents))
        .collect();
    let cents_absolute: Vec<f64> = pairs.iter().map(|p| p.1 - base_absolute).collect();

    debug!(
        "SCALE: n={} step={} start={} generator={:.3}c",
        n, step_size, start_index, generator_cents
    );

    MappedScale {
        notes_cents,
        cents_absolute,
        step_size,
        start_index,
    }
}
