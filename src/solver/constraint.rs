//! Constraint construction.
//!
//! Turns a temperament spec into a normalized, weighted list of interval
//! constraints for the generator solver. Three mutually exclusive weighting
//! modes apply, in priority order: the continuous anchor blend, an explicit
//! per-target weight map, and plain equal weighting. An empty result is
//! never returned - the pure fifth is synthesized as a fallback so the
//! solver always has at least one constraint to chase.

use log::{debug, trace};

use crate::config::TemperamentSpec;

use super::blend::{blend_weights, default_anchors};
use super::cents::{signed_wrap_diff, wrap_to_cycle};

/// Widest generator chain considered when estimating step counts.
pub const MAX_CHAIN_STEPS: i32 = 31;

/// Explicit weight-map entries at or below this are treated as absent.
pub const WEIGHT_FLOOR: f64 = 0.001;

/// One weighted interval target, reduced to generator-chain terms.
#[derive(Debug, Clone)]
pub struct Constraint {
    /// Display label carried into the error report.
    pub label: String,
    /// Target ratio numerator.
    pub num: u32,
    /// Target ratio denominator.
    pub den: u32,
    /// Normalized weight; sums to 1 across the constraint set.
    pub weight: f64,
    /// Target interval wrapped into `[0, period)`.
    pub ideal_cents: f64,
    /// Signed chain-of-generators step count best approximating the
    /// target. Never 0.
    pub generator_steps: i32,
    /// Period wraps reconciling `generator_steps * reference` with the
    /// target cents. Present only when built from the anchor blend.
    pub period_comp: Option<i32>,
    /// Originating blend anchor, when any.
    pub anchor_id: Option<String>,
}

/// Brute-force search for the signed step count whose chain position wraps
/// closest to `target_cents`, over `k` in `[-MAX_CHAIN_STEPS,
/// MAX_CHAIN_STEPS]` excluding 0. First strict improvement wins, so the
/// result is deterministic.
pub fn estimate_generator_steps(target_cents: f64, period: f64, reference_generator: f64) -> i32 {
    let mut best_k = 1;
    let mut best_err = f64::INFINITY;
    for k in -MAX_CHAIN_STEPS..=MAX_CHAIN_STEPS {
        if k == 0 {
            continue;
        }
        let err = signed_wrap_diff(k as f64 * reference_generator, target_cents, period).abs();
        if err < best_err {
            best_err = err;
            best_k = k;
        }
    }
    best_k
}

/// Number of full period wraps between the raw chain position and the
/// target cents. A generator chain only approximates its target modulo
/// whole periods; this records which branch the chain landed on.
pub fn estimate_period_comp(
    ideal_cents: f64,
    steps: i32,
    reference_generator: f64,
    period: f64,
) -> i32 {
    ((steps as f64 * reference_generator - ideal_cents) / period).round() as i32
}

/// Build the normalized constraint set for a spec.
///
/// Ratio validity is the caller's responsibility (`TemperamentSpec::
/// validate` rejects degenerate ratios before this runs).
pub fn build_constraints(spec: &TemperamentSpec, reference_generator: f64) -> Vec<Constraint> {
    let period = spec.cycle_cents;
    let mut constraints: Vec<Constraint> = Vec::new();

    if spec.octave_blend.enabled {
        let anchors = spec
            .octave_blend
            .anchors
            .clone()
            .unwrap_or_else(default_anchors);
        let weights = blend_weights(&spec.octave_blend, &anchors);
        for anchor in &anchors {
            let ideal = wrap_to_cycle(anchor.ratio.cents(), period);
            let steps = estimate_generator_steps(ideal, period, reference_generator);
            if steps == 0 {
                continue;
            }
            let comp = estimate_period_comp(ideal, steps, reference_generator, period);
            constraints.push(Constraint {
                label: anchor.ratio.label.clone(),
                num: anchor.ratio.num,
                den: anchor.ratio.den,
                weight: weights.get(&anchor.id).copied().unwrap_or(0.0),
                ideal_cents: ideal,
                generator_steps: steps,
                period_comp: Some(comp),
                anchor_id: Some(anchor.id.clone()),
            });
        }
        debug!("CONSTRAINT: blend mode, {} anchors kept", constraints.len());
    } else if spec.target_weights.values().any(|&w| w > WEIGHT_FLOOR) {
        for target in &spec.targets {
            let weight = spec.target_weights.get(&target.key()).copied().unwrap_or(0.0);
            if weight <= WEIGHT_FLOOR {
                continue;
            }
            let ideal = wrap_to_cycle(target.cents(), period);
            let steps = estimate_generator_steps(ideal, period, reference_generator);
            if steps == 0 {
                continue;
            }
            constraints.push(Constraint {
                label: target.label.clone(),
                num: target.num,
                den: target.den,
                weight,
                ideal_cents: ideal,
                generator_steps: steps,
                period_comp: None,
                anchor_id: None,
            });
        }
        debug!("CONSTRAINT: weight-map mode, {} targets kept", constraints.len());
    } else if !spec.targets.is_empty() {
        let weight = 1.0 / spec.targets.len() as f64;
        for target in &spec.targets {
            let ideal = wrap_to_cycle(target.cents(), period);
            let steps = estimate_generator_steps(ideal, period, reference_generator);
            if steps == 0 {
                continue;
            }
            constraints.push(Constraint {
                label: target.label.clone(),
                num: target.num,
                den: target.den,
                weight,
                ideal_cents: ideal,
                generator_steps: steps,
                period_comp: None,
                anchor_id: None,
            });
        }
        debug!("CONSTRAINT: equal mode, {} targets kept", constraints.len());
    }

    if constraints.is_empty() {
        // The solver must never run with zero constraints.
        let ideal = wrap_to_cycle(reference_generator, period);
        constraints.push(Constraint {
            label: "3/2".to_string(),
            num: 3,
            den: 2,
            weight: 1.0,
            ideal_cents: ideal,
            generator_steps: 1,
            period_comp: Some(estimate_period_comp(ideal, 1, reference_generator, period)),
            anchor_id: None,
        });
        debug!("CONSTRAINT: empty set, synthesized pure-fifth fallback");
    }

    let total: f64 = constraints.iter().map(|c| c.weight).sum();
    if total > 0.0 {
        for c in &mut constraints {
            c.weight /= total;
        }
    }

    for c in &constraints {
        trace!(
            "CONSTRAINT: {}/{} w={:.4} ideal={:.2} steps={} comp={:?}",
            c.num, c.den, c.weight, c.ideal_cents, c.generator_steps, c.period_comp
        );
    }

    constraints
}
