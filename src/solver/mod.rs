//! The adaptive temperament solver.
//!
//! A pure pipeline from a [`TemperamentSpec`](crate::config::TemperamentSpec)
//! to a solved scale: constraint construction (with optional anchor
//! blending), generator/period optimization, chain-of-generators degree
//! assignment with wolf placement, and per-degree interval-error analysis.
//! Every call allocates its own working state; nothing persists between
//! solves.

pub mod analysis;
pub mod blend;
pub mod cents;
pub mod constraint;
pub mod generator;
pub mod notes;
pub mod ratio;
pub mod scale;

use anyhow::{bail, Result};
use log::debug;
use serde::Serialize;

use crate::config::TemperamentSpec;

use self::analysis::{analyze_intervals, IntervalError};
use self::cents::ratio_to_cents;
use self::constraint::build_constraints;
use self::generator::{solve_generator, SolverStrategy};
use self::scale::map_scale;

/// A solved scale: the cents-per-degree table plus everything a caller
/// needs to retune, visualize or audition it.
#[derive(Debug, Clone, Serialize)]
pub struct ScaleSolution {
    /// Degree -> cents, ascending, `notes_cents[0] == 0`.
    pub notes_cents: Vec<f64>,
    /// Best-fit generator in cents.
    pub generator_cents: f64,
    /// Period in effect for the scale.
    pub period_cents: f64,
    /// Per-constraint, per-degree error report.
    pub intervals: Vec<IntervalError>,
    /// Optimized period; present only when the octave was allowed to
    /// stretch.
    pub optimized_period_cents: Option<f64>,
    /// Deviation of the optimized period from the nominal cycle.
    pub period_stretch_cents: Option<f64>,
    /// Raised when the stretch is large enough to surface to the user.
    pub period_stretch_warning: bool,
    /// Non-wrapped chain cents per degree; present only in stretched-
    /// period mode, where chain position decides octave placement.
    pub cents_absolute: Option<Vec<f64>>,
}

/// Solve a temperament spec into a scale.
///
/// Synchronous and side-effect-free; identical input yields bit-identical
/// output. Degenerate ratios and non-finite parameters are rejected up
/// front, and a non-finite result anywhere in the cents table fails the
/// solve rather than propagating.
pub fn solve(spec: &TemperamentSpec) -> Result<ScaleSolution> {
    spec.validate()?;

    let reference_generator = ratio_to_cents(3.0, 2.0);
    let constraints = build_constraints(spec, reference_generator);
    let strategy = SolverStrategy::select(spec.octave_blend.enabled, spec.octave_stiffness);
    let solution = solve_generator(
        &constraints,
        spec.cycle_cents,
        spec.octave_stiffness,
        strategy,
        reference_generator,
    );

    let mapped = map_scale(
        solution.generator_cents,
        solution.period_cents,
        spec.scale_size,
        spec.key.tonic,
        spec.key.flats,
        &spec.wolf,
    );

    if mapped.notes_cents.iter().any(|c| !c.is_finite()) {
        bail!(
            "solve produced a non-finite cents table (generator {}, period {})",
            solution.generator_cents,
            solution.period_cents
        );
    }

    let intervals = analyze_intervals(
        &constraints,
        &mapped.notes_cents,
        solution.period_cents,
        spec.key.tonic % spec.scale_size,
    );

    debug!(
        "SOLVE: {} degrees, generator {:.3}c, {} interval rows",
        mapped.notes_cents.len(),
        solution.generator_cents,
        intervals.len()
    );

    let cents_absolute = solution
        .optimized_period_cents
        .is_some()
        .then_some(mapped.cents_absolute);

    Ok(ScaleSolution {
        notes_cents: mapped.notes_cents,
        generator_cents: solution.generator_cents,
        period_cents: solution.period_cents,
        intervals,
        optimized_period_cents: solution.optimized_period_cents,
        period_stretch_cents: solution.period_stretch_cents,
        period_stretch_warning: solution.period_stretch_warning,
        cents_absolute,
    })
}
