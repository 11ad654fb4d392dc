//! Generator/period optimization.
//!
//! Three strategies cover the configuration space. When the anchor blend is
//! active the loss is quadratic in the unknowns and weighted least squares
//! applies: jointly over generator and period when the octave is allowed to
//! stretch, in closed form over the generator alone when the octave is
//! rigid. Without the blend the wraparound makes the loss non-smooth in the
//! generator, so a bounded golden-section search runs instead.

use log::debug;

use super::cents::signed_wrap_diff;
use super::constraint::Constraint;

/// Golden-section iteration count. Enough to shrink the bracket to well
/// below a micro-cent.
pub const GOLDEN_SECTION_ITERATIONS: usize = 80;

/// Search bracket for the generator, as fractions of the period. All
/// supported temperaments use a generator close to a tempered fifth;
/// anything outside this window is out of scope.
pub const BRACKET_LOW: f64 = 0.575;
/// Upper bracket bound, see [`BRACKET_LOW`].
pub const BRACKET_HIGH: f64 = 0.595;

/// Period stretch beyond this many cents raises the warning flag.
pub const PERIOD_STRETCH_WARN_CENTS: f64 = 10.0;

const WLS_EPSILON: f64 = 1e-9;
const RIDGE: f64 = 1e-6;

/// Which optimization runs, resolved once per solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverStrategy {
    /// Joint generator/period weighted least squares.
    Rank2Wls,
    /// Closed-form generator-only weighted least squares.
    Rank1ClosedForm,
    /// Derivative-free search on the wrapped loss.
    GoldenSection,
}

impl SolverStrategy {
    /// Strategy selection from the configuration flags.
    pub fn select(blend_enabled: bool, octave_stiffness: f64) -> Self {
        if blend_enabled {
            if octave_stiffness < 1.0 {
                SolverStrategy::Rank2Wls
            } else {
                SolverStrategy::Rank1ClosedForm
            }
        } else {
            SolverStrategy::GoldenSection
        }
    }
}

/// Solved generator and period, plus stretch diagnostics in rank-2 mode.
#[derive(Debug, Clone)]
pub struct GeneratorSolution {
    /// Best-fit generator in cents.
    pub generator_cents: f64,
    /// Period actually in effect: the optimized period in rank-2 mode,
    /// the nominal cycle otherwise.
    pub period_cents: f64,
    /// Optimized period, present only in rank-2 mode.
    pub optimized_period_cents: Option<f64>,
    /// `period - nominal cycle`, present only in rank-2 mode.
    pub period_stretch_cents: Option<f64>,
    /// Raised when the stretch exceeds [`PERIOD_STRETCH_WARN_CENTS`].
    pub period_stretch_warning: bool,
}

impl GeneratorSolution {
    fn rigid(generator_cents: f64, cycle_cents: f64) -> Self {
        Self {
            generator_cents,
            period_cents: cycle_cents,
            optimized_period_cents: None,
            period_stretch_cents: None,
            period_stretch_warning: false,
        }
    }
}

/// Run the selected strategy over a normalized constraint set.
pub fn solve_generator(
    constraints: &[Constraint],
    cycle_cents: f64,
    octave_stiffness: f64,
    strategy: SolverStrategy,
    reference_generator: f64,
) -> GeneratorSolution {
    let solution = match strategy {
        SolverStrategy::Rank2Wls => rank2_wls(
            constraints,
            cycle_cents,
            octave_stiffness,
            reference_generator,
        ),
        SolverStrategy::Rank1ClosedForm => GeneratorSolution::rigid(
            rank1_closed_form(constraints, cycle_cents, reference_generator),
            cycle_cents,
        ),
        SolverStrategy::GoldenSection => GeneratorSolution::rigid(
            golden_section(constraints, cycle_cents),
            cycle_cents,
        ),
    };
    debug!(
        "SOLVE: {:?} -> generator {:.4}c period {:.4}c",
        strategy, solution.generator_cents, solution.period_cents
    );
    solution
}

/// Jointly fit generator and period.
///
/// Each constraint contributes a row `steps*g - comp*p = ideal`. The
/// octave stiffness becomes a pseudo-constraint pulling the period toward
/// the nominal cycle (constraint weights sum to 1, so stiffness 0.5 pulls
/// as hard as the whole set), and a tiny ridge toward the reference
/// generator and nominal cycle keeps collinear constraint sets solvable.
fn rank2_wls(
    constraints: &[Constraint],
    cycle_cents: f64,
    octave_stiffness: f64,
    reference_generator: f64,
) -> GeneratorSolution {
    let stiffness = octave_stiffness.clamp(0.0, 1.0 - 1e-9);
    let anchor_weight = stiffness / (1.0 - stiffness);

    let mut a11 = RIDGE;
    let mut a12 = 0.0;
    let mut a22 = anchor_weight + RIDGE;
    let mut b1 = RIDGE * reference_generator;
    let mut b2 = (anchor_weight + RIDGE) * cycle_cents;

    for c in constraints {
        let s = c.generator_steps as f64;
        let t = -(c.period_comp.unwrap_or(0) as f64);
        a11 += c.weight * s * s;
        a12 += c.weight * s * t;
        a22 += c.weight * t * t;
        b1 += c.weight * s * c.ideal_cents;
        b2 += c.weight * t * c.ideal_cents;
    }

    let det = a11 * a22 - a12 * a12;
    let (generator, period) = if det.abs() < WLS_EPSILON {
        (reference_generator, cycle_cents)
    } else {
        ((b1 * a22 - b2 * a12) / det, (a11 * b2 - a12 * b1) / det)
    };

    let stretch = period - cycle_cents;
    GeneratorSolution {
        generator_cents: generator,
        period_cents: period,
        optimized_period_cents: Some(period),
        period_stretch_cents: Some(stretch),
        period_stretch_warning: stretch.abs() > PERIOD_STRETCH_WARN_CENTS,
    }
}

/// Generator-only weighted least squares with the period fixed at the
/// nominal cycle. The period compensation folds each target back onto the
/// branch its chain actually reaches.
fn rank1_closed_form(
    constraints: &[Constraint],
    cycle_cents: f64,
    reference_generator: f64,
) -> f64 {
    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for c in constraints {
        let s = c.generator_steps as f64;
        let adjusted = c.ideal_cents + c.period_comp.unwrap_or(0) as f64 * cycle_cents;
        numerator += c.weight * s * adjusted;
        denominator += c.weight * s * s;
    }
    if denominator < WLS_EPSILON {
        reference_generator
    } else {
        numerator / denominator
    }
}

fn chain_loss(generator: f64, constraints: &[Constraint], period: f64) -> f64 {
    constraints
        .iter()
        .map(|c| {
            let d = signed_wrap_diff(
                generator * c.generator_steps as f64,
                c.ideal_cents,
                period,
            );
            c.weight * d * d
        })
        .sum()
}

/// Golden-section search on the wrapped chain loss, over
/// `[BRACKET_LOW, BRACKET_HIGH] * period`.
fn golden_section(constraints: &[Constraint], period: f64) -> f64 {
    let inv_phi = (5.0_f64.sqrt() - 1.0) / 2.0;
    let mut lo = BRACKET_LOW * period;
    let mut hi = BRACKET_HIGH * period;
    let mut c = hi - inv_phi * (hi - lo);
    let mut d = lo + inv_phi * (hi - lo);
    let mut fc = chain_loss(c, constraints, period);
    let mut fd = chain_loss(d, constraints, period);

    for _ in 0..GOLDEN_SECTION_ITERATIONS {
        if fc < fd {
            hi = d;
            d = c;
            fd = fc;
            c = hi - inv_phi * (hi - lo);
            fc = chain_loss(c, constraints, period);
        } else {
            lo = c;
            c = d;
            fc = fd;
            d = lo + inv_phi * (hi - lo);
            fd = chain_loss(d, constraints, period);
        }
    }

    (lo + hi) / 2.0
}
