//! Interval-error analysis.
//!
//! For every constraint, measures the realized interval at every
//! transposition of the final scale and its signed deviation from the
//! ideal. The report drives visualization and playback downstream.

use serde::Serialize;

use super::cents::{nearest_step_for_ratio, signed_wrap_diff, wrap_to_cycle};
use super::constraint::Constraint;
use super::ratio::JustRatio;

/// Constraints above this weight dominantly shaped the solve.
pub const SKELETON_WEIGHT: f64 = 0.1;

/// Coarse interval class, bucketed by target size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IntervalKind {
    /// Fifth-sized targets, 650-750 cents.
    Fifth,
    /// Major-third-sized targets, 350-420 cents; also the default bucket.
    MajorThird,
    /// Minor-third-sized targets, 280-340 cents.
    MinorThird,
}

impl IntervalKind {
    /// Bucket a target interval by size.
    pub fn classify(cents: f64) -> Self {
        if (650.0..=750.0).contains(&cents) {
            IntervalKind::Fifth
        } else if (350.0..=420.0).contains(&cents) {
            IntervalKind::MajorThird
        } else if (280.0..=340.0).contains(&cents) {
            IntervalKind::MinorThird
        } else {
            IntervalKind::MajorThird
        }
    }
}

/// One realized interval measured against its target.
#[derive(Debug, Clone, Serialize)]
pub struct IntervalError {
    /// Lower degree of the measured interval.
    pub i: usize,
    /// Upper degree, `(i + step) mod n`.
    pub j: usize,
    /// Scale-degree step spanned by the target.
    pub step: usize,
    /// The target ratio.
    pub target: JustRatio,
    /// Ideal interval in cents, wrapped into the period.
    pub target_cents: f64,
    /// Realized interval in cents.
    pub actual_cents: f64,
    /// Signed deviation of actual from ideal.
    pub error_cents: f64,
    /// Weight of the originating constraint.
    pub weight: f64,
    /// Coarse interval class.
    pub kind: IntervalKind,
    /// Whether the originating constraint dominantly shaped the solve.
    pub is_skeleton: bool,
    /// Configured tonic degree, tagged on the tonic's own row.
    pub key_tonic: Option<usize>,
    /// Originating blend anchor, when any.
    pub anchor_id: Option<String>,
}

/// Measure every constraint at every transposition of the scale.
///
/// The scale is in pitch order with the tonic at degree 0, so the tonic
/// row is `i == 0`; it carries the configured tonic degree for
/// highlighting.
pub fn analyze_intervals(
    constraints: &[Constraint],
    notes_cents: &[f64],
    period_cents: f64,
    tonic: usize,
) -> Vec<IntervalError> {
    let n = notes_cents.len();
    let mut report = Vec::with_capacity(constraints.len() * n);
    for c in constraints {
        let step = nearest_step_for_ratio(c.ideal_cents, n, period_cents);
        let kind = IntervalKind::classify(c.ideal_cents);
        for i in 0..n {
            let j = (i + step) % n;
            let actual = wrap_to_cycle(notes_cents[j] - notes_cents[i], period_cents);
            report.push(IntervalError {
                i,
                j,
                step,
                target: JustRatio::new(c.num, c.den, &c.label),
                target_cents: c.ideal_cents,
                actual_cents: actual,
                error_cents: signed_wrap_diff(actual, c.ideal_cents, period_cents),
                weight: c.weight,
                kind,
                is_skeleton: c.weight > SKELETON_WEIGHT,
                key_tonic: (i == 0).then_some(tonic),
                anchor_id: c.anchor_id.clone(),
            });
        }
    }
    report
}
