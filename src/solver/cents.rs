//! Cyclic cents arithmetic.
//!
//! All pitch math in the solver runs in the log domain: a ratio becomes a
//! cents value, and everything else is modular arithmetic on the repeating
//! cycle (normally the 1200-cent octave).

/// Cents spanned by one pure octave.
pub const OCTAVE_CENTS: f64 = 1200.0;

/// Convert a frequency ratio to cents: `1200 * log2(num / den)`.
#[inline]
pub fn ratio_to_cents(num: f64, den: f64) -> f64 {
    OCTAVE_CENTS * (num / den).log2()
}

/// Reduce any cents value into `[0, period)` with a floored modulo.
///
/// Unlike `%`, this never returns a negative remainder, so descending
/// generator chains wrap onto the same pitch classes as ascending ones.
#[inline]
pub fn wrap_to_cycle(cents: f64, period: f64) -> f64 {
    cents - period * (cents / period).floor()
}

/// Shortest signed distance from `b` to `a` around the cycle.
///
/// The result is in `(-period/2, period/2]`.
#[inline]
pub fn signed_wrap_diff(a: f64, b: f64, period: f64) -> f64 {
    let d = wrap_to_cycle(a - b, period);
    if d > period / 2.0 {
        d - period
    } else {
        d
    }
}

/// Nearest discrete scale-degree step for a continuous interval.
///
/// Rounds `cents / (period / n)` and clamps into `[1, n - 1]`, so even an
/// interval near the unison or the full period maps to a usable step.
#[inline]
pub fn nearest_step_for_ratio(cents: f64, n: usize, period: f64) -> usize {
    let degree_size = period / n as f64;
    let step = (cents / degree_size).round() as i64;
    let hi = (n as i64 - 1).max(1);
    step.clamp(1, hi) as usize
}

const CHROMATIC_NAMES: [&str; 12] = [
    "C", "C#", "D", "Eb", "E", "F", "F#", "G", "Ab", "A", "Bb", "B",
];

/// Cosmetic label for a scale degree. Twelve-degree scales get the usual
/// chromatic names; everything else gets a plain index label.
pub fn degree_name(degree: usize, n: usize) -> String {
    if n == 12 {
        CHROMATIC_NAMES[degree % 12].to_string()
    } else {
        format!("d{}", degree % n.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_to_cents() {
        assert!((ratio_to_cents(2.0, 1.0) - 1200.0).abs() < 1e-9);
        assert!((ratio_to_cents(3.0, 2.0) - 701.955).abs() < 1e-3);
        assert!((ratio_to_cents(1.0, 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_wrap_never_negative() {
        assert!((wrap_to_cycle(-100.0, 1200.0) - 1100.0).abs() < 1e-9);
        assert!((wrap_to_cycle(2500.0, 1200.0) - 100.0).abs() < 1e-9);
        assert_eq!(wrap_to_cycle(0.0, 1200.0), 0.0);
        for c in [-4800.5, -1.0, 0.0, 37.2, 1199.999, 99999.0] {
            let w = wrap_to_cycle(c, 1200.0);
            assert!((0.0..1200.0).contains(&w), "wrap({}) = {}", c, w);
        }
    }

    #[test]
    fn test_signed_wrap_diff_range() {
        assert!((signed_wrap_diff(700.0, 0.0, 1200.0) - (-500.0)).abs() < 1e-9);
        assert!((signed_wrap_diff(100.0, 1100.0, 1200.0) - 200.0).abs() < 1e-9);
        // exactly half the period maps to +period/2, not -period/2
        assert!((signed_wrap_diff(600.0, 0.0, 1200.0) - 600.0).abs() < 1e-9);
    }

    #[test]
    fn test_nearest_step_clamps() {
        assert_eq!(nearest_step_for_ratio(701.955, 12, 1200.0), 7);
        assert_eq!(nearest_step_for_ratio(386.3, 12, 1200.0), 4);
        // near-unison clamps up to 1, near-period clamps down to n-1
        assert_eq!(nearest_step_for_ratio(10.0, 12, 1200.0), 1);
        assert_eq!(nearest_step_for_ratio(1195.0, 12, 1200.0), 11);
    }

    #[test]
    fn test_degree_names() {
        assert_eq!(degree_name(0, 12), "C");
        assert_eq!(degree_name(7, 12), "G");
        assert_eq!(degree_name(3, 19), "d3");
    }
}
