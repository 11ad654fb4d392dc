//! Continuous anchor blending.
//!
//! Three independent axis values morph the relative importance of a fixed
//! set of reference intervals, so a user can slide between e.g. a
//! 3-limit-only temperament and a 5-/7-limit-blended one without discrete
//! mode switches. Each anchor carries an affinity per axis derived from its
//! prime limit; its weight is the product of one lerp per axis. Weights are
//! non-negative and need not sum to 1 - constraint building renormalizes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ratio::{prime_limit, JustRatio};

/// A labeled reference interval the blend axes act on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlendAnchor {
    /// Stable identifier carried through constraints and interval errors.
    pub id: String,
    /// The anchor interval.
    pub ratio: JustRatio,
}

impl BlendAnchor {
    fn new(id: &str, num: u32, den: u32, label: &str) -> Self {
        Self {
            id: id.to_string(),
            ratio: JustRatio::new(num, den, label),
        }
    }
}

/// Axis configuration for the continuous blend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OctaveBlend {
    /// Whether blended weighting is active at all.
    #[serde(default)]
    pub enabled: bool,
    /// 3-limit emphasis axis, in `[0, 1]`.
    #[serde(default = "OctaveBlend::default_axis")]
    pub x: f64,
    /// 5-limit emphasis axis, in `[0, 1]`.
    #[serde(default = "OctaveBlend::default_axis")]
    pub y: f64,
    /// 7-limit emphasis axis, in `[0, 1]`.
    #[serde(default = "OctaveBlend::default_axis")]
    pub z: f64,
    /// Custom anchor set; the canonical prime-limit set when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchors: Option<Vec<BlendAnchor>>,
}

impl OctaveBlend {
    fn default_axis() -> f64 {
        0.5
    }
}

impl Default for OctaveBlend {
    fn default() -> Self {
        Self {
            enabled: false,
            x: Self::default_axis(),
            y: Self::default_axis(),
            z: Self::default_axis(),
            anchors: None,
        }
    }
}

/// The canonical prime-limit reference intervals: a pair each from the
/// 3-limit, 5-limit and 7-limit.
pub fn default_anchors() -> Vec<BlendAnchor> {
    vec![
        BlendAnchor::new("p5", 3, 2, "P5"),
        BlendAnchor::new("p4", 4, 3, "P4"),
        BlendAnchor::new("m3maj", 5, 4, "M3"),
        BlendAnchor::new("m3min", 6, 5, "m3"),
        BlendAnchor::new("h7", 7, 4, "H7"),
        BlendAnchor::new("sm3", 7, 6, "sm3"),
    ]
}

/// Per-axis affinity triple for an anchor, from its prime limit:
/// 3-limit anchors ride the x axis, 5-limit the y axis, everything
/// higher the z axis.
fn affinity(ratio: &JustRatio) -> (f64, f64, f64) {
    match prime_limit(ratio.num, ratio.den) {
        0..=3 => (1.0, 0.0, 0.0),
        5 => (0.0, 1.0, 0.0),
        _ => (0.0, 0.0, 1.0),
    }
}

#[inline]
fn axis_lerp(axis: f64, affinity: f64) -> f64 {
    affinity * axis + (1.0 - affinity) * (1.0 - axis)
}

/// Compute the blend weight of every anchor in `anchors` for the given
/// axis configuration. Keys are anchor ids.
pub fn blend_weights(blend: &OctaveBlend, anchors: &[BlendAnchor]) -> BTreeMap<String, f64> {
    let mut weights = BTreeMap::new();
    for anchor in anchors {
        let (fx, fy, fz) = affinity(&anchor.ratio);
        let w = axis_lerp(blend.x, fx) * axis_lerp(blend.y, fy) * axis_lerp(blend.z, fz);
        weights.insert(anchor.id.clone(), w);
    }
    weights
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blend(x: f64, y: f64, z: f64) -> OctaveBlend {
        OctaveBlend {
            enabled: true,
            x,
            y,
            z,
            anchors: None,
        }
    }

    #[test]
    fn test_centered_axes_weigh_all_anchors_equally() {
        let anchors = default_anchors();
        let w = blend_weights(&blend(0.5, 0.5, 0.5), &anchors);
        for anchor in &anchors {
            assert!((w[&anchor.id] - 0.125).abs() < 1e-12);
        }
    }

    #[test]
    fn test_pure_three_limit_corner() {
        let anchors = default_anchors();
        let w = blend_weights(&blend(1.0, 0.0, 0.0), &anchors);
        assert!((w["p5"] - 1.0).abs() < 1e-12);
        assert!((w["p4"] - 1.0).abs() < 1e-12);
        assert!(w["m3maj"].abs() < 1e-12);
        assert!(w["h7"].abs() < 1e-12);
    }

    #[test]
    fn test_weights_are_nonnegative_and_continuous() {
        let anchors = default_anchors();
        for &x in &[0.0, 0.25, 0.5, 0.75, 1.0] {
            for &y in &[0.0, 0.5, 1.0] {
                let w = blend_weights(&blend(x, y, 0.3), &anchors);
                assert!(w.values().all(|&v| v >= 0.0));
            }
        }
    }

    #[test]
    fn test_custom_anchor_affinity_from_prime_limit() {
        let anchors = vec![BlendAnchor::new("tritone", 45, 32, "A4")];
        // 45/32 = 2^-5 * 3^2 * 5 -> 5-limit, rides the y axis
        let w_lo = blend_weights(&blend(0.5, 0.0, 0.5), &anchors);
        let w_hi = blend_weights(&blend(0.5, 1.0, 0.5), &anchors);
        assert!(w_lo["tritone"] < w_hi["tritone"]);
    }
}
