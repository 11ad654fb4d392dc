//! Solver configuration.
//!
//! A [`TemperamentSpec`] is the single input to a solve. It deserializes
//! from TOML with per-field defaults, so a minimal file (or an empty one)
//! yields a sensible 12-degree scale fit against the common consonances.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::solver::blend::OctaveBlend;
use crate::solver::ratio::JustRatio;

/// Tonal context: which degree is the tonic and how far the chain leans
/// to the flat side.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeyContext {
    /// Tonic degree index.
    #[serde(default)]
    pub tonic: usize,
    /// Number of flats; rotates the generator chain's starting point.
    #[serde(default)]
    pub flats: i32,
}

/// Where the wolf interval lands.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "mode")]
pub enum WolfPlacement {
    /// Derived from the key context.
    Auto,
    /// Pinned to a specific edge between adjacent degrees. Out-of-range
    /// edges are clamped, not rejected.
    Manual {
        /// Edge index in `[0, scale_size)`.
        edge: i64,
    },
}

impl Default for WolfPlacement {
    fn default() -> Self {
        WolfPlacement::Auto
    }
}

/// Immutable input to one solve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemperamentSpec {
    /// Number of scale degrees.
    #[serde(default = "TemperamentSpec::default_scale_size")]
    pub scale_size: usize,
    /// Repetition period in cents, nominally the 1200-cent octave.
    #[serde(default = "TemperamentSpec::default_cycle_cents")]
    pub cycle_cents: f64,
    /// 1.0 keeps the period rigidly at the nominal cycle; lower values
    /// trade period stretch for interval accuracy.
    #[serde(default = "TemperamentSpec::default_octave_stiffness")]
    pub octave_stiffness: f64,
    /// MIDI note of the tonic degree.
    #[serde(default = "TemperamentSpec::default_base_midi_note")]
    pub base_midi_note: u8,
    /// Frequency of the tonic degree in Hz.
    #[serde(default = "TemperamentSpec::default_base_frequency_hz")]
    pub base_frequency_hz: f64,
    /// Just-intonation interval targets.
    #[serde(default = "TemperamentSpec::default_targets")]
    pub targets: Vec<JustRatio>,
    /// Explicit per-target weights keyed `"n/d"`. Empty means equal
    /// weighting.
    #[serde(default)]
    pub target_weights: BTreeMap<String, f64>,
    /// Continuous anchor blending; overrides the weight map when enabled.
    #[serde(default)]
    pub octave_blend: OctaveBlend,
    /// Tonal context.
    #[serde(default)]
    pub key: KeyContext,
    /// Wolf interval placement.
    #[serde(default)]
    pub wolf: WolfPlacement,
}

impl TemperamentSpec {
    fn default_scale_size() -> usize {
        12
    }
    fn default_cycle_cents() -> f64 {
        1200.0
    }
    fn default_targets() -> Vec<JustRatio> {
        vec![
            JustRatio::new(3, 2, "P5"),
            JustRatio::new(5, 4, "M3"),
            JustRatio::new(6, 5, "m3"),
        ]
    }
    fn default_octave_stiffness() -> f64 {
        1.0
    }
    fn default_base_midi_note() -> u8 {
        60
    }
    fn default_base_frequency_hz() -> f64 {
        261.6256
    }

    /// Load a spec from a TOML file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("reading spec file {}", path.display()))?;
        let spec: Self = toml::from_str(&contents)
            .with_context(|| format!("parsing spec file {}", path.display()))?;
        Ok(spec)
    }

    /// Reject inputs the solver cannot act on. Runs before every solve.
    pub fn validate(&self) -> Result<()> {
        if self.scale_size < 1 {
            bail!("scale_size must be >= 1");
        }
        if !self.cycle_cents.is_finite() || self.cycle_cents <= 0.0 {
            bail!("cycle_cents must be finite and > 0 (got {})", self.cycle_cents);
        }
        if !self.octave_stiffness.is_finite() || !(0.0..=1.0).contains(&self.octave_stiffness) {
            bail!(
                "octave_stiffness must be in [0, 1] (got {})",
                self.octave_stiffness
            );
        }
        for axis in [self.octave_blend.x, self.octave_blend.y, self.octave_blend.z] {
            if !axis.is_finite() || !(0.0..=1.0).contains(&axis) {
                bail!("blend axes must be in [0, 1] (got {})", axis);
            }
        }
        if !self.base_frequency_hz.is_finite() || self.base_frequency_hz <= 0.0 {
            bail!(
                "base_frequency_hz must be finite and > 0 (got {})",
                self.base_frequency_hz
            );
        }
        for target in &self.targets {
            target.validate()?;
        }
        if let Some(anchors) = &self.octave_blend.anchors {
            for anchor in anchors {
                anchor.ratio.validate()?;
            }
        }
        Ok(())
    }
}

impl Default for TemperamentSpec {
    fn default() -> Self {
        Self {
            scale_size: Self::default_scale_size(),
            cycle_cents: Self::default_cycle_cents(),
            targets: Self::default_targets(),
            target_weights: BTreeMap::new(),
            octave_blend: OctaveBlend::default(),
            octave_stiffness: Self::default_octave_stiffness(),
            key: KeyContext::default(),
            wolf: WolfPlacement::default(),
            base_midi_note: Self::default_base_midi_note(),
            base_frequency_hz: Self::default_base_frequency_hz(),
        }
    }
}
