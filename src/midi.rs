//! MIDI retuning support.
//!
//! Expands a solved scale into a 128-entry per-note cents-deviation table
//! and converts cents deviations into 14-bit pitch-bend values. Sysex
//! encoding is the host's job; this module stays in the numeric domain.

use serde::Serialize;

/// Center (no-bend) 14-bit pitch wheel value.
pub const PITCH_BEND_CENTER: i32 = 8192;

/// Maximum 14-bit pitch wheel value.
pub const PITCH_BEND_MAX: i32 = 16383;

/// Clamp a bend range to what instruments actually accept.
pub fn clamp_bend_range(semitones: f64) -> f64 {
    semitones.clamp(1.0, 96.0)
}

/// 14-bit pitch-bend value for a cents deviation, given the instrument's
/// bend range in semitones. A non-positive range yields the center value.
pub fn pitch_bend_for_cents(cents: f64, bend_range_semitones: f64) -> u16 {
    if bend_range_semitones <= 0.0 {
        return PITCH_BEND_CENTER as u16;
    }
    let range_cents = bend_range_semitones * 100.0;
    let normalized = cents / range_cents;
    let value = (PITCH_BEND_CENTER as f64 + normalized * PITCH_BEND_CENTER as f64) as i32;
    value.clamp(0, PITCH_BEND_MAX) as u16
}

/// Per-MIDI-note cents deviation from 12-tone equal temperament.
#[derive(Debug, Clone, Serialize)]
pub struct RetuneTable {
    /// Deviation in cents for each MIDI note 0-127.
    pub cents_deviation: Vec<f64>,
}

impl RetuneTable {
    /// Expand a scale across the whole MIDI range.
    ///
    /// Note `m` maps to degree `(m - base) mod N` of the scale and is
    /// octave-extended by the solved period, so a stretched period stays
    /// consistent across registers.
    pub fn from_scale(notes_cents: &[f64], period_cents: f64, base_midi_note: u8) -> Self {
        let n = notes_cents.len().max(1) as i32;
        let base = base_midi_note as i32;
        let cents_deviation = (0..128)
            .map(|m| {
                let rel = m - base;
                let degree = rel.rem_euclid(n) as usize;
                let octave = rel.div_euclid(n);
                let scale_cents =
                    notes_cents.get(degree).copied().unwrap_or(0.0) + octave as f64 * period_cents;
                scale_cents - rel as f64 * 100.0
            })
            .collect();
        Self { cents_deviation }
    }

    /// Pitch-bend value per MIDI note for a given bend range.
    pub fn pitch_bends(&self, bend_range_semitones: f64) -> Vec<u16> {
        let range = clamp_bend_range(bend_range_semitones);
        self.cents_deviation
            .iter()
            .map(|&c| pitch_bend_for_cents(c, range))
            .collect()
    }
}
