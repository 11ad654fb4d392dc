//! Cents-to-frequency conversion.

/// Absolute frequency of a pitch `cents` above `base_hz`.
#[inline]
pub fn cents_to_frequency(cents: f64, base_hz: f64) -> f64 {
    base_hz * 2.0_f64.powf(cents / 1200.0)
}

/// Convert a cents-per-degree table into absolute frequencies.
pub fn notes_to_frequencies(notes_cents: &[f64], base_frequency_hz: f64) -> Vec<f64> {
    notes_cents
        .iter()
        .map(|&c| cents_to_frequency(c, base_frequency_hz))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_conversion() {
        let notes: Vec<f64> = (0..12).map(|i| i as f64 * 100.0).collect();
        let freqs = notes_to_frequencies(&notes, 440.0);
        assert_eq!(freqs.len(), 12);
        assert!((freqs[0] - 440.0).abs() < 1e-9);
        // an equal-tempered semitone up from A4
        assert!((freqs[1] - 466.1637615).abs() < 1e-4);
        assert!((cents_to_frequency(1200.0, 440.0) - 880.0).abs() < 1e-9);
    }
}
