//! Pitch codes to frequencies, 12-tone equal temperament with A4 = 440 Hz.

/// Frequency of A4, the reference pitch.
pub const A4_FREQUENCY: f64 = 440.0;

/// Pitch code of A4.
pub const A4_PITCH: u8 = 69;

/// Convert a pitch code to a frequency in Hz.
///
/// Code 0 is the silence marker and maps to 0 Hz. Codes above 127 are not
/// clamped; they continue the same curve upwards.
/// Formula: `440 * 2^((pitch - 69) / 12)`
pub fn frequency(pitch: u8) -> f64 {
    if pitch == 0 {
        return 0.0;
    }
    A4_FREQUENCY * (2.0_f64).powf((pitch as f64 - A4_PITCH as f64) / 12.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_silence() {
        assert_eq!(frequency(0), 0.0);
    }

    #[test]
    fn a4_is_440() {
        assert_eq!(frequency(69), 440.0);
    }

    #[test]
    fn c4_is_middle_c() {
        let f = frequency(60);
        assert!((f - 261.63).abs() < 0.01, "C4 should be ~261.63Hz, got {f}");
    }

    #[test]
    fn matches_equal_temperament_for_all_notes() {
        for p in 1..=127u8 {
            let expected = 440.0 * 2.0_f64.powf((p as f64 - 69.0) / 12.0);
            let got = frequency(p);
            assert!(
                ((got - expected) / expected).abs() < 1e-9,
                "pitch {p}: expected {expected}, got {got}"
            );
        }
    }

    #[test]
    fn octave_doubles() {
        let a4 = frequency(69);
        let a5 = frequency(81);
        assert!((a5 - 2.0 * a4).abs() < 1e-9);
    }

    #[test]
    fn high_codes_are_not_clamped() {
        let f = frequency(255);
        assert!(f > frequency(127));
        assert!(f.is_finite());
    }
}
