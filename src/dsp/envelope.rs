//! Linear fade envelope applied at both edges of every tone.

use super::SAMPLE_RATE;

/// Fade length in milliseconds, shared by every tone regardless of duration.
pub const FADE_DURATION_MS: u32 = 5;

/// Linear fade-in / fade-out gain for a tone of fixed length.
///
/// The two ramps are evaluated independently. When a tone is shorter than
/// two fades they overlap and their gains multiply.
#[derive(Debug, Clone, Copy)]
pub struct FadeEnvelope {
    fade_samples: usize,
    sample_count: usize,
}

impl FadeEnvelope {
    /// Envelope for a tone of `sample_count` samples at the engine rate.
    pub fn new(sample_count: usize) -> Self {
        FadeEnvelope {
            fade_samples: fade_samples(),
            sample_count,
        }
    }

    pub fn fade_samples(&self) -> usize {
        self.fade_samples
    }

    /// Gain for sample `i`, in [0, 1].
    pub fn gain(&self, i: usize) -> f64 {
        self.apply(i, 1.0)
    }

    /// Scale `value` by the fade-in ramp, then by the fade-out ramp.
    pub fn apply(&self, i: usize, mut value: f64) -> f64 {
        let fade = self.fade_samples;
        if fade == 0 {
            return value;
        }
        if i < fade {
            value *= i as f64 / fade as f64;
        }
        if i + fade >= self.sample_count {
            value *= self.sample_count.saturating_sub(1 + i) as f64 / fade as f64;
        }
        value
    }
}

/// Samples per fade ramp: `5 * 44100 / 1000`, truncated.
pub fn fade_samples() -> usize {
    (FADE_DURATION_MS * SAMPLE_RATE / 1000) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fade_is_220_samples() {
        assert_eq!(fade_samples(), 220);
    }

    #[test]
    fn fade_in_rises_from_zero() {
        let env = FadeEnvelope::new(44100);
        assert_eq!(env.gain(0), 0.0);
        let mut prev = 0.0;
        for i in 0..=220 {
            let g = env.gain(i);
            assert!(g >= prev, "fade-in fell at {i}: {g} < {prev}");
            prev = g;
        }
        assert_eq!(env.gain(220), 1.0);
    }

    #[test]
    fn sustains_at_unity() {
        let env = FadeEnvelope::new(44100);
        for i in 220..(44100 - 220) {
            assert_eq!(env.gain(i), 1.0);
        }
    }

    #[test]
    fn fade_out_falls_to_zero() {
        let n = 44100;
        let env = FadeEnvelope::new(n);
        let mut prev = 1.0;
        for i in (n - 221)..n {
            let g = env.gain(i);
            assert!(g <= prev, "fade-out rose at {i}: {g} > {prev}");
            prev = g;
        }
        assert_eq!(env.gain(n - 1), 0.0);
    }

    #[test]
    fn short_tone_ramps_compound() {
        // 300 samples: ramps overlap on [80, 220)
        let env = FadeEnvelope::new(300);
        let i = 150;
        let fade_in = i as f64 / 220.0;
        let fade_out = (300 - 1 - i) as f64 / 220.0;
        assert!((env.gain(i) - fade_in * fade_out).abs() < 1e-12);
        assert!(env.gain(i) < fade_in.min(fade_out));
    }

    #[test]
    fn tone_shorter_than_one_fade() {
        let env = FadeEnvelope::new(100);
        for i in 0..100 {
            let g = env.gain(i);
            assert!((0.0..=1.0).contains(&g));
        }
        assert_eq!(env.gain(99), 0.0);
    }
}
