//! Tone sequence renderer — sine tones shaped by the fade envelope.

use std::f64::consts::PI;

use tracing::debug;

use super::SAMPLE_RATE;
use super::envelope::FadeEnvelope;
use crate::tone::Tone;

/// Fixed output gain, half of full scale.
pub const MASTER_GAIN: f64 = 0.5;

/// Number of samples a tone occupies: `floor(duration * 44100)`.
pub fn sample_count(tone: &Tone) -> usize {
    (tone.duration * SAMPLE_RATE as f64) as usize
}

/// Render a tone sequence to mono 16-bit PCM.
///
/// Tones are concatenated back to back with no cross-fade; silent tones
/// become runs of zero samples.
pub fn render(tones: &[Tone]) -> Vec<i16> {
    let mut samples: Vec<i16> = Vec::new();
    // an oversized request just skips pre-sizing
    let _ = samples.try_reserve_exact(total_samples(tones));
    for tone in tones {
        render_tone(tone, &mut samples);
    }
    debug!(tones = tones.len(), samples = samples.len(), "rendered tone sequence");
    samples
}

/// Samples needed for the whole sequence, saturating at `usize::MAX`.
pub fn total_samples(tones: &[Tone]) -> usize {
    tones
        .iter()
        .map(sample_count)
        .fold(0, usize::saturating_add)
}

fn render_tone(tone: &Tone, out: &mut Vec<i16>) {
    let n = sample_count(tone);
    if tone.is_silent() {
        out.resize(out.len() + n, 0);
        return;
    }

    let env = FadeEnvelope::new(n);
    let step = 2.0 * PI * tone.frequency;
    for i in 0..n {
        let value = (step * i as f64 / SAMPLE_RATE as f64).sin();
        let value = env.apply(i, value) * MASTER_GAIN;
        // truncates toward zero
        out.push((value * i16::MAX as f64) as i16);
    }
}
