use serde::{Deserialize, Serialize};

/// A single sine tone. A frequency of 0 Hz is a silent gap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tone {
    /// Frequency in Hz.
    #[serde(rename = "freq")]
    pub frequency: f64,
    /// Duration in seconds.
    pub duration: f64,
}

impl Tone {
    pub const fn new(frequency: f64, duration: f64) -> Self {
        Tone {
            frequency,
            duration,
        }
    }

    pub const fn rest(duration: f64) -> Self {
        Tone::new(0.0, duration)
    }

    pub fn is_silent(&self) -> bool {
        self.frequency <= 0.0
    }
}

/// Total playing time of a tone sequence, in seconds.
pub fn total_duration(tones: &[Tone]) -> f64 {
    tones.iter().map(|t| t.duration).sum()
}
