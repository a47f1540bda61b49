//! Synthesis and WAV output.
//!
//! Everything here runs at a single fixed format: 44.1 kHz, mono, 16-bit.
//! Rendering is a pure function of the tones; the writer is the only
//! piece that touches the filesystem.

pub mod envelope;
pub mod synth;
pub mod wav;

/// Output sample rate in Hz.
pub const SAMPLE_RATE: u32 = 44100;

/// Output channel count.
pub const CHANNELS: u16 = 1;

/// Bits per PCM sample.
pub const BITS_PER_SAMPLE: u16 = 16;

pub use synth::render;

use std::path::Path;

use crate::error::CueError;
use crate::tone::Tone;

/// Render `tones` and write them to `path` as a WAV file.
pub fn render_to_file(path: &Path, tones: &[Tone]) -> Result<(), CueError> {
    let samples = render(tones);
    wav::write(path, &samples)
}
