//! WAV writer — 16-bit mono PCM in a canonical 44-byte RIFF header.

use std::io::Write;
use std::path::Path;

use tracing::debug;

use super::{BITS_PER_SAMPLE, CHANNELS, SAMPLE_RATE};
use crate::error::CueError;

/// Size of the RIFF + fmt + data headers.
pub const HEADER_LEN: usize = 44;

/// Encode mono i16 PCM samples to a WAV byte buffer.
pub fn encode(samples: &[i16]) -> Vec<u8> {
    let byte_rate = SAMPLE_RATE * CHANNELS as u32 * (BITS_PER_SAMPLE as u32 / 8);
    let block_align = CHANNELS * (BITS_PER_SAMPLE / 8);
    let data_size = (samples.len() * 2) as u32;
    let file_size = 36 + data_size;

    let mut buf = Vec::with_capacity(HEADER_LEN + data_size as usize);

    // RIFF header
    buf.extend_from_slice(b"RIFF");
    buf.extend_from_slice(&file_size.to_le_bytes());
    buf.extend_from_slice(b"WAVE");

    // fmt chunk
    buf.extend_from_slice(b"fmt ");
    buf.extend_from_slice(&16u32.to_le_bytes()); // chunk size
    buf.extend_from_slice(&1u16.to_le_bytes()); // PCM format
    buf.extend_from_slice(&CHANNELS.to_le_bytes());
    buf.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
    buf.extend_from_slice(&byte_rate.to_le_bytes());
    buf.extend_from_slice(&block_align.to_le_bytes());
    buf.extend_from_slice(&BITS_PER_SAMPLE.to_le_bytes());

    // data chunk
    buf.extend_from_slice(b"data");
    buf.extend_from_slice(&data_size.to_le_bytes());
    for &sample in samples {
        buf.extend_from_slice(&sample.to_le_bytes());
    }

    buf
}

/// Write samples as a WAV file at `path`.
///
/// The bytes go to a temporary file next to `path` which is then renamed
/// over it. On failure the temporary file is removed and `path` is left
/// untouched.
pub fn write(path: &Path, samples: &[i16]) -> Result<(), CueError> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let bytes = encode(samples);

    let mut builder = tempfile::Builder::new();
    builder.prefix(".cuebell-").suffix(".wav.tmp");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o644));
    }
    let mut tmp = builder.tempfile_in(dir)?;
    tmp.write_all(&bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;

    debug!(path = %path.display(), bytes = bytes.len(), "wrote wav");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::synth;
    use crate::tone::Tone;

    fn u16_at(b: &[u8], at: usize) -> u16 {
        u16::from_le_bytes([b[at], b[at + 1]])
    }

    fn u32_at(b: &[u8], at: usize) -> u32 {
        u32::from_le_bytes([b[at], b[at + 1], b[at + 2], b[at + 3]])
    }

    #[test]
    fn wav_header_valid() {
        let wav = encode(&[0, 1, -1]);

        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(u32_at(&wav, 4), 36 + 6);
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(&wav[12..16], b"fmt ");
        assert_eq!(u32_at(&wav, 16), 16);
        assert_eq!(u16_at(&wav, 20), 1);
        assert_eq!(u16_at(&wav, 22), 1, "mono");
        assert_eq!(u32_at(&wav, 24), 44100);
        assert_eq!(u32_at(&wav, 28), 88200, "byte rate");
        assert_eq!(u16_at(&wav, 32), 2, "block align");
        assert_eq!(u16_at(&wav, 34), 16);
        assert_eq!(&wav[36..40], b"data");
        assert_eq!(u32_at(&wav, 40), 6);
        assert_eq!(&wav[44..], &[0, 0, 1, 0, 0xff, 0xff]);
    }

    #[test]
    fn empty_buffer_is_header_only() {
        let wav = encode(&[]);
        assert_eq!(wav.len(), HEADER_LEN);
        assert_eq!(u32_at(&wav, 4), 36);
        assert_eq!(u32_at(&wav, 40), 0);
    }

    #[test]
    fn write_produces_exact_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone.wav");
        let samples = synth::render(&[Tone::new(440.0, 0.1)]);
        write(&path, &samples).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(bytes.len(), 44 + 2 * samples.len());
        assert_eq!(u32_at(&bytes, 24), 44100);
        assert_eq!(u16_at(&bytes, 34), 16);
        assert_eq!(u16_at(&bytes, 22), 1);
        assert_eq!(u32_at(&bytes, 40) as usize, 2 * samples.len());
    }

    #[test]
    fn data_chunk_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chime.wav");
        let samples = synth::render(&[
            Tone::new(523.25, 0.15),
            Tone::rest(0.05),
            Tone::new(783.99, 0.25),
        ]);
        write(&path, &samples).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        let data: Vec<i16> = bytes[HEADER_LEN..]
            .chunks_exact(2)
            .map(|c| i16::from_le_bytes([c[0], c[1]]))
            .collect();
        assert_eq!(data, samples);
    }

    #[test]
    fn readable_by_hound() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hound.wav");
        let samples = synth::render(&[Tone::new(659.25, 0.2), Tone::new(523.25, 0.3)]);
        write(&path, &samples).unwrap();

        let mut reader = hound::WavReader::open(&path).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 44100);
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(spec.sample_format, hound::SampleFormat::Int);
        let read: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(read, samples);
    }

    #[test]
    fn overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("again.wav");
        write(&path, &[1, 2, 3, 4]).unwrap();
        write(&path, &[5]).unwrap();
        assert_eq!(std::fs::read(&path).unwrap().len(), 46);
    }

    #[test]
    fn missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("tone.wav");
        match write(&path, &[0; 16]) {
            Err(CueError::Io(_)) => {}
            other => panic!("expected Io error, got {other:?}"),
        }
        assert!(!path.exists());
    }

    #[test]
    fn failed_write_leaves_no_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        // a directory at the destination makes the final rename fail
        let path = dir.path().join("occupied");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep"), b"x").unwrap();

        assert!(matches!(write(&path, &[0; 16]), Err(CueError::Io(_))));
        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(leftovers, vec![std::ffi::OsString::from("occupied")]);
    }
}
