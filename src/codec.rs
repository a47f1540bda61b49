//! Tone codes: base64url (no padding) over `(pitch, ticks)` byte pairs.
//!
//! Each pair is one tone. `pitch` goes through [`crate::pitch::frequency`],
//! `ticks` is the duration in hundredths of a second.

use base64::Engine as _;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};

use crate::error::{CodeError, CueError};
use crate::pitch;
use crate::tone::Tone;

/// Duration ticks per second.
pub const TICKS_PER_SECOND: f64 = 100.0;

/// URL-safe alphabet, no padding on output, padding rejected on input,
/// non-zero trailing bits tolerated.
const TONE_CODE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::RequireNone)
        .with_decode_allow_trailing_bits(true),
);

/// Decode a tone code into a tone sequence.
///
/// `\r` and `\n` anywhere in the code are skipped, so wrapped or pasted
/// codes still decode.
pub fn decode(code: &str) -> Result<Vec<Tone>, CueError> {
    let cleaned: Vec<u8> = code
        .bytes()
        .filter(|b| !matches!(b, b'\r' | b'\n'))
        .collect();
    let data = TONE_CODE.decode(cleaned).map_err(CodeError::from)?;
    if data.is_empty() {
        return Err(CodeError::Empty.into());
    }
    if data.len() % 2 != 0 {
        return Err(CodeError::OddLength(data.len()).into());
    }

    Ok(data
        .chunks_exact(2)
        .map(|pair| Tone::new(pitch::frequency(pair[0]), pair[1] as f64 / TICKS_PER_SECOND))
        .collect())
}

/// Encode `(pitch, ticks)` pairs into a tone code accepted by [`decode`].
pub fn encode(pairs: &[(u8, u8)]) -> String {
    let bytes: Vec<u8> = pairs.iter().flat_map(|&(p, t)| [p, t]).collect();
    TONE_CODE.encode(bytes)
}
