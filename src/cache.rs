//! Rendered-cue cache under `~/.config/cuebell/sounds`.
//!
//! File names carry a content hash of the tones, so editing a custom sound
//! never plays a stale render.

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::custom::CustomSounds;
use crate::dsp;
use crate::error::BellError;
use crate::event::HookEvent;
use crate::preset;
use crate::tone::Tone;

/// Tones for a sound name: the event's built-in preset of that exact name,
/// otherwise a custom sound.
pub fn resolve_tones(
    event: HookEvent,
    name: &str,
    custom: &CustomSounds,
) -> Result<Vec<Tone>, BellError> {
    if let Some(p) = preset::presets_for(event).iter().find(|p| p.name == name) {
        return Ok(p.tones.to_vec());
    }
    if let Some(cs) = custom.find(name) {
        return Ok(cs.tones.clone());
    }
    Err(BellError::UnknownSound {
        event: event.name().to_string(),
        name: name.to_string(),
    })
}

/// Render `name` for `event` into the cache if needed; returns the WAV path.
pub fn ensure_sound(
    sounds_dir: &Path,
    event: HookEvent,
    name: &str,
    custom: &CustomSounds,
) -> Result<PathBuf, BellError> {
    let tones = resolve_tones(event, name, custom)?;
    std::fs::create_dir_all(sounds_dir).map_err(|e| BellError::file(sounds_dir, e))?;

    let path = sounds_dir.join(cache_file_name(event, name, &tones));
    if path.exists() {
        debug!(path = %path.display(), "cache hit");
        return Ok(path);
    }

    dsp::render_to_file(&path, &tones)?;
    debug!(path = %path.display(), tones = tones.len(), "rendered into cache");
    Ok(path)
}

/// `<event>_<sanitized name>_<hash>.wav`
pub fn cache_file_name(event: HookEvent, name: &str, tones: &[Tone]) -> String {
    format!("{}_{}_{}.wav", event.name(), sanitize(name), tones_digest(tones))
}

/// Spaces become underscores, ASCII letters are lowercased.
pub fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if c == ' ' { '_' } else { c.to_ascii_lowercase() })
        .collect()
}

/// First 8 hex digits of SHA-256 over the tones' bit patterns.
fn tones_digest(tones: &[Tone]) -> String {
    let mut hasher = Sha256::new();
    for t in tones {
        hasher.update(t.frequency.to_bits().to_le_bytes());
        hasher.update(t.duration.to_bits().to_le_bytes());
    }
    hasher.finalize()[..4]
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec;

    #[test]
    fn sanitize_names() {
        assert_eq!(sanitize("Major Chime"), "major_chime");
        assert_eq!(sanitize("Low-Buzz 2"), "low-buzz_2");
    }

    #[test]
    fn file_name_tracks_content() {
        let a = cache_file_name(HookEvent::Stop, "Mine", &[Tone::new(440.0, 0.1)]);
        let b = cache_file_name(HookEvent::Stop, "Mine", &[Tone::new(440.0, 0.2)]);
        assert!(a.starts_with("stop_mine_"));
        assert!(a.ends_with(".wav"));
        assert_eq!(a.len(), "stop_mine_".len() + 8 + 4);
        assert_ne!(a, b);
    }

    #[test]
    fn builtin_wins_over_custom() {
        let tones = resolve_tones(HookEvent::Stop, "Resolve", &CustomSounds::default()).unwrap();
        assert_eq!(tones.len(), 4);
    }

    #[test]
    fn builtin_for_other_event_is_unknown() {
        let err = resolve_tones(HookEvent::Stop, "Doorbell", &CustomSounds::default());
        assert!(matches!(err, Err(BellError::UnknownSound { .. })));
    }

    #[test]
    fn renders_then_reuses() {
        let dir = tempfile::tempdir().unwrap();
        let sounds_dir = dir.path().join("sounds");
        let custom = CustomSounds::default();

        let path = ensure_sound(&sounds_dir, HookEvent::Notification, "Attention", &custom).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        let expected = dsp::wav::encode(&dsp::render(
            preset::find("notification", "Attention").unwrap().tones,
        ));
        assert_eq!(bytes, expected);

        let modified = std::fs::metadata(&path).unwrap().modified().unwrap();
        let again = ensure_sound(&sounds_dir, HookEvent::Notification, "Attention", &custom).unwrap();
        assert_eq!(again, path);
        assert_eq!(std::fs::metadata(&again).unwrap().modified().unwrap(), modified);
    }

    #[test]
    fn custom_sound_for_any_event() {
        let dir = tempfile::tempdir().unwrap();
        let mut custom = CustomSounds::default();
        custom.create("Ping", &codec::encode(&[(96, 8)])).unwrap();

        let path = ensure_sound(dir.path(), HookEvent::Limit, "ping", &custom).unwrap();
        let len = std::fs::metadata(&path).unwrap().len() as usize;
        assert_eq!(len, dsp::wav::HEADER_LEN + 2 * 3528);
    }
}
