//! User-created cues, stored with their code in `custom-sounds.json`.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::codec;
use crate::error::BellError;
use crate::preset;
use crate::tone::Tone;

/// A user-created cue and the code it was decoded from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomSound {
    pub name: String,
    pub code: String,
    pub tones: Vec<Tone>,
}

/// The custom-sound registry. Names are matched ignoring ASCII case.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomSounds {
    sounds: Vec<CustomSound>,
}

impl CustomSounds {
    /// Load from `path`; a missing file is an empty registry.
    pub fn load(path: &Path) -> Result<Self, BellError> {
        let data = match std::fs::read(path) {
            Ok(d) => d,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(BellError::file(path, e)),
        };
        // `null` is what an empty registry was historically written as
        let sounds: Option<Vec<CustomSound>> =
            serde_json::from_slice(&data).map_err(|e| BellError::json(path, e))?;
        Ok(CustomSounds {
            sounds: sounds.unwrap_or_default(),
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), BellError> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| BellError::file(dir, e))?;
        }
        let data =
            serde_json::to_vec_pretty(&self.sounds).map_err(|e| BellError::json(path, e))?;
        std::fs::write(path, data).map_err(|e| BellError::file(path, e))?;
        debug!(path = %path.display(), count = self.sounds.len(), "saved custom sounds");
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &CustomSound> {
        self.sounds.iter()
    }

    pub fn len(&self) -> usize {
        self.sounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sounds.is_empty()
    }

    pub fn find(&self, name: &str) -> Option<&CustomSound> {
        self.sounds.iter().find(|s| s.name.eq_ignore_ascii_case(name))
    }

    /// Decode `code` and register it under `name`.
    ///
    /// Rejects names that shadow a built-in preset or an existing custom
    /// sound, and codes that do not decode.
    pub fn create(&mut self, name: &str, code: &str) -> Result<&CustomSound, BellError> {
        if preset::is_builtin_name(name) {
            return Err(BellError::NameConflict(name.to_string()));
        }
        let tones = codec::decode(code)?;
        self.add(CustomSound {
            name: name.to_string(),
            code: code.to_string(),
            tones,
        })
    }

    pub fn add(&mut self, sound: CustomSound) -> Result<&CustomSound, BellError> {
        if self.find(&sound.name).is_some() {
            return Err(BellError::DuplicateSound(sound.name));
        }
        self.sounds.push(sound);
        Ok(&self.sounds[self.sounds.len() - 1])
    }

    /// Remove by name, returning the removed sound.
    pub fn remove(&mut self, name: &str) -> Result<CustomSound, BellError> {
        let idx = self
            .sounds
            .iter()
            .position(|s| s.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| BellError::SoundNotFound(name.to_string()))?;
        Ok(self.sounds.remove(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CueError;

    fn whistle() -> String {
        codec::encode(&[(84, 10), (0, 5), (88, 20)])
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let sounds = CustomSounds::load(&dir.path().join("custom-sounds.json")).unwrap();
        assert!(sounds.is_empty());
    }

    #[test]
    fn null_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom-sounds.json");
        std::fs::write(&path, "null").unwrap();
        assert!(CustomSounds::load(&path).unwrap().is_empty());
    }

    #[test]
    fn create_save_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg").join("custom-sounds.json");

        let mut sounds = CustomSounds::default();
        let created = sounds.create("Whistle", &whistle()).unwrap();
        assert_eq!(created.tones.len(), 3);
        sounds.save(&path).unwrap();

        let loaded = CustomSounds::load(&path).unwrap();
        assert_eq!(loaded, sounds);
        let found = loaded.find("WHISTLE").unwrap();
        assert_eq!(found.code, whistle());
        assert!(found.tones[1].is_silent());
    }

    #[test]
    fn rejects_builtin_names() {
        let mut sounds = CustomSounds::default();
        assert!(matches!(
            sounds.create("doorbell", &whistle()),
            Err(BellError::NameConflict(_))
        ));
    }

    #[test]
    fn rejects_duplicates_ignoring_case() {
        let mut sounds = CustomSounds::default();
        sounds.create("Whistle", &whistle()).unwrap();
        assert!(matches!(
            sounds.create("whistle", &whistle()),
            Err(BellError::DuplicateSound(_))
        ));
        assert_eq!(sounds.len(), 1);
    }

    #[test]
    fn rejects_bad_codes() {
        let mut sounds = CustomSounds::default();
        assert!(matches!(
            sounds.create("Broken", "PAo="),
            Err(BellError::Cue(CueError::InvalidCode(_)))
        ));
        assert!(sounds.is_empty());
    }

    #[test]
    fn remove_by_name() {
        let mut sounds = CustomSounds::default();
        sounds.create("Whistle", &whistle()).unwrap();
        let removed = sounds.remove("wHiStLe").unwrap();
        assert_eq!(removed.name, "Whistle");
        assert!(sounds.is_empty());
        assert!(matches!(
            sounds.remove("Whistle"),
            Err(BellError::SoundNotFound(_))
        ));
    }
}
