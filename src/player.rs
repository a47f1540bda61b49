//! Playing a rendered cue through the operating system's audio player.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::config::clamp_volume;
use crate::error::BellError;

/// Plays a WAV file to completion.
pub trait Player {
    fn play(&self, path: &Path, volume: f64) -> Result<(), BellError>;
}

/// Command-line players we know how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerKind {
    /// macOS `afplay -v <0..1>`
    Afplay,
    /// PulseAudio `paplay --volume=<0..65536>`
    Paplay,
    /// ALSA `aplay`, no volume control
    Aplay,
}

impl PlayerKind {
    /// Preference order.
    pub const ALL: [PlayerKind; 3] = [PlayerKind::Afplay, PlayerKind::Paplay, PlayerKind::Aplay];

    pub fn program(self) -> &'static str {
        match self {
            PlayerKind::Afplay => "afplay",
            PlayerKind::Paplay => "paplay",
            PlayerKind::Aplay => "aplay",
        }
    }

    /// Arguments to play `path` at `volume` in [0, 1].
    pub fn args(self, path: &Path, volume: f64) -> Vec<String> {
        let volume = clamp_volume(volume);
        let file = path.display().to_string();
        match self {
            PlayerKind::Afplay => vec!["-v".into(), format!("{volume:.2}"), file],
            PlayerKind::Paplay => {
                vec![format!("--volume={}", (volume * 65536.0).round() as u32), file]
            }
            PlayerKind::Aplay => vec!["-q".into(), file],
        }
    }
}

/// Runs the first player found on `PATH`.
#[derive(Debug, Clone)]
pub struct SystemPlayer {
    kind: PlayerKind,
    program: PathBuf,
}

impl SystemPlayer {
    pub fn detect() -> Result<Self, BellError> {
        let path = std::env::var_os("PATH").unwrap_or_default();
        Self::detect_in(&path)
    }

    /// Detect using an explicit `PATH`-style search list.
    pub fn detect_in(search_path: &std::ffi::OsStr) -> Result<Self, BellError> {
        for kind in PlayerKind::ALL {
            for dir in std::env::split_paths(search_path) {
                let candidate = dir.join(kind.program());
                if candidate.is_file() {
                    debug!(player = %candidate.display(), "found audio player");
                    return Ok(SystemPlayer {
                        kind,
                        program: candidate,
                    });
                }
            }
        }
        let tried: Vec<&str> = PlayerKind::ALL.iter().map(|k| k.program()).collect();
        Err(BellError::NoPlayer(tried.join(", ")))
    }

    pub fn kind(&self) -> PlayerKind {
        self.kind
    }
}

impl Player for SystemPlayer {
    fn play(&self, path: &Path, volume: f64) -> Result<(), BellError> {
        let args = self.kind.args(path, volume);
        debug!(player = self.kind.program(), ?args, "playing");
        let status = Command::new(&self.program)
            .args(&args)
            .status()
            .map_err(|e| BellError::file(&self.program, e))?;
        if !status.success() {
            return Err(BellError::Playback {
                player: self.kind.program().to_string(),
                status,
            });
        }
        Ok(())
    }
}
