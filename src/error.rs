use thiserror::Error;

/// Errors raised by the tone codec and the WAV writer.
#[derive(Debug, Error)]
pub enum CueError {
    #[error("invalid code: {0}")]
    InvalidCode(#[from] CodeError),
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Why a tone code was rejected.
#[derive(Debug, Error)]
pub enum CodeError {
    #[error("{0}")]
    Base64(#[from] base64::DecodeError),
    #[error("code is empty")]
    Empty,
    #[error("must contain an even number of bytes, got {0}")]
    OddLength(usize),
}

/// Errors raised by the host layer (config, custom sounds, hooks, playback).
#[cfg(feature = "host")]
#[derive(Debug, Error)]
pub enum BellError {
    #[error(transparent)]
    Cue(#[from] CueError),
    #[error("I/O error on {path}: {source}")]
    File {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: std::path::PathBuf,
        source: serde_json::Error,
    },
    #[error(transparent)]
    UnknownEvent(#[from] crate::event::UnknownEvent),
    #[error("unknown sound {name:?} for event {event:?}")]
    UnknownSound { event: String, name: String },
    #[error("{0:?} conflicts with a built-in preset name")]
    NameConflict(String),
    #[error("custom sound {0:?} already exists (use delete first to replace)")]
    DuplicateSound(String),
    #[error("custom sound {0:?} not found")]
    SoundNotFound(String),
    #[error("{0}")]
    InvalidVolume(String),
    #[error("home directory could not be determined")]
    NoHome,
    #[error("no audio player found (tried {0})")]
    NoPlayer(String),
    #[error("{player} exited with {status}")]
    Playback {
        player: String,
        status: std::process::ExitStatus,
    },
}

#[cfg(feature = "host")]
impl BellError {
    pub(crate) fn file(path: &std::path::Path, source: std::io::Error) -> Self {
        BellError::File {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn json(path: &std::path::Path, source: serde_json::Error) -> Self {
        BellError::Json {
            path: path.to_path_buf(),
            source,
        }
    }
}
