//! On-disk configuration: which cue plays for each event, and at what volume.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::BellError;
use crate::event::HookEvent;

/// Filesystem locations used by the host layer.
#[derive(Debug, Clone)]
pub struct Paths {
    /// `~/.config/cuebell`
    pub config_dir: PathBuf,
    /// The assistant's settings file, `~/.claude/settings.json`.
    pub settings: PathBuf,
}

impl Paths {
    /// Resolve locations under the current user's home directory.
    pub fn discover() -> Result<Self, BellError> {
        let base = directories::BaseDirs::new().ok_or(BellError::NoHome)?;
        Ok(Self::under_home(base.home_dir()))
    }

    /// Locations rooted at an arbitrary home directory.
    pub fn under_home(home: &Path) -> Self {
        Paths {
            config_dir: home.join(".config").join("cuebell"),
            settings: home.join(".claude").join("settings.json"),
        }
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.json")
    }

    pub fn custom_sounds_file(&self) -> PathBuf {
        self.config_dir.join("custom-sounds.json")
    }

    /// Render cache directory.
    pub fn sounds_dir(&self) -> PathBuf {
        self.config_dir.join("sounds")
    }
}

/// Selected sound per event plus playback volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<String>,
    /// Playback volume in [0, 1]. Missing or `null` means full volume.
    #[serde(default = "default_volume", deserialize_with = "volume_or_default")]
    pub volume: f64,
}

fn default_volume() -> f64 {
    1.0
}

fn volume_or_default<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_else(default_volume))
}

impl Default for Config {
    fn default() -> Self {
        Config {
            stop: None,
            notification: None,
            limit: None,
            volume: default_volume(),
        }
    }
}

impl Config {
    /// Load from `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, BellError> {
        let data = match std::fs::read(path) {
            Ok(d) => d,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Config::default()),
            Err(e) => return Err(BellError::file(path, e)),
        };
        let mut cfg: Config =
            serde_json::from_slice(&data).map_err(|e| BellError::json(path, e))?;
        cfg.volume = clamp_volume(cfg.volume);
        Ok(cfg)
    }

    /// Save as pretty JSON, creating the parent directory.
    pub fn save(&self, path: &Path) -> Result<(), BellError> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| BellError::file(dir, e))?;
        }
        let mut cfg = self.clone();
        cfg.volume = clamp_volume(cfg.volume);
        let data = serde_json::to_vec_pretty(&cfg).map_err(|e| BellError::json(path, e))?;
        std::fs::write(path, data).map_err(|e| BellError::file(path, e))?;
        debug!(path = %path.display(), "saved config");
        Ok(())
    }

    /// Sound selected for `event`, if any.
    pub fn sound(&self, event: HookEvent) -> Option<&str> {
        let field = match event {
            HookEvent::Stop => &self.stop,
            HookEvent::Notification => &self.notification,
            HookEvent::Limit => &self.limit,
        };
        field.as_deref().filter(|s| !s.is_empty())
    }

    pub fn set_sound(&mut self, event: HookEvent, name: Option<String>) {
        let name = name.filter(|s| !s.is_empty());
        match event {
            HookEvent::Stop => self.stop = name,
            HookEvent::Notification => self.notification = name,
            HookEvent::Limit => self.limit = name,
        }
    }

    /// Whether any event has a sound selected.
    pub fn any_sound(&self) -> bool {
        HookEvent::ALL.into_iter().any(|e| self.sound(e).is_some())
    }
}

pub fn clamp_volume(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

/// Parse a volume argument: `0.65`, `65`, or `65%`.
///
/// Plain numbers up to 1 are taken as fractions; above 1 and up to 100 as
/// percentages.
pub fn parse_volume(input: &str) -> Result<f64, BellError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(BellError::InvalidVolume("volume cannot be empty".into()));
    }

    if let Some(pct) = s.strip_suffix('%') {
        let pct: f64 = pct
            .trim()
            .parse()
            .map_err(|_| BellError::InvalidVolume(format!("invalid percent volume {input:?}")))?;
        if !(0.0..=100.0).contains(&pct) {
            return Err(BellError::InvalidVolume(
                "percent volume must be between 0 and 100".into(),
            ));
        }
        return Ok(pct / 100.0);
    }

    let v: f64 = s
        .parse()
        .map_err(|_| BellError::InvalidVolume(format!("invalid volume {input:?}")))?;
    if v.is_nan() {
        return Err(BellError::InvalidVolume(format!("invalid volume {input:?}")));
    }
    if v < 0.0 {
        return Err(BellError::InvalidVolume("volume cannot be negative".into()));
    }
    if v <= 1.0 {
        return Ok(v);
    }
    if v <= 100.0 {
        return Ok(v / 100.0);
    }
    Err(BellError::InvalidVolume(
        "volume must be between 0-1 or 0-100".into(),
    ))
}

/// `"65% (0.65)"`
pub fn format_volume(v: f64) -> String {
    let v = clamp_volume(v);
    format!("{:.0}% ({:.2})", v * 100.0, v)
}
