//! Registering cue commands as hooks in the assistant's `settings.json`.
//!
//! Entries we own carry a `"_cuebell": true` marker so they can be
//! replaced or removed without touching anything else in the file.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value, json};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::BellError;
use crate::event::HookEvent;

/// Marker key on hook entries written by this tool.
pub const MARKER: &str = "_cuebell";

/// One hook written by [`install`].
#[derive(Debug, Clone, PartialEq)]
pub struct InstalledHook {
    pub event: HookEvent,
    pub sound: String,
}

/// Load the settings file; a missing file is an empty object and its
/// parent directory is created.
pub fn load_settings(path: &Path) -> Result<Value, BellError> {
    let data = match std::fs::read(path) {
        Ok(d) => d,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            if let Some(dir) = path.parent() {
                std::fs::create_dir_all(dir).map_err(|e| BellError::file(dir, e))?;
            }
            return Ok(Value::Object(Map::new()));
        }
        Err(e) => return Err(BellError::file(path, e)),
    };
    let settings: Value = serde_json::from_slice(&data).map_err(|e| BellError::json(path, e))?;
    if !settings.is_object() {
        return Err(BellError::json(
            path,
            serde::de::Error::custom("top-level value is not an object"),
        ));
    }
    Ok(settings)
}

/// Write pretty JSON with a trailing newline, atomically.
pub fn write_settings(path: &Path, settings: &Value) -> Result<(), BellError> {
    let mut data = serde_json::to_vec_pretty(settings).map_err(|e| BellError::json(path, e))?;
    data.push(b'\n');

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::Builder::new()
        .prefix(".settings-")
        .suffix(".json")
        .tempfile_in(dir)
        .map_err(|e| BellError::file(dir, e))?;
    tmp.write_all(&data).map_err(|e| BellError::file(tmp.path(), e))?;
    tmp.persist(path).map_err(|e| BellError::file(path, e.error))?;
    debug!(path = %path.display(), "wrote settings");
    Ok(())
}

/// Copy the settings file to `<path>.cuebell-backup`, if it exists.
pub fn backup_settings(path: &Path) -> Result<Option<PathBuf>, BellError> {
    if !path.exists() {
        return Ok(None);
    }
    let mut backup = path.as_os_str().to_owned();
    backup.push(".cuebell-backup");
    let backup = PathBuf::from(backup);
    std::fs::copy(path, &backup).map_err(|e| BellError::file(&backup, e))?;
    Ok(Some(backup))
}

/// Hook entry that runs `<exe> play <event>`.
pub fn hook_entry(exe: &Path, event: HookEvent) -> Value {
    json!({
        "_cuebell": true,
        "matcher": event.matcher(),
        "hooks": [{
            "type": "command",
            "command": format!("{} play {}", exe.display(), event.name()),
            "async": true,
        }],
    })
}

fn is_ours(entry: &Value) -> bool {
    entry.as_object().is_some_and(|m| m.contains_key(MARKER))
}

/// Add a hook for every event with a configured sound, replacing hooks a
/// previous install wrote. Other hooks are left in place.
pub fn install(settings: &mut Value, exe: &Path, config: &Config) -> Vec<InstalledHook> {
    let Some(root) = settings.as_object_mut() else {
        return Vec::new();
    };
    let hooks = root
        .entry("hooks")
        .or_insert_with(|| Value::Object(Map::new()));
    if !hooks.is_object() {
        *hooks = Value::Object(Map::new());
    }
    let Some(hooks) = hooks.as_object_mut() else {
        return Vec::new();
    };

    let mut installed = Vec::new();
    for event in HookEvent::ALL {
        let Some(sound) = config.sound(event) else {
            continue;
        };

        let mut entries: Vec<Value> = match hooks.remove(event.hook_type()) {
            Some(Value::Array(existing)) => existing.into_iter().filter(|e| !is_ours(e)).collect(),
            _ => Vec::new(),
        };
        entries.push(hook_entry(exe, event));
        hooks.insert(event.hook_type().to_string(), Value::Array(entries));

        info!(event = %event, hook = event.hook_type(), sound, "installed hook");
        installed.push(InstalledHook {
            event,
            sound: sound.to_string(),
        });
    }
    installed
}

/// Remove every marked hook entry; returns how many were removed.
///
/// Hook arrays left empty are deleted, and so is an empty `hooks` object.
pub fn uninstall(settings: &mut Value) -> usize {
    let Some(root) = settings.as_object_mut() else {
        return 0;
    };
    let Some(Value::Object(hooks)) = root.get_mut("hooks") else {
        return 0;
    };

    let mut removed = 0;
    let keys: Vec<String> = hooks.keys().cloned().collect();
    for key in keys {
        let Some(Value::Array(entries)) = hooks.get_mut(&key) else {
            continue;
        };
        let before = entries.len();
        entries.retain(|e| !is_ours(e));
        removed += before - entries.len();
        if entries.is_empty() {
            hooks.remove(&key);
        }
    }

    if hooks.is_empty() {
        root.remove("hooks");
    }
    if removed > 0 {
        info!(removed, "uninstalled hooks");
    }
    removed
}
