use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::warn;

use cuebell::cache;
use cuebell::codec;
use cuebell::config::{self, Config, Paths};
use cuebell::custom::CustomSounds;
use cuebell::dsp;
use cuebell::error::BellError;
use cuebell::event::HookEvent;
use cuebell::hooks;
use cuebell::player::{Player, SystemPlayer};

pub fn parse_event(name: &str) -> Result<HookEvent, BellError> {
    Ok(name.parse()?)
}

/// Render (or reuse) and play `sound` for `event`.
pub fn play_sound(paths: &Paths, event: HookEvent, sound: &str, volume: f64) -> Result<()> {
    let custom = CustomSounds::load(&paths.custom_sounds_file())?;
    let wav = cache::ensure_sound(&paths.sounds_dir(), event, sound, &custom)?;
    SystemPlayer::detect()?.play(&wav, volume)?;
    Ok(())
}

pub fn play(event: &str) -> Result<()> {
    let event = parse_event(event)?;
    let paths = Paths::discover()?;
    let cfg = Config::load(&paths.config_file())?;

    // no sound configured: stay silent
    let Some(sound) = cfg.sound(event) else {
        return Ok(());
    };
    play_sound(&paths, event, sound, cfg.volume)
}

pub fn test() -> Result<()> {
    let paths = Paths::discover()?;
    let cfg = Config::load(&paths.config_file()).context("loading config")?;

    if !cfg.any_sound() {
        println!("No sounds configured. Run 'cuebell setup' first.");
        return Ok(());
    }

    for event in HookEvent::ALL {
        let Some(sound) = cfg.sound(event) else {
            continue;
        };
        println!("Playing {event}: {sound}");
        if let Err(e) = play_sound(&paths, event, sound, cfg.volume) {
            eprintln!("  error: {e:#}");
        }
    }
    Ok(())
}

/// The running executable, and whether it looks like a throwaway build.
fn executable_path() -> Result<(PathBuf, bool)> {
    let exe = std::env::current_exe().context("locating executable")?;
    let s = exe.to_string_lossy();
    let temporary = s.contains("/target/debug/") || s.contains("/tmp/");
    Ok((exe, temporary))
}

pub fn install() -> Result<()> {
    let paths = Paths::discover()?;
    let cfg = Config::load(&paths.config_file()).context("loading config")?;

    if !cfg.any_sound() {
        println!("No sounds configured. Run 'cuebell setup' first.");
        return Ok(());
    }

    let (exe, temporary) = executable_path()?;
    if temporary {
        println!("WARNING: cuebell is running from a temporary or build path:");
        println!("  {}", exe.display());
        println!("Hooks will break when that binary goes away.");
        println!("Install first: cargo install --path . (then re-run 'cuebell install')");
        println!();
    }

    let mut settings = hooks::load_settings(&paths.settings).context("loading settings")?;
    if let Err(e) = hooks::backup_settings(&paths.settings) {
        warn!("could not create backup: {e}");
    }

    let installed = hooks::install(&mut settings, &exe, &cfg);
    hooks::write_settings(&paths.settings, &settings).context("writing settings")?;

    println!("Hooks installed into {}", paths.settings.display());
    println!();
    for hook in installed {
        println!("  {} ({}): {}", hook.event, hook.event.hook_type(), hook.sound);
    }
    Ok(())
}

pub fn uninstall() -> Result<()> {
    let paths = Paths::discover()?;
    let mut settings = hooks::load_settings(&paths.settings).context("loading settings")?;

    let removed = hooks::uninstall(&mut settings);
    if removed == 0 {
        println!("No cuebell hooks found.");
        return Ok(());
    }

    hooks::write_settings(&paths.settings, &settings).context("writing settings")?;
    println!(
        "Removed {removed} cuebell hook(s) from {}",
        paths.settings.display()
    );
    Ok(())
}

pub fn create(name: &str, code: &str) -> Result<()> {
    let paths = Paths::discover()?;
    let file = paths.custom_sounds_file();
    let mut sounds = CustomSounds::load(&file)?;
    let count = sounds.create(name, code)?.tones.len();
    sounds.save(&file)?;
    println!("Created custom sound {name:?} ({count} tones)");
    Ok(())
}

pub fn list() -> Result<()> {
    let paths = Paths::discover()?;
    let sounds = CustomSounds::load(&paths.custom_sounds_file())?;

    if sounds.is_empty() {
        println!("No custom sounds. Use 'cuebell create <name> <code>' to add one.");
        return Ok(());
    }

    println!("Custom sounds:");
    for s in sounds.iter() {
        println!("  {} ({} tones) - code: {}", s.name, s.tones.len(), s.code);
    }
    Ok(())
}

pub fn delete(name: &str) -> Result<()> {
    let paths = Paths::discover()?;
    let file = paths.custom_sounds_file();
    let mut sounds = CustomSounds::load(&file)?;
    let removed = sounds.remove(name)?;
    sounds.save(&file)?;
    println!("Deleted custom sound {:?}", removed.name);
    Ok(())
}

pub fn volume(value: Option<&str>) -> Result<()> {
    let paths = Paths::discover()?;
    let mut cfg = Config::load(&paths.config_file()).context("loading config")?;

    let Some(value) = value else {
        println!("Current volume: {}", config::format_volume(cfg.volume));
        println!("Set a new level with: cuebell volume <value>");
        println!("Accepted formats: 0-1, 0-100, or percent (e.g. 0.65, 65, 65%).");
        return Ok(());
    };

    cfg.volume = config::parse_volume(value)?;
    cfg.save(&paths.config_file()).context("saving config")?;
    println!("Volume set to {}", config::format_volume(cfg.volume));
    Ok(())
}

pub fn render_code(code: &str, output: &Path) -> Result<()> {
    let tones = codec::decode(code)?;
    dsp::render_to_file(output, &tones)
        .with_context(|| format!("writing {}", output.display()))?;
    println!("Wrote {} tones to {}", tones.len(), output.display());
    Ok(())
}

pub fn render_preset(event: &str, name: &str, output: &Path) -> Result<()> {
    let event = parse_event(event)?;
    let paths = Paths::discover()?;
    let custom = CustomSounds::load(&paths.custom_sounds_file())?;
    let tones = cache::resolve_tones(event, name, &custom)?;
    dsp::render_to_file(output, &tones)
        .with_context(|| format!("writing {}", output.display()))?;
    println!("Wrote {name} ({} tones) to {}", tones.len(), output.display());
    Ok(())
}
