//! Interactive `setup`: choose a sound for each event.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

use cuebell::config::{self, Config, Paths};
use cuebell::custom::CustomSounds;
use cuebell::event::HookEvent;
use cuebell::preset;

use crate::commands::play_sound;

struct MenuOption {
    name: String,
    custom: bool,
}

/// One line of menu input, interpreted.
#[derive(Debug, PartialEq)]
enum Choice {
    Keep,
    Skip,
    Select(usize),
    Preview(usize),
    Invalid,
}

/// `""` keeps, `s`/`skip`/`0` skips, `<n>` selects, `p<n>` previews.
/// Indices are returned zero-based.
fn parse_choice(input: &str, options: usize) -> Choice {
    let input = input.trim();
    let lower = input.to_ascii_lowercase();
    let in_range = |n: usize| (1..=options).contains(&n);

    if input.is_empty() {
        return Choice::Keep;
    }
    if lower == "s" || lower == "skip" || lower == "0" {
        return Choice::Skip;
    }
    if let Some(rest) = lower.strip_prefix('p') {
        if let Ok(n) = rest.trim().parse::<usize>() {
            if in_range(n) {
                return Choice::Preview(n - 1);
            }
        }
    }
    match lower.parse::<usize>() {
        Ok(n) if in_range(n) => Choice::Select(n - 1),
        _ => Choice::Invalid,
    }
}

fn build_options(event: HookEvent, custom: &CustomSounds) -> Vec<MenuOption> {
    preset::presets_for(event)
        .iter()
        .map(|p| MenuOption {
            name: p.name.to_string(),
            custom: false,
        })
        .chain(custom.iter().map(|s| MenuOption {
            name: s.name.clone(),
            custom: true,
        }))
        .collect()
}

fn read_line(input: &mut impl BufRead) -> Option<String> {
    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line),
    }
}

fn prompt(text: &str) {
    print!("{text}");
    let _ = io::stdout().flush();
}

/// Ask until a valid choice; `None` on end of input.
fn prompt_event(
    input: &mut impl BufRead,
    paths: &Paths,
    event: HookEvent,
    current: Option<&str>,
    options: &[MenuOption],
    volume: f64,
) -> Option<Option<String>> {
    loop {
        prompt("  Choice: ");
        let line = read_line(input)?;
        match parse_choice(&line, options.len()) {
            Choice::Keep => {
                println!("  Keeping: {}", current.unwrap_or("(none)"));
                return Some(current.map(str::to_string));
            }
            Choice::Skip => {
                println!("  Selected: (none)");
                return Some(None);
            }
            Choice::Select(i) => {
                println!("  Selected: {}", options[i].name);
                return Some(Some(options[i].name.clone()));
            }
            Choice::Preview(i) => {
                println!("  Previewing: {}", options[i].name);
                if let Err(e) = play_sound(paths, event, &options[i].name, volume) {
                    eprintln!("  error: {e:#}");
                }
            }
            Choice::Invalid => {
                let n = options.len();
                println!("  Invalid input. Enter 1-{n}, p1-p{n}, s, or Enter.");
            }
        }
    }
}

fn prompt_yes_no(input: &mut impl BufRead, text: &str, default_yes: bool) -> bool {
    loop {
        prompt(text);
        let Some(line) = read_line(input) else {
            return default_yes;
        };
        match line.trim().to_ascii_lowercase().as_str() {
            "" => return default_yes,
            "y" | "yes" => return true,
            "n" | "no" => return false,
            _ => println!("Please enter y or n."),
        }
    }
}

pub fn run() -> Result<()> {
    let paths = Paths::discover()?;
    let cfg = Config::load(&paths.config_file()).context("loading config")?;
    let custom = CustomSounds::load(&paths.custom_sounds_file()).unwrap_or_default();
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut updated = cfg.clone();

    println!("cuebell setup");
    println!("=============");
    println!("Interactive setup for assistant notification sounds.");
    println!(
        "Playback volume: {} (change with 'cuebell volume')",
        config::format_volume(cfg.volume)
    );
    println!("Input: number=select, p<number>=preview, s=skip, Enter=keep current.");
    println!();

    let total = HookEvent::ALL.len();
    for (idx, event) in HookEvent::ALL.into_iter().enumerate() {
        let current = updated.sound(event).map(str::to_string);
        let options = build_options(event, &custom);

        println!("[{}/{total}] {event}", idx + 1);
        println!("  {}", event.description());
        println!("  Current: {}", current.as_deref().unwrap_or("(none)"));
        println!();

        for (i, opt) in options.iter().enumerate() {
            let mut label = opt.name.clone();
            if opt.custom {
                label.push_str(" (custom)");
            }
            if current
                .as_deref()
                .is_some_and(|c| c.eq_ignore_ascii_case(&opt.name))
            {
                label.push_str(" [current]");
            }
            println!("  {}) {label}", i + 1);
        }
        println!("  s) Skip (no sound)");
        println!();

        let Some(choice) = prompt_event(
            &mut input,
            &paths,
            event,
            current.as_deref(),
            &options,
            updated.volume,
        ) else {
            anyhow::bail!("setup canceled");
        };
        updated.set_sound(event, choice);
        println!();
    }

    println!("Summary");
    println!("-------");
    for event in HookEvent::ALL {
        let label = format!("{event}:");
        println!("  {label:<14} {}", updated.sound(event).unwrap_or("(none)"));
    }
    println!("  {:<14} {}", "volume:", config::format_volume(updated.volume));
    println!();

    if !prompt_yes_no(&mut input, "Save these settings? [Y/n]: ", true) {
        println!("No changes saved.");
        return Ok(());
    }

    updated.save(&paths.config_file()).context("saving config")?;
    println!("Config saved.");
    println!("Next step: run 'cuebell install' to add hooks to your assistant.");
    Ok(())
}
