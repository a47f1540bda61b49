//! `cuebell` — notification cues for coding-assistant hooks.

mod commands;
mod setup;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cuebell", version, about = "Notification sounds for coding-assistant hooks")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive setup: pick a sound for each event
    Setup,
    /// Play all configured sounds
    Test,
    /// Add hooks to the assistant's settings.json
    Install,
    /// Remove hooks from the assistant's settings.json
    Uninstall,
    /// Play the sound for an event (used by hooks)
    Play {
        /// stop, notification or limit
        event: String,
    },
    /// Create a custom sound from a tone code
    Create { name: String, code: String },
    /// List custom sounds
    List,
    /// Delete a custom sound
    Delete { name: String },
    /// Show or set playback volume (0-1, 0-100, or percent)
    Volume { value: Option<String> },
    /// Render a tone code or preset to a WAV file
    Render(RenderArgs),
}

#[derive(Args)]
struct RenderArgs {
    /// Tone code to render
    #[arg(long, conflicts_with_all = ["event", "preset"])]
    code: Option<String>,
    /// Event whose preset to render
    #[arg(long, requires = "preset")]
    event: Option<String>,
    /// Preset or custom sound name
    #[arg(long, requires = "event")]
    preset: Option<String>,
    /// Output file
    #[arg(short, long)]
    output: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("CUEBELL_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Setup => setup::run(),
        Command::Test => commands::test(),
        Command::Install => commands::install(),
        Command::Uninstall => commands::uninstall(),
        Command::Play { event } => commands::play(&event),
        Command::Create { name, code } => commands::create(&name, &code),
        Command::List => commands::list(),
        Command::Delete { name } => commands::delete(&name),
        Command::Volume { value } => commands::volume(value.as_deref()),
        Command::Render(args) => match (args.code, args.event, args.preset) {
            (Some(code), _, _) => commands::render_code(&code, &args.output),
            (None, Some(event), Some(preset)) => {
                commands::render_preset(&event, &preset, &args.output)
            }
            _ => anyhow::bail!("render needs --code, or --event with --preset"),
        },
    }
}
