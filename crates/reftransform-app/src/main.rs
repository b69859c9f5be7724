//! Command line entry point.

use anyhow::Context;
use clap::{Parser, Subcommand};
use reftransform_core::Preferences;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "reftransform")]
#[command(about = "Replay modal transform sessions on camera background images", long_about = None)]
#[command(version)]
struct Cli {
    /// Preferences file (defaults to the user config directory)
    #[arg(long, global = true, value_name = "PATH")]
    prefs: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay an input script and print the resulting camera as JSON
    Replay {
        /// JSON script with tool, camera and events
        #[arg(long, value_name = "PATH")]
        script: PathBuf,
    },
    /// List keybindings
    Keymap,
}

fn load_preferences(path: Option<&Path>) -> anyhow::Result<Preferences> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => Preferences::default_path()?,
    };
    Preferences::load_or_default(&path)
        .with_context(|| format!("Failed to load preferences from {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let prefs = load_preferences(cli.prefs.as_deref())?;

    match cli.command {
        Commands::Replay { script } => {
            let json = std::fs::read_to_string(&script)
                .with_context(|| format!("Failed to read {}", script.display()))?;
            let script: reftransform_app::ReplayScript =
                serde_json::from_str(&json).context("Invalid replay script")?;
            let outcome = reftransform_app::replay(script, &prefs.keymap);
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        Commands::Keymap => reftransform_app::print_keymap(&prefs.keymap),
    }

    Ok(())
}
