//! backspace CLI - headless replay and config inspection for the falling-characters effect

mod ascii;
mod commands;

use anyhow::Result;
use backspace_core::EffectConfig;
use clap::{Parser, Subcommand};
use commands::{config, simulate};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "backspace")]
#[command(about = "Deleted characters fall off the terminal line", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay typing and deleting on a virtual terminal line
    Simulate {
        /// Text typed before any deletion
        #[arg(long)]
        text: String,

        /// Backspaces pressed after typing
        #[arg(long, default_value = "0")]
        backspaces: usize,

        /// Forward deletes pressed after stepping the cursor back
        #[arg(long, default_value = "0")]
        forward_deletes: usize,

        /// Backspace removes the previous word, like a shell with word rubout bound to DEL
        #[arg(long)]
        word: bool,

        /// Frames to run at most (60 per second)
        #[arg(long, default_value = "600")]
        frames: u64,

        /// Surface width in pixels
        #[arg(long, default_value = "640")]
        width: f32,

        /// Surface height in pixels
        #[arg(long, default_value = "192")]
        height: f32,

        /// Terminal cell width in pixels
        #[arg(long, default_value = "8")]
        cell_width: f32,

        /// Terminal cell height in pixels
        #[arg(long, default_value = "16")]
        cell_height: f32,

        /// Terminal row the line is on
        #[arg(long, default_value = "1")]
        row: u32,

        /// Frames between key presses
        #[arg(long, default_value = "4")]
        key_interval: u64,

        /// Frames before the terminal shows the effect of a key press
        #[arg(long, default_value = "1")]
        lag: u64,

        /// Path to a TOML or JSON config file
        #[arg(long)]
        config: Option<String>,

        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = parse_format)]
        format: String,

        /// Print the surface every N frames while particles are alive (0 disables)
        #[arg(long, default_value = "10")]
        snapshot_every: u64,

        /// Seed for particle velocities
        #[arg(long, default_value = "3735928559")]
        seed: u32,

        /// Enable debug logging
        #[arg(long)]
        debug: bool,
    },

    /// Print the effective configuration as TOML
    Config {
        /// Path to a TOML or JSON config file (defaults when omitted)
        path: Option<String>,
    },
}

fn parse_format(s: &str) -> Result<String, String> {
    match s {
        "text" | "json" => Ok(s.to_string()),
        _ => Err(format!("unknown format '{}'; valid values: text, json", s)),
    }
}

/// Log to stderr. RUST_LOG wins over the debug switch.
fn init_tracing(debug: bool) {
    let fallback = if debug { "backspace=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            text,
            backspaces,
            forward_deletes,
            word,
            frames,
            width,
            height,
            cell_width,
            cell_height,
            row,
            key_interval,
            lag,
            config,
            format,
            snapshot_every,
            seed,
            debug,
        } => {
            let mut effect_config = match config.as_deref() {
                Some(path) => EffectConfig::load(path)?,
                None => EffectConfig::default(),
            };
            effect_config.debug |= debug;
            init_tracing(effect_config.debug);
            effect_config.validate()?;

            simulate::run(simulate::SimulateArgs {
                config: effect_config,
                text,
                backspaces,
                forward_deletes,
                word,
                frames,
                width,
                height,
                cell_width,
                cell_height,
                row,
                key_interval,
                lag,
                snapshot_every,
                seed,
                json: format == "json",
            })
        }
        Commands::Config { path } => {
            init_tracing(false);
            config::run(path.as_deref())
        }
    }
}
