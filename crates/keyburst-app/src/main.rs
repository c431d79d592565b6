//! Keyburst - press a key, get a burst of particles
//!
//! Usage:
//!   keyburst [--config <path>] [--fullscreen] [--seed <u32>]

use anyhow::{Context, Result};
use clap::Parser;
use keyburst_app::{AppConfig, BurstApp};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::info;
use winit::event_loop::{ControlFlow, EventLoop};

#[derive(Parser)]
#[command(name = "keyburst")]
#[command(about = "Keyboard-triggered particle bursts")]
struct Args {
    /// Path to config file
    #[arg(long, default_value = "keyburst.toml")]
    config: PathBuf,

    /// Launch in fullscreen mode
    #[arg(long)]
    fullscreen: bool,

    /// Seed for the particle RNG (defaults to the system clock)
    #[arg(long)]
    seed: Option<u32>,
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = AppConfig::load_or_default(&args.config)
        .with_context(|| format!("Failed to load config {}", args.config.display()))?;
    if args.fullscreen {
        config.window.fullscreen = true;
    }

    let seed = args.seed.unwrap_or_else(clock_seed);
    info!(
        seed,
        capacity = config.engine.burst.capacity,
        burst = config.engine.burst.burst_count,
        "starting keyburst"
    );
    info!("Press any key to burst, Escape to exit, F11 to toggle fullscreen");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = BurstApp::new(config, seed);
    event_loop.run_app(&mut app)?;

    if let Some(e) = app.take_error() {
        return Err(e).context("Keyburst stopped");
    }
    Ok(())
}
