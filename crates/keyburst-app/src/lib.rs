//! Keyburst App - windowed host for the particle burst engine
//!
//! Provides the `BurstApp` application handler and the TOML-backed
//! `AppConfig` it is built from.

mod burst_app;
pub mod config;

pub use burst_app::BurstApp;
pub use config::AppConfig;
