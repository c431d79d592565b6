//! Keyburst Core - Foundational types shared by the Keyburst crates
//!
//! - `Vec3` - small spatial vector used by the camera and shake
//! - TOML coercion helpers for the config loaders
//! - Error types and Result alias

mod error;
pub mod toml_util;
mod types;

pub use error::{KeyburstError, Result};
pub use types::Vec3;
