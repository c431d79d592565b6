//! Keyburst Runtime - frame loop building blocks
//!
//! - `GameClock`: per-frame delta time with a stall clamp
//! - `trigger_for_key`: winit key events to burst triggers
//! - `IdleLabel`: trailing-debounce flag for the on-screen label

mod clock;
mod idle_label;
mod input;

pub use clock::GameClock;
pub use idle_label::IdleLabel;
pub use input::{key_identifier, trigger_for_key};
