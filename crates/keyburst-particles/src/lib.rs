//! Keyburst Particles - keyboard-triggered particle bursts
//!
//! Provides a single preallocated particle pool with:
//! - Structure-of-arrays attribute buffers ready for direct GPU upload
//! - Burst spawning into dead slots with a shockwave impulse near the origin
//! - Per-frame damping/gravity integration with fade and size easing
//! - Anisotropic camera shake that decays back to the base position
//!
//! The host calls [`ParticleEngine::on_trigger`] for every key press and
//! [`ParticleEngine::on_frame`] once per rendered frame.

pub mod config;
pub mod engine;
pub mod integrate;
pub mod material;
pub mod pool;
pub mod rand;
pub mod shake;
pub mod spawn;
pub mod trigger;

pub use config::{BurstConfig, EngineConfig, ShakeConfig};
pub use engine::{DirtyBuffers, ParticleBuffers, ParticleEngine};
pub use material::{ParticleBlendMode, SpriteMaterial};
pub use pool::ParticlePool;
pub use shake::{CameraShake, ShakeTarget};
pub use trigger::Trigger;

/// Number of particle slots preallocated by the default engine
pub const PARTICLE_CAPACITY: usize = 5000;
/// Maximum particles spawned by a single key press
pub const BURST_PARTICLE_COUNT: usize = 500;

pub const SPEED_MIN: f32 = 2.2;
pub const SPEED_MAX: f32 = 7.0;
pub const LIFETIME_MIN: f32 = 0.8;
pub const LIFETIME_MAX: f32 = 1.6;
pub const SIZE_MIN: f32 = 6.0;
pub const SIZE_MAX: f32 = 16.0;
/// Half-width of the x/y spawn jitter around the origin
pub const SPAWN_JITTER: f32 = 0.01;

pub const IMPULSE_RADIUS: f32 = 0.2;
pub const IMPULSE_STRENGTH: f32 = 1.5;
/// Lower bound on the distance used to normalize impulse directions
pub const MIN_IMPULSE_DISTANCE: f32 = 1e-4;

pub const VELOCITY_DAMPING: f32 = 0.98;
pub const GRAVITY: f32 = -8.0;

/// Particles younger than this grow each frame, older ones shrink
pub const POP_DURATION: f32 = 0.06;
pub const POP_GROWTH: f32 = 1.04;
pub const SHRINK_FACTOR: f32 = 0.999;

pub const SHAKE_KICK: f32 = 0.12;
pub const SHAKE_DECAY_PER_SEC: f32 = 1.0;
/// Per-axis multiplier on the shake magnitude (x, y, z)
pub const SHAKE_AXIS_SCALE: [f32; 3] = [1.0, 0.8, 0.3];

/// Off-screen position of a dead particle
pub const DEAD_POSITION: [f32; 3] = [1e6, 1e6, 1e6];
