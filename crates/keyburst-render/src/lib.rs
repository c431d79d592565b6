//! Keyburst Render - wgpu point-sprite renderer
//!
//! Draws the particle pool as round additive sprites with a single instanced
//! draw call, viewed through a fixed perspective camera that the engine's
//! shake perturbs.

mod camera;
mod context;
pub mod particle_pipeline;

pub use camera::Camera;
pub use context::{RenderContext, RenderError};
pub use particle_pipeline::{ParticlePipeline, ParticleUniforms, PARTICLE_SHADER};

/// Depth buffer format shared by the context and the pipeline
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
