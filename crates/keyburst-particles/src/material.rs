//! Fixed render state for the burst sprites

/// Blend mode for particle rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleBlendMode {
    Alpha,
    Additive,
}

/// Sprite tint as 8-bit sRGB components
pub const SPRITE_COLOR_RGB8: [u8; 3] = [245, 158, 11];

/// Render state the renderer must honour when drawing the pool
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteMaterial {
    pub blend_mode: ParticleBlendMode,
    /// Sprites only add light, they never occlude
    pub depth_write: bool,
    pub color: [f32; 3],
}

impl SpriteMaterial {
    pub fn burst() -> Self {
        Self {
            blend_mode: ParticleBlendMode::Additive,
            depth_write: false,
            color: SPRITE_COLOR_RGB8.map(|c| c as f32 / 255.0),
        }
    }
}

impl Default for SpriteMaterial {
    fn default() -> Self {
        Self::burst()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_material_is_additive_without_depth_write() {
        let m = SpriteMaterial::burst();
        assert_eq!(m.blend_mode, ParticleBlendMode::Additive);
        assert!(!m.depth_write);
        assert!((m.color[0] - 245.0 / 255.0).abs() < 1e-6);
        assert!((m.color[1] - 158.0 / 255.0).abs() < 1e-6);
        assert!((m.color[2] - 11.0 / 255.0).abs() < 1e-6);
    }
}
