//! The particle engine: host-facing entry points over the pool

use crate::config::EngineConfig;
use crate::integrate::integrate;
use crate::material::SpriteMaterial;
use crate::pool::ParticlePool;
use crate::rand::ParticleRng;
use crate::shake::{CameraShake, ShakeTarget};
use crate::spawn::spawn_burst;
use crate::trigger::Trigger;
use std::ops::BitOr;
use tracing::debug;

const DEFAULT_SEED: u32 = 0xDEAD_BEEF;

/// Which attribute buffers changed since the host last uploaded them
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirtyBuffers {
    pub position: bool,
    pub size: bool,
    pub alpha: bool,
}

impl DirtyBuffers {
    pub const NONE: Self = Self {
        position: false,
        size: false,
        alpha: false,
    };
    pub const ALL: Self = Self {
        position: true,
        size: true,
        alpha: true,
    };

    pub fn any(&self) -> bool {
        self.position || self.size || self.alpha
    }
}

impl BitOr for DirtyBuffers {
    type Output = Self;
    fn bitor(self, other: Self) -> Self {
        Self {
            position: self.position || other.position,
            size: self.size || other.size,
            alpha: self.alpha || other.alpha,
        }
    }
}

/// Borrowed view of the GPU-facing attribute arrays, indexed in slot order
#[derive(Debug, Clone, Copy)]
pub struct ParticleBuffers<'a> {
    /// xyz triples
    pub positions: &'a [f32],
    pub sizes: &'a [f32],
    pub alphas: &'a [f32],
}

/// Owns the particle pool, its RNG and the camera shake state.
///
/// Spawning and integration are both synchronous and must be called from the
/// same thread; the renderer reads [`ParticleEngine::buffers`] after both have
/// run for the frame.
pub struct ParticleEngine {
    config: EngineConfig,
    pool: ParticlePool,
    rng: ParticleRng,
    shake: CameraShake,
    material: SpriteMaterial,
}

impl ParticleEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self::with_seed(config, DEFAULT_SEED)
    }

    pub fn with_seed(config: EngineConfig, seed: u32) -> Self {
        Self {
            pool: ParticlePool::new(config.burst.capacity),
            rng: ParticleRng::new(seed),
            shake: CameraShake::new(config.shake.clone()),
            material: SpriteMaterial::burst(),
            config,
        }
    }

    /// Spawn a burst for `trigger`.
    ///
    /// `None` and modifier keys do nothing. Otherwise up to `burst_count` dead
    /// slots are revived, live particles near the origin get the impulse, and
    /// the shake is raised to at least its kick magnitude.
    pub fn spawn(&mut self, trigger: Option<&Trigger>) -> DirtyBuffers {
        let Some(trigger) = trigger else {
            return DirtyBuffers::NONE;
        };
        if trigger.is_modifier() {
            return DirtyBuffers::NONE;
        }

        let spawned = spawn_burst(&mut self.pool, &mut self.rng, &self.config.burst);
        self.shake.kick();
        debug!(key = %trigger.key, spawned, "burst");
        DirtyBuffers::ALL
    }

    /// Integrate one frame without touching any camera
    pub fn update(&mut self, dt: f32) -> DirtyBuffers {
        if integrate(&mut self.pool, &self.config.burst, dt) {
            DirtyBuffers::ALL
        } else {
            DirtyBuffers::NONE
        }
    }

    /// Host entry point for key input
    pub fn on_trigger(&mut self, trigger: Option<&Trigger>) -> DirtyBuffers {
        self.spawn(trigger)
    }

    /// Host entry point for the render loop: shake the camera, then integrate
    pub fn on_frame(&mut self, dt: f32, camera: &mut impl ShakeTarget) -> DirtyBuffers {
        self.shake.apply(camera, &mut self.rng, dt);
        self.update(dt)
    }

    pub fn buffers(&self) -> ParticleBuffers<'_> {
        ParticleBuffers {
            positions: self.pool.positions(),
            sizes: self.pool.sizes(),
            alphas: self.pool.alphas(),
        }
    }

    /// Instances to draw each frame: every slot, dead ones are parked off-screen
    pub fn draw_count(&self) -> usize {
        self.pool.capacity()
    }

    pub fn material(&self) -> &SpriteMaterial {
        &self.material
    }

    pub fn pool(&self) -> &ParticlePool {
        &self.pool
    }

    pub fn alive_count(&self) -> usize {
        self.pool.alive_count()
    }

    pub fn shake(&self) -> &CameraShake {
        &self.shake
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

impl Default for ParticleEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DEAD_POSITION, PARTICLE_CAPACITY};
    use keyburst_core::Vec3;

    #[test]
    fn none_trigger_is_noop() {
        let mut engine = ParticleEngine::default();
        assert_eq!(engine.on_trigger(None), DirtyBuffers::NONE);
        assert_eq!(engine.alive_count(), 0);
        assert_eq!(engine.shake().magnitude(), 0.0);
    }

    #[test]
    fn letter_key_spawns_full_burst() {
        let mut engine = ParticleEngine::default();
        let dirty = engine.on_trigger(Some(&Trigger::new("a")));
        assert_eq!(dirty, DirtyBuffers::ALL);
        assert_eq!(engine.alive_count(), 500);

        let pool = engine.pool();
        let fresh: Vec<usize> = (0..pool.capacity()).filter(|&i| pool.is_alive(i)).collect();
        assert_eq!(fresh.len(), 500);
        for i in fresh {
            assert_eq!(pool.age(i), 0.0);
            let p = pool.position(i);
            assert!(p[0].abs() <= 0.01 && p[1].abs() <= 0.01);
            assert_eq!(p[2], 0.0);
        }
        assert!((engine.shake().magnitude() - 0.12).abs() < 1e-6);
    }

    #[test]
    fn shift_spawns_nothing_and_keeps_shake() {
        let mut engine = ParticleEngine::default();
        assert_eq!(engine.on_trigger(Some(&Trigger::new("Shift"))), DirtyBuffers::NONE);
        assert_eq!(engine.alive_count(), 0);
        assert_eq!(engine.shake().magnitude(), 0.0);

        engine.on_trigger(Some(&Trigger::new("x")));
        let before = engine.shake().magnitude();
        engine.on_trigger(Some(&Trigger::new("Control")));
        assert_eq!(engine.shake().magnitude(), before);
        assert_eq!(engine.alive_count(), 500);
    }

    #[test]
    fn pool_saturates_at_capacity() {
        let mut engine = ParticleEngine::default();
        let key = Trigger::new("k");
        for _ in 0..12 {
            engine.on_trigger(Some(&key));
        }
        assert_eq!(engine.alive_count(), PARTICLE_CAPACITY);
        // Still dirty: the impulse may have touched live particles
        assert!(engine.on_trigger(Some(&key)).any());
    }

    #[test]
    fn idle_frames_report_clean_buffers() {
        let mut engine = ParticleEngine::default();
        let mut camera = Vec3::new(0.0, 0.0, 6.0);
        assert_eq!(engine.on_frame(1.0 / 60.0, &mut camera), DirtyBuffers::NONE);
    }

    #[test]
    fn burst_lifecycle_returns_pool_to_idle() {
        let mut engine = ParticleEngine::with_seed(EngineConfig::default(), 77);
        let base = Vec3::new(0.0, 0.0, 6.0);
        let mut camera = base;

        engine.on_trigger(Some(&Trigger::new("Enter")));
        let mut frames = 0;
        while engine.on_frame(1.0 / 60.0, &mut camera).any() {
            frames += 1;
            assert!(frames < 200, "particles outlived the max lifetime");
        }
        assert_eq!(engine.alive_count(), 0);
        assert_eq!(camera, base);
        assert_eq!(engine.shake().magnitude(), 0.0);

        let buffers = engine.buffers();
        assert_eq!(buffers.positions.len(), PARTICLE_CAPACITY * 3);
        assert!(buffers.sizes.iter().all(|&s| s == 0.0));
        assert!(buffers.alphas.iter().all(|&a| a == 0.0));
        assert!(buffers
            .positions
            .chunks(3)
            .all(|p| p == DEAD_POSITION.as_slice()));
    }

    #[test]
    fn shake_moves_camera_after_burst() {
        let mut engine = ParticleEngine::with_seed(EngineConfig::default(), 5);
        let base = Vec3::new(0.0, 0.0, 6.0);
        let mut camera = base;

        // First frame captures the base before any burst
        engine.on_frame(0.0, &mut camera);
        engine.on_trigger(Some(&Trigger::new("q")));
        engine.on_frame(0.001, &mut camera);
        assert_ne!(camera, base);
        assert_eq!(engine.shake().base_position(), Some(base));
    }

    #[test]
    fn engines_are_independent() {
        let mut a = ParticleEngine::default();
        let b = ParticleEngine::default();
        a.on_trigger(Some(&Trigger::new("a")));
        assert_eq!(a.alive_count(), 500);
        assert_eq!(b.alive_count(), 0);
    }

    #[test]
    fn draw_count_is_capacity() {
        let engine = ParticleEngine::default();
        assert_eq!(engine.draw_count(), PARTICLE_CAPACITY);
    }

    #[test]
    fn dirty_flags_combine() {
        let only_size = DirtyBuffers {
            size: true,
            ..DirtyBuffers::NONE
        };
        assert!(only_size.any());
        assert_eq!(only_size | DirtyBuffers::NONE, only_size);
        assert_eq!(only_size | DirtyBuffers::ALL, DirtyBuffers::ALL);
        assert!(!DirtyBuffers::default().any());
    }
}
