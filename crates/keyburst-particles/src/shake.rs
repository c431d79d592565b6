//! Camera shake driven by bursts

use crate::config::ShakeConfig;
use crate::rand::ParticleRng;
use keyburst_core::Vec3;

/// Anything whose position the shake can perturb (usually the render camera)
pub trait ShakeTarget {
    fn position(&self) -> Vec3;
    fn set_position(&mut self, position: Vec3);
}

impl ShakeTarget for Vec3 {
    fn position(&self) -> Vec3 {
        *self
    }

    fn set_position(&mut self, position: Vec3) {
        *self = position;
    }
}

/// Linear-decay shake around a lazily captured base position.
///
/// The base is read from the target on the first [`CameraShake::apply`] call,
/// since the camera does not exist before the render surface is attached.
/// Moving the camera after that point is not tracked.
#[derive(Debug, Clone)]
pub struct CameraShake {
    config: ShakeConfig,
    magnitude: f32,
    base_position: Option<Vec3>,
}

impl CameraShake {
    pub fn new(config: ShakeConfig) -> Self {
        Self {
            config,
            magnitude: 0.0,
            base_position: None,
        }
    }

    /// Raise the magnitude to at least the configured kick
    pub fn kick(&mut self) {
        self.raise_to(self.config.kick);
    }

    /// Raise the magnitude to at least `magnitude`; never lowers it
    pub fn raise_to(&mut self, magnitude: f32) {
        self.magnitude = self.magnitude.max(magnitude);
    }

    pub fn magnitude(&self) -> f32 {
        self.magnitude
    }

    pub fn is_shaking(&self) -> bool {
        self.magnitude > 0.0
    }

    pub fn base_position(&self) -> Option<Vec3> {
        self.base_position
    }

    /// Offset the target for this frame and decay the magnitude.
    ///
    /// When the magnitude reaches zero the target is put back exactly on its
    /// base position.
    pub fn apply(&mut self, target: &mut impl ShakeTarget, rng: &mut ParticleRng, dt: f32) {
        let base = *self.base_position.get_or_insert_with(|| target.position());
        if self.magnitude <= 0.0 {
            return;
        }

        let m = self.magnitude;
        let [sx, sy, sz] = self.config.axis_scale;
        let offset = Vec3::new(
            rng.symmetric(m * sx),
            rng.symmetric(m * sy),
            rng.symmetric(m * sz),
        );
        target.set_position(base + offset);

        self.magnitude = (m - self.config.decay_per_sec * dt.max(0.0)).max(0.0);
        if self.magnitude == 0.0 {
            target.set_position(base);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shake() -> CameraShake {
        CameraShake::new(ShakeConfig::default())
    }

    #[test]
    fn kick_never_lowers_magnitude() {
        let mut s = shake();
        s.raise_to(0.5);
        s.kick();
        assert_eq!(s.magnitude(), 0.5);

        let mut s = shake();
        s.kick();
        assert_eq!(s.magnitude(), 0.12);
    }

    #[test]
    fn base_captured_on_first_apply() {
        let mut s = shake();
        let mut rng = ParticleRng::new(5);
        let mut camera = Vec3::new(0.0, 1.0, 6.0);

        assert!(s.base_position().is_none());
        s.apply(&mut camera, &mut rng, 1.0 / 60.0);
        assert_eq!(s.base_position(), Some(Vec3::new(0.0, 1.0, 6.0)));
        // Not shaking: camera untouched
        assert_eq!(camera, Vec3::new(0.0, 1.0, 6.0));
    }

    #[test]
    fn offsets_respect_axis_bounds() {
        let mut s = shake();
        let mut rng = ParticleRng::new(11);
        let base = Vec3::new(0.0, 0.0, 6.0);
        let mut camera = base;
        s.raise_to(1.0);

        for _ in 0..100 {
            let m = s.magnitude();
            s.apply(&mut camera, &mut rng, 0.001);
            let d = camera - base;
            assert!(d.x.abs() <= m);
            assert!(d.y.abs() <= 0.8 * m + 1e-6);
            assert!(d.z.abs() <= 0.3 * m + 1e-6);
        }
    }

    #[test]
    fn decays_to_zero_and_snaps_back() {
        let mut s = shake();
        let mut rng = ParticleRng::new(17);
        let base = Vec3::new(1.0, 2.0, 3.0);
        let mut camera = base;
        s.raise_to(0.5);

        // 0.5 / 1.0 per second = 0.5s, in exact binary steps
        for _ in 0..3 {
            s.apply(&mut camera, &mut rng, 0.125);
            assert!(s.is_shaking());
        }
        s.apply(&mut camera, &mut rng, 0.125);
        assert_eq!(s.magnitude(), 0.0);
        assert_eq!(camera, base);

        for _ in 0..10 {
            s.apply(&mut camera, &mut rng, 0.125);
            assert_eq!(camera, base);
        }
    }

    #[test]
    fn single_kick_lasts_kick_over_decay_seconds() {
        let mut s = shake();
        let mut rng = ParticleRng::new(23);
        let base = Vec3::new(0.0, 0.0, 6.0);
        let mut camera = base;
        s.kick();

        s.apply(&mut camera, &mut rng, 0.12);
        assert_eq!(s.magnitude(), 0.0);
        assert_eq!(camera, base);
    }

    #[test]
    fn large_dt_clamps_at_zero() {
        let mut s = shake();
        let mut rng = ParticleRng::new(29);
        let mut camera = Vec3::ZERO;
        s.kick();
        s.apply(&mut camera, &mut rng, 10.0);
        assert_eq!(s.magnitude(), 0.0);
        assert_eq!(camera, Vec3::ZERO);
    }
}
