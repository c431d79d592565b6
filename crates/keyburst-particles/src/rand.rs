//! Lightweight xorshift32 PRNG for spawn sampling and shake jitter

use std::f32::consts::TAU;

pub struct ParticleRng {
    state: u32,
}

impl ParticleRng {
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Returns a float in [0, 1)
    pub fn next_f32(&mut self) -> f32 {
        // 24 mantissa bits so the result never rounds up to 1.0
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Returns a float in [min, max)
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }

    /// Returns a float in [-half_width, half_width)
    pub fn symmetric(&mut self, half_width: f32) -> f32 {
        self.range(-half_width, half_width)
    }

    /// Returns a random unit direction, uniform over the sphere surface.
    ///
    /// Inverse-transform sampling: the polar angle is `acos(2u - 1)` rather than
    /// uniform, otherwise directions bunch up at the poles.
    pub fn unit_sphere(&mut self) -> [f32; 3] {
        let theta = self.range(0.0, TAU);
        let phi = (2.0 * self.next_f32() - 1.0).clamp(-1.0, 1.0).acos();
        let sin_phi = phi.sin();
        [sin_phi * theta.cos(), sin_phi * theta.sin(), phi.cos()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_seed_is_remapped() {
        let mut rng = ParticleRng::new(0);
        assert_ne!(rng.next_u32(), 0);
    }

    #[test]
    fn rng_range_bounds() {
        let mut rng = ParticleRng::new(42);
        for _ in 0..10_000 {
            let v = rng.range(0.0, 10.0);
            assert!((0.0..10.0).contains(&v));
            let s = rng.symmetric(0.01);
            assert!((-0.01..0.01).contains(&s));
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = ParticleRng::new(7);
        let mut b = ParticleRng::new(7);
        for _ in 0..100 {
            assert_eq!(a.next_f32(), b.next_f32());
        }
    }

    #[test]
    fn unit_sphere_has_unit_length() {
        let mut rng = ParticleRng::new(123);
        for _ in 0..1000 {
            let d = rng.unit_sphere();
            let len = (d[0] * d[0] + d[1] * d[1] + d[2] * d[2]).sqrt();
            assert!((len - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn unit_sphere_has_no_pole_bias() {
        let mut rng = ParticleRng::new(2024);
        let n = 50_000;
        let mut sum = [0.0f64; 3];
        let mut abs_z = 0.0f64;
        let mut polar_caps = 0usize;
        for _ in 0..n {
            let d = rng.unit_sphere();
            for k in 0..3 {
                sum[k] += d[k] as f64;
            }
            abs_z += d[2].abs() as f64;
            // |z| > 0.9 covers 10% of the sphere's area
            if d[2].abs() > 0.9 {
                polar_caps += 1;
            }
        }
        for s in sum {
            assert!((s / n as f64).abs() < 0.02);
        }
        // Uniform sphere: E[|z|] = 0.5. Naive uniform phi gives ~0.64.
        assert!((abs_z / n as f64 - 0.5).abs() < 0.02);
        let cap_fraction = polar_caps as f64 / n as f64;
        assert!((cap_fraction - 0.1).abs() < 0.02);
    }
}
