//! Burst spawning and the shockwave impulse

use crate::config::BurstConfig;
use crate::pool::ParticlePool;
use crate::rand::ParticleRng;
use crate::MIN_IMPULSE_DISTANCE;

/// Run one spawn pass over the pool in slot order.
///
/// Dead slots are reinitialized until `burst_count` is reached; slots that were
/// already alive get the shockwave impulse. Returns the number spawned, which
/// is lower than `burst_count` when the pool has too few dead slots.
pub fn spawn_burst(pool: &mut ParticlePool, rng: &mut ParticleRng, config: &BurstConfig) -> usize {
    let mut spawned = 0;
    for i in 0..pool.capacity() {
        if pool.is_alive(i) {
            apply_impulse(pool, i, config);
        } else if spawned < config.burst_count {
            respawn(pool, i, rng, config);
            spawned += 1;
        }
    }
    spawned
}

fn respawn(pool: &mut ParticlePool, i: usize, rng: &mut ParticleRng, config: &BurstConfig) {
    let position = [
        rng.symmetric(config.spawn_jitter),
        rng.symmetric(config.spawn_jitter),
        0.0,
    ];
    let dir = rng.unit_sphere();
    let speed = rng.range(config.speed_min, config.speed_max);

    pool.positions[i * 3..i * 3 + 3].copy_from_slice(&position);
    pool.velocities[i * 3..i * 3 + 3].copy_from_slice(&dir.map(|d| d * speed));
    pool.ages[i] = 0.0;
    pool.lifetimes[i] = rng.range(config.lifetime_min, config.lifetime_max);
    pool.sizes[i] = rng.range(config.size_min, config.size_max);
    pool.alphas[i] = 1.0;
}

/// Linear falloff: 1 at the center, 0 at and beyond the radius
pub fn impulse_falloff(dist: f32, radius: f32) -> f32 {
    (1.0 - dist / radius).max(0.0)
}

/// Push a live particle away from the origin if it sits inside the impulse radius
fn apply_impulse(pool: &mut ParticlePool, i: usize, config: &BurstConfig) {
    let p = pool.position(i);
    let dist_sq = p[0] * p[0] + p[1] * p[1] + p[2] * p[2];
    let radius = config.impulse_radius;
    if dist_sq >= radius * radius {
        return;
    }

    let dist = dist_sq.sqrt().max(MIN_IMPULSE_DISTANCE);
    let strength = config.impulse_strength * impulse_falloff(dist, radius);
    for k in 0..3 {
        pool.velocities[i * 3 + k] += p[k] / dist * strength;
    }
}
