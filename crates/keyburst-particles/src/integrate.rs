//! Per-frame particle integration

use crate::config::BurstConfig;
use crate::pool::ParticlePool;

/// Advance every alive particle by `dt` seconds.
///
/// Returns true if any particle was alive at the start of the step, i.e. the
/// attribute buffers changed and need re-uploading.
pub fn integrate(pool: &mut ParticlePool, config: &BurstConfig, dt: f32) -> bool {
    let dt = dt.max(0.0);
    let damping = config.damping;
    let mut any_alive = false;

    for i in 0..pool.capacity() {
        if !pool.is_alive(i) {
            continue;
        }
        any_alive = true;

        let v = &mut pool.velocities[i * 3..i * 3 + 3];
        v[0] *= damping;
        // Damping and gravity folded into one step, in this order
        v[1] = v[1] * damping + config.gravity * dt;
        v[2] *= damping;

        for k in 0..3 {
            pool.positions[i * 3 + k] += pool.velocities[i * 3 + k] * dt;
        }

        pool.ages[i] += dt;
        let age = pool.ages[i];
        let lifetime = pool.lifetimes[i];
        if age >= lifetime {
            pool.retire(i);
            continue;
        }

        let t = (age / lifetime).min(1.0);
        pool.alphas[i] = (1.0 - t) * (1.0 - t);
        pool.sizes[i] *= if age < config.pop_duration {
            config.pop_growth
        } else {
            config.shrink_factor
        };
    }

    any_alive
}
