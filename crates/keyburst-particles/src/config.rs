//! Engine configuration (parsed from TOML)

use keyburst_core::toml_util::{toml_f32, toml_usize, toml_vec3};
use keyburst_core::{KeyburstError, Result};

/// Hard cap on pool size regardless of what the config asks for
pub const MAX_CAPACITY: usize = 100_000;

/// Pool size, spawn ranges and integrator constants
#[derive(Debug, Clone, PartialEq)]
pub struct BurstConfig {
    pub capacity: usize,
    pub burst_count: usize,
    pub speed_min: f32,
    pub speed_max: f32,
    pub lifetime_min: f32,
    pub lifetime_max: f32,
    pub size_min: f32,
    pub size_max: f32,
    pub spawn_jitter: f32,
    pub impulse_radius: f32,
    pub impulse_strength: f32,
    pub damping: f32,
    pub gravity: f32,
    pub pop_duration: f32,
    pub pop_growth: f32,
    pub shrink_factor: f32,
}

impl Default for BurstConfig {
    fn default() -> Self {
        Self {
            capacity: crate::PARTICLE_CAPACITY,
            burst_count: crate::BURST_PARTICLE_COUNT,
            speed_min: crate::SPEED_MIN,
            speed_max: crate::SPEED_MAX,
            lifetime_min: crate::LIFETIME_MIN,
            lifetime_max: crate::LIFETIME_MAX,
            size_min: crate::SIZE_MIN,
            size_max: crate::SIZE_MAX,
            spawn_jitter: crate::SPAWN_JITTER,
            impulse_radius: crate::IMPULSE_RADIUS,
            impulse_strength: crate::IMPULSE_STRENGTH,
            damping: crate::VELOCITY_DAMPING,
            gravity: crate::GRAVITY,
            pop_duration: crate::POP_DURATION,
            pop_growth: crate::POP_GROWTH,
            shrink_factor: crate::SHRINK_FACTOR,
        }
    }
}

impl BurstConfig {
    /// Parse from a `[particles]` table. Unknown keys are ignored.
    pub fn from_toml(table: &toml::value::Table) -> Self {
        let mut config = Self::default();

        if let Some(v) = table.get("capacity") {
            config.capacity = toml_usize(v, config.capacity).min(MAX_CAPACITY);
        }
        if let Some(v) = table.get("burst_count") {
            config.burst_count = toml_usize(v, config.burst_count);
        }
        config.burst_count = config.burst_count.min(config.capacity);

        let floats: [(&str, &mut f32); 14] = [
            ("speed_min", &mut config.speed_min),
            ("speed_max", &mut config.speed_max),
            ("lifetime_min", &mut config.lifetime_min),
            ("lifetime_max", &mut config.lifetime_max),
            ("size_min", &mut config.size_min),
            ("size_max", &mut config.size_max),
            ("spawn_jitter", &mut config.spawn_jitter),
            ("impulse_radius", &mut config.impulse_radius),
            ("impulse_strength", &mut config.impulse_strength),
            ("damping", &mut config.damping),
            ("gravity", &mut config.gravity),
            ("pop_duration", &mut config.pop_duration),
            ("pop_growth", &mut config.pop_growth),
            ("shrink_factor", &mut config.shrink_factor),
        ];
        for (key, field) in floats {
            if let Some(v) = table.get(key) {
                *field = toml_f32(v, *field);
            }
        }

        config
    }

    pub fn validate(&self) -> Result<()> {
        check_ordered("speed", self.speed_min, self.speed_max)?;
        check_ordered("lifetime", self.lifetime_min, self.lifetime_max)?;
        check_ordered("size", self.size_min, self.size_max)?;
        if self.lifetime_min <= 0.0 {
            return Err(KeyburstError::ConfigError(
                "lifetime_min must be positive".into(),
            ));
        }
        if self.impulse_radius <= 0.0 {
            return Err(KeyburstError::ConfigError(
                "impulse_radius must be positive".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.damping) {
            return Err(KeyburstError::ValueOutOfRange {
                field: "damping".into(),
                min: 0.0,
                max: 1.0,
                value: self.damping as f64,
            });
        }
        Ok(())
    }
}

/// Camera shake response to bursts
#[derive(Debug, Clone, PartialEq)]
pub struct ShakeConfig {
    /// Magnitude each burst raises the shake to (never lowers it)
    pub kick: f32,
    pub decay_per_sec: f32,
    pub axis_scale: [f32; 3],
}

impl Default for ShakeConfig {
    fn default() -> Self {
        Self {
            kick: crate::SHAKE_KICK,
            decay_per_sec: crate::SHAKE_DECAY_PER_SEC,
            axis_scale: crate::SHAKE_AXIS_SCALE,
        }
    }
}

impl ShakeConfig {
    pub fn from_toml(table: &toml::value::Table) -> Self {
        let mut config = Self::default();
        if let Some(v) = table.get("kick") {
            config.kick = toml_f32(v, config.kick).max(0.0);
        }
        if let Some(v) = table.get("decay_per_sec") {
            config.decay_per_sec = toml_f32(v, config.decay_per_sec);
        }
        if let Some(v) = table.get("axis_scale") {
            config.axis_scale = toml_vec3(v, config.axis_scale);
        }
        config
    }

    pub fn validate(&self) -> Result<()> {
        if self.decay_per_sec <= 0.0 {
            return Err(KeyburstError::ConfigError(
                "shake decay_per_sec must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Everything the particle engine reads from config
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineConfig {
    pub burst: BurstConfig,
    pub shake: ShakeConfig,
}

impl EngineConfig {
    /// Parse from a document root holding optional `[particles]` and `[shake]` tables
    pub fn from_toml(root: &toml::value::Table) -> Self {
        let burst = root
            .get("particles")
            .and_then(|v| v.as_table())
            .map(BurstConfig::from_toml)
            .unwrap_or_default();
        let shake = root
            .get("shake")
            .and_then(|v| v.as_table())
            .map(ShakeConfig::from_toml)
            .unwrap_or_default();
        Self { burst, shake }
    }

    pub fn validate(&self) -> Result<()> {
        self.burst.validate()?;
        self.shake.validate()
    }
}

fn check_ordered(name: &str, min: f32, max: f32) -> Result<()> {
    if min > max {
        return Err(KeyburstError::ConfigError(format!(
            "{name}_min ({min}) is greater than {name}_max ({max})"
        )));
    }
    Ok(())
}
