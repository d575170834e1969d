//! settings - Every tunable of the scene in one place
//! Checked once by `validate` before anything is built.

use core::time::Duration;

use embedded_graphics::pixelcolor::Rgb888;

use crate::error::SettingsError;
use crate::particles::SMOKE_CAPACITY;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Settings {
    // Display
    pub screen_width: u32,
    pub screen_height: u32,
    pub sky_color: Rgb888,

    // Timing
    pub tick_period_ms: u64,

    // Smoke spawning
    pub spawn_interval: u32,
    pub max_particles: usize,
    pub smoke_life_min: u32,
    pub smoke_life_max: u32,
    pub smoke_jitter: f32,
    pub smoke_drift_min: f32,
    pub smoke_drift_max: f32,
    pub smoke_rise_min: f32,
    pub smoke_rise_max: f32,
    pub smoke_radius_min: f32,
    pub smoke_radius_max: f32,

    // Smoke rendering
    pub smoke_initial_alpha: f32,
    pub smoke_visible_radius: f32,
    pub smoke_color: Rgb888,

    // Window light
    pub flicker_interval: u32,
    pub window_warm: Rgb888,
    pub window_dim: Rgb888,
    pub window_mullion: Rgb888,

    // Sun rays
    pub ray_interval: u32,
    pub ray_short: f32,
    pub ray_long: f32,
    pub ray_count: u32,
    pub ray_inset: f32,
    pub ray_width: u32,
    pub ray_color: Rgb888,

    // RNG seed
    pub rng_seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: 800,
            screen_height: 600,
            sky_color: Rgb888::new(0xE0, 0xF7, 0xFA),
            tick_period_ms: 50,
            spawn_interval: 5,
            max_particles: 60,
            smoke_life_min: 80,
            smoke_life_max: 150,
            smoke_jitter: 2.0,
            smoke_drift_min: -0.3,
            smoke_drift_max: 0.3,
            smoke_rise_min: 0.6,
            smoke_rise_max: 1.2,
            smoke_radius_min: 4.0,
            smoke_radius_max: 8.0,
            smoke_initial_alpha: 0.8,
            smoke_visible_radius: 0.5,
            smoke_color: Rgb888::new(0xD3, 0xD3, 0xD3),
            flicker_interval: 20,
            window_warm: Rgb888::new(0xFF, 0xE0, 0x8A),
            window_dim: Rgb888::new(0xC8, 0x9B, 0x4A),
            window_mullion: Rgb888::new(0x8B, 0x45, 0x13),
            ray_interval: 10,
            ray_short: 20.0,
            ray_long: 35.0,
            ray_count: 12,
            ray_inset: 5.0,
            ray_width: 2,
            ray_color: Rgb888::new(0xFF, 0xC1, 0x25),
            rng_seed: 0x12345678,
        }
    }
}

impl Settings {
    /// Checks the invariants the animation core relies on.
    pub fn validate(&self) -> Result<(), SettingsError> {
        non_zero("screen_width", self.screen_width as u64)?;
        non_zero("screen_height", self.screen_height as u64)?;
        non_zero("tick_period_ms", self.tick_period_ms)?;
        non_zero("spawn_interval", self.spawn_interval as u64)?;
        non_zero("smoke_life_min", self.smoke_life_min as u64)?;
        non_zero("flicker_interval", self.flicker_interval as u64)?;
        non_zero("ray_interval", self.ray_interval as u64)?;

        if self.max_particles == 0 || self.max_particles > SMOKE_CAPACITY {
            return Err(SettingsError::ParticleCap {
                requested: self.max_particles,
                capacity: SMOKE_CAPACITY,
            });
        }

        non_negative("smoke_jitter", self.smoke_jitter)?;
        ordered("smoke_life", self.smoke_life_min as f32, self.smoke_life_max as f32)?;
        ordered("smoke_drift", self.smoke_drift_min, self.smoke_drift_max)?;
        ordered("smoke_rise", self.smoke_rise_min, self.smoke_rise_max)?;
        ordered("smoke_radius", self.smoke_radius_min, self.smoke_radius_max)?;
        ordered("ray_length", self.ray_short, self.ray_long)?;
        finite("smoke_visible_radius", self.smoke_visible_radius)?;
        finite("ray_inset", self.ray_inset)?;

        if !(0.0..=1.0).contains(&self.smoke_initial_alpha) {
            return Err(SettingsError::Unit { name: "smoke_initial_alpha" });
        }

        if self.ray_count == 0 || 360 % self.ray_count != 0 {
            return Err(SettingsError::RayCount(self.ray_count));
        }

        Ok(())
    }

    /// Settings reseeded from time since the Unix epoch, so each run differs.
    pub fn with_time_seed(self, since_epoch: Duration) -> Self {
        // Seconds and sub-second nanos fold into 64 bits without truncation.
        let rng_seed = since_epoch.as_secs().rotate_left(32) ^ u64::from(since_epoch.subsec_nanos());
        Self { rng_seed, ..self }
    }

    /// Angular spacing between adjacent sun rays, in whole degrees.
    pub fn ray_spacing(&self) -> u32 {
        360 / self.ray_count.max(1)
    }
}

fn non_zero(name: &'static str, value: u64) -> Result<(), SettingsError> {
    if value == 0 {
        Err(SettingsError::Zero { name })
    } else {
        Ok(())
    }
}

// NOTE: rand's uniform float sampler panics on NaN, infinite or
// overflowing spans, so every sampled range is checked here.
fn finite(name: &'static str, value: f32) -> Result<(), SettingsError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SettingsError::NotFinite { name })
    }
}

fn non_negative(name: &'static str, value: f32) -> Result<(), SettingsError> {
    finite(name, value)?;
    finite(name, value * 2.0)?;
    if value < 0.0 {
        Err(SettingsError::Negative { name })
    } else {
        Ok(())
    }
}

fn ordered(name: &'static str, min: f32, max: f32) -> Result<(), SettingsError> {
    finite(name, min)?;
    finite(name, max)?;
    if min > max {
        return Err(SettingsError::InvertedRange { name });
    }
    finite(name, max - min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Vec2;
    use crate::particles::ParticleSystem;

    #[test]
    fn default_settings_are_valid() {
        assert_eq!(Settings::default().validate(), Ok(()));
        assert_eq!(Settings::default().ray_spacing(), 30);
    }

    #[test]
    fn rejects_particle_cap_out_of_range() {
        let settings = Settings { max_particles: 0, ..Settings::default() };
        assert!(matches!(settings.validate(), Err(SettingsError::ParticleCap { .. })));

        let settings = Settings { max_particles: SMOKE_CAPACITY + 1, ..Settings::default() };
        assert!(matches!(settings.validate(), Err(SettingsError::ParticleCap { .. })));
    }

    #[test]
    fn rejects_inverted_lifetime() {
        let settings = Settings {
            smoke_life_min: 150,
            smoke_life_max: 80,
            ..Settings::default()
        };
        assert_eq!(
            settings.validate(),
            Err(SettingsError::InvertedRange { name: "smoke_life" })
        );
    }

    #[test]
    fn rejects_negative_jitter() {
        let settings = Settings { smoke_jitter: -1.0, ..Settings::default() };
        assert_eq!(
            settings.validate(),
            Err(SettingsError::Negative { name: "smoke_jitter" })
        );

        let settings = Settings { smoke_jitter: f32::INFINITY, ..Settings::default() };
        assert_eq!(
            settings.validate(),
            Err(SettingsError::NotFinite { name: "smoke_jitter" })
        );
    }

    #[test]
    fn rejects_nan_range_bounds() {
        let settings = Settings { smoke_radius_min: f32::NAN, ..Settings::default() };
        assert_eq!(
            settings.validate(),
            Err(SettingsError::NotFinite { name: "smoke_radius" })
        );

        let settings = Settings { smoke_drift_max: f32::NAN, ..Settings::default() };
        assert_eq!(
            settings.validate(),
            Err(SettingsError::NotFinite { name: "smoke_drift" })
        );

        let settings = Settings { smoke_rise_min: f32::NEG_INFINITY, ..Settings::default() };
        assert_eq!(
            settings.validate(),
            Err(SettingsError::NotFinite { name: "smoke_rise" })
        );
    }

    #[test]
    fn rejects_spans_that_overflow() {
        let settings = Settings {
            smoke_drift_min: -f32::MAX,
            smoke_drift_max: f32::MAX,
            ..Settings::default()
        };
        assert_eq!(
            settings.validate(),
            Err(SettingsError::NotFinite { name: "smoke_drift" })
        );
    }

    #[test]
    fn validated_settings_spawn_without_panicking() {
        let settings = Settings {
            smoke_jitter: 0.0,
            smoke_radius_min: 5.0,
            smoke_radius_max: 5.0,
            spawn_interval: 1,
            ..Settings::default()
        };
        assert_eq!(settings.validate(), Ok(()));

        let mut system: ParticleSystem<SMOKE_CAPACITY> = ParticleSystem::new(settings, Vec2::default());
        for _ in 0..10 {
            assert!(system.step().spawned);
        }
        assert!(system.iter().all(|p| p.radius == 5.0));
    }

    #[test]
    fn time_seed_keeps_seconds_and_nanos() {
        let base = Settings::default();
        let a = base.with_time_seed(Duration::new(1_700_000_000, 5));
        let b = base.with_time_seed(Duration::new(1_700_000_000, 6));
        let c = base.with_time_seed(Duration::new(1_700_000_001, 5));

        assert_ne!(a.rng_seed, b.rng_seed);
        assert_ne!(a.rng_seed, c.rng_seed);
        assert_eq!(a.rng_seed, (1_700_000_000u64 << 32) ^ 5);
        assert_eq!(Settings { rng_seed: base.rng_seed, ..a }, base);
    }

    #[test]
    fn rejects_uneven_ray_count() {
        let settings = Settings { ray_count: 7, ..Settings::default() };
        assert_eq!(settings.validate(), Err(SettingsError::RayCount(7)));
    }

    #[test]
    fn rejects_zero_intervals() {
        let settings = Settings { spawn_interval: 0, ..Settings::default() };
        assert_eq!(
            settings.validate(),
            Err(SettingsError::Zero { name: "spawn_interval" })
        );
    }
}
