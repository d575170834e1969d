//! error - Configuration errors
//! Raised once, when the animation is built; never mid-run.

use thiserror::Error;

/// A `Settings` value that cannot drive the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("{name} must be greater than zero")]
    Zero { name: &'static str },

    #[error("{name} range is inverted (min > max)")]
    InvertedRange { name: &'static str },

    #[error("max_particles {requested} outside 1..={capacity}")]
    ParticleCap { requested: usize, capacity: usize },

    #[error("ray_count {0} does not divide the full circle evenly")]
    RayCount(u32),

    #[error("{name} must be a finite number")]
    NotFinite { name: &'static str },

    #[error("{name} must not be negative")]
    Negative { name: &'static str },

    #[error("{name} must lie in [0, 1]")]
    Unit { name: &'static str },
}
