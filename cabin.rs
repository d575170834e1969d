//! cabin_scene - A cozy cabin at dusk, with rising smoke, a flickering
//! window and a pulsing sun.
//!
//! The static scene is drawn once onto an opaque canvas. Everything that
//! moves is owned by an [`Animator`] and redrawn by a fixed-period
//! [`TickScheduler`]. No heap allocation outside the pixel layers.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

mod animation;
mod draw;
mod error;
mod geometry;
mod layer;
mod particles;
mod scene;
mod scheduler;
mod settings;
mod smoke;
mod sun;
mod window_light;

pub use animation::{Animator, TickReport};
pub use draw::Pen;
pub use error::SettingsError;
pub use geometry::{Vec2, Viewport};
pub use layer::{Layer, Overlay, Surfaces};
pub use particles::{ParticleSystem, SmokeParticle, StepReport, SMOKE_CAPACITY};
pub use scene::{build_scene, SceneAnchors, SunDisk, WindowRect};
pub use scheduler::{Clock, TickControl, TickScheduler};
pub use settings::Settings;
pub use smoke::{render_smoke, SmokeFrame};
pub use sun::{render_rays, RayPulse, SunRays};
pub use window_light::{LightState, WindowLight};
