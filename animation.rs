//! animation - The per-tick pass over all moving parts of the scene
//! Owns smoke, window and sun state; surfaces are lent in per tick.

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::DrawTarget;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::error::SettingsError;
use crate::geometry::Viewport;
use crate::layer::Overlay;
use crate::particles::{ParticleSystem, StepReport, SMOKE_CAPACITY};
use crate::scene::SceneAnchors;
use crate::settings::Settings;
use crate::smoke::{render_smoke, SmokeFrame};
use crate::sun::{render_rays, SunRays};
use crate::window_light::WindowLight;

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    pub tick: u64,
    pub smoke: StepReport,
    pub frame: SmokeFrame,
    pub window_toggled: bool,
    pub rays_pulsed: bool,
}

/// Owns every piece of animated state; surfaces are lent in per tick.
pub struct Animator {
    smoke: ParticleSystem<SMOKE_CAPACITY>,
    window: WindowLight,
    sun: SunRays,
    // Puff orientation, rolled per particle per frame.
    puff_rng: SmallRng,
    viewport: Viewport,
    ticks: u64,
    settings: Settings,
}

impl Animator {
    pub fn new(settings: Settings, anchors: &SceneAnchors) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self {
            smoke: ParticleSystem::new(settings, anchors.smoke_origin),
            window: WindowLight::new(&settings, anchors.window),
            sun: SunRays::new(&settings, anchors.sun),
            puff_rng: SmallRng::seed_from_u64(settings.rng_seed.rotate_left(17)),
            viewport: Viewport::new(settings.screen_width, settings.screen_height),
            ticks: 0,
            settings,
        })
    }

    pub fn smoke(&self) -> &ParticleSystem<SMOKE_CAPACITY> {
        &self.smoke
    }

    pub fn window(&self) -> &WindowLight {
        &self.window
    }

    pub fn sun(&self) -> &SunRays {
        &self.sun
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// One frame of work, in order: smoke step and repaint, window flicker
    /// patch on the static canvas, ray pulse and repaint. Committing the
    /// surfaces to a display is left to the caller.
    pub fn tick<S, O>(
        &mut self,
        canvas: &mut S,
        smoke: &mut O,
        rays: &mut O,
    ) -> Result<TickReport, S::Error>
    where
        S: DrawTarget<Color = Rgb888>,
        O: Overlay<Error = S::Error>,
    {
        self.ticks += 1;

        let step = self.smoke.step();
        let frame = render_smoke(
            &self.smoke,
            smoke,
            &self.viewport,
            &self.settings,
            &mut self.puff_rng,
        )?;

        let window_toggled = self.window.tick();
        if window_toggled {
            self.window.paint(canvas, &self.viewport)?;
        }

        let rays_pulsed = self.sun.tick();
        render_rays(&self.sun, rays, &self.viewport)?;

        Ok(TickReport {
            tick: self.ticks,
            smoke: step,
            frame,
            window_toggled,
            rays_pulsed,
        })
    }
}
