//! sun - Sun rays over the static sun disk
//! A short/long length pulse plus a slow rotation of the whole bundle.

use log::trace;

use crate::draw;
use crate::geometry::{Vec2, Viewport};
use crate::layer::Overlay;
use crate::scene::SunDisk;
use crate::settings::Settings;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RayPulse {
    Short,
    Long,
}

impl RayPulse {
    pub fn toggled(self) -> Self {
        match self {
            RayPulse::Short => RayPulse::Long,
            RayPulse::Long => RayPulse::Short,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SunRays {
    disk: SunDisk,
    pulse: RayPulse,
    ticks: u32,
    /// Rotation offset in whole degrees, always below the ray spacing.
    phase: u32,
    settings: Settings,
}

impl SunRays {
    pub fn new(settings: &Settings, disk: SunDisk) -> Self {
        assert!(settings.ray_interval > 0, "ray_interval must be non-zero");
        assert!(
            settings.ray_count > 0 && 360 % settings.ray_count == 0,
            "ray_count must divide 360"
        );
        Self {
            disk,
            pulse: RayPulse::Short,
            ticks: 0,
            phase: 0,
            settings: *settings,
        }
    }

    pub fn pulse(&self) -> RayPulse {
        self.pulse
    }

    pub fn phase(&self) -> u32 {
        self.phase
    }

    pub fn length(&self) -> f32 {
        match self.pulse {
            RayPulse::Short => self.settings.ray_short,
            RayPulse::Long => self.settings.ray_long,
        }
    }

    /// Advances the rotation every tick and the pulse every interval;
    /// returns `true` when the pulse flipped.
    pub fn tick(&mut self) -> bool {
        self.phase = (self.phase + 1) % self.settings.ray_spacing();
        self.ticks += 1;
        if self.ticks < self.settings.ray_interval {
            return false;
        }
        self.ticks = 0;
        self.pulse = self.pulse.toggled();
        trace!("sun rays now {:?}", self.pulse);
        true
    }

    /// Ray segments for the current frame, evenly spaced around the disk.
    pub fn segments(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        let spacing = self.settings.ray_spacing();
        let inner = self.disk.radius - self.settings.ray_inset;
        let outer = self.disk.radius + self.length();
        (0..self.settings.ray_count).map(move |i| {
            let dir = Vec2::from_angle((self.phase + i * spacing) as f32);
            (
                self.disk.center + dir.scale(inner),
                self.disk.center + dir.scale(outer),
            )
        })
    }
}

/// Clears the ray overlay and draws the current bundle.
pub fn render_rays<O: Overlay>(
    rays: &SunRays,
    overlay: &mut O,
    vp: &Viewport,
) -> Result<(), O::Error> {
    overlay.clear_overlay();
    for (from, to) in rays.segments() {
        draw::line(overlay, vp, from, to, rays.settings.ray_color, rays.settings.ray_width)?;
    }
    Ok(())
}
