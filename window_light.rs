//! window_light - Cabin window flicker
//! A two-state cycle between a warm and a dim glow, patched in place.

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::DrawTarget;
use log::debug;

use crate::draw;
use crate::geometry::{Vec2, Viewport};
use crate::scene::WindowRect;
use crate::settings::Settings;

const FRAME: Rgb888 = Rgb888::new(0, 0, 0);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LightState {
    Warm,
    Dim,
}

impl LightState {
    pub fn toggled(self) -> Self {
        match self {
            LightState::Warm => LightState::Dim,
            LightState::Dim => LightState::Warm,
        }
    }

    /// Index into the `[warm, dim]` palette.
    pub fn index(self) -> usize {
        match self {
            LightState::Warm => 0,
            LightState::Dim => 1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct WindowLight {
    state: LightState,
    ticks: u32,
    interval: u32,
    rect: WindowRect,
    palette: [Rgb888; 2],
    mullion: Rgb888,
}

impl WindowLight {
    pub fn new(settings: &Settings, rect: WindowRect) -> Self {
        assert!(settings.flicker_interval > 0, "flicker_interval must be non-zero");
        Self {
            state: LightState::Warm,
            ticks: 0,
            interval: settings.flicker_interval,
            rect,
            palette: [settings.window_warm, settings.window_dim],
            mullion: settings.window_mullion,
        }
    }

    pub fn state(&self) -> LightState {
        self.state
    }

    pub fn rect(&self) -> WindowRect {
        self.rect
    }

    pub fn color(&self) -> Rgb888 {
        self.palette[self.state.index()]
    }

    /// Counts one tick; returns `true` when the light flipped.
    pub fn tick(&mut self) -> bool {
        self.ticks += 1;
        if self.ticks < self.interval {
            return false;
        }
        self.ticks = 0;
        self.state = self.state.toggled();
        debug!("window light now {:?}", self.state);
        true
    }

    /// Repaints the pane in the current colour with its cross mullions on top.
    pub fn paint<D>(&self, target: &mut D, vp: &Viewport) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb888>,
    {
        let WindowRect { origin, size } = self.rect;
        let half = size / 2.0;

        draw::filled_rectangle(target, vp, origin, size, size, FRAME, self.color())?;
        draw::line(
            target,
            vp,
            Vec2::new(origin.x + half, origin.y),
            Vec2::new(origin.x + half, origin.y + size),
            self.mullion,
            1,
        )?;
        draw::line(
            target,
            vp,
            Vec2::new(origin.x, origin.y + half),
            Vec2::new(origin.x + size, origin.y + half),
            self.mullion,
            1,
        )
    }
}
