//! layer - Drawing surfaces and frame composition
//! One opaque static canvas with transparent overlays stacked on top.

use alloc::vec;
use alloc::vec::Vec;
use core::convert::Infallible;

use embedded_graphics::{
    pixelcolor::Rgb888,
    prelude::*,
    primitives::Rectangle,
};

use crate::geometry::Viewport;
use crate::settings::Settings;

/// A surface that can be wiped without touching any other surface.
pub trait Overlay: DrawTarget<Color = Rgb888> {
    /// Makes every pixel of this surface transparent.
    fn clear_overlay(&mut self);

    /// Opacity in [0, 1] applied to subsequent draws.
    fn set_opacity(&mut self, opacity: f32);
}

/// Owned RGB pixel buffer with a per-pixel alpha channel.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    size: Size,
    color: Vec<Rgb888>,
    alpha: Vec<u8>,
    opacity: u8,
}

impl Layer {
    pub fn transparent(size: Size) -> Self {
        Self::filled(size, Rgb888::BLACK, 0)
    }

    pub fn opaque(size: Size, background: Rgb888) -> Self {
        Self::filled(size, background, u8::MAX)
    }

    fn filled(size: Size, color: Rgb888, alpha: u8) -> Self {
        let len = (size.width * size.height) as usize;
        Self {
            size,
            color: vec![color; len],
            alpha: vec![alpha; len],
            opacity: u8::MAX,
        }
    }

    fn index(&self, point: Point) -> Option<usize> {
        let (x, y) = (point.x, point.y);
        if x < 0 || y < 0 || x >= self.size.width as i32 || y >= self.size.height as i32 {
            return None;
        }
        Some(y as usize * self.size.width as usize + x as usize)
    }

    /// Colour at `point`, or `None` if nothing visible was drawn there.
    pub fn color_at(&self, point: Point) -> Option<Rgb888> {
        self.index(point)
            .filter(|&i| self.alpha[i] > 0)
            .map(|i| self.color[i])
    }

    pub fn alpha_at(&self, point: Point) -> u8 {
        self.index(point).map_or(0, |i| self.alpha[i])
    }

    /// Number of pixels with non-zero alpha.
    pub fn painted(&self) -> usize {
        self.alpha.iter().filter(|&&a| a > 0).count()
    }

    fn blend_over(&self, index: usize, below: Rgb888) -> Rgb888 {
        let a = self.alpha[index] as u32;
        if a == 0 {
            return below;
        }
        let above = self.color[index];
        let mix = |src: u8, dst: u8| ((src as u32 * a + dst as u32 * (255 - a) + 127) / 255) as u8;
        Rgb888::new(
            mix(above.r(), below.r()),
            mix(above.g(), below.g()),
            mix(above.b(), below.b()),
        )
    }
}

impl OriginDimensions for Layer {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for Layer {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some(i) = self.index(point) {
                self.color[i] = color;
                self.alpha[i] = self.opacity;
            }
        }
        Ok(())
    }
}

impl Overlay for Layer {
    fn clear_overlay(&mut self) {
        self.alpha.fill(0);
    }

    fn set_opacity(&mut self, opacity: f32) {
        self.opacity = libm::roundf(opacity.clamp(0.0, 1.0) * 255.0) as u8;
    }
}

/// The three surfaces of the scene, each owned by exactly one component.
pub struct Surfaces {
    pub viewport: Viewport,
    /// Static scene; only the window pane is ever patched after startup.
    pub canvas: Layer,
    pub smoke: Layer,
    pub rays: Layer,
}

impl Surfaces {
    pub fn new(settings: &Settings) -> Self {
        let viewport = Viewport::new(settings.screen_width, settings.screen_height);
        Self {
            viewport,
            canvas: Layer::opaque(viewport.size(), settings.sky_color),
            smoke: Layer::transparent(viewport.size()),
            rays: Layer::transparent(viewport.size()),
        }
    }

    /// Blends canvas, rays and smoke (bottom to top) into `target`.
    pub fn compose<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb888>,
    {
        let area = Rectangle::new(Point::zero(), self.canvas.size);
        let frame = self.canvas.color.iter().enumerate().map(|(i, &base)| {
            let lit = self.rays.blend_over(i, base);
            self.smoke.blend_over(i, lit)
        });
        target.fill_contiguous(&area, frame)
    }
}
