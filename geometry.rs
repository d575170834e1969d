//! geometry - Scene coordinates and their mapping onto the pixel grid
//!
//! The scene uses turtle-style coordinates: origin at the centre of the
//! canvas, x to the right, y up. Pixels have their origin top-left, y down.

use core::ops::{Add, AddAssign};

use embedded_graphics::prelude::{Point, Size};

#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Unit vector at `degrees`, counter-clockwise from +x.
    pub fn from_angle(degrees: f32) -> Self {
        let radians = degrees.to_radians();
        Self::new(libm::cosf(radians), libm::sinf(radians))
    }

    pub fn scale(self, factor: f32) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

/// Fixed-size canvas, one scene unit per pixel.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn to_point(&self, p: Vec2) -> Point {
        Point::new(
            libm::roundf(p.x + self.width as f32 / 2.0) as i32,
            libm::roundf(self.height as f32 / 2.0 - p.y) as i32,
        )
    }

    /// Scene length to whole pixels, never negative.
    pub fn to_pixels(&self, length: f32) -> u32 {
        libm::roundf(length.max(0.0)) as u32
    }
}
