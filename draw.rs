//! draw - Vector drawing primitives in scene coordinates
//!
//! Thin wrappers over `embedded-graphics` shapes; every helper takes the
//! target and viewport explicitly and propagates the target's error.

use embedded_graphics::{
    geometry::Angle,
    pixelcolor::Rgb888,
    prelude::*,
    primitives::{
        Arc, Circle, Line, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, Triangle,
    },
};

use crate::geometry::{Vec2, Viewport};

fn outlined(border: Rgb888, fill: Rgb888) -> PrimitiveStyle<Rgb888> {
    PrimitiveStyleBuilder::new()
        .stroke_color(border)
        .stroke_width(1)
        .fill_color(fill)
        .build()
}

/// Axis-aligned rectangle growing right and up from its bottom-left corner.
pub fn filled_rectangle<D>(
    target: &mut D,
    vp: &Viewport,
    origin: Vec2,
    width: f32,
    height: f32,
    border: Rgb888,
    fill: Rgb888,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    let top_left = vp.to_point(Vec2::new(origin.x, origin.y + height));
    Rectangle::new(top_left, Size::new(vp.to_pixels(width), vp.to_pixels(height)))
        .into_styled(outlined(border, fill))
        .draw(target)
}

pub fn filled_triangle<D>(
    target: &mut D,
    vp: &Viewport,
    corners: [Vec2; 3],
    border: Rgb888,
    fill: Rgb888,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    Triangle::new(
        vp.to_point(corners[0]),
        vp.to_point(corners[1]),
        vp.to_point(corners[2]),
    )
    .into_styled(outlined(border, fill))
    .draw(target)
}

pub fn filled_circle<D>(
    target: &mut D,
    vp: &Viewport,
    center: Vec2,
    radius: f32,
    border: Rgb888,
    fill: Rgb888,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    Circle::with_center(vp.to_point(center), vp.to_pixels(radius * 2.0))
        .into_styled(outlined(border, fill))
        .draw(target)
}

/// Solid disk of the given diameter, like a turtle `dot`.
pub fn dot<D>(
    target: &mut D,
    vp: &Viewport,
    center: Vec2,
    diameter: f32,
    color: Rgb888,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    Circle::with_center(vp.to_point(center), vp.to_pixels(diameter))
        .into_styled(PrimitiveStyle::with_fill(color))
        .draw(target)
}

pub fn line<D>(
    target: &mut D,
    vp: &Viewport,
    from: Vec2,
    to: Vec2,
    color: Rgb888,
    width: u32,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    Line::new(vp.to_point(from), vp.to_point(to))
        .into_styled(PrimitiveStyle::with_stroke(color, width))
        .draw(target)
}

/// Stroked arc. Angles are scene angles: degrees, counter-clockwise from +x.
pub fn arc<D>(
    target: &mut D,
    vp: &Viewport,
    center: Vec2,
    radius: f32,
    start_degrees: f32,
    sweep_degrees: f32,
    color: Rgb888,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    // Pixel space is y-down, so angles run clockwise there.
    Arc::with_center(
        vp.to_point(center),
        vp.to_pixels(radius * 2.0),
        Angle::from_degrees(-(start_degrees + sweep_degrees)),
        Angle::from_degrees(sweep_degrees),
    )
    .into_styled(PrimitiveStyle::with_stroke(color, 1))
    .draw(target)
}

/// Turtle-style pen: `goto` only leaves a trace while the pen is down.
#[derive(Debug, Clone)]
pub struct Pen {
    position: Vec2,
    down: bool,
    color: Rgb888,
    width: u32,
}

impl Pen {
    pub fn new(color: Rgb888, width: u32) -> Self {
        Self {
            position: Vec2::default(),
            down: false,
            color,
            width,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn is_down(&self) -> bool {
        self.down
    }

    pub fn pen_up(&mut self) {
        self.down = false;
    }

    pub fn pen_down(&mut self) {
        self.down = true;
    }

    pub fn set_color(&mut self, color: Rgb888) {
        self.color = color;
    }

    /// Pen-up travel to `to`.
    pub fn move_to(&mut self, to: Vec2) {
        self.pen_up();
        self.position = to;
    }

    /// Pen-down travel to `to`.
    pub fn line_to<D>(&mut self, target: &mut D, vp: &Viewport, to: Vec2) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb888>,
    {
        self.pen_down();
        self.goto(target, vp, to)
    }

    pub fn goto<D>(&mut self, target: &mut D, vp: &Viewport, to: Vec2) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb888>,
    {
        if self.down {
            line(target, vp, self.position, to, self.color, self.width)?;
        }
        self.position = to;
        Ok(())
    }
}
