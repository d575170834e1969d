//! scene - Static scene construction
//!
//! Drawn once at startup. Returns the anchors the animation needs: where
//! smoke leaves the chimney, where the window pane is and where the sun sits.

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::DrawTarget;
use rand::Rng;

use crate::draw::{self, Pen};
use crate::geometry::{Vec2, Viewport};
use crate::settings::Settings;

const OUTLINE: Rgb888 = Rgb888::new(0, 0, 0);
const GROUND: Rgb888 = Rgb888::new(0x90, 0xEE, 0x90);
const WALL: Rgb888 = Rgb888::new(0xDE, 0xB8, 0x87);
const ROOF: Rgb888 = Rgb888::new(0xA0, 0x52, 0x2D);
const DOOR: Rgb888 = Rgb888::new(0x8B, 0x45, 0x13);
const KNOB: Rgb888 = Rgb888::new(0xFF, 0xD7, 0x00);
const CHIMNEY: Rgb888 = Rgb888::new(0x8B, 0x73, 0x55);
const TRUNK: Rgb888 = Rgb888::new(0x8B, 0x45, 0x13);
const CROWN: Rgb888 = Rgb888::new(0x22, 0x8B, 0x22);
const FENCE: Rgb888 = Rgb888::new(0x8B, 0x45, 0x13);
const SUN: Rgb888 = Rgb888::new(0xFF, 0xD7, 0x00);
const SILHOUETTE: Rgb888 = Rgb888::new(0x2F, 0x2F, 0x2F);

// Cabin
const CABIN_X: f32 = -75.0;
const CABIN_WIDTH: f32 = 150.0;
const CABIN_HEIGHT: f32 = 100.0;
const ROOF_HEIGHT: f32 = 60.0;
const ROOF_OVERHANG: f32 = 10.0;
const DOOR_WIDTH: f32 = 30.0;
const DOOR_HEIGHT: f32 = 50.0;
const WINDOW_SIZE: f32 = 25.0;
const CHIMNEY_WIDTH: f32 = 20.0;
const CHIMNEY_HEIGHT: f32 = 35.0;

// Sun
const SUN_CENTER: Vec2 = Vec2::new(-290.0, 200.0);
const SUN_RADIUS: f32 = 40.0;

/// Square window pane, anchored at its bottom-left corner.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct WindowRect {
    pub origin: Vec2,
    pub size: f32,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SunDisk {
    pub center: Vec2,
    pub radius: f32,
}

/// Fixed points of the static scene handed to the animation core.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SceneAnchors {
    pub smoke_origin: Vec2,
    pub window: WindowRect,
    pub sun: SunDisk,
}

/// Paints the whole static scene onto `target`.
pub fn build_scene<D, R>(
    target: &mut D,
    vp: &Viewport,
    settings: &Settings,
    rng: &mut R,
) -> Result<SceneAnchors, D::Error>
where
    D: DrawTarget<Color = Rgb888>,
    R: Rng,
{
    target.clear(settings.sky_color)?;

    let ground_y = -(vp.height as f32) / 4.0;
    draw_ground(target, vp, ground_y)?;

    let sun = SunDisk { center: SUN_CENTER, radius: SUN_RADIUS };
    draw::filled_circle(target, vp, sun.center, sun.radius, SUN, SUN)?;

    let (window, smoke_origin) = draw_cabin(target, vp, settings, ground_y)?;

    draw_tree(target, vp, rng, Vec2::new(CABIN_X - 80.0, ground_y))?;
    draw_tree(target, vp, rng, Vec2::new(CABIN_X + CABIN_WIDTH + 60.0, ground_y))?;

    draw_fence(target, vp, Vec2::new(CABIN_X - 120.0, ground_y), 5, 30.0, 40.0)?;
    draw_fence(target, vp, Vec2::new(CABIN_X + CABIN_WIDTH + 20.0, ground_y), 4, 30.0, 40.0)?;
    draw_fence(target, vp, Vec2::new(CABIN_X + CABIN_WIDTH + 30.0, ground_y), 3, 30.0, 40.0)?;

    draw_couple(target, vp, Vec2::new(250.0, ground_y))?;

    Ok(SceneAnchors { smoke_origin, window, sun })
}

fn draw_ground<D>(target: &mut D, vp: &Viewport, ground_y: f32) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    let bottom = -(vp.height as f32) / 2.0;
    draw::filled_rectangle(
        target,
        vp,
        Vec2::new(-(vp.width as f32) / 2.0, bottom),
        vp.width as f32,
        ground_y - bottom,
        GROUND,
        GROUND,
    )
}

/// Returns the window pane and the chimney top centre.
fn draw_cabin<D>(
    target: &mut D,
    vp: &Viewport,
    settings: &Settings,
    base_y: f32,
) -> Result<(WindowRect, Vec2), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    let base = Vec2::new(CABIN_X, base_y);
    let eaves_y = base_y + CABIN_HEIGHT;
    let ridge = Vec2::new(CABIN_X + CABIN_WIDTH / 2.0, eaves_y + ROOF_HEIGHT);

    // The chimney goes behind the roof, so draw it first.
    let chimney_x = CABIN_X + CABIN_WIDTH * 0.75;
    let along_slope = (chimney_x - ridge.x) / (CABIN_WIDTH / 2.0 + ROOF_OVERHANG);
    let chimney_base_y = ridge.y - along_slope * ROOF_HEIGHT;
    draw::filled_rectangle(
        target,
        vp,
        Vec2::new(chimney_x, chimney_base_y - CHIMNEY_HEIGHT / 2.0),
        CHIMNEY_WIDTH,
        CHIMNEY_HEIGHT * 1.5,
        OUTLINE,
        CHIMNEY,
    )?;

    draw::filled_rectangle(target, vp, base, CABIN_WIDTH, CABIN_HEIGHT, OUTLINE, WALL)?;
    draw::filled_triangle(
        target,
        vp,
        [
            Vec2::new(CABIN_X - ROOF_OVERHANG, eaves_y),
            ridge,
            Vec2::new(CABIN_X + CABIN_WIDTH + ROOF_OVERHANG, eaves_y),
        ],
        OUTLINE,
        ROOF,
    )?;

    let door = Vec2::new(CABIN_X + CABIN_WIDTH / 2.0 - DOOR_WIDTH / 2.0, base_y);
    draw::filled_rectangle(target, vp, door, DOOR_WIDTH, DOOR_HEIGHT, OUTLINE, DOOR)?;
    draw::dot(target, vp, Vec2::new(door.x + 5.0, base_y + DOOR_HEIGHT / 2.0), 5.0, KNOB)?;

    let window = WindowRect {
        origin: Vec2::new(
            CABIN_X + CABIN_WIDTH * 0.7 - WINDOW_SIZE / 2.0,
            base_y + CABIN_HEIGHT * 0.5,
        ),
        size: WINDOW_SIZE,
    };
    draw::filled_rectangle(
        target,
        vp,
        window.origin,
        WINDOW_SIZE,
        WINDOW_SIZE,
        OUTLINE,
        settings.window_warm,
    )?;
    let mut pen = Pen::new(settings.window_mullion, 1);
    let half = WINDOW_SIZE / 2.0;
    pen.move_to(Vec2::new(window.origin.x + half, window.origin.y));
    pen.line_to(target, vp, Vec2::new(window.origin.x + half, window.origin.y + WINDOW_SIZE))?;
    pen.move_to(Vec2::new(window.origin.x, window.origin.y + half));
    pen.line_to(target, vp, Vec2::new(window.origin.x + WINDOW_SIZE, window.origin.y + half))?;

    let smoke_origin = Vec2::new(
        chimney_x + CHIMNEY_WIDTH / 2.0,
        chimney_base_y + CHIMNEY_HEIGHT,
    );
    Ok((window, smoke_origin))
}

fn draw_tree<D, R>(target: &mut D, vp: &Viewport, rng: &mut R, base: Vec2) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
    R: Rng,
{
    const TRUNK_WIDTH: f32 = 20.0;
    const TRUNK_HEIGHT: f32 = 50.0;

    draw::filled_rectangle(
        target,
        vp,
        Vec2::new(base.x - TRUNK_WIDTH / 2.0, base.y),
        TRUNK_WIDTH,
        TRUNK_HEIGHT,
        OUTLINE,
        TRUNK,
    )?;

    let crown = Vec2::new(base.x, base.y + TRUNK_HEIGHT + 20.0);
    for _ in 0..5 {
        let offset = Vec2::new(
            rng.gen_range(-15..=15) as f32,
            rng.gen_range(-10..=10) as f32,
        );
        let radius = rng.gen_range(20..=35) as f32;
        draw::filled_circle(target, vp, crown + offset, radius, CROWN, CROWN)?;
    }
    Ok(())
}

fn draw_fence<D>(
    target: &mut D,
    vp: &Viewport,
    start: Vec2,
    sections: u32,
    section_width: f32,
    post_height: f32,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    let mut pen = Pen::new(FENCE, 3);
    for i in 0..=sections {
        let x = start.x + i as f32 * section_width;
        pen.move_to(Vec2::new(x, start.y));
        pen.line_to(target, vp, Vec2::new(x, start.y + post_height))?;
    }

    let end_x = start.x + sections as f32 * section_width;
    for rail in [0.3, 0.7] {
        let y = start.y + post_height * rail;
        pen.move_to(Vec2::new(start.x, y));
        pen.line_to(target, vp, Vec2::new(end_x, y))?;
    }
    Ok(())
}

/// Two stick figures side by side, holding hands.
fn draw_couple<D>(target: &mut D, vp: &Viewport, feet: Vec2) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    const GAP: f32 = 30.0;

    let left = Vec2::new(feet.x - GAP / 2.0, feet.y);
    let right = Vec2::new(feet.x + GAP / 2.0, feet.y);
    let left_hand = draw_figure(target, vp, left, 1.0)?;
    let right_hand = draw_figure(target, vp, right, -1.0)?;

    let mut pen = Pen::new(SILHOUETTE, 2);
    pen.move_to(left_hand);
    pen.line_to(target, vp, right_hand)
}

/// Draws one figure and returns the hand reaching towards `facing`.
fn draw_figure<D>(target: &mut D, vp: &Viewport, feet: Vec2, facing: f32) -> Result<Vec2, D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    let hip = Vec2::new(feet.x, feet.y + 22.0);
    let shoulder = Vec2::new(feet.x, feet.y + 42.0);
    let head = Vec2::new(feet.x, feet.y + 50.0);

    let mut pen = Pen::new(SILHOUETTE, 2);
    pen.move_to(Vec2::new(feet.x - 7.0, feet.y));
    pen.line_to(target, vp, hip)?;
    pen.line_to(target, vp, Vec2::new(feet.x + 7.0, feet.y))?;
    pen.move_to(hip);
    pen.line_to(target, vp, shoulder)?;

    let reach = Vec2::new(feet.x + facing * 12.0, feet.y + 30.0);
    let away = Vec2::new(feet.x - facing * 10.0, feet.y + 28.0);
    pen.move_to(shoulder);
    pen.line_to(target, vp, reach)?;
    pen.move_to(shoulder);
    pen.line_to(target, vp, away)?;

    draw::filled_circle(target, vp, head, 7.0, SILHOUETTE, SILHOUETTE)?;
    Ok(reach)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::Layer;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn built() -> (Layer, SceneAnchors, Viewport) {
        let settings = Settings::default();
        let vp = Viewport::new(settings.screen_width, settings.screen_height);
        let mut canvas = Layer::transparent(vp.size());
        let mut rng = SmallRng::seed_from_u64(1);
        let anchors = build_scene(&mut canvas, &vp, &settings, &mut rng).unwrap();
        (canvas, anchors, vp)
    }

    #[test]
    fn scene_covers_the_canvas() {
        let (canvas, _, vp) = built();
        assert_eq!(canvas.painted(), (vp.width * vp.height) as usize);
    }

    #[test]
    fn chimney_top_sits_above_the_roof_slope() {
        let (_, anchors, _) = built();
        let ridge_y = -150.0 + CABIN_HEIGHT + ROOF_HEIGHT;
        // Right slope at the chimney's x, plus the chimney itself.
        let slope_y = ridge_y - (37.5 / 85.0) * ROOF_HEIGHT;
        assert!((anchors.smoke_origin.y - (slope_y + CHIMNEY_HEIGHT)).abs() < 1e-3);
        assert_eq!(anchors.smoke_origin.x, CABIN_X + CABIN_WIDTH * 0.75 + CHIMNEY_WIDTH / 2.0);
    }

    #[test]
    fn window_starts_warm() {
        let (canvas, anchors, vp) = built();
        let inside = Vec2::new(anchors.window.origin.x + 4.0, anchors.window.origin.y + 4.0);
        assert_eq!(canvas.color_at(vp.to_point(inside)), Some(Settings::default().window_warm));
    }

    #[test]
    fn sun_is_drawn_at_its_anchor() {
        let (canvas, anchors, vp) = built();
        assert_eq!(canvas.color_at(vp.to_point(anchors.sun.center)), Some(SUN));
        assert_eq!(anchors.sun.radius, SUN_RADIUS);
    }
}
