//! smoke - Smoke overlay renderer
//!
//! Every frame wipes the overlay and redraws all live particles. Puff
//! orientation is rolled again on each redraw, which is what makes the
//! smoke shimmer.

use rand::Rng;

use crate::draw;
use crate::geometry::{Vec2, Viewport};
use crate::layer::Overlay;
use crate::particles::{ParticleSystem, SmokeParticle};
use crate::settings::Settings;

const PUFF_LOBES: u32 = 3;

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct SmokeFrame {
    pub drawn: usize,
    /// Live particles too small to see this frame.
    pub skipped: usize,
}

pub fn render_smoke<const N: usize, O, R>(
    system: &ParticleSystem<N>,
    overlay: &mut O,
    vp: &Viewport,
    settings: &Settings,
    rng: &mut R,
) -> Result<SmokeFrame, O::Error>
where
    O: Overlay,
    R: Rng,
{
    overlay.clear_overlay();

    let mut frame = SmokeFrame::default();
    for particle in system.iter() {
        let radius = particle.visual_radius();
        if radius < settings.smoke_visible_radius {
            frame.skipped += 1;
            continue;
        }
        let heading = rng.gen_range(0.0..360.0);
        overlay.set_opacity(particle.opacity(settings.smoke_initial_alpha));
        draw_puff(overlay, vp, particle, radius, heading, settings)?;
        frame.drawn += 1;
    }
    overlay.set_opacity(1.0);

    Ok(frame)
}

/// Three overlapping lobes around the particle centre, rotated by `heading`.
fn draw_puff<O: Overlay>(
    overlay: &mut O,
    vp: &Viewport,
    particle: &SmokeParticle,
    radius: f32,
    heading: f32,
    settings: &Settings,
) -> Result<(), O::Error> {
    let step = 360.0 / PUFF_LOBES as f32;
    for lobe in 0..PUFF_LOBES {
        let angle = heading + lobe as f32 * step;
        let center = particle.position + Vec2::from_angle(angle).scale(radius * 0.5);
        draw::arc(
            overlay,
            vp,
            center,
            radius * 0.6,
            angle - step / 2.0,
            step,
            settings.smoke_color,
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::Layer;
    use crate::particles::SMOKE_CAPACITY;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn setup() -> (ParticleSystem<SMOKE_CAPACITY>, Layer, Viewport, Settings, SmallRng) {
        let settings = Settings {
            screen_width: 200,
            screen_height: 200,
            spawn_interval: 1000,
            ..Settings::default()
        };
        let vp = Viewport::new(200, 200);
        (
            ParticleSystem::new(settings, Vec2::default()),
            Layer::transparent(vp.size()),
            vp,
            settings,
            SmallRng::seed_from_u64(7),
        )
    }

    fn puff_at(x: f32, life: u32) -> SmokeParticle {
        let mut p = SmokeParticle::new(Vec2::new(x, 0.0), Vec2::default(), 8.0, 100);
        p.life = life;
        p
    }

    #[test]
    fn draws_every_visible_particle() {
        let (mut system, mut layer, vp, settings, mut rng) = setup();
        system.insert(puff_at(-40.0, 100));
        system.insert(puff_at(40.0, 50));

        let frame = render_smoke(&system, &mut layer, &vp, &settings, &mut rng).unwrap();

        assert_eq!(frame, SmokeFrame { drawn: 2, skipped: 0 });
        assert!(layer.painted() > 0);
    }

    #[test]
    fn tiny_particles_are_skipped_but_stay_alive() {
        let (mut system, mut layer, vp, settings, mut rng) = setup();
        // 8.0 * 5 / 100 = 0.4, under the 0.5 threshold.
        system.insert(puff_at(0.0, 5));

        let frame = render_smoke(&system, &mut layer, &vp, &settings, &mut rng).unwrap();

        assert_eq!(frame, SmokeFrame { drawn: 0, skipped: 1 });
        assert_eq!(layer.painted(), 0);
        assert_eq!(system.len(), 1);
    }

    #[test]
    fn stale_smoke_is_wiped_each_frame() {
        let (mut system, mut layer, vp, settings, mut rng) = setup();
        system.insert(puff_at(0.0, 100));
        render_smoke(&system, &mut layer, &vp, &settings, &mut rng).unwrap();
        assert!(layer.painted() > 0);

        let (empty, ..) = setup();
        render_smoke(&empty, &mut layer, &vp, &settings, &mut rng).unwrap();
        assert_eq!(layer.painted(), 0);
    }

    #[test]
    fn puff_orientation_changes_between_frames() {
        let (mut system, mut layer, vp, settings, mut rng) = setup();
        // Large enough that a few degrees of rotation moves whole pixels.
        system.insert(SmokeParticle::new(Vec2::default(), Vec2::default(), 40.0, 100));

        render_smoke(&system, &mut layer, &vp, &settings, &mut rng).unwrap();
        let first = layer.clone();

        let mut changed = false;
        for _ in 0..4 {
            render_smoke(&system, &mut layer, &vp, &settings, &mut rng).unwrap();
            changed |= layer != first;
        }
        assert!(changed);
    }

    #[test]
    fn older_particles_are_fainter() {
        let (mut system, mut layer, vp, settings, mut rng) = setup();
        system.insert(puff_at(0.0, 50));

        render_smoke(&system, &mut layer, &vp, &settings, &mut rng).unwrap();

        // 0.8 * 0.5 of full alpha.
        let max_alpha = (0..200)
            .flat_map(|x| (0..200).map(move |y| (x, y)))
            .map(|(x, y)| layer.alpha_at(embedded_graphics::prelude::Point::new(x, y)))
            .max();
        assert_eq!(max_alpha, Some(102));
    }
}
