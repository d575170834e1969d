//! main.rs - Desktop window for the cabin scene
//! Builds the static scene once, then hands the animation to the tick loop.

use std::error::Error;
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use log::info;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use cabin_scene::{build_scene, Animator, Clock, Settings, Surfaces, TickControl, TickScheduler};

const STATS_EVERY: u64 = 100;

/// Wall clock backed by `Instant`.
struct StdClock {
    origin: Instant,
}

impl StdClock {
    fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Clock for StdClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Fresh randomness every run.
    let settings = match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(since_epoch) => Settings::default().with_time_seed(since_epoch),
        Err(_) => Settings::default(),
    };
    settings.validate()?;

    let mut surfaces = Surfaces::new(&settings);
    let viewport = surfaces.viewport;
    let mut scene_rng = SmallRng::seed_from_u64(settings.rng_seed);
    let anchors = build_scene(&mut surfaces.canvas, &viewport, &settings, &mut scene_rng)?;
    info!(
        "scene built: smoke from ({:.1}, {:.1}), sun at ({:.1}, {:.1})",
        anchors.smoke_origin.x, anchors.smoke_origin.y, anchors.sun.center.x, anchors.sun.center.y
    );

    let mut animator = Animator::new(settings, &anchors)?;

    let mut display = SimulatorDisplay::<Rgb888>::new(viewport.size());
    let output_settings = OutputSettingsBuilder::new().scale(1).build();
    let mut window = Window::new("Cozy Cabin with Smoke", &output_settings);

    let mut scheduler = TickScheduler::new(
        StdClock::new(),
        Duration::from_millis(settings.tick_period_ms),
    );
    let mut failure = None;

    let fired = scheduler.run(|_| {
        let report = match animator.tick(&mut surfaces.canvas, &mut surfaces.smoke, &mut surfaces.rays) {
            Ok(report) => report,
            Err(e) => {
                failure = Some(e);
                return TickControl::Stop;
            }
        };

        // Commit the frame.
        if let Err(e) = surfaces.compose(&mut display) {
            failure = Some(e);
            return TickControl::Stop;
        }
        window.update(&display);

        if report.tick % STATS_EVERY == 0 {
            info!(
                "tick {}: {} smoke particles ({} drawn), window {:?}, rays {:?}",
                report.tick,
                animator.smoke().len(),
                report.frame.drawn,
                animator.window().state(),
                animator.sun().pulse()
            );
        }

        if window.events().any(|event| matches!(event, SimulatorEvent::Quit)) {
            TickControl::Stop
        } else {
            TickControl::Continue
        }
    });

    if let Some(e) = failure {
        return Err(e.into());
    }
    info!("window closed after {} ticks", fired);
    Ok(())
}
