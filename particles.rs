//! particles - Smoke particles: spawn, advect, age, cull
//! No heap allocation, no_std compatible
//!
//! Particles live in a bounded FIFO ordered by spawn time. They leave it
//! either by natural expiry (`life` reaches zero) or by eviction when the
//! live set grows past the configured cap.

use heapless::Deque;
use log::{debug, trace};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::geometry::Vec2;
use crate::settings::Settings;

/// Compile-time upper bound for `Settings::max_particles`.
pub const SMOKE_CAPACITY: usize = 128;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SmokeParticle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    /// Remaining ticks.
    pub life: u32,
    pub max_life: u32,
}

impl SmokeParticle {
    pub fn new(position: Vec2, velocity: Vec2, radius: f32, max_life: u32) -> Self {
        Self {
            position,
            velocity,
            radius,
            life: max_life,
            max_life,
        }
    }

    /// Remaining fraction of the lifetime, 1 when fresh and 0 when spent.
    pub fn life_fraction(&self) -> f32 {
        if self.max_life == 0 {
            return 0.0;
        }
        self.life as f32 / self.max_life as f32
    }

    pub fn opacity(&self, initial_alpha: f32) -> f32 {
        (self.life_fraction() * initial_alpha).clamp(0.0, 1.0)
    }

    /// Drawn radius; shrinks with the same curve as the opacity fades.
    pub fn visual_radius(&self) -> f32 {
        self.radius * self.life_fraction()
    }

    /// One tick of linear advection and ageing.
    pub fn advance(&mut self) {
        self.position += self.velocity;
        self.life = self.life.saturating_sub(1);
    }

    pub fn is_expired(&self) -> bool {
        self.life == 0
    }
}

/// What happened to the live set during one tick.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct StepReport {
    pub spawned: bool,
    pub expired: usize,
    pub evicted: usize,
}

pub struct ParticleSystem<const N: usize> {
    particles: Deque<SmokeParticle, N>,
    origin: Vec2,
    ticks: u64,
    rng: SmallRng,
    settings: Settings,
}

impl<const N: usize> ParticleSystem<N> {
    /// Panics if `settings.max_particles` is zero or exceeds `N`.
    pub fn new(settings: Settings, origin: Vec2) -> Self {
        assert!(
            settings.max_particles >= 1 && settings.max_particles <= N,
            "max_particles must lie in 1..={}",
            N
        );
        assert!(settings.spawn_interval > 0, "spawn_interval must be non-zero");

        Self {
            particles: Deque::new(),
            origin,
            ticks: 0,
            rng: SmallRng::seed_from_u64(settings.rng_seed),
            settings,
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Ticks stepped so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Live particles, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &SmokeParticle> {
        self.particles.iter()
    }

    /// Builds a fresh particle at `origin` with jitter, drift and lifetime
    /// drawn from the configured ranges.
    pub fn spawn(&mut self, origin: Vec2) -> SmokeParticle {
        let s = &self.settings;
        let jitter = s.smoke_jitter;
        let position = Vec2::new(
            origin.x + self.rng.gen_range(-jitter..=jitter),
            origin.y + self.rng.gen_range(-jitter..=jitter),
        );
        let velocity = Vec2::new(
            self.rng.gen_range(s.smoke_drift_min..=s.smoke_drift_max),
            self.rng.gen_range(s.smoke_rise_min..=s.smoke_rise_max),
        );
        let radius = self.rng.gen_range(s.smoke_radius_min..=s.smoke_radius_max);
        let max_life = self.rng.gen_range(s.smoke_life_min..=s.smoke_life_max);

        SmokeParticle::new(position, velocity, radius, max_life)
    }

    /// Appends `particle` and returns the particle evicted to stay within
    /// the cap, if any.
    pub fn insert(&mut self, particle: SmokeParticle) -> Option<SmokeParticle> {
        let evicted = if self.particles.len() >= self.settings.max_particles {
            self.particles.pop_front()
        } else {
            None
        };
        if let Some(oldest) = &evicted {
            debug!(
                "evicting oldest smoke particle with {} of {} ticks left",
                oldest.life, oldest.max_life
            );
        }
        // Cannot fail: the cap never exceeds N and we just made room.
        let _ = self.particles.push_back(particle);
        evicted
    }

    /// Ages every live particle by one tick and drops the spent ones.
    pub fn advance(&mut self) -> usize {
        let mut expired = 0;
        // PERF: rotate through the ring instead of rebuilding it
        for _ in 0..self.particles.len() {
            if let Some(mut p) = self.particles.pop_front() {
                p.advance();
                if p.is_expired() {
                    expired += 1;
                } else {
                    let _ = self.particles.push_back(p);
                }
            }
        }
        expired
    }

    /// One scheduler tick: advance, then spawn on the cadence.
    pub fn step(&mut self) -> StepReport {
        self.ticks += 1;
        let mut report = StepReport {
            expired: self.advance(),
            ..StepReport::default()
        };

        if self.ticks % self.settings.spawn_interval as u64 == 0 {
            let particle = self.spawn(self.origin);
            debug!(
                "spawned smoke particle at ({:.1}, {:.1}) living {} ticks",
                particle.position.x, particle.position.y, particle.max_life
            );
            report.spawned = true;
            if self.insert(particle).is_some() {
                report.evicted += 1;
            }
        }

        trace!(
            "smoke tick {}: {} live, {} expired, spawned {}",
            self.ticks,
            self.particles.len(),
            report.expired,
            report.spawned
        );
        report
    }
}
