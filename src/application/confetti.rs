//! Decorative particle burst shown when a result arrives.
//!
//! Purely cosmetic: nothing here can fail, and the controller never waits
//! on it.

use std::time::{Duration, Instant};

use rand::Rng;

use super::animation::Easing;

/// Particle palette as RGB.
pub const PALETTE: [(u8, u8, u8); 5] = [
    (0x34, 0xd3, 0x99),
    (0x22, 0xd3, 0xee),
    (0x7c, 0x3a, 0xed),
    (0xfb, 0xbf, 0x24),
    (0xf8, 0x71, 0x71),
];

/// Upper bound on live particles.
pub const MAX_PARTICLES: usize = 64;

const MOVE_DURATION: Duration = Duration::from_millis(900);
const FADE_DURATION: Duration = Duration::from_millis(1200);
/// Particles are dropped after this long.
pub const PARTICLE_LIFETIME: Duration = Duration::from_millis(1300);

/// Number of particles for a confidence score: `12 + round(confidence / 10)`.
#[must_use]
pub fn particle_count(confidence: f64) -> usize {
    let confidence = if confidence.is_finite() { confidence } else { 0.0 };
    let count = 12.0 + (confidence / 10.0).round();
    (count.max(0.0) as usize).min(MAX_PARTICLES)
}

#[derive(Debug, Clone)]
struct Particle {
    /// Horizontal start, percent of width
    x_pct: f64,
    /// Vertical landing spot, percent of height
    end_y_pct: f64,
    /// Horizontal drift in pixels
    drift_px: f64,
    size_px: f64,
    color: (u8, u8, u8),
    round: bool,
    start_rotation: f64,
    end_rotation: f64,
    born: Instant,
}

/// Interpolated state of one particle, ready to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleFrame {
    pub x_pct: f64,
    pub y_pct: f64,
    /// Horizontal drift so far, in pixels
    pub drift_px: f64,
    pub size_px: f64,
    pub color: (u8, u8, u8),
    pub round: bool,
    pub rotation_deg: f64,
    pub opacity: f64,
}

const START_Y_PCT: f64 = 10.0;
const START_OPACITY: f64 = 0.95;

/// Live particles.
#[derive(Debug, Clone, Default)]
pub struct ParticleBurst {
    particles: Vec<Particle>,
}

impl ParticleBurst {
    /// Spawn a burst sized by `confidence`.
    pub fn burst<R: Rng>(&mut self, confidence: f64, now: Instant, rng: &mut R) {
        let count = particle_count(confidence);
        let room = MAX_PARTICLES.saturating_sub(self.particles.len());
        for _ in 0..count.min(room) {
            self.particles.push(Particle {
                x_pct: 50.0 + rng.gen_range(-10.0_f64..10.0),
                end_y_pct: 80.0 + rng.gen_range(0.0_f64..10.0),
                drift_px: rng.gen_range(-100.0_f64..100.0),
                size_px: 6.0 + rng.gen_range(0.0_f64..6.0),
                color: PALETTE[rng.gen_range(0..PALETTE.len())],
                round: rng.gen_bool(0.5),
                start_rotation: rng.gen_range(0.0_f64..360.0),
                end_rotation: rng.gen_range(-360.0_f64..360.0),
                born: now,
            });
        }
    }

    /// Drop expired particles.
    pub fn tick(&mut self, now: Instant) {
        self.particles
            .retain(|p| now.saturating_duration_since(p.born) < PARTICLE_LIFETIME);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Positions of every live particle at `now`.
    pub fn frames(&self, now: Instant) -> impl Iterator<Item = ParticleFrame> + '_ {
        self.particles.iter().map(move |p| {
            let age = now.saturating_duration_since(p.born).as_secs_f64();
            let moved = Easing::Ease.apply(age / MOVE_DURATION.as_secs_f64());
            let faded = Easing::Ease.apply(age / FADE_DURATION.as_secs_f64());
            ParticleFrame {
                x_pct: p.x_pct,
                y_pct: START_Y_PCT + (p.end_y_pct - START_Y_PCT) * moved,
                drift_px: p.drift_px * moved,
                size_px: p.size_px,
                color: p.color,
                round: p.round,
                rotation_deg: p.start_rotation + (p.end_rotation - p.start_rotation) * moved,
                opacity: START_OPACITY * (1.0 - faded),
            }
        })
    }
}
