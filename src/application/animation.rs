//! Timed transitions for the gauge arc.
//!
//! All functions take `now` explicitly so the animation is deterministic
//! under test.

use std::time::{Duration, Instant};

use crate::domain::TOTAL_ARC_LENGTH;

/// Easing curve of a transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    Linear,
    /// CSS `ease`
    Ease,
    /// CSS `cubic-bezier(x1, y1, x2, y2)`
    CubicBezier(f64, f64, f64, f64),
}

impl Easing {
    /// Fast start, long settle; used when a result arrives.
    pub const EMPHASIZED: Self = Self::CubicBezier(0.2, 0.8, 0.2, 1.0);

    /// Apply the easing function to a progress value (0.0 to 1.0).
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Ease => cubic_bezier(0.25, 0.1, 0.25, 1.0, t),
            Self::CubicBezier(x1, y1, x2, y2) => cubic_bezier(x1, y1, x2, y2, t),
        }
    }
}

/// Solve a unit cubic Bézier for `y` at horizontal position `x`.
fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, x: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    let sample = |p1: f64, p2: f64, t: f64| {
        let inv = 1.0 - t;
        3.0 * inv * inv * t * p1 + 3.0 * inv * t * t * p2 + t * t * t
    };

    // x(t) is monotonic for control points inside [0, 1]; bisect.
    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    let mut t = x;
    for _ in 0..48 {
        let xt = sample(x1, x2, t);
        if (xt - x).abs() < 1e-7 {
            break;
        }
        if xt < x {
            lo = t;
        } else {
            hi = t;
        }
        t = (lo + hi) / 2.0;
    }
    sample(y1, y2, t)
}

/// Duration and curve of a transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub duration: Duration,
    pub easing: Easing,
}

impl Transition {
    /// Result reveal: 0.9s emphasized
    pub const REVEAL: Self = Self {
        duration: Duration::from_millis(900),
        easing: Easing::EMPHASIZED,
    };

    /// Reset: 0.3s ease
    pub const RESET: Self = Self {
        duration: Duration::from_millis(300),
        easing: Easing::Ease,
    };
}

#[derive(Debug, Clone, Copy)]
struct Running {
    from: f64,
    started_at: Instant,
    transition: Transition,
}

/// Stroke offset of the gauge arc, animated between targets.
#[derive(Debug, Clone)]
pub struct GaugeArc {
    /// Value the current transition departs from (or rests at)
    from: f64,
    target: f64,
    running: Option<Running>,
    /// Armed target waiting for the next frame
    pending: Option<(f64, Transition)>,
}

impl Default for GaugeArc {
    fn default() -> Self {
        Self {
            from: TOTAL_ARC_LENGTH,
            target: TOTAL_ARC_LENGTH,
            running: None,
            pending: None,
        }
    }
}

impl GaugeArc {
    /// Start a transition towards `offset` right away.
    pub fn animate_to(&mut self, offset: f64, transition: Transition, now: Instant) {
        self.pending = None;
        self.from = self.offset_at(now);
        self.target = offset;
        self.running = Some(Running {
            from: self.from,
            started_at: now,
            transition,
        });
    }

    /// Arm a transition that starts on the next [`tick`](Self::tick), so
    /// the departure value is drawn at least once.
    pub fn animate_on_next_frame(&mut self, offset: f64, transition: Transition) {
        self.pending = Some((offset, transition));
    }

    /// Advance the animation clock.
    pub fn tick(&mut self, now: Instant) {
        if let Some((offset, transition)) = self.pending.take() {
            self.animate_to(offset, transition, now);
            return;
        }
        if let Some(running) = self.running {
            if now.saturating_duration_since(running.started_at) >= running.transition.duration {
                self.from = self.target;
                self.running = None;
            }
        }
    }

    /// Offset the transition will settle at (armed target included).
    #[must_use]
    pub fn target(&self) -> f64 {
        self.pending.map_or(self.target, |(offset, _)| offset)
    }

    /// Offset to draw at `now`.
    #[must_use]
    pub fn offset_at(&self, now: Instant) -> f64 {
        let Some(running) = self.running else {
            return self.from;
        };
        let duration = running.transition.duration.as_secs_f64();
        let elapsed = now
            .saturating_duration_since(running.started_at)
            .as_secs_f64();
        let progress = if duration <= 0.0 {
            1.0
        } else {
            elapsed / duration
        };
        let eased = running.transition.easing.apply(progress);
        running.from + (self.target - running.from) * eased
    }

    /// Filled fraction of the arc at `now`, 0.0 to 1.0.
    #[must_use]
    pub fn fill_at(&self, now: Instant) -> f64 {
        ((TOTAL_ARC_LENGTH - self.offset_at(now)) / TOTAL_ARC_LENGTH).clamp(0.0, 1.0)
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.running.is_some() || self.pending.is_some()
    }
}
