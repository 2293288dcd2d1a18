//! Pointer velocity estimation.
//!
//! Velocity is estimated with the impulse strategy: each pair of consecutive samples
//! contributes the kinetic energy needed to move from the previous velocity estimate to
//! the pair's own velocity.

const HISTORY: usize = 20;

/// Samples older than this (relative to the newest) are ignored.
pub const HORIZON_MS: u64 = 100;

/// A gap this long between two samples means the pointer stopped in between.
pub const ASSUME_STOPPED_MS: u64 = 40;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Sample {
    time_ms: u64,
    x: f32,
    y: f32,
}

/// A two-axis velocity, in pixels per `units` milliseconds (see [`VelocityTracker::velocity`]).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
}

/// Tracks recent pointer positions and estimates the release velocity.
#[derive(Clone, Debug)]
pub struct VelocityTracker {
    samples: [Sample; HISTORY],
    len: usize,
    // Next write slot.
    head: usize,
}

impl Default for VelocityTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self {
            samples: [Sample::default(); HISTORY],
            len: 0,
            head: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.len = 0;
        self.head = 0;
    }

    pub fn add(&mut self, time_ms: u64, x: f32, y: f32) {
        self.samples[self.head] = Sample { time_ms, x, y };
        self.head = (self.head + 1) % HISTORY;
        self.len = (self.len + 1).min(HISTORY);
    }

    /// Estimated velocity in pixels per `units_ms` milliseconds.
    ///
    /// `units_ms = 1000` yields pixels per second. Returns zero with fewer than two usable
    /// samples.
    pub fn velocity(&self, units_ms: u32) -> Velocity {
        let (samples, len) = self.window();
        let window = &samples[..len];
        let scale = units_ms as f32;
        Velocity {
            x: impulse_velocity(window, |s| s.x) * scale,
            y: impulse_velocity(window, |s| s.y) * scale,
        }
    }

    /// Usable samples, oldest first, and how many there are.
    fn window(&self) -> ([Sample; HISTORY], usize) {
        let mut out = [Sample::default(); HISTORY];
        let Some(newest) = self.nth_newest(0) else {
            return (out, 0);
        };
        let mut len = 0;
        let mut previous = newest;
        while let Some(sample) = self.nth_newest(len) {
            let age = newest.time_ms.saturating_sub(sample.time_ms);
            let gap = previous.time_ms.saturating_sub(sample.time_ms);
            if age > HORIZON_MS || gap > ASSUME_STOPPED_MS {
                break;
            }
            out[len] = sample;
            len += 1;
            previous = sample;
        }
        out[..len].reverse();
        (out, len)
    }

    fn nth_newest(&self, n: usize) -> Option<Sample> {
        if n >= self.len {
            return None;
        }
        let index = (self.head + HISTORY - 1 - n) % HISTORY;
        Some(self.samples[index])
    }
}

/// Pixels per millisecond along one axis of `window` (oldest first).
fn impulse_velocity(window: &[Sample], axis: impl Fn(&Sample) -> f32) -> f32 {
    if window.len() < 2 {
        return 0.0;
    }
    let mut work = 0.0f32;
    for (k, pair) in window.windows(2).enumerate() {
        let dt = pair[1].time_ms.saturating_sub(pair[0].time_ms) as f32;
        if dt == 0.0 {
            continue;
        }
        let v = (axis(&pair[1]) - axis(&pair[0])) / dt;
        work += (v - energy_to_velocity(work)) * v.abs();
        if k == 0 {
            work *= 0.5;
        }
    }
    energy_to_velocity(work)
}

// E = v^2 / 2 with unit mass.
fn energy_to_velocity(energy: f32) -> f32 {
    energy.signum() * (2.0 * energy.abs()).sqrt()
}
