//! The decelerating fling curve.
//!
//! Distance and duration follow a gravity based deceleration model; the position over time
//! follows a cubic spline with an inflexion point, sampled into lookup tables.

const SAMPLES: usize = 100;

const INFLEXION: f64 = 0.35;
const START_TENSION: f64 = 0.5;
const END_TENSION: f64 = 1.0;
const P1: f64 = START_TENSION * INFLEXION;
const P2: f64 = 1.0 - END_TENSION * (1.0 - INFLEXION);

/// `ln(0.78) / ln(0.9)`.
const DECELERATION_RATE: f64 = 2.358_201_7;

const GRAVITY_EARTH: f64 = 9.806_65;
const INCHES_PER_METER: f64 = 39.37;
const DPI_PER_DENSITY: f64 = 160.0;
const TUNING: f64 = 0.84;

// Bisection on a monotone cubic converges long before this.
const MAX_BISECTIONS: usize = 64;

/// Spline lookup tables plus the deceleration constants of one screen density.
#[derive(Clone, Debug)]
pub struct FlingSpline {
    positions: [f64; SAMPLES + 1],
    times: [f64; SAMPLES + 1],
    friction: f64,
    physical_coeff: f64,
}

impl FlingSpline {
    /// `friction` and `density` must be finite and positive.
    pub fn new(friction: f32, density: f32) -> Self {
        let (positions, times) = build_tables();
        Self {
            positions,
            times,
            friction: friction as f64,
            physical_coeff: GRAVITY_EARTH
                * INCHES_PER_METER
                * DPI_PER_DENSITY
                * density as f64
                * TUNING,
        }
    }

    fn deceleration(&self, velocity: f64) -> f64 {
        (INFLEXION * velocity.abs() / (self.friction * self.physical_coeff)).ln()
    }

    /// How long a fling at `velocity` px/s runs before coming to rest.
    pub fn duration_ms(&self, velocity: f32) -> u64 {
        if velocity == 0.0 {
            return 0;
        }
        let l = self.deceleration(velocity as f64);
        let ms = 1000.0 * (l / (DECELERATION_RATE - 1.0)).exp();
        if ms.is_finite() { ms.max(0.0) as u64 } else { 0 }
    }

    /// Unsigned distance a fling at `velocity` px/s travels.
    pub fn distance(&self, velocity: f32) -> f64 {
        if velocity == 0.0 {
            return 0.0;
        }
        let l = self.deceleration(velocity as f64);
        let d = self.friction
            * self.physical_coeff
            * (DECELERATION_RATE / (DECELERATION_RATE - 1.0) * l).exp();
        if d.is_finite() { d.max(0.0) } else { 0.0 }
    }

    /// Fraction of the total distance covered at time fraction `t`.
    pub fn position_at(&self, t: f64) -> f64 {
        lerp_table(&self.positions, t)
    }

    /// Fraction of the total duration needed to cover distance fraction `x`.
    pub fn time_at(&self, x: f64) -> f64 {
        lerp_table(&self.times, x)
    }
}

fn lerp_table(table: &[f64; SAMPLES + 1], x: f64) -> f64 {
    if x.is_nan() || x <= 0.0 {
        return 0.0;
    }
    let index = (SAMPLES as f64 * x) as usize;
    if index >= SAMPLES {
        return 1.0;
    }
    let x_inf = index as f64 / SAMPLES as f64;
    let x_sup = (index + 1) as f64 / SAMPLES as f64;
    let slope = (table[index + 1] - table[index]) / (x_sup - x_inf);
    table[index] + (x - x_inf) * slope
}

fn build_tables() -> ([f64; SAMPLES + 1], [f64; SAMPLES + 1]) {
    let mut positions = [0.0; SAMPLES + 1];
    let mut times = [0.0; SAMPLES + 1];

    let mut x_min = 0.0f64;
    let mut y_min = 0.0f64;
    for i in 0..SAMPLES {
        let alpha = i as f64 / SAMPLES as f64;

        let mut x_max = 1.0f64;
        let mut x = x_min;
        for _ in 0..MAX_BISECTIONS {
            x = x_min + (x_max - x_min) / 2.0;
            let tx = 3.0 * x * (1.0 - x) * ((1.0 - x) * P1 + x * P2) + x * x * x;
            if (tx - alpha).abs() < 1e-5 {
                break;
            }
            if tx > alpha {
                x_max = x;
            } else {
                x_min = x;
            }
        }
        positions[i] = 3.0 * x * (1.0 - x) * ((1.0 - x) * START_TENSION + x) + x * x * x;

        let mut y_max = 1.0f64;
        let mut y = y_min;
        for _ in 0..MAX_BISECTIONS {
            y = y_min + (y_max - y_min) / 2.0;
            let dy = 3.0 * y * (1.0 - y) * ((1.0 - y) * START_TENSION + y) + y * y * y;
            if (dy - alpha).abs() < 1e-5 {
                break;
            }
            if dy > alpha {
                y_max = y;
            } else {
                y_min = y;
            }
        }
        times[i] = 3.0 * y * (1.0 - y) * ((1.0 - y) * P1 + y * P2) + y * y * y;
    }
    positions[SAMPLES] = 1.0;
    times[SAMPLES] = 1.0;

    (positions, times)
}
