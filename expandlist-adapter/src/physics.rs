//! Release handling and trajectory playback.
//!
//! A release either snaps to the nearest row or flings. Flings are planned twice: once
//! against the full scroll range to find where the content would naturally come to rest,
//! then again bounded by the row boundary in the direction of travel, so every fling ends
//! exactly on a row.

use expandlist::ViewportState;

use crate::{ControllerError, Easing, FlingSpline, PhysicsOptions, Ticker, Tween};

/// Springback deceleration, px/s².
const SETTLE_GRAVITY: f64 = 2000.0;

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Motion {
    /// An eased tween straight to the target.
    Scroll { easing: Easing },
    /// A spline fling, possibly cut short at a bound.
    Fling {
        spline_distance: i64,
        spline_duration_ms: u64,
    },
}

/// One armed trajectory. Plans are replaced wholesale, never edited in place.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlingPlan {
    pub start_offset: i64,
    /// Offset velocity in px/s; positive moves the content towards the end of the list.
    pub start_velocity: f32,
    pub start_ms: u64,
    pub duration_ms: u64,
    pub lower: i64,
    pub upper: i64,
    /// Where the trajectory comes to rest.
    pub target_offset: i64,
    pub motion: Motion,
}

impl FlingPlan {
    pub fn scroll(from: i64, to: i64, start_ms: u64, duration_ms: u64, easing: Easing) -> Self {
        Self {
            start_offset: from,
            start_velocity: 0.0,
            start_ms,
            duration_ms: duration_ms.max(1),
            lower: from.min(to),
            upper: from.max(to),
            target_offset: to,
            motion: Motion::Scroll { easing },
        }
    }

    /// Plans a fling from `start` at `velocity` px/s, stopping at `lower` or `upper`.
    pub fn fling(
        spline: &FlingSpline,
        start: i64,
        velocity: f32,
        lower: i64,
        upper: i64,
        start_ms: u64,
    ) -> Self {
        if start < lower || start > upper {
            let edge = start.clamp(lower, upper);
            let delta = (start - edge).unsigned_abs() as f64;
            let duration_ms = (1000.0 * (2.0 * delta / SETTLE_GRAVITY).sqrt()) as u64;
            let mut plan = Self::scroll(start, edge, start_ms, duration_ms, Easing::SmoothStep);
            plan.start_velocity = velocity;
            return plan;
        }

        let spline_duration_ms = spline.duration_ms(velocity);
        let spline_distance = (spline.distance(velocity) * velocity.signum() as f64) as i64;
        let natural = start.saturating_add(spline_distance);
        let target_offset = natural.clamp(lower, upper);

        let mut duration_ms = spline_duration_ms;
        if target_offset != natural && spline_distance != 0 {
            let fraction = ((target_offset - start) as f64 / spline_distance as f64).abs();
            duration_ms = (duration_ms as f64 * spline.time_at(fraction)) as u64;
        }

        Self {
            start_offset: start,
            start_velocity: velocity,
            start_ms,
            duration_ms,
            lower,
            upper,
            target_offset,
            motion: Motion::Fling {
                spline_distance,
                spline_duration_ms,
            },
        }
    }

    pub fn is_done(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.start_ms) >= self.duration_ms
    }

    pub fn sample(&self, spline: &FlingSpline, now_ms: u64) -> i64 {
        if self.is_done(now_ms) {
            return self.target_offset;
        }
        let elapsed = now_ms.saturating_sub(self.start_ms);
        match self.motion {
            Motion::Scroll { easing } => Tween::new(
                self.start_offset,
                self.target_offset,
                self.start_ms,
                self.duration_ms,
                easing,
            )
            .sample(now_ms),
            Motion::Fling {
                spline_distance,
                spline_duration_ms,
            } => {
                let t = elapsed as f64 / spline_duration_ms.max(1) as f64;
                let travelled = (spline.position_at(t) * spline_distance as f64).round() as i64;
                self.start_offset
                    .saturating_add(travelled)
                    .clamp(self.lower, self.upper)
            }
        }
    }
}

/// Bounds that stop a fling on the row boundary nearest to `natural` in the direction of
/// travel.
///
/// Moving towards the end of the list (`velocity > 0`) rounds the resting row down and caps
/// the fling there; moving back rounds up and floors the fling there.
pub fn directional_bounds(natural: i64, velocity: f32, viewport: &ViewportState) -> (i64, i64) {
    let row = viewport.min_row_height().max(1) as i64;
    let max = viewport.max_scroll_offset();
    let natural = natural.clamp(0, max);
    let rows = if velocity > 0.0 {
        natural.div_euclid(row)
    } else {
        natural.div_euclid(row) + i64::from(natural.rem_euclid(row) != 0)
    };
    let index = (rows.max(0) as usize).min(viewport.count());
    let target = viewport.row_offset(index);
    if velocity > 0.0 { (0, target) } else { (target, max) }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PhysicsPhase {
    #[default]
    Idle,
    Settling,
}

/// One animation frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickSample {
    pub offset: i64,
    /// The trajectory reached its target; no further ticks are scheduled.
    pub finished: bool,
}

/// Owns the active trajectory and the ticker that plays it back.
#[derive(Clone, Debug)]
pub struct ScrollPhysics {
    options: PhysicsOptions,
    spline: FlingSpline,
    ticker: Ticker,
    plan: Option<FlingPlan>,
}

impl ScrollPhysics {
    pub fn new(options: PhysicsOptions) -> Result<Self, ControllerError> {
        options.validate()?;
        Ok(Self {
            options,
            spline: FlingSpline::new(options.friction, options.density),
            ticker: Ticker::new(options.tick_interval_ms),
            plan: None,
        })
    }

    pub fn options(&self) -> &PhysicsOptions {
        &self.options
    }

    pub fn spline(&self) -> &FlingSpline {
        &self.spline
    }

    pub fn phase(&self) -> PhysicsPhase {
        if self.plan.is_some() {
            PhysicsPhase::Settling
        } else {
            PhysicsPhase::Idle
        }
    }

    pub fn is_settling(&self) -> bool {
        self.plan.is_some()
    }

    pub fn plan(&self) -> Option<&FlingPlan> {
        self.plan.as_ref()
    }

    /// When the host should next call [`Self::tick`].
    pub fn next_tick_at(&self) -> Option<u64> {
        self.ticker.due_at()
    }

    /// Plans the motion after the finger lifts.
    ///
    /// `velocity` is the finger velocity in tracker units; the content moves against it.
    /// Returns `None` when the list already rests on a row.
    pub fn release(
        &mut self,
        viewport: &ViewportState,
        offset: i64,
        velocity: f32,
        now_ms: u64,
    ) -> Option<&FlingPlan> {
        self.force_stop();

        if velocity.is_nan() || velocity.abs() < self.options.fling_velocity_threshold {
            let target = viewport
                .snap_index(offset)
                .map_or(0, |index| viewport.row_offset(index));
            return self.snap(viewport, offset, target, now_ms);
        }

        let velocity = -velocity;
        let max = viewport.max_scroll_offset();
        let natural = FlingPlan::fling(&self.spline, offset, velocity, 0, max, now_ms).target_offset;
        let (lower, upper) = directional_bounds(natural, velocity, viewport);
        let plan = FlingPlan::fling(&self.spline, offset, velocity, lower, upper, now_ms);
        adebug!(
            offset,
            velocity,
            natural,
            lower,
            upper,
            target = plan.target_offset,
            duration_ms = plan.duration_ms,
            "fling"
        );
        Some(self.arm(plan, now_ms))
    }

    /// Plans an eased scroll from `offset` to `target`, timed by the number of rows crossed.
    pub fn snap(
        &mut self,
        viewport: &ViewportState,
        offset: i64,
        target: i64,
        now_ms: u64,
    ) -> Option<&FlingPlan> {
        self.force_stop();
        if offset == target {
            return None;
        }
        let row = viewport.min_row_height().max(1) as f64;
        let rows = (target - offset).unsigned_abs() as f64 / row;
        let duration_ms = (rows * self.options.snap_ms_per_row as f64) as u64;
        let plan = FlingPlan::scroll(offset, target, now_ms, duration_ms, self.options.snap_easing);
        adebug!(offset, target, duration_ms = plan.duration_ms, "snap");
        Some(self.arm(plan, now_ms))
    }

    fn arm(&mut self, plan: FlingPlan, now_ms: u64) -> &FlingPlan {
        self.ticker.schedule(now_ms);
        self.plan.insert(plan)
    }

    /// Drops the trajectory and cancels the pending tick.
    pub fn force_stop(&mut self) {
        if self.plan.take().is_some() {
            atrace!("force_stop");
        }
        self.ticker.cancel();
    }

    /// Samples the trajectory if a tick is due at `now_ms`.
    pub fn tick(&mut self, now_ms: u64) -> Option<TickSample> {
        if !self.ticker.is_due(now_ms) {
            return None;
        }
        let Some(plan) = self.plan else {
            self.ticker.cancel();
            return None;
        };

        let offset = plan.sample(&self.spline, now_ms);
        let finished = plan.is_done(now_ms);
        if finished {
            self.plan = None;
            self.ticker.cancel();
        } else {
            self.ticker.reschedule(now_ms);
        }
        atrace!(now_ms, offset, finished, "tick");
        Some(TickSample { offset, finished })
    }
}
