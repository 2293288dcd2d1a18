use expandlist::ExpandListOptions;

use crate::{ControllerError, Easing};

pub const DEFAULT_TICK_INTERVAL_MS: u64 = 20;
pub const DEFAULT_FLING_VELOCITY_THRESHOLD: f32 = 1500.0;
pub const DEFAULT_SNAP_MS_PER_ROW: u32 = 600;
pub const DEFAULT_FRICTION: f32 = 0.1;
pub const DEFAULT_VELOCITY_UNITS_MS: u32 = 1500;
pub const DEFAULT_CLICK_SLOP: f32 = 10.0;
pub const DEFAULT_CLICK_VELOCITY: f32 = 50.0;

/// Release and animation tuning.
///
/// Velocities are expressed in pixels per `velocity_units_ms` milliseconds, the unit the
/// velocity tracker reports in.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhysicsOptions {
    pub tick_interval_ms: u64,
    /// Releases slower than this snap to the nearest row instead of flinging.
    pub fling_velocity_threshold: f32,
    pub snap_ms_per_row: u32,
    pub friction: f32,
    pub density: f32,
    pub snap_easing: Easing,
    pub velocity_units_ms: u32,
}

impl Default for PhysicsOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsOptions {
    pub const fn new() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            fling_velocity_threshold: DEFAULT_FLING_VELOCITY_THRESHOLD,
            snap_ms_per_row: DEFAULT_SNAP_MS_PER_ROW,
            friction: DEFAULT_FRICTION,
            density: 1.0,
            snap_easing: Easing::Decelerate,
            velocity_units_ms: DEFAULT_VELOCITY_UNITS_MS,
        }
    }

    pub fn with_tick_interval_ms(mut self, tick_interval_ms: u64) -> Self {
        self.tick_interval_ms = tick_interval_ms;
        self
    }

    pub fn with_fling_velocity_threshold(mut self, threshold: f32) -> Self {
        self.fling_velocity_threshold = threshold;
        self
    }

    pub fn with_snap_ms_per_row(mut self, snap_ms_per_row: u32) -> Self {
        self.snap_ms_per_row = snap_ms_per_row;
        self
    }

    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }

    pub fn with_density(mut self, density: f32) -> Self {
        self.density = density;
        self
    }

    pub fn with_snap_easing(mut self, easing: Easing) -> Self {
        self.snap_easing = easing;
        self
    }

    pub fn with_velocity_units_ms(mut self, units_ms: u32) -> Self {
        self.velocity_units_ms = units_ms;
        self
    }

    pub fn validate(&self) -> Result<(), ControllerError> {
        if !self.friction.is_finite() || self.friction <= 0.0 {
            awarn!(friction = self.friction, "rejected friction");
            return Err(ControllerError::InvalidFriction(self.friction));
        }
        if !self.density.is_finite() || self.density <= 0.0 {
            awarn!(density = self.density, "rejected density");
            return Err(ControllerError::InvalidDensity(self.density));
        }
        if self.tick_interval_ms == 0 {
            awarn!("rejected zero tick interval");
            return Err(ControllerError::ZeroTickInterval);
        }
        if self.velocity_units_ms == 0 {
            awarn!("rejected zero velocity units");
            return Err(ControllerError::ZeroVelocityUnits);
        }
        Ok(())
    }
}

/// Tap recognition thresholds.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GestureOptions {
    /// Maximum finger travel, in pixels, for a touch sequence to count as a tap.
    pub click_slop: f32,
    /// Maximum speed on either axis, in tracker units, for a tap.
    pub click_velocity: f32,
}

impl Default for GestureOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureOptions {
    pub const fn new() -> Self {
        Self {
            click_slop: DEFAULT_CLICK_SLOP,
            click_velocity: DEFAULT_CLICK_VELOCITY,
        }
    }

    pub fn with_click_slop(mut self, click_slop: f32) -> Self {
        self.click_slop = click_slop;
        self
    }

    pub fn with_click_velocity(mut self, click_velocity: f32) -> Self {
        self.click_velocity = click_velocity;
        self
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControllerOptions {
    pub list: ExpandListOptions,
    pub physics: PhysicsOptions,
    pub gesture: GestureOptions,
}

impl ControllerOptions {
    pub fn new(list: ExpandListOptions) -> Self {
        Self {
            list,
            ..Self::default()
        }
    }

    pub fn with_physics(mut self, physics: PhysicsOptions) -> Self {
        self.physics = physics;
        self
    }

    pub fn with_gesture(mut self, gesture: GestureOptions) -> Self {
        self.gesture = gesture;
        self
    }

    pub fn validate(&self) -> Result<(), ControllerError> {
        self.list.validate()?;
        self.physics.validate()
    }
}
