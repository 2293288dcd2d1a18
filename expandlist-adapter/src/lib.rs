//! Adapter utilities for the `expandlist` crate.
//!
//! The `expandlist` crate is UI-agnostic and covers geometry, recycling and layout. This
//! crate adds the input side an adapter needs on top of it:
//!
//! - Pointer gesture interpretation (tap vs drag vs release)
//! - Velocity tracking
//! - Fling and snap physics that always come to rest on a row boundary
//! - A per-instance ticker that the host polls (no global animation clock)
//!
//! [`Controller`] wires all of it together; the pieces are public for adapters that want
//! to drive them separately.
//!
//! This crate is framework-agnostic and never reads a clock: every time-dependent call
//! takes the host's current time in milliseconds.
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod controller;
mod error;
mod gesture;
mod options;
mod physics;
mod spline;
mod ticker;
mod tween;
mod velocity;


pub use controller::Controller;
pub use error::ControllerError;
pub use gesture::{GestureAction, GestureInterpreter, GesturePhase, PointerEvent, PointerPhase};
pub use options::{
    ControllerOptions, DEFAULT_CLICK_SLOP, DEFAULT_CLICK_VELOCITY,
    DEFAULT_FLING_VELOCITY_THRESHOLD, DEFAULT_FRICTION, DEFAULT_SNAP_MS_PER_ROW,
    DEFAULT_TICK_INTERVAL_MS, DEFAULT_VELOCITY_UNITS_MS, GestureOptions, PhysicsOptions,
};
pub use physics::{FlingPlan, Motion, PhysicsPhase, ScrollPhysics, TickSample, directional_bounds};
pub use spline::FlingSpline;
pub use ticker::Ticker;
pub use tween::{Easing, Tween};
pub use velocity::{ASSUME_STOPPED_MS, HORIZON_MS, Velocity, VelocityTracker};
