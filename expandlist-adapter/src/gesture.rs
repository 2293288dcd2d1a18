use crate::{GestureOptions, Velocity, VelocityTracker};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Cancel,
}

/// A single pointer sample in view-local pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub x: f32,
    pub y: f32,
    pub time_ms: u64,
}

impl PointerEvent {
    pub fn new(phase: PointerPhase, x: f32, y: f32, time_ms: u64) -> Self {
        Self { phase, x, y, time_ms }
    }

    pub fn down(x: f32, y: f32, time_ms: u64) -> Self {
        Self::new(PointerPhase::Down, x, y, time_ms)
    }

    pub fn moved(x: f32, y: f32, time_ms: u64) -> Self {
        Self::new(PointerPhase::Move, x, y, time_ms)
    }

    pub fn up(x: f32, y: f32, time_ms: u64) -> Self {
        Self::new(PointerPhase::Up, x, y, time_ms)
    }

    pub fn cancel(x: f32, y: f32, time_ms: u64) -> Self {
        Self::new(PointerPhase::Cancel, x, y, time_ms)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GesturePhase {
    #[default]
    Idle,
    Dragging,
}

/// What a pointer event means for the list.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureAction {
    None,
    /// A touch sequence started; any running animation must stop.
    Pressed,
    /// The finger moved by `delta_y` pixels since the previous event.
    Drag { delta_y: f32 },
    /// The sequence ended as a tap at view-local `y`.
    Tap { y: f32 },
    /// The finger lifted after a drag, moving at `velocity_y` tracker units.
    Release { velocity_y: f32 },
}

/// Turns raw pointer events into taps, drags and releases.
#[derive(Clone, Debug)]
pub struct GestureInterpreter {
    options: GestureOptions,
    velocity_units_ms: u32,
    phase: GesturePhase,
    down_y: f32,
    last_y: f32,
    travel: f32,
    tracker: VelocityTracker,
}

impl GestureInterpreter {
    pub fn new(options: GestureOptions, velocity_units_ms: u32) -> Self {
        Self {
            options,
            velocity_units_ms,
            phase: GesturePhase::Idle,
            down_y: 0.0,
            last_y: 0.0,
            travel: 0.0,
            tracker: VelocityTracker::new(),
        }
    }

    pub fn options(&self) -> &GestureOptions {
        &self.options
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    /// Where the current sequence started.
    pub fn down_y(&self) -> f32 {
        self.down_y
    }

    /// Total finger travel in the current sequence.
    pub fn travel(&self) -> f32 {
        self.travel
    }

    pub fn velocity(&self) -> Velocity {
        self.tracker.velocity(self.velocity_units_ms)
    }

    /// Forgets the current touch sequence.
    pub fn reset(&mut self) {
        self.phase = GesturePhase::Idle;
        self.travel = 0.0;
        self.tracker.clear();
    }

    pub fn on_event(&mut self, event: PointerEvent) -> GestureAction {
        match event.phase {
            PointerPhase::Down => self.press(event),
            PointerPhase::Move => {
                if self.phase == GesturePhase::Idle {
                    return self.press(event);
                }
                self.tracker.add(event.time_ms, event.x, event.y);
                let delta_y = event.y - self.last_y;
                self.last_y = event.y;
                self.travel += delta_y.abs();
                GestureAction::Drag { delta_y }
            }
            PointerPhase::Up => {
                if self.phase == GesturePhase::Idle {
                    return GestureAction::None;
                }
                let action = match self.resolve_tap(event) {
                    Some(tap) => tap,
                    None => {
                        self.tracker.add(event.time_ms, event.x, event.y);
                        GestureAction::Release {
                            velocity_y: self.velocity().y,
                        }
                    }
                };
                self.reset();
                action
            }
            PointerPhase::Cancel => {
                if self.phase == GesturePhase::Idle {
                    return GestureAction::None;
                }
                let action = self.resolve_tap(event).unwrap_or(GestureAction::None);
                self.reset();
                action
            }
        }
    }

    fn press(&mut self, event: PointerEvent) -> GestureAction {
        self.reset();
        self.phase = GesturePhase::Dragging;
        self.down_y = event.y;
        self.last_y = event.y;
        self.tracker.add(event.time_ms, event.x, event.y);
        GestureAction::Pressed
    }

    /// A tap needs little travel and a near-still finger. The lift sample is not tracked.
    fn resolve_tap(&self, event: PointerEvent) -> Option<GestureAction> {
        let velocity = self.velocity();
        let still = velocity.x.abs() <= self.options.click_velocity
            && velocity.y.abs() <= self.options.click_velocity;
        if self.travel <= self.options.click_slop && still {
            adebug!(y = event.y, travel = self.travel, "tap");
            Some(GestureAction::Tap { y: event.y })
        } else {
            None
        }
    }
}
