use expandlist::{
    ExpandList, ItemSource, LayoutPass, ListListener, Rect, ScrollDirection, ViewportState,
};

use crate::{
    ControllerError, ControllerOptions, GestureAction, GestureInterpreter, GesturePhase,
    PointerEvent, ScrollPhysics,
};

/// A framework-neutral controller that wires an [`ExpandList`] to pointer input and
/// momentum scrolling.
///
/// The controller does not hold any UI objects beyond the visuals the item source builds.
/// Adapters drive it by calling:
/// - `on_size_changed` from the host layout pass
/// - `on_pointer` for every touch event
/// - `tick(now_ms)` whenever `next_tick_at()` is due
///
/// Every call that moves the content runs a layout pass before returning, so slot positions
/// are always current when the host renders.
pub struct Controller<S: ItemSource, L = ()> {
    list: ExpandList<S::Visual>,
    source: S,
    listener: L,
    physics: ScrollPhysics,
    gestures: GestureInterpreter,
    attached: bool,
    // Sub-pixel finger movement not yet applied to the offset.
    drag_remainder: f32,
}

impl<S: ItemSource, L> core::fmt::Debug for Controller<S, L> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Controller")
            .field("scroll_offset", &self.list.scroll_offset())
            .field("visible_range", &self.list.visible_range())
            .field("physics", &self.physics.phase())
            .field("gesture", &self.gestures.phase())
            .field("attached", &self.attached)
            .finish_non_exhaustive()
    }
}

impl<S, L> Controller<S, L>
where
    S: ItemSource,
    L: ListListener<S::Visual>,
{
    pub fn new(options: ControllerOptions, source: S, listener: L) -> Result<Self, ControllerError> {
        options.validate()?;
        let mut list = ExpandList::new(options.list)?;
        list.set_count(source.count());
        adebug!(count = list.count(), "controller created");
        Ok(Self {
            list,
            source,
            listener,
            physics: ScrollPhysics::new(options.physics)?,
            gestures: GestureInterpreter::new(options.gesture, options.physics.velocity_units_ms),
            attached: true,
            drag_remainder: 0.0,
        })
    }

    pub fn list(&self) -> &ExpandList<S::Visual> {
        &self.list
    }

    /// Direct access to the list. Call [`Self::layout`] after mutating it.
    pub fn list_mut(&mut self) -> &mut ExpandList<S::Visual> {
        &mut self.list
    }

    pub fn viewport(&self) -> &ViewportState {
        self.list.viewport()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    pub fn physics(&self) -> &ScrollPhysics {
        &self.physics
    }

    pub fn gestures(&self) -> &GestureInterpreter {
        &self.gestures
    }

    pub fn into_parts(self) -> (ExpandList<S::Visual>, S, L) {
        (self.list, self.source, self.listener)
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn is_animating(&self) -> bool {
        self.physics.is_settling()
    }

    pub fn scroll_offset(&self) -> i64 {
        self.list.scroll_offset()
    }

    /// When the host should next call [`Self::tick`], if an animation is running.
    pub fn next_tick_at(&self) -> Option<u64> {
        self.physics.next_tick_at()
    }

    /// Lays out if any state changed since the last pass.
    pub fn layout(&mut self) -> Option<LayoutPass> {
        self.list
            .layout_if_needed(&mut self.source, &mut self.listener)
    }

    pub fn on_size_changed(&mut self, rect: Rect) -> Option<LayoutPass> {
        self.list.set_viewport_size(rect);
        self.layout()
    }

    /// Swaps the item source and re-renders every visible item through the new one.
    pub fn set_source(&mut self, source: S) -> S {
        let old = core::mem::replace(&mut self.source, source);
        self.list.notify_data_set_changed();
        self.layout();
        old
    }

    /// Re-renders every visible item after the source's data changed.
    pub fn notify_data_set_changed(&mut self) -> Option<LayoutPass> {
        self.list.notify_data_set_changed();
        self.layout()
    }

    /// Jumps so that `index` is the expanded top card. Returns the applied offset.
    pub fn scroll_to_index(&mut self, index: usize) -> i64 {
        self.physics.force_stop();
        let offset = self.list.scroll_to_index(index, &mut self.listener);
        self.layout();
        offset
    }

    /// Animates to `index` as a snap would. Returns the target offset.
    ///
    /// Nothing is animated while detached or while a finger is down.
    pub fn smooth_scroll_to_index(&mut self, index: usize, now_ms: u64) -> i64 {
        let target = self.list.viewport().row_offset(index);
        if self.attached && self.gestures.phase() == GesturePhase::Idle {
            self.physics
                .snap(self.list.viewport(), self.list.scroll_offset(), target, now_ms);
        }
        target
    }

    pub fn attach(&mut self) {
        self.attached = true;
    }

    /// Stops every animation and forgets the touch sequence in progress. Pointer events
    /// and ticks are ignored until [`Self::attach`].
    pub fn detach(&mut self) {
        adebug!("detach");
        self.attached = false;
        self.physics.force_stop();
        self.gestures.reset();
        self.drag_remainder = 0.0;
    }

    pub fn on_pointer(&mut self, event: PointerEvent) -> GestureAction {
        if !self.attached {
            return GestureAction::None;
        }
        let action = self.gestures.on_event(event);
        match action {
            GestureAction::None => {}
            GestureAction::Pressed => {
                self.physics.force_stop();
                self.drag_remainder = 0.0;
            }
            GestureAction::Drag { delta_y } => self.drag(delta_y),
            GestureAction::Tap { y } => {
                if let Some(index) = self.list.item_at(y) {
                    adebug!(index, y, "item clicked");
                    self.listener.on_item_clicked(index);
                }
            }
            GestureAction::Release { velocity_y } => {
                self.list.set_count(self.source.count());
                let started = self
                    .physics
                    .release(
                        self.list.viewport(),
                        self.list.scroll_offset(),
                        velocity_y,
                        event.time_ms,
                    )
                    .is_some();
                if started {
                    self.tick(event.time_ms);
                }
            }
        }
        action
    }

    fn drag(&mut self, delta_y: f32) {
        self.physics.force_stop();
        match ScrollDirection::from_delta(delta_y) {
            Some(ScrollDirection::Up) => self.listener.on_scroll_up(),
            Some(ScrollDirection::Down) => self.listener.on_scroll_down(),
            None => {}
        }

        let pending = self.drag_remainder + delta_y;
        let whole = pending.trunc();
        self.drag_remainder = pending - whole;
        if whole != 0.0 {
            self.list.scroll_by(-(whole as i64), &mut self.listener);
            self.layout();
        }
    }

    /// Advances the running animation. Returns the new offset when a frame was applied.
    pub fn tick(&mut self, now_ms: u64) -> Option<i64> {
        if !self.attached {
            return None;
        }
        let sample = self.physics.tick(now_ms)?;
        self.list
            .set_scroll_offset(sample.offset, &mut self.listener);
        self.layout();
        Some(self.list.scroll_offset())
    }
}
