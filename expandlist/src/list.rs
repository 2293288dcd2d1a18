use crate::options::{validate_card_ratio, validate_min_row_height};
use crate::{
    ExpandListOptions, ItemSource, ListListener, OptionsError, Rect, Slot, SlotManager,
    SlotMetrics, SlotOrigin, ViewportState, VisibleRange, Visual,
};

/// What one layout pass did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LayoutPass {
    pub range: VisibleRange,
    /// Slots moved into the recycle pool.
    pub evicted: usize,
    /// Slots bound from a pooled visual.
    pub reused: usize,
    /// Slots bound from a freshly built visual.
    pub created: usize,
}

/// A headless expanding list.
///
/// The list owns the scroll offset, the viewport geometry and the live slots. Adapters
/// drive it by reporting viewport sizes and scroll offsets, then calling [`Self::layout`],
/// which measures and places every visible visual and fires ratio notifications.
///
/// State changes never lay out synchronously: setters only mark the list dirty, so a
/// listener callback can never observe a half-applied pass.
///
/// For momentum scrolling and pointer handling, see the `expandlist-adapter` crate.
#[derive(Clone, Debug)]
pub struct ExpandList<V> {
    options: ExpandListOptions,
    viewport: ViewportState,
    scroll_offset: i64,
    slots: SlotManager<V>,
    needs_layout: bool,
}

impl<V: Visual> ExpandList<V> {
    pub fn new(options: ExpandListOptions) -> Result<Self, OptionsError> {
        options.validate()?;
        let rect = options.initial_rect.unwrap_or_default();
        ldebug!(
            min_row_height = options.min_row_height,
            card_ratio = options.card_ratio,
            width = rect.width,
            height = rect.height,
            "ExpandList::new"
        );
        Ok(Self {
            viewport: ViewportState::new(
                rect.width,
                rect.height,
                0,
                options.min_row_height,
                options.card_ratio,
            ),
            scroll_offset: options.initial_offset,
            slots: SlotManager::new(),
            options,
            needs_layout: true,
        })
    }

    pub fn options(&self) -> &ExpandListOptions {
        &self.options
    }

    pub fn viewport(&self) -> &ViewportState {
        &self.viewport
    }

    pub fn count(&self) -> usize {
        self.viewport.count()
    }

    pub fn needs_layout(&self) -> bool {
        self.needs_layout
    }

    pub fn request_layout(&mut self) {
        self.needs_layout = true;
    }

    pub fn set_viewport_size(&mut self, rect: Rect) {
        if self.viewport.width() == rect.width && self.viewport.height() == rect.height {
            return;
        }
        ldebug!(width = rect.width, height = rect.height, "set_viewport_size");
        self.viewport
            .set_size(rect.width, rect.height, self.options.card_ratio);
        self.needs_layout = true;
    }

    pub fn set_count(&mut self, count: usize) {
        if self.viewport.count() == count {
            return;
        }
        ldebug!(from = self.viewport.count(), to = count, "set_count");
        self.viewport.set_count(count);
        self.needs_layout = true;
    }

    pub fn set_min_row_height(&mut self, min_row_height: u32) -> Result<(), OptionsError> {
        validate_min_row_height(min_row_height)?;
        self.options.min_row_height = min_row_height;
        self.viewport.set_min_row_height(min_row_height);
        self.needs_layout = true;
        Ok(())
    }

    pub fn set_card_ratio(&mut self, card_ratio: f32) -> Result<(), OptionsError> {
        validate_card_ratio(card_ratio)?;
        self.options.card_ratio = card_ratio;
        self.viewport.set_card_ratio(card_ratio);
        self.needs_layout = true;
        Ok(())
    }

    pub fn set_end_of_list_epsilon(&mut self, epsilon: u32) {
        self.options.end_of_list_epsilon = epsilon;
    }

    /// The stored scroll offset. It may lie outside `[0, max_scroll_offset]` mid-drag.
    pub fn scroll_offset(&self) -> i64 {
        self.scroll_offset
    }

    pub fn clamped_scroll_offset(&self) -> i64 {
        self.viewport.clamp_offset(self.scroll_offset)
    }

    pub fn max_scroll_offset(&self) -> i64 {
        self.viewport.max_scroll_offset()
    }

    /// Stores a new scroll offset without clamping, then reports the elastic index and,
    /// near the bottom, the end of the list.
    pub fn set_scroll_offset<L>(&mut self, offset: i64, listener: &mut L)
    where
        L: ListListener<V> + ?Sized,
    {
        if self.scroll_offset == offset {
            return;
        }
        ltrace!(from = self.scroll_offset, to = offset, "set_scroll_offset");
        self.scroll_offset = offset;
        self.needs_layout = true;

        if let Some(index) = self.viewport.index_at_offset(offset) {
            listener.on_item_index_changed(index);
        }
        if self
            .viewport
            .is_end_reached(offset, self.options.end_of_list_epsilon)
        {
            listener.on_end_of_list_reached();
        }
    }

    pub fn set_scroll_offset_clamped<L>(&mut self, offset: i64, listener: &mut L)
    where
        L: ListListener<V> + ?Sized,
    {
        let clamped = self.viewport.clamp_offset(offset);
        self.set_scroll_offset(clamped, listener);
    }

    pub fn scroll_by<L>(&mut self, delta: i64, listener: &mut L)
    where
        L: ListListener<V> + ?Sized,
    {
        self.set_scroll_offset(self.scroll_offset.saturating_add(delta), listener);
    }

    /// Scrolls so that `index` is the fully expanded top card. Returns the applied offset.
    pub fn scroll_to_index<L>(&mut self, index: usize, listener: &mut L) -> i64
    where
        L: ListListener<V> + ?Sized,
    {
        let offset = self.viewport.row_offset(index);
        self.set_scroll_offset(offset, listener);
        offset
    }

    pub fn visible_range(&self) -> VisibleRange {
        self.viewport
            .visible_range(self.scroll_offset, self.viewport.height())
    }

    /// The index of the elastic (topmost) item.
    pub fn first_visible_index(&self) -> Option<usize> {
        self.viewport.index_at_offset(self.scroll_offset)
    }

    /// Resolves a tap at view-local `y` to an item index.
    pub fn item_at(&self, y: f32) -> Option<usize> {
        self.viewport.hit_test(self.scroll_offset, y)
    }

    pub fn slot_manager(&self) -> &SlotManager<V> {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<&Slot<V>> {
        self.slots.get(index)
    }

    /// Live slots in ascending index order.
    pub fn slots(&self) -> impl Iterator<Item = &Slot<V>> {
        self.slots.iter()
    }

    pub fn for_each_slot_metrics(&self, mut f: impl FnMut(SlotMetrics)) {
        for slot in self.slots.iter() {
            f(slot.metrics());
        }
    }

    /// Recycles every live slot so the next pass re-renders all visible items.
    ///
    /// Call this after the item source's data changed.
    pub fn notify_data_set_changed(&mut self) {
        ldebug!(live = self.slots.live_len(), "notify_data_set_changed");
        self.slots.recycle_all();
        self.needs_layout = true;
    }

    /// Drops every visual, live and pooled.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.needs_layout = true;
    }

    /// Lays out only when a state change requested it.
    pub fn layout_if_needed<S, L>(&mut self, source: &mut S, listener: &mut L) -> Option<LayoutPass>
    where
        S: ItemSource<Visual = V> + ?Sized,
        L: ListListener<V> + ?Sized,
    {
        let count_changed = source.count() != self.viewport.count();
        (self.needs_layout || count_changed).then(|| self.layout(source, listener))
    }

    /// Runs one layout pass.
    ///
    /// Re-reads the item count, evicts slots outside the visible range, binds missing
    /// slots, then measures and places every visible visual top to bottom, starting at
    /// `start * min_row_height` in content coordinates. The two elastic slots report their
    /// ratio every pass; other slots report only when their ratio changed.
    pub fn layout<S, L>(&mut self, source: &mut S, listener: &mut L) -> LayoutPass
    where
        S: ItemSource<Visual = V> + ?Sized,
        L: ListListener<V> + ?Sized,
    {
        self.set_count(source.count());
        self.needs_layout = false;

        let offset = self.clamped_scroll_offset();
        let range = self.viewport.visible_range(offset, self.viewport.height());
        let mut pass = LayoutPass {
            range,
            evicted: self.slots.sync(range),
            ..LayoutPass::default()
        };

        let width = self.viewport.width();
        let mut top = (range.start_index as i64)
            .saturating_mul(self.viewport.min_row_height() as i64);
        for index in range.start_index..range.end_index {
            let (height, ratio) = self.viewport.slot_height(index, range.start_index, offset);
            let (slot, origin) = self.slots.ensure(index, source);
            match origin {
                SlotOrigin::Live => {}
                SlotOrigin::Reused => pass.reused += 1,
                SlotOrigin::Created => pass.created += 1,
            }

            slot.visual_mut().measure(width, height);
            slot.visual_mut().place(top, width, height);
            slot.set_metrics(top, height, ratio);

            let elastic = index - range.start_index < 2;
            if slot.mark_reported(ratio) || elastic {
                listener.on_item_ratio_changed(slot.visual(), ratio);
            }
            top = top.saturating_add(height as i64);
        }

        debug_assert_eq!(self.slots.live_len(), range.len());
        ltrace!(
            start = range.start_index,
            end = range.end_index,
            evicted = pass.evicted,
            reused = pass.reused,
            created = pass.created,
            "layout"
        );
        pass
    }
}
