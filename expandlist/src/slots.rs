use alloc::collections::{BTreeMap, VecDeque};

use crate::{ItemSource, SlotMetrics, Visual, VisibleRange};

/// A visible, materialized item bound to one index.
#[derive(Clone, Debug)]
pub struct Slot<V> {
    index: usize,
    visual: V,
    top: i64,
    height: u32,
    ratio: f32,
    /// The last ratio reported to a listener, `None` until the first report.
    reported_ratio: Option<f32>,
}

impl<V> Slot<V> {
    fn new(index: usize, visual: V) -> Self {
        Self {
            index,
            visual,
            top: 0,
            height: 0,
            ratio: 0.0,
            reported_ratio: None,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn visual(&self) -> &V {
        &self.visual
    }

    pub fn visual_mut(&mut self) -> &mut V {
        &mut self.visual
    }

    pub fn metrics(&self) -> SlotMetrics {
        SlotMetrics {
            index: self.index,
            top: self.top,
            height: self.height,
            ratio: self.ratio,
        }
    }

    pub(crate) fn set_metrics(&mut self, top: i64, height: u32, ratio: f32) {
        self.top = top;
        self.height = height;
        self.ratio = ratio;
    }

    /// Records `ratio` as reported; returns `false` when it equals the previous report.
    pub(crate) fn mark_reported(&mut self, ratio: f32) -> bool {
        if self.reported_ratio == Some(ratio) {
            return false;
        }
        self.reported_ratio = Some(ratio);
        true
    }
}

/// Where [`SlotManager::ensure`] got a slot from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotOrigin {
    /// The index already had a live slot.
    Live,
    /// A visual was taken from the recycle pool and re-rendered.
    Reused,
    /// The pool was empty; the item source built a fresh visual.
    Created,
}

/// Owns the mapping from item index to live slot plus the recycle pool.
///
/// Live slots are keyed by index in an ordered map, so eviction of everything outside a
/// range is two `split_off`s rather than a scan.
#[derive(Clone, Debug)]
pub struct SlotManager<V> {
    live: BTreeMap<usize, Slot<V>>,
    pool: VecDeque<V>,
    created: usize,
}

impl<V> Default for SlotManager<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> SlotManager<V> {
    pub fn new() -> Self {
        Self {
            live: BTreeMap::new(),
            pool: VecDeque::new(),
            created: 0,
        }
    }

    pub fn live_len(&self) -> usize {
        self.live.len()
    }

    pub fn pooled_len(&self) -> usize {
        self.pool.len()
    }

    /// Number of visuals ever built without a recycled hint.
    pub fn created(&self) -> usize {
        self.created
    }

    pub fn get(&self, index: usize) -> Option<&Slot<V>> {
        self.live.get(&index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Slot<V>> {
        self.live.get_mut(&index)
    }

    /// Live slots in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = &Slot<V>> {
        self.live.values()
    }

    pub fn live_indexes(&self) -> impl Iterator<Item = usize> + '_ {
        self.live.keys().copied()
    }
}

impl<V: Visual> SlotManager<V> {
    /// Evicts every live slot outside `range` into the recycle pool.
    ///
    /// Returns the number of evicted slots.
    pub fn sync(&mut self, range: VisibleRange) -> usize {
        let mut kept = self.live.split_off(&range.start_index);
        let below = kept.split_off(&range.end_index.max(range.start_index));
        let above = core::mem::replace(&mut self.live, kept);

        let evicted = above.len() + below.len();
        for slot in above.into_values().chain(below.into_values()) {
            self.release(slot.visual);
        }
        evicted
    }

    /// Moves every live slot into the recycle pool.
    pub fn recycle_all(&mut self) -> usize {
        let live = core::mem::take(&mut self.live);
        let evicted = live.len();
        for slot in live.into_values() {
            self.release(slot.visual);
        }
        evicted
    }

    /// Drops every live and pooled visual.
    pub fn clear(&mut self) {
        self.live.clear();
        self.pool.clear();
    }

    fn release(&mut self, mut visual: V) {
        visual.recycle();
        self.pool.push_back(visual);
    }

    /// Returns the live slot for `index`, binding one first when there is none.
    ///
    /// A new binding reuses the oldest pooled visual, or asks `source` for a fresh one
    /// when the pool is empty.
    pub fn ensure<S>(&mut self, index: usize, source: &mut S) -> (&mut Slot<V>, SlotOrigin)
    where
        S: ItemSource<Visual = V> + ?Sized,
    {
        use alloc::collections::btree_map::Entry;

        match self.live.entry(index) {
            Entry::Occupied(entry) => (entry.into_mut(), SlotOrigin::Live),
            Entry::Vacant(entry) => {
                let recycled = self.pool.pop_front();
                let origin = if recycled.is_some() {
                    SlotOrigin::Reused
                } else {
                    self.created = self.created.saturating_add(1);
                    SlotOrigin::Created
                };
                let visual = source.render_item(index, recycled);
                (entry.insert(Slot::new(index, visual)), origin)
            }
        }
    }
}
