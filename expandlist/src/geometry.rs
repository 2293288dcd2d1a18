use crate::VisibleRange;

/// Pure geometry of the list for one viewport size, item count and row configuration.
///
/// Every query clamps the scroll offset it is given to `[0, max_scroll_offset]`, so callers
/// may pass the raw (possibly overscrolled) offset straight through.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportState {
    width: u32,
    height: u32,
    count: usize,
    min_row_height: u32,
    card_max_height: u32,
    content_height: i64,
    max_scroll_offset: i64,
}

impl ViewportState {
    /// `min_row_height` must be non-zero and `card_ratio` positive; [`crate::ExpandList`]
    /// validates both before building a state.
    pub fn new(width: u32, height: u32, count: usize, min_row_height: u32, card_ratio: f32) -> Self {
        debug_assert!(min_row_height > 0, "min_row_height must be non-zero");
        let mut state = Self {
            width,
            height,
            count,
            min_row_height: min_row_height.max(1),
            card_max_height: card_height(width, card_ratio),
            content_height: 0,
            max_scroll_offset: 0,
        };
        state.recompute();
        state
    }

    fn recompute(&mut self) {
        let row = self.min_row_height as i64;
        let view = self.height as i64;
        self.content_height = if self.count > 0 {
            (self.count as i64 - 1).saturating_mul(row).saturating_add(view)
        } else {
            view
        };
        self.max_scroll_offset = self.content_height.saturating_sub(view).max(0);
    }

    pub(crate) fn set_size(&mut self, width: u32, height: u32, card_ratio: f32) {
        self.width = width;
        self.height = height;
        self.card_max_height = card_height(width, card_ratio);
        self.recompute();
    }

    pub(crate) fn set_count(&mut self, count: usize) {
        self.count = count;
        self.recompute();
    }

    pub(crate) fn set_min_row_height(&mut self, min_row_height: u32) {
        self.min_row_height = min_row_height.max(1);
        self.recompute();
    }

    pub(crate) fn set_card_ratio(&mut self, card_ratio: f32) {
        self.card_max_height = card_height(self.width, card_ratio);
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn min_row_height(&self) -> u32 {
        self.min_row_height
    }

    pub fn card_max_height(&self) -> u32 {
        self.card_max_height
    }

    pub fn content_height(&self) -> i64 {
        self.content_height
    }

    pub fn max_scroll_offset(&self) -> i64 {
        self.max_scroll_offset
    }

    pub fn clamp_offset(&self, offset: i64) -> i64 {
        offset.clamp(0, self.max_scroll_offset)
    }

    /// Content offset at which row `index` sits when it is the topmost, fully expanded card.
    pub fn row_offset(&self, index: usize) -> i64 {
        (index as i64)
            .saturating_mul(self.min_row_height as i64)
            .clamp(0, self.max_scroll_offset)
    }

    /// Index of the elastic (topmost) item at `offset`.
    pub fn index_at_offset(&self, offset: i64) -> Option<usize> {
        if self.count == 0 {
            return None;
        }
        let offset = self.clamp_offset(offset);
        Some(((offset / self.min_row_height as i64) as usize).min(self.count - 1))
    }

    /// The row boundary nearest to `offset` (half rows round forward).
    pub fn snap_index(&self, offset: i64) -> Option<usize> {
        if self.count == 0 {
            return None;
        }
        let offset = self.clamp_offset(offset);
        let row = self.min_row_height as i64;
        let index = (offset.saturating_mul(2).saturating_add(row)) / row.saturating_mul(2);
        Some((index as usize).min(self.count - 1))
    }

    /// Whether `offset` is within `epsilon` pixels of the end of the list.
    pub fn is_end_reached(&self, offset: i64, epsilon: u32) -> bool {
        self.count > 0 && self.max_scroll_offset - self.clamp_offset(offset) <= epsilon as i64
    }

    /// Indexes that need a live slot at `offset` for a viewport `height` pixels tall.
    ///
    /// The range always covers every pixel row of `[offset, offset + height)`; it may carry
    /// up to one trailing row of slack.
    pub fn visible_range(&self, offset: i64, height: u32) -> VisibleRange {
        if self.count == 0 || height == 0 {
            return VisibleRange::EMPTY;
        }
        let row = self.min_row_height as i64;
        let card = self.card_max_height as i64;
        let offset = self.clamp_offset(offset);

        let start = ((offset / row) as usize).min(self.count - 1);
        let local = offset - start as i64 * row;
        // Pixels left uncovered below the elastic pair (`start`, `start + 1`).
        let uncovered = local + height as i64 - (row + card);
        let added = if uncovered > 0 {
            (uncovered as u64).div_ceil(row as u64) as usize
        } else {
            0
        };
        let last = start.saturating_add(added).saturating_add(1).min(self.count - 1);
        VisibleRange {
            start_index: start,
            end_index: last + 1,
        }
    }

    /// Height and reveal ratio of slot `index` when `start` is the elastic item at `offset`.
    ///
    /// Slot `start` shrinks from the card height to the row height as `offset` crosses its
    /// row, slot `start + 1` absorbs the freed space, every other slot is a plain row.
    pub fn slot_height(&self, index: usize, start: usize, offset: i64) -> (u32, f32) {
        let row = self.min_row_height as i64;
        let card = self.card_max_height as i64;
        if index == start {
            let local = self.local_offset(start, offset);
            let height = (card * (row - local) + row * local) / row;
            (height.max(0) as u32, 1.0 - local as f32 / row as f32)
        } else if start.checked_add(1) == Some(index) {
            let (elastic, _) = self.slot_height(start, start, offset);
            let height = (card + row - elastic as i64).max(0);
            let ratio = if card == row {
                0.0
            } else {
                ((height - row) as f32 / (card - row) as f32).clamp(0.0, 1.0)
            };
            (height as u32, ratio)
        } else {
            (self.min_row_height, 0.0)
        }
    }

    /// How far `offset` has scrolled into row `start`, in `[0, min_row_height]`.
    fn local_offset(&self, start: usize, offset: i64) -> i64 {
        let row = self.min_row_height as i64;
        let offset = self.clamp_offset(offset);
        offset
            .saturating_sub((start as i64).saturating_mul(row))
            .clamp(0, row)
    }

    /// Resolves a tap at view-local `y` to an item index.
    ///
    /// Taps inside the expanded card area hit the elastic item, taps below it count rows
    /// from the card's bottom edge.
    pub fn hit_test(&self, offset: i64, y: f32) -> Option<usize> {
        if self.count == 0 {
            return None;
        }
        let row = self.min_row_height as i64;
        let card = self.card_max_height as i64;
        let base = self.clamp_offset(offset) / row;
        let y = y as i64;
        let below = if y > card { (y - card) / row + 1 } else { 0 };
        let index = base.saturating_add(below).clamp(0, self.count as i64 - 1);
        Some(index as usize)
    }
}

fn card_height(width: u32, card_ratio: f32) -> u32 {
    if card_ratio.is_nan() || card_ratio <= 0.0 {
        return 0;
    }
    (width as f32 / card_ratio) as u32
}
