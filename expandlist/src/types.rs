/// Viewport size reported by the host layout pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Direction of a drag, named after the way the content moves on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollDirection {
    /// The finger moves down, earlier items come into view.
    Up,
    /// The finger moves up, later items come into view.
    Down,
}

impl ScrollDirection {
    /// Direction of a vertical finger movement of `delta_y` pixels, `None` when still.
    pub fn from_delta(delta_y: f32) -> Option<Self> {
        if delta_y > 0.0 {
            Some(Self::Up)
        } else if delta_y < 0.0 {
            Some(Self::Down)
        } else {
            None
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleRange {
    pub start_index: usize,
    pub end_index: usize, // exclusive
}

impl VisibleRange {
    pub const EMPTY: Self = Self {
        start_index: 0,
        end_index: 0,
    };

    pub fn is_empty(&self) -> bool {
        self.start_index >= self.end_index
    }

    pub fn len(&self) -> usize {
        self.end_index.saturating_sub(self.start_index)
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start_index && index < self.end_index
    }

    /// The last index in the range, if any.
    pub fn last_index(&self) -> Option<usize> {
        (!self.is_empty()).then(|| self.end_index - 1)
    }
}

/// Placement of one slot in content coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotMetrics {
    pub index: usize,
    /// Top edge in content coordinates. Subtract the scroll offset for screen space.
    pub top: i64,
    pub height: u32,
    /// Reveal ratio in `[0, 1]`: 1 is a fully expanded card, 0 a collapsed row.
    pub ratio: f32,
}

impl SlotMetrics {
    pub fn bottom(&self) -> i64 {
        self.top.saturating_add(self.height as i64)
    }
}
