//! A headless, virtualized list whose topmost row expands into a card.
//!
//! For fling physics, gesture handling and an event-driven controller, see the
//! `expandlist-adapter` crate.
//!
//! The list keeps memory and layout cost bounded to the visible window:
//! - [`ViewportState`] holds the pure geometry (content height, max offset, visible range,
//!   per-slot height and reveal ratio).
//! - [`SlotManager`] maps visible item indexes to live visual objects and recycles evicted
//!   ones through a FIFO pool.
//! - [`ExpandList`] drives both on every layout pass and emits listener notifications.
//!
//! It is UI-agnostic. The embedding toolkit provides:
//! - viewport size (width/height)
//! - an [`ItemSource`] that renders an item into a (possibly recycled) [`Visual`]
//! - optionally a [`ListListener`] to observe scroll, ratio and click notifications
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod error;
mod geometry;
mod list;
mod options;
mod port;
mod slots;
mod types;

#[cfg(test)]
mod tests;

pub use error::OptionsError;
pub use geometry::ViewportState;
pub use list::{ExpandList, LayoutPass};
pub use options::{
    DEFAULT_CARD_RATIO, DEFAULT_END_OF_LIST_EPSILON, DEFAULT_MIN_ROW_HEIGHT, ExpandListOptions,
};
pub use port::{ItemSource, ListListener, Visual};
pub use slots::{Slot, SlotManager, SlotOrigin};
pub use types::{Rect, ScrollDirection, SlotMetrics, VisibleRange};
