use crate::{OptionsError, Rect};

pub const DEFAULT_MIN_ROW_HEIGHT: u32 = 300;
pub const DEFAULT_CARD_RATIO: f32 = 1.75;
pub const DEFAULT_END_OF_LIST_EPSILON: u32 = 10;

/// Configuration for [`crate::ExpandList`].
///
/// Every field is plain data, so options can be cloned, compared and (with
/// `feature = "serde"`) deserialized from host configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ExpandListOptions {
    /// Height of a collapsed row. Also the scroll distance that collapses one card.
    pub min_row_height: u32,
    /// Card aspect ratio: the expanded card is `viewport_width / card_ratio` tall.
    pub card_ratio: f32,
    /// Distance from the max scroll offset at which `on_end_of_list_reached` fires.
    pub end_of_list_epsilon: u32,
    /// The initial viewport size, before the host reports one.
    pub initial_rect: Option<Rect>,
    pub initial_offset: i64,
}

impl Default for ExpandListOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpandListOptions {
    pub const fn new() -> Self {
        Self {
            min_row_height: DEFAULT_MIN_ROW_HEIGHT,
            card_ratio: DEFAULT_CARD_RATIO,
            end_of_list_epsilon: DEFAULT_END_OF_LIST_EPSILON,
            initial_rect: None,
            initial_offset: 0,
        }
    }

    pub fn with_min_row_height(mut self, min_row_height: u32) -> Self {
        self.min_row_height = min_row_height;
        self
    }

    pub fn with_card_ratio(mut self, card_ratio: f32) -> Self {
        self.card_ratio = card_ratio;
        self
    }

    pub fn with_end_of_list_epsilon(mut self, epsilon: u32) -> Self {
        self.end_of_list_epsilon = epsilon;
        self
    }

    pub fn with_initial_rect(mut self, initial_rect: Option<Rect>) -> Self {
        self.initial_rect = initial_rect;
        self
    }

    pub fn with_initial_offset(mut self, initial_offset: i64) -> Self {
        self.initial_offset = initial_offset;
        self
    }

    pub fn validate(&self) -> Result<(), OptionsError> {
        validate_min_row_height(self.min_row_height)?;
        validate_card_ratio(self.card_ratio)
    }
}

pub(crate) fn validate_min_row_height(min_row_height: u32) -> Result<(), OptionsError> {
    if min_row_height == 0 {
        lwarn!("rejected min_row_height = 0");
        return Err(OptionsError::ZeroMinRowHeight);
    }
    Ok(())
}

pub(crate) fn validate_card_ratio(card_ratio: f32) -> Result<(), OptionsError> {
    if !card_ratio.is_finite() || card_ratio <= 0.0 {
        lwarn!(card_ratio, "rejected card_ratio");
        return Err(OptionsError::InvalidCardRatio(card_ratio));
    }
    Ok(())
}
